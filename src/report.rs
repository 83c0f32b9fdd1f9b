//! Projection of tracking records into flat CSV report rows.
//!
//! One row per input tracking number, in input order. Every projected
//! field has a deterministic fallback (empty string or zero) when its
//! source group is absent, so a number the carrier knows nothing about
//! still produces a row.

use std::collections::{HashMap, HashSet};

use chrono::DateTime;
use tracing::warn;

use crate::models::{TrackingRecord, DATE_TYPE_ACTUAL_DELIVERY, DATE_TYPE_SHIP};
use crate::utils::csv::join_row;

const MILLIS_PER_DAY: f64 = 86_400_000.0;

const HEADER: [&str; 13] = [
    "trackingNumber",
    "status",
    "shipDate",
    "standardTransitDate",
    "actualDeliveryDate",
    "delayDays",
    "serviceType",
    "weightValue",
    "weightUnit",
    "dimLength",
    "dimWidth",
    "dimHeight",
    "dimUnit",
];

/// One flattened report row.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    pub tracking_number: String,
    pub status: String,
    pub ship_date: String,
    pub standard_transit_date: String,
    pub actual_delivery_date: String,
    pub delay_days: f64,
    pub service_type: String,
    pub weight_value: String,
    pub weight_unit: String,
    pub dim_length: i64,
    pub dim_width: i64,
    pub dim_height: i64,
    pub dim_unit: String,
}

impl ReportRow {
    /// Project a tracking record into a flat row. A missing record (the
    /// carrier returned nothing for this number) yields an all-default row.
    pub fn project(tracking_number: &str, record: Option<&TrackingRecord>) -> Self {
        let result = record.and_then(|r| r.first_result());

        let status = result.and_then(|r| r.status()).unwrap_or_default();
        let ship_date = result
            .and_then(|r| r.date_of(DATE_TYPE_SHIP))
            .unwrap_or_default();
        let standard_transit_date = result
            .and_then(|r| r.standard_transit_ends())
            .unwrap_or_default();
        let actual_delivery_date = result
            .and_then(|r| r.date_of(DATE_TYPE_ACTUAL_DELIVERY))
            .unwrap_or_default();
        let service_type = result
            .and_then(|r| r.service_description())
            .unwrap_or_default();

        let weight = result.and_then(|r| r.first_weight());
        let dimensions = result.and_then(|r| r.first_dimensions());

        Self {
            tracking_number: tracking_number.to_string(),
            status: status.to_string(),
            ship_date: ship_date.to_string(),
            standard_transit_date: standard_transit_date.to_string(),
            actual_delivery_date: actual_delivery_date.to_string(),
            delay_days: delay_days(actual_delivery_date, standard_transit_date),
            service_type: service_type.to_string(),
            weight_value: weight.map(|w| w.value.clone()).unwrap_or_default(),
            weight_unit: weight.map(|w| w.units.clone()).unwrap_or_default(),
            dim_length: dimensions.map(|d| d.length).unwrap_or_default(),
            dim_width: dimensions.map(|d| d.width).unwrap_or_default(),
            dim_height: dimensions.map(|d| d.height).unwrap_or_default(),
            dim_unit: dimensions.map(|d| d.units.clone()).unwrap_or_default(),
        }
    }

    fn to_csv_line(&self) -> String {
        let delay = self.delay_days.to_string();
        let length = self.dim_length.to_string();
        let width = self.dim_width.to_string();
        let height = self.dim_height.to_string();
        join_row([
            self.tracking_number.as_str(),
            self.status.as_str(),
            self.ship_date.as_str(),
            self.standard_transit_date.as_str(),
            self.actual_delivery_date.as_str(),
            delay.as_str(),
            self.service_type.as_str(),
            self.weight_value.as_str(),
            self.weight_unit.as_str(),
            length.as_str(),
            width.as_str(),
            height.as_str(),
            self.dim_unit.as_str(),
        ])
    }
}

/// Signed delivery delay in fractional days, positive when late.
/// Zero unless both dates are present and parseable.
fn delay_days(actual_delivery: &str, standard_transit: &str) -> f64 {
    if actual_delivery.is_empty() || standard_transit.is_empty() {
        return 0.0;
    }
    match (
        DateTime::parse_from_rfc3339(actual_delivery),
        DateTime::parse_from_rfc3339(standard_transit),
    ) {
        (Ok(actual), Ok(transit)) => {
            (actual.timestamp_millis() - transit.timestamp_millis()) as f64 / MILLIS_PER_DAY
        }
        _ => {
            warn!(
                actual = actual_delivery,
                transit = standard_transit,
                "Unparseable delivery/transit timestamp, delay set to 0"
            );
            0.0
        }
    }
}

/// Render the full CSV report: header plus one row per input tracking
/// number, in input order, duplicates collapsed to their first occurrence.
pub fn render_csv(
    tracking_numbers: &[String],
    trackings: &HashMap<String, TrackingRecord>,
) -> String {
    let mut lines = Vec::with_capacity(tracking_numbers.len() + 1);
    lines.push(join_row(HEADER));

    let mut seen = HashSet::new();
    for number in tracking_numbers {
        if !seen.insert(number.as_str()) {
            continue;
        }
        lines.push(ReportRow::project(number, trackings.get(number)).to_csv_line());
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}
