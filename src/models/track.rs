//! Typed wire schema for the FedEx Track API (v1).
//!
//! These types mirror the carrier's response structure. Most groups are
//! optional on the wire; the accessor methods on [`TrackResult`] hide the
//! nesting and give the report layer one lookup per projected field.

use serde::Deserialize;

/// Date event type for the ship date.
pub const DATE_TYPE_SHIP: &str = "SHIP";

/// Date event type for the actual delivery date.
pub const DATE_TYPE_ACTUAL_DELIVERY: &str = "ACTUAL_DELIVERY";

/// Everything the carrier returned for one tracking number.
#[derive(Debug, Clone, Deserialize)]
pub struct TrackingRecord {
    #[serde(rename = "trackingNumber")]
    pub tracking_number: String,
    #[serde(rename = "trackResults")]
    pub track_results: Vec<TrackResult>,
}

impl TrackingRecord {
    /// The carrier lists results most-recent first; only the first one
    /// feeds the report.
    pub fn first_result(&self) -> Option<&TrackResult> {
        self.track_results.first()
    }
}

/// One track result: a bag of optional nested groups.
#[derive(Debug, Clone, Deserialize)]
pub struct TrackResult {
    #[serde(rename = "latestStatusDetail")]
    pub latest_status_detail: Option<LatestStatusDetail>,
    #[serde(rename = "dateAndTimes", default)]
    pub date_and_times: Vec<DateAndTime>,
    #[serde(rename = "scanEvents", default)]
    pub scan_events: Vec<ScanEvent>,
    #[serde(rename = "standardTransitTimeWindow")]
    pub standard_transit_time_window: Option<TransitTimeWindow>,
    #[serde(rename = "serviceDetail")]
    pub service_detail: Option<ServiceDetail>,
    #[serde(rename = "packageDetails")]
    pub package_details: Option<PackageDetails>,
    pub error: Option<TrackError>,
}

impl TrackResult {
    /// Locale-formatted status string, if the carrier reported one.
    pub fn status(&self) -> Option<&str> {
        self.latest_status_detail
            .as_ref()
            .map(|d| d.status_by_locale.as_str())
    }

    /// Derived status code (e.g. `DL` for delivered).
    pub fn derived_code(&self) -> Option<&str> {
        self.latest_status_detail
            .as_ref()
            .map(|d| d.derived_code.as_str())
    }

    /// Timestamp of the first date event with the given type tag.
    pub fn date_of(&self, event_type: &str) -> Option<&str> {
        self.date_and_times
            .iter()
            .find(|d| d.event_type == event_type)
            .map(|d| d.date_time.as_str())
    }

    /// End of the standard transit window, if the carrier committed to one.
    pub fn standard_transit_ends(&self) -> Option<&str> {
        self.standard_transit_time_window
            .as_ref()
            .and_then(|w| w.window.as_ref())
            .and_then(|w| w.ends.as_deref())
    }

    /// Human-readable service description.
    pub fn service_description(&self) -> Option<&str> {
        self.service_detail.as_ref().and_then(|s| s.description.as_deref())
    }

    /// First weight entry of the package detail group.
    pub fn first_weight(&self) -> Option<&Weight> {
        self.package_details
            .as_ref()
            .and_then(|p| p.weight_and_dimensions.as_ref())
            .and_then(|w| w.weight.first())
    }

    /// First dimension entry of the package detail group.
    pub fn first_dimensions(&self) -> Option<&Dimensions> {
        self.package_details
            .as_ref()
            .and_then(|p| p.weight_and_dimensions.as_ref())
            .and_then(|w| w.dimensions.first())
    }
}

/// All four fields are required whenever the group is present.
#[derive(Debug, Clone, Deserialize)]
pub struct LatestStatusDetail {
    pub code: String,
    #[serde(rename = "derivedCode")]
    pub derived_code: String,
    #[serde(rename = "statusByLocale")]
    pub status_by_locale: String,
    pub description: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DateAndTime {
    #[serde(rename = "type")]
    pub event_type: String,
    #[serde(rename = "dateTime")]
    pub date_time: String,
}

/// Detailed scan event, present when `includeDetailedScans` is requested.
/// Carried on the record but not projected into the report.
#[derive(Debug, Clone, Deserialize)]
pub struct ScanEvent {
    pub date: String,
    #[serde(rename = "eventType")]
    pub event_type: String,
    #[serde(rename = "derivedStatusCode")]
    pub derived_status_code: Option<String>,
    #[serde(rename = "eventDescription")]
    pub event_description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TransitTimeWindow {
    pub window: Option<DateWindow>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DateWindow {
    pub begins: Option<String>,
    pub ends: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceDetail {
    #[serde(rename = "type")]
    pub service_type: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "shortDescription")]
    pub short_description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PackageDetails {
    #[serde(rename = "weightAndDimensions")]
    pub weight_and_dimensions: Option<WeightAndDimensions>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeightAndDimensions {
    #[serde(default)]
    pub weight: Vec<Weight>,
    #[serde(default)]
    pub dimensions: Vec<Dimensions>,
}

/// The carrier reports weight values as strings (e.g. `"45.5"`).
#[derive(Debug, Clone, Deserialize)]
pub struct Weight {
    pub value: String,
    pub units: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Dimensions {
    pub length: i64,
    pub width: i64,
    pub height: i64,
    pub units: String,
}

/// Per-number error reported inside an otherwise successful response.
#[derive(Debug, Clone, Deserialize)]
pub struct TrackError {
    pub code: String,
    pub message: String,
}
