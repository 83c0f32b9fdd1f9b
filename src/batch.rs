//! Sequential batch collection of tracking records.
//!
//! The input list is split into consecutive batches of at most
//! [`BATCH_SIZE`] numbers, one authenticated request per batch, issued
//! strictly one at a time. Results merge into a single map keyed by
//! tracking number; a later batch silently overwrites an earlier entry
//! if the same number appears twice in the input.

use std::collections::HashMap;

use anyhow::{Context, Result};
use tracing::info;

use crate::api::ApiClient;
use crate::models::TrackingRecord;

/// Maximum tracking numbers per request, the upstream API's batch limit.
pub const BATCH_SIZE: usize = 30;

/// Split the input into consecutive batches of at most [`BATCH_SIZE`].
/// Order is preserved: concatenating the batches reproduces the input.
pub fn batches(tracking_numbers: &[String]) -> impl Iterator<Item = &[String]> {
    tracking_numbers.chunks(BATCH_SIZE)
}

/// Query the carrier for every input number, one batch at a time.
///
/// Any request or validation failure aborts the whole run; there is no
/// per-batch retry and no partial-result recovery.
pub async fn collect_trackings(
    client: &ApiClient,
    tracking_numbers: &[String],
) -> Result<HashMap<String, TrackingRecord>> {
    let mut trackings = HashMap::new();

    for (i, batch) in batches(tracking_numbers).enumerate() {
        info!(batch = i + 1, size = batch.len(), "Requesting tracking batch");
        let records = client
            .track(batch)
            .await
            .with_context(|| format!("Tracking batch {} failed", i + 1))?;

        for record in records {
            trackings.insert(record.tracking_number.clone(), record);
        }
    }

    Ok(trackings)
}
