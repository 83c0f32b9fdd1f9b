//! Data models for carrier tracking responses.
//!
//! - `TrackingRecord`, `TrackResult`: typed wire schema for the track API
//! - `DeliveryStatus`: derived-status code map

pub mod status;
pub mod track;

pub use status::DeliveryStatus;
pub use track::{TrackResult, TrackingRecord, DATE_TYPE_ACTUAL_DELIVERY, DATE_TYPE_SHIP};
