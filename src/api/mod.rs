//! REST API client module for the carrier's tracking services.
//!
//! This module provides the `ApiClient` for obtaining an OAuth bearer
//! token and submitting batch tracking requests.

pub mod client;
pub mod error;

pub use client::ApiClient;
pub use error::ApiError;
