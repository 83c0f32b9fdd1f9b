//! API client for communicating with the FedEx Track API.
//!
//! This module provides the `ApiClient` struct for obtaining an OAuth
//! bearer token and submitting authenticated batch tracking requests.

use anyhow::{Context, Result};
use reqwest::{header, Client};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::config::Config;
use crate::models::TrackingRecord;

use super::ApiError;

/// HTTP request timeout in seconds.
/// 30s allows for slow API responses while failing fast enough for good UX.
const REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Deserialize)]
struct AuthResponse {
    #[serde(rename = "access_token")]
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct TrackReply {
    output: TrackOutput,
}

#[derive(Debug, Deserialize)]
struct TrackOutput {
    // Kept as raw values so each element can be validated individually,
    // with the offending element named in the error.
    #[serde(rename = "completeTrackResults", default)]
    complete_track_results: Vec<Value>,
}

/// API client for the carrier's OAuth and tracking endpoints.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    auth_url: String,
    track_url: String,
    token: Option<String>,
}

impl ApiClient {
    /// Create a new API client pointed at the configured endpoints.
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            auth_url: config.auth_url.clone(),
            track_url: config.track_url.clone(),
            token: None,
        })
    }

    /// Create a new ApiClient with the given token, sharing the connection pool.
    pub fn with_token(&self, token: String) -> Self {
        Self {
            client: self.client.clone(), // Cheap clone, shares connection pool
            auth_url: self.auth_url.clone(),
            track_url: self.track_url.clone(),
            token: Some(token),
        }
    }

    /// Exchange client credentials for a bearer token.
    ///
    /// One call per run; the token is never refreshed, which bounds run
    /// duration to the token's validity window.
    pub async fn authenticate(&self, client_id: &str, client_secret: &str) -> Result<String> {
        let response = self
            .client
            .post(&self.auth_url)
            .form(&[
                ("grant_type", "client_credentials"),
                ("client_id", client_id),
                ("client_secret", client_secret),
            ])
            .send()
            .await
            .map_err(ApiError::NetworkError)
            .context("Failed to send authentication request")?;

        let response = Self::check_response(response).await?;

        let auth: AuthResponse = response
            .json()
            .await
            .context("Failed to parse token response")?;

        Ok(auth.access_token)
    }

    fn auth_headers(&self) -> Result<header::HeaderMap> {
        let mut headers = header::HeaderMap::new();
        if let Some(ref token) = self.token {
            headers.insert(
                header::AUTHORIZATION,
                header::HeaderValue::from_str(&format!("Bearer {}", token))?,
            );
        }
        Ok(headers)
    }

    /// Check if response is successful, returning an error with body if not.
    async fn check_response(response: reqwest::Response) -> Result<reqwest::Response> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body).into())
        }
    }

    /// Submit one batch of tracking numbers and return the validated records.
    ///
    /// Each element of the response list is validated separately so that a
    /// schema mismatch names the offending result instead of failing the
    /// whole body with a line/column position.
    pub async fn track(&self, tracking_numbers: &[String]) -> Result<Vec<TrackingRecord>> {
        let tracking_info: Vec<Value> = tracking_numbers
            .iter()
            .map(|n| {
                serde_json::json!({
                    "trackingNumberInfo": { "trackingNumber": n }
                })
            })
            .collect();

        let body = serde_json::json!({
            "trackingInfo": tracking_info,
            "includeDetailedScans": true,
        });

        let response = self
            .client
            .post(&self.track_url)
            .headers(self.auth_headers()?)
            .json(&body)
            .send()
            .await
            .map_err(ApiError::NetworkError)
            .context("Failed to send tracking request")?;

        let response = Self::check_response(response).await?;

        let text = response
            .text()
            .await
            .map_err(ApiError::NetworkError)
            .context("Failed to read tracking response body")?;
        let reply: TrackReply = serde_json::from_str(&text)
            .context("Failed to parse tracking response envelope")?;

        let mut records = Vec::with_capacity(reply.output.complete_track_results.len());
        for (index, value) in reply.output.complete_track_results.into_iter().enumerate() {
            let tracking_number = value
                .get("trackingNumber")
                .and_then(Value::as_str)
                .unwrap_or("<unknown>")
                .to_string();

            match serde_json::from_value::<TrackingRecord>(value.clone()) {
                Ok(record) => records.push(record),
                Err(e) => {
                    debug!(payload = %value, "Track result failed schema validation");
                    return Err(ApiError::SchemaMismatch {
                        index,
                        tracking_number,
                        detail: e.to_string(),
                    }
                    .into());
                }
            }
        }

        Ok(records)
    }
}
