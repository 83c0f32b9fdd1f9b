//! Run configuration sourced from the process environment.
//!
//! Credentials come from `FEDEX_CLIENT_ID` / `FEDEX_CLIENT_SECRET`
//! (a `.env` file is loaded if present). Endpoint URLs and file paths
//! have production defaults but can be overridden through the
//! environment, which lets tests point the client at a local mock server.

use std::path::PathBuf;

use anyhow::{anyhow, Result};

/// FedEx OAuth token endpoint
const DEFAULT_AUTH_URL: &str = "https://apis.fedex.com/oauth/token";

/// FedEx batch tracking endpoint
const DEFAULT_TRACK_URL: &str = "https://apis.fedex.com/track/v1/trackingnumbers";

/// Default input file: newline-separated tracking numbers
const DEFAULT_INPUT_FILE: &str = "input.csv";

/// Default output file, overwritten on each successful run
const DEFAULT_OUTPUT_FILE: &str = "trackings.csv";

#[derive(Debug, Clone)]
pub struct Config {
    pub client_id: String,
    pub client_secret: String,
    pub auth_url: String,
    pub track_url: String,
    pub input_path: PathBuf,
    pub output_path: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            client_id: require_env("FEDEX_CLIENT_ID")?,
            client_secret: require_env("FEDEX_CLIENT_SECRET")?,
            auth_url: env_or("FEDEX_AUTH_URL", DEFAULT_AUTH_URL),
            track_url: env_or("FEDEX_TRACK_URL", DEFAULT_TRACK_URL),
            input_path: PathBuf::from(env_or("TRACKBATCH_INPUT", DEFAULT_INPUT_FILE)),
            output_path: PathBuf::from(env_or("TRACKBATCH_OUTPUT", DEFAULT_OUTPUT_FILE)),
        })
    }
}

fn require_env(name: &str) -> Result<String> {
    std::env::var(name).map_err(|_| anyhow!("Missing required environment variable {}", name))
}

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_env_requires_credentials() {
        // Credential vars are deliberately absent in the test environment
        std::env::remove_var("FEDEX_CLIENT_ID");
        std::env::remove_var("FEDEX_CLIENT_SECRET");
        let err = Config::from_env().unwrap_err();
        assert!(err.to_string().contains("FEDEX_CLIENT_ID"));
    }

    #[test]
    fn env_or_falls_back_to_default() {
        assert_eq!(
            env_or("TRACKBATCH_NO_SUCH_VAR", DEFAULT_INPUT_FILE),
            "input.csv"
        );
    }
}
