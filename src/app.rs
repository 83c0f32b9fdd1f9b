//! End-to-end run orchestration: read the input list, authenticate,
//! collect tracking records batch by batch, project them into CSV, and
//! write the report. Strictly sequential; any failure aborts the run
//! before the output file is touched.

use anyhow::{Context, Result};
use tracing::info;

use crate::api::ApiClient;
use crate::batch;
use crate::config::Config;
use crate::models::DeliveryStatus;
use crate::report;

pub async fn run(config: &Config) -> Result<()> {
    let tracking_numbers = read_input(config)?;
    info!(
        count = tracking_numbers.len(),
        path = %config.input_path.display(),
        "Loaded tracking numbers"
    );

    let client = ApiClient::new(config)?;
    let token = client
        .authenticate(&config.client_id, &config.client_secret)
        .await
        .context("Authentication failed")?;
    let client = client.with_token(token);

    let trackings = batch::collect_trackings(&client, &tracking_numbers).await?;

    let delivered = trackings
        .values()
        .filter(|r| {
            r.first_result()
                .and_then(|t| t.derived_code())
                .and_then(DeliveryStatus::from_code)
                == Some(DeliveryStatus::Delivered)
        })
        .count();
    info!(
        tracked = trackings.len(),
        delivered,
        "Tracking collection complete"
    );

    let csv = report::render_csv(&tracking_numbers, &trackings);
    write_report(&config.output_path, &csv)?;
    info!(path = %config.output_path.display(), "Report written");

    Ok(())
}

/// Overwrite the report atomically: write a sibling temp file, then rename
/// over the target, so a crash mid-write never leaves a partial report.
fn write_report(output_path: &std::path::Path, csv: &str) -> Result<()> {
    let tmp_path = output_path.with_extension("tmp");
    std::fs::write(&tmp_path, csv)
        .with_context(|| format!("Failed to write report to {}", tmp_path.display()))?;
    std::fs::rename(&tmp_path, output_path).with_context(|| {
        format!(
            "Failed to move report into place at {}",
            output_path.display()
        )
    })?;
    Ok(())
}

/// Read the newline-separated tracking number list, skipping blank lines.
fn read_input(config: &Config) -> Result<Vec<String>> {
    let contents = std::fs::read_to_string(&config.input_path).with_context(|| {
        format!(
            "Failed to read input file {}",
            config.input_path.display()
        )
    })?;

    Ok(contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn write_input(dir: &tempfile::TempDir, numbers: &[&str]) -> std::path::PathBuf {
        let path = dir.path().join("input.csv");
        std::fs::write(&path, numbers.join("\n")).unwrap();
        path
    }

    fn config_for(server: &MockServer, dir: &tempfile::TempDir, numbers: &[&str]) -> Config {
        Config {
            client_id: "id".into(),
            client_secret: "secret".into(),
            auth_url: format!("{}/oauth/token", server.uri()),
            track_url: format!("{}/track/v1/trackingnumbers", server.uri()),
            input_path: write_input(dir, numbers),
            output_path: dir.path().join("trackings.csv"),
        }
    }

    async fn mount_auth(server: &MockServer) {
        Mock::given(method("POST"))
            .and(path("/oauth/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "token-abc"
            })))
            .mount(server)
            .await;
    }

    fn delivered_reply(tracking_number: &str) -> serde_json::Value {
        serde_json::json!({
            "output": {
                "completeTrackResults": [
                    {
                        "trackingNumber": tracking_number,
                        "trackResults": [
                            {
                                "latestStatusDetail": {
                                    "code": "DL",
                                    "derivedCode": "DL",
                                    "statusByLocale": "Delivered",
                                    "description": "Delivered"
                                },
                                "dateAndTimes": [
                                    { "type": "ACTUAL_DELIVERY", "dateTime": "2024-01-10T00:00:00Z" }
                                ],
                                "standardTransitTimeWindow": {
                                    "window": { "ends": "2024-01-08T00:00:00Z" }
                                }
                            }
                        ]
                    }
                ]
            }
        })
    }

    #[tokio::test]
    async fn full_run_writes_expected_csv() {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().unwrap();
        mount_auth(&server).await;
        Mock::given(method("POST"))
            .and(path("/track/v1/trackingnumbers"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(delivered_reply("794000000001")),
            )
            .mount(&server)
            .await;

        let config = config_for(&server, &dir, &["794000000001", "", "  "]);
        run(&config).await.unwrap();

        // The temp file used for the atomic overwrite must not linger
        assert!(!config.output_path.with_extension("tmp").exists());

        let csv = std::fs::read_to_string(&config.output_path).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0],
            "trackingNumber,status,shipDate,standardTransitDate,actualDeliveryDate,\
             delayDays,serviceType,weightValue,weightUnit,dimLength,dimWidth,dimHeight,dimUnit"
        );
        assert_eq!(
            lines[1],
            "794000000001,Delivered,,2024-01-08T00:00:00Z,2024-01-10T00:00:00Z,2,,,,0,0,0,"
        );
    }

    #[tokio::test]
    async fn rerun_with_same_responses_is_byte_identical() {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().unwrap();
        mount_auth(&server).await;
        Mock::given(method("POST"))
            .and(path("/track/v1/trackingnumbers"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(delivered_reply("794000000001")),
            )
            .mount(&server)
            .await;

        let config = config_for(&server, &dir, &["794000000001"]);
        run(&config).await.unwrap();
        let first = std::fs::read(&config.output_path).unwrap();
        run(&config).await.unwrap();
        let second = std::fs::read(&config.output_path).unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn malformed_response_leaves_no_output_file() {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().unwrap();
        mount_auth(&server).await;
        // statusByLocale missing from a present latestStatusDetail group
        Mock::given(method("POST"))
            .and(path("/track/v1/trackingnumbers"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "output": {
                    "completeTrackResults": [
                        {
                            "trackingNumber": "794000000001",
                            "trackResults": [
                                {
                                    "latestStatusDetail": {
                                        "code": "DL",
                                        "derivedCode": "DL",
                                        "description": "Delivered"
                                    }
                                }
                            ]
                        }
                    ]
                }
            })))
            .mount(&server)
            .await;

        let config = config_for(&server, &dir, &["794000000001"]);
        assert!(run(&config).await.is_err());
        assert!(!config.output_path.exists());
    }

    #[tokio::test]
    async fn auth_failure_aborts_before_any_tracking_request() {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().unwrap();
        Mock::given(method("POST"))
            .and(path("/oauth/token"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/track/v1/trackingnumbers"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let config = config_for(&server, &dir, &["794000000001"]);
        assert!(run(&config).await.is_err());
        assert!(!config.output_path.exists());
    }

    #[tokio::test]
    async fn missing_input_file_is_an_error() {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().unwrap();
        let mut config = config_for(&server, &dir, &[]);
        config.input_path = dir.path().join("does-not-exist.csv");

        let err = run(&config).await.unwrap_err();
        assert!(err.to_string().contains("Failed to read input file"));
    }
}
