//! HTTP client for the farm monitoring service REST API.
//!
//! This module provides a client for the service's read endpoints (sensor
//! descriptions, sensor readings, tag readings) and the two analysis job
//! endpoints (submit, fetch latest result).
//!
//! Read operations deliberately swallow failures: the dashboard treats "no
//! data yet" and "empty" identically, so an unreachable service or an error
//! status comes back as an empty list (with a warning in the log). The job
//! operations return proper errors because the polling workflow has to
//! distinguish "not ready" from everything else.
//!
//! # Example
//!
//! ```no_run
//! use farmwatch_client::ApiClient;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = ApiClient::new("http://localhost:8000")?;
//!
//! let sensors = client.sensors().await;
//! for sensor in &sensors {
//!     let readings = client.sensor_readings(sensor.id).await;
//!     println!("{}: {} readings", sensor.description, readings.len());
//! }
//! # Ok(())
//! # }
//! ```

use reqwest::{Client, StatusCode};
use tracing::warn;

use farmwatch_types::{AnalysisPayload, SensorInfo, SensorReading, TagReading};

use crate::error::{ClientError, Result};

/// Statuses the submission endpoint may answer with when a job started.
const SUBMIT_SUCCESS: [u16; 3] = [200, 201, 204];

/// HTTP client for the farm monitoring service API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new service client.
    ///
    /// # Arguments
    ///
    /// * `base_url` - The base URL of the service (e.g., "http://localhost:8000")
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = Self::validate_url(base_url)?;

        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .map_err(ClientError::Request)?;

        Ok(Self { client, base_url })
    }

    /// Create a client with a custom reqwest Client.
    pub fn with_client(base_url: &str, client: Client) -> Result<Self> {
        let base_url = Self::validate_url(base_url)?;
        Ok(Self { client, base_url })
    }

    fn validate_url(base_url: &str) -> Result<String> {
        // Normalize URL (remove trailing slash)
        let base_url = base_url.trim_end_matches('/').to_string();

        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ClientError::InvalidUrl(format!(
                "URL must start with http:// or https://, got: {}",
                base_url
            )));
        }

        Ok(base_url)
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ======================================================================
    // Read operations
    // ======================================================================

    /// Fetch the sensor descriptions.
    ///
    /// Returns an empty list if the service is unreachable or answers with
    /// an error status.
    pub async fn sensors(&self) -> Vec<SensorInfo> {
        // "enviroment" is how the service spells it.
        let url = format!("{}/enviroment_readings/sensors/", self.base_url);
        self.get(&url).await.unwrap_or_else(|e| {
            warn!(url = %url, error = %e, "Failed to fetch sensor descriptions");
            Vec::new()
        })
    }

    /// Fetch the readings for a single sensor, oldest first.
    ///
    /// Returns an empty list if the service is unreachable or answers with
    /// an error status.
    pub async fn sensor_readings(&self, sensor_id: u32) -> Vec<SensorReading> {
        let url = format!("{}/enviroment_readings/{}", self.base_url, sensor_id);
        self.get(&url).await.unwrap_or_else(|e| {
            warn!(url = %url, sensor_id, error = %e, "Failed to fetch sensor readings");
            Vec::new()
        })
    }

    /// Fetch the tag readings, oldest first.
    ///
    /// Returns an empty list if the service is unreachable or answers with
    /// an error status.
    pub async fn tag_readings(&self) -> Vec<TagReading> {
        let url = format!("{}/tag_readings/", self.base_url);
        self.get(&url).await.unwrap_or_else(|e| {
            warn!(url = %url, error = %e, "Failed to fetch tag readings");
            Vec::new()
        })
    }

    // ======================================================================
    // Analysis job operations
    // ======================================================================

    /// Start a new analysis job on the service.
    ///
    /// The endpoint acknowledges with 200, 201, or 204; every other status
    /// means the job did not start.
    pub async fn start_analysis(&self) -> Result<()> {
        let url = format!("{}/data_analysis/process", self.base_url);
        let response =
            self.client
                .post(&url)
                .send()
                .await
                .map_err(|e| ClientError::Transport {
                    url: url.clone(),
                    source: e,
                })?;

        let status = response.status().as_u16();
        if SUBMIT_SUCCESS.contains(&status) {
            Ok(())
        } else {
            Err(ClientError::UnexpectedStatus {
                status,
                message: error_message(response).await,
            })
        }
    }

    /// Fetch the most recent analysis result.
    ///
    /// Answers [`ClientError::NotReady`] on 404, which is the expected
    /// steady state while the job is still running.
    pub async fn latest_analysis(&self) -> Result<AnalysisPayload> {
        let url = format!("{}/data_analysis/latest", self.base_url);
        let response =
            self.client
                .get(&url)
                .send()
                .await
                .map_err(|e| ClientError::Transport {
                    url: url.clone(),
                    source: e,
                })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(ClientError::NotReady);
        }
        if !status.is_success() {
            return Err(ClientError::UnexpectedStatus {
                status: status.as_u16(),
                message: error_message(response).await,
            });
        }

        let body = response.text().await.map_err(ClientError::Request)?;
        serde_json::from_str(&body).map_err(|e| ClientError::MalformedPayload(e.to_string()))
    }

    // ======================================================================
    // Internal HTTP helpers
    // ======================================================================

    async fn get<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ClientError::Transport {
                url: url.to_string(),
                source: e,
            })?;

        let status = response.status();
        if status.is_success() {
            response.json().await.map_err(ClientError::Request)
        } else {
            Err(ClientError::UnexpectedStatus {
                status: status.as_u16(),
                message: error_message(response).await,
            })
        }
    }
}

/// Pull a human-readable message out of an error response.
async fn error_message(response: reqwest::Response) -> String {
    let status = response.status();
    response
        .json::<serde_json::Value>()
        .await
        .ok()
        .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(String::from))
        .unwrap_or_else(|| status.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = ApiClient::new("http://localhost:8000");
        assert!(client.is_ok());

        let client = client.unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000");
    }

    #[test]
    fn test_client_normalizes_url() {
        let client = ApiClient::new("http://localhost:8000/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000");
    }

    #[test]
    fn test_client_invalid_url() {
        let result = ApiClient::new("localhost:8000");
        assert!(result.is_err());
        assert!(matches!(result, Err(ClientError::InvalidUrl(_))));
    }

    #[test]
    fn test_client_accepts_https() {
        let client = ApiClient::new("https://farm.example.com");
        assert!(client.is_ok());
    }
}
