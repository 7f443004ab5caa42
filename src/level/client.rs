use crate::error::{AquaError, Result};
use chrono::Utc;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// HTTP client for the level endpoint.
///
/// Each request carries `t=<unix millis>` so intermediaries never serve a
/// cached body.
#[derive(Debug, Clone)]
pub struct LevelClient {
    client: Client,
    url: String,
}

impl LevelClient {
    pub fn new(url: impl Into<String>) -> Result<Self> {
        Self::with_timeout(url, None)
    }

    /// `timeout: None` keeps the transport default.
    pub fn with_timeout(url: impl Into<String>, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch the current level.
    ///
    /// Fails with [`AquaError::Fetch`] on a non-2xx status and with
    /// [`AquaError::Validation`] when `level` is missing or not a number.
    pub async fn fetch_level(&self) -> Result<f64> {
        let timestamp = Utc::now().timestamp_millis();
        let response = self
            .client
            .get(&self.url)
            .query(&[("t", timestamp)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AquaError::Fetch {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let payload: Value = serde_json::from_str(&body)?;
        let level = parse_level(&payload)?;
        debug!(level, "tank level fetched");
        Ok(level)
    }
}

/// Pull the numeric `level` field out of a decoded payload.
pub fn parse_level(payload: &Value) -> Result<f64> {
    match payload.get("level") {
        Some(value) => value.as_f64().ok_or_else(|| AquaError::Validation {
            message: format!("level is not a number: {value}"),
        }),
        None => Err(AquaError::Validation {
            message: "level not found".to_string(),
        }),
    }
}
