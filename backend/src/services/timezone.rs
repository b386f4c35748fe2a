//! Timezone lookup collaborator.
//!
//! The lookup is the only network I/O on the request path. It is modelled
//! as a [`TimezoneProvider`] so the HTTP client can be swapped out, and
//! [`resolve_timezone`] bounds it with a timeout and turns every failure
//! into [`TimezoneInfo::fallback`].

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::TimezoneSettings;
use crate::models::{GeographicLocation, TimezoneInfo};

/// Reasons a timezone lookup can fail. None of them reach the caller.
#[derive(Debug, Error)]
pub enum TimezoneError {
    #[error("no timezone API key configured")]
    MissingToken,
    #[error("timezone request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("timezone service answered with status {0}")]
    Status(reqwest::StatusCode),
    #[error("malformed timezone payload: {0}")]
    Malformed(String),
    #[error("timezone lookup timed out after {0:?}")]
    Timeout(Duration),
}

/// Source of timezone metadata for a location.
#[async_trait]
pub trait TimezoneProvider: Send + Sync {
    async fn lookup(
        &self,
        location: &GeographicLocation,
        at: DateTime<Utc>,
    ) -> Result<TimezoneInfo, TimezoneError>;

    /// Whether the provider can answer at all; `false` means every lookup
    /// falls back.
    fn is_configured(&self) -> bool {
        true
    }
}

/// Run a lookup with a deadline; any error or timeout yields the fallback.
pub async fn resolve_timezone(
    provider: &dyn TimezoneProvider,
    location: &GeographicLocation,
    at: DateTime<Utc>,
    timeout: Duration,
) -> TimezoneInfo {
    let outcome = match tokio::time::timeout(timeout, provider.lookup(location, at)).await {
        Ok(result) => result,
        Err(_) => Err(TimezoneError::Timeout(timeout)),
    };

    match outcome {
        Ok(info) => info,
        Err(TimezoneError::MissingToken) => {
            debug!("timezone lookup skipped: no API key");
            TimezoneInfo::fallback()
        }
        Err(e) => {
            warn!(
                latitude = location.latitude,
                longitude = location.longitude,
                "timezone lookup failed, using UTC: {}",
                e
            );
            TimezoneInfo::fallback()
        }
    }
}

/// Google Time Zone API client.
#[derive(Debug, Clone)]
pub struct GoogleTimezoneClient {
    http: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
}

impl GoogleTimezoneClient {
    /// Build a client from configuration. An empty key is treated as absent.
    pub fn new(settings: &TimezoneSettings) -> Result<Self, TimezoneError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            api_key: settings.api_key.clone().filter(|k| !k.trim().is_empty()),
            base_url: settings.base_url.clone(),
        })
    }

    /// Query string for a lookup: coordinates to three decimals and the
    /// Unix timestamp of the instant.
    fn query(
        &self,
        location: &GeographicLocation,
        at: DateTime<Utc>,
        key: &str,
    ) -> [(&'static str, String); 3] {
        [
            (
                "location",
                format!("{:.3},{:.3}", location.latitude, location.longitude),
            ),
            ("timestamp", at.timestamp().to_string()),
            ("key", key.to_string()),
        ]
    }
}

#[async_trait]
impl TimezoneProvider for GoogleTimezoneClient {
    async fn lookup(
        &self,
        location: &GeographicLocation,
        at: DateTime<Utc>,
    ) -> Result<TimezoneInfo, TimezoneError> {
        let key = self.api_key.as_deref().ok_or(TimezoneError::MissingToken)?;

        let response = self
            .http
            .get(&self.base_url)
            .query(&self.query(location, at, key))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TimezoneError::Status(status));
        }

        let payload: Value = response.json().await?;
        parse_timezone_payload(&payload)
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

/// Validate a Time Zone API payload.
///
/// Offsets must be numbers (integer or float, rounded to whole seconds),
/// id and name must be strings. `status` is passed through when present.
pub fn parse_timezone_payload(payload: &Value) -> Result<TimezoneInfo, TimezoneError> {
    let offset = |field: &str| {
        payload
            .get(field)
            .and_then(Value::as_f64)
            .map(|v| v.round() as i64)
            .ok_or_else(|| TimezoneError::Malformed(format!("missing numeric '{}'", field)))
    };
    let text = |field: &str| {
        payload
            .get(field)
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| TimezoneError::Malformed(format!("missing string '{}'", field)))
    };

    Ok(TimezoneInfo {
        dst_offset: offset("dstOffset")?,
        raw_offset: offset("rawOffset")?,
        time_zone_id: text("timeZoneId")?,
        time_zone_name: text("timeZoneName")?,
        status: payload
            .get("status")
            .and_then(Value::as_str)
            .map(str::to_string),
    })
}

/// Provider that always falls back; used when no client can be built.
#[derive(Debug, Clone, Copy, Default)]
pub struct FallbackTimezone;

#[async_trait]
impl TimezoneProvider for FallbackTimezone {
    async fn lookup(
        &self,
        _location: &GeographicLocation,
        _at: DateTime<Utc>,
    ) -> Result<TimezoneInfo, TimezoneError> {
        Err(TimezoneError::MissingToken)
    }

    fn is_configured(&self) -> bool {
        false
    }
}
