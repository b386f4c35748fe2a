//! Request/response types specific to the HTTP layer.
//!
//! The observation document itself lives in [`crate::api`].

use serde::{Deserialize, Serialize};

pub use crate::api::{ObservationResponse, ObserverData, RiseSet, TwilightData, TwilightTimes};

/// Optional atmospheric corrections.
///
/// Values are kept as strings: anything that does not parse as a number is
/// ignored instead of rejecting the request.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ObservationQuery {
    /// Pressure in Pascals
    #[serde(default)]
    pub pressure: Option<String>,
    /// Temperature in Kelvin
    #[serde(default)]
    pub temperature: Option<String>,
}

impl ObservationQuery {
    pub fn pressure_pa(&self) -> Option<f64> {
        parse_number(self.pressure.as_deref())
    }

    pub fn temperature_k(&self) -> Option<f64> {
        parse_number(self.temperature.as_deref())
    }
}

fn parse_number(raw: Option<&str>) -> Option<f64> {
    raw.and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

/// Output formats accepted in the last path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseFormat {
    Json,
    /// Reserved; currently answered with the JSON document
    Html,
}

impl ResponseFormat {
    /// `json`, `html` or an empty segment; anything else is unknown.
    pub fn parse(segment: &str) -> Option<Self> {
        match segment {
            "" | "json" => Some(ResponseFormat::Json),
            "html" => Some(ResponseFormat::Html),
            _ => None,
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Version of the API
    pub version: String,
    /// Whether timezone lookups are live ("configured") or always fall back
    pub timezone: String,
}
