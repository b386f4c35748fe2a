//! Public API surface: the JSON document returned for an observation.
//!
//! All types derive Serialize/Deserialize. Instants are rendered as
//! `YYYY-MM-DDTHH:MM:SSZ`, and a crossing that does not happen is `null`.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{iso_seconds, BodyEvents, ObservationResult, TimezoneInfo, TwilightBand};

/// Rising/setting pair for one body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiseSet {
    #[serde(with = "iso_seconds::option")]
    pub rising: Option<DateTime<Utc>>,
    #[serde(with = "iso_seconds::option")]
    pub setting: Option<DateTime<Utc>>,
}

impl From<&BodyEvents> for RiseSet {
    fn from(events: &BodyEvents) -> Self {
        Self {
            rising: events.rising.instant,
            setting: events.setting.instant,
        }
    }
}

/// Begin/end pair for one twilight band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TwilightTimes {
    #[serde(with = "iso_seconds::option")]
    pub begin: Option<DateTime<Utc>>,
    #[serde(with = "iso_seconds::option")]
    pub end: Option<DateTime<Utc>>,
}

impl From<&TwilightBand> for TwilightTimes {
    fn from(band: &TwilightBand) -> Self {
        Self {
            begin: band.begin,
            end: band.end,
        }
    }
}

/// The three twilight bands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TwilightData {
    pub civil: TwilightTimes,
    pub nautical: TwilightTimes,
    pub astronomical: TwilightTimes,
}

/// Observer block of the response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObserverData {
    pub lat: f64,
    pub lng: f64,
    #[serde(with = "iso_seconds")]
    pub datetime: DateTime<Utc>,
    /// Accepted pressure in Pascals
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pressure: Option<f64>,
    /// Accepted temperature in Kelvin
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    pub timezone: TimezoneInfo,
    pub twilight: TwilightData,
}

/// Full response document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservationResponse {
    pub observer: ObserverData,
    /// Rise/set per body, keyed by body name
    pub heaven: BTreeMap<String, RiseSet>,
}

impl From<&ObservationResult> for ObservationResponse {
    fn from(result: &ObservationResult) -> Self {
        let [civil, nautical, astronomical] = &result.twilight;

        let heaven = result
            .bodies
            .iter()
            .map(|events| (events.body.name().to_string(), RiseSet::from(events)))
            .collect();

        Self {
            observer: ObserverData {
                lat: result.observer.location.latitude,
                lng: result.observer.location.longitude,
                datetime: result.observer.timestamp,
                pressure: result.pressure_pa,
                temperature: result.temperature_k,
                timezone: result.timezone.clone(),
                twilight: TwilightData {
                    civil: civil.into(),
                    nautical: nautical.into(),
                    astronomical: astronomical.into(),
                },
            },
            heaven,
        }
    }
}

impl From<ObservationResult> for ObservationResponse {
    fn from(result: ObservationResult) -> Self {
        Self::from(&result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::{assemble, build_observer, ObservationRequest};
    use chrono::TimeZone;

    fn sample_result(request: ObservationRequest) -> ObservationResult {
        let now = Utc.with_ymd_and_hms(2024, 4, 8, 10, 30, 0).unwrap();
        let (observer, p, t) = build_observer(&request, now).unwrap();
        assemble(observer, p, t, TimezoneInfo::fallback())
    }

    fn madrid_response() -> ObservationResponse {
        ObservationResponse::from(sample_result(ObservationRequest::new(40.0, -3.7)))
    }

    #[test]
    fn test_response_shape() {
        let response = madrid_response();
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["observer"]["lat"], 40.0);
        assert_eq!(json["observer"]["lng"], -3.7);
        assert_eq!(json["observer"]["datetime"], "2024-04-08T10:30:00Z");
        assert!(json["observer"].get("pressure").is_none());
        assert!(json["observer"].get("temperature").is_none());
        assert_eq!(json["observer"]["timezone"]["status"], "default");
        for band in ["civil", "nautical", "astronomical"] {
            assert!(json["observer"]["twilight"][band].get("begin").is_some());
            assert!(json["observer"]["twilight"][band].get("end").is_some());
        }
        for body in ["sun", "moon"] {
            assert!(json["heaven"][body].get("rising").is_some());
            assert!(json["heaven"][body].get("setting").is_some());
        }
    }

    #[test]
    fn test_instants_render_with_trailing_z() {
        let response = madrid_response();
        let json = serde_json::to_value(&response).unwrap();
        let setting = json["heaven"]["sun"]["setting"].as_str().unwrap();
        assert_eq!(setting.len(), "2024-04-08T18:30:00Z".len());
        assert!(setting.ends_with('Z'));
    }

    #[test]
    fn test_absent_events_are_null() {
        // Polar day: the Sun neither sets nor rises
        let response = ObservationResponse::from(sample_result(ObservationRequest::new(89.0, 0.0)));
        let json = serde_json::to_value(&response).unwrap();
        assert!(json["heaven"]["sun"]["setting"].is_null());
        assert!(json["heaven"]["sun"]["rising"].is_null());
    }

    #[test]
    fn test_accepted_atmosphere_is_echoed() {
        let request = ObservationRequest::new(40.0, -3.7)
            .with_pressure(50_000.0)
            .with_temperature(300.0);
        let json = serde_json::to_value(ObservationResponse::from(sample_result(request))).unwrap();
        assert_eq!(json["observer"]["pressure"], 50_000.0);
        assert_eq!(json["observer"]["temperature"], 300.0);
    }

    #[test]
    fn test_response_deserializes_back() {
        let response = madrid_response();
        let text = serde_json::to_string(&response).unwrap();
        let parsed: ObservationResponse = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, response);
    }
}
