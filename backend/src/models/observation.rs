//! Result types produced for one observation request.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::observer::Observer;
use crate::ephemeris::{CelestialBody, Direction};

/// One rise or set. `instant` is `None` when the body does not cross within
/// its search window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HorizonEvent {
    pub kind: Direction,
    pub instant: Option<DateTime<Utc>>,
}

/// Next rising and setting of one body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BodyEvents {
    pub body: CelestialBody,
    pub rising: HorizonEvent,
    pub setting: HorizonEvent,
}

/// Twilight conventions, by depth of the Sun's centre below the horizon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TwilightKind {
    Civil,
    Nautical,
    Astronomical,
}

impl TwilightKind {
    pub const ALL: [TwilightKind; 3] = [
        TwilightKind::Civil,
        TwilightKind::Nautical,
        TwilightKind::Astronomical,
    ];

    /// Horizon depression of the band, in degrees below the horizon.
    pub fn depression(&self) -> qtty::Degrees {
        qtty::Degrees::new(match self {
            TwilightKind::Civil => 6.0,
            TwilightKind::Nautical => 12.0,
            TwilightKind::Astronomical => 18.0,
        })
    }
}

/// One twilight band.
///
/// `begin` is the next downward crossing of the depression angle and `end`
/// the next upward one, each searched independently from the request
/// instant. By day `begin` comes first; by night `end` does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TwilightBand {
    pub kind: TwilightKind,
    pub begin: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

/// Timezone metadata for the observer's location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimezoneInfo {
    pub dst_offset: i64,
    pub raw_offset: i64,
    pub time_zone_id: String,
    pub time_zone_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl TimezoneInfo {
    /// Value used whenever the lookup cannot produce an answer.
    pub fn fallback() -> Self {
        Self {
            dst_offset: 0,
            raw_offset: 0,
            time_zone_id: "Etc/UTC".to_string(),
            time_zone_name: "Coordinated Universal Time".to_string(),
            status: Some("default".to_string()),
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.status.as_deref() == Some("default")
    }
}

/// Everything computed for one request. Built once, never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct ObservationResult {
    pub observer: Observer,
    /// Accepted request pressure in Pascals, echoed back.
    pub pressure_pa: Option<f64>,
    /// Accepted request temperature in Kelvin, echoed back.
    pub temperature_k: Option<f64>,
    pub timezone: TimezoneInfo,
    pub twilight: [TwilightBand; 3],
    pub bodies: [BodyEvents; 2],
}

impl ObservationResult {
    pub fn band(&self, kind: TwilightKind) -> Option<&TwilightBand> {
        self.twilight.iter().find(|b| b.kind == kind)
    }

    pub fn body(&self, body: CelestialBody) -> Option<&BodyEvents> {
        self.bodies.iter().find(|b| b.body == body)
    }
}
