//! Observer model: where and when the sky is computed, and under which
//! atmosphere.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::time::truncate_to_seconds;

/// Standard sea-level pressure in hectopascals.
pub const DEFAULT_PRESSURE_HPA: f64 = 1013.25;

/// Standard temperature in degrees Celsius.
pub const DEFAULT_TEMPERATURE_C: f64 = 15.0;

/// Accepted request pressure range in Pascals (exclusive bounds).
pub const PRESSURE_RANGE_PA: (f64, f64) = (10_000.0, 120_000.0);

/// Accepted request temperature range in Kelvin (exclusive bounds).
pub const TEMPERATURE_RANGE_K: (f64, f64) = (150.0, 373.0);

const KELVIN_OFFSET: f64 = 273.15;

/// Errors raised while building an [`Observer`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ObserverError {
    #[error("latitude {0} outside [-90, 90]")]
    InvalidLatitude(f64),
    #[error("longitude {0} outside (-180, 180]")]
    InvalidLongitude(f64),
}

/// Geographic position of the observer in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeographicLocation {
    /// Latitude in decimal degrees (-90 to 90)
    pub latitude: f64,
    /// Longitude in decimal degrees, east positive (-180 exclusive to 180)
    pub longitude: f64,
}

impl GeographicLocation {
    /// Validate and build a location.
    ///
    /// Longitude -180 is rejected and +180 accepted so the antimeridian has a
    /// single representation. NaN fails both checks.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, ObserverError> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(ObserverError::InvalidLatitude(latitude));
        }
        if !(longitude > -180.0 && longitude <= 180.0) {
            return Err(ObserverError::InvalidLongitude(longitude));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    pub fn latitude(&self) -> qtty::Degrees {
        qtty::Degrees::new(self.latitude)
    }

    pub fn longitude(&self) -> qtty::Degrees {
        qtty::Degrees::new(self.longitude)
    }
}

/// Atmospheric conditions used by the refraction correction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Atmosphere {
    pub pressure_hpa: f64,
    pub temperature_c: f64,
}

impl Default for Atmosphere {
    fn default() -> Self {
        Self {
            pressure_hpa: DEFAULT_PRESSURE_HPA,
            temperature_c: DEFAULT_TEMPERATURE_C,
        }
    }
}

impl Atmosphere {
    /// Build an atmosphere from request units, keeping defaults for values
    /// that are absent or outside the accepted ranges.
    pub fn from_request(pressure_pa: Option<f64>, temperature_k: Option<f64>) -> Self {
        let mut atmosphere = Self::default();
        if let Some(pa) = accepted_pressure(pressure_pa) {
            atmosphere.pressure_hpa = pa / 100.0;
        }
        if let Some(k) = accepted_temperature(temperature_k) {
            atmosphere.temperature_c = k - KELVIN_OFFSET;
        }
        atmosphere
    }
}

/// Returns the pressure (Pa) if strictly inside the accepted range.
pub fn accepted_pressure(pressure_pa: Option<f64>) -> Option<f64> {
    let (lo, hi) = PRESSURE_RANGE_PA;
    pressure_pa.filter(|p| *p > lo && *p < hi)
}

/// Returns the temperature (K) if strictly inside the accepted range.
pub fn accepted_temperature(temperature_k: Option<f64>) -> Option<f64> {
    let (lo, hi) = TEMPERATURE_RANGE_K;
    temperature_k.filter(|t| *t > lo && *t < hi)
}

/// A validated observer: location, instant and atmosphere.
///
/// Pressure and temperature only influence refraction, never positions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observer {
    pub location: GeographicLocation,
    pub timestamp: DateTime<Utc>,
    pub atmosphere: Atmosphere,
}

impl Observer {
    /// Build an observer with the default atmosphere. The timestamp is
    /// truncated to whole seconds.
    pub fn new(location: GeographicLocation, timestamp: DateTime<Utc>) -> Self {
        Self {
            location,
            timestamp: truncate_to_seconds(timestamp),
            atmosphere: Atmosphere::default(),
        }
    }

    pub fn with_atmosphere(mut self, atmosphere: Atmosphere) -> Self {
        self.atmosphere = atmosphere;
        self
    }
}
