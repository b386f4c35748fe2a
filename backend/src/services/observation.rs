//! Observation assembly.
//!
//! Validates request inputs into an [`Observer`], runs the ephemeris engine
//! for the Sun, the Moon and the three twilight bands, and merges the
//! timezone lookup into a single [`ObservationResult`].

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::debug;

use super::clock::Clock;
use super::timezone::{resolve_timezone, TimezoneProvider};
use super::twilight::compute_twilight;
use crate::ephemeris::{find_next_crossing, CelestialBody, Direction, LimbMode};
use crate::models::{
    accepted_pressure, accepted_temperature, Atmosphere, BodyEvents, GeographicLocation,
    HorizonEvent, ObservationResult, Observer, ObserverError, TimezoneInfo, TwilightBand,
};

/// Raw request inputs, before validation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ObservationRequest {
    pub latitude: f64,
    pub longitude: f64,
    /// Pressure in Pascals
    pub pressure_pa: Option<f64>,
    /// Temperature in Kelvin
    pub temperature_k: Option<f64>,
}

impl ObservationRequest {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            ..Default::default()
        }
    }

    pub fn with_pressure(mut self, pressure_pa: f64) -> Self {
        self.pressure_pa = Some(pressure_pa);
        self
    }

    pub fn with_temperature(mut self, temperature_k: f64) -> Self {
        self.temperature_k = Some(temperature_k);
        self
    }
}

#[derive(Debug, Error)]
pub enum ObservationError {
    #[error(transparent)]
    InvalidObserver(#[from] ObserverError),
    #[error("ephemeris task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Next rising and setting of a body's upper limb on the true horizon.
pub fn compute_body_events(observer: &Observer, body: CelestialBody) -> BodyEvents {
    let event = |kind| HorizonEvent {
        kind,
        instant: find_next_crossing(
            body,
            observer,
            qtty::Degrees::new(0.0),
            LimbMode::UpperLimb,
            kind,
        ),
    };

    BodyEvents {
        body,
        rising: event(Direction::Rising),
        setting: event(Direction::Setting),
    }
}

/// Everything the engine computes for an observer: twilight bands and the
/// Sun/Moon horizon events.
pub fn compute_sky(observer: &Observer) -> ([TwilightBand; 3], [BodyEvents; 2]) {
    let twilight = compute_twilight(observer);
    let bodies = CelestialBody::ALL.map(|body| compute_body_events(observer, body));
    (twilight, bodies)
}

/// Validate request inputs into an observer at `now`.
///
/// Latitude/longitude errors fail the request. Pressure and temperature
/// outside their accepted ranges are dropped and the defaults apply.
pub fn build_observer(
    request: &ObservationRequest,
    now: DateTime<Utc>,
) -> Result<(Observer, Option<f64>, Option<f64>), ObserverError> {
    let location = GeographicLocation::new(request.latitude, request.longitude)?;

    let pressure_pa = accepted_pressure(request.pressure_pa);
    if request.pressure_pa.is_some() && pressure_pa.is_none() {
        debug!(pressure = ?request.pressure_pa, "ignoring out-of-range pressure");
    }
    let temperature_k = accepted_temperature(request.temperature_k);
    if request.temperature_k.is_some() && temperature_k.is_none() {
        debug!(temperature = ?request.temperature_k, "ignoring out-of-range temperature");
    }

    let observer = Observer::new(location, now)
        .with_atmosphere(Atmosphere::from_request(pressure_pa, temperature_k));
    Ok((observer, pressure_pa, temperature_k))
}

/// Build the result from an observer and an already-resolved timezone.
pub fn assemble(
    observer: Observer,
    pressure_pa: Option<f64>,
    temperature_k: Option<f64>,
    timezone: TimezoneInfo,
) -> ObservationResult {
    let (twilight, bodies) = compute_sky(&observer);
    ObservationResult {
        observer,
        pressure_pa,
        temperature_k,
        timezone,
        twilight,
        bodies,
    }
}

/// Request-scoped assembler. Holds only shared, immutable collaborators.
#[derive(Clone)]
pub struct ObservationService {
    timezone: Arc<dyn TimezoneProvider>,
    clock: Arc<dyn Clock>,
    lookup_timeout: Duration,
}

impl ObservationService {
    pub fn new(
        timezone: Arc<dyn TimezoneProvider>,
        clock: Arc<dyn Clock>,
        lookup_timeout: Duration,
    ) -> Self {
        Self {
            timezone,
            clock,
            lookup_timeout,
        }
    }

    pub fn timezone_configured(&self) -> bool {
        self.timezone.is_configured()
    }

    /// Compute the full observation for a request.
    ///
    /// The engine runs on the blocking pool while the timezone lookup is in
    /// flight; the lookup cannot fail the request.
    pub async fn observe(
        &self,
        request: ObservationRequest,
    ) -> Result<ObservationResult, ObservationError> {
        let (observer, pressure_pa, temperature_k) = build_observer(&request, self.clock.now())?;

        let sky = tokio::task::spawn_blocking(move || compute_sky(&observer));
        let timezone = resolve_timezone(
            self.timezone.as_ref(),
            &observer.location,
            observer.timestamp,
            self.lookup_timeout,
        );
        let (sky, timezone) = tokio::join!(sky, timezone);
        let (twilight, bodies) = sky?;

        Ok(ObservationResult {
            observer,
            pressure_pa,
            temperature_k,
            timezone,
            twilight,
            bodies,
        })
    }
}
