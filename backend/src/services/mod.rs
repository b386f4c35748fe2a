//! Service layer.
//!
//! Services sit between the HTTP handlers and the ephemeris engine: they
//! validate inputs, orchestrate the engine calls and talk to the external
//! timezone service.

pub mod clock;
pub mod observation;
pub mod timezone;
pub mod twilight;

pub use clock::{Clock, FixedClock, SystemClock};
pub use observation::{
    assemble, build_observer, compute_body_events, compute_sky, ObservationError,
    ObservationRequest, ObservationService,
};
pub use timezone::{
    resolve_timezone, FallbackTimezone, GoogleTimezoneClient, TimezoneError, TimezoneProvider,
};
pub use twilight::{compute_twilight, compute_twilight_band};
