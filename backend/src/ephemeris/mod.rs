//! Ephemeris engine.
//!
//! Pure computation: positions of the Sun and Moon, topocentric altitude for
//! an [`Observer`](crate::models::Observer), refraction, and the
//! horizon-crossing root finder. Nothing in here holds state, so every
//! function is safe to call concurrently with distinct observers.
//!
//! ```text
//! CelestialBody ──► PositionModel (sun / moon) ──► EquatorialPosition
//!                                                      │
//!                      local sidereal time ──► topocentric altitude
//!                                                      │
//!                      refraction + semidiameter (limb mode only)
//!                                                      │
//!                               find_next_crossing ──► Option<DateTime<Utc>>
//! ```

pub mod body;
pub mod coordinates;
pub mod crossing;
pub mod moon;
pub mod refraction;
pub mod sun;

pub use body::{CelestialBody, PositionModel};
pub use coordinates::EquatorialPosition;
pub use crossing::{body_altitude, find_next_crossing, Direction, LimbMode};
