//! # Astro Server
//!
//! Rise, set and twilight times for the Sun and the Moon, served over HTTP.
//!
//! Given an observer's latitude and longitude (and optionally the local
//! atmospheric pressure and temperature), the crate computes the next
//! sunrise, sunset, moonrise and moonset after the current instant together
//! with the civil, nautical and astronomical twilight bands, and attaches the
//! timezone of the location.
//!
//! ## Architecture
//!
//! - [`models`]: observer, time scale and result types
//! - [`ephemeris`]: Sun/Moon position models and the horizon-crossing finder
//! - [`services`]: twilight bands, timezone lookup and observation assembly
//! - [`api`]: the JSON document returned to clients
//! - [`config`]: TOML configuration with environment overrides
//! - [`http`]: axum router and handlers
//!
//! ## Example
//!
//! ```no_run
//! use astro_server::models::TimezoneInfo;
//! use astro_server::services::{assemble, build_observer, ObservationRequest};
//!
//! let request = ObservationRequest::new(51.4779, -0.0015);
//! let (observer, pressure, temperature) = build_observer(&request, chrono::Utc::now()).unwrap();
//! let result = assemble(observer, pressure, temperature, TimezoneInfo::fallback());
//! println!("{:?}", result.bodies);
//! ```

pub mod api;
pub mod config;
pub mod ephemeris;
pub mod models;
pub mod services;

#[cfg(feature = "http-server")]
pub mod http;
