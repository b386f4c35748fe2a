//! Twilight computation service.
//!
//! Computes the civil, nautical and astronomical twilight crossings (Sun
//! centre at -6°, -12° and -18°) for an observer using the ephemeris engine.

use crate::ephemeris::{find_next_crossing, CelestialBody, Direction, LimbMode};
use crate::models::{Observer, TwilightBand, TwilightKind};

/// Compute one twilight band for an observer.
///
/// Both crossings are searched forward from the observer's instant,
/// independently of each other:
///
/// * `begin` - next time the Sun's centre sinks through the depression angle
/// * `end` - next time it climbs back through it
///
/// Depending on the time of day either may come first; no ordering is
/// imposed between them.
///
/// # Arguments
///
/// * `observer` - Validated observer (location and instant)
/// * `kind` - Which twilight convention to use
///
/// # Returns
///
/// The band, with `None` for a crossing that does not happen inside the
/// Sun's search window.
pub fn compute_twilight_band(observer: &Observer, kind: TwilightKind) -> TwilightBand {
    let threshold = -kind.depression();
    let crossing = |direction| {
        find_next_crossing(
            CelestialBody::Sun,
            observer,
            threshold,
            LimbMode::Center,
            direction,
        )
    };

    TwilightBand {
        kind,
        begin: crossing(Direction::Setting),
        end: crossing(Direction::Rising),
    }
}

/// Compute all three twilight bands, ordered civil, nautical, astronomical.
pub fn compute_twilight(observer: &Observer) -> [TwilightBand; 3] {
    TwilightKind::ALL.map(|kind| compute_twilight_band(observer, kind))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GeographicLocation;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_twilight_greenwich_afternoon() {
        // Greenwich Observatory, early afternoon in January
        let location = GeographicLocation::new(51.4769, 0.0).unwrap();
        let now = Utc.with_ymd_and_hms(2026, 1, 15, 13, 0, 0).unwrap();
        let observer = Observer::new(location, now);

        let bands = compute_twilight(&observer);
        assert_eq!(bands.map(|b| b.kind), TwilightKind::ALL);

        // In the afternoon dusk comes first, and deeper bands begin later
        let begins: Vec<_> = bands.iter().map(|b| b.begin.unwrap()).collect();
        assert!(begins[0] < begins[1] && begins[1] < begins[2]);

        // The following dawn: deeper bands end earlier
        let ends: Vec<_> = bands.iter().map(|b| b.end.unwrap()).collect();
        assert!(ends[2] < ends[1] && ends[1] < ends[0]);

        for band in &bands {
            assert!(band.begin.unwrap() < band.end.unwrap());
        }
    }

    #[test]
    fn test_twilight_roque_de_los_muchachos_night() {
        // Roque de los Muchachos Observatory, local midnight
        let location = GeographicLocation::new(28.7624, -17.8892).unwrap();
        let observer = Observer::new(location, Utc.with_ymd_and_hms(2026, 1, 16, 1, 0, 0).unwrap());

        let band = compute_twilight_band(&observer, TwilightKind::Astronomical);
        // At night the next upward crossing (dawn) precedes the next downward one
        assert!(band.end.unwrap() < band.begin.unwrap());
    }

    #[test]
    fn test_twilight_absent_in_polar_summer() {
        // Midsummer at 75°N: the Sun never gets 6° below the horizon
        let location = GeographicLocation::new(75.0, 15.0).unwrap();
        let observer = Observer::new(location, Utc.with_ymd_and_hms(2024, 6, 21, 0, 0, 0).unwrap());

        for band in compute_twilight(&observer) {
            assert!(band.begin.is_none(), "{:?}", band.kind);
            assert!(band.end.is_none(), "{:?}", band.kind);
        }
    }
}
