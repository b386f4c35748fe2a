//! Horizon-crossing search.
//!
//! The altitude of a body relative to a threshold is sampled forward in time
//! from the observer's instant; the first sign change in the requested
//! direction is refined by bisection. If the body never crosses inside its
//! search window (polar day or night, a skipped moonrise) the result is
//! `None`, which is an ordinary outcome rather than an error.

use chrono::{DateTime, Duration, Utc};
use qtty::Degrees;
use serde::{Deserialize, Serialize};

use super::body::{CelestialBody, PositionModel};
use super::coordinates::{local_sidereal_time, topocentric_altitude};
use super::refraction::refraction;
use crate::models::{truncate_to_seconds, JulianDate, Observer};

/// Sampling step of the forward scan.
const SCAN_STEP_SECONDS: f64 = 300.0;

/// Bisection stops once the bracket is narrower than this.
const TOLERANCE_SECONDS: f64 = 0.5;

/// A turning point between samples is refined only when the sampled
/// altitude comes this close to the threshold.
const NEAR_MISS_DEGREES: f64 = 1.0;

const INV_GOLDEN_RATIO: f64 = 0.618_033_988_749_895;

/// Which way the body crosses the threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Upward crossing.
    Rising,
    /// Downward crossing.
    Setting,
}

impl Direction {
    /// Orientation applied to the altitude difference so that a crossing in
    /// this direction is always a change from negative to non-negative.
    fn sign(&self) -> f64 {
        match self {
            Direction::Rising => 1.0,
            Direction::Setting => -1.0,
        }
    }
}

/// Which point of the disc is tested against the threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LimbMode {
    /// Apparent upper limb: semidiameter plus refraction for the observer's
    /// atmosphere. Ordinary rise and set.
    #[default]
    UpperLimb,
    /// Geometric centre, no refraction. Used for twilight.
    Center,
}

/// Geometric topocentric altitude of a body's centre.
pub fn body_altitude(body: CelestialBody, observer: &Observer, jd: JulianDate) -> Degrees {
    let position = body.equatorial(jd);
    let lst = local_sidereal_time(jd, observer.location.longitude());
    topocentric_altitude(&position, &observer.location, lst)
}

/// Signed distance, in degrees, of the tested point above the threshold.
fn altitude_above_threshold(
    body: CelestialBody,
    observer: &Observer,
    jd: JulianDate,
    threshold: Degrees,
    limb_mode: LimbMode,
) -> f64 {
    let position = body.equatorial(jd);
    let lst = local_sidereal_time(jd, observer.location.longitude());
    let center = topocentric_altitude(&position, &observer.location, lst);

    let tested = match limb_mode {
        LimbMode::Center => center,
        LimbMode::UpperLimb => {
            let refracted = refraction(threshold, &observer.atmosphere);
            center + body.semidiameter(position.distance) + refracted
        }
    };
    (tested - threshold).value()
}

/// Next instant, at or after `observer.timestamp`, at which `body` crosses
/// `threshold` in `direction`. Truncated to whole seconds.
///
/// The altitude is sampled every few minutes. A sign change between two
/// samples is bisected. A turning point between samples that stays just
/// short of the threshold is searched for its extremum as well, so that a
/// brief dip through the threshold (near-midnight twilight at high
/// latitude) is not stepped over.
pub fn find_next_crossing(
    body: CelestialBody,
    observer: &Observer,
    threshold: Degrees,
    limb_mode: LimbMode,
    direction: Direction,
) -> Option<DateTime<Utc>> {
    let start = JulianDate::from_datetime(observer.timestamp);
    let window = body.search_window().to::<qtty::Second>().value();
    let sign = direction.sign();
    // Negative before the crossing, non-negative after it
    let h = |offset: f64| {
        let jd = start.add_seconds(offset);
        sign * altitude_above_threshold(body, observer, jd, threshold, limb_mode)
    };

    let mut previous: Option<(f64, f64)> = None;
    let mut t0 = 0.0;
    let mut h0 = h(t0);
    while t0 < window {
        let t1 = (t0 + SCAN_STEP_SECONDS).min(window);
        let h1 = h(t1);
        if h0 < 0.0 && h1 >= 0.0 {
            let offset = bisect(&h, t0, t1);
            return Some(offset_to_instant(observer.timestamp, offset));
        }

        let turning = h0 < 0.0
            && h1 < h0
            && h0 > -NEAR_MISS_DEGREES
            && previous.map_or(true, |(_, hp)| h0 >= hp);
        if turning {
            let lo = previous.map_or(t0, |(tp, _)| tp);
            let (peak, h_peak) = golden_section_max(&h, lo, t1);
            if h_peak >= 0.0 {
                let offset = bisect(&h, lo, peak);
                return Some(offset_to_instant(observer.timestamp, offset));
            }
        }

        previous = Some((t0, h0));
        t0 = t1;
        h0 = h1;
    }
    None
}

/// Narrow a bracket with `h(lo) < 0 <= h(hi)`; returns the first offset
/// on the post-crossing side.
fn bisect(h: &impl Fn(f64) -> f64, mut lo: f64, mut hi: f64) -> f64 {
    while hi - lo > TOLERANCE_SECONDS {
        let mid = 0.5 * (lo + hi);
        if h(mid) < 0.0 {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    hi
}

/// Maximum of a unimodal `h` on `[lo, hi]`, as `(offset, value)`.
fn golden_section_max(h: &impl Fn(f64) -> f64, mut lo: f64, mut hi: f64) -> (f64, f64) {
    let mut x1 = hi - INV_GOLDEN_RATIO * (hi - lo);
    let mut x2 = lo + INV_GOLDEN_RATIO * (hi - lo);
    let mut h1 = h(x1);
    let mut h2 = h(x2);
    while hi - lo > TOLERANCE_SECONDS {
        if h1 < h2 {
            lo = x1;
            x1 = x2;
            h1 = h2;
            x2 = lo + INV_GOLDEN_RATIO * (hi - lo);
            h2 = h(x2);
        } else {
            hi = x2;
            x2 = x1;
            h2 = h1;
            x1 = hi - INV_GOLDEN_RATIO * (hi - lo);
            h1 = h(x1);
        }
    }
    if h1 >= h2 {
        (x1, h1)
    } else {
        (x2, h2)
    }
}

fn offset_to_instant(start: DateTime<Utc>, offset_seconds: f64) -> DateTime<Utc> {
    let millis = (offset_seconds * 1000.0).round() as i64;
    truncate_to_seconds(start + Duration::milliseconds(millis))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GeographicLocation;
    use chrono::TimeZone;

    fn observer(lat: f64, lng: f64, ts: DateTime<Utc>) -> Observer {
        Observer::new(GeographicLocation::new(lat, lng).unwrap(), ts)
    }

    #[test]
    fn test_direction_sign() {
        assert_eq!(Direction::Rising.sign(), 1.0);
        assert_eq!(Direction::Setting.sign(), -1.0);
    }

    #[test]
    fn test_golden_section_finds_peak() {
        let h = |t: f64| -0.001 * (t - 137.0) * (t - 137.0) + 0.25;
        let (peak, value) = golden_section_max(&h, 0.0, 600.0);
        assert!((peak - 137.0).abs() < 1.0, "peak {}", peak);
        assert!((value - 0.25).abs() < 1e-3);
    }

    #[test]
    fn test_bisect_returns_post_crossing_side() {
        let h = |t: f64| t - 42.3;
        let offset = bisect(&h, 0.0, 300.0);
        assert!(offset >= 42.3 && offset - 42.3 <= TOLERANCE_SECONDS);
    }

    #[test]
    fn test_brief_dip_between_samples_is_found() {
        // Around 60.5°N at the June solstice the Sun's centre only grazes
        // -6° near midnight. Put the threshold a hair above the lowest
        // point so the dip lasts about three minutes, less than a scan step.
        let obs = observer(60.565, 0.0, Utc.with_ymd_and_hms(2024, 6, 20, 12, 0, 0).unwrap());
        let evening = Utc.with_ymd_and_hms(2024, 6, 20, 22, 0, 0).unwrap();
        let evening = JulianDate::from_datetime(evening);
        let lowest = (0..=(4 * 720))
            .map(|i| body_altitude(CelestialBody::Sun, &obs, evening.add_seconds(5.0 * i as f64)))
            .map(|alt| alt.value())
            .fold(f64::INFINITY, f64::min);
        assert!((lowest + 6.0).abs() < 0.1, "lowest {}", lowest);
        let threshold = Degrees::new(lowest + 0.0005);

        let crossing = |direction| {
            find_next_crossing(CelestialBody::Sun, &obs, threshold, LimbMode::Center, direction)
        };
        let night_end = Utc.with_ymd_and_hms(2024, 6, 21, 2, 0, 0).unwrap();

        let begin = crossing(Direction::Setting).expect("dusk crossing on the first night");
        let end = crossing(Direction::Rising).expect("dawn crossing on the first night");
        assert!(begin < night_end, "begin {}", begin);
        assert!(end < night_end, "end {}", end);
        assert!(begin < end);
        assert!((end - begin).num_seconds() < 300, "dip {}s", (end - begin).num_seconds());
    }

    #[test]
    fn test_crossing_lands_on_threshold() {
        let obs = observer(40.0, -74.0, Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap());
        let threshold = Degrees::new(-6.0);
        let instant = find_next_crossing(
            CelestialBody::Sun,
            &obs,
            threshold,
            LimbMode::Center,
            Direction::Setting,
        )
        .expect("sun sets at mid latitudes");

        let alt = body_altitude(CelestialBody::Sun, &obs, JulianDate::from_datetime(instant));
        // The Sun moves ~0.25°/min; one second of truncation is well under 0.01°
        assert!((alt.value() - threshold.value()).abs() < 0.01, "alt {}", alt.value());
        assert!(instant > obs.timestamp);
        assert_eq!(instant.timestamp_subsec_nanos(), 0);
    }

    #[test]
    fn test_rising_goes_up_setting_goes_down() {
        let obs = observer(51.5, 0.0, Utc.with_ymd_and_hms(2024, 10, 1, 0, 0, 0).unwrap());
        for (direction, sign) in [(Direction::Rising, 1.0), (Direction::Setting, -1.0)] {
            let instant = find_next_crossing(
                CelestialBody::Sun,
                &obs,
                Degrees::new(0.0),
                LimbMode::Center,
                direction,
            )
            .unwrap();
            let jd = JulianDate::from_datetime(instant);
            let before = body_altitude(CelestialBody::Sun, &obs, jd.add_seconds(-120.0));
            let after = body_altitude(CelestialBody::Sun, &obs, jd.add_seconds(120.0));
            assert!((after.value() - before.value()) * sign > 0.0);
        }
    }

    #[test]
    fn test_no_crossing_in_polar_night() {
        // Mid-December near the north pole the Sun stays far below -6°
        let obs = observer(85.0, 10.0, Utc.with_ymd_and_hms(2024, 12, 21, 0, 0, 0).unwrap());
        for direction in [Direction::Rising, Direction::Setting] {
            let instant = find_next_crossing(
                CelestialBody::Sun,
                &obs,
                Degrees::new(-6.0),
                LimbMode::Center,
                direction,
            );
            assert!(instant.is_none());
        }
    }

    #[test]
    fn test_upper_limb_rises_before_center() {
        let obs = observer(0.0, 0.0, Utc.with_ymd_and_hms(2024, 3, 20, 0, 0, 0).unwrap());
        let limb = find_next_crossing(
            CelestialBody::Sun,
            &obs,
            Degrees::new(0.0),
            LimbMode::UpperLimb,
            Direction::Rising,
        )
        .unwrap();
        let center = find_next_crossing(
            CelestialBody::Sun,
            &obs,
            Degrees::new(0.0),
            LimbMode::Center,
            Direction::Rising,
        )
        .unwrap();
        // ~50' of extra depth at the equator is about 3.3 minutes
        let lead = (center - limb).num_seconds();
        assert!((150..=260).contains(&lead), "lead {}s", lead);
    }

    #[test]
    fn test_moon_crossing_found() {
        let obs = observer(35.0, 139.7, Utc.with_ymd_and_hms(2024, 5, 10, 3, 0, 0).unwrap());
        let rise = find_next_crossing(
            CelestialBody::Moon,
            &obs,
            Degrees::new(0.0),
            LimbMode::UpperLimb,
            Direction::Rising,
        );
        let set = find_next_crossing(
            CelestialBody::Moon,
            &obs,
            Degrees::new(0.0),
            LimbMode::UpperLimb,
            Direction::Setting,
        );
        assert!(rise.is_some());
        assert!(set.is_some());
    }
}
