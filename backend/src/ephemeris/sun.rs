//! Solar position model, Meeus "Astronomical Algorithms" ch. 25 (low
//! accuracy, ~0.01°).

use qtty::{Degrees, Kilometers};

use super::body::PositionModel;
use super::coordinates::{
    ecliptic_to_equatorial, lunar_node, mean_obliquity, EquatorialPosition, KM_PER_AU,
};
use crate::models::JulianDate;

/// Angular semidiameter of the Sun at 1 AU, in arcseconds.
const SEMIDIAMETER_AT_1AU_ARCSEC: f64 = 959.63;

/// Apparent solar coordinates for a given Julian century (TT).
#[derive(Debug, Clone, Copy)]
pub struct SolarCoordinates {
    pub apparent_longitude: Degrees,
    pub radius_au: f64,
    pub position: EquatorialPosition,
}

pub fn solar_coordinates(t: f64) -> SolarCoordinates {
    let l0 = 280.466_46 + t * (36_000.769_83 + t * 0.000_303_2);
    let m = Degrees::new(357.529_11 + t * (35_999.050_29 - t * 0.000_153_7));
    let e = 0.016_708_634 - t * (0.000_042_037 + t * 0.000_000_126_7);

    let center = m.sin() * (1.914_602 - t * (0.004_817 + t * 0.000_014))
        + (m * 2.0).sin() * (0.019_993 - t * 0.000_101)
        + (m * 3.0).sin() * 0.000_289;

    let true_longitude = l0 + center;
    let true_anomaly = Degrees::new(m.value() + center);
    let radius_au = 1.000_001_018 * (1.0 - e * e) / (1.0 + e * true_anomaly.cos());

    let omega = lunar_node(t);
    let apparent_longitude =
        Degrees::new(true_longitude - 0.005_69 - 0.004_78 * omega.sin()).wrap_pos();
    let obliquity = mean_obliquity(t) + Degrees::new(0.002_56 * omega.cos());

    let (right_ascension, declination) =
        ecliptic_to_equatorial(apparent_longitude, Degrees::new(0.0), obliquity);

    SolarCoordinates {
        apparent_longitude,
        radius_au,
        position: EquatorialPosition {
            right_ascension,
            declination,
            distance: Kilometers::new(radius_au * KM_PER_AU),
        },
    }
}

/// The Sun.
#[derive(Debug, Clone, Copy, Default)]
pub struct SolarModel;

impl PositionModel for SolarModel {
    fn equatorial(&self, jd: JulianDate) -> EquatorialPosition {
        solar_coordinates(jd.dynamical_centuries()).position
    }

    fn semidiameter(&self, distance: Kilometers) -> Degrees {
        let radius_au = distance.value() / KM_PER_AU;
        qtty::Arcseconds::new(SEMIDIAMETER_AT_1AU_ARCSEC / radius_au).to::<qtty::Degree>()
    }

    fn search_window(&self) -> qtty::Hours {
        qtty::Hours::new(36.0)
    }
}
