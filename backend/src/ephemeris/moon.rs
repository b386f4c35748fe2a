//! Lunar position model based on Meeus "Astronomical Algorithms" ch. 47.
//!
//! Only the largest periodic terms of tables 47.A and 47.B are kept, which
//! gives a few hundredths of a degree in position: well under a minute of
//! rise/set time.

use qtty::{Degrees, Kilometers};

use super::body::PositionModel;
use super::coordinates::{ecliptic_to_equatorial, lunar_node, mean_obliquity, EquatorialPosition};
use crate::models::JulianDate;

/// Semidiameter constant: s = k / Δ with s in arcseconds and Δ in km.
const SEMIDIAMETER_ARCSEC_KM: f64 = 358_473_400.0;

// Table 47.A, (D, M, M', F, Σl in 1e-6 degrees, Σr in 1e-3 km)
const TERMS_LR: [(f64, f64, f64, f64, f64, f64); 20] = [
    (0.0, 0.0, 1.0, 0.0, 6_288_774.0, -20_905_355.0),
    (2.0, 0.0, -1.0, 0.0, 1_274_027.0, -3_699_111.0),
    (2.0, 0.0, 0.0, 0.0, 658_314.0, -2_955_968.0),
    (0.0, 0.0, 2.0, 0.0, 213_618.0, -569_925.0),
    (0.0, 1.0, 0.0, 0.0, -185_116.0, 48_888.0),
    (0.0, 0.0, 0.0, 2.0, -114_332.0, -3_149.0),
    (2.0, 0.0, -2.0, 0.0, 58_793.0, 246_158.0),
    (2.0, -1.0, -1.0, 0.0, 57_066.0, -152_138.0),
    (2.0, 0.0, 1.0, 0.0, 53_322.0, -170_733.0),
    (2.0, -1.0, 0.0, 0.0, 45_758.0, -204_586.0),
    (0.0, 1.0, -1.0, 0.0, -40_923.0, -129_620.0),
    (1.0, 0.0, 0.0, 0.0, -34_720.0, 108_743.0),
    (0.0, 1.0, 1.0, 0.0, -30_383.0, 104_755.0),
    (2.0, 0.0, 0.0, -2.0, 15_327.0, 10_321.0),
    (0.0, 0.0, 1.0, 2.0, -12_528.0, 0.0),
    (0.0, 0.0, 1.0, -2.0, 10_980.0, 79_661.0),
    (4.0, 0.0, -1.0, 0.0, 10_675.0, -34_782.0),
    (0.0, 0.0, 3.0, 0.0, 10_034.0, -23_210.0),
    (4.0, 0.0, -2.0, 0.0, 8_548.0, -21_636.0),
    (2.0, 1.0, -1.0, 0.0, -7_888.0, 24_208.0),
];

// Table 47.B, (D, M, M', F, Σb in 1e-6 degrees)
const TERMS_B: [(f64, f64, f64, f64, f64); 20] = [
    (0.0, 0.0, 0.0, 1.0, 5_128_122.0),
    (0.0, 0.0, 1.0, 1.0, 280_602.0),
    (0.0, 0.0, 1.0, -1.0, 277_693.0),
    (2.0, 0.0, 0.0, -1.0, 173_237.0),
    (2.0, 0.0, -1.0, 1.0, 55_413.0),
    (2.0, 0.0, -1.0, -1.0, 46_271.0),
    (2.0, 0.0, 0.0, 1.0, 32_573.0),
    (0.0, 0.0, 2.0, 1.0, 17_198.0),
    (2.0, 0.0, 1.0, -1.0, 9_266.0),
    (0.0, 0.0, 2.0, -1.0, 8_822.0),
    (2.0, -1.0, 0.0, -1.0, 8_216.0),
    (2.0, 0.0, -2.0, -1.0, 4_324.0),
    (2.0, 0.0, 1.0, 1.0, 4_200.0),
    (2.0, 1.0, 0.0, -1.0, -3_359.0),
    (2.0, -1.0, -1.0, 1.0, 2_463.0),
    (2.0, -1.0, 0.0, 1.0, 2_211.0),
    (2.0, -1.0, -1.0, -1.0, 2_065.0),
    (0.0, 1.0, -1.0, -1.0, -1_870.0),
    (4.0, 0.0, -1.0, -1.0, 1_828.0),
    (0.0, 1.0, 0.0, 1.0, -1_794.0),
];

/// Geocentric ecliptic coordinates of the Moon.
#[derive(Debug, Clone, Copy)]
pub struct LunarCoordinates {
    pub longitude: Degrees,
    pub latitude: Degrees,
    pub distance: Kilometers,
}

/// Fundamental arguments (L', D, M, M', F) in degrees.
fn fundamental_arguments(t: f64) -> (f64, f64, f64, f64, f64) {
    let t2 = t * t;
    let t3 = t2 * t;
    let t4 = t3 * t;

    let lp = 218.316_447_7 + 481_267.881_234_21 * t - 0.001_578_6 * t2 + t3 / 538_841.0
        - t4 / 65_194_000.0;
    let d = 297.850_192_1 + 445_267.111_403_4 * t - 0.001_881_9 * t2 + t3 / 545_868.0
        - t4 / 113_065_000.0;
    let m = 357.529_109_2 + 35_999.050_290_9 * t - 0.000_153_6 * t2 + t3 / 24_490_000.0;
    let mp = 134.963_396_4 + 477_198.867_505_5 * t + 0.008_741_4 * t2 + t3 / 69_699.0
        - t4 / 14_712_000.0;
    let f = 93.272_095_0 + 483_202.017_523_3 * t - 0.003_653_9 * t2 - t3 / 3_526_000.0
        + t4 / 863_310_000.0;

    (lp, d, m, mp, f)
}

fn eccentricity_factor(m_multiple: f64, e: f64) -> f64 {
    match m_multiple.abs() as i32 {
        1 => e,
        2 => e * e,
        _ => 1.0,
    }
}

fn sin_deg(x: f64) -> f64 {
    x.to_radians().sin()
}

fn cos_deg(x: f64) -> f64 {
    x.to_radians().cos()
}

pub fn lunar_coordinates(t: f64) -> LunarCoordinates {
    let (lp, d, m, mp, f) = fundamental_arguments(t);
    let e = 1.0 - 0.002_516 * t - 0.000_007_4 * t * t;

    let (mut sum_l, sum_r) =
        TERMS_LR
            .iter()
            .fold((0.0, 0.0), |(l, r), &(td, tm, tmp, tf, cl, cr)| {
                let arg = td * d + tm * m + tmp * mp + tf * f;
                let factor = eccentricity_factor(tm, e);
                (l + cl * factor * sin_deg(arg), r + cr * factor * cos_deg(arg))
            });

    let mut sum_b = TERMS_B.iter().fold(0.0, |b, &(td, tm, tmp, tf, cb)| {
        let arg = td * d + tm * m + tmp * mp + tf * f;
        b + cb * eccentricity_factor(tm, e) * sin_deg(arg)
    });

    // Venus, Jupiter and flattening corrections
    let a1 = 119.75 + 131.849 * t;
    let a2 = 53.09 + 479_264.290 * t;
    let a3 = 313.45 + 481_266.484 * t;

    sum_l += 3958.0 * sin_deg(a1) + 1962.0 * sin_deg(lp - f) + 318.0 * sin_deg(a2);
    sum_b += -2235.0 * sin_deg(lp)
        + 382.0 * sin_deg(a3)
        + 175.0 * sin_deg(a1 - f)
        + 175.0 * sin_deg(a1 + f)
        + 127.0 * sin_deg(lp - mp)
        - 115.0 * sin_deg(lp + mp);

    LunarCoordinates {
        longitude: Degrees::new(lp + sum_l / 1_000_000.0).wrap_pos(),
        latitude: Degrees::new(sum_b / 1_000_000.0),
        distance: Kilometers::new(385_000.56 + sum_r / 1000.0),
    }
}

/// The Moon.
#[derive(Debug, Clone, Copy, Default)]
pub struct LunarModel;

impl PositionModel for LunarModel {
    fn equatorial(&self, jd: JulianDate) -> EquatorialPosition {
        let t = jd.dynamical_centuries();
        let moon = lunar_coordinates(t);

        // Nutation in longitude and obliquity, largest term only
        let omega = lunar_node(t);
        let apparent_longitude = moon.longitude + Degrees::new(-0.004_78 * omega.sin());
        let obliquity = mean_obliquity(t) + Degrees::new(0.002_56 * omega.cos());

        let (right_ascension, declination) =
            ecliptic_to_equatorial(apparent_longitude, moon.latitude, obliquity);

        EquatorialPosition {
            right_ascension,
            declination,
            distance: moon.distance,
        }
    }

    fn semidiameter(&self, distance: Kilometers) -> Degrees {
        qtty::Arcseconds::new(SEMIDIAMETER_ARCSEC_KM / distance.value()).to::<qtty::Degree>()
    }

    fn search_window(&self) -> qtty::Hours {
        qtty::Hours::new(38.0)
    }
}
