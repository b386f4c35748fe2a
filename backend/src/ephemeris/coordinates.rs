//! Coordinate helpers shared by the position models: obliquity, sidereal
//! time, ecliptic/equatorial conversion and topocentric altitude.

use qtty::{Degrees, Kilometers};

use crate::models::{GeographicLocation, JulianDate};

/// Equatorial radius of the Earth in kilometres (IAU 1976).
pub const EARTH_RADIUS_KM: f64 = 6378.14;

/// Kilometres per astronomical unit.
pub const KM_PER_AU: f64 = 149_597_870.7;

/// Polar/equatorial axis ratio of the Earth ellipsoid (1 - f).
const EARTH_AXIS_RATIO: f64 = 0.996_647_19;

/// Geocentric apparent equatorial position of a body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EquatorialPosition {
    pub right_ascension: Degrees,
    pub declination: Degrees,
    pub distance: Kilometers,
}

/// Mean obliquity of the ecliptic (Meeus 22.2), `t` in Julian centuries TT.
pub fn mean_obliquity(t: f64) -> Degrees {
    let arcsec = 21.448 - t * (46.8150 + t * (0.00059 - t * 0.001813));
    Degrees::new(23.0 + (26.0 + arcsec / 60.0) / 60.0)
}

/// Longitude of the Moon's ascending node, used by the nutation terms.
pub fn lunar_node(t: f64) -> Degrees {
    Degrees::new(125.04 - 1934.136 * t)
}

/// Ecliptic (longitude, latitude) to equatorial (RA, declination).
pub fn ecliptic_to_equatorial(
    longitude: Degrees,
    latitude: Degrees,
    obliquity: Degrees,
) -> (Degrees, Degrees) {
    let (sin_l, cos_l) = longitude.sin_cos();
    let (sin_b, cos_b) = latitude.sin_cos();
    let (sin_e, cos_e) = obliquity.sin_cos();

    let ra = (sin_l * cos_e - (sin_b / cos_b) * sin_e).atan2(cos_l);
    let dec = (sin_b * cos_e + cos_b * sin_e * sin_l).clamp(-1.0, 1.0).asin();

    (
        Degrees::new(ra.to_degrees()).wrap_pos(),
        Degrees::new(dec.to_degrees()),
    )
}

/// Greenwich mean sidereal time (Meeus 12.4), `jd` on the UT scale.
pub fn greenwich_mean_sidereal_time(jd: JulianDate) -> Degrees {
    let d = jd.days_since_j2000();
    let t = d / 36_525.0;
    Degrees::new(
        280.460_618_37 + 360.985_647_366_29 * d + 0.000_387_933 * t * t - t * t * t / 38_710_000.0,
    )
    .wrap_pos()
}

/// Local mean sidereal time for an east-positive longitude.
pub fn local_sidereal_time(jd: JulianDate, longitude: Degrees) -> Degrees {
    (greenwich_mean_sidereal_time(jd) + longitude).wrap_pos()
}

/// Topocentric altitude of a body's centre, parallax included (Meeus ch. 40,
/// observer at sea level). No refraction is applied.
pub fn topocentric_altitude(
    position: &EquatorialPosition,
    location: &GeographicLocation,
    local_sidereal_time: Degrees,
) -> Degrees {
    let phi = location.latitude().to::<qtty::Radian>().value();
    let u = (EARTH_AXIS_RATIO * phi.tan()).atan();
    let rho_sin_phi = EARTH_AXIS_RATIO * u.sin();
    let rho_cos_phi = u.cos();

    let sin_parallax = EARTH_RADIUS_KM / position.distance.value();
    let hour_angle = (local_sidereal_time - position.right_ascension).to::<qtty::Radian>().value();
    let (sin_dec, cos_dec) = position.declination.sin_cos();

    let a = cos_dec - rho_cos_phi * sin_parallax * hour_angle.cos();
    let delta_ra = (-rho_cos_phi * sin_parallax * hour_angle.sin()).atan2(a);
    let topo_dec = ((sin_dec - rho_sin_phi * sin_parallax) * delta_ra.cos()).atan2(a);
    let topo_hour_angle = hour_angle - delta_ra;

    let sin_alt = phi.sin() * topo_dec.sin() + phi.cos() * topo_dec.cos() * topo_hour_angle.cos();
    Degrees::new(sin_alt.clamp(-1.0, 1.0).asin().to_degrees())
}
