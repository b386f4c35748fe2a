//! Atmospheric refraction.

use qtty::Degrees;

use crate::models::Atmosphere;

/// Lowest apparent altitude the refraction formula is evaluated at.
const MIN_APPARENT_ALTITUDE_DEG: f64 = -1.0;

/// Refraction for a body seen at `apparent` altitude (Bennett, Meeus 16.3),
/// scaled to the observer's pressure and temperature (Meeus 16.4 note).
///
/// Altitudes below -1° reuse the -1° value so the result stays finite.
pub fn refraction(apparent: Degrees, atmosphere: &Atmosphere) -> Degrees {
    let h = apparent.value().max(MIN_APPARENT_ALTITUDE_DEG);
    let arcmin = 1.0 / (h + 7.31 / (h + 4.4)).to_radians().tan();
    let scale = (atmosphere.pressure_hpa / 1010.0) * (283.0 / (273.0 + atmosphere.temperature_c));
    qtty::Arcminutes::new(arcmin * scale).to::<qtty::Degree>()
}
