//! Celestial bodies and the position-model seam.

use serde::{Deserialize, Serialize};

use super::coordinates::EquatorialPosition;
use super::moon::LunarModel;
use super::sun::SolarModel;
use crate::models::JulianDate;

/// A geocentric position model for one body.
///
/// Implementations are stateless, so they can be shared between threads.
pub trait PositionModel: Send + Sync {
    /// Apparent geocentric equatorial position at a UT instant.
    fn equatorial(&self, jd: JulianDate) -> EquatorialPosition;

    /// Apparent angular radius of the disc at the given distance.
    fn semidiameter(&self, distance: qtty::Kilometers) -> qtty::Degrees;

    /// How far ahead a horizon crossing is searched for.
    fn search_window(&self) -> qtty::Hours;
}

/// Bodies the engine knows how to place on the sky.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CelestialBody {
    Sun,
    Moon,
}

impl CelestialBody {
    pub const ALL: [CelestialBody; 2] = [CelestialBody::Sun, CelestialBody::Moon];

    /// Lowercase name used as the JSON key.
    pub fn name(&self) -> &'static str {
        match self {
            CelestialBody::Sun => "sun",
            CelestialBody::Moon => "moon",
        }
    }

    pub fn model(&self) -> &'static dyn PositionModel {
        match self {
            CelestialBody::Sun => &SolarModel,
            CelestialBody::Moon => &LunarModel,
        }
    }
}

impl PositionModel for CelestialBody {
    fn equatorial(&self, jd: JulianDate) -> EquatorialPosition {
        self.model().equatorial(jd)
    }

    fn semidiameter(&self, distance: qtty::Kilometers) -> qtty::Degrees {
        self.model().semidiameter(distance)
    }

    fn search_window(&self) -> qtty::Hours {
        self.model().search_window()
    }
}

impl std::fmt::Display for CelestialBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
