//! The ten chart bodies and their fixed attributes.
//!
//! Every per-body constant (base frequency, synthesis role, benefic/malefic
//! classification, scoring weight) lives in one exhaustive `match`, so adding
//! a body without filling in its profile is a compile error.

use crate::error::HarmoniaError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CelestialBody {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
}

/// Voice a body takes in the synthesis layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SynthRole {
    Carrier,
    Modulator,
    Detail,
    Harmonic,
    Percussive,
    Drone,
    Glitch,
    Ambient,
    Subbass,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Disposition {
    Benefic,
    Malefic,
    Neither,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyProfile {
    /// Base sonic frequency in Hz
    pub base_frequency: f64,
    pub role: SynthRole,
    pub disposition: Disposition,
    /// Importance weight in [0.4, 1.0]
    pub weight: f64,
}

impl CelestialBody {
    pub const ALL: [CelestialBody; 10] = [
        CelestialBody::Sun,
        CelestialBody::Moon,
        CelestialBody::Mercury,
        CelestialBody::Venus,
        CelestialBody::Mars,
        CelestialBody::Jupiter,
        CelestialBody::Saturn,
        CelestialBody::Uranus,
        CelestialBody::Neptune,
        CelestialBody::Pluto,
    ];

    pub const fn profile(self) -> BodyProfile {
        use Disposition::*;
        use SynthRole::*;
        match self {
            CelestialBody::Sun => BodyProfile {
                base_frequency: 126.22,
                role: Carrier,
                disposition: Neither,
                weight: 1.0,
            },
            CelestialBody::Moon => BodyProfile {
                base_frequency: 210.42,
                role: Modulator,
                disposition: Neither,
                weight: 1.0,
            },
            CelestialBody::Mercury => BodyProfile {
                base_frequency: 141.27,
                role: Detail,
                disposition: Neither,
                weight: 0.7,
            },
            CelestialBody::Venus => BodyProfile {
                base_frequency: 221.23,
                role: Harmonic,
                disposition: Benefic,
                weight: 0.8,
            },
            CelestialBody::Mars => BodyProfile {
                base_frequency: 144.72,
                role: Percussive,
                disposition: Malefic,
                weight: 0.8,
            },
            CelestialBody::Jupiter => BodyProfile {
                base_frequency: 183.58,
                role: Harmonic,
                disposition: Benefic,
                weight: 0.9,
            },
            CelestialBody::Saturn => BodyProfile {
                base_frequency: 147.85,
                role: Drone,
                disposition: Malefic,
                weight: 0.9,
            },
            CelestialBody::Uranus => BodyProfile {
                base_frequency: 207.36,
                role: Glitch,
                disposition: Neither,
                weight: 0.6,
            },
            CelestialBody::Neptune => BodyProfile {
                base_frequency: 211.44,
                role: Ambient,
                disposition: Neither,
                weight: 0.5,
            },
            CelestialBody::Pluto => BodyProfile {
                base_frequency: 140.25,
                role: Subbass,
                disposition: Neither,
                weight: 0.4,
            },
        }
    }

    pub fn base_frequency(self) -> f64 {
        self.profile().base_frequency
    }

    pub fn role(self) -> SynthRole {
        self.profile().role
    }

    pub fn weight(self) -> f64 {
        self.profile().weight
    }

    pub fn is_benefic(self) -> bool {
        self.profile().disposition == Disposition::Benefic
    }

    pub fn is_malefic(self) -> bool {
        self.profile().disposition == Disposition::Malefic
    }

    /// Sun through Mars.
    pub fn is_personal(self) -> bool {
        self <= CelestialBody::Mars
    }

    /// Mars and everything beyond it; these anchor long-running transits.
    pub fn is_slow(self) -> bool {
        self >= CelestialBody::Mars
    }

    /// Position of this body in [`CelestialBody::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            CelestialBody::Sun => "Sun",
            CelestialBody::Moon => "Moon",
            CelestialBody::Mercury => "Mercury",
            CelestialBody::Venus => "Venus",
            CelestialBody::Mars => "Mars",
            CelestialBody::Jupiter => "Jupiter",
            CelestialBody::Saturn => "Saturn",
            CelestialBody::Uranus => "Uranus",
            CelestialBody::Neptune => "Neptune",
            CelestialBody::Pluto => "Pluto",
        }
    }

    /// Swiss Ephemeris planet number (SE_SUN = 0 .. SE_PLUTO = 9).
    pub fn swe_id(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for CelestialBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for CelestialBody {
    type Err = HarmoniaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        CelestialBody::ALL
            .iter()
            .copied()
            .find(|body| body.name().to_lowercase() == wanted)
            .ok_or_else(|| HarmoniaError::UnknownCelestialBody(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weights_in_range() {
        for body in CelestialBody::ALL {
            let w = body.weight();
            assert!((0.4..=1.0).contains(&w), "{} weight {}", body, w);
        }
    }

    #[test]
    fn test_benefic_and_malefic() {
        assert!(CelestialBody::Venus.is_benefic());
        assert!(CelestialBody::Jupiter.is_benefic());
        assert!(CelestialBody::Mars.is_malefic());
        assert!(CelestialBody::Saturn.is_malefic());
        assert!(!CelestialBody::Sun.is_benefic());
        assert!(!CelestialBody::Sun.is_malefic());
    }

    #[test]
    fn test_personal_and_slow_overlap_at_mars() {
        assert!(CelestialBody::Mars.is_personal());
        assert!(CelestialBody::Mars.is_slow());
        assert!(!CelestialBody::Jupiter.is_personal());
        assert!(!CelestialBody::Venus.is_slow());
    }

    #[test]
    fn test_index_matches_all_order() {
        for (i, body) in CelestialBody::ALL.iter().enumerate() {
            assert_eq!(body.index(), i);
        }
    }

    #[test]
    fn test_from_str() {
        assert_eq!("saturn".parse::<CelestialBody>().unwrap(), CelestialBody::Saturn);
        assert_eq!(" Moon ".parse::<CelestialBody>().unwrap(), CelestialBody::Moon);
        assert_eq!(
            "chiron".parse::<CelestialBody>(),
            Err(HarmoniaError::UnknownCelestialBody("chiron".to_string()))
        );
    }
}
