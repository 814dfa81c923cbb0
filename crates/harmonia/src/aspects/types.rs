use crate::body::CelestialBody;
use serde::{Deserialize, Serialize};

/// Maximum orb for major aspects (degrees)
pub const MAJOR_ORB: f64 = 8.0;
/// Maximum orb for minor aspects (degrees)
pub const MINOR_ORB: f64 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AspectType {
    Conjunction,
    Opposition,
    Square,
    Trine,
    Sextile,
    SemiSextile,
    Quincunx,
    SemiSquare,
    Sesquiquadrate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AspectTier {
    Major,
    Minor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AspectNature {
    Harmonious,
    Challenging,
    Neutral,
}

impl AspectType {
    /// Major aspects in detection order.
    pub const MAJOR: [AspectType; 5] = [
        AspectType::Conjunction,
        AspectType::Opposition,
        AspectType::Square,
        AspectType::Trine,
        AspectType::Sextile,
    ];

    /// Minor aspects in detection order.
    pub const MINOR: [AspectType; 4] = [
        AspectType::SemiSextile,
        AspectType::Quincunx,
        AspectType::SemiSquare,
        AspectType::Sesquiquadrate,
    ];

    /// Exact angle for this aspect
    pub fn angle(self) -> f64 {
        match self {
            AspectType::Conjunction => 0.0,
            AspectType::Opposition => 180.0,
            AspectType::Square => 90.0,
            AspectType::Trine => 120.0,
            AspectType::Sextile => 60.0,
            AspectType::SemiSextile => 30.0,
            AspectType::Quincunx => 150.0,
            AspectType::SemiSquare => 45.0,
            AspectType::Sesquiquadrate => 135.0,
        }
    }

    pub fn tier(self) -> AspectTier {
        match self {
            AspectType::Conjunction
            | AspectType::Opposition
            | AspectType::Square
            | AspectType::Trine
            | AspectType::Sextile => AspectTier::Major,
            _ => AspectTier::Minor,
        }
    }

    pub fn is_major(self) -> bool {
        self.tier() == AspectTier::Major
    }

    pub fn max_orb(self) -> f64 {
        self.tier().max_orb()
    }

    /// Nature of the aspect independent of the bodies involved.
    ///
    /// Conjunctions take their nature from the bodies; see
    /// [`conjunction_nature`](crate::aspects::analyzer::conjunction_nature).
    pub fn fixed_nature(self) -> Option<AspectNature> {
        match self {
            AspectType::Conjunction => None,
            AspectType::Trine | AspectType::Sextile => Some(AspectNature::Harmonious),
            AspectType::SemiSextile => Some(AspectNature::Neutral),
            AspectType::Opposition
            | AspectType::Square
            | AspectType::Quincunx
            | AspectType::SemiSquare
            | AspectType::Sesquiquadrate => Some(AspectNature::Challenging),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            AspectType::Conjunction => "Conjunction",
            AspectType::Opposition => "Opposition",
            AspectType::Square => "Square",
            AspectType::Trine => "Trine",
            AspectType::Sextile => "Sextile",
            AspectType::SemiSextile => "Semi-sextile",
            AspectType::Quincunx => "Quincunx",
            AspectType::SemiSquare => "Semi-square",
            AspectType::Sesquiquadrate => "Sesquiquadrate",
        }
    }
}

impl AspectTier {
    pub fn max_orb(self) -> f64 {
        match self {
            AspectTier::Major => MAJOR_ORB,
            AspectTier::Minor => MINOR_ORB,
        }
    }
}

/// A classified angular relationship between two bodies.
///
/// `body_a` comes from the first position set (natal in cross-chart
/// comparisons) and `body_b` from the second (transit or target).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Aspect {
    pub body_a: CelestialBody,
    pub body_b: CelestialBody,
    pub aspect_type: AspectType,
    /// Deviation from the exact angle, in degrees
    pub orb: f64,
    pub nature: AspectNature,
    pub tier: AspectTier,
}

impl Aspect {
    pub fn score(&self) -> f64 {
        crate::aspects::analyzer::score_aspect(self)
    }
}
