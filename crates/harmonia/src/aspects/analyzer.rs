use crate::angular::angular_distance;
use crate::aspects::types::{Aspect, AspectNature, AspectType};
use crate::body::CelestialBody;
use crate::ephemeris::types::Position;

/// Aspect detection and scoring.
///
/// Detection is first-match within each tier: major aspects are tried in
/// [`AspectType::MAJOR`] order with an 8° orb, then minors in
/// [`AspectType::MINOR`] order with a 3° orb.
#[derive(Debug, Clone, Copy, Default)]
pub struct AspectAnalyzer;

impl AspectAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Classify the relationship between two longitudes, if any.
    pub fn detect_aspect(
        &self,
        lon_a: f64,
        lon_b: f64,
        body_a: CelestialBody,
        body_b: CelestialBody,
    ) -> Option<Aspect> {
        let distance = angular_distance(lon_a, lon_b);

        let (aspect_type, orb) = first_match(distance, &AspectType::MAJOR)
            .or_else(|| first_match(distance, &AspectType::MINOR))?;

        let nature = aspect_type
            .fixed_nature()
            .unwrap_or_else(|| conjunction_nature(body_a, body_b));

        Some(Aspect {
            body_a,
            body_b,
            aspect_type,
            orb,
            nature,
            tier: aspect_type.tier(),
        })
    }

    /// Every aspect between a body of `set_a` and a body of `set_b`.
    ///
    /// The full cross product is examined, including a body against its own
    /// counterpart in the other set.
    pub fn detect_all(&self, set_a: &[Position], set_b: &[Position]) -> Vec<Aspect> {
        let mut aspects = Vec::new();
        for a in set_a {
            for b in set_b {
                if let Some(aspect) = self.detect_aspect(a.longitude, b.longitude, a.body, b.body) {
                    aspects.push(aspect);
                }
            }
        }
        log::debug!(
            "Detected {} aspects across {}x{} positions",
            aspects.len(),
            set_a.len(),
            set_b.len()
        );
        aspects
    }

    /// Aspects among the unique pairs of a single position set.
    pub fn detect_within(&self, positions: &[Position]) -> Vec<Aspect> {
        let mut aspects = Vec::new();
        for i in 0..positions.len() {
            for j in (i + 1)..positions.len() {
                let (a, b) = (&positions[i], &positions[j]);
                if let Some(aspect) = self.detect_aspect(a.longitude, b.longitude, a.body, b.body) {
                    aspects.push(aspect);
                }
            }
        }
        aspects
    }

    pub fn score_aspect(&self, aspect: &Aspect) -> f64 {
        score_aspect(aspect)
    }
}

fn first_match(distance: f64, candidates: &[AspectType]) -> Option<(AspectType, f64)> {
    candidates.iter().find_map(|&aspect_type| {
        let orb = (distance - aspect_type.angle()).abs();
        (orb <= aspect_type.max_orb()).then_some((aspect_type, orb))
    })
}

/// Nature of a conjunction from the bodies involved. A benefic outranks a malefic.
pub fn conjunction_nature(a: CelestialBody, b: CelestialBody) -> AspectNature {
    if a.is_benefic() || b.is_benefic() {
        AspectNature::Harmonious
    } else if a.is_malefic() || b.is_malefic() {
        AspectNature::Challenging
    } else {
        AspectNature::Neutral
    }
}

/// Non-negative prioritisation score.
///
/// Challenging aspects still score above zero; they carry weight as growth
/// material rather than as a penalty.
pub fn score_aspect(aspect: &Aspect) -> f64 {
    let base = match aspect.aspect_type {
        AspectType::Trine | AspectType::Sextile => 5.0,
        AspectType::Conjunction => match aspect.nature {
            AspectNature::Harmonious => 7.0,
            AspectNature::Challenging => 2.0,
            AspectNature::Neutral => 4.0,
        },
        AspectType::Square | AspectType::Opposition => 2.5,
        _ => 1.5,
    };
    let max_orb = aspect.tier.max_orb();
    let orb_factor = 1.0 - (aspect.orb.min(max_orb) / max_orb) * 0.5;
    let avg_weight = (aspect.body_a.weight() + aspect.body_b.weight()) / 2.0;
    base * orb_factor * avg_weight
}
