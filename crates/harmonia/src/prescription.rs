//! Picks the transit aspects a daily recommendation is built around.

use crate::aspects::analyzer::AspectAnalyzer;
use crate::aspects::types::{Aspect, AspectNature};
use crate::body::CelestialBody;
use crate::ephemeris::types::Position;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Key used when no natal/transit aspect is in orb
pub const QUIET_DAY_KEY: &str = "quiet_day";

/// Body whose frequency carries a quiet day
pub const QUIET_DAY_CARRIER: CelestialBody = CelestialBody::Sun;

/// Secondary aspects reported after the primary
pub const SECONDARY_COUNT: usize = 2;

/// Recommendation keys by transiting body and aspect nature.
const RECOMMENDATIONS: &[(CelestialBody, AspectNature, &str)] = &[
    (CelestialBody::Sun, AspectNature::Harmonious, "sun_radiate"),
    (CelestialBody::Sun, AspectNature::Challenging, "sun_recenter"),
    (CelestialBody::Sun, AspectNature::Neutral, "sun_presence"),
    (CelestialBody::Moon, AspectNature::Harmonious, "moon_nurture"),
    (CelestialBody::Moon, AspectNature::Challenging, "moon_soothe"),
    (CelestialBody::Moon, AspectNature::Neutral, "moon_reflect"),
    (CelestialBody::Mercury, AspectNature::Harmonious, "mercury_express"),
    (CelestialBody::Mercury, AspectNature::Challenging, "mercury_clarify"),
    (CelestialBody::Mercury, AspectNature::Neutral, "mercury_focus"),
    (CelestialBody::Venus, AspectNature::Harmonious, "venus_savor"),
    (CelestialBody::Venus, AspectNature::Challenging, "venus_rebalance"),
    (CelestialBody::Venus, AspectNature::Neutral, "venus_soften"),
    (CelestialBody::Mars, AspectNature::Harmonious, "mars_act"),
    (CelestialBody::Mars, AspectNature::Challenging, "mars_release"),
    (CelestialBody::Mars, AspectNature::Neutral, "mars_channel"),
    (CelestialBody::Jupiter, AspectNature::Harmonious, "jupiter_expand"),
    (CelestialBody::Jupiter, AspectNature::Challenging, "jupiter_temper"),
    (CelestialBody::Jupiter, AspectNature::Neutral, "jupiter_explore"),
    (CelestialBody::Saturn, AspectNature::Harmonious, "saturn_build"),
    (CelestialBody::Saturn, AspectNature::Challenging, "saturn_ground"),
    (CelestialBody::Saturn, AspectNature::Neutral, "saturn_structure"),
    (CelestialBody::Uranus, AspectNature::Harmonious, "uranus_innovate"),
    (CelestialBody::Uranus, AspectNature::Challenging, "uranus_stabilize"),
    (CelestialBody::Uranus, AspectNature::Neutral, "uranus_awaken"),
    (CelestialBody::Neptune, AspectNature::Harmonious, "neptune_dream"),
    (CelestialBody::Neptune, AspectNature::Challenging, "neptune_anchor"),
    (CelestialBody::Neptune, AspectNature::Neutral, "neptune_dissolve"),
    (CelestialBody::Pluto, AspectNature::Harmonious, "pluto_empower"),
    (CelestialBody::Pluto, AspectNature::Challenging, "pluto_transform"),
    (CelestialBody::Pluto, AspectNature::Neutral, "pluto_deepen"),
];

/// Recommendation key for a transiting body and aspect nature.
pub fn recommendation_key(body: CelestialBody, nature: AspectNature) -> &'static str {
    RECOMMENDATIONS
        .iter()
        .find(|(b, n, _)| *b == body && *n == nature)
        .map(|(_, _, key)| *key)
        .unwrap_or(QUIET_DAY_KEY)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prescription {
    /// `None` on a quiet day
    pub primary: Option<Aspect>,
    pub secondary: Vec<Aspect>,
    pub recommendation_key: String,
    pub carrier_frequency: f64,
    pub is_quiet_day: bool,
}

impl Prescription {
    pub fn quiet_day() -> Self {
        Self {
            primary: None,
            secondary: Vec::new(),
            recommendation_key: QUIET_DAY_KEY.to_string(),
            carrier_frequency: QUIET_DAY_CARRIER.base_frequency(),
            is_quiet_day: true,
        }
    }
}

/// Ordering used to rank natal/transit aspects.
///
/// Challenging aspects come first, then heavier transiting bodies; the last
/// key is the negated orb, so among otherwise equal aspects the wider orb
/// ranks first.
pub fn priority_order(a: &Aspect, b: &Aspect) -> Ordering {
    let key = |x: &Aspect| (nature_rank(x.nature), -x.body_b.weight(), -x.orb);
    let (ka, kb) = (key(a), key(b));
    ka.0.cmp(&kb.0)
        .then_with(|| ka.1.total_cmp(&kb.1))
        .then_with(|| ka.2.total_cmp(&kb.2))
}

fn nature_rank(nature: AspectNature) -> u8 {
    match nature {
        AspectNature::Challenging => 0,
        _ => 1,
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PrescriptionSelector {
    analyzer: AspectAnalyzer,
}

impl PrescriptionSelector {
    pub fn new() -> Self {
        Self {
            analyzer: AspectAnalyzer::new(),
        }
    }

    /// Every natal/transit aspect, sorted by [`priority_order`].
    pub fn prioritized(&self, natal: &[Position], transit: &[Position]) -> Vec<Aspect> {
        let mut aspects = self.analyzer.detect_all(natal, transit);
        aspects.sort_by(priority_order);
        aspects
    }

    pub fn select(&self, natal: &[Position], transit: &[Position]) -> Prescription {
        let ranked = self.prioritized(natal, transit);
        let Some(primary) = ranked.first().copied() else {
            log::debug!("No natal/transit aspects in orb; quiet day");
            return Prescription::quiet_day();
        };

        let secondary = ranked.iter().skip(1).take(SECONDARY_COUNT).copied().collect();
        Prescription {
            primary: Some(primary),
            secondary,
            recommendation_key: recommendation_key(primary.body_b, primary.nature).to_string(),
            carrier_frequency: primary.body_b.base_frequency(),
            is_quiet_day: false,
        }
    }
}
