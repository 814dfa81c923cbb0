//! Transit fidelity: which natal placements are being actively aspected by
//! the same body in transit, and whether each aspect is building or waning.

use crate::angular::angular_distance;
use crate::aspects::types::AspectType;
use crate::body::CelestialBody;
use crate::chart::ChartSnapshot;
use crate::ephemeris::types::Position;
use chrono::Duration;
use serde::{Deserialize, Serialize};

/// Orb for an aspect to be considered active
pub const FIDELITY_ORB: f64 = 5.0;
/// Orb for an aspect to count as tight
pub const TIGHT_ORB: f64 = 3.0;
/// Tight aspects needed, with a slow anchor, for a major life shift
pub const LIFE_SHIFT_TIGHT_COUNT: usize = 3;

/// Interval between the two transit samples used to judge applying/separating.
pub fn lookahead() -> Duration {
    Duration::hours(1)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlignmentStatus {
    Gap,
    Resonance,
    Alignment,
    Integration,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fidelity {
    pub aspect_type: AspectType,
    pub orb: f64,
    pub is_applying: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlignmentRecord {
    pub body: CelestialBody,
    pub natal: Position,
    pub transit: Position,
    pub fidelity: Fidelity,
    pub status: AlignmentStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FidelityReport {
    pub records: Vec<AlignmentRecord>,
    /// Slow bodies in gap status
    pub gap_count: usize,
    /// Slow bodies in resonance status
    pub resonance_count: usize,
    /// Records of any body within [`TIGHT_ORB`]
    pub tight_count: usize,
    pub has_slow_anchor: bool,
    pub is_major_life_shift: bool,
}

/// Closest major aspect to `distance` within `max_orb`, if any.
///
/// Unlike aspect detection, this is best-match: every major aspect is
/// tried and the smallest orb wins.
pub fn best_major_aspect(distance: f64, max_orb: f64) -> Option<(AspectType, f64)> {
    AspectType::MAJOR
        .iter()
        .map(|&aspect_type| (aspect_type, (distance - aspect_type.angle()).abs()))
        .filter(|&(_, orb)| orb <= max_orb)
        .min_by(|a, b| a.1.total_cmp(&b.1))
}

/// An aspect is applying when its orb shrinks over the look-ahead interval.
pub fn is_applying(orb_now: f64, orb_later: f64) -> bool {
    orb_later < orb_now
}

/// Status for an active aspect.
///
/// Trines and sextiles are always resonance. Any other aspect that is
/// separating becomes integration.
pub fn alignment_status(aspect_type: AspectType, applying: bool) -> AlignmentStatus {
    let status = match aspect_type {
        AspectType::Square | AspectType::Opposition => AlignmentStatus::Gap,
        AspectType::Conjunction => AlignmentStatus::Alignment,
        _ => AlignmentStatus::Resonance,
    };
    if !applying && status != AlignmentStatus::Resonance {
        AlignmentStatus::Integration
    } else {
        status
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TransitFidelityEngine;

impl TransitFidelityEngine {
    pub fn new() -> Self {
        Self
    }

    /// Evaluate each body's transit against its own natal placement.
    ///
    /// `now` and `later` are transit positions at T and T + [`lookahead`];
    /// bodies missing from either sample are skipped.
    pub fn evaluate(
        &self,
        natal: &ChartSnapshot,
        now: &[Position],
        later: &[Position],
    ) -> FidelityReport {
        let mut records = Vec::new();
        for body in CelestialBody::ALL {
            let (Some(transit), Some(transit_later)) = (find(now, body), find(later, body)) else {
                continue;
            };
            if let Some(record) = self.evaluate_body(natal.position(body), transit, transit_later) {
                records.push(record);
            }
        }
        let report = summarize(records);
        log::debug!(
            "Fidelity: {} active, {} tight, slow anchor {}, life shift {}",
            report.records.len(),
            report.tight_count,
            report.has_slow_anchor,
            report.is_major_life_shift
        );
        report
    }

    /// Record for one body, or `None` when no major aspect is within [`FIDELITY_ORB`].
    pub fn evaluate_body(
        &self,
        natal: &Position,
        transit: &Position,
        transit_later: &Position,
    ) -> Option<AlignmentRecord> {
        let distance = angular_distance(natal.longitude, transit.longitude);
        let (aspect_type, orb) = best_major_aspect(distance, FIDELITY_ORB)?;

        let later_distance = angular_distance(natal.longitude, transit_later.longitude);
        let orb_later = (later_distance - aspect_type.angle()).abs();
        let applying = is_applying(orb, orb_later);

        Some(AlignmentRecord {
            body: natal.body,
            natal: *natal,
            transit: *transit,
            fidelity: Fidelity {
                aspect_type,
                orb,
                is_applying: applying,
            },
            status: alignment_status(aspect_type, applying),
        })
    }
}

fn find(positions: &[Position], body: CelestialBody) -> Option<&Position> {
    positions.iter().find(|p| p.body == body)
}

fn summarize(records: Vec<AlignmentRecord>) -> FidelityReport {
    let slow: Vec<&AlignmentRecord> = records.iter().filter(|r| r.body.is_slow()).collect();
    let gap_count = slow.iter().filter(|r| r.status == AlignmentStatus::Gap).count();
    let resonance_count = slow.iter().filter(|r| r.status == AlignmentStatus::Resonance).count();
    let has_slow_anchor = slow.iter().any(|r| r.fidelity.orb <= TIGHT_ORB);
    let tight_count = records.iter().filter(|r| r.fidelity.orb <= TIGHT_ORB).count();
    let is_major_life_shift = tight_count >= LIFE_SHIFT_TIGHT_COUNT && has_slow_anchor;

    FidelityReport {
        records,
        gap_count,
        resonance_count,
        tight_count,
        has_slow_anchor,
        is_major_life_shift,
    }
}
