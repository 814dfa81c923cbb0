use crate::angular::angular_distance;
use crate::attunement::formatter::{
    house_theme, InsightContext, InsightFormatter, TemplateFormatter,
};
use crate::body::CelestialBody;
use crate::chart::ChartSnapshot;
use crate::sonic::mapper::{compute_signal, SonicSignal};
use serde::{Deserialize, Serialize};

/// Minimum intensity rise that counts as a gap
pub const GAP_THRESHOLD: f64 = 0.40;
/// Maximum intensity difference that still counts as resonance
pub const RESONANCE_THRESHOLD: f64 = 0.20;
/// Gap magnitude that triggers a notification on its own
pub const NOTIFY_GAP: f64 = 0.60;
/// Alignment scores below this trigger a notification
pub const NOTIFY_SCORE: i32 = 40;
/// Gaps kept in a report
pub const MAX_GAPS: usize = 2;
/// Outer bodies are only considered on a return this tight
pub const EXACT_RETURN_ORB: f64 = 1.0;

// Absorbs representation error in differences such as 0.6 - 0.2
const EPSILON: f64 = 1e-9;

/// House separations that count as trine-related (same house included)
const TRINE_HOUSE_DISTANCES: [u8; 3] = [0, 4, 8];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttunementStatus {
    Gap,
    Resonance,
    Neutral,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttunementEntry {
    pub body: CelestialBody,
    pub natal_signal: SonicSignal,
    pub transit_signal: SonicSignal,
    /// transit intensity minus natal intensity, in [-1, 1]
    pub intensity_gap: f64,
    pub status: AttunementStatus,
    /// 1-based rank within its status group; 0 for neutral entries
    pub priority: u32,
    pub explanation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttunementReport {
    /// Largest gaps first, at most [`MAX_GAPS`]
    pub gaps: Vec<AttunementEntry>,
    pub resonances: Vec<AttunementEntry>,
    pub neutrals: Vec<AttunementEntry>,
    /// Gap count before capping
    pub gap_count: usize,
    pub resonance_count: usize,
    pub neutral_count: usize,
    /// 0..=100
    pub alignment_score: i32,
    pub should_notify: bool,
}

impl AttunementReport {
    /// Kept gaps, then resonances, then neutrals.
    pub fn entries(&self) -> impl Iterator<Item = &AttunementEntry> {
        self.gaps.iter().chain(&self.resonances).chain(&self.neutrals)
    }

    pub fn gap_bodies(&self) -> Vec<CelestialBody> {
        self.gaps.iter().map(|e| e.body).collect()
    }
}

/// Status for one body from its intensity gap and the two house numbers.
pub fn classify_gap(intensity_gap: f64, natal_house: u8, transit_house: u8) -> AttunementStatus {
    let house_distance = natal_house.abs_diff(transit_house);
    if intensity_gap >= GAP_THRESHOLD - EPSILON && natal_house != transit_house {
        AttunementStatus::Gap
    } else if intensity_gap.abs() <= RESONANCE_THRESHOLD + EPSILON
        && TRINE_HOUSE_DISTANCES.contains(&house_distance)
    {
        AttunementStatus::Resonance
    } else {
        AttunementStatus::Neutral
    }
}

/// `50 + 10·resonances − 15·gaps + 5·neutrals`, clamped to 0..=100.
pub fn alignment_score(resonance_count: usize, gap_count: usize, neutral_count: usize) -> i32 {
    let raw = 50 + 10 * resonance_count as i64 - 15 * gap_count as i64 + 5 * neutral_count as i64;
    raw.clamp(0, 100) as i32
}

/// Compares a natal chart against a target chart body by body.
///
/// Personal bodies (Sun through Mars) are always compared. Outer bodies are
/// only surfaced on an exact return: natal and target longitudes within 1°.
pub struct AttunementClassifier<F = TemplateFormatter> {
    formatter: F,
}

impl AttunementClassifier<TemplateFormatter> {
    pub fn new() -> Self {
        Self {
            formatter: TemplateFormatter,
        }
    }
}

impl Default for AttunementClassifier<TemplateFormatter> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: InsightFormatter> AttunementClassifier<F> {
    pub fn with_formatter(formatter: F) -> Self {
        Self { formatter }
    }

    pub fn classify(&self, natal: &ChartSnapshot, target: &ChartSnapshot) -> AttunementReport {
        let mut gaps = Vec::new();
        let mut resonances = Vec::new();
        let mut neutrals = Vec::new();

        for body in CelestialBody::ALL {
            let natal_pos = natal.position(body);
            let target_pos = target.position(body);

            if !body.is_personal()
                && angular_distance(natal_pos.longitude, target_pos.longitude) > EXACT_RETURN_ORB
            {
                continue;
            }

            let natal_signal =
                compute_signal(natal_pos, natal.house_of(body), natal.house_position_of(body));
            let transit_signal =
                compute_signal(target_pos, target.house_of(body), target.house_position_of(body));
            let intensity_gap = transit_signal.intensity - natal_signal.intensity;
            let status = classify_gap(intensity_gap, natal_signal.house, transit_signal.house);

            let explanation = self.formatter.explain(&InsightContext {
                body,
                status,
                natal_house: natal_signal.house,
                transit_house: transit_signal.house,
                natal_theme: house_theme(natal_signal.house),
                transit_theme: house_theme(transit_signal.house),
                intensity_gap,
            });

            let entry = AttunementEntry {
                body,
                natal_signal,
                transit_signal,
                intensity_gap,
                status,
                priority: 0,
                explanation,
            };

            match status {
                AttunementStatus::Gap => gaps.push(entry),
                AttunementStatus::Resonance => resonances.push(entry),
                AttunementStatus::Neutral => neutrals.push(entry),
            }
        }

        let gap_count = gaps.len();
        let resonance_count = resonances.len();
        let neutral_count = neutrals.len();

        rank_by_gap(&mut gaps);
        gaps.truncate(MAX_GAPS);
        rank_by_gap(&mut resonances);

        let alignment_score = alignment_score(resonance_count, gap_count, neutral_count);
        let should_notify = alignment_score < NOTIFY_SCORE
            || gaps.iter().any(|e| e.intensity_gap.abs() >= NOTIFY_GAP - EPSILON);

        log::debug!(
            "Attunement: {} gaps ({} kept), {} resonances, {} neutral, score {}",
            gap_count,
            gaps.len(),
            resonance_count,
            neutral_count,
            alignment_score
        );

        AttunementReport {
            gaps,
            resonances,
            neutrals,
            gap_count,
            resonance_count,
            neutral_count,
            alignment_score,
            should_notify,
        }
    }
}

/// Sort by gap, largest first, and assign 1-based priorities.
fn rank_by_gap(entries: &mut [AttunementEntry]) {
    entries.sort_by(|a, b| b.intensity_gap.total_cmp(&a.intensity_gap));
    for (i, entry) in entries.iter_mut().enumerate() {
        entry.priority = i as u32 + 1;
    }
}
