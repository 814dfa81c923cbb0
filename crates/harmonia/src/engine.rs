//! Entry points consumed by narrative, playlist and REST layers.

use crate::aspects::analyzer::AspectAnalyzer;
use crate::aspects::types::Aspect;
use crate::attunement::classifier::{AttunementClassifier, AttunementReport};
use crate::attunement::digest::{DaySummary, WeeklyDigest};
use crate::attunement::formatter::{InsightFormatter, TemplateFormatter};
use crate::chart::{compute_chart, ChartSnapshot};
use crate::ephemeris::provider::{positions_at, AscendantProvider, EphemerisProvider};
use crate::ephemeris::types::{GeoLocation, Position};
use crate::error::{HarmoniaError, Result};
use crate::fidelity::{lookahead, FidelityReport, TransitFidelityEngine};
use crate::prescription::{Prescription, PrescriptionSelector};
use crate::sonic::mapper::{chart_signals, SonicSignal};
use chrono::{DateTime, Duration, Utc};

/// Days sampled by [`HarmoniaEngine::weekly_digest`]
pub const DIGEST_DAYS: i64 = 7;

/// Binds the pure analysis components to an ephemeris provider.
///
/// Every method is stateless apart from provider calls; provider errors are
/// returned as-is without retry.
pub struct HarmoniaEngine<P, F = TemplateFormatter> {
    provider: P,
    analyzer: AspectAnalyzer,
    classifier: AttunementClassifier<F>,
    fidelity: TransitFidelityEngine,
    selector: PrescriptionSelector,
}

impl<P> HarmoniaEngine<P, TemplateFormatter>
where
    P: EphemerisProvider + AscendantProvider,
{
    pub fn new(provider: P) -> Self {
        Self::with_formatter(provider, TemplateFormatter)
    }
}

impl<P, F> HarmoniaEngine<P, F>
where
    P: EphemerisProvider + AscendantProvider,
    F: InsightFormatter,
{
    pub fn with_formatter(provider: P, formatter: F) -> Self {
        Self {
            provider,
            analyzer: AspectAnalyzer::new(),
            classifier: AttunementClassifier::with_formatter(formatter),
            fidelity: TransitFidelityEngine::new(),
            selector: PrescriptionSelector::new(),
        }
    }

    pub fn compute_chart(
        &self,
        moment: DateTime<Utc>,
        location: GeoLocation,
    ) -> Result<ChartSnapshot> {
        compute_chart(&self.provider, moment, location)
    }

    pub fn detect_aspects(&self, chart_a: &ChartSnapshot, chart_b: &ChartSnapshot) -> Vec<Aspect> {
        self.analyzer.detect_all(chart_a.positions(), chart_b.positions())
    }

    pub fn chart_signals(&self, chart: &ChartSnapshot) -> Vec<SonicSignal> {
        chart_signals(chart)
    }

    pub fn classify_attunement(
        &self,
        natal: &ChartSnapshot,
        target: &ChartSnapshot,
    ) -> AttunementReport {
        self.classifier.classify(natal, target)
    }

    /// Classify seven consecutive days starting at `week_start`, each sampled at
    /// the same time of day, and summarise the scores.
    pub fn weekly_digest(
        &self,
        natal: &ChartSnapshot,
        week_start: DateTime<Utc>,
        location: GeoLocation,
    ) -> Result<WeeklyDigest> {
        location.validate()?;
        let days = (0..DIGEST_DAYS)
            .map(|offset| {
                let moment = shift(week_start, Duration::days(offset))?;
                let target = self.compute_chart(moment, location)?;
                let report = self.classify_attunement(natal, &target);
                Ok(DaySummary::from_report(moment.date_naive(), &report))
            })
            .collect::<Result<Vec<_>>>()?;

        WeeklyDigest::from_days(days).ok_or_else(|| HarmoniaError::InvalidMoment {
            moment: week_start.to_rfc3339(),
            message: "digest window produced no days".to_string(),
        })
    }

    pub fn compute_fidelity(
        &self,
        natal: &ChartSnapshot,
        moment: DateTime<Utc>,
    ) -> Result<FidelityReport> {
        let now = positions_at(&self.provider, moment)?;
        self.fidelity_from(natal, moment, &now)
    }

    /// Fidelity against an already computed transit chart; only the
    /// look-ahead sample is fetched.
    pub fn fidelity_for(
        &self,
        natal: &ChartSnapshot,
        transit: &ChartSnapshot,
    ) -> Result<FidelityReport> {
        self.fidelity_from(natal, transit.moment(), transit.positions())
    }

    pub fn select_prescription(
        &self,
        natal: &ChartSnapshot,
        moment: DateTime<Utc>,
    ) -> Result<Prescription> {
        let transit = positions_at(&self.provider, moment)?;
        Ok(self.selector.select(natal.positions(), &transit))
    }

    pub fn prescription_for(&self, natal: &ChartSnapshot, transit: &ChartSnapshot) -> Prescription {
        self.selector.select(natal.positions(), transit.positions())
    }

    fn fidelity_from(
        &self,
        natal: &ChartSnapshot,
        moment: DateTime<Utc>,
        now: &[Position],
    ) -> Result<FidelityReport> {
        let later = positions_at(&self.provider, shift(moment, lookahead())?)?;
        Ok(self.fidelity.evaluate(natal, now, &later))
    }
}

/// `moment + delta`, or `InvalidMoment` when the result leaves chrono's range.
fn shift(moment: DateTime<Utc>, delta: Duration) -> Result<DateTime<Utc>> {
    moment
        .checked_add_signed(delta)
        .ok_or_else(|| HarmoniaError::InvalidMoment {
            moment: moment.to_string(),
            message: format!("moment plus {}s is out of range", delta.num_seconds()),
        })
}
