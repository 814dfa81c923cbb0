use chrono::{DateTime, Utc};
use harmonia::ephemeris::SwissEphemerisAdapter;
use harmonia::fidelity::FidelityReport;
use harmonia::prescription::Prescription;
use harmonia::{ChartSnapshot, GeoLocation, HarmoniaEngine};
use harmonia_config::HarmoniaSettings;
use serde::Serialize;
use std::time::Duration;
use tokio::time::{sleep, Instant};

/// Everything computed on one tick.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyReading {
    pub moment: DateTime<Utc>,
    pub alignment_score: i32,
    pub should_notify: bool,
    pub prescription: Prescription,
    pub fidelity: FidelityReport,
}

/// Polls the ephemeris for the configured natal chart at a fixed interval.
pub struct HarmoniaSource {
    engine: HarmoniaEngine<SwissEphemerisAdapter>,
    natal: ChartSnapshot,
    location: GeoLocation,
    interval: Duration,
    last_poll: Option<Instant>,
}

impl HarmoniaSource {
    pub fn new(settings: &HarmoniaSettings) -> anyhow::Result<Self> {
        let adapter = SwissEphemerisAdapter::new(settings.ephemeris_path.clone())?;
        log::info!("Reading ephemeris files from {}", adapter.ephemeris_path().display());
        let engine = HarmoniaEngine::new(adapter);
        let natal = engine
            .compute_chart(settings.natal_moment, settings.natal_location)
            .map_err(|e| anyhow::anyhow!("Failed to compute natal chart: {e}"))?;
        log::info!(
            "Natal chart for {} computed, ascendant {:.2}",
            settings.natal_moment.to_rfc3339(),
            natal.ascendant()
        );
        Ok(Self {
            engine,
            natal,
            location: settings.location,
            interval: settings.poll_interval,
            last_poll: None,
        })
    }

    /// Wait out the remainder of the interval, then compute a reading for now.
    pub async fn poll(&mut self) -> harmonia::Result<DailyReading> {
        if let Some(last) = self.last_poll {
            let elapsed = last.elapsed();
            if elapsed < self.interval {
                sleep(self.interval - elapsed).await;
            }
        }
        self.last_poll = Some(Instant::now());
        self.reading_at(Utc::now())
    }

    pub fn reading_at(&self, moment: DateTime<Utc>) -> harmonia::Result<DailyReading> {
        let target = self.engine.compute_chart(moment, self.location)?;
        let attunement = self.engine.classify_attunement(&self.natal, &target);
        let prescription = self.engine.prescription_for(&self.natal, &target);
        let fidelity = self.engine.fidelity_for(&self.natal, &target)?;
        Ok(DailyReading {
            moment,
            alignment_score: attunement.alignment_score,
            should_notify: attunement.should_notify,
            prescription,
            fidelity,
        })
    }
}
