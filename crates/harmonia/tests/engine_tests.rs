mod common;

use chrono::{DateTime, Duration, NaiveDateTime, TimeZone, Utc};
use common::{epoch, greenwich, FixedEphemeris};
use harmonia::ephemeris::{AscendantProvider, EphemerisProvider};
use harmonia::fidelity::AlignmentStatus;
use harmonia::{CelestialBody, GeoLocation, HarmoniaEngine, HarmoniaError, Position};
use std::cell::Cell;

const NATAL: [f64; 10] = [10.0, 40.0, 70.0, 100.0, 130.0, 160.0, 190.0, 220.0, 250.0, 280.0];

#[test]
fn test_compute_chart_uses_provider() {
    let mut sky = FixedEphemeris::new(NATAL);
    sky.ascendant = 95.0; // Cancer rising
    let engine = HarmoniaEngine::new(sky);

    let chart = engine.compute_chart(epoch(), greenwich()).unwrap();
    assert_eq!(chart.ascendant(), 95.0);
    assert_eq!(chart.position(CelestialBody::Venus).longitude, 100.0);
    assert_eq!(chart.house_of(CelestialBody::Venus), 1);
    assert_eq!(chart.house_of(CelestialBody::Sun), 10);
}

#[test]
fn test_invalid_coordinate_rejected_before_provider() {
    let engine = HarmoniaEngine::new(FixedEphemeris::new(NATAL).failing_on(CelestialBody::Sun));
    let result = engine.compute_chart(epoch(), GeoLocation { lat: 12.0, lon: 190.0 });
    assert_eq!(result, Err(HarmoniaError::InvalidCoordinate { lat: 12.0, lon: 190.0 }));
}

#[test]
fn test_provider_failure_propagates() {
    let engine = HarmoniaEngine::new(FixedEphemeris::new(NATAL).failing_on(CelestialBody::Neptune));
    let result = engine.compute_chart(epoch(), greenwich());
    assert!(matches!(
        result,
        Err(HarmoniaError::EphemerisUnavailable { ref body, .. }) if body == "Neptune"
    ));
}

#[test]
fn test_detect_aspects_between_charts() {
    let engine = HarmoniaEngine::new(FixedEphemeris::new(NATAL));
    let natal = engine.compute_chart(epoch(), greenwich()).unwrap();
    let aspects = engine.detect_aspects(&natal, &natal);
    // Every body is conjunct itself
    for body in CelestialBody::ALL {
        assert!(aspects.iter().any(|a| a.body_a == body && a.body_b == body && a.orb == 0.0));
    }
}

#[test]
fn test_classify_attunement_against_itself() {
    let engine = HarmoniaEngine::new(FixedEphemeris::new(NATAL));
    let natal = engine.compute_chart(epoch(), greenwich()).unwrap();
    let report = engine.classify_attunement(&natal, &natal);
    // Identical charts: everything resonates, outer bodies on exact return
    assert_eq!(report.resonance_count, 10);
    assert_eq!(report.gap_count, 0);
    assert_eq!(report.alignment_score, 100);
    assert!(!report.should_notify);
}

#[test]
fn test_weekly_digest_covers_seven_days() {
    let natal_engine = HarmoniaEngine::new(FixedEphemeris::new(NATAL));
    let natal = natal_engine.compute_chart(epoch(), greenwich()).unwrap();

    let speeds = [1.0, 13.0, 1.5, 1.2, 0.6, 0.08, 0.03, 0.01, 0.006, 0.004];
    let moving = FixedEphemeris::new(NATAL).with_speeds(speeds);
    let engine = HarmoniaEngine::new(moving);
    let week_start = epoch() + Duration::days(3);
    let digest = engine.weekly_digest(&natal, week_start, greenwich()).unwrap();

    assert_eq!(digest.days.len(), 7);
    assert_eq!(digest.days[0].day, week_start.date_naive());
    assert_eq!(digest.days[6].day, (week_start + Duration::days(6)).date_naive());
    let sum: i32 = digest.days.iter().map(|d| d.score).sum();
    assert_eq!(digest.average, sum / 7);
    assert_eq!(digest.best.score, digest.days.iter().map(|d| d.score).max().unwrap());
    assert_eq!(digest.worst.score, digest.days.iter().map(|d| d.score).min().unwrap());
    assert!(digest.common_gaps.len() <= 3);
}

#[test]
fn test_weekly_digest_propagates_errors() {
    let natal = HarmoniaEngine::new(FixedEphemeris::new(NATAL))
        .compute_chart(epoch(), greenwich())
        .unwrap();
    let engine = HarmoniaEngine::new(FixedEphemeris::new(NATAL).failing_on(CelestialBody::Moon));
    assert!(engine.weekly_digest(&natal, epoch(), greenwich()).is_err());
    assert!(matches!(
        engine.weekly_digest(&natal, epoch(), GeoLocation { lat: 100.0, lon: 0.0 }),
        Err(HarmoniaError::InvalidCoordinate { .. })
    ));
}

#[test]
fn test_compute_fidelity_uses_hour_lookahead() {
    let natal = HarmoniaEngine::new(FixedEphemeris::new(NATAL))
        .compute_chart(epoch(), greenwich())
        .unwrap();

    // Transiting Sun 2° short of a natal-Sun square and moving forward;
    // transiting Mars 1° past a natal-Mars conjunction and moving forward.
    let mut transit = [40.0, 70.0, 100.0, 130.0, 160.0, 190.0, 220.0, 250.0, 280.0, 310.0];
    transit[CelestialBody::Sun.index()] = 98.0;
    transit[CelestialBody::Mars.index()] = 131.0;
    let mut speeds = [0.0; 10];
    speeds[CelestialBody::Sun.index()] = 1.0;
    speeds[CelestialBody::Mars.index()] = 0.7;
    let engine = HarmoniaEngine::new(FixedEphemeris::new(transit).with_speeds(speeds));

    let report = engine.compute_fidelity(&natal, epoch()).unwrap();
    assert_eq!(report.records.len(), 2);

    let sun = report.records.iter().find(|r| r.body == CelestialBody::Sun).unwrap();
    assert!(sun.fidelity.is_applying);
    assert_eq!(sun.status, AlignmentStatus::Gap);

    let mars = report.records.iter().find(|r| r.body == CelestialBody::Mars).unwrap();
    assert!(!mars.fidelity.is_applying);
    assert_eq!(mars.status, AlignmentStatus::Integration);
}

#[test]
fn test_select_prescription_from_provider() {
    let natal = HarmoniaEngine::new(FixedEphemeris::new(NATAL))
        .compute_chart(epoch(), greenwich())
        .unwrap();
    let engine = HarmoniaEngine::new(FixedEphemeris::new(NATAL));
    let prescription = engine.select_prescription(&natal, epoch()).unwrap();
    assert!(!prescription.is_quiet_day);
    let primary = prescription.primary.unwrap();
    assert_eq!(prescription.carrier_frequency, primary.body_b.base_frequency());
    assert_eq!(prescription.secondary.len(), 2);
}

#[test]
fn test_chart_signals_through_engine() {
    let engine = HarmoniaEngine::new(FixedEphemeris::new(NATAL));
    let natal = engine.compute_chart(epoch(), greenwich()).unwrap();
    assert_eq!(engine.chart_signals(&natal).len(), 10);
}

/// Counts provider calls made through an inner fixed sky.
struct CountingEphemeris {
    inner: FixedEphemeris,
    calls: Cell<usize>,
}

impl EphemerisProvider for CountingEphemeris {
    fn position(&self, moment: DateTime<Utc>, body: CelestialBody) -> harmonia::Result<Position> {
        self.calls.set(self.calls.get() + 1);
        self.inner.position(moment, body)
    }
}

impl AscendantProvider for CountingEphemeris {
    fn ascendant(&self, moment: DateTime<Utc>, location: GeoLocation) -> harmonia::Result<f64> {
        self.inner.ascendant(moment, location)
    }
}

#[test]
fn test_transit_chart_reused_for_prescription_and_fidelity() {
    let natal = HarmoniaEngine::new(FixedEphemeris::new(NATAL))
        .compute_chart(epoch(), greenwich())
        .unwrap();
    let sky = CountingEphemeris {
        inner: FixedEphemeris::new(NATAL),
        calls: Cell::new(0),
    };
    let engine = HarmoniaEngine::new(&sky);

    let transit = engine.compute_chart(epoch(), greenwich()).unwrap();
    let prescription = engine.prescription_for(&natal, &transit);
    let fidelity = engine.fidelity_for(&natal, &transit).unwrap();

    // One chart plus the look-ahead sample
    assert_eq!(sky.calls.get(), 20);
    assert_eq!(prescription, engine.select_prescription(&natal, epoch()).unwrap());
    assert_eq!(fidelity, engine.compute_fidelity(&natal, epoch()).unwrap());
}

#[test]
fn test_moments_past_chrono_range_are_invalid() {
    let natal = HarmoniaEngine::new(FixedEphemeris::new(NATAL))
        .compute_chart(epoch(), greenwich())
        .unwrap();
    let engine = HarmoniaEngine::new(FixedEphemeris::new(NATAL));
    let last = Utc.from_utc_datetime(&NaiveDateTime::MAX);

    assert!(matches!(
        engine.compute_fidelity(&natal, last),
        Err(HarmoniaError::InvalidMoment { .. })
    ));
    assert!(matches!(
        engine.weekly_digest(&natal, last - Duration::days(3), greenwich()),
        Err(HarmoniaError::InvalidMoment { .. })
    ));
}
