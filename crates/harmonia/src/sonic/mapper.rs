//! Sonic signal derivation.
//!
//! A chart placement becomes a fixed tuple of synthesis parameters. The mapping
//! is a pure function of the position and its house: no randomness, no state.

use crate::body::{CelestialBody, SynthRole};
use crate::chart::ChartSnapshot;
use crate::ephemeris::types::Position;
use crate::sonic::timbre::{house_timbre, FilterType};
use crate::zodiac::ZodiacSign;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::f64::consts::PI;

/// Peak micro-detune applied around a body's base frequency, in Hz
pub const DETUNE_HZ: f64 = 1.5;

/// Stereo spread between consecutive houses
const PAN_STEP: f64 = 0.33;

/// Half-width of the per-body stereo offset
const PAN_OFFSET_RANGE: f64 = 0.1;

lazy_static::lazy_static! {
    static ref PAN_OFFSETS: HashMap<CelestialBody, f64> = CelestialBody::ALL
        .iter()
        .map(|&body| (body, hashed_offset(body.name())))
        .collect();
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SonicSignal {
    pub body: CelestialBody,
    pub frequency_hz: f64,
    /// 0 at a house cusp, 1 at the house midpoint
    pub intensity: f64,
    /// -1 (left) .. 1 (right)
    pub pan: f64,
    pub role: SynthRole,
    pub filter_type: FilterType,
    pub filter_cutoff: f64,
    pub attack: f64,
    pub decay: f64,
    pub reverb: f64,
    pub house: u8,
    pub house_position: f64,
    pub sign: ZodiacSign,
}

/// Derive the signal for one placement.
///
/// `house` is expected in 1..=12, as produced by
/// [`whole_sign_house`](crate::zodiac::whole_sign_house). Callers passing
/// anything else get the nearest house (0 reads as 1, 13+ as 12) and the
/// returned `house` field shows the house actually used.
pub fn compute_signal(position: &Position, house: u8, house_position: f64) -> SonicSignal {
    let body = position.body;
    let house = house.clamp(1, 12);
    let timbre = house_timbre(house);

    let detune = (position.longitude / 360.0 * 2.0 * PI).sin() * DETUNE_HZ;
    let intensity = (house_position / 30.0 * PI).sin().clamp(0.0, 1.0);

    SonicSignal {
        body,
        frequency_hz: body.base_frequency() + detune,
        intensity,
        pan: house_pan(house, body),
        role: body.role(),
        filter_type: timbre.filter_type,
        filter_cutoff: timbre.filter_cutoff,
        attack: timbre.attack,
        decay: timbre.decay,
        reverb: timbre.reverb,
        house,
        house_position,
        sign: position.sign(),
    }
}

/// Signals for every body of a chart, ordered as [`CelestialBody::ALL`].
pub fn chart_signals(chart: &ChartSnapshot) -> Vec<SonicSignal> {
    chart
        .positions()
        .iter()
        .map(|p| compute_signal(p, chart.house_of(p.body), chart.house_position_of(p.body)))
        .collect()
}

/// Stable stereo offset for a body, in [-0.1, 0.1].
pub fn pan_offset(body: CelestialBody) -> f64 {
    PAN_OFFSETS.get(&body).copied().unwrap_or(0.0)
}

fn house_pan(house: u8, body: CelestialBody) -> f64 {
    let h = house as f64;
    // Houses 1-6 sweep the left field, 7-12 the right
    let base = if house <= 6 {
        -1.0 + (h - 1.0) * PAN_STEP
    } else {
        (h - 7.0) * PAN_STEP
    };
    (base + pan_offset(body)).clamp(-1.0, 1.0)
}

fn hashed_offset(name: &str) -> f64 {
    let mut hasher = Sha256::new();
    hasher.update(name.to_lowercase().as_bytes());
    let digest = hasher.finalize();
    let raw = u16::from_be_bytes([digest[0], digest[1]]) as f64 / u16::MAX as f64;
    raw * 2.0 * PAN_OFFSET_RANGE - PAN_OFFSET_RANGE
}
