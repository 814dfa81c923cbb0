//! Per-house timbre presets.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterType {
    Lowpass,
    Highpass,
    Bandpass,
    Notch,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HouseTimbre {
    pub filter_type: FilterType,
    /// Cutoff in Hz
    pub filter_cutoff: f64,
    /// Envelope attack in seconds
    pub attack: f64,
    /// Envelope decay in seconds
    pub decay: f64,
    /// Reverb send, 0-1
    pub reverb: f64,
}

const fn preset(
    filter_type: FilterType,
    filter_cutoff: f64,
    attack: f64,
    decay: f64,
    reverb: f64,
) -> HouseTimbre {
    HouseTimbre {
        filter_type,
        filter_cutoff,
        attack,
        decay,
        reverb,
    }
}

// Angular houses (1, 4, 7, 10) are bright and immediate; cadent houses
// (3, 6, 9, 12) are filtered and wet.
const HOUSE_TIMBRES: [HouseTimbre; 12] = [
    preset(FilterType::Lowpass, 2400.0, 0.01, 0.40, 0.15),
    preset(FilterType::Lowpass, 900.0, 0.08, 1.20, 0.20),
    preset(FilterType::Bandpass, 3200.0, 0.02, 0.25, 0.10),
    preset(FilterType::Lowpass, 600.0, 0.30, 2.00, 0.45),
    preset(FilterType::Highpass, 400.0, 0.02, 0.60, 0.25),
    preset(FilterType::Bandpass, 1800.0, 0.05, 0.35, 0.10),
    preset(FilterType::Lowpass, 2000.0, 0.10, 0.90, 0.30),
    preset(FilterType::Notch, 700.0, 0.40, 2.50, 0.55),
    preset(FilterType::Highpass, 1200.0, 0.15, 1.50, 0.50),
    preset(FilterType::Lowpass, 1500.0, 0.05, 0.80, 0.20),
    preset(FilterType::Bandpass, 4000.0, 0.03, 0.50, 0.35),
    preset(FilterType::Lowpass, 450.0, 0.60, 3.50, 0.80),
];

/// Timbre for a whole-sign house; out-of-range houses are clamped into 1..=12.
pub fn house_timbre(house: u8) -> HouseTimbre {
    HOUSE_TIMBRES[house.clamp(1, 12) as usize - 1]
}
