#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use harmonia::angular::normalize;
use harmonia::ephemeris::{AscendantProvider, EphemerisProvider};
use harmonia::{CelestialBody, ChartSnapshot, GeoLocation, HarmoniaError, Position};
use std::f64::consts::PI;

/// Sky that moves linearly from fixed epoch longitudes.
pub struct FixedEphemeris {
    pub epoch: DateTime<Utc>,
    pub longitudes: [f64; 10],
    /// Degrees per day
    pub speeds: [f64; 10],
    pub ascendant: f64,
    pub failing_body: Option<CelestialBody>,
}

impl FixedEphemeris {
    pub fn new(longitudes: [f64; 10]) -> Self {
        Self {
            epoch: epoch(),
            longitudes,
            speeds: [0.0; 10],
            ascendant: 0.0,
            failing_body: None,
        }
    }

    pub fn with_speeds(mut self, speeds: [f64; 10]) -> Self {
        self.speeds = speeds;
        self
    }

    pub fn failing_on(mut self, body: CelestialBody) -> Self {
        self.failing_body = Some(body);
        self
    }
}

impl EphemerisProvider for FixedEphemeris {
    fn position(&self, moment: DateTime<Utc>, body: CelestialBody) -> harmonia::Result<Position> {
        if self.failing_body == Some(body) {
            return Err(HarmoniaError::EphemerisUnavailable {
                body: body.to_string(),
                message: "simulated outage".to_string(),
            });
        }
        let days = (moment - self.epoch).num_seconds() as f64 / 86_400.0;
        let i = body.index();
        Ok(Position {
            body,
            longitude: normalize(self.longitudes[i] + self.speeds[i] * days),
            latitude: 0.0,
            distance_au: 1.0,
            daily_speed: self.speeds[i],
        })
    }
}

impl AscendantProvider for FixedEphemeris {
    fn ascendant(&self, _moment: DateTime<Utc>, _location: GeoLocation) -> harmonia::Result<f64> {
        Ok(self.ascendant)
    }
}

pub fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap()
}

pub fn greenwich() -> GeoLocation {
    GeoLocation { lat: 51.48, lon: 0.0 }
}

pub fn position(body: CelestialBody, longitude: f64) -> Position {
    Position {
        body,
        longitude,
        latitude: 0.0,
        distance_au: 1.0,
        daily_speed: 1.0,
    }
}

pub fn positions(longitudes: [f64; 10]) -> Vec<Position> {
    CelestialBody::ALL
        .iter()
        .map(|&b| position(b, longitudes[b.index()]))
        .collect()
}

/// Chart rising at 0° Aries, so whole-sign house = sign index + 1.
pub fn chart(longitudes: [f64; 10]) -> ChartSnapshot {
    ChartSnapshot::new(epoch(), greenwich(), 0.0, positions(longitudes)).unwrap()
}

/// Longitude in `house` (Aries rising) whose sonic intensity is `intensity`,
/// placed on the rising half of the house curve.
pub fn longitude_for(house: u8, intensity: f64) -> f64 {
    let house_position = intensity.asin() / PI * 30.0;
    (house as f64 - 1.0) * 30.0 + house_position
}
