use crate::body::CelestialBody;
use crate::error::{HarmoniaError, Result};
use crate::zodiac::ZodiacSign;
use serde::{Deserialize, Serialize};

/// Geographic location coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    pub lat: f64,
    pub lon: f64,
}

impl GeoLocation {
    /// Build a location, rejecting latitudes outside [-90, 90] and longitudes outside [-180, 180].
    pub fn new(lat: f64, lon: f64) -> Result<Self> {
        let location = Self { lat, lon };
        location.validate()?;
        Ok(location)
    }

    pub fn validate(&self) -> Result<()> {
        if (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lon) {
            Ok(())
        } else {
            Err(HarmoniaError::InvalidCoordinate {
                lat: self.lat,
                lon: self.lon,
            })
        }
    }
}

/// Position of one body as reported by an ephemeris provider.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub body: CelestialBody,
    /// Ecliptic longitude in degrees (0-360)
    pub longitude: f64,
    /// Ecliptic latitude in degrees
    pub latitude: f64,
    pub distance_au: f64,
    /// Speed in longitude (degrees per day)
    pub daily_speed: f64,
}

impl Position {
    pub fn retrograde(&self) -> bool {
        self.daily_speed < 0.0
    }

    pub fn sign(&self) -> ZodiacSign {
        ZodiacSign::from_longitude(self.longitude)
    }

    /// Check that a provider answered for the body it was asked about with usable numbers.
    pub fn validate_for(&self, body: CelestialBody) -> Result<()> {
        let problem = if self.body != body {
            Some(format!("provider returned {} instead", self.body))
        } else if !(self.longitude.is_finite() && (0.0..360.0).contains(&self.longitude)) {
            Some(format!("longitude {} outside [0, 360)", self.longitude))
        } else if !(self.latitude.is_finite()
            && self.distance_au.is_finite()
            && self.daily_speed.is_finite())
        {
            Some("non-finite coordinates".to_string())
        } else {
            None
        };

        match problem {
            None => Ok(()),
            Some(message) => {
                log::warn!("Malformed ephemeris data for {}: {}", body, message);
                Err(HarmoniaError::EphemerisUnavailable {
                    body: body.to_string(),
                    message,
                })
            }
        }
    }
}
