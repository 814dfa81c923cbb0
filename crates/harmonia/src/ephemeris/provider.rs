//! Contracts the core needs from an astronomical backend.

use crate::body::CelestialBody;
use crate::ephemeris::types::{GeoLocation, Position};
use crate::error::{HarmoniaError, Result};
use chrono::{DateTime, Utc};

/// Supplies geocentric body positions for a moment.
///
/// Implementations must return longitudes normalised to [0, 360) and report
/// failures as [`HarmoniaError::EphemerisUnavailable`]; callers do not retry.
pub trait EphemerisProvider {
    fn position(&self, moment: DateTime<Utc>, body: CelestialBody) -> Result<Position>;
}

/// Supplies the rising ecliptic longitude for a moment and place.
pub trait AscendantProvider {
    fn ascendant(&self, moment: DateTime<Utc>, location: GeoLocation) -> Result<f64>;
}

impl<P: EphemerisProvider + ?Sized> EphemerisProvider for &P {
    fn position(&self, moment: DateTime<Utc>, body: CelestialBody) -> Result<Position> {
        (**self).position(moment, body)
    }
}

impl<P: AscendantProvider + ?Sized> AscendantProvider for &P {
    fn ascendant(&self, moment: DateTime<Utc>, location: GeoLocation) -> Result<f64> {
        (**self).ascendant(moment, location)
    }
}

/// Fetch and validate all ten positions for `moment`, ordered as [`CelestialBody::ALL`].
pub fn positions_at<P: EphemerisProvider + ?Sized>(
    provider: &P,
    moment: DateTime<Utc>,
) -> Result<Vec<Position>> {
    CelestialBody::ALL
        .iter()
        .map(|&body| {
            let position = provider.position(moment, body)?;
            position.validate_for(body)?;
            Ok(position)
        })
        .collect()
}

/// Parse an RFC 3339 timestamp into UTC.
pub fn parse_moment(text: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(text.trim())
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| HarmoniaError::InvalidMoment {
            moment: text.to_string(),
            message: e.to_string(),
        })
}
