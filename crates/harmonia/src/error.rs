use thiserror::Error;

/// Errors raised by chart construction and the ephemeris boundary.
///
/// The core never retries and never substitutes defaults: each variant is
/// returned at the point of detection.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HarmoniaError {
    #[error("Invalid moment {moment}: {message}")]
    InvalidMoment { moment: String, message: String },
    #[error("Invalid coordinate (lat {lat}, lon {lon}): outside [-90, 90] x [-180, 180]")]
    InvalidCoordinate { lat: f64, lon: f64 },
    #[error("Unknown celestial body: {0}")]
    UnknownCelestialBody(String),
    #[error("Ephemeris unavailable for {body}: {message}")]
    EphemerisUnavailable { body: String, message: String },
}

pub type Result<T> = std::result::Result<T, HarmoniaError>;
