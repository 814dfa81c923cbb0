use crate::angular::normalize;
use crate::body::CelestialBody;
use crate::ephemeris::provider::{AscendantProvider, EphemerisProvider};
use crate::ephemeris::types::{GeoLocation, Position};
use crate::error::{HarmoniaError, Result};
use chrono::{DateTime, Datelike, Timelike, Utc};
use std::env;
use std::path::{Path, PathBuf};
use swisseph::swe::{calc_ut, houses_ex, julday};

// FLG_SWIEPH | FLG_SPEED
const CALC_FLAGS: i32 = 2 | 256;

/// Whole-sign house system code
const WHOLE_SIGN: u8 = b'W';

/// Years covered by the bundled Swiss Ephemeris files
const SUPPORTED_YEARS: std::ops::RangeInclusive<i32> = -3000..=3000;

const DEFAULT_EPHEMERIS_PATH: &str = "/usr/local/share/swisseph";

/// Swiss Ephemeris adapter implementing both provider contracts.
pub struct SwissEphemerisAdapter {
    ephemeris_path: PathBuf,
}

impl SwissEphemerisAdapter {
    /// Create a new adapter with optional ephemeris path.
    ///
    /// Falls back to `SWISS_EPHEMERIS_PATH`, then `/usr/local/share/swisseph`.
    pub fn new(ephemeris_path: Option<PathBuf>) -> Result<Self> {
        let path = ephemeris_path.unwrap_or_else(|| {
            env::var("SWISS_EPHEMERIS_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_EPHEMERIS_PATH))
        });

        if !path.exists() {
            return Err(HarmoniaError::EphemerisUnavailable {
                body: "*".to_string(),
                message: format!(
                    "ephemeris path {} does not exist; install the Swiss Ephemeris data files",
                    path.display()
                ),
            });
        }

        log::info!("Swiss Ephemeris adapter using {}", path.display());
        Ok(Self {
            ephemeris_path: path,
        })
    }

    pub fn ephemeris_path(&self) -> &Path {
        &self.ephemeris_path
    }
}

impl EphemerisProvider for SwissEphemerisAdapter {
    fn position(&self, moment: DateTime<Utc>, body: CelestialBody) -> Result<Position> {
        let jd = datetime_to_julian_day(moment)?;

        let result = calc_ut(jd, body.swe_id() as u32, CALC_FLAGS as u32).map_err(|e| {
            HarmoniaError::EphemerisUnavailable {
                body: body.to_string(),
                message: format!("Swiss Ephemeris error at {}: {}", moment, e),
            }
        })?;

        let out = result.out;
        if out.iter().take(4).any(|v| !v.is_finite()) {
            log::warn!("Swiss Ephemeris returned non-finite output for {} at {}", body, moment);
            return Err(HarmoniaError::EphemerisUnavailable {
                body: body.to_string(),
                message: "non-finite output".to_string(),
            });
        }

        Ok(Position {
            body,
            longitude: normalize(out[0]),
            latitude: out[1],
            distance_au: out[2],
            daily_speed: out[3],
        })
    }
}

impl AscendantProvider for SwissEphemerisAdapter {
    fn ascendant(&self, moment: DateTime<Utc>, location: GeoLocation) -> Result<f64> {
        location.validate()?;
        let jd = datetime_to_julian_day(moment)?;

        use swisseph::AscMc;
        let (_cusps, angles) =
            houses_ex(jd, CALC_FLAGS, location.lat, location.lon, WHOLE_SIGN as i32);
        let ascendant = AscMc::from_array(angles).ascendant;

        if !ascendant.is_finite() {
            return Err(HarmoniaError::EphemerisUnavailable {
                body: "Ascendant".to_string(),
                message: format!("non-finite ascendant at {}", moment),
            });
        }
        Ok(normalize(ascendant))
    }
}

/// Convert UTC datetime to Julian Day
fn datetime_to_julian_day(dt: DateTime<Utc>) -> Result<f64> {
    let year = dt.year();
    if !SUPPORTED_YEARS.contains(&year) {
        return Err(HarmoniaError::InvalidMoment {
            moment: dt.to_rfc3339(),
            message: format!(
                "year {} outside supported range {}..={}",
                year,
                SUPPORTED_YEARS.start(),
                SUPPORTED_YEARS.end()
            ),
        });
    }
    let hour_decimal = dt.hour() as f64
        + dt.minute() as f64 / 60.0
        + (dt.second() as f64 + dt.nanosecond() as f64 / 1e9) / 3600.0;

    // GREG_CAL = 1
    Ok(julday(year, dt.month() as i32, dt.day() as i32, hour_decimal, 1))
}
