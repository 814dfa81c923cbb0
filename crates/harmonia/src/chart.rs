//! Chart snapshots: the ten positions plus ascendant for one moment and place.

use crate::body::CelestialBody;
use crate::ephemeris::provider::{positions_at, AscendantProvider, EphemerisProvider};
use crate::ephemeris::types::{GeoLocation, Position};
use crate::error::{HarmoniaError, Result};
use crate::zodiac;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "ChartSnapshotData")]
pub struct ChartSnapshot {
    moment: DateTime<Utc>,
    location: GeoLocation,
    ascendant: f64,
    /// One entry per body, ordered as `CelestialBody::ALL`
    positions: Vec<Position>,
}

/// Wire form of a [`ChartSnapshot`]; deserialized charts go through
/// [`ChartSnapshot::new`] so they carry the same guarantees as computed ones.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChartSnapshotData {
    moment: DateTime<Utc>,
    location: GeoLocation,
    ascendant: f64,
    positions: Vec<Position>,
}

impl TryFrom<ChartSnapshotData> for ChartSnapshot {
    type Error = HarmoniaError;

    fn try_from(data: ChartSnapshotData) -> Result<Self> {
        ChartSnapshot::new(data.moment, data.location, data.ascendant, data.positions)
    }
}

impl ChartSnapshot {
    /// Assemble a snapshot from provider output.
    ///
    /// `positions` may arrive in any order but must cover each body exactly once.
    pub fn new(
        moment: DateTime<Utc>,
        location: GeoLocation,
        ascendant: f64,
        positions: Vec<Position>,
    ) -> Result<Self> {
        location.validate()?;
        if !(ascendant.is_finite() && (0.0..360.0).contains(&ascendant)) {
            return Err(HarmoniaError::EphemerisUnavailable {
                body: "Ascendant".to_string(),
                message: format!("ascendant {} outside [0, 360)", ascendant),
            });
        }

        let mut slots: [Option<Position>; 10] = [None; 10];
        for position in positions {
            position.validate_for(position.body)?;
            let slot = &mut slots[position.body.index()];
            if slot.is_some() {
                return Err(HarmoniaError::EphemerisUnavailable {
                    body: position.body.to_string(),
                    message: "duplicate position".to_string(),
                });
            }
            *slot = Some(position);
        }

        let ordered = CelestialBody::ALL
            .iter()
            .map(|&body| {
                slots[body.index()].ok_or_else(|| HarmoniaError::EphemerisUnavailable {
                    body: body.to_string(),
                    message: "missing position".to_string(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            moment,
            location,
            ascendant,
            positions: ordered,
        })
    }

    pub fn moment(&self) -> DateTime<Utc> {
        self.moment
    }

    pub fn location(&self) -> GeoLocation {
        self.location
    }

    pub fn ascendant(&self) -> f64 {
        self.ascendant
    }

    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    pub fn position(&self, body: CelestialBody) -> &Position {
        &self.positions[body.index()]
    }

    /// Whole-sign house (1..=12) of `body`.
    pub fn house_of(&self, body: CelestialBody) -> u8 {
        zodiac::whole_sign_house(self.position(body).longitude, self.ascendant)
    }

    /// Degrees into the house occupied by `body`, in [0, 30).
    pub fn house_position_of(&self, body: CelestialBody) -> f64 {
        zodiac::house_position(self.position(body).longitude)
    }
}

/// Compute a chart for `moment` at `location`.
///
/// Coordinates are validated before the provider is consulted.
pub fn compute_chart<P>(
    provider: &P,
    moment: DateTime<Utc>,
    location: GeoLocation,
) -> Result<ChartSnapshot>
where
    P: EphemerisProvider + AscendantProvider + ?Sized,
{
    location.validate()?;
    let ascendant = provider.ascendant(moment, location)?;
    let positions = positions_at(provider, moment)?;
    let chart = ChartSnapshot::new(moment, location, ascendant, positions)?;
    log::debug!(
        "Computed chart for {} at ({:.4}, {:.4}), ascendant {:.2}",
        moment,
        location.lat,
        location.lon,
        ascendant
    );
    Ok(chart)
}
