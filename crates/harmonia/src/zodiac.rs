//! Zodiac signs and whole-sign houses.

use crate::angular::normalize;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZodiacSign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

const SIGN_ORDER: [ZodiacSign; 12] = [
    ZodiacSign::Aries,
    ZodiacSign::Taurus,
    ZodiacSign::Gemini,
    ZodiacSign::Cancer,
    ZodiacSign::Leo,
    ZodiacSign::Virgo,
    ZodiacSign::Libra,
    ZodiacSign::Scorpio,
    ZodiacSign::Sagittarius,
    ZodiacSign::Capricorn,
    ZodiacSign::Aquarius,
    ZodiacSign::Pisces,
];

impl ZodiacSign {
    pub fn from_longitude(longitude: f64) -> Self {
        SIGN_ORDER[sign_index(longitude)]
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            ZodiacSign::Aries => "Aries",
            ZodiacSign::Taurus => "Taurus",
            ZodiacSign::Gemini => "Gemini",
            ZodiacSign::Cancer => "Cancer",
            ZodiacSign::Leo => "Leo",
            ZodiacSign::Virgo => "Virgo",
            ZodiacSign::Libra => "Libra",
            ZodiacSign::Scorpio => "Scorpio",
            ZodiacSign::Sagittarius => "Sagittarius",
            ZodiacSign::Capricorn => "Capricorn",
            ZodiacSign::Aquarius => "Aquarius",
            ZodiacSign::Pisces => "Pisces",
        }
    }
}

impl fmt::Display for ZodiacSign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Sign index (0 = Aries .. 11 = Pisces) for a longitude.
pub fn sign_index(longitude: f64) -> usize {
    ((normalize(longitude) / 30.0) as usize).min(11)
}

/// Whole-sign house (1..=12) of `longitude` for a chart rising at `ascendant`.
pub fn whole_sign_house(longitude: f64, ascendant: f64) -> u8 {
    let offset = (sign_index(longitude) + 12 - sign_index(ascendant)) % 12;
    offset as u8 + 1
}

/// Degrees travelled into the current sign (and so the current whole-sign house), in [0, 30).
pub fn house_position(longitude: f64) -> f64 {
    normalize(longitude) % 30.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_from_longitude() {
        assert_eq!(ZodiacSign::from_longitude(0.0), ZodiacSign::Aries);
        assert_eq!(ZodiacSign::from_longitude(29.999), ZodiacSign::Aries);
        assert_eq!(ZodiacSign::from_longitude(30.0), ZodiacSign::Taurus);
        assert_eq!(ZodiacSign::from_longitude(359.9), ZodiacSign::Pisces);
        assert_eq!(ZodiacSign::from_longitude(-1.0), ZodiacSign::Pisces);
    }

    #[test]
    fn test_whole_sign_house() {
        // Ascendant in Leo: Leo is the 1st house, Aries the 9th
        assert_eq!(whole_sign_house(125.0, 130.0), 1);
        assert_eq!(whole_sign_house(5.0, 130.0), 9);
        assert_eq!(whole_sign_house(100.0, 130.0), 12);
        // Ascendant in Aries: houses follow signs
        for i in 0..12 {
            assert_eq!(whole_sign_house(i as f64 * 30.0 + 1.0, 0.0), i as u8 + 1);
        }
    }

    #[test]
    fn test_house_position() {
        assert_eq!(house_position(45.0), 15.0);
        assert_eq!(house_position(30.0), 0.0);
        assert!((house_position(359.5) - 29.5).abs() < 1e-9);
    }
}
