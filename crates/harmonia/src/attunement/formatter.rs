//! Explanation text for attunement entries.
//!
//! The classifier hands a structured [`InsightContext`] to an
//! [`InsightFormatter`]; wording lives entirely on this side of the seam.

use crate::attunement::classifier::AttunementStatus;
use crate::body::CelestialBody;

const HOUSE_THEMES: [&str; 12] = [
    "self and presence",
    "resources and values",
    "communication and learning",
    "home and roots",
    "creativity and play",
    "work and health",
    "partnership",
    "shared depth and change",
    "meaning and exploration",
    "vocation and public life",
    "community and vision",
    "rest and the unseen",
];

/// Life area associated with a whole-sign house (1..=12).
///
/// Houses outside that range read as the nearest house.
pub fn house_theme(house: u8) -> &'static str {
    HOUSE_THEMES[house.clamp(1, 12) as usize - 1]
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InsightContext {
    pub body: CelestialBody,
    pub status: AttunementStatus,
    pub natal_house: u8,
    pub transit_house: u8,
    pub natal_theme: &'static str,
    pub transit_theme: &'static str,
    pub intensity_gap: f64,
}

pub trait InsightFormatter {
    fn explain(&self, context: &InsightContext) -> String;
}

/// Default house-theme template wording.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateFormatter;

impl InsightFormatter for TemplateFormatter {
    fn explain(&self, ctx: &InsightContext) -> String {
        match ctx.status {
            AttunementStatus::Gap => format!(
                "{} is asking for more energy in {} than your natal {} placement usually gives ({:+.2}).",
                ctx.body, ctx.transit_theme, ctx.natal_theme, ctx.intensity_gap
            ),
            AttunementStatus::Resonance if ctx.natal_house == ctx.transit_house => format!(
                "{} returns to {}, echoing its natal placement.",
                ctx.body, ctx.natal_theme
            ),
            AttunementStatus::Resonance => format!(
                "{} in {} flows easily with your natal {}.",
                ctx.body, ctx.transit_theme, ctx.natal_theme
            ),
            AttunementStatus::Neutral => format!(
                "{} moves through {} without strong pull either way.",
                ctx.body, ctx.transit_theme
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_house_theme_clamps() {
        assert_eq!(house_theme(1), "self and presence");
        assert_eq!(house_theme(12), "rest and the unseen");
        assert_eq!(house_theme(0), house_theme(1));
    }

    #[test]
    fn test_template_mentions_body_and_themes() {
        let ctx = InsightContext {
            body: CelestialBody::Mars,
            status: AttunementStatus::Gap,
            natal_house: 3,
            transit_house: 9,
            natal_theme: house_theme(3),
            transit_theme: house_theme(9),
            intensity_gap: 0.55,
        };
        let text = TemplateFormatter.explain(&ctx);
        assert!(text.contains("Mars"));
        assert!(text.contains("meaning and exploration"));
        assert!(text.contains("+0.55"));
    }
}
