//! Fixed color table, one pair per organ type and symptom state.
//!
//! For Lungs the pair is (primary, damage); for Veins (healthy, acidic);
//! for Skin (glow, white). The mapper decides how the pair is blended.

use aiye_types::{OrganType, Rgb, SymptomState};

/// Glow used for skin that is not inflamed but scores below
/// [`SKIN_POLLUTION_SCORE`].
pub const SKIN_POLLUTED: u32 = 0x996633;

/// Skin below this score reads as polluted.
pub const SKIN_POLLUTION_SCORE: f64 = 50.0;

/// Color of the default (unmapped) material.
pub const DEFAULT_COLOR: u32 = 0x2E8CE0;

/// A primary and secondary color for one organ/state combination.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorPair {
    pub primary: Rgb,
    pub secondary: Rgb,
}

const TABLE: [(OrganType, SymptomState, u32, u32); 9] = [
    (OrganType::Lungs, SymptomState::Healthy, 0x00FF88, 0x88FFCC),
    (OrganType::Lungs, SymptomState::Healing, 0xFFAA00, 0xFFDD88),
    (OrganType::Lungs, SymptomState::Inflamed, 0xFF3300, 0xFF6600),
    (OrganType::Veins, SymptomState::Healthy, 0x0066FF, 0xFF3300),
    (OrganType::Veins, SymptomState::Healing, 0x0066FF, 0xFF3300),
    (OrganType::Veins, SymptomState::Inflamed, 0x0066FF, 0xFF3300),
    (OrganType::Skin, SymptomState::Healthy, 0x2E8CE0, 0xFFFFFF),
    (OrganType::Skin, SymptomState::Healing, 0x2E8CE0, 0xFFFFFF),
    (OrganType::Skin, SymptomState::Inflamed, 0xFF3300, 0xFFFFFF),
];

/// Look up the color pair for an organ type in a given state.
pub fn color_pair(organ_type: OrganType, state: SymptomState) -> ColorPair {
    let (primary, secondary) = TABLE
        .iter()
        .find(|(t, s, _, _)| *t == organ_type && *s == state)
        .map(|(_, _, p, s)| (*p, *s))
        // every combination is in the table
        .unwrap_or((DEFAULT_COLOR, DEFAULT_COLOR));

    ColorPair {
        primary: Rgb::from_hex(primary),
        secondary: Rgb::from_hex(secondary),
    }
}
