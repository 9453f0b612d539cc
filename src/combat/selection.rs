//! Automatic-mode choices: who throws next and what they throw
//!
//! Weighted contests rather than fixed odds, so fatigue shifts momentum
//! continuously over a match.

use crate::combat::action::ActionType;
use crate::combat::constants::{
    HEAVY_PREFERENCE_AT_FULL, SELECTION_BASE_WEIGHT, SELECTION_ENDURANCE_DIVISOR,
};
use crate::combat::fighter::Fighter;
use crate::core::dice::RandomSource;
use crate::core::types::Corner;

/// Initiative weight: sharper and fresher fighters lead more often
pub fn initiative_weight(fighter: &Fighter) -> f64 {
    f64::from(fighter.attributes.accuracy)
        + f64::from(fighter.endurance) / SELECTION_ENDURANCE_DIVISOR
        + SELECTION_BASE_WEIGHT
}

/// Each fighter draws `roll * weight`; the higher draw attacks. Red wins ties.
pub fn select_attacker(red: &Fighter, green: &Fighter, rng: &mut impl RandomSource) -> Corner {
    let red_draw = rng.next_unit() * initiative_weight(red);
    let green_draw = rng.next_unit() * initiative_weight(green);
    if red_draw >= green_draw {
        Corner::Red
    } else {
        Corner::Green
    }
}

/// Chance of going heavy; tired fighters favour light attacks
pub fn heavy_preference(fighter: &Fighter) -> f64 {
    HEAVY_PREFERENCE_AT_FULL * fighter.endurance_ratio()
}

pub fn select_action(attacker: &Fighter, rng: &mut impl RandomSource) -> ActionType {
    if rng.chance(heavy_preference(attacker)) {
        ActionType::Heavy
    } else {
        ActionType::Light
    }
}
