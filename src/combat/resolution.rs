//! Hit, damage and evasion formulas
//!
//! Pure functions of fighter state. Anything random takes a
//! [`RandomSource`] and draws exactly one roll.

use crate::combat::action::ActionType;
use crate::combat::constants::{
    ACCURACY_ENDURANCE_FLOOR, DAMAGE_ENDURANCE_FLOOR, DAMAGE_ROLL_MAX, DAMAGE_ROLL_MIN,
    EVASION_CHANCE_PER_ACCURACY, EVASION_DAMAGE_FACTOR, HIT_CHANCE_MAX, HIT_CHANCE_MIN,
    MIN_DAMAGE,
};
use crate::combat::fighter::Fighter;
use crate::core::dice::RandomSource;

/// Accuracy multiplier from endurance: 0.45 when spent, 1.0 when fresh
pub fn accuracy_endurance_factor(fighter: &Fighter) -> f64 {
    ACCURACY_ENDURANCE_FLOOR + (1.0 - ACCURACY_ENDURANCE_FLOOR) * fighter.endurance_ratio()
}

/// Damage multiplier from endurance: 0.5 when spent, 1.0 when fresh
pub fn damage_endurance_factor(fighter: &Fighter) -> f64 {
    DAMAGE_ENDURANCE_FLOOR + (1.0 - DAMAGE_ENDURANCE_FLOOR) * fighter.endurance_ratio()
}

/// Probability that `attacker` lands `action` on `defender`, in [0.05, 0.98]
pub fn hit_chance(attacker: &Fighter, defender: &Fighter, action: ActionType) -> f64 {
    let total = f64::from(attacker.attributes.accuracy) + f64::from(defender.attributes.accuracy);
    let base = if total > 0.0 {
        f64::from(attacker.attributes.accuracy) / total
    } else {
        0.5
    };
    let chance = base * accuracy_endurance_factor(attacker) + action.profile().accuracy_modifier;
    chance.clamp(HIT_CHANCE_MIN, HIT_CHANCE_MAX)
}

/// Damage for a given variance roll in [0, 1). Never below 1.
pub fn damage_for_roll(attacker: &Fighter, action: ActionType, roll: f64) -> u32 {
    let spread = DAMAGE_ROLL_MIN + (DAMAGE_ROLL_MAX - DAMAGE_ROLL_MIN) * roll;
    let raw = f64::from(attacker.attributes.power)
        * spread
        * damage_endurance_factor(attacker)
        * action.profile().damage_multiplier;
    (raw.round() as u32).max(MIN_DAMAGE)
}

pub fn roll_damage(attacker: &Fighter, action: ActionType, rng: &mut impl RandomSource) -> u32 {
    damage_for_roll(attacker, action, rng.next_unit())
}

/// Chance the defender rolls with a landed punch
pub fn evasion_chance(defender: &Fighter) -> f64 {
    (EVASION_CHANCE_PER_ACCURACY * f64::from(defender.attributes.accuracy)).min(1.0)
}

pub fn roll_evasion(defender: &Fighter, rng: &mut impl RandomSource) -> bool {
    rng.chance(evasion_chance(defender))
}

/// Damage left after a successful evasion
pub fn evaded_damage(damage: u32) -> u32 {
    ((f64::from(damage) * EVASION_DAMAGE_FACTOR).round() as u32).max(MIN_DAMAGE)
}

/// Endurance spent by attempting `action`, hit or miss
pub fn endurance_cost(action: ActionType) -> u32 {
    action.profile().endurance_cost
}
