//! Combat tuning values - all in one place

// Hit chance
pub const HIT_CHANCE_MIN: f64 = 0.05;
pub const HIT_CHANCE_MAX: f64 = 0.98;
/// Accuracy multiplier retained at zero endurance
pub const ACCURACY_ENDURANCE_FLOOR: f64 = 0.45;

// Damage
pub const DAMAGE_ROLL_MIN: f64 = 3.0;
pub const DAMAGE_ROLL_MAX: f64 = 7.0;
/// Damage multiplier retained at zero endurance (harsher than accuracy)
pub const DAMAGE_ENDURANCE_FLOOR: f64 = 0.5;
pub const MIN_DAMAGE: u32 = 1;

// Evasion (secondary defensive roll, only on a landed hit)
pub const EVASION_CHANCE_PER_ACCURACY: f64 = 0.05;
pub const EVASION_DAMAGE_FACTOR: f64 = 0.45;

// Attacker selection in automatic mode
pub const SELECTION_ENDURANCE_DIVISOR: f64 = 25.0;
pub const SELECTION_BASE_WEIGHT: f64 = 2.0;
/// Chance of a heavy attack at full endurance
pub const HEAVY_PREFERENCE_AT_FULL: f64 = 0.32;

// Corner rest between rounds
pub const RECOVERY_BASE: u32 = 20;
pub const RECOVERY_JITTER: u32 = 11;

// Fighters
pub const MAX_HEALTH: u32 = 100;
pub const RANDOM_POWER_RANGE: (u32, u32) = (6, 11);
pub const RANDOM_ACCURACY_RANGE: (u32, u32) = (6, 11);
pub const RANDOM_ENDURANCE_RANGE: (u32, u32) = (90, 119);
