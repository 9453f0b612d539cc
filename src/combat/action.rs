//! Attack types and their static profiles

use std::fmt;

use serde::{Deserialize, Serialize};

/// The kinds of attack a fighter can throw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    Light,
    Heavy,
}

/// Fixed numbers attached to an action type
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActionProfile {
    /// Added to the hit chance before clamping
    pub accuracy_modifier: f64,
    pub damage_multiplier: f64,
    /// Endurance spent on every attempt, hit or miss
    pub endurance_cost: u32,
    /// Points awarded for a landed hit
    pub score_value: u32,
    /// Minimum gap before the same fighter may act again (manual play)
    pub cooldown_ms: u64,
}

const LIGHT: ActionProfile = ActionProfile {
    accuracy_modifier: 0.04,
    damage_multiplier: 0.85,
    endurance_cost: 6,
    score_value: 1,
    cooldown_ms: 450,
};

const HEAVY: ActionProfile = ActionProfile {
    accuracy_modifier: -0.10,
    damage_multiplier: 1.55,
    endurance_cost: 11,
    score_value: 3,
    cooldown_ms: 900,
};

impl ActionType {
    pub const ALL: [ActionType; 2] = [ActionType::Light, ActionType::Heavy];

    pub fn profile(self) -> &'static ActionProfile {
        match self {
            ActionType::Light => &LIGHT,
            ActionType::Heavy => &HEAVY,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ActionType::Light => "light",
            ActionType::Heavy => "heavy",
        }
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
