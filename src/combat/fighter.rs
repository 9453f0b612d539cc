//! Fighter model: fixed attributes plus mutable bout state

use serde::{Deserialize, Serialize};

use crate::combat::constants::{
    MAX_HEALTH, RANDOM_ACCURACY_RANGE, RANDOM_ENDURANCE_RANGE, RANDOM_POWER_RANGE,
};
use crate::core::dice::RandomSource;
use crate::core::types::{Corner, Timestamp};

/// Base attributes, fixed for a fighter's lifetime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FighterAttributes {
    /// Damage output
    pub power: u32,
    /// Hit chance, and evasion when defending
    pub accuracy: u32,
    /// Maximum endurance
    pub endurance: u32,
}

impl FighterAttributes {
    pub fn new(power: u32, accuracy: u32, endurance: u32) -> Self {
        Self {
            power,
            accuracy,
            endurance,
        }
    }

    /// Stock attributes for each corner
    pub fn stock(corner: Corner) -> Self {
        match corner {
            Corner::Red => Self::new(8, 7, 100),
            Corner::Green => Self::new(7, 8, 100),
        }
    }

    /// Roll attributes inside the randomization ranges
    pub fn roll(rng: &mut impl RandomSource) -> Self {
        Self {
            power: rng.int_inclusive(RANDOM_POWER_RANGE.0, RANDOM_POWER_RANGE.1),
            accuracy: rng.int_inclusive(RANDOM_ACCURACY_RANGE.0, RANDOM_ACCURACY_RANGE.1),
            endurance: rng.int_inclusive(RANDOM_ENDURANCE_RANGE.0, RANDOM_ENDURANCE_RANGE.1),
        }
    }
}

/// One combatant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fighter {
    pub name: String,
    pub corner: Corner,
    pub attributes: FighterAttributes,
    pub max_health: u32,
    /// Current health (0 to max_health)
    pub health: u32,
    /// Current endurance (0 to attributes.endurance)
    pub endurance: u32,
    pub score: u32,
    /// Set once health reaches zero; only a reset clears it
    pub knocked_out: bool,
    /// When this fighter last acted under cooldown rules
    pub last_action_at: Option<Timestamp>,
}

impl Fighter {
    pub fn new(corner: Corner, attributes: FighterAttributes) -> Self {
        Self {
            name: corner.as_str().to_string(),
            corner,
            attributes,
            max_health: MAX_HEALTH,
            health: MAX_HEALTH,
            endurance: attributes.endurance,
            score: 0,
            knocked_out: false,
            last_action_at: None,
        }
    }

    pub fn stock(corner: Corner) -> Self {
        Self::new(corner, FighterAttributes::stock(corner))
    }

    pub fn random(corner: Corner, rng: &mut impl RandomSource) -> Self {
        Self::new(corner, FighterAttributes::roll(rng))
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn endurance_max(&self) -> u32 {
        self.attributes.endurance
    }

    /// Current endurance as a fraction of maximum (0.0 to 1.0)
    pub fn endurance_ratio(&self) -> f64 {
        if self.attributes.endurance == 0 {
            return 0.0;
        }
        f64::from(self.endurance) / f64::from(self.attributes.endurance)
    }

    pub fn can_fight(&self) -> bool {
        !self.knocked_out
    }

    /// Subtract health (floored at zero). Returns true on a fresh knockout.
    pub fn take_damage(&mut self, amount: u32) -> bool {
        self.health = self.health.saturating_sub(amount);
        if self.health == 0 && !self.knocked_out {
            self.knocked_out = true;
            return true;
        }
        false
    }

    /// Drain endurance (floored at zero)
    pub fn spend_endurance(&mut self, cost: u32) {
        self.endurance = self.endurance.saturating_sub(cost);
    }

    /// Add endurance up to the maximum. Returns the amount actually gained.
    pub fn recover_endurance(&mut self, amount: u32) -> u32 {
        let before = self.endurance;
        self.endurance = self
            .endurance
            .saturating_add(amount)
            .min(self.attributes.endurance);
        self.endurance - before
    }

    pub fn award(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }

    /// Milliseconds left before this fighter may act again
    pub fn cooldown_remaining(&self, now: Timestamp, cooldown_ms: u64) -> u64 {
        match self.last_action_at {
            Some(last) => cooldown_ms.saturating_sub(now.saturating_sub(last)),
            None => 0,
        }
    }

    /// Back to fresh bout state, keeping attributes
    pub fn refresh(&mut self) {
        self.health = self.max_health;
        self.endurance = self.attributes.endurance;
        self.score = 0;
        self.knocked_out = false;
        self.last_action_at = None;
    }

    pub fn tally(&self) -> FighterTally {
        FighterTally {
            name: self.name.clone(),
            corner: self.corner,
            health: self.health,
            endurance: self.endurance,
            score: self.score,
            knocked_out: self.knocked_out,
        }
    }
}

/// Final or intermediate standing of a fighter, for reporting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FighterTally {
    pub name: String,
    pub corner: Corner,
    pub health: u32,
    pub endurance: u32,
    pub score: u32,
    pub knocked_out: bool,
}
