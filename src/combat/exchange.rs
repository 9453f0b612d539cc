//! Combat exchange resolution
//!
//! One exchange is one attack attempt: hit roll, damage, evasion, knockout
//! check, score and endurance drain. The resolver borrows both fighters for
//! the duration of the call and performs no I/O.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::combat::action::ActionType;
use crate::combat::fighter::Fighter;
use crate::combat::resolution::{
    endurance_cost, evaded_damage, hit_chance, roll_damage, roll_evasion,
};
use crate::core::dice::RandomSource;
use crate::core::error::{BoutError, Result};
use crate::core::types::{Corner, Timestamp};

/// Result of an exchange
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExchangeOutcome {
    pub attacker: Corner,
    pub defender: Corner,
    pub attacker_name: String,
    pub defender_name: String,
    pub action: ActionType,
    /// Probability the attempt had of landing
    pub hit_chance: f64,
    pub hit: bool,
    /// Defender rolled with the punch and took reduced damage
    pub evaded: bool,
    /// Damage actually applied (None on a miss)
    pub damage: Option<u32>,
    pub knockout: bool,
}

impl fmt::Display for ExchangeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.hit, self.knockout, self.damage) {
            (true, true, _) => write!(f, "{} scores a KO!", self.attacker_name),
            (true, false, Some(damage)) if self.evaded => write!(
                f,
                "{} grazes {} with a {} for {} damage.",
                self.attacker_name, self.defender_name, self.action, damage
            ),
            (true, false, Some(damage)) => write!(
                f,
                "{} hits {} with a {} for {} damage.",
                self.attacker_name, self.defender_name, self.action, damage
            ),
            _ => write!(
                f,
                "{} misses {} with a {}.",
                self.attacker_name, self.defender_name, self.action
            ),
        }
    }
}

/// Resolve an exchange between attacker and defender
///
/// # Arguments
/// * `now` - `Some` enforces the per-action cooldown and stamps the attacker;
///   `None` skips cooldown bookkeeping (automatic play)
///
/// # Returns
/// The outcome, or a rejection that leaves both fighters untouched:
/// `FighterDown` if either is knocked out, `CooldownRejected` if the
/// attacker acted too recently.
pub fn resolve_exchange(
    attacker: &mut Fighter,
    defender: &mut Fighter,
    action: ActionType,
    now: Option<Timestamp>,
    rng: &mut impl RandomSource,
) -> Result<ExchangeOutcome> {
    for fighter in [&*attacker, &*defender] {
        if !fighter.can_fight() {
            return Err(BoutError::FighterDown {
                fighter: fighter.corner,
            });
        }
    }

    let profile = action.profile();
    if let Some(now) = now {
        let remaining_ms = attacker.cooldown_remaining(now, profile.cooldown_ms);
        if remaining_ms > 0 {
            return Err(BoutError::CooldownRejected {
                fighter: attacker.corner,
                remaining_ms,
            });
        }
    }

    let chance = hit_chance(attacker, defender, action);
    let hit = rng.chance(chance);

    let mut evaded = false;
    let mut damage = None;
    let mut knockout = false;
    if hit {
        let rolled = roll_damage(attacker, action, rng);
        evaded = roll_evasion(defender, rng);
        let dealt = if evaded { evaded_damage(rolled) } else { rolled };
        knockout = defender.take_damage(dealt);
        attacker.award(profile.score_value);
        damage = Some(dealt);
    }

    attacker.spend_endurance(endurance_cost(action));
    if now.is_some() {
        attacker.last_action_at = now;
    }

    Ok(ExchangeOutcome {
        attacker: attacker.corner,
        defender: defender.corner,
        attacker_name: attacker.name.clone(),
        defender_name: defender.name.clone(),
        action,
        hit_chance: chance,
        hit,
        evaded,
        damage,
        knockout,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::fighter::FighterAttributes;
    use crate::core::dice::ScriptedDice;

    fn pair() -> (Fighter, Fighter) {
        let attributes = FighterAttributes::new(7, 7, 100);
        (
            Fighter::new(Corner::Red, attributes),
            Fighter::new(Corner::Green, attributes),
        )
    }

    #[test]
    fn test_clean_hit() {
        let (mut red, mut green) = pair();
        // hit roll, damage roll, evasion roll
        let mut dice = ScriptedDice::new(vec![0.1, 0.5, 0.9]);

        let outcome =
            resolve_exchange(&mut red, &mut green, ActionType::Light, None, &mut dice).unwrap();

        assert!(outcome.hit);
        assert!(!outcome.evaded);
        assert_eq!(outcome.damage, Some(30));
        assert_eq!(green.health, 70);
        assert_eq!(red.score, 1);
        assert_eq!(red.endurance, 94);
        assert_eq!(red.last_action_at, None);
        assert_eq!(dice.consumed(), 3);
    }

    #[test]
    fn test_evaded_hit_takes_reduced_damage() {
        let (mut red, mut green) = pair();
        let mut dice = ScriptedDice::new(vec![0.1, 0.5, 0.1]);

        let outcome =
            resolve_exchange(&mut red, &mut green, ActionType::Light, None, &mut dice).unwrap();

        assert!(outcome.evaded);
        assert_eq!(outcome.damage, Some(14));
        assert_eq!(green.health, 86);
        // Evasion reduces damage but the hit still scores
        assert_eq!(red.score, 1);
    }

    #[test]
    fn test_miss_still_costs_endurance() {
        let (mut red, mut green) = pair();
        let mut dice = ScriptedDice::constant(0.99);

        let outcome =
            resolve_exchange(&mut red, &mut green, ActionType::Heavy, Some(0), &mut dice).unwrap();

        assert!(!outcome.hit);
        assert_eq!(outcome.damage, None);
        assert_eq!(green.health, 100);
        assert_eq!(red.score, 0);
        assert_eq!(red.endurance, 89);
        assert_eq!(red.last_action_at, Some(0));
        // Only the hit roll is drawn on a miss
        assert_eq!(dice.consumed(), 1);
    }

    #[test]
    fn test_knockout() {
        let (mut red, mut green) = pair();
        green.health = 5;
        let mut dice = ScriptedDice::new(vec![0.1, 0.5, 0.9]);

        let outcome =
            resolve_exchange(&mut red, &mut green, ActionType::Light, None, &mut dice).unwrap();

        assert!(outcome.knockout);
        assert_eq!(outcome.damage, Some(30));
        assert_eq!(green.health, 0);
        assert!(green.knocked_out);
        assert_eq!(outcome.to_string(), "Red scores a KO!");
    }

    #[test]
    fn test_cooldown_rejection_mutates_nothing() {
        let (mut red, mut green) = pair();
        red.last_action_at = Some(1_000);
        let before = (red.clone(), green.clone());
        let mut dice = ScriptedDice::constant(0.1);

        let err = resolve_exchange(
            &mut red,
            &mut green,
            ActionType::Heavy,
            Some(1_500),
            &mut dice,
        )
        .unwrap_err();

        assert!(matches!(
            err,
            BoutError::CooldownRejected {
                fighter: Corner::Red,
                remaining_ms: 400
            }
        ));
        assert_eq!((red, green), before);
        assert_eq!(dice.consumed(), 0);
    }

    #[test]
    fn test_knocked_out_fighter_cannot_exchange() {
        let (mut red, mut green) = pair();
        green.take_damage(100);
        let mut dice = ScriptedDice::constant(0.1);

        let err = resolve_exchange(&mut red, &mut green, ActionType::Light, None, &mut dice)
            .unwrap_err();

        assert!(matches!(
            err,
            BoutError::FighterDown {
                fighter: Corner::Green
            }
        ));
        assert_eq!(red.endurance, 100);
    }

    #[test]
    fn test_outcome_text() {
        let (mut red, mut green) = pair();
        let outcome = resolve_exchange(
            &mut red,
            &mut green,
            ActionType::Light,
            None,
            &mut ScriptedDice::constant(0.99),
        )
        .unwrap();
        assert_eq!(outcome.to_string(), "Red misses Green with a light.");
    }
}
