//! Match outcome: knockout, decision or draw

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::combat::fighter::Fighter;
use crate::core::config::DecisionRule;
use crate::core::types::Corner;

/// What a decision was settled on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionBasis {
    Score,
    Health,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Verdict {
    Knockout { winner: Corner },
    Decision { winner: Corner, basis: DecisionBasis },
    Draw,
}

impl Verdict {
    pub fn winner(&self) -> Option<Corner> {
        match self {
            Verdict::Knockout { winner } | Verdict::Decision { winner, .. } => Some(*winner),
            Verdict::Draw => None,
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Knockout { winner } => write!(f, "{winner} wins by knockout"),
            Verdict::Decision {
                winner,
                basis: DecisionBasis::Score,
            } => write!(f, "{winner} wins on points"),
            Verdict::Decision {
                winner,
                basis: DecisionBasis::Health,
            } => write!(f, "{winner} wins on remaining health"),
            Verdict::Draw => f.write_str("It's a draw"),
        }
    }
}

fn compare(red: u32, green: u32, basis: DecisionBasis) -> Option<Verdict> {
    let winner = match red.cmp(&green) {
        Ordering::Greater => Corner::Red,
        Ordering::Less => Corner::Green,
        Ordering::Equal => return None,
    };
    Some(Verdict::Decision { winner, basis })
}

/// Score a match that went the distance
pub fn decide(red: &Fighter, green: &Fighter, rule: DecisionRule) -> Verdict {
    let by_health = || compare(red.health, green.health, DecisionBasis::Health);
    let verdict = match rule {
        DecisionRule::ScoreThenHealth => {
            compare(red.score, green.score, DecisionBasis::Score).or_else(by_health)
        }
        DecisionRule::HealthOnly => by_health(),
    };
    verdict.unwrap_or(Verdict::Draw)
}

/// The fighter left standing, if anyone is down
pub fn knockout_winner(red: &Fighter, green: &Fighter) -> Option<Corner> {
    match (red.knocked_out, green.knocked_out) {
        (false, true) => Some(Corner::Red),
        (true, false) => Some(Corner::Green),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(red: (u32, u32), green: (u32, u32)) -> (Fighter, Fighter) {
        let mut r = Fighter::stock(Corner::Red);
        let mut g = Fighter::stock(Corner::Green);
        (r.score, r.health) = red;
        (g.score, g.health) = green;
        (r, g)
    }

    #[test]
    fn test_score_decides_first() {
        let (red, green) = pair((12, 20), (9, 80));
        assert_eq!(
            decide(&red, &green, DecisionRule::ScoreThenHealth),
            Verdict::Decision {
                winner: Corner::Red,
                basis: DecisionBasis::Score
            }
        );
    }

    #[test]
    fn test_health_breaks_score_tie() {
        let (red, green) = pair((10, 40), (10, 55));
        assert_eq!(
            decide(&red, &green, DecisionRule::ScoreThenHealth),
            Verdict::Decision {
                winner: Corner::Green,
                basis: DecisionBasis::Health
            }
        );
    }

    #[test]
    fn test_full_tie_is_draw() {
        let (red, green) = pair((10, 40), (10, 40));
        assert_eq!(decide(&red, &green, DecisionRule::ScoreThenHealth), Verdict::Draw);
        assert_eq!(decide(&red, &green, DecisionRule::HealthOnly), Verdict::Draw);
    }

    #[test]
    fn test_health_only_ignores_score() {
        let (red, green) = pair((30, 40), (2, 41));
        let verdict = decide(&red, &green, DecisionRule::HealthOnly);
        assert_eq!(verdict.winner(), Some(Corner::Green));
        assert_eq!(verdict.to_string(), "Green wins on remaining health");
    }

    #[test]
    fn test_knockout_winner() {
        let (red, mut green) = pair((0, 100), (0, 100));
        assert_eq!(knockout_winner(&red, &green), None);
        green.take_damage(100);
        assert_eq!(knockout_winner(&red, &green), Some(Corner::Red));
    }
}
