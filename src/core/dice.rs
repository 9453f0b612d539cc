//! Injectable randomness
//!
//! Every roll in the engine goes through [`RandomSource`], so a match can be
//! driven by a seeded generator in play or by a fixed script in tests.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Source of uniform rolls in `[0, 1)`
pub trait RandomSource {
    fn next_unit(&mut self) -> f64;

    /// Uniform float in `[lo, hi)`
    fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_unit()
    }

    /// Uniform integer in `[lo, hi]`
    fn int_inclusive(&mut self, lo: u32, hi: u32) -> u32 {
        if hi <= lo {
            return lo;
        }
        let span = (hi - lo + 1) as f64;
        let offset = (self.next_unit() * span).floor() as u32;
        lo + offset.min(hi - lo)
    }

    /// True with probability `p`
    fn chance(&mut self, p: f64) -> bool {
        self.next_unit() < p
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_unit(&mut self) -> f64 {
        (**self).next_unit()
    }
}

/// Seeded ChaCha generator; the same seed replays the same match
#[derive(Debug, Clone)]
pub struct SeededDice {
    rng: ChaCha8Rng,
}

impl SeededDice {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
        }
    }
}

impl RandomSource for SeededDice {
    fn next_unit(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

/// Replays a fixed list of rolls, repeating the last one when exhausted
#[derive(Debug, Clone)]
pub struct ScriptedDice {
    rolls: Vec<f64>,
    cursor: usize,
}

impl ScriptedDice {
    pub fn new(rolls: Vec<f64>) -> Self {
        assert!(!rolls.is_empty(), "ScriptedDice needs at least one roll");
        Self { rolls, cursor: 0 }
    }

    /// Every roll returns `value`
    pub fn constant(value: f64) -> Self {
        Self::new(vec![value])
    }

    /// Number of rolls consumed so far
    pub fn consumed(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for ScriptedDice {
    fn next_unit(&mut self) -> f64 {
        let index = self.cursor.min(self.rolls.len() - 1);
        self.cursor += 1;
        self.rolls[index].clamp(0.0, 1.0 - f64::EPSILON)
    }
}
