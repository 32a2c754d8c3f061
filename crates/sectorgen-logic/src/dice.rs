//! Dice — the only source of randomness the rules consume.
//!
//! Every generator takes `&mut impl Dice` instead of an RNG so tests can
//! script exact roll sequences. Production code wraps any `rand::Rng` in
//! [`RandomDice`].

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Something that can roll `num_dice` dice of `sides` sides and sum them.
pub trait Dice {
    /// Sum of `num_dice` independent uniform draws over `1..=sides`.
    ///
    /// Rolling zero dice (or zero-sided dice) yields 0.
    fn roll(&mut self, num_dice: u32, sides: u32) -> i32;
}

/// Real dice backed by a `rand` generator.
#[derive(Debug, Clone)]
pub struct RandomDice<R = StdRng> {
    rng: R,
}

impl<R: Rng> RandomDice<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    pub fn into_inner(self) -> R {
        self.rng
    }
}

impl RandomDice<StdRng> {
    /// Non-reproducible dice seeded from the OS.
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    /// Reproducible dice: the same seed always yields the same rolls.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Dice for RandomDice<R> {
    fn roll(&mut self, num_dice: u32, sides: u32) -> i32 {
        if sides == 0 {
            return 0;
        }
        (0..num_dice)
            .map(|_| self.rng.gen_range(1..=sides) as i32)
            .sum()
    }
}

/// Test double that replays a fixed list of roll results, one per call.
///
/// The script holds *totals*, not individual dice: scripting `7` for a
/// `roll(2, 6)` call returns 7 regardless of the dice asked for.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDice {
    script: VecDeque<i32>,
    repeat: Option<i32>,
    consumed: usize,
}

impl ScriptedDice {
    pub fn new(results: impl IntoIterator<Item = i32>) -> Self {
        Self {
            script: results.into_iter().collect(),
            repeat: None,
            consumed: 0,
        }
    }

    /// Dice that return `value` on every call, forever.
    pub fn constant(value: i32) -> Self {
        Self {
            script: VecDeque::new(),
            repeat: Some(value),
            consumed: 0,
        }
    }

    /// Results still waiting to be rolled (ignores a constant tail).
    pub fn remaining(&self) -> usize {
        self.script.len()
    }

    /// Number of `roll` calls answered so far.
    pub fn consumed(&self) -> usize {
        self.consumed
    }
}

impl Dice for ScriptedDice {
    /// # Panics
    ///
    /// Panics when a non-constant script runs out; a test that rolls more
    /// often than it scripted is wrong, not unlucky.
    fn roll(&mut self, _num_dice: u32, _sides: u32) -> i32 {
        let next = self.script.pop_front().or(self.repeat);
        match next {
            Some(value) => {
                self.consumed += 1;
                value
            }
            None => panic!("scripted dice exhausted after {} rolls", self.consumed),
        }
    }
}
