//! # Dice
//!
//! Random draws used by combat.
//!
//! Every combat roll is two six-sided dice with faces numbered 0 to 5, plus a
//! flat stat. Tests can load the dice with known faces.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;

/// Number of faces on a combat die.
pub const DIE_FACES: i32 = 6;

/// Source of random draws for the game.
///
/// # Examples
///
/// ```
/// use mazecrawl::Dice;
///
/// let mut dice = Dice::loaded([3, 4]);
/// assert_eq!(dice.roll_2d6(), 7);
/// // A loaded die with no faces left always shows 0.
/// assert_eq!(dice.roll_2d6(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct Dice {
    source: DiceSource,
}

#[derive(Debug, Clone)]
enum DiceSource {
    Random(StdRng),
    Loaded(VecDeque<i32>),
}

impl Dice {
    /// Creates dice seeded for reproducible play.
    pub fn seeded(seed: u64) -> Self {
        Self {
            source: DiceSource::Random(StdRng::seed_from_u64(seed)),
        }
    }

    /// Creates dice that show the given faces in order, then zeros.
    ///
    /// Faces are taken as-is, so a loaded roll can exceed the range a real
    /// die would produce.
    pub fn loaded<I>(faces: I) -> Self
    where
        I: IntoIterator<Item = i32>,
    {
        Self {
            source: DiceSource::Loaded(faces.into_iter().collect()),
        }
    }

    /// Draws a uniform value in `[0, bound)`.
    pub fn below(&mut self, bound: i32) -> i32 {
        match &mut self.source {
            DiceSource::Random(rng) => rng.gen_range(0..bound.max(1)),
            DiceSource::Loaded(faces) => faces.pop_front().unwrap_or(0),
        }
    }

    /// Rolls a single 0-based six-sided die.
    pub fn d6(&mut self) -> i32 {
        self.below(DIE_FACES)
    }

    /// Rolls two 0-based six-sided dice and sums them.
    pub fn roll_2d6(&mut self) -> i32 {
        let first = self.d6();
        let second = self.d6();
        first + second
    }
}
