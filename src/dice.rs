//! Dice sources.
//!
//! Every random decision the engine makes goes through a `DiceRoller`: die
//! faces for combat, and uniform index picks for board setup and random
//! reinforcement. `RandomDice` is backed by a `SmallRng`; `LoadedDice` replays
//! a fixed cycle of faces so that combat outcomes can be scripted.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Number of faces on a die.
pub const DIE_FACES: u8 = 6;

/// Source of die faces and uniform picks.
pub trait DiceRoller {
    /// Rolls a single die, returning a value in `[1, DIE_FACES]`.
    fn roll_die(&mut self) -> u8;

    /// Picks a uniform index in `[0, len)`. `len` must be non-zero.
    fn choose(&mut self, len: usize) -> usize;

    /// Rolls `count` dice.
    fn roll(&mut self, count: u8) -> Vec<u8> {
        (0..count).map(|_| self.roll_die()).collect()
    }
}

/// Dice backed by a small, fast PRNG.
pub struct RandomDice {
    rng: SmallRng,
}

impl RandomDice {
    /// Creates dice seeded from OS entropy.
    pub fn from_entropy() -> Self {
        RandomDice {
            rng: SmallRng::from_entropy(),
        }
    }

    /// Creates reproducible dice from a seed.
    pub fn seeded(seed: u64) -> Self {
        RandomDice {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Seeds from `seed` when non-zero, otherwise from entropy.
    pub fn from_seed_or_entropy(seed: u64) -> Self {
        if seed != 0 {
            Self::seeded(seed)
        } else {
            Self::from_entropy()
        }
    }
}

impl DiceRoller for RandomDice {
    fn roll_die(&mut self) -> u8 {
        self.rng.gen_range(1..=DIE_FACES)
    }

    fn choose(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }
}

/// Dice that replay a fixed cycle of faces.
///
/// Picks always return the first candidate, so setup and random
/// reinforcement become deterministic too.
#[derive(Debug, Clone)]
pub struct LoadedDice {
    faces: Vec<u8>,
    next: usize,
}

impl LoadedDice {
    /// Creates loaded dice from a cycle of faces. Faces are clamped into
    /// `[1, DIE_FACES]`; an empty cycle always rolls 1.
    pub fn new(faces: Vec<u8>) -> Self {
        let faces = faces.into_iter().map(|f| f.clamp(1, DIE_FACES)).collect();
        LoadedDice { faces, next: 0 }
    }
}

impl DiceRoller for LoadedDice {
    fn roll_die(&mut self) -> u8 {
        if self.faces.is_empty() {
            return 1;
        }
        let face = self.faces[self.next % self.faces.len()];
        self.next += 1;
        face
    }

    fn choose(&mut self, _len: usize) -> usize {
        0
    }
}

/// Sums a set of rolled faces.
pub fn total(rolls: &[u8]) -> u32 {
    rolls.iter().map(|&r| u32::from(r)).sum()
}
