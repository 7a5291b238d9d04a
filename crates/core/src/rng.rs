//! RNG module - independent uniform piece generation
//!
//! Each draw picks one of the seven kinds uniformly, with no bag or
//! anti-repeat bias, so streaks of the same piece are expected. A freshly
//! generated piece also gets a uniform starting rotation among its distinct
//! orientations.
//!
//! The generator is a small LCG so that a seed fully determines a session.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::time::Instant;

use crate::pieces::rotation_count;
use crate::types::{PieceKind, PIECE_TYPES};

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce a short cycle start
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Scales by the high bits; the low bits of an LCG cycle too quickly.
    pub fn next_range(&mut self, max: u32) -> u32 {
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }
}

/// Seed derived from the monotonic clock
pub fn clock_seed() -> u32 {
    let mut hasher = DefaultHasher::new();
    Instant::now().hash(&mut hasher);
    let h = hasher.finish();
    (h ^ (h >> 32)) as u32
}

/// A piece kind together with its rotation slot, not yet placed on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceState {
    pub kind: PieceKind,
    pub rotation: u8,
}

/// Uniform piece generator
#[derive(Debug, Clone)]
pub struct PieceRandomizer {
    rng: SimpleRng,
    seed: u32,
}

impl PieceRandomizer {
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
            seed,
        }
    }

    /// Uniformly random piece kind
    pub fn random_kind(&mut self) -> PieceKind {
        let index = self.rng.next_range(PIECE_TYPES as u32) as usize;
        PieceKind::ALL[index]
    }

    /// Random kind with a random starting rotation among its distinct frames
    pub fn next_piece(&mut self) -> PieceState {
        let kind = self.random_kind();
        let frames = rotation_count(kind);
        let rotation = if frames == 1 {
            0
        } else {
            self.rng.next_range(frames as u32) as u8
        };
        PieceState { kind, rotation }
    }

    /// Seed this generator was created with
    pub fn seed(&self) -> u32 {
        self.seed
    }
}

impl Default for PieceRandomizer {
    fn default() -> Self {
        Self::new(1)
    }
}
