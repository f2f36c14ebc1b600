//! RNG module - uniform piece selection behind a swappable random source
//!
//! Each spawn picks one of the seven kinds uniformly. The session only sees
//! the [`RandomSource`] trait, so tests can script the exact kind sequence
//! with [`KindSequence`] while play uses the seeded [`SimpleRng`].

use crate::types::PieceKind;

/// Source of randomness for piece selection.
pub trait RandomSource {
    /// Generate next random u32
    fn next_u32(&mut self) -> u32;

    /// Generate random value in range [0, max)
    fn next_range(&mut self, max: u32) -> u32 {
        if max == 0 {
            return 0;
        }
        self.next_u32() % max
    }

    /// Pick one of the seven kinds uniformly
    fn next_kind(&mut self) -> PieceKind {
        let index = self.next_range(PieceKind::ALL.len() as u32) as usize;
        PieceKind::ALL[index]
    }
}

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    seed: u32,
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { seed, state }
    }

    /// Seed this generator was created with
    pub fn seed(&self) -> u32 {
        self.seed
    }
}

impl RandomSource for SimpleRng {
    fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        // Low bits of a power-of-two LCG have short periods; use the high half.
        self.state >> 16
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

/// Scripted source that yields a fixed kind sequence, repeating it forever.
///
/// An empty script behaves like `[PieceKind::O]`.
#[derive(Debug, Clone)]
pub struct KindSequence {
    kinds: Vec<PieceKind>,
    cursor: usize,
}

impl KindSequence {
    pub fn new(kinds: impl IntoIterator<Item = PieceKind>) -> Self {
        let mut kinds: Vec<PieceKind> = kinds.into_iter().collect();
        if kinds.is_empty() {
            kinds.push(PieceKind::O);
        }
        Self { kinds, cursor: 0 }
    }

    /// Sequence of a single repeated kind
    pub fn repeat(kind: PieceKind) -> Self {
        Self::new([kind])
    }
}

impl RandomSource for KindSequence {
    fn next_u32(&mut self) -> u32 {
        let kind = self.kinds[self.cursor % self.kinds.len()];
        self.cursor = (self.cursor + 1) % self.kinds.len();
        kind.index() as u32
    }
}
