//! RNG module - injectable next-piece source
//!
//! Pieces are drawn uniformly and independently from the seven kinds; repeats
//! are allowed. The session asks a [`PieceSource`] for every new kind, so
//! tests can swap in [`ScriptedPieces`] and assert exact piece order.

use crate::types::PieceKind;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
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
    /// Uses the high bits; the low bits of a power-of-two LCG cycle quickly.
    pub fn next_range(&mut self, max: u32) -> u32 {
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }
}

/// Supplier of upcoming piece kinds.
pub trait PieceSource {
    fn next_kind(&mut self) -> PieceKind;
}

/// Uniform random pieces from a seeded [`SimpleRng`].
#[derive(Debug, Clone)]
pub struct RandomPieces {
    rng: SimpleRng,
}

impl RandomPieces {
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
        }
    }
}

impl Default for RandomPieces {
    fn default() -> Self {
        Self::new(1)
    }
}

impl PieceSource for RandomPieces {
    fn next_kind(&mut self) -> PieceKind {
        let i = self.rng.next_range(PieceKind::ALL.len() as u32) as usize;
        PieceKind::ALL[i]
    }
}

/// Fixed sequence of kinds, repeated forever.
#[derive(Debug, Clone)]
pub struct ScriptedPieces {
    kinds: Vec<PieceKind>,
    index: usize,
}

impl ScriptedPieces {
    /// Panics if `kinds` is empty.
    pub fn new(kinds: impl Into<Vec<PieceKind>>) -> Self {
        let kinds = kinds.into();
        assert!(!kinds.is_empty(), "scripted piece sequence must not be empty");
        Self { kinds, index: 0 }
    }

    /// Same kind every time.
    pub fn repeat(kind: PieceKind) -> Self {
        Self::new(vec![kind])
    }
}

impl PieceSource for ScriptedPieces {
    fn next_kind(&mut self) -> PieceKind {
        let kind = self.kinds[self.index % self.kinds.len()];
        self.index += 1;
        kind
    }
}
