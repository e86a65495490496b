//! RNG module - shape selection and piece identities
//!
//! Shapes are drawn uniformly at random from the seven-shape catalog. The default
//! randomness source is a seeded LCG so a game can be replayed from its seed.
//! Identities come from a monotonic counter that never hands out `PieceId::NONE`.

use crate::pieces::ActivePiece;
use crate::types::{PieceId, ShapeKind, SHAPE_COUNT};

/// A source of uniform values used to pick shapes
pub trait ShapeSource {
    /// Uniform value in `[0, bound)`
    fn next_index(&mut self, bound: u32) -> u32;
}

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
        // a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Uses the high bits; the low bits of a power-of-two LCG cycle with a short period.
    pub fn next_range(&mut self, max: u32) -> u32 {
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Current RNG state (reseeding with it continues the same sequence)
    pub fn state(&self) -> u32 {
        self.state
    }
}

impl ShapeSource for SimpleRng {
    fn next_index(&mut self, bound: u32) -> u32 {
        self.next_range(bound)
    }
}

/// Monotonic identity generator
///
/// Ids are never reused: the counter is 64-bit and saturates instead of wrapping.
#[derive(Debug, Clone)]
pub struct PieceIds {
    next: u64,
}

impl PieceIds {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    /// Hand out a fresh identity
    pub fn next_id(&mut self) -> PieceId {
        let id = PieceId(self.next);
        self.next = self.next.saturating_add(1);
        id
    }

    /// Number of identities handed out so far
    pub fn issued(&self) -> u64 {
        self.next - 1
    }
}

impl Default for PieceIds {
    fn default() -> Self {
        Self::new()
    }
}

/// Produces new active pieces
#[derive(Debug, Clone)]
pub struct PieceSpawner<R = SimpleRng> {
    source: R,
    ids: PieceIds,
}

impl PieceSpawner<SimpleRng> {
    /// Spawner backed by the seeded LCG
    pub fn seeded(seed: u32) -> Self {
        Self::with_source(SimpleRng::new(seed))
    }
}

impl<R: ShapeSource> PieceSpawner<R> {
    pub fn with_source(source: R) -> Self {
        Self {
            source,
            ids: PieceIds::new(),
        }
    }

    /// Spawn a piece at the local origin, rotation 0.
    ///
    /// With `randomize == false` this is the deterministic placeholder (first shape,
    /// no identity) and neither the randomness source nor the id counter advances.
    pub fn spawn(&mut self, randomize: bool) -> ActivePiece {
        if !randomize {
            return ActivePiece::placeholder();
        }
        let index = self.source.next_index(SHAPE_COUNT as u32) as usize;
        ActivePiece::new(ShapeKind::from_index(index), self.ids.next_id())
    }

    pub fn ids(&self) -> &PieceIds {
        &self.ids
    }

    pub fn source(&self) -> &R {
        &self.source
    }
}

impl Default for PieceSpawner<SimpleRng> {
    fn default() -> Self {
        Self::seeded(1)
    }
}
