//! Random pair generation
//!
//! Each pair is two independently drawn colors from the active palette.
//! A seeded ChaCha stream makes a session reproducible.

use crate::color::PuyoColor;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Source of (main, satellite) color pairs
#[derive(Debug, Clone)]
pub struct PairGenerator {
    rng: ChaCha8Rng,
    /// Number of palette colors in play, at least 1
    color_count: usize,
}

impl PairGenerator {
    /// Create a generator with a random seed
    pub fn new(color_count: usize) -> Self {
        Self::with_seed(rand::random(), color_count)
    }

    /// Create a deterministic generator
    pub fn with_seed(seed: u64, color_count: usize) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            color_count: color_count.clamp(1, PuyoColor::MAX_COLORS),
        }
    }

    pub fn color_count(&self) -> usize {
        self.color_count
    }

    /// Draw the next pair of colors
    pub fn next_pair(&mut self) -> (PuyoColor, PuyoColor) {
        (self.next_color(), self.next_color())
    }

    fn next_color(&mut self) -> PuyoColor {
        let palette = PuyoColor::palette(self.color_count);
        palette[self.rng.gen_range(0..palette.len())]
    }
}
