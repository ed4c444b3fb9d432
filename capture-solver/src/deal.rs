//! Random deals: uniform shuffles of the sixteen starting pieces.

use capture_core::{Puzzle, DEAL};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Shuffles the fixed piece set into fresh puzzles.
pub struct Dealer {
    rng: StdRng,
}

impl Dealer {
    /// Seeded dealer for reproducible runs, or OS entropy when `seed` is None.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self { rng }
    }

    /// Next shuffled puzzle, White to move.
    pub fn deal(&mut self) -> Puzzle {
        let mut pieces = DEAL;
        pieces.shuffle(&mut self.rng);
        Puzzle::from_deal(&pieces)
    }
}
