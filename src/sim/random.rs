//! Random draws used by maze carving
//!
//! Carving only ever asks for a uniform integer in `[0, n)`. Any `rand` RNG
//! satisfies that; `FixedSequence` replays a scripted list of draws so that
//! a maze can be reproduced by hand.

use rand::{Rng, RngCore};

/// Source of uniformly distributed integers in `[0, n)`
pub trait RandomSource {
    /// Draw a value in `0..n`. `n` is always at least 1.
    fn below(&mut self, n: usize) -> usize;
}

impl<R: RngCore> RandomSource for R {
    fn below(&mut self, n: usize) -> usize {
        self.random_range(0..n)
    }
}

/// Replays a fixed list of draws, cycling when exhausted
///
/// A scripted value that is not below the requested bound is reduced modulo
/// the bound, so any script yields a valid (if not hand-predictable) maze.
#[derive(Debug, Clone)]
pub struct FixedSequence {
    draws: Vec<usize>,
    cursor: usize,
}

impl FixedSequence {
    pub fn new(draws: impl Into<Vec<usize>>) -> Self {
        Self {
            draws: draws.into(),
            cursor: 0,
        }
    }

    /// Number of draws consumed so far
    pub fn consumed(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for FixedSequence {
    fn below(&mut self, n: usize) -> usize {
        if self.draws.is_empty() {
            return 0;
        }
        let value = self.draws[self.cursor % self.draws.len()];
        self.cursor += 1;
        value % n
    }
}
