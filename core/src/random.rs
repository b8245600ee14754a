use alloc::collections::VecDeque;
use alloc::vec::Vec;
use rand::prelude::*;

pub use rand::rngs::SmallRng;

/// Source of every random decision the game makes.
///
/// Production code feeds a seeded [`SmallRng`]; tests can substitute [`ScriptedRandom`] to
/// replay exact sequences.
pub trait RandomSource {
    /// Returns `true` with probability `p`, clamped to `0.0..=1.0`. NaN never succeeds.
    fn chance(&mut self, p: f64) -> bool;

    /// Uniform index in `0..len`. `len` must be non-zero.
    fn index(&mut self, len: usize) -> usize;
}

impl RandomSource for SmallRng {
    fn chance(&mut self, p: f64) -> bool {
        if p.is_nan() {
            return false;
        }
        self.random_bool(p.clamp(0.0, 1.0))
    }

    fn index(&mut self, len: usize) -> usize {
        self.random_range(0..len)
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn chance(&mut self, p: f64) -> bool {
        (**self).chance(p)
    }

    fn index(&mut self, len: usize) -> usize {
        (**self).index(len)
    }
}

pub fn seeded_rng(seed: u64) -> SmallRng {
    SmallRng::seed_from_u64(seed)
}

/// Uniformly picks one element, `None` for an empty slice.
pub fn choose<'a, T>(rng: &mut impl RandomSource, items: &'a [T]) -> Option<&'a T> {
    if items.is_empty() {
        None
    } else {
        items.get(rng.index(items.len()))
    }
}

/// Deterministic source replaying queued answers.
///
/// Once a queue runs dry it answers `false` for chances and `0` for indices. Queued indices are
/// reduced modulo the requested length so they always stay in range.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScriptedRandom {
    chances: VecDeque<bool>,
    indices: VecDeque<usize>,
}

impl ScriptedRandom {
    pub fn new(chances: impl IntoIterator<Item = bool>, indices: impl IntoIterator<Item = usize>) -> Self {
        Self {
            chances: chances.into_iter().collect(),
            indices: indices.into_iter().collect(),
        }
    }

    pub fn with_indices(indices: impl IntoIterator<Item = usize>) -> Self {
        Self::new(Vec::new(), indices)
    }

    pub fn push_chance(&mut self, value: bool) {
        self.chances.push_back(value);
    }

    pub fn push_index(&mut self, value: usize) {
        self.indices.push_back(value);
    }
}

impl RandomSource for ScriptedRandom {
    fn chance(&mut self, _p: f64) -> bool {
        self.chances.pop_front().unwrap_or(false)
    }

    fn index(&mut self, len: usize) -> usize {
        self.indices.pop_front().map_or(0, |i| i % len.max(1))
    }
}
