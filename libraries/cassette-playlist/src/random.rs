//! Random index providers for shuffle
//!
//! The controller never touches an RNG directly; it asks a [`RandomIndex`] for
//! an index below the playlist length. Tests plug in [`SequenceIndices`] to make
//! shuffle deterministic.

use rand::rngs::StdRng;
use rand::{thread_rng, Rng, SeedableRng};
use std::collections::VecDeque;

/// Source of uniformly distributed indices
pub trait RandomIndex {
    /// Return an index in `0..upper`
    ///
    /// `upper` is always at least 1.
    fn next_index(&mut self, upper: usize) -> usize;
}

/// Thread-local RNG (the default)
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandom;

impl RandomIndex for ThreadRandom {
    fn next_index(&mut self, upper: usize) -> usize {
        thread_rng().gen_range(0..upper)
    }
}

/// Reproducible RNG seeded from configuration
#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomIndex for SeededRandom {
    fn next_index(&mut self, upper: usize) -> usize {
        self.rng.gen_range(0..upper)
    }
}

/// Replays a fixed script of indices, cycling when exhausted
///
/// Values are reduced modulo `upper`, so any script stays in range.
#[derive(Debug, Clone)]
pub struct SequenceIndices {
    script: VecDeque<usize>,
}

impl SequenceIndices {
    pub fn new(script: impl IntoIterator<Item = usize>) -> Self {
        Self {
            script: script.into_iter().collect(),
        }
    }
}

impl RandomIndex for SequenceIndices {
    fn next_index(&mut self, upper: usize) -> usize {
        let Some(value) = self.script.pop_front() else {
            return 0;
        };
        self.script.push_back(value);
        value % upper
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thread_random_stays_in_range() {
        let mut random = ThreadRandom;
        for upper in 1..20 {
            for _ in 0..50 {
                assert!(random.next_index(upper) < upper);
            }
        }
    }

    #[test]
    fn seeded_random_is_reproducible() {
        let mut a = SeededRandom::new(7);
        let mut b = SeededRandom::new(7);
        let first: Vec<usize> = (0..32).map(|_| a.next_index(10)).collect();
        let second: Vec<usize> = (0..32).map(|_| b.next_index(10)).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn sequence_cycles_and_wraps() {
        let mut seq = SequenceIndices::new([1, 5, 2]);
        assert_eq!(seq.next_index(4), 1);
        assert_eq!(seq.next_index(4), 1); // 5 % 4
        assert_eq!(seq.next_index(4), 2);
        assert_eq!(seq.next_index(4), 1);
    }

    #[test]
    fn empty_sequence_yields_zero() {
        let mut seq = SequenceIndices::new(Vec::new());
        assert_eq!(seq.next_index(3), 0);
    }
}
