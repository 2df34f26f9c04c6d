//! Deterministic simulation RNG.
//!
//! Everything random in a scenario (node placement, vehicle spawn points,
//! request origins) draws from one seeded `SimRng`, so a seed fully
//! reproduces a run.  The engine proper is deterministic and never draws.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Simulation-level RNG for scenario generation.
///
/// Used only in single-threaded contexts.  Derive a [`child`](Self::child)
/// per independent stream (e.g. one for the network, one for requests) so
/// that changing how many draws one stream makes does not shift the other.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Derive a child `SimRng` with a different seed offset.
    pub fn child(&mut self, offset: u64) -> SimRng {
        let child_seed: u64 = self.0.r#gen::<u64>() ^ offset.wrapping_mul(MIXING_CONSTANT);
        SimRng(SmallRng::seed_from_u64(child_seed))
    }

    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// Choose a random element from a slice.
    /// Returns `None` if the slice is empty.
    #[inline]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.0)
    }

    /// Choose two distinct elements (in draw order) from a slice.
    ///
    /// Returns `None` if the slice has fewer than two elements.  Used to
    /// draw request endpoints, which must differ.
    pub fn choose_pair<T: Copy>(&mut self, slice: &[T]) -> Option<(T, T)> {
        if slice.len() < 2 {
            return None;
        }
        let a = self.0.gen_range(0..slice.len());
        // Draw from the remaining len-1 slots and skip over `a`.
        let mut b = self.0.gen_range(0..slice.len() - 1);
        if b >= a {
            b += 1;
        }
        Some((slice[a], slice[b]))
    }
}
