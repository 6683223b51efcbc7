//! Injected source of uniform random draws.
//!
//! Caption placement, size and colour are random on purpose, and so are the
//! image and quote picked by [`crate::generate`]. Everything random goes
//! through [`RandomSource`] so tests can pin the draws and assert bounds
//! instead of pixels.

use rand::Rng;

/// Uniform integer draws over an inclusive range.
///
/// Implementations must be `Send + Sync`: one engine may serve several
/// threads at once.
pub trait RandomSource: Send + Sync {
    /// Draw uniformly from `low..=high`. Callers guarantee `low <= high`.
    fn uniform(&self, low: u32, high: u32) -> u32;

    /// Pick an index into a collection of `len` items, or `None` if empty.
    fn pick_index(&self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        let high = u32::try_from(len - 1).unwrap_or(u32::MAX);
        Some(self.uniform(0, high) as usize)
    }
}

/// Unseeded production source backed by the thread-local RNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn uniform(&self, low: u32, high: u32) -> u32 {
        rand::thread_rng().gen_range(low..=high)
    }
}

/// Deterministic source that always lands on one end of the range.
///
/// Handy for asserting that every randomised value stays within its bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixedRandom {
    /// Always returns `low`.
    Low,
    /// Always returns `high`.
    High,
}

impl RandomSource for FixedRandom {
    fn uniform(&self, low: u32, high: u32) -> u32 {
        match self {
            FixedRandom::Low => low,
            FixedRandom::High => high,
        }
    }
}
