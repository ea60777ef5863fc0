use crate::RandSource;
use rand::{Rng, rng};

/// A `RandSource` that uses the thread-local RNG (`rand::rng()`).
///
/// This RNG is fast, cryptographically secure (ChaCha-based), and automatically
/// reseeded periodically.
///
/// Each OS thread has its own RNG instance, so calls from multiple request
/// tasks are contention-free. This type does **not** store the RNG itself; it
/// accesses the thread-local generator on each call, which makes it `Send` and
/// `Sync` even though `ThreadRng` is neither.
#[derive(Default, Clone, Copy, Debug)]
pub struct ThreadRandom;

impl RandSource for ThreadRandom {
    fn rand_range(&self, low: u32, high: u32) -> u32 {
        rng().random_range(low..high)
    }
}
