//! Bulk word generators that feed the bit pool.
//!
//! A [`Bitstream`](crate::Bitstream) never produces randomness itself. It asks
//! a [`WordSource`] for a whole batch of words at a time and then serves those
//! words bit by bit. Randomness quality and seeding are entirely the source's
//! concern.

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

/// Trait that every bulk word generator must implement.
pub trait WordSource {
    /// Overwrite every entry of `words` with an independent uniform value in
    /// `[0, max]` (inclusive).
    fn fill(&mut self, max: u64, words: &mut [u64]);
}

impl<S: WordSource + ?Sized> WordSource for Box<S> {
    fn fill(&mut self, max: u64, words: &mut [u64]) {
        (**self).fill(max, words);
    }
}

/// Adapts any `rand` generator into a [`WordSource`].
#[derive(Debug, Clone)]
pub struct RngWordSource<R> {
    rng: R,
}

impl<R: RngCore> RngWordSource<R> {
    /// Wrap an existing generator.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Borrow the wrapped generator.
    pub fn rng(&self) -> &R {
        &self.rng
    }
}

impl RngWordSource<StdRng> {
    /// A `StdRng` seeded from the operating system.
    pub fn from_os_rng() -> Self {
        Self::new(StdRng::from_os_rng())
    }

    /// A deterministic `StdRng`. Reproducible only for a fixed `rand` version.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: RngCore> WordSource for RngWordSource<R> {
    fn fill(&mut self, max: u64, words: &mut [u64]) {
        let rng = &mut self.rng;
        words.fill_with(|| rng.random_range(0..=max));
    }
}
