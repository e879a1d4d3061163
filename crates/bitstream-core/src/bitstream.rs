//! Pooled random bit source.
//!
//! Architecture:
//! 1. Draw `pool_size` random words from a [`WordSource`] in one batch
//! 2. Serve the current word one bit at a time, least significant bit first
//! 3. Advance to the next word after [`DTYPE_SIZE`] bits
//! 4. Replace the whole pool once its last word is exhausted
//! 5. Assemble small integers from consecutive bits on demand
//!
//! Each word is a `u64` with the top bit reserved, so every word carries
//! exactly 63 usable bits and never looks negative when reinterpreted as a
//! signed value.

use std::num::NonZeroUsize;

use rand::rngs::StdRng;
use serde::Serialize;

use crate::error::{BitstreamError, Result};
use crate::source::{RngWordSource, WordSource};

/// Usable bits per pool word (word width minus the reserved sign bit).
pub const DTYPE_SIZE: u32 = 63;

/// Largest value a pool word may hold.
pub const WORD_MAX: u64 = (1 << DTYPE_SIZE) - 1;

/// Pool size used by [`Bitstream::default`] and the shared instance.
pub const DEFAULT_POOL_SIZE: usize = 100;

const DEFAULT_POOL: NonZeroUsize = match NonZeroUsize::new(DEFAULT_POOL_SIZE) {
    Some(n) => n,
    None => panic!("DEFAULT_POOL_SIZE must be non-zero"),
};

/// An infinite stream of random bits drawn from a refillable pool of words.
///
/// Not synchronized: every operation takes `&mut self`. Wrap it in a `Mutex`
/// (see [`crate::shared`]) or give each consumer its own instance.
pub struct Bitstream<S: WordSource = RngWordSource<StdRng>> {
    source: S,
    pool: Vec<u64>,
    element: u64,
    n_element: usize,
    index: u32,
    mask: u64,
    bits_drawn: u64,
    refills: u64,
}

impl Bitstream {
    /// Create a bit source over an OS-seeded `StdRng`.
    pub fn new(pool_size: usize) -> Result<Self> {
        Self::with_source(RngWordSource::from_os_rng(), pool_size)
    }

    /// Create a bit source over a deterministically seeded `StdRng`.
    pub fn seeded(seed: u64, pool_size: usize) -> Result<Self> {
        Self::with_source(RngWordSource::seeded(seed), pool_size)
    }
}

impl Default for Bitstream {
    fn default() -> Self {
        Self::from_parts(RngWordSource::from_os_rng(), DEFAULT_POOL)
    }
}

impl<S: WordSource> Bitstream<S> {
    /// Create a bit source over any word generator.
    pub fn with_source(source: S, pool_size: usize) -> Result<Self> {
        let size = NonZeroUsize::new(pool_size).ok_or(BitstreamError::InvalidPoolSize {
            requested: pool_size,
        })?;
        Ok(Self::from_parts(source, size))
    }

    fn from_parts(mut source: S, size: NonZeroUsize) -> Self {
        let mut pool = vec![0; size.get()];
        source.fill(WORD_MAX, &mut pool);
        log::debug!("bitstream created with a pool of {} words", pool.len());
        Self {
            source,
            element: pool[0],
            pool,
            n_element: 0,
            index: 0,
            mask: 1,
            bits_drawn: 0,
            refills: 0,
        }
    }

    /// Replace the whole pool and restart at its first word. The bit cursor is
    /// left to the caller.
    fn refill(&mut self) {
        self.source.fill(WORD_MAX, &mut self.pool);
        self.n_element = 0;
        self.element = self.pool[0];
        self.refills += 1;
        log::trace!("bit pool refilled ({} refills so far)", self.refills);
    }

    /// Return a random bit, 0 or 1.
    pub fn next_bit(&mut self) -> u8 {
        let bit = ((self.element & self.mask) >> self.index) as u8;
        self.index += 1;
        self.mask <<= 1;
        if self.index == DTYPE_SIZE {
            self.n_element += 1;
            if self.n_element == self.pool.len() {
                self.refill();
            } else {
                self.element = self.pool[self.n_element];
            }
            self.index = 0;
            self.mask = 1;
        }
        self.bits_drawn += 1;
        bit
    }

    /// Return a random bit as a `bool`.
    pub fn next_bool(&mut self) -> bool {
        self.next_bit() == 1
    }

    /// Return a random integer in `[0, n]`, assembled most significant bit
    /// first from consecutive bits.
    ///
    /// One bit is drawn for each doubling of a mask starting at 1 that stays
    /// strictly below `n`. This is not rejection sampling: the result is
    /// uniform over `[0, 2^b - 1]` for that bit count `b`, which never reaches
    /// `n` itself. In particular `integer(1)` and `integer(2)` always return 0
    /// without consuming any bits.
    pub fn integer(&mut self, n: i64) -> Result<i64> {
        if n <= 0 {
            return Err(BitstreamError::InvalidBound { n });
        }
        // n <= i64::MAX < 2^63, so the mask stops before it can overflow.
        let n = n as u64;
        let mut v: i64 = 0;
        let mut m: u64 = 1;
        loop {
            m <<= 1;
            if m >= n {
                return Ok(v);
            }
            v = (v << 1) + i64::from(self.next_bit());
        }
    }

    /// Number of words in the pool.
    pub fn pool_size(&self) -> usize {
        self.pool.len()
    }

    /// Borrow the word generator.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Snapshot of the cursor and counters.
    pub fn stats(&self) -> BitstreamStats {
        BitstreamStats {
            pool_size: self.pool.len(),
            bits_drawn: self.bits_drawn,
            refills: self.refills,
            word_index: self.n_element,
            bit_index: self.index,
        }
    }
}

impl<S: WordSource> Iterator for Bitstream<S> {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        Some(self.next_bit())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}

impl<S: WordSource> std::iter::FusedIterator for Bitstream<S> {}

impl<S: WordSource> std::fmt::Debug for Bitstream<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bitstream")
            .field("pool_size", &self.pool.len())
            .field("word_index", &self.n_element)
            .field("bit_index", &self.index)
            .field("bits_drawn", &self.bits_drawn)
            .field("refills", &self.refills)
            .finish_non_exhaustive()
    }
}

/// Cursor position and usage counters of a [`Bitstream`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BitstreamStats {
    /// Number of words in the pool.
    pub pool_size: usize,
    /// Total bits served since construction.
    pub bits_drawn: u64,
    /// Pool replacements since construction (the initial fill is not counted).
    pub refills: u64,
    /// Index of the word currently being consumed.
    pub word_index: usize,
    /// Index of the next bit within the current word.
    pub bit_index: u32,
}
