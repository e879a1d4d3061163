//! # bitstream-core
//!
//! **Cheap random bits for stochastic simulations.**
//!
//! Generating a full random word for every coin flip wastes most of the word.
//! `bitstream-core` draws a batch of 63-bit words from a bulk generator into a
//! pool, hands them out one bit at a time, and refills the pool in one go when
//! the last word runs dry.
//!
//! ## Quick Start
//!
//! ```
//! use bitstream_core::Bitstream;
//!
//! // A pool of 100 words, seeded from the OS
//! let mut bits = Bitstream::new(100).unwrap();
//!
//! let coin = bits.next_bit();
//! assert!(coin <= 1);
//!
//! // Small integers are assembled from consecutive bits
//! let v = bits.integer(20).unwrap();
//! assert!((0..=20).contains(&v));
//!
//! // The stream is also an (infinite) iterator
//! let ones = bits.by_ref().take(1000).filter(|&b| b == 1).count();
//! assert!(ones <= 1000);
//! ```
//!
//! ## Architecture
//!
//! WordSource (bulk generator) → pool of words → bit cursor → bits → integers
//!
//! The generator is pluggable through the [`WordSource`] trait. The default is
//! `rand`'s `StdRng`, either OS-seeded ([`Bitstream::new`]) or seeded from a
//! `u64` ([`Bitstream::seeded`]).
//!
//! A [`Bitstream`] is not synchronized. Pass one to each consumer, or use the
//! mutex-guarded process-wide instance in [`shared`].

pub mod bitstream;
pub mod error;
pub mod shared;
pub mod source;

pub use bitstream::{Bitstream, BitstreamStats, DEFAULT_POOL_SIZE, DTYPE_SIZE, WORD_MAX};
pub use error::{BitstreamError, Result};
pub use shared::{default_bitstream, init_default, with_default};
pub use source::{RngWordSource, WordSource};

/// Library version (from Cargo.toml).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
