//! Process-wide default bit source.
//!
//! Code that can take a `&mut Bitstream` should. The shared instance exists
//! for callers that have no natural place to thread one through: it is built
//! on first use with [`DEFAULT_POOL_SIZE`](crate::DEFAULT_POOL_SIZE) words
//! and lives until the process exits.

use std::sync::{Mutex, OnceLock, PoisonError};

use crate::bitstream::Bitstream;

static DEFAULT_BITSTREAM: OnceLock<Mutex<Bitstream>> = OnceLock::new();

/// Return the shared bit source, creating it on first call.
///
/// Concurrent first calls are safe: exactly one instance is ever built.
pub fn default_bitstream() -> &'static Mutex<Bitstream> {
    DEFAULT_BITSTREAM.get_or_init(|| {
        log::debug!("initialising default bitstream");
        Mutex::new(Bitstream::default())
    })
}

/// Force creation of the shared bit source. Call during start-up so the
/// first consumer doesn't pay for the initial pool fill.
pub fn init_default() {
    let _ = default_bitstream();
}

/// Run `f` with exclusive access to the shared bit source.
///
/// A panic inside an earlier `f` poisons the lock but cannot leave the cursor
/// half-updated, so the poison is ignored.
pub fn with_default<T>(f: impl FnOnce(&mut Bitstream) -> T) -> T {
    let mut guard = default_bitstream()
        .lock()
        .unwrap_or_else(PoisonError::into_inner);
    f(&mut guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_singleton() {
        assert!(std::ptr::eq(default_bitstream(), default_bitstream()));
    }

    #[test]
    fn test_with_default_advances_shared_state() {
        init_default();
        let (before, after) = with_default(|bs| {
            let before = bs.stats().bits_drawn;
            for _ in 0..10 {
                bs.next_bit();
            }
            (before, bs.stats().bits_drawn)
        });
        assert_eq!(after - before, 10);
    }

    #[test]
    fn test_concurrent_first_access() {
        let ptrs: Vec<usize> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..8)
                .map(|_| s.spawn(|| std::ptr::from_ref(default_bitstream()) as usize))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });
        assert!(ptrs.windows(2).all(|w| w[0] == w[1]));
    }

    #[test]
    fn test_shared_integer_in_bounds() {
        let v = with_default(|bs| bs.integer(100)).unwrap();
        assert!((0..=100).contains(&v));
    }
}
