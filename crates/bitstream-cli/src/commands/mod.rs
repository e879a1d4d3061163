pub mod bits;
pub mod integers;
pub mod report;

use bitstream_core::{Bitstream, Result};

/// Build a Bitstream from CLI flags: seeded when a seed is given, OS-seeded
/// otherwise.
pub fn try_make_bitstream(pool_size: usize, seed: Option<u64>) -> Result<Bitstream> {
    match seed {
        Some(seed) => {
            log::info!("using seeded bitstream (seed={seed}, pool_size={pool_size})");
            Bitstream::seeded(seed, pool_size)
        }
        None => Bitstream::new(pool_size),
    }
}

/// Like [`try_make_bitstream`], but reports the error and exits.
pub fn make_bitstream(pool_size: usize, seed: Option<u64>) -> Bitstream {
    try_make_bitstream(pool_size, seed).unwrap_or_else(|e| exit_with(&e))
}

/// Print an error to stderr and exit with status 1.
pub fn exit_with(err: &dyn std::fmt::Display) -> ! {
    eprintln!("Error: {err}");
    std::process::exit(1);
}
