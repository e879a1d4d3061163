use std::io::Write;

use bitstream_core::{Bitstream, BitstreamError, Result, WordSource};

pub fn run(limit: i64, count: usize, pool_size: usize, seed: Option<u64>) {
    let mut bits = super::make_bitstream(pool_size, seed);
    let values = draw_integers(&mut bits, limit, count).unwrap_or_else(|e| super::exit_with(&e));

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for v in values {
        if writeln!(out, "{v}").is_err() {
            break; // Broken pipe
        }
    }
}

/// Validate `limit` and return the interval its integers can actually reach.
pub fn reachable_for_limit(limit: i64) -> Result<(i64, i64)> {
    bitstream_tests::reachable_range(limit).ok_or(BitstreamError::InvalidBound { n: limit })
}

/// Draw `count` integers in `[0, limit]`. The limit is checked even when
/// `count` is zero.
pub fn draw_integers<S: WordSource>(
    bits: &mut Bitstream<S>,
    limit: i64,
    count: usize,
) -> Result<Vec<i64>> {
    reachable_for_limit(limit)?;
    (0..count).map(|_| bits.integer(limit)).collect()
}
