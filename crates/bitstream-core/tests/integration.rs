//! Integration tests for bitstream-core.
//!
//! These tests drive the public API end to end:
//! word source → pool → bits → integers → statistical checks.

use bitstream_core::{
    Bitstream, BitstreamError, DTYPE_SIZE, RngWordSource, WORD_MAX, WordSource, with_default,
};
use bitstream_tests::{monobit_frequency, reachable_range, run_bit_tests, runs_test, uniformity};

/// p-values below this are treated as a genuine failure rather than bad luck.
const ALPHA: f64 = 1e-4;

fn p_of(result: &bitstream_tests::TestResult) -> f64 {
    result.p_value.unwrap_or(0.0)
}

/// Counts how many words it has been asked for.
struct CountingSource {
    inner: RngWordSource<rand::rngs::StdRng>,
    words_requested: usize,
}

impl WordSource for CountingSource {
    fn fill(&mut self, max: u64, words: &mut [u64]) {
        self.words_requested += words.len();
        self.inner.fill(max, words);
    }
}

#[test]
fn rejects_invalid_input() {
    assert_eq!(
        Bitstream::new(0).unwrap_err(),
        BitstreamError::InvalidPoolSize { requested: 0 }
    );
    let mut bits = Bitstream::new(1).unwrap();
    assert!(bits.integer(0).is_err());
    assert!(bits.integer(-1).is_err());
}

#[test]
fn bits_are_binary_across_many_refills() {
    let mut bits = Bitstream::seeded(17, 3).unwrap();
    let drawn: Vec<u8> = bits.by_ref().take(50_000).collect();
    assert!(drawn.iter().all(|&b| b == 0 || b == 1));
    assert_eq!(bits.stats().refills, 50_000 / (3 * DTYPE_SIZE as u64));
}

#[test]
fn refill_requests_whole_pools() {
    let source = CountingSource {
        inner: RngWordSource::seeded(3),
        words_requested: 0,
    };
    let mut bits = Bitstream::with_source(source, 10).unwrap();
    assert_eq!(bits.source().words_requested, 10);

    for _ in 0..(10 * DTYPE_SIZE) {
        bits.next_bit();
    }
    assert_eq!(bits.source().words_requested, 20);
    assert_eq!(bits.stats().refills, 1);
}

#[test]
fn seeded_stream_passes_bit_battery() {
    let mut bits = Bitstream::seeded(2024, 100).unwrap();
    let drawn: Vec<u8> = bits.by_ref().take(100_000).collect();
    for result in run_bit_tests(&drawn) {
        assert!(
            p_of(&result) > ALPHA,
            "{} failed: {}",
            result.name,
            result.details
        );
    }
}

#[test]
fn os_seeded_stream_is_balanced() {
    let mut bits = Bitstream::default();
    let drawn: Vec<u8> = bits.by_ref().take(20_000).collect();
    // Loose: a fresh OS seed every run, so only catch gross breakage.
    assert!(p_of(&monobit_frequency(&drawn)) > 1e-9);
    assert!(p_of(&runs_test(&drawn)) > 1e-9);
}

#[test]
fn integers_respect_bound() {
    let mut bits = Bitstream::seeded(8, 50).unwrap();
    for n in 1..=200 {
        for _ in 0..50 {
            let v = bits.integer(n).unwrap();
            assert!((0..=n).contains(&v), "integer({n}) = {v}");
        }
    }
}

#[test]
fn integers_uniform_over_reachable_range_for_mersenne_bounds() {
    let mut bits = Bitstream::seeded(77, 100).unwrap();
    for k in 2..=8 {
        let n = (1i64 << k) - 1;
        let (lo, hi) = reachable_range(n).unwrap();
        assert_eq!(hi, (1i64 << (k - 1)) - 1);

        let samples: Vec<i64> = (0..20_000).map(|_| bits.integer(n).unwrap()).collect();
        let result = uniformity(&samples, lo, hi);
        assert!(
            p_of(&result) > ALPHA,
            "n={n}: {} (p={:?})",
            result.details,
            result.p_value
        );
    }
}

#[test]
fn integers_never_reach_bound_and_are_not_uniform_over_it() {
    // For n = 10 the construction draws three bits, so 8, 9 and 10 never
    // appear: uniform over [0, 7], not over [0, 10].
    let mut bits = Bitstream::seeded(5, 100).unwrap();
    let samples: Vec<i64> = (0..20_000).map(|_| bits.integer(10).unwrap()).collect();
    assert!(samples.iter().all(|&v| (0..=7).contains(&v)));
    assert!(p_of(&uniformity(&samples, 0, 7)) > ALPHA);
    assert!(!uniformity(&samples, 0, 10).passed);
}

#[test]
fn all_ones_stub_yields_ones_until_word_boundary() {
    struct Alternating(bool);
    impl WordSource for Alternating {
        fn fill(&mut self, _max: u64, words: &mut [u64]) {
            for w in words {
                *w = if self.0 { WORD_MAX } else { 0 };
                self.0 = !self.0;
            }
        }
    }

    let mut bits = Bitstream::with_source(Alternating(true), 4).unwrap();
    let first: Vec<u8> = bits.by_ref().take(63).collect();
    assert!(first.iter().all(|&b| b == 1));
    assert_eq!(bits.next_bit(), 0);
}

#[test]
fn shared_instance_serves_callers() {
    let bit = with_default(|bits| bits.next_bit());
    assert!(bit <= 1);
    let v = with_default(|bits| bits.integer(1000)).unwrap();
    assert!((0..=1000).contains(&v));
}
