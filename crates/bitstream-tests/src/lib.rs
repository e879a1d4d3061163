//! Statistical battery for random bit streams.
//!
//! Frequency and runs tests in the style of NIST SP 800-22, applied directly to
//! bit sequences (one `u8` per bit, each 0 or 1), plus a chi-squared
//! goodness-of-fit test for bounded integer samples. Each test returns a
//! [`TestResult`] with a p-value (where applicable), a pass/fail determination,
//! and a letter grade (A through F).

use serde::Serialize;
use statrs::distribution::{ChiSquared, ContinuousCDF};
use statrs::function::erf::erfc;

// ═══════════════════════════════════════════════════════════════════════════════
// Core types
// ═══════════════════════════════════════════════════════════════════════════════

/// Result of a single randomness test.
#[derive(Debug, Clone, Serialize)]
pub struct TestResult {
    pub name: String,
    pub passed: bool,
    pub p_value: Option<f64>,
    pub statistic: f64,
    pub details: String,
    pub grade: char,
}

/// A test passes when its p-value reaches this level.
pub const PASS_LEVEL: f64 = 0.01;

/// Grade bands: the lowest p-value each grade accepts, and its score weight.
/// Anything below the last band, or a test with no p-value, grades `F` (0).
const GRADE_BANDS: [(f64, char, f64); 4] = [
    (0.1, 'A', 100.0),
    (0.01, 'B', 75.0),
    (0.001, 'C', 50.0),
    (0.0001, 'D', 25.0),
];

impl TestResult {
    fn from_p(name: &str, p: Option<f64>, statistic: f64, details: String) -> Self {
        let grade = p
            .and_then(|p| GRADE_BANDS.iter().find(|(floor, _, _)| p >= *floor))
            .map_or('F', |&(_, grade, _)| grade);
        TestResult {
            name: name.to_string(),
            passed: p.is_some_and(|p| p >= PASS_LEVEL),
            p_value: p,
            statistic,
            details,
            grade,
        }
    }

    /// Weight of this result's grade in [`calculate_quality_score`].
    pub fn score(&self) -> f64 {
        GRADE_BANDS
            .iter()
            .find(|(_, grade, _)| *grade == self.grade)
            .map_or(0.0, |&(_, _, score)| score)
    }

    fn failed(name: &str, details: String) -> Self {
        TestResult {
            name: name.to_string(),
            passed: false,
            p_value: None,
            statistic: 0.0,
            details,
            grade: 'F',
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Helpers
// ═══════════════════════════════════════════════════════════════════════════════

/// Pack bits into bytes, MSB first. A trailing partial byte is zero-padded.
pub fn pack_bits(bits: &[u8]) -> Vec<u8> {
    bits.chunks(8)
        .map(|chunk| {
            chunk
                .iter()
                .enumerate()
                .fold(0u8, |acc, (i, &b)| acc | ((b & 1) << (7 - i)))
        })
        .collect()
}

/// Return a failing `TestResult` when data is too short.
fn insufficient(name: &str, needed: usize, got: usize) -> TestResult {
    TestResult::failed(name, format!("Insufficient data: need {needed}, got {got}"))
}

/// Upper tail of a chi-squared distribution, `None` for degenerate `df`.
fn chi2_sf(df: f64, statistic: f64) -> Option<f64> {
    ChiSquared::new(df).ok().map(|dist| dist.sf(statistic))
}

fn count_ones(bits: &[u8]) -> usize {
    bits.iter().filter(|&&b| b == 1).count()
}

// ═══════════════════════════════════════════════════════════════════════════════
// Bit tests
// ═══════════════════════════════════════════════════════════════════════════════

/// Monobit frequency -- proportion of 1s vs 0s should be ~50%.
pub fn monobit_frequency(bits: &[u8]) -> TestResult {
    let name = "Monobit Frequency";
    let n = bits.len();
    if n < 100 {
        return insufficient(name, 100, n);
    }
    let s = 2 * count_ones(bits) as i64 - n as i64;
    let s_obs = (s as f64).abs() / (n as f64).sqrt();
    let p = erfc(s_obs / 2.0_f64.sqrt());
    TestResult::from_p(name, Some(p), s_obs, format!("S={s}, n={n}"))
}

/// Block frequency -- proportion of 1s within 128-bit blocks. Chi-squared test.
pub fn block_frequency(bits: &[u8]) -> TestResult {
    let name = "Block Frequency";
    let block_size: usize = 128;
    let n = bits.len();
    let num_blocks = n / block_size;
    if num_blocks < 10 {
        return insufficient(name, block_size * 10, n);
    }
    let chi2 = 4.0
        * block_size as f64
        * bits
            .chunks_exact(block_size)
            .map(|block| {
                let proportion = count_ones(block) as f64 / block_size as f64;
                (proportion - 0.5) * (proportion - 0.5)
            })
            .sum::<f64>();
    let p = chi2_sf(num_blocks as f64, chi2);
    TestResult::from_p(name, p, chi2, format!("blocks={num_blocks}, M={block_size}"))
}

/// Runs test -- number of uninterrupted runs of 0s or 1s.
pub fn runs_test(bits: &[u8]) -> TestResult {
    let name = "Runs Test";
    let n = bits.len();
    if n < 100 {
        return insufficient(name, 100, n);
    }
    let prop = count_ones(bits) as f64 / n as f64;
    if (prop - 0.5).abs() >= 2.0 / (n as f64).sqrt() {
        return TestResult {
            p_value: Some(0.0),
            ..TestResult::failed(name, format!("Pre-test failed: proportion={prop:.4}"))
        };
    }
    let runs = 1 + bits.windows(2).filter(|w| w[0] != w[1]).count();
    let expected = 2.0 * n as f64 * prop * (1.0 - prop) + 1.0;
    let std = 2.0 * (2.0 * n as f64).sqrt() * prop * (1.0 - prop);
    if std < 1e-10 {
        return TestResult {
            p_value: Some(0.0),
            ..TestResult::failed(name, "Zero variance".to_string())
        };
    }
    let z = (runs as f64 - expected).abs() / std;
    let p = erfc(z / 2.0_f64.sqrt());
    TestResult::from_p(
        name,
        Some(p),
        z,
        format!("runs={runs}, expected={expected:.0}"),
    )
}

/// Run the bit battery on a bit sequence.
pub fn run_bit_tests(bits: &[u8]) -> Vec<TestResult> {
    let tests: [fn(&[u8]) -> TestResult; 3] = [monobit_frequency, block_frequency, runs_test];
    tests.iter().map(|test_fn| test_fn(bits)).collect()
}

// ═══════════════════════════════════════════════════════════════════════════════
// Integer tests
// ═══════════════════════════════════════════════════════════════════════════════

/// Largest number of bins [`uniformity`] will tabulate.
pub const MAX_UNIFORMITY_BINS: usize = 1 << 16;

/// The interval `[0, 2^b - 1]` that bit-assembled integers with bound `n`
/// actually cover, where `b` counts the doublings of a mask starting at 1 that
/// stay strictly below `n`. `None` for `n <= 0`.
///
/// For `n = 2^k - 1` this is `[0, 2^(k-1) - 1]`; `n` itself is never reached.
pub fn reachable_range(n: i64) -> Option<(i64, i64)> {
    if n <= 0 {
        return None;
    }
    let n = n as u64;
    let mut b = 0u32;
    let mut m: u64 = 2;
    while m < n {
        b += 1;
        m <<= 1;
    }
    Some((0, (1i64 << b) - 1))
}

/// Chi-squared goodness of fit of integer samples against the uniform
/// distribution over `[lo, hi]`. Any sample outside the interval fails the
/// test outright.
pub fn uniformity(samples: &[i64], lo: i64, hi: i64) -> TestResult {
    let name = "Integer Uniformity";
    if hi < lo {
        return TestResult::failed(name, format!("Empty interval [{lo}, {hi}]"));
    }
    let Some(bins) = usize::try_from(hi.abs_diff(lo))
        .ok()
        .and_then(|span| span.checked_add(1))
        .filter(|&bins| bins <= MAX_UNIFORMITY_BINS)
    else {
        return TestResult::failed(
            name,
            format!("Interval [{lo}, {hi}] exceeds {MAX_UNIFORMITY_BINS} bins"),
        );
    };
    let n = samples.len();
    if n < 5 * bins {
        return insufficient(name, 5 * bins, n);
    }

    let mut hist = vec![0u64; bins];
    for &v in samples {
        if !(lo..=hi).contains(&v) {
            return TestResult {
                p_value: Some(0.0),
                ..TestResult::failed(name, format!("Sample {v} outside [{lo}, {hi}]"))
            };
        }
        hist[(v - lo) as usize] += 1;
    }
    if bins == 1 {
        return TestResult::from_p(name, Some(1.0), 0.0, format!("n={n}, single bin"));
    }

    let expected = n as f64 / bins as f64;
    let chi2: f64 = hist
        .iter()
        .map(|&c| {
            let diff = c as f64 - expected;
            diff * diff / expected
        })
        .sum();
    let p = chi2_sf((bins - 1) as f64, chi2);
    TestResult::from_p(
        name,
        p,
        chi2,
        format!("n={n}, bins={bins}, expected_per_bin={expected:.1}"),
    )
}

/// Mean grade weight over `results` on a 0-100 scale; 0 when there are none.
pub fn calculate_quality_score(results: &[TestResult]) -> f64 {
    match results.len() {
        0 => 0.0,
        n => results.iter().map(TestResult::score).sum::<f64>() / n as f64,
    }
}
