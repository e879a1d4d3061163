use std::time::Instant;

use bitstream_core::{Bitstream, BitstreamStats, Result, WordSource};
use bitstream_tests::TestResult;
use serde::Serialize;

pub struct ReportCommandConfig<'a> {
    pub bits: usize,
    pub limit: Option<i64>,
    pub samples: usize,
    pub pool_size: usize,
    pub seed: Option<u64>,
    pub output_path: Option<&'a str>,
}

/// Machine-readable battery results.
#[derive(Debug, Serialize)]
pub struct Report {
    pub bits_tested: usize,
    pub seed: Option<u64>,
    pub score: f64,
    pub bit_tests: Vec<TestResult>,
    pub integers: Option<IntegerReport>,
    pub stream: BitstreamStats,
}

/// Uniformity of integers drawn with one bound, measured over the range the
/// sampler can actually reach.
#[derive(Debug, Serialize)]
pub struct IntegerReport {
    pub limit: i64,
    pub reachable: (i64, i64),
    pub samples: usize,
    pub test: TestResult,
}

pub fn run(cfg: ReportCommandConfig<'_>) {
    let mut bits = super::make_bitstream(cfg.pool_size, cfg.seed);

    println!(
        "Running bit battery on {} bits (pool of {} words)...\n",
        cfg.bits,
        bits.pool_size()
    );
    let t0 = Instant::now();
    let report = build_report(&mut bits, &cfg).unwrap_or_else(|e| super::exit_with(&e));
    let elapsed = t0.elapsed().as_secs_f64();

    println!("{}", "=".repeat(60));
    println!(
        "{:<22} {:>6} {:>10} {:>12}",
        "Test", "Grade", "p-value", "Statistic"
    );
    println!("{}", "-".repeat(60));
    for t in report.bit_tests.iter().chain(report.integers.iter().map(|i| &i.test)) {
        print_row(t);
    }
    println!("{}", "-".repeat(60));

    if let Some(ref ints) = report.integers {
        println!(
            "integer({}) covers [{}, {}]; values above {} are never produced.",
            ints.limit, ints.reachable.0, ints.reachable.1, ints.reachable.1
        );
    }
    println!(
        "Score: {:.0}/100 | bits drawn: {} | refills: {} [{:.2}s]",
        report.score, report.stream.bits_drawn, report.stream.refills, elapsed
    );

    if let Some(path) = cfg.output_path {
        let written = serde_json::to_string_pretty(&report)
            .map_err(|e| e.to_string())
            .and_then(|json| std::fs::write(path, json).map_err(|e| e.to_string()));
        match written {
            Ok(()) => println!("\nReport saved to: {path}"),
            Err(e) => eprintln!("\nFailed to write report to {path}: {e}"),
        }
    }
}

fn print_row(t: &TestResult) {
    let pval = t
        .p_value
        .map(|p| format!("{p:.6}"))
        .unwrap_or_else(|| "-".to_string());
    println!(
        "{:<22} {:>6} {:>10} {:>12.4}   {}",
        t.name, t.grade, pval, t.statistic, t.details
    );
}

/// Draw bits (and optionally integers) from `bits` and run the battery.
pub fn build_report<S: WordSource>(
    bits: &mut Bitstream<S>,
    cfg: &ReportCommandConfig<'_>,
) -> Result<Report> {
    let reachable = cfg
        .limit
        .map(super::integers::reachable_for_limit)
        .transpose()?;
    let drawn: Vec<u8> = bits.by_ref().take(cfg.bits).collect();
    let bit_tests = bitstream_tests::run_bit_tests(&drawn);

    let integers = match cfg.limit.zip(reachable) {
        Some((limit, reachable)) => {
            let values = super::integers::draw_integers(bits, limit, cfg.samples)?;
            let test = bitstream_tests::uniformity(&values, reachable.0, reachable.1);
            Some(IntegerReport {
                limit,
                reachable,
                samples: values.len(),
                test,
            })
        }
        None => None,
    };

    let mut all: Vec<TestResult> = bit_tests.clone();
    all.extend(integers.iter().map(|i| i.test.clone()));
    Ok(Report {
        bits_tested: drawn.len(),
        seed: cfg.seed,
        score: bitstream_tests::calculate_quality_score(&all),
        bit_tests,
        integers,
        stream: bits.stats(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(limit: Option<i64>) -> ReportCommandConfig<'static> {
        ReportCommandConfig {
            bits: 10_000,
            limit,
            samples: 4_000,
            pool_size: 16,
            seed: Some(31),
            output_path: None,
        }
    }

    #[test]
    fn test_report_bits_only() {
        let cfg = config(None);
        let mut bits = Bitstream::seeded(31, 16).unwrap();
        let report = build_report(&mut bits, &cfg).unwrap();
        assert_eq!(report.bits_tested, 10_000);
        assert_eq!(report.bit_tests.len(), 3);
        assert!(report.integers.is_none());
        assert_eq!(report.stream.bits_drawn, 10_000);
    }

    #[test]
    fn test_report_with_integers() {
        let cfg = config(Some(100));
        let mut bits = Bitstream::seeded(31, 16).unwrap();
        let report = build_report(&mut bits, &cfg).unwrap();
        let ints = report.integers.unwrap();
        assert_eq!(ints.reachable, (0, 63));
        assert_eq!(ints.samples, 4_000);
        // Six bits per integer on top of the bit battery.
        assert_eq!(report.stream.bits_drawn, 10_000 + 6 * 4_000);
    }

    #[test]
    fn test_report_rejects_bad_limit() {
        let cfg = config(Some(0));
        let mut bits = Bitstream::seeded(31, 16).unwrap();
        assert!(build_report(&mut bits, &cfg).is_err());
    }

    #[test]
    fn test_report_rejects_bad_limit_without_samples() {
        let cfg = ReportCommandConfig {
            samples: 0,
            ..config(Some(0))
        };
        let mut bits = Bitstream::seeded(31, 16).unwrap();
        assert_eq!(
            build_report(&mut bits, &cfg).unwrap_err(),
            bitstream_core::BitstreamError::InvalidBound { n: 0 }
        );
        assert_eq!(bits.stats().bits_drawn, 0, "rejected before drawing");
    }

    #[test]
    fn test_report_serializes() {
        let cfg = config(Some(7));
        let mut bits = Bitstream::seeded(31, 16).unwrap();
        let report = build_report(&mut bits, &cfg).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["bits_tested"], 10_000);
        assert_eq!(json["integers"]["reachable"], serde_json::json!([0, 3]));
        assert_eq!(json["stream"]["pool_size"], 16);
    }
}
