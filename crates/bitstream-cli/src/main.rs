//! CLI for bitstream: pooled random bits on stdout.

mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "bitstream")]
#[command(about = "bitstream — cheap random bits and small integers from a pooled generator")]
#[command(version = bitstream_core::VERSION)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Stream random bits to stdout (pipe-friendly)
    Bits {
        /// Number of bits to emit
        #[arg(long, default_value = "64")]
        count: usize,

        /// Output format: text (one '0'/'1' per bit) or packed (bytes, MSB first)
        #[arg(long, default_value = "text", value_parser = ["text", "packed"])]
        format: String,

        /// Words per pool refill
        #[arg(long, default_value_t = bitstream_core::DEFAULT_POOL_SIZE)]
        pool_size: usize,

        /// Seed for a reproducible stream (default: OS entropy)
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Draw bounded integers in [0, limit], one per line
    Integers {
        /// Upper bound passed to the integer sampler
        #[arg(long, allow_hyphen_values = true)]
        limit: i64,

        /// Number of integers to draw
        #[arg(long, default_value = "10")]
        count: usize,

        /// Words per pool refill
        #[arg(long, default_value_t = bitstream_core::DEFAULT_POOL_SIZE)]
        pool_size: usize,

        /// Seed for a reproducible stream (default: OS entropy)
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Run the statistical battery against a live stream
    Report {
        /// Number of bits to test
        #[arg(long, default_value = "100000")]
        bits: usize,

        /// Also test integers drawn with this bound against their reachable range
        #[arg(long, allow_hyphen_values = true)]
        limit: Option<i64>,

        /// Number of integers to draw when --limit is given
        #[arg(long, default_value = "20000")]
        samples: usize,

        /// Words per pool refill
        #[arg(long, default_value_t = bitstream_core::DEFAULT_POOL_SIZE)]
        pool_size: usize,

        /// Seed for a reproducible stream (default: OS entropy)
        #[arg(long)]
        seed: Option<u64>,

        /// Write machine-readable report as JSON
        #[arg(long)]
        output: Option<String>,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Bits {
            count,
            format,
            pool_size,
            seed,
        } => commands::bits::run(count, &format, pool_size, seed),
        Commands::Integers {
            limit,
            count,
            pool_size,
            seed,
        } => commands::integers::run(limit, count, pool_size, seed),
        Commands::Report {
            bits,
            limit,
            samples,
            pool_size,
            seed,
            output,
        } => commands::report::run(commands::report::ReportCommandConfig {
            bits,
            limit,
            samples,
            pool_size,
            seed,
            output_path: output.as_deref(),
        }),
    }
}
