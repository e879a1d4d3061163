//! Basic bit source example.
//!
//! Flips coins and runs a toy infection step on a ring of nodes using a
//! pooled bit source, then prints the pool counters.
//!
//! Run: `cargo run --example basic`

use bitstream_core::Bitstream;

fn main() {
    // Pool of 100 words seeded from the OS
    let mut bits = Bitstream::new(100).expect("pool size is non-zero");

    let heads = bits.by_ref().take(1000).filter(|&b| b == 1).count();
    println!("Heads in 1000 flips: {heads}");

    // Each infected node picks a random neighbour offset in [0, 3]
    let mut infected = vec![false; 32];
    infected[0] = true;
    for _ in 0..8 {
        let sources: Vec<usize> = (0..infected.len()).filter(|&i| infected[i]).collect();
        for i in sources {
            let offset = bits.integer(5).expect("bound is positive") as usize;
            infected[(i + offset) % 32] = true;
        }
    }
    let reached = infected.iter().filter(|&&x| x).count();
    println!("Nodes infected after 8 steps: {reached}/32");

    let stats = bits.stats();
    println!(
        "\nBits drawn: {} | refills: {} | cursor: word {} bit {}",
        stats.bits_drawn, stats.refills, stats.word_index, stats.bit_index
    );
}
