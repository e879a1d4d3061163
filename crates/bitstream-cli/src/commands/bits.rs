use std::io::Write;

use bitstream_core::{Bitstream, WordSource};

/// Bits pulled from the stream per write.
const CHUNK_BITS: usize = 4096;

pub fn run(count: usize, format: &str, pool_size: usize, seed: Option<u64>) {
    let mut bits = super::make_bitstream(pool_size, seed);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if let Err(e) = write_bits(&mut bits, count, format, &mut out) {
        // A closed downstream pipe (e.g. `head`) ends the stream quietly.
        if e.kind() != std::io::ErrorKind::BrokenPipe {
            super::exit_with(&e);
        }
    }
    log::debug!("bits command finished: {:?}", bits.stats());
}

/// Draw `count` bits and write them to `out` in the given format.
pub fn write_bits<S: WordSource, W: Write>(
    bits: &mut Bitstream<S>,
    count: usize,
    format: &str,
    out: &mut W,
) -> std::io::Result<()> {
    let mut remaining = count;
    while remaining > 0 {
        let want = remaining.min(CHUNK_BITS);
        let chunk: Vec<u8> = bits.by_ref().take(want).collect();
        match format {
            "packed" => out.write_all(&bitstream_tests::pack_bits(&chunk))?,
            _ => {
                let text: String = chunk.iter().map(|&b| if b == 1 { '1' } else { '0' }).collect();
                out.write_all(text.as_bytes())?;
            }
        }
        remaining -= want;
    }
    if format != "packed" {
        out.write_all(b"\n")?;
    }
    out.flush()
}
