//! # Text Replay Demo
//!
//! Streams a file through a ring buffer one byte at a time, then prints
//! what is left: the tail of the file, `capacity` bytes long.
//!
//! Run with: `cargo run --example text_replay -- hamlet.txt`

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use oneslot_ring::{init_logging, LogConfig, RingBuffer, RingConfig};

#[derive(Parser, Debug)]
#[command(about = "Keep the last N bytes of a file in a ring buffer")]
struct Args {
    /// File to stream
    path: PathBuf,

    /// Bytes to keep
    #[arg(short, long, default_value_t = 935)]
    capacity: usize,

    /// Wipe slots as soon as they are read or evicted
    #[arg(long)]
    clear_on_vacate: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&LogConfig::default());

    let data = fs::read(&args.path)
        .with_context(|| format!("Failed to read {}", args.path.display()))?;

    let config = RingConfig::new(args.capacity).with_clear_on_vacate(args.clear_on_vacate);
    let mut buffer: RingBuffer<u8> = RingBuffer::with_config(config)?;

    for byte in &data {
        buffer.write(*byte);
    }

    let tail: Vec<u8> = buffer
        .drain()
        .filter_map(|element| element.into_value())
        .collect();
    print!("{}", String::from_utf8_lossy(&tail));
    println!();

    info!(
        "Streamed {} bytes, kept the last {}",
        data.len(),
        tail.len()
    );

    Ok(())
}
