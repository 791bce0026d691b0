//! # Sequence Demo
//!
//! Writes a run of integers into a ring buffer, dumps it, then reads
//! everything back out. Only the last `capacity` integers survive.
//!
//! Run with: `cargo run --example sequence -- --capacity 8 --count 16`

use anyhow::Result;
use clap::Parser;
use log::LevelFilter;

use oneslot_ring::{init_logging, LogConfig, RingBuffer, RingConfig};

#[derive(Parser, Debug)]
#[command(about = "Write a sequence of integers through a ring buffer")]
struct Args {
    /// Usable slots in the buffer
    #[arg(short, long, default_value_t = 100)]
    capacity: usize,

    /// How many integers to write (1..=count)
    #[arg(short = 'n', long, default_value_t = 1000)]
    count: i64,

    /// Wipe slots as soon as they are read or evicted
    #[arg(long)]
    clear_on_vacate: bool,

    /// Log buffer internals
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose {
        LevelFilter::Trace
    } else {
        LevelFilter::Info
    };
    init_logging(&LogConfig::with_level(level));

    let config = RingConfig::new(args.capacity).with_clear_on_vacate(args.clear_on_vacate);
    let mut buffer: RingBuffer<i64> = RingBuffer::with_config(config)?;

    println!("** Initial ring buffer **");
    println!("{}\n", buffer.dump());

    for value in 1..=args.count {
        buffer.write(value);
    }

    println!("** After {} sequential writes **", args.count);
    println!("{}\n", buffer.dump());

    println!("** Read out all values **");
    let values: Vec<String> = buffer
        .drain()
        .filter_map(|element| element.into_value())
        .map(|value| value.to_string())
        .collect();
    println!("{}\n", values.join(" "));

    println!("** After read until empty **");
    println!("{}", buffer.dump());

    Ok(())
}
