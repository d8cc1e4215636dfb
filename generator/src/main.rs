use std::{fs::File, io::Write, path::PathBuf};

use anyhow::bail;
use clap::Parser;
use rand::{rngs::StdRng, SeedableRng};

mod generator;

/// Program to generate random job shop scheduling instances
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Number of jobs to generate
    #[arg(short, long, env, default_value_t = 10)]
    jobs: usize,

    /// Number of machines, every job visits each of them once
    #[arg(short, long, env, default_value_t = 5)]
    machines: usize,

    /// Shortest operation length
    #[arg(long, env, default_value_t = 1)]
    min_length: u32,

    /// Longest operation length
    #[arg(long, env, default_value_t = 99)]
    max_length: u32,

    /// Seed for the random number generator
    #[arg(short, long, env)]
    seed: Option<u64>,

    /// Write the instance as JSON instead of the text format
    #[arg(long, env)]
    json: bool,

    /// Pretty print generated instances in JSON
    #[arg(short, long, env)]
    pretty_json: bool,

    /// Target file for output
    file: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let args: Args = Args::parse();

    if args.min_length == 0 || args.min_length > args.max_length {
        bail!(
            "operation lengths must satisfy 0 < min ({}) <= max ({})",
            args.min_length,
            args.max_length
        );
    }

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let instance = generator::generate_instance(
        &mut rng,
        args.jobs,
        args.machines,
        args.min_length,
        args.max_length,
    );

    let mut writer = File::create(args.file)?;
    if args.pretty_json {
        serde_json::to_writer_pretty(&writer, &instance)?;
    } else if args.json {
        serde_json::to_writer(&writer, &instance)?;
    } else {
        write!(writer, "{instance}")?;
    }

    writer.flush()?;

    Ok(())
}
