#![forbid(unsafe_code)]
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::Verbosity;
use jssp::operators::CrossoverType;
use log::{debug, error};

mod commands;
mod render;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
/// Genetic job shop scheduler
struct App {
    #[command(flatten)]
    verbose: Verbosity,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search a schedule for a given job shop instance
    Schedule(Schedule),
    /// Print the size and the bounds of a job shop instance
    Bounds {
        #[arg(required = true)]
        path: PathBuf,
    },
    /// Schedule every instance of a folder and write the makespans to a file
    Benchmark(Benchmark),
}

#[derive(Args, Debug)]
pub struct Schedule {
    #[arg(required = true)]
    pub path: PathBuf,

    /// JSON file with genetic options, flags take precedence over it
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[arg(short, long)]
    pub population_size: Option<usize>,

    #[arg(short, long)]
    pub generations: Option<usize>,

    #[arg(long, value_enum)]
    pub crossover: Option<Crossover>,

    /// Chance in percent to mutate each specimen per generation
    #[arg(short, long)]
    pub mutation_probability: Option<u8>,

    #[arg(long)]
    pub min_delta: Option<i64>,

    #[arg(long)]
    pub max_delta: Option<i64>,

    /// Keep the middle specimen out of the breeding slots
    #[arg(long)]
    pub no_elitist_swap: bool,

    /// Maximum number of conflict resolution passes per schedule
    #[arg(long)]
    pub repair_limit: Option<usize>,

    #[arg(long)]
    pub parallel: bool,

    /// Worker threads for parallel evaluation, defaults to the number of cores
    #[arg(short, long)]
    pub workers: Option<usize>,

    /// Stop the search after this many seconds
    #[arg(short, long)]
    pub time_limit: Option<u64>,

    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Write the best schedule as JSON
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    #[arg(long, requires = "output")]
    pub pretty_json: bool,

    /// Print every operation and the tracks before the timeline
    #[arg(short, long)]
    pub listing: bool,
}

#[derive(Args, Debug)]
pub struct Benchmark {
    #[arg(required = true)]
    pub instance_folder: PathBuf,

    #[arg(required = true)]
    pub output: PathBuf,

    #[arg(short, long, default_value_t = 1000)]
    pub generations: usize,

    #[arg(short, long)]
    pub seed: Option<u64>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Crossover {
    OnePoint,
    TwoPoint,
}

impl From<Crossover> for CrossoverType {
    fn from(crossover: Crossover) -> Self {
        match crossover {
            Crossover::OnePoint => CrossoverType::OnePoint,
            Crossover::TwoPoint => CrossoverType::TwoPoint,
        }
    }
}

fn main() {
    let args: App = App::parse();

    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    debug!("{args:?}");

    if let Err(err) = match args.command {
        Commands::Schedule(schedule) => commands::schedule(schedule),
        Commands::Bounds { path } => commands::bounds(path),
        Commands::Benchmark(benchmark) => commands::benchmark(benchmark),
    } {
        error!("An error occurred: {err:#}");
        std::process::exit(1);
    }
}
