use std::{fs::File, time::Instant};

use anyhow::{Context, Result};
use jssp::{scheduler, GeneticOptions};
use log::info;
use rand::{rngs::StdRng, SeedableRng};

use super::load_template;
use crate::render::{Listing, Timeline};
use crate::Schedule;

pub fn schedule(args: Schedule) -> Result<()> {
    let options = genetic_options(&args)?;
    let template = load_template(&args.path)?;

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let start_time = Instant::now();
    let result = scheduler(template.clone(), &options, &mut rng)?;
    info!("search took {:?}", start_time.elapsed());

    let mut template = template;
    template.evaluate(&result.schedule)?;

    if args.listing {
        println!("{}", Listing(&template));
    }
    print!("{}", Timeline(&template));

    if let Some(output) = args.output {
        let writer = File::create(&output)?;
        if args.pretty_json {
            serde_json::to_writer_pretty(&writer, &result)?;
        } else {
            serde_json::to_writer(&writer, &result)?;
        }
        info!("Wrote result to: {output:?}");
    }

    Ok(())
}

/// Options from the config file, or the defaults, with every given flag applied on top.
fn genetic_options(args: &Schedule) -> Result<GeneticOptions> {
    let mut options = match &args.config {
        Some(path) => {
            let file = File::open(path).with_context(|| format!("Failed to open {path:?}"))?;
            serde_json::from_reader(file)
                .with_context(|| format!("Failed to read genetic options from {path:?}"))?
        }
        None => GeneticOptions::default(),
    };

    if let Some(population_size) = args.population_size {
        options.population_size = population_size;
    }
    if let Some(generations) = args.generations {
        options.generations = generations;
    }
    if let Some(crossover) = args.crossover {
        options.crossover = crossover.into();
    }
    if let Some(mutation_probability) = args.mutation_probability {
        options.mutation_probability = mutation_probability;
    }
    if let Some(min_delta) = args.min_delta {
        options.mutation.min_delta = min_delta;
    }
    if let Some(max_delta) = args.max_delta {
        options.mutation.max_delta = max_delta;
    }
    if args.no_elitist_swap {
        options.elitist_swap = false;
    }
    if let Some(repair_limit) = args.repair_limit {
        options.repair_limit = repair_limit;
    }
    if args.parallel {
        options.parallel = true;
    }
    if args.workers.is_some() {
        options.workers = args.workers;
    }
    if args.time_limit.is_some() {
        options.schedule_duration = args.time_limit;
    }

    options.validate()?;

    Ok(options)
}
