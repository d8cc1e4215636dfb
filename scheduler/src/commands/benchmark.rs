use anyhow::Result;
use jssp::{scheduler, GeneticOptions};
use log::info;
use rand::{rngs::StdRng, SeedableRng};

use super::load_template;
use crate::Benchmark;

pub fn benchmark(benchmark: Benchmark) -> Result<()> {
    if !benchmark.instance_folder.is_dir() {
        anyhow::bail!("instance_folder is not a directory")
    }

    let mut paths = benchmark
        .instance_folder
        .read_dir()?
        .map(|entry| entry.map(|entry| entry.path()))
        .collect::<Result<Vec<_>, _>>()?;
    paths.retain(|path| path.is_file());
    paths.sort();

    let options = GeneticOptions {
        generations: benchmark.generations,
        parallel: true,
        ..Default::default()
    };

    let scheduling_results = paths
        .into_iter()
        .map(|path| -> Result<String> {
            let template = load_template(&path)?;
            let mut rng = match benchmark.seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            let result = scheduler(template, &options, &mut rng)?;
            info!("{path:?}: {}", result.makespan);

            Ok(format!("{path:?}: {}", result.makespan))
        })
        .collect::<Result<Vec<_>>>()?;

    std::fs::write(benchmark.output, scheduling_results.join("\n"))?;

    Ok(())
}
