use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use jssp::operators::CrossoverType;
use jssp::{scheduler, GeneticOptions, ScheduleTemplate};
use jssp_parser::parse_jssp;
use rand::{rngs::StdRng, SeedableRng};

pub fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("scheduler");
    group.sample_size(20);
    group.sampling_mode(criterion::SamplingMode::Flat);

    for file in ["ft06.txt"] {
        let contents = std::fs::read_to_string(format!("../instances/{file}")).unwrap();
        let instance = parse_jssp(contents.as_str()).unwrap();
        let template = ScheduleTemplate::from_instance(&instance).unwrap();

        let configs = vec![
            GeneticOptions {
                population_size: 50,
                generations: 100,
                crossover: CrossoverType::OnePoint,
                parallel: false,
                ..Default::default()
            },
            GeneticOptions {
                population_size: 50,
                generations: 100,
                crossover: CrossoverType::TwoPoint,
                parallel: false,
                ..Default::default()
            },
            GeneticOptions {
                population_size: 50,
                generations: 100,
                crossover: CrossoverType::OnePoint,
                parallel: true,
                ..Default::default()
            },
            GeneticOptions {
                population_size: 200,
                generations: 100,
                crossover: CrossoverType::OnePoint,
                parallel: true,
                ..Default::default()
            },
        ];

        for config in configs {
            group.bench_with_input(
                BenchmarkId::new(
                    format!(
                        "scheduler_{}",
                        if config.parallel {
                            "parallel"
                        } else {
                            "single"
                        }
                    ),
                    format!(
                        "{file}/{:?}/{}",
                        config.crossover, config.population_size
                    ),
                ),
                &config,
                |b, config| {
                    b.iter(|| {
                        let mut rng = StdRng::seed_from_u64(0);
                        scheduler(template.clone(), config, &mut rng)
                    })
                },
            );
        }
    }
    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
