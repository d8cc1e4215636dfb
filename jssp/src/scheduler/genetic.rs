use std::{cmp::Ordering, time::Instant};

use log::{debug, info};
use rand::Rng;
use rayon::ThreadPoolBuilder;

use crate::error::ScheduleError;
use crate::template::ScheduleTemplate;

use super::population::{Population, Specimen};
use super::{GeneticOptions, OptimizedSchedule};

pub fn scheduler<R: Rng + ?Sized>(
    mut template: ScheduleTemplate,
    options: &GeneticOptions,
    rng: &mut R,
) -> Result<OptimizedSchedule, ScheduleError> {
    options.validate()?;
    template.set_repair_limit(options.repair_limit);
    info!("options: {options:?}");

    let horizon = template.horizon();
    let lower_bound = template.absolute_lowest_bound();
    info!("horizon: {horizon}, lower bound: {lower_bound}");

    let pool = if options.parallel {
        let workers = options.workers.unwrap_or_else(num_cpus::get);
        info!("evaluating on {workers} worker threads");
        Some(ThreadPoolBuilder::new().num_threads(workers).build()?)
    } else {
        None
    };
    let pool = pool.as_ref();

    let start_time = Instant::now();

    let mut population =
        Population::random(&mut template, options.population_size, rng, pool)?;
    let mut best: Option<Specimen> = None;
    let mut generations_run = 0;

    for generation in 0..options.generations {
        let evaluated = population.evaluate_pending(&mut template, pool)?;
        population.sort_by_fitness();
        keep_best(&mut best, &population);
        generations_run = generation + 1;

        let best_makespan = best
            .as_ref()
            .and_then(Specimen::evaluation)
            .map(|evaluation| evaluation.makespan);
        debug!("generation: {generation} - evaluated: {evaluated} - best makespan: {best_makespan:?}");

        if best_makespan == Some(lower_bound) {
            info!("Stopping search as lower bound has been reached");
            break;
        }

        if let Some(schedule_duration) = options.schedule_duration {
            if start_time.elapsed().as_secs() > schedule_duration {
                info!("Stopping search as time limit has passed");
                break;
            }
        }

        if options.elitist_swap {
            population.swap_middle_and_last();
        }
        population.breed(&mut template, options.crossover, generation, rng)?;
        population.mutate(
            &mut template,
            &options.mutation,
            options.mutation_probability,
            rng,
        )?;
    }

    // children of the last generation
    population.evaluate_pending(&mut template, pool)?;
    population.sort_by_fitness();
    keep_best(&mut best, &population);

    let best = best.ok_or_else(|| {
        ScheduleError::InvalidOptions("population ended without an evaluated specimen".to_string())
    })?;
    let evaluation = best.evaluation().ok_or_else(|| {
        ScheduleError::InvalidOptions("best specimen has not been evaluated".to_string())
    })?;

    info!("best_schedule: {:?}", best.chromosome);
    info!(
        "best makespan: {} (fitness {:.4}) from generation {} after {generations_run} generations",
        evaluation.makespan, evaluation.fitness, best.generation
    );

    Ok(OptimizedSchedule {
        schedule: best.chromosome,
        makespan: evaluation.makespan,
        fitness: evaluation.fitness,
        generation: best.generation,
        generations_run,
        horizon,
        lower_bound,
    })
}

/// Mutation rewrites specimens in place, so the best one is kept as a copy.
fn keep_best(best: &mut Option<Specimen>, population: &Population) {
    if let Some(candidate) = population.best() {
        if best
            .as_ref()
            .map_or(true, |current| candidate.rank(current) == Ordering::Greater)
        {
            *best = Some(candidate.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use jssp_parser::parse_jssp;
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::operators::CrossoverType;
    use crate::test_utils::{example_template, random_template};

    fn small_options() -> GeneticOptions {
        GeneticOptions {
            population_size: 10,
            generations: 25,
            ..Default::default()
        }
    }

    fn assert_valid_result(template: &mut ScheduleTemplate, result: &OptimizedSchedule) {
        template.fill_start_times(&result.schedule).unwrap();
        assert!(template.is_feasible());
        assert_eq!(template.total_runtime(), result.makespan);
        assert!(result.makespan >= result.lower_bound);
        assert!((0.0..=1.0).contains(&result.fitness));
    }

    #[test]
    fn example_scenario() {
        let mut rng = StdRng::seed_from_u64(42);

        let result = scheduler(example_template(), &small_options(), &mut rng).unwrap();

        assert_eq!(result.horizon, 10);
        assert_eq!(result.lower_bound, 6);
        assert_valid_result(&mut example_template(), &result);
    }

    #[test]
    fn ft06() {
        let instance = parse_jssp(include_str!("../../../instances/ft06.txt")).unwrap();
        let options = GeneticOptions {
            population_size: 20,
            generations: 30,
            crossover: CrossoverType::TwoPoint,
            ..Default::default()
        };
        let mut rng = StdRng::seed_from_u64(7);

        let template = ScheduleTemplate::from_instance(&instance).unwrap();
        let result = scheduler(template.clone(), &options, &mut rng).unwrap();

        assert_eq!(result.schedule.len(), 36);
        assert_eq!(result.horizon, 197);
        assert!(result.generations_run <= 30);
        assert!(result.generation <= result.generations_run);
        assert_valid_result(&mut template.clone(), &result);
    }

    #[test]
    fn never_worse_than_best_initial_specimen() {
        let instance = parse_jssp(include_str!("../../../instances/ft06.txt")).unwrap();
        let template = ScheduleTemplate::from_instance(&instance).unwrap();
        let options = GeneticOptions {
            population_size: 20,
            generations: 40,
            ..Default::default()
        };

        for seed in 0..3 {
            // the driver draws its initial population first
            let mut initial = Population::random(
                &mut template.clone(),
                options.population_size,
                &mut StdRng::seed_from_u64(seed),
                None,
            )
            .unwrap();
            initial.evaluate_pending(&mut template.clone(), None).unwrap();
            let initial_best = initial.best().and_then(Specimen::makespan).unwrap();

            let result =
                scheduler(template.clone(), &options, &mut StdRng::seed_from_u64(seed)).unwrap();

            assert!(
                result.makespan <= initial_best,
                "seed {seed}: {} > {initial_best}",
                result.makespan
            );
        }
    }

    #[test]
    fn zero_generations_returns_best_initial_specimen() {
        let mut rng = StdRng::seed_from_u64(3);
        let template = random_template(&mut rng, 3, 3);
        let options = GeneticOptions {
            generations: 0,
            ..small_options()
        };

        let result = scheduler(template.clone(), &options, &mut rng).unwrap();

        assert_eq!(result.generations_run, 0);
        assert_eq!(result.generation, 0);
        assert_valid_result(&mut template.clone(), &result);
    }

    #[test]
    fn same_seed_same_result_with_and_without_threads() {
        let template = random_template(&mut StdRng::seed_from_u64(11), 5, 4);
        let sequential = small_options();
        let parallel = GeneticOptions {
            parallel: true,
            workers: Some(3),
            ..small_options()
        };

        let first = scheduler(template.clone(), &sequential, &mut StdRng::seed_from_u64(5)).unwrap();
        let second = scheduler(template.clone(), &sequential, &mut StdRng::seed_from_u64(5)).unwrap();
        let threaded = scheduler(template, &parallel, &mut StdRng::seed_from_u64(5)).unwrap();

        assert_eq!(first, second);
        assert_eq!(first, threaded);
    }

    #[test]
    fn rejects_invalid_options() {
        let mut rng = StdRng::seed_from_u64(1);
        let options = GeneticOptions {
            population_size: 2,
            ..Default::default()
        };

        let result = scheduler(example_template(), &options, &mut rng);
        assert!(matches!(result, Err(ScheduleError::InvalidOptions(_))));
    }

    #[test]
    fn best_is_never_lost() {
        let mut best = None;
        let mut population = Population::from_specimens(vec![Specimen::new(vec![0, 4, 0, 4], 0)]);
        population
            .evaluate_pending(&mut example_template(), None)
            .unwrap();
        keep_best(&mut best, &population);

        let mut worse = Population::from_specimens(vec![Specimen::new(vec![0, 3, 5, 9], 1)]);
        worse.evaluate_pending(&mut example_template(), None).unwrap();
        keep_best(&mut best, &worse);

        let best = best.unwrap();
        assert_eq!(best.chromosome, vec![0, 4, 0, 4]);
        assert_eq!(best.fitness(), 1.0);
    }

    #[test]
    fn shorter_makespan_wins_at_zero_fitness() {
        let mut best = None;

        // both end at or after the horizon of 10
        let mut later = Population::from_specimens(vec![Specimen::new(vec![0, 3, 7, 11], 0)]);
        later.evaluate_pending(&mut example_template(), None).unwrap();
        keep_best(&mut best, &later);

        let mut earlier = Population::from_specimens(vec![Specimen::new(vec![0, 3, 5, 9], 1)]);
        earlier.evaluate_pending(&mut example_template(), None).unwrap();
        keep_best(&mut best, &earlier);
        keep_best(&mut best, &later);

        let best = best.unwrap();
        assert_eq!(best.fitness(), 0.0);
        assert_eq!(best.makespan(), Some(10));
        assert_eq!(best.chromosome, vec![0, 3, 5, 9]);
    }
}
