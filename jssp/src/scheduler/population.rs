use std::cmp::Ordering;

use log::trace;
use rand::Rng;
use rayon::{prelude::*, ThreadPool};

use crate::error::ScheduleError;
use crate::operators::{mutate, CrossoverType, MutationOptions};
use crate::template::{Chromosome, Evaluation, ScheduleTemplate, Time};

#[derive(Debug, Clone, PartialEq)]
pub struct Specimen {
    pub chromosome: Chromosome,
    /// Generation the chromosome was created for
    pub generation: usize,
    evaluation: Option<Evaluation>,
}

impl Specimen {
    pub fn new(chromosome: Chromosome, generation: usize) -> Self {
        Self {
            chromosome,
            generation,
            evaluation: None,
        }
    }

    pub fn needs_evaluation(&self) -> bool {
        self.evaluation.is_none()
    }

    pub fn evaluation(&self) -> Option<Evaluation> {
        self.evaluation
    }

    /// Fitness of the last evaluation, 0.0 while pending
    pub fn fitness(&self) -> f64 {
        self.evaluation.map_or(0.0, |evaluation| evaluation.fitness)
    }

    pub fn makespan(&self) -> Option<Time> {
        self.evaluation.map(|evaluation| evaluation.makespan)
    }

    pub fn evaluate(&mut self, template: &mut ScheduleTemplate) -> Result<(), ScheduleError> {
        self.evaluation = Some(template.evaluate(&self.chromosome)?);
        Ok(())
    }

    /// Orders by fitness, then by shorter makespan, so specimens beyond the horizon
    /// still compete. Pending specimens rank below every evaluated one.
    pub fn rank(&self, other: &Specimen) -> Ordering {
        self.fitness()
            .total_cmp(&other.fitness())
            .then_with(|| other.makespan_or_max().cmp(&self.makespan_or_max()))
    }

    fn makespan_or_max(&self) -> Time {
        self.makespan().unwrap_or(Time::MAX)
    }
}

#[derive(Debug, Clone)]
pub struct Population {
    specimens: Vec<Specimen>,
}

impl Population {
    pub fn from_specimens(specimens: Vec<Specimen>) -> Self {
        Self { specimens }
    }

    /// Random start times in `[0, absolute_lowest_bound]`, repaired into feasible schedules.
    ///
    /// The raw chromosomes are drawn sequentially so the result only depends on `rng`,
    /// repairing happens on `pool` when one is given.
    pub fn random<R: Rng + ?Sized>(
        template: &mut ScheduleTemplate,
        size: usize,
        rng: &mut R,
        pool: Option<&ThreadPool>,
    ) -> Result<Self, ScheduleError> {
        let latest_start = template.absolute_lowest_bound();
        let raw: Vec<Chromosome> = (0..size)
            .map(|_| {
                (0..template.operation_count())
                    .map(|_| rng.gen_range(0..=latest_start))
                    .collect()
            })
            .collect();

        let repaired: Vec<Chromosome> = match pool {
            Some(pool) => {
                let shared: &ScheduleTemplate = template;
                pool.install(|| {
                    raw.into_par_iter()
                        .map_init(
                            || shared.clone(),
                            |worker, chromosome| worker.repair(&chromosome),
                        )
                        .collect::<Result<Vec<_>, ScheduleError>>()
                })?
            }
            None => raw
                .iter()
                .map(|chromosome| template.repair(chromosome))
                .collect::<Result<Vec<_>, ScheduleError>>()?,
        };

        Ok(Self {
            specimens: repaired
                .into_iter()
                .map(|chromosome| Specimen::new(chromosome, 0))
                .collect(),
        })
    }

    /// Scores every specimen that has not been evaluated yet, returns how many were scored.
    pub fn evaluate_pending(
        &mut self,
        template: &mut ScheduleTemplate,
        pool: Option<&ThreadPool>,
    ) -> Result<usize, ScheduleError> {
        let pending = self.specimens.iter().filter(|s| s.needs_evaluation()).count();

        match pool {
            Some(pool) => {
                let shared: &ScheduleTemplate = template;
                let specimens = &mut self.specimens;
                pool.install(|| {
                    specimens
                        .par_iter_mut()
                        .filter(|specimen| specimen.needs_evaluation())
                        .try_for_each_init(
                            || shared.clone(),
                            |worker, specimen| specimen.evaluate(worker),
                        )
                })?;
            }
            None => {
                for specimen in self.specimens.iter_mut().filter(|s| s.needs_evaluation()) {
                    specimen.evaluate(template)?;
                }
            }
        }

        Ok(pending)
    }

    /// Highest fitness first, ties broken by the shorter makespan
    pub fn sort_by_fitness(&mut self) {
        self.specimens.sort_by(|a, b| b.rank(a));
    }

    /// Moves the last specimen into the middle slot and the middle one to the end.
    ///
    /// With an even population the middle slot is the last breeding slot, so one weak
    /// specimen gets to breed.
    pub fn swap_middle_and_last(&mut self) {
        let len = self.specimens.len();
        if len > 1 {
            self.specimens.swap((len - 1) / 2, len - 1);
        }
    }

    /// Crosses neighbouring pairs of the first half and writes the children into the
    /// mirrored slots of the second half. Returns the number of children.
    pub fn breed<R: Rng + ?Sized>(
        &mut self,
        template: &mut ScheduleTemplate,
        crossover: CrossoverType,
        generation: usize,
        rng: &mut R,
    ) -> Result<usize, ScheduleError> {
        let len = self.specimens.len();
        let half = len / 2;
        let mut children = 0;

        for parent in (0..half).step_by(2).take_while(|parent| parent + 1 < half) {
            let (first, second) = crossover.apply(
                template,
                &self.specimens[parent].chromosome,
                &self.specimens[parent + 1].chromosome,
                rng,
            )?;
            trace!(
                "parents {parent} and {} bred into slots {} and {}",
                parent + 1,
                len - 1 - parent,
                len - 2 - parent
            );

            self.specimens[len - 1 - parent] = Specimen::new(first, generation + 1);
            self.specimens[len - 2 - parent] = Specimen::new(second, generation + 1);
            children += 2;
        }

        Ok(children)
    }

    /// Mutates each specimen with `probability` percent and re-scores it right away.
    pub fn mutate<R: Rng + ?Sized>(
        &mut self,
        template: &mut ScheduleTemplate,
        options: &MutationOptions,
        probability: u8,
        rng: &mut R,
    ) -> Result<usize, ScheduleError> {
        let mut mutated = 0;

        for specimen in self.specimens.iter_mut() {
            if rng.gen_range(0..100) < probability {
                specimen.chromosome = mutate(template, &specimen.chromosome, options, rng)?;
                // the template still holds the repaired mutant
                specimen.evaluation = Some(template.current_evaluation());
                mutated += 1;
            }
        }

        Ok(mutated)
    }

    pub fn best(&self) -> Option<&Specimen> {
        self.specimens
            .iter()
            .filter(|specimen| !specimen.needs_evaluation())
            .max_by(|a, b| a.rank(b))
    }

    pub fn specimens(&self) -> &[Specimen] {
        &self.specimens
    }

    pub fn len(&self) -> usize {
        self.specimens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specimens.is_empty()
    }
}
