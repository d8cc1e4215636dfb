use serde::{Deserialize, Serialize};

use crate::error::ScheduleError;
use crate::operators::{CrossoverType, MutationOptions};
use crate::template::{Chromosome, Time, DEFAULT_REPAIR_LIMIT};

pub mod genetic;
pub mod population;

pub use genetic::scheduler;

const MIN_POPULATION_SIZE: usize = 4;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneticOptions {
    pub population_size: usize,
    pub generations: usize,
    pub crossover: CrossoverType,
    /// Chance in percent that a specimen is mutated each generation
    pub mutation_probability: u8,
    pub mutation: MutationOptions,
    /// Swap the middle specimen with the last one before breeding
    pub elitist_swap: bool,
    pub repair_limit: usize,
    pub parallel: bool,
    /// Worker threads, defaults to the number of logical cores
    pub workers: Option<usize>,
    /// Time budget in seconds
    pub schedule_duration: Option<u64>,
}

impl Default for GeneticOptions {
    fn default() -> Self {
        Self {
            population_size: 100,
            generations: 1000,
            crossover: CrossoverType::default(),
            mutation_probability: 10,
            mutation: MutationOptions::default(),
            elitist_swap: true,
            repair_limit: DEFAULT_REPAIR_LIMIT,
            parallel: false,
            workers: None,
            schedule_duration: None,
        }
    }
}

impl GeneticOptions {
    pub fn validate(&self) -> Result<(), ScheduleError> {
        if self.population_size < MIN_POPULATION_SIZE {
            return Err(ScheduleError::InvalidOptions(format!(
                "population size must be at least {MIN_POPULATION_SIZE}, got {}",
                self.population_size
            )));
        }
        if self.mutation_probability > 100 {
            return Err(ScheduleError::InvalidOptions(format!(
                "mutation probability is a percentage, got {}",
                self.mutation_probability
            )));
        }
        if self.repair_limit == 0 {
            return Err(ScheduleError::InvalidOptions(
                "repair limit must allow at least one pass".to_string(),
            ));
        }
        if self.workers == Some(0) {
            return Err(ScheduleError::InvalidOptions(
                "worker count must be positive".to_string(),
            ));
        }

        self.mutation.validate()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptimizedSchedule {
    /// Start time per operation, in template order
    pub schedule: Chromosome,
    pub makespan: Time,
    pub fitness: f64,
    /// Generation the best specimen was created in
    pub generation: usize,
    pub generations_run: usize,
    pub horizon: Time,
    pub lower_bound: Time,
}
