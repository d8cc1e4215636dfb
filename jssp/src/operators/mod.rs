//! Genetic operators on start time chromosomes.
//!
//! Every operator hands its result to [`crate::template::ScheduleTemplate::repair`]
//! before returning it, so callers only ever see feasible chromosomes.

pub mod crossover;
pub mod mutation;

pub use crossover::{one_point_crossover, two_point_crossover, CrossoverType};
pub use mutation::{mutate, MutationOptions};
