//! Genetic search for job shop schedules.
//!
//! Chromosomes are vectors of start times. [`template::ScheduleTemplate`] turns any
//! chromosome into a feasible schedule by shifting conflicting operations forward,
//! [`operators`] cross and mutate chromosomes and [`scheduler`] drives the generations.

pub mod error;
pub mod operators;
pub mod scheduler;
pub mod template;

#[cfg(test)]
mod test_utils;

pub use error::ScheduleError;
pub use scheduler::{scheduler, GeneticOptions, OptimizedSchedule};
pub use template::{Chromosome, ScheduleTemplate, Time};
