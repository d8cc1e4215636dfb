use thiserror::Error;

use crate::template::Time;

#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("Chromosome has {found} genes but the template holds {expected} operations")]
    LengthMismatch { expected: usize, found: usize },
    #[error("Crossover needs two chromosomes of equal length of at least 3 genes, got {left} and {right}")]
    InvalidLength { left: usize, right: usize },
    #[error("Cannot mutate an empty chromosome")]
    EmptyChromosome,
    #[error("Conflict resolution did not converge within {passes} passes")]
    NonConvergence { passes: usize },
    #[error("Job {job_id} has already been added to the template")]
    JobAlreadyExists { job_id: usize },
    #[error("Jobs cannot be added once start times have been filled in")]
    TemplateInUse,
    #[error("Step {sequence} of job {job_id} has non-positive length {length}")]
    InvalidStepLength {
        job_id: usize,
        sequence: usize,
        length: Time,
    },
    #[error("Start time of operation {index} moves its end past the representable time range")]
    TimeOverflow { index: usize },
    #[error("Invalid options: {0}")]
    InvalidOptions(String),
    #[error("Failed to build worker thread pool")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}
