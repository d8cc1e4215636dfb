//! The schedule template holds every operation of an instance and two index
//! views on it: machine tracks, re-sorted by start time whenever a timeline is
//! needed, and job tracks, which keep the fixed processing order of each job.
//!
//! A chromosome is a start time per operation. Filling it into the template and
//! resolving conflicts turns it into a feasible schedule that can be scored.

use jssp_parser::structs::JsspInstance;
use log::trace;

use crate::error::ScheduleError;

mod operation;
mod repair;

pub use operation::{Operation, Step};
pub use repair::RepairReport;

pub type Time = i64;

pub type Chromosome = Vec<Time>;

/// Passes of the conflict resolution before it gives up
pub const DEFAULT_REPAIR_LIMIT: usize = 10_000;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    pub fitness: f64,
    pub makespan: Time,
}

#[derive(Debug, Clone)]
pub struct ScheduleTemplate {
    operations: Vec<Operation>,
    /// Indices into `operations`, order only meaningful after sorting by start time
    machine_tracks: Vec<Vec<usize>>,
    /// Indices into `operations` in sequence order, never re-sorted
    job_tracks: Vec<Vec<usize>>,
    horizon: Time,
    absolute_lowest_bound: Time,
    repair_limit: usize,
    in_use: bool,
}

impl Default for ScheduleTemplate {
    fn default() -> Self {
        Self::new()
    }
}

impl ScheduleTemplate {
    pub fn new() -> Self {
        Self {
            operations: vec![],
            machine_tracks: vec![],
            job_tracks: vec![],
            horizon: 0,
            absolute_lowest_bound: 0,
            repair_limit: DEFAULT_REPAIR_LIMIT,
            in_use: false,
        }
    }

    pub fn from_instance(instance: &JsspInstance) -> Result<Self, ScheduleError> {
        let mut template = Self::new();

        for (job_id, steps) in instance.steps.iter().enumerate() {
            let steps: Vec<Step> = steps
                .iter()
                .map(|step| Step::new(step.machine as usize, Time::from(step.length)))
                .collect();
            template.add_job(job_id, &steps)?;
        }

        Ok(template)
    }

    pub fn with_repair_limit(mut self, repair_limit: usize) -> Self {
        self.repair_limit = repair_limit;
        self
    }

    pub fn set_repair_limit(&mut self, repair_limit: usize) {
        self.repair_limit = repair_limit;
    }

    pub fn repair_limit(&self) -> usize {
        self.repair_limit
    }

    /// Appends one operation per step and registers it in the job and machine tracks.
    ///
    /// Jobs must all be added before the first chromosome is filled in.
    pub fn add_job(&mut self, job_id: usize, steps: &[Step]) -> Result<(), ScheduleError> {
        if self.in_use {
            return Err(ScheduleError::TemplateInUse);
        }
        if self.job_tracks.get(job_id).is_some_and(|track| !track.is_empty()) {
            return Err(ScheduleError::JobAlreadyExists { job_id });
        }
        if let Some((sequence, step)) = steps.iter().enumerate().find(|(_, s)| s.length <= 0) {
            return Err(ScheduleError::InvalidStepLength {
                job_id,
                sequence,
                length: step.length,
            });
        }

        if self.job_tracks.len() <= job_id {
            self.job_tracks.resize_with(job_id + 1, Vec::new);
        }

        for (sequence, step) in steps.iter().enumerate() {
            let index = self.operations.len();

            self.operations.push(Operation {
                job_id,
                machine_id: step.machine,
                sequence,
                length: step.length,
                start_time: 0,
            });

            self.job_tracks[job_id].push(index);

            if self.machine_tracks.len() <= step.machine {
                self.machine_tracks.resize_with(step.machine + 1, Vec::new);
            }
            self.machine_tracks[step.machine].push(index);
        }

        self.refresh_bounds();
        trace!(
            "added job {job_id} with {} steps, horizon: {}, lowest bound: {}",
            steps.len(),
            self.horizon,
            self.absolute_lowest_bound
        );

        Ok(())
    }

    /// Writes the chromosome into the start times and sorts every machine track by them.
    ///
    /// Operations starting at the same time are ordered by index, so the result never
    /// depends on what was filled in before. Any start time is accepted as long as the
    /// operation's end time stays representable.
    pub fn fill_start_times(&mut self, chromosome: &[Time]) -> Result<(), ScheduleError> {
        if chromosome.len() != self.operations.len() {
            return Err(ScheduleError::LengthMismatch {
                expected: self.operations.len(),
                found: chromosome.len(),
            });
        }
        if let Some(index) = self
            .operations
            .iter()
            .zip(chromosome)
            .position(|(operation, start_time)| start_time.checked_add(operation.length).is_none())
        {
            return Err(ScheduleError::TimeOverflow { index });
        }

        for (operation, &start_time) in self.operations.iter_mut().zip(chromosome) {
            operation.start_time = start_time;
        }
        self.in_use = true;

        // total_runtime relies on time ordered tracks even without conflict resolution
        self.sort_machine_tracks();

        Ok(())
    }

    pub fn get_chromosome(&self) -> Chromosome {
        self.operations.iter().map(|op| op.start_time).collect()
    }

    /// Fills in the chromosome, resolves conflicts and scores the result.
    pub fn evaluate(&mut self, chromosome: &[Time]) -> Result<Evaluation, ScheduleError> {
        self.fill_start_times(chromosome)?;
        self.resolve_conflicts()?;

        Ok(self.current_evaluation())
    }

    /// Scores the start times currently held, without resolving conflicts.
    pub fn current_evaluation(&self) -> Evaluation {
        Evaluation {
            fitness: self.fitness(),
            makespan: self.total_runtime(),
        }
    }

    /// Total runtime when every operation runs one after another
    pub fn horizon(&self) -> Time {
        self.horizon
    }

    /// Workload of the busiest machine, ignoring precedence between machines
    pub fn absolute_lowest_bound(&self) -> Time {
        self.absolute_lowest_bound
    }

    /// End time of the latest operation over all machines.
    ///
    /// Machine tracks must be sorted by start time, which `fill_start_times` and
    /// `resolve_conflicts` guarantee.
    pub fn total_runtime(&self) -> Time {
        self.machine_tracks
            .iter()
            .filter_map(|track| track.last())
            .map(|&index| self.operations[index].end_time())
            .max()
            .unwrap_or(0)
    }

    /// Position of the total runtime between horizon (0.0) and lowest bound (1.0).
    pub fn fitness(&self) -> f64 {
        let runtime = self.total_runtime();
        let lowest = self.absolute_lowest_bound;

        if runtime <= lowest {
            return 1.0;
        }
        if runtime >= self.horizon {
            return 0.0;
        }

        1.0 - (runtime - lowest) as f64 / (self.horizon - lowest) as f64
    }

    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    pub fn machine_tracks(&self) -> &[Vec<usize>] {
        &self.machine_tracks
    }

    pub fn job_tracks(&self) -> &[Vec<usize>] {
        &self.job_tracks
    }

    pub fn operation_count(&self) -> usize {
        self.operations.len()
    }

    pub fn job_count(&self) -> usize {
        self.job_tracks.len()
    }

    pub fn machine_count(&self) -> usize {
        self.machine_tracks.len()
    }

    fn sort_machine_tracks(&mut self) {
        let operations = &self.operations;
        for track in &mut self.machine_tracks {
            track.sort_unstable_by_key(|&index| (operations[index].start_time, index));
        }
    }

    fn refresh_bounds(&mut self) {
        self.horizon = self.operations.iter().map(|op| op.length).sum();
        self.absolute_lowest_bound = self
            .machine_tracks
            .iter()
            .map(|track| {
                track
                    .iter()
                    .map(|&index| self.operations[index].length)
                    .sum::<Time>()
            })
            .max()
            .unwrap_or(0);
    }
}
