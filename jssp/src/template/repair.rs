use log::{trace, warn};

use super::{Chromosome, Operation, ScheduleTemplate, Time};
use crate::error::ScheduleError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RepairReport {
    pub passes: usize,
    pub job_pushes: usize,
    pub machine_pushes: usize,
}

impl RepairReport {
    pub fn pushes(&self) -> usize {
        self.job_pushes + self.machine_pushes
    }
}

impl ScheduleTemplate {
    /// Moves overlapping operations forward in time until no job and no machine has a conflict.
    ///
    /// Every pass first walks the jobs in their fixed sequence order, then sorts the
    /// machine tracks by start time and walks those. Whenever an operation starts before
    /// its predecessor on the track has finished, it and everything after it on that
    /// track is pushed back by the overlap. The loop ends after a pass without pushes.
    ///
    /// Termination is not proven, so after `repair_limit` passes the resolution gives up
    /// with [`ScheduleError::NonConvergence`]. A push that would move an end time past
    /// [`Time::MAX`] fails with [`ScheduleError::TimeOverflow`] and leaves the start times
    /// partially shifted.
    pub fn resolve_conflicts(&mut self) -> Result<RepairReport, ScheduleError> {
        for operation in self.operations.iter_mut() {
            operation.start_time = operation.start_time.max(0);
        }

        let mut report = RepairReport::default();

        loop {
            if report.passes >= self.repair_limit {
                warn!(
                    "conflict resolution gave up after {} passes ({} job pushes, {} machine pushes)",
                    report.passes, report.job_pushes, report.machine_pushes
                );
                return Err(ScheduleError::NonConvergence {
                    passes: report.passes,
                });
            }
            report.passes += 1;

            // Sequence breaks first, they may move operations far along the machine timelines
            let job_pushes = self
                .job_tracks
                .iter()
                .map(|track| push_overlaps(track, &mut self.operations))
                .sum::<Result<usize, _>>()?;

            self.sort_machine_tracks();

            let machine_pushes = self
                .machine_tracks
                .iter()
                .map(|track| push_overlaps(track, &mut self.operations))
                .sum::<Result<usize, _>>()?;

            trace!(
                "pass {}: {job_pushes} job pushes, {machine_pushes} machine pushes",
                report.passes
            );

            report.job_pushes += job_pushes;
            report.machine_pushes += machine_pushes;

            if job_pushes == 0 && machine_pushes == 0 {
                break;
            }
        }

        Ok(report)
    }

    /// Fills in the chromosome, resolves its conflicts and reads back the feasible start times.
    pub fn repair(&mut self, chromosome: &[Time]) -> Result<Chromosome, ScheduleError> {
        self.fill_start_times(chromosome)?;
        self.resolve_conflicts()?;

        Ok(self.get_chromosome())
    }

    /// Number of overlapping neighbours on job tracks and time ordered machine tracks.
    pub fn conflicts(&self) -> usize {
        let job_conflicts: usize = self
            .job_tracks
            .iter()
            .map(|track| count_overlaps(track, &self.operations))
            .sum();

        let machine_conflicts: usize = self
            .machine_tracks
            .iter()
            .map(|track| {
                let mut track = track.clone();
                track.sort_unstable_by_key(|&index| (self.operations[index].start_time, index));
                count_overlaps(&track, &self.operations)
            })
            .sum();

        job_conflicts + machine_conflicts
    }

    pub fn is_feasible(&self) -> bool {
        self.conflicts() == 0
    }
}

fn overlaps(track: &[usize], position: usize, operations: &[Operation]) -> bool {
    operations[track[position - 1]].end_time() > operations[track[position]].start_time
}

/// Pushes every operation from the first overlapping one onwards, keeping their spacing.
///
/// Start times must be non-negative.
fn push_overlaps(track: &[usize], operations: &mut [Operation]) -> Result<usize, ScheduleError> {
    let mut pushes = 0;

    for position in 1..track.len() {
        if !overlaps(track, position, operations) {
            continue;
        }

        let diff =
            operations[track[position - 1]].end_time() - operations[track[position]].start_time;
        for &index in &track[position..] {
            let Operation {
                start_time, length, ..
            } = operations[index];
            operations[index].start_time = start_time
                .checked_add(diff)
                .filter(|shifted| shifted.checked_add(length).is_some())
                .ok_or(ScheduleError::TimeOverflow { index })?;
        }
        pushes += 1;
    }

    Ok(pushes)
}

fn count_overlaps(track: &[usize], operations: &[Operation]) -> usize {
    (1..track.len())
        .filter(|&position| overlaps(track, position, operations))
        .count()
}
