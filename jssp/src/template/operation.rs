use super::Time;

/// One step of a job, bound to a machine for a fixed length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operation {
    pub job_id: usize,
    pub machine_id: usize,
    /// Position within the job, starting at 0
    pub sequence: usize,
    pub length: Time,
    pub start_time: Time,
}

impl Operation {
    pub fn end_time(&self) -> Time {
        self.start_time + self.length
    }
}

/// Input for [`super::ScheduleTemplate::add_job`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub machine: usize,
    pub length: Time,
}

impl Step {
    pub fn new(machine: usize, length: Time) -> Self {
        Self { machine, length }
    }
}

impl From<(usize, Time)> for Step {
    fn from((machine, length): (usize, Time)) -> Self {
        Self { machine, length }
    }
}
