use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsspInstance {
    // metadata
    pub jobs: usize,
    pub machines: usize,
    // one entry per job, steps in processing order
    pub steps: Vec<Vec<JsspStep>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsspStep {
    pub machine: u32,
    pub length: u32,
}

impl JsspInstance {
    /// Total number of operations over all jobs
    pub fn operation_count(&self) -> usize {
        self.steps.iter().map(Vec::len).sum()
    }
}

/// Writes the instance back in the text format accepted by [`crate::parse_jssp`].
impl fmt::Display for JsspInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} {}", self.jobs, self.machines)?;

        for job in &self.steps {
            let line: Vec<String> = job
                .iter()
                .map(|step| format!("{} {}", step.machine, step.length))
                .collect();
            writeln!(f, "{}", line.join(" "))?;
        }

        Ok(())
    }
}
