use std::fmt;

use jssp::ScheduleTemplate;

/// Every operation with its fields, followed by the machine and job tracks.
pub struct Listing<'a>(pub &'a ScheduleTemplate);

impl fmt::Display for Listing<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, op) in self.0.operations().iter().enumerate() {
            writeln!(
                f,
                "{index}\tjob: {}, machine: {}, sequence: {}, length: {}, start time: {}",
                op.job_id, op.machine_id, op.sequence, op.length, op.start_time
            )?;
        }

        for (machine, track) in self.0.machine_tracks().iter().enumerate() {
            writeln!(f, "Machine {machine}: {}", join_indices(track))?;
        }
        for (job, track) in self.0.job_tracks().iter().enumerate() {
            writeln!(f, "Job {job}: {}", join_indices(track))?;
        }

        Ok(())
    }
}

/// Operations per machine in start time order, then the total runtime.
pub struct Timeline<'a>(pub &'a ScheduleTemplate);

impl fmt::Display for Timeline<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let operations = self.0.operations();

        for (machine, track) in self.0.machine_tracks().iter().enumerate() {
            let mut track = track.clone();
            track.sort_unstable_by_key(|&index| (operations[index].start_time, index));

            let entries: Vec<String> = track
                .iter()
                .map(|&index| {
                    let op = &operations[index];
                    format!("(j{}s{} {}+{})", op.job_id, op.sequence, op.start_time, op.length)
                })
                .collect();
            writeln!(f, "Machine {machine}: {}", entries.join(" "))?;
        }

        writeln!(f)?;
        writeln!(f, "Total runtime: {}", self.0.total_runtime())
    }
}

fn join_indices(track: &[usize]) -> String {
    track
        .iter()
        .map(usize::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}
