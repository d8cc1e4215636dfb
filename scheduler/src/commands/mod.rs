mod benchmark;
mod bounds;
mod schedule;

pub use benchmark::benchmark;
pub use bounds::bounds;
pub use schedule::schedule;

use std::{fs, path::Path};

use anyhow::{Context, Result};
use jssp::ScheduleTemplate;
use jssp_parser::{parse_jssp, structs::JsspInstance};
use log::{debug, trace};

pub(crate) fn load_instance(path: &Path) -> Result<JsspInstance> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("Failed to read {path:?}"))?;
    trace!("input file contents: {contents}");

    let instance = parse_jssp(&contents).with_context(|| format!("Failed to parse {path:?}"))?;
    debug!(
        "parsed {path:?}: {} jobs on {} machines",
        instance.jobs, instance.machines
    );

    Ok(instance)
}

pub(crate) fn load_template(path: &Path) -> Result<ScheduleTemplate> {
    let instance = load_instance(path)?;
    Ok(ScheduleTemplate::from_instance(&instance)?)
}
