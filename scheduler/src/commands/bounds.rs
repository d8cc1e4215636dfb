use std::path::PathBuf;

use anyhow::Result;

use super::load_template;

pub fn bounds(path: PathBuf) -> Result<()> {
    let template = load_template(&path)?;

    println!("Operations: {}", template.operation_count());
    println!("Jobs: {}", template.job_count());
    println!("Machines: {}", template.machine_count());
    println!("Horizon: {}", template.horizon());
    println!("Lowest bound: {}", template.absolute_lowest_bound());

    Ok(())
}
