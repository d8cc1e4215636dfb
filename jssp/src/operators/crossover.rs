use log::trace;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::ScheduleError;
use crate::template::{Chromosome, ScheduleTemplate, Time};

const MIN_CROSSOVER_LENGTH: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CrossoverType {
    /// Swap the prefix up to a random cut
    #[default]
    OnePoint,
    /// Swap the genes strictly between two random cuts
    TwoPoint,
}

impl CrossoverType {
    /// Crosses both parents and repairs the two children through the template.
    pub fn apply<R: Rng + ?Sized>(
        &self,
        template: &mut ScheduleTemplate,
        left: &[Time],
        right: &[Time],
        rng: &mut R,
    ) -> Result<(Chromosome, Chromosome), ScheduleError> {
        match self {
            CrossoverType::OnePoint => one_point_crossover(template, left, right, rng),
            CrossoverType::TwoPoint => two_point_crossover(template, left, right, rng),
        }
    }
}

pub fn one_point_crossover<R: Rng + ?Sized>(
    template: &mut ScheduleTemplate,
    left: &[Time],
    right: &[Time],
    rng: &mut R,
) -> Result<(Chromosome, Chromosome), ScheduleError> {
    check_parents(left, right)?;

    let cut = rng.gen_range(1..=left.len() - 2);
    trace!("one point crossover at {cut}");

    let (first, second) = splice_one_point(left, right, cut);
    Ok((template.repair(&first)?, template.repair(&second)?))
}

pub fn two_point_crossover<R: Rng + ?Sized>(
    template: &mut ScheduleTemplate,
    left: &[Time],
    right: &[Time],
    rng: &mut R,
) -> Result<(Chromosome, Chromosome), ScheduleError> {
    check_parents(left, right)?;

    let last = left.len() - 2;
    let a = rng.gen_range(1..=last);
    let mut b = rng.gen_range(1..=last);
    if a == b {
        b += 1;
    }
    trace!("two point crossover between {} and {}", a.min(b), a.max(b));

    let (first, second) = splice_two_point(left, right, a.min(b), a.max(b));
    Ok((template.repair(&first)?, template.repair(&second)?))
}

/// Exchanges the genes `[0, cut)` of both parents.
pub fn splice_one_point(left: &[Time], right: &[Time], cut: usize) -> (Chromosome, Chromosome) {
    let mut first = left.to_vec();
    let mut second = right.to_vec();

    first[..cut].swap_with_slice(&mut second[..cut]);

    (first, second)
}

/// Exchanges the genes strictly between `low` and `high`.
pub fn splice_two_point(
    left: &[Time],
    right: &[Time],
    low: usize,
    high: usize,
) -> (Chromosome, Chromosome) {
    let mut first = left.to_vec();
    let mut second = right.to_vec();

    if high > low + 1 {
        first[low + 1..high].swap_with_slice(&mut second[low + 1..high]);
    }

    (first, second)
}

fn check_parents(left: &[Time], right: &[Time]) -> Result<(), ScheduleError> {
    if left.len() != right.len() || left.len() < MIN_CROSSOVER_LENGTH {
        return Err(ScheduleError::InvalidLength {
            left: left.len(),
            right: right.len(),
        });
    }

    Ok(())
}
