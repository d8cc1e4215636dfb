use log::trace;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::ScheduleError;
use crate::template::{Chromosome, ScheduleTemplate, Time};

/// Magnitude bounds of the random shift applied to a single gene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MutationOptions {
    pub min_delta: Time,
    pub max_delta: Time,
}

impl Default for MutationOptions {
    fn default() -> Self {
        Self {
            min_delta: 1,
            max_delta: 5,
        }
    }
}

impl MutationOptions {
    pub fn validate(&self) -> Result<(), ScheduleError> {
        if self.min_delta < 0 || self.min_delta > self.max_delta {
            return Err(ScheduleError::InvalidOptions(format!(
                "mutation delta bounds must satisfy 0 <= min ({}) <= max ({})",
                self.min_delta, self.max_delta
            )));
        }

        Ok(())
    }

    /// Draws a delta with magnitude in `[min_delta, max_delta]` and a random sign.
    pub fn sample_delta<R: Rng + ?Sized>(&self, rng: &mut R) -> Time {
        let magnitude = rng.gen_range(self.min_delta..=self.max_delta);
        if rng.gen_bool(0.5) {
            magnitude
        } else {
            -magnitude
        }
    }
}

/// Shifts one random gene and repairs the result through the template.
pub fn mutate<R: Rng + ?Sized>(
    template: &mut ScheduleTemplate,
    chromosome: &[Time],
    options: &MutationOptions,
    rng: &mut R,
) -> Result<Chromosome, ScheduleError> {
    if chromosome.is_empty() {
        return Err(ScheduleError::EmptyChromosome);
    }

    let mut mutated = chromosome.to_vec();
    let position = rng.gen_range(0..mutated.len());
    let delta = options.sample_delta(rng);
    mutated[position] = perturb_gene(mutated[position], delta);
    trace!("mutated gene {position} by {delta} to {}", mutated[position]);

    template.repair(&mutated)
}

/// Adds `delta`, reflecting the shift when the gene would become negative.
pub fn perturb_gene(value: Time, delta: Time) -> Time {
    let shifted = value + delta;
    if shifted < 0 {
        shifted - 2 * delta
    } else {
        shifted
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::test_utils::{assert_feasible, example_template, random_template};

    #[test]
    fn perturb_gene_reflects_negative_values() {
        assert_eq!(perturb_gene(10, 3), 13);
        assert_eq!(perturb_gene(10, -3), 7);
        assert_eq!(perturb_gene(2, -5), 7);
        assert_eq!(perturb_gene(0, -4), 4);
        assert_eq!(perturb_gene(3, -3), 0);
    }

    #[test]
    fn sampled_deltas_respect_bounds() {
        let options = MutationOptions {
            min_delta: 2,
            max_delta: 4,
        };
        let mut rng = StdRng::seed_from_u64(5);

        let deltas: Vec<Time> = (0..200).map(|_| options.sample_delta(&mut rng)).collect();

        assert!(deltas.iter().all(|d| (2..=4).contains(&d.abs())));
        assert!(deltas.iter().any(|&d| d < 0));
        assert!(deltas.iter().any(|&d| d > 0));
    }

    #[test]
    fn invalid_bounds() {
        let reversed = MutationOptions {
            min_delta: 5,
            max_delta: 1,
        };
        let negative = MutationOptions {
            min_delta: -1,
            max_delta: 1,
        };

        assert!(matches!(
            reversed.validate(),
            Err(ScheduleError::InvalidOptions(_))
        ));
        assert!(matches!(
            negative.validate(),
            Err(ScheduleError::InvalidOptions(_))
        ));
        assert!(MutationOptions::default().validate().is_ok());
    }

    #[test]
    fn empty_chromosome() {
        let mut template = ScheduleTemplate::new();
        let mut rng = StdRng::seed_from_u64(1);

        let result = mutate(&mut template, &[], &MutationOptions::default(), &mut rng);
        assert!(matches!(result, Err(ScheduleError::EmptyChromosome)));
    }

    #[test]
    fn mutation_stays_non_negative_and_feasible() {
        let mut rng = StdRng::seed_from_u64(9);
        let options = MutationOptions {
            min_delta: 1,
            max_delta: 20,
        };

        for _ in 0..30 {
            let mut template = random_template(&mut rng, 3, 3);
            let chromosome = template
                .repair(&vec![0; template.operation_count()])
                .unwrap();

            let mutated = mutate(&mut template, &chromosome, &options, &mut rng).unwrap();

            assert!(mutated.iter().all(|&gene| gene >= 0));
            assert_eq!(mutated.len(), chromosome.len());
            assert_feasible(&template);
        }
    }

    #[test]
    fn mutation_of_example() {
        let mut template = example_template();
        let mut rng = StdRng::seed_from_u64(2);

        let mutated = mutate(
            &mut template,
            &[0, 4, 0, 4],
            &MutationOptions::default(),
            &mut rng,
        )
        .unwrap();

        assert_eq!(mutated.len(), 4);
        assert!(template.total_runtime() >= template.absolute_lowest_bound());
    }
}
