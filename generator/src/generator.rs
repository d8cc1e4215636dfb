use jssp_parser::structs::{JsspInstance, JsspStep};
use rand::{seq::SliceRandom, Rng};

/// Every job visits every machine exactly once, in random order.
pub(crate) fn generate_instance<R: Rng + ?Sized>(
    rng: &mut R,
    jobs: usize,
    machines: usize,
    min_length: u32,
    max_length: u32,
) -> JsspInstance {
    let steps = (0..jobs)
        .map(|_| {
            let mut order: Vec<u32> = (0..machines as u32).collect();
            order.shuffle(rng);

            order
                .into_iter()
                .map(|machine| JsspStep {
                    machine,
                    length: rng.gen_range(min_length..=max_length),
                })
                .collect()
        })
        .collect();

    JsspInstance {
        jobs,
        machines,
        steps,
    }
}
