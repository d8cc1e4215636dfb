use rand::{seq::SliceRandom, Rng};

use crate::template::{ScheduleTemplate, Step};

/// Two jobs on two machines:
/// job 0 runs (machine 0, 3) then (machine 1, 2), job 1 runs (machine 1, 4) then (machine 0, 1).
pub(crate) fn example_template() -> ScheduleTemplate {
    let mut template = ScheduleTemplate::new();
    template
        .add_job(0, &[Step::new(0, 3), Step::new(1, 2)])
        .unwrap();
    template
        .add_job(1, &[Step::new(1, 4), Step::new(0, 1)])
        .unwrap();
    template
}

/// Every job visits every machine once in random order.
pub(crate) fn random_template<R: Rng + ?Sized>(
    rng: &mut R,
    jobs: usize,
    machines: usize,
) -> ScheduleTemplate {
    let mut template = ScheduleTemplate::new();

    for job in 0..jobs {
        let mut order: Vec<usize> = (0..machines).collect();
        order.shuffle(rng);

        let steps: Vec<Step> = order
            .into_iter()
            .map(|machine| Step::new(machine, rng.gen_range(1..10)))
            .collect();
        template.add_job(job, &steps).unwrap();
    }

    template
}

pub(crate) fn assert_feasible(template: &ScheduleTemplate) {
    let operations = template.operations();

    for track in template.job_tracks() {
        for pair in track.windows(2) {
            let (left, right) = (&operations[pair[0]], &operations[pair[1]]);
            assert!(
                left.end_time() <= right.start_time,
                "job overlap: {left:?} / {right:?}"
            );
        }
    }

    for track in template.machine_tracks() {
        let mut track = track.clone();
        track.sort_unstable_by_key(|&index| (operations[index].start_time, index));

        for pair in track.windows(2) {
            let (left, right) = (&operations[pair[0]], &operations[pair[1]]);
            assert!(
                left.end_time() <= right.start_time,
                "machine overlap: {left:?} / {right:?}"
            );
        }
    }

    assert!(operations.iter().all(|op| op.start_time >= 0));
}
