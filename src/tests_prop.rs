//! Property-based checks of the simulation invariants.

use proptest::prelude::*;

use crate::utils::{multiple_lcm, Policy, TaskState};
use crate::{compute_horizon, run_simulation, Task, TaskSet, TimeStep};

fn arb_task_params() -> impl Strategy<Value = (TimeStep, TimeStep, TimeStep, TimeStep)> {
    prop::sample::select(vec![2usize, 3, 4, 5, 6, 8, 10, 12])
        .prop_flat_map(|period| (Just(period), 1..=period, 1..=period, 0usize..4))
}

fn build_tasks(params: Vec<(TimeStep, TimeStep, TimeStep, TimeStep)>) -> Vec<Task> {
    params
        .into_iter()
        .enumerate()
        .map(|(i, (period, wcet, deadline, arrival))| {
            Task::new(format!("T{i}"), wcet, period, deadline, arrival)
        })
        .collect()
}

fn arb_tasks() -> impl Strategy<Value = Vec<Task>> {
    prop::collection::vec(arb_task_params(), 1..5).prop_map(build_tasks)
}

/// Implicit-deadline task sets whose utilisation is at most 1, checked with
/// integer arithmetic.
fn arb_feasible_implicit_tasks() -> impl Strategy<Value = Vec<Task>> {
    prop::collection::vec(arb_task_params(), 1..4)
        .prop_map(|params| {
            params
                .into_iter()
                .map(|(period, wcet, _, arrival)| (period, wcet, period, arrival))
                .collect::<Vec<_>>()
        })
        .prop_filter("utilisation above 1", |params| {
            let periods: Vec<TimeStep> = params.iter().map(|p| p.0).collect();
            let hyperperiod = multiple_lcm(&periods).unwrap();
            let demand: TimeStep = params.iter().map(|p| p.1 * (hyperperiod / p.0)).sum();
            demand <= hyperperiod
        })
        .prop_map(build_tasks)
}

proptest! {
    #[test]
    fn edf_meets_every_deadline_when_utilisation_fits(tasks in arb_feasible_implicit_tasks()) {
        let mut taskset = TaskSet::new(tasks);
        let total_time = compute_horizon(&taskset).unwrap().total_time;
        let report = run_simulation(&mut taskset, total_time, Policy::Edf).unwrap();

        prop_assert!(report.misses().is_empty(), "misses: {:?}", report.misses());
    }

    #[test]
    fn horizon_ignores_task_order(tasks in arb_tasks().prop_flat_map(|tasks| {
        (Just(tasks.clone()), Just(tasks).prop_shuffle())
    })) {
        let (original, shuffled) = tasks;
        prop_assert_eq!(
            compute_horizon(&TaskSet::new(original)).unwrap(),
            compute_horizon(&TaskSet::new(shuffled)).unwrap()
        );
    }

    #[test]
    fn one_running_task_per_tick(tasks in arb_tasks(), llf in any::<bool>()) {
        let policy = if llf { Policy::Llf } else { Policy::Edf };
        let mut taskset = TaskSet::new(tasks);
        let total_time = compute_horizon(&taskset).unwrap().total_time;
        let report = run_simulation(&mut taskset, total_time, policy).unwrap();

        for (time, _) in report.schedule() {
            let running = report
                .records_at(time)
                .filter(|record| record.state == TaskState::Running)
                .count();
            prop_assert!(running <= 1, "{} tasks running at t={}", running, time);
        }
        for record in report.records() {
            prop_assert!(record.remaining <= record.execution_time);
        }
        prop_assert_eq!(report.records().len(), taskset.len() * report.schedule().len());
    }

    #[test]
    fn repeated_runs_produce_the_same_trace(tasks in arb_tasks(), llf in any::<bool>()) {
        let policy = if llf { Policy::Llf } else { Policy::Edf };
        let mut taskset = TaskSet::new(tasks);
        let total_time = compute_horizon(&taskset).unwrap().total_time;

        let first = run_simulation(&mut taskset, total_time, policy).unwrap();
        let second = run_simulation(&mut taskset, total_time, policy).unwrap();
        prop_assert_eq!(first, second);
    }
}
