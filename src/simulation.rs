use log::{debug, info, trace, warn};

use crate::scheduler::{scheduler_for, Scheduler};
use crate::utils::{Policy, SchedulingError, TaskState, TieBreak};
use crate::{
    DeadlineMiss, Feasibility, Horizon, Laxity, SimulationReport, StateRecord, TaskSet, TimeStep,
    TraceSink,
};

/// Start time, hyperperiod and end of the simulation window of `taskset`.
pub fn compute_horizon(taskset: &TaskSet) -> Result<Horizon, SchedulingError> {
    taskset.horizon()
}

/// Utilisation of `taskset` and whether it stays under 1.
pub fn check_feasibility(taskset: &TaskSet) -> Feasibility {
    let feasibility = taskset.feasibility();
    if !feasibility.feasible {
        warn!(
            "processor utilisation is {:.1}%, deadlines will probably be missed",
            feasibility.utilisation * 100.0
        );
    }
    feasibility
}

/// Simulates `taskset` from its earliest arrival up to `total_time` under
/// `policy`, ties resolved by task set order.
pub fn run_simulation(
    taskset: &mut TaskSet,
    total_time: TimeStep,
    policy: Policy,
) -> Result<SimulationReport, SchedulingError> {
    run_simulation_with_tie_break(taskset, total_time, policy, TieBreak::InputOrder)
}

pub fn run_simulation_with_tie_break(
    taskset: &mut TaskSet,
    total_time: TimeStep,
    policy: Policy,
    tie_break: TieBreak,
) -> Result<SimulationReport, SchedulingError> {
    let scheduler = scheduler_for(policy);
    let mut report = SimulationReport::new(policy);
    simulate(taskset, total_time, scheduler.as_ref(), tie_break, &mut report)?;
    Ok(report)
}

/// Tick-by-tick simulation loop, streaming its output to `sink`.
///
/// Each tick rolls over the periods that ended, then elects one ready task
/// with `scheduler` and runs it for one unit, then emits one record per
/// task. The task set is reset first so that runs are reproducible.
pub fn simulate(
    taskset: &mut TaskSet,
    total_time: TimeStep,
    scheduler: &dyn Scheduler,
    tie_break: TieBreak,
    sink: &mut dyn TraceSink,
) -> Result<(), SchedulingError> {
    taskset.validate()?;
    if taskset.iter().any(|task| task.latest_instant(total_time).is_none()) {
        return Err(SchedulingError::HorizonOverflow);
    }
    taskset.reset();

    let start_time = taskset.start_time().unwrap_or_default();
    let mut missed = 0;

    info!(
        "{} simulation of {} tasks over [{}, {})",
        scheduler.policy(),
        taskset.len(),
        start_time,
        total_time
    );

    for t in start_time..total_time {
        // Periods ending at `t` roll over before readiness is evaluated.
        for task in taskset.iter_mut() {
            if let Some(miss) = task.roll_over(t) {
                warn!("deadline missed: {}", miss);
                missed += 1;
                sink.deadline_missed(miss);
            }
        }

        let ready: Vec<usize> = taskset
            .iter()
            .enumerate()
            .filter(|(_, task)| task.is_ready(t))
            .map(|(index, _)| index)
            .collect();
        let laxities: Vec<Option<Laxity>> =
            taskset.iter().map(|task| scheduler.laxity(task, t)).collect();

        let elected = scheduler.elect(taskset.get_tasks(), &ready, t, tie_break);
        if let Some(index) = elected {
            let task = &mut taskset.get_tasks_mut()[index];
            trace!("t={} running {}", t, task.name());
            task.execute();
        } else {
            trace!("t={} idle", t);
        }

        for (index, (task, laxity)) in taskset.iter().zip(laxities).enumerate() {
            let state = if elected == Some(index) {
                TaskState::Running
            } else if ready.contains(&index) {
                TaskState::Waiting
            } else {
                TaskState::Idle
            };
            sink.record(StateRecord::new(task, t, state, laxity));
        }
    }

    // Periods whose deadline falls within the window but which never rolled
    // over inside the loop.
    if total_time > start_time {
        for task in taskset.iter() {
            if task.remaining_time() > 0 && task.next_deadline() <= total_time {
                let miss = DeadlineMiss::new(task.name().to_string(), total_time, task.next_deadline());
                warn!("deadline missed: {}", miss);
                missed += 1;
                sink.deadline_missed(miss);
            }
        }
    }

    debug!("simulation finished with {} missed deadlines", missed);
    Ok(())
}
