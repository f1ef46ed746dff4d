use std::cmp::Ordering;

use crate::utils::{Policy, TieBreak};
use crate::{Laxity, Task, TimeStep};

/// Ranks ready tasks. The simulation loop is shared by every policy, only
/// this comparator changes.
pub trait Scheduler {
    fn policy(&self) -> Policy;

    /// Orders two ready tasks at time `t`, `Ordering::Less` meaning `a` runs
    /// before `b`. `Ordering::Equal` leaves the decision to the tie-break.
    fn compare(&self, a: &Task, b: &Task, t: TimeStep) -> Ordering;

    /// Laxity reported in the trace, for policies that rely on it.
    fn laxity(&self, _task: &Task, _t: TimeStep) -> Option<Laxity> {
        None
    }

    /// Index of the task to run among the `ready` indices of `tasks`.
    fn elect(
        &self,
        tasks: &[Task],
        ready: &[usize],
        t: TimeStep,
        tie_break: TieBreak,
    ) -> Option<usize> {
        ready.iter().copied().min_by(|&a, &b| {
            self.compare(&tasks[a], &tasks[b], t)
                .then_with(|| match tie_break {
                    TieBreak::InputOrder => Ordering::Equal,
                    TieBreak::Name => tasks[a].name().cmp(tasks[b].name()),
                })
                .then_with(|| a.cmp(&b))
        })
    }
}

/// Scheduler implementing `policy`.
pub fn scheduler_for(policy: Policy) -> Box<dyn Scheduler> {
    match policy {
        Policy::Edf => Box::new(super::EarliestDeadlineFirst),
        Policy::Llf => Box::new(super::LeastLaxityFirst),
    }
}
