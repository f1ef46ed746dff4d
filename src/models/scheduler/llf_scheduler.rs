use std::cmp::Ordering;

use super::scheduler::Scheduler;
use crate::utils::Policy;
use crate::{Laxity, Task, TimeStep};

/// Least laxity first, earliest deadline among equal laxities.
pub struct LeastLaxityFirst;

impl Scheduler for LeastLaxityFirst {
    fn policy(&self) -> Policy {
        Policy::Llf
    }

    fn compare(&self, a: &Task, b: &Task, t: TimeStep) -> Ordering {
        a.laxity(t)
            .cmp(&b.laxity(t))
            .then_with(|| a.next_deadline().cmp(&b.next_deadline()))
    }

    fn laxity(&self, task: &Task, t: TimeStep) -> Option<Laxity> {
        Some(task.laxity(t))
    }
}
