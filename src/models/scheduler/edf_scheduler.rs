use std::cmp::Ordering;

use super::scheduler::Scheduler;
use crate::utils::Policy;
use crate::{Task, TimeStep};

pub struct EarliestDeadlineFirst;

impl Scheduler for EarliestDeadlineFirst {
    fn policy(&self) -> Policy {
        Policy::Edf
    }

    fn compare(&self, a: &Task, b: &Task, _t: TimeStep) -> Ordering {
        a.next_deadline().cmp(&b.next_deadline())
    }
}
