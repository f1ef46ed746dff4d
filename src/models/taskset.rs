use std::collections::HashSet;

use super::{Task, TimeStep};
use crate::utils::{multiple_lcm, SchedulingError, UTILISATION_EPSILON};

/// Simulation window derived from the task set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Horizon {
    pub start_time: TimeStep, // Earliest arrival
    pub horizon: TimeStep,    // Hyperperiod, lcm of all periods
    pub total_time: TimeStep, // start_time + horizon
}

/// Outcome of the utilisation test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Feasibility {
    pub utilisation: f64,
    pub feasible: bool,
}

#[derive(Debug, Clone, Default)]
pub struct TaskSet {
    tasks: Vec<Task>,
}

impl TaskSet {
    pub fn new(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    pub fn new_empty() -> Self {
        Self { tasks: Vec::new() }
    }

    pub fn add_task(&mut self, task: Task) {
        self.tasks.push(task);
    }

    pub fn get_tasks(&self) -> &Vec<Task> {
        &self.tasks
    }

    pub fn get_tasks_mut(&mut self) -> &mut Vec<Task> {
        &mut self.tasks
    }

    pub fn get_task_by_name(&self, name: &str) -> Option<&Task> {
        self.tasks.iter().find(|task| task.name() == name)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<Task> {
        self.tasks.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<Task> {
        self.tasks.iter_mut()
    }

    pub fn utilisation(&self) -> f64 {
        self.tasks.iter().map(|t| t.utilisation()).sum()
    }

    /// Utilisation test, U <= 1. Necessary for EDF, only an approximation
    /// for LLF, and never a reason to skip the simulation.
    pub fn feasibility(&self) -> Feasibility {
        let utilisation = self.utilisation();
        Feasibility {
            utilisation,
            feasible: utilisation <= 1.0 + UTILISATION_EPSILON,
        }
    }

    /// Checks that the set can be simulated at all.
    pub fn validate(&self) -> Result<(), SchedulingError> {
        if self.tasks.is_empty() {
            return Err(SchedulingError::InvalidInput(
                "the task set is empty".to_string(),
            ));
        }

        let mut names = HashSet::new();
        for task in self.tasks.iter() {
            task.validate()?;
            if !names.insert(task.name()) {
                return Err(SchedulingError::InvalidInput(format!(
                    "duplicated task name '{}'",
                    task.name()
                )));
            }
        }

        Ok(())
    }

    /// Earliest arrival of the set, `None` when the set is empty.
    pub fn start_time(&self) -> Option<TimeStep> {
        self.tasks.iter().map(|task| task.arrival_time()).min()
    }

    /// `[start_time, start_time + lcm(periods))`.
    pub fn horizon(&self) -> Result<Horizon, SchedulingError> {
        let start_time = self.start_time().ok_or_else(|| {
            SchedulingError::InvalidInput("the task set is empty".to_string())
        })?;
        let periods: Vec<TimeStep> = self.tasks.iter().map(|task| task.period()).collect();
        let horizon = multiple_lcm(&periods)?;
        let total_time = start_time
            .checked_add(horizon)
            .ok_or(SchedulingError::HorizonOverflow)?;

        Ok(Horizon {
            start_time,
            horizon,
            total_time,
        })
    }

    /// Puts every task back to its state before the first release.
    pub fn reset(&mut self) {
        self.tasks.iter_mut().for_each(|task| task.reset());
    }
}
