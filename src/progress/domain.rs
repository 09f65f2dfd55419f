//! Employees working through an onboarding program and their subtasks.

use std::fmt::Display;

use crate::Error;

/// The ID of an employee.
pub type EmployeeId = i64;

/// The ID of a subtask, unique across all employees.
pub type SubtaskId = i64;

/// The onboarding program an employee is enrolled in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Program {
    NinetyDay,
    Graduation,
}

impl Program {
    pub const ALL: [Program; 2] = [Program::NinetyDay, Program::Graduation];

    /// The identifier used in URLs, e.g. "90-day".
    pub fn slug(self) -> &'static str {
        match self {
            Program::NinetyDay => "90-day",
            Program::Graduation => "graduation",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Program::NinetyDay => "90 Day",
            Program::Graduation => "Graduation",
        }
    }

    /// Parse a program from its slug, returning `None` for anything else.
    pub fn from_slug(slug: &str) -> Option<Self> {
        Program::ALL
            .into_iter()
            .find(|program| program.slug() == slug)
    }
}

impl Display for Program {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subtask {
    pub id: SubtaskId,
    pub name: String,
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Employee {
    pub id: EmployeeId,
    pub name: String,
    pub business_unit: String,
    pub program: Program,
    /// The task the employee is currently working on.
    pub task: String,
    pub subtasks: Vec<Subtask>,
}

impl Employee {
    pub fn completed_subtasks(&self) -> usize {
        self.subtasks
            .iter()
            .filter(|subtask| subtask.completed)
            .count()
    }

    /// The share of subtasks completed as a whole percentage, rounded down.
    ///
    /// An employee without subtasks has made no progress.
    pub fn progress_percent(&self) -> u32 {
        if self.subtasks.is_empty() {
            return 0;
        }

        (self.completed_subtasks() * 100 / self.subtasks.len()) as u32
    }

    pub fn progress_band(&self) -> ProgressBand {
        ProgressBand::from_percent(self.progress_percent())
    }
}

/// How far along an employee is, which decides the colour of their progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressBand {
    /// 80% or more.
    High,
    Medium,
    /// Less than 50%.
    Low,
}

impl ProgressBand {
    pub fn from_percent(percent: u32) -> Self {
        if percent >= 80 {
            ProgressBand::High
        } else if percent < 50 {
            ProgressBand::Low
        } else {
            ProgressBand::Medium
        }
    }
}

/// The employees in the onboarding programs.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EmployeeRoster {
    employees: Vec<Employee>,
}

impl EmployeeRoster {
    pub fn new(employees: Vec<Employee>) -> Self {
        Self { employees }
    }

    /// The employees in `program`, or everyone if `program` is `None`.
    pub fn employees(&self, program: Option<Program>) -> Vec<&Employee> {
        self.employees
            .iter()
            .filter(|employee| program.is_none_or(|program| employee.program == program))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.employees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }

    /// Flip whether the subtask `subtask_id` is complete, returning the
    /// employee it belongs to.
    ///
    /// # Errors
    ///
    /// Returns [Error::SubtaskNotFound] if no employee has that subtask.
    pub fn toggle_subtask(&mut self, subtask_id: SubtaskId) -> Result<&Employee, Error> {
        for employee in &mut self.employees {
            if let Some(subtask) = employee
                .subtasks
                .iter_mut()
                .find(|subtask| subtask.id == subtask_id)
            {
                subtask.completed = !subtask.completed;
                return Ok(&*employee);
            }
        }

        Err(Error::SubtaskNotFound(subtask_id))
    }

    /// The mean progress of the employees in `program` (or everyone), rounded
    /// to the nearest whole percent. Zero when there are no employees.
    pub fn average_progress(&self, program: Option<Program>) -> u32 {
        let employees = self.employees(program);

        if employees.is_empty() {
            return 0;
        }

        let total: u32 = employees
            .iter()
            .map(|employee| employee.progress_percent())
            .sum();
        let count = employees.len() as u32;

        (total + count / 2) / count
    }
}
