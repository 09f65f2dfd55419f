//! Employee progress through the onboarding programs.

mod domain;
mod page;
mod toggle;

pub use domain::{Employee, EmployeeRoster, Program, ProgressBand, Subtask, SubtaskId};
pub(crate) use page::band_bar_style;
pub use page::get_employee_progress_page;
pub use toggle::toggle_subtask_endpoint;
