//! The employee progress page.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use serde::Deserialize;

use crate::{
    AppState, Error,
    endpoints::{self, format_endpoint},
    html::{
        BADGE_BLUE_STYLE, BADGE_GREEN_STYLE, BADGE_RED_STYLE, BADGE_YELLOW_STYLE, CARD_STYLE,
        PAGE_CONTAINER_STYLE, base, progress_bar, tab_bar,
    },
    navigation::with_sidebar,
    progress::{Employee, EmployeeRoster, Program, ProgressBand},
};

/// The state needed for the employee progress page and its endpoints.
#[derive(Debug, Clone)]
pub struct EmployeeProgressState {
    pub roster: Arc<Mutex<EmployeeRoster>>,
}

impl FromRef<AppState> for EmployeeProgressState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            roster: state.roster.clone(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct EmployeeProgressQuery {
    /// "all", "90-day" or "graduation".
    pub program: Option<String>,
}

fn band_badge_style(band: ProgressBand) -> &'static str {
    match band {
        ProgressBand::High => BADGE_GREEN_STYLE,
        ProgressBand::Medium => BADGE_YELLOW_STYLE,
        ProgressBand::Low => BADGE_RED_STYLE,
    }
}

pub(crate) fn band_bar_style(band: ProgressBand) -> &'static str {
    match band {
        ProgressBand::High => "bg-green-500",
        ProgressBand::Medium => "bg-blue-600",
        ProgressBand::Low => "bg-red-500",
    }
}

/// Render the employee progress page, filtered to the program in the query.
///
/// Unknown programs show every employee.
pub async fn get_employee_progress_page(
    State(state): State<EmployeeProgressState>,
    Query(query): Query<EmployeeProgressQuery>,
) -> Result<Response, Error> {
    let program = query.program.as_deref().and_then(Program::from_slug);

    let roster = state
        .roster
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire employee roster lock: {error}"))
        .map_err(|_| Error::StoreLockError)?;

    let tabs = [
        ("all", "All", endpoints::EMPLOYEES_VIEW.to_owned()),
        (
            Program::NinetyDay.slug(),
            Program::NinetyDay.label(),
            format!("{}?program={}", endpoints::EMPLOYEES_VIEW, Program::NinetyDay.slug()),
        ),
        (
            Program::Graduation.slug(),
            Program::Graduation.label(),
            format!("{}?program={}", endpoints::EMPLOYEES_VIEW, Program::Graduation.slug()),
        ),
    ];
    let active_tab = program.map_or("all", Program::slug);
    let employees = roster.employees(program);
    let average = roster.average_progress(program);

    let content = html!(
        div class=(PAGE_CONTAINER_STYLE)
        {
            div class="flex flex-wrap items-end justify-between gap-4 mb-6"
            {
                div
                {
                    h1 class="text-2xl font-bold" { "Employee Progress" }
                    p class="text-gray-600 dark:text-gray-400"
                    {
                        "Track progress through the onboarding programs."
                    }
                }

                div class="text-right"
                {
                    p class="text-sm text-gray-600 dark:text-gray-400" { "Average completion" }
                    p id="average-progress" class="text-2xl font-bold" { (average) "%" }
                }
            }

            div class="mb-6" { (tab_bar(&tabs, active_tab)) }

            @if employees.is_empty() {
                p class="text-gray-600 dark:text-gray-400" { "No employees in this program." }
            } @else {
                div id="employee-cards" class="grid grid-cols-1 gap-4"
                {
                    @for employee in employees {
                        (employee_card_view(employee))
                    }
                }
            }
        }
    );

    Ok(base(
        "Employee Progress",
        &[],
        &with_sidebar(endpoints::EMPLOYEES_VIEW, &content),
    )
    .into_response())
}

/// An employee's progress with the list of subtasks that can be ticked off.
pub(super) fn employee_card_view(employee: &Employee) -> Markup {
    let card_id = format!("employee-{}", employee.id);
    let card_target = format!("#{card_id}");
    let percent = employee.progress_percent();
    let band = employee.progress_band();

    html!(
        div id=(card_id) class=(CARD_STYLE)
        {
            div class="flex flex-col md:flex-row md:items-center md:justify-between mb-3 gap-2"
            {
                div
                {
                    h3 class="font-medium text-lg" { (employee.name) }
                    p class="text-sm text-gray-500 dark:text-gray-400" { (employee.business_unit) }
                }

                div class="flex items-center gap-2"
                {
                    span class=(BADGE_BLUE_STYLE) { (employee.program) }
                    span class=(band_badge_style(band)) data-progress=(percent) { (percent) "%" }
                    span class="text-sm text-gray-600 dark:text-gray-400" data-subtask-count
                    {
                        (employee.completed_subtasks()) "/" (employee.subtasks.len())
                    }
                }
            }

            p class="text-sm font-medium mb-1" { "Current Task: " (employee.task) }
            (progress_bar(percent, band_bar_style(band)))

            details class="mt-3"
            {
                summary class="cursor-pointer text-sm text-blue-600 dark:text-blue-400"
                {
                    "Subtasks"
                }

                ul class="mt-2 space-y-2"
                {
                    @for subtask in &employee.subtasks {
                        li
                        {
                            button
                                type="button"
                                hx-post=(format_endpoint(endpoints::TOGGLE_SUBTASK, subtask.id))
                                hx-target=(card_target)
                                hx-swap="outerHTML"
                                hx-target-error="#alert-container"
                                role="checkbox"
                                aria-checked=(if subtask.completed { "true" } else { "false" })
                                data-subtask-id=(subtask.id)
                                class="flex w-full items-center gap-3 p-3 border rounded-md
                                    border-gray-200 dark:border-gray-700 text-left
                                    hover:bg-gray-50 dark:hover:bg-gray-700"
                            {
                                @if subtask.completed {
                                    span class="text-green-600" aria-hidden="true" { "✓" }
                                    span class="text-sm line-through text-gray-500" { (subtask.name) }
                                } @else {
                                    span class="text-gray-400" aria-hidden="true" { "○" }
                                    span class="text-sm" { (subtask.name) }
                                }
                            }
                        }
                    }
                }
            }
        }
    )
}
