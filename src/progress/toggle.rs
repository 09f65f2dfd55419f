//! Endpoint for ticking off an onboarding subtask.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use maud::html;

use crate::{
    Error,
    alert::Alert,
    progress::{
        SubtaskId,
        page::{EmployeeProgressState, employee_card_view},
    },
};

/// Flip whether a subtask is complete and re-render the employee's card.
pub async fn toggle_subtask_endpoint(
    Path(subtask_id): Path<SubtaskId>,
    State(state): State<EmployeeProgressState>,
) -> Response {
    let mut roster = match state.roster.lock() {
        Ok(roster) => roster,
        Err(error) => {
            tracing::error!("could not acquire employee roster lock: {error}");
            return Error::StoreLockError.into_alert_response();
        }
    };

    match roster.toggle_subtask(subtask_id) {
        Ok(employee) => {
            tracing::info!(
                "Toggled subtask {subtask_id}, {} is now at {}%",
                employee.name,
                employee.progress_percent()
            );

            let alert = Alert::SuccessSimple {
                message: format!(
                    "{}'s progress is now {}%",
                    employee.name,
                    employee.progress_percent()
                ),
            };

            html!(
                (employee_card_view(employee))
                (alert.into_oob_html())
            )
            .into_response()
        }
        Err(error) => {
            tracing::warn!("Could not toggle subtask {subtask_id}: {error}");
            error.into_alert_response()
        }
    }
}

#[cfg(test)]
mod toggle_subtask_endpoint_tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        extract::{Path, State},
        http::StatusCode,
    };
    use scraper::Selector;

    use crate::{
        progress::{Employee, EmployeeRoster, Program, Subtask, page::EmployeeProgressState},
        test_utils::{assert_valid_html, parse_html_fragment},
    };

    use super::toggle_subtask_endpoint;

    fn get_state() -> EmployeeProgressState {
        let roster = EmployeeRoster::new(vec![Employee {
            id: 1,
            name: "Alex Johnson".to_owned(),
            business_unit: "Sales Department".to_owned(),
            program: Program::NinetyDay,
            task: "Q1 Analytics Report".to_owned(),
            subtasks: vec![
                Subtask {
                    id: 1,
                    name: "Gather data sources".to_owned(),
                    completed: true,
                },
                Subtask {
                    id: 2,
                    name: "Clean dataset".to_owned(),
                    completed: false,
                },
            ],
        }]);

        EmployeeProgressState {
            roster: Arc::new(Mutex::new(roster)),
        }
    }

    #[tokio::test]
    async fn toggle_rerenders_card_with_new_progress() {
        let state = get_state();

        let response = toggle_subtask_endpoint(Path(2), State(state.clone())).await;

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_html_fragment(response).await;
        assert_valid_html(&html);
        let progress = html
            .select(&Selector::parse("#employee-1 [data-progress]").unwrap())
            .next()
            .expect("No progress badge");
        assert_eq!(progress.value().attr("data-progress"), Some("100"));

        let roster = state.roster.lock().unwrap();
        assert_eq!(roster.average_progress(None), 100);
    }

    #[tokio::test]
    async fn toggle_missing_subtask_is_not_found() {
        let response = toggle_subtask_endpoint(Path(999), State(get_state())).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
