//! Endpoints for adding and removing calendar events.

use axum::{
    Form,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use maud::html;
use serde::Deserialize;

use crate::{
    Error,
    alert::Alert,
    calendar::{
        EventCalendar, EventId,
        page::{CalendarState, calendar_content_view},
    },
    html::format_date_long,
    timezone::local_today,
    validation::parse_date,
};

#[derive(Debug, Clone, Deserialize)]
pub struct EventForm {
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// The day of the event as `YYYY-MM-DD`.
    pub date: String,
}

fn lock_calendar(
    state: &CalendarState,
) -> Result<std::sync::MutexGuard<'_, EventCalendar>, Error> {
    state
        .calendar
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire calendar lock: {error}"))
        .map_err(|_| Error::StoreLockError)
}

/// Add an event to the calendar and re-render the selected day.
pub async fn create_event_endpoint(
    State(state): State<CalendarState>,
    Form(form): Form<EventForm>,
) -> Response {
    let today = match local_today(&state.local_timezone) {
        Ok(today) => today,
        Err(error) => return error.into_alert_response(),
    };

    let date = match parse_date(&form.date) {
        Ok(date) => date,
        Err(error) => {
            tracing::warn!("Rejected event date: {error}");
            return Error::from(error).into_alert_response();
        }
    };

    let mut calendar = match lock_calendar(&state) {
        Ok(calendar) => calendar,
        Err(error) => return error.into_alert_response(),
    };

    let alert = match calendar.add_event(&form.title, &form.description, date) {
        Ok(event) => {
            tracing::info!("Added event {} on {}", event.id, event.date);

            Alert::Success {
                message: "Event added successfully!".to_owned(),
                details: format!("\"{}\" is on {}", event.title, format_date_long(event.date)),
            }
        }
        Err(error) => {
            tracing::warn!("Rejected new event: {error}");
            return error.into_alert_response();
        }
    };

    html!(
        (calendar_content_view(&calendar, date, today))
        (alert.into_oob_html())
    )
    .into_response()
}

/// Remove an event from the calendar and re-render the day it was on.
pub async fn delete_event_endpoint(
    Path(event_id): Path<EventId>,
    State(state): State<CalendarState>,
) -> Response {
    let today = match local_today(&state.local_timezone) {
        Ok(today) => today,
        Err(error) => return error.into_alert_response(),
    };

    let mut calendar = match lock_calendar(&state) {
        Ok(calendar) => calendar,
        Err(error) => return error.into_alert_response(),
    };

    match calendar.remove_event(event_id) {
        Ok(event) => {
            tracing::info!("Removed event {event_id}");

            let alert = Alert::SuccessSimple {
                message: "Event removed successfully!".to_owned(),
            };

            html!(
                (calendar_content_view(&calendar, event.date, today))
                (alert.into_oob_html())
            )
            .into_response()
        }
        Err(error) => {
            tracing::warn!("Could not remove event {event_id}: {error}");
            error.into_alert_response()
        }
    }
}
