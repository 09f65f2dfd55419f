//! An internal administration dashboard.
//!
//! The dashboard is a sidebar-navigated web app with pages for a calendar of
//! events, employee progress across onboarding programs, a monthly rent and
//! kitchen-hours ledger, attendance tracking, and a directory of contacts.
//!
//! This library provides an HTTP server that directly serves HTML pages. All
//! data lives in memory, is seeded at start-up and is discarded on shutdown.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::{HxReswap, SwapOption};
use axum_server::Handle;
use tokio::signal;

mod alert;
mod app_state;
mod attendance;
mod calendar;
mod charts;
mod config;
mod dashboard;
mod endpoints;
mod html;
mod internal_server_error;
mod logging;
mod navigation;
mod not_found;
mod progress;
mod rent;
mod resources;
mod routing;
mod seed;
mod timezone;
mod validation;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use config::DashboardConfig;
pub use logging::logging_middleware;
pub use rent::{DEFAULT_HOURLY_RATE, HoursAdjustment, RentPolicy};
pub use routing::build_router;
pub use validation::ValidationError;

use crate::{
    alert::Alert,
    attendance::AttendanceRecordId,
    calendar::EventId,
    internal_server_error::InternalServerError,
    not_found::get_404_not_found_response,
    progress::SubtaskId,
    rent::MemberId,
    resources::ContactId,
};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The user submitted a form with a value that could not be accepted.
    ///
    /// No state is changed when this error is returned, and the form should
    /// stay open so the user can correct the value.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A rent ledger operation referred to a member that does not exist.
    ///
    /// The member list is fixed at start-up, so this indicates a stale page
    /// or a hand-crafted request.
    #[error("there is no member with the ID {0}")]
    MemberNotFound(MemberId),

    /// Tried to delete a calendar event that does not exist.
    #[error("there is no event with the ID {0}")]
    EventNotFound(EventId),

    /// Tried to toggle an onboarding subtask that does not exist.
    #[error("there is no subtask with the ID {0}")]
    SubtaskNotFound(SubtaskId),

    /// Tried to access an attendance record that does not exist.
    #[error("there is no attendance record with the ID {0}")]
    AttendanceRecordNotFound(AttendanceRecordId),

    /// Tried to delete a contact that does not exist.
    #[error("there is no contact with the ID {0}")]
    ContactNotFound(ContactId),

    /// The mutex guarding one of the in-memory stores was poisoned by a
    /// panicking thread.
    #[error("could not acquire the store lock")]
    StoreLockError,

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::MemberNotFound(_)
            | Error::EventNotFound(_)
            | Error::SubtaskNotFound(_)
            | Error::AttendanceRecordNotFound(_)
            | Error::ContactNotFound(_) => get_404_not_found_response(),
            Error::InvalidTimezoneError(timezone) => InternalServerError {
                description: "Invalid Timezone Settings",
                fix: &format!(
                    "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                ),
            }
            .into_response(),
            Error::StoreLockError => InternalServerError::default().into_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}

impl Error {
    /// Render the error as a toast for an htmx request.
    ///
    /// The response body is swapped into the alert container by the
    /// `hx-target-error` attribute on the form that made the request.
    fn into_alert_response(self) -> Response {
        let (status_code, message, details) = match &self {
            Error::Validation(error) => (
                StatusCode::BAD_REQUEST,
                "Invalid input".to_owned(),
                format!("{error}. Nothing was changed."),
            ),
            Error::MemberNotFound(member_id) => (
                StatusCode::NOT_FOUND,
                "Member not found".to_owned(),
                format!(
                    "Could not find a member with the ID {member_id}. \
                    Try refreshing the page."
                ),
            ),
            Error::EventNotFound(_) => (
                StatusCode::NOT_FOUND,
                "Could not remove event".to_owned(),
                "The event could not be found. \
                Try refreshing the page to see if the event has already been removed."
                    .to_owned(),
            ),
            Error::SubtaskNotFound(_) => (
                StatusCode::NOT_FOUND,
                "Could not update subtask".to_owned(),
                "The subtask could not be found.".to_owned(),
            ),
            Error::AttendanceRecordNotFound(_) => (
                StatusCode::NOT_FOUND,
                "Could not find attendance record".to_owned(),
                "The attendance record could not be found.".to_owned(),
            ),
            Error::ContactNotFound(_) => (
                StatusCode::NOT_FOUND,
                "Could not remove resource".to_owned(),
                "The resource could not be found. \
                Try refreshing the page to see if it has already been removed."
                    .to_owned(),
            ),
            Error::InvalidTimezoneError(timezone) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Invalid Timezone Settings".to_owned(),
                format!(
                    "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                ),
            ),
            Error::StoreLockError => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Something went wrong".to_owned(),
                "An unexpected error occurred, check the server logs for more details.".to_owned(),
            ),
        };

        // The requesting element may swap its own target with `outerHTML`, which
        // would replace the alert container itself.
        (
            status_code,
            HxReswap(SwapOption::InnerHtml),
            Alert::Error { message, details }.into_html(),
        )
            .into_response()
    }
}
