//! Endpoints for recording and removing attendance.

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
    attendance::{
        AttendanceKind, AttendanceLog, AttendanceRecordId,
        page::{EventTrackingState, attendance_content_view},
    },
    validation::{ValidationError, parse_date},
};

#[derive(Debug, Clone, Deserialize)]
pub struct AttendanceForm {
    /// The slug of the [AttendanceKind].
    pub kind: String,
    pub member_name: String,
    /// The day attended as `YYYY-MM-DD`.
    pub date: String,
    #[serde(default)]
    pub notes: String,
    /// Only read for education hours.
    #[serde(default)]
    pub hours: String,
}

fn lock_attendance(
    state: &EventTrackingState,
) -> Result<std::sync::MutexGuard<'_, AttendanceLog>, Error> {
    state
        .attendance
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire attendance lock: {error}"))
        .map_err(|_| Error::StoreLockError)
}

/// Record attendance and re-render the records for its kind.
pub async fn create_attendance_endpoint(
    State(state): State<EventTrackingState>,
    Form(form): Form<AttendanceForm>,
) -> Response {
    let Some(kind) = AttendanceKind::from_slug(&form.kind) else {
        tracing::warn!("Rejected attendance with unknown kind {:?}", form.kind);
        return Error::from(ValidationError::InvalidAttendanceKind(form.kind)).into_alert_response();
    };

    let date = match parse_date(&form.date) {
        Ok(date) => date,
        Err(error) => {
            tracing::warn!("Rejected attendance date: {error}");
            return Error::from(error).into_alert_response();
        }
    };

    let mut attendance = match lock_attendance(&state) {
        Ok(attendance) => attendance,
        Err(error) => return error.into_alert_response(),
    };

    let alert = match attendance.add_record(kind, &form.member_name, date, &form.notes, &form.hours)
    {
        Ok(record) => {
            tracing::info!("Added {kind} record {} for {}", record.id, record.member_name);

            Alert::Success {
                message: "Attendance recorded successfully!".to_owned(),
                details: format!("{} was added to {}", record.member_name, kind.label()),
            }
        }
        Err(error) => {
            tracing::warn!("Rejected {kind} record: {error}");
            return error.into_alert_response();
        }
    };

    html!(
        (attendance_content_view(&attendance, kind))
        (alert.into_oob_html())
    )
    .into_response()
}

/// Remove an attendance record and re-render the records for its kind.
pub async fn delete_attendance_endpoint(
    Path(record_id): Path<AttendanceRecordId>,
    State(state): State<EventTrackingState>,
) -> Response {
    let mut attendance = match lock_attendance(&state) {
        Ok(attendance) => attendance,
        Err(error) => return error.into_alert_response(),
    };

    match attendance.remove_record(record_id) {
        Ok(record) => {
            tracing::info!("Removed attendance record {record_id}");

            let alert = Alert::SuccessSimple {
                message: "Record removed successfully!".to_owned(),
            };

            html!(
                (attendance_content_view(&attendance, record.kind))
                (alert.into_oob_html())
            )
            .into_response()
        }
        Err(error) => {
            tracing::warn!("Could not remove attendance record {record_id}: {error}");
            error.into_alert_response()
        }
    }
}
