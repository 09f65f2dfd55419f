//! The event tracking page: attendance tables per kind and education hours progress.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use serde::Deserialize;

use crate::{
    AppState, Error,
    attendance::{AttendanceKind, AttendanceLog, AttendanceRecord, REQUIRED_EDUCATION_HOURS},
    endpoints::{self, format_endpoint},
    html::{
        BUTTON_DELETE_STYLE, BUTTON_PRIMARY_STYLE, CARD_STYLE, FORM_LABEL_STYLE,
        FORM_TEXT_INPUT_STYLE, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE,
        TABLE_ROW_STYLE, base, format_date_long, format_hours, progress_bar, tab_bar,
    },
    navigation::with_sidebar,
};

/// The state needed for the event tracking page and its endpoints.
#[derive(Debug, Clone)]
pub struct EventTrackingState {
    pub attendance: Arc<Mutex<AttendanceLog>>,
}

impl FromRef<AppState> for EventTrackingState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            attendance: state.attendance.clone(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct EventTrackingQuery {
    /// "pit-sessions", "chamber-events" or "education-hours".
    pub kind: Option<String>,
}

fn event_tracking_url(kind: AttendanceKind) -> String {
    format!("{}?kind={}", endpoints::EVENT_TRACKING_VIEW, kind.slug())
}

/// Render the event tracking page for the kind of attendance in the query.
///
/// Unknown kinds show pit sessions.
pub async fn get_event_tracking_page(
    State(state): State<EventTrackingState>,
    Query(query): Query<EventTrackingQuery>,
) -> Result<Response, Error> {
    let kind = query
        .kind
        .as_deref()
        .and_then(AttendanceKind::from_slug)
        .unwrap_or(AttendanceKind::PitSessions);

    let attendance = state
        .attendance
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire attendance lock: {error}"))
        .map_err(|_| Error::StoreLockError)?;

    let tabs = AttendanceKind::ALL.map(|kind| (kind.slug(), kind.label(), event_tracking_url(kind)));

    let content = html!(
        div class=(PAGE_CONTAINER_STYLE)
        {
            div class="mb-6"
            {
                h1 class="text-2xl font-bold" { "Event Tracking" }
                p class="text-gray-600 dark:text-gray-400"
                {
                    "Record attendance at pit sessions, chamber events and education hours."
                }
            }

            div class="mb-6" { (tab_bar(&tabs, kind.slug())) }

            (attendance_content_view(&attendance, kind))
        }
    );

    Ok(base(
        "Event Tracking",
        &[],
        &with_sidebar(endpoints::EVENT_TRACKING_VIEW, &content),
    )
    .into_response())
}

/// The records for `kind` and the form to add one.
///
/// This is the part of the page that is swapped after adding or removing a record.
pub(super) fn attendance_content_view(attendance: &AttendanceLog, kind: AttendanceKind) -> Markup {
    let records = attendance.records(kind);

    html!(
        div id="attendance-content" data-kind=(kind.slug()) class="grid grid-cols-1 lg:grid-cols-3 gap-6"
        {
            div class="lg:col-span-2 flex flex-col gap-6"
            {
                section class=(CARD_STYLE)
                {
                    h2 class="text-lg font-semibold mb-4" { (kind.singular_label()) " Attendance" }

                    (records_table_view(&records, kind))
                }

                @if kind.records_hours() {
                    (education_progress_view(attendance))
                }
            }

            section class=(CARD_STYLE)
            {
                (add_record_form_view(kind))
            }
        }
    )
}

fn records_table_view(records: &[&AttendanceRecord], kind: AttendanceKind) -> Markup {
    if records.is_empty() {
        return html!(
            p class="text-sm text-gray-500 dark:text-gray-400" { "No events recorded yet" }
        );
    }

    html!(
        div class="overflow-x-auto rounded-lg"
        {
            table id="attendance-records" class="w-full text-sm text-left rtl:text-right"
            {
                thead class=(TABLE_HEADER_STYLE)
                {
                    tr
                    {
                        th scope="col" class=(TABLE_CELL_STYLE) { "Member Name" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                        @if kind.records_hours() {
                            th scope="col" class=(TABLE_CELL_STYLE) { "Hours" }
                        }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Notes" }
                        th scope="col" class=(TABLE_CELL_STYLE) { span class="sr-only" { "Actions" } }
                    }
                }

                tbody
                {
                    @for record in records {
                        tr class=(TABLE_ROW_STYLE) data-record-id=(record.id)
                        {
                            td class=(TABLE_CELL_STYLE) { (record.member_name) }
                            td class=(TABLE_CELL_STYLE) { (format_date_long(record.date)) }
                            @if kind.records_hours() {
                                td class=(TABLE_CELL_STYLE)
                                {
                                    (record.hours.map(format_hours).unwrap_or_default())
                                }
                            }
                            td class=(TABLE_CELL_STYLE) { (record.notes) }
                            td class=(TABLE_CELL_STYLE)
                            {
                                button
                                    type="button"
                                    class=(BUTTON_DELETE_STYLE)
                                    hx-delete=(format_endpoint(endpoints::DELETE_ATTENDANCE, record.id))
                                    hx-target="#attendance-content"
                                    hx-swap="outerHTML"
                                    hx-target-error="#alert-container"
                                    hx-confirm={ "Remove the record for " (record.member_name) "?" }
                                {
                                    "Remove"
                                }
                            }
                        }
                    }
                }
            }
        }
    )
}

fn education_progress_view(attendance: &AttendanceLog) -> Markup {
    let progress = attendance.education_hours_by_member();

    html!(
        section id="education-progress" class=(CARD_STYLE)
        {
            h2 class="text-lg font-semibold mb-4"
            {
                "Education Hours Progress (" (REQUIRED_EDUCATION_HOURS) " hours required)"
            }

            @if progress.is_empty() {
                p class="text-sm text-gray-500 dark:text-gray-400" { "No education hours recorded yet" }
            } @else {
                ul class="space-y-4"
                {
                    @for member in &progress {
                        li data-member=(member.member_name) data-percent=(member.percent())
                        {
                            div class="flex justify-between text-sm mb-1"
                            {
                                span class="font-medium" { (member.member_name) }
                                span
                                {
                                    (member.hours.normalize()) " / " (REQUIRED_EDUCATION_HOURS) " hours"
                                }
                            }

                            (progress_bar(member.percent(), "bg-blue-600"))
                        }
                    }
                }
            }
        }
    )
}

fn add_record_form_view(kind: AttendanceKind) -> Markup {
    html!(
        form
            hx-post=(endpoints::POST_ATTENDANCE)
            hx-target="#attendance-content"
            hx-swap="outerHTML"
            hx-target-error="#alert-container"
            class="space-y-4"
        {
            h2 class="text-lg font-semibold" { "Add " (kind.singular_label()) }

            input type="hidden" name="kind" value=(kind.slug());

            div
            {
                label for="attendance-member-name" class=(FORM_LABEL_STYLE) { "Member Name" }
                input
                    id="attendance-member-name"
                    type="text"
                    name="member_name"
                    placeholder="Enter member name"
                    required
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="attendance-date" class=(FORM_LABEL_STYLE) { "Date" }
                input
                    id="attendance-date"
                    type="date"
                    name="date"
                    required
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            @if kind.records_hours() {
                div
                {
                    label for="attendance-hours" class=(FORM_LABEL_STYLE) { "Hours" }
                    input
                        id="attendance-hours"
                        type="number"
                        name="hours"
                        min="0.5"
                        step="0.5"
                        required
                        class=(FORM_TEXT_INPUT_STYLE);
                }
            }

            div
            {
                label for="attendance-notes" class=(FORM_LABEL_STYLE) { "Notes" }
                textarea
                    id="attendance-notes"
                    name="notes"
                    rows="3"
                    placeholder="Add any notes"
                    class=(FORM_TEXT_INPUT_STYLE)
                {}
            }

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Add Record" }
        }
    )
}
