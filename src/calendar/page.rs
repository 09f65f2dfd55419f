//! The calendar page: a month grid with the selected day's events.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use serde::Deserialize;
use time::Date;

use crate::{
    AppState, Error,
    calendar::{
        EventCalendar,
        grid::{month_grid, next_month, previous_month},
    },
    endpoints::{self, format_endpoint},
    html::{
        BUTTON_DELETE_STYLE, BUTTON_PRIMARY_STYLE, BUTTON_SECONDARY_STYLE, CARD_STYLE,
        FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, PAGE_CONTAINER_STYLE, base, format_date_long,
    },
    navigation::with_sidebar,
    timezone::local_today,
    validation::{ISO_DATE_FORMAT, parse_date},
};

/// The state needed for the calendar page.
#[derive(Debug, Clone)]
pub struct CalendarState {
    pub calendar: Arc<Mutex<EventCalendar>>,
    pub local_timezone: String,
}

impl FromRef<AppState> for CalendarState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            calendar: state.calendar.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// The day selected on the calendar page.
#[derive(Debug, Default, Deserialize)]
pub struct CalendarQuery {
    pub day: Option<String>,
}

const WEEKDAY_LABELS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

pub(super) fn format_iso_date(date: Date) -> String {
    date.format(ISO_DATE_FORMAT)
        .unwrap_or_else(|_| date.to_string())
}

fn calendar_url(date: Date) -> String {
    format!("{}?day={}", endpoints::CALENDAR_VIEW, format_iso_date(date))
}

/// Render the calendar page for the day in the query.
///
/// A missing or malformed day selects today.
pub async fn get_calendar_page(
    State(state): State<CalendarState>,
    Query(query): Query<CalendarQuery>,
) -> Result<Response, Error> {
    let today = local_today(&state.local_timezone)?;
    let selected_day = query
        .day
        .as_deref()
        .and_then(|day| parse_date(day).ok())
        .unwrap_or(today);

    let calendar = state
        .calendar
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire calendar lock: {error}"))
        .map_err(|_| Error::StoreLockError)?;

    let content = html!(
        div class=(PAGE_CONTAINER_STYLE)
        {
            div class="mb-6"
            {
                h1 class="text-2xl font-bold" { "Calendar" }
                p class="text-gray-600 dark:text-gray-400" { "Plan and review upcoming events." }
            }

            (calendar_content_view(&calendar, selected_day, today))
        }
    );

    Ok(base(
        "Calendar",
        &[],
        &with_sidebar(endpoints::CALENDAR_VIEW, &content),
    )
    .into_response())
}

/// The month grid, the selected day's events and the form to add an event.
///
/// This is the part of the page that is swapped after adding or removing an event.
pub(super) fn calendar_content_view(
    calendar: &EventCalendar,
    selected_day: Date,
    today: Date,
) -> Markup {
    let weeks = month_grid(selected_day);
    let events = calendar.events_on(selected_day);

    html!(
        div id="calendar-content" class="grid grid-cols-1 lg:grid-cols-12 gap-6"
        {
            section class={ (CARD_STYLE) " lg:col-span-7" }
            {
                div class="flex items-center justify-between mb-4"
                {
                    @if let Some(month) = previous_month(selected_day) {
                        a
                            href=(calendar_url(month))
                            class=(BUTTON_SECONDARY_STYLE)
                            aria-label="Previous month"
                        {
                            "‹"
                        }
                    } @else {
                        span {}
                    }

                    h2 class="text-lg font-semibold" id="calendar-month"
                    {
                        (selected_day.month()) " " (selected_day.year())
                    }

                    @if let Some(month) = next_month(selected_day) {
                        a
                            href=(calendar_url(month))
                            class=(BUTTON_SECONDARY_STYLE)
                            aria-label="Next month"
                        {
                            "›"
                        }
                    } @else {
                        span {}
                    }
                }

                table id="month-grid" class="w-full text-center text-sm"
                {
                    thead
                    {
                        tr
                        {
                            @for label in WEEKDAY_LABELS {
                                th scope="col" class="py-2 text-gray-500 dark:text-gray-400" { (label) }
                            }
                        }
                    }

                    tbody
                    {
                        @for week in &weeks {
                            tr
                            {
                                @for day in week {
                                    td class="p-1"
                                    {
                                        @if let Some(day) = *day {
                                            (day_link(day, selected_day, today, calendar.has_events(day)))
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }

            section class={ (CARD_STYLE) " lg:col-span-5 flex flex-col gap-4" }
            {
                h2 class="text-lg font-semibold" id="selected-day"
                {
                    (selected_day.weekday()) ", " (format_date_long(selected_day))
                }

                @if events.is_empty() {
                    p class="text-sm text-gray-500 dark:text-gray-400" { "No events scheduled" }
                } @else {
                    ul id="day-events" class="space-y-2"
                    {
                        @for event in &events {
                            li class="p-3 border rounded-md border-gray-200 dark:border-gray-700"
                            {
                                div class="flex justify-between items-start gap-2"
                                {
                                    div
                                    {
                                        h3 class="font-medium" { (event.title) }

                                        @if let Some(description) = &event.description {
                                            p class="text-sm text-gray-500 dark:text-gray-400 mt-1"
                                            {
                                                (description)
                                            }
                                        }
                                    }

                                    button
                                        type="button"
                                        class=(BUTTON_DELETE_STYLE)
                                        hx-delete=(format_endpoint(endpoints::DELETE_EVENT, event.id))
                                        hx-target="#calendar-content"
                                        hx-swap="outerHTML"
                                        hx-target-error="#alert-container"
                                        hx-confirm={ "Remove the event \"" (event.title) "\"?" }
                                    {
                                        "Remove"
                                    }
                                }
                            }
                        }
                    }
                }

                (add_event_form_view(selected_day))
            }
        }
    )
}

fn day_link(day: Date, selected_day: Date, today: Date, has_events: bool) -> Markup {
    let in_month = day.month() == selected_day.month();

    let style = if day == selected_day {
        "flex flex-col items-center rounded-lg py-2 text-white bg-blue-600 dark:bg-blue-500"
    } else if day == today {
        "flex flex-col items-center rounded-lg py-2 font-semibold text-blue-600 \
        dark:text-blue-400 hover:bg-gray-100 dark:hover:bg-gray-700"
    } else if in_month {
        "flex flex-col items-center rounded-lg py-2 hover:bg-gray-100 dark:hover:bg-gray-700"
    } else {
        "flex flex-col items-center rounded-lg py-2 text-gray-400 dark:text-gray-600 \
        hover:bg-gray-100 dark:hover:bg-gray-700"
    };

    html!(
        a
            href=(calendar_url(day))
            class=(style)
            data-date=(format_iso_date(day))
            data-has-events[has_events]
            aria-current=[(day == selected_day).then_some("date")]
        {
            span { (day.day()) }

            @if has_events {
                span class="w-1.5 h-1.5 mt-0.5 rounded-full bg-blue-500" aria-label="Has events" {}
            }
        }
    )
}

fn add_event_form_view(selected_day: Date) -> Markup {
    html!(
        form
            hx-post=(endpoints::POST_EVENT)
            hx-target="#calendar-content"
            hx-swap="outerHTML"
            hx-target-error="#alert-container"
            class="space-y-4 pt-4 border-t border-gray-200 dark:border-gray-700"
        {
            h3 class="font-medium" { "Add Event" }

            input type="hidden" name="date" value=(format_iso_date(selected_day));

            div
            {
                label for="event-title" class=(FORM_LABEL_STYLE) { "Event Title" }
                input
                    id="event-title"
                    type="text"
                    name="title"
                    placeholder="Enter event title"
                    required
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="event-description" class=(FORM_LABEL_STYLE) { "Description (Optional)" }
                input
                    id="event-description"
                    type="text"
                    name="description"
                    placeholder="Enter event description"
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Add Event" }
        }
    )
}
