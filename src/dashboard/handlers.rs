//! Dashboard HTTP handler and view rendering.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use time::Date;

use crate::{
    AppState, Error,
    calendar::{CalendarEvent, EventCalendar},
    charts::{PageChart, charts_head_elements, charts_view},
    dashboard::{
        cards::{StatCard, stat_cards_view},
        charts::program_progress_chart,
    },
    endpoints,
    html::{
        BADGE_GREEN_STYLE, BADGE_RED_STYLE, CARD_STYLE, LINK_STYLE, PAGE_CONTAINER_STYLE, base,
        format_currency, format_date_long, progress_bar,
    },
    navigation::with_sidebar,
    progress::{EmployeeRoster, Program, ProgressBand, band_bar_style},
    rent::{MonthKey, MonthlyCollection, RentLedger},
    resources::ContactDirectory,
    timezone::local_today,
};

/// The number of upcoming events listed on the dashboard.
const UPCOMING_EVENT_LIMIT: usize = 5;

/// The state needed for displaying the dashboard page.
#[derive(Debug, Clone)]
pub struct DashboardState {
    pub rent_ledger: Arc<Mutex<RentLedger>>,
    pub calendar: Arc<Mutex<EventCalendar>>,
    pub roster: Arc<Mutex<EmployeeRoster>>,
    pub contacts: Arc<Mutex<ContactDirectory>>,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            rent_ledger: state.rent_ledger.clone(),
            calendar: state.calendar.clone(),
            roster: state.roster.clone(),
            contacts: state.contacts.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Holds all the data needed to render the dashboard.
struct DashboardData {
    event_count: usize,
    team_size: usize,
    resource_count: usize,
    average_progress: u32,
    program_progress: Vec<(Program, u32)>,
    rent: MonthlyCollection,
    upcoming_events: Vec<CalendarEvent>,
}

/// Read each store in turn, holding only one lock at a time.
fn build_dashboard_data(state: &DashboardState, today: Date) -> Result<DashboardData, Error> {
    let (event_count, upcoming_events) = {
        let calendar = state
            .calendar
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire calendar lock: {error}"))
            .map_err(|_| Error::StoreLockError)?;

        let upcoming = calendar
            .upcoming(today, UPCOMING_EVENT_LIMIT)
            .into_iter()
            .cloned()
            .collect();

        (calendar.len(), upcoming)
    };

    let (team_size, average_progress, program_progress) = {
        let roster = state
            .roster
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire employee roster lock: {error}"))
            .map_err(|_| Error::StoreLockError)?;

        let program_progress = Program::ALL
            .into_iter()
            .map(|program| (program, roster.average_progress(Some(program))))
            .collect();

        (roster.len(), roster.average_progress(None), program_progress)
    };

    let resource_count = state
        .contacts
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire contacts lock: {error}"))
        .map_err(|_| Error::StoreLockError)?
        .len();

    let current_month = MonthKey::from_date(today);
    let rent = state
        .rent_ledger
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire rent ledger lock: {error}"))
        .map_err(|_| Error::StoreLockError)?
        .collection_summary(std::slice::from_ref(&current_month))?
        .pop()
        .unwrap_or(MonthlyCollection {
            month: current_month,
            paid_count: 0,
            unpaid_count: 0,
            collected: Default::default(),
        });

    Ok(DashboardData {
        event_count,
        team_size,
        resource_count,
        average_progress,
        program_progress,
        rent,
        upcoming_events,
    })
}

/// Display a page with an overview of every part of the dashboard.
pub async fn get_dashboard_page(State(state): State<DashboardState>) -> Result<Response, Error> {
    let today = local_today(&state.local_timezone)?;
    let data = build_dashboard_data(&state, today)?;

    let charts = [PageChart {
        id: "program-progress-chart",
        options: program_progress_chart(&data.program_progress).to_string(),
    }];

    let content = dashboard_view(&data, &charts);

    Ok(base(
        "Dashboard",
        &charts_head_elements(&charts),
        &with_sidebar(endpoints::DASHBOARD_VIEW, &content),
    )
    .into_response())
}

fn dashboard_view(data: &DashboardData, charts: &[PageChart]) -> Markup {
    let cards = [
        StatCard {
            key: "events",
            label: "Events",
            value: data.event_count.to_string(),
            link: endpoints::CALENDAR_VIEW,
        },
        StatCard {
            key: "team",
            label: "Team",
            value: data.team_size.to_string(),
            link: endpoints::EMPLOYEES_VIEW,
        },
        StatCard {
            key: "resources",
            label: "Resources",
            value: data.resource_count.to_string(),
            link: endpoints::RESOURCES_VIEW,
        },
        StatCard {
            key: "completion",
            label: "Completion",
            value: format!("{}%", data.average_progress),
            link: endpoints::EMPLOYEES_VIEW,
        },
    ];

    html!(
        div class=(PAGE_CONTAINER_STYLE)
        {
            div class="mb-6"
            {
                h1 class="text-2xl font-bold" { "Dashboard" }
                p class="text-gray-600 dark:text-gray-400" { "An overview of everything at a glance." }
            }

            (stat_cards_view(&cards))

            div class="grid grid-cols-1 lg:grid-cols-3 gap-6 mb-6"
            {
                (rent_overview_view(&data.rent))
                (upcoming_events_view(&data.upcoming_events))
                (program_progress_view(&data.program_progress))
            }

            (charts_view(charts))
        }
    )
}

fn rent_overview_view(rent: &MonthlyCollection) -> Markup {
    html!(
        section id="rent-overview" class=(CARD_STYLE)
        {
            h2 class="text-lg font-semibold" { "Rent for " (rent.month) }

            div class="flex gap-2 my-4"
            {
                span class=(BADGE_GREEN_STYLE) data-summary="paid" { (rent.paid_count) " paid" }
                span class=(BADGE_RED_STYLE) data-summary="unpaid" { (rent.unpaid_count) " unpaid" }
            }

            p class="text-sm text-gray-600 dark:text-gray-400"
            {
                "Collected: "
                span data-summary="collected" { (format_currency(rent.collected)) }
            }

            a href=(endpoints::RENT_TRACKER_VIEW) class={ "text-sm " (LINK_STYLE) } { "Open rent tracker" }
        }
    )
}

fn upcoming_events_view(events: &[CalendarEvent]) -> Markup {
    html!(
        section id="upcoming-events" class=(CARD_STYLE)
        {
            h2 class="text-lg font-semibold mb-4" { "Upcoming Events" }

            @if events.is_empty() {
                p class="text-sm text-gray-500 dark:text-gray-400" { "No upcoming events" }
            } @else {
                ul class="space-y-2"
                {
                    @for event in events {
                        li
                        {
                            p class="font-medium" { (event.title) }
                            p class="text-sm text-gray-500 dark:text-gray-400"
                            {
                                (format_date_long(event.date))
                            }
                        }
                    }
                }
            }
        }
    )
}

fn program_progress_view(program_progress: &[(Program, u32)]) -> Markup {
    html!(
        section id="program-progress" class=(CARD_STYLE)
        {
            h2 class="text-lg font-semibold mb-4" { "Onboarding Programs" }

            ul class="space-y-4"
            {
                @for (program, average) in program_progress {
                    li data-program=(program.slug())
                    {
                        div class="flex justify-between text-sm mb-1"
                        {
                            a
                                href={ (endpoints::EMPLOYEES_VIEW) "?program=" (program.slug()) }
                                class=(LINK_STYLE)
                            {
                                (program.label())
                            }
                            span data-average { (average) "%" }
                        }

                        (progress_bar(*average, band_bar_style(ProgressBand::from_percent(*average))))
                    }
                }
            }
        }
    )
}

#[cfg(test)]
mod dashboard_tests {
    use std::sync::{Arc, Mutex};

    use axum::extract::State;
    use scraper::{Html, Selector};
    use time::Duration;

    use crate::{
        calendar::EventCalendar,
        progress::EmployeeRoster,
        rent::{RentLedger, RentPolicy},
        resources::{ContactDirectory, NewContact},
        seed,
        test_utils::{assert_status_ok, assert_valid_html, parse_html_document},
        timezone::local_now,
    };

    use super::{DashboardState, get_dashboard_page};

    fn get_state() -> DashboardState {
        let now = local_now("Etc/UTC").unwrap();
        let today = now.date();

        let mut calendar = EventCalendar::new();
        calendar
            .add_event("Yesterday's meeting", "", today - Duration::days(1))
            .unwrap();
        calendar
            .add_event("Chamber mixer", "", today + Duration::days(2))
            .unwrap();

        let mut contacts = ContactDirectory::new();
        contacts
            .add_contact(NewContact {
                name: "Maria Rodriguez".to_owned(),
                email: "maria@example.com".to_owned(),
                ..Default::default()
            })
            .unwrap();

        DashboardState {
            rent_ledger: Arc::new(Mutex::new(seed::rent_ledger(RentPolicy::default(), now))),
            calendar: Arc::new(Mutex::new(calendar)),
            roster: Arc::new(Mutex::new(seed::employee_roster())),
            contacts: Arc::new(Mutex::new(contacts)),
            local_timezone: "Etc/UTC".to_owned(),
        }
    }

    async fn get_page(state: DashboardState) -> Html {
        let response = get_dashboard_page(State(state)).await.unwrap();

        assert_status_ok(&response);
        let html = parse_html_document(response).await;
        assert_valid_html(&html);
        html
    }

    fn text_of(html: &Html, selector: &str) -> String {
        html.select(&Selector::parse(selector).unwrap())
            .next()
            .unwrap_or_else(|| panic!("Nothing matches {selector}"))
            .text()
            .collect::<String>()
            .trim()
            .to_owned()
    }

    #[tokio::test]
    async fn stat_cards_count_each_store() {
        let html = get_page(get_state()).await;

        assert_eq!(text_of(&html, "[data-stat=events] [data-value]"), "2");
        assert_eq!(text_of(&html, "[data-stat=team] [data-value]"), "6");
        assert_eq!(text_of(&html, "[data-stat=resources] [data-value]"), "1");
        assert_eq!(text_of(&html, "[data-stat=completion] [data-value]"), "61%");
    }

    #[tokio::test]
    async fn shows_this_months_rent() {
        let html = get_page(get_state()).await;

        assert_eq!(text_of(&html, "#rent-overview [data-summary=paid]"), "5 paid");
        assert_eq!(text_of(&html, "#rent-overview [data-summary=unpaid]"), "3 unpaid");
    }

    #[tokio::test]
    async fn lists_only_upcoming_events() {
        let html = get_page(get_state()).await;

        let titles = html
            .select(&Selector::parse("#upcoming-events li p.font-medium").unwrap())
            .map(|title| title.text().collect::<String>())
            .collect::<Vec<_>>();

        assert_eq!(titles, ["Chamber mixer"]);
    }

    #[tokio::test]
    async fn shows_progress_per_program() {
        let html = get_page(get_state()).await;

        assert_eq!(text_of(&html, "[data-program=\"90-day\"] [data-average]"), "55%");
        assert_eq!(text_of(&html, "[data-program=graduation] [data-average]"), "67%");
        assert!(
            html.select(&Selector::parse("#program-progress-chart").unwrap())
                .next()
                .is_some()
        );
    }

    #[tokio::test]
    async fn empty_stores_render() {
        let state = DashboardState {
            rent_ledger: Arc::new(Mutex::new(RentLedger::new(Vec::new(), RentPolicy::default()))),
            calendar: Arc::new(Mutex::new(EventCalendar::new())),
            roster: Arc::new(Mutex::new(EmployeeRoster::new(Vec::new()))),
            contacts: Arc::new(Mutex::new(ContactDirectory::new())),
            local_timezone: "Etc/UTC".to_owned(),
        };

        let html = get_page(state).await;

        assert_eq!(text_of(&html, "[data-stat=completion] [data-value]"), "0%");
        assert!(html.html().contains("No upcoming events"));
    }
}
