//! Application router configuration.

use axum::{
    Router,
    routing::{delete, get, post, put},
};
use tower_http::services::ServeDir;

use crate::{
    AppState,
    attendance::{create_attendance_endpoint, delete_attendance_endpoint, get_event_tracking_page},
    calendar::{create_event_endpoint, delete_event_endpoint, get_calendar_page},
    dashboard::get_dashboard_page,
    endpoints,
    internal_server_error::get_internal_server_error_page,
    not_found::get_404_not_found,
    progress::{get_employee_progress_page, toggle_subtask_endpoint},
    rent::{
        get_rent_tracker_page, toggle_payment_endpoint, update_base_rent_endpoint,
        update_variable_hours_endpoint,
    },
    resources::{create_resource_endpoint, delete_resource_endpoint, get_resources_page},
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let page_routes = Router::new()
        .route(endpoints::DASHBOARD_VIEW, get(get_dashboard_page))
        .route(endpoints::CALENDAR_VIEW, get(get_calendar_page))
        .route(endpoints::EMPLOYEES_VIEW, get(get_employee_progress_page))
        .route(endpoints::RENT_TRACKER_VIEW, get(get_rent_tracker_page))
        .route(endpoints::EVENT_TRACKING_VIEW, get(get_event_tracking_page))
        .route(endpoints::RESOURCES_VIEW, get(get_resources_page))
        .route(
            endpoints::INTERNAL_ERROR_VIEW,
            get(get_internal_server_error_page),
        );

    let api_routes = Router::new()
        .route(endpoints::POST_EVENT, post(create_event_endpoint))
        .route(endpoints::DELETE_EVENT, delete(delete_event_endpoint))
        .route(endpoints::TOGGLE_SUBTASK, post(toggle_subtask_endpoint))
        .route(endpoints::TOGGLE_RENT_PAYMENT, post(toggle_payment_endpoint))
        .route(endpoints::PUT_BASE_RENT, put(update_base_rent_endpoint))
        .route(
            endpoints::PUT_VARIABLE_HOURS,
            put(update_variable_hours_endpoint),
        )
        .route(endpoints::POST_ATTENDANCE, post(create_attendance_endpoint))
        .route(
            endpoints::DELETE_ATTENDANCE,
            delete(delete_attendance_endpoint),
        )
        .route(endpoints::POST_RESOURCE, post(create_resource_endpoint))
        .route(endpoints::DELETE_RESOURCE, delete(delete_resource_endpoint));

    page_routes
        .merge(api_routes)
        .nest_service(endpoints::STATIC, ServeDir::new("static/"))
        .fallback(get_404_not_found)
        .with_state(state)
}

#[cfg(test)]
mod router_tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use scraper::{Html, Selector};

    use crate::{AppState, DashboardConfig, endpoints, endpoints::format_endpoint, rent::MonthKey};

    use super::build_router;

    fn get_server() -> (TestServer, AppState) {
        let state = AppState::new(DashboardConfig::default()).expect("Could not create app state");
        let server =
            TestServer::try_new(build_router(state.clone())).expect("Could not create test server.");

        (server, state)
    }

    #[tokio::test]
    async fn every_page_renders() {
        let (server, _) = get_server();

        for page in [
            endpoints::DASHBOARD_VIEW,
            endpoints::CALENDAR_VIEW,
            endpoints::EMPLOYEES_VIEW,
            endpoints::RENT_TRACKER_VIEW,
            endpoints::EVENT_TRACKING_VIEW,
            endpoints::RESOURCES_VIEW,
        ] {
            let response = server.get(page).await;

            response.assert_status_ok();
            let html = Html::parse_document(&response.text());
            let current = html
                .select(&Selector::parse("a[aria-current=page]").unwrap())
                .next()
                .unwrap_or_else(|| panic!("No current page link on {page}"));
            assert_eq!(current.value().attr("href"), Some(page));
        }
    }

    #[tokio::test]
    async fn unknown_route_is_404() {
        let (server, _) = get_server();

        server.get("/nope").await.assert_status_not_found();
    }

    #[tokio::test]
    async fn error_page_is_500() {
        let (server, _) = get_server();

        server
            .get(endpoints::INTERNAL_ERROR_VIEW)
            .await
            .assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn toggling_rent_updates_the_ledger() {
        let (server, state) = get_server();
        let month = MonthKey::new("June 2025");

        server
            .post(&format_endpoint(endpoints::TOGGLE_RENT_PAYMENT, 2))
            .form(&[("month", month.as_str())])
            .await
            .assert_status_ok();

        let ledger = state.rent_ledger.lock().unwrap();
        assert!(ledger.record_for(2, &month).unwrap().is_paid());
    }

    #[tokio::test]
    async fn invalid_base_rent_is_bad_request() {
        let (server, _) = get_server();

        server
            .put(&format_endpoint(endpoints::PUT_BASE_RENT, 1))
            .form(&[("amount", "-10"), ("month", "June 2025")])
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn unknown_member_is_not_found() {
        let (server, _) = get_server();

        server
            .post(&format_endpoint(endpoints::TOGGLE_RENT_PAYMENT, 99))
            .form(&[("month", "June 2025")])
            .await
            .assert_status_not_found();
    }

    #[tokio::test]
    async fn adding_and_removing_an_event() {
        let (server, state) = get_server();

        server
            .post(endpoints::POST_EVENT)
            .form(&[("title", "Team lunch"), ("description", ""), ("date", "2025-06-14")])
            .await
            .assert_status_ok();
        assert_eq!(state.calendar.lock().unwrap().len(), 1);

        server
            .delete(&format_endpoint(endpoints::DELETE_EVENT, 1))
            .await
            .assert_status_ok();
        assert!(state.calendar.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn toggling_a_subtask() {
        let (server, state) = get_server();
        let before = state.roster.lock().unwrap().average_progress(None);

        server
            .post(&format_endpoint(endpoints::TOGGLE_SUBTASK, 4))
            .await
            .assert_status_ok();

        assert!(state.roster.lock().unwrap().average_progress(None) > before);
    }

    #[tokio::test]
    async fn adding_a_resource() {
        let (server, state) = get_server();

        server
            .post(endpoints::POST_RESOURCE)
            .form(&[("name", "Maria Rodriguez"), ("email", "maria@example.com")])
            .await
            .assert_status_ok();

        assert_eq!(state.contacts.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn recording_attendance() {
        let (server, _) = get_server();

        let response = server
            .post(endpoints::POST_ATTENDANCE)
            .form(&[
                ("kind", "education-hours"),
                ("member_name", "Bob Brown"),
                ("date", "2025-04-20"),
                ("notes", "Workshop"),
                ("hours", "2"),
            ])
            .await;

        response.assert_status_ok();
        assert!(response.text().contains("8 / 40 hours"));

        server
            .delete(&format_endpoint(endpoints::DELETE_ATTENDANCE, 1))
            .await
            .assert_status_ok();
    }
}
