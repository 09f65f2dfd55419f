//! The endpoint URIs.
//!
//! For endpoints that take a parameter, e.g., '/api/events/{event_id}', use [format_endpoint].

/// The dashboard overview, which is also the landing page.
pub const DASHBOARD_VIEW: &str = "/";
/// The page with the month calendar of events.
pub const CALENDAR_VIEW: &str = "/calendar";
/// The page for tracking employee progress across onboarding programs.
pub const EMPLOYEES_VIEW: &str = "/employees";
/// The page for the monthly rent and kitchen-hours ledger.
pub const RENT_TRACKER_VIEW: &str = "/rent-tracker";
/// The page for tracking attendance at pit sessions, chamber events and education hours.
pub const EVENT_TRACKING_VIEW: &str = "/event-tracking";
/// The page listing contact resources.
pub const RESOURCES_VIEW: &str = "/resources";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";
/// The route for static files.
pub const STATIC: &str = "/static";

/// The route to create a calendar event.
pub const POST_EVENT: &str = "/api/events";
/// The route to delete a calendar event.
pub const DELETE_EVENT: &str = "/api/events/{event_id}";
/// The route to toggle whether an onboarding subtask is complete.
pub const TOGGLE_SUBTASK: &str = "/api/subtasks/{subtask_id}/toggle";
/// The route to toggle whether a member has paid rent for a month.
pub const TOGGLE_RENT_PAYMENT: &str = "/api/rent/members/{member_id}/toggle";
/// The route to change a member's base rent.
pub const PUT_BASE_RENT: &str = "/api/rent/members/{member_id}/base-rent";
/// The route to change a member's kitchen hours.
pub const PUT_VARIABLE_HOURS: &str = "/api/rent/members/{member_id}/hours";
/// The route to record attendance.
pub const POST_ATTENDANCE: &str = "/api/attendance";
/// The route to delete an attendance record.
pub const DELETE_ATTENDANCE: &str = "/api/attendance/{record_id}";
/// The route to add a contact resource.
pub const POST_RESOURCE: &str = "/api/resources";
/// The route to remove a contact resource.
pub const DELETE_RESOURCE: &str = "/api/resources/{contact_id}";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/api/events/{event_id}', '{event_id}' is the parameter.
///
/// This function assumes that an endpoint path only contains ASCII characters
/// and a single parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// the original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let mut param_start = None;
    let mut param_end = None;

    for (i, c) in endpoint_path.chars().enumerate() {
        if c == '{' {
            param_start = Some(i);
        } else if param_start.is_some() && c == '}' {
            param_end = Some(i + 1);
            break;
        }
    }

    let param_start = match param_start {
        Some(start) => start,
        None => return endpoint_path.to_string(),
    };

    let param_end = param_end.unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}
