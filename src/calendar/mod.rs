//! The calendar of events.

mod domain;
mod events;
mod grid;
mod page;

pub use domain::{CalendarEvent, EventCalendar, EventId};
pub use events::{create_event_endpoint, delete_event_endpoint};
pub use page::get_calendar_page;
