//! The dashboard overview: counts from every page, this month's rent and upcoming events.

mod cards;
mod charts;
mod handlers;

pub use handlers::get_dashboard_page;
