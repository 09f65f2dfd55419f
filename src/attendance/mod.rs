//! Attendance tracking for pit sessions, chamber events and education hours.

mod domain;
mod page;
mod records;

pub use domain::{
    AttendanceKind, AttendanceLog, AttendanceRecord, AttendanceRecordId, REQUIRED_EDUCATION_HOURS,
};
pub use page::get_event_tracking_page;
pub use records::{create_attendance_endpoint, delete_attendance_endpoint};
