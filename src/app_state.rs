//! Implements a struct that holds the state of the server.

use std::sync::{Arc, Mutex};

use crate::{
    DashboardConfig, Error,
    attendance::AttendanceLog,
    calendar::EventCalendar,
    progress::EmployeeRoster,
    rent::RentLedger,
    resources::ContactDirectory,
    seed,
    timezone::local_now,
    validation::{MAX_AMOUNT, ValidationError},
};

/// The state of the server.
///
/// Each store sits behind its own lock so that, for example, toggling a
/// subtask does not wait on a rent update.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,

    /// How many months, ending at the current month, the rent tracker shows.
    pub months_displayed: usize,

    /// The members and their monthly rent payments.
    pub rent_ledger: Arc<Mutex<RentLedger>>,

    /// The calendar events.
    pub calendar: Arc<Mutex<EventCalendar>>,

    /// The employees in the onboarding programs.
    pub roster: Arc<Mutex<EmployeeRoster>>,

    /// Attendance at pit sessions, chamber events and education hours.
    pub attendance: Arc<Mutex<AttendanceLog>>,

    /// The contact resources.
    pub contacts: Arc<Mutex<ContactDirectory>>,
}

impl AppState {
    /// Create a new [AppState] with every store seeded with the start-up data.
    ///
    /// `config.local_timezone` should be a valid, canonical timezone name, e.g. "Pacific/Auckland".
    ///
    /// # Errors
    /// Returns [Error::InvalidTimezoneError] if the timezone is not a canonical timezone name,
    /// and [Error::Validation] if the hourly rate is negative or larger than [MAX_AMOUNT].
    pub fn new(config: DashboardConfig) -> Result<Self, Error> {
        let now = local_now(&config.local_timezone)?;

        let unit_rate = config.rent_policy.unit_rate;
        if unit_rate.is_sign_negative() && !unit_rate.is_zero() {
            return Err(ValidationError::NegativeNumber(unit_rate).into());
        }
        if unit_rate > MAX_AMOUNT {
            return Err(ValidationError::NumberTooLarge(unit_rate).into());
        }

        Ok(Self {
            local_timezone: config.local_timezone,
            months_displayed: config.months_displayed.max(1),
            rent_ledger: Arc::new(Mutex::new(seed::rent_ledger(config.rent_policy, now))),
            calendar: Arc::new(Mutex::new(EventCalendar::new())),
            roster: Arc::new(Mutex::new(seed::employee_roster())),
            attendance: Arc::new(Mutex::new(seed::attendance_log())),
            contacts: Arc::new(Mutex::new(ContactDirectory::new())),
        })
    }
}
