//! The rent ledger: members, their monthly rent payments and kitchen hours.

mod calculator;
mod charts;
mod domain;
mod ledger;
mod month;
mod page;
mod update;

pub use calculator::{DEFAULT_HOURLY_RATE, HoursAdjustment, RentPolicy};
pub use domain::{Department, Member, MemberId, Payment, PaymentRecord};
pub use ledger::{MonthlyCollection, RentLedger};
pub use month::{MonthKey, trailing_months};
pub use page::get_rent_tracker_page;
pub use update::{
    toggle_payment_endpoint, update_base_rent_endpoint, update_variable_hours_endpoint,
};
