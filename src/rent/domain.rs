//! The members of the rent ledger and their payment records.

use std::fmt::Display;

use rust_decimal::Decimal;
use time::OffsetDateTime;

/// The ID of a member in the rent ledger.
pub type MemberId = i64;

/// The department a member belongs to.
///
/// The department decides whether kitchen hours apply to the member's rent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Department {
    Fletcher,
    Culinary,
}

impl Department {
    /// Whether members of this department record kitchen hours.
    pub fn has_variable_hours(self) -> bool {
        matches!(self, Department::Culinary)
    }

    pub fn label(self) -> &'static str {
        match self {
            Department::Fletcher => "Fletcher",
            Department::Culinary => "Culinary",
        }
    }
}

impl Display for Department {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A participant in the rent ledger.
#[derive(Debug, Clone, PartialEq)]
pub struct Member {
    pub id: MemberId,
    pub name: String,
    pub department: Department,
    /// The monthly rent before any kitchen-hours adjustment.
    pub base_rent: Decimal,
    /// The kitchen hours worked, only kept for members of a department with
    /// variable hours.
    pub variable_hours: Option<Decimal>,
}

impl Member {
    /// The kitchen hours that count towards this member's rent, if any.
    pub fn applicable_hours(&self) -> Option<Decimal> {
        if self.department.has_variable_hours() {
            self.variable_hours
        } else {
            None
        }
    }
}

/// The details captured at the moment a month's rent was marked as paid.
#[derive(Debug, Clone, PartialEq)]
pub struct Payment {
    pub paid_on: OffsetDateTime,
    pub amount_paid: Decimal,
    /// The member's kitchen hours when the payment was recorded. Only set for
    /// members of a department with variable hours.
    pub hours_snapshot: Option<Decimal>,
}

/// Whether a member has paid rent for a month.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum PaymentRecord {
    #[default]
    Unpaid,
    Paid(Payment),
}

impl PaymentRecord {
    pub fn is_paid(&self) -> bool {
        matches!(self, PaymentRecord::Paid(_))
    }

    pub fn amount_paid(&self) -> Option<Decimal> {
        match self {
            PaymentRecord::Unpaid => None,
            PaymentRecord::Paid(payment) => Some(payment.amount_paid),
        }
    }
}
