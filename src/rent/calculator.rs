//! Rent calculation from a member's base rent and kitchen hours.

use rust_decimal::Decimal;

use crate::{rent::Member, validation::ValidationError};

/// The amount of rent per kitchen hour used when no other rate is configured.
pub const DEFAULT_HOURLY_RATE: Decimal = Decimal::from_parts(5, 0, 0, false, 0);

/// Whether kitchen hours increase or decrease a member's rent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum HoursAdjustment {
    /// Each hour adds the unit rate to the rent.
    #[default]
    Surcharge,
    /// Each hour takes the unit rate off the rent, down to zero.
    Discount,
}

/// How kitchen hours are converted into rent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RentPolicy {
    /// The amount of rent per kitchen hour.
    pub unit_rate: Decimal,
    /// The direction in which hours adjust the rent.
    pub adjustment: HoursAdjustment,
}

impl Default for RentPolicy {
    fn default() -> Self {
        Self {
            unit_rate: DEFAULT_HOURLY_RATE,
            adjustment: HoursAdjustment::default(),
        }
    }
}

/// The rent owed by `member` for a month under `policy`.
///
/// # Errors
///
/// Returns [ValidationError::RentTooLarge] if the rent does not fit in a
/// [Decimal].
pub fn effective_rent(member: &Member, policy: &RentPolicy) -> Result<Decimal, ValidationError> {
    let Some(hours) = member.applicable_hours() else {
        return Ok(member.base_rent);
    };

    let too_large = || ValidationError::RentTooLarge(member.name.clone());
    let adjustment = hours.checked_mul(policy.unit_rate).ok_or_else(too_large)?;

    match policy.adjustment {
        HoursAdjustment::Surcharge => member.base_rent.checked_add(adjustment).ok_or_else(too_large),
        HoursAdjustment::Discount => Ok(member
            .base_rent
            .checked_sub(adjustment)
            .unwrap_or(Decimal::ZERO)
            .max(Decimal::ZERO)),
    }
}
