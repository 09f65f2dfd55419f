//! Parsing and validation of user-submitted form values.

use std::str::FromStr;

use rust_decimal::Decimal;
use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

/// The format used by `<input type="date">` and in page query strings.
pub const ISO_DATE_FORMAT: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");

/// The largest amount of money or number of hours accepted from a form.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

/// Malformed input from a form. Recovered locally: the user sees a message and
/// no state is changed.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum ValidationError {
    /// The value could not be parsed as a decimal number.
    #[error("\"{0}\" is not a valid number")]
    InvalidNumber(String),

    /// A negative number was given where only zero or more is allowed.
    #[error("{0} is negative, which is not allowed")]
    NegativeNumber(Decimal),

    /// A number larger than [MAX_AMOUNT] was given.
    #[error("{0} is larger than the maximum of 1000000000")]
    NumberTooLarge(Decimal),

    /// A member's rent or a sum of payments does not fit in a decimal.
    #[error("the rent for {0} is too large to calculate")]
    RentTooLarge(String),

    /// Kitchen hours were given for a member whose department does not record them.
    #[error("{0} is not in a department that records kitchen hours")]
    HoursNotApplicable(String),

    /// An empty string was used as an event title.
    #[error("Event title cannot be empty")]
    EmptyEventTitle,

    /// An empty string was used as the member name on an attendance record.
    #[error("Member name cannot be empty")]
    EmptyMemberName,

    /// An education hours record was submitted without a positive number of hours.
    #[error("Education hours must be greater than zero")]
    MissingEducationHours,

    /// The attendance kind is not one of the tracked kinds.
    #[error("\"{0}\" is not a kind of attendance that is tracked")]
    InvalidAttendanceKind(String),

    /// An empty string was used as a contact name.
    #[error("Name cannot be empty")]
    EmptyContactName,

    /// The email address is missing or malformed.
    #[error("\"{0}\" is not a valid email address")]
    InvalidEmail(String),

    /// The date could not be parsed as `YYYY-MM-DD`.
    #[error("\"{0}\" is not a valid date")]
    InvalidDate(String),
}

/// Parse `raw` as a decimal from zero up to [MAX_AMOUNT].
///
/// # Errors
///
/// Returns [ValidationError::InvalidNumber] if `raw` is not a number,
/// [ValidationError::NegativeNumber] if it is less than zero and
/// [ValidationError::NumberTooLarge] if it is more than [MAX_AMOUNT].
pub fn parse_non_negative_decimal(raw: &str) -> Result<Decimal, ValidationError> {
    let raw = raw.trim();
    let number =
        Decimal::from_str(raw).map_err(|_| ValidationError::InvalidNumber(raw.to_owned()))?;

    if number.is_sign_negative() && !number.is_zero() {
        return Err(ValidationError::NegativeNumber(number));
    }

    if number > MAX_AMOUNT {
        return Err(ValidationError::NumberTooLarge(number.normalize()));
    }

    Ok(number.normalize())
}

/// Parse a `YYYY-MM-DD` date as submitted by a date input.
pub fn parse_date(raw: &str) -> Result<Date, ValidationError> {
    let raw = raw.trim();

    Date::parse(raw, ISO_DATE_FORMAT).map_err(|_| ValidationError::InvalidDate(raw.to_owned()))
}

/// Trim `value` and map blank strings to `None`.
pub fn non_blank(value: &str) -> Option<String> {
    let value = value.trim();

    if value.is_empty() {
        None
    } else {
        Some(value.to_owned())
    }
}

#[cfg(test)]
mod parse_non_negative_decimal_tests {
    use rust_decimal::Decimal;

    use super::{MAX_AMOUNT, ValidationError, parse_non_negative_decimal};

    #[test]
    fn parses_whole_and_fractional_numbers() {
        assert_eq!(parse_non_negative_decimal("600"), Ok(Decimal::from(600)));
        assert_eq!(
            parse_non_negative_decimal(" 12.50 "),
            Ok(Decimal::new(125, 1))
        );
        assert_eq!(parse_non_negative_decimal("0"), Ok(Decimal::ZERO));
    }

    #[test]
    fn rejects_negative_numbers() {
        assert_eq!(
            parse_non_negative_decimal("-5"),
            Err(ValidationError::NegativeNumber(Decimal::from(-5)))
        );
    }

    #[test]
    fn rejects_text() {
        assert_eq!(
            parse_non_negative_decimal("ten"),
            Err(ValidationError::InvalidNumber("ten".to_owned()))
        );
        assert_eq!(
            parse_non_negative_decimal(""),
            Err(ValidationError::InvalidNumber("".to_owned()))
        );
        assert!(parse_non_negative_decimal("NaN").is_err());
        assert!(parse_non_negative_decimal("inf").is_err());
    }

    #[test]
    fn accepts_the_maximum_amount() {
        assert_eq!(parse_non_negative_decimal("1000000000"), Ok(MAX_AMOUNT));
    }

    #[test]
    fn rejects_numbers_above_the_maximum() {
        assert_eq!(
            parse_non_negative_decimal("1000000000.01"),
            Err(ValidationError::NumberTooLarge(Decimal::new(100000000001, 2)))
        );
        assert_eq!(
            parse_non_negative_decimal("79228162514264337593543950335"),
            Err(ValidationError::NumberTooLarge(Decimal::MAX))
        );
    }
}
