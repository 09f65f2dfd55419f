//! Laying out a month as weeks for the calendar view.

use time::{Date, Duration};

/// The first day of the month containing `date`.
pub fn first_of_month(date: Date) -> Date {
    date - Duration::days(i64::from(date.day()) - 1)
}

/// The first day of the month before the one containing `date`, or `None`
/// if that month is before [Date::MIN].
pub fn previous_month(date: Date) -> Option<Date> {
    first_of_month(date).previous_day().map(first_of_month)
}

/// The first day of the month after the one containing `date`, or `None`
/// if that month is after [Date::MAX].
pub fn next_month(date: Date) -> Option<Date> {
    first_of_month(date)
        .checked_add(Duration::days(31))
        .map(first_of_month)
}

/// The weeks, Monday to Sunday, that cover the month containing `date`.
///
/// The first and last weeks include days from the neighbouring months.
/// Days outside the range of [Date] are `None`.
pub fn month_grid(date: Date) -> Vec<[Option<Date>; 7]> {
    let first = first_of_month(date);
    let day_at = |offset: i64| first.checked_add(Duration::days(offset));

    let mut week_offset = -i64::from(first.weekday().number_days_from_monday());
    let mut weeks = Vec::with_capacity(6);

    loop {
        let start = week_offset;
        weeks.push(std::array::from_fn(|day| day_at(start + day as i64)));

        week_offset += 7;
        match day_at(week_offset) {
            Some(week_start) if week_start.month() == first.month() => {}
            _ => break,
        }
    }

    weeks
}
