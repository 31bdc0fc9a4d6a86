//! Calendar-day comparison between collection dates and a reference date.
//!
//! Both sides are reduced to their calendar day before comparing. No timezone conversion happens:
//! a `DateTime<Tz>` is read in its own offset, so callers must hand in values that already share
//! one timezone context.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone};

/// Anything that can be reduced to a calendar day.
pub trait CalendarDay {
    /// The year/month/day part, with any time of day dropped.
    fn calendar_day(&self) -> NaiveDate;
}

impl CalendarDay for NaiveDate {
    fn calendar_day(&self) -> NaiveDate {
        *self
    }
}

impl CalendarDay for NaiveDateTime {
    fn calendar_day(&self) -> NaiveDate {
        self.date()
    }
}

impl<Tz: TimeZone> CalendarDay for DateTime<Tz> {
    fn calendar_day(&self) -> NaiveDate {
        self.date_naive()
    }
}

/// Flag, per entry of `dates`, whether it falls on the same calendar day as `reference`.
///
/// The result has the same length and order as `dates`.
#[must_use]
pub fn matches<D, R>(dates: &[D], reference: &R) -> Vec<bool>
where
    D: CalendarDay,
    R: CalendarDay + ?Sized,
{
    let day = reference.calendar_day();
    dates.iter().map(|date| date.calendar_day() == day).collect()
}

/// True if any entry of `dates` falls on the reference day.
#[must_use]
pub fn any_on<D, R>(dates: &[D], reference: &R) -> bool
where
    D: CalendarDay,
    R: CalendarDay + ?Sized,
{
    let day = reference.calendar_day();
    dates.iter().any(|date| date.calendar_day() == day)
}
