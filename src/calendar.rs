//! Calendar helpers: the local "today", and parsing years and months from user input.
//!
//! Months are represented everywhere in the app as [time::Month]. On the wire
//! (URLs, forms) and in the database a month is the integer 1-12.

use std::fmt::Display;

use time::{Month, OffsetDateTime, UtcOffset};
use time_tz::{Offset, TimeZone};

use crate::Error;

/// The smallest year accepted for a specific expense.
pub const MIN_YEAR: i32 = 1;
/// The largest year accepted for a specific expense.
pub const MAX_YEAR: i32 = 9999;

/// Get the UTC offset for a canonical timezone name, e.g. "Asia/Kolkata".
///
/// Returns `None` if `canonical_timezone` is not a known timezone.
pub fn get_local_offset(canonical_timezone: &str) -> Option<UtcOffset> {
    time_tz::timezones::get_by_name(canonical_timezone)
        .map(|tz| tz.get_offset_utc(&OffsetDateTime::now_utc()).to_utc())
}

/// The current month in `canonical_timezone`.
///
/// # Errors
/// Returns [Error::InvalidTimezoneError] if the timezone name is not valid.
pub fn current_year_month(canonical_timezone: &str) -> Result<YearMonth, Error> {
    let offset = get_local_offset(canonical_timezone)
        .ok_or_else(|| Error::InvalidTimezoneError(canonical_timezone.to_owned()))?;
    let today = OffsetDateTime::now_utc().to_offset(offset).date();

    Ok(YearMonth::new(today.year(), today.month()))
}

/// Parse a month given either as a number (1-12, leading zeros allowed) or
/// as an English month name, full or abbreviated to three letters.
///
/// # Errors
/// Returns [Error::InvalidMonth] if `text` is not one of the above.
pub fn parse_month(text: &str) -> Result<Month, Error> {
    let text = text.trim();
    let invalid = || Error::InvalidMonth(text.to_owned());

    if let Ok(number) = text.parse::<u8>() {
        return Month::try_from(number).map_err(|_| invalid());
    }

    let lowercase = text.to_lowercase();
    ALL_MONTHS
        .into_iter()
        .find(|month| {
            let name = month_name(*month).to_lowercase();
            lowercase == name || (lowercase.len() == 3 && name.starts_with(&lowercase))
        })
        .ok_or_else(invalid)
}

/// Parse a calendar year between [MIN_YEAR] and [MAX_YEAR].
///
/// # Errors
/// Returns [Error::InvalidYear] if `text` is not an integer in range.
pub fn parse_year(text: &str) -> Result<i32, Error> {
    let text = text.trim();

    match text.parse::<i32>() {
        Ok(year) if (MIN_YEAR..=MAX_YEAR).contains(&year) => Ok(year),
        _ => Err(Error::InvalidYear(text.to_owned())),
    }
}

/// The twelve months in calendar order.
pub const ALL_MONTHS: [Month; 12] = [
    Month::January,
    Month::February,
    Month::March,
    Month::April,
    Month::May,
    Month::June,
    Month::July,
    Month::August,
    Month::September,
    Month::October,
    Month::November,
    Month::December,
];

/// The full English name of `month`, e.g. "March".
pub fn month_name(month: Month) -> &'static str {
    match month {
        Month::January => "January",
        Month::February => "February",
        Month::March => "March",
        Month::April => "April",
        Month::May => "May",
        Month::June => "June",
        Month::July => "July",
        Month::August => "August",
        Month::September => "September",
        Month::October => "October",
        Month::November => "November",
        Month::December => "December",
    }
}

/// The three letter abbreviation of `month`, e.g. "Mar".
pub fn short_month_name(month: Month) -> &'static str {
    &month_name(month)[..3]
}

/// A month of a particular year, e.g. March 2025.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    pub year: i32,
    pub month: Month,
}

impl YearMonth {
    pub const fn new(year: i32, month: Month) -> Self {
        Self { year, month }
    }

    /// The month before this one, or `None` if it would fall before [MIN_YEAR].
    pub fn previous(self) -> Option<Self> {
        let previous = match self.month {
            Month::January => Self::new(self.year - 1, Month::December),
            month => Self::new(self.year, month.previous()),
        };

        (previous.year >= MIN_YEAR).then_some(previous)
    }

    /// The month after this one, or `None` if it would fall after [MAX_YEAR].
    pub fn next(self) -> Option<Self> {
        let next = match self.month {
            Month::December => Self::new(self.year + 1, Month::January),
            month => Self::new(self.year, month.next()),
        };

        (next.year <= MAX_YEAR).then_some(next)
    }
}

impl Display for YearMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", month_name(self.month), self.year)
    }
}


#[cfg(test)]
mod parse_year_tests {
    use crate::{Error, calendar::parse_year};

    #[test]
    fn parses_year() {
        assert_eq!(parse_year("2025"), Ok(2025));
        assert_eq!(parse_year(" 1999\n"), Ok(1999));
    }

    #[test]
    fn rejects_non_numeric_and_out_of_range() {
        assert_eq!(parse_year("abc"), Err(Error::InvalidYear("abc".to_owned())));
        assert_eq!(parse_year("0"), Err(Error::InvalidYear("0".to_owned())));
        assert_eq!(
            parse_year("10000"),
            Err(Error::InvalidYear("10000".to_owned()))
        );
    }
}
