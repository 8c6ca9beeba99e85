//! Calendar dates under the proleptic Gregorian calendar.
//!
//! Dates convert to and from a "fixed day number": day 1 is Monday
//! 1 January of year 1, and every later day adds one. All arithmetic on the
//! fixed number uses Euclidean division so that years before the epoch
//! behave like any other.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, Weekday};

use super::TimetableError;

/// Day of the week, Monday first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayOfWeek {
    /// All days, Monday first.
    pub const ALL: [DayOfWeek; 7] = [
        DayOfWeek::Monday,
        DayOfWeek::Tuesday,
        DayOfWeek::Wednesday,
        DayOfWeek::Thursday,
        DayOfWeek::Friday,
        DayOfWeek::Saturday,
        DayOfWeek::Sunday,
    ];

    /// Converts an ordinal (1 = Monday, 7 = Sunday) to a day.
    pub fn from_number(n: i32) -> Result<Self, TimetableError> {
        usize::try_from(n - 1)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
            .ok_or(TimetableError::InvalidDayOfWeek(n))
    }

    /// Returns the ordinal of this day (1 = Monday, 7 = Sunday).
    pub fn number_from_monday(self) -> i32 {
        match self {
            DayOfWeek::Monday => 1,
            DayOfWeek::Tuesday => 2,
            DayOfWeek::Wednesday => 3,
            DayOfWeek::Thursday => 4,
            DayOfWeek::Friday => 5,
            DayOfWeek::Saturday => 6,
            DayOfWeek::Sunday => 7,
        }
    }
}

impl From<Weekday> for DayOfWeek {
    fn from(weekday: Weekday) -> Self {
        match weekday {
            Weekday::Mon => DayOfWeek::Monday,
            Weekday::Tue => DayOfWeek::Tuesday,
            Weekday::Wed => DayOfWeek::Wednesday,
            Weekday::Thu => DayOfWeek::Thursday,
            Weekday::Fri => DayOfWeek::Friday,
            Weekday::Sat => DayOfWeek::Saturday,
            Weekday::Sun => DayOfWeek::Sunday,
        }
    }
}

impl From<DayOfWeek> for Weekday {
    fn from(day: DayOfWeek) -> Self {
        match day {
            DayOfWeek::Monday => Weekday::Mon,
            DayOfWeek::Tuesday => Weekday::Tue,
            DayOfWeek::Wednesday => Weekday::Wed,
            DayOfWeek::Thursday => Weekday::Thu,
            DayOfWeek::Friday => Weekday::Fri,
            DayOfWeek::Saturday => Weekday::Sat,
            DayOfWeek::Sunday => Weekday::Sun,
        }
    }
}

/// Month of the year, January first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Month {
    January,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

impl Month {
    /// All months, January first.
    pub const ALL: [Month; 12] = [
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

    /// Converts an ordinal (1 = January, 12 = December) to a month.
    pub fn from_number(n: i32) -> Result<Self, TimetableError> {
        usize::try_from(n - 1)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
            .ok_or(TimetableError::InvalidMonth(n))
    }

    /// Returns the ordinal of this month (1 = January).
    pub fn number(self) -> i32 {
        match self {
            Month::January => 1,
            Month::February => 2,
            Month::March => 3,
            Month::April => 4,
            Month::May => 5,
            Month::June => 6,
            Month::July => 7,
            Month::August => 8,
            Month::September => 9,
            Month::October => 10,
            Month::November => 11,
            Month::December => 12,
        }
    }

    /// Number of days in this month for the given year.
    pub fn days_in(self, year: i32) -> i32 {
        match self {
            Month::January
            | Month::March
            | Month::May
            | Month::July
            | Month::August
            | Month::October
            | Month::December => 31,
            Month::April | Month::June | Month::September | Month::November => 30,
            Month::February => {
                if is_leap_year(year) {
                    29
                } else {
                    28
                }
            }
        }
    }
}

/// Returns true if `year` is a Gregorian leap year.
pub fn is_leap_year(year: i32) -> bool {
    (year.rem_euclid(4) == 0 && year.rem_euclid(100) != 0) || year.rem_euclid(400) == 0
}

/// Number of days in `month` (1-12) of `year`.
pub fn days_in_month(month: i32, year: i32) -> Result<i32, TimetableError> {
    Ok(Month::from_number(month)?.days_in(year))
}

/// A valid Gregorian calendar date.
///
/// Ordering follows the fixed day number, so earlier dates compare less.
///
/// # Examples
///
/// ```
/// use isochrone::domain::{CalendarDate, DayOfWeek};
///
/// let date = CalendarDate::from_ymd(2014, 3, 28).unwrap();
/// assert_eq!(date.day_of_week(), DayOfWeek::Friday);
/// assert_eq!(date.relative(4).unwrap().to_string(), "2014-04-01");
///
/// // 2014 is not a leap year
/// assert!(CalendarDate::from_ymd(2014, 2, 29).is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDate {
    year: i32,
    month: Month,
    day: i32,
}

impl CalendarDate {
    /// Create a date, checking the day against the month length.
    pub fn new(day: i32, month: Month, year: i32) -> Result<Self, TimetableError> {
        if day < 1 || day > month.days_in(year) {
            return Err(TimetableError::InvalidDate {
                day,
                month: month.number(),
                year,
            });
        }
        Ok(Self { year, month, day })
    }

    /// Create a date from numeric year, month (1-12) and day.
    pub fn from_ymd(year: i32, month: i32, day: i32) -> Result<Self, TimetableError> {
        let month = Month::from_number(month)
            .map_err(|_| TimetableError::InvalidDate { day, month, year })?;
        Self::new(day, month, year)
    }

    /// Convert a fixed day number back to a date.
    ///
    /// Fails when the date would fall outside the years an `i32` can hold.
    pub fn from_fixed(n: i64) -> Result<Self, TimetableError> {
        let first = fixed_from_parts(1, Month::January, i32::MIN);
        let last = fixed_from_parts(31, Month::December, i32::MAX);
        if !(first..=last).contains(&n) {
            return Err(TimetableError::DateOutOfRange(n));
        }

        let d0 = n - 1;
        let n400 = d0.div_euclid(146_097);
        let d1 = d0.rem_euclid(146_097);
        let n100 = d1.div_euclid(36_524);
        let d2 = d1.rem_euclid(36_524);
        let n4 = d2.div_euclid(1_461);
        let d3 = d2.rem_euclid(1_461);
        let n1 = d3.div_euclid(365);
        let y0 = 400 * n400 + 100 * n100 + 4 * n4 + n1;
        let year = if n100 == 4 || n1 == 4 { y0 } else { y0 + 1 };
        let year = i32::try_from(year).map_err(|_| TimetableError::DateOutOfRange(n))?;

        let prior_days = n - fixed_from_parts(1, Month::January, year);
        let march_first = fixed_from_parts(1, Month::March, year);
        let correction = if n < march_first {
            0
        } else if is_leap_year(year) {
            1
        } else {
            2
        };
        let month_number = (12 * (prior_days + correction) + 373).div_euclid(367) as usize;
        let month = Month::ALL[month_number - 1];
        let day = (n - fixed_from_parts(1, month, year) + 1) as i32;

        Ok(Self { year, month, day })
    }

    /// The fixed day number of this date.
    pub fn to_fixed(&self) -> i64 {
        fixed_from_parts(self.day, self.month, self.year)
    }

    pub fn day(&self) -> i32 {
        self.day
    }

    pub fn month(&self) -> Month {
        self.month
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// Day of the week of this date.
    pub fn day_of_week(&self) -> DayOfWeek {
        match self.to_fixed().rem_euclid(7) {
            0 => DayOfWeek::Sunday,
            n => DayOfWeek::ALL[(n - 1) as usize],
        }
    }

    /// The date `days` days after this one (before, if negative).
    ///
    /// Fails only when the result leaves the representable year range.
    pub fn relative(&self, days: i32) -> Result<Self, TimetableError> {
        Self::from_fixed(self.to_fixed() + i64::from(days))
    }

    /// Number of days from `other` to `self`.
    pub fn days_since(&self, other: &Self) -> i64 {
        self.to_fixed() - other.to_fixed()
    }

    /// Converts to a chrono date, if chrono can represent the year.
    pub fn to_naive_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month.number() as u32, self.day as u32)
    }
}

impl From<NaiveDate> for CalendarDate {
    fn from(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: Month::ALL[date.month0() as usize],
            day: date.day() as i32,
        }
    }
}

impl fmt::Debug for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CalendarDate({self})")
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{:02}-{:02}",
            self.year,
            self.month.number(),
            self.day
        )
    }
}

impl FromStr for CalendarDate {
    type Err = TimetableError;

    /// Parse a `YYYY-MM-DD` date. A leading minus sign on the year is allowed.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || TimetableError::Parse(format!("date {s:?}"));

        let mut parts = s.rsplitn(3, '-');
        let (Some(day), Some(month), Some(year)) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(malformed());
        };

        let day: i32 = day.parse().map_err(|_| malformed())?;
        let month: i32 = month.parse().map_err(|_| malformed())?;
        let year: i32 = year.parse().map_err(|_| malformed())?;

        Self::from_ymd(year, month, day)
    }
}

fn fixed_from_parts(day: i32, month: Month, year: i32) -> i64 {
    let y0 = i64::from(year) - 1;
    let m = i64::from(month.number());
    let correction = if m <= 2 {
        0
    } else if is_leap_year(year) {
        -1
    } else {
        -2
    };
    365 * y0 + y0.div_euclid(4) - y0.div_euclid(100)
        + y0.div_euclid(400)
        + (367 * m - 362).div_euclid(12)
        + correction
        + i64::from(day)
}
