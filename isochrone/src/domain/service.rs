//! Service activation rules.
//!
//! A `Service` names a set of days on which its trips run: a date range,
//! the weekdays it operates inside that range, and explicit exceptions.
//! `ServiceBuilder` accumulates the rule and validates each exception as it
//! is added.

use std::collections::HashSet;
use std::fmt;

use super::{CalendarDate, DayOfWeek, TimetableError};

/// An immutable service activation rule.
///
/// # Examples
///
/// ```
/// use isochrone::domain::{CalendarDate, DayOfWeek, ServiceBuilder};
///
/// let start = CalendarDate::from_ymd(2014, 3, 22).unwrap();
/// let end = CalendarDate::from_ymd(2014, 3, 30).unwrap();
/// let service = ServiceBuilder::new("friday", start, end)
///     .unwrap()
///     .add_operating_day(DayOfWeek::Friday)
///     .build();
///
/// assert!(service.is_operating_on(CalendarDate::from_ymd(2014, 3, 28).unwrap()));
/// assert!(!service.is_operating_on(CalendarDate::from_ymd(2014, 3, 27).unwrap()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Service {
    name: String,
    start_date: CalendarDate,
    end_date: CalendarDate,
    operating_days: HashSet<DayOfWeek>,
    excluded_dates: HashSet<CalendarDate>,
    included_dates: HashSet<CalendarDate>,
}

impl Service {
    /// Create a service from complete rule sets, validating all invariants.
    pub fn new(
        name: impl Into<String>,
        start_date: CalendarDate,
        end_date: CalendarDate,
        operating_days: HashSet<DayOfWeek>,
        excluded_dates: HashSet<CalendarDate>,
        included_dates: HashSet<CalendarDate>,
    ) -> Result<Self, TimetableError> {
        check_range(start_date, end_date)?;
        for date in &excluded_dates {
            check_in_range(*date, start_date, end_date, "excluded")?;
        }
        for date in &included_dates {
            check_in_range(*date, start_date, end_date, "included")?;
        }
        if let Some(date) = excluded_dates.intersection(&included_dates).next() {
            return Err(TimetableError::InvalidServiceRule(format!(
                "{date} is both excluded and included"
            )));
        }

        Ok(Self {
            name: name.into(),
            start_date,
            end_date,
            operating_days,
            excluded_dates,
            included_dates,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn start_date(&self) -> CalendarDate {
        self.start_date
    }

    pub fn end_date(&self) -> CalendarDate {
        self.end_date
    }

    pub fn operating_days(&self) -> &HashSet<DayOfWeek> {
        &self.operating_days
    }

    pub fn excluded_dates(&self) -> &HashSet<CalendarDate> {
        &self.excluded_dates
    }

    pub fn included_dates(&self) -> &HashSet<CalendarDate> {
        &self.included_dates
    }

    /// Returns true if the service runs on `date`.
    ///
    /// A service runs on a date inside its range whose weekday is an
    /// operating day, unless the date is excluded. Included dates always run.
    pub fn is_operating_on(&self, date: CalendarDate) -> bool {
        let regular = self.in_range(date)
            && self.operating_days.contains(&date.day_of_week())
            && !self.excluded_dates.contains(&date);
        regular || self.included_dates.contains(&date)
    }

    fn in_range(&self, date: CalendarDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Builder for [`Service`].
#[derive(Debug, Clone)]
pub struct ServiceBuilder {
    name: String,
    start_date: CalendarDate,
    end_date: CalendarDate,
    operating_days: HashSet<DayOfWeek>,
    excluded_dates: HashSet<CalendarDate>,
    included_dates: HashSet<CalendarDate>,
}

impl ServiceBuilder {
    /// Start a service running from `start_date` to `end_date` inclusive.
    pub fn new(
        name: impl Into<String>,
        start_date: CalendarDate,
        end_date: CalendarDate,
    ) -> Result<Self, TimetableError> {
        check_range(start_date, end_date)?;
        Ok(Self {
            name: name.into(),
            start_date,
            end_date,
            operating_days: HashSet::new(),
            excluded_dates: HashSet::new(),
            included_dates: HashSet::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Run the service on every `day` of the week within its range.
    pub fn add_operating_day(mut self, day: DayOfWeek) -> Self {
        self.operating_days.insert(day);
        self
    }

    /// Never run the service on `date`.
    pub fn add_excluded_date(mut self, date: CalendarDate) -> Result<Self, TimetableError> {
        check_in_range(date, self.start_date, self.end_date, "excluded")?;
        if self.included_dates.contains(&date) {
            return Err(TimetableError::InvalidServiceRule(format!(
                "excluded date {date} is already included"
            )));
        }
        self.excluded_dates.insert(date);
        Ok(self)
    }

    /// Always run the service on `date`.
    pub fn add_included_date(mut self, date: CalendarDate) -> Result<Self, TimetableError> {
        check_in_range(date, self.start_date, self.end_date, "included")?;
        if self.excluded_dates.contains(&date) {
            return Err(TimetableError::InvalidServiceRule(format!(
                "included date {date} is already excluded"
            )));
        }
        self.included_dates.insert(date);
        Ok(self)
    }

    /// Freeze the rule into a [`Service`].
    pub fn build(self) -> Service {
        Service {
            name: self.name,
            start_date: self.start_date,
            end_date: self.end_date,
            operating_days: self.operating_days,
            excluded_dates: self.excluded_dates,
            included_dates: self.included_dates,
        }
    }
}

fn check_range(start: CalendarDate, end: CalendarDate) -> Result<(), TimetableError> {
    if end < start {
        return Err(TimetableError::InvalidServiceRule(format!(
            "end date {end} is before start date {start}"
        )));
    }
    Ok(())
}

fn check_in_range(
    date: CalendarDate,
    start: CalendarDate,
    end: CalendarDate,
    kind: &str,
) -> Result<(), TimetableError> {
    if date < start || date > end {
        return Err(TimetableError::InvalidServiceRule(format!(
            "{kind} date {date} is outside {start}..{end}"
        )));
    }
    Ok(())
}
