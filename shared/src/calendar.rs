//! Date primitives and the picker's date context.
//!
//! Months come in two forms: the cursor uses 0-based months (0 = January)
//! while dates handed to and from the host page use 1-based months.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{PickerError, Result};
use crate::format::parse_date;

/// A concrete day, month is 1-12
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CalendarDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl CalendarDate {
    /// Build a date, rejecting days that do not exist in the given month
    pub fn new(year: i32, month: u32, day: u32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(PickerError::InvalidMonth(month));
        }
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self::from)
            .ok_or(PickerError::InvalidDay { year, month, day })
    }

    /// Today according to the local clock
    pub fn today() -> Self {
        Self::from(chrono::Local::now().date_naive())
    }

    pub fn cursor(&self) -> CalendarCursor {
        CalendarCursor {
            year: self.year,
            month: self.month - 1,
        }
    }
}

impl From<NaiveDate> for CalendarDate {
    fn from(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
            day: date.day(),
        }
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

/// The month currently displayed by the calendar. `month` is 0-11.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarCursor {
    pub year: i32,
    pub month: u32,
}

impl CalendarCursor {
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if month > 11 {
            return Err(PickerError::InvalidMonth(month));
        }
        Ok(Self { year, month })
    }

    pub fn next_month(self) -> Self {
        if self.month == 11 {
            Self { year: self.year + 1, month: 0 }
        } else {
            Self { year: self.year, month: self.month + 1 }
        }
    }

    pub fn prev_month(self) -> Self {
        if self.month == 0 {
            Self { year: self.year - 1, month: 11 }
        } else {
            Self { year: self.year, month: self.month - 1 }
        }
    }

    /// Does `date` fall inside the displayed month?
    pub fn contains(&self, date: &CalendarDate) -> bool {
        date.year == self.year && date.month == self.month + 1
    }
}

/// Upper bound of each month's length, February counted in a leap year
pub const LONGEST_MONTHS: [u32; 12] = [31, 29, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Gregorian leap year rule
pub fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Weekday of the first of the month, 0 = Sunday .. 6 = Saturday
pub fn first_weekday(cursor: CalendarCursor) -> Result<u32> {
    NaiveDate::from_ymd_opt(cursor.year, cursor.month + 1, 1)
        .map(|date| date.weekday().num_days_from_sunday())
        .ok_or(PickerError::InvalidDay {
            year: cursor.year,
            month: cursor.month + 1,
            day: 1,
        })
}

/// Holds the three dates the picker cares about: the value already in the
/// input, today, and the month on display.
#[derive(Debug, Clone, PartialEq)]
pub struct DateContext {
    pub current: CalendarDate,
    pub now: CalendarDate,
    pub cursor: CalendarCursor,
}

impl DateContext {
    pub fn new(current: CalendarDate, now: CalendarDate) -> Self {
        Self {
            current,
            now,
            cursor: current.cursor(),
        }
    }

    /// Seed the context from the host input's value.
    ///
    /// An empty value selects today. A value that cannot be parsed with the
    /// configured format also falls back to today, with a warning.
    pub fn from_input(value: &str, now: CalendarDate, format: &str) -> Self {
        let value = value.trim();
        if value.is_empty() {
            return Self::new(now, now);
        }
        match parse_date(value, format) {
            Ok(current) => Self::new(current, now),
            Err(e) => {
                log::warn!("{}; showing today instead", e);
                Self::new(now, now)
            }
        }
    }

    /// Make `date` the current selection and move the cursor to its month
    pub fn commit(&mut self, date: CalendarDate) {
        self.current = date;
        self.cursor = date.cursor();
    }

    pub fn is_selected(&self, date: &CalendarDate) -> bool {
        self.current == *date
    }

    pub fn is_today(&self, date: &CalendarDate) -> bool {
        self.now == *date
    }
}
