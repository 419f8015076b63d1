//! Calendar arithmetic for the Gregorian and the Ethiopian calendar.
//!
//! Every date is tied to the physical day it labels, so converting between the
//! two systems or asking for a weekday is plain whole-day arithmetic on one
//! linear day count (the proleptic Gregorian day number used by
//! [`chrono::NaiveDate::num_days_from_ce`]).

use chrono::{Datelike, NaiveDate, Weekday};
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::cmp::Ordering;
use std::convert::TryFrom;
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, ErrorKind, Result};

mod ethiopian;
pub mod names;
mod parse;

pub use parse::{parse_iso_ymd, parse_ymd};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, DeserializeFromStr, SerializeDisplay)]
pub enum CalendarSystem {
    #[default]
    Gregorian,
    Ethiopian,
}

impl CalendarSystem {
    pub fn other(self) -> Self {
        match self {
            CalendarSystem::Gregorian => CalendarSystem::Ethiopian,
            CalendarSystem::Ethiopian => CalendarSystem::Gregorian,
        }
    }

    pub fn months_in_year(self) -> u32 {
        match self {
            CalendarSystem::Gregorian => 12,
            CalendarSystem::Ethiopian => 13,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CalendarSystem::Gregorian => "gregorian",
            CalendarSystem::Ethiopian => "ethiopian",
        }
    }
}

impl fmt::Display for CalendarSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CalendarSystem {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "gregorian" | "gc" | "g" => Ok(CalendarSystem::Gregorian),
            "ethiopian" | "ethiopic" | "ec" | "e" => Ok(CalendarSystem::Ethiopian),
            other => Err(Error::new(
                ErrorKind::ParseError,
                &format!("Calendar '{}' not recognized", other),
            )),
        }
    }
}

pub fn is_gregorian_leap(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// The Ethiopian leap year is the one *preceding* a Gregorian-style leap
/// year, so its 6-day Pagume ends right before the new year moves to
/// September 12.
pub fn is_ethiopian_leap(year: i32) -> bool {
    year.rem_euclid(4) == 3
}

fn month_in_range(system: CalendarSystem, month: u32) -> bool {
    (1..=system.months_in_year()).contains(&month)
}

// Callers guarantee `month` is in range for `system`.
fn month_length(system: CalendarSystem, year: i32, month: u32) -> u32 {
    match system {
        CalendarSystem::Gregorian => match month {
            2 if is_gregorian_leap(year) => 29,
            2 => 28,
            4 | 6 | 9 | 11 => 30,
            _ => 31,
        },
        CalendarSystem::Ethiopian => ethiopian::month_length(year, month),
    }
}

fn out_of_range(year: i32) -> Error {
    Error::new(
        ErrorKind::InvalidDate,
        &format!("year {} is outside the supported range", year),
    )
}

fn invalid_month(system: CalendarSystem, month: u32) -> Error {
    Error::new(
        ErrorKind::InvalidDate,
        &format!(
            "month {} out of range 1..={} for the {} calendar",
            month,
            system.months_in_year(),
            system
        ),
    )
}

pub fn days_in_month(system: CalendarSystem, year: i32, month: u32) -> Result<u32> {
    if month_in_range(system, month) {
        Ok(month_length(system, year, month))
    } else {
        Err(invalid_month(system, month))
    }
}

/// Moves `delta` months forward (or backward when negative), carrying the year.
pub fn step_month(system: CalendarSystem, year: i32, month: u32, delta: i32) -> Result<(i32, u32)> {
    let idx = MonthIndex::new(system, year, month)?.step(delta)?;
    Ok((idx.year, idx.month))
}

pub fn weekday(date: &CalendarDate) -> Weekday {
    date.physical.weekday()
}

/// Column of `date` in a week starting on `week_start` (0 is the first column).
pub fn weekday_index(date: &CalendarDate, week_start: Weekday) -> u32 {
    (weekday(date).num_days_from_monday() + 7 - week_start.num_days_from_monday()) % 7
}

pub fn convert(date: &CalendarDate) -> CalendarDate {
    date.convert()
}

/// A valid day in one of the two calendar systems.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CalendarDate {
    system: CalendarSystem,
    year: i32,
    month: u32,
    day: u32,
    physical: NaiveDate,
}

impl CalendarDate {
    pub fn new(system: CalendarSystem, year: i32, month: u32, day: u32) -> Result<Self> {
        let num_days = days_in_month(system, year, month)?;
        if day == 0 || day > num_days {
            return Err(Error::new(
                ErrorKind::InvalidDate,
                &format!(
                    "day {} out of range 1..={} for {} month {} of {}",
                    day, num_days, system, month, year
                ),
            ));
        }

        let physical = match system {
            CalendarSystem::Gregorian => NaiveDate::from_ymd_opt(year, month, day),
            CalendarSystem::Ethiopian => {
                i32::try_from(ethiopian::to_rata_die(year, month, day))
                    .ok()
                    .and_then(NaiveDate::from_num_days_from_ce_opt)
            }
        }
        .ok_or_else(|| out_of_range(year))?;

        Ok(CalendarDate {
            system,
            year,
            month,
            day,
            physical,
        })
    }

    pub fn gregorian(year: i32, month: u32, day: u32) -> Result<Self> {
        Self::new(CalendarSystem::Gregorian, year, month, day)
    }

    pub fn ethiopian(year: i32, month: u32, day: u32) -> Result<Self> {
        Self::new(CalendarSystem::Ethiopian, year, month, day)
    }

    /// Parses `YYYY-MM-DD` as a date of `system`.
    pub fn parse(system: CalendarSystem, input: &str) -> Result<Self> {
        let (year, month, day) = parse_ymd(input)?;
        Self::new(system, year, month, day)
    }

    /// Labels the physical day `date` in `system`.
    pub fn from_naive(system: CalendarSystem, date: NaiveDate) -> Self {
        let (year, month, day) = match system {
            CalendarSystem::Gregorian => (date.year(), date.month(), date.day()),
            CalendarSystem::Ethiopian => {
                ethiopian::from_rata_die(i64::from(date.num_days_from_ce()))
            }
        };

        CalendarDate {
            system,
            year,
            month,
            day,
            physical: date,
        }
    }

    pub fn system(&self) -> CalendarSystem {
        self.system
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn to_naive(&self) -> NaiveDate {
        self.physical
    }

    pub fn rata_die(&self) -> i64 {
        i64::from(self.physical.num_days_from_ce())
    }

    pub fn weekday(&self) -> Weekday {
        weekday(self)
    }

    pub fn month_index(&self) -> MonthIndex {
        MonthIndex {
            system: self.system,
            year: self.year,
            month: self.month,
        }
    }

    /// The same physical day in the other calendar system.
    pub fn convert(&self) -> Self {
        self.convert_to(self.system.other())
    }

    pub fn convert_to(&self, system: CalendarSystem) -> Self {
        if system == self.system {
            *self
        } else {
            Self::from_naive(system, self.physical)
        }
    }

    /// Moves by whole days, staying in the same system. Fails only when the
    /// result leaves the supported range.
    pub fn add_days(&self, days: i64) -> Result<Self> {
        self.physical
            .checked_add_signed(chrono::Duration::days(days))
            .map(|date| Self::from_naive(self.system, date))
            .ok_or_else(|| Error::new(ErrorKind::InvalidDate, "date outside the supported range"))
    }

    pub fn matches(&self, year: i32, month: u32, day: u32) -> bool {
        self.year == year && self.month == month && self.day == day
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

/// A month of a particular year in one calendar system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MonthIndex {
    system: CalendarSystem,
    year: i32,
    month: u32,
}

impl MonthIndex {
    pub fn new(system: CalendarSystem, year: i32, month: u32) -> Result<Self> {
        if month_in_range(system, month) {
            Ok(MonthIndex {
                system,
                year,
                month,
            })
        } else {
            Err(invalid_month(system, month))
        }
    }

    pub fn system(&self) -> CalendarSystem {
        self.system
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn num_days(&self) -> u32 {
        month_length(self.system, self.year, self.month)
    }

    /// Moves `delta` months, carrying the year. Fails when the year would
    /// overflow.
    pub fn step(&self, delta: i32) -> Result<Self> {
        let months = self.system.months_in_year() as i32;
        let idx = (self.month as i32 - 1)
            .checked_add(delta)
            .ok_or_else(|| out_of_range(self.year))?;
        let year = self
            .year
            .checked_add(idx.div_euclid(months))
            .ok_or_else(|| out_of_range(self.year))?;

        Ok(MonthIndex {
            system: self.system,
            year,
            month: idx.rem_euclid(months) as u32 + 1,
        })
    }

    pub fn step_years(&self, delta: i32) -> Result<Self> {
        let year = self
            .year
            .checked_add(delta)
            .ok_or_else(|| out_of_range(self.year))?;
        Ok(self.with_year(year))
    }

    pub fn next(&self) -> Result<Self> {
        self.step(1)
    }

    pub fn prev(&self) -> Result<Self> {
        self.step(-1)
    }

    pub fn with_year(&self, year: i32) -> Self {
        MonthIndex { year, ..*self }
    }

    pub fn day(&self, day: u32) -> Result<CalendarDate> {
        CalendarDate::new(self.system, self.year, self.month, day)
    }

    pub fn first_day(&self) -> Result<CalendarDate> {
        self.day(1)
    }

    pub fn contains(&self, date: &CalendarDate) -> bool {
        date.month_index() == *self
    }
}

impl PartialOrd for MonthIndex {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self.system != other.system {
            None
        } else {
            Some((self.year, self.month).cmp(&(other.year, other.month)))
        }
    }
}
