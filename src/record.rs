//! Persisted form of a selection, as handed to and received from the host.
//!
//! ```json
//! {"date":"2024-09-11","calendar":"ethiopian","display":"1 መስከረም 2017",
//!  "gc_date":"September 11, 2024","ec_date":"1 መስከረም 2017"}
//! ```
//!
//! `date` is always the Gregorian form of the selected day; `calendar` names
//! the calendar the selection was made in. The display fields are written for
//! the host's benefit, in the configured month names, and ignored when loading.
//!
//! Loading is strict: `date` must be exactly `YYYY-MM-DD` and `calendar` one
//! of `gregorian` or `ethiopian`. The shorthands the command line accepts
//! (`gc`, `e`, unpadded numbers) are rejected here.

use serde::{Deserialize, Deserializer, Serialize};

use crate::calendar::names::{long_date, MonthNames};
use crate::calendar::{parse_iso_ymd, CalendarDate, CalendarSystem};
use crate::error::{Error, ErrorKind, Result};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionRecord {
    pub date: String,
    #[serde(deserialize_with = "calendar_name")]
    pub calendar: CalendarSystem,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gc_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ec_date: Option<String>,
}

fn calendar_name<'de, D>(deserializer: D) -> std::result::Result<CalendarSystem, D::Error>
where
    D: Deserializer<'de>,
{
    let name = String::deserialize(deserializer)?;
    [CalendarSystem::Gregorian, CalendarSystem::Ethiopian]
        .iter()
        .copied()
        .find(|system| system.as_str() == name)
        .ok_or_else(|| serde::de::Error::unknown_variant(&name, &["gregorian", "ethiopian"]))
}

impl SelectionRecord {
    pub fn new(date: String, calendar: CalendarSystem) -> Self {
        SelectionRecord {
            date,
            calendar,
            display: None,
            gc_date: None,
            ec_date: None,
        }
    }

    pub fn from_selection(selected: &CalendarDate, names: MonthNames) -> Self {
        let gc = selected.convert_to(CalendarSystem::Gregorian);
        let ec = selected.convert_to(CalendarSystem::Ethiopian);

        SelectionRecord {
            date: gc.to_string(),
            calendar: selected.system(),
            display: Some(long_date(selected, names)),
            gc_date: Some(long_date(&gc, names)),
            ec_date: Some(long_date(&ec, names)),
        }
    }

    /// The selected day, expressed in the recorded calendar.
    pub fn to_selection(&self) -> Result<CalendarDate> {
        parse_iso_ymd(&self.date)
            .and_then(|(year, month, day)| CalendarDate::gregorian(year, month, day))
            .map(|date| date.convert_to(self.calendar))
            .map_err(|e| {
                Error::new(
                    ErrorKind::Deserialization,
                    &format!("'{}' is not a Gregorian date ({})", self.date, e),
                )
            })
    }

    pub fn from_json(input: &str) -> Result<Self> {
        Ok(serde_json::from_str(input)?)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| {
            Error::new(ErrorKind::ParseError, &format!("Could not serialize selection: {}", e))
        })
    }
}
