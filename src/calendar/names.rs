use chrono::Month;
use num_traits::FromPrimitive;
use serde::Deserialize;

use super::{CalendarDate, CalendarSystem};

pub const ETHIOPIAN_MONTHS_AMHARIC: [&str; 13] = [
    "መስከረም", "ጥቅምት", "ኅዳር", "ታኅሣሥ", "ጥር", "የካቲት", "መጋቢት", "ሚያዝያ", "ግንቦት", "ሰኔ", "ሐምሌ", "ነሐሴ", "ጳጉሜ",
];

pub const ETHIOPIAN_MONTHS_LATIN: [&str; 13] = [
    "Meskerem", "Tikimt", "Hidar", "Tahsas", "Tir", "Yekatit", "Megabit", "Miazia", "Genbot",
    "Sene", "Hamle", "Nehase", "Pagume",
];

/// Script used for Ethiopian month names. Gregorian months are always English.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MonthNames {
    Amharic,
    Latin,
}

impl Default for MonthNames {
    fn default() -> Self {
        MonthNames::Amharic
    }
}

pub fn month_name(system: CalendarSystem, month: u32, names: MonthNames) -> Option<&'static str> {
    match system {
        CalendarSystem::Gregorian => Month::from_u32(month).map(|m| m.name()),
        CalendarSystem::Ethiopian => {
            let table = match names {
                MonthNames::Amharic => &ETHIOPIAN_MONTHS_AMHARIC,
                MonthNames::Latin => &ETHIOPIAN_MONTHS_LATIN,
            };
            month
                .checked_sub(1)
                .and_then(|idx| table.get(idx as usize))
                .copied()
        }
    }
}

/// `September 11, 2024` or `1 መስከረም 2017`.
pub fn long_date(date: &CalendarDate, names: MonthNames) -> String {
    let name = month_name(date.system(), date.month(), names).unwrap_or("?");
    match date.system() {
        CalendarSystem::Gregorian => format!("{} {}, {}", name, date.day(), date.year()),
        CalendarSystem::Ethiopian => format!("{} {} {}", date.day(), name, date.year()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_names() {
        use CalendarSystem::*;
        assert_eq!(month_name(Gregorian, 9, MonthNames::Amharic), Some("September"));
        assert_eq!(month_name(Ethiopian, 1, MonthNames::Amharic), Some("መስከረም"));
        assert_eq!(month_name(Ethiopian, 13, MonthNames::Latin), Some("Pagume"));
        assert_eq!(month_name(Ethiopian, 0, MonthNames::Latin), None);
        assert_eq!(month_name(Ethiopian, 14, MonthNames::Latin), None);
        assert_eq!(month_name(Gregorian, 13, MonthNames::Latin), None);
    }

    #[test]
    fn long_dates() {
        let gc = CalendarDate::gregorian(2024, 9, 11).unwrap();
        assert_eq!(long_date(&gc, MonthNames::Amharic), "September 11, 2024");
        assert_eq!(long_date(&gc.convert(), MonthNames::Amharic), "1 መስከረም 2017");
        assert_eq!(long_date(&gc.convert(), MonthNames::Latin), "1 Meskerem 2017");
    }
}
