//! Day-number arithmetic for the Ethiopian (Amete Mihret) calendar.
//!
//! Years have twelve 30-day months followed by Pagume, which has 6 days in
//! years where `year mod 4 == 3` and 5 days otherwise. In the 20th and 21st
//! centuries this puts 1 Meskerem on 11 September, or on 12 September when the
//! following Gregorian year is a leap year.

use super::is_ethiopian_leap;

/// Day number of 1 Meskerem 1, i.e. 29 August 8 in the Julian calendar.
const EPOCH: i64 = 2796;

const DAYS_IN_MONTH: u32 = 30;

pub(super) fn month_length(year: i32, month: u32) -> u32 {
    if month < 13 {
        DAYS_IN_MONTH
    } else if is_ethiopian_leap(year) {
        6
    } else {
        5
    }
}

pub(super) fn to_rata_die(year: i32, month: u32, day: u32) -> i64 {
    let year = i64::from(year);
    EPOCH - 1
        + 365 * (year - 1)
        + year.div_euclid(4)
        + i64::from(DAYS_IN_MONTH) * (i64::from(month) - 1)
        + i64::from(day)
}

fn new_year(year: i32) -> i64 {
    to_rata_die(year, 1, 1)
}

pub(super) fn from_rata_die(rata_die: i64) -> (i32, u32, u32) {
    let year = (4 * (rata_die - EPOCH) + 1463).div_euclid(1461) as i32;
    let offset = rata_die - new_year(year);
    let month = offset.div_euclid(i64::from(DAYS_IN_MONTH)) + 1;
    let day = offset.rem_euclid(i64::from(DAYS_IN_MONTH)) + 1;

    (year, month as u32, day as u32)
}
