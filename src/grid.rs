//! Month grid layout: the day cells of one month, padded with the trailing
//! days of the previous month and the leading days of the next one so that
//! every row covers a full week.

use chrono::{NaiveDate, Weekday};
use serde::Deserialize;

use crate::calendar::{weekday_index, CalendarDate, CalendarSystem, MonthIndex};
use crate::error::Result;

pub const COLUMNS: usize = 7;
pub const FIXED_ROWS: usize = 6;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowLayout {
    /// As many rows as the month needs (1 to 6).
    Compact,
    /// Always six rows.
    Fixed,
}

impl Default for RowLayout {
    fn default() -> Self {
        RowLayout::Fixed
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridOptions {
    pub week_start: Weekday,
    pub rows: RowLayout,
    /// Physical day marked as today, if any.
    pub today: Option<NaiveDate>,
}

impl Default for GridOptions {
    fn default() -> Self {
        GridOptions {
            week_start: Weekday::Sun,
            rows: RowLayout::default(),
            today: None,
        }
    }
}

impl GridOptions {
    pub fn week_start(mut self, week_start: Weekday) -> Self {
        self.week_start = week_start;
        self
    }

    pub fn rows(mut self, rows: RowLayout) -> Self {
        self.rows = rows;
        self
    }

    pub fn today(mut self, today: Option<NaiveDate>) -> Self {
        self.today = today;
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridCell {
    pub day: u32,
    pub month: u32,
    pub year: i32,
    pub in_viewed_month: bool,
    pub is_selected: bool,
    pub is_today: bool,
}

#[derive(Clone, Debug)]
pub struct MonthGrid {
    viewed: MonthIndex,
    week_start: Weekday,
    cells: Vec<GridCell>,
}

impl MonthGrid {
    pub fn viewed(&self) -> MonthIndex {
        self.viewed
    }

    pub fn system(&self) -> CalendarSystem {
        self.viewed.system()
    }

    pub fn cells(&self) -> &[GridCell] {
        &self.cells
    }

    pub fn num_rows(&self) -> usize {
        self.cells.len() / COLUMNS
    }

    pub fn rows(&self) -> impl Iterator<Item = &[GridCell]> {
        self.cells.chunks(COLUMNS)
    }

    /// Weekdays in column order.
    pub fn header(&self) -> impl Iterator<Item = Weekday> {
        let start = self.week_start;
        (0..COLUMNS as u32).scan(start, |day, _| {
            let current = *day;
            *day = day.succ();
            Some(current)
        })
    }

    pub fn selected_cell(&self) -> Option<&GridCell> {
        self.cells.iter().find(|cell| cell.is_selected)
    }
}

/// Lays out `year`/`month` of `system`.
///
/// Padding cells are taken from the physically adjacent days, so when the
/// neighbour is a 5 or 6 day Pagume the padding continues into the month
/// beyond it.
pub fn build_month_grid(
    system: CalendarSystem,
    year: i32,
    month: u32,
    selected: Option<&CalendarDate>,
    options: &GridOptions,
) -> Result<MonthGrid> {
    let viewed = MonthIndex::new(system, year, month)?;
    let first = viewed.first_day()?;
    let leading = weekday_index(&first, options.week_start) as usize;
    let num_days = viewed.num_days() as usize;

    let compact_rows = (leading + num_days + COLUMNS - 1) / COLUMNS;
    let rows = match options.rows {
        RowLayout::Compact => compact_rows,
        RowLayout::Fixed => compact_rows.max(FIXED_ROWS),
    };

    let selected = selected.map(|date| date.convert_to(system));
    let start = first.add_days(-(leading as i64))?;

    let cells = (0..rows * COLUMNS)
        .map(|i| {
            let date = start.add_days(i as i64)?;
            Ok(GridCell {
                day: date.day(),
                month: date.month(),
                year: date.year(),
                in_viewed_month: viewed.contains(&date),
                is_selected: selected.map_or(false, |s| s == date),
                is_today: options.today.map_or(false, |t| t == date.to_naive()),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    log::trace!(
        "laid out {} {}-{:02}: {} leading, {} rows",
        system,
        year,
        month,
        leading,
        rows
    );

    Ok(MonthGrid {
        viewed,
        week_start: options.week_start,
        cells,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::days_in_month;

    fn compact() -> GridOptions {
        GridOptions::default().rows(RowLayout::Compact)
    }

    fn in_month_days(grid: &MonthGrid) -> Vec<u32> {
        grid.cells()
            .iter()
            .filter(|c| c.in_viewed_month)
            .map(|c| c.day)
            .collect()
    }

    #[test]
    fn every_day_appears_once_in_order() {
        use CalendarSystem::*;
        let years = [(Gregorian, 2023), (Gregorian, 2024), (Ethiopian, 2015), (Ethiopian, 2016)];
        for &(system, year) in &years {
            for month in 1..=system.months_in_year() {
                for &layout in &[RowLayout::Compact, RowLayout::Fixed] {
                    let options = GridOptions::default().rows(layout);
                    let grid = build_month_grid(system, year, month, None, &options).unwrap();
                    let num_days = days_in_month(system, year, month).unwrap();

                    assert_eq!(grid.cells().len() % COLUMNS, 0);
                    assert_eq!(in_month_days(&grid), (1..=num_days).collect::<Vec<_>>());
                    assert!(grid
                        .cells()
                        .iter()
                        .filter(|c| c.in_viewed_month)
                        .all(|c| c.month == month && c.year == year));
                }
            }
        }
    }

    #[test]
    fn september_2024_layout() {
        // 1 September 2024 was a Sunday.
        let grid = build_month_grid(CalendarSystem::Gregorian, 2024, 9, None, &compact()).unwrap();
        assert_eq!(grid.num_rows(), 5);
        assert!(grid.cells()[0].in_viewed_month);
        assert_eq!(grid.cells()[0].day, 1);

        let trailing: Vec<_> = grid.cells()[30..].iter().map(|c| (c.day, c.month)).collect();
        assert_eq!(trailing, vec![(1, 10), (2, 10), (3, 10), (4, 10), (5, 10)]);
    }

    #[test]
    fn leading_days_count_back_from_previous_month() {
        // 1 March 2024 was a Friday.
        let grid = build_month_grid(CalendarSystem::Gregorian, 2024, 3, None, &compact()).unwrap();
        let leading: Vec<_> = grid.cells()[..5]
            .iter()
            .map(|c| (c.day, c.month, c.year))
            .collect();
        assert_eq!(
            leading,
            vec![(25, 2, 2024), (26, 2, 2024), (27, 2, 2024), (28, 2, 2024), (29, 2, 2024)]
        );
        assert!(grid.cells()[..5].iter().all(|c| !c.in_viewed_month));
        assert_eq!(grid.cells()[5].day, 1);
    }

    #[test]
    fn monday_week_start_shifts_columns() {
        let options = compact().week_start(Weekday::Mon);
        let grid = build_month_grid(CalendarSystem::Gregorian, 2024, 9, None, &options).unwrap();
        // Sunday the 1st is the last column.
        assert_eq!(grid.cells()[6].day, 1);
        assert_eq!(
            grid.cells()[0],
            GridCell {
                day: 26,
                month: 8,
                year: 2024,
                in_viewed_month: false,
                is_selected: false,
                is_today: false,
            }
        );
        assert_eq!(
            grid.header().collect::<Vec<_>>(),
            vec![
                Weekday::Mon,
                Weekday::Tue,
                Weekday::Wed,
                Weekday::Thu,
                Weekday::Fri,
                Weekday::Sat,
                Weekday::Sun
            ]
        );
        assert_eq!(grid.num_rows(), 6);
    }

    #[test]
    fn fixed_layout_always_has_six_rows() {
        let options = GridOptions::default();
        let grid = build_month_grid(CalendarSystem::Gregorian, 2015, 2, None, &options).unwrap();
        assert_eq!(grid.num_rows(), 6);
        assert_eq!(grid.cells().len(), 42);

        // February 2015 starts on a Sunday and fills exactly four rows.
        let grid = build_month_grid(CalendarSystem::Gregorian, 2015, 2, None, &compact()).unwrap();
        assert_eq!(grid.num_rows(), 4);
    }

    #[test]
    fn pagume_padding_spills_into_neighbouring_months() {
        let options = GridOptions::default();
        let grid = build_month_grid(CalendarSystem::Ethiopian, 2016, 13, None, &options).unwrap();
        assert_eq!(grid.cells().len(), 42);
        assert_eq!(in_month_days(&grid), vec![1, 2, 3, 4, 5]);

        let after: Vec<_> = grid
            .cells()
            .iter()
            .skip_while(|c| !c.in_viewed_month)
            .skip(5)
            .map(|c| (c.year, c.month, c.day))
            .collect();
        assert_eq!(after[0], (2017, 1, 1));
        assert!(after.windows(2).all(|w| w[0].1 != w[1].1 || w[1].2 == w[0].2 + 1));
        assert!(after.iter().any(|&(_, m, _)| m == 2));
    }

    #[test]
    fn meskerem_after_short_pagume() {
        // 1 Meskerem 2017 is a Wednesday, so three padding cells come from Pagume 2016.
        let grid = build_month_grid(CalendarSystem::Ethiopian, 2017, 1, None, &compact()).unwrap();
        let leading: Vec<_> = grid.cells()[..3].iter().map(|c| (c.year, c.month, c.day)).collect();
        assert_eq!(leading, vec![(2016, 13, 3), (2016, 13, 4), (2016, 13, 5)]);
        assert_eq!(grid.num_rows(), 5);
    }

    #[test]
    fn selection_marks_owning_month() {
        let selected = CalendarDate::gregorian(2024, 2, 29).unwrap();
        let grid =
            build_month_grid(CalendarSystem::Gregorian, 2024, 3, Some(&selected), &compact())
                .unwrap();
        let cell = grid.selected_cell().unwrap();
        assert_eq!((cell.day, cell.month), (29, 2));
        assert!(!cell.in_viewed_month);
        assert_eq!(grid.cells().iter().filter(|c| c.is_selected).count(), 1);

        // Day 29 of March is not marked.
        assert!(!grid.cells().iter().any(|c| c.month == 3 && c.day == 29 && c.is_selected));
    }

    #[test]
    fn selection_in_other_system_is_converted() {
        let selected = CalendarDate::gregorian(2024, 9, 11).unwrap();
        let grid =
            build_month_grid(CalendarSystem::Ethiopian, 2017, 1, Some(&selected), &compact())
                .unwrap();
        let cell = grid.selected_cell().unwrap();
        assert_eq!((cell.year, cell.month, cell.day), (2017, 1, 1));
        assert!(cell.in_viewed_month);
    }

    #[test]
    fn today_is_marked() {
        let today = NaiveDate::from_ymd_opt(2024, 9, 11);
        let options = compact().today(today);
        let grid = build_month_grid(CalendarSystem::Ethiopian, 2017, 1, None, &options).unwrap();
        let marked: Vec<_> = grid.cells().iter().filter(|c| c.is_today).collect();
        assert_eq!(marked.len(), 1);
        assert_eq!(marked[0].day, 1);
    }

    #[test]
    fn invalid_month_is_rejected() {
        assert!(build_month_grid(CalendarSystem::Gregorian, 2024, 13, None, &compact())
            .unwrap_err()
            .is_invalid_date());
    }
}
