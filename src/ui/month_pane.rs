use itertools::Itertools;
use std::fmt::{self, Display};

use crate::calendar::names::{month_name, MonthNames};
use crate::grid::{GridCell, MonthGrid, COLUMNS};

use super::Theme;

struct DayCell<'a> {
    cell: &'a GridCell,
    theme: &'a Theme,
}

impl DayCell<'_> {
    const CELL_WIDTH: usize = 6;
}

impl Display for DayCell<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.cell.in_viewed_month && !self.theme.show_adjacent_days {
            return write!(f, "{:width$}", "", width = Self::CELL_WIDTH);
        }

        let arg_today = if self.cell.is_today {
            self.theme.today_day_char.unwrap_or(' ')
        } else {
            ' '
        };

        let arg_focus = if self.cell.is_selected {
            self.theme.focus_day_char.unwrap_or(' ')
        } else {
            ' '
        };

        // Adjacent month days are bracketed so they stand out without colors.
        if self.cell.in_viewed_month {
            write!(f, "{}{} {:>2} ", arg_today, arg_focus, self.cell.day)
        } else {
            write!(f, "{}{}({:>2})", arg_today, arg_focus, self.cell.day)
        }
    }
}

/// Plain text rendering of a [`MonthGrid`]: a title line, a weekday header
/// and one line per week.
pub struct MonthPane<'a> {
    grid: &'a MonthGrid,
    theme: &'a Theme,
    names: MonthNames,
}

impl<'a> MonthPane<'a> {
    pub fn new(grid: &'a MonthGrid, theme: &'a Theme, names: MonthNames) -> Self {
        MonthPane { grid, theme, names }
    }

    pub fn title(&self) -> String {
        let viewed = self.grid.viewed();
        format!(
            "{} {}",
            month_name(viewed.system(), viewed.month(), self.names).unwrap_or("?"),
            viewed.year()
        )
    }

    pub fn width() -> usize {
        COLUMNS * DayCell::CELL_WIDTH
    }
}

impl Display for MonthPane<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let title = self.title();
        let padding = Self::width().saturating_sub(title.chars().count()) / 2;
        writeln!(f, "{:padding$}{}", "", title, padding = padding)?;

        writeln!(
            f,
            "{}",
            self.grid
                .header()
                .map(|day| format!("{:>width$}", day.to_string(), width = DayCell::CELL_WIDTH - 1))
                .join(" ")
                .trim_end()
        )?;

        for row in self.grid.rows() {
            let line = row
                .iter()
                .map(|cell| DayCell {
                    cell,
                    theme: self.theme,
                }
                .to_string())
                .join("");
            writeln!(f, "{}", line.trim_end())?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::{CalendarDate, CalendarSystem};
    use crate::grid::{build_month_grid, GridOptions, RowLayout};
    use chrono::NaiveDate;

    fn render(system: CalendarSystem, year: i32, month: u32, theme: &Theme) -> Vec<String> {
        let selected = CalendarDate::gregorian(2024, 9, 11).unwrap();
        let options = GridOptions::default()
            .rows(RowLayout::Compact)
            .today(NaiveDate::from_ymd_opt(2024, 9, 12));
        let grid = build_month_grid(system, year, month, Some(&selected), &options).unwrap();
        MonthPane::new(&grid, theme, MonthNames::Latin)
            .to_string()
            .lines()
            .map(str::to_owned)
            .collect()
    }

    fn row(cells: &[&str]) -> String {
        cells.concat().trim_end().to_owned()
    }

    #[test]
    fn renders_title_header_and_weeks() {
        let lines = render(CalendarSystem::Gregorian, 2024, 9, &Theme::default());
        assert_eq!(lines[0].trim(), "September 2024");
        assert_eq!(lines[1], "  Sun   Mon   Tue   Wed   Thu   Fri   Sat");
        assert_eq!(
            lines[2],
            row(&["    1 ", "    2 ", "    3 ", "    4 ", "    5 ", "    6 ", "    7 "])
        );
        assert_eq!(
            lines[3],
            row(&["    8 ", "    9 ", "   10 ", " > 11 ", "*  12 ", "   13 ", "   14 "])
        );
        assert_eq!(lines.len(), 2 + 5);
        assert_eq!(
            lines[6],
            row(&["   29 ", "   30 ", "  ( 1)", "  ( 2)", "  ( 3)", "  ( 4)", "  ( 5)"])
        );
    }

    #[test]
    fn ethiopian_title_and_padding() {
        let lines = render(CalendarSystem::Ethiopian, 2017, 1, &Theme::default());
        assert_eq!(lines[0].trim(), "Meskerem 2017");
        assert_eq!(
            lines[2],
            row(&["  ( 3)", "  ( 4)", "  ( 5)", " >  1 ", "*   2 ", "    3 ", "    4 "])
        );
    }

    #[test]
    fn hides_adjacent_days() {
        let theme = Theme {
            show_adjacent_days: false,
            ..Theme::default()
        };
        let lines = render(CalendarSystem::Ethiopian, 2017, 1, &theme);
        assert_eq!(
            lines[2],
            row(&["      ", "      ", "      ", " >  1 ", "*   2 ", "    3 ", "    4 "])
        );
    }
}
