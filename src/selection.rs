use chrono::{Local, NaiveDate};

use crate::calendar::names::MonthNames;
use crate::calendar::{days_in_month, CalendarDate, CalendarSystem, MonthIndex};
use crate::error::{Error, ErrorKind, Result};
use crate::grid::{build_month_grid, GridOptions, MonthGrid};
use crate::record::SelectionRecord;

/// Source of the current physical date.
pub trait Today {
    fn today(&self) -> NaiveDate;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SystemToday;

impl Today for SystemToday {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

#[derive(Clone, Copy, Debug)]
pub struct FixedToday(pub NaiveDate);

impl Today for FixedToday {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ViewState {
    viewed: MonthIndex,
    selected: Option<CalendarDate>,
}

impl ViewState {
    /// Gregorian, with `today` selected and its month in view.
    pub fn initial(today: NaiveDate) -> Self {
        let selected = CalendarDate::from_naive(CalendarSystem::Gregorian, today);
        ViewState {
            viewed: selected.month_index(),
            selected: Some(selected),
        }
    }

    pub fn calendar_mode(&self) -> CalendarSystem {
        self.viewed.system()
    }

    pub fn viewed(&self) -> MonthIndex {
        self.viewed
    }

    pub fn viewed_year(&self) -> i32 {
        self.viewed.year()
    }

    pub fn viewed_month(&self) -> u32 {
        self.viewed.month()
    }

    pub fn selected(&self) -> Option<&CalendarDate> {
        self.selected.as_ref()
    }
}

pub struct SelectionController<T: Today = SystemToday> {
    state: ViewState,
    today: T,
    grid_options: GridOptions,
    month_names: MonthNames,
}

impl SelectionController<SystemToday> {
    pub fn new() -> Self {
        Self::with_today(SystemToday)
    }
}

impl Default for SelectionController<SystemToday> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Today> SelectionController<T> {
    pub fn with_today(today: T) -> Self {
        SelectionController {
            state: ViewState::initial(today.today()),
            today,
            grid_options: GridOptions::default(),
            month_names: MonthNames::default(),
        }
    }

    pub fn grid_options(mut self, options: GridOptions) -> Self {
        self.grid_options = options;
        self
    }

    /// Month names used for the display fields of saved records.
    pub fn month_names(mut self, names: MonthNames) -> Self {
        self.month_names = names;
        self
    }

    /// Starts out in `system` instead of Gregorian, keeping today selected.
    pub fn starting_in(mut self, system: CalendarSystem) -> Self {
        self.set_calendar(system);
        self
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn calendar_mode(&self) -> CalendarSystem {
        self.state.calendar_mode()
    }

    pub fn viewed(&self) -> MonthIndex {
        self.state.viewed
    }

    pub fn selected(&self) -> Option<&CalendarDate> {
        self.state.selected()
    }

    pub fn today(&self) -> CalendarDate {
        CalendarDate::from_naive(self.calendar_mode(), self.today.today())
    }

    /// The selected date expressed in the calendar that is not shown.
    pub fn counterpart(&self) -> Option<CalendarDate> {
        self.state.selected.map(|date| date.convert())
    }

    pub fn grid(&self) -> Result<MonthGrid> {
        let viewed = self.state.viewed;
        let options = self.grid_options.today(Some(self.today.today()));
        build_month_grid(
            viewed.system(),
            viewed.year(),
            viewed.month(),
            self.state.selected.as_ref(),
            &options,
        )
    }

    pub fn select_day(&mut self, day: u32) -> Result<()> {
        let date = self.state.viewed.day(day)?;
        log::debug!("selected {} {}", date.system(), date);
        self.state.selected = Some(date);
        Ok(())
    }

    /// Steps the viewed period by `delta` months. A period that cannot be
    /// shown leaves the state unchanged.
    pub fn navigate_month(&mut self, delta: i32) -> Result<()> {
        let viewed = self.state.viewed.step(delta)?;
        self.show(viewed)
    }

    pub fn navigate_year(&mut self, delta: i32) -> Result<()> {
        let viewed = self.state.viewed.step_years(delta)?;
        self.show(viewed)
    }

    fn show(&mut self, viewed: MonthIndex) -> Result<()> {
        viewed.first_day()?;
        self.state.viewed = viewed;
        log::debug!("viewing {:?}", viewed);
        Ok(())
    }

    /// Shows `year`/`month` without touching the selection.
    pub fn view_month(&mut self, year: i32, month: u32) -> Result<()> {
        let viewed = MonthIndex::new(self.calendar_mode(), year, month)?;
        self.show(viewed)
    }

    /// Selects a date and moves the view onto its month, e.g. when a padding
    /// cell of an adjacent month is chosen.
    pub fn jump_to(&mut self, year: i32, month: u32, day: u32) -> Result<()> {
        let date = CalendarDate::new(self.calendar_mode(), year, month, day)?;
        self.state = ViewState {
            viewed: date.month_index(),
            selected: Some(date),
        };
        log::debug!("jumped to {} {}", date.system(), date);
        Ok(())
    }

    /// Like [`Self::jump_to`], but a day past the end of the month is narrowed
    /// to the last day (e.g. day 6 of a five-day Pagume becomes day 5).
    pub fn pick(&mut self, year: i32, month: u32, day: u32) -> Result<()> {
        let num_days = days_in_month(self.calendar_mode(), year, month)?;
        if day == 0 {
            return Err(Error::new(ErrorKind::InvalidDate, "day 0 does not exist"));
        }
        if day > num_days {
            log::debug!("clamping day {} to {}", day, num_days);
        }
        self.jump_to(year, month, day.min(num_days))
    }

    pub fn clear_selection(&mut self) {
        self.state.selected = None;
    }

    pub fn toggle_calendar(&mut self) {
        let system = self.calendar_mode().other();
        let selected = self.state.selected.map(|date| date.convert_to(system));
        let viewed = selected.unwrap_or_else(|| self.today()).convert_to(system).month_index();

        self.state = ViewState { viewed, selected };
        log::debug!("switched to the {} calendar, viewing {:?}", system, viewed);
    }

    pub fn set_calendar(&mut self, system: CalendarSystem) {
        if system != self.calendar_mode() {
            self.toggle_calendar();
        }
    }

    pub fn to_record(&self) -> Option<SelectionRecord> {
        self.state
            .selected
            .map(|date| SelectionRecord::from_selection(&date, self.month_names))
    }

    /// Replaces the session with a persisted selection. On failure the session
    /// is reset to its initial state.
    pub fn restore(&mut self, record: &SelectionRecord) -> Result<()> {
        match record.to_selection() {
            Ok(date) => {
                self.state = ViewState {
                    viewed: date.month_index(),
                    selected: Some(date),
                };
                Ok(())
            }
            Err(e) => {
                self.reset();
                Err(e)
            }
        }
    }

    pub fn restore_json(&mut self, input: &str) -> Result<()> {
        match SelectionRecord::from_json(input) {
            Ok(record) => self.restore(&record),
            Err(e) => {
                self.reset();
                Err(e)
            }
        }
    }

    pub fn reset(&mut self) {
        log::warn!("resetting selection to today");
        self.state = ViewState::initial(self.today.today());
    }
}
