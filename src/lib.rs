//! Conversion between the Gregorian and the Ethiopian calendar, month grid
//! layout for both, and the selection state of a date picker built on top.

pub mod calendar;
pub mod cmds;
pub mod config;
pub mod error;
pub mod grid;
pub mod record;
pub mod selection;
pub mod ui;

pub use calendar::{CalendarDate, CalendarSystem, MonthIndex};
pub use error::{Error, ErrorKind, Result};
pub use grid::{build_month_grid, GridCell, GridOptions, MonthGrid, RowLayout};
pub use record::SelectionRecord;
pub use selection::{SelectionController, ViewState};
