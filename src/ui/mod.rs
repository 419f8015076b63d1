pub mod month_pane;

pub use month_pane::MonthPane;

use serde::Deserialize;

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Theme {
    pub focus_day_char: Option<char>,
    pub today_day_char: Option<char>,
    /// Print the padding days of the neighbouring months instead of blanks.
    pub show_adjacent_days: bool,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            focus_day_char: Some('>'),
            today_day_char: Some('*'),
            show_adjacent_days: true,
        }
    }
}
