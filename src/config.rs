use chrono::Weekday;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::calendar::names::MonthNames;
use crate::calendar::CalendarSystem;
use crate::error::{Error, ErrorKind, Result};
use crate::grid::{GridOptions, RowLayout};
use crate::ui::Theme;

const CONFIG_PATH_ENV_VAR: &str = "ETHCAL_CONFIG_FILE";

pub fn find_configfile_locations() -> Vec<PathBuf> {
    let mut locations = Vec::new();

    if let Ok(path) = env::var(CONFIG_PATH_ENV_VAR) {
        locations.push(PathBuf::from(path));
    }

    if let Some(dir) = dirs::config_dir() {
        locations.push(dir.join("ethcal").join("config.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        locations.push(home.join(".ethcal.toml"));
    }

    locations
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    Sunday,
    Monday,
    Saturday,
}

impl Default for WeekStart {
    fn default() -> Self {
        WeekStart::Sunday
    }
}

impl From<WeekStart> for Weekday {
    fn from(start: WeekStart) -> Self {
        match start {
            WeekStart::Sunday => Weekday::Sun,
            WeekStart::Monday => Weekday::Mon,
            WeekStart::Saturday => Weekday::Sat,
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Calendar a new session opens in.
    pub calendar: CalendarSystem,
    pub week_start: WeekStart,
    pub rows: RowLayout,
    pub month_names: MonthNames,
    pub theme: Theme,
}

impl Config {
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            Error::new(
                ErrorKind::IOError(e),
                &format!("Could not read config file '{}'", path.display()),
            )
        })?;

        Self::from_toml(&content).map_err(|e| {
            let message = format!(
                "{} ({})",
                e.message.as_deref().unwrap_or("invalid content"),
                path.display()
            );
            e.with_msg(&message)
        })
    }

    pub fn grid_options(&self) -> GridOptions {
        GridOptions::default()
            .week_start(self.week_start.into())
            .rows(self.rows)
    }
}

/// Loads `path` if given, otherwise the first existing file of
/// [`find_configfile_locations`], otherwise the defaults.
pub fn load_suitable_config(path: Option<&Path>) -> Result<Config> {
    if let Some(path) = path {
        log::info!("Loading config from {}", path.display());
        return Config::load(path);
    }

    match find_configfile_locations().into_iter().find(|p| p.is_file()) {
        Some(path) => {
            log::info!("Loading config from {}", path.display());
            Config::load(&path)
        }
        None => {
            log::info!("No config file found, using defaults");
            Ok(Config::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config.calendar, CalendarSystem::Gregorian);
        assert_eq!(config.week_start, WeekStart::Sunday);
        assert_eq!(config.rows, RowLayout::Fixed);
        assert_eq!(config.month_names, MonthNames::Amharic);
        assert_eq!(config.grid_options().week_start, Weekday::Sun);
    }

    #[test]
    fn full_config() {
        let config = Config::from_toml(
            r#"
            calendar = "ethiopian"
            week_start = "monday"
            rows = "compact"
            month_names = "latin"

            [theme]
            focus_day_char = ">"
            today_day_char = "*"
            show_adjacent_days = false
            "#,
        )
        .unwrap();

        assert_eq!(config.calendar, CalendarSystem::Ethiopian);
        assert_eq!(config.grid_options().week_start, Weekday::Mon);
        assert_eq!(config.grid_options().rows, RowLayout::Compact);
        assert_eq!(config.month_names, MonthNames::Latin);
        assert_eq!(config.theme.focus_day_char, Some('>'));
        assert!(!config.theme.show_adjacent_days);
    }

    #[test]
    fn rejects_unknown_values() {
        let err = Config::from_toml(r#"calendar = "julian""#).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::ConfigParse));
        assert!(Config::from_toml(r#"week_start = "friday""#).is_err());
        assert!(Config::from_toml(r#"colour = "blue""#).is_err());
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let err = load_suitable_config(Some(Path::new("/nonexistent/ethcal.toml"))).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::IOError(_)));
    }
}
