//! Calendar configuration: defaults, environment/file loading and projection
//! into the layout and goal engines.
use std::fmt;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::Weekday;
use serde::Serialize;
use thiserror::Error;

use crate::goal::{GoalKind, GoalParseError, GoalSpec, Rounding};
use crate::grid::{LayoutConfig, WEEK_LEN};
use crate::math::ceil_div;
use crate::month::{MonthError, MonthSpec};

/// Prefix for environment variable overrides, e.g. `WORDCAL_GOAL_TYPE`.
pub const ENV_PREFIX: &str = "WORDCAL_";

const I32_RANGE: RangeInclusive<i64> = (i32::MIN as i64)..=(i32::MAX as i64);

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unrecognized option '{0}'")]
    UnknownOption(String),
    #[error("invalid integer '{value}' for {option}")]
    InvalidInteger { option: ConfigOption, value: String },
    #[error("{option} must be between {min} and {max} (got {value})")]
    OutOfRange {
        option: ConfigOption,
        min: i64,
        max: i64,
        value: i64,
    },
    #[error("line {line}: expected '<option> <value>'")]
    MalformedLine { line: usize },
    #[error("JSON config must be an object of option values ({0})")]
    JsonShape(String),
    #[error(transparent)]
    Goal(#[from] GoalParseError),
    #[error(transparent)]
    Month(#[from] MonthError),
    #[error("invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Every option understood by config files, environment variables and the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigOption {
    Margins,
    DayNumber,
    FirstMonthDay,
    MondayCellOffset,
    Month,
    Width,
    Height,
    CellPrimaryColor,
    CellSecondaryColor,
    CellStrokeWidth,
    CellRoundness,
    TextOffsetX,
    TextOffsetY,
    TextBaseline,
    TextColor,
    FontFamily,
    FontWeight,
    FontSize,
    GoalWordcount,
    GoalType,
    GoalRounding,
    OutputFilename,
    CellWidth,
    CellHeight,
}

impl ConfigOption {
    /// All options, in the order they are applied when loaded together.
    pub const ALL: [Self; 24] = [
        Self::Margins,
        Self::DayNumber,
        Self::FirstMonthDay,
        Self::MondayCellOffset,
        Self::Month,
        Self::Width,
        Self::Height,
        Self::CellPrimaryColor,
        Self::CellSecondaryColor,
        Self::CellStrokeWidth,
        Self::CellRoundness,
        Self::TextOffsetX,
        Self::TextOffsetY,
        Self::TextBaseline,
        Self::TextColor,
        Self::FontFamily,
        Self::FontWeight,
        Self::FontSize,
        Self::GoalWordcount,
        Self::GoalType,
        Self::GoalRounding,
        Self::OutputFilename,
        Self::CellWidth,
        Self::CellHeight,
    ];

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Margins => "margins",
            Self::DayNumber => "day-number",
            Self::FirstMonthDay => "first-month-day",
            Self::MondayCellOffset => "monday-cell-offset",
            Self::Month => "month",
            Self::Width => "width",
            Self::Height => "height",
            Self::CellPrimaryColor => "cell-primary-color",
            Self::CellSecondaryColor => "cell-secondary-color",
            Self::CellStrokeWidth => "cell-stroke-width",
            Self::CellRoundness => "cell-roundness",
            Self::TextOffsetX => "text-offset-x",
            Self::TextOffsetY => "text-offset-y",
            Self::TextBaseline => "text-baseline",
            Self::TextColor => "text-color",
            Self::FontFamily => "font-family",
            Self::FontWeight => "font-weight",
            Self::FontSize => "font-size",
            Self::GoalWordcount => "goal-wordcount",
            Self::GoalType => "goal-type",
            Self::GoalRounding => "goal-rounding",
            Self::OutputFilename => "output-filename",
            Self::CellWidth => "cell-width",
            Self::CellHeight => "cell-height",
        }
    }

    /// Environment variable consulted by [`CalendarConfig::apply_env`].
    #[must_use]
    pub fn env_var(self) -> String {
        format!(
            "{ENV_PREFIX}{}",
            self.key().replace('-', "_").to_ascii_uppercase()
        )
    }

    /// Setters that derive the document size from other options.
    #[must_use]
    pub const fn is_derived(self) -> bool {
        matches!(self, Self::CellWidth | Self::CellHeight)
    }
}

impl fmt::Display for ConfigOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for ConfigOption {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|option| option.key() == s)
            .ok_or_else(|| ConfigError::UnknownOption(s.to_string()))
    }
}

/// Full set of options for one rendered calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct CalendarConfig {
    pub width: i32,
    pub height: i32,
    pub cell_primary_color: String,
    pub cell_secondary_color: String,
    pub cell_stroke_width: i32,
    pub cell_roundness: i32,
    pub day_number: u32,
    pub monday_cell_offset: u8,
    /// 1 = Monday .. 7 = Sunday.
    pub first_month_day: u8,
    pub margins: i32,
    pub text_offset_x: i32,
    pub text_offset_y: i32,
    pub text_baseline: String,
    pub text_color: String,
    pub font_family: String,
    pub font_weight: String,
    pub font_size: i32,
    pub goal_wordcount: u64,
    pub goal_type: GoalKind,
    pub goal_rounding: Rounding,
    pub output_filename: PathBuf,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            width: 1400,
            height: 1000,
            cell_primary_color: "white".to_string(),
            cell_secondary_color: "black".to_string(),
            cell_stroke_width: 5,
            cell_roundness: 10,
            day_number: 31,
            monday_cell_offset: 0,
            first_month_day: 2,
            margins: 10,
            text_offset_x: 10,
            text_offset_y: 10,
            text_baseline: "hanging".to_string(),
            text_color: "black".to_string(),
            font_family: "FreeMono".to_string(),
            font_weight: "bold".to_string(),
            font_size: 30,
            goal_wordcount: 50_000,
            goal_type: GoalKind::RegularCumulative,
            goal_rounding: Rounding::Up,
            output_filename: PathBuf::from("out.svg"),
        }
    }
}

impl CalendarConfig {
    /// Set a single option from its textual value.
    ///
    /// # Errors
    ///
    /// Returns an error if `value` cannot be parsed for `option` or is out of range.
    pub fn apply_option(&mut self, option: ConfigOption, value: &str) -> Result<(), ConfigError> {
        match option {
            ConfigOption::Margins => self.margins = parse_int(option, value, I32_RANGE)?,
            ConfigOption::DayNumber => {
                self.day_number = parse_int(option, value, 1..=i64::from(u32::MAX))?;
            }
            ConfigOption::FirstMonthDay => self.first_month_day = parse_int(option, value, 1..=7)?,
            ConfigOption::MondayCellOffset => {
                self.monday_cell_offset = parse_int(option, value, 0..=6)?;
            }
            ConfigOption::Month => self.set_month(value.trim().parse()?),
            ConfigOption::Width => self.width = parse_int(option, value, I32_RANGE)?,
            ConfigOption::Height => self.height = parse_int(option, value, I32_RANGE)?,
            ConfigOption::CellPrimaryColor => self.cell_primary_color = value.to_string(),
            ConfigOption::CellSecondaryColor => self.cell_secondary_color = value.to_string(),
            ConfigOption::CellStrokeWidth => {
                self.cell_stroke_width = parse_int(option, value, I32_RANGE)?;
            }
            ConfigOption::CellRoundness => {
                self.cell_roundness = parse_int(option, value, I32_RANGE)?;
            }
            ConfigOption::TextOffsetX => self.text_offset_x = parse_int(option, value, I32_RANGE)?,
            ConfigOption::TextOffsetY => self.text_offset_y = parse_int(option, value, I32_RANGE)?,
            ConfigOption::TextBaseline => self.text_baseline = value.to_string(),
            ConfigOption::TextColor => self.text_color = value.to_string(),
            ConfigOption::FontFamily => self.font_family = value.to_string(),
            ConfigOption::FontWeight => self.font_weight = value.to_string(),
            ConfigOption::FontSize => self.font_size = parse_int(option, value, I32_RANGE)?,
            ConfigOption::GoalWordcount => {
                self.goal_wordcount = parse_int(option, value, 0..=i64::MAX)?;
            }
            ConfigOption::GoalType => self.goal_type = value.trim().parse()?,
            ConfigOption::GoalRounding => self.goal_rounding = value.trim().parse()?,
            ConfigOption::OutputFilename => self.output_filename = PathBuf::from(value),
            ConfigOption::CellWidth => {
                self.set_cell_width(parse_int(option, value, I32_RANGE)?);
            }
            ConfigOption::CellHeight => {
                self.set_cell_height(parse_int(option, value, I32_RANGE)?);
            }
        }
        log::debug!("config: {option} = {value}");
        Ok(())
    }

    /// Apply a batch of options from one source. Derived setters run last so
    /// they see the margins and month shape from the same batch.
    ///
    /// # Errors
    ///
    /// Stops at and returns the first option that fails to apply.
    pub fn apply_all<I, S>(&mut self, options: I) -> Result<(), ConfigError>
    where
        I: IntoIterator<Item = (ConfigOption, S)>,
        S: AsRef<str>,
    {
        let mut options: Vec<(ConfigOption, S)> = options.into_iter().collect();
        options.sort_by_key(|(option, _)| option.is_derived());
        for (option, value) in &options {
            self.apply_option(*option, value.as_ref())?;
        }
        Ok(())
    }

    /// Apply every `WORDCAL_*` variable that `lookup` resolves.
    ///
    /// # Errors
    ///
    /// Returns an error if any variable holds an invalid value.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let found: Vec<(ConfigOption, String)> = ConfigOption::ALL
            .into_iter()
            .filter_map(|option| lookup(&option.env_var()).map(|value| (option, value)))
            .collect();
        self.apply_all(found)
    }

    /// Apply options from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if any variable holds an invalid value.
    pub fn apply_process_env(&mut self) -> Result<(), ConfigError> {
        self.apply_env(|name| std::env::var(name).ok())
    }

    /// Apply a config file: JSON when the extension is `.json`, otherwise one
    /// `<option> <value>` pair per line.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or holds invalid options.
    pub fn apply_file(&mut self, path: &Path) -> Result<(), ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("loading config from {}", path.display());
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            self.apply_json_str(&contents)
        } else {
            self.apply_str(&contents)
        }
    }

    /// Apply the line format. Blank lines and `#` comments are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error for malformed lines, unknown options or invalid values.
    pub fn apply_str(&mut self, contents: &str) -> Result<(), ConfigError> {
        let mut options = Vec::new();
        for (index, raw) in contents.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let (key, value) = line
                .split_once(char::is_whitespace)
                .ok_or(ConfigError::MalformedLine { line: index + 1 })?;
            options.push((key.parse::<ConfigOption>()?, value.trim().to_string()));
        }
        self.apply_all(options)
    }

    /// Apply a JSON object whose keys are option names and whose values are
    /// strings or numbers. Keys apply in document order, so a later key
    /// overrides what an earlier one set.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed, not an object, or holds invalid options.
    pub fn apply_json_str(&mut self, contents: &str) -> Result<(), ConfigError> {
        let value: serde_json::Value = serde_json::from_str(contents)?;
        let serde_json::Value::Object(map) = value else {
            return Err(ConfigError::JsonShape("top level is not an object".to_string()));
        };
        let mut options = Vec::with_capacity(map.len());
        for (key, value) in map {
            let option = key.parse::<ConfigOption>()?;
            let text = match value {
                serde_json::Value::String(text) => text,
                serde_json::Value::Number(number) => number.to_string(),
                other => {
                    return Err(ConfigError::JsonShape(format!(
                        "value for {option} must be a string or number, got {other}"
                    )));
                }
            };
            options.push((option, text));
        }
        self.apply_all(options)
    }

    /// Take day count and first weekday from a calendar month.
    pub fn set_month(&mut self, month: MonthSpec) {
        self.day_number = month.day_count();
        self.first_month_day =
            u8::try_from(month.first_weekday().number_from_monday()).unwrap_or(1);
    }

    /// Size the document so each of the 7 columns is `cell_width` wide.
    pub fn set_cell_width(&mut self, cell_width: i32) {
        self.width = cell_width
            .saturating_mul(7)
            .saturating_add(self.margins.saturating_mul(8));
    }

    /// Size the document so each row is `cell_height` tall.
    pub fn set_cell_height(&mut self, cell_height: i32) {
        let rows = i32::try_from(self.row_count()).unwrap_or(i32::MAX);
        self.height = rows
            .saturating_mul(cell_height)
            .saturating_add(rows.saturating_sub(1).saturating_mul(self.margins))
            .saturating_add(self.margins.saturating_mul(2));
    }

    fn row_count(&self) -> u64 {
        let offset = (u64::from(self.monday_cell_offset) + u64::from(self.first_month_day))
            .saturating_sub(1)
            % u64::from(WEEK_LEN);
        ceil_div(offset + u64::from(self.day_number), u64::from(WEEK_LEN))
    }

    /// Check the ranges that direct field assignment can bypass.
    ///
    /// # Errors
    ///
    /// Returns the first out-of-range option.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_range(ConfigOption::DayNumber, i64::from(self.day_number), 1..=i64::from(u32::MAX))?;
        check_range(ConfigOption::FirstMonthDay, i64::from(self.first_month_day), 1..=7)?;
        check_range(ConfigOption::MondayCellOffset, i64::from(self.monday_cell_offset), 0..=6)?;
        Ok(())
    }

    /// First weekday of the month.
    ///
    /// # Errors
    ///
    /// Returns an error if `first_month_day` is not in `1..=7`.
    pub fn first_weekday(&self) -> Result<Weekday, ConfigError> {
        check_range(ConfigOption::FirstMonthDay, i64::from(self.first_month_day), 1..=7)?;
        Weekday::try_from(self.first_month_day - 1).map_err(|_| ConfigError::OutOfRange {
            option: ConfigOption::FirstMonthDay,
            min: 1,
            max: 7,
            value: i64::from(self.first_month_day),
        })
    }

    /// Geometry half of the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration fails [`CalendarConfig::validate`].
    pub fn layout(&self) -> Result<LayoutConfig, ConfigError> {
        self.validate()?;
        Ok(LayoutConfig {
            width: self.width,
            height: self.height,
            margin: self.margins,
            stroke_width: self.cell_stroke_width,
            roundness: self.cell_roundness,
            day_count: self.day_number,
            first_weekday: self.first_weekday()?,
            column_offset: self.monday_cell_offset,
        })
    }

    /// Goal half of the configuration.
    #[must_use]
    pub const fn goal(&self) -> GoalSpec {
        GoalSpec {
            target: self.goal_wordcount,
            day_count: self.day_number,
            kind: self.goal_type,
            rounding: self.goal_rounding,
        }
    }
}

impl fmt::Display for CalendarConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "CONFIG:")?;
        writeln!(f, "=======")?;
        writeln!(f, "width: {}", self.width)?;
        writeln!(f, "height: {}", self.height)?;
        writeln!(f, "cell-primary-color: {}", self.cell_primary_color)?;
        writeln!(f, "cell-secondary-color: {}", self.cell_secondary_color)?;
        writeln!(f, "cell-stroke-width: {}", self.cell_stroke_width)?;
        writeln!(f, "cell-roundness: {}", self.cell_roundness)?;
        writeln!(f, "day-number: {}", self.day_number)?;
        writeln!(f, "monday-cell-offset: {}", self.monday_cell_offset)?;
        writeln!(f, "first-month-day: {}", self.first_month_day)?;
        writeln!(f, "margins: {}", self.margins)?;
        writeln!(f, "text-offset-x: {}", self.text_offset_x)?;
        writeln!(f, "text-offset-y: {}", self.text_offset_y)?;
        writeln!(f, "text-baseline: {}", self.text_baseline)?;
        writeln!(f, "text-color: {}", self.text_color)?;
        writeln!(f, "font-family: {}", self.font_family)?;
        writeln!(f, "font-weight: {}", self.font_weight)?;
        writeln!(f, "font-size: {}", self.font_size)?;
        writeln!(f, "goal-wordcount: {}", self.goal_wordcount)?;
        writeln!(f, "goal-type: {}", self.goal_type)?;
        writeln!(f, "goal-rounding: {}", self.goal_rounding)?;
        write!(f, "output-filename: {}", self.output_filename.display())
    }
}

fn parse_int<T>(option: ConfigOption, value: &str, range: RangeInclusive<i64>) -> Result<T, ConfigError>
where
    T: TryFrom<i64>,
{
    let parsed: i64 = value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidInteger {
            option,
            value: value.to_string(),
        })?;
    check_range(option, parsed, range.clone())?;
    T::try_from(parsed).map_err(|_| ConfigError::OutOfRange {
        option,
        min: *range.start(),
        max: *range.end(),
        value: parsed,
    })
}

fn check_range(option: ConfigOption, value: i64, range: RangeInclusive<i64>) -> Result<(), ConfigError> {
    if range.contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            option,
            min: *range.start(),
            max: *range.end(),
            value,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults_project_into_engine_inputs() {
        let config = CalendarConfig::default();
        let layout = config.layout().unwrap();
        assert_eq!(layout.width, 1400);
        assert_eq!(layout.day_count, 31);
        assert_eq!(layout.first_weekday, Weekday::Tue);
        let goal = config.goal();
        assert_eq!(goal.target, 50_000);
        assert_eq!(goal.kind, GoalKind::RegularCumulative);
        assert_eq!(goal.rounding, Rounding::Up);
    }

    #[test]
    fn option_keys_round_trip() {
        for option in ConfigOption::ALL {
            assert_eq!(option.key().parse::<ConfigOption>().unwrap(), option);
        }
        assert_eq!(ConfigOption::GoalType.env_var(), "WORDCAL_GOAL_TYPE");
        assert_eq!(ConfigOption::TextOffsetX.env_var(), "WORDCAL_TEXT_OFFSET_X");
        assert!(matches!(
            "colour".parse::<ConfigOption>(),
            Err(ConfigError::UnknownOption(key)) if key == "colour"
        ));
    }

    #[test]
    fn integers_must_be_whole_and_in_range() {
        let mut config = CalendarConfig::default();
        assert!(matches!(
            config.apply_option(ConfigOption::Width, "12px"),
            Err(ConfigError::InvalidInteger { .. })
        ));
        assert!(matches!(
            config.apply_option(ConfigOption::MondayCellOffset, "7"),
            Err(ConfigError::OutOfRange { value: 7, max: 6, .. })
        ));
        assert!(matches!(
            config.apply_option(ConfigOption::FirstMonthDay, "0"),
            Err(ConfigError::OutOfRange { value: 0, min: 1, .. })
        ));
        assert!(matches!(
            config.apply_option(ConfigOption::DayNumber, "0"),
            Err(ConfigError::OutOfRange { .. })
        ));
        assert!(matches!(
            config.apply_option(ConfigOption::GoalWordcount, "-5"),
            Err(ConfigError::OutOfRange { .. })
        ));
        assert_eq!(config, CalendarConfig::default());
    }

    #[test]
    fn goal_names_are_parsed_with_aliases() {
        let mut config = CalendarConfig::default();
        config
            .apply_option(ConfigOption::GoalType, "downhill-cumulative")
            .unwrap();
        assert_eq!(config.goal_type, GoalKind::ReverseCumulative);
        assert!(matches!(
            config.apply_option(ConfigOption::GoalType, "zigzag"),
            Err(ConfigError::Goal(GoalParseError::UnsupportedGoalKind(_)))
        ));
        assert!(matches!(
            config.apply_option(ConfigOption::GoalRounding, "sideways"),
            Err(ConfigError::Goal(GoalParseError::UnknownRounding(_)))
        ));
    }

    #[test]
    fn month_sets_length_and_first_day() {
        let mut config = CalendarConfig::default();
        config.apply_option(ConfigOption::Month, "2024-02").unwrap();
        assert_eq!(config.day_number, 29);
        assert_eq!(config.first_month_day, 4);
        assert!(matches!(
            config.apply_option(ConfigOption::Month, "Feb 2024"),
            Err(ConfigError::Month(MonthError::Format(_)))
        ));
    }

    #[test]
    fn cell_size_setters_derive_document_size() {
        let mut config = CalendarConfig::default();
        config.set_cell_width(100);
        assert_eq!(config.width, 7 * 100 + 8 * 10);
        config.set_cell_height(100);
        assert_eq!(config.height, 5 * 100 + 4 * 10 + 2 * 10);
    }

    #[test]
    fn derived_setters_apply_after_their_inputs() {
        let mut config = CalendarConfig::default();
        config
            .apply_all([
                (ConfigOption::CellWidth, "100"),
                (ConfigOption::Margins, "20"),
            ])
            .unwrap();
        assert_eq!(config.margins, 20);
        assert_eq!(config.width, 7 * 100 + 8 * 20);
    }

    #[test]
    fn line_format_skips_comments_and_keeps_spaces_in_values() {
        let mut config = CalendarConfig::default();
        config
            .apply_str("# my calendar\n\nfont-family DejaVu Sans Mono\ngoal-wordcount 30000\n")
            .unwrap();
        assert_eq!(config.font_family, "DejaVu Sans Mono");
        assert_eq!(config.goal_wordcount, 30_000);
        assert!(matches!(
            config.apply_str("width"),
            Err(ConfigError::MalformedLine { line: 1 })
        ));
        assert!(matches!(
            config.apply_str("wdith 100"),
            Err(ConfigError::UnknownOption(_))
        ));
    }

    #[test]
    fn json_format_accepts_strings_and_numbers() {
        let mut config = CalendarConfig::default();
        config
            .apply_json_str(r#"{"month": "2023-11", "goal-wordcount": 40000, "goal-type": "uphill-daily"}"#)
            .unwrap();
        assert_eq!(config.day_number, 30);
        assert_eq!(config.first_month_day, 3);
        assert_eq!(config.goal_wordcount, 40_000);
        assert_eq!(config.goal_type, GoalKind::UphillDaily);
        assert!(matches!(
            config.apply_json_str("[1, 2]"),
            Err(ConfigError::JsonShape(_))
        ));
        assert!(matches!(
            config.apply_json_str(r#"{"width": true}"#),
            Err(ConfigError::JsonShape(_))
        ));
        assert!(matches!(config.apply_json_str("{"), Err(ConfigError::Json(_))));
    }

    #[test]
    fn later_options_in_a_file_win() {
        let mut config = CalendarConfig::default();
        config
            .apply_json_str(r#"{"month": "2024-02", "day-number": 10}"#)
            .unwrap();
        assert_eq!(config.day_number, 10);
        assert_eq!(config.first_month_day, 4);

        let mut config = CalendarConfig::default();
        config
            .apply_json_str(r#"{"day-number": 10, "month": "2024-02"}"#)
            .unwrap();
        assert_eq!(config.day_number, 29);

        let mut config = CalendarConfig::default();
        config.apply_str("month 2024-02\nday-number 10\n").unwrap();
        assert_eq!(config.day_number, 10);

        let path = std::env::temp_dir().join(format!("wordcal-order-{}.json", std::process::id()));
        std::fs::write(&path, r#"{"month": "2024-02", "day-number": 10}"#).unwrap();
        let mut config = CalendarConfig::default();
        config.apply_file(&path).unwrap();
        assert_eq!(config.day_number, 10);
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn environment_lookup_uses_prefixed_names() {
        let vars = HashMap::from([
            ("WORDCAL_DAY_NUMBER".to_string(), "30".to_string()),
            ("WORDCAL_GOAL_ROUNDING".to_string(), "down".to_string()),
            ("WORDCAL_CELL_PRIMARY_COLOR".to_string(), "#fafafa".to_string()),
        ]);
        let mut config = CalendarConfig::default();
        config.apply_env(|name| vars.get(name).cloned()).unwrap();
        assert_eq!(config.day_number, 30);
        assert_eq!(config.goal_rounding, Rounding::Down);
        assert_eq!(config.cell_primary_color, "#fafafa");
    }

    #[test]
    fn missing_file_reports_path() {
        let mut config = CalendarConfig::default();
        let err = config
            .apply_file(Path::new("/definitely/not/here.conf"))
            .unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.conf"));
    }

    #[test]
    fn validate_catches_direct_assignment() {
        let mut config = CalendarConfig::default();
        config.first_month_day = 9;
        assert!(matches!(
            config.layout(),
            Err(ConfigError::OutOfRange { option: ConfigOption::FirstMonthDay, .. })
        ));
        config.first_month_day = 7;
        config.day_number = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn display_lists_every_option() {
        let text = CalendarConfig::default().to_string();
        assert!(text.starts_with("CONFIG:"));
        assert!(text.contains("goal-type: regular-cumulative"));
        assert!(text.contains("output-filename: out.svg"));
    }
}
