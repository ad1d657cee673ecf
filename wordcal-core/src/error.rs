//! Errors raised by the layout and goal engines.
use thiserror::Error;

/// Errors raised when layout or goal invariants are violated.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum LayoutError {
    #[error("day count must be at least 1 (got {day_count})")]
    InvalidDayCount { day_count: u32 },
    #[error("weekday column offset must be between 0 and 6 (got {offset})")]
    ColumnOffsetOutOfRange { offset: u8 },
    #[error("expected {expected} daily labels, got {actual}")]
    LabelCountMismatch { expected: usize, actual: usize },
    #[error("layout covers {layout} days but the goal covers {goal}")]
    DayCountMismatch { layout: u32, goal: u32 },
}

/// Any failure on the way from configuration to a finished document.
#[derive(Debug, Error)]
pub enum CalendarError {
    #[error("invalid configuration: {0}")]
    Config(#[from] crate::config::ConfigError),
    #[error("layout failed: {0}")]
    Layout(#[from] LayoutError),
}
