//! wordcal core
//!
//! Layout and goal-distribution logic for word-count tracking calendars.
//! The grid and goal engines are pure; configuration loading and SVG output
//! sit on top of them and are never called back into.

pub mod assemble;
pub mod config;
pub mod error;
pub mod goal;
pub mod grid;
pub mod math;
pub mod month;
pub mod render;
pub mod svg;

pub use assemble::{CellRecord, assemble};
pub use config::{CalendarConfig, ConfigError, ConfigOption};
pub use error::{CalendarError, LayoutError};
pub use goal::{
    DailyLabels, GoalKind, GoalMode, GoalParseError, GoalSpec, Rounding, Strategy, compute_labels,
    daily_labels,
};
pub use grid::{CalendarGrid, CellGeometry, CellKind, GridCell, LayoutConfig, compute_grid};
pub use month::{MonthError, MonthSpec};
pub use render::render_document;
pub use svg::SvgDocument;

/// Run both engines and join their output.
///
/// # Errors
///
/// Returns an error if the two inputs disagree on the day count or either
/// engine rejects its input.
pub fn build_records(layout: &LayoutConfig, goal: &GoalSpec) -> Result<Vec<CellRecord>, LayoutError> {
    if layout.day_count != goal.day_count {
        return Err(LayoutError::DayCountMismatch {
            layout: layout.day_count,
            goal: goal.day_count,
        });
    }
    let grid = compute_grid(layout)?;
    let labels = compute_labels(goal)?;
    assemble(&grid, &labels)
}

/// Cell records for a full configuration.
///
/// # Errors
///
/// Returns an error if the configuration is invalid.
pub fn calendar_records(config: &CalendarConfig) -> Result<Vec<CellRecord>, CalendarError> {
    let layout = config.layout()?;
    Ok(build_records(&layout, &config.goal())?)
}

/// Render a full configuration into an SVG document.
///
/// # Errors
///
/// Returns an error if the configuration is invalid.
pub fn build_calendar(config: &CalendarConfig) -> Result<SvgDocument, CalendarError> {
    let records = calendar_records(config)?;
    Ok(render_document(config, &records))
}
