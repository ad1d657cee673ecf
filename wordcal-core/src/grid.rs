//! Grid layout engine: turns month shape and document size into cell geometry.
use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::error::LayoutError;
use crate::math::ceil_div;

/// Number of columns in the calendar grid.
pub const WEEK_LEN: u32 = 7;

/// Geometry inputs for a single month.
///
/// Nothing here checks that the resulting cells have a positive size; extreme
/// margins simply produce degenerate rectangles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutConfig {
    pub width: i32,
    pub height: i32,
    pub margin: i32,
    pub stroke_width: i32,
    pub roundness: i32,
    pub day_count: u32,
    pub first_weekday: Weekday,
    /// Shifts the column Monday lands in, 0..=6.
    pub column_offset: u8,
}

impl LayoutConfig {
    /// # Errors
    ///
    /// Returns an error if the day count is zero or the column offset is above 6.
    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.day_count < 1 {
            return Err(LayoutError::InvalidDayCount {
                day_count: self.day_count,
            });
        }
        if self.column_offset > 6 {
            return Err(LayoutError::ColumnOffsetOutOfRange {
                offset: self.column_offset,
            });
        }
        Ok(())
    }

    /// Row-major index of the cell holding day 1.
    #[must_use]
    pub fn first_cell_offset(&self) -> u32 {
        (self.first_weekday.num_days_from_monday() + u32::from(self.column_offset)) % WEEK_LEN
    }

    /// Spacing between neighbouring cells.
    #[must_use]
    pub const fn inner_margin(&self) -> i32 {
        self.margin.saturating_add(self.stroke_width)
    }

    /// Spacing between the outer cells and the document edge. Only half the
    /// stroke is added so the outer stroke stays on the canvas.
    #[must_use]
    pub const fn border_margin(&self) -> i32 {
        self.margin.saturating_add(self.stroke_width / 2)
    }

    #[must_use]
    pub fn row_count(&self) -> u32 {
        let slots = u64::from(self.first_cell_offset()) + u64::from(self.day_count);
        u32::try_from(ceil_div(slots, u64::from(WEEK_LEN))).unwrap_or(u32::MAX)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellKind {
    /// A day inside the month.
    Primary,
    /// Padding before day 1 or after the last day.
    Secondary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellGeometry {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub roundness: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridCell {
    pub row: u32,
    pub column: u32,
    /// Day of month for primary cells.
    pub date: Option<u32>,
    pub geometry: CellGeometry,
}

impl GridCell {
    #[must_use]
    pub const fn kind(&self) -> CellKind {
        if self.date.is_some() {
            CellKind::Primary
        } else {
            CellKind::Secondary
        }
    }
}

/// Output of [`compute_grid`]: `7 * row_count` cells in row-major order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarGrid {
    pub day_count: u32,
    pub first_cell_offset: u32,
    pub row_count: u32,
    pub cell_width: i32,
    pub cell_height: i32,
    pub cells: Vec<GridCell>,
}

impl CalendarGrid {
    pub fn primary_cells(&self) -> impl Iterator<Item = &GridCell> {
        self.cells.iter().filter(|cell| cell.date.is_some())
    }

    pub fn secondary_cells(&self) -> impl Iterator<Item = &GridCell> {
        self.cells.iter().filter(|cell| cell.date.is_none())
    }
}

/// Lay out the month described by `config`.
///
/// # Errors
///
/// Returns an error if `config` fails [`LayoutConfig::validate`].
pub fn compute_grid(config: &LayoutConfig) -> Result<CalendarGrid, LayoutError> {
    config.validate()?;

    let first_cell_offset = config.first_cell_offset();
    let row_count = config.row_count();
    let inner_margin = config.inner_margin();
    let border_margin = config.border_margin();

    let spacing = inner_margin
        .saturating_mul(6)
        .saturating_add(border_margin.saturating_mul(2));
    let cell_width = config.width.saturating_sub(spacing) / 7;
    let cell_height =
        config.height.saturating_sub(spacing) / i32::try_from(row_count).unwrap_or(i32::MAX);

    if cell_width <= 0 || cell_height <= 0 {
        log::warn!(
            "degenerate cell size {cell_width}x{cell_height} for {}x{} document",
            config.width,
            config.height
        );
    }

    let mut cells =
        Vec::with_capacity(usize::try_from(row_count.saturating_mul(WEEK_LEN)).unwrap_or(0));
    let mut y = border_margin;
    let mut index = 0_u32;
    for row in 0..row_count {
        let mut x = border_margin;
        for column in 0..WEEK_LEN {
            let date = (index + 1)
                .checked_sub(first_cell_offset)
                .filter(|date| (1..=config.day_count).contains(date));
            cells.push(GridCell {
                row,
                column,
                date,
                geometry: CellGeometry {
                    x,
                    y,
                    width: cell_width,
                    height: cell_height,
                    roundness: config.roundness,
                },
            });
            x = x.saturating_add(cell_width).saturating_add(inner_margin);
            index += 1;
        }
        y = y.saturating_add(cell_height).saturating_add(inner_margin);
    }

    log::debug!(
        "grid: {row_count} rows, day 1 at cell {first_cell_offset}, cells {cell_width}x{cell_height}"
    );

    Ok(CalendarGrid {
        day_count: config.day_count,
        first_cell_offset,
        row_count,
        cell_width,
        cell_height,
        cells,
    })
}
