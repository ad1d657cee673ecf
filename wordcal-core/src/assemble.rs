//! Joins grid cells with their goal labels into renderer-neutral records.
use serde::{Deserialize, Serialize};

use crate::error::LayoutError;
use crate::goal::DailyLabels;
use crate::grid::{CalendarGrid, CellGeometry, CellKind};

/// A single cell ready to be drawn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellRecord {
    pub kind: CellKind,
    pub geometry: CellGeometry,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal: Option<String>,
}

/// Build one record per grid cell, in the grid's row-major order.
///
/// # Errors
///
/// Returns [`LayoutError::LabelCountMismatch`] if `labels` does not hold exactly one
/// entry per day of the grid.
pub fn assemble(grid: &CalendarGrid, labels: &DailyLabels) -> Result<Vec<CellRecord>, LayoutError> {
    let expected = usize::try_from(grid.day_count).unwrap_or(usize::MAX);
    if labels.len() != expected {
        return Err(LayoutError::LabelCountMismatch {
            expected,
            actual: labels.len(),
        });
    }

    let records = grid
        .cells
        .iter()
        .map(|cell| {
            let goal = cell.date.and_then(|date| labels.for_date(date));
            CellRecord {
                kind: cell.kind(),
                geometry: cell.geometry,
                date: cell.date.map(|date| date.to_string()),
                goal: goal.map(|label| label.to_string()),
            }
        })
        .collect();
    Ok(records)
}
