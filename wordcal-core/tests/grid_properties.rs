use chrono::Weekday;
use wordcal_core::{CellKind, LayoutConfig, LayoutError, compute_grid};

const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

fn config(day_count: u32, first_weekday: Weekday, column_offset: u8) -> LayoutConfig {
    LayoutConfig {
        width: 1400,
        height: 1000,
        margin: 10,
        stroke_width: 5,
        roundness: 10,
        day_count,
        first_weekday,
        column_offset,
    }
}

#[test]
fn every_shape_has_full_rows_and_exact_primary_count() {
    for day_count in 1..=45 {
        for weekday in WEEKDAYS {
            for offset in 0..=6 {
                let cfg = config(day_count, weekday, offset);
                let grid = compute_grid(&cfg).unwrap();
                let first = (weekday.num_days_from_monday() + u32::from(offset)) % 7;
                assert_eq!(grid.first_cell_offset, first);
                assert_eq!(grid.row_count, (first + day_count).div_ceil(7));
                assert_eq!(grid.cells.len(), 7 * grid.row_count as usize);
                assert_eq!(grid.primary_cells().count(), day_count as usize);
            }
        }
    }
}

#[test]
fn primary_cells_hold_consecutive_dates_from_the_offset() {
    let grid = compute_grid(&config(30, Weekday::Sat, 2)).unwrap();
    assert_eq!(grid.first_cell_offset, 0);
    for (index, cell) in grid.cells.iter().enumerate() {
        let expected = (index < 30).then(|| index as u32 + 1);
        assert_eq!(cell.date, expected, "cell {index}");
        let kind = if expected.is_some() {
            CellKind::Primary
        } else {
            CellKind::Secondary
        };
        assert_eq!(cell.kind(), kind);
    }
}

#[test]
fn cells_are_row_major_and_uniform() {
    let grid = compute_grid(&config(31, Weekday::Sat, 0)).unwrap();
    assert_eq!(grid.row_count, 6);
    for (index, cell) in grid.cells.iter().enumerate() {
        assert_eq!(cell.row as usize, index / 7);
        assert_eq!(cell.column as usize, index % 7);
        assert_eq!(cell.geometry.width, grid.cell_width);
        assert_eq!(cell.geometry.height, grid.cell_height);
    }
    let last = grid.cells.last().unwrap().geometry;
    assert_eq!(last.x, 12 + 6 * (grid.cell_width + 15));
    assert_eq!(last.y, 12 + 5 * (grid.cell_height + 15));
}

#[test]
fn reference_document_geometry() {
    let cfg = LayoutConfig {
        width: 700,
        height: 500,
        margin: 10,
        stroke_width: 0,
        roundness: 0,
        day_count: 31,
        first_weekday: Weekday::Tue,
        column_offset: 0,
    };
    let grid = compute_grid(&cfg).unwrap();
    assert_eq!(grid.first_cell_offset, 1);
    assert_eq!(grid.row_count, 5);
    assert_eq!((grid.cell_width, grid.cell_height), (80, 88));
}

#[test]
fn empty_month_is_rejected_before_layout() {
    assert_eq!(
        compute_grid(&config(0, Weekday::Mon, 0)),
        Err(LayoutError::InvalidDayCount { day_count: 0 })
    );
}
