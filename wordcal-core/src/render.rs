//! Turns cell records into a styled SVG document.
use crate::assemble::CellRecord;
use crate::config::CalendarConfig;
use crate::grid::{CellGeometry, CellKind};
use crate::svg::{Group, Rect, SvgDocument, SvgNode, Text};

/// Build the calendar document.
///
/// Secondary cells are drawn first, then primary cells, then a text layer
/// holding the date labels (top left of each cell) and goal labels (bottom
/// right). Records keep their relative placement through coordinates only.
#[must_use]
pub fn render_document(config: &CalendarConfig, records: &[CellRecord]) -> SvgDocument {
    let mut secondary_cells = Vec::new();
    let mut primary_cells = Vec::new();
    let mut dates = Vec::new();
    let mut goals = Vec::new();

    for record in records {
        let rect = cell_rect(&record.geometry);
        match record.kind {
            CellKind::Secondary => secondary_cells.push(rect),
            CellKind::Primary => {
                primary_cells.push(rect);
                let CellGeometry {
                    x,
                    y,
                    width,
                    height,
                    ..
                } = record.geometry;
                if let Some(date) = &record.date {
                    dates.push(SvgNode::from(Text {
                        x: x.saturating_add(config.text_offset_x),
                        y: y.saturating_add(config.text_offset_y),
                        text: date.clone(),
                    }));
                }
                if let Some(goal) = &record.goal {
                    goals.push(SvgNode::from(Text {
                        x: x.saturating_add(width).saturating_sub(config.text_offset_x),
                        y: y.saturating_add(height).saturating_sub(config.text_offset_y),
                        text: goal.clone(),
                    }));
                }
            }
        }
    }

    let secondary_group = Group::default()
        .with_attribute(
            "style",
            cell_style(
                &config.cell_secondary_color,
                &config.cell_secondary_color,
                config.cell_stroke_width,
            ),
        )
        .with_children(secondary_cells);

    let primary_group = Group::default()
        .with_attribute(
            "style",
            cell_style(
                &config.cell_primary_color,
                &config.cell_secondary_color,
                config.cell_stroke_width,
            ),
        )
        .with_children(primary_cells);

    let dates_group = Group::default()
        .with_attribute("dominant-baseline", config.text_baseline.as_str())
        .with_children(dates);

    let goals_group = Group::default()
        .with_attribute("text-anchor", "end")
        .with_children(goals);

    let text_group = Group::default()
        .with_attribute("style", format!("fill:{}", config.text_color))
        .with_attribute("font-family", config.font_family.as_str())
        .with_attribute("font-size", config.font_size.to_string())
        .with_attribute("font-weight", config.font_weight.as_str())
        .with_children(vec![dates_group.into(), goals_group.into()]);

    SvgDocument {
        width: config.width,
        height: config.height,
        children: vec![
            secondary_group.into(),
            primary_group.into(),
            text_group.into(),
        ],
    }
}

fn cell_rect(geometry: &CellGeometry) -> SvgNode {
    SvgNode::from(Rect {
        x: geometry.x,
        y: geometry.y,
        width: geometry.width,
        height: geometry.height,
        rx: Some(geometry.roundness),
        ry: Some(geometry.roundness),
    })
}

fn cell_style(fill: &str, stroke: &str, stroke_width: i32) -> String {
    format!("fill:{fill}; stroke-width:{stroke_width}; stroke:{stroke}")
}
