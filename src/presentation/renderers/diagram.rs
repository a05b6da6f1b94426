//! Positioning diagrams: matrix, Venn and ranking board.

use super::{header, RenderResult, Tone};
use crate::presentation::document::{Border, Rect, ShapeKind};
use crate::presentation::primitives::{Canvas, TextSpec};
use crate::presentation::records::{ItemsSlide, RankingSlide, VennSlide};
use crate::presentation::theme::{font_size, ColorRole};

const VENN_FILLS: [&str; 3] = ["#DBEAFE", "#FEE2E2", "#D1FAE5"];
const VENN_OFFSETS: [(f64, f64); 3] = [(0.0, -40.0), (-40.0, 40.0), (40.0, 40.0)];
const SCHEDULE_PERIODS: [&str; 5] = ["M1", "M2", "M3", "M4", "M5"];
/// Fixed sample schedule: task name and the period columns it occupies.
const SCHEDULE_TASKS: [(&str, &[usize]); 3] = [
    ("Requirements", &[1, 2]),
    ("Design", &[2, 3, 4]),
    ("Testing", &[4, 5]),
];
const GOLD: &str = "#D97706";

/// Crossed axes with the first two items placed in opposite quadrants.
pub fn matrix_pos(canvas: &mut Canvas<'_>, data: &ItemsSlide) -> RenderResult {
    header(canvas, &data.title, data.subhead.as_deref(), Tone::Dark)?;
    let theme = canvas.theme();
    let (cx, cy) = (360.0, 240.0);
    let size = 260.0;
    let gray = theme.color(ColorRole::TextGray);

    canvas.rect(Rect::new(cx - size / 2.0, cy, size, 2.0), gray)?;
    canvas.rect(Rect::new(cx, cy - size / 2.0, 2.0, size), gray)?;

    let spots = [
        ((cx + 40.0, cy - 60.0), theme.color(ColorRole::Primary)),
        ((cx - 100.0, cy + 40.0), theme.color(ColorRole::Secondary)),
    ];
    for (item, ((x, y), fill)) in data.items.iter().zip(spots) {
        canvas.ellipse(Rect::new(x, y, 60.0, 60.0), fill)?;
        canvas.text(
            Rect::new(x, y + 20.0, 60.0, 20.0),
            &item.title,
            TextSpec::new(10.0).color("#FFFFFF").bold().centered(),
        )?;
    }
    Ok(())
}

/// Up to three overlapping circles, one per item.
pub fn venn_diagram(canvas: &mut Canvas<'_>, data: &VennSlide) -> RenderResult {
    header(canvas, &data.title, data.subhead.as_deref(), Tone::Dark)?;
    let (cx, cy) = (360.0, 240.0);
    let radius = 90.0;

    for ((item, (dx, dy)), fill) in data.items.iter().zip(VENN_OFFSETS).zip(VENN_FILLS) {
        let (x, y) = (cx + dx, cy + dy);
        canvas.ellipse(Rect::new(x - radius, y - radius, radius * 2.0, radius * 2.0), fill)?;
        canvas.text(
            Rect::new(x - 50.0, y - 10.0, 100.0, 20.0),
            &item.title,
            TextSpec::new(12.0).bold().centered(),
        )?;
    }
    Ok(())
}

/// A sample schedule grid followed by the ranked entries.
///
/// Ranked rows start below the grid at y = 400, so most of them fall past
/// the bottom edge of the page.
pub fn ranking_board(canvas: &mut Canvas<'_>, data: &RankingSlide) -> RenderResult {
    header(canvas, &data.title, data.subhead.as_deref(), Tone::Dark)?;
    let theme = canvas.theme();
    let primary = theme.color(ColorRole::Primary);
    let secondary = theme.color(ColorRole::Secondary);
    let table_y = 150.0;
    let table_h = 200.0;

    let table = canvas.table(
        SCHEDULE_TASKS.len() + 1,
        SCHEDULE_PERIODS.len() + 1,
        Rect::new(80.0, table_y, 600.0, table_h),
    )?;
    for (i, period) in SCHEDULE_PERIODS.iter().enumerate() {
        canvas.cell_text(table, 0, i + 1, period)?;
        canvas.cell_fill(table, 0, i + 1, primary)?;
        canvas.cell_style(table, 0, i + 1, TextSpec::new(font_size::BODY).color("#FFFFFF").bold())?;
    }
    for (i, (task, columns)) in SCHEDULE_TASKS.iter().enumerate() {
        let row = i + 1;
        canvas.cell_text(table, row, 0, task)?;
        canvas.cell_style(table, row, 0, TextSpec::new(font_size::BODY).bold())?;
        for col in columns.iter() {
            canvas.cell_fill(table, row, *col, secondary)?;
        }
    }

    let (item_h, gap) = (50.0, 15.0);
    let start_y = table_y + table_h + 50.0;
    let (x, width) = (120.0, 480.0);
    for (i, entry) in data.rank.iter().enumerate() {
        let y = start_y + i as f64 * (item_h + gap);
        let leader = i == 0;
        let row = canvas.shape(
            ShapeKind::Rectangle,
            Rect::new(x, y, width, item_h),
            Some(if leader { primary } else { "#F1F5F9" }),
        )?;
        canvas.border(row, Border::solid(primary, 1.0))?;
        canvas.text(
            Rect::new(x + 10.0, y + 10.0, 50.0, 30.0),
            &(i + 1).to_string(),
            TextSpec::new(20.0)
                .bold()
                .color(if leader { GOLD } else { theme.color(ColorRole::TextGray) }),
        )?;
        canvas.text(
            Rect::new(x + 70.0, y + 10.0, width - 80.0, 30.0),
            entry,
            TextSpec::new(16.0).bold(),
        )?;
    }
    Ok(())
}
