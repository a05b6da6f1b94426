//! Map, schedule and full-bleed quote layouts.

use super::{header, RenderResult, Tone, CONTENT_W};
use crate::presentation::document::{Rect, ShapeKind};
use crate::presentation::primitives::{Canvas, TextSpec};
use crate::presentation::records::{LocationMapSlide, QuoteImpactSlide, ScheduleSlide};
use crate::presentation::theme::{layout, ColorRole, SLIDE_HEIGHT, SLIDE_WIDTH};

const PERIODS: [&str; 5] = ["M1", "M2", "M3", "M4", "M5"];
const PHASES: [&str; 3] = ["Requirements", "Design", "Testing"];

/// A map placeholder with pins laid out two per row.
pub fn location_map(canvas: &mut Canvas<'_>, data: &LocationMapSlide) -> RenderResult {
    header(canvas, &data.title, data.subhead.as_deref(), Tone::Dark)?;
    let theme = canvas.theme();
    let (cx, cy) = (360.0, 240.0);

    canvas.rect(Rect::new(cx - 150.0, cy - 80.0, 300.0, 200.0), "#E2E8F0")?;
    canvas.text(
        Rect::new(cx - 50.0, cy + 10.0, 100.0, 20.0),
        "(Map Area)",
        TextSpec::new(10.0)
            .color(theme.color(ColorRole::TextGray))
            .centered(),
    )?;

    for (i, location) in data.locations.iter().enumerate() {
        let x = cx - 100.0 + (i % 2) as f64 * 200.0;
        let y = cy - 50.0 + (i / 2) as f64 * 60.0;
        let pin = canvas.shape(
            ShapeKind::Teardrop,
            Rect::new(x, y, 20.0, 20.0),
            Some(theme.color(ColorRole::Primary)),
        )?;
        canvas.rotate(pin, 180.0)?;
        canvas.text(
            Rect::new(x + 25.0, y, 100.0, 20.0),
            location,
            TextSpec::new(12.0).bold(),
        )?;
    }
    Ok(())
}

/// A phase grid with one highlighted period per phase, plus the duration.
pub fn schedule_table(canvas: &mut Canvas<'_>, data: &ScheduleSlide) -> RenderResult {
    header(canvas, &data.title, data.subhead.as_deref(), Tone::Dark)?;
    let theme = canvas.theme();
    let primary = theme.color(ColorRole::Primary);

    let table = canvas.table(
        PHASES.len() + 1,
        PERIODS.len(),
        Rect::new(layout::MARGIN, 180.0, CONTENT_W, 160.0),
    )?;
    for (col, period) in PERIODS.iter().enumerate() {
        canvas.cell_text(table, 0, col, period)?;
        canvas.cell_fill(table, 0, col, primary)?;
        canvas.cell_style(table, 0, col, TextSpec::new(12.0).color("#FFFFFF").bold())?;
    }
    for (i, phase) in PHASES.iter().enumerate() {
        canvas.cell_text(table, i + 1, 0, phase)?;
        canvas.cell_fill(table, i + 1, i + 1, theme.color(ColorRole::Secondary))?;
    }

    canvas.text(
        Rect::new(layout::MARGIN, 350.0, 300.0, 30.0),
        &format!("Duration: {}", data.duration),
        TextSpec::new(14.0).bold().color(primary),
    )?;
    Ok(())
}

/// A quote in large italics over a full-page primary panel.
pub fn quote_impact(canvas: &mut Canvas<'_>, data: &QuoteImpactSlide) -> RenderResult {
    let theme = canvas.theme();
    let white = theme.color(ColorRole::TextWhite);

    canvas.rect(
        Rect::new(0.0, 0.0, SLIDE_WIDTH, SLIDE_HEIGHT),
        theme.color(ColorRole::Primary),
    )?;
    canvas.text(
        Rect::new(60.0, 120.0, 600.0, 100.0),
        &format!("“ {} ”", data.quote),
        TextSpec::new(32.0).bold().italic().color(white).centered(),
    )?;
    canvas.text(
        Rect::new(60.0, 250.0, 600.0, 30.0),
        &data.author,
        TextSpec::new(18.0).bold().color(white).centered(),
    )?;
    canvas.text(
        Rect::new(60.0, 60.0, 600.0, 40.0),
        &data.title,
        TextSpec::new(24.0)
            .bold()
            .color(theme.color(ColorRole::TextGray))
            .centered(),
    )?;
    Ok(())
}
