//! Formula-style layouts.

use super::{header, slot_width, RenderResult, Tone};
use crate::presentation::document::{Border, Rect};
use crate::presentation::primitives::{Canvas, TextSpec};
use crate::presentation::records::{FormulaSlide, ListSlide, MultiplySlide};
use crate::presentation::theme::{ColorRole, SLIDE_WIDTH};

const BOX_FILL: &str = "#EFF6FF";
const RESULT_FILL: &str = "#FEF3C7";
const RESULT_EDGE: &str = "#F59E0B";
const RESULT_INK: &str = "#B45309";

/// The formula in large type inside an outlined box.
pub fn formula_logic(canvas: &mut Canvas<'_>, data: &FormulaSlide) -> RenderResult {
    header(canvas, &data.title, data.subhead.as_deref(), Tone::Dark)?;
    let theme = canvas.theme();
    let (x, y, w, h) = (80.0, 200.0, 560.0, 100.0);

    let frame = canvas.rect(Rect::new(x, y, w, h), "#F8FAFC")?;
    canvas.border(frame, Border::solid(theme.color(ColorRole::Primary), 2.0))?;
    canvas.text(
        Rect::new(x + 20.0, y + 25.0, w - 40.0, 50.0),
        &data.formula,
        TextSpec::new(28.0)
            .bold()
            .color(theme.color(ColorRole::Primary))
            .centered(),
    )?;
    Ok(())
}

/// `A × B = result`, using the first two items.
pub fn multiply_effect(canvas: &mut Canvas<'_>, data: &MultiplySlide) -> RenderResult {
    header(canvas, &data.title, data.subhead.as_deref(), Tone::Dark)?;
    let theme = canvas.theme();
    let cy = 240.0;
    let cx = SLIDE_WIDTH / 2.0;
    let start_x = 60.0;
    let (box_w, box_h) = (140.0, 80.0);
    let gap = 40.0;
    let operator = TextSpec::new(24.0).bold().centered();

    let backdrop = canvas.rect(Rect::new(cx - 250.0, cy - 40.0, 200.0, 80.0), BOX_FILL)?;
    canvas.border(backdrop, Border::solid(theme.color(ColorRole::Primary), 1.0))?;
    canvas.text(
        Rect::new(cx - 280.0, cy - 40.0, 150.0, 80.0),
        data.items.first().map(String::as_str).unwrap_or_default(),
        TextSpec::new(18.0).bold().centered(),
    )?;

    for (i, item) in data.items.iter().take(2).enumerate() {
        let x = start_x + i as f64 * (box_w + gap);
        canvas.rect(Rect::new(x, cy - 40.0, box_w, box_h), BOX_FILL)?;
        canvas.text(
            Rect::new(x, cy - 15.0, box_w, 30.0),
            item,
            TextSpec::new(12.0).bold().centered(),
        )?;
        if i == 0 {
            canvas.text(Rect::new(x + box_w, cy - 20.0, gap, 40.0), "×", operator)?;
        }
    }

    let result_x = start_x + 2.0 * (box_w + gap);
    canvas.text(Rect::new(result_x - gap, cy - 20.0, gap, 40.0), "=", operator)?;
    let result = canvas.rect(Rect::new(cx + 120.0, cy - 50.0, 180.0, 100.0), RESULT_FILL)?;
    canvas.border(result, Border::solid(RESULT_EDGE, 2.0))?;
    canvas.text(
        Rect::new(result_x, cy - 15.0, 180.0, 30.0),
        &data.result,
        TextSpec::new(18.0).bold().color(RESULT_INK).centered(),
    )?;
    Ok(())
}

/// Boxes in a row joined by plus signs.
pub fn add_combination(canvas: &mut Canvas<'_>, data: &ListSlide) -> RenderResult {
    header(canvas, &data.title, data.subhead.as_deref(), Tone::Dark)?;
    let count = data.items.len();
    let total_w = 600.0;
    let start_x = (SLIDE_WIDTH - total_w) / 2.0;
    let (y, h) = (200.0, 100.0);
    let gap = 30.0;
    let w = slot_width(total_w, count, gap);

    for (i, item) in data.items.iter().enumerate() {
        let x = start_x + i as f64 * (w + gap);
        canvas.rect(Rect::new(x, y, w, h), "#F1F5F9")?;
        canvas.text(
            Rect::new(x + 5.0, y + 35.0, w - 10.0, 30.0),
            item,
            TextSpec::new(14.0).bold().centered(),
        )?;
        if i + 1 < count {
            canvas.text(
                Rect::new(x + w, y + 30.0, gap, 40.0),
                "+",
                TextSpec::new(20.0).centered(),
            )?;
        }
    }
    Ok(())
}
