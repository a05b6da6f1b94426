//! Sequential step layouts joined by arrows.

use super::{header, plain_page, slot_width, RenderResult, Tone, CONTENT_W};
use crate::presentation::document::{Border, Rect, ShapeKind};
use crate::presentation::primitives::{Canvas, TextSpec};
use crate::presentation::records::StepsSlide;
use crate::presentation::theme::{font_size, layout, ColorRole, FontRole, SLIDE_WIDTH};

const STEP_FILL: &str = "#F8FAFC";

/// Numbered badges over cards, left to right.
pub fn process(canvas: &mut Canvas<'_>, data: &StepsSlide) -> RenderResult {
    plain_page(canvas, &data.title, data.subhead.as_deref(), Tone::Primary)?;
    let theme = canvas.theme();
    let body = theme.font(FontRole::Body);
    let count = data.steps.len();

    let arrow_w = 20.0;
    let step_w = slot_width(CONTENT_W, count, arrow_w);
    let step_h = 220.0;
    let start_y = layout::CONTENT_Y + 25.0;

    for (index, step) in data.steps.iter().enumerate() {
        let x = layout::MARGIN + index as f64 * (step_w + arrow_w);
        canvas.badge(
            ShapeKind::Ellipse,
            Rect::new(x + step_w / 2.0 - 20.0, start_y, 40.0, 40.0),
            theme.color(ColorRole::Accent),
            &(index + 1).to_string(),
            TextSpec::new(18.0)
                .color(theme.color(ColorRole::TextWhite))
                .bold()
                .font(body),
        )?;
        canvas.rect(
            Rect::new(x, start_y + 50.0, step_w, step_h - 50.0),
            theme.color(ColorRole::CardBg),
        )?;
        canvas.text(
            Rect::new(x + 5.0, start_y + 65.0, step_w - 10.0, step_h - 70.0),
            step,
            TextSpec::new(font_size::CARD_DESC)
                .color(theme.color(ColorRole::TextDark))
                .font(body)
                .centered(),
        )?;
        if index + 1 < count {
            canvas.text(
                Rect::new(x + step_w, start_y + step_h / 2.0 - 5.0, arrow_w, 30.0),
                "→",
                TextSpec::new(20.0)
                    .color(theme.color(ColorRole::Accent))
                    .bold()
                    .font(body)
                    .centered(),
            )?;
        }
    }
    Ok(())
}

/// Outlined boxes in a row with block arrows in the gaps.
pub fn flow_horizontal(canvas: &mut Canvas<'_>, data: &StepsSlide) -> RenderResult {
    header(canvas, &data.title, data.subhead.as_deref(), Tone::Primary)?;
    let theme = canvas.theme();
    let count = data.steps.len();
    let arrow_gap = 10.0;
    let step_w = slot_width(CONTENT_W, count, arrow_gap);
    let (y, h) = (200.0, 80.0);

    for (i, step) in data.steps.iter().enumerate() {
        let x = layout::MARGIN + i as f64 * (step_w + arrow_gap);
        let boxed = canvas.rect(Rect::new(x, y, step_w, h), STEP_FILL)?;
        canvas.border(boxed, Border::solid(theme.color(ColorRole::Primary), 1.0))?;
        canvas.text(
            Rect::new(x + 5.0, y + 20.0, step_w - 10.0, 40.0),
            step,
            TextSpec::new(14.0).bold().centered(),
        )?;
        if i + 1 < count {
            canvas.shape(
                ShapeKind::RightArrow,
                Rect::new(x + step_w, y + h / 2.0 - 10.0, arrow_gap, 20.0),
                Some(theme.color(ColorRole::Secondary)),
            )?;
        }
    }
    Ok(())
}

/// A centered column of boxes with down arrows between them.
pub fn flow_vertical(canvas: &mut Canvas<'_>, data: &StepsSlide) -> RenderResult {
    header(canvas, &data.title, data.subhead.as_deref(), Tone::Primary)?;
    let count = data.steps.len();
    if count == 0 {
        return Ok(());
    }
    let theme = canvas.theme();
    let gap = 15.0;
    let step_h = f64::min(50.0, (300.0 - count as f64 * gap) / count as f64);
    let (x, w) = (200.0, 320.0);

    for (i, step) in data.steps.iter().enumerate() {
        let y = layout::CONTENT_Y + i as f64 * (step_h + gap);
        let boxed = canvas.rect(Rect::new(x, y, w, step_h), STEP_FILL)?;
        canvas.border(boxed, Border::solid(theme.color(ColorRole::Primary), 1.0))?;
        canvas.text(
            Rect::new(x + 10.0, y + step_h / 2.0 - 10.0, w - 20.0, 20.0),
            step,
            TextSpec::new(14.0).bold().centered(),
        )?;
        if i + 1 < count {
            canvas.shape(
                ShapeKind::DownArrow,
                Rect::new(x + w / 2.0 - 10.0, y + step_h, 20.0, gap),
                Some(theme.color(ColorRole::Secondary)),
            )?;
        }
    }
    Ok(())
}

/// Stylized screen mockups, one per step, centered on the page.
pub fn capture_flow(canvas: &mut Canvas<'_>, data: &StepsSlide) -> RenderResult {
    header(canvas, &data.title, data.subhead.as_deref(), Tone::Primary)?;
    let theme = canvas.theme();
    let count = data.steps.len();
    let (cap_w, cap_h) = (120.0, 180.0);
    let gap = 40.0;
    let total = count as f64 * cap_w + count.saturating_sub(1) as f64 * gap;
    let start_x = SLIDE_WIDTH / 2.0 - total / 2.0;
    let y = 200.0;

    for (i, step) in data.steps.iter().enumerate() {
        let x = start_x + i as f64 * (cap_w + gap);
        let screen = canvas.rect(Rect::new(x, y, cap_w, cap_h), "#FFFFFF")?;
        canvas.border(screen, Border::solid(theme.color(ColorRole::TextGray), 1.0))?;
        canvas.rect(Rect::new(x + 10.0, y + 10.0, cap_w - 20.0, 10.0), "#E2E8F0")?;
        canvas.rect(Rect::new(x + 10.0, y + 30.0, cap_w - 20.0, 80.0), "#F1F5F9")?;
        canvas.rect(
            Rect::new(x + 20.0, y + 140.0, cap_w - 40.0, 20.0),
            theme.color(ColorRole::Primary),
        )?;
        canvas.text(
            Rect::new(x, y + cap_h + 10.0, cap_w, 40.0),
            &format!("{}. {}", i + 1, step),
            TextSpec::new(11.0).bold().centered(),
        )?;
        if i + 1 < count {
            canvas.shape(
                ShapeKind::RightArrow,
                Rect::new(x + cap_w + 5.0, y + cap_h / 2.0 - 15.0, gap - 10.0, 30.0),
                Some(theme.color(ColorRole::Secondary)),
            )?;
        }
    }
    Ok(())
}
