//! Parallel item layouts and nested areas.

use super::{header, slot_width, RenderResult, Tone, CONTENT_W};
use crate::presentation::document::{Border, Rect, ShapeKind};
use crate::presentation::primitives::{Canvas, TextSpec};
use crate::presentation::records::{AreaRangeSlide, InclusionSlide, ItemsSlide, ListSlide};
use crate::presentation::theme::{font_size, layout, ColorRole};

const PANEL: &str = "#F8FAFC";
const OVERLAP_FILLS: [&str; 3] = ["#FEE2E2", "#DBEAFE", "#D1FAE5"];

/// Cards side by side, title on top.
pub fn parallel_horizontal(canvas: &mut Canvas<'_>, data: &ItemsSlide) -> RenderResult {
    header(canvas, &data.title, data.subhead.as_deref(), Tone::Dark)?;
    let theme = canvas.theme();
    let gap = 15.0;
    let width = slot_width(CONTENT_W, data.items.len(), gap);
    let (y, h) = (layout::CONTENT_Y, 200.0);

    for (i, item) in data.items.iter().enumerate() {
        let x = layout::MARGIN + i as f64 * (width + gap);
        canvas.rect(Rect::new(x, y, width, h), PANEL)?;
        canvas.text(
            Rect::new(x + 10.0, y + 10.0, width - 20.0, 30.0),
            &item.title,
            TextSpec::new(font_size::CARD_TITLE)
                .color(theme.color(ColorRole::Primary))
                .bold()
                .centered(),
        )?;
        canvas.text(
            Rect::new(x + 10.0, y + 45.0, width - 20.0, h - 55.0),
            item.desc(),
            TextSpec::new(font_size::CARD_DESC).color(theme.color(ColorRole::TextDark)),
        )?;
    }
    Ok(())
}

/// Full-width bands stacked vertically, title left and description right.
pub fn parallel_vertical(canvas: &mut Canvas<'_>, data: &ItemsSlide) -> RenderResult {
    header(canvas, &data.title, data.subhead.as_deref(), Tone::Dark)?;
    if data.items.is_empty() {
        return Ok(());
    }
    let theme = canvas.theme();
    let gap = 10.0;
    let height = f64::min(60.0, slot_width(250.0, data.items.len(), gap));
    let x = layout::MARGIN;

    for (i, item) in data.items.iter().enumerate() {
        let y = layout::CONTENT_Y + i as f64 * (height + gap);
        canvas.rect(Rect::new(x, y, CONTENT_W, height), PANEL)?;
        canvas.text(
            Rect::new(x + 10.0, y + height / 2.0 - 10.0, 150.0, 20.0),
            &item.title,
            TextSpec::new(font_size::CARD_TITLE)
                .color(theme.color(ColorRole::Primary))
                .bold(),
        )?;
        canvas.text(
            Rect::new(x + 170.0, y + 5.0, CONTENT_W - 180.0, height - 10.0),
            item.desc(),
            TextSpec::new(font_size::CARD_DESC).color(theme.color(ColorRole::TextDark)),
        )?;
    }
    Ok(())
}

/// Two-column grid of fixed-height cards.
pub fn parallel_multiple(canvas: &mut Canvas<'_>, data: &ItemsSlide) -> RenderResult {
    header(canvas, &data.title, data.subhead.as_deref(), Tone::Dark)?;
    let theme = canvas.theme();
    let cols = 2;
    let gap = 15.0;
    let width = slot_width(CONTENT_W, cols, gap);
    let height = 100.0;

    for (i, item) in data.items.iter().enumerate() {
        let x = layout::MARGIN + (i % cols) as f64 * (width + gap);
        let y = layout::CONTENT_Y + (i / cols) as f64 * (height + gap);
        canvas.rect(Rect::new(x, y, width, height), PANEL)?;
        canvas.text(
            Rect::new(x + 10.0, y + 10.0, width - 20.0, 25.0),
            &item.title,
            TextSpec::new(font_size::CARD_TITLE)
                .color(theme.color(ColorRole::Primary))
                .bold(),
        )?;
        canvas.text(
            Rect::new(x + 10.0, y + 40.0, width - 20.0, height - 50.0),
            item.desc(),
            TextSpec::new(font_size::CARD_DESC).color(theme.color(ColorRole::TextDark)),
        )?;
    }
    Ok(())
}

/// One band split into equal ranges with thin separators.
pub fn area_range(canvas: &mut Canvas<'_>, data: &AreaRangeSlide) -> RenderResult {
    header(canvas, &data.title, data.subhead.as_deref(), Tone::Dark)?;
    let theme = canvas.theme();
    let (x, y) = (layout::MARGIN, layout::CONTENT_Y + 50.0);
    let height = 100.0;

    let band = canvas.rect(Rect::new(x, y, CONTENT_W, height), "#EEF2FF")?;
    canvas.border(band, Border::Transparent)?;
    if data.ranges.is_empty() {
        return Ok(());
    }

    let count = data.ranges.len();
    let step = CONTENT_W / count as f64;
    for (i, range) in data.ranges.iter().enumerate() {
        let rx = x + i as f64 * step;
        canvas.text(
            Rect::new(rx, y + height / 2.0 - 15.0, step, 30.0),
            range,
            TextSpec::new(font_size::CARD_TITLE)
                .color(theme.color(ColorRole::Primary))
                .bold()
                .centered(),
        )?;
        if i + 1 < count {
            canvas.rect(Rect::new(rx + step - 0.5, y + 20.0, 1.0, height - 40.0), "#C7D2FE")?;
        }
    }
    Ok(())
}

/// Three overlapping circles with the items stacked in the middle.
pub fn overlap_info(canvas: &mut Canvas<'_>, data: &ListSlide) -> RenderResult {
    header(canvas, &data.title, data.subhead.as_deref(), Tone::Dark)?;
    let theme = canvas.theme();
    let (cx, cy) = (360.0, 240.0);
    let radius = 80.0;
    let centers = [(cx - 50.0, cy - 30.0), (cx + 50.0, cy - 30.0), (cx, cy + 40.0)];

    for ((x, y), fill) in centers.into_iter().zip(OVERLAP_FILLS) {
        canvas.ellipse(Rect::new(x - radius, y - radius, radius * 2.0, radius * 2.0), fill)?;
    }
    if !data.items.is_empty() {
        canvas.text(
            Rect::new(cx - 60.0, cy - 15.0, 120.0, 30.0),
            &data.items.join("\n"),
            TextSpec::new(12.0)
                .color(theme.color(ColorRole::Primary))
                .bold()
                .centered(),
        )?;
    }
    Ok(())
}

/// A parent box holding its children in a row.
pub fn inclusion_hier(canvas: &mut Canvas<'_>, data: &InclusionSlide) -> RenderResult {
    header(canvas, &data.title, data.subhead.as_deref(), Tone::Dark)?;
    let theme = canvas.theme();
    let (x, y) = (layout::MARGIN + 40.0, layout::CONTENT_Y + 20.0);
    let (w, h) = (560.0, 200.0);

    let parent = canvas.rect(Rect::new(x, y, w, h), "#F1F5F9")?;
    canvas.border(parent, Border::solid(theme.color(ColorRole::Primary), 2.0))?;
    canvas.text(
        Rect::new(x + 10.0, y + 10.0, w - 20.0, 30.0),
        &data.parent,
        TextSpec::new(font_size::CARD_TITLE)
            .color(theme.color(ColorRole::Primary))
            .bold(),
    )?;
    if data.children.is_empty() {
        return Ok(());
    }

    let child_w = (w - 60.0) / data.children.len() as f64;
    let child_y = y + 60.0;
    for (i, child) in data.children.iter().enumerate() {
        let child_x = x + 20.0 + i as f64 * (child_w + 20.0);
        let boxed = canvas.shape(ShapeKind::Rectangle, Rect::new(child_x, child_y, child_w, 100.0), Some("#FFFFFF"))?;
        canvas.border(boxed, Border::solid(theme.color(ColorRole::Secondary), 1.0))?;
        canvas.text(
            Rect::new(child_x + 5.0, child_y + 35.0, child_w - 10.0, 30.0),
            child,
            TextSpec::new(14.0)
                .color(theme.color(ColorRole::TextDark))
                .bold()
                .centered(),
        )?;
    }
    Ok(())
}
