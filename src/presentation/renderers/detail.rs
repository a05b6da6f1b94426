//! Screenshot, pricing and case-study layouts.

use super::{header, slot_width, RenderResult, Tone, CONTENT_W};
use crate::presentation::document::{Alignment, Border, Rect};
use crate::presentation::primitives::{Canvas, TextSpec};
use crate::presentation::records::{
    CaptureZoomSlide, CaseStudySlide, ClosingSlide, ListSlide, PriceTableSlide, QaSlide,
};
use crate::presentation::theme::{layout, ColorRole};

const FEATURE_ROWS: usize = 4;
const PLAN_FEATURES: &str = "・Feature A\n・Feature B\n・Feature C";
const ISSUE_INK: &str = "#B91C1C";
const RESULT_INK: &str = "#059669";

/// Up to four numbered full-width rows.
pub fn capture_list(canvas: &mut Canvas<'_>, data: &ListSlide) -> RenderResult {
    header(canvas, &data.title, data.subhead.as_deref(), Tone::Primary)?;
    let theme = canvas.theme();
    let (item_h, gap) = (60.0, 20.0);

    for (i, item) in data.items.iter().take(4).enumerate() {
        let x = layout::MARGIN;
        let y = layout::CONTENT_Y + i as f64 * (item_h + gap);
        let card = canvas.rect(Rect::new(x, y, CONTENT_W, item_h), "#F8FAFC")?;
        canvas.border(card, Border::solid(theme.color(ColorRole::Primary), 1.0))?;
        canvas.text(
            Rect::new(x + 10.0, y + 10.0, CONTENT_W - 20.0, 40.0),
            &format!("{}. {}", i + 1, item),
            TextSpec::new(12.0).bold().align(Alignment::Start),
        )?;
    }
    Ok(())
}

/// A screen outline with a magnifier circle calling out one point.
pub fn capture_zoom(canvas: &mut Canvas<'_>, data: &CaptureZoomSlide) -> RenderResult {
    header(canvas, &data.title, data.subhead.as_deref(), Tone::Primary)?;
    let theme = canvas.theme();
    let secondary = theme.color(ColorRole::Secondary);
    let (main_x, main_y) = (layout::MARGIN, 150.0);

    let screen = canvas.rect(Rect::new(main_x, main_y, 400.0, 240.0), "#FFFFFF")?;
    canvas.border(screen, Border::solid(theme.color(ColorRole::TextGray), 1.0))?;

    let (zoom_x, zoom_y, size) = (main_x + 450.0, 150.0, 200.0);
    let lens = canvas.ellipse(Rect::new(zoom_x, zoom_y, size, size), "#FFFFFF")?;
    canvas.border(lens, Border::solid(secondary, 3.0))?;
    canvas.text(
        Rect::new(zoom_x + 20.0, zoom_y + 80.0, size - 40.0, 40.0),
        &data.zoom_point,
        TextSpec::new(16.0).bold().color(secondary).centered(),
    )?;
    Ok(())
}

/// Plan columns; the second one is highlighted as recommended.
pub fn price_table(canvas: &mut Canvas<'_>, data: &PriceTableSlide) -> RenderResult {
    header(canvas, &data.title, data.subhead.as_deref(), Tone::Primary)?;
    let theme = canvas.theme();
    let primary = theme.color(ColorRole::Primary);
    let gray = theme.color(ColorRole::TextGray);
    let plan_w = slot_width(CONTENT_W, data.plans.len(), 15.0);
    let (y, h) = (180.0, 220.0);

    for (i, plan) in data.plans.iter().enumerate() {
        let x = layout::MARGIN + i as f64 * (plan_w + 15.0);
        let highlight = i == 1;
        let (fill, edge, weight) = if highlight {
            ("#FEF2F2", primary, 2.0)
        } else {
            ("#F8FAFC", gray, 1.0)
        };

        let card = canvas.rect(Rect::new(x, y, plan_w, h), fill)?;
        canvas.border(card, Border::solid(edge, weight))?;
        canvas.text(
            Rect::new(x, y + 10.0, plan_w, 30.0),
            plan,
            TextSpec::new(14.0)
                .bold()
                .color(if highlight { primary } else { theme.color(ColorRole::TextDark) })
                .centered(),
        )?;
        canvas.text(
            Rect::new(x + 10.0, y + 50.0, plan_w - 20.0, 100.0),
            PLAN_FEATURES,
            TextSpec::new(11.0),
        )?;
        canvas.rect(
            Rect::new(x + 20.0, y + 170.0, plan_w - 40.0, 30.0),
            if highlight { primary } else { gray },
        )?;
        canvas.text(
            Rect::new(x + 20.0, y + 175.0, plan_w - 40.0, 20.0),
            "Select",
            TextSpec::new(12.0).color("#FFFFFF").bold().centered(),
        )?;
    }
    Ok(())
}

/// A two-column feature table with sample rows.
pub fn table_detail(canvas: &mut Canvas<'_>, data: &ClosingSlide) -> RenderResult {
    header(canvas, &data.title, data.subhead.as_deref(), Tone::Primary)?;
    let table = canvas.table(FEATURE_ROWS + 1, 2, Rect::new(layout::MARGIN, 180.0, CONTENT_W, 200.0))?;
    let heading = TextSpec::new(12.0).bold();

    canvas.cell_text(table, 0, 0, "Item")?;
    canvas.cell_style(table, 0, 0, heading)?;
    canvas.cell_text(table, 0, 1, "Details")?;
    canvas.cell_style(table, 0, 1, heading)?;
    for row in 1..=FEATURE_ROWS {
        canvas.cell_text(table, row, 0, &format!("Feature category {}", row))?;
        canvas.cell_style(table, row, 0, TextSpec::new(12.0).bold())?;
        canvas.cell_text(table, row, 1, "A detailed description of the feature goes here.")?;
    }
    Ok(())
}

/// A shaded panel with the issue above the result.
pub fn case_study_info(canvas: &mut Canvas<'_>, data: &CaseStudySlide) -> RenderResult {
    header(canvas, &data.title, data.subhead.as_deref(), Tone::Primary)?;
    let theme = canvas.theme();
    let (x, y, w, h) = (layout::MARGIN, 180.0, CONTENT_W, 200.0);

    canvas.rect(Rect::new(x, y, w, h), "#F1F5F9")?;
    canvas.text(
        Rect::new(x + 20.0, y + 20.0, 100.0, 30.0),
        "Issue",
        TextSpec::new(16.0).bold().color(ISSUE_INK),
    )?;
    canvas.text(Rect::new(x + 130.0, y + 20.0, 480.0, 50.0), &data.issue, TextSpec::new(14.0))?;
    canvas.rect(
        Rect::new(x + 20.0, y + 80.0, w - 40.0, 1.0),
        theme.color(ColorRole::TextGray),
    )?;
    canvas.text(
        Rect::new(x + 20.0, y + 100.0, 100.0, 30.0),
        "Result",
        TextSpec::new(16.0).bold().color(RESULT_INK),
    )?;
    canvas.text(
        Rect::new(x + 130.0, y + 100.0, 480.0, 50.0),
        &data.result,
        TextSpec::new(18.0).bold().color(RESULT_INK),
    )?;
    Ok(())
}

/// The first two question and answer pairs with large Q and A markers.
pub fn qa_section(canvas: &mut Canvas<'_>, data: &QaSlide) -> RenderResult {
    header(canvas, &data.title, data.subhead.as_deref(), Tone::Primary)?;
    let theme = canvas.theme();
    let x = layout::MARGIN;

    for (i, item) in data.items.iter().take(2).enumerate() {
        let y = 150.0 + i as f64 * 110.0;
        canvas.text(
            Rect::new(x, y, 40.0, 30.0),
            "Q",
            TextSpec::new(20.0).bold().color(theme.color(ColorRole::Primary)),
        )?;
        canvas.text(Rect::new(x + 45.0, y, 580.0, 30.0), &item.q, TextSpec::new(14.0).bold())?;
        canvas.text(
            Rect::new(x, y + 35.0, 40.0, 30.0),
            "A",
            TextSpec::new(20.0).bold().color(theme.color(ColorRole::Secondary)),
        )?;
        canvas.text(Rect::new(x + 45.0, y + 35.0, 580.0, 50.0), &item.a, TextSpec::new(12.0))?;
    }
    Ok(())
}
