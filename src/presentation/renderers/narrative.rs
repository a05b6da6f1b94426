//! Text-forward layouts that fill the 640×295 content area.

use log::warn;

use super::{bullets, plain_page, RenderResult, Tone, CONTENT_H, CONTENT_W};
use crate::presentation::document::{Alignment, Rect, ShapeKind};
use crate::presentation::primitives::{Canvas, TextSpec};
use crate::presentation::records::{
    ContentSlide, DiagramSlide, FlowChartSlide, ImagePosition, ImageTextSlide, MilestoneState,
    ProgressSlide, QaSlide, QuoteSlide, StepsSlide, TableSlide, TimelineSlide,
};
use crate::presentation::theme::{font_size, layout, ColorRole, FontRole, SLIDE_HEIGHT};

/// Height of each of `count` rows sharing `total`, capped at `cap`.
fn row_height(total: f64, count: usize, cap: f64) -> f64 {
    f64::min((total / count as f64).floor(), cap)
}

/// Bulleted points, or two bulleted columns when `twoColumn` is set.
pub fn content(canvas: &mut Canvas<'_>, data: &ContentSlide) -> RenderResult {
    plain_page(canvas, &data.title, data.subhead.as_deref(), Tone::Primary)?;
    let theme = canvas.theme();
    let body = TextSpec::new(font_size::BODY).color(theme.color(ColorRole::TextDark));

    if data.two_column && !data.columns.is_empty() {
        let col_w = (CONTENT_W - layout::CARD_GAP) / 2.0;
        for (i, column) in data.columns.iter().enumerate() {
            canvas.text(
                Rect::new(
                    layout::MARGIN + i as f64 * (col_w + layout::CARD_GAP),
                    layout::CONTENT_Y,
                    col_w,
                    CONTENT_H,
                ),
                &bullets(column),
                body,
            )?;
        }
    } else if !data.points.is_empty() {
        canvas.text(
            Rect::new(layout::MARGIN, layout::CONTENT_Y, CONTENT_W, CONTENT_H),
            &bullets(&data.points),
            body,
        )?;
    }
    Ok(())
}

/// Numbered rows, one per step.
pub fn process_list(canvas: &mut Canvas<'_>, data: &StepsSlide) -> RenderResult {
    plain_page(canvas, &data.title, data.subhead.as_deref(), Tone::Primary)?;
    if data.steps.is_empty() {
        return Ok(());
    }
    let theme = canvas.theme();
    let item_h = row_height(CONTENT_H, data.steps.len(), 55.0);

    for (i, step) in data.steps.iter().enumerate() {
        let y = layout::CONTENT_Y + i as f64 * item_h;
        canvas.badge(
            ShapeKind::Ellipse,
            Rect::new(layout::MARGIN, y + 2.0, 28.0, 28.0),
            theme.color(ColorRole::Accent),
            &(i + 1).to_string(),
            TextSpec::new(12.0)
                .color(theme.color(ColorRole::TextWhite))
                .bold()
                .font(theme.font(FontRole::Body)),
        )?;
        canvas.text(
            Rect::new(layout::MARGIN + 36.0, y, CONTENT_W - 36.0, item_h - 4.0),
            step,
            TextSpec::new(font_size::BODY).color(theme.color(ColorRole::TextDark)),
        )?;
    }
    Ok(())
}

/// Milestones in columns, colored by state.
pub fn timeline(canvas: &mut Canvas<'_>, data: &TimelineSlide) -> RenderResult {
    plain_page(canvas, &data.title, data.subhead.as_deref(), Tone::Primary)?;
    if data.milestones.is_empty() {
        return Ok(());
    }
    let theme = canvas.theme();
    let col_w = (CONTENT_W / data.milestones.len() as f64).floor();

    for (i, milestone) in data.milestones.iter().enumerate() {
        let x = layout::MARGIN + i as f64 * col_w;
        let state = theme.color(match milestone.state {
            Some(MilestoneState::Done) => ColorRole::Success,
            Some(MilestoneState::Next) => ColorRole::Accent,
            _ => ColorRole::TextGray,
        });
        canvas.ellipse(
            Rect::new(x + col_w / 2.0 - 10.0, layout::CONTENT_Y, 20.0, 20.0),
            state,
        )?;
        canvas.text(
            Rect::new(x, layout::CONTENT_Y + 28.0, col_w - 4.0, 30.0),
            &milestone.label,
            TextSpec::new(font_size::CARD_TITLE).color(state).bold().centered(),
        )?;
        canvas.text(
            Rect::new(x, layout::CONTENT_Y + 62.0, col_w - 4.0, 22.0),
            &milestone.date,
            TextSpec::new(font_size::SMALL)
                .color(theme.color(ColorRole::TextGray))
                .centered(),
        )?;
    }
    Ok(())
}

/// Swim lanes: a colored label on the left, arrow-joined items to the right.
pub fn diagram(canvas: &mut Canvas<'_>, data: &DiagramSlide) -> RenderResult {
    plain_page(canvas, &data.title, data.subhead.as_deref(), Tone::Primary)?;
    if data.lanes.is_empty() {
        return Ok(());
    }
    let theme = canvas.theme();
    let lane_h = (CONTENT_H / data.lanes.len() as f64).floor();
    let label_w = 110.0;

    for (i, lane) in data.lanes.iter().enumerate() {
        let y = layout::CONTENT_Y + i as f64 * lane_h;
        let label = Rect::new(layout::MARGIN, y, label_w, lane_h - 4.0);
        canvas.rect(label, theme.color(ColorRole::Accent))?;
        canvas.text(
            label,
            &lane.title,
            TextSpec::new(font_size::CARD_TITLE)
                .color(theme.color(ColorRole::TextWhite))
                .bold()
                .centered(),
        )?;
        canvas.text(
            Rect::new(
                layout::MARGIN + label_w + 8.0,
                y + 4.0,
                CONTENT_W - label_w - 8.0,
                lane_h - 12.0,
            ),
            &lane.items.join("  →  "),
            TextSpec::new(font_size::BODY).color(theme.color(ColorRole::TextDark)),
        )?;
    }
    Ok(())
}

/// A grid of text boxes with a filled header band.
pub fn table(canvas: &mut Canvas<'_>, data: &TableSlide) -> RenderResult {
    plain_page(canvas, &data.title, data.subhead.as_deref(), Tone::Primary)?;
    if data.headers.is_empty() {
        return Ok(());
    }
    let theme = canvas.theme();
    let rows: Vec<&Vec<String>> = std::iter::once(&data.headers).chain(&data.rows).collect();
    let row_h = row_height(CONTENT_H, rows.len(), 40.0);
    let col_w = (CONTENT_W / data.headers.len() as f64).floor();

    for (ri, row) in rows.iter().enumerate() {
        let y = layout::CONTENT_Y + ri as f64 * row_h;
        let is_header = ri == 0;
        if is_header {
            canvas.rect(
                Rect::new(layout::MARGIN, y, CONTENT_W, row_h),
                theme.color(ColorRole::Primary),
            )?;
        }
        let spec = if is_header {
            TextSpec::new(font_size::CARD_TITLE)
                .color(theme.color(ColorRole::TextWhite))
                .bold()
        } else {
            TextSpec::new(font_size::BODY).color(theme.color(ColorRole::TextDark))
        };
        for (ci, cell) in row.iter().enumerate() {
            canvas.text(
                Rect::new(
                    layout::MARGIN + ci as f64 * col_w + 4.0,
                    y + 4.0,
                    col_w - 8.0,
                    row_h - 8.0,
                ),
                cell,
                spec,
            )?;
        }
    }
    Ok(())
}

/// Bar length for a percentage, clamped to 100 and at least 4pt wide.
pub fn progress_width(max: f64, percent: f64) -> f64 {
    f64::max((max * f64::min(percent, 100.0) / 100.0).floor(), 4.0)
}

/// Labeled progress bars with the percentage at the end.
pub fn progress(canvas: &mut Canvas<'_>, data: &ProgressSlide) -> RenderResult {
    plain_page(canvas, &data.title, data.subhead.as_deref(), Tone::Primary)?;
    if data.items.is_empty() {
        return Ok(());
    }
    let theme = canvas.theme();
    let item_h = row_height(CONTENT_H, data.items.len(), 52.0);
    let label_w = 150.0;
    let bar_max = CONTENT_W - label_w - 60.0;
    let bar_x = layout::MARGIN + label_w + 8.0;

    for (i, item) in data.items.iter().enumerate() {
        let y = layout::CONTENT_Y + i as f64 * item_h;
        let bar_y = y + (item_h - 16.0) / 2.0;
        canvas.text(
            Rect::new(layout::MARGIN, y + (item_h - 20.0) / 2.0, label_w, 20.0),
            &item.label,
            TextSpec::new(font_size::BODY).color(theme.color(ColorRole::TextDark)),
        )?;
        canvas.rect(Rect::new(bar_x, bar_y, bar_max, 16.0), theme.color(ColorRole::BgLight))?;
        canvas.rect(
            Rect::new(bar_x, bar_y, progress_width(bar_max, item.percent), 16.0),
            theme.color(ColorRole::Accent),
        )?;
        canvas.text(
            Rect::new(
                layout::MARGIN + label_w + bar_max + 16.0,
                y + (item_h - 20.0) / 2.0,
                40.0,
                20.0,
            ),
            &format!("{}%", super::charts::format_value(item.percent)),
            TextSpec::new(font_size::SMALL).color(theme.color(ColorRole::TextGray)),
        )?;
    }
    Ok(())
}

/// A large centered quotation with the attribution right-aligned below.
pub fn quote(canvas: &mut Canvas<'_>, data: &QuoteSlide) -> RenderResult {
    plain_page(canvas, &data.title, data.subhead.as_deref(), Tone::Primary)?;
    let theme = canvas.theme();
    canvas.text(
        Rect::new(layout::MARGIN, layout::CONTENT_Y, CONTENT_W, CONTENT_H - 40.0),
        &format!("\"{}\"", data.text),
        TextSpec::new(20.0)
            .color(theme.color(ColorRole::Primary))
            .bold()
            .font(theme.font(FontRole::Title))
            .centered(),
    )?;
    canvas.text(
        Rect::new(layout::MARGIN, SLIDE_HEIGHT - layout::MARGIN - 28.0, CONTENT_W, 24.0),
        &format!("— {}", data.author),
        TextSpec::new(font_size::BODY)
            .color(theme.color(ColorRole::TextGray))
            .align(Alignment::End),
    )?;
    Ok(())
}

/// Question lines with indented answers.
pub fn faq(canvas: &mut Canvas<'_>, data: &QaSlide) -> RenderResult {
    plain_page(canvas, &data.title, data.subhead.as_deref(), Tone::Primary)?;
    if data.items.is_empty() {
        return Ok(());
    }
    let theme = canvas.theme();
    let item_h = row_height(CONTENT_H, data.items.len(), 72.0);
    let half = (item_h / 2.0).floor();

    for (i, item) in data.items.iter().enumerate() {
        let y = layout::CONTENT_Y + i as f64 * item_h;
        canvas.text(
            Rect::new(layout::MARGIN, y, CONTENT_W, half - 2.0),
            &format!("Q: {}", item.q),
            TextSpec::new(font_size::CARD_TITLE)
                .color(theme.color(ColorRole::Accent))
                .bold(),
        )?;
        canvas.text(
            Rect::new(layout::MARGIN + 16.0, y + half, CONTENT_W - 16.0, half - 2.0),
            &format!("A: {}", item.a),
            TextSpec::new(font_size::BODY).color(theme.color(ColorRole::TextDark)),
        )?;
    }
    Ok(())
}

/// One row of boxes per flow, separated by small arrowheads.
pub fn flow_chart(canvas: &mut Canvas<'_>, data: &FlowChartSlide) -> RenderResult {
    plain_page(canvas, &data.title, data.subhead.as_deref(), Tone::Primary)?;
    if data.flows.is_empty() {
        return Ok(());
    }
    let theme = canvas.theme();
    let flow_h = (CONTENT_H / data.flows.len() as f64).floor();

    for (fi, flow) in data.flows.iter().enumerate() {
        if flow.steps.is_empty() {
            continue;
        }
        let y = layout::CONTENT_Y + fi as f64 * flow_h;
        let count = flow.steps.len();
        let step_w = (CONTENT_W / count as f64).floor();
        for (si, step) in flow.steps.iter().enumerate() {
            let x = layout::MARGIN + si as f64 * step_w;
            let last = si + 1 == count;
            let box_w = if last { step_w } else { step_w - 16.0 };
            canvas.rect(
                Rect::new(x, y + 4.0, box_w, flow_h - 8.0),
                theme.color(ColorRole::CardBg),
            )?;
            canvas.text(
                Rect::new(x + 4.0, y + 4.0, box_w - 8.0, flow_h - 8.0),
                step,
                TextSpec::new(font_size::BODY)
                    .color(theme.color(ColorRole::TextDark))
                    .centered(),
            )?;
            if !last {
                canvas.text(
                    Rect::new(x + box_w + 2.0, y + (flow_h - 16.0) / 2.0, 12.0, 16.0),
                    "▶",
                    TextSpec::new(10.0).color(theme.color(ColorRole::Accent)),
                )?;
            }
        }
    }
    Ok(())
}

/// An image on one half and bullet points on the other.
///
/// A failed image fetch draws a gray placeholder instead of failing the page.
pub fn image_text(canvas: &mut Canvas<'_>, data: &ImageTextSlide) -> RenderResult {
    plain_page(canvas, &data.title, data.subhead.as_deref(), Tone::Primary)?;
    let theme = canvas.theme();
    let half_w = ((CONTENT_W - layout::CARD_GAP) / 2.0).floor();
    let right_x = layout::MARGIN + half_w + layout::CARD_GAP;
    let (image_x, text_x) = match data.image_position {
        ImagePosition::Right => (right_x, layout::MARGIN),
        ImagePosition::Left => (layout::MARGIN, right_x),
    };

    let frame = Rect::new(image_x, layout::CONTENT_Y, half_w, CONTENT_H);
    if let Err(e) = canvas.image(&data.image, frame) {
        warn!("Image unavailable, drawing placeholder: {}", e);
        canvas.rect(frame, theme.color(ColorRole::BgLight))?;
        canvas.text(
            Rect::new(
                image_x + 8.0,
                layout::CONTENT_Y + CONTENT_H / 2.0 - 12.0,
                half_w - 16.0,
                24.0,
            ),
            "[Image]",
            TextSpec::new(font_size::BODY)
                .color(theme.color(ColorRole::TextGray))
                .centered(),
        )?;
    }

    if let Some(caption) = data.image_caption.as_deref().filter(|c| !c.is_empty()) {
        canvas.text(
            Rect::new(image_x, layout::CONTENT_Y + CONTENT_H - 20.0, half_w, 18.0),
            caption,
            TextSpec::new(font_size::SMALL)
                .color(theme.color(ColorRole::TextGray))
                .centered(),
        )?;
    }
    canvas.text(
        Rect::new(text_x, layout::CONTENT_Y, half_w, CONTENT_H),
        &bullets(&data.points),
        TextSpec::new(font_size::BODY).color(theme.color(ColorRole::TextDark)),
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_height_caps() {
        assert_eq!(row_height(CONTENT_H, 2, 55.0), 55.0);
        assert_eq!(row_height(CONTENT_H, 10, 55.0), 29.0);
    }

    #[test]
    fn test_progress_width_clamps() {
        assert_eq!(progress_width(430.0, 50.0), 215.0);
        assert_eq!(progress_width(430.0, 150.0), 430.0);
        assert_eq!(progress_width(430.0, 0.0), 4.0);
    }
}
