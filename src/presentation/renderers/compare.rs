//! Side-by-side comparisons.

use super::{header, plain_page, RenderResult, Tone, CONTENT_H, CONTENT_W};
use crate::presentation::document::{Rect, ShapeKind};
use crate::presentation::primitives::{Canvas, TextSpec};
use crate::presentation::records::{
    CompareSlide, CompareTableSlide, InteractionSlide, StatsSlide, TransitionSlide, Trend,
};
use crate::presentation::theme::{font_size, layout, ColorRole, FontRole, SLIDE_WIDTH};

const LEFT_CARD: &str = "#FEF2F2";
const RIGHT_CARD: &str = "#EFF6FF";

/// Two colored column headers with a card per item beneath.
pub fn compare(canvas: &mut Canvas<'_>, data: &CompareSlide) -> RenderResult {
    plain_page(canvas, &data.title, data.subhead.as_deref(), Tone::Dark)?;
    let theme = canvas.theme();
    let body = theme.font(FontRole::Body);

    let col_w = 300.0;
    let col_gap = 20.0;
    let left_x = layout::MARGIN;
    let right_x = layout::MARGIN + col_w + col_gap;
    let header_y = layout::CONTENT_Y + 5.0;
    let heading = TextSpec::new(font_size::CARD_TITLE)
        .color(theme.color(ColorRole::TextWhite))
        .bold()
        .font(body);

    canvas.badge(
        ShapeKind::Rectangle,
        Rect::new(left_x, header_y, col_w, 35.0),
        theme.color(ColorRole::CompareLeft),
        &data.left_title,
        heading,
    )?;
    canvas.badge(
        ShapeKind::Rectangle,
        Rect::new(right_x, header_y, col_w, 35.0),
        theme.color(ColorRole::CompareRight),
        &data.right_title,
        heading,
    )?;
    canvas.text(
        Rect::new(left_x + col_w, header_y, col_gap, 35.0),
        "VS",
        TextSpec::new(10.0)
            .color(theme.color(ColorRole::TextGray))
            .bold()
            .font(body)
            .centered(),
    )?;

    let item_y = header_y + 45.0;
    let item_h = 55.0;
    let card_text = TextSpec::new(font_size::CARD_DESC)
        .color(theme.color(ColorRole::TextDark))
        .font(body);
    for (x, fill, items) in [
        (left_x, LEFT_CARD, &data.left_items),
        (right_x, RIGHT_CARD, &data.right_items),
    ] {
        for (index, item) in items.iter().enumerate() {
            let y = item_y + index as f64 * item_h;
            let card = canvas.rect(Rect::new(x, y, col_w, item_h - 5.0), fill)?;
            canvas.label(card, item, card_text)?;
        }
    }
    Ok(())
}

/// A balance: a beam on a post with a weight on each side.
pub fn compare_scale(canvas: &mut Canvas<'_>, data: &CompareSlide) -> RenderResult {
    header(canvas, &data.title, data.subhead.as_deref(), Tone::Primary)?;
    let theme = canvas.theme();
    let (cx, cy) = (360.0, 280.0);
    let gray = theme.color(ColorRole::TextGray);

    canvas.rect(Rect::new(cx - 150.0, cy, 300.0, 4.0), gray)?;
    canvas.rect(Rect::new(cx - 2.0, cy, 4.0, 80.0), gray)?;

    let sides = [
        (cx - 200.0, LEFT_CARD, "#B91C1C", &data.left_title, &data.left_items),
        (cx + 80.0, RIGHT_CARD, "#1D4ED8", &data.right_title, &data.right_items),
    ];
    for (x, fill, title_color, title, items) in sides {
        canvas.ellipse(Rect::new(x, cy - 100.0, 120.0, 100.0), fill)?;
        canvas.text(
            Rect::new(x, cy - 70.0, 120.0, 30.0),
            title,
            TextSpec::new(16.0).color(title_color).bold().centered(),
        )?;
        canvas.text(
            Rect::new(x, cy + 10.0, 120.0, 60.0),
            &items.join("\n"),
            TextSpec::new(10.0)
                .color(theme.color(ColorRole::TextDark))
                .centered(),
        )?;
    }
    Ok(())
}

/// Two tinted headings with dotted item lists.
pub fn compare_item(canvas: &mut Canvas<'_>, data: &CompareSlide) -> RenderResult {
    header(canvas, &data.title, data.subhead.as_deref(), Tone::Primary)?;
    let col_w = 280.0;
    let y = layout::CONTENT_Y + 10.0;

    let columns = [
        (layout::MARGIN, "#FEE2E2", &data.left_title, &data.left_items),
        (layout::MARGIN + col_w + 40.0, "#DBEAFE", &data.right_title, &data.right_items),
    ];
    for (x, fill, title, items) in columns {
        canvas.rect(Rect::new(x, y, col_w, 40.0), fill)?;
        canvas.text(
            Rect::new(x, y + 5.0, col_w, 30.0),
            title,
            TextSpec::new(16.0).bold().centered(),
        )?;
        for (i, item) in items.iter().enumerate() {
            canvas.text(
                Rect::new(x + 10.0, y + 50.0 + i as f64 * 30.0, col_w - 20.0, 25.0),
                &format!("・ {}", item),
                TextSpec::new(12.0),
            )?;
        }
    }
    Ok(())
}

/// Three-column table: item, our offer, the competitor's.
pub fn compare_table(canvas: &mut Canvas<'_>, data: &CompareTableSlide) -> RenderResult {
    header(canvas, &data.title, data.subhead.as_deref(), Tone::Primary)?;
    let theme = canvas.theme();
    let rows = data.items.len() + 1;
    let table = canvas.table(
        rows,
        3,
        Rect::new(layout::MARGIN, layout::CONTENT_Y, CONTENT_W, rows as f64 * 40.0),
    )?;

    for (col, heading) in ["Item", "Company A (ours)", "Company B (competitor)"].iter().enumerate() {
        canvas.cell_text(table, 0, col, heading)?;
        canvas.cell_fill(table, 0, col, theme.color(ColorRole::Primary))?;
        canvas.cell_style(table, 0, col, TextSpec::new(font_size::BODY).color("#FFFFFF").bold())?;
    }
    for (i, item) in data.items.iter().enumerate() {
        let row = i + 1;
        for (col, value) in [&item.label, &item.a, &item.b].into_iter().enumerate() {
            canvas.cell_text(table, row, col, value)?;
            canvas.cell_style(table, row, col, TextSpec::new(font_size::BODY).centered())?;
        }
    }
    Ok(())
}

/// Before and after boxes joined by an arrow.
pub fn transition(canvas: &mut Canvas<'_>, data: &TransitionSlide) -> RenderResult {
    header(canvas, &data.title, data.subhead.as_deref(), Tone::Primary)?;
    let theme = canvas.theme();
    let y = 200.0;
    let (box_w, box_h) = (250.0, 120.0);
    let after_x = SLIDE_WIDTH - layout::MARGIN - box_w;
    let after_color = "#059669";

    canvas.rect(Rect::new(layout::MARGIN, y, box_w, box_h), "#F1F5F9")?;
    canvas.text(
        Rect::new(layout::MARGIN, y - 30.0, box_w, 30.0),
        "BEFORE",
        TextSpec::new(14.0)
            .bold()
            .color(theme.color(ColorRole::TextGray))
            .centered(),
    )?;
    canvas.text(
        Rect::new(layout::MARGIN + 10.0, y + 20.0, box_w - 20.0, box_h - 40.0),
        &data.before,
        TextSpec::new(18.0).centered(),
    )?;

    canvas.shape(
        ShapeKind::RightArrow,
        Rect::new(330.0, y + box_h / 2.0 - 20.0, 60.0, 40.0),
        Some(theme.color(ColorRole::Secondary)),
    )?;

    canvas.rect(Rect::new(after_x, y, box_w, box_h), "#ECFDF5")?;
    canvas.text(
        Rect::new(after_x, y - 30.0, box_w, 30.0),
        "AFTER",
        TextSpec::new(14.0).bold().color(after_color).centered(),
    )?;
    canvas.text(
        Rect::new(after_x + 10.0, y + 20.0, box_w - 20.0, box_h - 40.0),
        &data.after,
        TextSpec::new(18.0).bold().color(after_color).centered(),
    )?;
    Ok(())
}

/// Two parties with a double-headed arrow and a caption.
pub fn interaction(canvas: &mut Canvas<'_>, data: &InteractionSlide) -> RenderResult {
    header(canvas, &data.title, data.subhead.as_deref(), Tone::Primary)?;
    let theme = canvas.theme();
    let (cx, cy) = (360.0, 240.0);

    for (x, fill, text) in [(cx - 240.0, "#EFF6FF", &data.left), (cx + 80.0, "#FDF2F8", &data.right)] {
        canvas.rect(Rect::new(x, cy - 40.0, 160.0, 80.0), fill)?;
        canvas.text(
            Rect::new(x, cy - 15.0, 160.0, 30.0),
            text,
            TextSpec::new(14.0).bold().centered(),
        )?;
    }
    canvas.shape(
        ShapeKind::LeftRightArrow,
        Rect::new(cx - 70.0, cy - 20.0, 140.0, 40.0),
        Some(theme.color(ColorRole::Secondary)),
    )?;
    canvas.text(
        Rect::new(cx - 100.0, cy + 30.0, 200.0, 40.0),
        &data.desc,
        TextSpec::new(12.0)
            .color(theme.color(ColorRole::TextDark))
            .centered(),
    )?;
    Ok(())
}

/// Left and right values per statistic under colored headings.
pub fn stats_compare(canvas: &mut Canvas<'_>, data: &StatsSlide) -> RenderResult {
    plain_page(canvas, &data.title, data.subhead.as_deref(), Tone::Primary)?;
    let theme = canvas.theme();
    let col_w = ((CONTENT_W - layout::CARD_GAP) / 2.0).floor();
    let right_x = layout::MARGIN + col_w + layout::CARD_GAP;
    let header_h = 30.0;
    let left = theme.color(ColorRole::CompareLeft);
    let right = theme.color(ColorRole::CompareRight);

    for (x, fill, title) in [(layout::MARGIN, left, &data.left_title), (right_x, right, &data.right_title)] {
        canvas.rect(Rect::new(x, layout::CONTENT_Y, col_w, header_h), fill)?;
        canvas.text(
            Rect::new(x, layout::CONTENT_Y, col_w, header_h),
            title,
            TextSpec::new(font_size::CARD_TITLE)
                .color(theme.color(ColorRole::TextWhite))
                .bold()
                .centered(),
        )?;
    }

    if data.stats.is_empty() {
        return Ok(());
    }
    let stat_h = f64::min(((CONTENT_H - header_h) / data.stats.len() as f64).floor(), 44.0);
    for (i, stat) in data.stats.iter().enumerate() {
        let y = layout::CONTENT_Y + header_h + i as f64 * stat_h;
        for (x, color, value) in [(layout::MARGIN, left, &stat.left_value), (right_x, right, &stat.right_value)] {
            canvas.text(
                Rect::new(x, y, col_w, stat_h),
                value,
                TextSpec::new(18.0).color(color).bold().centered(),
            )?;
        }
    }
    Ok(())
}

/// Paired bars per statistic. Bar lengths are illustrative, not scaled.
pub fn bar_compare(canvas: &mut Canvas<'_>, data: &StatsSlide) -> RenderResult {
    plain_page(canvas, &data.title, data.subhead.as_deref(), Tone::Primary)?;
    if data.stats.is_empty() {
        return Ok(());
    }
    let theme = canvas.theme();
    let item_h = f64::min((CONTENT_H / data.stats.len() as f64).floor(), 52.0);
    let label_w = 130.0;
    let bar_max = ((CONTENT_W - label_w - 16.0) / 2.0).floor();
    let bar_x = layout::MARGIN + label_w + 8.0;
    let half = (item_h / 2.0).floor();

    for (i, stat) in data.stats.iter().enumerate() {
        let y = layout::CONTENT_Y + i as f64 * item_h;
        canvas.text(
            Rect::new(layout::MARGIN, y + (item_h - 18.0) / 2.0, label_w, 18.0),
            &stat.label,
            TextSpec::new(font_size::SMALL).color(theme.color(ColorRole::TextGray)),
        )?;

        let bars = [
            (y + 4.0, 0.5, theme.color(ColorRole::CompareLeft), &stat.left_value),
            (y + half, 0.7, theme.color(ColorRole::CompareRight), &stat.right_value),
        ];
        for (top, ratio, color, value) in bars {
            let width = (bar_max * ratio).floor();
            canvas.rect(Rect::new(bar_x, top, width, half - 6.0), color)?;
            let mut label = value.clone();
            if data.show_trends {
                if let Some(arrow) = stat.trend.map(trend_arrow) {
                    label = format!("{} {}", label, arrow);
                }
            }
            canvas.text(
                Rect::new(bar_x + width + 4.0, top, 80.0, half - 6.0),
                &label,
                TextSpec::new(font_size::SMALL).color(color),
            )?;
        }
    }
    Ok(())
}

fn trend_arrow(trend: Trend) -> &'static str {
    match trend {
        Trend::Up => "↑",
        Trend::Down => "↓",
        Trend::Neutral => "→",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trend_arrow() {
        assert_eq!(trend_arrow(Trend::Up), "↑");
        assert_eq!(trend_arrow(Trend::Down), "↓");
        assert_eq!(trend_arrow(Trend::Neutral), "→");
    }
}
