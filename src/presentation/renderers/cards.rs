//! Grid and card layouts.
//!
//! Columns are `(width - gap * (cols - 1)) / cols` wide; card `i` sits at
//! row `i / cols`, column `i % cols`.

use super::{plain_page, slot_width, RenderResult, Tone, CONTENT_H, CONTENT_W};
use crate::presentation::document::{Alignment, Rect, ShapeKind};
use crate::presentation::primitives::{Canvas, TextSpec};
use crate::presentation::records::{CardsSlide, ItemsSlide, KpiSlide, KpiStatus};
use crate::presentation::theme::{font_size, layout, ColorRole, FontRole};

const CARD_ACCENTS: [&str; 4] = ["#3B82F6", "#10B981", "#F59E0B", "#EF4444"];

fn column_count(requested: Option<usize>, default: usize) -> usize {
    requested.filter(|c| *c > 0).unwrap_or(default)
}

fn row_count(items: usize, cols: usize) -> usize {
    items.div_ceil(cols)
}

/// Numbered cards in a single row.
pub fn bullet_cards(canvas: &mut Canvas<'_>, data: &ItemsSlide) -> RenderResult {
    plain_page(canvas, &data.title, data.subhead.as_deref(), Tone::Primary)?;
    let theme = canvas.theme();
    let body = theme.font(FontRole::Body);

    let card_w = slot_width(CONTENT_W, data.items.len(), layout::CARD_GAP);
    let card_h = 250.0;
    let start_y = layout::CONTENT_Y + 10.0;

    for (index, item) in data.items.iter().enumerate() {
        let x = layout::MARGIN + index as f64 * (card_w + layout::CARD_GAP);

        canvas.rect(Rect::new(x, start_y, card_w, card_h), theme.color(ColorRole::CardBg))?;
        canvas.rect(Rect::new(x, start_y, card_w, 4.0), theme.color(ColorRole::Accent))?;
        canvas.badge(
            ShapeKind::Ellipse,
            Rect::new(x + card_w / 2.0 - 18.0, start_y + 20.0, 36.0, 36.0),
            theme.color(ColorRole::Accent),
            &(index + 1).to_string(),
            TextSpec::new(16.0)
                .color(theme.color(ColorRole::TextWhite))
                .bold()
                .font(body),
        )?;
        canvas.text(
            Rect::new(x + 10.0, start_y + 70.0, card_w - 20.0, 40.0),
            &item.title,
            TextSpec::new(font_size::CARD_TITLE)
                .color(theme.color(ColorRole::Primary))
                .bold()
                .font(body)
                .centered(),
        )?;
        canvas.text(
            Rect::new(x + 10.0, start_y + 115.0, card_w - 20.0, 120.0),
            item.desc(),
            TextSpec::new(font_size::CARD_DESC)
                .color(theme.color(ColorRole::TextGray))
                .font(body)
                .centered(),
        )?;
    }
    Ok(())
}

/// Cards with a colored top stripe, two columns unless told otherwise.
pub fn header_cards(canvas: &mut Canvas<'_>, data: &ItemsSlide) -> RenderResult {
    plain_page(canvas, &data.title, data.subhead.as_deref(), Tone::Dark)?;
    if data.items.is_empty() {
        return Ok(());
    }
    let theme = canvas.theme();

    let cols = column_count(data.columns, 2);
    let gap = layout::CARD_GAP;
    let card_w = slot_width(CONTENT_W, cols, gap);
    let rows = row_count(data.items.len(), cols);
    let card_h = f64::min(130.0, (280.0 - (rows as f64 - 1.0) * gap) / rows as f64);
    let start_y = layout::CONTENT_Y + 10.0;

    for (index, item) in data.items.iter().enumerate() {
        let x = layout::MARGIN + (index % cols) as f64 * (card_w + gap);
        let y = start_y + (index / cols) as f64 * (card_h + gap);

        canvas.rect(Rect::new(x, y, card_w, card_h), theme.color(ColorRole::CardBg))?;
        canvas.rect(Rect::new(x, y, card_w, 4.0), CARD_ACCENTS[index % CARD_ACCENTS.len()])?;
        canvas.text(
            Rect::new(x + 12.0, y + 12.0, card_w - 24.0, 28.0),
            &item.title,
            TextSpec::new(font_size::CARD_TITLE)
                .color(theme.color(ColorRole::TextDark))
                .bold(),
        )?;
        canvas.text(
            Rect::new(x + 12.0, y + 42.0, card_w - 24.0, card_h - 55.0),
            item.desc(),
            TextSpec::new(font_size::CARD_DESC).color(theme.color(ColorRole::TextGray)),
        )?;
    }
    Ok(())
}

/// Plain text cards; entries may be bare strings.
pub fn cards(canvas: &mut Canvas<'_>, data: &CardsSlide) -> RenderResult {
    plain_page(canvas, &data.title, data.subhead.as_deref(), Tone::Primary)?;
    if data.items.is_empty() {
        return Ok(());
    }
    let theme = canvas.theme();

    let cols = column_count(data.columns, 3);
    let card_w = slot_width(CONTENT_W, cols, layout::CARD_GAP).floor();
    let rows = row_count(data.items.len(), cols);
    let card_h = f64::min((CONTENT_H / rows as f64).floor() - 8.0, 100.0);

    for (index, item) in data.items.iter().enumerate() {
        let x = layout::MARGIN + (index % cols) as f64 * (card_w + layout::CARD_GAP);
        let y = layout::CONTENT_Y + (index / cols) as f64 * (card_h + 8.0);

        canvas.rect(Rect::new(x, y, card_w, card_h), theme.color(ColorRole::CardBg))?;
        let text = match item.desc() {
            Some(desc) if !desc.is_empty() => format!("{}\n{}", item.title(), desc),
            _ => item.title().to_string(),
        };
        canvas.text(
            Rect::new(x + 8.0, y + 8.0, card_w - 16.0, card_h - 16.0),
            &text,
            TextSpec::new(font_size::BODY).color(theme.color(ColorRole::TextDark)),
        )?;
    }
    Ok(())
}

/// KPI tiles colored by status.
pub fn kpi(canvas: &mut Canvas<'_>, data: &KpiSlide) -> RenderResult {
    plain_page(canvas, &data.title, data.subhead.as_deref(), Tone::Primary)?;
    if data.items.is_empty() {
        return Ok(());
    }
    let theme = canvas.theme();

    let cols = column_count(data.columns, 3);
    let gap = layout::CARD_GAP;
    let card_w = slot_width(CONTENT_W, cols, gap).floor();
    let rows = row_count(data.items.len(), cols);
    let card_h = slot_width(CONTENT_H, rows, gap);

    for (index, item) in data.items.iter().enumerate() {
        let x = layout::MARGIN + (index % cols) as f64 * (card_w + gap);
        let y = layout::CONTENT_Y + (index / cols) as f64 * (card_h + gap);
        let status = match item.status {
            KpiStatus::Good => theme.color(ColorRole::Success),
            KpiStatus::Bad => theme.color(ColorRole::Secondary),
            KpiStatus::Neutral => theme.color(ColorRole::TextGray),
        };

        canvas.rect(Rect::new(x, y, card_w, card_h), theme.color(ColorRole::CardBg))?;
        canvas.text(
            Rect::new(x + 8.0, y + 8.0, card_w - 16.0, 22.0),
            &item.label,
            TextSpec::new(font_size::SMALL)
                .color(theme.color(ColorRole::TextGray))
                .align(Alignment::Center),
        )?;
        canvas.text(
            Rect::new(x + 8.0, y + 34.0, card_w - 16.0, 50.0),
            &item.value,
            TextSpec::new(28.0)
                .color(status)
                .bold()
                .font(theme.font(FontRole::Title))
                .centered(),
        )?;
        canvas.text(
            Rect::new(x + 8.0, y + 88.0, card_w - 16.0, 22.0),
            &item.change,
            TextSpec::new(font_size::BODY).color(status).centered(),
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_count_defaults() {
        assert_eq!(column_count(None, 3), 3);
        assert_eq!(column_count(Some(0), 2), 2);
        assert_eq!(column_count(Some(4), 2), 4);
    }

    #[test]
    fn test_row_count() {
        assert_eq!(row_count(5, 2), 3);
        assert_eq!(row_count(6, 3), 2);
        assert_eq!(row_count(1, 3), 1);
    }
}
