//! Title, agenda, section divider and closing pages.

use super::{header, RenderResult, Tone};
use crate::presentation::document::{Alignment, Rect, ShapeKind};
use crate::presentation::primitives::{Canvas, TextSpec};
use crate::presentation::records::{AgendaSlide, ClosingSlide, SectionSlide, TitleSlide};
use crate::presentation::theme::{font_size, layout, ColorRole, FontRole, SLIDE_HEIGHT};

pub fn title(canvas: &mut Canvas<'_>, data: &TitleSlide) -> RenderResult {
    let theme = canvas.theme();
    let accent = theme.color(ColorRole::Accent);
    canvas.background(theme.color(ColorRole::Primary))?;

    canvas.rect(Rect::new(0.0, 0.0, 8.0, SLIDE_HEIGHT), accent)?;
    canvas.rect(Rect::new(60.0, 175.0, 100.0, 3.0), accent)?;

    canvas.text(
        Rect::new(60.0, 185.0, 600.0, 120.0),
        &data.title,
        TextSpec::new(font_size::TITLE_MAIN)
            .color(theme.color(ColorRole::TextWhite))
            .bold()
            .font(theme.font(FontRole::Title)),
    )?;

    if !data.date.is_empty() {
        canvas.text(
            Rect::new(60.0, 320.0, 300.0, 30.0),
            &data.date,
            TextSpec::new(font_size::TITLE_DATE)
                .color(theme.color(ColorRole::AccentLight))
                .font(theme.font(FontRole::Body)),
        )?;
    }

    // 3x3 dot grid, bottom right
    for i in 0..3 {
        for j in 0..3 {
            let bounds = Rect::new(620.0 + i as f64 * 20.0, 340.0 + j as f64 * 20.0, 6.0, 6.0);
            canvas.ellipse(bounds, accent)?;
        }
    }
    Ok(())
}

pub fn agenda(canvas: &mut Canvas<'_>, data: &AgendaSlide) -> RenderResult {
    let theme = canvas.theme();
    canvas.background(theme.color(ColorRole::BgWhite))?;
    canvas.rect(Rect::new(0.0, 0.0, 5.0, SLIDE_HEIGHT), theme.color(ColorRole::Accent))?;
    header(canvas, &data.title, data.subhead.as_deref(), Tone::Dark)?;

    let start_y = layout::CONTENT_Y + 5.0;
    let item_height = 50.0;
    let text_left = layout::MARGIN + 45.0;

    for (index, item) in data.items.iter().enumerate() {
        let y = start_y + index as f64 * item_height;

        canvas.badge(
            ShapeKind::Ellipse,
            Rect::new(layout::MARGIN, y, 32.0, 32.0),
            theme.color(ColorRole::Accent),
            &(index + 1).to_string(),
            TextSpec::new(14.0)
                .color(theme.color(ColorRole::TextWhite))
                .bold()
                .font(theme.font(FontRole::Body)),
        )?;

        canvas.text(
            Rect::new(text_left, y + 2.0, 580.0, 30.0),
            item,
            TextSpec::new(font_size::BODY + 2.0)
                .color(theme.color(ColorRole::TextDark))
                .font(theme.font(FontRole::Body)),
        )?;

        if index + 1 < data.items.len() {
            canvas.rect(Rect::new(text_left, y + 40.0, 580.0, 1.0), theme.color(ColorRole::BgLight))?;
        }
    }
    Ok(())
}

pub fn section(canvas: &mut Canvas<'_>, data: &SectionSlide) -> RenderResult {
    let theme = canvas.theme();
    let accent = theme.color(ColorRole::Accent);
    canvas.background(theme.color(ColorRole::SectionBg))?;

    if let Some(number) = data.section_no {
        canvas.text(
            Rect::new(60.0, 80.0, 150.0, 80.0),
            &format!("{:02}", number),
            TextSpec::new(font_size::SECTION_NO)
                .color(accent)
                .bold()
                .font(theme.font(FontRole::Title)),
        )?;
    }

    canvas.rect(Rect::new(60.0, 170.0, 80.0, 3.0), accent)?;
    canvas.text(
        Rect::new(60.0, 185.0, 600.0, 120.0),
        &data.title,
        TextSpec::new(font_size::SECTION_TITLE)
            .color(theme.color(ColorRole::TextWhite))
            .bold()
            .font(theme.font(FontRole::Title)),
    )?;
    canvas.rect(Rect::new(650.0, 370.0, 60.0, 3.0), accent)?;
    Ok(())
}

pub fn closing(canvas: &mut Canvas<'_>, _data: &ClosingSlide) -> RenderResult {
    let theme = canvas.theme();
    let accent = theme.color(ColorRole::Accent);
    canvas.background(theme.color(ColorRole::Primary))?;

    canvas.rect(Rect::new(260.0, 120.0, 200.0, 3.0), accent)?;
    canvas.text(
        Rect::new(60.0, 140.0, 600.0, 80.0),
        "Thank You",
        TextSpec::new(font_size::BIG_TITLE)
            .color(theme.color(ColorRole::TextWhite))
            .bold()
            .font(theme.font(FontRole::Title))
            .align(Alignment::Center),
    )?;
    canvas.text(
        Rect::new(60.0, 220.0, 600.0, 40.0),
        "Thank you for your attention",
        TextSpec::new(font_size::TITLE_DATE)
            .color(theme.color(ColorRole::AccentLight))
            .font(theme.font(FontRole::Body))
            .align(Alignment::Center),
    )?;
    canvas.rect(Rect::new(260.0, 275.0, 200.0, 3.0), accent)?;

    for i in 0..5 {
        canvas.ellipse(Rect::new(310.0 + i as f64 * 25.0, 310.0, 6.0, 6.0), accent)?;
    }
    Ok(())
}
