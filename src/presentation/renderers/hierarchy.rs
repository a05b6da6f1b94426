//! Stacked, tiered and branching layouts.
//!
//! Level `i` of `n` gets a size proportional to `(i + 1) / n`, or to its
//! complement for downward pyramids.

use super::{header, plain_page, RenderResult, Tone, CONTENT_W};
use crate::presentation::document::{Border, LineCategory, Point, Rect, ShapeKind};
use crate::presentation::primitives::{Canvas, TextSpec};
use crate::presentation::records::{ItemsSlide, PyramidSlide};
use crate::presentation::theme::{font_size, layout, ColorRole, FontRole};

const LEVEL_COLORS: [ColorRole; 3] = [ColorRole::Pyramid1, ColorRole::Pyramid2, ColorRole::Pyramid3];
const TRIANGLE_COLORS: [&str; 3] = ["#3B82F6", "#10B981", "#F59E0B"];
const STAIR_BASE: [u8; 3] = [59, 130, 246];

/// Share of the full size given to level `index` of `count`.
pub fn level_ratio(index: usize, count: usize) -> f64 {
    (index + 1) as f64 / count as f64
}

/// Mix `base` toward white; a factor of 1.0 returns `base` unchanged.
pub fn blend_toward_white(base: [u8; 3], factor: f64) -> String {
    let mix = |channel: u8| (f64::from(channel) * factor + 255.0 * (1.0 - factor)).round() as u8;
    format!("#{:02X}{:02X}{:02X}", mix(base[0]), mix(base[1]), mix(base[2]))
}

/// Widening bands with descriptions to the right.
pub fn pyramid(canvas: &mut Canvas<'_>, data: &PyramidSlide) -> RenderResult {
    plain_page(canvas, &data.title, data.subhead.as_deref(), Tone::Primary)?;
    if data.levels.is_empty() {
        return Ok(());
    }
    let theme = canvas.theme();
    let body = theme.font(FontRole::Body);
    let top = layout::CONTENT_Y + 15.0;
    let level_h = 270.0 / data.levels.len() as f64;
    let center_x = 230.0;
    let (min_w, max_w) = (120.0, 280.0);

    for (index, level) in data.levels.iter().enumerate() {
        let y = top + index as f64 * level_h;
        let width = min_w + (max_w - min_w) * level_ratio(index, data.levels.len());
        canvas.badge(
            ShapeKind::Rectangle,
            Rect::new(center_x - width / 2.0, y, width, level_h - 5.0),
            theme.color(LEVEL_COLORS[index % LEVEL_COLORS.len()]),
            &level.title,
            TextSpec::new(font_size::CARD_TITLE)
                .color(theme.color(ColorRole::TextWhite))
                .bold()
                .font(body),
        )?;
        canvas.text(
            Rect::new(center_x + max_w / 2.0 + 30.0, y + 5.0, 280.0, level_h - 10.0),
            &level.description,
            TextSpec::new(font_size::CARD_DESC)
                .color(theme.color(ColorRole::TextDark))
                .font(body),
        )?;
    }
    Ok(())
}

/// Nested triangles growing toward the base.
pub fn pyramid_up(canvas: &mut Canvas<'_>, data: &PyramidSlide) -> RenderResult {
    header(canvas, &data.title, data.subhead.as_deref(), Tone::Primary)?;
    let count = data.levels.len();
    if count == 0 {
        return Ok(());
    }
    let theme = canvas.theme();
    let (cx, start_y) = (360.0, 150.0);
    let (full_h, full_w) = (240.0, 360.0);
    let h = full_h / count as f64;

    for (i, level) in data.levels.iter().enumerate() {
        let ratio = level_ratio(i, count);
        let level_w = full_w * ratio;
        let y = start_y + (count - 1 - i) as f64 * h;
        canvas.shape(
            ShapeKind::Triangle,
            Rect::new(cx - level_w / 2.0, y, level_w, full_h * ratio),
            Some(theme.color(ColorRole::Primary)),
        )?;
        canvas.text(
            Rect::new(cx + level_w / 2.0 + 20.0, y + h / 2.0 - 15.0, 200.0, 30.0),
            &format!("{}: {}", level.title, level.description),
            TextSpec::new(12.0).bold(),
        )?;
    }
    Ok(())
}

/// Inverted triangles narrowing toward the tip.
pub fn pyramid_down(canvas: &mut Canvas<'_>, data: &PyramidSlide) -> RenderResult {
    header(canvas, &data.title, data.subhead.as_deref(), Tone::Primary)?;
    let count = data.levels.len();
    if count == 0 {
        return Ok(());
    }
    let theme = canvas.theme();
    let (cx, start_y) = (360.0, 150.0);
    let (full_h, full_w) = (240.0, 360.0);
    let h = full_h / count as f64;

    for (i, level) in data.levels.iter().enumerate() {
        let ratio = (count - i) as f64 / count as f64;
        let level_w = full_w * ratio;
        let y = start_y + i as f64 * h;
        let triangle = canvas.shape(
            ShapeKind::Triangle,
            Rect::new(cx - level_w / 2.0, y, level_w, full_h * ratio),
            Some(theme.color(ColorRole::Secondary)),
        )?;
        canvas.rotate(triangle, 180.0)?;
        canvas.text(
            Rect::new(cx + level_w / 2.0 + 20.0, y + h / 2.0 - 15.0, 200.0, 30.0),
            &format!("{}: {}", level.title, level.description),
            TextSpec::new(12.0).bold(),
        )?;
    }
    Ok(())
}

/// A root box branching to its children with elbow connectors.
pub fn tree_diagram(canvas: &mut Canvas<'_>, data: &ItemsSlide) -> RenderResult {
    header(canvas, &data.title, data.subhead.as_deref(), Tone::Primary)?;
    let theme = canvas.theme();
    let (root_x, root_y) = (layout::MARGIN, 200.0);
    let (root_w, root_h) = (120.0, 60.0);

    canvas.rect(Rect::new(root_x, root_y, root_w, root_h), theme.color(ColorRole::Primary))?;
    canvas.text(
        Rect::new(root_x, root_y + 15.0, root_w, 30.0),
        &data.title,
        TextSpec::new(14.0).color("#FFFFFF").bold().centered(),
    )?;

    let child_x = root_x + root_w + 60.0;
    let (child_w, child_h) = (150.0, 50.0);
    let gap = 20.0;
    let middle = (data.items.len() as f64 - 1.0) / 2.0;
    for (i, item) in data.items.iter().enumerate() {
        let y = root_y + (i as f64 - middle) * (child_h + gap);
        let child = canvas.rect(Rect::new(child_x, y, child_w, child_h), "#F1F5F9")?;
        canvas.border(child, Border::solid(theme.color(ColorRole::Primary), 1.0))?;
        canvas.text(
            Rect::new(child_x + 5.0, y + 5.0, child_w - 10.0, 20.0),
            &item.title,
            TextSpec::new(12.0).bold(),
        )?;
        canvas.text(
            Rect::new(child_x + 5.0, y + 25.0, child_w - 10.0, 20.0),
            item.desc(),
            TextSpec::new(10.0).color(theme.color(ColorRole::TextGray)),
        )?;
        canvas.line(
            LineCategory::Bent,
            Point::new(root_x + root_w, root_y + root_h / 2.0),
            Point::new(child_x, y + child_h / 2.0),
            None,
        )?;
    }
    Ok(())
}

/// Three nodes at the corners of a triangle. Extra items are ignored.
pub fn triangle(canvas: &mut Canvas<'_>, data: &ItemsSlide) -> RenderResult {
    plain_page(canvas, &data.title, data.subhead.as_deref(), Tone::Primary)?;
    let theme = canvas.theme();
    let body = theme.font(FontRole::Body);
    let (cx, base_y) = (200.0, layout::CONTENT_Y + 20.0);
    let (tri_h, tri_w) = (250.0, 280.0);
    let node = 80.0;

    canvas.shape(
        ShapeKind::Triangle,
        Rect::new(cx - tri_w / 2.0 + 10.0, base_y + 30.0, tri_w - 20.0, tri_h - 60.0),
        Some(theme.color(ColorRole::BgLight)),
    )?;

    let nodes = [
        (cx - node / 2.0, base_y),
        (cx - tri_w / 2.0 - node / 2.0, base_y + tri_h - node),
        (cx + tri_w / 2.0 - node / 2.0, base_y + tri_h - node),
    ];
    for (index, (item, (x, y))) in data.items.iter().zip(nodes).enumerate() {
        let color = TRIANGLE_COLORS[index];
        canvas.badge(
            ShapeKind::Ellipse,
            Rect::new(x, y, node, node),
            color,
            &item.title,
            TextSpec::new(12.0)
                .color(theme.color(ColorRole::TextWhite))
                .bold()
                .font(body),
        )?;
        let text_y = layout::CONTENT_Y + 30.0 + index as f64 * 85.0;
        canvas.text(
            Rect::new(400.0, text_y, 280.0, 70.0),
            &format!("{}\n{}", item.title, item.desc()),
            TextSpec::new(font_size::CARD_DESC)
                .color(theme.color(ColorRole::TextDark))
                .font(body),
        )?;
        canvas.rect(Rect::new(393.0, text_y, 4.0, 50.0), color)?;
    }
    Ok(())
}

/// A staircase of blocks rising to the right and darkening as they rise.
pub fn step_up(canvas: &mut Canvas<'_>, data: &ItemsSlide) -> RenderResult {
    plain_page(canvas, &data.title, data.subhead.as_deref(), Tone::Primary)?;
    let count = data.items.len();
    if count == 0 {
        return Ok(());
    }
    let theme = canvas.theme();
    let body = theme.font(FontRole::Body);
    let step_w = CONTENT_W / count as f64;
    let (max_h, base_y) = (260.0, 365.0);
    let white = theme.color(ColorRole::TextWhite);

    for (i, item) in data.items.iter().enumerate() {
        let x = layout::MARGIN + i as f64 * step_w;
        let step_h = level_ratio(i, count) * max_h;
        let y = base_y - step_h;
        let fill = stair_color(i, count);
        let on_dark = i as f64 >= count as f64 / 2.0;
        let ink = if on_dark { white } else { theme.color(ColorRole::Primary) };

        canvas.rect(Rect::new(x, y, step_w - 3.0, step_h), &fill)?;
        canvas.text(
            Rect::new(x + 5.0, y + 8.0, step_w - 13.0, 20.0),
            &format!("STEP {}", i + 1),
            TextSpec::new(9.0).color(ink).bold().font(body).centered(),
        )?;
        canvas.text(
            Rect::new(x + 5.0, y + 28.0, step_w - 13.0, 25.0),
            &item.title,
            TextSpec::new(13.0).color(ink).bold().font(body).centered(),
        )?;
        if step_h > 80.0 {
            let desc_ink = if on_dark { white } else { theme.color(ColorRole::TextGray) };
            canvas.text(
                Rect::new(x + 5.0, y + 55.0, step_w - 13.0, step_h - 65.0),
                item.desc(),
                TextSpec::new(font_size::SMALL).color(desc_ink).font(body).centered(),
            )?;
        }
    }
    Ok(())
}

/// The staircase fill for step `index` of `count`.
pub fn stair_color(index: usize, count: usize) -> String {
    blend_toward_white(STAIR_BASE, 0.4 + 0.6 * index as f64 / count as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presentation::theme::hex_to_rgb;

    #[test]
    fn test_level_ratio() {
        assert_eq!(level_ratio(0, 4), 0.25);
        assert_eq!(level_ratio(3, 4), 1.0);
    }

    #[test]
    fn test_blend_endpoints() {
        assert_eq!(blend_toward_white(STAIR_BASE, 1.0), "#3B82F6");
        assert_eq!(blend_toward_white(STAIR_BASE, 0.0), "#FFFFFF");
    }

    #[test]
    fn test_first_stair_is_lightest() {
        // 0.4 * 59 + 0.6 * 255 = 176.6
        assert_eq!(stair_color(0, 3), "#B1CDFB");
        let top = hex_to_rgb(&stair_color(2, 3)).map(|rgb| (rgb.red * 255.0).round());
        assert_eq!(top, Some(98.0));
    }
}
