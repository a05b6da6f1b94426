//! Radial and looped layouts.
//!
//! Node `i` of `n` sits at angle `2π·i/n - π/2`, so the first node is at the
//! top and the rest follow clockwise.

use std::f64::consts::PI;

use super::{header, plain_page, RenderResult, Tone};
use crate::presentation::document::{Border, Rect, ShapeKind};
use crate::presentation::primitives::{Canvas, TextSpec};
use crate::presentation::records::{CycleItem, CycleSlide};
use crate::presentation::theme::{font_size, layout, ColorRole, FontRole};

const NODE_COLORS: [ColorRole; 4] = [
    ColorRole::Cycle1,
    ColorRole::Cycle2,
    ColorRole::Cycle3,
    ColorRole::Cycle4,
];

/// Angle of position `step` on a ring of `count` nodes. `step` may be fractional.
pub fn ring_angle(step: f64, count: usize) -> f64 {
    step / count as f64 * 2.0 * PI - PI / 2.0
}

/// Text before the first opening parenthesis, full-width or ASCII.
fn short_label(label: &str) -> &str {
    label
        .split('（')
        .next()
        .and_then(|head| head.split('(').next())
        .unwrap_or(label)
}

fn side_text(item: &CycleItem) -> String {
    match &item.sub_label {
        Some(sub) => format!("{}\n{}", item.label, sub),
        None => item.label.clone(),
    }
}

/// Colored nodes on a ring with the descriptions listed at the right.
pub fn cycle(canvas: &mut Canvas<'_>, data: &CycleSlide) -> RenderResult {
    plain_page(canvas, &data.title, data.subhead.as_deref(), Tone::Primary)?;
    let theme = canvas.theme();
    let body = theme.font(FontRole::Body);
    let (cx, cy) = (230.0, 245.0);
    let radius = 110.0;
    let node = 75.0;
    let count = data.items.len();

    if let Some(center) = data.center_text.as_deref().filter(|t| !t.is_empty()) {
        canvas.badge(
            ShapeKind::Ellipse,
            Rect::new(cx - 45.0, cy - 45.0, 90.0, 90.0),
            theme.color(ColorRole::Primary),
            center,
            TextSpec::new(11.0)
                .color(theme.color(ColorRole::TextWhite))
                .bold()
                .font(body),
        )?;
    }

    for (index, item) in data.items.iter().enumerate() {
        let angle = ring_angle(index as f64, count);
        let color = theme.color(NODE_COLORS[index % NODE_COLORS.len()]);
        canvas.badge(
            ShapeKind::Ellipse,
            Rect::new(
                cx + radius * angle.cos() - node / 2.0,
                cy + radius * angle.sin() - node / 2.0,
                node,
                node,
            ),
            color,
            short_label(&item.label),
            TextSpec::new(10.0)
                .color(theme.color(ColorRole::TextWhite))
                .bold()
                .font(body),
        )?;

        if count > 1 {
            let between = ring_angle(index as f64 + 0.5, count);
            canvas.text(
                Rect::new(
                    cx + (radius + 10.0) * between.cos() - 10.0,
                    cy + (radius + 10.0) * between.sin() - 10.0,
                    20.0,
                    20.0,
                ),
                "▸",
                TextSpec::new(14.0)
                    .color(theme.color(ColorRole::TextGray))
                    .font(body)
                    .centered(),
            )?;
        }

        let y = layout::CONTENT_Y + 15.0 + index as f64 * 68.0;
        canvas.text(
            Rect::new(420.0, y, 260.0, 60.0),
            &side_text(item),
            TextSpec::new(font_size::CARD_DESC)
                .color(theme.color(ColorRole::TextDark))
                .font(body),
        )?;
        canvas.rect(Rect::new(413.0, y, 4.0, 50.0), color)?;
    }
    Ok(())
}

/// Outlined circles on a ring joined by rotated curved arrows.
pub fn cycle_circular(canvas: &mut Canvas<'_>, data: &CycleSlide) -> RenderResult {
    header(canvas, &data.title, data.subhead.as_deref(), Tone::Primary)?;
    let theme = canvas.theme();
    let (cx, cy) = (360.0, 240.0);
    let radius = 120.0;
    let count = data.items.len();

    for (i, item) in data.items.iter().enumerate() {
        let angle = ring_angle(i as f64, count);
        let x = cx + radius * angle.cos();
        let y = cy + radius * angle.sin();

        let circle = canvas.ellipse(Rect::new(x - 40.0, y - 40.0, 80.0, 80.0), "#DBEAFE")?;
        canvas.border(circle, Border::solid(theme.color(ColorRole::Primary), 1.0))?;
        canvas.text(
            Rect::new(x - 40.0, y - 15.0, 80.0, 30.0),
            &item.label,
            TextSpec::new(12.0).bold().centered(),
        )?;

        if count > 1 {
            let mid = (angle + ring_angle(i as f64 + 1.0, count)) / 2.0;
            let ax = cx + (radius + 10.0) * mid.cos();
            let ay = cy + (radius + 10.0) * mid.sin();
            let arrow = canvas.shape(
                ShapeKind::CurvedRightArrow,
                Rect::new(ax - 15.0, ay - 15.0, 30.0, 30.0),
                Some(theme.color(ColorRole::Secondary)),
            )?;
            canvas.rotate(arrow, mid.to_degrees() + 90.0)?;
        }
    }
    center_caption(canvas, data)
}

/// Up to four boxes at the corners of a square, read clockwise.
pub fn cycle_square(canvas: &mut Canvas<'_>, data: &CycleSlide) -> RenderResult {
    header(canvas, &data.title, data.subhead.as_deref(), Tone::Primary)?;
    let theme = canvas.theme();
    let (cx, cy) = (360.0, 240.0);
    let size = 200.0;
    let (item_w, item_h) = (100.0, 60.0);
    let corners = [
        (cx - size / 2.0, cy - size / 2.0),
        (cx + size / 2.0 - item_w, cy - size / 2.0),
        (cx + size / 2.0 - item_w, cy + size / 2.0 - item_h),
        (cx - size / 2.0, cy + size / 2.0 - item_h),
    ];

    for (item, (x, y)) in data.items.iter().zip(corners) {
        let boxed = canvas.rect(Rect::new(x, y, item_w, item_h), "#F1F5F9")?;
        canvas.border(boxed, Border::solid(theme.color(ColorRole::Primary), 1.0))?;
        canvas.text(
            Rect::new(x + 5.0, y + item_h / 2.0 - 10.0, item_w - 10.0, 20.0),
            &item.label,
            TextSpec::new(14.0).bold().centered(),
        )?;
    }
    center_caption(canvas, data)
}

fn center_caption(canvas: &mut Canvas<'_>, data: &CycleSlide) -> RenderResult {
    let Some(text) = data.center_text.as_deref().filter(|t| !t.is_empty()) else {
        return Ok(());
    };
    let theme = canvas.theme();
    canvas.text(
        Rect::new(310.0, 220.0, 100.0, 40.0),
        text,
        TextSpec::new(18.0)
            .bold()
            .color(theme.color(ColorRole::Primary))
            .centered(),
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ring_starts_at_top() {
        assert!((ring_angle(0.0, 4) + PI / 2.0).abs() < 1e-9);
        assert!(ring_angle(1.0, 4).abs() < 1e-9);
    }

    #[test]
    fn test_short_label() {
        assert_eq!(short_label("Plan（計画）"), "Plan");
        assert_eq!(short_label("Do (execute)"), "Do ");
        assert_eq!(short_label("Check"), "Check");
    }

    #[test]
    fn test_side_text_omits_missing_sub_label() {
        let item = CycleItem { label: "Act".into(), sub_label: None };
        assert_eq!(side_text(&item), "Act");
        let item = CycleItem { label: "Act".into(), sub_label: Some("improve".into()) };
        assert_eq!(side_text(&item), "Act\nimprove");
    }
}
