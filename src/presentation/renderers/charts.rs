//! Hand-drawn charts built from `label: value` lists.

use super::{header, RenderResult, Tone};
use crate::presentation::document::{Border, LineCategory, Point, Rect};
use crate::presentation::primitives::{Canvas, TextSpec};
use crate::presentation::records::{ChartCombineSlide, ChartSlide, LineGraphSlide};
use crate::presentation::theme::ColorRole;

/// Series drawn by `chartCombine`.
pub const COMBINED_SERIES: &str = "2023: 100, 2024: 150, 2025: 210";

const AXIS_X: f64 = 120.0;
const BASE_Y: f64 = 350.0;
const CHART_W: f64 = 480.0;
const CHART_H: f64 = 200.0;
const PIE_COLORS: [ColorRole; 5] = [
    ColorRole::Primary,
    ColorRole::Secondary,
    ColorRole::Success,
    ColorRole::Warning,
    ColorRole::Accent,
];

#[derive(Debug, Clone, PartialEq)]
pub struct DataPoint {
    pub label: String,
    pub value: f64,
}

/// Parse `"label: value, label: value"`.
///
/// Values are read as a leading decimal number; anything unparseable counts
/// as zero. Entries without a label are dropped.
pub fn parse_chart_data(raw: &str) -> Vec<DataPoint> {
    raw.split(',')
        .filter_map(|entry| {
            let mut parts = entry.split(':');
            let label = parts.next().unwrap_or_default().trim();
            if label.is_empty() {
                return None;
            }
            let value = parts.next().map(leading_float).unwrap_or(0.0);
            Some(DataPoint {
                label: label.to_string(),
                value,
            })
        })
        .collect()
}

fn leading_float(raw: &str) -> f64 {
    let raw = raw.trim();
    let mut end = 0;
    let mut seen_digit = false;
    let mut seen_dot = false;
    for (i, c) in raw.char_indices() {
        match c {
            '+' | '-' if i == 0 => {}
            '0'..='9' => seen_digit = true,
            '.' if !seen_dot => seen_dot = true,
            _ => break,
        }
        end = i + c.len_utf8();
    }
    if !seen_digit {
        return 0.0;
    }
    raw[..end].parse().unwrap_or(0.0)
}

/// Whole numbers print without a fractional part.
pub fn format_value(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

fn series_max(points: &[DataPoint]) -> f64 {
    points.iter().map(|p| p.value).fold(1.0, f64::max)
}

pub fn bar_graph(canvas: &mut Canvas<'_>, data: &ChartSlide) -> RenderResult {
    header(canvas, &data.title, data.subhead.as_deref(), Tone::Primary)?;
    bar_chart_body(canvas, &parse_chart_data(&data.data))
}

/// Axes, bars, category labels and value labels. Shared with `chartCombine`.
pub fn bar_chart_body(canvas: &mut Canvas<'_>, points: &[DataPoint]) -> RenderResult {
    let theme = canvas.theme();
    let gray = theme.color(ColorRole::TextGray);
    canvas.rect(Rect::new(AXIS_X, BASE_Y, CHART_W, 2.0), gray)?;
    canvas.rect(Rect::new(AXIS_X, BASE_Y - CHART_H, 2.0, CHART_H), gray)?;
    if points.is_empty() {
        return Ok(());
    }

    let max = series_max(points);
    let gap = 20.0;
    let count = points.len() as f64;
    let bar_w = (CHART_W - (count + 1.0) * gap) / count;
    for (i, point) in points.iter().enumerate() {
        let x = AXIS_X + gap + i as f64 * (bar_w + gap);
        let bar_h = point.value / max * CHART_H;
        canvas.rect(Rect::new(x, BASE_Y - bar_h, bar_w, bar_h), theme.color(ColorRole::Primary))?;
        canvas.text(
            Rect::new(x, BASE_Y + 10.0, bar_w, 20.0),
            &point.label,
            TextSpec::new(10.0).centered(),
        )?;
        canvas.text(
            Rect::new(x, BASE_Y - bar_h - 20.0, bar_w, 20.0),
            &format_value(point.value),
            TextSpec::new(10.0).bold().centered(),
        )?;
    }
    Ok(())
}

/// A legend beside a placeholder disc; slices are not drawn.
pub fn pie_graph(canvas: &mut Canvas<'_>, data: &ChartSlide) -> RenderResult {
    header(canvas, &data.title, data.subhead.as_deref(), Tone::Primary)?;
    let theme = canvas.theme();
    let (cx, cy) = (360.0, 240.0);
    let radius = 120.0;

    for (i, point) in parse_chart_data(&data.data).iter().enumerate() {
        let (lx, ly) = (520.0, 180.0 + i as f64 * 30.0);
        canvas.ellipse(
            Rect::new(lx, ly, 15.0, 15.0),
            theme.color(PIE_COLORS[i % PIE_COLORS.len()]),
        )?;
        canvas.text(
            Rect::new(lx + 25.0, ly - 3.0, 120.0, 20.0),
            &format!("{}: {}%", point.label, format_value(point.value)),
            TextSpec::new(12.0),
        )?;
    }

    let primary = theme.color(ColorRole::Primary);
    let disc = canvas.ellipse(
        Rect::new(cx - radius, cy - radius, radius * 2.0, radius * 2.0),
        primary,
    )?;
    canvas.border(disc, Border::solid(primary, 1.0))?;
    canvas.text(
        Rect::new(cx - 50.0, cy - 10.0, 100.0, 20.0),
        "(Pie Chart Area)",
        TextSpec::new(10.0)
            .color(theme.color(ColorRole::TextGray))
            .centered(),
    )?;
    Ok(())
}

/// Dots joined by straight segments over a baseline.
pub fn line_graph(canvas: &mut Canvas<'_>, data: &LineGraphSlide) -> RenderResult {
    header(canvas, &data.title, data.subhead.as_deref(), Tone::Primary)?;
    let theme = canvas.theme();
    canvas.rect(
        Rect::new(AXIS_X, BASE_Y, CHART_W, 2.0),
        theme.color(ColorRole::TextGray),
    )?;

    let points = parse_chart_data(&data.trend);
    let max = series_max(&points);
    let step = CHART_W / points.len().saturating_sub(1).max(1) as f64;
    let position = |i: usize, value: f64| Point::new(AXIS_X + i as f64 * step, BASE_Y - value / max * CHART_H);

    for (i, point) in points.iter().enumerate() {
        let at = position(i, point.value);
        canvas.ellipse(Rect::new(at.x - 4.0, at.y - 4.0, 8.0, 8.0), theme.color(ColorRole::Primary))?;
        if i > 0 {
            let previous = position(i - 1, points[i - 1].value);
            canvas.line(LineCategory::Straight, previous, at, None)?;
        }
        canvas.text(
            Rect::new(at.x - 25.0, BASE_Y + 10.0, 50.0, 20.0),
            &point.label,
            TextSpec::new(10.0)
                .bold()
                .color(theme.color(ColorRole::TextGray))
                .centered(),
        )?;
    }
    Ok(())
}

/// Header plus the bar chart body for [`COMBINED_SERIES`], on one page.
pub fn chart_combine(canvas: &mut Canvas<'_>, data: &ChartCombineSlide) -> RenderResult {
    header(canvas, &data.title, data.subhead.as_deref(), Tone::Primary)?;
    bar_chart_body(canvas, &parse_chart_data(COMBINED_SERIES))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_chart_data() {
        let points = parse_chart_data("Q1: 10, Q2:20.5 ,Q3: abc, : 7, Q4");
        let labels: Vec<_> = points.iter().map(|p| p.label.as_str()).collect();
        let values: Vec<_> = points.iter().map(|p| p.value).collect();
        assert_eq!(labels, vec!["Q1", "Q2", "Q3", "Q4"]);
        assert_eq!(values, vec![10.0, 20.5, 0.0, 0.0]);
    }

    #[test]
    fn test_leading_float_ignores_suffix() {
        assert_eq!(leading_float("42%"), 42.0);
        assert_eq!(leading_float("-3.5 units"), -3.5);
        assert_eq!(leading_float("."), 0.0);
        assert_eq!(leading_float(""), 0.0);
    }

    #[test]
    fn test_empty_input_has_no_points() {
        assert!(parse_chart_data("").is_empty());
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(150.0), "150");
        assert_eq!(format_value(2.5), "2.5");
    }

    #[test]
    fn test_series_max_floor_is_one() {
        assert_eq!(series_max(&[]), 1.0);
        let points = parse_chart_data(COMBINED_SERIES);
        assert_eq!(series_max(&points), 210.0);
    }
}
