//! Gantt chart: grouped period header, task rows and rounded bars.

use super::charts::format_value;
use super::{plain_page, RenderResult, Tone, CONTENT_W};
use crate::presentation::document::{LineCategory, Point, Rect, ShapeKind};
use crate::presentation::primitives::{Canvas, TextSpec};
use crate::presentation::records::{GanttHeader, GanttSlide};
use crate::presentation::theme::{layout, ColorRole, FontRole};

const LABEL_W: f64 = 140.0;
const HEADER_H: f64 = 20.0;
const ROW_H: f64 = 22.0;
const ROW_GAP: f64 = 6.0;
const BAR_PADDING: f64 = 3.0;
const GRID: &str = "#E5E7EB";
const GROUP_RULE: &str = "#9CA3AF";
const ROW_RULE: &str = "#F3F4F6";

/// Number of period columns: the explicit total, else the period count, at least one.
pub fn period_count(header: &GanttHeader) -> f64 {
    match header.total_periods {
        Some(total) if total > 0.0 => total,
        _ => header.periods.len().max(1) as f64,
    }
}

/// Periods covered by each group heading.
pub fn periods_per_group(total: f64, groups: usize) -> f64 {
    (total / groups as f64).ceil()
}

pub fn gantt_chart(canvas: &mut Canvas<'_>, data: &GanttSlide) -> RenderResult {
    plain_page(canvas, &data.title, data.subhead.as_deref(), Tone::Primary)?;
    let theme = canvas.theme();
    let body = theme.font(FontRole::Body);
    let text_dark = theme.color(ColorRole::TextDark);

    let start_y = layout::CONTENT_Y + 10.0;
    let chart_x = layout::MARGIN + LABEL_W;
    let chart_w = CONTENT_W - LABEL_W;
    let total = period_count(&data.header);
    let period_w = chart_w / total;
    let groups = &data.header.groups;

    canvas.rect(Rect::new(chart_x, start_y, chart_w, HEADER_H * 2.0), "#F9FAFB")?;

    let per_group = periods_per_group(total, groups.len().max(1));
    for (i, group) in groups.iter().enumerate() {
        let first = i as f64 * per_group;
        let span = f64::min(per_group, total - first);
        if span <= 0.0 {
            continue;
        }
        let x = chart_x + first * period_w;
        let width = span * period_w;
        canvas.text(
            Rect::new(x, start_y, width, HEADER_H),
            group,
            TextSpec::new(10.0).color(text_dark).font(body).bold().centered(),
        )?;
        canvas.line(
            LineCategory::Straight,
            Point::new(x, start_y + HEADER_H),
            Point::new(x + width, start_y + HEADER_H),
            Some(GRID),
        )?;
    }

    let period_y = start_y + HEADER_H;
    for (i, period) in data.header.periods.iter().enumerate() {
        canvas.text(
            Rect::new(chart_x + i as f64 * period_w, period_y, period_w, HEADER_H),
            &format_value(*period),
            TextSpec::new(9.0)
                .color(theme.color(ColorRole::TextGray))
                .font(body)
                .centered(),
        )?;
    }

    let rows_y = period_y + HEADER_H + 5.0;
    let grid_bottom = rows_y + data.rows.len() as f64 * (ROW_H + ROW_GAP);
    for i in 1..data.header.periods.len() {
        let x = chart_x + i as f64 * period_w;
        canvas.line(
            LineCategory::Straight,
            Point::new(x, period_y),
            Point::new(x, grid_bottom),
            Some(GRID),
        )?;
    }
    for i in 1..groups.len() {
        let x = chart_x + i as f64 * per_group * period_w;
        if x <= layout::MARGIN + CONTENT_W + 1.0 {
            canvas.line(
                LineCategory::Straight,
                Point::new(x, start_y),
                Point::new(x, grid_bottom),
                Some(GROUP_RULE),
            )?;
        }
    }

    for (index, row) in data.rows.iter().enumerate() {
        let y = rows_y + index as f64 * (ROW_H + ROW_GAP);
        let rule_y = y + ROW_H + ROW_GAP / 2.0;
        canvas.line(
            LineCategory::Straight,
            Point::new(layout::MARGIN, rule_y),
            Point::new(layout::MARGIN + CONTENT_W, rule_y),
            Some(ROW_RULE),
        )?;
        if !row.task_name.is_empty() {
            canvas.text(
                Rect::new(layout::MARGIN, y, LABEL_W - 10.0, ROW_H),
                &row.task_name,
                TextSpec::new(10.0).color(text_dark).font(body).bold(),
            )?;
        }
        for bar in &row.bars {
            let fill = bar
                .color
                .as_deref()
                .filter(|c| !c.is_empty())
                .unwrap_or(theme.color(ColorRole::Accent));
            canvas.shape(
                ShapeKind::RoundRectangle,
                Rect::new(
                    chart_x + bar.start_index * period_w,
                    y + BAR_PADDING,
                    bar.span * period_w,
                    ROW_H - BAR_PADDING * 2.0,
                ),
                Some(fill),
            )?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(periods: usize, total: Option<f64>) -> GanttHeader {
        GanttHeader {
            groups: Vec::new(),
            periods: (1..=periods).map(|p| p as f64).collect(),
            total_periods: total,
        }
    }

    #[test]
    fn test_period_count() {
        assert_eq!(period_count(&header(6, None)), 6.0);
        assert_eq!(period_count(&header(6, Some(12.0))), 12.0);
        assert_eq!(period_count(&header(0, None)), 1.0);
        assert_eq!(period_count(&header(3, Some(0.0))), 3.0);
    }

    #[test]
    fn test_periods_per_group_rounds_up() {
        assert_eq!(periods_per_group(12.0, 4), 3.0);
        assert_eq!(periods_per_group(10.0, 3), 4.0);
    }
}
