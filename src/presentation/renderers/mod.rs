//! Layout renderers, one function per slide kind.
//!
//! Every renderer receives a [`Canvas`] bound to a freshly appended page and
//! the decoded record. Renderers only read the theme; they never look at
//! sibling pages.

pub mod basic;
pub mod cards;
pub mod charts;
pub mod compare;
pub mod cycle;
pub mod detail;
pub mod diagram;
pub mod flow;
pub mod gantt;
pub mod hierarchy;
pub mod layout;
pub mod logic;
pub mod narrative;
pub mod special;

use super::document::{DocumentError, Rect};
use super::primitives::{Canvas, TextSpec};
use super::theme::{font_size, layout as offsets, ColorRole, FontRole, SLIDE_HEIGHT};

pub type RenderResult = Result<(), DocumentError>;

/// Usable width between the side margins.
pub const CONTENT_W: f64 = 640.0;
/// Height from the content start to the bottom margin.
pub const CONTENT_H: f64 = SLIDE_HEIGHT - offsets::CONTENT_Y - 15.0;

/// Color of the page title.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Primary,
    Dark,
}

/// Title and optional subhead at their fixed offsets.
pub fn header(canvas: &mut Canvas<'_>, title: &str, subhead: Option<&str>, tone: Tone) -> RenderResult {
    let theme = canvas.theme();
    let title_color = match tone {
        Tone::Primary => theme.color(ColorRole::Primary),
        Tone::Dark => theme.color(ColorRole::TextDark),
    };
    canvas.text(
        Rect::new(offsets::MARGIN, offsets::TITLE_Y, CONTENT_W, 35.0),
        title,
        TextSpec::new(font_size::SLIDE_TITLE)
            .color(title_color)
            .bold()
            .font(theme.font(FontRole::Title)),
    )?;
    if let Some(subhead) = subhead.filter(|s| !s.is_empty()) {
        canvas.text(
            Rect::new(offsets::MARGIN, offsets::SUBHEAD_Y, CONTENT_W, 25.0),
            subhead,
            TextSpec::new(font_size::SUBHEAD)
                .color(theme.color(ColorRole::TextGray))
                .font(theme.font(FontRole::Body)),
        )?;
    }
    Ok(())
}

/// White background plus the header.
pub fn plain_page(canvas: &mut Canvas<'_>, title: &str, subhead: Option<&str>, tone: Tone) -> RenderResult {
    let theme = canvas.theme();
    canvas.background(theme.color(ColorRole::BgWhite))?;
    header(canvas, title, subhead, tone)
}

/// Bulleted lines joined with newlines.
pub fn bullets<S: AsRef<str>>(items: &[S]) -> String {
    items
        .iter()
        .map(|item| format!("• {}", item.as_ref()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Evenly split `total` into `count` slots separated by `gap`.
pub fn slot_width(total: f64, count: usize, gap: f64) -> f64 {
    if count == 0 {
        return 0.0;
    }
    (total - gap * (count as f64 - 1.0)) / count as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_height() {
        assert_eq!(CONTENT_H, 295.0);
    }

    #[test]
    fn test_slot_width() {
        assert_eq!(slot_width(640.0, 3, 15.0), (640.0 - 30.0) / 3.0);
        assert_eq!(slot_width(640.0, 1, 15.0), 640.0);
        assert_eq!(slot_width(640.0, 0, 15.0), 0.0);
    }

    #[test]
    fn test_bullets() {
        assert_eq!(bullets(&["a", "b"]), "• a\n• b");
        assert_eq!(bullets::<&str>(&[]), "");
    }
}
