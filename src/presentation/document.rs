//! Contract of the document-editing service the engine draws into.
//!
//! The engine never builds pages itself: it issues calls against a
//! [`Document`] obtained from a [`DocumentService`], mirroring a remote
//! slide editor where every insert or style change is one API call.

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use thiserror::Error;

use super::theme::pt_to_emu;

/// Errors raised by the document service.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("document not found: {0}")]
    DocumentNotFound(String),
    #[error("page {0} does not exist")]
    PageNotFound(PageId),
    #[error("element {0} does not exist")]
    ElementNotFound(ElementId),
    #[error("invalid color '{0}'")]
    InvalidColor(String),
    #[error("cell ({row}, {col}) is outside a {rows}x{cols} table")]
    CellOutOfRange {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },
    #[error("a table needs at least one row and one column")]
    EmptyTable,
    #[error("{operation} is not supported on a {element} element")]
    Unsupported {
        operation: &'static str,
        element: &'static str,
    },
    #[error("failed to fetch image {url}: {reason}")]
    ImageFetch { url: String, reason: String },
    #[error("folder not found: {0}")]
    FolderNotFound(String),
}

/// Identifier of a page inside one document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct PageId(pub u32);

impl std::fmt::Display for PageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "p{}", self.0)
    }
}

/// Handle to a drawn element, valid for further mutation calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ElementId {
    pub page: PageId,
    pub index: usize,
}

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/e{}", self.page, self.index)
    }
}

/// Axis-aligned box in points: left, top, width, height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// `[left, top, width, height]` in EMU.
    pub fn to_emu(&self) -> [i64; 4] {
        [
            pt_to_emu(self.left),
            pt_to_emu(self.top),
            pt_to_emu(self.width),
            pt_to_emu(self.height),
        ]
    }
}

/// Points plus the same box in EMU, as the remote editor reports it.
impl Serialize for Rect {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Rect", 5)?;
        state.serialize_field("left", &self.left)?;
        state.serialize_field("top", &self.top)?;
        state.serialize_field("width", &self.width)?;
        state.serialize_field("height", &self.height)?;
        state.serialize_field("emu", &self.to_emu())?;
        state.end()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShapeKind {
    TextBox,
    Rectangle,
    RoundRectangle,
    Ellipse,
    Triangle,
    RightArrow,
    LeftRightArrow,
    DownArrow,
    CurvedRightArrow,
    Teardrop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LineCategory {
    Straight,
    Bent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Alignment {
    Start,
    Center,
    End,
}

/// Outline of a shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Border {
    /// Whatever the editor draws for a fresh shape.
    #[default]
    Default,
    Transparent,
    Solid { color: String, weight: f64 },
}

impl Border {
    pub fn solid(color: &str, weight: f64) -> Self {
        Border::Solid {
            color: color.to_string(),
            weight,
        }
    }
}

/// Character and paragraph styling. `None` and `false` leave the current
/// value untouched when applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyle {
    pub font_size: Option<f64>,
    pub font_family: Option<String>,
    pub color: Option<String>,
    pub bold: bool,
    pub italic: bool,
    pub alignment: Option<Alignment>,
}

impl TextStyle {
    /// Layer `other` on top of `self`.
    pub fn merge(&mut self, other: &TextStyle) {
        if other.font_size.is_some() {
            self.font_size = other.font_size;
        }
        if other.font_family.is_some() {
            self.font_family.clone_from(&other.font_family);
        }
        if other.color.is_some() {
            self.color.clone_from(&other.color);
        }
        self.bold |= other.bold;
        self.italic |= other.italic;
        if other.alignment.is_some() {
            self.alignment = other.alignment;
        }
    }
}

/// Raw image payload fetched from a URL.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBlob {
    pub source_url: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// One open document in the editing service.
pub trait Document: Send {
    fn id(&self) -> &str;
    fn url(&self) -> &str;

    /// Page ids in display order.
    fn pages(&self) -> Result<Vec<PageId>, DocumentError>;
    /// Append a blank page at the end.
    fn append_page(&mut self) -> Result<PageId, DocumentError>;
    fn remove_page(&mut self, page: PageId) -> Result<(), DocumentError>;
    fn set_background(&mut self, page: PageId, color: &str) -> Result<(), DocumentError>;
    fn set_speaker_notes(&mut self, page: PageId, text: &str) -> Result<(), DocumentError>;

    fn insert_text_box(&mut self, page: PageId, text: &str, bounds: Rect) -> Result<ElementId, DocumentError>;
    fn insert_shape(&mut self, page: PageId, kind: ShapeKind, bounds: Rect) -> Result<ElementId, DocumentError>;
    fn insert_table(
        &mut self,
        page: PageId,
        rows: usize,
        cols: usize,
        bounds: Rect,
    ) -> Result<ElementId, DocumentError>;
    fn insert_line(
        &mut self,
        page: PageId,
        category: LineCategory,
        from: Point,
        to: Point,
    ) -> Result<ElementId, DocumentError>;
    fn insert_image(&mut self, page: PageId, image: &ImageBlob, bounds: Rect) -> Result<ElementId, DocumentError>;

    /// Replace the text of a shape or text box.
    fn set_text(&mut self, element: ElementId, text: &str) -> Result<(), DocumentError>;
    fn set_text_style(&mut self, element: ElementId, style: &TextStyle) -> Result<(), DocumentError>;
    /// Solid fill of a shape, or stroke color of a line.
    fn set_fill(&mut self, element: ElementId, color: &str) -> Result<(), DocumentError>;
    fn set_border(&mut self, element: ElementId, border: Border) -> Result<(), DocumentError>;
    fn set_rotation(&mut self, element: ElementId, degrees: f64) -> Result<(), DocumentError>;

    fn set_cell_text(&mut self, table: ElementId, row: usize, col: usize, text: &str) -> Result<(), DocumentError>;
    fn set_cell_fill(&mut self, table: ElementId, row: usize, col: usize, color: &str) -> Result<(), DocumentError>;
    fn set_cell_style(
        &mut self,
        table: ElementId,
        row: usize,
        col: usize,
        style: &TextStyle,
    ) -> Result<(), DocumentError>;
}

/// Entry point of the editing service.
pub trait DocumentService: Send + Sync {
    /// Create a new document. The service may insert a blank first page.
    fn create_document(&self, title: &str) -> Result<Box<dyn Document>, DocumentError>;
    fn fetch_image(&self, url: &str) -> Result<ImageBlob, DocumentError>;
    fn move_to_folder(&self, document_id: &str, folder_id: &str) -> Result<(), DocumentError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_reports_emu() {
        let value = serde_json::to_value(Rect::new(1.0, 0.5, 720.0, 405.0)).unwrap();
        assert_eq!(value["left"], 1.0);
        assert_eq!(value["emu"], serde_json::json!([12_700, 6_350, 9_144_000, 5_143_500]));
    }

    #[test]
    fn test_text_style_merge_keeps_existing_values() {
        let mut style = TextStyle {
            font_size: Some(12.0),
            color: Some("#000000".to_string()),
            ..Default::default()
        };
        style.merge(&TextStyle {
            color: Some("#FFFFFF".to_string()),
            bold: true,
            ..Default::default()
        });
        assert_eq!(style.font_size, Some(12.0));
        assert_eq!(style.color.as_deref(), Some("#FFFFFF"));
        assert!(style.bold);
    }
}
