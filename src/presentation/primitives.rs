//! Drawing primitives shared by every renderer.
//!
//! A [`Canvas`] is bound to one page of an open document and is the only
//! place that issues drawing calls against the document service.

use super::document::{
    Alignment, Border, Document, DocumentError, DocumentService, ElementId, LineCategory, PageId,
    Point, Rect, ShapeKind, TextStyle,
};
use super::theme::{FontRole, Theme, SLIDE_WIDTH};

/// Footer box at the bottom-left of every page.
pub const FOOTER_BOUNDS: Rect = Rect::new(20.0, 385.0, 300.0, 20.0);
const FOOTER_SIZE: f64 = 8.0;
const FOOTER_COLOR: &str = "#999999";
const LABEL_WIDTH: f64 = 150.0;
const LABEL_PADDING: f64 = 10.0;
const LABEL_COLOR: &str = "#000000";
const PLAIN_FONT: &str = "Arial";

/// Text styling as requested by a renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextSpec<'s> {
    pub size: f64,
    pub color: Option<&'s str>,
    pub bold: bool,
    pub italic: bool,
    pub font: Option<&'s str>,
    pub align: Option<Alignment>,
    pub background: Option<&'s str>,
}

impl<'s> TextSpec<'s> {
    pub fn new(size: f64) -> Self {
        Self {
            size,
            color: None,
            bold: false,
            italic: false,
            font: None,
            align: None,
            background: None,
        }
    }

    pub fn color(mut self, color: &'s str) -> Self {
        self.color = Some(color);
        self
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    pub fn font(mut self, font: &'s str) -> Self {
        self.font = Some(font);
        self
    }

    pub fn align(mut self, align: Alignment) -> Self {
        self.align = Some(align);
        self
    }

    pub fn centered(self) -> Self {
        self.align(Alignment::Center)
    }

    pub fn background(mut self, color: &'s str) -> Self {
        self.background = Some(color);
        self
    }

    fn style(&self, fallback_font: Option<&str>) -> TextStyle {
        TextStyle {
            font_size: Some(self.size),
            font_family: self.font.or(fallback_font).map(str::to_string),
            color: self.color.map(str::to_string),
            bold: self.bold,
            italic: self.italic,
            alignment: self.align,
        }
    }
}

/// One page of an open document plus the theme it is drawn with.
pub struct Canvas<'a> {
    doc: &'a mut dyn Document,
    service: &'a dyn DocumentService,
    theme: &'a Theme,
    page: PageId,
}

impl<'a> Canvas<'a> {
    pub fn new(doc: &'a mut dyn Document, service: &'a dyn DocumentService, theme: &'a Theme, page: PageId) -> Self {
        Self {
            doc,
            service,
            theme,
            page,
        }
    }

    pub fn page(&self) -> PageId {
        self.page
    }

    pub fn theme(&self) -> &'a Theme {
        self.theme
    }

    pub fn background(&mut self, color: &str) -> Result<(), DocumentError> {
        self.doc.set_background(self.page, color)
    }

    /// Text box. The body font applies unless `spec` names one.
    pub fn text(&mut self, bounds: Rect, text: &str, spec: TextSpec<'_>) -> Result<ElementId, DocumentError> {
        let element = self.doc.insert_text_box(self.page, text, bounds)?;
        let style = spec.style(Some(self.theme.font(FontRole::Body)));
        self.doc.set_text_style(element, &style)?;
        if let Some(background) = spec.background {
            self.doc.set_fill(element, background)?;
        }
        Ok(element)
    }

    /// Shape with an optional solid fill and no border.
    pub fn shape(&mut self, kind: ShapeKind, bounds: Rect, fill: Option<&str>) -> Result<ElementId, DocumentError> {
        let element = self.doc.insert_shape(self.page, kind, bounds)?;
        if let Some(fill) = fill {
            self.doc.set_fill(element, fill)?;
        }
        self.doc.set_border(element, Border::Transparent)?;
        Ok(element)
    }

    pub fn rect(&mut self, bounds: Rect, fill: &str) -> Result<ElementId, DocumentError> {
        self.shape(ShapeKind::Rectangle, bounds, Some(fill))
    }

    pub fn ellipse(&mut self, bounds: Rect, fill: &str) -> Result<ElementId, DocumentError> {
        self.shape(ShapeKind::Ellipse, bounds, Some(fill))
    }

    /// Write text inside an existing shape.
    pub fn label(&mut self, element: ElementId, text: &str, spec: TextSpec<'_>) -> Result<(), DocumentError> {
        self.doc.set_text(element, text)?;
        self.doc.set_text_style(element, &spec.style(None))
    }

    /// Filled shape carrying centered text, e.g. a numbered badge.
    pub fn badge(
        &mut self,
        kind: ShapeKind,
        bounds: Rect,
        fill: &str,
        text: &str,
        spec: TextSpec<'_>,
    ) -> Result<ElementId, DocumentError> {
        let element = self.shape(kind, bounds, Some(fill))?;
        self.label(element, text, spec.centered())?;
        Ok(element)
    }

    pub fn border(&mut self, element: ElementId, border: Border) -> Result<(), DocumentError> {
        self.doc.set_border(element, border)
    }

    pub fn rotate(&mut self, element: ElementId, degrees: f64) -> Result<(), DocumentError> {
        self.doc.set_rotation(element, degrees)
    }

    pub fn line(
        &mut self,
        category: LineCategory,
        from: Point,
        to: Point,
        color: Option<&str>,
    ) -> Result<ElementId, DocumentError> {
        let element = self.doc.insert_line(self.page, category, from, to)?;
        if let Some(color) = color {
            self.doc.set_fill(element, color)?;
        }
        Ok(element)
    }

    pub fn table(&mut self, rows: usize, cols: usize, bounds: Rect) -> Result<ElementId, DocumentError> {
        self.doc.insert_table(self.page, rows, cols, bounds)
    }

    pub fn cell_text(&mut self, table: ElementId, row: usize, col: usize, text: &str) -> Result<(), DocumentError> {
        self.doc.set_cell_text(table, row, col, text)
    }

    pub fn cell_fill(&mut self, table: ElementId, row: usize, col: usize, color: &str) -> Result<(), DocumentError> {
        self.doc.set_cell_fill(table, row, col, color)
    }

    /// Style a cell. Unlike text boxes, no font is forced.
    pub fn cell_style(
        &mut self,
        table: ElementId,
        row: usize,
        col: usize,
        spec: TextSpec<'_>,
    ) -> Result<(), DocumentError> {
        self.doc.set_cell_style(table, row, col, &spec.style(None))
    }

    /// Fetch an image by URL and place it.
    pub fn image(&mut self, url: &str, bounds: Rect) -> Result<ElementId, DocumentError> {
        let blob = self.service.fetch_image(url)?;
        self.doc.insert_image(self.page, &blob, bounds)
    }

    /// Set the page's speaker notes.
    pub fn note(&mut self, text: &str) -> Result<(), DocumentError> {
        self.doc.set_speaker_notes(self.page, text)
    }

    /// Small low-contrast text at the bottom-left.
    pub fn footer(&mut self, text: &str) -> Result<ElementId, DocumentError> {
        self.text(
            FOOTER_BOUNDS,
            text,
            TextSpec::new(FOOTER_SIZE).color(FOOTER_COLOR).font(PLAIN_FONT),
        )
    }

    /// Right-aligned `Type: <kind>` marker in the top-right corner.
    pub fn kind_label(&mut self, kind: &str) -> Result<ElementId, DocumentError> {
        let bounds = Rect::new(
            SLIDE_WIDTH - LABEL_WIDTH - LABEL_PADDING,
            LABEL_PADDING,
            LABEL_WIDTH,
            20.0,
        );
        self.text(
            bounds,
            &format!("Type: {}", kind),
            TextSpec::new(8.0)
                .color(LABEL_COLOR)
                .font(PLAIN_FONT)
                .align(Alignment::End),
        )
    }
}
