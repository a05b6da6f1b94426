//! In-process document service.
//!
//! Keeps recently created documents in a bounded cache so they can be
//! inspected over the API. Behaves like the remote editor where it matters
//! to the engine: a fresh document starts with one blank page, colors must
//! be `#RRGGBB` and table cells are bounds-checked.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use base64::Engine;
use chrono::{DateTime, Utc};
use moka::sync::Cache;
use parking_lot::Mutex;
use serde::Serialize;
use uuid::Uuid;

use super::document::{
    Border, Document, DocumentError, DocumentService, ElementId, ImageBlob, LineCategory, PageId,
    Point, Rect, ShapeKind, TextStyle,
};
use super::images::ImageFetcher;
use super::theme::hex_to_rgb;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeElement {
    pub kind: ShapeKind,
    pub bounds: Rect,
    pub text: String,
    pub style: TextStyle,
    pub fill: Option<String>,
    pub border: Border,
    pub rotation: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableCell {
    pub text: String,
    pub fill: Option<String>,
    pub style: TextStyle,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableElement {
    pub bounds: Rect,
    pub rows: usize,
    pub cols: usize,
    pub cells: Vec<Vec<TableCell>>,
}

impl TableElement {
    pub fn cell(&self, row: usize, col: usize) -> Option<&TableCell> {
        self.cells.get(row).and_then(|r| r.get(col))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineElement {
    pub category: LineCategory,
    pub from: Point,
    pub to: Point,
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageElement {
    pub bounds: Rect,
    pub source_url: String,
    pub mime_type: String,
    /// Base64-encoded image bytes.
    pub data: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Element {
    Shape(ShapeElement),
    Table(TableElement),
    Line(LineElement),
    Image(ImageElement),
}

impl Element {
    fn name(&self) -> &'static str {
        match self {
            Element::Shape(_) => "shape",
            Element::Table(_) => "table",
            Element::Line(_) => "line",
            Element::Image(_) => "image",
        }
    }

    pub fn as_shape(&self) -> Option<&ShapeElement> {
        match self {
            Element::Shape(shape) => Some(shape),
            _ => None,
        }
    }

    pub fn as_table(&self) -> Option<&TableElement> {
        match self {
            Element::Table(table) => Some(table),
            _ => None,
        }
    }

    pub fn as_line(&self) -> Option<&LineElement> {
        match self {
            Element::Line(line) => Some(line),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredPage {
    pub id: PageId,
    pub background: Option<String>,
    pub notes: Option<String>,
    pub elements: Vec<Element>,
}

impl StoredPage {
    fn new(id: PageId) -> Self {
        Self {
            id,
            background: None,
            notes: None,
            elements: Vec::new(),
        }
    }

    pub fn shapes(&self) -> impl Iterator<Item = &ShapeElement> {
        self.elements.iter().filter_map(Element::as_shape)
    }

    pub fn tables(&self) -> impl Iterator<Item = &TableElement> {
        self.elements.iter().filter_map(Element::as_table)
    }

    pub fn lines(&self) -> impl Iterator<Item = &LineElement> {
        self.elements.iter().filter_map(Element::as_line)
    }

    /// Text of every shape and text box, in draw order.
    pub fn texts(&self) -> Vec<&str> {
        self.shapes()
            .filter(|s| !s.text.is_empty())
            .map(|s| s.text.as_str())
            .collect()
    }

    pub fn find_text(&self, text: &str) -> Option<&ShapeElement> {
        self.shapes().find(|s| s.text == text)
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredDocument {
    pub id: String,
    pub title: String,
    pub url: String,
    pub folder: Option<String>,
    pub created_at: DateTime<Utc>,
    pub pages: Vec<StoredPage>,
    #[serde(skip)]
    next_page: u32,
}

impl StoredDocument {
    fn page_mut(&mut self, page: PageId) -> Result<&mut StoredPage, DocumentError> {
        self.pages
            .iter_mut()
            .find(|p| p.id == page)
            .ok_or(DocumentError::PageNotFound(page))
    }

    fn element_mut(&mut self, element: ElementId) -> Result<&mut Element, DocumentError> {
        self.page_mut(element.page)?
            .elements
            .get_mut(element.index)
            .ok_or(DocumentError::ElementNotFound(element))
    }

    fn push(&mut self, page: PageId, element: Element) -> Result<ElementId, DocumentError> {
        let target = self.page_mut(page)?;
        target.elements.push(element);
        Ok(ElementId {
            page,
            index: target.elements.len() - 1,
        })
    }

    fn shape_mut(&mut self, element: ElementId, operation: &'static str) -> Result<&mut ShapeElement, DocumentError> {
        match self.element_mut(element)? {
            Element::Shape(shape) => Ok(shape),
            other => Err(DocumentError::Unsupported {
                operation,
                element: other.name(),
            }),
        }
    }

    fn cell_mut(
        &mut self,
        table: ElementId,
        row: usize,
        col: usize,
        operation: &'static str,
    ) -> Result<&mut TableCell, DocumentError> {
        match self.element_mut(table)? {
            Element::Table(t) => {
                let (rows, cols) = (t.rows, t.cols);
                t.cells
                    .get_mut(row)
                    .and_then(|r| r.get_mut(col))
                    .ok_or(DocumentError::CellOutOfRange { row, col, rows, cols })
            }
            other => Err(DocumentError::Unsupported {
                operation,
                element: other.name(),
            }),
        }
    }
}

fn checked_color(color: &str) -> Result<String, DocumentError> {
    hex_to_rgb(color)
        .map(|_| color.to_string())
        .ok_or_else(|| DocumentError::InvalidColor(color.to_string()))
}

fn checked_style(style: &TextStyle) -> Result<(), DocumentError> {
    match &style.color {
        Some(color) => checked_color(color).map(|_| ()),
        None => Ok(()),
    }
}

/// Documents kept when no retention is configured.
pub const DEFAULT_DOCUMENT_CAPACITY: u64 = 100;
/// How long a document stays inspectable when no retention is configured.
pub const DEFAULT_DOCUMENT_TTL: Duration = Duration::from_secs(10 * 60);

type SharedDocument = Arc<Mutex<StoredDocument>>;

/// Document service holding recent documents in process memory.
pub struct MemoryDocumentService {
    store: Cache<String, SharedDocument>,
    base_url: String,
    images: Arc<dyn ImageFetcher>,
    allowed_folders: Option<HashSet<String>>,
}

impl MemoryDocumentService {
    pub fn new(base_url: &str, images: Arc<dyn ImageFetcher>) -> Self {
        Self {
            store: build_store(DEFAULT_DOCUMENT_CAPACITY, DEFAULT_DOCUMENT_TTL),
            base_url: base_url.trim_end_matches('/').to_string(),
            images,
            allowed_folders: None,
        }
    }

    /// Keep at most `capacity` documents, each for at most `ttl`.
    pub fn with_retention(mut self, capacity: u64, ttl: Duration) -> Self {
        self.store = build_store(capacity, ttl);
        self
    }

    /// Restrict relocation to the given folder ids.
    pub fn with_allowed_folders<I, S>(mut self, folders: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_folders = Some(folders.into_iter().map(Into::into).collect());
        self
    }

    /// Snapshot of a stored document.
    pub fn document(&self, id: &str) -> Option<StoredDocument> {
        self.store.get(id).map(|document| document.lock().clone())
    }

    pub fn document_count(&self) -> usize {
        self.store.run_pending_tasks();
        self.store.entry_count() as usize
    }
}

fn build_store(capacity: u64, ttl: Duration) -> Cache<String, SharedDocument> {
    Cache::builder().max_capacity(capacity).time_to_live(ttl).build()
}

impl DocumentService for MemoryDocumentService {
    fn create_document(&self, title: &str) -> Result<Box<dyn Document>, DocumentError> {
        let id = Uuid::new_v4().to_string();
        let url = format!("{}/presentations/{}", self.base_url, id);
        let document = StoredDocument {
            id: id.clone(),
            title: title.to_string(),
            url: url.clone(),
            folder: None,
            created_at: Utc::now(),
            pages: vec![StoredPage::new(PageId(0))],
            next_page: 1,
        };
        let document = Arc::new(Mutex::new(document));
        self.store.insert(id.clone(), Arc::clone(&document));
        log::debug!("Created document {} '{}'", id, title);

        Ok(Box::new(MemoryDocument { id, url, document }))
    }

    fn fetch_image(&self, url: &str) -> Result<ImageBlob, DocumentError> {
        self.images.fetch(url)
    }

    fn move_to_folder(&self, document_id: &str, folder_id: &str) -> Result<(), DocumentError> {
        if let Some(allowed) = &self.allowed_folders {
            if !allowed.contains(folder_id) {
                return Err(DocumentError::FolderNotFound(folder_id.to_string()));
            }
        }
        let document = self
            .store
            .get(document_id)
            .ok_or_else(|| DocumentError::DocumentNotFound(document_id.to_string()))?;
        document.lock().folder = Some(folder_id.to_string());
        Ok(())
    }
}

/// Handle on one stored document. Stays usable if the cache evicts it mid-run.
struct MemoryDocument {
    id: String,
    url: String,
    document: SharedDocument,
}

impl MemoryDocument {
    fn with<T>(&self, f: impl FnOnce(&mut StoredDocument) -> Result<T, DocumentError>) -> Result<T, DocumentError> {
        f(&mut self.document.lock())
    }
}

impl Document for MemoryDocument {
    fn id(&self) -> &str {
        &self.id
    }

    fn url(&self) -> &str {
        &self.url
    }

    fn pages(&self) -> Result<Vec<PageId>, DocumentError> {
        self.with(|doc| Ok(doc.pages.iter().map(|p| p.id).collect()))
    }

    fn append_page(&mut self) -> Result<PageId, DocumentError> {
        self.with(|doc| {
            let id = PageId(doc.next_page);
            doc.next_page += 1;
            doc.pages.push(StoredPage::new(id));
            Ok(id)
        })
    }

    fn remove_page(&mut self, page: PageId) -> Result<(), DocumentError> {
        self.with(|doc| {
            let before = doc.pages.len();
            doc.pages.retain(|p| p.id != page);
            if doc.pages.len() == before {
                return Err(DocumentError::PageNotFound(page));
            }
            Ok(())
        })
    }

    fn set_background(&mut self, page: PageId, color: &str) -> Result<(), DocumentError> {
        let color = checked_color(color)?;
        self.with(|doc| {
            doc.page_mut(page)?.background = Some(color);
            Ok(())
        })
    }

    fn set_speaker_notes(&mut self, page: PageId, text: &str) -> Result<(), DocumentError> {
        self.with(|doc| {
            doc.page_mut(page)?.notes = Some(text.to_string());
            Ok(())
        })
    }

    fn insert_text_box(&mut self, page: PageId, text: &str, bounds: Rect) -> Result<ElementId, DocumentError> {
        self.with(|doc| {
            doc.push(
                page,
                Element::Shape(ShapeElement {
                    kind: ShapeKind::TextBox,
                    bounds,
                    text: text.to_string(),
                    style: TextStyle::default(),
                    fill: None,
                    border: Border::Default,
                    rotation: 0.0,
                }),
            )
        })
    }

    fn insert_shape(&mut self, page: PageId, kind: ShapeKind, bounds: Rect) -> Result<ElementId, DocumentError> {
        self.with(|doc| {
            doc.push(
                page,
                Element::Shape(ShapeElement {
                    kind,
                    bounds,
                    text: String::new(),
                    style: TextStyle::default(),
                    fill: None,
                    border: Border::Default,
                    rotation: 0.0,
                }),
            )
        })
    }

    fn insert_table(
        &mut self,
        page: PageId,
        rows: usize,
        cols: usize,
        bounds: Rect,
    ) -> Result<ElementId, DocumentError> {
        if rows == 0 || cols == 0 {
            return Err(DocumentError::EmptyTable);
        }
        self.with(|doc| {
            doc.push(
                page,
                Element::Table(TableElement {
                    bounds,
                    rows,
                    cols,
                    cells: vec![vec![TableCell::default(); cols]; rows],
                }),
            )
        })
    }

    fn insert_line(
        &mut self,
        page: PageId,
        category: LineCategory,
        from: Point,
        to: Point,
    ) -> Result<ElementId, DocumentError> {
        self.with(|doc| {
            doc.push(
                page,
                Element::Line(LineElement {
                    category,
                    from,
                    to,
                    color: None,
                }),
            )
        })
    }

    fn insert_image(&mut self, page: PageId, image: &ImageBlob, bounds: Rect) -> Result<ElementId, DocumentError> {
        let data = base64::engine::general_purpose::STANDARD.encode(&image.bytes);
        self.with(|doc| {
            doc.push(
                page,
                Element::Image(ImageElement {
                    bounds,
                    source_url: image.source_url.clone(),
                    mime_type: image.mime_type.clone(),
                    data,
                }),
            )
        })
    }

    fn set_text(&mut self, element: ElementId, text: &str) -> Result<(), DocumentError> {
        self.with(|doc| {
            doc.shape_mut(element, "set_text")?.text = text.to_string();
            Ok(())
        })
    }

    fn set_text_style(&mut self, element: ElementId, style: &TextStyle) -> Result<(), DocumentError> {
        checked_style(style)?;
        self.with(|doc| {
            doc.shape_mut(element, "set_text_style")?.style.merge(style);
            Ok(())
        })
    }

    fn set_fill(&mut self, element: ElementId, color: &str) -> Result<(), DocumentError> {
        let color = checked_color(color)?;
        self.with(|doc| match doc.element_mut(element)? {
            Element::Shape(shape) => {
                shape.fill = Some(color);
                Ok(())
            }
            Element::Line(line) => {
                line.color = Some(color);
                Ok(())
            }
            other => Err(DocumentError::Unsupported {
                operation: "set_fill",
                element: other.name(),
            }),
        })
    }

    fn set_border(&mut self, element: ElementId, border: Border) -> Result<(), DocumentError> {
        if let Border::Solid { color, .. } = &border {
            checked_color(color)?;
        }
        self.with(|doc| {
            doc.shape_mut(element, "set_border")?.border = border;
            Ok(())
        })
    }

    fn set_rotation(&mut self, element: ElementId, degrees: f64) -> Result<(), DocumentError> {
        self.with(|doc| {
            doc.shape_mut(element, "set_rotation")?.rotation = degrees;
            Ok(())
        })
    }

    fn set_cell_text(&mut self, table: ElementId, row: usize, col: usize, text: &str) -> Result<(), DocumentError> {
        self.with(|doc| {
            doc.cell_mut(table, row, col, "set_cell_text")?.text = text.to_string();
            Ok(())
        })
    }

    fn set_cell_fill(&mut self, table: ElementId, row: usize, col: usize, color: &str) -> Result<(), DocumentError> {
        let color = checked_color(color)?;
        self.with(|doc| {
            doc.cell_mut(table, row, col, "set_cell_fill")?.fill = Some(color);
            Ok(())
        })
    }

    fn set_cell_style(
        &mut self,
        table: ElementId,
        row: usize,
        col: usize,
        style: &TextStyle,
    ) -> Result<(), DocumentError> {
        checked_style(style)?;
        self.with(|doc| {
            doc.cell_mut(table, row, col, "set_cell_style")?.style.merge(style);
            Ok(())
        })
    }
}
