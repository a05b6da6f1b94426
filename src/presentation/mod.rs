//! Presentation module - turns an ordered list of slide records into a
//! themed, multi-page document.
//!
//! - `theme` - palette, fonts and fixed layout constants
//! - `records` - typed slide records and deck decoding
//! - `document` / `memory` - the document service seam and its in-process store
//! - `primitives` - the drawing toolkit every layout builds on
//! - `renderers` / `registry` - one layout per slide kind and the tag table
//! - `orchestrator` - the generation run
//! - `handlers` / `models` - the HTTP surface

pub mod document;
pub mod handlers;
pub mod images;
pub mod memory;
pub mod models;
pub mod orchestrator;
pub mod primitives;
pub mod records;
pub mod registry;
pub mod renderers;
pub mod theme;

pub use document::{Document, DocumentError, DocumentService};
pub use images::{HttpImageFetcher, ImageFetcher};
pub use memory::MemoryDocumentService;
pub use orchestrator::{
    create_presentation, extract_folder_id, extract_title, GenerateOptions, GenerationReport, PageCleanup,
    PresentationGenerator,
};
pub use records::{parse_deck, DeckEntry, SlideKind, SlideRecord};
pub use theme::{Theme, ThemeOverride};

use thiserror::Error;

/// Errors that abort a generation run.
#[derive(Debug, Error)]
pub enum SlideError {
    #[error("invalid slide data: {0}")]
    Parse(#[source] serde_json::Error),
    #[error("invalid {kind} record: {source}")]
    InvalidRecord {
        kind: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Document(#[from] DocumentError),
}

impl SlideError {
    /// Message shown to API callers.
    pub fn user_message(&self) -> String {
        format!("Slide generation failed: {}", self)
    }

    /// True when the caller sent bad input rather than the run failing.
    pub fn is_input_error(&self) -> bool {
        matches!(self, SlideError::Parse(_) | SlideError::InvalidRecord { .. })
    }
}
