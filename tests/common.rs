#![allow(dead_code)]

use parking_lot::Mutex;
use serde_json::Value;
use std::sync::Arc;

use slide_generator_server::presentation::document::{Document, DocumentError, DocumentService, ImageBlob};
use slide_generator_server::presentation::images::ImageFetcher;
use slide_generator_server::presentation::memory::MemoryDocumentService;
use slide_generator_server::presentation::records::{parse_deck, DeckEntry};

pub const BASE_URL: &str = "http://test.local";
pub const FOLDER_ID: &str = "1aBcDeFgHiJkLmNoPqRsTuVwXyZ12345";

const PNG_SIGNATURE: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

/// Serves a tiny PNG for every URL and remembers what was asked for.
#[derive(Default)]
pub struct RecordingFetcher {
    pub requested: Mutex<Vec<String>>,
}

impl ImageFetcher for RecordingFetcher {
    fn fetch(&self, url: &str) -> Result<ImageBlob, DocumentError> {
        self.requested.lock().push(url.to_string());
        Ok(ImageBlob {
            source_url: url.to_string(),
            mime_type: "image/png".to_string(),
            bytes: PNG_SIGNATURE.to_vec(),
        })
    }
}

/// Every fetch fails, as if the network were down.
pub struct OfflineFetcher;

impl ImageFetcher for OfflineFetcher {
    fn fetch(&self, url: &str) -> Result<ImageBlob, DocumentError> {
        Err(DocumentError::ImageFetch {
            url: url.to_string(),
            reason: "network unreachable".to_string(),
        })
    }
}

pub fn offline_service() -> MemoryDocumentService {
    MemoryDocumentService::new(BASE_URL, Arc::new(OfflineFetcher))
}

pub fn recording_service() -> (MemoryDocumentService, Arc<RecordingFetcher>) {
    let fetcher = Arc::new(RecordingFetcher::default());
    let service = MemoryDocumentService::new(BASE_URL, fetcher.clone());
    (service, fetcher)
}

/// Wraps a memory service but refuses every relocation and, optionally,
/// document creation.
pub struct FailingService {
    pub inner: MemoryDocumentService,
    pub fail_create: bool,
}

impl FailingService {
    pub fn relocation_only() -> Self {
        Self {
            inner: offline_service(),
            fail_create: false,
        }
    }

    pub fn everything() -> Self {
        Self {
            inner: offline_service(),
            fail_create: true,
        }
    }
}

impl DocumentService for FailingService {
    fn create_document(&self, title: &str) -> Result<Box<dyn Document>, DocumentError> {
        if self.fail_create {
            return Err(DocumentError::DocumentNotFound(format!("quota exceeded for '{}'", title)));
        }
        self.inner.create_document(title)
    }

    fn fetch_image(&self, url: &str) -> Result<ImageBlob, DocumentError> {
        self.inner.fetch_image(url)
    }

    fn move_to_folder(&self, _document_id: &str, folder_id: &str) -> Result<(), DocumentError> {
        Err(DocumentError::FolderNotFound(folder_id.to_string()))
    }
}

pub fn deck(value: Value) -> Vec<DeckEntry> {
    parse_deck(&value.to_string()).expect("test deck should parse")
}
