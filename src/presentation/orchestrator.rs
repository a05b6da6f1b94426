//! Generation run: configure, create, populate, finish, relocate.
//!
//! One [`PresentationGenerator::generate`] call is one linear sequence of
//! document-service calls. Records are rendered strictly in input order.

use lazy_static::lazy_static;
use log::{debug, info, warn};
use regex::Regex;

use super::document::{Document, DocumentService, PageId};
use super::primitives::Canvas;
use super::records::{parse_deck, DeckEntry, SlideKind, SlideRecord};
use super::registry;
use super::theme::{Theme, ThemeOverride};
use super::SlideError;
use crate::metrics;

/// Title used by [`extract_title`] when the deck does not open with a title slide.
pub const DEFAULT_DECK_TITLE: &str = "New Presentation";
/// Title used by the generator when neither the caller nor the deck supplies one.
pub const FALLBACK_DOCUMENT_TITLE: &str = "Generated Presentation";

lazy_static! {
    static ref FOLDER_ID: Regex = Regex::new(r"[-\w]{25,}").expect("valid folder id pattern");
}

/// How the finish phase treats the blank page a new document starts with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PageCleanup {
    /// Drop the first page when the document holds more pages than records
    /// were supplied. The footer skips document page 0 when record 0 is a title.
    #[default]
    RecordCount,
    /// Drop the pages present right after creation once anything rendered,
    /// even when records were skipped. The footer skips the page rendered for
    /// record 0 when it is a title.
    InitialPages,
}

/// Per-run options.
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    pub title: Option<String>,
    pub settings: Option<ThemeOverride>,
    pub cleanup: PageCleanup,
}

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationReport {
    pub url: String,
    pub document_id: String,
    pub page_count: usize,
    /// Records dropped because their kind is not registered.
    pub skipped: usize,
}

/// A page produced by one record.
struct RenderedPage {
    record_index: usize,
    kind: SlideKind,
    page: PageId,
}

/// Drives a generation run against a document service.
pub struct PresentationGenerator<'s> {
    service: &'s dyn DocumentService,
    base_theme: Theme,
}

impl<'s> PresentationGenerator<'s> {
    pub fn new(service: &'s dyn DocumentService) -> Self {
        Self::with_theme(service, Theme::new())
    }

    /// Start every run from `base_theme` instead of the compiled-in defaults.
    pub fn with_theme(service: &'s dyn DocumentService, base_theme: Theme) -> Self {
        Self { service, base_theme }
    }

    pub fn generate(&self, entries: &[DeckEntry], options: &GenerateOptions) -> Result<GenerationReport, SlideError> {
        let theme = self.configure(options.settings.as_ref());

        let title = document_title(entries, options.title.as_deref());
        info!("Generating presentation '{}' from {} record(s)", title, entries.len());
        let mut doc = self.service.create_document(&title)?;
        let initial_pages = doc.pages()?;

        let (rendered, skipped) = self.populate(doc.as_mut(), &theme, entries)?;
        match options.cleanup {
            PageCleanup::RecordCount => self.finish_by_record_count(doc.as_mut(), &theme, entries)?,
            PageCleanup::InitialPages => self.finish_by_initial_pages(doc.as_mut(), &theme, &rendered, &initial_pages)?,
        }

        if let Some(locator) = options.settings.as_ref().and_then(ThemeOverride::folder_locator) {
            self.relocate(doc.id(), locator);
        }

        let report = GenerationReport {
            url: doc.url().to_string(),
            document_id: doc.id().to_string(),
            page_count: doc.pages()?.len(),
            skipped,
        };
        info!(
            "Presentation ready at {} ({} page(s), {} skipped)",
            report.url, report.page_count, report.skipped
        );
        Ok(report)
    }

    fn configure(&self, settings: Option<&ThemeOverride>) -> Theme {
        let mut theme = self.base_theme.clone();
        if let Some(settings) = settings {
            theme.patch(settings);
        }
        theme
    }

    fn populate(
        &self,
        doc: &mut dyn Document,
        theme: &Theme,
        entries: &[DeckEntry],
    ) -> Result<(Vec<RenderedPage>, usize), SlideError> {
        let mut rendered = Vec::with_capacity(entries.len());
        let mut skipped = 0;

        for (record_index, entry) in entries.iter().enumerate() {
            let record = match entry {
                DeckEntry::Slide(record) => record,
                DeckEntry::Unknown(tag) => {
                    warn!("Unknown slide kind: {}", tag);
                    metrics::RECORDS_SKIPPED.inc();
                    skipped += 1;
                    continue;
                }
            };

            let page = doc.append_page()?;
            let mut canvas = Canvas::new(doc, self.service, theme, page);
            registry::render(record, &mut canvas)?;
            canvas.kind_label(record.kind().as_str())?;

            metrics::PAGES_RENDERED.inc();
            debug!("Rendered record {} as {} on page {}", record_index, record.kind(), page);
            rendered.push(RenderedPage {
                record_index,
                kind: record.kind(),
                page,
            });
        }

        Ok((rendered, skipped))
    }

    fn finish_by_record_count(&self, doc: &mut dyn Document, theme: &Theme, entries: &[DeckEntry]) -> Result<(), SlideError> {
        let opens_with_title = entries
            .first()
            .and_then(DeckEntry::as_slide)
            .is_some_and(|record| record.kind() == SlideKind::Title);

        if let Some(footer) = theme.footer_text() {
            for (index, page) in doc.pages()?.into_iter().enumerate() {
                if index == 0 && opens_with_title {
                    continue;
                }
                Canvas::new(doc, self.service, theme, page).footer(footer)?;
            }
        }

        let pages = doc.pages()?;
        if pages.len() > entries.len() {
            doc.remove_page(pages[0])?;
        }
        Ok(())
    }

    fn finish_by_initial_pages(
        &self,
        doc: &mut dyn Document,
        theme: &Theme,
        rendered: &[RenderedPage],
        initial_pages: &[PageId],
    ) -> Result<(), SlideError> {
        if let Some(footer) = theme.footer_text() {
            for page in rendered {
                if page.record_index == 0 && page.kind == SlideKind::Title {
                    continue;
                }
                Canvas::new(doc, self.service, theme, page.page).footer(footer)?;
            }
        }

        if !rendered.is_empty() {
            for page in initial_pages {
                doc.remove_page(*page)?;
            }
        }
        Ok(())
    }

    /// Move the document into the folder named by `locator`. Never fails the run.
    fn relocate(&self, document_id: &str, locator: &str) {
        let Some(folder_id) = extract_folder_id(locator) else {
            warn!("No folder id found in output folder locator '{}'", locator);
            return;
        };
        match self.service.move_to_folder(document_id, &folder_id) {
            Ok(()) => info!("Moved presentation {} to folder {}", document_id, folder_id),
            Err(e) => warn!("Failed to move presentation {} to folder {}: {}", document_id, folder_id, e),
        }
    }
}

/// Explicit title, else the first title record's title, else the fallback.
fn document_title(entries: &[DeckEntry], explicit: Option<&str>) -> String {
    if let Some(title) = explicit.filter(|t| !t.is_empty()) {
        return title.to_string();
    }
    entries
        .iter()
        .find_map(|entry| match entry.as_slide() {
            Some(SlideRecord::Title(record)) => Some(record.title.clone()),
            _ => None,
        })
        .unwrap_or_else(|| FALLBACK_DOCUMENT_TITLE.to_string())
}

/// First line of the opening title slide, or [`DEFAULT_DECK_TITLE`].
pub fn extract_title(entries: &[DeckEntry]) -> String {
    match entries.first().and_then(DeckEntry::as_slide) {
        Some(SlideRecord::Title(record)) if !record.title.is_empty() => {
            record.title.split('\n').next().unwrap_or_default().to_string()
        }
        _ => DEFAULT_DECK_TITLE.to_string(),
    }
}

/// First run of 25 or more word or hyphen characters in `locator`.
pub fn extract_folder_id(locator: &str) -> Option<String> {
    FOLDER_ID.find(locator).map(|m| m.as_str().to_string())
}

/// Generate from a JSON array string and optional JSON settings, returning the URL.
///
/// The title comes from [`extract_title`].
pub fn create_presentation(
    service: &dyn DocumentService,
    slides_json: &str,
    settings_json: Option<&str>,
) -> Result<String, SlideError> {
    let entries = parse_deck(slides_json)?;
    let settings = match settings_json {
        Some(json) if !json.trim().is_empty() => Some(serde_json::from_str::<ThemeOverride>(json).map_err(SlideError::Parse)?),
        _ => None,
    };
    let options = GenerateOptions {
        title: Some(extract_title(&entries)),
        settings,
        ..Default::default()
    };
    PresentationGenerator::new(service)
        .generate(&entries, &options)
        .map(|report| report.url)
}
