mod common;

use serde_json::json;

use common::{deck, offline_service, FailingService, BASE_URL, FOLDER_ID};
use slide_generator_server::presentation::theme::ThemeOverride;
use slide_generator_server::presentation::{
    create_presentation, DocumentError, GenerateOptions, PageCleanup, PresentationGenerator, SlideError,
};

fn settings(patch: serde_json::Value) -> Option<ThemeOverride> {
    Some(serde_json::from_value(patch).unwrap())
}

#[test]
fn test_every_known_record_gets_one_labeled_page() {
    let service = offline_service();
    let entries = deck(json!([
        {"kind": "title", "title": "Quarterly Review", "date": "2024-04-01"},
        {"kind": "agenda", "title": "Agenda", "items": ["Results", "Plans"]},
        {"kind": "cards", "title": "Highlights", "items": ["Fast", {"title": "Cheap", "desc": "Low cost"}]},
        {"kind": "closing"}
    ]));

    let report = PresentationGenerator::new(&service)
        .generate(&entries, &GenerateOptions::default())
        .unwrap();

    assert_eq!(report.page_count, 4);
    let stored = service.document(&report.document_id).unwrap();
    let labels: Vec<bool> = ["title", "agenda", "cards", "closing"]
        .iter()
        .zip(&stored.pages)
        .map(|(kind, page)| page.find_text(&format!("Type: {}", kind)).is_some())
        .collect();
    assert_eq!(labels, vec![true; 4]);
    assert!(report.url.starts_with(&format!("{}/presentations/", BASE_URL)));
}

#[test]
fn test_unknown_kind_keeps_blank_page_when_counts_match() {
    let service = offline_service();
    let entries = deck(json!([
        {"kind": "unknown-x"},
        {"kind": "agenda", "title": "A"},
        {"type": "closing"}
    ]));

    let report = PresentationGenerator::new(&service)
        .generate(&entries, &GenerateOptions::default())
        .unwrap();

    assert_eq!(report.skipped, 1);
    assert_eq!(report.page_count, 3);
    let stored = service.document(&report.document_id).unwrap();
    assert!(stored.pages[0].elements.is_empty());
    assert!(stored.pages[1].find_text("Type: agenda").is_some());
    assert!(stored.pages[2].find_text("Type: closing").is_some());
}

#[test]
fn test_initial_pages_cleanup_drops_blank_page_after_skip() {
    let service = offline_service();
    let entries = deck(json!([
        {"kind": "unknown-x"},
        {"kind": "agenda", "title": "A"},
        {"type": "closing"}
    ]));
    let options = GenerateOptions {
        cleanup: PageCleanup::InitialPages,
        ..Default::default()
    };

    let report = PresentationGenerator::new(&service).generate(&entries, &options).unwrap();

    assert_eq!(report.skipped, 1);
    assert_eq!(report.page_count, 2);
    let stored = service.document(&report.document_id).unwrap();
    assert!(stored.pages[0].find_text("Type: agenda").is_some());
    assert!(stored.pages[1].find_text("Type: closing").is_some());
}

#[test]
fn test_footer_skips_first_document_page_by_default() {
    let service = offline_service();
    let entries = deck(json!([
        {"kind": "title", "title": "Deck"},
        {"kind": "section", "title": "Part 1", "sectionNo": 1},
        {"kind": "title", "title": "Second title"}
    ]));
    let options = GenerateOptions {
        settings: settings(json!({"footerText": "ACME Corp"})),
        ..Default::default()
    };

    let report = PresentationGenerator::new(&service).generate(&entries, &options).unwrap();
    let stored = service.document(&report.document_id).unwrap();

    // The skipped page is the blank one, which is then removed.
    assert_eq!(stored.pages.len(), 3);
    assert!(stored.pages.iter().all(|page| page.find_text("ACME Corp").is_some()));
}

#[test]
fn test_footer_skips_first_document_page_when_it_is_kept() {
    let service = offline_service();
    let entries = deck(json!([
        {"kind": "title", "title": "Deck"},
        {"kind": "nope"}
    ]));
    let options = GenerateOptions {
        settings: settings(json!({"footerText": "ACME Corp"})),
        ..Default::default()
    };

    let report = PresentationGenerator::new(&service).generate(&entries, &options).unwrap();
    let stored = service.document(&report.document_id).unwrap();

    assert_eq!(stored.pages.len(), 2);
    assert!(stored.pages[0].find_text("ACME Corp").is_none());
    assert!(stored.pages[1].find_text("ACME Corp").is_some());
}

#[test]
fn test_initial_pages_cleanup_skips_footer_on_leading_title() {
    let service = offline_service();
    let entries = deck(json!([
        {"kind": "title", "title": "Deck"},
        {"kind": "section", "title": "Part 1", "sectionNo": 1},
        {"kind": "title", "title": "Second title"}
    ]));
    let options = GenerateOptions {
        settings: settings(json!({"footerText": "ACME Corp"})),
        cleanup: PageCleanup::InitialPages,
        ..Default::default()
    };

    let report = PresentationGenerator::new(&service).generate(&entries, &options).unwrap();
    let stored = service.document(&report.document_id).unwrap();

    assert!(stored.pages[0].find_text("ACME Corp").is_none());
    assert!(stored.pages[1].find_text("ACME Corp").is_some());
    assert!(stored.pages[2].find_text("ACME Corp").is_some());
}

#[test]
fn test_empty_footer_draws_nothing() {
    let service = offline_service();
    let entries = deck(json!([{"kind": "agenda", "title": "A"}]));
    let options = GenerateOptions {
        settings: settings(json!({"footerText": ""})),
        ..Default::default()
    };

    let report = PresentationGenerator::new(&service).generate(&entries, &options).unwrap();
    let stored = service.document(&report.document_id).unwrap();
    assert_eq!(stored.pages[0].texts(), vec!["A", "Type: agenda"]);
}

#[test]
fn test_theme_override_reaches_renderers() {
    let service = offline_service();
    let entries = deck(json!([{"kind": "title", "title": "Deck"}]));
    let options = GenerateOptions {
        settings: settings(json!({"themeColor": "#112233", "fontFamily": "Roboto", "presetName": "corporate"})),
        ..Default::default()
    };

    let report = PresentationGenerator::new(&service).generate(&entries, &options).unwrap();
    let stored = service.document(&report.document_id).unwrap();
    let page = &stored.pages[0];

    assert_eq!(page.background.as_deref(), Some("#112233"));
    assert_eq!(
        page.find_text("Deck").unwrap().style.font_family.as_deref(),
        Some("Roboto")
    );
}

#[test]
fn test_notes_are_attached_to_their_page() {
    let service = offline_service();
    let entries = deck(json!([
        {"kind": "agenda", "title": "A", "notes": "Speak slowly"},
        {"kind": "closing", "notes": ""}
    ]));

    let report = PresentationGenerator::new(&service)
        .generate(&entries, &GenerateOptions::default())
        .unwrap();
    let stored = service.document(&report.document_id).unwrap();

    assert_eq!(stored.pages[0].notes.as_deref(), Some("Speak slowly"));
    assert_eq!(stored.pages[1].notes, None);
}

#[test]
fn test_relocation_moves_document() {
    let service = offline_service();
    let entries = deck(json!([{"kind": "closing"}]));
    let options = GenerateOptions {
        settings: settings(json!({
            "outputFolderLocator": format!("https://drive.example/folders/{}?usp=sharing", FOLDER_ID)
        })),
        ..Default::default()
    };

    let report = PresentationGenerator::new(&service).generate(&entries, &options).unwrap();
    let stored = service.document(&report.document_id).unwrap();
    assert_eq!(stored.folder.as_deref(), Some(FOLDER_ID));
}

#[test]
fn test_relocation_failure_is_swallowed() {
    let service = FailingService::relocation_only();
    let entries = deck(json!([{"kind": "closing"}]));
    let options = GenerateOptions {
        settings: settings(json!({"outputFolderUrl": format!("https://drive.example/folders/{}", FOLDER_ID)})),
        ..Default::default()
    };

    let report = PresentationGenerator::new(&service).generate(&entries, &options).unwrap();
    let stored = service.inner.document(&report.document_id).unwrap();
    assert_eq!(stored.folder, None);
}

#[test]
fn test_disallowed_folder_keeps_default_location() {
    let service = offline_service().with_allowed_folders(["some-other-folder-id-0000000000"]);
    let entries = deck(json!([{"kind": "closing"}]));
    let options = GenerateOptions {
        settings: settings(json!({"outputFolderLocator": FOLDER_ID})),
        ..Default::default()
    };

    let report = PresentationGenerator::new(&service).generate(&entries, &options).unwrap();
    assert_eq!(service.document(&report.document_id).unwrap().folder, None);
}

#[test]
fn test_document_creation_failure_aborts() {
    let service = FailingService::everything();
    let entries = deck(json!([{"kind": "closing"}]));

    let err = PresentationGenerator::new(&service)
        .generate(&entries, &GenerateOptions::default())
        .unwrap_err();
    assert!(matches!(err, SlideError::Document(DocumentError::DocumentNotFound(_))));
    assert!(err.user_message().starts_with("Slide generation failed: "));
}

#[test]
fn test_create_presentation_uses_first_title_line() {
    let service = offline_service();
    let slides = r#"[{"kind": "title", "title": "Roadmap\n2025 edition"}, {"kind": "closing"}]"#;

    let url = create_presentation(&service, slides, Some(r#"{"footerText": "Internal"}"#)).unwrap();

    let id = url.rsplit('/').next().unwrap();
    let stored = service.document(id).unwrap();
    assert_eq!(stored.title, "Roadmap");
    assert_eq!(stored.pages.len(), 2);
}

#[test]
fn test_malformed_input_creates_nothing() {
    let service = offline_service();

    let parse = create_presentation(&service, "[{\"kind\": ", None).unwrap_err();
    assert!(matches!(parse, SlideError::Parse(_)));

    let invalid = create_presentation(&service, r#"[{"kind": "closing"}, {"kind": "agenda", "items": 5}]"#, None)
        .unwrap_err();
    assert!(matches!(invalid, SlideError::InvalidRecord { kind: "agenda", .. }));

    assert_eq!(service.document_count(), 0);
}
