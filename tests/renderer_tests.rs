mod common;

use serde_json::{json, Value};
use std::f64::consts::PI;

use common::{deck, offline_service, recording_service};
use slide_generator_server::presentation::document::{DocumentService, Rect, ShapeKind};
use slide_generator_server::presentation::memory::{Element, StoredDocument};
use slide_generator_server::presentation::registry;
use slide_generator_server::presentation::{GenerateOptions, PresentationGenerator};

fn render(service: &dyn DocumentService, slides: Value) -> String {
    let entries = deck(slides);
    PresentationGenerator::new(service)
        .generate(&entries, &GenerateOptions::default())
        .expect("deck should render")
        .document_id
}

fn render_one(record: Value) -> StoredDocument {
    let service = offline_service();
    let id = render(&service, json!([record]));
    service.document(&id).unwrap()
}

#[test]
fn test_every_kind_renders_with_minimal_record() {
    for kind in registry::kinds() {
        let stored = render_one(json!({"kind": kind, "title": "Minimal"}));
        assert_eq!(stored.pages.len(), 1, "kind {}", kind);
        assert!(
            stored.pages[0].find_text(&format!("Type: {}", kind)).is_some(),
            "kind {} is not labeled",
            kind
        );
    }
}

#[test]
fn test_populated_deck_renders_one_page_per_record() {
    let slides = json!([
        {"kind": "title", "title": "Product Launch", "date": "2024-06-01"},
        {"kind": "agenda", "title": "Agenda", "items": ["Market", "Product", "Plan"]},
        {"kind": "section", "title": "Market", "sectionNo": 1},
        {"kind": "compare", "title": "Options", "leftTitle": "Build", "rightTitle": "Buy",
         "leftItems": ["Control", "Cost"], "rightItems": ["Speed"]},
        {"kind": "parallelHorizontal", "title": "Pillars",
         "items": [{"title": "People"}, {"title": "Process", "desc": "Lean"}, {"title": "Tools"}]},
        {"kind": "areaRange", "title": "Scope", "ranges": ["Core", "Extended", "Ecosystem"]},
        {"kind": "inclusionHier", "title": "Org", "parent": "Company", "children": ["Sales", "R&D"]},
        {"kind": "compareTable", "title": "Versus",
         "items": [{"label": "Price", "a": "$10", "b": "$12"}]},
        {"kind": "interaction", "title": "Sync", "left": "Client", "right": "Server", "desc": "REST"},
        {"kind": "transition", "title": "Change", "before": "Manual", "after": "Automated"},
        {"kind": "flowHorizontal", "title": "Flow", "steps": ["Plan", "Build", "Ship"]},
        {"kind": "cycleCircular", "title": "Loop",
         "items": [{"label": "Plan"}, {"label": "Do"}, {"label": "Check"}, {"label": "Act"}],
         "centerText": "PDCA"},
        {"kind": "pyramidDown", "title": "Funnel",
         "levels": [{"title": "Visitors"}, {"title": "Leads"}, {"title": "Customers"}]},
        {"kind": "treeDiagram", "title": "Tree", "items": [{"title": "Root"}, {"title": "Leaf"}]},
        {"kind": "vennDiagram", "title": "Overlap", "items": [{"title": "A"}, {"title": "B"}]},
        {"kind": "multiplyEffect", "title": "Synergy", "items": ["Reach", "Trust"], "result": "Growth"},
        {"kind": "barGraph", "title": "Revenue", "data": "Q1: 10, Q2: 20, Q3: 15"},
        {"kind": "pieGraph", "title": "Share", "data": "Us: 40, Them: 60"},
        {"kind": "lineGraph", "title": "Trend", "trend": "up"},
        {"kind": "priceTable", "title": "Plans", "plans": ["Free", "Pro", "Team"]},
        {"kind": "qaSection", "title": "Q&A", "items": [{"q": "When?", "a": "Soon"}]},
        {"kind": "stepUp", "title": "Growth",
         "items": [{"title": "Seed"}, {"title": "Scale"}, {"title": "Lead"}]},
        {"kind": "content", "title": "Notes", "twoColumn": true, "columns": [["a", "b"], ["c"]]},
        {"kind": "timeline", "title": "Milestones",
         "milestones": [{"label": "Alpha", "date": "Q1", "state": "done"},
                        {"label": "Beta", "date": "Q2", "state": "next"}]},
        {"kind": "diagram", "title": "Lanes", "lanes": [{"title": "Ops", "items": ["Deploy"]}]},
        {"kind": "table", "title": "Grid", "headers": ["Name", "Score"], "rows": [["Ann", "9"]]},
        {"kind": "progress", "title": "Progress", "items": [{"label": "Build", "percent": 70}]},
        {"kind": "kpi", "title": "KPIs", "columns": 2,
         "items": [{"label": "NPS", "value": "62", "change": "+4", "status": "good"}]},
        {"kind": "statsCompare", "title": "Stats", "leftTitle": "2023", "rightTitle": "2024",
         "stats": [{"label": "Users", "leftValue": "10k", "rightValue": "14k", "trend": "up"}]},
        {"kind": "barCompare", "title": "Bars", "showTrends": true,
         "stats": [{"label": "Users", "leftValue": "10", "rightValue": "14", "trend": "down"}]},
        {"kind": "flowChart", "title": "Paths", "flows": [{"steps": ["A", "B"]}, {"steps": ["C"]}]},
        {"kind": "ganttChart", "title": "Plan",
         "header": {"groups": ["H1", "H2"], "periods": [1, 2, 3, 4], "totalPeriods": 4},
         "rows": [{"taskName": "Design", "bars": [{"startIndex": 0, "span": 2}]},
                  {"taskName": "Build", "bars": [{"startIndex": 2, "span": 2, "color": "#10B981"}]}]},
        {"kind": "closing", "title": "Thanks"}
    ]);
    let expected = slides.as_array().unwrap().len();

    let service = offline_service();
    let id = render(&service, slides);
    let stored = service.document(&id).unwrap();

    assert_eq!(stored.pages.len(), expected);
}

#[test]
fn test_chart_combine_draws_bars_on_its_own_page() {
    let stored = render_one(json!({"kind": "chartCombine", "title": "Combined"}));

    assert_eq!(stored.pages.len(), 1);
    let texts = stored.pages[0].texts();
    for expected in ["Combined", "2023", "2024", "2025", "100", "150", "210"] {
        assert!(texts.contains(&expected), "missing {}", expected);
    }
}

#[test]
fn test_bar_heights_scale_to_the_largest_value() {
    let stored = render_one(json!({"kind": "barGraph", "title": "Bars", "data": "A: 50, B: 100"}));
    let primary_bars: Vec<f64> = stored.pages[0]
        .shapes()
        .filter(|s| s.fill.as_deref() == Some("#bebebe"))
        .map(|s| s.bounds.height)
        .collect();

    assert_eq!(primary_bars, vec![100.0, 200.0]);
}

#[test]
fn test_image_text_placeholder_when_fetch_fails() {
    let stored = render_one(json!({
        "kind": "imageText",
        "title": "Screenshot",
        "image": "https://img.example/shot.png",
        "points": ["Fast"]
    }));
    let page = &stored.pages[0];

    assert!(page.find_text("[Image]").is_some());
    assert!(!page.elements.iter().any(|e| matches!(e, Element::Image(_))));
}

#[test]
fn test_image_text_embeds_fetched_image() {
    let (service, fetcher) = recording_service();
    let id = render(
        &service,
        json!([{
            "kind": "imageText",
            "title": "Screenshot",
            "image": "https://img.example/shot.png",
            "imagePosition": "right",
            "imageCaption": "Dashboard"
        }]),
    );
    let stored = service.document(&id).unwrap();
    let page = &stored.pages[0];

    assert_eq!(*fetcher.requested.lock(), vec!["https://img.example/shot.png".to_string()]);
    assert!(page.elements.iter().any(|e| matches!(e, Element::Image(_))));
    assert!(page.find_text("[Image]").is_none());
    assert!(page.find_text("Dashboard").is_some());
}

#[test]
fn test_compare_table_header_row() {
    let stored = render_one(json!({
        "kind": "compareTable",
        "title": "Versus",
        "items": [{"label": "Support", "a": "24/7", "b": "Business hours"}]
    }));
    let table = stored.pages[0].tables().next().unwrap();

    assert_eq!(table.rows, 2);
    assert_eq!(table.cell(0, 0).unwrap().text, "Item");
    assert_eq!(table.cell(0, 0).unwrap().fill.as_deref(), Some("#bebebe"));
    assert_eq!(table.cell(1, 2).unwrap().text, "Business hours");
}

#[test]
fn test_invalid_gantt_bar_color_fails_the_run() {
    let service = offline_service();
    let entries = deck(json!([{
        "kind": "ganttChart",
        "title": "Plan",
        "header": {"totalPeriods": 2},
        "rows": [{"taskName": "Build", "bars": [{"startIndex": 0, "span": 1, "color": "blue"}]}]
    }]));

    let result = PresentationGenerator::new(&service).generate(&entries, &GenerateOptions::default());
    assert!(result.is_err());
}

fn close(actual: f64, expected: f64) -> bool {
    (actual - expected).abs() < 1e-6
}

fn ring_angle(step: f64, count: usize) -> f64 {
    step / count as f64 * 2.0 * PI - PI / 2.0
}

fn center(bounds: &Rect) -> (f64, f64) {
    (bounds.left + bounds.width / 2.0, bounds.top + bounds.height / 2.0)
}

#[test]
fn test_cycle_nodes_sit_on_the_ring_with_arrows_between() {
    let stored = render_one(json!({
        "kind": "cycle",
        "title": "Loop",
        "items": [{"label": "Plan"}, {"label": "Do"}, {"label": "Check"}, {"label": "Act"}]
    }));
    let page = &stored.pages[0];
    let (cx, cy, radius) = (230.0, 245.0, 110.0);

    let nodes: Vec<&Rect> = page
        .shapes()
        .filter(|s| s.kind == ShapeKind::Ellipse)
        .map(|s| &s.bounds)
        .collect();
    assert_eq!(nodes.len(), 4);
    let expected = [(192.5, 97.5), (302.5, 207.5), (192.5, 317.5), (82.5, 207.5)];
    for (node, (left, top)) in nodes.iter().zip(expected) {
        assert!(close(node.left, left) && close(node.top, top), "node at {:?}", node);
        assert_eq!((node.width, node.height), (75.0, 75.0));
    }
    for (i, node) in nodes.iter().enumerate() {
        let (x, y) = center(node);
        let angle = ring_angle(i as f64, 4);
        assert!(close(x, cx + radius * angle.cos()) && close(y, cy + radius * angle.sin()));
    }

    let arrows: Vec<&Rect> = page
        .shapes()
        .filter(|s| s.text == "▸")
        .map(|s| &s.bounds)
        .collect();
    assert_eq!(arrows.len(), 4);
    for (i, arrow) in arrows.iter().enumerate() {
        let (x, y) = center(arrow);
        let mid = ring_angle(i as f64 + 0.5, 4);
        assert!(close(x, cx + (radius + 10.0) * mid.cos()), "arrow {} x", i);
        assert!(close(y, cy + (radius + 10.0) * mid.sin()), "arrow {} y", i);
    }
}

#[test]
fn test_cycle_circular_arrows_point_along_the_ring() {
    let stored = render_one(json!({
        "kind": "cycleCircular",
        "title": "Loop",
        "items": [{"label": "A"}, {"label": "B"}, {"label": "C"}]
    }));
    let page = &stored.pages[0];
    let (cx, cy) = (360.0, 240.0);

    let circles: Vec<&Rect> = page
        .shapes()
        .filter(|s| s.kind == ShapeKind::Ellipse)
        .map(|s| &s.bounds)
        .collect();
    assert_eq!(circles.len(), 3);
    for (i, circle) in circles.iter().enumerate() {
        let (x, y) = center(circle);
        let angle = ring_angle(i as f64, 3);
        assert!(close(x, cx + 120.0 * angle.cos()) && close(y, cy + 120.0 * angle.sin()));
    }

    let arrows: Vec<_> = page
        .shapes()
        .filter(|s| s.kind == ShapeKind::CurvedRightArrow)
        .collect();
    assert_eq!(arrows.len(), 3);
    for (i, arrow) in arrows.iter().enumerate() {
        let mid = (ring_angle(i as f64, 3) + ring_angle(i as f64 + 1.0, 3)) / 2.0;
        let (x, y) = center(&arrow.bounds);
        assert!(close(x, cx + 130.0 * mid.cos()) && close(y, cy + 130.0 * mid.sin()));
        assert!(close(arrow.rotation, mid.to_degrees() + 90.0));
    }
}

#[test]
fn test_gantt_bars_follow_period_width() {
    let stored = render_one(json!({
        "kind": "ganttChart",
        "title": "Plan",
        "header": {"periods": [1, 2, 3, 4], "totalPeriods": 4},
        "rows": [
            {"taskName": "Design", "bars": [{"startIndex": 1, "span": 2}]},
            {"taskName": "Build", "bars": [{"startIndex": 0, "span": 1}, {"startIndex": 3, "span": 1, "color": "#10B981"}]}
        ]
    }));
    let bars: Vec<_> = stored.pages[0]
        .shapes()
        .filter(|s| s.kind == ShapeKind::RoundRectangle)
        .collect();

    // Label column of 140pt leaves 500pt for 4 periods of 125pt.
    let placed: Vec<(f64, f64, f64, f64)> = bars
        .iter()
        .map(|b| (b.bounds.left, b.bounds.top, b.bounds.width, b.bounds.height))
        .collect();
    assert_eq!(
        placed,
        vec![
            (305.0, 153.0, 250.0, 16.0),
            (180.0, 181.0, 125.0, 16.0),
            (555.0, 181.0, 125.0, 16.0),
        ]
    );
    assert_eq!(bars[0].fill.as_deref(), Some("#3B82F6"));
    assert_eq!(bars[2].fill.as_deref(), Some("#10B981"));
}

fn card_rects(stored: &StoredDocument) -> Vec<Rect> {
    stored.pages[0]
        .shapes()
        .filter(|s| s.kind == ShapeKind::Rectangle && s.fill.as_deref() == Some("#F8FAFC"))
        .map(|s| s.bounds)
        .collect()
}

#[test]
fn test_cards_fill_rows_then_columns() {
    let stored = render_one(json!({
        "kind": "cards",
        "title": "Grid",
        "columns": 2,
        "items": ["a", "b", "c", "d", "e"]
    }));
    let cards = card_rects(&stored);

    assert_eq!(cards.len(), 5);
    for (i, card) in cards.iter().enumerate() {
        let (row, col) = (i / 2, i % 2);
        assert_eq!(card.left, 40.0 + col as f64 * 327.0, "card {}", i);
        assert_eq!(card.top, 95.0 + row as f64 * 98.0, "card {}", i);
        assert_eq!((card.width, card.height), (312.0, 90.0));
    }
}

#[test]
fn test_card_height_is_capped() {
    let stored = render_one(json!({"kind": "cards", "title": "Few", "items": ["a", "b"]}));
    let cards = card_rects(&stored);

    assert_eq!(cards.len(), 2);
    assert!(cards.iter().all(|card| card.height == 100.0));
    assert_eq!(cards[1].left, 40.0 + 203.0 + 15.0);
}

#[test]
fn test_pyramid_levels_widen_proportionally() {
    let stored = render_one(json!({
        "kind": "pyramid",
        "title": "Needs",
        "levels": [
            {"title": "Top", "description": "t"},
            {"title": "Middle", "description": "m"},
            {"title": "Base", "description": "b"}
        ]
    }));
    let page = &stored.pages[0];

    for (i, title) in ["Top", "Middle", "Base"].iter().enumerate() {
        let level = page.find_text(title).unwrap();
        let width = 120.0 + 160.0 * (i + 1) as f64 / 3.0;
        assert!(close(level.bounds.width, width), "{} width", title);
        assert!(close(level.bounds.left, 230.0 - width / 2.0), "{} left", title);
        assert!(close(level.bounds.top, 110.0 + i as f64 * 90.0), "{} top", title);
        assert_eq!(level.kind, ShapeKind::Rectangle);
    }
}
