//! Slide records: the typed input of the engine.
//!
//! Each record is a JSON object whose `kind` (or legacy `type`) tag selects a
//! layout. Field parsing is lenient: anything missing falls back to an empty
//! default, so a renderer always gets a fully-populated payload.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use super::SlideError;

/// Treat an explicit `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// ============================================================================
// Shared item types
// ============================================================================

/// A titled item with an optional description.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TitledItem {
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    pub desc: Option<String>,
}

impl TitledItem {
    pub fn desc(&self) -> &str {
        self.desc.as_deref().unwrap_or("")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CycleItem {
    pub label: String,
    pub sub_label: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PyramidLevel {
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QaItem {
    pub q: String,
    pub a: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MilestoneState {
    Done,
    Next,
    #[default]
    Todo,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Milestone {
    pub label: String,
    pub date: String,
    pub state: Option<MilestoneState>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Lane {
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    pub items: Vec<String>,
}

/// A card is either bare text or a titled item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CardEntry {
    Text(String),
    Titled(TitledItem),
}

impl CardEntry {
    pub fn title(&self) -> &str {
        match self {
            CardEntry::Text(text) => text,
            CardEntry::Titled(item) => &item.title,
        }
    }

    pub fn desc(&self) -> Option<&str> {
        match self {
            CardEntry::Text(_) => None,
            CardEntry::Titled(item) => item.desc.as_deref(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressItem {
    pub label: String,
    pub percent: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KpiStatus {
    Good,
    Bad,
    #[default]
    Neutral,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KpiItem {
    pub label: String,
    pub value: String,
    pub change: String,
    pub status: KpiStatus,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    #[default]
    Neutral,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StatItem {
    pub label: String,
    pub left_value: String,
    pub right_value: String,
    pub trend: Option<Trend>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompareRow {
    pub label: String,
    pub a: String,
    pub b: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Flow {
    pub steps: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImagePosition {
    #[default]
    Left,
    Right,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GanttHeader {
    pub groups: Vec<String>,
    pub periods: Vec<f64>,
    pub total_periods: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GanttBar {
    pub start_index: f64,
    pub span: f64,
    pub color: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GanttRow {
    pub task_name: String,
    pub bars: Vec<GanttBar>,
}

// ============================================================================
// Record payloads
// ============================================================================

macro_rules! payload {
    ($(#[$meta:meta])* $name:ident { $($(#[$fmeta:meta])* $field:ident : $ty:ty),* $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
        #[serde(rename_all = "camelCase", default)]
        pub struct $name {
            #[serde(deserialize_with = "null_as_default")]
            pub title: String,
            pub subhead: Option<String>,
            pub notes: Option<String>,
            $($(#[$fmeta])* pub $field: $ty,)*
        }
    };
}

payload!(TitleSlide { date: String });
payload!(AgendaSlide { items: Vec<String> });
payload!(SectionSlide { section_no: Option<u32> });
payload!(ClosingSlide {});
payload!(ContentSlide {
    points: Vec<String>,
    two_column: bool,
    columns: Vec<Vec<String>>,
});
payload!(
    /// Two-sided comparison shared by `compare`, `compareScale` and `compareItem`.
    CompareSlide {
        left_title: String,
        right_title: String,
        left_items: Vec<String>,
        right_items: Vec<String>,
    }
);
payload!(CompareTableSlide { items: Vec<CompareRow> });
payload!(InteractionSlide { left: String, right: String, desc: String });
payload!(TransitionSlide { before: String, after: String });
payload!(
    /// An ordered list of steps.
    StepsSlide { steps: Vec<String> }
);
payload!(TimelineSlide { milestones: Vec<Milestone> });
payload!(DiagramSlide { lanes: Vec<Lane> });
payload!(CycleSlide { items: Vec<CycleItem>, center_text: Option<String> });
payload!(CardsSlide { columns: Option<usize>, items: Vec<CardEntry> });
payload!(
    /// Titled items: bullet cards, parallels, matrix, tree, triangle, step-up.
    ItemsSlide {
        columns: Option<usize>,
        items: Vec<TitledItem>,
    }
);
payload!(TableSlide { headers: Vec<String>, rows: Vec<Vec<String>> });
payload!(ProgressSlide { items: Vec<ProgressItem> });
payload!(QuoteSlide { text: String, author: String });
payload!(KpiSlide { columns: Option<usize>, items: Vec<KpiItem> });
payload!(QaSlide { items: Vec<QaItem> });
payload!(StatsSlide {
    left_title: String,
    right_title: String,
    stats: Vec<StatItem>,
    show_trends: bool,
});
payload!(PyramidSlide { levels: Vec<PyramidLevel> });
payload!(FlowChartSlide { flows: Vec<Flow> });
payload!(ImageTextSlide {
    image: String,
    image_caption: Option<String>,
    image_position: ImagePosition,
    points: Vec<String>,
});
payload!(VennSlide { items: Vec<TitledItem> });
payload!(FormulaSlide { formula: String });
payload!(MultiplySlide { items: Vec<String>, result: String });
payload!(
    /// A plain list of strings.
    ListSlide { items: Vec<String> }
);
payload!(AreaRangeSlide { ranges: Vec<String> });
payload!(InclusionSlide { parent: String, children: Vec<String> });
payload!(ChartSlide { data: String });
payload!(LineGraphSlide { trend: String });
payload!(ChartCombineSlide {
    #[serde(rename = "type_label")]
    type_label: String,
});
payload!(CaptureZoomSlide { zoom_point: String });
payload!(PriceTableSlide { plans: Vec<String> });
payload!(LocationMapSlide { locations: Vec<String> });
payload!(ScheduleSlide { duration: String });
payload!(RankingSlide { rank: Vec<String> });
payload!(CaseStudySlide { issue: String, result: String });
payload!(QuoteImpactSlide { quote: String, author: String });
payload!(GanttSlide { header: GanttHeader, rows: Vec<GanttRow> });

// ============================================================================
// Kind registry
// ============================================================================

macro_rules! slide_kinds {
    ($($variant:ident => $tag:literal ($payload:ty)),+ $(,)?) => {
        /// Every registered slide kind.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum SlideKind {
            $($variant),+
        }

        impl SlideKind {
            /// All kinds in registry order.
            pub const ALL: &'static [SlideKind] = &[$(SlideKind::$variant),+];

            /// The tag used in input records.
            pub fn as_str(self) -> &'static str {
                match self {
                    $(SlideKind::$variant => $tag),+
                }
            }
        }

        /// A decoded record of a registered kind.
        #[derive(Debug, Clone, PartialEq)]
        pub enum SlideRecord {
            $($variant($payload)),+
        }

        impl SlideRecord {
            pub fn kind(&self) -> SlideKind {
                match self {
                    $(SlideRecord::$variant(_) => SlideKind::$variant),+
                }
            }

            /// Speaker notes attached to the record.
            pub fn notes(&self) -> Option<&str> {
                match self {
                    $(SlideRecord::$variant(record) => record.notes.as_deref()),+
                }
            }

            fn decode(kind: SlideKind, value: Value) -> Result<Self, serde_json::Error> {
                Ok(match kind {
                    $(SlideKind::$variant => SlideRecord::$variant(serde_json::from_value(value)?)),+
                })
            }
        }
    };
}

slide_kinds! {
    Title => "title" (TitleSlide),
    Agenda => "agenda" (AgendaSlide),
    Section => "section" (SectionSlide),
    Closing => "closing" (ClosingSlide),
    Compare => "compare" (CompareSlide),
    ParallelHorizontal => "parallelHorizontal" (ItemsSlide),
    ParallelVertical => "parallelVertical" (ItemsSlide),
    ParallelMultiple => "parallelMultiple" (ItemsSlide),
    AreaRange => "areaRange" (AreaRangeSlide),
    OverlapInfo => "overlapInfo" (ListSlide),
    InclusionHier => "inclusionHier" (InclusionSlide),
    CompareScale => "compareScale" (CompareSlide),
    CompareItem => "compareItem" (CompareSlide),
    CompareTable => "compareTable" (CompareTableSlide),
    Interaction => "interaction" (InteractionSlide),
    Transition => "transition" (TransitionSlide),
    FlowHorizontal => "flowHorizontal" (StepsSlide),
    FlowVertical => "flowVertical" (StepsSlide),
    CaptureFlow => "captureFlow" (StepsSlide),
    Cycle => "cycle" (CycleSlide),
    CycleCircular => "cycleCircular" (CycleSlide),
    CycleSquare => "cycleSquare" (CycleSlide),
    Pyramid => "pyramid" (PyramidSlide),
    PyramidUp => "pyramidUp" (PyramidSlide),
    PyramidDown => "pyramidDown" (PyramidSlide),
    TreeDiagram => "treeDiagram" (ItemsSlide),
    MatrixPos => "matrixPos" (ItemsSlide),
    VennDiagram => "vennDiagram" (VennSlide),
    RankingBoard => "rankingBoard" (RankingSlide),
    FormulaLogic => "formulaLogic" (FormulaSlide),
    MultiplyEffect => "multiplyEffect" (MultiplySlide),
    AddCombination => "addCombination" (ListSlide),
    BarGraph => "barGraph" (ChartSlide),
    PieGraph => "pieGraph" (ChartSlide),
    LineGraph => "lineGraph" (LineGraphSlide),
    ChartCombine => "chartCombine" (ChartCombineSlide),
    CaptureList => "captureList" (ListSlide),
    CaptureZoom => "captureZoom" (CaptureZoomSlide),
    PriceTable => "priceTable" (PriceTableSlide),
    TableDetail => "tableDetail" (ClosingSlide),
    CaseStudyInfo => "caseStudyInfo" (CaseStudySlide),
    QaSection => "qaSection" (QaSlide),
    LocationMap => "locationMap" (LocationMapSlide),
    ScheduleTable => "scheduleTable" (ScheduleSlide),
    QuoteImpact => "quoteImpact" (QuoteImpactSlide),
    BulletCards => "bulletCards" (ItemsSlide),
    Process => "process" (StepsSlide),
    Triangle => "triangle" (ItemsSlide),
    HeaderCards => "headerCards" (ItemsSlide),
    StepUp => "stepUp" (ItemsSlide),
    Content => "content" (ContentSlide),
    ProcessList => "processList" (StepsSlide),
    Timeline => "timeline" (TimelineSlide),
    Diagram => "diagram" (DiagramSlide),
    Cards => "cards" (CardsSlide),
    Table => "table" (TableSlide),
    Progress => "progress" (ProgressSlide),
    Quote => "quote" (QuoteSlide),
    Kpi => "kpi" (KpiSlide),
    Faq => "faq" (QaSlide),
    StatsCompare => "statsCompare" (StatsSlide),
    BarCompare => "barCompare" (StatsSlide),
    FlowChart => "flowChart" (FlowChartSlide),
    ImageText => "imageText" (ImageTextSlide),
    GanttChart => "ganttChart" (GanttSlide),
}

impl std::fmt::Display for SlideKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for SlideKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

// ============================================================================
// Deck entries
// ============================================================================

/// One input record after decoding.
#[derive(Debug, Clone, PartialEq)]
pub enum DeckEntry {
    Slide(SlideRecord),
    /// The tag as given (empty when the record had none).
    Unknown(String),
}

impl DeckEntry {
    /// Decode one JSON record. Unregistered tags become [`DeckEntry::Unknown`];
    /// a registered tag with malformed fields is an error.
    pub fn from_value(value: Value) -> Result<Self, SlideError> {
        let tag = record_tag(&value).unwrap_or_default().to_string();
        let Some(kind) = super::registry::lookup(&tag) else {
            return Ok(DeckEntry::Unknown(tag));
        };
        SlideRecord::decode(kind, value)
            .map(DeckEntry::Slide)
            .map_err(|source| SlideError::InvalidRecord {
                kind: kind.as_str(),
                source,
            })
    }

    pub fn tag(&self) -> &str {
        match self {
            DeckEntry::Slide(record) => record.kind().as_str(),
            DeckEntry::Unknown(tag) => tag,
        }
    }

    pub fn as_slide(&self) -> Option<&SlideRecord> {
        match self {
            DeckEntry::Slide(record) => Some(record),
            DeckEntry::Unknown(_) => None,
        }
    }
}

/// The discriminator of a raw record: `kind`, else `type`.
pub fn record_tag(value: &Value) -> Option<&str> {
    value
        .get("kind")
        .and_then(Value::as_str)
        .or_else(|| value.get("type").and_then(Value::as_str))
}

/// Decode a list of raw records.
pub fn deck_from_values(values: Vec<Value>) -> Result<Vec<DeckEntry>, SlideError> {
    values.into_iter().map(DeckEntry::from_value).collect()
}

/// Parse a JSON array of records.
pub fn parse_deck(json: &str) -> Result<Vec<DeckEntry>, SlideError> {
    let values: Vec<Value> = serde_json::from_str(json).map_err(SlideError::Parse)?;
    deck_from_values(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_kind_and_type_tags() {
        let by_kind = DeckEntry::from_value(json!({"kind": "agenda", "title": "T", "items": ["a"]})).unwrap();
        let by_type = DeckEntry::from_value(json!({"type": "agenda", "title": "T", "items": ["a"]})).unwrap();
        assert_eq!(by_kind, by_type);
        assert_eq!(by_kind.tag(), "agenda");
    }

    #[test]
    fn test_unknown_and_missing_tags() {
        assert_eq!(
            DeckEntry::from_value(json!({"kind": "unknown-x"})).unwrap(),
            DeckEntry::Unknown("unknown-x".to_string())
        );
        assert_eq!(
            DeckEntry::from_value(json!({"title": "no tag"})).unwrap(),
            DeckEntry::Unknown(String::new())
        );
        assert_eq!(
            DeckEntry::from_value(json!({"kind": "Title"})).unwrap(),
            DeckEntry::Unknown("Title".to_string())
        );
    }

    #[test]
    fn test_missing_fields_default() {
        let entry = DeckEntry::from_value(json!({"kind": "compare"})).unwrap();
        match entry.as_slide() {
            Some(SlideRecord::Compare(record)) => {
                assert!(record.title.is_empty());
                assert!(record.left_items.is_empty());
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_null_titles_default_to_empty() {
        let entry = DeckEntry::from_value(json!({
            "kind": "pyramid",
            "title": null,
            "levels": [{"title": null, "description": "Base"}]
        }))
        .unwrap();
        let Some(SlideRecord::Pyramid(pyramid)) = entry.as_slide() else {
            panic!("expected pyramid");
        };
        assert!(pyramid.title.is_empty());
        assert!(pyramid.levels[0].title.is_empty());
        assert_eq!(pyramid.levels[0].description, "Base");

        let entry = DeckEntry::from_value(json!({"kind": "cards", "title": null, "items": [{"title": null}]})).unwrap();
        assert!(entry.as_slide().is_some());
    }

    #[test]
    fn test_wrong_field_type_is_invalid_record() {
        let err = DeckEntry::from_value(json!({"kind": "agenda", "items": "not a list"})).unwrap_err();
        assert!(matches!(err, SlideError::InvalidRecord { kind: "agenda", .. }));
    }

    #[test]
    fn test_card_entries_accept_strings_and_objects() {
        let entry = DeckEntry::from_value(json!({
            "kind": "cards",
            "items": ["plain", {"title": "Titled", "desc": "More"}]
        }))
        .unwrap();
        let Some(SlideRecord::Cards(cards)) = entry.as_slide() else {
            panic!("expected cards");
        };
        assert_eq!(cards.items[0].title(), "plain");
        assert_eq!(cards.items[0].desc(), None);
        assert_eq!(cards.items[1].title(), "Titled");
        assert_eq!(cards.items[1].desc(), Some("More"));
    }

    #[test]
    fn test_camel_case_fields_and_notes() {
        let json = r##"[
            {"type": "ganttChart", "title": "Plan",
             "header": {"groups": ["Q1"], "periods": [1, 2, 3], "totalPeriods": 3},
             "rows": [{"taskName": "Build", "bars": [{"startIndex": 0, "span": 2, "color": "#10B981"}]}],
             "notes": "Walk through the plan"},
            {"type": "chartCombine", "title": "Mix", "type_label": "Bar + Line"}
        ]"##;
        let deck = parse_deck(json).unwrap();
        let Some(SlideRecord::GanttChart(gantt)) = deck[0].as_slide() else {
            panic!("expected gantt");
        };
        assert_eq!(gantt.header.total_periods, Some(3.0));
        assert_eq!(gantt.rows[0].task_name, "Build");
        assert_eq!(gantt.rows[0].bars[0].span, 2.0);
        assert_eq!(deck[0].as_slide().and_then(SlideRecord::notes), Some("Walk through the plan"));
        let Some(SlideRecord::ChartCombine(combine)) = deck[1].as_slide() else {
            panic!("expected chartCombine");
        };
        assert_eq!(combine.type_label, "Bar + Line");
    }

    #[test]
    fn test_parse_error() {
        assert!(matches!(parse_deck("{not json"), Err(SlideError::Parse(_))));
        assert!(matches!(parse_deck(r#"{"kind": "title"}"#), Err(SlideError::Parse(_))));
    }

    #[test]
    fn test_registry_has_every_kind_once() {
        assert_eq!(SlideKind::ALL.len(), 65);
        let mut tags: Vec<_> = SlideKind::ALL.iter().map(|k| k.as_str()).collect();
        tags.sort_unstable();
        tags.dedup();
        assert_eq!(tags.len(), SlideKind::ALL.len());
    }
}
