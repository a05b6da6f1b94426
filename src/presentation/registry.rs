//! Kind registry: tag lookup and renderer dispatch.
//!
//! Provides `lookup()` for decoding and `render()` for drawing a decoded record.

use std::collections::HashMap;

use lazy_static::lazy_static;

use super::primitives::Canvas;
use super::records::{SlideKind, SlideRecord};
use super::renderers::{
    basic, cards, charts, compare, cycle, detail, diagram, flow, gantt, hierarchy, layout, logic,
    narrative, special, RenderResult,
};

lazy_static! {
    static ref KINDS_BY_TAG: HashMap<&'static str, SlideKind> = SlideKind::ALL
        .iter()
        .map(|kind| (kind.as_str(), *kind))
        .collect();
}

/// Resolve a record tag. Matching is exact and case-sensitive.
pub fn lookup(tag: &str) -> Option<SlideKind> {
    KINDS_BY_TAG.get(tag).copied()
}

/// Every registered tag, in registry order.
pub fn kinds() -> Vec<&'static str> {
    SlideKind::ALL.iter().map(|kind| kind.as_str()).collect()
}

/// Draw `record` onto the canvas page, then attach its speaker notes.
pub fn render(record: &SlideRecord, canvas: &mut Canvas<'_>) -> RenderResult {
    use SlideRecord as R;

    match record {
        R::Title(data) => basic::title(canvas, data),
        R::Agenda(data) => basic::agenda(canvas, data),
        R::Section(data) => basic::section(canvas, data),
        R::Closing(data) => basic::closing(canvas, data),
        R::Compare(data) => compare::compare(canvas, data),
        R::ParallelHorizontal(data) => layout::parallel_horizontal(canvas, data),
        R::ParallelVertical(data) => layout::parallel_vertical(canvas, data),
        R::ParallelMultiple(data) => layout::parallel_multiple(canvas, data),
        R::AreaRange(data) => layout::area_range(canvas, data),
        R::OverlapInfo(data) => layout::overlap_info(canvas, data),
        R::InclusionHier(data) => layout::inclusion_hier(canvas, data),
        R::CompareScale(data) => compare::compare_scale(canvas, data),
        R::CompareItem(data) => compare::compare_item(canvas, data),
        R::CompareTable(data) => compare::compare_table(canvas, data),
        R::Interaction(data) => compare::interaction(canvas, data),
        R::Transition(data) => compare::transition(canvas, data),
        R::FlowHorizontal(data) => flow::flow_horizontal(canvas, data),
        R::FlowVertical(data) => flow::flow_vertical(canvas, data),
        R::CaptureFlow(data) => flow::capture_flow(canvas, data),
        R::Cycle(data) => cycle::cycle(canvas, data),
        R::CycleCircular(data) => cycle::cycle_circular(canvas, data),
        R::CycleSquare(data) => cycle::cycle_square(canvas, data),
        R::Pyramid(data) => hierarchy::pyramid(canvas, data),
        R::PyramidUp(data) => hierarchy::pyramid_up(canvas, data),
        R::PyramidDown(data) => hierarchy::pyramid_down(canvas, data),
        R::TreeDiagram(data) => hierarchy::tree_diagram(canvas, data),
        R::MatrixPos(data) => diagram::matrix_pos(canvas, data),
        R::VennDiagram(data) => diagram::venn_diagram(canvas, data),
        R::RankingBoard(data) => diagram::ranking_board(canvas, data),
        R::FormulaLogic(data) => logic::formula_logic(canvas, data),
        R::MultiplyEffect(data) => logic::multiply_effect(canvas, data),
        R::AddCombination(data) => logic::add_combination(canvas, data),
        R::BarGraph(data) => charts::bar_graph(canvas, data),
        R::PieGraph(data) => charts::pie_graph(canvas, data),
        R::LineGraph(data) => charts::line_graph(canvas, data),
        R::ChartCombine(data) => charts::chart_combine(canvas, data),
        R::CaptureList(data) => detail::capture_list(canvas, data),
        R::CaptureZoom(data) => detail::capture_zoom(canvas, data),
        R::PriceTable(data) => detail::price_table(canvas, data),
        R::TableDetail(data) => detail::table_detail(canvas, data),
        R::CaseStudyInfo(data) => detail::case_study_info(canvas, data),
        R::QaSection(data) => detail::qa_section(canvas, data),
        R::LocationMap(data) => special::location_map(canvas, data),
        R::ScheduleTable(data) => special::schedule_table(canvas, data),
        R::QuoteImpact(data) => special::quote_impact(canvas, data),
        R::BulletCards(data) => cards::bullet_cards(canvas, data),
        R::Process(data) => flow::process(canvas, data),
        R::Triangle(data) => hierarchy::triangle(canvas, data),
        R::HeaderCards(data) => cards::header_cards(canvas, data),
        R::StepUp(data) => hierarchy::step_up(canvas, data),
        R::Content(data) => narrative::content(canvas, data),
        R::ProcessList(data) => narrative::process_list(canvas, data),
        R::Timeline(data) => narrative::timeline(canvas, data),
        R::Diagram(data) => narrative::diagram(canvas, data),
        R::Cards(data) => cards::cards(canvas, data),
        R::Table(data) => narrative::table(canvas, data),
        R::Progress(data) => narrative::progress(canvas, data),
        R::Quote(data) => narrative::quote(canvas, data),
        R::Kpi(data) => cards::kpi(canvas, data),
        R::Faq(data) => narrative::faq(canvas, data),
        R::StatsCompare(data) => compare::stats_compare(canvas, data),
        R::BarCompare(data) => compare::bar_compare(canvas, data),
        R::FlowChart(data) => narrative::flow_chart(canvas, data),
        R::ImageText(data) => narrative::image_text(canvas, data),
        R::GanttChart(data) => gantt::gantt_chart(canvas, data),
    }?;

    if let Some(notes) = record.notes().filter(|n| !n.is_empty()) {
        canvas.note(notes)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_every_kind() {
        for kind in SlideKind::ALL {
            assert_eq!(lookup(kind.as_str()), Some(*kind));
        }
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        assert_eq!(lookup("barGraph"), Some(SlideKind::BarGraph));
        assert_eq!(lookup("bargraph"), None);
        assert_eq!(lookup(""), None);
    }

    #[test]
    fn test_kinds_in_registry_order() {
        let tags = kinds();
        assert_eq!(tags.len(), 65);
        assert_eq!(tags.first(), Some(&"title"));
        assert_eq!(tags.last(), Some(&"ganttChart"));
    }
}
