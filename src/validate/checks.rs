//! Spatial checks over visualization data.
//!
//! Checks run in a fixed order (bounds, cardinality, label length,
//! referential integrity, collisions) and collect every finding instead of
//! stopping at the first one.

use std::collections::HashSet;

use crate::config::canvas::{CanvasConfig, ModeLimits, RenderMode};
use crate::foundation::core::{Point, Rect, rect_contains_closed};
use crate::layout::venn::{LayoutCalculator, VennLayout};
use crate::model::data::{ComparisonData, Link, NamedSet, Node, VisualizationData};
use crate::validate::report::{Issue, IssueKind, PathElem, ValidationReport};

/// One node/link collection plus the path it lives at.
struct Graph<'a> {
    path: Vec<PathElem>,
    nodes: &'a [Node],
    links: &'a [Link],
}

impl Graph<'_> {
    fn sub(&self, field: &'static str) -> Vec<PathElem> {
        let mut p = self.path.clone();
        p.push(PathElem::Field(field));
        p
    }

    fn item(&self, field: &'static str, idx: usize) -> Vec<PathElem> {
        let mut p = self.sub(field);
        p.push(PathElem::Index(idx));
        p
    }
}

struct Ctx<'a> {
    config: &'a CanvasConfig,
    mode: RenderMode,
    limits: ModeLimits,
    area: Rect,
    errors: Vec<Issue>,
    warnings: Vec<Issue>,
}

impl Ctx<'_> {
    fn error(&mut self, kind: IssueKind, path: &[PathElem], message: impl Into<String>) {
        self.errors.push(Issue::at(kind, path, message));
    }

    fn warn(&mut self, kind: IssueKind, path: &[PathElem], message: impl Into<String>) {
        self.warnings.push(Issue::at(kind, path, message));
    }
}

/// Validates `data` against `mode` without modifying it.
#[tracing::instrument(level = "debug", skip(data, config), fields(kind = data.kind()))]
pub fn validate(data: &VisualizationData, mode: RenderMode, config: &CanvasConfig) -> ValidationReport {
    let mut ctx = Ctx {
        config,
        mode,
        limits: config.limits(mode),
        area: config.safe_area_for(mode),
        errors: Vec::new(),
        warnings: Vec::new(),
    };

    match data {
        VisualizationData::Network(net) => {
            let graphs = [Graph {
                path: Vec::new(),
                nodes: &net.nodes,
                links: &net.links,
            }];
            validate_graphs(&mut ctx, &graphs);
        }
        VisualizationData::Steps(steps) => {
            let graphs: Vec<Graph<'_>> = steps
                .steps
                .iter()
                .enumerate()
                .map(|(i, step)| Graph {
                    path: vec![PathElem::Field("steps"), PathElem::Index(i)],
                    nodes: &step.nodes,
                    links: &step.links,
                })
                .collect();
            validate_graphs(&mut ctx, &graphs);
        }
        VisualizationData::Comparison(cmp) => validate_comparison(&mut ctx, cmp),
    }

    let report = ValidationReport::new(mode, ctx.errors, ctx.warnings);
    tracing::debug!(
        valid = report.valid,
        errors = report.errors.len(),
        warnings = report.warnings.len(),
        "validated"
    );
    report
}

fn validate_graphs(ctx: &mut Ctx<'_>, graphs: &[Graph<'_>]) {
    for g in graphs {
        check_bounds(ctx, g);
    }
    for g in graphs {
        check_cardinality(ctx, g);
    }
    for g in graphs {
        check_labels(ctx, g);
    }
    for g in graphs {
        check_references(ctx, g);
    }
    for g in graphs {
        check_collisions(ctx, g);
    }
}

fn check_bounds(ctx: &mut Ctx<'_>, g: &Graph<'_>) {
    let area = ctx.area;
    let (min_size, max_size) = (ctx.config.min_node_size, ctx.config.max_node_size);
    for (i, node) in g.nodes.iter().enumerate() {
        if let Some(p) = node.position()
            && !rect_contains_closed(area, p)
        {
            ctx.error(
                IssueKind::OutOfBounds,
                &g.item("nodes", i),
                format!(
                    "node '{}' at ({:.1}, {:.1}) lies outside the {} safe area {}",
                    node.id,
                    p.x,
                    p.y,
                    ctx.mode,
                    describe_rect(area)
                ),
            );
        }
        if !node.size.is_finite() || node.size < min_size || node.size > max_size {
            ctx.warn(
                IssueKind::SizeOutOfRange,
                &g.item("nodes", i),
                format!(
                    "node '{}' size {} is outside [{min_size}, {max_size}]",
                    node.id, node.size
                ),
            );
        }
    }
}

fn check_cardinality(ctx: &mut Ctx<'_>, g: &Graph<'_>) {
    let max = ctx.limits.max_nodes;
    if g.nodes.len() > max {
        let msg = format!(
            "{} nodes exceed the {} mode limit of {max}",
            g.nodes.len(),
            ctx.mode
        );
        ctx.error(IssueKind::TooManyNodes, &g.sub("nodes"), msg);
    }
}

fn check_labels(ctx: &mut Ctx<'_>, g: &Graph<'_>) {
    let max = ctx.limits.max_label_chars;
    for (i, node) in g.nodes.iter().enumerate() {
        let len = node.label.chars().count();
        if len > max {
            let mut path = g.item("nodes", i);
            path.push(PathElem::Field("label"));
            ctx.warn(
                IssueKind::LabelTooLong,
                &path,
                format!("label of node '{}' has {len} chars (max {max})", node.id),
            );
        }
    }
}

fn check_references(ctx: &mut Ctx<'_>, g: &Graph<'_>) {
    let mut ids = HashSet::<&str>::new();
    for (i, node) in g.nodes.iter().enumerate() {
        if !ids.insert(node.id.as_str()) {
            let mut path = g.item("nodes", i);
            path.push(PathElem::Field("id"));
            ctx.error(
                IssueKind::DuplicateId,
                &path,
                format!("duplicate node id '{}'", node.id),
            );
        }
    }

    for (j, link) in g.links.iter().enumerate() {
        for (field, id) in [("source", &link.source), ("target", &link.target)] {
            if !ids.contains(id.as_str()) {
                let mut path = g.item("links", j);
                path.push(PathElem::Field(field));
                ctx.error(
                    IssueKind::DanglingLink,
                    &path,
                    format!("link {field} '{id}' does not name a node"),
                );
            }
        }
    }
}

/// Bounding-circle approximation: text boxes are not measured.
fn check_collisions(ctx: &mut Ctx<'_>, g: &Graph<'_>) {
    let margin = ctx.config.collision_margin;
    let placed: Vec<(usize, &Node, Point)> = g
        .nodes
        .iter()
        .enumerate()
        .filter_map(|(i, n)| n.position().map(|p| (i, n, p)))
        .collect();

    for (a_idx, &(_, a, pa)) in placed.iter().enumerate() {
        for &(j, b, pb) in &placed[a_idx + 1..] {
            let required = visual_radius(a.size) + visual_radius(b.size) + margin;
            let dist = pa.distance(pb);
            if dist < required {
                ctx.warn(
                    IssueKind::PredictedCollision,
                    &g.item("nodes", j),
                    format!(
                        "nodes '{}' and '{}' are predicted to collide \
                         (distance {dist:.1} < {required:.1})",
                        a.id, b.id
                    ),
                );
            }
        }
    }
}

fn visual_radius(size: f64) -> f64 {
    if size.is_finite() { size.max(0.0) } else { 0.0 }
}

fn validate_comparison(ctx: &mut Ctx<'_>, cmp: &ComparisonData) {
    let members = cmp.regions();
    let counts = members.counts();

    // 1. Bounds of the computed placements.
    let layout = match LayoutCalculator::new(ctx.config).compute_layout_in(ctx.area, counts) {
        Ok(layout) => Some(layout),
        Err(err) => {
            ctx.error(
                IssueKind::LayoutFailed,
                &[],
                format!("comparison cannot be laid out: {err}"),
            );
            None
        }
    };
    if let Some(layout) = &layout {
        let area = ctx.area;
        for placement in &layout.placements {
            if !rect_contains_closed(area, placement.position) {
                let elem = members
                    .get(placement.key.region)
                    .get(placement.key.index)
                    .copied()
                    .unwrap_or_default();
                let msg = format!(
                    "element '{elem}' placed at ({:.1}, {:.1}) outside the {} safe area {}",
                    placement.position.x,
                    placement.position.y,
                    ctx.mode,
                    describe_rect(area)
                );
                ctx.error(IssueKind::OutOfBounds, &[], msg);
            }
        }
    }

    // 2. Cardinality of the union.
    let union = counts.union_size();
    let max = ctx.limits.max_set_elements;
    if union > max {
        let msg = format!(
            "comparison has {union} distinct elements, exceeding the {} mode limit of {max}",
            ctx.mode
        );
        ctx.error(IssueKind::TooManyNodes, &[], msg);
    }

    // 3. Label length of set names and elements.
    check_set_labels(ctx, &cmp.set_a, "setA");
    check_set_labels(ctx, &cmp.set_b, "setB");

    // 5. Collisions between placed labels; no margin, boxes may touch.
    if let Some(layout) = &layout {
        check_label_collisions(ctx, layout);
        for w in &layout.warnings {
            ctx.warn(IssueKind::LayoutAdvisory, &[], w.clone());
        }
    }
}

fn check_set_labels(ctx: &mut Ctx<'_>, set: &NamedSet, field: &'static str) {
    let max = ctx.limits.max_label_chars;
    let len = set.label.chars().count();
    if len > max {
        ctx.warn(
            IssueKind::LabelTooLong,
            &[PathElem::Field(field), PathElem::Field("label")],
            format!("set label has {len} chars (max {max})"),
        );
    }
    for (i, e) in set.elements.iter().enumerate() {
        let len = e.chars().count();
        if len > max {
            ctx.warn(
                IssueKind::LabelTooLong,
                &[
                    PathElem::Field(field),
                    PathElem::Field("elements"),
                    PathElem::Index(i),
                ],
                format!("element label has {len} chars (max {max})"),
            );
        }
    }
}

fn check_label_collisions(ctx: &mut Ctx<'_>, layout: &VennLayout) {
    let placements = &layout.placements;
    for (i, a) in placements.iter().enumerate() {
        for b in &placements[i + 1..] {
            let required = layout.label_radius(a.key.region) + layout.label_radius(b.key.region);
            let dist = a.position.distance(b.position);
            if dist < required {
                ctx.warn(
                    IssueKind::PredictedCollision,
                    &[],
                    format!(
                        "{} #{} and {} #{} labels are predicted to collide \
                         (distance {dist:.1} < {required:.1})",
                        a.key.region.as_str(),
                        a.key.index,
                        b.key.region.as_str(),
                        b.key.index
                    ),
                );
            }
        }
    }
}

fn describe_rect(r: Rect) -> String {
    format!("[{:.0}..{:.0}]x[{:.0}..{:.0}]", r.x0, r.x1, r.y0, r.y1)
}

#[cfg(test)]
#[path = "../../tests/unit/validate/checks.rs"]
mod tests;
