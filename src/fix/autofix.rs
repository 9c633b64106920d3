//! Deterministic repair of visualization data.
//!
//! Repairs only what the validator reported, in a fixed order: truncate
//! labels, drop excess nodes, clamp sizes, clamp positions. The input is
//! never modified; a repaired copy is returned with a fresh report.

use std::collections::HashSet;

use crate::config::canvas::{CanvasConfig, RenderMode};
use crate::foundation::core::{Point, Rect, clamp_into};
use crate::model::data::{ComparisonData, Link, Node, VisualizationData};
use crate::validate::checks::validate;
use crate::validate::report::{IssueKind, ValidationReport};

/// Appended to truncated labels.
pub const TRUNCATION_MARKER: char = '…';

#[derive(Clone, Debug, PartialEq)]
pub struct FixOutcome {
    pub data: VisualizationData,
    pub report: ValidationReport,
}

/// Validates `data`, repairs what the fixed policy can repair, and
/// validates again. Never fails: anything left unrepaired stays in
/// `report.errors`.
#[tracing::instrument(level = "debug", skip(data, config), fields(kind = data.kind()))]
pub fn validate_and_fix(
    data: &VisualizationData,
    mode: RenderMode,
    config: &CanvasConfig,
) -> FixOutcome {
    let before = validate(data, mode, config);
    let limits = config.limits(mode);
    let mut fixed = data.clone();
    let mut changed = false;

    if before.has(IssueKind::LabelTooLong) {
        changed |= truncate_labels(&mut fixed, limits.max_label_chars);
    }
    if before.has(IssueKind::TooManyNodes) {
        changed |= match &mut fixed {
            VisualizationData::Network(net) => {
                drop_excess_nodes(&mut net.nodes, &mut net.links, limits.max_nodes)
            }
            VisualizationData::Steps(steps) => steps.steps.iter_mut().fold(false, |acc, step| {
                drop_excess_nodes(&mut step.nodes, &mut step.links, limits.max_nodes) | acc
            }),
            VisualizationData::Comparison(cmp) => {
                drop_excess_elements(cmp, limits.max_set_elements)
            }
        };
    }
    if before.has(IssueKind::SizeOutOfRange) {
        changed |= for_each_node(&mut fixed, |node| {
            clamp_size(node, config.min_node_size, config.max_node_size)
        });
    }
    if before.has(IssueKind::OutOfBounds) {
        let area = config.safe_area_for(mode);
        changed |= for_each_node(&mut fixed, |node| clamp_position(node, area));
    }

    let mut report = validate(&fixed, mode, config);
    report.auto_fixed = changed;
    tracing::debug!(
        changed,
        errors_before = before.errors.len(),
        errors_after = report.errors.len(),
        "auto-fix pass finished"
    );
    FixOutcome {
        data: fixed,
        report,
    }
}

/// Shortens `label` to `max_chars` chars, the last being
/// [`TRUNCATION_MARKER`]. Returns `None` when it already fits.
pub fn truncate_label(label: &str, max_chars: usize) -> Option<String> {
    if label.chars().count() <= max_chars {
        return None;
    }
    let mut out: String = label.chars().take(max_chars.saturating_sub(1)).collect();
    out.push(TRUNCATION_MARKER);
    Some(out)
}

fn truncate_in_place(label: &mut String, max_chars: usize) -> bool {
    match truncate_label(label, max_chars) {
        Some(short) => {
            *label = short;
            true
        }
        None => false,
    }
}

fn truncate_labels(data: &mut VisualizationData, max_chars: usize) -> bool {
    match data {
        VisualizationData::Comparison(cmp) => {
            let mut changed = false;
            for set in [&mut cmp.set_a, &mut cmp.set_b] {
                changed |= truncate_in_place(&mut set.label, max_chars);
                for e in &mut set.elements {
                    changed |= truncate_in_place(e, max_chars);
                }
            }
            changed
        }
        _ => for_each_node(data, |node| truncate_in_place(&mut node.label, max_chars)),
    }
}

fn for_each_node(data: &mut VisualizationData, mut f: impl FnMut(&mut Node) -> bool) -> bool {
    let mut changed = false;
    match data {
        VisualizationData::Network(net) => {
            for node in &mut net.nodes {
                changed |= f(node);
            }
        }
        VisualizationData::Steps(steps) => {
            for node in steps.steps.iter_mut().flat_map(|s| s.nodes.iter_mut()) {
                changed |= f(node);
            }
        }
        VisualizationData::Comparison(_) => {}
    }
    changed
}

/// Keeps the `max` largest nodes (ties by input order) in their original
/// order and drops links that touched a removed node.
fn drop_excess_nodes(nodes: &mut Vec<Node>, links: &mut Vec<Link>, max: usize) -> bool {
    if nodes.len() <= max {
        return false;
    }

    let priority = |n: &Node| if n.size.is_finite() { n.size } else { f64::NEG_INFINITY };
    let mut order: Vec<usize> = (0..nodes.len()).collect();
    // Stable sort keeps input order among equal sizes.
    order.sort_by(|&a, &b| priority(&nodes[b]).total_cmp(&priority(&nodes[a])));
    let mut keep = vec![false; nodes.len()];
    for &idx in &order[..max] {
        keep[idx] = true;
    }

    let mut idx = 0;
    let mut dropped = Vec::new();
    nodes.retain(|n| {
        let k = keep[idx];
        idx += 1;
        if !k {
            dropped.push(n.id.clone());
        }
        k
    });

    let kept: HashSet<&str> = nodes.iter().map(|n| n.id.as_str()).collect();
    let gone: HashSet<&str> = dropped
        .iter()
        .map(String::as_str)
        .filter(|id| !kept.contains(id))
        .collect();
    links.retain(|l| !gone.contains(l.source.as_str()) && !gone.contains(l.target.as_str()));

    tracing::trace!(dropped = dropped.len(), "dropped lowest-priority nodes");
    true
}

/// Drops elements until the union fits: trailing exclusive elements of the
/// larger exclusive region first, shared elements last.
fn drop_excess_elements(cmp: &mut ComparisonData, max: usize) -> bool {
    let members = cmp.regions();
    let counts = members.counts();
    let mut excess = counts.union_size().saturating_sub(max);
    if excess == 0 {
        return false;
    }

    let (mut a_left, mut b_left, mut shared_left) =
        (counts.a_only, counts.b_only, counts.intersection);
    while excess > 0 {
        if a_left > 0 && a_left >= b_left {
            a_left -= 1;
        } else if b_left > 0 {
            b_left -= 1;
        } else {
            shared_left -= 1;
        }
        excess -= 1;
    }

    let removed: HashSet<String> = members.a_only[a_left..]
        .iter()
        .chain(&members.b_only[b_left..])
        .chain(&members.shared[shared_left..])
        .map(|s| s.to_string())
        .collect();
    for set in [&mut cmp.set_a, &mut cmp.set_b] {
        set.elements.retain(|e| !removed.contains(e));
    }
    true
}

fn clamp_size(node: &mut Node, min: f64, max: f64) -> bool {
    let clamped = if node.size.is_nan() {
        min
    } else {
        node.size.clamp(min, max)
    };
    if clamped == node.size {
        return false;
    }
    node.size = clamped;
    true
}

fn clamp_position(node: &mut Node, area: Rect) -> bool {
    let Some(p) = node.position() else {
        return false;
    };
    let center = area.center();
    let finite = Point::new(
        if p.x.is_nan() { center.x } else { p.x },
        if p.y.is_nan() { center.y } else { p.y },
    );
    let clamped = clamp_into(area, finite);
    if clamped == p {
        return false;
    }
    node.x = Some(clamped.x);
    node.y = Some(clamped.y);
    true
}

#[cfg(test)]
#[path = "../../tests/unit/fix/autofix.rs"]
mod tests;
