use super::*;
use crate::model::data::{NamedSet, NetworkData, Step, StepsData};

fn network(nodes: Vec<Node>, links: Vec<Link>) -> VisualizationData {
    VisualizationData::Network(NetworkData { nodes, links })
}

fn nodes_of(data: &VisualizationData) -> &[Node] {
    match data {
        VisualizationData::Network(net) => &net.nodes,
        other => panic!("expected network, got {}", other.kind()),
    }
}

fn links_of(data: &VisualizationData) -> &[Link] {
    match data {
        VisualizationData::Network(net) => &net.links,
        other => panic!("expected network, got {}", other.kind()),
    }
}

#[test]
fn truncate_label_keeps_exact_budget() {
    let long = "abcdefghijklmnopqrstuvwxyz";
    let short = truncate_label(long, 10).unwrap();
    assert_eq!(short.chars().count(), 10);
    assert_eq!(short, "abcdefghi…");
    assert_eq!(truncate_label("short", 10), None);
    assert_eq!(truncate_label(&short, 10), None);
}

#[test]
fn truncate_label_counts_chars_not_bytes() {
    let label = "ñ".repeat(12);
    let short = truncate_label(&label, 5).unwrap();
    assert_eq!(short, "ññññ…");
}

#[test]
fn fifty_nodes_in_split_are_trimmed_to_six() {
    let cfg = CanvasConfig::default();
    let nodes: Vec<Node> = (0..50)
        .map(|i| Node::new(format!("n{i}"), format!("Node {i}"), 10.0))
        .collect();
    let data = network(nodes, vec![]);
    let out = validate_and_fix(&data, RenderMode::Split, &cfg);
    assert!(out.report.valid, "{}", out.report);
    assert!(out.report.auto_fixed);
    assert_eq!(nodes_of(&out.data).len(), 6);
    // Equal sizes: the first six in input order survive.
    let ids: Vec<&str> = nodes_of(&out.data).iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, vec!["n0", "n1", "n2", "n3", "n4", "n5"]);
    // Input untouched.
    assert_eq!(nodes_of(&data).len(), 50);
}

#[test]
fn larger_nodes_are_kept_and_links_follow() {
    let cfg = CanvasConfig::default();
    let sizes = [5.0, 50.0, 10.0, 40.0, 10.0, 30.0, 20.0, 60.0];
    let nodes: Vec<Node> = sizes
        .iter()
        .enumerate()
        .map(|(i, &s)| Node::new(format!("n{i}"), "x", s))
        .collect();
    let links = vec![
        Link::new("n1", "n3"),
        Link::new("n0", "n1"),
        Link::new("n3", "n4"),
        Link::new("n7", "n5"),
    ];
    let out = validate_and_fix(&network(nodes, links), RenderMode::Split, &cfg);

    let ids: Vec<&str> = nodes_of(&out.data).iter().map(|n| n.id.as_str()).collect();
    // Sizes 60, 50, 40, 30, 20 and the first 10 (n2) survive, in input order.
    assert_eq!(ids, vec!["n1", "n2", "n3", "n5", "n6", "n7"]);
    let kept_links: Vec<(&str, &str)> = links_of(&out.data)
        .iter()
        .map(|l| (l.source.as_str(), l.target.as_str()))
        .collect();
    assert_eq!(kept_links, vec![("n1", "n3"), ("n7", "n5")]);
    assert!(out.report.valid);
}

#[test]
fn forty_char_label_is_cut_to_twenty() {
    let cfg = CanvasConfig::default();
    let data = network(vec![Node::new("a", "q".repeat(40), 20.0)], vec![]);
    let before = crate::validate::checks::validate(&data, RenderMode::Split, &cfg);
    assert!(before.has(IssueKind::LabelTooLong));

    let out = validate_and_fix(&data, RenderMode::Split, &cfg);
    assert_eq!(nodes_of(&out.data)[0].label.chars().count(), 20);
    assert!(out.report.warnings.is_empty());
    assert!(out.report.auto_fixed);
}

#[test]
fn sizes_and_positions_are_clamped() {
    let cfg = CanvasConfig::default();
    let data = network(
        vec![
            Node::new("a", "A", 500.0).at(5000.0, -20.0),
            Node::new("b", "B", f64::NAN).at(f64::NAN, 600.0),
        ],
        vec![],
    );
    let out = validate_and_fix(&data, RenderMode::Full, &cfg);
    let nodes = nodes_of(&out.data);
    assert_eq!(nodes[0].size, cfg.max_node_size);
    assert_eq!(nodes[0].position(), Some(Point::new(1870.0, 170.0)));
    assert_eq!(nodes[1].size, cfg.min_node_size);
    assert_eq!(nodes[1].position(), Some(Point::new(960.0, 600.0)));
    assert!(!out.report.has(IssueKind::OutOfBounds));
    assert!(!out.report.has(IssueKind::SizeOutOfRange));
}

#[test]
fn unrepairable_errors_are_surfaced() {
    let cfg = CanvasConfig::default();
    let data = network(
        vec![Node::new("a", "A", 20.0), Node::new("a", "A2", 20.0)],
        vec![Link::new("a", "missing")],
    );
    let out = validate_and_fix(&data, RenderMode::Full, &cfg);
    assert!(!out.report.valid);
    assert!(!out.report.auto_fixed);
    assert_eq!(out.report.count(IssueKind::DuplicateId), 1);
    assert_eq!(out.report.count(IssueKind::DanglingLink), 1);
    assert_eq!(out.data, data);
}

#[test]
fn second_pass_changes_nothing() {
    let cfg = CanvasConfig::default();
    let nodes: Vec<Node> = (0..9)
        .map(|i| Node::new(format!("n{i}"), "z".repeat(i * 5), 2.0 + i as f64).at(-1.0, 2000.0))
        .collect();
    let first = validate_and_fix(&network(nodes, vec![]), RenderMode::StepByStep, &cfg);
    assert!(first.report.auto_fixed);
    let second = validate_and_fix(&first.data, RenderMode::StepByStep, &cfg);
    assert!(!second.report.auto_fixed);
    assert_eq!(second.data, first.data);
}

#[test]
fn steps_are_trimmed_independently() {
    let cfg = CanvasConfig::default();
    let step = |n: usize| Step {
        title: None,
        nodes: (0..n)
            .map(|i| Node::new(format!("s{i}"), "s", 10.0))
            .collect(),
        links: vec![Link::new("s0", format!("s{}", n - 1))],
    };
    let data = VisualizationData::Steps(StepsData {
        steps: vec![step(3), step(8)],
    });
    let out = validate_and_fix(&data, RenderMode::StepByStep, &cfg);
    let VisualizationData::Steps(steps) = &out.data else {
        panic!("variant changed");
    };
    assert_eq!(steps.steps[0].nodes.len(), 3);
    assert_eq!(steps.steps[0].links.len(), 1);
    assert_eq!(steps.steps[1].nodes.len(), 5);
    assert!(steps.steps[1].links.is_empty());
    assert!(out.report.valid);
}

#[test]
fn comparison_drops_exclusive_elements_first() {
    let cfg = CanvasConfig::default();
    let set = |label: &str, range: std::ops::Range<u32>| NamedSet {
        label: label.into(),
        elements: range.map(|i| i.to_string()).collect(),
    };
    // a_only 0..12 (12), shared 12..15 (3), b_only 15..23 (8): union 23 > 20.
    let data = VisualizationData::Comparison(ComparisonData {
        set_a: set("A", 0..15),
        set_b: set("B", 12..23),
    });
    let out = validate_and_fix(&data, RenderMode::Split, &cfg);
    let VisualizationData::Comparison(cmp) = &out.data else {
        panic!("variant changed");
    };
    let counts = cmp.counts();
    assert_eq!(counts.union_size(), 20);
    assert_eq!(counts.a_only, 9);
    assert_eq!(counts.b_only, 8);
    assert_eq!(counts.intersection, 3);
    assert!(!cmp.set_a.elements.contains(&"11".to_string()));
    assert!(cmp.set_a.elements.contains(&"8".to_string()));
    assert!(!out.report.has(IssueKind::TooManyNodes));
    assert!(out.report.auto_fixed);
}

#[test]
fn comparison_labels_are_truncated_in_both_sets() {
    let cfg = CanvasConfig::default();
    let long = "photosynthesis-and-respiration".to_string();
    let data = VisualizationData::Comparison(ComparisonData {
        set_a: NamedSet {
            label: "Plants".into(),
            elements: vec![long.clone(), "roots".into()],
        },
        set_b: NamedSet {
            label: "Animals".into(),
            elements: vec![long, "lungs".into()],
        },
    });
    let out = validate_and_fix(&data, RenderMode::Split, &cfg);
    let VisualizationData::Comparison(cmp) = &out.data else {
        panic!("variant changed");
    };
    assert_eq!(cmp.set_a.elements[0], cmp.set_b.elements[0]);
    assert_eq!(cmp.set_a.elements[0].chars().count(), 20);
    assert_eq!(cmp.counts().intersection, 1);
    assert!(!out.report.has(IssueKind::LabelTooLong));
}
