use super::*;
use crate::model::data::{NetworkData, Step, StepsData};

fn network(nodes: Vec<Node>, links: Vec<Link>) -> VisualizationData {
    VisualizationData::Network(NetworkData { nodes, links })
}

fn unplaced(n: usize) -> Vec<Node> {
    (0..n)
        .map(|i| Node::new(format!("n{i}"), format!("Node {i}"), 20.0))
        .collect()
}

#[test]
fn clean_network_is_valid() {
    let cfg = CanvasConfig::default();
    let data = network(
        vec![
            Node::new("a", "Alpha", 20.0).at(400.0, 400.0),
            Node::new("b", "Beta", 20.0).at(800.0, 400.0),
        ],
        vec![Link::new("a", "b")],
    );
    let report = validate(&data, RenderMode::Full, &cfg);
    assert!(report.valid, "{report}");
    assert!(report.errors.is_empty());
    assert!(report.warnings.is_empty());
    assert!(!report.auto_fixed);
}

#[test]
fn too_many_nodes_in_split_is_one_error() {
    let cfg = CanvasConfig::default();
    let report = validate(&network(unplaced(50), vec![]), RenderMode::Split, &cfg);
    assert!(!report.valid);
    assert_eq!(report.errors.len(), 1);
    assert_eq!(report.errors[0].kind, IssueKind::TooManyNodes);
    assert_eq!(
        report.error_messages(),
        vec!["$.nodes: 50 nodes exceed the split mode limit of 6".to_string()]
    );
}

#[test]
fn position_outside_split_half_is_an_error() {
    let cfg = CanvasConfig::default();
    // Inside the full safe area, left of the split-mode half.
    let data = network(vec![Node::new("a", "A", 20.0).at(300.0, 500.0)], vec![]);
    assert!(validate(&data, RenderMode::Full, &cfg).valid);
    let report = validate(&data, RenderMode::Split, &cfg);
    assert_eq!(report.errors.len(), 1);
    assert_eq!(report.errors[0].kind, IssueKind::OutOfBounds);
    assert!(report.error_messages()[0].starts_with("$.nodes[0]: node 'a'"));
}

#[test]
fn title_zone_is_not_safe() {
    let cfg = CanvasConfig::default();
    let data = network(vec![Node::new("t", "T", 20.0).at(960.0, 100.0)], vec![]);
    let report = validate(&data, RenderMode::Full, &cfg);
    assert_eq!(report.count(IssueKind::OutOfBounds), 1);
}

#[test]
fn long_label_is_a_warning_only() {
    let cfg = CanvasConfig::default();
    let label = "x".repeat(40);
    let data = network(vec![Node::new("a", label, 20.0)], vec![]);
    let report = validate(&data, RenderMode::Split, &cfg);
    assert!(report.valid);
    assert_eq!(report.warnings.len(), 1);
    assert_eq!(
        report.warning_messages()[0],
        "$.nodes[0].label: label of node 'a' has 40 chars (max 20)"
    );
}

#[test]
fn dangling_links_and_duplicate_ids_are_errors() {
    let cfg = CanvasConfig::default();
    let data = network(
        vec![
            Node::new("a", "A", 20.0),
            Node::new("a", "A again", 20.0),
        ],
        vec![Link::new("a", "ghost"), Link::new("nobody", "a")],
    );
    let report = validate(&data, RenderMode::Full, &cfg);
    assert_eq!(
        report.error_messages(),
        vec![
            "$.nodes[1].id: duplicate node id 'a'".to_string(),
            "$.links[0].target: link target 'ghost' does not name a node".to_string(),
            "$.links[1].source: link source 'nobody' does not name a node".to_string(),
        ]
    );
}

#[test]
fn close_nodes_predict_a_collision() {
    let cfg = CanvasConfig::default();
    let data = network(
        vec![
            Node::new("a", "A", 20.0).at(500.0, 500.0),
            Node::new("b", "B", 20.0).at(540.0, 500.0),
            Node::new("c", "C", 20.0).at(900.0, 500.0),
            Node::new("d", "D", 20.0),
        ],
        vec![],
    );
    let report = validate(&data, RenderMode::Full, &cfg);
    assert!(report.valid);
    assert_eq!(report.count(IssueKind::PredictedCollision), 1);
    assert!(report.warning_messages()[0].contains("'a' and 'b'"));
}

#[test]
fn size_outside_range_warns() {
    let cfg = CanvasConfig::default();
    let data = network(
        vec![
            Node::new("big", "Big", 500.0),
            Node::new("nan", "NaN", f64::NAN),
        ],
        vec![],
    );
    let report = validate(&data, RenderMode::Full, &cfg);
    assert!(report.valid);
    assert_eq!(report.count(IssueKind::SizeOutOfRange), 2);
}

#[test]
fn findings_follow_check_order() {
    let cfg = CanvasConfig::default();
    let mut nodes = unplaced(7);
    nodes[0] = Node::new("n0", "y".repeat(30), 20.0).at(0.0, 0.0);
    nodes[1] = nodes[1].clone().at(600.0, 600.0);
    nodes[2] = nodes[2].clone().at(610.0, 600.0);
    let data = network(nodes, vec![Link::new("n0", "zz")]);
    let report = validate(&data, RenderMode::Split, &cfg);
    let kinds: Vec<IssueKind> = report.errors.iter().map(|i| i.kind).collect();
    assert_eq!(
        kinds,
        vec![
            IssueKind::OutOfBounds,
            IssueKind::OutOfBounds,
            IssueKind::OutOfBounds,
            IssueKind::TooManyNodes,
            IssueKind::DanglingLink,
        ]
    );
    let warnings: Vec<IssueKind> = report.warnings.iter().map(|i| i.kind).collect();
    assert_eq!(
        warnings,
        vec![IssueKind::LabelTooLong, IssueKind::PredictedCollision]
    );
}

#[test]
fn steps_are_limited_per_step() {
    let cfg = CanvasConfig::default();
    let data = VisualizationData::Steps(StepsData {
        steps: vec![
            Step {
                title: Some("intro".into()),
                nodes: unplaced(5),
                links: vec![],
            },
            Step {
                title: None,
                nodes: unplaced(7),
                links: vec![Link::new("n0", "n9")],
            },
        ],
    });
    let report = validate(&data, RenderMode::StepByStep, &cfg);
    assert_eq!(
        report.error_messages(),
        vec![
            "$.steps[1].nodes: 7 nodes exceed the stepByStep mode limit of 5".to_string(),
            "$.steps[1].links[0].target: link target 'n9' does not name a node".to_string(),
        ]
    );
}

#[test]
fn comparison_is_laid_out_and_checked() {
    let cfg = CanvasConfig::default();
    let data = VisualizationData::Comparison(ComparisonData {
        set_a: NamedSet {
            label: "Multiples of two".into(),
            elements: ["2", "4", "6", "8"].map(String::from).to_vec(),
        },
        set_b: NamedSet {
            label: "Multiples of three".into(),
            elements: ["3", "6", "9"].map(String::from).to_vec(),
        },
    });
    let report = validate(&data, RenderMode::Split, &cfg);
    assert!(report.valid, "{report}");
    assert!(!report.has(IssueKind::OutOfBounds));
}

#[test]
fn oversized_comparison_is_an_error() {
    let cfg = CanvasConfig::default();
    let data = VisualizationData::Comparison(ComparisonData {
        set_a: NamedSet {
            label: "A".into(),
            elements: (0..15).map(|i| i.to_string()).collect(),
        },
        set_b: NamedSet {
            label: "B".into(),
            elements: (10..25).map(|i| i.to_string()).collect(),
        },
    });
    let report = validate(&data, RenderMode::Split, &cfg);
    assert_eq!(report.count(IssueKind::TooManyNodes), 1);
    assert!(report.error_messages()[0].contains("25 distinct elements"));
}

#[test]
fn empty_comparison_cannot_be_laid_out() {
    let cfg = CanvasConfig::default();
    let data = VisualizationData::Comparison(ComparisonData::default());
    let report = validate(&data, RenderMode::Full, &cfg);
    assert!(!report.valid);
    assert_eq!(report.errors[0].kind, IssueKind::LayoutFailed);
    assert!(report.error_messages()[0].starts_with("comparison cannot be laid out"));
}

#[test]
fn report_renders_for_logs() {
    let cfg = CanvasConfig::default();
    let report = validate(&network(unplaced(8), vec![]), RenderMode::Split, &cfg);
    let text = report.to_string();
    assert!(text.starts_with("validation report (mode=split): INVALID, 1 error(s), 0 warning(s)"));
    assert!(text.contains("\n  error   $.nodes: 8 nodes exceed"));
}
