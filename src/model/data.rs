use std::collections::HashSet;

use crate::foundation::core::Point;
use crate::layout::venn::{Region, VennCounts};

fn default_node_size() -> f64 {
    20.0
}

/// Visualization payload handed from the content pipeline to the renderer.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum VisualizationData {
    /// Nodes and links, optionally pre-positioned.
    Network(NetworkData),
    /// A sequence of small networks revealed one after another.
    Steps(StepsData),
    /// Two named sets drawn as a two-circle diagram.
    Comparison(ComparisonData),
}

impl VisualizationData {
    pub fn kind(&self) -> &'static str {
        match self {
            VisualizationData::Network(_) => "network",
            VisualizationData::Steps(_) => "steps",
            VisualizationData::Comparison(_) => "comparison",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct NetworkData {
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub links: Vec<Link>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Node {
    pub id: String,
    pub label: String,
    /// Visual radius in pixels; larger nodes are kept first when trimming.
    #[serde(default = "default_node_size")]
    pub size: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
}

impl Node {
    pub fn new(id: impl Into<String>, label: impl Into<String>, size: f64) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            size,
            x: None,
            y: None,
        }
    }

    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.x = Some(x);
        self.y = Some(y);
        self
    }

    /// Position once both coordinates are assigned.
    pub fn position(&self) -> Option<Point> {
        Some(Point::new(self.x?, self.y?))
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Link {
    pub source: String,
    pub target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Link {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            label: None,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StepsData {
    pub steps: Vec<Step>,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Step {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub links: Vec<Link>,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct NamedSet {
    pub label: String,
    pub elements: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonData {
    pub set_a: NamedSet,
    pub set_b: NamedSet,
}

/// Elements of a comparison split by region, each in first-appearance
/// order (shared elements in `set_a` order). Repeats are ignored.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegionMembers<'a> {
    pub a_only: Vec<&'a str>,
    pub shared: Vec<&'a str>,
    pub b_only: Vec<&'a str>,
}

impl<'a> RegionMembers<'a> {
    pub fn counts(&self) -> VennCounts {
        VennCounts::new(self.a_only.len(), self.b_only.len(), self.shared.len())
    }

    pub fn get(&self, region: Region) -> &[&'a str] {
        match region {
            Region::AOnly => &self.a_only,
            Region::Shared => &self.shared,
            Region::BOnly => &self.b_only,
        }
    }
}

impl ComparisonData {
    pub fn regions(&self) -> RegionMembers<'_> {
        let in_a: HashSet<&str> = self.set_a.elements.iter().map(String::as_str).collect();
        let in_b: HashSet<&str> = self.set_b.elements.iter().map(String::as_str).collect();

        let mut seen = HashSet::new();
        let mut members = RegionMembers::default();
        for e in &self.set_a.elements {
            if !seen.insert(e.as_str()) {
                continue;
            }
            if in_b.contains(e.as_str()) {
                members.shared.push(e);
            } else {
                members.a_only.push(e);
            }
        }
        for e in &self.set_b.elements {
            if !in_a.contains(e.as_str()) && seen.insert(e.as_str()) {
                members.b_only.push(e);
            }
        }
        members
    }

    pub fn counts(&self) -> VennCounts {
        self.regions().counts()
    }
}
