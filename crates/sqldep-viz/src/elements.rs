//! Graph elements (nodes and edges)

use serde::{Deserialize, Serialize};
use sqldep_core::ArtifactClassifier;
use sqldep_graph::DependencyGraph;

/// Element payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ElementData {
    Node {
        id: String,
        label: String,
        artifact_type: String,
    },
    Edge {
        source: String,
        target: String,
    },
}

/// One node or edge, wrapped the way Cytoscape expects (`{"data": {...}}`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    pub data: ElementData,
}

impl Element {
    pub fn node(artifact: &str, artifact_type: &str) -> Self {
        Self {
            data: ElementData::Node {
                id: artifact.to_string(),
                label: artifact.to_string(),
                artifact_type: artifact_type.to_string(),
            },
        }
    }

    pub fn edge(source: &str, target: &str) -> Self {
        Self {
            data: ElementData::Edge {
                source: source.to_string(),
                target: target.to_string(),
            },
        }
    }

    pub fn is_node(&self) -> bool {
        matches!(self.data, ElementData::Node { .. })
    }
}

/// Build elements for every artifact of the graph
///
/// Each artifact becomes a node, followed by one edge per entry in its edge
/// list. Artifacts are visited in sorted order.
pub fn elements(
    graph: &DependencyGraph,
    classifier: &ArtifactClassifier,
    root: Option<&str>,
) -> Vec<Element> {
    let mut elements = Vec::new();

    for artifact in graph.artifacts() {
        elements.push(Element::node(artifact, classifier.classify(artifact, root)));

        for target in graph.edges(artifact).unwrap_or_default() {
            elements.push(Element::edge(artifact, target));
        }
    }

    elements
}
