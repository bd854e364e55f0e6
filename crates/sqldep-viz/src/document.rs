//! Visualization document (viz.json v1)

use crate::elements::{elements, Element};
use crate::style::{select_layout, stylesheet, StyleRule};
use serde::{Deserialize, Serialize};
use sqldep_core::Config;
use sqldep_graph::{DependencyGraph, Relationship};

/// Document schema version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentVersion {
    /// Major version (breaking changes)
    pub major: u32,

    /// Minor version (backward-compatible additions)
    pub minor: u32,
}

impl DocumentVersion {
    /// Current document schema version
    pub const CURRENT: DocumentVersion = DocumentVersion { major: 1, minor: 0 };
}

impl std::fmt::Display for DocumentVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// Layout settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
    pub name: String,
}

/// Everything a front end needs to draw one graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VizDocument {
    /// Schema version
    pub version: DocumentVersion,

    /// Edge direction the graph was built with
    pub relationship: Relationship,

    /// Root artifact, if the graph was scoped
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root_artifact: Option<String>,

    pub elements: Vec<Element>,

    pub stylesheet: Vec<StyleRule>,

    pub layout: Layout,
}

impl VizDocument {
    /// Build the document for a graph
    ///
    /// `graph_type` is the requested layout name, `default` to pick one.
    pub fn build(
        graph: &DependencyGraph,
        config: &Config,
        relationship: Relationship,
        root_artifact: Option<&str>,
        graph_type: &str,
    ) -> Result<Self, sqldep_core::ConfigError> {
        let classifier = config.classifier()?;

        Ok(Self {
            version: DocumentVersion::CURRENT,
            relationship,
            root_artifact: root_artifact.map(str::to_string),
            elements: elements(graph, &classifier, root_artifact),
            stylesheet: stylesheet(&config.artifact_types, relationship),
            layout: Layout {
                name: select_layout(graph_type, config.layout.as_deref(), root_artifact.is_some()),
            },
        })
    }

    pub fn node_count(&self) -> usize {
        self.elements.iter().filter(|e| e.is_node()).count()
    }

    pub fn edge_count(&self) -> usize {
        self.elements.len() - self.node_count()
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Save to file
    pub fn save_to_file(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let json = self.to_json()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
        std::fs::write(path, json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph() -> DependencyGraph {
        [("master_tables.package".to_string(), vec!["master_views.customer".to_string()])]
            .into_iter()
            .collect()
    }

    #[test]
    fn build_rooted_document() {
        let doc = VizDocument::build(
            &graph(),
            &Config::default(),
            Relationship::Parent,
            Some("master_tables.package"),
            "default",
        )
        .unwrap();

        assert_eq!(doc.version, DocumentVersion::CURRENT);
        assert_eq!(doc.node_count(), 2);
        assert_eq!(doc.edge_count(), 1);
        assert_eq!(doc.layout.name, "breadthfirst");
        assert_eq!(doc.stylesheet.len(), 3);
    }

    #[test]
    fn document_serialization() {
        let doc = VizDocument::build(&graph(), &Config::default(), Relationship::Dependency, None, "grid")
            .unwrap();
        let json = doc.to_json().unwrap();

        assert!(json.contains("\"elements\""));
        assert!(json.contains("\"stylesheet\""));
        assert!(json.contains("\"grid\""));
        assert!(!json.contains("root_artifact"));
    }

    #[test]
    fn save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("viz.json");

        let doc = VizDocument::build(&graph(), &Config::default(), Relationship::Dependency, None, "default")
            .unwrap();
        doc.save_to_file(&path).unwrap();

        let reloaded: VizDocument =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(reloaded.elements, doc.elements);
        assert_eq!(reloaded.layout, doc.layout);
        assert_eq!(reloaded.relationship, Relationship::Dependency);
    }
}
