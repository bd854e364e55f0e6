//! Graph construction from a directory of SQL files
//!
//! Every `.sql` file below the scan directory is one artifact. Its file path
//! names it and the references in its text become its edges.

use crate::dag::DependencyGraph;
use crate::error::GraphError;
use crate::relationship::Relationship;
use sqldep_core::{resolve_artifact, Artifact};
use sqldep_sql::DependencyExtractor;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Builds a [`DependencyGraph`] from a scan directory
#[derive(Debug, Clone)]
pub struct GraphBuilder {
    scan_dir: PathBuf,
    relationship: Relationship,
    root_artifact: Option<Artifact>,
}

impl GraphBuilder {
    /// Create a builder for the dependency relationship without a root
    pub fn new(scan_dir: impl Into<PathBuf>) -> Self {
        Self {
            scan_dir: scan_dir.into(),
            relationship: Relationship::default(),
            root_artifact: None,
        }
    }

    /// Set the edge direction
    pub fn relationship(mut self, relationship: Relationship) -> Self {
        self.relationship = relationship;
        self
    }

    /// Set the relationship from its textual name
    pub fn relationship_str(self, relationship: &str) -> Result<Self, GraphError> {
        Ok(self.relationship(relationship.parse()?))
    }

    /// Scope the result to the artifacts reachable from `root`
    pub fn root_artifact(mut self, root: impl Into<Artifact>) -> Self {
        self.root_artifact = Some(root.into());
        self
    }

    /// Validate the query, scan the directory and assemble the graph
    pub fn build(&self) -> Result<DependencyGraph, GraphError> {
        if self.relationship == Relationship::Parent && self.root_artifact.is_none() {
            return Err(GraphError::MissingRootArtifact);
        }

        let artifacts = discover_artifacts(&self.scan_dir)?;
        let mut graph = DependencyGraph::new();

        for (artifact, path) in artifacts {
            let sql = std::fs::read_to_string(&path)
                .map_err(|source| GraphError::FileRead { path: path.clone(), source })?;

            let dependencies = DependencyExtractor::extract(&sql);
            tracing::debug!(%artifact, dependencies = dependencies.len(), "extracted dependencies");

            match self.relationship {
                Relationship::Dependency => graph.set_edges(artifact, dependencies),
                Relationship::Parent => {
                    for dependency in dependencies {
                        graph.push_edge(dependency, artifact.clone());
                    }
                }
            }
        }

        tracing::info!(
            scan_dir = %self.scan_dir.display(),
            relationship = %self.relationship,
            artifacts = graph.len(),
            edges = graph.edge_count(),
            "built dependency graph"
        );

        match &self.root_artifact {
            Some(root) => {
                let subgraph = graph.subgraph(root);
                tracing::info!(%root, artifacts = subgraph.len(), "scoped graph to root artifact");
                Ok(subgraph)
            }
            None => Ok(graph),
        }
    }
}

/// Build a graph for `scan_dir` in the given direction, optionally scoped to
/// `root_artifact`
pub fn build_dependency_graph(
    scan_dir: impl AsRef<Path>,
    relationship: Relationship,
    root_artifact: Option<&str>,
) -> Result<DependencyGraph, GraphError> {
    let mut builder = GraphBuilder::new(scan_dir.as_ref()).relationship(relationship);
    if let Some(root) = root_artifact {
        builder = builder.root_artifact(root);
    }
    builder.build()
}

/// Map every `.sql` file under `scan_dir` to its artifact
///
/// Fails if two files resolve to the same artifact.
pub fn discover_artifacts(scan_dir: &Path) -> Result<BTreeMap<Artifact, PathBuf>, GraphError> {
    let mut artifacts: BTreeMap<Artifact, PathBuf> = BTreeMap::new();

    // Links are followed so symlinked files count; link loops surface as walk errors.
    for entry in WalkDir::new(scan_dir).follow_links(true).sort_by_file_name() {
        let entry = entry.map_err(|source| GraphError::Walk {
            path: scan_dir.to_path_buf(),
            source,
        })?;

        if !entry.file_type().is_file() || !is_sql_file(entry.path()) {
            continue;
        }

        let path = entry.into_path();
        let artifact = resolve_artifact(scan_dir, &path)?;
        tracing::debug!(%artifact, path = %path.display(), "discovered artifact");

        if let Some(first) = artifacts.get(&artifact) {
            return Err(GraphError::DuplicateArtifact {
                artifact,
                first: first.clone(),
                second: path,
            });
        }

        artifacts.insert(artifact, path);
    }

    Ok(artifacts)
}

fn is_sql_file(path: &Path) -> bool {
    path.extension().map(|ext| ext == "sql").unwrap_or(false)
}
