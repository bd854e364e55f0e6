//! Dependency graph (DAG) storage and traversal
//!
//! The graph is a plain adjacency map. Depending on how it was built, the
//! listed artifacts are either dependencies or parents of the key.

use serde::{Deserialize, Serialize};
use sqldep_core::Artifact;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

/// Adjacency map from an artifact to the artifacts its edges point at
///
/// Artifacts without outgoing edges may be missing from the keys and only
/// show up as values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DependencyGraph {
    edges: HashMap<Artifact, Vec<Artifact>>,
}

impl DependencyGraph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the edge list of an artifact, making it a key
    pub fn set_edges(&mut self, artifact: Artifact, targets: Vec<Artifact>) {
        self.edges.insert(artifact, targets);
    }

    /// Append one edge, creating the key if needed
    pub fn push_edge(&mut self, artifact: Artifact, target: Artifact) {
        self.edges.entry(artifact).or_default().push(target);
    }

    /// Edge list of an artifact, if it is a key
    pub fn edges(&self, artifact: &str) -> Option<&[Artifact]> {
        self.edges.get(artifact).map(Vec::as_slice)
    }

    /// Check whether the artifact is a key
    pub fn contains(&self, artifact: &str) -> bool {
        self.edges.contains_key(artifact)
    }

    /// Artifacts with a recorded edge list
    pub fn keys(&self) -> impl Iterator<Item = &Artifact> {
        self.edges.keys()
    }

    /// Iterate over (artifact, edge list) entries in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = (&Artifact, &Vec<Artifact>)> {
        self.edges.iter()
    }

    /// Number of keys
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Check whether the graph has no keys
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Number of (key, value) pairs
    pub fn edge_count(&self) -> usize {
        self.edges.values().map(Vec::len).sum()
    }

    /// Every artifact in the graph, keys and values alike
    pub fn artifacts(&self) -> BTreeSet<&Artifact> {
        self.edges
            .iter()
            .flat_map(|(artifact, targets)| std::iter::once(artifact).chain(targets))
            .collect()
    }

    /// Sorted view with set-valued entries, for display and comparisons
    /// that must not depend on edge order
    pub fn to_sorted(&self) -> BTreeMap<Artifact, BTreeSet<Artifact>> {
        self.edges
            .iter()
            .map(|(artifact, targets)| (artifact.clone(), targets.iter().cloned().collect()))
            .collect()
    }

    /// Entries ordered by key with edge lists untouched, for stable output
    pub fn sorted_entries(&self) -> BTreeMap<&Artifact, &Vec<Artifact>> {
        self.edges.iter().collect()
    }

    /// Artifacts reachable from `root` by following edges, root included
    ///
    /// Iterative, so deep chains cannot overflow the stack, and cycles are
    /// walked once.
    pub fn reachable(&self, root: &str) -> HashSet<Artifact> {
        let mut frontier: Vec<&str> = vec![root];
        let mut visited: HashSet<&str> = HashSet::new();

        while let Some(current) = frontier.pop() {
            if !visited.insert(current) {
                continue;
            }

            if let Some(targets) = self.edges.get(current) {
                frontier.extend(
                    targets
                        .iter()
                        .map(String::as_str)
                        .filter(|target| !visited.contains(target)),
                );
            }
        }

        visited.into_iter().map(str::to_string).collect()
    }

    /// Induced subgraph of the artifacts reachable from `root`
    ///
    /// Keeps every reachable key with its edge list untouched. Reachable
    /// artifacts that are not keys stay visible only as values.
    pub fn subgraph(&self, root: &str) -> DependencyGraph {
        let reachable = self.reachable(root);

        let edges = self
            .edges
            .iter()
            .filter(|(artifact, _)| reachable.contains(*artifact))
            .map(|(artifact, targets)| (artifact.clone(), targets.clone()))
            .collect();

        DependencyGraph { edges }
    }
}

impl From<HashMap<Artifact, Vec<Artifact>>> for DependencyGraph {
    fn from(edges: HashMap<Artifact, Vec<Artifact>>) -> Self {
        Self { edges }
    }
}

impl FromIterator<(Artifact, Vec<Artifact>)> for DependencyGraph {
    fn from_iter<I: IntoIterator<Item = (Artifact, Vec<Artifact>)>>(iter: I) -> Self {
        Self {
            edges: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for DependencyGraph {
    type Item = (Artifact, Vec<Artifact>);
    type IntoIter = std::collections::hash_map::IntoIter<Artifact, Vec<Artifact>>;

    fn into_iter(self) -> Self::IntoIter {
        self.edges.into_iter()
    }
}
