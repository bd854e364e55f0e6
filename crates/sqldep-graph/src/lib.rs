//! Dependency graph construction and traversal
//!
//! This crate handles:
//! - Discovering `.sql` artifacts under a directory
//! - Building dependency or parent (reverse) graphs
//! - Scoping a graph to the artifacts reachable from a root

pub mod builder;
pub mod dag;
pub mod error;
pub mod relationship;

pub use builder::{build_dependency_graph, discover_artifacts, GraphBuilder};
pub use dag::DependencyGraph;
pub use error::GraphError;
pub use relationship::Relationship;
