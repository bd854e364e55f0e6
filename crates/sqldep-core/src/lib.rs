//! sqldep Core
//!
//! Shared domain types: artifact identifiers derived from file paths and the
//! styling configuration (sqldep.toml) consumed by the outer layers.

pub mod artifact;
pub mod config;

pub use artifact::{Artifact, ArtifactError, resolve_artifact, artifact_path, TABLE_MARKER, SQL_EXTENSION};
pub use config::{Config, ArtifactType, ArtifactClassifier, ConfigError, ROOT_TYPE, OTHER_TYPE};
