//! Graph construction errors
//!
//! Every variant is fatal for the build that raised it; no partial graph is
//! ever returned.

use sqldep_core::ArtifactError;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    #[error("invalid relationship '{0}', expected one of: dependency, parent")]
    InvalidRelationship(String),

    #[error("the parent relationship requires a root artifact")]
    MissingRootArtifact,

    #[error(transparent)]
    PathResolution(#[from] ArtifactError),

    #[error("failed to read {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to scan {path}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("artifact '{artifact}' is defined by both {first} and {second}")]
    DuplicateArtifact {
        artifact: String,
        first: PathBuf,
        second: PathBuf,
    },
}
