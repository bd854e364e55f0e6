//! Artifact identifiers
//!
//! An artifact is a table or view named by its dotted path relative to the
//! scanned directory, e.g. `catalog/schema/orders.table.sql` is
//! `catalog.schema.orders`.

use std::path::{Component, Path, PathBuf};

/// Dotted artifact identifier (`schema.table`, `catalog.schema.table`, ...)
pub type Artifact = String;

/// Optional filename marker denoting a table rather than a view
pub const TABLE_MARKER: &str = ".table";

/// Extension of every artifact file
pub const SQL_EXTENSION: &str = ".sql";

/// Artifact resolution errors
#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("{path} is not located under the scan directory {scan_dir}")]
    PathResolution { scan_dir: PathBuf, path: PathBuf },
}

/// Resolve the artifact identifier for a file under `scan_dir`
///
/// Path separators become `.`, the `.sql` extension is dropped and a trailing
/// `.table` marker is removed.
pub fn resolve_artifact(scan_dir: &Path, path: &Path) -> Result<Artifact, ArtifactError> {
    let path_error = || ArtifactError::PathResolution {
        scan_dir: scan_dir.to_path_buf(),
        path: path.to_path_buf(),
    };

    let relative = path.strip_prefix(scan_dir).map_err(|_| path_error())?;

    let mut segments = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(segment) => segments.push(segment.to_str().ok_or_else(path_error)?),
            Component::CurDir => {}
            _ => return Err(path_error()),
        }
    }

    if segments.is_empty() {
        return Err(path_error());
    }

    let joined = segments.join(".");
    let without_extension = joined.strip_suffix(SQL_EXTENSION).unwrap_or(&joined);
    let artifact = without_extension
        .strip_suffix(TABLE_MARKER)
        .unwrap_or(without_extension);

    if artifact.is_empty() {
        return Err(path_error());
    }

    Ok(artifact.to_string())
}

/// Rebuild the file path an artifact is expected to live at
///
/// The `.table` marker is not recoverable from the identifier, so the
/// returned path never carries it.
pub fn artifact_path(scan_dir: &Path, artifact: &str) -> PathBuf {
    let mut path = scan_dir.to_path_buf();
    let mut segments = artifact.split('.').peekable();

    while let Some(segment) = segments.next() {
        if segments.peek().is_some() {
            path.push(segment);
        } else {
            path.push(format!("{}{}", segment, SQL_EXTENSION));
        }
    }

    path
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCAN_DIR: &str = "tests/.test_data";

    #[test]
    fn resolves_view_path() {
        let path = Path::new(SCAN_DIR).join("master_views/customer.sql");
        let artifact = resolve_artifact(Path::new(SCAN_DIR), &path).unwrap();
        assert_eq!(artifact, "master_views.customer");
    }

    #[test]
    fn strips_table_marker() {
        let path = Path::new(SCAN_DIR).join("master_tables/customer.table.sql");
        let artifact = resolve_artifact(Path::new(SCAN_DIR), &path).unwrap();
        assert_eq!(artifact, "master_tables.customer");
    }

    #[test]
    fn nested_catalog_path() {
        let path = Path::new("/warehouse/bigdata/master_tables/order.sql");
        let artifact = resolve_artifact(Path::new("/warehouse"), path).unwrap();
        assert_eq!(artifact, "bigdata.master_tables.order");
    }

    #[test]
    fn table_marker_only_stripped_at_end() {
        let path = Path::new("sql/raw.tables/events.sql");
        let artifact = resolve_artifact(Path::new("sql"), path).unwrap();
        assert_eq!(artifact, "raw.tables.events");
    }

    #[test]
    fn path_outside_scan_dir_fails() {
        let result = resolve_artifact(Path::new(SCAN_DIR), Path::new("master_views/customer.sql"));
        assert!(matches!(result, Err(ArtifactError::PathResolution { .. })));

        let result = resolve_artifact(Path::new(SCAN_DIR), Path::new("master_views/customer.txt"));
        assert!(matches!(result, Err(ArtifactError::PathResolution { .. })));
    }

    #[test]
    fn scan_dir_itself_fails() {
        let result = resolve_artifact(Path::new(SCAN_DIR), Path::new(SCAN_DIR));
        assert!(matches!(result, Err(ArtifactError::PathResolution { .. })));
    }

    #[test]
    fn error_names_offending_path() {
        let err = resolve_artifact(Path::new("sql"), Path::new("other/a.sql")).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("other/a.sql"));
        assert!(message.contains("sql"));
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_segment_fails() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let path = Path::new("sql").join(OsStr::from_bytes(b"raw\xff")).join("a.sql");
        let result = resolve_artifact(Path::new("sql"), &path);
        assert!(matches!(result, Err(ArtifactError::PathResolution { .. })));
    }

    #[test]
    fn artifact_path_near_roundtrip() {
        let scan_dir = Path::new("sql");
        for file in ["sql/a/b.sql", "sql/a/b.table.sql", "sql/cat/schema/c.sql"] {
            let artifact = resolve_artifact(scan_dir, Path::new(file)).unwrap();
            let rebuilt = artifact_path(scan_dir, &artifact);
            assert_eq!(resolve_artifact(scan_dir, &rebuilt).unwrap(), artifact);
        }

        assert_eq!(artifact_path(scan_dir, "a.b"), Path::new("sql/a/b.sql"));
    }
}
