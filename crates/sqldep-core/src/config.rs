//! Configuration schema (sqldep.toml)
//!
//! Only the outer layers read this: artifact types decide how nodes are
//! labelled and styled when the graph is rendered.

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

/// Type name given to the root artifact of a scoped graph
pub const ROOT_TYPE: &str = "root";

/// Type name given to artifacts no pattern matches
pub const OTHER_TYPE: &str = "other";

/// A named class of artifacts and how to draw it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ArtifactType {
    /// Display name, also used as the style selector
    pub name: String,

    /// Case-insensitive regex searched for in the artifact identifier
    pub pattern: String,

    /// Node background color
    pub color: String,

    /// Node shape
    pub shape: String,
}

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Artifact types, matched in order
    pub artifact_types: Vec<ArtifactType>,

    /// Layout override used instead of the default selection
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<String>,
}

impl Config {
    /// Load and validate config from a TOML file
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::IoError(format!("{}: {}", path.display(), e)))?;

        let config = Self::from_toml(&contents)?;
        tracing::debug!(
            path = %path.display(),
            artifact_types = config.artifact_types.len(),
            "loaded config"
        );
        Ok(config)
    }

    /// Load and validate config from a TOML string
    pub fn from_toml(toml: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(toml)
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check the invariants serde cannot express
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (index, artifact_type) in self.artifact_types.iter().enumerate() {
            if artifact_type.name.trim().is_empty() {
                return Err(ConfigError::Invalid {
                    index,
                    reason: "field 'name' must not be empty".to_string(),
                });
            }

            if artifact_type.name == ROOT_TYPE || artifact_type.name == OTHER_TYPE {
                return Err(ConfigError::Invalid {
                    index,
                    reason: format!("name '{}' is reserved", artifact_type.name),
                });
            }

            compile_pattern(&artifact_type.pattern)
                .map_err(|e| ConfigError::InvalidPattern { index, reason: e.to_string() })?;
        }

        Ok(())
    }

    /// Save config to a TOML file
    pub fn save_to_file(&self, path: &std::path::Path) -> Result<(), ConfigError> {
        let toml = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::SerializeError(e.to_string()))?;

        std::fs::write(path, toml)
            .map_err(|e| ConfigError::IoError(e.to_string()))?;

        Ok(())
    }

    /// Build a classifier for the configured artifact types
    pub fn classifier(&self) -> Result<ArtifactClassifier, ConfigError> {
        ArtifactClassifier::new(&self.artifact_types)
    }
}

fn compile_pattern(pattern: &str) -> Result<Regex, regex::Error> {
    RegexBuilder::new(pattern).case_insensitive(true).build()
}

/// Assigns each artifact the name of the first artifact type whose pattern
/// it matches
#[derive(Debug, Clone, Default)]
pub struct ArtifactClassifier {
    types: Vec<(String, Regex)>,
}

impl ArtifactClassifier {
    /// Compile the patterns of the given artifact types
    pub fn new(artifact_types: &[ArtifactType]) -> Result<Self, ConfigError> {
        let types = artifact_types
            .iter()
            .enumerate()
            .map(|(index, artifact_type)| {
                compile_pattern(&artifact_type.pattern)
                    .map(|regex| (artifact_type.name.clone(), regex))
                    .map_err(|e| ConfigError::InvalidPattern { index, reason: e.to_string() })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { types })
    }

    /// Classify an artifact
    ///
    /// The root artifact is always `root`; unmatched artifacts are `other`.
    pub fn classify<'a>(&'a self, artifact: &str, root: Option<&str>) -> &'a str {
        if root == Some(artifact) {
            return ROOT_TYPE;
        }

        self.types
            .iter()
            .find(|(_, regex)| regex.is_match(artifact))
            .map(|(name, _)| name.as_str())
            .unwrap_or(OTHER_TYPE)
    }
}

/// Config error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Serialize error: {0}")]
    SerializeError(String),

    #[error("artifact type at index {index}: {reason}")]
    Invalid { index: usize, reason: String },

    #[error("artifact type at index {index} has an invalid pattern: {reason}")]
    InvalidPattern { index: usize, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r##"
[[artifact_types]]
name = "master"
pattern = "^master"
color = "#1f77b4"
shape = "ellipse"

[[artifact_types]]
name = "source"
pattern = "liveprod"
color = "#2ca02c"
shape = "diamond"

[[artifact_types]]
name = "google sheet"
pattern = "google_sheet"
color = "#ff7f0e"
shape = "round-rectangle"

[[artifact_types]]
name = "databricks"
pattern = "DATABRICKS"
color = "#d62728"
shape = "hexagon"
"##;

    fn sample_types() -> Vec<ArtifactType> {
        Config::from_toml(SAMPLE).unwrap().artifact_types
    }

    #[test]
    fn default_config() {
        let config = Config::default();
        assert!(config.artifact_types.is_empty());
        assert!(config.layout.is_none());
    }

    #[test]
    fn parse_artifact_types() {
        let types = sample_types();
        assert_eq!(types.len(), 4);
        assert_eq!(types[2].name, "google sheet");
        assert_eq!(types[3].shape, "hexagon");
    }

    #[test]
    fn missing_artifact_types_key() {
        let err = Config::from_toml("layout = \"grid\"").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(msg) if msg.contains("artifact_types")));
    }

    #[test]
    fn missing_field() {
        let toml = r##"
[[artifact_types]]
name = "master"
pattern = "^master"
color = "#000000"
"##;
        let err = Config::from_toml(toml).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(msg) if msg.contains("shape")));
    }

    #[test]
    fn non_string_field() {
        let toml = r##"
[[artifact_types]]
name = "master"
pattern = "^master"
color = 7
shape = "ellipse"
"##;
        assert!(matches!(Config::from_toml(toml), Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn artifact_types_must_be_a_list() {
        assert!(matches!(
            Config::from_toml("artifact_types = \"master\""),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn empty_name_rejected() {
        let toml = r##"
[[artifact_types]]
name = " "
pattern = "x"
color = "#000000"
shape = "ellipse"
"##;
        assert!(matches!(Config::from_toml(toml), Err(ConfigError::Invalid { index: 0, .. })));
    }

    #[test]
    fn reserved_name_rejected() {
        let toml = r##"
[[artifact_types]]
name = "root"
pattern = "x"
color = "#000000"
shape = "ellipse"
"##;
        assert!(matches!(Config::from_toml(toml), Err(ConfigError::Invalid { index: 0, .. })));
    }

    #[test]
    fn invalid_pattern_rejected() {
        let toml = r##"
[[artifact_types]]
name = "ok"
pattern = "ok"
color = "#000000"
shape = "ellipse"

[[artifact_types]]
name = "broken"
pattern = "master("
color = "#000000"
shape = "ellipse"
"##;
        assert!(matches!(
            Config::from_toml(toml),
            Err(ConfigError::InvalidPattern { index: 1, .. })
        ));
    }

    #[test]
    fn classify_artifacts() {
        let classifier = ArtifactClassifier::new(&sample_types()).unwrap();

        assert_eq!(classifier.classify("master_view.customer", None), "master");
        assert_eq!(classifier.classify("nextgen_liveprod.test", None), "source");
        assert_eq!(classifier.classify("google_sheet.FBA Skus", None), "google sheet");
        assert_eq!(classifier.classify("databricks.some nonsense", None), "databricks");
        assert_eq!(classifier.classify("cat", Some("cat")), ROOT_TYPE);
    }

    #[test]
    fn classify_without_types() {
        let classifier = ArtifactClassifier::default();
        assert_eq!(classifier.classify("", Some("cat")), OTHER_TYPE);
        assert_eq!(classifier.classify("anything.else", None), OTHER_TYPE);
    }

    #[test]
    fn config_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sqldep.toml");

        let config = Config::from_toml(SAMPLE).unwrap();
        config.save_to_file(&path).unwrap();

        assert_eq!(Config::from_file(&path).unwrap(), config);
    }

    #[test]
    fn missing_file() {
        let err = Config::from_file(std::path::Path::new("does/not/exist.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::IoError(msg) if msg.contains("exist.toml")));
    }
}
