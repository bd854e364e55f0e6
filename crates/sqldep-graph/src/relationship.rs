//! Edge direction of a dependency graph

use crate::error::GraphError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which way the edges of a graph point
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Relationship {
    /// `graph[a]` lists the artifacts `a` reads from
    #[default]
    Dependency,

    /// `graph[a]` lists the artifacts that read from `a`
    Parent,
}

impl Relationship {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dependency => "dependency",
            Self::Parent => "parent",
        }
    }
}

impl fmt::Display for Relationship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Relationship {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dependency" => Ok(Self::Dependency),
            "parent" => Ok(Self::Parent),
            other => Err(GraphError::InvalidRelationship(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_relationship() {
        assert_eq!("dependency".parse::<Relationship>().unwrap(), Relationship::Dependency);
        assert_eq!("parent".parse::<Relationship>().unwrap(), Relationship::Parent);
    }

    #[test]
    fn reject_unknown_relationship() {
        for value in ["child", "Parent", "", "dependencies"] {
            let err = value.parse::<Relationship>().unwrap_err();
            assert!(matches!(err, GraphError::InvalidRelationship(v) if v == value));
        }
    }

    #[test]
    fn display_matches_parse() {
        for relationship in [Relationship::Dependency, Relationship::Parent] {
            assert_eq!(relationship.to_string().parse::<Relationship>().unwrap(), relationship);
        }
    }
}
