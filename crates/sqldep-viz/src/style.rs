//! Stylesheet and layout selection

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use sqldep_core::{ArtifactType, ROOT_TYPE};
use sqldep_graph::Relationship;

/// Layout name that defers to [`select_layout`]'s default choice
pub const DEFAULT_LAYOUT: &str = "default";

const ROOT_COLOR: &str = "#000000";
const ROOT_SHAPE: &str = "triangle";
const EDGE_LINE_COLOR: &str = "#C5D3E2";
const PARENT_ARROW_COLOR: &str = "#FFA500";

/// A selector and the style properties applied to matching elements
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleRule {
    pub selector: String,
    pub style: Map<String, Value>,
}

impl StyleRule {
    fn new(selector: impl Into<String>, style: Map<String, Value>) -> Self {
        Self {
            selector: selector.into(),
            style,
        }
    }

    fn for_type(name: &str, color: &str, shape: &str) -> Self {
        Self::new(
            format!("[artifact_type *= \"{}\"]", name),
            style_map(json!({ "background-color": color, "shape": shape })),
        )
    }
}

/// Properties of a `json!` object literal
fn style_map(style: Value) -> Map<String, Value> {
    debug_assert!(style.is_object(), "style must be a JSON object: {}", style);
    style.as_object().cloned().unwrap_or_default()
}

/// Full stylesheet: base node and edge styles, one rule per artifact type,
/// then the root rule so it wins over any type
pub fn stylesheet(artifact_types: &[ArtifactType], relationship: Relationship) -> Vec<StyleRule> {
    let arrow_color = match relationship {
        Relationship::Parent => PARENT_ARROW_COLOR,
        Relationship::Dependency => EDGE_LINE_COLOR,
    };

    let mut rules = vec![
        StyleRule::new(
            "node",
            style_map(json!({
                "shape": "rectangle",
                "background-color": "lightgrey",
                "border-color": "black",
                "border-width": 1,
                "label": "data(label)",
                "text-valign": "center",
                "text-halign": "left",
                "text-margin-x": -2,
                "text-rotation": 3.14 * 3.0 * 0.75,
                "line-height": "2",
                "text-wrap": "wrap",
                "text-justification": "left",
                "font-size": "20px",
            })),
        ),
        StyleRule::new(
            "edge",
            style_map(json!({
                "target-arrow-color": arrow_color,
                "target-arrow-shape": "triangle",
                "line-color": EDGE_LINE_COLOR,
                "arrow-scale": 2,
                "curve-style": "bezier",
            })),
        ),
    ];

    rules.extend(
        artifact_types
            .iter()
            .map(|t| StyleRule::for_type(&t.name, &t.color, &t.shape)),
    );
    rules.push(StyleRule::for_type(ROOT_TYPE, ROOT_COLOR, ROOT_SHAPE));

    rules
}

/// Pick the layout name
///
/// An explicit request wins, then the configured layout. Otherwise a rooted
/// graph is drawn `breadthfirst` and a full graph `concentric`.
pub fn select_layout(requested: &str, configured: Option<&str>, has_root: bool) -> String {
    if requested != DEFAULT_LAYOUT {
        return requested.to_string();
    }

    match configured {
        Some(layout) if layout != DEFAULT_LAYOUT => layout.to_string(),
        _ if has_root => "breadthfirst".to_string(),
        _ => "concentric".to_string(),
    }
}
