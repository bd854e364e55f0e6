//! Visualization document for dependency graphs
//!
//! Turns a [`sqldep_graph::DependencyGraph`] into the elements, stylesheet
//! and layout a Cytoscape front end renders.

pub mod document;
pub mod elements;
pub mod style;

pub use document::{VizDocument, DocumentVersion, Layout};
pub use elements::{elements, Element, ElementData};
pub use style::{stylesheet, select_layout, StyleRule, DEFAULT_LAYOUT};
