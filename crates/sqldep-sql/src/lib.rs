//! SQL dependency extraction
//!
//! Finds the artifacts a SQL file reads from or writes to by matching quoted
//! identifiers after table-referencing keywords. No SQL grammar is involved.

pub mod extractor;

pub use extractor::DependencyExtractor;
