//! # Workflows Module
//!
//! Top-level entry points that drive the engine over a whole input set.
//!
//! - **Annotation Workflow** ([`annotate`]) - Classifies every protein of a species and
//!   writes the summary and detail files, reporting progress along the way.

pub mod annotate;
