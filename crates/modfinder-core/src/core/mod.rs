//! # Core Module
//!
//! The fundamental building blocks shared by the engine and the workflows.
//!
//! - **Data Models** ([`models`]) - Proteins, modification types, evidence and notations
//! - **Static Rules** ([`rules`]) - Gene-class name sets and patterns, species names
//! - **Observation Store** ([`store`]) - Provider traits and the file-backed store
//! - **File I/O** ([`io`]) - FASTA input, summary (XML) and detail (JSON lines) output

pub mod io;
pub mod models;
pub mod rules;
pub mod store;
