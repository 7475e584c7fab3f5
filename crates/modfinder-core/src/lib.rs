//! # modfinder Core Library
//!
//! Builds per-species post-translational modification (PTM) annotation files from
//! pre-computed residue observation frequencies.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer layout so that the decision logic can be tested
//! without any store or file system:
//!
//! - **[`core`]: The Foundation.** Stateless data models (`ProteinRecord`, `ObservationMap`,
//!   `CanonicalNotation`), the static rule tables (gene classes, species names), the
//!   observation store interfaces, and the FASTA/summary/detail I/O.
//!
//! - **[`engine`]: The Logic Core.** The per-protein steps: residue classification,
//!   notation resolution and record assembly, plus configuration, progress reporting and
//!   error types.
//!
//! - **[`workflows`]: The Public API.** The run loop that drives a whole species through the
//!   engine and into the output writers.

pub mod core;
pub mod engine;
pub mod workflows;
