//! # Engine Module
//!
//! The per-protein decision logic of modfinder, kept free of any store or file system so
//! that every rule can be tested in isolation.
//!
//! ## Architecture
//!
//! Each step returns a value consumed by the next:
//!
//! - **Residue Classification** ([`classify`]) - Observation maps + residue identity into
//!   abstract modification tags and per-type evidence
//! - **Notation Resolution** ([`resolve`]) - Tags and gene classes into canonical notations,
//!   via an ordered rule table
//! - **Record Assembly** ([`assemble`]) - Summary line, detail record and run counters
//!
//! Supporting modules:
//!
//! - **Configuration** ([`config`]) - Thresholds, release and species labels, run date
//! - **Progress Monitoring** ([`progress`]) - Callback-based progress reporting
//! - **Error Handling** ([`error`]) - The error type returned by workflows

pub mod assemble;
pub mod classify;
pub mod config;
pub mod error;
pub mod progress;
pub mod resolve;
