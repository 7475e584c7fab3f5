//! Access to per-residue modification observation frequencies.
//!
//! The engine only depends on the [`provider`] traits. Two implementations are supplied:
//! an in-memory store ([`memory`]) and a directory of CSV tables ([`csv_store`]), one table per
//! modification type, which is what the command-line tool connects to.

pub mod csv_store;
pub mod memory;
pub mod provider;
