//! Static lookup tables consulted while annotating a species.
//!
//! - [`gene_class`] - Special-case gene classes assigned from protein descriptions
//! - [`species`] - Common to binomial species names and the filename convention

pub mod gene_class;
pub mod species;
