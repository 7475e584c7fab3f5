//! Data structures describing proteins and the modification evidence attached to them.

pub mod annotation;
pub mod evidence;
pub mod modification;
pub mod notation;
pub mod protein;
