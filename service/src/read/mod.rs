//! Read entities definitions.

pub mod development;
pub mod lead;
pub mod property;
