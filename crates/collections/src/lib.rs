//! Various collections implemented for the Büchi inclusion toolset.
//!
//! Forbid unsafe code in this crate.
#![forbid(unsafe_code)]

mod relation;
mod vecset;

pub use relation::*;
pub use vecset::*;
