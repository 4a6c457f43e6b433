//! Utility types and functions for the Büchi inclusion toolset.
//!
//! Forbid unsafe code in this crate, none of the utilities require it.
#![forbid(unsafe_code)]

mod error;
mod random_test;
mod tagged_index;
mod timing;

pub use error::*;
pub use random_test::*;
pub use tagged_index::*;
pub use timing::*;
