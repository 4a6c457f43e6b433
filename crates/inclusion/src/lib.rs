//!
//! Implements the antichain based algorithm to decide whether the language of
//! one Büchi automaton is included in the language of another, without
//! complementing either automaton.
//!

#![forbid(unsafe_code)]

mod antichain;
mod comparator;
mod fixpoint_vector;
mod inclusion;
mod x_vector;
mod y_vector;

pub use antichain::*;
pub use comparator::*;
pub use fixpoint_vector::*;
pub use inclusion::*;
pub use x_vector::*;
pub use y_vector::*;
