//!
//! A crate containing Büchi automata related functionality: the automaton
//! model, the derived per-symbol transition relations and the BA text format.
//!
//! This crate does not use unsafe code.

#![forbid(unsafe_code)]

mod alphabet;
mod automaton_builder;
mod buchi_automaton;
mod context;
mod io_ba;
mod random_automaton;

pub use alphabet::*;
pub use automaton_builder::*;
pub use buchi_automaton::*;
pub use context::*;
pub use io_ba::*;
pub use random_automaton::*;
