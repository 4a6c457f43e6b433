use std::fmt;

use buchi_automata::StateIndex;
use buchi_collections::Relation;
use buchi_collections::VecSet;

/// Compares two elements by a *partial* order, so it can happen that neither
/// `left <= right` nor `right <= left` holds.
pub trait PartialComparator<T> {
    /// Returns true iff `left <= right`.
    fn lesser_or_equal(&self, left: &T, right: &T) -> bool;
}

/// Orders sets of states by inclusion.
#[derive(Clone, Copy, Debug, Default)]
pub struct SubsetComparator;

impl PartialComparator<VecSet<StateIndex>> for SubsetComparator {
    fn lesser_or_equal(&self, left: &VecSet<StateIndex>, right: &VecSet<StateIndex>) -> bool {
        left.is_subset(right)
    }
}

/// A pair of relations over the states of an automaton.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RelationPair {
    pub first: Relation<StateIndex>,
    pub second: Relation<StateIndex>,
}

impl RelationPair {
    pub fn new(first: Relation<StateIndex>, second: Relation<StateIndex>) -> Self {
        Self { first, second }
    }
}

impl fmt::Debug for RelationPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:?}, {:?})", self.first, self.second)
    }
}

/// Orders pairs of relations by componentwise inclusion.
#[derive(Clone, Copy, Debug, Default)]
pub struct RelationPairComparator;

impl PartialComparator<RelationPair> for RelationPairComparator {
    fn lesser_or_equal(&self, left: &RelationPair, right: &RelationPair) -> bool {
        left.first.is_subset(&right.first) && left.second.is_subset(&right.second)
    }
}
