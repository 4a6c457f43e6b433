use std::fmt;

use itertools::Itertools;

use crate::PartialComparator;

/// An antichain is a set of elements of which no two distinct elements are
/// comparable under the partial order of the comparator `C`, i.e., it is dual
/// to a chain.
///
/// The elements are stored in insertion order, which makes every traversal
/// deterministic.
#[derive(Clone)]
pub struct Antichain<T, C> {
    elements: Vec<T>,
    comparator: C,
}

impl<T: PartialEq, C: PartialComparator<T>> Antichain<T, C> {
    /// Creates an empty antichain ordered by the given comparator.
    pub fn new(comparator: C) -> Self {
        Self {
            elements: Vec::new(),
            comparator,
        }
    }

    /// Greatest lower bound with the given element: removes all elements that
    /// are strictly greater than `element`, and adds `element` unless some
    /// element lesser or equal to it remains. Returns true iff the antichain
    /// was modified.
    pub fn glb_with(&mut self, element: T) -> bool {
        let size_before = self.elements.len();
        self.elements
            .retain(|existing| *existing == element || !self.comparator.lesser_or_equal(&element, existing));
        let removed = self.elements.len() < size_before;

        let exists_smaller = self
            .elements
            .iter()
            .any(|existing| self.comparator.lesser_or_equal(existing, &element));
        if !exists_smaller {
            self.elements.push(element);
        }

        removed || !exists_smaller
    }

    /// Least upper bound with the given element, the dual of [`Self::glb_with`].
    /// Returns true iff the antichain was modified.
    pub fn lub_with(&mut self, element: T) -> bool {
        let size_before = self.elements.len();
        self.elements
            .retain(|existing| *existing == element || !self.comparator.lesser_or_equal(existing, &element));
        let removed = self.elements.len() < size_before;

        let exists_greater = self
            .elements
            .iter()
            .any(|existing| self.comparator.lesser_or_equal(&element, existing));
        if !exists_greater {
            self.elements.push(element);
        }

        removed || !exists_greater
    }

    /// Returns true iff the given element is (equal to) an element of the antichain.
    pub fn contains(&self, element: &T) -> bool {
        self.elements.contains(element)
    }

    /// Returns true iff some element of the antichain is greater or equal to the given element.
    pub fn subsumes(&self, element: &T) -> bool {
        self.elements
            .iter()
            .any(|existing| self.comparator.lesser_or_equal(element, existing))
    }
}

impl<T, C> Antichain<T, C> {
    /// Returns the number of elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns true iff the antichain has no elements.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Returns an iterator over the elements in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.elements.iter()
    }
}

impl<'a, T, C> IntoIterator for &'a Antichain<T, C> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

impl<T: fmt::Debug, C> fmt::Debug for Antichain<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{:?}}}", self.elements.iter().format(", "))
    }
}
