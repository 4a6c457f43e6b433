use std::cmp::Ordering;
use std::fmt;
use std::slice::Iter;
use std::vec::IntoIter;

use itertools::Itertools;

/// Constructs a [`VecSet`] from the given elements, duplicates are removed.
#[macro_export]
macro_rules! vecset {
    () => {
        $crate::VecSet::new()
    };
    ($($x:expr),+ $(,)?) => {{
        let mut __set = $crate::VecSet::new();
        $( let _ = __set.insert($x); )*
        __set
    }};
}

///
/// A set that is internally represented by a sorted vector. Mostly useful for
/// a compact representation of small sets, such as the sets of states that
/// occur in the antichains.
///
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VecSet<T> {
    /// The internal storage with the invariant that the array is sorted and
    /// contains no duplicates.
    sorted_array: Vec<T>,
}

impl<T: Ord> VecSet<T> {
    pub fn new() -> Self {
        Self {
            sorted_array: Vec::new(),
        }
    }

    /// Returns a new set only containing the given element.
    pub fn singleton(element: T) -> Self {
        Self {
            sorted_array: vec![element],
        }
    }

    /// Returns true iff the set is empty.
    pub fn is_empty(&self) -> bool {
        self.sorted_array.is_empty()
    }

    /// Returns the number of elements in the set.
    pub fn len(&self) -> usize {
        self.sorted_array.len()
    }

    /// Inserts the given element into the set, returns true iff the element was
    /// inserted.
    pub fn insert(&mut self, element: T) -> bool {
        // Finds the location where to insert the element to keep the array sorted.
        if let Err(position) = self.sorted_array.binary_search(&element) {
            self.sorted_array.insert(position, element);
            return true;
        }

        false
    }

    /// Removes the given element from the set, returns true iff it was present.
    pub fn remove(&mut self, element: &T) -> bool {
        if let Ok(position) = self.sorted_array.binary_search(element) {
            self.sorted_array.remove(position);
            return true;
        }

        false
    }

    /// Returns true iff the set contains the given element.
    pub fn contains(&self, element: &T) -> bool {
        self.sorted_array.binary_search(element).is_ok()
    }

    /// Returns true iff every element of this set is also an element of `other`.
    pub fn is_subset(&self, other: &VecSet<T>) -> bool {
        if self.len() > other.len() {
            return false;
        }

        // Both arrays are sorted, so a single merge pass suffices.
        let mut others = other.sorted_array.iter();
        'outer: for element in &self.sorted_array {
            for candidate in others.by_ref() {
                match candidate.cmp(element) {
                    Ordering::Less => continue,
                    Ordering::Equal => continue 'outer,
                    Ordering::Greater => return false,
                }
            }

            return false;
        }

        true
    }

    /// Retains only the elements for which the predicate holds.
    pub fn retain<F: FnMut(&T) -> bool>(&mut self, predicate: F) {
        self.sorted_array.retain(predicate);
    }

    /// Returns an iterator over the elements in the set, they are yielded in sorted order.
    pub fn iter(&self) -> Iter<'_, T> {
        self.sorted_array.iter()
    }
}

impl<T: Ord + Clone> VecSet<T> {
    /// Returns the union of this set and the other set.
    pub fn union(&self, other: &VecSet<T>) -> VecSet<T> {
        let sorted_array = self
            .sorted_array
            .iter()
            .merge(other.sorted_array.iter())
            .dedup()
            .cloned()
            .collect();

        VecSet { sorted_array }
    }
}

impl<T: Ord> Default for VecSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord> FromIterator<T> for VecSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut sorted_array: Vec<T> = iter.into_iter().collect();
        sorted_array.sort_unstable();
        sorted_array.dedup();

        VecSet { sorted_array }
    }
}

impl<T: Ord> Extend<T> for VecSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.sorted_array.extend(iter);
        self.sorted_array.sort_unstable();
        self.sorted_array.dedup();
    }
}

impl<'a, T> IntoIterator for &'a VecSet<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.sorted_array.iter()
    }
}

impl<T> IntoIterator for VecSet<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.sorted_array.into_iter()
    }
}

impl<T: fmt::Debug> fmt::Debug for VecSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{:?}}}", self.sorted_array.iter().format(", "))
    }
}
