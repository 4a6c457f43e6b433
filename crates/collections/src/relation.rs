use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::fmt;

use itertools::Itertools;

use crate::VecSet;

/// A finite binary relation, i.e., a set of pairs `(from, to)`. The pairs are
/// stored as a map from every `from` to its nonempty image, which makes the
/// post image of a single element a lookup.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Relation<T> {
    /// Invariant: no key maps to an empty set.
    pairs: BTreeMap<T, VecSet<T>>,
}

impl<T: Ord + Clone> Relation<T> {
    /// Creates an empty relation.
    pub fn new() -> Self {
        Self { pairs: BTreeMap::new() }
    }

    /// Returns true iff the relation contains no pairs.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Returns the number of pairs in the relation.
    pub fn num_of_pairs(&self) -> usize {
        self.pairs.values().map(|image| image.len()).sum()
    }

    /// Adds the pair `(from, to)`, returns true iff it was not yet present.
    pub fn insert(&mut self, from: T, to: T) -> bool {
        self.pairs.entry(from).or_default().insert(to)
    }

    /// Adds all pairs `(from, t)` for `t` in `image`.
    pub fn insert_image(&mut self, from: T, image: VecSet<T>) {
        if image.is_empty() {
            return;
        }

        match self.pairs.entry(from) {
            Entry::Occupied(mut entry) => {
                let union = entry.get().union(&image);
                entry.insert(union);
            }
            Entry::Vacant(entry) => {
                entry.insert(image);
            }
        }
    }

    /// Returns true iff the pair `(from, to)` is in the relation.
    pub fn contains(&self, from: &T, to: &T) -> bool {
        self.pairs.get(from).is_some_and(|image| image.contains(to))
    }

    /// Returns the image of the given element, if it has any.
    pub fn image(&self, from: &T) -> Option<&VecSet<T>> {
        self.pairs.get(from)
    }

    /// Returns an iterator over the elements with a nonempty image together with that image.
    pub fn iter(&self) -> impl Iterator<Item = (&T, &VecSet<T>)> {
        self.pairs.iter()
    }

    /// Returns true iff every pair of this relation is also a pair of `other`.
    pub fn is_subset(&self, other: &Relation<T>) -> bool {
        self.pairs.iter().all(|(from, image)| {
            other
                .pairs
                .get(from)
                .is_some_and(|other_image| image.is_subset(other_image))
        })
    }

    /// Returns the union of both relations.
    pub fn union(&self, other: &Relation<T>) -> Relation<T> {
        let mut result = self.clone();
        for (from, image) in &other.pairs {
            result.insert_image(from.clone(), image.clone());
        }

        result
    }

    /// Returns the composition `self ; other`, i.e., the pairs `(x, z)` such
    /// that `(x, y)` in self and `(y, z)` in other for some `y`.
    pub fn compose(&self, other: &Relation<T>) -> Relation<T> {
        let mut result = Relation::new();
        for (from, image) in &self.pairs {
            let composed: VecSet<T> = image
                .iter()
                .filter_map(|middle| other.pairs.get(middle))
                .flat_map(|other_image| other_image.iter().cloned())
                .collect();

            result.insert_image(from.clone(), composed);
        }

        result
    }

    /// Returns the (non-reflexive) transitive closure of this relation.
    pub fn transitive_closure(&self) -> Relation<T> {
        let mut closure = self.clone();

        loop {
            // Extend every pair (x, y) by the pairs (y, z) of the current closure.
            let mut next = closure.clone();
            let mut added = false;
            for (from, image) in &closure.pairs {
                for middle in image {
                    if let Some(middle_image) = closure.pairs.get(middle) {
                        for to in middle_image {
                            added |= next.insert(from.clone(), to.clone());
                        }
                    }
                }
            }

            closure = next;
            if !added {
                return closure;
            }
        }
    }
}

impl<T: Ord + Clone> Default for Relation<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord + Clone> FromIterator<(T, T)> for Relation<T> {
    fn from_iter<I: IntoIterator<Item = (T, T)>>(iter: I) -> Self {
        let mut relation = Relation::new();
        for (from, to) in iter {
            relation.insert(from, to);
        }

        relation
    }
}

impl<T: fmt::Debug> fmt::Debug for Relation<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{{:?}}}",
            self.pairs
                .iter()
                .map(|(from, image)| format!("{from:?} -> {image:?}"))
                .format(", ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rand::Rng;
    use test_log::test;

    use buchi_utilities::random_test;

    use crate::vecset;

    /// Generates a random relation over the elements 0..num_of_elements.
    fn random_relation(rng: &mut impl Rng, num_of_elements: usize, num_of_pairs: usize) -> Relation<usize> {
        (0..num_of_pairs)
            .map(|_| (rng.random_range(0..num_of_elements), rng.random_range(0..num_of_elements)))
            .collect()
    }

    #[test]
    fn test_relation_compose() {
        let first: Relation<usize> = [(0, 1), (0, 2), (3, 4)].into_iter().collect();
        let second: Relation<usize> = [(1, 5), (2, 6), (5, 0)].into_iter().collect();

        let composed = first.compose(&second);
        assert_eq!(composed.image(&0), Some(&vecset![5, 6]));
        assert_eq!(composed.image(&3), None, "Keys with an empty image are dropped");
        assert_eq!(composed.num_of_pairs(), 2);
    }

    #[test]
    fn test_relation_union() {
        let first: Relation<usize> = [(0, 1), (1, 2)].into_iter().collect();
        let second: Relation<usize> = [(0, 3), (4, 4)].into_iter().collect();

        let union = first.union(&second);
        assert!(first.is_subset(&union));
        assert!(second.is_subset(&union));
        assert_eq!(union.num_of_pairs(), 4);
        assert_eq!(union.image(&0), Some(&vecset![1, 3]));
    }

    #[test]
    fn test_relation_transitive_closure() {
        let chain: Relation<usize> = [(0, 1), (1, 2), (2, 3)].into_iter().collect();
        let closure = chain.transitive_closure();

        assert!(closure.contains(&0, &3));
        assert!(closure.contains(&1, &3));
        assert!(!closure.contains(&0, &0), "The closure is not reflexive");
        assert_eq!(closure.num_of_pairs(), 6);

        let cycle: Relation<usize> = [(0, 1), (1, 0)].into_iter().collect();
        assert!(cycle.transitive_closure().contains(&0, &0));
    }

    #[test]
    fn test_random_transitive_closure() {
        random_test(100, |rng| {
            let num_of_pairs = rng.random_range(0..16);
            let relation = random_relation(rng, 8, num_of_pairs);
            let closure = relation.transitive_closure();

            assert!(relation.is_subset(&relation));
            assert!(relation.is_subset(&closure));
            assert!(closure.compose(&relation).is_subset(&closure));
            assert!(closure.compose(&closure).is_subset(&closure));
        });
    }
}
