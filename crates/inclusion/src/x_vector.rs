use buchi_automata::BuchiAutomaton;
use buchi_automata::StateIndex;
use buchi_automata::SymbolIndex;
use buchi_collections::VecSet;

use crate::FixpointProblem;
use crate::FixpointVector;
use crate::SubsetComparator;
use crate::kleene;

/// The vector of sets of states of `b` that is indexed by the states of `a`.
pub type XVector = FixpointVector<VecSet<StateIndex>, SubsetComparator>;

/// For every state `s` of `a`, the fixpoint contains the minimal sets of
/// states of `b` that are reached by a word that also leads from the initial
/// state of `a` to `s`.
pub struct XProblem<'a> {
    a: &'a BuchiAutomaton,
    b: &'a BuchiAutomaton,
}

impl<'a> XProblem<'a> {
    pub fn new(a: &'a BuchiAutomaton, b: &'a BuchiAutomaton) -> Self {
        Self { a, b }
    }
}

impl FixpointProblem for XProblem<'_> {
    type Element = VecSet<StateIndex>;
    type Comparator = SubsetComparator;

    fn name(&self) -> String {
        "X".to_string()
    }

    fn comparator(&self) -> Self::Comparator {
        SubsetComparator
    }

    fn initial_elements(&self) -> Vec<(StateIndex, Self::Element)> {
        vec![(
            self.a.initial_state_index(),
            VecSet::singleton(self.b.initial_state_index()),
        )]
    }

    fn transfer(&self, element: &Self::Element, symbol: SymbolIndex) -> Self::Element {
        self.b.post_set(element, symbol)
    }
}

/// Computes the X vector of `a` and `b`, returns it together with the number of iterations.
pub fn compute_x(a: &BuchiAutomaton, b: &BuchiAutomaton) -> (XVector, usize) {
    kleene(a, &XProblem::new(a, b))
}

#[cfg(test)]
mod tests {
    use super::*;

    use indoc::indoc;
    use test_log::test;

    use buchi_automata::parse_ba_pair;
    use buchi_collections::vecset;

    #[test]
    fn test_x_vector() {
        let (a, b) = parse_ba_pair(
            indoc! {"
                a,q0->q1
                b,q1->q1
            "},
            indoc! {"
                a,r0->r1
                a,r0->r2
                b,r1->r1
                b,r2->r0
            "},
        )
        .unwrap();

        let (x, _) = compute_x(&a, &b);
        let q0 = a.state_index("q0").unwrap();
        let q1 = a.state_index("q1").unwrap();
        let r0 = b.state_index("r0").unwrap();
        let r1 = b.state_index("r1").unwrap();
        let r2 = b.state_index("r2").unwrap();

        assert_eq!(x.get(q0).iter().collect::<Vec<_>>(), vec![&vecset![r0]]);

        // The words a, ab and abb reach {r1, r2}, {r0, r1} and {r1}, of which
        // only the minimal set is kept.
        assert!(!x.get(q1).contains(&vecset![r1, r2]));
        assert!(!x.get(q1).contains(&vecset![r0, r1]));
        assert!(x.get(q1).contains(&vecset![r1]));
        assert_eq!(x.get(q1).len(), 1);
    }
}
