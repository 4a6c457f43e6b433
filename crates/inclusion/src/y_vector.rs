use buchi_automata::BuchiAutomaton;
use buchi_automata::Context;
use buchi_automata::StateIndex;
use buchi_automata::SymbolIndex;

use crate::FixpointProblem;
use crate::FixpointVector;
use crate::RelationPair;
use crate::RelationPairComparator;
use crate::kleene;

/// The vector of pairs of relations over the states of `b` that is indexed by
/// the states of `a`.
pub type YVector = FixpointVector<RelationPair, RelationPairComparator>;

/// For a final state `f` of `a` and every state `s` of `a`, the fixpoint
/// contains the minimal pairs `(y1, y2)` such that for a nonempty word `w`
/// leading from `f` to `s` in `a`, `y1` relates the states of `b` connected by
/// `w` and `y2` those connected by `w` while visiting a final state.
pub struct YProblem<'a> {
    a: &'a BuchiAutomaton,
    final_state: StateIndex,
    context: &'a Context,
    final_context: &'a Context,
}

impl<'a> YProblem<'a> {
    /// Creates the problem for the given final state of `a`, where the
    /// contexts are those of the second automaton.
    pub fn new(a: &'a BuchiAutomaton, final_state: StateIndex, context: &'a Context, final_context: &'a Context) -> Self {
        debug_assert!(a.is_final(final_state), "The Y vector is computed for a final state");

        Self {
            a,
            final_state,
            context,
            final_context,
        }
    }
}

impl FixpointProblem for YProblem<'_> {
    type Element = RelationPair;
    type Comparator = RelationPairComparator;

    fn name(&self) -> String {
        format!("Y[{}]", self.a.state_label(self.final_state))
    }

    fn comparator(&self) -> Self::Comparator {
        RelationPairComparator
    }

    fn initial_elements(&self) -> Vec<(StateIndex, Self::Element)> {
        let mut result = Vec::new();
        for (symbol, successors) in self.a.outgoing_transitions(self.final_state) {
            for successor in successors {
                result.push((
                    *successor,
                    RelationPair::new(
                        self.context.get(symbol).clone(),
                        self.final_context.get(symbol).clone(),
                    ),
                ));
            }
        }

        result
    }

    fn transfer(&self, element: &Self::Element, symbol: SymbolIndex) -> Self::Element {
        let context = self.context.get(symbol);
        let final_context = self.final_context.get(symbol);

        RelationPair::new(
            element.first.compose(context),
            element
                .first
                .compose(final_context)
                .union(&element.second.compose(context)),
        )
    }
}

/// Computes the Y vector of `a` and `b` for the given final state of `a`,
/// returns it together with the number of iterations. The contexts are those
/// of `b`, such that they can be shared between final states.
pub fn compute_y(
    a: &BuchiAutomaton,
    final_state: StateIndex,
    context: &Context,
    final_context: &Context,
) -> (YVector, usize) {
    kleene(a, &YProblem::new(a, final_state, context, final_context))
}
