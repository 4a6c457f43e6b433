use std::fmt;

use buchi_collections::VecSet;
use buchi_utilities::TagIndex;

use crate::Alphabet;
use crate::Context;
use crate::SymbolIndex;

/// A unique type for the states.
pub struct StateTag;

/// The index for a state.
pub type StateIndex = TagIndex<usize, StateTag>;

/// A single state of the automaton, all adjacency is stored by index.
#[derive(Clone, Debug)]
pub(crate) struct State {
    /// The external label of the state, as it occurs in the input.
    pub(crate) label: String,
    pub(crate) is_final: bool,

    /// For every symbol index the successors following that symbol.
    pub(crate) successors: Vec<VecSet<StateIndex>>,

    /// The (state, symbol) pairs that have a transition to this state.
    pub(crate) predecessors: VecSet<(StateIndex, SymbolIndex)>,
}

/// Represents a Büchi automaton: an arena of states addressed by a dense
/// [`StateIndex`], with a single initial state and a set of final states.
///
/// The automaton is immutable once built, see [`crate::AutomatonBuilder`].
#[derive(Clone)]
pub struct BuchiAutomaton {
    states: Vec<State>,
    initial_state: StateIndex,
    final_states: VecSet<StateIndex>,
    alphabet: Alphabet,
}

impl BuchiAutomaton {
    pub(crate) fn new(states: Vec<State>, initial_state: StateIndex, alphabet: Alphabet) -> Self {
        let final_states = states
            .iter()
            .enumerate()
            .filter(|(_, state)| state.is_final)
            .map(|(index, _)| StateIndex::new(index))
            .collect();

        Self {
            states,
            initial_state,
            final_states,
            alphabet,
        }
    }

    /// Returns the index of the initial state.
    pub fn initial_state_index(&self) -> StateIndex {
        self.initial_state
    }

    /// Returns the set of final states.
    pub fn final_states(&self) -> &VecSet<StateIndex> {
        &self.final_states
    }

    /// Returns true iff the given state is final.
    pub fn is_final(&self, state: StateIndex) -> bool {
        self.states[*state].is_final
    }

    /// Returns the alphabet of the automaton.
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Returns the number of states.
    pub fn num_of_states(&self) -> usize {
        self.states.len()
    }

    /// Returns the number of transitions.
    pub fn num_of_transitions(&self) -> usize {
        self.states
            .iter()
            .map(|state| state.successors.iter().map(|to| to.len()).sum::<usize>())
            .sum()
    }

    /// Iterate over all state indices of the automaton.
    pub fn iter_states(&self) -> impl Iterator<Item = StateIndex> + use<> {
        (0..self.num_of_states()).map(StateIndex::new)
    }

    /// Returns the external label of the given state.
    pub fn state_label(&self, state: StateIndex) -> &str {
        &self.states[*state].label
    }

    /// Returns the index of the state with the given label.
    pub fn state_index(&self, label: &str) -> Option<StateIndex> {
        self.states
            .iter()
            .position(|state| state.label == label)
            .map(StateIndex::new)
    }

    /// Returns the successors of the state following the given symbol.
    pub fn post(&self, state: StateIndex, symbol: SymbolIndex) -> &VecSet<StateIndex> {
        &self.states[*state].successors[*symbol]
    }

    /// Returns the successors of the state following any symbol.
    pub fn post_all(&self, state: StateIndex) -> VecSet<StateIndex> {
        self.states[*state]
            .successors
            .iter()
            .flat_map(|to| to.iter().copied())
            .collect()
    }

    /// Returns `post(state, symbol)` if the state is final, and otherwise
    /// only the final successors following the given symbol.
    pub fn post_final(&self, state: StateIndex, symbol: SymbolIndex) -> VecSet<StateIndex> {
        let successors = self.post(state, symbol);
        if self.is_final(state) {
            successors.clone()
        } else {
            successors.iter().copied().filter(|to| self.is_final(*to)).collect()
        }
    }

    /// Returns the states reachable from some state in `states` following the given symbol.
    pub fn post_set(&self, states: &VecSet<StateIndex>, symbol: SymbolIndex) -> VecSet<StateIndex> {
        states
            .iter()
            .flat_map(|state| self.post(*state, symbol).iter().copied())
            .collect()
    }

    /// Returns the states reachable from some state in `states` following any symbol.
    pub fn post_set_all(&self, states: &VecSet<StateIndex>) -> VecSet<StateIndex> {
        states
            .iter()
            .flat_map(|state| {
                self.states[**state]
                    .successors
                    .iter()
                    .flat_map(|to| to.iter().copied())
            })
            .collect()
    }

    /// Returns the outgoing transitions of the state as (symbol, successors) pairs.
    pub fn outgoing_transitions(
        &self,
        state: StateIndex,
    ) -> impl Iterator<Item = (SymbolIndex, &VecSet<StateIndex>)> + '_ {
        self.states[*state]
            .successors
            .iter()
            .enumerate()
            .filter(|(_, to)| !to.is_empty())
            .map(|(symbol, to)| (SymbolIndex::new(symbol), to))
    }

    /// Returns the (predecessor, symbol) pairs of all incoming transitions.
    pub fn predecessors(&self, state: StateIndex) -> &VecSet<(StateIndex, SymbolIndex)> {
        &self.states[*state].predecessors
    }

    /// Returns for every symbol the relation of all its transitions.
    pub fn context(&self) -> Context {
        Context::new(self, |state, symbol| self.post(state, symbol).clone())
    }

    /// Returns for every symbol the relation of its transitions of which at
    /// least one endpoint is final.
    pub fn final_context(&self) -> Context {
        Context::new(self, |state, symbol| self.post_final(state, symbol))
    }
}

impl fmt::Display for BuchiAutomaton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Number of states: {}", self.num_of_states())?;
        writeln!(f, "Number of final states: {}", self.final_states.len())?;
        writeln!(f, "Number of symbols: {}", self.alphabet.len())?;
        write!(f, "Number of transitions: {}", self.num_of_transitions())
    }
}

impl fmt::Debug for BuchiAutomaton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{self}")?;
        writeln!(f, "Initial state: {}", self.state_label(self.initial_state))?;

        for state in self.iter_states() {
            let marker = if self.is_final(state) { " (final)" } else { "" };
            writeln!(f, "State {}{marker}", self.state_label(state))?;

            for (symbol, successors) in self.outgoing_transitions(state) {
                for to in successors {
                    writeln!(
                        f,
                        "    {} --[{}]-> {}",
                        self.state_label(state),
                        self.alphabet.symbol(symbol),
                        self.state_label(*to)
                    )?;
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use buchi_collections::vecset;
    use indoc::indoc;
    use test_log::test;

    use crate::Symbol;
    use crate::parse_ba_pair;

    #[test]
    fn test_post_and_predecessors() {
        let (automaton, _) = parse_ba_pair(
            indoc! {"
                a,q0->q1
                b,q0->q0
                a,q1->q1
                q1
            "},
            "a,r->r",
        )
        .unwrap();

        let a = automaton.alphabet().index_of(&Symbol::new("a")).unwrap();
        let b = automaton.alphabet().index_of(&Symbol::new("b")).unwrap();
        let q0 = automaton.state_index("q0").unwrap();
        let q1 = automaton.state_index("q1").unwrap();

        assert_eq!(automaton.initial_state_index(), q0);
        assert_eq!(automaton.post(q0, a), &vecset![q1]);
        assert_eq!(automaton.post_all(q0), vecset![q0, q1]);
        assert!(automaton.post(q1, b).is_empty());
        assert_eq!(automaton.predecessors(q1), &vecset![(q0, a), (q1, a)]);

        // q0 is not final, so only the final successors are kept.
        assert!(automaton.post_final(q0, b).is_empty());
        assert_eq!(automaton.post_final(q0, a), vecset![q1]);

        assert_eq!(automaton.post_set_all(&vecset![q0, q1]), vecset![q0, q1]);
        assert_eq!(automaton.post_set(&vecset![q0, q1], a), vecset![q1]);
        assert_eq!(automaton.num_of_transitions(), 3);
    }
}
