use log::debug;
use rustc_hash::FxHashMap;
use thiserror::Error;

use buchi_collections::VecSet;

use crate::Alphabet;
use crate::BuchiAutomaton;
use crate::buchi_automaton::State;
use crate::StateIndex;
use crate::Symbol;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum BuildError {
    #[error("Initial state not specified")]
    MissingInitialState,

    #[error("Edges not specified")]
    MissingEdges,

    #[error("Final states not specified")]
    MissingFinalStates,

    #[error("Alphabet not specified")]
    MissingAlphabet,

    #[error("Symbol {0} of edge {1} is not part of the alphabet")]
    UnknownSymbol(Symbol, String),
}

/// An edge between two states, given by their labels.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Edge {
    pub from: String,
    pub symbol: Symbol,
    pub to: String,
}

impl Edge {
    pub fn new(from: impl Into<String>, symbol: Symbol, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            symbol,
            to: to.into(),
        }
    }
}

/// Collects the components of a [`BuchiAutomaton`], where states are given by
/// their labels, and assigns the dense state indices once in [`Self::build`].
///
/// All four components are required; the automaton may use a larger
/// alphabet than the symbols occurring on its edges, which is how two
/// automata are put over a shared alphabet.
#[derive(Default)]
pub struct AutomatonBuilder {
    states: Vec<String>,
    initial_state: Option<String>,
    edges: Option<Vec<Edge>>,
    final_states: Option<Vec<String>>,
    alphabet: Option<Alphabet>,
}

impl AutomatonBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the given states before all others, such that they obtain
    /// the indices `0..labels.len()` in order. This is optional, states are
    /// also introduced by the other components.
    pub fn with_states(mut self, labels: Vec<String>) -> Self {
        self.states = labels;
        self
    }

    /// Uses the state with the given label as initial state.
    pub fn with_initial_state(mut self, label: impl Into<String>) -> Self {
        self.initial_state = Some(label.into());
        self
    }

    /// Uses the given edges, duplicated edges are merged.
    pub fn with_edges(mut self, edges: Vec<Edge>) -> Self {
        self.edges = Some(edges);
        self
    }

    /// Uses the states with the given labels as final states.
    pub fn with_final_states(mut self, labels: Vec<String>) -> Self {
        self.final_states = Some(labels);
        self
    }

    /// Uses the given alphabet, which must contain the symbols of all edges.
    pub fn with_alphabet(mut self, alphabet: Alphabet) -> Self {
        self.alphabet = Some(alphabet);
        self
    }

    /// Builds the automaton. The explicitly registered states obtain the first
    /// indices, followed by the initial state, the final states and then the
    /// remaining states in the order of the edges.
    pub fn build(self) -> Result<BuchiAutomaton, BuildError> {
        let initial_state = self.initial_state.ok_or(BuildError::MissingInitialState)?;
        let edges = self.edges.ok_or(BuildError::MissingEdges)?;
        let final_states = self.final_states.ok_or(BuildError::MissingFinalStates)?;
        let alphabet = self.alphabet.ok_or(BuildError::MissingAlphabet)?;

        let mut indices: FxHashMap<String, StateIndex> = FxHashMap::default();
        let mut states: Vec<State> = Vec::new();
        let mut insert_state = |label: &str| -> StateIndex {
            if let Some(index) = indices.get(label) {
                return *index;
            }

            let index = StateIndex::new(states.len());
            states.push(State {
                label: label.to_string(),
                is_final: false,
                successors: vec![VecSet::new(); alphabet.len()],
                predecessors: VecSet::new(),
            });
            indices.insert(label.to_string(), index);
            index
        };

        for label in &self.states {
            insert_state(label);
        }

        let initial = insert_state(&initial_state);
        let finals: Vec<StateIndex> = final_states.iter().map(|label| insert_state(label)).collect();

        let mut transitions = Vec::with_capacity(edges.len());
        for edge in &edges {
            let symbol = alphabet
                .index_of(&edge.symbol)
                .ok_or_else(|| BuildError::UnknownSymbol(edge.symbol.clone(), format!("{}->{}", edge.from, edge.to)))?;

            let from = insert_state(&edge.from);
            let to = insert_state(&edge.to);
            transitions.push((from, symbol, to));
        }

        for index in finals {
            states[*index].is_final = true;
        }

        for (from, symbol, to) in transitions {
            states[*from].successors[*symbol].insert(to);
            states[*to].predecessors.insert((from, symbol));
        }

        debug!(
            "Built automaton with {} states and {} edges",
            states.len(),
            edges.len()
        );

        Ok(BuchiAutomaton::new(states, initial, alphabet))
    }
}
