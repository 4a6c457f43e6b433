use std::fmt;

use log::debug;
use log::log_enabled;
use log::trace;

use buchi_automata::BuchiAutomaton;
use buchi_automata::StateIndex;
use buchi_automata::SymbolIndex;
use buchi_collections::VecSet;

use crate::Antichain;
use crate::PartialComparator;

/// A least fixpoint problem over the states of an automaton, solved by [`kleene`].
///
/// Every state is associated with an antichain of elements, which initially
/// only contains the seeded elements. A transition `p --[a]-> s` propagates
/// every element `e` at `p` to `transfer(e, a)` at `s`.
pub trait FixpointProblem {
    type Element: Clone + PartialEq + fmt::Debug;
    type Comparator: PartialComparator<Self::Element> + Clone;

    /// A short name used in the logging.
    fn name(&self) -> String;

    /// Returns the comparator that orders the elements of every entry.
    fn comparator(&self) -> Self::Comparator;

    /// Returns the elements that the vector is seeded with.
    fn initial_elements(&self) -> Vec<(StateIndex, Self::Element)>;

    /// Returns the element obtained by extending the given element with the symbol.
    fn transfer(&self, element: &Self::Element, symbol: SymbolIndex) -> Self::Element;
}

/// A single entry of the [`FixpointVector`].
#[derive(Clone)]
struct VectorEntry<T, C> {
    antichain: Antichain<T, C>,

    /// The elements that were added to the antichain during the last
    /// iteration, only these have to be propagated to the successors.
    inner_frontier: Vec<T>,
}

/// Associates an antichain to every state of an automaton, see [`FixpointProblem`].
#[derive(Clone)]
pub struct FixpointVector<T, C> {
    entries: Vec<VectorEntry<T, C>>,
}

impl<T: Clone + PartialEq + fmt::Debug, C: PartialComparator<T> + Clone> FixpointVector<T, C> {
    /// Creates the initial vector of the problem, in which the inner frontier
    /// of every seeded entry is its full content. Returns the vector together
    /// with the seeded states.
    pub fn new<P>(automaton: &BuchiAutomaton, problem: &P) -> (Self, VecSet<StateIndex>)
    where
        P: FixpointProblem<Element = T, Comparator = C>,
    {
        let comparator = problem.comparator();
        let mut entries: Vec<VectorEntry<T, C>> = automaton
            .iter_states()
            .map(|_| VectorEntry {
                antichain: Antichain::new(comparator.clone()),
                inner_frontier: Vec::new(),
            })
            .collect();

        let mut seeded = VecSet::new();
        for (state, element) in problem.initial_elements() {
            entries[*state].antichain.glb_with(element);
            seeded.insert(state);
        }

        for state in &seeded {
            let entry = &mut entries[**state];
            entry.inner_frontier = entry.antichain.iter().cloned().collect();
        }

        (Self { entries }, seeded)
    }

    /// Returns the antichain associated with the given state.
    pub fn get(&self, state: StateIndex) -> &Antichain<T, C> {
        &self.entries[*state].antichain
    }

    /// Returns the inner frontier of the given state.
    pub fn inner_frontier(&self, state: StateIndex) -> &[T] {
        &self.entries[*state].inner_frontier
    }

    /// Updates the entries of the states in `frontier` with the inner
    /// frontiers of their predecessors in `previous`. Returns the states whose
    /// entry was modified.
    pub fn iterate<P>(
        &mut self,
        automaton: &BuchiAutomaton,
        problem: &P,
        previous: &FixpointVector<T, C>,
        frontier: &VecSet<StateIndex>,
    ) -> VecSet<StateIndex>
    where
        P: FixpointProblem<Element = T, Comparator = C>,
    {
        let mut changed = VecSet::new();
        for state in frontier {
            let entry = &mut self.entries[**state].antichain;

            let mut modified = false;
            for (predecessor, symbol) in automaton.predecessors(*state) {
                for element in &previous.entries[**predecessor].inner_frontier {
                    modified |= entry.glb_with(problem.transfer(element, *symbol));
                }
            }

            if modified {
                changed.insert(*state);
            }
        }

        changed
    }

    /// The inner frontier of every changed entry becomes the elements of
    /// `after` that are not present in this vector, all other inner frontiers
    /// are cleared.
    pub fn update_inner_frontiers(&mut self, after: &FixpointVector<T, C>, changed: &VecSet<StateIndex>) {
        for (index, entry) in self.entries.iter_mut().enumerate() {
            if changed.contains(&StateIndex::new(index)) {
                entry.inner_frontier = after.entries[index]
                    .antichain
                    .iter()
                    .filter(|element| !entry.antichain.contains(element))
                    .cloned()
                    .collect();
            } else {
                entry.inner_frontier.clear();
            }
        }
    }

    /// Returns true iff for every given state, every element of this entry is
    /// lesser or equal to some element of the entry in `other`.
    pub fn entries_are_comparable(&self, other: &FixpointVector<T, C>, states: &VecSet<StateIndex>) -> bool {
        states.iter().all(|state| {
            self.entries[**state]
                .antichain
                .iter()
                .all(|element| other.entries[**state].antichain.subsumes(element))
        })
    }

    /// Replaces the antichains of the given states by those in `other`.
    pub fn copy_entries(&mut self, other: &FixpointVector<T, C>, states: &VecSet<StateIndex>) {
        for state in states {
            self.entries[**state].antichain = other.entries[**state].antichain.clone();
        }
    }

    /// Returns the number of elements over all entries.
    pub fn total_size(&self) -> usize {
        self.entries.iter().map(|entry| entry.antichain.len()).sum()
    }

    /// Returns the number of elements over all inner frontiers.
    pub fn inner_frontiers_total_size(&self) -> usize {
        self.entries.iter().map(|entry| entry.inner_frontier.len()).sum()
    }

    /// Returns an object that displays the entries of the final states.
    pub fn display<'a>(&'a self, automaton: &'a BuchiAutomaton) -> FixpointVectorDisplay<'a, T, C> {
        FixpointVectorDisplay { vector: self, automaton }
    }
}

/// Displays the entries of the final states of a [`FixpointVector`].
pub struct FixpointVectorDisplay<'a, T, C> {
    vector: &'a FixpointVector<T, C>,
    automaton: &'a BuchiAutomaton,
}

impl<T: fmt::Debug, C> fmt::Display for FixpointVectorDisplay<'_, T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, state) in self.automaton.final_states().iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }

            let antichain = &self.vector.entries[**state].antichain;
            write!(
                f,
                "{}: #{} = {:?}",
                self.automaton.state_label(*state),
                antichain.len(),
                antichain
            )?;
        }
        write!(f, ")")
    }
}

/// Computes the least fixpoint of the given problem on the automaton, by
/// Kleene iteration on two vectors. Only the successors of the entries that
/// changed in the last iteration are recomputed, and only with the elements
/// that were added to their predecessors.
///
/// Returns the fixpoint together with the number of iterations.
pub fn kleene<P: FixpointProblem>(
    automaton: &BuchiAutomaton,
    problem: &P,
) -> (FixpointVector<P::Element, P::Comparator>, usize) {
    let (mut before, mut changed) = FixpointVector::new(automaton, problem);
    let mut after = before.clone();

    if log_enabled!(log::Level::Trace) {
        trace!("Initial vector for {}: {}", problem.name(), before.display(automaton));
    }

    let mut iterations = 0;
    loop {
        // The states that have a predecessor that changed in the last iteration.
        let outer_frontier = automaton.post_set_all(&changed);
        debug!("Iteration {iterations} of {}", problem.name());
        if log_enabled!(log::Level::Trace) {
            trace!("Frontier {outer_frontier:?}");
            trace!("Vector before iteration: {}", before.display(automaton));
        }

        changed = after.iterate(automaton, problem, &before, &outer_frontier);
        before.update_inner_frontiers(&after, &changed);
        let reached_fixpoint = after.entries_are_comparable(&before, &changed);

        debug!(
            "{} entries changed, {} elements were added",
            changed.len(),
            before.inner_frontiers_total_size()
        );
        if log_enabled!(log::Level::Trace) {
            trace!("Vector after iteration: {}", after.display(automaton));
        }

        before.copy_entries(&after, &changed);
        iterations += 1;

        if reached_fixpoint {
            break;
        }
    }

    if log_enabled!(log::Level::Trace) {
        trace!("Fixpoint for {}: {}", problem.name(), before.display(automaton));
    }

    (before, iterations)
}
