use rand::Rng;

use crate::Alphabet;
use crate::AutomatonBuilder;
use crate::BuchiAutomaton;
use crate::Edge;
use crate::Symbol;

/// Returns an alphabet with the given number of lower case letters.
pub fn random_alphabet(num_of_symbols: u32) -> Alphabet {
    assert!(
        num_of_symbols <= 26,
        "Too many symbols requested, we only support alphabetic symbols."
    );

    Alphabet::new((0..num_of_symbols).map(|i| {
        Symbol::new(
            char::from_digit(i + 10, 36)
                .expect("Radix is less than 37, so should not panic")
                .to_string(),
        )
    }))
}

/// Generates a random automaton over the given alphabet with the desired
/// number of states and maximum out degree. Every state is final with
/// probability `final_probability`, and state zero is initial.
pub fn random_automaton(
    rng: &mut impl Rng,
    alphabet: &Alphabet,
    num_of_states: usize,
    outdegree: usize,
    final_probability: f64,
) -> BuchiAutomaton {
    assert!(num_of_states > 0, "An automaton requires at least an initial state");
    assert!(!alphabet.is_empty(), "Transitions require at least one symbol");

    let symbols: Vec<&Symbol> = alphabet.iter().collect();
    let mut edges = Vec::new();
    for from in 0..num_of_states {
        // Introduce outgoing transitions for this state based on the desired out degree.
        for _ in 0..rng.random_range(0..=outdegree) {
            let symbol = symbols[rng.random_range(0..symbols.len())].clone();
            let to = rng.random_range(0..num_of_states);
            edges.push(Edge::new(format!("s{from}"), symbol, format!("s{to}")));
        }
    }

    let final_states = (0..num_of_states)
        .filter(|_| rng.random_bool(final_probability))
        .map(|state| format!("s{state}"))
        .collect();

    // Every state is listed up front, such that its index matches the number in its label.
    AutomatonBuilder::new()
        .with_states((0..num_of_states).map(|state| format!("s{state}")).collect())
        .with_initial_state("s0")
        .with_edges(edges)
        .with_final_states(final_states)
        .with_alphabet(alphabet.clone())
        .build()
        .expect("A random automaton over its own alphabet is always well formed")
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    use buchi_utilities::random_test;

    #[test]
    fn test_random_automaton() {
        random_test(100, |rng| {
            let alphabet = random_alphabet(3);
            let automaton = random_automaton(rng, &alphabet, 10, 3, 0.3);

            assert_eq!(automaton.num_of_states(), 10);
            assert_eq!(automaton.state_label(automaton.initial_state_index()), "s0");

            // Every outgoing transition is mirrored by a predecessor.
            for state in automaton.iter_states() {
                for (symbol, successors) in automaton.outgoing_transitions(state) {
                    for to in successors {
                        assert!(automaton.predecessors(*to).contains(&(state, symbol)));
                    }
                }
            }
        });
    }
}
