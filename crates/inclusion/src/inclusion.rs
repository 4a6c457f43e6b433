use std::fmt;
use std::time::Duration;
use std::time::Instant;

use log::debug;
use log::info;

use buchi_automata::BuchiAutomaton;
use buchi_automata::StateIndex;
use buchi_collections::VecSet;
use buchi_utilities::Timing;

use crate::RelationPair;
use crate::compute_x;
use crate::compute_y;

/// Statistics of a single inclusion check, these never affect the verdict.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InclusionStatistics {
    /// The number of Kleene iterations to compute the X vector.
    pub x_iterations: usize,
    /// The total number of elements in the X vector.
    pub x_antichain_size: usize,
    /// The number of Kleene iterations over all computed Y vectors.
    pub y_total_iterations: usize,
    /// The number of computed Y vectors, at most one per final state.
    pub num_of_y_vectors: usize,
    /// The total number of elements over all computed Y vectors.
    pub y_total_antichain_size: usize,
    pub elapsed: Duration,
}

impl InclusionStatistics {
    /// Returns the average number of iterations per Y vector.
    pub fn y_average_iterations(&self) -> f64 {
        if self.num_of_y_vectors > 0 {
            self.y_total_iterations as f64 / self.num_of_y_vectors as f64
        } else {
            0.0
        }
    }

    /// Returns the average number of elements per Y vector.
    pub fn y_average_antichain_size(&self) -> f64 {
        if self.num_of_y_vectors > 0 {
            self.y_total_antichain_size as f64 / self.num_of_y_vectors as f64
        } else {
            0.0
        }
    }
}

impl fmt::Display for InclusionStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "X iterations: {}", self.x_iterations)?;
        writeln!(f, "X antichain size: {}", self.x_antichain_size)?;
        writeln!(f, "Y vectors: {}", self.num_of_y_vectors)?;
        writeln!(f, "Y total iterations: {}", self.y_total_iterations)?;
        writeln!(f, "Y average iterations: {:.2}", self.y_average_iterations())?;
        writeln!(f, "Y average antichain size: {:.2}", self.y_average_antichain_size())?;
        write!(f, "Time: {:.3}s", self.elapsed.as_secs_f64())
    }
}

/// The verdict of [`is_included`] together with its statistics.
#[derive(Clone, Debug, PartialEq)]
pub struct InclusionResult {
    pub included: bool,
    pub statistics: InclusionStatistics,
}

/// Decides whether the language of `a` is included in the language of `b`,
/// both automata must be defined over the same alphabet.
///
/// Computes the X vector once, and a Y vector for every final state `f` of
/// `a`. The inclusion is refuted as soon as an element `x` of X\[f\] and a
/// pair `y` of Y\[f\] do not form an accepting lasso of `b`, see
/// [`has_accepting_lasso`].
pub fn is_included(a: &BuchiAutomaton, b: &BuchiAutomaton, timing: &Timing) -> InclusionResult {
    debug_assert_eq!(
        a.alphabet(),
        b.alphabet(),
        "Both automata must be defined over the same alphabet"
    );

    let start = Instant::now();
    let mut statistics = InclusionStatistics::default();

    let mut x_timer = timing.start("x vector");
    let (x, x_iterations) = compute_x(a, b);
    x_timer.finish();

    statistics.x_iterations = x_iterations;
    statistics.x_antichain_size = x.total_size();
    info!(
        "Computed X in {} iterations with {} elements",
        x_iterations, statistics.x_antichain_size
    );

    let context = b.context();
    let final_context = b.final_context();

    let mut included = true;
    'outer: for final_state in a.final_states() {
        let mut y_timer = timing.start("y vector");
        let (y, y_iterations) = compute_y(a, *final_state, &context, &final_context);
        y_timer.finish();

        statistics.num_of_y_vectors += 1;
        statistics.y_total_iterations += y_iterations;
        statistics.y_total_antichain_size += y.total_size();
        debug!(
            "Computed Y[{}] in {} iterations with {} elements",
            a.state_label(*final_state),
            y_iterations,
            y.total_size()
        );

        for x_element in x.get(*final_state) {
            for y_element in y.get(*final_state) {
                if !has_accepting_lasso(x_element, y_element) {
                    info!(
                        "Inclusion refuted at final state {} by {:?} and {:?}",
                        a.state_label(*final_state),
                        x_element,
                        y_element
                    );
                    included = false;
                    break 'outer;
                }
            }
        }
    }

    statistics.elapsed = start.elapsed();
    InclusionResult { included, statistics }
}

/// Returns true iff some state `p` in `x` reaches a state `q` by a nonempty
/// sequence of `y.first` steps, such that `q` lies on a cycle of
/// `y.first* ; y.second ; y.first*`, where `*` is the (non-reflexive)
/// transitive closure.
pub fn has_accepting_lasso(x: &VecSet<StateIndex>, y: &RelationPair) -> bool {
    let closure = y.first.transitive_closure();
    let composition = closure.compose(&y.second).compose(&closure);

    x.iter()
        .filter_map(|p| closure.image(p))
        .flat_map(|image| image.iter())
        .any(|q| composition.contains(q, q))
}

#[cfg(test)]
mod tests {
    use super::*;

    use indoc::indoc;
    use test_log::test;

    use buchi_automata::AutomatonBuilder;
    use buchi_automata::Edge;
    use buchi_automata::parse_ba_pair;
    use buchi_automata::random_alphabet;
    use buchi_automata::random_automaton;
    use buchi_collections::Relation;
    use buchi_collections::vecset;
    use buchi_utilities::random_test;
    use rand::Rng;

    fn check(first: &str, second: &str) -> bool {
        let (a, b) = parse_ba_pair(first, second).unwrap();
        is_included(&a, &b, &Timing::new()).included
    }

    const A_OMEGA: &str = include_str!("../../../test-automata/a_omega.ba");
    const AB_OMEGA: &str = include_str!("../../../test-automata/ab_omega.ba");
    const INFINITELY_MANY_A: &str = include_str!("../../../test-automata/infinitely_many_a.ba");
    const FINITELY_MANY_B: &str = include_str!("../../../test-automata/finitely_many_b.ba");

    #[test]
    fn test_single_letter_in_two_letters() {
        assert!(check(A_OMEGA, AB_OMEGA));
        assert!(!check(AB_OMEGA, A_OMEGA));
    }

    #[test]
    fn test_empty_language_is_included() {
        let empty = indoc! {"
            q0
            a,q0->q0
            a,q1->q1
            q1
        "};

        assert!(check(empty, A_OMEGA));
        assert!(check(empty, AB_OMEGA));
    }

    #[test]
    fn test_not_included_in_empty_language() {
        let empty = indoc! {"
            r0
            a,r0->r0
            b,r2->r2
            r2
        "};

        assert!(!check(A_OMEGA, empty));
    }

    #[test]
    fn test_test_automata() {
        assert!(check(FINITELY_MANY_B, INFINITELY_MANY_A));
        assert!(!check(INFINITELY_MANY_A, FINITELY_MANY_B));
        assert!(!check(AB_OMEGA, INFINITELY_MANY_A));
        assert!(check(A_OMEGA, FINITELY_MANY_B));
        assert!(check(INFINITELY_MANY_A, AB_OMEGA));
    }

    #[test]
    fn test_inclusion_is_monotone() {
        // The language of FINITELY_MANY_B is included in that of INFINITELY_MANY_A.
        assert!(check(A_OMEGA, FINITELY_MANY_B));
        assert!(check(A_OMEGA, INFINITELY_MANY_A));
        assert!(check(A_OMEGA, AB_OMEGA));
    }

    /// Returns a copy of the automaton with additional random edges and final
    /// states, which accepts a superset of its language.
    fn random_enlargement(rng: &mut impl Rng, automaton: &BuchiAutomaton, num_of_edges: usize) -> BuchiAutomaton {
        let alphabet = automaton.alphabet();
        let label = |state: StateIndex| automaton.state_label(state).to_string();

        let mut edges = Vec::new();
        for state in automaton.iter_states() {
            for (symbol, successors) in automaton.outgoing_transitions(state) {
                for to in successors {
                    edges.push(Edge::new(label(state), alphabet.symbol(symbol).clone(), label(*to)));
                }
            }
        }

        let num_of_states = automaton.num_of_states();
        let symbols: Vec<_> = alphabet.iter().cloned().collect();
        for _ in 0..num_of_edges {
            let from = StateIndex::new(rng.random_range(0..num_of_states));
            let to = StateIndex::new(rng.random_range(0..num_of_states));
            let symbol = symbols[rng.random_range(0..symbols.len())].clone();
            edges.push(Edge::new(label(from), symbol, label(to)));
        }

        let final_states = automaton
            .iter_states()
            .filter(|state| automaton.is_final(*state) || rng.random_bool(0.2))
            .map(label)
            .collect();

        AutomatonBuilder::new()
            .with_states(automaton.iter_states().map(label).collect())
            .with_initial_state(label(automaton.initial_state_index()))
            .with_edges(edges)
            .with_final_states(final_states)
            .with_alphabet(alphabet.clone())
            .build()
            .unwrap()
    }

    #[test]
    fn test_random_monotonicity() {
        random_test(100, |rng| {
            let alphabet = random_alphabet(2);
            let a = random_automaton(rng, &alphabet, 4, 2, 0.3);
            let b = random_automaton(rng, &alphabet, 4, 3, 0.4);
            let num_of_edges = rng.random_range(1..6);
            let c = random_enlargement(rng, &b, num_of_edges);

            if is_included(&a, &b, &Timing::new()).included {
                assert!(
                    is_included(&a, &c, &Timing::new()).included,
                    "Enlarging {b:?} to {c:?} must preserve the inclusion of {a:?}"
                );
            }

            assert!(is_included(&b, &c, &Timing::new()).included);
        });
    }

    #[test]
    fn test_inclusion_statistics() {
        let (a, b) = parse_ba_pair(FINITELY_MANY_B, INFINITELY_MANY_A).unwrap();
        let timing = Timing::new();
        let result = is_included(&a, &b, &timing);

        assert!(result.included);
        assert!(result.statistics.x_iterations >= 1);
        assert!(result.statistics.x_antichain_size >= 1);
        assert_eq!(result.statistics.num_of_y_vectors, a.final_states().len());
        assert!(result.statistics.y_average_iterations() >= 1.0);
        assert!(timing.total("x vector").is_some());
    }

    #[test]
    fn test_has_accepting_lasso() {
        let p = StateIndex::new(0);
        let q = StateIndex::new(1);

        // p reaches q, which loops through a final state.
        let first: Relation<StateIndex> = [(p, q), (q, q)].into_iter().collect();
        let second: Relation<StateIndex> = [(q, q)].into_iter().collect();
        assert!(has_accepting_lasso(&vecset![p], &RelationPair::new(first.clone(), second)));

        // Without visiting a final state there is no accepting lasso.
        assert!(!has_accepting_lasso(
            &vecset![p],
            &RelationPair::new(first.clone(), Relation::new())
        ));

        // The final loop on p is not reachable from q.
        let second: Relation<StateIndex> = [(p, p)].into_iter().collect();
        assert!(!has_accepting_lasso(&vecset![q], &RelationPair::new(first, second)));
    }

    #[test]
    fn test_random_reflexivity() {
        random_test(100, |rng| {
            let alphabet = random_alphabet(2);
            let automaton = random_automaton(rng, &alphabet, 6, 3, 0.3);

            let result = is_included(&automaton, &automaton, &Timing::new());
            assert!(result.included, "Inclusion must be reflexive for {automaton:?}");
        });
    }
}
