use buchi_collections::Relation;
use buchi_collections::VecSet;

use crate::BuchiAutomaton;
use crate::StateIndex;
use crate::SymbolIndex;

/// The per-symbol transition relations of an automaton, indexed by
/// [`SymbolIndex`]. Symbols without (matching) transitions have an empty
/// relation.
#[derive(Clone, Debug)]
pub struct Context {
    relations: Vec<Relation<StateIndex>>,
}

impl Context {
    /// Builds the context by relating every state to the image computed by `post`.
    pub(crate) fn new<F>(automaton: &BuchiAutomaton, post: F) -> Self
    where
        F: Fn(StateIndex, SymbolIndex) -> VecSet<StateIndex>,
    {
        let relations = automaton
            .alphabet()
            .iter_symbols()
            .map(|symbol| {
                let mut relation = Relation::new();
                for state in automaton.iter_states() {
                    relation.insert_image(state, post(state, symbol));
                }

                relation
            })
            .collect();

        Self { relations }
    }

    /// Returns the relation for the given symbol.
    pub fn get(&self, symbol: SymbolIndex) -> &Relation<StateIndex> {
        &self.relations[*symbol]
    }
}

#[cfg(test)]
mod tests {
    use indoc::indoc;
    use test_log::test;

    use crate::Symbol;
    use crate::parse_ba_pair;

    #[test]
    fn test_context_and_final_context() {
        let (automaton, _) = parse_ba_pair(
            indoc! {"
                a,p->q
                a,q->r
                b,r->p
                r
            "},
            "c,s->s",
        )
        .unwrap();

        let a = automaton.alphabet().index_of(&Symbol::new("a")).unwrap();
        let c = automaton.alphabet().index_of(&Symbol::new("c")).unwrap();
        let p = automaton.state_index("p").unwrap();
        let q = automaton.state_index("q").unwrap();
        let r = automaton.state_index("r").unwrap();

        let context = automaton.context();
        assert!(context.get(a).contains(&p, &q));
        assert!(context.get(a).contains(&q, &r));
        assert_eq!(context.get(a).num_of_pairs(), 2);
        assert!(context.get(c).is_empty(), "Symbols of the other automaton have no transitions");

        // Only transitions touching the final state r remain.
        let final_context = automaton.final_context();
        assert!(!final_context.get(a).contains(&p, &q));
        assert!(final_context.get(a).contains(&q, &r));
    }
}
