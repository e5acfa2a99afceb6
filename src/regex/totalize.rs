use std::collections::HashMap;

use super::dfa::{DenseTable, Dfa};
use super::subset::RawDfa;
use crate::util::StateId;

/// Adds an explicit sink state whenever the partial transition function of
/// `raw` has fewer than `|alphabet| * |states|` entries. The sink
/// self-loops on every symbol and is never accepting. Produces the dense
/// `(state_index, symbol_index, table)` representation the public query
/// surface reads.
pub(crate) fn totalize(raw: RawDfa) -> Dfa {
    let RawDfa {
        mut states,
        alphabet,
        start,
        accepting,
        labels,
        mut transitions,
    } = raw;

    let total = alphabet.len() * states.len();
    if transitions.len() < total {
        let sink = StateId::from(states.len());
        let existing: Vec<StateId> = states.clone();
        states.push(sink);
        for &q in &existing {
            for &c in &alphabet {
                transitions.entry((q, c)).or_insert(sink);
            }
        }
        for &c in &alphabet {
            transitions.entry((sink, c)).or_insert(sink);
        }
    }

    let state_index: HashMap<StateId, usize> =
        states.iter().enumerate().map(|(i, &s)| (s, i)).collect();
    let symbol_index: HashMap<char, usize> =
        alphabet.iter().enumerate().map(|(i, &c)| (c, i)).collect();

    let mut table = vec![vec![states[0]; states.len()]; alphabet.len()];
    for (&(q, c), &target) in &transitions {
        let si = symbol_index[&c];
        let qi = state_index[&q];
        table[si][qi] = target;
    }

    Dfa {
        states,
        alphabet,
        start,
        accepting,
        labels,
        table: DenseTable {
            table,
            state_index,
            symbol_index,
        },
    }
}

#[cfg(test)]
mod __tests__ {
    use super::*;
    use crate::regex::{class_expander, concat, lexer, nfa, shunt, subset};
    use std::collections::HashMap as Map;

    fn compiled(pattern: &str) -> RawDfa {
        let scanned = lexer::scan("t", pattern).unwrap();
        let expanded = class_expander::expand("t", scanned).unwrap();
        let with_concat = concat::insert(expanded);
        let postfix = shunt::to_postfix("t", with_concat).unwrap();
        let mut builder = nfa::NfaBuilder::new();
        let (start, accept) = nfa::build_fragment("t", &postfix, &mut builder).unwrap();
        let mut labels = Map::new();
        labels.insert(accept, "t".to_string());
        subset::build(&builder, start, &labels, &["t".to_string()])
    }

    #[test]
    fn adds_sink_for_partial_single_literal_dfa() {
        let raw = compiled("a");
        let before_states = raw.states.len();
        let dfa = totalize(raw);
        assert_eq!(dfa.states.len(), before_states + 1);
        let sink = *dfa.states.last().unwrap();
        assert!(!dfa.accepting.contains(&sink));
        assert_eq!(dfa.table.state_at('a', sink), Some(sink));
    }

    #[test]
    fn every_cell_is_defined_after_totalizing() {
        let raw = compiled("a|b");
        let dfa = totalize(raw);
        for &q in &dfa.states {
            for &c in &dfa.alphabet {
                assert!(dfa.table.state_at(c, q).is_some());
            }
        }
    }
}
