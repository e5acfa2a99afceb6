use std::collections::{BTreeSet, HashMap, HashSet};

use super::nfa::NfaBuilder;
use crate::util::{StateArena, StateId};

/// The not-yet-total output of subset construction: a partial transition
/// function (a `(state, symbol)` pair with no recorded entry means "no
/// successor"), handed to [totalize](super::totalize::totalize) before it
/// is usable as a [Dfa](super::dfa::Dfa).
pub(crate) struct RawDfa {
    pub states: Vec<StateId>,
    pub alphabet: Vec<char>,
    pub start: StateId,
    pub accepting: HashSet<StateId>,
    pub labels: HashMap<StateId, String>,
    pub transitions: HashMap<(StateId, char), StateId>,
}

/// Subset construction over the shared NFA arena: each DFA state is the
/// ε-closure of a set of NFA states, canonicalized as a `BTreeSet<StateId>`
/// key so already-seen subsets are recognized in O(log n) rather than
/// re-explored. `priority` gives the declaration order of token names; when
/// a DFA state's underlying NFA-state set spans more than one token's
/// accept state, the earliest-declared name wins.
pub(crate) fn build(
    nfa: &NfaBuilder,
    nfa_start: StateId,
    nfa_labels: &HashMap<StateId, String>,
    priority: &[String],
) -> RawDfa {
    let alphabet: Vec<char> = nfa.alphabet().iter().copied().collect();
    let mut closure_cache = HashMap::new();
    let mut arena = StateArena::new();

    let mut dfa_states: Vec<BTreeSet<StateId>> = Vec::new();
    let mut index_of: HashMap<BTreeSet<StateId>, StateId> = HashMap::new();
    let mut transitions: HashMap<(StateId, char), StateId> = HashMap::new();

    let start_set = nfa.epsilon_closure([nfa_start], &mut closure_cache);
    let start_id = arena.fresh();
    index_of.insert(start_set.clone(), start_id);
    dfa_states.push(start_set);

    let mut worklist = vec![start_id];
    while let Some(current) = worklist.pop() {
        let current_set = dfa_states[current.index()].clone();
        for &c in &alphabet {
            let mut moved = BTreeSet::new();
            for &nfa_state in &current_set {
                for &(sym, to) in nfa.transitions_from(nfa_state) {
                    if sym == c {
                        moved.insert(to);
                    }
                }
            }
            if moved.is_empty() {
                continue;
            }
            let closure = nfa.epsilon_closure(moved, &mut closure_cache);
            let target = match index_of.get(&closure) {
                Some(&id) => id,
                None => {
                    let id = arena.fresh();
                    index_of.insert(closure.clone(), id);
                    dfa_states.push(closure);
                    worklist.push(id);
                    id
                }
            };
            transitions.insert((current, c), target);
        }
    }

    let mut accepting = HashSet::new();
    let mut labels = HashMap::new();
    for (nfa_set, &dfa_id) in &index_of {
        let mut matched: Vec<&str> = nfa_set
            .iter()
            .filter_map(|q| nfa_labels.get(q).map(|name| name.as_str()))
            .collect();
        if matched.is_empty() {
            continue;
        }
        matched.sort_by_key(|name| priority.iter().position(|p| p == name).unwrap_or(usize::MAX));
        accepting.insert(dfa_id);
        labels.insert(dfa_id, matched[0].to_string());
    }

    let states: Vec<StateId> = (0..dfa_states.len()).map(StateId::from).collect();

    RawDfa {
        states,
        alphabet,
        start: start_id,
        accepting,
        labels,
        transitions,
    }
}

#[cfg(test)]
mod __tests__ {
    use super::*;
    use crate::regex::{class_expander, concat, lexer, nfa, shunt};

    fn compile_one(pattern: &str) -> (NfaBuilder, StateId, HashMap<StateId, String>) {
        let scanned = lexer::scan("t", pattern).unwrap();
        let expanded = class_expander::expand("t", scanned).unwrap();
        let with_concat = concat::insert(expanded);
        let postfix = shunt::to_postfix("t", with_concat).unwrap();
        let mut builder = NfaBuilder::new();
        let (start, accept) = nfa::build_fragment("t", &postfix, &mut builder).unwrap();
        let mut labels = HashMap::new();
        labels.insert(accept, "t".to_string());
        (builder, start, labels)
    }

    #[test]
    fn single_literal_has_two_states() {
        let (builder, start, labels) = compile_one("a");
        let raw = build(&builder, start, &labels, &["t".to_string()]);
        assert_eq!(raw.states.len(), 2);
        assert_eq!(raw.accepting.len(), 1);
    }

    #[test]
    fn star_accepts_empty_and_self_loops_on_a() {
        let (builder, start, labels) = compile_one("a*");
        let raw = build(&builder, start, &labels, &["t".to_string()]);
        assert!(raw.accepting.contains(&raw.start));
        let next = *raw.transitions.get(&(raw.start, 'a')).unwrap();
        assert!(raw.accepting.contains(&next));
        assert_eq!(raw.transitions.get(&(next, 'a')), Some(&next));
    }
}
