use std::collections::{BTreeSet, HashMap, HashSet};

use super::dfa::Dfa;
use super::subset::RawDfa;
use super::totalize;
use crate::util::{StateArena, StateId};

/// Partition refinement over a totalized DFA (Moore's algorithm). The
/// initial partition groups accepting states **by label** rather than into
/// one merged accepting block (`{ {accepts labeled t1}, {accepts labeled
/// t2}, ..., Q\F }`), so no minimized state can ever answer to two token
/// names at once. Blocks are then split by transition signature until no
/// split changes anything.
pub(crate) fn minimize(dfa: Dfa) -> Dfa {
    let Dfa {
        states,
        alphabet,
        start,
        accepting,
        labels,
        table,
    } = dfa;

    let mut by_label: HashMap<Option<String>, BTreeSet<StateId>> = HashMap::new();
    for &q in &states {
        let key = if accepting.contains(&q) {
            Some(labels.get(&q).cloned().unwrap_or_default())
        } else {
            None
        };
        by_label.entry(key).or_default().insert(q);
    }
    let mut blocks: Vec<BTreeSet<StateId>> = by_label.into_values().collect();
    crate::util::level().trace(
        crate::util::Log::Default(()),
        "minimize",
        format!("initial partition has {} blocks", blocks.len()),
    );

    loop {
        let block_of: HashMap<StateId, usize> = blocks
            .iter()
            .enumerate()
            .flat_map(|(i, b)| b.iter().map(move |&q| (q, i)))
            .collect();

        let mut next_blocks: Vec<BTreeSet<StateId>> = Vec::new();
        let mut changed = false;
        for block in &blocks {
            let mut groups: HashMap<Vec<usize>, BTreeSet<StateId>> = HashMap::new();
            for &q in block {
                let signature: Vec<usize> = alphabet
                    .iter()
                    .map(|&c| {
                        let target = table
                            .state_at(c, q)
                            .expect("totalized DFA is defined for every symbol");
                        block_of[&target]
                    })
                    .collect();
                groups.entry(signature).or_default().insert(q);
            }
            if groups.len() > 1 {
                changed = true;
            }
            next_blocks.extend(groups.into_values());
        }
        blocks = next_blocks;
        crate::util::level().trace(
            crate::util::Log::Verbose(()),
            "minimize",
            format!("refined to {} blocks, changed={}", blocks.len(), changed),
        );
        if !changed {
            break;
        }
    }

    let mut arena = StateArena::new();
    let mut new_id_of_block: Vec<StateId> = Vec::with_capacity(blocks.len());
    let mut rep_of_old: HashMap<StateId, StateId> = HashMap::new();
    for block in &blocks {
        let new_id = arena.fresh();
        new_id_of_block.push(new_id);
        for &q in block {
            rep_of_old.insert(q, new_id);
        }
    }

    let new_states: Vec<StateId> = (0..blocks.len()).map(StateId::from).collect();
    let new_start = rep_of_old[&start];

    let mut new_accepting = HashSet::new();
    let mut new_labels = HashMap::new();
    let mut new_transitions: HashMap<(StateId, char), StateId> = HashMap::new();
    for (i, block) in blocks.iter().enumerate() {
        let new_id = new_id_of_block[i];
        let rep = *block.iter().next().expect("blocks are never empty");
        if accepting.contains(&rep) {
            new_accepting.insert(new_id);
            if let Some(label) = labels.get(&rep) {
                new_labels.insert(new_id, label.clone());
            }
        }
        for &c in &alphabet {
            if let Some(target) = table.state_at(c, rep) {
                new_transitions.insert((new_id, c), rep_of_old[&target]);
            }
        }
    }

    totalize::totalize(RawDfa {
        states: new_states,
        alphabet,
        start: new_start,
        accepting: new_accepting,
        labels: new_labels,
        transitions: new_transitions,
    })
}

#[cfg(test)]
mod __tests__ {
    use super::*;
    use crate::regex::{class_expander, concat, lexer, nfa, shunt, subset};
    use std::collections::HashMap as Map;

    fn compile_scanner_dfa(pattern: &str) -> Dfa {
        let scanned = lexer::scan("t", pattern).unwrap();
        let expanded = class_expander::expand("t", scanned).unwrap();
        let with_concat = concat::insert(expanded);
        let postfix = shunt::to_postfix("t", with_concat).unwrap();
        let mut builder = nfa::NfaBuilder::new();
        let (start, accept) = nfa::build_fragment("t", &postfix, &mut builder).unwrap();
        let mut labels = Map::new();
        labels.insert(accept, "t".to_string());
        let raw = subset::build(&builder, start, &labels, &["t".to_string()]);
        totalize::totalize(raw)
    }

    #[test]
    fn minimized_star_dfa_collapses_to_one_state() {
        // over the single-symbol alphabet {a}, every string is accepted, so
        // the minimal DFA needs no reject path and collapses to one state.
        let dfa = compile_scanner_dfa("a*");
        let minimized = minimize(dfa);
        assert_eq!(minimized.states().len(), 1);
        assert!(minimized.accepting().contains(&minimized.start()));
        assert_eq!(
            minimized.table().state_at('a', minimized.start()),
            Some(minimized.start())
        );
    }

    #[test]
    fn minimized_dfa_keeps_accept_and_sink_distinct() {
        // "ab*" needs a start state, an accepting self-loop on 'b', and a
        // dead sink for any 'a' once already inside the loop.
        let dfa = compile_scanner_dfa("ab*");
        let minimized = minimize(dfa);
        assert_eq!(minimized.states().len(), 3);
        assert!(!minimized.accepting().contains(&minimized.start()));

        let accept = minimized.table().state_at('a', minimized.start()).unwrap();
        assert!(minimized.accepting().contains(&accept));
        assert_eq!(minimized.table().state_at('b', accept), Some(accept));

        let dead = minimized.table().state_at('a', accept).unwrap();
        assert!(!minimized.accepting().contains(&dead));
        assert_ne!(dead, minimized.start());
    }

    #[test]
    fn minimized_dfa_stays_total() {
        let dfa = compile_scanner_dfa("ab|ac");
        let minimized = minimize(dfa);
        for &q in minimized.states() {
            for &c in minimized.alphabet() {
                assert!(minimized.table().state_at(c, q).is_some());
            }
        }
    }
}
