use std::collections::{HashMap, HashSet};

use super::normalizer::NormalizedGrammar;
use super::symbol::{FirstItem, FollowItem, GrammarSymbol};

/// FIRST and FOLLOW sets for every grammar symbol.
#[derive(Debug, Clone)]
pub(crate) struct FirstFollow {
    pub first: HashMap<GrammarSymbol, HashSet<FirstItem>>,
    pub follow: HashMap<String, HashSet<FollowItem>>,
}

fn first_of_symbol(
    sym: &GrammarSymbol,
    first: &HashMap<GrammarSymbol, HashSet<FirstItem>>,
) -> HashSet<FirstItem> {
    match sym {
        GrammarSymbol::Terminal(t) => {
            let mut set = HashSet::new();
            set.insert(FirstItem::Terminal(t.clone()));
            set
        }
        GrammarSymbol::NonTerminal(_) => first.get(sym).cloned().unwrap_or_default(),
    }
}

/// FIRST of a symbol sequence: the empty sequence is `{ε}`; otherwise union
/// in each symbol's non-ε FIRST items until one is reached whose FIRST
/// excludes ε, adding ε itself only if every symbol's FIRST contained it.
pub(crate) fn first_of_sequence(
    seq: &[GrammarSymbol],
    first: &HashMap<GrammarSymbol, HashSet<FirstItem>>,
) -> HashSet<FirstItem> {
    let mut result = HashSet::new();
    if seq.is_empty() {
        result.insert(FirstItem::Epsilon);
        return result;
    }
    let mut all_epsilon = true;
    for sym in seq {
        let symbol_first = first_of_symbol(sym, first);
        for item in &symbol_first {
            if !matches!(item, FirstItem::Epsilon) {
                result.insert(item.clone());
            }
        }
        if !symbol_first.contains(&FirstItem::Epsilon) {
            all_epsilon = false;
            break;
        }
    }
    if all_epsilon {
        result.insert(FirstItem::Epsilon);
    }
    result
}

/// Runs the FIRST fixed-point to convergence, then the FOLLOW fixed-point
/// (seeded with `$` in `FOLLOW(start)`) to convergence. Both loops terminate
/// because each set only grows, over a finite universe of
/// terminals/non-terminals.
pub(crate) fn solve(grammar: &NormalizedGrammar) -> FirstFollow {
    let mut first: HashMap<GrammarSymbol, HashSet<FirstItem>> = HashMap::new();
    for nt in &grammar.non_terminals {
        first.insert(GrammarSymbol::NonTerminal(nt.clone()), HashSet::new());
    }
    for t in &grammar.terminals {
        let mut set = HashSet::new();
        set.insert(FirstItem::Terminal(t.clone()));
        first.insert(GrammarSymbol::Terminal(t.clone()), set);
    }

    loop {
        let mut changed = false;
        for rule in &grammar.rules {
            let seq_first = first_of_sequence(&rule.body, &first);
            let entry = first
                .entry(GrammarSymbol::NonTerminal(rule.head.clone()))
                .or_default();
            for item in seq_first {
                if entry.insert(item) {
                    changed = true;
                }
            }
        }
        crate::util::level().trace(crate::util::Log::Verbose(()), "first", &changed);
        if !changed {
            break;
        }
    }

    let mut follow: HashMap<String, HashSet<FollowItem>> = HashMap::new();
    for nt in &grammar.non_terminals {
        follow.insert(nt.clone(), HashSet::new());
    }
    follow
        .entry(grammar.start.clone())
        .or_default()
        .insert(FollowItem::Eof);

    loop {
        let mut changed = false;
        for rule in &grammar.rules {
            for (i, sym) in rule.body.iter().enumerate() {
                let GrammarSymbol::NonTerminal(b) = sym else {
                    continue;
                };
                let beta = &rule.body[i + 1..];
                let beta_first = first_of_sequence(beta, &first);

                let mut to_add: HashSet<FollowItem> = HashSet::new();
                for item in &beta_first {
                    if let FirstItem::Terminal(t) = item {
                        to_add.insert(FollowItem::Terminal(t.clone()));
                    }
                }
                if beta_first.contains(&FirstItem::Epsilon) {
                    if let Some(follow_a) = follow.get(&rule.head).cloned() {
                        to_add.extend(follow_a);
                    }
                }

                let entry = follow.entry(b.clone()).or_default();
                for item in to_add {
                    if entry.insert(item) {
                        changed = true;
                    }
                }
            }
        }
        crate::util::level().trace(crate::util::Log::Verbose(()), "follow", &changed);
        if !changed {
            break;
        }
    }

    FirstFollow { first, follow }
}
