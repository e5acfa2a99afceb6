use std::collections::HashMap;

use super::first_follow::{self, FirstFollow};
use super::normalizer::NormalizedGrammar;
use super::symbol::{FirstItem, FollowItem};
use crate::error::ConflictCell;

/// The LL(1) predictive parse table: a dense `table[row][col] -> rule
/// indices` grid, indexed by a non-terminal's row and a lookahead's column,
/// alongside the index maps that resolve a name to its row/column. A
/// well-formed table has at most one rule index per cell; [ParseTable::get]
/// exposes the raw (possibly multi-valued) cell regardless, so an emitter
/// can still inspect a conflicting table via [Grammar::try_make](crate::grammar::Grammar::try_make).
#[derive(Debug, Clone, Default)]
pub struct ParseTable {
    pub(crate) table: Vec<Vec<Vec<usize>>>,
    pub(crate) row_index: HashMap<String, usize>,
    pub(crate) col_index: HashMap<FollowItem, usize>,
}

impl ParseTable {
    pub fn get(&self, non_terminal: &str, lookahead: &FollowItem) -> &[usize] {
        let Some(&row) = self.row_index.get(non_terminal) else {
            return &[];
        };
        let Some(&col) = self.col_index.get(lookahead) else {
            return &[];
        };
        self.table[row][col].as_slice()
    }

    /// Row-major dense view: `rows()[row_index_of(nt)][col_index_of(la)]`.
    pub fn rows(&self) -> &[Vec<Vec<usize>>] {
        &self.table
    }

    pub fn row_index_of(&self, non_terminal: &str) -> Option<usize> {
        self.row_index.get(non_terminal).copied()
    }

    pub fn col_index_of(&self, lookahead: &FollowItem) -> Option<usize> {
        self.col_index.get(lookahead).copied()
    }

    /// Every non-empty cell as `((non-terminal, lookahead), rule indices)`,
    /// for conflict scanning and reporting.
    pub fn cells(&self) -> impl Iterator<Item = ((&str, &FollowItem), &[usize])> {
        self.row_index.iter().flat_map(move |(nt, &row)| {
            self.col_index.iter().filter_map(move |(la, &col)| {
                let rules = self.table[row][col].as_slice();
                if rules.is_empty() {
                    None
                } else {
                    Some(((nt.as_str(), la), rules))
                }
            })
        })
    }
}

fn lookahead_label(item: &FollowItem) -> String {
    match item {
        FollowItem::Terminal(t) => t.clone(),
        FollowItem::Eof => "$".to_string(),
    }
}

/// Populates `table[A][a]` for every rule `A -> alpha` and every lookahead
/// `a` that predicts it, and collects every cell with more than one rule
/// index as a [ConflictCell], sorted for deterministic reporting.
pub(crate) fn build(grammar: &NormalizedGrammar, ff: &FirstFollow) -> (ParseTable, Vec<ConflictCell>) {
    let mut row_index: HashMap<String, usize> = HashMap::new();
    for nt in &grammar.non_terminals {
        let next = row_index.len();
        row_index.entry(nt.clone()).or_insert(next);
    }

    let mut col_index: HashMap<FollowItem, usize> = HashMap::new();
    for t in &grammar.terminals {
        let next = col_index.len();
        col_index.entry(FollowItem::Terminal(t.clone())).or_insert(next);
    }
    let next = col_index.len();
    col_index.entry(FollowItem::Eof).or_insert(next);

    let mut table: Vec<Vec<Vec<usize>>> = vec![vec![Vec::new(); col_index.len()]; row_index.len()];
    let mut touched: Vec<(usize, usize)> = Vec::new();

    for (r, rule) in grammar.rules.iter().enumerate() {
        let alpha_first = first_follow::first_of_sequence(&rule.body, &ff.first);
        let row = row_index[&rule.head];

        for item in &alpha_first {
            if let FirstItem::Terminal(t) = item {
                let col = col_index[&FollowItem::Terminal(t.clone())];
                if table[row][col].is_empty() {
                    touched.push((row, col));
                }
                table[row][col].push(r);
            }
        }

        if alpha_first.contains(&FirstItem::Epsilon) {
            if let Some(follow_a) = ff.follow.get(&rule.head) {
                for b in follow_a {
                    let col = col_index[b];
                    if table[row][col].is_empty() {
                        touched.push((row, col));
                    }
                    table[row][col].push(r);
                }
            }
        }
    }

    // reverse lookups for reporting; only built over the cells actually touched.
    let nt_of_row: HashMap<usize, &str> = row_index.iter().map(|(nt, &r)| (r, nt.as_str())).collect();
    let la_of_col: HashMap<usize, &FollowItem> = col_index.iter().map(|(la, &c)| (c, la)).collect();

    let mut conflicts: Vec<ConflictCell> = touched
        .into_iter()
        .filter(|&(row, col)| table[row][col].len() > 1)
        .map(|(row, col)| ConflictCell {
            non_terminal: nt_of_row[&row].to_string(),
            lookahead: lookahead_label(la_of_col[&col]),
            rules: table[row][col].clone(),
        })
        .collect();
    conflicts.sort_by(|a, b| (&a.non_terminal, &a.lookahead).cmp(&(&b.non_terminal, &b.lookahead)));

    (ParseTable { table, row_index, col_index }, conflicts)
}

#[cfg(test)]
mod __tests__ {
    use super::*;
    use crate::grammar::first_follow::solve;
    use crate::grammar::normalizer::normalize;
    use crate::util::Declarations;

    fn decl(pairs: &[(&str, &str)]) -> Declarations {
        pairs
            .iter()
            .map(|&(n, p)| (n.to_string(), p.to_string()))
            .collect()
    }

    #[test]
    fn simple_grammar_has_no_conflicts() {
        let productions = decl(&[("S", "a S b |")]);
        let grammar = normalize("g", &productions, "S").unwrap();
        let ff = solve(&grammar);
        let (table, conflicts) = build(&grammar, &ff);
        assert!(conflicts.is_empty());
        assert_eq!(table.get("S", &FollowItem::Terminal("a".to_string())), &[0]);
        assert_eq!(table.get("S", &FollowItem::Eof), &[1]);
    }

    #[test]
    fn dense_rows_agree_with_get() {
        let productions = decl(&[("S", "a S b |")]);
        let grammar = normalize("g", &productions, "S").unwrap();
        let ff = solve(&grammar);
        let (table, _) = build(&grammar, &ff);

        let row = table.row_index_of("S").unwrap();
        let col = table.col_index_of(&FollowItem::Terminal("a".to_string())).unwrap();
        assert_eq!(
            table.rows()[row][col].as_slice(),
            table.get("S", &FollowItem::Terminal("a".to_string()))
        );

        let eof_col = table.col_index_of(&FollowItem::Eof).unwrap();
        assert_eq!(table.rows()[row][eof_col].as_slice(), table.get("S", &FollowItem::Eof));
    }

    #[test]
    fn first_first_overlap_is_a_conflict() {
        // S -> a | a b : both alternatives start with 'a'.
        let productions = decl(&[("S", "a | a b")]);
        let grammar = normalize("g", &productions, "S").unwrap();
        let ff = solve(&grammar);
        let (_, conflicts) = build(&grammar, &ff);
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].non_terminal, "S");
        assert_eq!(conflicts[0].lookahead, "a");
    }
}
