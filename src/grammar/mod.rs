mod first_follow;
mod normalizer;
mod rule;
mod symbol;
mod table;

use std::collections::{HashMap, HashSet};

pub use rule::Rule;
pub use symbol::{FirstItem, FollowItem, GrammarSymbol};
pub use table::ParseTable;

use crate::error::{CompileError, ConflictCell};
use crate::util::Declarations;

/// FIRST/FOLLOW sets and an LL(1) parse table derived from a declarative
/// context-free grammar.
#[derive(Debug)]
pub struct Grammar {
    name: String,
    productions: Declarations,
    start: String,
    non_terminals: HashSet<String>,
    terminals: HashSet<String>,
    first: HashMap<GrammarSymbol, HashSet<FirstItem>>,
    follow: HashMap<String, HashSet<FollowItem>>,
    rules: Vec<Rule>,
    table: ParseTable,
}

impl Grammar {
    /// Normalizes, solves FIRST/FOLLOW, and builds the LL(1) table, failing
    /// with `CompileError::Conflict` if any table cell ends up with more
    /// than one rule.
    pub fn make(name: &str, productions: Declarations, start: &str) -> Result<Grammar, CompileError> {
        let (grammar, conflicts) = Self::try_make(name, productions, start)?;
        if conflicts.is_empty() {
            Ok(grammar)
        } else {
            Err(CompileError::Conflict(conflicts))
        }
    }

    /// Builds the grammar without failing on LL(1) conflicts, returning the
    /// raw (possibly multi-valued) table alongside its conflict list, for
    /// emitters that want to inspect a conflicting grammar's table rather
    /// than only learn that it conflicts.
    pub fn try_make(
        name: &str,
        productions: Declarations,
        start: &str,
    ) -> Result<(Grammar, Vec<ConflictCell>), CompileError> {
        let normalized = normalizer::normalize(name, &productions, start)?;
        let ff = first_follow::solve(&normalized);
        let (table, conflicts) = table::build(&normalized, &ff);

        let grammar = Grammar {
            name: name.to_string(),
            productions,
            start: normalized.start,
            non_terminals: normalized.non_terminals,
            terminals: normalized.terminals,
            first: ff.first,
            follow: ff.follow,
            rules: normalized.rules,
            table,
        };
        Ok((grammar, conflicts))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn productions(&self) -> &Declarations {
        &self.productions
    }

    pub fn start(&self) -> &str {
        &self.start
    }

    pub fn terminals(&self) -> &HashSet<String> {
        &self.terminals
    }

    pub fn nonterminals(&self) -> &HashSet<String> {
        &self.non_terminals
    }

    pub fn first(&self) -> &HashMap<GrammarSymbol, HashSet<FirstItem>> {
        &self.first
    }

    pub fn follow(&self) -> &HashMap<String, HashSet<FollowItem>> {
        &self.follow
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn table(&self) -> &ParseTable {
        &self.table
    }
}

#[cfg(test)]
mod __tests__ {
    use super::*;

    fn decl(pairs: &[(&str, &str)]) -> Declarations {
        pairs
            .iter()
            .map(|&(n, p)| (n.to_string(), p.to_string()))
            .collect()
    }

    #[test]
    fn makes_a_conflict_free_grammar() {
        let productions = decl(&[("S", "a S b |")]);
        let grammar = Grammar::make("g", productions, "S").unwrap();
        assert_eq!(grammar.rules().len(), 2);
        assert!(grammar.nonterminals().contains("S"));
        assert!(grammar.terminals().contains("a"));
    }

    #[test]
    fn make_fails_on_conflict() {
        let productions = decl(&[("S", "a | a b")]);
        let err = Grammar::make("g", productions, "S").unwrap_err();
        assert!(matches!(err, CompileError::Conflict(_)));
    }

    #[test]
    fn try_make_surfaces_conflicts_without_failing() {
        let productions = decl(&[("S", "a | a b")]);
        let (grammar, conflicts) = Grammar::try_make("g", productions, "S").unwrap();
        assert_eq!(conflicts.len(), 1);
        assert_eq!(
            grammar.table().get("S", &FollowItem::Terminal("a".to_string())).len(),
            2
        );
    }

    #[test]
    fn unknown_start_propagates() {
        let productions = decl(&[("S", "a")]);
        let err = Grammar::make("g", productions, "T").unwrap_err();
        assert!(matches!(err, CompileError::UnknownStart { .. }));
    }
}
