use std::collections::{HashMap, HashSet};

use super::class_expander;
use super::concat;
use super::dfa::{DenseTable, Dfa};
use super::lexer;
use super::minimize;
use super::nfa::{self, NfaBuilder};
use super::shunt;
use super::subset;
use super::totalize;
use crate::error::CompileError;
use crate::util::{Declarations, StateId};

/// A minimal total DFA compiled from a set of named regular expressions,
/// with accepting-state token labels.
#[derive(Debug)]
pub struct Scanner {
    name: String,
    expressions: Declarations,
    dfa: Dfa,
}

impl Scanner {
    /// Runs the full regex pipeline — scan, expand classes, insert explicit
    /// concatenation, shunt to postfix, Thompson-construct, union, subset
    /// construct, totalize, minimize — over every declared pattern, in
    /// declaration order. The per-token NFAs share one arena and are joined
    /// under a fresh global start state before subset construction runs once
    /// over the whole union.
    pub fn compile(name: &str, expressions: Declarations) -> Result<Scanner, CompileError> {
        if name.is_empty() {
            return Err(CompileError::InvalidType("scanner name must not be empty".to_string()));
        }
        if expressions.is_empty() {
            return Err(CompileError::InvalidType(
                "a scanner needs at least one token expression".to_string(),
            ));
        }

        let mut builder = NfaBuilder::new();
        let mut labels: HashMap<StateId, String> = HashMap::new();
        let mut fragment_starts: Vec<StateId> = Vec::new();
        let priority: Vec<String> = expressions.names().map(|s| s.to_string()).collect();

        for (token_name, pattern) in expressions.iter() {
            let scanned = lexer::scan(token_name, pattern)?;
            let expanded = class_expander::expand(token_name, scanned)?;
            let with_concat = concat::insert(expanded);
            let postfix = shunt::to_postfix(token_name, with_concat)?;
            let (start, accept) = nfa::build_fragment(token_name, &postfix, &mut builder)?;
            labels.insert(accept, token_name.to_string());
            fragment_starts.push(start);
        }

        let global_start = builder.fresh();
        for &start in &fragment_starts {
            builder.add_epsilon(global_start, start);
        }

        let raw = subset::build(&builder, global_start, &labels, &priority);
        let total = totalize::totalize(raw);
        let dfa = minimize::minimize(total);

        Ok(Scanner {
            name: name.to_string(),
            expressions,
            dfa,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn expressions(&self) -> &Declarations {
        &self.expressions
    }

    pub fn states(&self) -> &[StateId] {
        self.dfa.states()
    }

    pub fn alphabet(&self) -> &[char] {
        self.dfa.alphabet()
    }

    pub fn transitions(&self) -> &DenseTable {
        self.dfa.table()
    }

    pub fn start(&self) -> StateId {
        self.dfa.start()
    }

    pub fn accepting(&self) -> &HashSet<StateId> {
        self.dfa.accepting()
    }

    pub fn label(&self, state: StateId) -> Option<&str> {
        self.dfa.label(state)
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
    fn compiles_two_disjoint_literals() {
        let scanner = Scanner::compile("s", decl(&[("FOO", "foo"), ("BAR", "bar")])).unwrap();
        assert_eq!(scanner.name(), "s");
        assert!(!scanner.accepting().is_empty());
        for &q in scanner.accepting() {
            assert!(scanner.label(q).is_some());
        }
    }

    #[test]
    fn earlier_declaration_wins_on_overlap() {
        // both patterns match the literal "a"; FIRST should win the accept label.
        let scanner = Scanner::compile("s", decl(&[("FIRST", "a"), ("SECOND", "a")])).unwrap();
        let target = scanner
            .transitions()
            .state_at('a', scanner.start())
            .unwrap();
        assert_eq!(scanner.label(target), Some("FIRST"));
    }

    #[test]
    fn rejects_empty_name() {
        let err = Scanner::compile("", decl(&[("A", "a")])).unwrap_err();
        assert!(matches!(err, CompileError::InvalidType(_)));
    }

    #[test]
    fn rejects_no_expressions() {
        let err = Scanner::compile("s", decl(&[])).unwrap_err();
        assert!(matches!(err, CompileError::InvalidType(_)));
    }
}
