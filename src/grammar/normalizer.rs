use std::collections::HashSet;

use super::rule::Rule;
use super::symbol::GrammarSymbol;
use crate::error::CompileError;
use crate::util::Declarations;

/// The result of normalizing a declarative grammar: the full numbered rule
/// list plus the non-terminal/terminal partition.
#[derive(Debug, Clone)]
pub(crate) struct NormalizedGrammar {
    pub start: String,
    pub non_terminals: HashSet<String>,
    pub terminals: HashSet<String>,
    pub rules: Vec<Rule>,
}

/// Splits every production body on `|` into alternatives, each alternative
/// on whitespace into a symbol sequence, and numbers the resulting rules in
/// declaration order (productions outer, alternatives inner). An
/// alternative with no whitespace-separated tokens (a bare `|`, or one
/// trailing/leading a body) naturally yields an ε-production body.
pub(crate) fn normalize(
    name: &str,
    productions: &Declarations,
    start: &str,
) -> Result<NormalizedGrammar, CompileError> {
    if name.is_empty() {
        return Err(CompileError::InvalidType("grammar name must not be empty".to_string()));
    }
    if start.is_empty() {
        return Err(CompileError::InvalidType("start symbol must not be empty".to_string()));
    }
    if productions.is_empty() {
        return Err(CompileError::InvalidType(
            "a grammar needs at least one production".to_string(),
        ));
    }

    let non_terminals: HashSet<String> = productions.names().map(|s| s.to_string()).collect();

    let mut rules = Vec::new();
    for (head, body) in productions.iter() {
        for alternative in body.split('|') {
            let symbols: Vec<GrammarSymbol> = alternative
                .split_whitespace()
                .map(|token| {
                    if non_terminals.contains(token) {
                        GrammarSymbol::NonTerminal(token.to_string())
                    } else {
                        GrammarSymbol::Terminal(token.to_string())
                    }
                })
                .collect();
            rules.push(Rule {
                head: head.to_string(),
                body: symbols,
            });
        }
    }

    let terminals: HashSet<String> = rules
        .iter()
        .flat_map(|r| r.body.iter())
        .filter(|s| s.is_terminal())
        .map(|s| s.name().to_string())
        .collect();

    if !non_terminals.contains(start) {
        return Err(CompileError::UnknownStart {
            start: start.to_string(),
        });
    }

    Ok(NormalizedGrammar {
        start: start.to_string(),
        non_terminals,
        terminals,
        rules,
    })
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
    fn splits_alternatives_and_symbols() {
        let productions = decl(&[("S", "a S b | c")]);
        let grammar = normalize("g", &productions, "S").unwrap();
        assert_eq!(grammar.rules.len(), 2);
        assert_eq!(grammar.rules[0].body.len(), 3);
        assert_eq!(grammar.rules[1].body.len(), 1);
    }

    #[test]
    fn bare_bar_is_epsilon_rule() {
        let productions = decl(&[("S", "a |")]);
        let grammar = normalize("g", &productions, "S").unwrap();
        assert_eq!(grammar.rules.len(), 2);
        assert!(grammar.rules[1].is_epsilon());
    }

    #[test]
    fn unknown_start_errors() {
        let productions = decl(&[("S", "a")]);
        let err = normalize("g", &productions, "T").unwrap_err();
        assert!(matches!(err, CompileError::UnknownStart { .. }));
    }

    #[test]
    fn terminals_exclude_nonterminal_names() {
        let productions = decl(&[("S", "A b"), ("A", "c")]);
        let grammar = normalize("g", &productions, "S").unwrap();
        assert!(grammar.terminals.contains("b"));
        assert!(grammar.terminals.contains("c"));
        assert!(!grammar.terminals.contains("A"));
    }
}
