/// An element of a rule body: either a terminal (a token name that never
/// appears as a production LHS) or a non-terminal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GrammarSymbol {
    Terminal(String),
    NonTerminal(String),
}

impl GrammarSymbol {
    pub fn name(&self) -> &str {
        match self {
            GrammarSymbol::Terminal(n) | GrammarSymbol::NonTerminal(n) => n,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, GrammarSymbol::Terminal(_))
    }
}

/// A member of a FIRST set: a terminal, or the distinct ε sentinel — never
/// representable by a user-declared terminal name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FirstItem {
    Terminal(String),
    Epsilon,
}

/// A member of a FOLLOW set: a terminal, or the distinct `$` (EOF) sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FollowItem {
    Terminal(String),
    Eof,
}
