use std::fmt::{Display, Formatter};

/// A single conflicting cell in an LL(1) parse table: `(non-terminal, lookahead)`
/// mapped to more than one rule index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConflictCell {
    pub non_terminal: String,
    pub lookahead: String,
    pub rules: Vec<usize>,
}

impl Display for ConflictCell {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "table[{}][{}] = {:?}",
            self.non_terminal, self.lookahead, self.rules
        )
    }
}

/// Error returned synchronously at construction time by [Scanner::compile](crate::regex::Scanner::compile)
/// or [Grammar::make](crate::grammar::Grammar::make). No partial artifact is ever returned
/// alongside an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    /// Input was not of the expected shape (e.g. an empty name).
    InvalidType(String),
    /// A pattern contains a character outside the supported alphabet.
    InvalidCharacter { pattern: String, character: char, offset: usize },
    /// A pattern contains an unrecognized escape sequence.
    InvalidEscape { pattern: String, escape: char, offset: usize },
    /// A pattern ends with a trailing, unterminated backslash.
    EmptyEscape { pattern: String },
    /// Regex parentheses do not balance.
    UnbalancedParen { pattern: String },
    /// A character class `[...]` is missing its closing `]`.
    UnclosedClass { pattern: String },
    /// A `x..y` range has no right-hand boundary.
    InvalidRange { pattern: String, offset: usize },
    /// An operator was applied without enough operands on the postfix stack.
    ArityError { pattern: String, operator: &'static str },
    /// A pattern compiles to the empty language.
    EmptyExpression { pattern: String },
    /// The grammar's declared start symbol is not among its non-terminals.
    UnknownStart { start: String },
    /// The LL(1) parse table has at least one cell with more than one rule.
    Conflict(Vec<ConflictCell>),
}

impl Display for CompileError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            CompileError::InvalidType(message) => write!(f, "InvalidType: {}", message),
            CompileError::InvalidCharacter { pattern, character, offset } => write!(
                f,
                "InvalidCharacter: '{}' not in the supported alphabet at offset {} of pattern '{}'",
                character, offset, pattern
            ),
            CompileError::InvalidEscape { pattern, escape, offset } => write!(
                f,
                "InvalidEscape: \\{} is not a recognized escape at offset {} of pattern '{}'",
                escape, offset, pattern
            ),
            CompileError::EmptyEscape { pattern } => {
                write!(f, "EmptyEscape: trailing '\\' in pattern '{}'", pattern)
            }
            CompileError::UnbalancedParen { pattern } => {
                write!(f, "UnbalancedParen: pattern '{}' has unmatched parentheses", pattern)
            }
            CompileError::UnclosedClass { pattern } => {
                write!(f, "UnclosedClass: pattern '{}' has a '[' with no matching ']'", pattern)
            }
            CompileError::InvalidRange { pattern, offset } => write!(
                f,
                "InvalidRange: '..' at offset {} of pattern '{}' has no right boundary",
                offset, pattern
            ),
            CompileError::ArityError { pattern, operator } => write!(
                f,
                "ArityError: operator '{}' has too few operands in pattern '{}'",
                operator, pattern
            ),
            CompileError::EmptyExpression { pattern } => {
                write!(f, "EmptyExpression: pattern '{}' denotes nothing", pattern)
            }
            CompileError::UnknownStart { start } => write!(
                f,
                "UnknownStart: start symbol '{}' is not a declared non-terminal",
                start
            ),
            CompileError::Conflict(cells) => {
                write!(f, "Conflict: {} cell(s) have more than one rule: ", cells.len())?;
                for (i, cell) in cells.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", cell)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for CompileError {}
