/// Operator/grouping meta-characters recognized by [RegexLexer](super::lexer).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpKind {
    Union,
    Concat,
    Star,
    Plus,
    Question,
    LParen,
    RParen,
    LBracket,
    RBracket,
}

impl OpKind {
    /// `(precedence level, left-associative)` for the three binary/postfix
    /// operator tiers (union, concat, the star/plus/question unary-postfix
    /// group). Parens carry no precedence: they are pure grouping and
    /// handled specially by the shunter.
    pub fn precedence(&self) -> Option<(u8, bool)> {
        match self {
            OpKind::Star | OpKind::Plus | OpKind::Question => Some((2, false)),
            OpKind::Concat => Some((1, true)),
            OpKind::Union => Some((0, true)),
            OpKind::LParen | OpKind::RParen | OpKind::LBracket | OpKind::RBracket => None,
        }
    }

    pub fn is_unary_postfix(&self) -> bool {
        matches!(self, OpKind::Star | OpKind::Plus | OpKind::Question)
    }
}

/// An element of the internal symbol stream produced by [RegexLexer](super::lexer)
/// and consumed by every later regex-side stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Symbol {
    Literal(char),
    Op(OpKind),
    Epsilon,
}

impl Symbol {
    pub fn is_literal_like(&self) -> bool {
        matches!(self, Symbol::Literal(_) | Symbol::Epsilon)
    }
}

/// The supported printable-ASCII + standard-whitespace alphabet: codepoints
/// 33-126 plus the six whitespace characters.
pub fn is_supported_character(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0c' | '\x0b') || ('\u{21}'..='\u{7e}').contains(&c)
}
