//! `lang-cc` is a scanner/parser generator **core**: it compiles a set of
//! named regular expressions into a single minimal total DFA with
//! accepting-state token labels, and an LL(1) context-free grammar into
//! FIRST/FOLLOW sets, a numbered rule list, and a predictive parse table
//! with conflict reporting.
//!
//! # Overview
//!
//! Building a parser generator usually means re-implementing two classic
//! pipelines: Thompson construction → subset construction → DFA
//! minimization on the lexical side, and FIRST/FOLLOW fixed-point solving →
//! LL(1) table construction on the grammar side. This crate implements both
//! as pure, synchronous compilers from a declarative description to a data
//! structure — it does not execute the automata it builds, emit code for a
//! target language, or provide a CLI. Those are left to the caller.
//!
//! # Design
//!
//! Token declarations and grammar productions are both represented as an
//! order-preserving [Declarations] map: the regex side uses declaration
//! order to break ties when more than one pattern can accept the same
//! input, and the grammar side uses it to number rules deterministically.
//! [regex::Scanner::compile] runs the full lexical pipeline — scanning,
//! character-class expansion, explicit concatenation insertion,
//! shunting-yard, Thompson construction, subset construction, totalization,
//! and label-aware Hopcroft minimization — over every declared pattern
//! sharing one NFA arena. [grammar::Grammar::make] normalizes a declarative
//! grammar, solves FIRST and FOLLOW to a fixed point, and builds the LL(1)
//! table, failing with [error::CompileError::Conflict] if any cell ends up
//! with more than one rule.
//!
//! # Example
//!
//! ```
//! use lang_cc::grammar::Grammar;
//! use lang_cc::regex::Scanner;
//! use lang_cc::util::Declarations;
//!
//! // Lexical side: two token patterns, declared in priority order.
//! let tokens = Declarations::new(vec![
//!     ("lbracket".to_string(), "\\[".to_string()),
//!     ("rbracket".to_string(), "\\]".to_string()),
//!     ("id".to_string(), "[a..z]([a..z]|[0..9])*".to_string()),
//! ]);
//! let scanner = Scanner::compile("ini_tokens", tokens).unwrap();
//! assert!(scanner.accepting().len() >= 3);
//!
//! // Grammar side: a header production `[ id ]`.
//! let productions = Declarations::new(vec![
//!     ("HEADER".to_string(), "lbracket id rbracket".to_string()),
//! ]);
//! let grammar = Grammar::make("ini_header", productions, "HEADER").unwrap();
//! assert_eq!(grammar.rules().len(), 1);
//! assert!(grammar.table().get("HEADER", &lang_cc::grammar::FollowItem::Terminal("lbracket".to_string())).contains(&0));
//! ```
//!
//! # License
//! `lang-cc` is provided under the MIT license.

pub mod error;
pub mod grammar;
pub mod regex;
pub mod util;

pub use error::CompileError;
pub use grammar::Grammar;
pub use regex::Scanner;
