use std::collections::{BTreeSet, HashMap};

use super::symbol::{OpKind, Symbol};
use crate::error::CompileError;
use crate::util::StateId;

#[derive(Debug, Default)]
pub(crate) struct NfaState {
    transitions: Vec<(char, StateId)>,
    epsilons: Vec<StateId>,
}

/// The shared arena backing every NFA fragment built during one
/// [Scanner::compile](crate::regex::Scanner::compile) call. One arena is
/// threaded through the Thompson construction of every token pattern so
/// their fragments can later be unioned under a single start state without
/// copying state: states live in a flat `Vec` and are addressed by index,
/// rather than through owning references into a combinator tree.
#[derive(Debug, Default)]
pub struct NfaBuilder {
    states: Vec<NfaState>,
    alphabet: BTreeSet<char>,
}

impl NfaBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn fresh(&mut self) -> StateId {
        let id = StateId::from(self.states.len());
        self.states.push(NfaState::default());
        crate::util::level().trace(crate::util::Log::Verbose(()), "nfa", &id);
        id
    }

    pub(crate) fn add_transition(&mut self, from: StateId, on: char, to: StateId) {
        self.alphabet.insert(on);
        self.states[from.index()].transitions.push((on, to));
    }

    pub(crate) fn add_epsilon(&mut self, from: StateId, to: StateId) {
        self.states[from.index()].epsilons.push(to);
    }

    pub(crate) fn transitions_from(&self, state: StateId) -> &[(char, StateId)] {
        &self.states[state.index()].transitions
    }

    fn epsilons_from(&self, state: StateId) -> &[StateId] {
        &self.states[state.index()].epsilons
    }

    pub(crate) fn alphabet(&self) -> &BTreeSet<char> {
        &self.alphabet
    }

    /// Epsilon closure of a set of seed states: the closure is memoized per
    /// single state, and the closures of every seed are unioned.
    pub(crate) fn epsilon_closure(
        &self,
        seeds: impl IntoIterator<Item = StateId>,
        cache: &mut HashMap<StateId, BTreeSet<StateId>>,
    ) -> BTreeSet<StateId> {
        let mut closure = BTreeSet::new();
        for seed in seeds {
            closure.extend(self.single_closure(seed, cache));
        }
        closure
    }

    fn single_closure(
        &self,
        q: StateId,
        cache: &mut HashMap<StateId, BTreeSet<StateId>>,
    ) -> BTreeSet<StateId> {
        if let Some(hit) = cache.get(&q) {
            return hit.clone();
        }
        let mut closure = BTreeSet::new();
        let mut explore = vec![q];
        while let Some(state) = explore.pop() {
            if closure.insert(state) {
                explore.extend(self.epsilons_from(state).iter().copied());
            }
        }
        cache.insert(q, closure.clone());
        closure
    }
}

fn pop1(
    stack: &mut Vec<(StateId, StateId)>,
    pattern_name: &str,
    op: &'static str,
) -> Result<(StateId, StateId), CompileError> {
    stack.pop().ok_or_else(|| CompileError::ArityError {
        pattern: pattern_name.to_string(),
        operator: op,
    })
}

fn pop2(
    stack: &mut Vec<(StateId, StateId)>,
    pattern_name: &str,
    op: &'static str,
) -> Result<((StateId, StateId), (StateId, StateId)), CompileError> {
    let second = pop1(stack, pattern_name, op)?;
    let first = pop1(stack, pattern_name, op)?;
    Ok((first, second))
}

/// Stack-based evaluation of a postfix regex token stream into an ε-NFA
/// fragment `(start, accept)`, following Thompson's construction: a literal
/// pushes a two-state fragment, and each operator pops its operand
/// fragment(s) and wires a new one from them. Every fresh state is
/// allocated from the shared `builder` so multiple fragments can later be
/// unioned cheaply.
pub(crate) fn build_fragment(
    pattern_name: &str,
    postfix: &[Symbol],
    builder: &mut NfaBuilder,
) -> Result<(StateId, StateId), CompileError> {
    if postfix.is_empty() {
        return Err(CompileError::EmptyExpression {
            pattern: pattern_name.to_string(),
        });
    }

    let mut stack: Vec<(StateId, StateId)> = Vec::new();

    for &token in postfix {
        match token {
            Symbol::Literal(c) => {
                let s = builder.fresh();
                let f = builder.fresh();
                builder.add_transition(s, c, f);
                stack.push((s, f));
            }
            Symbol::Epsilon => {
                let s = builder.fresh();
                let f = builder.fresh();
                builder.add_epsilon(s, f);
                stack.push((s, f));
            }
            Symbol::Op(OpKind::Concat) => {
                let ((p1, f1), (p2, f2)) = pop2(&mut stack, pattern_name, ".")?;
                builder.add_epsilon(f1, p2);
                stack.push((p1, f2));
            }
            Symbol::Op(OpKind::Union) => {
                let ((p, q), (r, t)) = pop2(&mut stack, pattern_name, "|")?;
                let s = builder.fresh();
                let f = builder.fresh();
                builder.add_epsilon(s, p);
                builder.add_epsilon(s, r);
                builder.add_epsilon(q, f);
                builder.add_epsilon(t, f);
                stack.push((s, f));
            }
            Symbol::Op(OpKind::Star) => {
                let (p, q) = pop1(&mut stack, pattern_name, "*")?;
                let s = builder.fresh();
                let f = builder.fresh();
                builder.add_epsilon(s, p);
                builder.add_epsilon(q, p);
                builder.add_epsilon(q, f);
                builder.add_epsilon(s, f);
                stack.push((s, f));
            }
            Symbol::Op(OpKind::Plus) => {
                let (p, q) = pop1(&mut stack, pattern_name, "+")?;
                let s = builder.fresh();
                let f = builder.fresh();
                builder.add_epsilon(s, p);
                builder.add_epsilon(q, p);
                builder.add_epsilon(q, f);
                stack.push((s, f));
            }
            Symbol::Op(OpKind::Question) => {
                let (p, q) = pop1(&mut stack, pattern_name, "?")?;
                let s = builder.fresh();
                let f = builder.fresh();
                builder.add_epsilon(s, p);
                builder.add_epsilon(s, f);
                builder.add_epsilon(q, f);
                stack.push((s, f));
            }
            Symbol::Op(OpKind::LParen | OpKind::RParen | OpKind::LBracket | OpKind::RBracket) => {
                unreachable!("parens/brackets are eliminated before reaching Thompson construction")
            }
        }
    }

    if stack.len() != 1 {
        return Err(CompileError::ArityError {
            pattern: pattern_name.to_string(),
            operator: "<expression>",
        });
    }
    Ok(stack.pop().unwrap())
}

#[cfg(test)]
mod __tests__ {
    use super::*;
    use crate::regex::{class_expander, concat, lexer, shunt};

    fn fragment(pattern: &str, builder: &mut NfaBuilder) -> (StateId, StateId) {
        let scanned = lexer::scan("t", pattern).unwrap();
        let expanded = class_expander::expand("t", scanned).unwrap();
        let with_concat = concat::insert(expanded);
        let postfix = shunt::to_postfix("t", with_concat).unwrap();
        build_fragment("t", &postfix, builder).unwrap()
    }

    #[test]
    fn single_literal_has_one_transition() {
        let mut builder = NfaBuilder::new();
        let (s, f) = fragment("a", &mut builder);
        assert_ne!(s, f);
        assert_eq!(builder.transitions_from(s), &[('a', f)]);
    }

    #[test]
    fn arity_error_on_dangling_operator() {
        let mut builder = NfaBuilder::new();
        let postfix = vec![Symbol::Op(OpKind::Star)];
        let err = build_fragment("t", &postfix, &mut builder).unwrap_err();
        assert!(matches!(err, CompileError::ArityError { .. }));
    }

    #[test]
    fn empty_postfix_is_empty_expression() {
        let mut builder = NfaBuilder::new();
        let err = build_fragment("t", &[], &mut builder).unwrap_err();
        assert!(matches!(err, CompileError::EmptyExpression { .. }));
    }
}
