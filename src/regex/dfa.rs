use std::collections::HashMap;

use crate::util::StateId;

/// The dense `table[symbol][state] -> state` view of a totalized DFA,
/// indexed by symbol- and state-position rather than value. Built once by
/// [totalize](super::totalize::totalize) and preserved unchanged by
/// minimization.
#[derive(Debug, Clone)]
pub struct DenseTable {
    pub(crate) table: Vec<Vec<StateId>>,
    pub(crate) state_index: HashMap<StateId, usize>,
    pub(crate) symbol_index: HashMap<char, usize>,
}

impl DenseTable {
    pub fn state_at(&self, symbol: char, state: StateId) -> Option<StateId> {
        let si = *self.symbol_index.get(&symbol)?;
        let qi = *self.state_index.get(&state)?;
        self.table.get(si).and_then(|row| row.get(qi)).copied()
    }

    /// Row-major view: `rows()[symbol_index][state_index]`.
    pub fn rows(&self) -> &[Vec<StateId>] {
        &self.table
    }

    pub fn symbol_index_of(&self, symbol: char) -> Option<usize> {
        self.symbol_index.get(&symbol).copied()
    }

    pub fn state_index_of(&self, state: StateId) -> Option<usize> {
        self.state_index.get(&state).copied()
    }
}

/// A total DFA: every `(state, symbol)` pair has exactly one successor.
/// Accepting states carry the name of the token pattern they were derived
/// from.
#[derive(Debug, Clone)]
pub struct Dfa {
    pub(crate) states: Vec<StateId>,
    pub(crate) alphabet: Vec<char>,
    pub(crate) start: StateId,
    pub(crate) accepting: std::collections::HashSet<StateId>,
    pub(crate) labels: HashMap<StateId, String>,
    pub(crate) table: DenseTable,
}

impl Dfa {
    pub fn states(&self) -> &[StateId] {
        &self.states
    }

    pub fn alphabet(&self) -> &[char] {
        &self.alphabet
    }

    pub fn start(&self) -> StateId {
        self.start
    }

    pub fn accepting(&self) -> &std::collections::HashSet<StateId> {
        &self.accepting
    }

    pub fn label(&self, state: StateId) -> Option<&str> {
        self.labels.get(&state).map(|s| s.as_str())
    }

    pub fn table(&self) -> &DenseTable {
        &self.table
    }
}
