use std::collections::HashMap;

/// An ordered mapping of `name -> body` used for both the token declarations
/// fed to [Scanner::compile](crate::regex::Scanner::compile) and the
/// production declarations fed to [Grammar::make](crate::grammar::Grammar::make).
///
/// Iteration order is preserved (it fixes token priority on the regex side
/// and rule declaration order on the grammar side), backed by a plain
/// `Vec` of pairs rather than an external ordered-map crate.
#[derive(Debug, Clone, Default)]
pub struct Declarations {
    entries: Vec<(String, String)>,
    index: HashMap<String, usize>,
}

impl Declarations {
    pub fn new(entries: Vec<(String, String)>) -> Self {
        let index = entries
            .iter()
            .enumerate()
            .map(|(i, (name, _))| (name.clone(), i))
            .collect();
        Self { entries, index }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.index.get(name).map(|&i| self.entries[i].1.as_str())
    }

    /// Declaration-order index of `name`, used as the priority rank on the
    /// regex side (first declared wins ties) and as part of rule numbering
    /// on the grammar side.
    pub fn priority_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }
}

impl FromIterator<(String, String)> for Declarations {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Declarations::new(iter.into_iter().collect())
    }
}
