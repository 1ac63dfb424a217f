use std::collections::HashMap;

use crate::production::Production;
use crate::set::Set;
use crate::symbol::{Nonterminal, Terminal};

/// Grammar G = (N, T, P, S) as delivered by a front end.
///
/// The generator takes the grammar by value and mutates it in place during
/// augmentation and indexing; afterwards it is read-only input to the later
/// stages.
#[derive(Debug, Clone)]
pub struct Grammar {
    pub name: String,
    /// Free-form options, passed through to table consumers untouched.
    pub options: HashMap<String, String>,
    pub terminals: Set<Terminal>,
    pub nonterminals: Set<Nonterminal>,
    pub productions: Set<Production>,
    pub start: Nonterminal,
}

impl Grammar {
    pub fn new(
        name: impl Into<String>,
        terminals: Set<Terminal>,
        nonterminals: Set<Nonterminal>,
        productions: Set<Production>,
        start: Nonterminal,
    ) -> Self {
        Grammar {
            name: name.into(),
            options: HashMap::new(),
            terminals,
            nonterminals,
            productions,
            start,
        }
    }
}
