use std::fmt;

use crate::symbol::{Nonterminal, Symbol};

/// Grammar production `left -> right`, optionally carrying opaque
/// semantic-action text. The action text is never interpreted here; it is
/// handed through to whatever consumes the generated tables.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Production {
    pub left: Nonterminal,
    pub right: Vec<Symbol>,
    pub code: Option<String>,
}

impl Production {
    pub fn new(left: Nonterminal, right: Vec<Symbol>, code: Option<String>) -> Self {
        Production { left, right, code }
    }
}

impl fmt::Display for Production {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        write!(f, "{} ->", self.left)?;
        for symbol in &self.right {
            write!(f, " {}", symbol)?;
        }
        Ok(())
    }
}
