use std::fmt;

/// Index assigned to a symbol by the generator's indexing stage.
///
/// `EPSILON` and `END` are reserved; user terminals start at 1 and
/// nonterminals continue after the highest terminal index.
pub type SymbolId = i32;

/// Sentinel for the empty word; never a table key.
pub const EPSILON: SymbolId = -1;

/// End-of-input terminal index.
pub const END: SymbolId = 0;

/// Terminal symbol.
///
/// A terminal matches a lexical token either by its category (`kind`) or by
/// its exact text (`literal`). The reserved terminals carry neither.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Terminal {
    pub name: String,
    pub kind: Option<String>,
    pub literal: Option<String>,
}

impl Terminal {
    /// Terminal matched against a token's category tag.
    pub fn kind(name: impl Into<String>) -> Self {
        let name = name.into();
        Terminal {
            kind: Some(name.clone()),
            name,
            literal: None,
        }
    }

    /// Terminal matched against a token's exact text.
    pub fn literal(text: impl Into<String>) -> Self {
        let text = text.into();
        Terminal {
            name: text.clone(),
            kind: None,
            literal: Some(text),
        }
    }

    /// Reserved terminal (`$end`); matches nothing by itself.
    pub(crate) fn reserved(name: &str) -> Self {
        Terminal {
            name: name.to_owned(),
            kind: None,
            literal: None,
        }
    }
}

impl fmt::Display for Terminal {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        write!(f, "`{}`", self.name)
    }
}

/// Nonterminal symbol, distinguished by name alone.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Nonterminal {
    pub name: String,
}

impl Nonterminal {
    pub fn new(name: impl Into<String>) -> Self {
        Nonterminal { name: name.into() }
    }
}

impl fmt::Display for Nonterminal {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        write!(f, "{}", self.name)
    }
}

/// A grammar symbol: either variant compares structurally.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Symbol {
    Terminal(Terminal),
    Nonterminal(Nonterminal),
}

impl Symbol {
    pub fn name(&self) -> &str {
        match self {
            Symbol::Terminal(t) => &t.name,
            Symbol::Nonterminal(n) => &n.name,
        }
    }

    pub fn is_terminal(&self) -> bool {
        match self {
            Symbol::Terminal(_) => true,
            Symbol::Nonterminal(_) => false,
        }
    }
}

impl From<Terminal> for Symbol {
    fn from(terminal: Terminal) -> Self {
        Symbol::Terminal(terminal)
    }
}

impl From<Nonterminal> for Symbol {
    fn from(nonterminal: Nonterminal) -> Self {
        Symbol::Nonterminal(nonterminal)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        match self {
            Symbol::Terminal(t) => write!(f, "{}", t),
            Symbol::Nonterminal(n) => write!(f, "{}", n),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn terminal_equality_covers_kind_and_literal() {
        assert_eq!(Terminal::kind("NUM"), Terminal::kind("NUM"));
        assert_ne!(Terminal::kind("NUM"), Terminal::literal("NUM"));
        assert_ne!(Terminal::literal("+"), Terminal::literal("-"));
    }

    #[test]
    fn symbol_variants_never_compare_equal() {
        let t: Symbol = Terminal::kind("X").into();
        let n: Symbol = Nonterminal::new("X").into();
        assert_ne!(t, n);
    }
}
