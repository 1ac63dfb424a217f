use std::fmt;

use crate::production::Production;
use crate::set::Set;
use crate::symbol::{Symbol, SymbolId};

/// LR(1) item: a production with a dot marking parse progress and a single
/// lookahead terminal index.
///
/// This is canonical LR(1) — one lookahead per item, not a merged LALR
/// lookahead set. Items built independently from different closures compare
/// equal whenever production, dot and lookahead agree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LrItem {
    pub production: Production,
    pub dot: usize,
    pub lookahead: SymbolId,
}

impl LrItem {
    pub fn new(production: Production, dot: usize, lookahead: SymbolId) -> Self {
        debug_assert!(dot <= production.right.len());
        LrItem {
            production,
            dot,
            lookahead,
        }
    }

    /// Symbols after the dot.
    pub fn after_dot(&self) -> &[Symbol] {
        &self.production.right[self.dot..]
    }

    /// The symbol immediately after the dot, if any.
    pub fn next_symbol(&self) -> Option<&Symbol> {
        self.production.right.get(self.dot)
    }

    /// Whether the dot sits at the end of the production's right side.
    pub fn is_complete(&self) -> bool {
        self.dot == self.production.right.len()
    }

    /// The same item with the dot advanced by one symbol.
    pub fn advanced(&self) -> LrItem {
        LrItem::new(self.production.clone(), self.dot + 1, self.lookahead)
    }
}

impl fmt::Display for LrItem {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        write!(f, "[{} ->", self.production.left)?;
        for (i, symbol) in self.production.right.iter().enumerate() {
            if i == self.dot {
                write!(f, " .")?;
            }
            write!(f, " {}", symbol)?;
        }
        if self.is_complete() {
            write!(f, " .")?;
        }
        write!(f, ", {}]", self.lookahead)
    }
}

/// One canonical LR(1) item set; states are compared and deduplicated by
/// the equality of their item sets.
pub type State = Set<LrItem>;

/// Transition edge of the automaton. States live in a flat arena and are
/// referenced by index; the `to` state is always registered in the arena
/// before the jump is recorded.
#[derive(Debug, Clone, PartialEq)]
pub struct Jump {
    pub from: usize,
    pub symbol: Symbol,
    pub to: usize,
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::symbol::{Nonterminal, Terminal};

    fn production() -> Production {
        Production::new(
            Nonterminal::new("e"),
            vec![
                Nonterminal::new("e").into(),
                Terminal::literal("+").into(),
                Nonterminal::new("t").into(),
            ],
            None,
        )
    }

    #[test]
    fn dot_progress() {
        let item = LrItem::new(production(), 0, 0);
        assert_eq!(item.after_dot().len(), 3);
        assert!(!item.is_complete());

        let item = item.advanced().advanced().advanced();
        assert!(item.is_complete());
        assert!(item.next_symbol().is_none());
    }

    #[test]
    fn items_differing_only_in_lookahead_are_distinct() {
        let a = LrItem::new(production(), 1, 0);
        let b = LrItem::new(production(), 1, 2);
        assert_ne!(a, b);
        assert_eq!(a, LrItem::new(production(), 1, 0));
    }

    #[test]
    fn display_marks_the_dot() {
        let item = LrItem::new(production(), 1, 0);
        assert_eq!(format!("{}", item), "[e -> e . `+` t, 0]");
    }
}
