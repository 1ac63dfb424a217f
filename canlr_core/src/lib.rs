//! Canonical LR(1) table construction.
//!
//! The pipeline takes a [`Grammar`], augments it, indexes its symbols,
//! solves FIRST and FOLLOW, builds the canonical collection of LR(1)
//! states and synthesizes the sparse ACTION/GOTO table, rejecting any
//! grammar that is not LR(1). [`driver::parse`] realizes the runtime
//! contract of the generated tables.

pub mod driver;
mod error;
mod grammar;
mod item;
mod production;
mod progress;
mod set;
mod symbol;
mod tables;

pub use crate::driver::{default_action, Token};
pub use crate::error::{DriveError, GenerationError};
pub use crate::grammar::Grammar;
pub use crate::item::{Jump, LrItem, State};
pub use crate::production::Production;
pub use crate::progress::{Callback, Progress, Silent};
pub use crate::set::Set;
pub use crate::symbol::{Nonterminal, Symbol, SymbolId, Terminal, END, EPSILON};
pub use crate::tables::{LrTables, NonterminalEntry, ProductionEntry, TerminalEntry, MAX_STATES};
