use std::error::Error;
use std::fmt;

use crate::item::LrItem;

/// Fatal grammar-analysis and internal-consistency errors.
///
/// No conflict is ever auto-resolved; a grammar that is not LR(1) is
/// rejected with the offending state and item so the grammar can be
/// redesigned.
#[derive(Debug)]
pub enum GenerationError {
    /// The start symbol has no production.
    MissingStartProduction,
    /// A cell holding a shift would also receive a reduce.
    ShiftReduceConflict {
        state: usize,
        item: LrItem,
        shift_state: usize,
    },
    /// A cell holding a reduce would also receive a different reduce.
    ReduceReduceConflict {
        state: usize,
        item: LrItem,
        existing: usize,
        candidate: usize,
    },
    /// A cell holding the accept action would also receive a reduce.
    AcceptReduceConflict { state: usize, item: LrItem },
    /// A shift was required but the canonical collection recorded no jump
    /// for it. Indicates a bug in closure/goto, never a grammar defect.
    MissingShiftTarget { state: usize, symbol: String },
    /// The canonical collection exceeded the defensive state bound.
    TooManyStates { limit: usize },
}

impl fmt::Display for GenerationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        match self {
            GenerationError::MissingStartProduction => {
                write!(f, "start symbol has no production")
            }
            GenerationError::ShiftReduceConflict {
                state,
                item,
                shift_state,
            } => write!(
                f,
                "shift-reduce conflict in state {}: {} against shift to state {}",
                state, item, shift_state
            ),
            GenerationError::ReduceReduceConflict {
                state,
                item,
                existing,
                candidate,
            } => write!(
                f,
                "reduce-reduce conflict in state {}: {} (productions {} and {})",
                state, item, existing, candidate
            ),
            GenerationError::AcceptReduceConflict { state, item } => {
                write!(f, "accept-reduce conflict in state {}: {}", state, item)
            }
            GenerationError::MissingShiftTarget { state, symbol } => write!(
                f,
                "no jump recorded for shift on {} from state {}",
                symbol, state
            ),
            GenerationError::TooManyStates { limit } => write!(
                f,
                "canonical collection exceeded {} states; grammar is unlikely to be LR(1)",
                limit
            ),
        }
    }
}

impl Error for GenerationError {}

/// Errors raised while driving the generated table over a token stream.
#[derive(Debug)]
pub enum DriveError {
    /// No action for the current (state, lookahead) pair.
    Unexpected { lexeme: String, offset: usize },
    /// A reduce found no goto for the produced nonterminal. Indicates an
    /// inconsistent table, never valid input.
    MissingGoto { state: i32, production: usize },
}

impl fmt::Display for DriveError {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        match self {
            DriveError::Unexpected { lexeme, offset } => {
                write!(f, "syntax error at token {} (`{}`)", offset, lexeme)
            }
            DriveError::MissingGoto { state, production } => write!(
                f,
                "no goto from state {} after reducing production {}",
                state, production
            ),
        }
    }
}

impl Error for DriveError {}
