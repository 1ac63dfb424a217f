use std::collections::HashMap;

use crate::error::DriveError;
use crate::symbol::{SymbolId, END};
use crate::tables::LrTables;

/// Lexical token fed to the table driver. Classification tries the
/// category tag first, then the exact lexeme; anything unknown counts as
/// end-of-input, so it surfaces as a table-lookup error at that token.
#[derive(Debug, Clone)]
pub struct Token<V> {
    pub kind: Option<String>,
    pub lexeme: String,
    pub value: V,
}

impl<V> Token<V> {
    pub fn new(kind: Option<&str>, lexeme: &str, value: V) -> Self {
        Token {
            kind: kind.map(str::to_owned),
            lexeme: lexeme.to_owned(),
            value,
        }
    }
}

/// The reduction used when a production carries no semantic action: pass
/// the first child through.
pub fn default_action<V>(_production: usize, args: Vec<Option<V>>) -> Option<V> {
    args.into_iter().next().unwrap_or(None)
}

/// Drives `tables` over a token stream.
///
/// This is the reference realization of the runtime contract every table
/// consumer must implement: a stack of (value, state) pairs starting at
/// `(None, 0)`; cell lookup by `state * table_pitch + lookahead`; `0`
/// accepts, positive shifts, negative `-p` pops `len(p)` pairs, hands the
/// popped values left to right to `actions` and pushes the result with the
/// goto state.
pub fn parse<V, I, F>(tables: &LrTables, tokens: I, mut actions: F) -> Result<Option<V>, DriveError>
where
    I: IntoIterator<Item = Token<V>>,
    F: FnMut(usize, Vec<Option<V>>) -> Option<V>,
{
    let kinds: HashMap<&str, SymbolId> = tables
        .terminals
        .iter()
        .filter_map(|t| t.kind.as_ref().map(|kind| (kind.as_str(), t.index)))
        .collect();
    let literals: HashMap<&str, SymbolId> = tables
        .terminals
        .iter()
        .filter_map(|t| t.literal.as_ref().map(|lit| (lit.as_str(), t.index)))
        .collect();
    let productions: HashMap<usize, (usize, SymbolId)> = tables
        .productions
        .iter()
        .map(|p| (p.index, (p.right_len, p.left)))
        .collect();

    let mut stack: Vec<(Option<V>, i32)> = vec![(None, tables.start_state as i32)];
    let mut tokens = tokens.into_iter();
    let mut current = tokens.next();
    let mut offset = 0usize;

    loop {
        let state = stack.last().expect("stack is never empty").1;
        let lookahead = match &current {
            Some(token) => token
                .kind
                .as_ref()
                .and_then(|kind| kinds.get(kind.as_str()).cloned())
                .or_else(|| literals.get(token.lexeme.as_str()).cloned())
                .unwrap_or(END),
            None => END,
        };

        let action = match tables.table.get(&(state * tables.table_pitch + lookahead)) {
            Some(&action) => action,
            None => {
                return Err(DriveError::Unexpected {
                    lexeme: current.map(|t| t.lexeme).unwrap_or_default(),
                    offset,
                });
            }
        };

        if action == 0 {
            // Accept: discard the final state, surface the final value.
            let (value, _) = stack.pop().expect("stack is never empty");
            return Ok(value);
        } else if action > 0 {
            // Shift.
            let token = match current.take() {
                Some(token) => token,
                None => {
                    return Err(DriveError::Unexpected {
                        lexeme: String::new(),
                        offset,
                    });
                }
            };
            stack.push((Some(token.value), action));
            current = tokens.next();
            offset += 1;
        } else {
            // Reduce by production `-action` and jump over its left side.
            let production = (-action) as usize;
            let (len, left) = productions[&production];
            let popped = stack.split_off(stack.len() - len);
            let args: Vec<Option<V>> = popped.into_iter().map(|(value, _)| value).collect();

            let top = stack.last().expect("stack is never empty").1;
            let goto = match tables.table.get(&(top * tables.table_pitch + left)) {
                Some(&goto) => goto,
                None => {
                    return Err(DriveError::MissingGoto {
                        state: top,
                        production,
                    });
                }
            };

            let value = actions(production, args);
            stack.push((value, goto));
        }
    }
}
