use std::error::Error;
use std::fs;

use canlr_core::{Callback, LrTables};
use canlr_syntax::parse_grammar;

/// Reads a grammar description file and generates its parse tables.
pub fn generate_tables(input_filename: &str) -> Result<LrTables, Box<dyn Error>> {
    let source = fs::read_to_string(input_filename)?;
    let grammar = parse_grammar(&source)?;
    Ok(LrTables::generate(grammar)?)
}

/// Generates the tables and prints a short summary. Any conflict
/// surfaces as the command's error.
pub fn check(input_filename: &str, progress: bool) -> Result<(), Box<dyn Error>> {
    let source = fs::read_to_string(input_filename)?;
    let grammar = parse_grammar(&source)?;
    let name = grammar.name.clone();

    let tables = if progress {
        let mut report = Callback(|stage: &str| eprintln!("{}...", stage));
        LrTables::generate_with_progress(grammar, &mut report)?
    } else {
        LrTables::generate(grammar)?
    };

    println!(
        "{}: {} states, {} productions, {} terminals, {} table cells",
        name,
        tables.states.len(),
        tables.productions.len(),
        tables.terminals.len(),
        tables.table.len()
    );
    Ok(())
}
