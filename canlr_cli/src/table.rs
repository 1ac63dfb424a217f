use std::error::Error;
use std::fs::File;

use prettytable as pt;
use prettytable::cell;
use prettytable::row;

use canlr_core::LrTables;

use crate::load;

pub fn print_table(input_filename: &str) -> Result<(), Box<dyn Error>> {
    let tables = load::generate_tables(input_filename)?;
    let pretty_table = generate_pretty_table(&tables);
    println!("{}", pretty_table);
    Ok(())
}

pub fn write_table_csv(input_filename: &str, csv_filename: &str) -> Result<(), Box<dyn Error>> {
    let tables = load::generate_tables(input_filename)?;
    let pretty_table = generate_pretty_table(&tables);
    let csv_file = File::create(csv_filename)?;
    pretty_table.to_csv(csv_file)?;
    Ok(())
}

/// Formats one table cell: `s<n>` shifts, `r<n>` reduces, `acc` accepts
/// and `g<n>` jumps after a reduction. An empty cell is a syntax error.
fn action_string(action: i32, goto: bool) -> String {
    if goto {
        format!("g{}", action)
    } else if action == 0 {
        "acc".to_owned()
    } else if action > 0 {
        format!("s{}", action)
    } else {
        format!("r{}", -action)
    }
}

fn generate_pretty_table(tables: &LrTables) -> pt::Table {
    let mut table = pt::Table::new();

    let mut title_row = row!["#", "LR(1) item closure"];
    for terminal in &tables.terminals {
        title_row.add_cell(cell!(terminal.name));
    }
    for nonterminal in &tables.nonterminals {
        title_row.add_cell(cell!(nonterminal.name));
    }
    table.add_row(title_row);

    for (i, state) in tables.states.iter().enumerate() {
        let items: Vec<String> = state.iter().map(|item| format!("{}", item)).collect();
        let mut row = row![i, items.join("\n")];

        for terminal in &tables.terminals {
            let key = i as i32 * tables.table_pitch + terminal.index;
            row.add_cell(cell![tables
                .table
                .get(&key)
                .map_or("".to_owned(), |&action| action_string(action, false))]);
        }

        for nonterminal in &tables.nonterminals {
            let key = i as i32 * tables.table_pitch + nonterminal.index;
            row.add_cell(cell![tables
                .table
                .get(&key)
                .map_or("".to_owned(), |&action| action_string(action, true))]);
        }

        table.add_row(row);
    }

    table
}
