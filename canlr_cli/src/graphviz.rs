use std::error::Error;
use std::fs;
use std::io::Write;

use tempfile::NamedTempFile;

use canlr_core::{LrItem, LrTables};

use crate::load;

pub fn write_graphviz_graph(
    input_filename: &str,
    output_filename: &str,
) -> Result<(), Box<dyn Error>> {
    let tables = load::generate_tables(input_filename)?;
    let graphviz_string = render_graphviz_graph(&tables);
    fs::write(output_filename, graphviz_string)?;
    Ok(())
}

pub fn show_graphviz_graph(input_filename: &str) -> Result<(), Box<dyn Error>> {
    let tables = load::generate_tables(input_filename)?;
    let graphviz_string = render_graphviz_graph(&tables);
    // We need the tempfile filename in order to open it with an associated application
    let mut temp_file = NamedTempFile::new()?;
    let path: String = temp_file.path().to_str().unwrap().to_owned() + ".dot";
    write!(temp_file, "{}", graphviz_string)?;
    temp_file.persist(&path)?;
    open::that(&path)?;
    Ok(())
}

fn html_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// `e -> e . `+` t` without the lookahead; the lookahead gets its own
/// column in the state box.
fn rule_string(item: &LrItem) -> String {
    let mut text = format!("{} ->", item.production.left);
    for (i, symbol) in item.production.right.iter().enumerate() {
        if i == item.dot {
            text.push_str(" .");
        }
        text.push_str(&format!(" {}", symbol));
    }
    if item.is_complete() {
        text.push_str(" .");
    }
    text
}

fn render_graphviz_graph(tables: &LrTables) -> String {
    let lookahead_names: Vec<(i32, &str)> = tables
        .terminals
        .iter()
        .map(|t| (t.index, t.name.as_str()))
        .collect();
    let lookahead_name = |index: i32| -> String {
        lookahead_names
            .iter()
            .find(|(i, _)| *i == index)
            .map(|(_, name)| (*name).to_owned())
            .unwrap_or_else(|| index.to_string())
    };

    let mut lines = Vec::new();
    lines.push("digraph lr_states {".to_owned());
    for (state_idx, state) in tables.states.iter().enumerate() {
        // Create graphviz box with table for the state
        let table_rows: Vec<String> = state
            .iter()
            .map(|item| {
                let mut la_string = html_escape(&lookahead_name(item.lookahead));
                if item.is_complete() {
                    // Use underline to mark a reduce action
                    la_string = format!("<U>{}</U>", la_string);
                }
                format!(
                    "      <TR><TD>{}</TD><TD>{}</TD></TR>",
                    html_escape(&rule_string(item)),
                    la_string
                )
            })
            .collect();
        let table_row_string = table_rows.join("\n");
        let table_head = format!(
            "      <TR><TD><B>State #{}</B></TD><TD><B>Lookahead</B></TD></TR>",
            state_idx
        );
        let line = format!(
            r#"  State{} [shape=plain label=<
    <TABLE BORDER="0" CELLBORDER="1" CELLSPACING="0">
{}
{}
    </TABLE>
  >];"#,
            state_idx, table_head, table_row_string
        );
        lines.push(line);
    }
    // Create state transitions
    for jump in &tables.jumps {
        lines.push(format!(
            r#"  State{} -> State{} [label="{}"];"#,
            jump.from,
            jump.to,
            jump.symbol.name()
        ));
    }
    lines.push("}".to_owned());
    lines.join("\n")
}
