use std::error::Error;
use std::process;

use clap::{App, AppSettings, Arg, SubCommand};

mod graphviz;
mod load;
mod table;

fn main() {
    if let Err(err) = cli() {
        eprintln!("Error: {}", err);
        process::exit(1);
    }
}

fn cli() -> Result<(), Box<dyn Error>> {
    let matches = App::new("canlr_cli")
        .about("Tool for inspecting canonical LR(1) grammars")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand(
            SubCommand::with_name("check")
                .arg(
                    Arg::with_name("file")
                        .help("Grammar description file")
                        .required(true),
                )
                .arg(
                    Arg::with_name("progress")
                        .long("--progress")
                        .help("Report each generation stage on stderr"),
                )
                .about("Generates the parse table and reports conflicts"),
        )
        .subcommand(
            SubCommand::with_name("table")
                .arg(
                    Arg::with_name("file")
                        .help("Grammar description file")
                        .required(true),
                )
                .arg(
                    Arg::with_name("csv")
                        .long("--csv")
                        .takes_value(true)
                        .help("Write the parse table to a specified CSV file"),
                )
                .about("Prints the canonical LR(1) parse table of a grammar"),
        )
        .subcommand(
            SubCommand::with_name("graph")
                .arg(
                    Arg::with_name("file")
                        .help("Grammar description file")
                        .required(true),
                )
                .arg(
                    Arg::with_name("output")
                        .long("--output")
                        .short("-o")
                        .takes_value(true)
                        .help("Write the generated graphviz graph to a file (*.dot)"),
                )
                .about("Outputs a graphviz graph showing the LR(1) states of a grammar"),
        )
        .setting(AppSettings::ArgRequiredElseHelp)
        .get_matches();

    if let Some(check_opts) = matches.subcommand_matches("check") {
        let filename = check_opts.value_of("file").unwrap();
        load::check(filename, check_opts.is_present("progress"))?;
    }

    if let Some(table_opts) = matches.subcommand_matches("table") {
        let filename = table_opts.value_of("file").unwrap();
        let csv_file: Option<&str> = table_opts.value_of("csv");

        if let Some(csv_filename) = csv_file {
            table::write_table_csv(filename, csv_filename)?;
        } else {
            table::print_table(filename)?;
        }
    }

    if let Some(graph_opts) = matches.subcommand_matches("graph") {
        let filename = graph_opts.value_of("file").unwrap();
        let output_file: Option<&str> = graph_opts.value_of("output");

        if let Some(output_filename) = output_file {
            graphviz::write_graphviz_graph(filename, output_filename)?;
        } else {
            graphviz::show_graphviz_graph(filename)?;
        }
    }

    Ok(())
}
