//! Whole-pipeline tests: grammar text in, parsed input out.

use canlr_core::driver::{self, Token};
use canlr_core::{Callback, GenerationError, LrTables};
use canlr_syntax::{parse_grammar, SyntaxError};

const EXPRESSION: &str = "
# integer sums
%name Sums

expr : expr '+' term
     | term
     ;
term : NUM ;
";

fn num(value: i64) -> Token<i64> {
    Token::new(Some("NUM"), "n", value)
}

fn plus() -> Token<i64> {
    Token::new(None, "+", 0)
}

#[test]
fn evaluates_sums_from_grammar_text() {
    let grammar = parse_grammar(EXPRESSION).unwrap();
    assert_eq!(grammar.name, "Sums");
    let tables = LrTables::generate(grammar).unwrap();

    // Production 1 is `expr -> expr '+' term` by rule order.
    let result = driver::parse(
        &tables,
        vec![num(1), plus(), num(2), plus(), num(3)],
        |production, args| {
            if production == 1 {
                Some(args[0].unwrap_or(0) + args[2].unwrap_or(0))
            } else {
                driver::default_action(production, args)
            }
        },
    )
    .unwrap();
    assert_eq!(result, Some(6));
}

#[test]
fn rejects_malformed_input_with_its_offset() {
    let tables = LrTables::generate(parse_grammar(EXPRESSION).unwrap()).unwrap();
    let error = driver::parse(&tables, vec![num(1), num(2)], driver::default_action).unwrap_err();
    assert_eq!(format!("{}", error), "syntax error at token 1 (`n`)");
}

#[test]
fn empty_alternatives_drive_a_left_recursive_list() {
    let grammar = parse_grammar("list : | list ITEM ;").unwrap();
    let tables = LrTables::generate(grammar).unwrap();

    let items = vec![
        Token::new(Some("ITEM"), "a", 1i64),
        Token::new(Some("ITEM"), "b", 1),
        Token::new(Some("ITEM"), "c", 1),
    ];
    // Production 2 is `list -> list ITEM`; count elements while reducing.
    let count = |production: usize, args: Vec<Option<i64>>| {
        if production == 2 {
            Some(args[0].unwrap_or(0) + 1)
        } else {
            driver::default_action(production, args)
        }
    };

    assert_eq!(driver::parse(&tables, items, count).unwrap(), Some(3));
    assert_eq!(driver::parse(&tables, vec![], count).unwrap(), None);
}

#[test]
fn ambiguous_grammar_text_is_rejected_during_generation() {
    let grammar = parse_grammar("s : a | b ; a : X ; b : X ;").unwrap();
    match LrTables::generate(grammar) {
        Err(GenerationError::ReduceReduceConflict { .. }) => {}
        other => panic!("expected a reduce-reduce conflict, got {:?}", other),
    }
}

#[test]
fn front_end_errors_carry_positions() {
    match parse_grammar("a :\n  Mixed ;") {
        Err(SyntaxError::BadIdentifier { line, column, .. }) => {
            assert_eq!((line, column), (2, 3));
        }
        other => panic!("expected a bad identifier, got {:?}", other),
    }
}

#[test]
fn stage_progress_is_announced_in_pipeline_order() {
    let grammar = parse_grammar(EXPRESSION).unwrap();
    let mut stages: Vec<String> = Vec::new();
    {
        let mut record = Callback(|name: &str| stages.push(name.to_owned()));
        LrTables::generate_with_progress(grammar, &mut record).unwrap();
    }
    assert_eq!(
        stages,
        vec!["augment", "indexes", "first", "follow", "states", "table"]
    );
}
