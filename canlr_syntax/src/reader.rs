use std::collections::HashMap;

use canlr_core::{Grammar, Nonterminal, Production, Set, Symbol, Terminal};

use crate::error::SyntaxError;
use crate::lexer;
use crate::parse::{self, RawDirective, RawGrammar};
use crate::token::TokenKind;

/// Reads a grammar description into the analysis data model.
///
/// Rule names declare nonterminals and must start lowercase. On a right
/// hand side, an identifier naming a rule refers to that nonterminal, an
/// ALL-CAPS identifier declares a terminal matched by token category, and
/// a quoted literal declares a terminal matched by exact text. Anything
/// else is a bad identifier.
pub fn parse_grammar(source: &str) -> Result<Grammar, SyntaxError> {
    let tokens = lexer::tokenize(source)?;
    let raw = parse::parse_tokens(&tokens)?;
    assemble(raw)
}

fn assemble(raw: RawGrammar) -> Result<Grammar, SyntaxError> {
    let mut name = String::from("parser");
    let mut options = HashMap::new();
    let mut start_directive = None;

    for directive in raw.directives {
        match directive {
            RawDirective::Name(token) => name = token.value,
            RawDirective::Start(token) => start_directive = Some(token),
            RawDirective::Option(key, value) => {
                options.insert(key.value, value.value);
            }
        }
    }

    let mut nonterminals = Set::new();
    for rule in &raw.rules {
        let starts_lower = rule
            .name
            .value
            .chars()
            .next()
            .map_or(false, |c| c.is_ascii_lowercase());
        if !starts_lower {
            return Err(SyntaxError::BadIdentifier {
                name: rule.name.value.clone(),
                line: rule.name.line,
                column: rule.name.column,
            });
        }
        nonterminals.add(Nonterminal::new(rule.name.value.clone()));
    }

    let mut terminals = Set::new();
    let mut productions = Set::new();

    for rule in &raw.rules {
        let left = Nonterminal::new(rule.name.value.clone());
        for alternative in &rule.alternatives {
            let mut right = Vec::with_capacity(alternative.terms.len());
            for term in &alternative.terms {
                let symbol = match term.kind {
                    TokenKind::Ident => {
                        if nonterminals.contains(&Nonterminal::new(term.value.clone())) {
                            Symbol::Nonterminal(Nonterminal::new(term.value.clone()))
                        } else if is_token_type(&term.value) {
                            let terminal = Terminal::kind(term.value.clone());
                            terminals.add(terminal.clone());
                            Symbol::Terminal(terminal)
                        } else {
                            return Err(SyntaxError::BadIdentifier {
                                name: term.value.clone(),
                                line: term.line,
                                column: term.column,
                            });
                        }
                    }
                    TokenKind::Str => {
                        let terminal = Terminal::literal(term.value.clone());
                        terminals.add(terminal.clone());
                        Symbol::Terminal(terminal)
                    }
                    _ => unreachable!("the parser only yields idents and strings as terms"),
                };
                right.push(symbol);
            }
            productions.add(Production::new(
                left.clone(),
                right,
                alternative.code.as_ref().map(|code| code.value.clone()),
            ));
        }
    }

    let start = match start_directive {
        Some(token) => {
            let start = Nonterminal::new(token.value.clone());
            if !nonterminals.contains(&start) {
                return Err(SyntaxError::UnknownStart { name: token.value });
            }
            start
        }
        // The first rule is the start symbol unless %start says otherwise.
        None => Nonterminal::new(raw.rules[0].name.value.clone()),
    };

    let mut grammar = Grammar::new(name, terminals, nonterminals, productions, start);
    grammar.options = options;
    Ok(grammar)
}

/// ALL-CAPS identifiers name token categories.
fn is_token_type(name: &str) -> bool {
    name.chars()
        .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
}
