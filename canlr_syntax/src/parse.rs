use combine::{choice, eof, many, many1, optional, satisfy_map, sep_by1};
use combine::{ParseError, Parser, Stream};

use crate::error::SyntaxError;
use crate::token::{Token, TokenKind};

/// Parsed grammar description before symbol classification.
#[derive(Debug, Clone, PartialEq)]
pub struct RawGrammar {
    pub directives: Vec<RawDirective>,
    pub rules: Vec<RawRule>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RawDirective {
    Name(Token),
    Start(Token),
    Option(Token, Token),
}

/// `name : alternative | alternative | ... ;`
#[derive(Debug, Clone, PartialEq)]
pub struct RawRule {
    pub name: Token,
    pub alternatives: Vec<RawAlternative>,
}

/// One right-hand side: symbol terms plus optional action code. An empty
/// term list is the epsilon alternative.
#[derive(Debug, Clone, PartialEq)]
pub struct RawAlternative {
    pub terms: Vec<Token>,
    pub code: Option<Token>,
}

/// Parses a token stream into rules and directives.
pub fn parse_tokens(tokens: &[Token]) -> Result<RawGrammar, SyntaxError> {
    match grammar_file().easy_parse(tokens) {
        Ok((grammar, _rest)) => Ok(grammar),
        Err(err) => {
            let offset = err.position.translate_position(tokens) / std::mem::size_of::<Token>();
            match tokens.get(offset) {
                Some(token) => Err(SyntaxError::UnexpectedToken {
                    lexeme: token.lexeme.clone(),
                    line: token.line,
                    column: token.column,
                }),
                None => Err(SyntaxError::UnexpectedEnd),
            }
        }
    }
}

fn grammar_file<I>() -> impl Parser<Input = I, Output = RawGrammar>
where
    I: Stream<Item = Token>,
    I::Error: ParseError<I::Item, I::Range, I::Position>,
{
    (
        many::<Vec<_>, _>(directive()),
        many1::<Vec<_>, _>(rule()),
        eof(),
    )
        .map(|(directives, rules, _)| RawGrammar { directives, rules })
}

fn directive<I>() -> impl Parser<Input = I, Output = RawDirective>
where
    I: Stream<Item = Token>,
    I::Error: ParseError<I::Item, I::Range, I::Position>,
{
    choice((
        (directive_token("name"), kind(TokenKind::Ident)).map(|(_, name)| RawDirective::Name(name)),
        (directive_token("start"), kind(TokenKind::Ident))
            .map(|(_, start)| RawDirective::Start(start)),
        (
            directive_token("option"),
            kind(TokenKind::Ident),
            kind(TokenKind::Str),
        )
            .map(|(_, key, value)| RawDirective::Option(key, value)),
    ))
}

fn rule<I>() -> impl Parser<Input = I, Output = RawRule>
where
    I: Stream<Item = Token>,
    I::Error: ParseError<I::Item, I::Range, I::Position>,
{
    (
        kind(TokenKind::Ident),
        kind(TokenKind::RuleStart),
        sep_by1::<Vec<_>, _, _>(alternative(), kind(TokenKind::Alter)),
        kind(TokenKind::RuleEnd),
    )
        .map(|(name, _, alternatives, _)| RawRule { name, alternatives })
}

fn alternative<I>() -> impl Parser<Input = I, Output = RawAlternative>
where
    I: Stream<Item = Token>,
    I::Error: ParseError<I::Item, I::Range, I::Position>,
{
    (many::<Vec<_>, _>(term()), optional(code_block()))
        .map(|(terms, code)| RawAlternative { terms, code })
}

fn code_block<I>() -> impl Parser<Input = I, Output = Token>
where
    I: Stream<Item = Token>,
    I::Error: ParseError<I::Item, I::Range, I::Position>,
{
    (
        kind(TokenKind::CodeStart),
        kind(TokenKind::Code),
        kind(TokenKind::CodeEnd),
    )
        .map(|(_, code, _)| code)
}

fn term<I>() -> impl Parser<Input = I, Output = Token>
where
    I: Stream<Item = Token>,
    I::Error: ParseError<I::Item, I::Range, I::Position>,
{
    satisfy_map(|token: Token| match token.kind {
        TokenKind::Ident | TokenKind::Str => Some(token),
        _ => None,
    })
}

fn kind<I>(expected: TokenKind) -> impl Parser<Input = I, Output = Token>
where
    I: Stream<Item = Token>,
    I::Error: ParseError<I::Item, I::Range, I::Position>,
{
    satisfy_map(move |token: Token| {
        if token.kind == expected {
            Some(token)
        } else {
            None
        }
    })
}

fn directive_token<I>(name: &'static str) -> impl Parser<Input = I, Output = Token>
where
    I: Stream<Item = Token>,
    I::Error: ParseError<I::Item, I::Range, I::Position>,
{
    satisfy_map(move |token: Token| {
        if token.kind == TokenKind::Directive && token.value == name {
            Some(token)
        } else {
            None
        }
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::lexer::tokenize;
    use matches::assert_matches;

    fn parse(source: &str) -> Result<RawGrammar, SyntaxError> {
        parse_tokens(&tokenize(source).unwrap())
    }

    #[test]
    fn parses_rules_with_alternatives() {
        let grammar = parse("expr : expr '+' term | term ; term : NUM ;").unwrap();
        assert_eq!(grammar.rules.len(), 2);
        assert_eq!(grammar.rules[0].name.value, "expr");
        assert_eq!(grammar.rules[0].alternatives.len(), 2);
        assert_eq!(grammar.rules[0].alternatives[0].terms.len(), 3);
        assert_eq!(grammar.rules[1].alternatives[0].terms[0].value, "NUM");
    }

    #[test]
    fn parses_epsilon_alternatives() {
        let grammar = parse("opt : | X ;").unwrap();
        assert!(grammar.rules[0].alternatives[0].terms.is_empty());
        assert_eq!(grammar.rules[0].alternatives[1].terms.len(), 1);
    }

    #[test]
    fn attaches_action_code_to_its_alternative() {
        let grammar = parse("sum : sum '+' NUM { $$ = $1 + $3; } | NUM ;").unwrap();
        let code = grammar.rules[0].alternatives[0].code.as_ref().unwrap();
        assert_eq!(code.value.trim(), "$$ = $1 + $3;");
        assert!(grammar.rules[0].alternatives[1].code.is_none());
    }

    #[test]
    fn parses_directives_before_rules() {
        let grammar = parse("%name Calc %start expr %option parse \"doParse\" expr : NUM ;")
            .unwrap();
        assert_eq!(grammar.directives.len(), 3);
        assert_matches!(grammar.directives[0], RawDirective::Name(_));
        assert_matches!(grammar.directives[1], RawDirective::Start(_));
        match &grammar.directives[2] {
            RawDirective::Option(key, value) => {
                assert_eq!(key.value, "parse");
                assert_eq!(value.value, "doParse");
            }
            other => panic!("expected option directive, got {:?}", other),
        }
    }

    #[test]
    fn missing_rule_end_is_an_error() {
        let error = parse("a : B").unwrap_err();
        assert_matches!(error, SyntaxError::UnexpectedEnd);
    }

    #[test]
    fn stray_token_is_reported_with_position() {
        let error = parse("a : B ; ;").unwrap_err();
        assert_matches!(
            error,
            SyntaxError::UnexpectedToken { line: 1, column: 9, .. }
        );
    }
}
