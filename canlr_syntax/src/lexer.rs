use lazy_static::lazy_static;
use regex::Regex;

use crate::error::SyntaxError;
use crate::escape;
use crate::token::{Token, TokenKind};

lazy_static! {
    static ref WHITESPACE: Regex = Regex::new(r"^\s+").unwrap();
    static ref COMMENT: Regex = Regex::new(r"^#[^\n]*").unwrap();
    static ref IDENT: Regex = Regex::new(r"^[a-zA-Z][a-zA-Z0-9_]*").unwrap();
    static ref STRING: Regex = Regex::new(r#"^('[^']+'|"[^"]+"|`[^`]+`)"#).unwrap();
    static ref DIRECTIVE: Regex = Regex::new(r"^%[a-zA-Z][a-zA-Z0-9_]*").unwrap();
}

/// Converts grammar source text into a token stream.
///
/// After a `{` the lexer switches to brace counting and captures the
/// whole code block as a single opaque token, so action code is free to
/// contain any grammar metacharacters.
pub fn tokenize(source: &str) -> Result<Vec<Token>, SyntaxError> {
    let source = source.replace("\r\n", "\n").replace('\r', "\n");
    let mut tokens = Vec::new();
    let mut rest = source.as_str();
    let mut line = 1usize;
    let mut column = 1usize;

    while !rest.is_empty() {
        if let Some(m) = WHITESPACE.find(rest).or_else(|| COMMENT.find(rest)) {
            let (l, c) = advance(m.as_str(), line, column);
            line = l;
            column = c;
            rest = &rest[m.end()..];
            continue;
        }

        if let Some(m) = IDENT.find(rest) {
            tokens.push(Token::new(
                TokenKind::Ident,
                m.as_str(),
                m.as_str(),
                line,
                column,
            ));
            column += m.end();
            rest = &rest[m.end()..];
            continue;
        }

        if let Some(m) = STRING.find(rest) {
            let value = escape::decode(m.as_str(), line, column)?;
            tokens.push(Token::new(TokenKind::Str, m.as_str(), value, line, column));
            let (l, c) = advance(m.as_str(), line, column);
            line = l;
            column = c;
            rest = &rest[m.end()..];
            continue;
        }

        if let Some(m) = DIRECTIVE.find(rest) {
            tokens.push(Token::new(
                TokenKind::Directive,
                m.as_str(),
                &m.as_str()[1..],
                line,
                column,
            ));
            column += m.end();
            rest = &rest[m.end()..];
            continue;
        }

        let ch = rest.chars().next().expect("rest is non-empty");
        match ch {
            ':' | ';' | '|' | '}' => {
                let kind = match ch {
                    ':' => TokenKind::RuleStart,
                    ';' => TokenKind::RuleEnd,
                    '|' => TokenKind::Alter,
                    _ => TokenKind::CodeEnd,
                };
                tokens.push(Token::new(kind, ch.to_string(), ch.to_string(), line, column));
                column += 1;
                rest = &rest[1..];
            }
            '{' => {
                tokens.push(Token::new(TokenKind::CodeStart, "{", "{", line, column));
                let code = match balanced_code(&rest[1..]) {
                    Some(code) => code,
                    None => return Err(SyntaxError::UnterminatedCode { line, column }),
                };
                let (l, c) = advance(code, line, column + 1);
                tokens.push(Token::new(TokenKind::Code, code, code, line, column + 1));
                tokens.push(Token::new(TokenKind::CodeEnd, "}", "}", l, c));
                rest = &rest[1 + code.len() + 1..];
                line = l;
                column = c + 1;
            }
            _ => {
                return Err(SyntaxError::UnexpectedChar { ch, line, column });
            }
        }
    }

    Ok(tokens)
}

/// The code text between a `{` and its balancing `}`, or `None` when the
/// braces never balance.
fn balanced_code(rest: &str) -> Option<&str> {
    let mut depth = 0usize;
    for (i, ch) in rest.char_indices() {
        match ch {
            '{' => depth += 1,
            '}' => {
                if depth == 0 {
                    return Some(&rest[..i]);
                }
                depth -= 1;
            }
            _ => {}
        }
    }
    None
}

/// Line/column position after consuming `text`.
fn advance(text: &str, line: usize, column: usize) -> (usize, usize) {
    let newlines = text.matches('\n').count();
    if newlines == 0 {
        (line, column + text.chars().count())
    } else {
        let tail = text.rsplit('\n').next().unwrap_or("");
        (line + newlines, tail.chars().count() + 1)
    }
}
