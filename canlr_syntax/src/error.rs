use std::error::Error;
use std::fmt;

/// Errors raised while reading a grammar description.
#[derive(Debug)]
pub enum SyntaxError {
    UnexpectedChar {
        ch: char,
        line: usize,
        column: usize,
    },
    UnexpectedToken {
        lexeme: String,
        line: usize,
        column: usize,
    },
    UnexpectedEnd,
    /// A code block opened with `{` never balanced its braces.
    UnterminatedCode {
        line: usize,
        column: usize,
    },
    /// Unknown or dangling escape sequence inside a quoted literal.
    BadEscape {
        escape: String,
        line: usize,
        column: usize,
    },
    /// An identifier that is neither a rule name nor an ALL-CAPS token
    /// category.
    BadIdentifier {
        name: String,
        line: usize,
        column: usize,
    },
    /// `%start` names a rule that does not exist.
    UnknownStart {
        name: String,
    },
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        match self {
            SyntaxError::UnexpectedChar { ch, line, column } => {
                write!(f, "unexpected character `{}` at {}:{}", ch, line, column)
            }
            SyntaxError::UnexpectedToken {
                lexeme,
                line,
                column,
            } => write!(f, "unexpected token `{}` at {}:{}", lexeme, line, column),
            SyntaxError::UnexpectedEnd => write!(f, "unexpected end of grammar description"),
            SyntaxError::UnterminatedCode { line, column } => {
                write!(f, "unterminated code block opened at {}:{}", line, column)
            }
            SyntaxError::BadEscape {
                escape,
                line,
                column,
            } => write!(f, "bad escape `{}` at {}:{}", escape, line, column),
            SyntaxError::BadIdentifier { name, line, column } => write!(
                f,
                "bad identifier `{}` at {}:{}: expected a rule name or an ALL-CAPS token type",
                name, line, column
            ),
            SyntaxError::UnknownStart { name } => {
                write!(f, "%start names unknown rule `{}`", name)
            }
        }
    }
}

impl Error for SyntaxError {}
