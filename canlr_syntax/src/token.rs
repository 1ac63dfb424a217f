use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Ident,
    Str,
    RuleStart,
    RuleEnd,
    Alter,
    CodeStart,
    Code,
    CodeEnd,
    Directive,
}

/// One token of the grammar notation.
///
/// `lexeme` is the matched source text; `value` is the decoded payload
/// (quoted literals with their quotes stripped and escapes resolved,
/// directives without the leading `%`). Line and column are 1-based.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub value: String,
    pub line: usize,
    pub column: usize,
}

impl Token {
    pub fn new(
        kind: TokenKind,
        lexeme: impl Into<String>,
        value: impl Into<String>,
        line: usize,
        column: usize,
    ) -> Self {
        Token {
            kind,
            lexeme: lexeme.into(),
            value: value.into(),
            line,
            column,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        write!(f, "`{}` at {}:{}", self.lexeme, self.line, self.column)
    }
}
