use crate::error::SyntaxError;

/// Decodes a quoted literal to the character data a terminal matches
/// against.
///
/// Backquoted literals are taken verbatim; single- and double-quoted
/// literals resolve the usual escape sequences. Operates purely on the
/// literal's characters; nothing is ever evaluated.
pub fn decode(lexeme: &str, line: usize, column: usize) -> Result<String, SyntaxError> {
    let inner = &lexeme[1..lexeme.len() - 1];
    if lexeme.starts_with('`') {
        return Ok(inner.to_owned());
    }

    let mut decoded = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            decoded.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => decoded.push('\n'),
            Some('t') => decoded.push('\t'),
            Some('r') => decoded.push('\r'),
            Some('0') => decoded.push('\0'),
            Some('\\') => decoded.push('\\'),
            Some('\'') => decoded.push('\''),
            Some('"') => decoded.push('"'),
            Some(other) => {
                return Err(SyntaxError::BadEscape {
                    escape: format!("\\{}", other),
                    line,
                    column,
                });
            }
            None => {
                return Err(SyntaxError::BadEscape {
                    escape: "\\".to_owned(),
                    line,
                    column,
                });
            }
        }
    }
    Ok(decoded)
}
