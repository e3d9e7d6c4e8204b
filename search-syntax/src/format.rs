use itertools::Itertools;
use std::fmt;

use crate::{SearchQuery, Token};

impl SearchQuery {
    /// Canonical string form, the representation sent to the events API.
    /// Canonical strings round-trip: parsing one and serializing it again
    /// yields the same string.
    pub fn to_query_string(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self.tokens().iter().map(format_token).join(" ");
        f.write_str(joined.trim())
    }
}

fn format_token(token: &Token) -> String {
    match token {
        Token::Op(op) => op.to_string(),
        Token::Free(value) => value.clone(),
        Token::Tag { key, value } if value.is_empty() => format!("{key}:\"\""),
        Token::Tag { key, value } if needs_quoting(value) => {
            format!("{key}:\"{}\"", value.replace('"', "\\\""))
        }
        Token::Tag { key, value } => format!("{key}:{value}"),
    }
}

/// A tag value containing any of these would not survive re-tokenization
/// unquoted.
fn needs_quoting(value: &str) -> bool {
    value
        .chars()
        .any(|c| c.is_whitespace() || matches!(c, '(' | ')' | '\\' | '"'))
}
