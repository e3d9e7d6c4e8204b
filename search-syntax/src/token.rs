use serde::{Deserialize, Serialize};
use std::fmt;

/// Structural operator inside a search string.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Op {
    OpenParen,
    CloseParen,
    Or,
    And,
}

impl Op {
    /// Recognizes a bare `or`/`and` word in any casing. Parens never arrive
    /// here; they are peeled off words as character runs.
    pub fn boolean(word: &str) -> Option<Op> {
        if word.eq_ignore_ascii_case("or") {
            Some(Op::Or)
        } else if word.eq_ignore_ascii_case("and") {
            Some(Op::And)
        } else {
            None
        }
    }

    pub fn is_boolean(self) -> bool {
        matches!(self, Op::Or | Op::And)
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Op::OpenParen => "(",
            Op::CloseParen => ")",
            Op::Or => "OR",
            Op::And => "AND",
        })
    }
}

/// One element of a tokenized search string.
///
/// `Tag` keys and values are stored without their wrapping quotes; `Free`
/// text is stored without enclosing quotes or parens. Quoting is re-applied
/// on serialization where the value requires it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Token {
    Op(Op),
    Tag { key: String, value: String },
    Free(String),
}

impl Token {
    pub fn tag(key: impl Into<String>, value: impl Into<String>) -> Token {
        Token::Tag {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn free(value: impl Into<String>) -> Token {
        Token::Free(value.into())
    }

    pub fn is_op(&self) -> bool {
        matches!(self, Token::Op(_))
    }
}
