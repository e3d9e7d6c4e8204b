use hashbrown::HashMap;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::tokenizer::{parse_tokens, strip_free_text};
use crate::{Op, Token};

/// A tokenized search string plus the tag index derived from it.
///
/// The token sequence is authoritative for structure (parens, connectives,
/// term order); `tag_values` is the per-key view of the same tags. Every
/// mutation keeps the two in sync. Instances are owned by a single caller,
/// edited in place, and serialized back into the string sent to the events
/// API.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    tokens: Vec<Token>,
    tag_values: HashMap<String, Vec<String>>,
}

impl SearchQuery {
    pub fn new() -> SearchQuery {
        SearchQuery::default()
    }

    /// Tokenizes a raw search string. Never fails: the grammar is what a
    /// half-typed search box produces, so malformed input degrades to
    /// free-text tokens instead of erroring.
    pub fn parse(raw: &str) -> SearchQuery {
        let mut query = SearchQuery::new();
        for token in parse_tokens(raw) {
            match token {
                Token::Op(op) => {
                    query.add_op(op);
                }
                Token::Tag { key, value } => {
                    query.push_tag(key, value);
                }
                Token::Free(value) => {
                    query.tokens.push(Token::Free(value));
                }
            }
        }
        query
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Values recorded for `key`, in insertion order. Empty when the tag is
    /// absent.
    pub fn tag_values(&self, key: &str) -> &[String] {
        self.tag_values.get(key).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn has_tag(&self, key: &str) -> bool {
        !self.tag_values(key).is_empty()
    }

    /// Tag keys in first-appearance order.
    pub fn tag_keys(&self) -> Vec<&str> {
        self.tokens
            .iter()
            .filter_map(|token| match token {
                Token::Tag { key, .. } => Some(key.as_str()),
                _ => None,
            })
            .unique()
            .collect()
    }

    /// Appends one `key:value` condition per value, after any existing
    /// tokens. Values from later calls land after earlier ones in both the
    /// token sequence and the per-key list.
    pub fn add_tag_values<I, S>(&mut self, key: &str, values: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for value in values {
            self.push_tag(key.to_owned(), value.into());
        }
        self
    }

    /// Replaces every condition on `key` with `values`.
    pub fn set_tag_values<I, S>(&mut self, key: &str, values: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.remove_tag(key);
        self.add_tag_values(key, values);
        self
    }

    /// Appends a free-text term. Enclosing quotes and parens are stripped;
    /// the term is matched against default fields, not stored verbatim
    /// punctuation.
    pub fn add_free_text(&mut self, value: &str) -> &mut Self {
        self.tokens.push(Token::Free(strip_free_text(value)));
        self
    }

    pub fn add_op(&mut self, op: Op) -> &mut Self {
        self.tokens.push(Token::Op(op));
        self
    }

    /// Removes every condition on `key`, then restores the structural
    /// invariant: paren pairs left holding fewer than two terms are
    /// collapsed, and boolean operators left without an operand are dropped.
    pub fn remove_tag(&mut self, key: &str) -> &mut Self {
        self.tokens
            .retain(|token| !matches!(token, Token::Tag { key: k, .. } if k == key));
        self.tag_values.remove(key);
        self.collapse_parens();
        self.drop_dangling_ops();
        self
    }

    /// Removes a single value of `key`, keeping its other values. Removing
    /// the last value removes the tag entirely, cleanup included.
    pub fn remove_tag_value(&mut self, key: &str, value: &str) -> &mut Self {
        let remaining: Vec<String> = self
            .tag_values
            .get(key)
            .map(|values| values.iter().filter(|v| *v != value).cloned().collect())
            .unwrap_or_default();
        self.set_tag_values(key, remaining);
        self
    }

    fn push_tag(&mut self, key: String, value: String) {
        self.tag_values
            .entry(key.clone())
            .or_default()
            .push(value.clone());
        self.tokens.push(Token::Tag { key, value });
    }

    fn collapse_parens(&mut self) {
        while let Some((open, close)) = self.collapsible_paren_pair() {
            trace!(open, close, "collapsing paren pair left without terms");
            self.tokens.remove(close);
            self.tokens.remove(open);
        }
    }

    /// Finds an innermost paren pair enclosing zero or one non-operator
    /// tokens. Deleting a pair shifts indices and changes nesting, so the
    /// caller rescans from the start after every deletion; a full scan that
    /// finds nothing terminates the cleanup.
    fn collapsible_paren_pair(&self) -> Option<(usize, usize)> {
        let mut open = 0;
        'scan: while open < self.tokens.len() {
            if self.tokens[open] != Token::Op(Op::OpenParen) {
                open += 1;
                continue;
            }
            let mut enclosed = false;
            for candidate in open + 1..self.tokens.len() {
                match &self.tokens[candidate] {
                    // Nested group: resolve the inner pair first.
                    Token::Op(Op::OpenParen) => {
                        open = candidate;
                        continue 'scan;
                    }
                    Token::Op(Op::CloseParen) => return Some((open, candidate)),
                    Token::Op(_) => {}
                    _ => {
                        if enclosed {
                            // Two or more terms inside; this pair stays.
                            open += 1;
                            continue 'scan;
                        }
                        enclosed = true;
                    }
                }
            }
            // Unmatched open paren; leave it literal.
            open += 1;
        }
        None
    }

    fn drop_dangling_ops(&mut self) {
        // One removal per pass: `a OR OR b` must lose a single operator, so
        // the scan restarts after each deletion.
        while let Some(idx) = self.dangling_op() {
            trace!(idx, "dropping boolean operator left without an operand");
            self.tokens.remove(idx);
        }
    }

    fn dangling_op(&self) -> Option<usize> {
        for (idx, token) in self.tokens.iter().enumerate() {
            let Token::Op(op) = token else { continue };
            if !op.is_boolean() {
                continue;
            }
            let prev = idx.checked_sub(1).and_then(|p| self.tokens.get(p));
            let next = self.tokens.get(idx + 1);
            // `) OR (` joins two parenthesized groups and stays.
            if matches!(prev, Some(Token::Op(Op::CloseParen)))
                && matches!(next, Some(Token::Op(Op::OpenParen)))
            {
                continue;
            }
            if prev.is_none_or(Token::is_op) || next.is_none_or(Token::is_op) {
                return Some(idx);
            }
        }
        None
    }
}
