use crate::{Op, Token};

#[derive(Clone, Copy, PartialEq, Eq)]
enum QuoteState {
    Unquoted,
    Single,
    Double,
}

// `is:unresolved assigned:me "parse error"` => ["is:unresolved", "assigned:me", "\"parse error\""]
// `key: "a b" c`                            => ["key: \"a b\"", "c"]
// `(foo bar) baz`                           => ["(foo", "bar)", "baz"]
/// Splits a raw search string into word-sized chunks. Whitespace inside a
/// matched quote pair does not split, and neither does whitespace directly
/// after a `:` (so `key: "value"` survives as one chunk).
pub(crate) fn split_into_words(query: &str) -> Vec<String> {
    let chars: Vec<char> = query.chars().collect();
    let mut words = Vec::new();
    let mut word = String::new();
    let mut end_of_prev_word = None;
    let mut quote = QuoteState::Unquoted;

    for (idx, &ch) in chars.iter().enumerate() {
        word.push(ch);

        if !ch.is_whitespace() && chars.get(idx + 1).is_some_and(|next| next.is_whitespace()) {
            end_of_prev_word = Some(ch);
        }

        if ch.is_whitespace()
            && quote == QuoteState::Unquoted
            && end_of_prev_word != Some(':')
            && !word.trim().is_empty()
        {
            words.push(word.trim().to_owned());
            word.clear();
        }

        // A quote only closes on the character that opened it; a mismatched
        // quote character inside the span is literal.
        quote = match (quote, ch) {
            (QuoteState::Unquoted, '\'') => QuoteState::Single,
            (QuoteState::Unquoted, '"') => QuoteState::Double,
            (QuoteState::Single, '\'') => QuoteState::Unquoted,
            (QuoteState::Double, '"') => QuoteState::Unquoted,
            (state, _) => state,
        };
    }

    let word = word.trim();
    if !word.is_empty() {
        words.push(word.to_owned());
    }
    words
}

/// Classifies split words into tokens: bare boolean words, leading/trailing
/// paren runs, `key:value` tags, free text. Never fails; arbitrary keystrokes
/// degrade to free-text tokens.
pub(crate) fn parse_tokens(raw: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    for word in split_into_words(raw) {
        if let Some(op) = Op::boolean(&word) {
            tokens.push(Token::Op(op));
            continue;
        }

        let leading = word.chars().take_while(|&c| c == '(').count();
        tokens.extend(std::iter::repeat_n(Token::Op(Op::OpenParen), leading));
        let mut word = &word[leading..];

        // Tag detection looks at the word before the trailing parens come
        // off, matching how the search bar treats `is:resolved)`.
        let is_tag = tag_separator(word).is_some();

        let mut trailing = 0;
        if word.ends_with(')') && !word.contains('(') {
            trailing = word.chars().rev().take_while(|&c| c == ')').count();
            word = &word[..word.len() - trailing];
        }

        if is_tag {
            let (key, value) = split_tag(word);
            tokens.push(Token::Tag { key, value });
        } else if !word.is_empty() {
            tokens.push(Token::Free(strip_free_text(word)));
        }

        tokens.extend(std::iter::repeat_n(Token::Op(Op::CloseParen), trailing));
    }
    tokens
}

/// Byte offset of the `:` that makes `word` a tag, if any. A colon at the
/// start, in a quoted word, doubled (`::`), or directly before a space does
/// not count.
fn tag_separator(word: &str) -> Option<usize> {
    if word.starts_with('"') || word.starts_with(':') {
        return None;
    }
    let colon = word.find(':')?;
    match word[colon + 1..].chars().next() {
        Some(':') | Some(' ') => None,
        _ => Some(colon),
    }
}

fn split_tag(word: &str) -> (String, String) {
    let (key, value) = match word.find(':') {
        Some(colon) => (&word[..colon], &word[colon + 1..]),
        None => (word, ""),
    };
    (
        key.trim_matches('"').to_owned(),
        value.trim_matches('"').to_owned(),
    )
}

pub(crate) fn strip_free_text(word: &str) -> String {
    word.trim_start_matches(['"', '('])
        .trim_end_matches(['"', ')'])
        .to_owned()
}
