#![allow(dead_code)]

use search_syntax::{Op, SearchQuery, Token};

pub fn parse(raw: &str) -> SearchQuery {
    SearchQuery::parse(raw)
}

pub fn free_is(token: &Token, expected: &str) {
    match token {
        Token::Free(value) => assert_eq!(value, expected),
        other => panic!("expected free text {expected:?}, got {other:?}"),
    }
}

pub fn tag_is(token: &Token, key: &str, value: &str) {
    match token {
        Token::Tag { key: k, value: v } => {
            assert_eq!(k, key);
            assert_eq!(v, value);
        }
        other => panic!("expected tag {key}:{value}, got {other:?}"),
    }
}

pub fn op_is(token: &Token, expected: Op) {
    match token {
        Token::Op(op) => assert_eq!(*op, expected),
        other => panic!("expected operator {expected:?}, got {other:?}"),
    }
}

pub fn tag_count(query: &SearchQuery, key: &str) -> usize {
    query
        .tokens()
        .iter()
        .filter(|token| matches!(token, Token::Tag { key: k, .. } if k == key))
        .count()
}
