use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKind {
    Asc,
    Desc,
}

/// One entry of the events API `sort` parameter. The wire encoding is the
/// field name, with a leading `-` for descending.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sort {
    pub field: String,
    pub kind: SortKind,
}

impl Sort {
    pub fn asc(field: impl Into<String>) -> Sort {
        Sort {
            field: field.into(),
            kind: SortKind::Asc,
        }
    }

    pub fn desc(field: impl Into<String>) -> Sort {
        Sort {
            field: field.into(),
            kind: SortKind::Desc,
        }
    }

    /// Decodes the wire form. Anything without a leading `-` is ascending,
    /// so arbitrary query-string input always decodes to something.
    pub fn parse(encoded: &str) -> Sort {
        let encoded = encoded.trim();
        match encoded.strip_prefix('-') {
            Some(field) => Sort::desc(field),
            None => Sort::asc(encoded),
        }
    }

    pub fn encode(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Sort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            SortKind::Asc => f.write_str(&self.field),
            SortKind::Desc => write!(f, "-{}", self.field),
        }
    }
}
