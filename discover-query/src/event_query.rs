use itertools::Itertools;
use serde::{Deserialize, Serialize};
use tracing::trace;

use search_syntax::SearchQuery;

use crate::Sort;

/// Events requested per page when the caller does not override it.
pub const DEFAULT_PER_PAGE: u32 = 50;

/// A saved discover query: the user's field/sort/query selection plus the
/// conditions the surrounding view pins on top of it.
///
/// The pinned conditions are kept separate from `query` so the user's text
/// survives edits; they are merged in only when the request payload is built.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventQuery {
    pub name: String,
    pub fields: Vec<String>,
    pub sorts: Vec<Sort>,
    pub query: String,
    pub project: Vec<u64>,
    pub environment: Vec<String>,
    pub additional_conditions: SearchQuery,
}

impl EventQuery {
    /// The query string actually sent to the events API: the user's text
    /// with every pinned condition appended after it.
    pub fn query_with_additional_conditions(&self) -> String {
        let mut conditions = SearchQuery::parse(&self.query);
        for key in self.additional_conditions.tag_keys() {
            let values = self.additional_conditions.tag_values(key);
            conditions.add_tag_values(key, values.iter().map(String::as_str));
        }
        conditions.to_query_string()
    }

    /// Converts the selection into the events API request payload. Duplicate
    /// fields collapse to their first occurrence; an empty sort list is
    /// omitted from the serialized payload entirely.
    pub fn events_api_payload(&self) -> EventsApiPayload {
        let field: Vec<String> = self.fields.iter().unique().cloned().collect();
        let sort: Vec<String> = self.sorts.iter().map(Sort::encode).collect();
        trace!(
            fields = field.len(),
            sorts = sort.len(),
            "building events API payload"
        );
        EventsApiPayload {
            field,
            sort,
            project: self.project.clone(),
            environment: self.environment.clone(),
            per_page: DEFAULT_PER_PAGE,
            query: self.query_with_additional_conditions(),
        }
    }
}

/// Wire form of one events API request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventsApiPayload {
    pub field: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub sort: Vec<String>,
    pub project: Vec<u64>,
    pub environment: Vec<String>,
    pub per_page: u32,
    pub query: String,
}

impl EventsApiPayload {
    /// JSON body form, for callers that post instead of building a query
    /// string.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
