use discover_query::{DEFAULT_PER_PAGE, EventQuery, Sort};
use search_syntax::SearchQuery;
use serde_json::Value;

fn sample_query() -> EventQuery {
    let mut additional_conditions = SearchQuery::new();
    additional_conditions.add_tag_values("event.type", ["error"]);
    EventQuery {
        name: "Errors by user".to_owned(),
        fields: vec!["title".to_owned(), "user".to_owned(), "count()".to_owned()],
        sorts: vec![Sort::desc("count()")],
        query: "is:unresolved".to_owned(),
        project: vec![42],
        environment: vec!["production".to_owned()],
        additional_conditions,
    }
}

#[test]
fn payload_carries_the_merged_query() {
    let payload = sample_query().events_api_payload();
    assert_eq!(payload.query, "is:unresolved event.type:error");
    assert_eq!(payload.per_page, DEFAULT_PER_PAGE);
    assert_eq!(payload.project, [42]);
    assert_eq!(payload.environment, ["production"]);
}

#[test]
fn duplicate_fields_collapse_to_the_first_occurrence() {
    let mut query = sample_query();
    query.fields = vec![
        "title".to_owned(),
        "user".to_owned(),
        "title".to_owned(),
        "count()".to_owned(),
        "user".to_owned(),
    ];
    let payload = query.events_api_payload();
    assert_eq!(payload.field, ["title", "user", "count()"]);
}

#[test]
fn sorts_encode_into_the_wire_form() {
    let mut query = sample_query();
    query.sorts = vec![Sort::desc("timestamp"), Sort::asc("title")];
    let payload = query.events_api_payload();
    assert_eq!(payload.sort, ["-timestamp", "title"]);
}

#[test]
fn empty_sort_is_omitted_from_the_serialized_payload() {
    let mut query = sample_query();
    query.sorts.clear();
    let json: Value =
        serde_json::from_str(&query.events_api_payload().to_json().unwrap()).unwrap();
    assert!(json.get("sort").is_none());
    assert_eq!(json["per_page"], 50);
    assert_eq!(json["query"], "is:unresolved event.type:error");
}

#[test]
fn payload_json_round_trips() {
    let payload = sample_query().events_api_payload();
    let json = payload.to_json().unwrap();
    let back: discover_query::EventsApiPayload = serde_json::from_str(&json).unwrap();
    assert_eq!(back, payload);
}
