use bgg_core::*;
use serde_json::json;

fn from_json(value: serde_json::Value) -> Result<Collection, DataError> {
    let data: CollectionData = serde_json::from_value(value).unwrap();
    Collection::new(data)
}

#[test]
fn builds_from_owner_and_items_mapping() {
    let c = from_json(json!({
        "owner": "alice",
        "items": [
            {"id": 174430, "name": "Gloomhaven", "status": {"own": true}, "num_plays": 12},
            {"id": "224517", "name": "Brass: Birmingham", "rating": 9.5},
            {"id": 174430, "name": "Gloomhaven (second copy)"}
        ],
        "total_items": 3,
        "pubdate": "Sat, 01 Jun 2024 10:00:00 +0000"
    }))
    .unwrap();

    assert_eq!(c.owner(), "alice");
    assert_eq!(c.len(), 2);
    assert_eq!(c[0].name(), Some("Gloomhaven"));
    assert!(c[0].status().own);
    assert_eq!(c[0].num_plays(), 12);
    assert_eq!(c[1].id(), GameId(224517));
    assert_eq!(c[1].rating(), Some(9.5));
    assert_eq!(c.extra("total_items"), Some(&json!(3)));
    assert!(c.extra("owner").is_none());
}

#[test]
fn missing_items_field_gives_empty_collection() {
    let c = from_json(json!({"owner": "alice"})).unwrap();
    assert!(c.is_empty());
    assert_eq!(c.to_string(), "alice's collection, 0 items");
}

#[test]
fn item_without_id_fails_construction() {
    let result = from_json(json!({
        "owner": "alice",
        "items": [{"id": 1}, {"name": "no id here"}]
    }));
    assert!(matches!(result, Err(DataError::InvalidData(_))));
}

#[test]
fn item_level_unknown_fields_are_preserved() {
    let c = from_json(json!({
        "owner": "alice",
        "items": [{"id": 1, "version": {"name": "First Edition"}}]
    }))
    .unwrap();
    assert_eq!(
        c[0].extra("version"),
        Some(&json!({"name": "First Edition"}))
    );
}

#[test]
fn union_of_three_collections() {
    let a = from_json(json!({"owner": "alice", "items": [{"id": 1}]})).unwrap();
    let b = from_json(json!({"owner": "bob", "items": [{"id": 1}, {"id": 2}]})).unwrap();
    let c = from_json(json!({"owner": "carol", "items": [{"id": 3}]})).unwrap();

    let combined = [a, b, c].into_iter().reduce(|acc, next| acc + next).unwrap();
    assert_eq!(combined.owner(), "alice+bob+carol");
    assert_eq!(combined.len(), 4);
    assert_eq!(combined.distinct_ids(), 3);
}

#[test]
fn log_sink_formats_without_panicking() {
    let c = from_json(json!({"owner": "alice", "items": [{"id": 1}]})).unwrap();
    let mut sink = LogSink::default();
    c.format(&mut sink);
}

#[test]
fn textual_and_numeric_ids_name_the_same_game() {
    let c = from_json(json!({
        "owner": "alice",
        "items": [
            {"id": "13", "name": "CATAN (from XML)"},
            {"id": 13, "name": "CATAN (from JSON)"},
            {"id": " 822 "}
        ]
    }))
    .unwrap();

    assert_eq!(c.len(), 2);
    assert_eq!(c.distinct_ids(), 2);
    assert_eq!(c[0].name(), Some("CATAN (from XML)"));
    assert!(c.contains(GameId(822)));
}
