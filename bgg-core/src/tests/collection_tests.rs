use super::*;
use crate::record::ItemStatus;

fn record(id: u64, name: &str) -> ItemRecord {
    ItemRecord::with_id(id).name(name)
}

fn collection(owner: &str, ids: &[u64]) -> Collection {
    let items = ids.iter().map(|&id| ItemRecord::with_id(id)).collect();
    Collection::new(CollectionData::new(owner, items)).unwrap()
}

fn ids(c: &Collection) -> Vec<u64> {
    c.iter().map(|i| i.id().get()).collect()
}

#[test]
fn duplicates_are_dropped_first_occurrence_wins() {
    let data = CollectionData::new(
        "alice",
        vec![
            record(1, "first"),
            record(2, "two"),
            record(1, "second"),
            record(3, "three"),
            record(2, "again"),
        ],
    );
    let c = Collection::new(data).unwrap();

    assert_eq!(c.len(), 3);
    assert_eq!(c.distinct_ids(), 3);
    assert_eq!(c[0].name(), Some("first"));
    assert_eq!(c[1].name(), Some("two"));
}

#[test]
fn duplicates_are_not_merged_field_by_field() {
    let mut owned = ItemRecord::with_id(7u64);
    owned.status = ItemStatus {
        own: true,
        ..Default::default()
    };
    let mut wished = ItemRecord::with_id(7u64);
    wished.status = ItemStatus {
        wishlist: true,
        ..Default::default()
    };
    wished.comment = Some("later copy".to_string());

    let c = Collection::new(CollectionData::new("alice", vec![owned, wished])).unwrap();
    assert_eq!(c.len(), 1);
    assert!(c[0].status().own);
    assert!(!c[0].status().wishlist);
    assert_eq!(c[0].comment(), None);
}

#[test]
fn add_game_without_id_fails() {
    let mut c = Collection::empty("alice");
    let err = c.add_game(ItemRecord::default()).unwrap_err();
    assert!(matches!(err, DataError::InvalidData(_)));
    assert!(c.is_empty());
    assert_eq!(c.distinct_ids(), 0);
}

#[test]
fn add_game_reports_whether_it_appended() {
    let mut c = Collection::empty("alice");
    assert!(c.add_game(ItemRecord::with_id(5u64)).unwrap());
    assert!(!c.add_game(ItemRecord::with_id(5u64)).unwrap());
    assert_eq!(c.len(), 1);
    assert!(c.contains(GameId(5)));
}

#[test]
fn construction_fails_on_invalid_item() {
    let data = CollectionData::new(
        "alice",
        vec![ItemRecord::with_id(1u64), ItemRecord::default(), ItemRecord::with_id(2u64)],
    );
    let result = Collection::new(data);
    assert!(matches!(result, Err(DataError::InvalidData(_))));
}

#[test]
fn iteration_follows_first_seen_order() {
    let c = collection("alice", &[30, 10, 20, 10, 40, 30]);
    assert_eq!(ids(&c), vec![30, 10, 20, 40]);
}

#[test]
fn iteration_is_restartable() {
    let c = collection("alice", &[3, 1, 2]);
    let first: Vec<_> = c.iter().map(|i| i.id()).collect();
    let second: Vec<_> = (&c).into_iter().map(|i| i.id()).collect();
    assert_eq!(first, second);

    let mut partial = c.iter();
    partial.next();
    assert_eq!(c.iter().next().map(|i| i.id()), Some(GameId(3)));
}

#[test]
fn index_past_end_is_an_error() {
    let c = collection("alice", &[1, 2]);
    assert_eq!(c.try_get(1).unwrap().id(), GameId(2));
    assert_eq!(
        c.try_get(c.len()).unwrap_err(),
        DataError::IndexOutOfRange { index: 2, len: 2 }
    );
    assert!(c.get(c.len()).is_none());
}

#[test]
#[should_panic]
fn index_operator_panics_past_end() {
    let c = collection("alice", &[1]);
    let _ = &c[c.len()];
}

#[test]
fn union_names_owner_from_both_sides() {
    let combined = &collection("alice", &[]) + &collection("bob", &[]);
    assert_eq!(combined.owner(), "alice+bob");

    let reversed = &collection("bob", &[]) + &collection("alice", &[]);
    assert_eq!(reversed.owner(), "bob+alice");
}

#[test]
fn union_concatenates_without_deduplicating() {
    let a = collection("alice", &[1, 2]);
    let b = collection("bob", &[2, 3]);

    let combined = &a + &b;
    assert_eq!(combined.len(), 4);
    assert_eq!(combined.distinct_ids(), 3);
    assert_eq!(ids(&combined), vec![1, 2, 2, 3]);

    // operands are untouched
    assert_eq!(a.len(), 2);
    assert_eq!(b.owner(), "bob");
}

#[test]
fn owned_union_matches_borrowed_union() {
    let a = collection("alice", &[1, 2]);
    let b = collection("bob", &[2, 3]);
    let borrowed = &a + &b;
    let owned = a + b;
    assert_eq!(owned, borrowed);
}

#[test]
fn union_keeps_left_metadata() {
    let mut left = CollectionData::new("alice", vec![ItemRecord::with_id(1u64)]);
    left.extra.insert("total_items".to_string(), Value::from(1));
    let mut right = CollectionData::new("bob", vec![]);
    right
        .extra
        .insert("pubdate".to_string(), Value::from("yesterday"));

    let combined = Collection::new(left).unwrap() + Collection::new(right).unwrap();
    assert_eq!(combined.extra("total_items"), Some(&Value::from(1)));
    assert_eq!(combined.extra("pubdate"), None);
}

#[test]
fn adding_after_union_respects_merged_ids() {
    let mut combined = collection("alice", &[1]) + collection("bob", &[2]);
    assert!(!combined.add_game(ItemRecord::with_id(2u64)).unwrap());
    assert!(combined.add_game(ItemRecord::with_id(3u64)).unwrap());
    assert_eq!(ids(&combined), vec![1, 2, 3]);
}

#[test]
fn format_writes_header_then_item_blocks() {
    let c = Collection::new(CollectionData::new(
        "alice",
        vec![record(1, "Azul"), record(2, "Brass")],
    ))
    .unwrap();

    let mut lines: Vec<String> = Vec::new();
    c.format(&mut lines);

    assert_eq!(lines[0], "owner    : alice");
    assert_eq!(lines[1], "size     : 2 items");
    assert_eq!(lines[2], "items");
    assert!(lines.contains(&"boardgame name   : Azul".to_string()));
    assert!(lines.contains(&"boardgame name   : Brass".to_string()));
    assert_eq!(lines.iter().filter(|l| l.is_empty()).count(), 2);
    assert_eq!(lines.last().map(String::as_str), Some(""));

    // formatting is read-only
    assert_eq!(c.len(), 2);
}

#[test]
fn display_summarizes() {
    let c = collection("alice", &[1, 2, 2]);
    assert_eq!(c.to_string(), "alice's collection, 2 items");
}
