//! Raw record shapes handed to the data model by the fetch layer.
//!
//! Known fields are named; anything else the source returns is kept in the
//! `extra` map so newer API fields survive a round trip without code changes.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::game::GameStats;
use crate::id::GameId;

/// Residual fields not covered by a named struct field.
pub type ExtraFields = BTreeMap<String, Value>;

/// Ownership and status flags of a collection entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemStatus {
    pub own: bool,
    pub prev_owned: bool,
    pub for_trade: bool,
    pub want: bool,
    pub want_to_play: bool,
    pub want_to_buy: bool,
    pub wishlist: bool,
    pub preordered: bool,
}

/// One game's entry in a collection response, before validation.
///
/// `id` is optional here so that a malformed entry can be represented and
/// rejected by [`Collection::add_game`](crate::Collection::add_game).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<GameId>,
    pub name: Option<String>,
    pub year_published: Option<i32>,
    pub image: Option<String>,
    pub thumbnail: Option<String>,
    pub collection_id: Option<u64>,
    pub num_plays: Option<u32>,
    pub comment: Option<String>,
    /// The owner's own rating, 1-10.
    pub rating: Option<f64>,
    pub status: ItemStatus,
    pub wishlist_priority: Option<u8>,
    /// As reported by the API, e.g. `2023-04-01 12:30:00`.
    pub last_modified: Option<String>,
    pub min_players: Option<u32>,
    pub max_players: Option<u32>,
    pub playing_time: Option<u32>,
    pub min_playing_time: Option<u32>,
    pub max_playing_time: Option<u32>,
    pub stats: Option<GameStats>,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl ItemRecord {
    pub fn with_id(id: impl Into<GameId>) -> Self {
        Self {
            id: Some(id.into()),
            ..Default::default()
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// A whole collection response: owner, raw items, and any other
/// collection-level fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CollectionData {
    pub owner: String,
    #[serde(default)]
    pub items: Vec<ItemRecord>,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl CollectionData {
    pub fn new(owner: impl Into<String>, items: Vec<ItemRecord>) -> Self {
        Self {
            owner: owner.into(),
            items,
            extra: ExtraFields::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_fields_land_in_extra() {
        let record: ItemRecord = serde_json::from_str(
            r#"{"id": "13", "name": "CATAN", "version": {"year": 2015}, "objecttype": "thing"}"#,
        )
        .unwrap();
        assert_eq!(record.id, Some(GameId(13)));
        assert_eq!(record.name.as_deref(), Some("CATAN"));
        assert_eq!(record.extra.len(), 2);
        assert_eq!(record.extra["objecttype"], Value::from("thing"));
    }

    #[test]
    fn missing_id_is_representable() {
        let record: ItemRecord = serde_json::from_str("{}").unwrap();
        assert_eq!(record.id, None);
        assert_eq!(record.status, ItemStatus::default());
    }

    #[test]
    fn collection_level_fields_are_kept() {
        let data: CollectionData = serde_json::from_str(
            r#"{"owner": "alice", "items": [{"id": 1}], "total_items": 1, "pubdate": "today"}"#,
        )
        .unwrap();
        assert_eq!(data.owner, "alice");
        assert_eq!(data.items.len(), 1);
        assert_eq!(data.extra["total_items"], Value::from(1));
        assert!(!data.extra.contains_key("items"));
    }
}
