use chrono::NaiveDateTime;
use serde::Serialize;
use serde_json::Value;

use crate::error::DataError;
use crate::game::GameStats;
use crate::id::GameId;
use crate::record::{ItemRecord, ItemStatus};
use crate::sink::{LogFormat, Maybe, Sink};

const LABEL_WIDTH: usize = 17;
const LAST_MODIFIED_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A validated collection entry: a record that is guaranteed to carry an id.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollectionItem {
    id: GameId,
    record: ItemRecord,
}

impl CollectionItem {
    pub fn from_record(record: ItemRecord) -> Result<Self, DataError> {
        let id = record
            .id
            .ok_or_else(|| DataError::invalid_data("collection item has no id"))?;
        Ok(Self { id, record })
    }

    pub fn id(&self) -> GameId {
        self.id
    }

    pub fn name(&self) -> Option<&str> {
        self.record.name.as_deref()
    }

    pub fn year_published(&self) -> Option<i32> {
        self.record.year_published
    }

    pub fn status(&self) -> &ItemStatus {
        &self.record.status
    }

    pub fn rating(&self) -> Option<f64> {
        self.record.rating
    }

    pub fn num_plays(&self) -> u32 {
        self.record.num_plays.unwrap_or(0)
    }

    pub fn comment(&self) -> Option<&str> {
        self.record.comment.as_deref()
    }

    pub fn wishlist_priority(&self) -> Option<u8> {
        self.record.wishlist_priority
    }

    /// Last-modified timestamp, if present and well formed.
    pub fn last_modified(&self) -> Option<NaiveDateTime> {
        let raw = self.record.last_modified.as_deref()?;
        NaiveDateTime::parse_from_str(raw, LAST_MODIFIED_FORMAT).ok()
    }

    pub fn stats(&self) -> Option<&GameStats> {
        self.record.stats.as_ref()
    }

    /// The underlying record, named fields and residual map included.
    pub fn record(&self) -> &ItemRecord {
        &self.record
    }

    /// A field the record carried that has no named accessor.
    pub fn extra(&self, key: &str) -> Option<&Value> {
        self.record.extra.get(key)
    }
}

impl TryFrom<ItemRecord> for CollectionItem {
    type Error = DataError;

    fn try_from(record: ItemRecord) -> Result<Self, Self::Error> {
        Self::from_record(record)
    }
}

impl LogFormat for CollectionItem {
    fn format(&self, sink: &mut dyn Sink) {
        let status = self.status();
        sink.field(LABEL_WIDTH, "boardgame id", &self.id);
        sink.field(LABEL_WIDTH, "boardgame name", &Maybe(&self.record.name));
        sink.field(LABEL_WIDTH, "year published", &Maybe(&self.record.year_published));
        sink.field(LABEL_WIDTH, "number of plays", &self.num_plays());
        sink.field(LABEL_WIDTH, "last modified", &Maybe(&self.record.last_modified));
        sink.field(LABEL_WIDTH, "rating", &Maybe(&self.record.rating));
        sink.field(LABEL_WIDTH, "own", &status.own);
        sink.field(LABEL_WIDTH, "preordered", &status.preordered);
        sink.field(LABEL_WIDTH, "previously owned", &status.prev_owned);
        sink.field(LABEL_WIDTH, "want", &status.want);
        sink.field(LABEL_WIDTH, "want to buy", &status.want_to_buy);
        sink.field(LABEL_WIDTH, "want to play", &status.want_to_play);
        sink.field(LABEL_WIDTH, "wishlist", &status.wishlist);
        sink.field(LABEL_WIDTH, "wishlist priority", &Maybe(&self.record.wishlist_priority));
        sink.field(LABEL_WIDTH, "for trade", &status.for_trade);
        sink.field(LABEL_WIDTH, "comment", &Maybe(&self.record.comment));
        if let Some(stats) = self.stats() {
            sink.field(LABEL_WIDTH, "users rated", &Maybe(&stats.users_rated));
            sink.field(LABEL_WIDTH, "average rating", &Maybe(&stats.average));
            sink.field(LABEL_WIDTH, "rank", &Maybe(&stats.board_game_rank()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_without_id_is_rejected() {
        let err = CollectionItem::from_record(ItemRecord::default()).unwrap_err();
        assert!(matches!(err, DataError::InvalidData(_)));
    }

    #[test]
    fn last_modified_parses_api_timestamp() {
        let mut record = ItemRecord::with_id(13u64);
        record.last_modified = Some("2023-04-01 12:30:00".to_string());
        let item = CollectionItem::from_record(record).unwrap();
        let ts = item.last_modified().unwrap();
        assert_eq!(ts.to_string(), "2023-04-01 12:30:00");
    }

    #[test]
    fn malformed_last_modified_is_none() {
        let mut record = ItemRecord::with_id(13u64);
        record.last_modified = Some("yesterday".to_string());
        let item = CollectionItem::from_record(record).unwrap();
        assert_eq!(item.last_modified(), None);
    }

    #[test]
    fn extra_fields_are_reachable() {
        let mut record = ItemRecord::with_id(13u64);
        record
            .extra
            .insert("subtype".to_string(), Value::from("boardgame"));
        let item = CollectionItem::from_record(record).unwrap();
        assert_eq!(item.extra("subtype"), Some(&Value::from("boardgame")));
        assert_eq!(item.extra("missing"), None);
    }

    #[test]
    fn format_starts_with_id_and_name() {
        let item = CollectionItem::from_record(ItemRecord::with_id(13u64).name("CATAN")).unwrap();
        let mut lines = Vec::new();
        item.format(&mut lines);
        assert_eq!(lines[0], "boardgame id     : 13");
        assert_eq!(lines[1], "boardgame name   : CATAN");
    }
}
