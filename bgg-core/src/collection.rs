use std::collections::HashSet;
use std::fmt;
use std::ops::{Add, Index};

use serde_json::Value;

use crate::error::DataError;
use crate::id::GameId;
use crate::item::CollectionItem;
use crate::record::{CollectionData, ExtraFields, ItemRecord};
use crate::sink::{LogFormat, Sink};

const LABEL_WIDTH: usize = 9;

/// A user's collection: items in first-seen order, de-duplicated by game id.
///
/// BGG returns one entry per copy (each with its own collection id), so the
/// same game can appear several times in a response. Only the first entry
/// for a game id is kept.
///
/// Two collections combine with `+`. The union keeps both item sequences
/// back to back and merges only the id sets, so after combining overlapping
/// collections `len()` can exceed `distinct_ids()`.
#[derive(Debug, Clone, PartialEq)]
pub struct Collection {
    owner: String,
    items: Vec<CollectionItem>,
    game_ids: HashSet<GameId>,
    extra: ExtraFields,
}

impl Collection {
    /// Build a collection from a fetched response, adding items in order.
    ///
    /// Fails on the first item without an id; no collection is produced.
    pub fn new(data: CollectionData) -> Result<Self, DataError> {
        let CollectionData {
            owner,
            items,
            extra,
        } = data;

        let mut collection = Self {
            owner,
            items: Vec::with_capacity(items.len()),
            game_ids: HashSet::with_capacity(items.len()),
            extra,
        };
        for record in items {
            collection.add_game(record)?;
        }
        Ok(collection)
    }

    pub fn empty(owner: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            items: Vec::new(),
            game_ids: HashSet::new(),
            extra: ExtraFields::new(),
        }
    }

    /// Assemble a collection from already-validated parts. Used by union,
    /// which deliberately allows `items` to hold repeated ids.
    fn from_parts(
        owner: String,
        items: Vec<CollectionItem>,
        game_ids: HashSet<GameId>,
        extra: ExtraFields,
    ) -> Self {
        Self {
            owner,
            items,
            game_ids,
            extra,
        }
    }

    /// Add one raw entry. Returns `false` if its game id was already present,
    /// in which case the collection is unchanged.
    pub fn add_game(&mut self, record: ItemRecord) -> Result<bool, DataError> {
        let item = CollectionItem::from_record(record)?;
        if !self.game_ids.insert(item.id()) {
            log::trace!("skipping duplicate entry for game {}", item.id());
            return Ok(false);
        }
        self.items.push(item);
        Ok(true)
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn items(&self) -> &[CollectionItem] {
        &self.items
    }

    /// Number of items in the sequence.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of distinct game ids seen.
    pub fn distinct_ids(&self) -> usize {
        self.game_ids.len()
    }

    pub fn contains(&self, id: GameId) -> bool {
        self.game_ids.contains(&id)
    }

    pub fn game_ids(&self) -> impl Iterator<Item = GameId> + '_ {
        self.game_ids.iter().copied()
    }

    /// Iterate items in insertion order. Every call starts from the first item.
    pub fn iter(&self) -> std::slice::Iter<'_, CollectionItem> {
        self.items.iter()
    }

    pub fn get(&self, index: usize) -> Option<&CollectionItem> {
        self.items.get(index)
    }

    pub fn try_get(&self, index: usize) -> Result<&CollectionItem, DataError> {
        self.items.get(index).ok_or(DataError::IndexOutOfRange {
            index,
            len: self.items.len(),
        })
    }

    /// A collection-level field other than `owner` and `items`.
    pub fn extra(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }

    /// Combine with `other` into a new collection owned by `"<self>+<other>"`.
    ///
    /// Metadata comes from `self`. The id sets are merged; the item sequences
    /// are concatenated as-is, so a game present in both appears twice.
    pub fn union(&self, other: &Collection) -> Collection {
        let owner = format!("{}+{}", self.owner, other.owner);
        let game_ids = self.game_ids.union(&other.game_ids).copied().collect();
        let items = self.items.iter().chain(&other.items).cloned().collect();
        Self::from_parts(owner, items, game_ids, self.extra.clone())
    }
}

impl LogFormat for Collection {
    fn format(&self, sink: &mut dyn Sink) {
        sink.field(LABEL_WIDTH, "owner", &self.owner);
        sink.field(LABEL_WIDTH, "size", &format!("{} items", self.len()));
        sink.line("items");
        for item in self {
            item.format(sink);
            sink.blank();
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}'s collection, {} items", self.owner, self.len())
    }
}

impl Index<usize> for Collection {
    type Output = CollectionItem;

    /// Panics when `index >= len()`; use [`Collection::try_get`] to get an
    /// error instead.
    fn index(&self, index: usize) -> &Self::Output {
        &self.items[index]
    }
}

impl<'a> IntoIterator for &'a Collection {
    type Item = &'a CollectionItem;
    type IntoIter = std::slice::Iter<'a, CollectionItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl IntoIterator for Collection {
    type Item = CollectionItem;
    type IntoIter = std::vec::IntoIter<CollectionItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

/// Only collections can be added to a collection:
///
/// ```compile_fail
/// use bgg_core::Collection;
///
/// let alice = Collection::empty("alice");
/// let _ = &alice + 5;
/// ```
impl Add<&Collection> for &Collection {
    type Output = Collection;

    fn add(self, rhs: &Collection) -> Collection {
        self.union(rhs)
    }
}

/// ```compile_fail
/// use bgg_core::Collection;
///
/// let _ = Collection::empty("alice") + "bob";
/// ```
impl Add for Collection {
    type Output = Collection;

    fn add(mut self, rhs: Collection) -> Collection {
        self.owner = format!("{}+{}", self.owner, rhs.owner);
        self.game_ids.extend(rhs.game_ids);
        self.items.extend(rhs.items);
        self
    }
}

#[cfg(test)]
#[path = "tests/collection_tests.rs"]
mod tests;
