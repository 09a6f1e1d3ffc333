use serde::{Deserialize, Serialize};

use crate::id::GameId;
use crate::kind::ItemType;
use crate::sink::{LogFormat, Maybe, Sink};

const LABEL_WIDTH: usize = 10;

/// One hit from the `search` endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub id: GameId,
    pub name: String,
    /// `primary` or `alternate`.
    pub name_type: Option<String>,
    pub year_published: Option<i32>,
    pub item_type: Option<ItemType>,
}

impl LogFormat for SearchResult {
    fn format(&self, sink: &mut dyn Sink) {
        sink.field(LABEL_WIDTH, "id", &self.id);
        sink.field(LABEL_WIDTH, "name", &self.name);
        sink.field(LABEL_WIDTH, "name type", &Maybe(&self.name_type));
        sink.field(LABEL_WIDTH, "year", &Maybe(&self.year_published));
        sink.field(LABEL_WIDTH, "type", &Maybe(&self.item_type));
    }
}

/// One entry of a hot list. Person and company lists reuse the same shape,
/// so `id` is not necessarily a game id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HotItem {
    pub id: u64,
    pub rank: u32,
    pub name: String,
    pub year_published: Option<i32>,
    pub thumbnail: Option<String>,
}

impl LogFormat for HotItem {
    fn format(&self, sink: &mut dyn Sink) {
        sink.field(LABEL_WIDTH, "rank", &self.rank);
        sink.field(LABEL_WIDTH, "id", &self.id);
        sink.field(LABEL_WIDTH, "name", &self.name);
        sink.field(LABEL_WIDTH, "year", &Maybe(&self.year_published));
        sink.field(LABEL_WIDTH, "thumbnail", &Maybe(&self.thumbnail));
    }
}
