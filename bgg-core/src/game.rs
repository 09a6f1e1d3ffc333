use serde::{Deserialize, Serialize};

use crate::error::DataError;
use crate::id::GameId;
use crate::kind::ItemType;
use crate::sink::{LogFormat, Maybe, Sink};

const LABEL_WIDTH: usize = 18;

/// One entry of a `ranks` block: either the overall board game rank
/// (`kind == "subtype"`) or a family rank such as "strategygames".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rank {
    pub kind: String,
    pub id: Option<u32>,
    pub name: String,
    pub friendly_name: String,
    /// `None` when the API reports "Not Ranked".
    pub value: Option<u32>,
    pub bayes_average: Option<f64>,
}

/// Community rating statistics (`stats=1`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameStats {
    pub users_rated: Option<u32>,
    pub average: Option<f64>,
    pub bayes_average: Option<f64>,
    pub stddev: Option<f64>,
    pub median: Option<f64>,
    pub owned: Option<u32>,
    pub trading: Option<u32>,
    pub wanting: Option<u32>,
    pub wishing: Option<u32>,
    pub num_comments: Option<u32>,
    pub num_weights: Option<u32>,
    pub average_weight: Option<f64>,
    pub ranks: Vec<Rank>,
}

impl GameStats {
    /// Overall rank among all board games, if ranked.
    pub fn board_game_rank(&self) -> Option<u32> {
        self.ranks
            .iter()
            .find(|r| r.kind == "subtype" && r.name == "boardgame")
            .and_then(|r| r.value)
    }
}

/// A linked object (designer, publisher, expansion, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub username: String,
    pub rating: Option<f64>,
    pub text: String,
}

/// Full game details from the `thing` endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardGame {
    pub id: GameId,
    pub item_type: Option<ItemType>,
    pub name: String,
    pub alternative_names: Vec<String>,
    pub year_published: Option<i32>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub thumbnail: Option<String>,
    pub min_players: Option<u32>,
    pub max_players: Option<u32>,
    pub playing_time: Option<u32>,
    pub min_playing_time: Option<u32>,
    pub max_playing_time: Option<u32>,
    pub min_age: Option<u32>,
    pub categories: Vec<String>,
    pub mechanics: Vec<String>,
    pub designers: Vec<String>,
    pub artists: Vec<String>,
    pub publishers: Vec<String>,
    pub families: Vec<String>,
    pub expansions: Vec<Link>,
    pub expands: Vec<Link>,
    pub comments: Vec<Comment>,
    pub stats: Option<GameStats>,
}

impl BoardGame {
    pub fn new(id: GameId, name: impl Into<String>) -> Self {
        Self {
            id,
            item_type: None,
            name: name.into(),
            alternative_names: Vec::new(),
            year_published: None,
            description: None,
            image: None,
            thumbnail: None,
            min_players: None,
            max_players: None,
            playing_time: None,
            min_playing_time: None,
            max_playing_time: None,
            min_age: None,
            categories: Vec::new(),
            mechanics: Vec::new(),
            designers: Vec::new(),
            artists: Vec::new(),
            publishers: Vec::new(),
            families: Vec::new(),
            expansions: Vec::new(),
            expands: Vec::new(),
            comments: Vec::new(),
            stats: None,
        }
    }

    pub fn board_game_rank(&self) -> Option<u32> {
        self.stats.as_ref().and_then(GameStats::board_game_rank)
    }

    pub fn is_expansion(&self) -> bool {
        self.item_type == Some(ItemType::BoardGameExpansion)
    }

    /// One-line CSV-style summary: name, year, players, playing time,
    /// average rating, weight, number of ratings, categories, mechanics.
    ///
    /// Fails when the game was fetched without rating statistics.
    pub fn brief_stats(&self) -> Result<String, DataError> {
        let stats = self.stats.as_ref().ok_or_else(|| {
            DataError::invalid_data(format!("no rating statistics for game {}", self.id))
        })?;

        Ok(format!(
            "\"{}\",{},{}-{},{},{},{},{},\"{}\",\"{}\"",
            self.name,
            Maybe(&self.year_published),
            Maybe(&self.min_players),
            Maybe(&self.max_players),
            Maybe(&self.playing_time),
            Maybe(&stats.average),
            Maybe(&stats.average_weight),
            Maybe(&stats.users_rated),
            self.categories.join(" / ").to_lowercase(),
            self.mechanics.join(" / ").to_lowercase(),
        ))
    }
}

fn list_field(sink: &mut dyn Sink, label: &str, values: &[String]) {
    if values.is_empty() {
        return;
    }
    sink.line(label);
    for v in values {
        sink.line(&format!("  - {v}"));
    }
}

impl LogFormat for BoardGame {
    fn format(&self, sink: &mut dyn Sink) {
        sink.field(LABEL_WIDTH, "id", &self.id);
        sink.field(LABEL_WIDTH, "name", &self.name);
        sink.field(LABEL_WIDTH, "rank", &Maybe(&self.board_game_rank()));
        if let Some(t) = self.item_type {
            sink.field(LABEL_WIDTH, "type", &t.display_name());
        }
        list_field(sink, "alternative names", &self.alternative_names);
        sink.field(LABEL_WIDTH, "year published", &Maybe(&self.year_published));
        sink.field(
            LABEL_WIDTH,
            "players",
            &format!("{}-{}", Maybe(&self.min_players), Maybe(&self.max_players)),
        );
        sink.field(LABEL_WIDTH, "playing time", &Maybe(&self.playing_time));
        sink.field(LABEL_WIDTH, "minimum age", &Maybe(&self.min_age));
        sink.field(LABEL_WIDTH, "thumbnail", &Maybe(&self.thumbnail));
        sink.field(LABEL_WIDTH, "image", &Maybe(&self.image));

        list_field(sink, "categories", &self.categories);
        list_field(sink, "mechanics", &self.mechanics);
        list_field(sink, "designers", &self.designers);
        list_field(sink, "artists", &self.artists);
        list_field(sink, "publishers", &self.publishers);
        list_field(sink, "families", &self.families);

        if !self.expansions.is_empty() {
            sink.line("expansions");
            for e in &self.expansions {
                sink.line(&format!("  - {} ({})", e.name, e.id));
            }
        }
        if !self.expands.is_empty() {
            sink.line("expands");
            for e in &self.expands {
                sink.line(&format!("  - {} ({})", e.name, e.id));
            }
        }

        if let Some(stats) = &self.stats {
            sink.field(LABEL_WIDTH, "users rated", &Maybe(&stats.users_rated));
            sink.field(LABEL_WIDTH, "average rating", &Maybe(&stats.average));
            sink.field(LABEL_WIDTH, "bayes average", &Maybe(&stats.bayes_average));
            sink.field(LABEL_WIDTH, "standard deviation", &Maybe(&stats.stddev));
            sink.field(LABEL_WIDTH, "median", &Maybe(&stats.median));
            sink.field(LABEL_WIDTH, "owned", &Maybe(&stats.owned));
            sink.field(LABEL_WIDTH, "trading", &Maybe(&stats.trading));
            sink.field(LABEL_WIDTH, "wanting", &Maybe(&stats.wanting));
            sink.field(LABEL_WIDTH, "wishing", &Maybe(&stats.wishing));
            sink.field(LABEL_WIDTH, "comments", &Maybe(&stats.num_comments));
            sink.field(LABEL_WIDTH, "weights", &Maybe(&stats.num_weights));
            sink.field(LABEL_WIDTH, "average weight", &Maybe(&stats.average_weight));
            if !stats.ranks.is_empty() {
                sink.line("ranks");
                for r in &stats.ranks {
                    let value = r
                        .value
                        .map(|v| v.to_string())
                        .unwrap_or_else(|| "Not Ranked".to_string());
                    sink.line(&format!("  - {}: {}", r.friendly_name, value));
                }
            }
        }

        if let Some(desc) = &self.description {
            sink.line("description");
            for l in desc.lines() {
                sink.line(&format!("  {l}"));
            }
        }

        if !self.comments.is_empty() {
            sink.line("comments");
            for c in &self.comments {
                sink.line(&format!(
                    "  {} ({}): {}",
                    c.username,
                    Maybe(&c.rating),
                    c.text
                ));
            }
        }
    }
}
