use serde::{Deserialize, Serialize};

/// Object types the `search` and `thing` endpoints understand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    BoardGame,
    BoardGameExpansion,
    BoardGameAccessory,
    RpgItem,
    VideoGame,
}

const ALL_ITEM_TYPES: &[ItemType] = &[
    ItemType::BoardGame,
    ItemType::BoardGameExpansion,
    ItemType::BoardGameAccessory,
    ItemType::RpgItem,
    ItemType::VideoGame,
];

impl ItemType {
    /// Value used in API query strings and `type` attributes.
    pub fn api_name(&self) -> &'static str {
        match self {
            Self::BoardGame => "boardgame",
            Self::BoardGameExpansion => "boardgameexpansion",
            Self::BoardGameAccessory => "boardgameaccessory",
            Self::RpgItem => "rpgitem",
            Self::VideoGame => "videogame",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::BoardGame => "Board Game",
            Self::BoardGameExpansion => "Board Game Expansion",
            Self::BoardGameAccessory => "Board Game Accessory",
            Self::RpgItem => "RPG Item",
            Self::VideoGame => "Video Game",
        }
    }

    /// All accepted names (case-insensitive). The API name comes first.
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            Self::BoardGame => &["boardgame", "game", "bg"],
            Self::BoardGameExpansion => &["boardgameexpansion", "expansion", "exp"],
            Self::BoardGameAccessory => &["boardgameaccessory", "accessory"],
            Self::RpgItem => &["rpgitem", "rpg"],
            Self::VideoGame => &["videogame", "video"],
        }
    }

    pub fn all() -> &'static [ItemType] {
        ALL_ITEM_TYPES
    }
}

impl std::fmt::Display for ItemType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.api_name())
    }
}

impl std::str::FromStr for ItemType {
    type Err = KindParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        ALL_ITEM_TYPES
            .iter()
            .copied()
            .find(|t| t.aliases().contains(&lower.as_str()))
            .ok_or_else(|| KindParseError::new("item type", s))
    }
}

/// Lists served by the `hot` endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HotListKind {
    #[default]
    BoardGame,
    Rpg,
    VideoGame,
    BoardGamePerson,
    RpgPerson,
    BoardGameCompany,
    RpgCompany,
    VideoGameCompany,
}

const ALL_HOT_KINDS: &[HotListKind] = &[
    HotListKind::BoardGame,
    HotListKind::Rpg,
    HotListKind::VideoGame,
    HotListKind::BoardGamePerson,
    HotListKind::RpgPerson,
    HotListKind::BoardGameCompany,
    HotListKind::RpgCompany,
    HotListKind::VideoGameCompany,
];

impl HotListKind {
    pub fn api_name(&self) -> &'static str {
        match self {
            Self::BoardGame => "boardgame",
            Self::Rpg => "rpg",
            Self::VideoGame => "videogame",
            Self::BoardGamePerson => "boardgameperson",
            Self::RpgPerson => "rpgperson",
            Self::BoardGameCompany => "boardgamecompany",
            Self::RpgCompany => "rpgcompany",
            Self::VideoGameCompany => "videogamecompany",
        }
    }

    pub fn all() -> &'static [HotListKind] {
        ALL_HOT_KINDS
    }
}

impl std::fmt::Display for HotListKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.api_name())
    }
}

impl std::str::FromStr for HotListKind {
    type Err = KindParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        ALL_HOT_KINDS
            .iter()
            .copied()
            .find(|k| k.api_name() == lower)
            .ok_or_else(|| KindParseError::new("hot list", s))
    }
}

/// Error returned when a string names no known item type or hot list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KindParseError {
    what: &'static str,
    input: String,
}

impl KindParseError {
    fn new(what: &'static str, input: &str) -> Self {
        Self {
            what,
            input: input.to_string(),
        }
    }
}

impl std::fmt::Display for KindParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown {}: '{}'", self.what, self.input)
    }
}

impl std::error::Error for KindParseError {}

#[cfg(test)]
#[path = "tests/kind_tests.rs"]
mod tests;
