use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

/// BoardGameGeek object identifier ("thing" id).
///
/// The XML API hands ids out as attribute strings while JSON fixtures and
/// hand-built records usually carry plain numbers, so both forms are accepted
/// when deserializing. Serialization always produces a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct GameId(pub u64);

impl GameId {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for GameId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for GameId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

impl<'de> Deserialize<'de> for GameId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(u64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(n) => Ok(Self(n)),
            Raw::Text(s) => s.parse().map_err(|e| {
                serde::de::Error::custom(format!("invalid game id '{s}': {e}"))
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_number_and_string() {
        let from_num: GameId = serde_json::from_str("13").unwrap();
        let from_str: GameId = serde_json::from_str("\" 13\"").unwrap();
        assert_eq!(from_num, GameId(13));
        assert_eq!(from_str, GameId(13));
    }

    #[test]
    fn rejects_non_numeric_string() {
        let result: Result<GameId, _> = serde_json::from_str("\"catan\"");
        assert!(result.is_err());
    }

    #[test]
    fn serializes_as_number() {
        assert_eq!(serde_json::to_string(&GameId(822)).unwrap(), "822");
    }
}
