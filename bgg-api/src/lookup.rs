use std::collections::HashSet;

use bgg_core::{BoardGame, GameId, ItemType, SearchResult};

use crate::client::BggClient;
use crate::error::BggError;

/// How to pick one game when a name matches several.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GameChoice {
    /// First match in the order BGG returns them.
    First,
    /// Most recently published match.
    Recent,
    /// Match with the best (lowest) board game rank. Unranked games lose to
    /// ranked ones.
    #[default]
    BestRank,
}

impl std::fmt::Display for GameChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameChoice::First => write!(f, "first"),
            GameChoice::Recent => write!(f, "recent"),
            GameChoice::BestRank => write!(f, "best-rank"),
        }
    }
}

impl std::str::FromStr for GameChoice {
    type Err = BggError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "first" => Ok(GameChoice::First),
            "recent" | "most-recent" => Ok(GameChoice::Recent),
            "best-rank" | "best" | "most-popular" => Ok(GameChoice::BestRank),
            other => Err(BggError::config(format!("unknown game choice: '{other}'"))),
        }
    }
}

impl BggClient {
    /// Look a game up by exact name and fetch it with rating statistics.
    ///
    /// Only board games and expansions are searched. When several games
    /// share the name, `choice` decides which one is returned.
    pub fn game_by_name(
        &self,
        name: &str,
        choice: GameChoice,
        comments: bool,
    ) -> Result<BoardGame, BggError> {
        let results = self.search(
            name,
            &[ItemType::BoardGame, ItemType::BoardGameExpansion],
            true,
        )?;
        let ids = unique_ids(&results);
        let Some(&first) = ids.first() else {
            return Err(BggError::not_found(format!("no game named '{name}'")));
        };
        log::debug!("'{name}' matched {} game(s), choosing {choice}", ids.len());

        let id = match choice {
            GameChoice::First => first,
            GameChoice::Recent => most_recent(&results).map_or(first, |r| r.id),
            GameChoice::BestRank if ids.len() == 1 => first,
            GameChoice::BestRank => {
                let candidates = self.games(&ids, false)?;
                match best_ranked(candidates) {
                    Some(game) if !comments => return Ok(game),
                    Some(game) => game.id,
                    None => first,
                }
            }
        };

        self.game_by_id(id, comments)
    }
}

/// Search ids in result order, each once. BGG lists a game again for every
/// alternate name that matched.
fn unique_ids(results: &[SearchResult]) -> Vec<GameId> {
    let mut seen = HashSet::new();
    results
        .iter()
        .map(|r| r.id)
        .filter(|id| seen.insert(*id))
        .collect()
}

/// Newest result by publication year; the earliest listed wins ties.
fn most_recent(results: &[SearchResult]) -> Option<&SearchResult> {
    results.iter().reduce(|best, r| {
        if r.year_published > best.year_published {
            r
        } else {
            best
        }
    })
}

fn best_ranked(games: Vec<BoardGame>) -> Option<BoardGame> {
    let key = |g: &BoardGame| g.board_game_rank().unwrap_or(u32::MAX);
    games
        .into_iter()
        .reduce(|best, g| if key(&g) < key(&best) { g } else { best })
}

#[cfg(test)]
mod tests {
    use super::*;
    use bgg_core::{GameStats, Rank};

    fn hit(id: u64, year: Option<i32>) -> SearchResult {
        SearchResult {
            id: GameId(id),
            name: "Chess".to_string(),
            name_type: Some("primary".to_string()),
            year_published: year,
            item_type: Some(ItemType::BoardGame),
        }
    }

    fn ranked(id: u64, rank: Option<u32>) -> BoardGame {
        let mut game = BoardGame::new(GameId(id), "Chess");
        game.stats = Some(GameStats {
            ranks: vec![Rank {
                kind: "subtype".to_string(),
                id: Some(1),
                name: "boardgame".to_string(),
                friendly_name: "Board Game Rank".to_string(),
                value: rank,
                ..Default::default()
            }],
            ..Default::default()
        });
        game
    }

    #[test]
    fn choice_parses_aliases() {
        assert_eq!("recent".parse::<GameChoice>().unwrap(), GameChoice::Recent);
        assert_eq!(
            "Most-Popular".parse::<GameChoice>().unwrap(),
            GameChoice::BestRank
        );
        assert_eq!("first".parse::<GameChoice>().unwrap(), GameChoice::First);
        assert!("newest".parse::<GameChoice>().is_err());
        assert_eq!(GameChoice::default().to_string(), "best-rank");
    }

    #[test]
    fn unique_ids_keeps_first_position() {
        let results = vec![hit(3, None), hit(1, None), hit(3, None), hit(2, None)];
        assert_eq!(unique_ids(&results), vec![GameId(3), GameId(1), GameId(2)]);
    }

    #[test]
    fn most_recent_prefers_known_years_and_first_on_tie() {
        let results = vec![
            hit(1, Some(1990)),
            hit(2, None),
            hit(3, Some(2004)),
            hit(4, Some(2004)),
        ];
        assert_eq!(most_recent(&results).unwrap().id, GameId(3));
        assert!(most_recent(&[]).is_none());
    }

    #[test]
    fn best_ranked_skips_unranked() {
        let games = vec![
            ranked(1, None),
            ranked(2, Some(812)),
            ranked(3, Some(45)),
            ranked(4, Some(45)),
        ];
        assert_eq!(best_ranked(games).unwrap().id, GameId(3));
    }

    #[test]
    fn best_ranked_falls_back_to_first_when_nothing_ranked() {
        let games = vec![ranked(7, None), ranked(8, None)];
        assert_eq!(best_ranked(games).unwrap().id, GameId(7));
        assert!(best_ranked(Vec::new()).is_none());
    }
}
