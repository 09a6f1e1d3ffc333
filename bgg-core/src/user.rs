use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::id::GameId;
use crate::sink::{LogFormat, Maybe, Sink};

const LABEL_WIDTH: usize = 12;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Buddy {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guild {
    pub id: u64,
    pub name: String,
}

/// Entry of a user's "top 10" or "hot 10" list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopItem {
    pub rank: u32,
    pub id: GameId,
    pub name: String,
    pub item_type: String,
}

/// A BGG user profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub avatar_link: Option<String>,
    pub year_registered: Option<i32>,
    pub last_login: Option<NaiveDate>,
    pub state_or_province: Option<String>,
    pub country: Option<String>,
    pub web_address: Option<String>,
    pub xbox_account: Option<String>,
    pub wii_account: Option<String>,
    pub psn_account: Option<String>,
    pub battlenet_account: Option<String>,
    pub steam_account: Option<String>,
    pub trade_rating: Option<u32>,
    pub market_rating: Option<u32>,
    /// Buddy count as reported by the API; `buddies` may hold fewer while
    /// pages are still being fetched.
    pub total_buddies: usize,
    pub buddies: Vec<Buddy>,
    pub total_guilds: usize,
    pub guilds: Vec<Guild>,
    pub top: Vec<TopItem>,
    pub hot: Vec<TopItem>,
}

impl User {
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            ..Default::default()
        }
    }

    /// Append buddies from a further page, skipping ones already known.
    /// Returns how many were new.
    pub fn add_buddies(&mut self, page: Vec<Buddy>) -> usize {
        let before = self.buddies.len();
        for buddy in page {
            if !self.buddies.iter().any(|b| b.id == buddy.id) {
                self.buddies.push(buddy);
            }
        }
        self.buddies.len() - before
    }

    /// Same for guilds.
    pub fn add_guilds(&mut self, page: Vec<Guild>) -> usize {
        let before = self.guilds.len();
        for guild in page {
            if !self.guilds.iter().any(|g| g.id == guild.id) {
                self.guilds.push(guild);
            }
        }
        self.guilds.len() - before
    }

    pub fn has_all_buddies(&self) -> bool {
        self.buddies.len() >= self.total_buddies
    }

    pub fn has_all_guilds(&self) -> bool {
        self.guilds.len() >= self.total_guilds
    }
}

impl LogFormat for User {
    fn format(&self, sink: &mut dyn Sink) {
        sink.field(LABEL_WIDTH, "id", &self.id);
        sink.field(LABEL_WIDTH, "login name", &self.name);
        sink.field(LABEL_WIDTH, "first name", &Maybe(&self.first_name));
        sink.field(LABEL_WIDTH, "last name", &Maybe(&self.last_name));
        sink.field(LABEL_WIDTH, "state", &Maybe(&self.state_or_province));
        sink.field(LABEL_WIDTH, "country", &Maybe(&self.country));
        sink.field(LABEL_WIDTH, "home page", &Maybe(&self.web_address));
        sink.field(LABEL_WIDTH, "avatar", &Maybe(&self.avatar_link));
        sink.field(LABEL_WIDTH, "xbox acct", &Maybe(&self.xbox_account));
        sink.field(LABEL_WIDTH, "wii acct", &Maybe(&self.wii_account));
        sink.field(LABEL_WIDTH, "psn acct", &Maybe(&self.psn_account));
        sink.field(LABEL_WIDTH, "battlenet", &Maybe(&self.battlenet_account));
        sink.field(LABEL_WIDTH, "steam acct", &Maybe(&self.steam_account));
        sink.field(LABEL_WIDTH, "registered", &Maybe(&self.year_registered));
        sink.field(LABEL_WIDTH, "last login", &Maybe(&self.last_login));
        sink.field(LABEL_WIDTH, "trade rating", &Maybe(&self.trade_rating));

        sink.line(&format!("user has {} buddies", self.total_buddies));
        for b in &self.buddies {
            sink.line(&format!("  {} ({})", b.name, b.id));
        }
        sink.line(&format!("user is a member of {} guilds", self.total_guilds));
        for g in &self.guilds {
            sink.line(&format!("  {} ({})", g.name, g.id));
        }

        if !self.top.is_empty() {
            sink.line("top 10");
            for t in &self.top {
                sink.line(&format!("  {}. {} ({})", t.rank, t.name, t.id));
            }
        }
        if !self.hot.is_empty() {
            sink.line("hot 10");
            for t in &self.hot {
                sink.line(&format!("  {}. {} ({})", t.rank, t.name, t.id));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buddy(id: u64, name: &str) -> Buddy {
        Buddy {
            id,
            name: name.to_string(),
        }
    }

    #[test]
    fn add_buddies_skips_known_ids() {
        let mut user = User::new(1, "alice");
        user.total_buddies = 3;
        assert_eq!(user.add_buddies(vec![buddy(2, "bob"), buddy(3, "carol")]), 2);
        assert!(!user.has_all_buddies());
        assert_eq!(user.add_buddies(vec![buddy(3, "carol"), buddy(4, "dave")]), 1);
        assert!(user.has_all_buddies());
        assert_eq!(user.buddies.len(), 3);
    }

    #[test]
    fn format_lists_buddies() {
        let mut user = User::new(1, "alice");
        user.total_buddies = 1;
        user.add_buddies(vec![buddy(2, "bob")]);

        let mut lines = Vec::new();
        user.format(&mut lines);
        assert_eq!(lines[1], "login name  : alice");
        assert!(lines.contains(&"user has 1 buddies".to_string()));
        assert!(lines.contains(&"  bob (2)".to_string()));
    }
}
