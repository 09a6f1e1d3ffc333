//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{ArgGroup, Args, Parser, Subcommand};

use bgg_api::CollectionFilter;
use bgg_core::{GameId, HotListKind, ItemType};

#[derive(Parser)]
#[command(name = "boardgamegeek", version)]
#[command(about = "Query BoardGameGeek users, games, and collections", long_about = None)]
pub(crate) struct Cli {
    /// Enable debug logging (timestamps + debug-level messages)
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Only show warnings and errors (suppress normal output)
    #[arg(short, long, global = true, conflicts_with = "debug")]
    pub quiet: bool,

    /// Write log output to a file (ANSI codes stripped)
    #[arg(long, global = true)]
    pub logfile: Option<PathBuf>,

    /// Per-request timeout in seconds (overrides config)
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Retries for queued or throttled requests (overrides config)
    #[arg(long, global = true)]
    pub retries: Option<u32>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Look up users, games, collections, or run a free-text search
    Search {
        #[command(subcommand)]
        target: SearchTarget,
    },

    /// Show a BoardGameGeek hot list
    Hot {
        /// List to show (boardgame, rpg, videogame, boardgameperson, ...)
        #[arg(short, long, default_value_t = HotListKind::BoardGame)]
        kind: HotListKind,
    },

    /// Manage API settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub(crate) enum SearchTarget {
    /// Show a user's profile, buddies, and guilds
    User {
        /// BoardGameGeek user name
        #[arg(short, long)]
        name: String,
    },

    /// Show a game's details and rating statistics
    Game(GameArgs),

    /// Show one or more users' collections (several are merged)
    Collection(CollectionArgs),

    /// Free-text search over names
    Query {
        /// Text to search for
        text: String,

        /// Restrict to item types (e.g., boardgame,expansion)
        #[arg(short = 't', long = "type", value_delimiter = ',')]
        types: Vec<ItemType>,

        /// Only exact name matches
        #[arg(long)]
        exact: bool,
    },
}

#[derive(Args)]
#[command(group(ArgGroup::new("lookup").required(true).args(["id", "name"])))]
pub(crate) struct GameArgs {
    /// Game id
    #[arg(short, long)]
    pub id: Option<GameId>,

    /// Exact game name
    #[arg(short, long)]
    pub name: Option<String>,

    /// With --name: pick the most recently published match
    #[arg(long, conflicts_with = "most_popular")]
    pub recent: bool,

    /// With --name: pick the best ranked match (default)
    #[arg(long)]
    pub most_popular: bool,

    /// Include user comments
    #[arg(long)]
    pub comments: bool,

    /// Also print a one-line stats summary to stderr
    #[arg(long)]
    pub stats: bool,
}

#[derive(Args, Default)]
pub(crate) struct CollectionArgs {
    /// User whose collection to fetch (repeat to merge several)
    #[arg(short, long = "user", required = true)]
    pub users: Vec<String>,

    /// Only games the user owns
    #[arg(long)]
    pub own: bool,

    /// Only games marked for trade
    #[arg(long)]
    pub trade: bool,

    /// Only games the user wants in trade
    #[arg(long)]
    pub want: bool,

    /// Only wishlisted games
    #[arg(long)]
    pub wishlist: bool,

    /// Request abbreviated results
    #[arg(long)]
    pub brief: bool,

    /// Only games the user rated
    #[arg(long)]
    pub rated: bool,

    /// Only games the user has played
    #[arg(long)]
    pub played: bool,

    /// Only games the user commented on
    #[arg(long)]
    pub commented: bool,

    /// Only wishlist entries with this priority (1-5)
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=5))]
    pub wishlist_priority: Option<u8>,

    /// Only preordered games
    #[arg(long)]
    pub preordered: bool,

    /// Only games the user wants to play
    #[arg(long)]
    pub want_to_play: bool,

    /// Only games the user wants to buy
    #[arg(long)]
    pub want_to_buy: bool,

    /// Only previously owned games
    #[arg(long)]
    pub prev_owned: bool,
}

impl CollectionArgs {
    pub(crate) fn filter(&self) -> CollectionFilter {
        CollectionFilter {
            own: self.own,
            trade: self.trade,
            want: self.want,
            wishlist: self.wishlist,
            rated: self.rated,
            played: self.played,
            commented: self.commented,
            preordered: self.preordered,
            want_to_play: self.want_to_play,
            want_to_buy: self.want_to_buy,
            prev_owned: self.prev_owned,
            wishlist_priority: self.wishlist_priority,
            brief: self.brief,
            stats: true,
            ..Default::default()
        }
    }
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Show current settings and their sources
    Show,

    /// Save settings to the config file
    Set {
        /// API token for the XML API
        #[arg(long)]
        token: Option<String>,

        /// Per-request timeout in seconds
        #[arg(long)]
        request_timeout: Option<u64>,

        /// Retry count
        #[arg(long)]
        retry_count: Option<u32>,

        /// Delay before the first retry, in seconds
        #[arg(long)]
        retry_delay: Option<u64>,

        /// Remove the stored API token
        #[arg(long, conflicts_with = "token")]
        clear_token: bool,
    },

    /// Print the config file path
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("boardgamegeek").chain(args.iter().copied()))
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn game_needs_exactly_one_of_id_or_name() {
        assert!(parse(&["search", "game"]).is_err());
        assert!(parse(&["search", "game", "--id", "13", "--name", "Catan"]).is_err());
        assert!(parse(&["search", "game", "--id", "13"]).is_ok());
        assert!(parse(&["search", "game", "--name", "Catan", "--recent"]).is_ok());
    }

    #[test]
    fn recent_and_most_popular_conflict() {
        assert!(parse(&["search", "game", "--name", "Catan", "--recent", "--most-popular"]).is_err());
    }

    #[test]
    fn collection_accepts_several_users() {
        let cli = parse(&["search", "collection", "--user", "alice", "-u", "bob", "--own"]).unwrap();
        let Commands::Search {
            target: SearchTarget::Collection(args),
        } = cli.command
        else {
            panic!("expected collection command");
        };
        assert_eq!(args.users, vec!["alice", "bob"]);
        let filter = args.filter();
        assert!(filter.own);
        assert!(!filter.trade);
    }

    #[test]
    fn wishlist_priority_is_range_checked() {
        assert!(parse(&["search", "collection", "-u", "a", "--wishlist-priority", "0"]).is_err());
        assert!(parse(&["search", "collection", "-u", "a", "--wishlist-priority", "6"]).is_err());
        assert!(parse(&["search", "collection", "-u", "a", "--wishlist-priority", "3"]).is_ok());
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = parse(&["hot", "--kind", "rpg", "--debug", "--retries", "1"]).unwrap();
        assert!(cli.debug);
        assert_eq!(cli.retries, Some(1));
        assert!(matches!(
            cli.command,
            Commands::Hot {
                kind: HotListKind::Rpg
            }
        ));
    }

    #[test]
    fn config_set_does_not_clash_with_global_flags() {
        let cli = parse(&["config", "set", "--request-timeout", "30", "--timeout", "5"]).unwrap();
        assert_eq!(cli.timeout, Some(5));
        let Commands::Config {
            action: ConfigAction::Set { request_timeout, .. },
        } = cli.command
        else {
            panic!("expected config set");
        };
        assert_eq!(request_timeout, Some(30));
    }

    #[test]
    fn query_types_use_aliases() {
        let cli = parse(&["search", "query", "catan", "--type", "boardgame,expansion"]).unwrap();
        let Commands::Search {
            target: SearchTarget::Query { types, exact, .. },
        } = cli.command
        else {
            panic!("expected query command");
        };
        assert!(!exact);
        assert_eq!(types, vec![ItemType::BoardGame, ItemType::BoardGameExpansion]);
    }
}
