//! Data model for the BoardGameGeek client: collections, games, users, and
//! search results, plus the line-oriented rendering used by the CLI.

pub mod collection;
pub mod error;
pub mod game;
pub mod id;
pub mod item;
pub mod kind;
pub mod record;
pub mod search;
pub mod sink;
pub mod user;

pub use collection::Collection;
pub use error::DataError;
pub use game::{BoardGame, Comment, GameStats, Link, Rank};
pub use id::GameId;
pub use item::CollectionItem;
pub use kind::{HotListKind, ItemType, KindParseError};
pub use record::{CollectionData, ExtraFields, ItemRecord, ItemStatus};
pub use search::{HotItem, SearchResult};
pub use sink::{LogFormat, LogSink, Maybe, Sink};
pub use user::{Buddy, Guild, TopItem, User};
