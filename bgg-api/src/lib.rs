//! Blocking client for the BoardGameGeek XML API v2.
//!
//! Responses are parsed into the types of [`bgg_core`]; collections go
//! through [`bgg_core::Collection::new`] so duplicates are dropped the same
//! way for every caller.

pub mod client;
pub mod config;
pub mod error;
pub mod filter;
pub mod lookup;
pub mod parse;
pub mod xml;

pub use client::{BggClient, Progress};
pub use config::{
    ClientConfig, ConfigSource, ConfigSources, config_path, config_sources, save_to,
    save_to_file,
};
pub use error::BggError;
pub use filter::CollectionFilter;
pub use lookup::GameChoice;
