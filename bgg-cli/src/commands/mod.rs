pub(crate) mod collection;
pub(crate) mod config;
pub(crate) mod game;
pub(crate) mod hot;
pub(crate) mod query;
pub(crate) mod user;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

/// Bold section title followed by a blank line.
pub(crate) fn heading(title: &str) {
    log::info!("{}", title.if_supports_color(Stdout, |t| t.bold()));
    log::info!("");
}
