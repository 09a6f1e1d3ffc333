//! boardgamegeek CLI
//!
//! Command-line interface for BoardGameGeek users, games, collections, and
//! hot lists.

mod cli_types;
mod commands;
mod error;
mod logging;
mod spinner;

use clap::Parser;
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use bgg_api::{BggClient, ClientConfig};

use cli_types::{Cli, Commands, ConfigAction, SearchTarget};
use commands::config::ConfigUpdate;
use error::CliError;

fn main() {
    let cli = Cli::parse();

    let result =
        logging::init(cli.debug, cli.quiet, cli.logfile.as_deref()).and_then(|()| run(cli));

    // logger output goes to stdout
    if let Err(e) = result {
        log::error!("{} {}", "\u{2718}".if_supports_color(Stdout, |t| t.red()), e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let Cli {
        debug,
        quiet,
        timeout,
        retries,
        command,
        ..
    } = cli;
    // Spinner redraws would interleave with debug lines.
    let hide_spinner = quiet || debug;

    match command {
        Commands::Search { target } => {
            let client = create_client(timeout, retries)?;
            match target {
                SearchTarget::User { name } => {
                    commands::user::run_user(&client, &name, hide_spinner)
                }
                SearchTarget::Game(args) => commands::game::run_game(&client, &args, hide_spinner),
                SearchTarget::Collection(args) => {
                    commands::collection::run_collection(&client, &args, hide_spinner)
                }
                SearchTarget::Query { text, types, exact } => {
                    commands::query::run_query(&client, &text, &types, exact, hide_spinner)
                }
            }
        }
        Commands::Hot { kind } => {
            let client = create_client(timeout, retries)?;
            commands::hot::run_hot(&client, kind, hide_spinner)
        }
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::run_config_show(),
            ConfigAction::Set {
                token,
                request_timeout,
                retry_count,
                retry_delay,
                clear_token,
            } => commands::config::run_config_set(ConfigUpdate {
                token,
                clear_token,
                timeout: request_timeout,
                retries: retry_count,
                retry_delay,
            }),
            ConfigAction::Path => commands::config::run_config_path(),
        },
    }
}

fn create_client(timeout: Option<u64>, retries: Option<u32>) -> Result<BggClient, CliError> {
    let config = ClientConfig::load()?.with_overrides(None, timeout, retries);
    log::debug!(
        "client: timeout {}s, {} retries, first retry after {}s, token {}",
        config.timeout.as_secs(),
        config.retries,
        config.retry_delay.as_secs(),
        if config.api_token.is_some() { "set" } else { "not set" },
    );
    Ok(BggClient::new(config)?)
}
