use bgg_api::{BggClient, GameChoice};
use bgg_core::{LogFormat, LogSink};

use crate::cli_types::GameArgs;
use crate::error::CliError;
use crate::spinner;

/// Show one game, looked up by id or by exact name.
pub(crate) fn run_game(client: &BggClient, args: &GameArgs, quiet: bool) -> Result<(), CliError> {
    let game = match (args.id, args.name.as_deref()) {
        (Some(id), None) => {
            if args.recent || args.most_popular {
                return Err(CliError::usage(
                    "--recent and --most-popular only apply to --name",
                ));
            }
            spinner::with_spinner(quiet, format!("Fetching game {id}..."), |_| {
                client.game_by_id(id, args.comments)
            })?
        }
        (None, Some(name)) => {
            let choice = choice_for(args.recent);
            spinner::with_spinner(quiet, format!("Looking up '{name}'..."), |_| {
                client.game_by_name(name, choice, args.comments)
            })?
        }
        _ => return Err(CliError::usage("give exactly one of --id or --name")),
    };

    super::heading(&game.name);
    game.format(&mut LogSink::default());

    if args.stats {
        match game.brief_stats() {
            Ok(line) => eprintln!("{line}"),
            Err(e) => log::debug!("skipping stats summary: {e}"),
        }
    }
    Ok(())
}

fn choice_for(recent: bool) -> GameChoice {
    if recent {
        GameChoice::Recent
    } else {
        GameChoice::BestRank
    }
}
