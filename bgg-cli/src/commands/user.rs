use bgg_api::BggClient;
use bgg_core::{LogFormat, LogSink};

use crate::error::CliError;
use crate::spinner;

/// Show a user's profile with every buddy and guild page.
pub(crate) fn run_user(client: &BggClient, name: &str, quiet: bool) -> Result<(), CliError> {
    let user = spinner::with_spinner(quiet, format!("Fetching user {name}..."), |pb| {
        let progress = |fetched: usize, total: usize| {
            let pct = percent(fetched, total);
            pb.set_message(format!("Fetching user {name}: {pct}%"));
            log::debug!("fetching items: {pct}% complete");
        };
        client.user(name, Some(&progress))
    })?;

    super::heading(&format!("User {}", user.name));
    user.format(&mut LogSink::default());
    Ok(())
}

fn percent(fetched: usize, total: usize) -> usize {
    if total == 0 {
        100
    } else {
        (fetched * 100 / total).min(100)
    }
}
