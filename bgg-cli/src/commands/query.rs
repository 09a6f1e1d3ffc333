use bgg_api::BggClient;
use bgg_core::{ItemType, LogFormat, LogSink};

use crate::error::CliError;
use crate::spinner;

pub(crate) fn run_query(
    client: &BggClient,
    text: &str,
    types: &[ItemType],
    exact: bool,
    quiet: bool,
) -> Result<(), CliError> {
    let results = spinner::with_spinner(quiet, format!("Searching for '{text}'..."), |_| {
        client.search(text, types, exact)
    })?;

    if results.is_empty() {
        log::warn!("No results for '{text}'");
        return Ok(());
    }

    super::heading(&format!("{} results for '{text}'", results.len()));
    let mut sink = LogSink::default();
    for result in &results {
        result.format(&mut sink);
        log::info!("");
    }
    Ok(())
}
