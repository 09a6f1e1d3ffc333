use bgg_api::BggClient;
use bgg_core::{HotListKind, LogFormat, LogSink};

use crate::error::CliError;
use crate::spinner;

pub(crate) fn run_hot(client: &BggClient, kind: HotListKind, quiet: bool) -> Result<(), CliError> {
    let items = spinner::with_spinner(quiet, format!("Fetching hot {kind} list..."), |_| {
        client.hot_items(kind)
    })?;

    super::heading(&format!("Hot {kind} list"));
    let mut sink = LogSink::default();
    for item in &items {
        item.format(&mut sink);
        log::info!("");
    }
    Ok(())
}
