use bgg_api::BggClient;
use bgg_core::{Collection, LogFormat, LogSink};

use crate::cli_types::CollectionArgs;
use crate::error::CliError;
use crate::spinner;

/// Show the collections of one or more users, merged left to right.
pub(crate) fn run_collection(
    client: &BggClient,
    args: &CollectionArgs,
    quiet: bool,
) -> Result<(), CliError> {
    let filter = args.filter();

    let mut fetched = Vec::with_capacity(args.users.len());
    for user in &args.users {
        let collection =
            spinner::with_spinner(quiet, format!("Fetching collection of {user}..."), |_| {
                client.collection(user, &filter)
            })?;
        log::debug!("{collection}");
        fetched.push(collection);
    }

    let collection =
        merge(fetched).ok_or_else(|| CliError::usage("at least one --user is required"))?;

    super::heading(&collection.to_string());
    collection.format(&mut LogSink::default());
    Ok(())
}

/// Union of all collections in order; `None` when there are none.
fn merge(collections: Vec<Collection>) -> Option<Collection> {
    collections.into_iter().reduce(|acc, next| acc + next)
}
