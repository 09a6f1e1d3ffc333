//! Spinner shown while a request (and its retries) is in flight.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

/// Start a spinner with `msg`. Hidden when `quiet` is set.
pub(crate) fn start(quiet: bool, msg: impl Into<String>) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("  {spinner:.cyan} {msg}")
            .expect("static pattern")
            .tick_chars("/-\\|"),
    );
    pb.set_message(msg.into());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Run `f` under a spinner, clearing it before returning.
pub(crate) fn with_spinner<T>(
    quiet: bool,
    msg: impl Into<String>,
    f: impl FnOnce(&ProgressBar) -> T,
) -> T {
    let pb = start(quiet, msg);
    let out = f(&pb);
    pb.finish_and_clear();
    out
}
