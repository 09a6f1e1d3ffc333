//! Logger setup: plain messages on stdout, optionally mirrored to a file.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use log::LevelFilter;

use crate::error::CliError;

/// Crates whose debug output is ours; dependencies stay at `warn`.
const OWN_CRATES: &[&str] = &["boardgamegeek", "bgg_api", "bgg_core"];

/// Writes to stdout and, if set, to a file with ANSI escapes removed.
struct Tee {
    file: Option<File>,
}

impl Write for Tee {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        io::stdout().write_all(buf)?;
        if let Some(file) = &mut self.file {
            file.write_all(&strip_ansi_escapes::strip(buf))?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stdout().flush()?;
        if let Some(file) = &mut self.file {
            file.flush()?;
        }
        Ok(())
    }
}

pub(crate) fn level_for(debug: bool, quiet: bool) -> LevelFilter {
    if debug {
        LevelFilter::Debug
    } else if quiet {
        LevelFilter::Warn
    } else {
        LevelFilter::Info
    }
}

/// Open the `--logfile` target. On failure the logger still comes up on
/// stdout alone and the error is handed back for reporting.
fn open_logfile(logfile: Option<&Path>) -> (Option<File>, Result<(), CliError>) {
    match logfile.map(File::create).transpose() {
        Ok(file) => (file, Ok(())),
        Err(e) => (None, Err(CliError::Io(e))),
    }
}

/// Install the global logger. `RUST_LOG` still overrides module levels.
pub(crate) fn init(debug: bool, quiet: bool, logfile: Option<&Path>) -> Result<(), CliError> {
    let (file, opened) = open_logfile(logfile);
    let level = level_for(debug, quiet);

    let mut builder = env_logger::Builder::new();
    builder.filter_level(LevelFilter::Warn.min(level));
    for module in OWN_CRATES {
        builder.filter_module(module, level);
    }
    builder.parse_default_env();

    if debug {
        builder.format(|buf, record| {
            writeln!(
                buf,
                "{} {:<5} {}",
                chrono::Local::now().format("%H:%M:%S%.3f"),
                record.level(),
                record.args()
            )
        });
    } else {
        builder.format(|buf, record| writeln!(buf, "{}", record.args()));
    }

    builder
        .target(env_logger::Target::Pipe(Box::new(Tee { file })))
        .init();
    opened
}
