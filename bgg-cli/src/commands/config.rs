use std::path::Path;
use std::time::Duration;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use bgg_api::{ClientConfig, ConfigSource};

use crate::error::CliError;

fn mask_value(s: &str) -> String {
    match s.char_indices().nth(4) {
        Some((cut, _)) => format!("{}****", &s[..cut]),
        None => "****".to_string(),
    }
}

/// Show resolved settings and where each one came from.
pub(crate) fn run_config_show() -> Result<(), CliError> {
    let path = bgg_api::config_path();
    let sources = bgg_api::config_sources();
    let config = ClientConfig::load()?;

    super::heading("BoardGameGeek Configuration");

    match &path {
        Some(p) if p.exists() => {
            log::info!(
                "  Config file: {} {}",
                p.display().if_supports_color(Stdout, |t| t.cyan()),
                "(exists)".if_supports_color(Stdout, |t| t.green()),
            );
        }
        Some(p) => {
            log::info!(
                "  Config file: {} {}",
                p.display().if_supports_color(Stdout, |t| t.cyan()),
                "(not found)".if_supports_color(Stdout, |t| t.dimmed()),
            );
        }
        None => {
            log::info!(
                "  Config file: {}",
                "could not determine path".if_supports_color(Stdout, |t| t.red()),
            );
        }
    }
    log::info!("");

    let fields: [(&str, &ConfigSource, Option<String>); 4] = [
        (
            "api_token",
            &sources.api_token,
            config.api_token.as_deref().map(mask_value),
        ),
        (
            "timeout",
            &sources.timeout,
            Some(format!("{}s", config.timeout.as_secs())),
        ),
        ("retries", &sources.retries, Some(config.retries.to_string())),
        (
            "retry_delay",
            &sources.retry_delay,
            Some(format!("{}s", config.retry_delay.as_secs())),
        ),
    ];

    for (name, source, value) in fields {
        let source_str = format!("({})", source);
        let label = format!("{}:", name);
        match value {
            Some(v) => log::info!(
                "  {} {} {}",
                label.if_supports_color(Stdout, |t| t.cyan()),
                v,
                source_str.if_supports_color(Stdout, |t| t.dimmed()),
            ),
            None => log::info!(
                "  {} {} {}",
                label.if_supports_color(Stdout, |t| t.cyan()),
                "not set".if_supports_color(Stdout, |t| t.yellow()),
                source_str.if_supports_color(Stdout, |t| t.dimmed()),
            ),
        }
    }
    Ok(())
}

/// Values given to `config set`.
#[derive(Debug, Default)]
pub(crate) struct ConfigUpdate {
    pub token: Option<String>,
    pub clear_token: bool,
    pub timeout: Option<u64>,
    pub retries: Option<u32>,
    pub retry_delay: Option<u64>,
}

impl ConfigUpdate {
    fn is_empty(&self) -> bool {
        self.token.is_none()
            && !self.clear_token
            && self.timeout.is_none()
            && self.retries.is_none()
            && self.retry_delay.is_none()
    }

    fn apply(self, mut config: ClientConfig) -> ClientConfig {
        if self.clear_token {
            config.api_token = None;
        }
        if let Some(token) = self.token {
            config.api_token = Some(token);
        }
        if let Some(secs) = self.timeout {
            config.timeout = Duration::from_secs(secs);
        }
        if let Some(n) = self.retries {
            config.retries = n;
        }
        if let Some(secs) = self.retry_delay {
            config.retry_delay = Duration::from_secs(secs);
        }
        config
    }
}

/// Merge `update` into the stored settings and write them back.
pub(crate) fn run_config_set(update: ConfigUpdate) -> Result<(), CliError> {
    let path = bgg_api::config_path()
        .ok_or_else(|| CliError::config("Could not determine config directory"))?;
    let saved = set_in(&path, update)?;
    log::info!(
        "{} Settings saved to {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        saved.display().if_supports_color(Stdout, |t| t.cyan()),
    );
    Ok(())
}

fn set_in<'a>(path: &'a Path, update: ConfigUpdate) -> Result<&'a Path, CliError> {
    if update.is_empty() {
        return Err(CliError::usage("nothing to set; see 'boardgamegeek config set --help'"));
    }
    let current = ClientConfig::from_file(path)?;
    let updated = update.apply(current);
    bgg_api::save_to(&updated, path)?;
    Ok(path)
}

/// Print the config file path.
pub(crate) fn run_config_path() -> Result<(), CliError> {
    match bgg_api::config_path() {
        Some(path) => {
            log::info!("{}", path.display());
            Ok(())
        }
        None => Err(CliError::config("Could not determine config directory")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mask_keeps_short_prefix() {
        assert_eq!(mask_value("abcdef123456"), "abcd****");
        assert_eq!(mask_value("abc"), "****");
        assert_eq!(mask_value("äöüßxyz"), "äöüß****");
    }

    #[test]
    fn update_overrides_and_clears() {
        let base = ClientConfig {
            api_token: Some("old".to_string()),
            ..Default::default()
        };
        let updated = ConfigUpdate {
            clear_token: true,
            retries: Some(2),
            ..Default::default()
        }
        .apply(base);
        assert_eq!(updated.api_token, None);
        assert_eq!(updated.retries, 2);
        assert_eq!(updated.timeout, ClientConfig::default().timeout);
    }

    #[test]
    fn empty_update_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        assert!(matches!(
            set_in(&path, ConfigUpdate::default()),
            Err(CliError::Usage(_))
        ));
        assert!(!path.exists());
    }

    #[test]
    fn set_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bgg").join("config.toml");
        set_in(
            &path,
            ConfigUpdate {
                retry_delay: Some(9),
                ..Default::default()
            },
        )
        .unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("retry_delay = 9"));
    }
}
