use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::BggError;

pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_RETRIES: u32 = 5;
pub const DEFAULT_RETRY_DELAY_SECS: u64 = 5;

const ENV_API_TOKEN: &str = "BGG_API_TOKEN";
const ENV_TIMEOUT: &str = "BGG_TIMEOUT";
const ENV_RETRIES: &str = "BGG_RETRIES";
const ENV_RETRY_DELAY: &str = "BGG_RETRY_DELAY";

/// Settings for [`BggClient`](crate::BggClient).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Bearer token for the XML API, if the account has one.
    pub api_token: Option<String>,
    /// Per-request timeout.
    pub timeout: Duration,
    /// How many times a queued, throttled, or timed-out request is retried.
    pub retries: u32,
    /// Delay before the first retry; doubled for each further attempt.
    pub retry_delay: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_token: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            retries: DEFAULT_RETRIES,
            retry_delay: Duration::from_secs(DEFAULT_RETRY_DELAY_SECS),
        }
    }
}

/// Where a config field's value came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Loaded from an environment variable.
    EnvVar(&'static str),
    /// Loaded from the config file.
    ConfigFile,
    /// Built-in default.
    Default,
    /// Not set anywhere.
    Missing,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EnvVar(var) => write!(f, "env ${}", var),
            Self::ConfigFile => write!(f, "config file"),
            Self::Default => write!(f, "default"),
            Self::Missing => write!(f, "not set"),
        }
    }
}

/// Provenance of each config field.
#[derive(Debug)]
pub struct ConfigSources {
    pub api_token: ConfigSource,
    pub timeout: ConfigSource,
    pub retries: ConfigSource,
    pub retry_delay: ConfigSource,
}

/// TOML config file format.
#[derive(Debug, Default, serde::Deserialize, serde::Serialize)]
struct ConfigFile {
    bgg: Option<BggSection>,
}

#[derive(Debug, Default, Clone, serde::Deserialize, serde::Serialize)]
struct BggSection {
    api_token: Option<String>,
    timeout: Option<u64>,
    retries: Option<u32>,
    retry_delay: Option<u64>,
}

impl ClientConfig {
    /// Load settings from environment variables, the config file, and
    /// built-in defaults, in that order of priority.
    pub fn load() -> Result<Self, BggError> {
        let file = config_path().and_then(|p| load_config_file(&p));
        resolve(|var| std::env::var(var).ok(), file.as_ref())
    }

    /// Same as [`ClientConfig::load`] but reads the config file at `path`.
    pub fn load_from(path: &Path) -> Result<Self, BggError> {
        let file = load_config_file(path);
        resolve(|var| std::env::var(var).ok(), file.as_ref())
    }

    /// Settings from the config file at `path` and defaults only, ignoring
    /// the environment.
    pub fn from_file(path: &Path) -> Result<Self, BggError> {
        let file = load_config_file(path);
        resolve(|_| None, file.as_ref())
    }

    /// Apply explicit values (e.g., from CLI flags) on top of loaded ones.
    pub fn with_overrides(
        mut self,
        api_token: Option<String>,
        timeout_secs: Option<u64>,
        retries: Option<u32>,
    ) -> Self {
        if let Some(token) = api_token {
            self.api_token = Some(token);
        }
        if let Some(secs) = timeout_secs {
            self.timeout = Duration::from_secs(secs);
        }
        if let Some(n) = retries {
            self.retries = n;
        }
        self
    }
}

fn parse_env<T: std::str::FromStr>(var: &str, raw: Option<String>) -> Result<Option<T>, BggError> {
    match raw {
        Some(s) => s.trim().parse().map(Some).map_err(|_| {
            BggError::config(format!("{var} must be a non-negative integer, got '{s}'"))
        }),
        None => Ok(None),
    }
}

fn resolve(
    env: impl Fn(&str) -> Option<String>,
    file: Option<&BggSection>,
) -> Result<ClientConfig, BggError> {
    let defaults = ClientConfig::default();

    let api_token = env(ENV_API_TOKEN)
        .filter(|t| !t.is_empty())
        .or_else(|| file.and_then(|f| f.api_token.clone()));

    let timeout = parse_env::<u64>(ENV_TIMEOUT, env(ENV_TIMEOUT))?
        .or_else(|| file.and_then(|f| f.timeout))
        .map(Duration::from_secs)
        .unwrap_or(defaults.timeout);

    let retries = parse_env::<u32>(ENV_RETRIES, env(ENV_RETRIES))?
        .or_else(|| file.and_then(|f| f.retries))
        .unwrap_or(defaults.retries);

    let retry_delay = parse_env::<u64>(ENV_RETRY_DELAY, env(ENV_RETRY_DELAY))?
        .or_else(|| file.and_then(|f| f.retry_delay))
        .map(Duration::from_secs)
        .unwrap_or(defaults.retry_delay);

    Ok(ClientConfig {
        api_token,
        timeout,
        retries,
        retry_delay,
    })
}

/// Return the path to the config file.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("boardgamegeek").join("config.toml"))
}

/// Save settings to the default config file location.
///
/// Values equal to the built-in defaults are left out of the file.
/// Returns the path the file was written to.
pub fn save_to_file(config: &ClientConfig) -> Result<PathBuf, BggError> {
    let path = config_path()
        .ok_or_else(|| BggError::config("Could not determine config directory"))?;
    save_to(config, &path)?;
    Ok(path)
}

/// Save settings to `path`, creating parent directories as needed.
pub fn save_to(config: &ClientConfig, path: &Path) -> Result<(), BggError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let defaults = ClientConfig::default();
    let file = ConfigFile {
        bgg: Some(BggSection {
            api_token: config.api_token.clone(),
            timeout: (config.timeout != defaults.timeout).then(|| config.timeout.as_secs()),
            retries: (config.retries != defaults.retries).then_some(config.retries),
            retry_delay: (config.retry_delay != defaults.retry_delay)
                .then(|| config.retry_delay.as_secs()),
        }),
    };

    let toml_str = toml::to_string_pretty(&file)
        .map_err(|e| BggError::config(format!("Failed to serialize config: {}", e)))?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

/// Determine where each config field is coming from.
pub fn config_sources() -> ConfigSources {
    let file = config_path().and_then(|p| load_config_file(&p));
    sources(|var| std::env::var(var).ok(), file.as_ref())
}

fn sources(env: impl Fn(&str) -> Option<String>, file: Option<&BggSection>) -> ConfigSources {
    let pick = |var: &'static str, in_file: bool, fallback: ConfigSource| {
        // an empty token is ignored by `resolve`, so it is not a source either
        let env_set = env(var).is_some_and(|v| var != ENV_API_TOKEN || !v.is_empty());
        if env_set {
            ConfigSource::EnvVar(var)
        } else if in_file {
            ConfigSource::ConfigFile
        } else {
            fallback
        }
    };

    ConfigSources {
        api_token: pick(
            ENV_API_TOKEN,
            file.is_some_and(|f| f.api_token.is_some()),
            ConfigSource::Missing,
        ),
        timeout: pick(
            ENV_TIMEOUT,
            file.is_some_and(|f| f.timeout.is_some()),
            ConfigSource::Default,
        ),
        retries: pick(
            ENV_RETRIES,
            file.is_some_and(|f| f.retries.is_some()),
            ConfigSource::Default,
        ),
        retry_delay: pick(
            ENV_RETRY_DELAY,
            file.is_some_and(|f| f.retry_delay.is_some()),
            ConfigSource::Default,
        ),
    }
}

fn load_config_file(path: &Path) -> Option<BggSection> {
    let content = std::fs::read_to_string(path).ok()?;
    match toml::from_str::<ConfigFile>(&content) {
        Ok(config) => config.bgg,
        Err(e) => {
            log::warn!("Ignoring malformed config file {}: {e}", path.display());
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var| map.get(var).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = resolve(env_from(&[]), None).unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.retries, 5);
    }

    #[test]
    fn env_wins_over_file() {
        let file = BggSection {
            api_token: Some("from-file".to_string()),
            timeout: Some(30),
            retries: Some(2),
            retry_delay: None,
        };
        let config = resolve(
            env_from(&[("BGG_API_TOKEN", "from-env"), ("BGG_RETRIES", "7")]),
            Some(&file),
        )
        .unwrap();
        assert_eq!(config.api_token.as_deref(), Some("from-env"));
        assert_eq!(config.retries, 7);
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.retry_delay, Duration::from_secs(DEFAULT_RETRY_DELAY_SECS));
    }

    #[test]
    fn malformed_env_number_is_a_config_error() {
        let result = resolve(env_from(&[("BGG_TIMEOUT", "soon")]), None);
        assert!(matches!(result, Err(BggError::Config(_))));
    }

    #[test]
    fn overrides_apply_last() {
        let config = ClientConfig::default().with_overrides(None, Some(3), Some(0));
        assert_eq!(config.timeout, Duration::from_secs(3));
        assert_eq!(config.retries, 0);
        assert_eq!(config.api_token, None);
    }

    #[test]
    fn sources_report_provenance() {
        let file = BggSection {
            timeout: Some(30),
            ..Default::default()
        };
        let s = sources(env_from(&[("BGG_RETRIES", "3")]), Some(&file));
        assert_eq!(s.timeout, ConfigSource::ConfigFile);
        assert_eq!(s.retries, ConfigSource::EnvVar("BGG_RETRIES"));
        assert_eq!(s.retry_delay, ConfigSource::Default);
        assert_eq!(s.api_token, ConfigSource::Missing);
        assert_eq!(s.retries.to_string(), "env $BGG_RETRIES");
    }

    #[test]
    fn empty_env_token_falls_through_to_file() {
        let file = BggSection {
            api_token: Some("from-file".to_string()),
            ..Default::default()
        };
        let env = env_from(&[("BGG_API_TOKEN", "")]);
        let config = resolve(&env, Some(&file)).unwrap();
        assert_eq!(config.api_token.as_deref(), Some("from-file"));
        assert_eq!(sources(&env, Some(&file)).api_token, ConfigSource::ConfigFile);
        assert_eq!(sources(&env, None).api_token, ConfigSource::Missing);
    }
}
