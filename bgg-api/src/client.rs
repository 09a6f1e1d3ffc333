use std::time::Duration;

use reqwest::StatusCode;

use bgg_core::{BoardGame, Collection, GameId, HotItem, HotListKind, ItemType, SearchResult, User};

use crate::config::ClientConfig;
use crate::error::BggError;
use crate::filter::CollectionFilter;
use crate::parse;
use crate::xml::{self, Element};

const BASE_URL: &str = "https://boardgamegeek.com/xmlapi2";
const USER_AGENT: &str = concat!("boardgamegeek/", env!("CARGO_PKG_VERSION"));
const MAX_RETRY_DELAY: Duration = Duration::from_secs(60);
/// The `thing` endpoint rejects requests for more ids than this.
const THING_BATCH_SIZE: usize = 20;

/// Progress callback: `(items fetched so far, total items)`.
pub type Progress<'a> = &'a dyn Fn(usize, usize);

enum Attempt {
    Done(Element),
    Retry(String),
}

/// Blocking client for the BoardGameGeek XML API v2.
///
/// Requests that BGG queues (HTTP 202), throttles (429), or fails with a
/// server error are retried up to `retries` times with exponential backoff,
/// as are transport timeouts. A refused or unresolvable connection fails at
/// once.
pub struct BggClient {
    http: reqwest::blocking::Client,
    config: ClientConfig,
    base_url: String,
}

impl BggClient {
    pub fn new(config: ClientConfig) -> Result<Self, BggError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            http,
            config,
            base_url: BASE_URL.to_string(),
        })
    }

    /// Point the client at a different API root (mirrors, test servers).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch a user profile including all buddy and guild pages.
    pub fn user(&self, name: &str, progress: Option<Progress<'_>>) -> Result<User, BggError> {
        let mut params = user_params(name);
        let root = self.get("user", &params)?;
        let mut user = parse::parse_user(&root)?;
        report_user_progress(&user, progress);

        params.push(("page", String::new()));
        let mut page = 1u32;
        while !(user.has_all_buddies() && user.has_all_guilds()) {
            page += 1;
            if let Some(last) = params.last_mut() {
                last.1 = page.to_string();
            }
            let root = self.get("user", &params)?;
            let (buddies, guilds) = parse::parse_user_page(&root);
            let added = user.add_buddies(buddies) + user.add_guilds(guilds);
            if added == 0 {
                log::debug!("user '{name}': page {page} had nothing new, stopping");
                break;
            }
            report_user_progress(&user, progress);
        }

        Ok(user)
    }

    /// Fetch one game with rating statistics.
    pub fn game_by_id(&self, id: GameId, comments: bool) -> Result<BoardGame, BggError> {
        self.games(&[id], comments)?
            .into_iter()
            .next()
            .ok_or_else(|| BggError::not_found(format!("game {id}")))
    }

    /// Fetch several games with rating statistics, in batches.
    pub fn games(&self, ids: &[GameId], comments: bool) -> Result<Vec<BoardGame>, BggError> {
        let mut games = Vec::with_capacity(ids.len());
        for batch in ids.chunks(THING_BATCH_SIZE) {
            let joined = batch
                .iter()
                .map(GameId::to_string)
                .collect::<Vec<_>>()
                .join(",");
            let mut params = vec![("id", joined), ("stats", "1".to_string())];
            if comments {
                params.push(("comments", "1".to_string()));
            }
            let root = self.get("thing", &params)?;
            games.extend(parse::parse_games(&root)?);
        }
        Ok(games)
    }

    pub fn search(
        &self,
        query: &str,
        types: &[ItemType],
        exact: bool,
    ) -> Result<Vec<SearchResult>, BggError> {
        let mut params = vec![("query", query.to_string())];
        if !types.is_empty() {
            let joined = types
                .iter()
                .map(|t| t.api_name())
                .collect::<Vec<_>>()
                .join(",");
            params.push(("type", joined));
        }
        if exact {
            params.push(("exact", "1".to_string()));
        }
        let root = self.get("search", &params)?;
        parse::parse_search(&root)
    }

    pub fn hot_items(&self, kind: HotListKind) -> Result<Vec<HotItem>, BggError> {
        let root = self.get("hot", &[("type", kind.api_name().to_string())])?;
        parse::parse_hot_items(&root)
    }

    /// Fetch a user's collection. Repeated copies of a game collapse into
    /// the first one returned.
    pub fn collection(
        &self,
        user: &str,
        filter: &CollectionFilter,
    ) -> Result<Collection, BggError> {
        let mut params = vec![("username", user.to_string())];
        params.extend(filter.query_params());

        let root = self.get("collection", &params)?;
        let data = parse::parse_collection(user, &root)?;
        let raw_count = data.items.len();
        let collection = Collection::new(data)?;
        log::debug!(
            "collection of '{user}': {} entries, {} distinct games",
            raw_count,
            collection.len()
        );
        Ok(collection)
    }

    /// GET an endpoint and return the parsed document, retrying queued,
    /// throttled, and timed-out requests.
    fn get(&self, endpoint: &str, params: &[(&str, String)]) -> Result<Element, BggError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        let attempts = self.config.retries.saturating_add(1);
        let mut reason = String::new();

        for attempt in 0..attempts {
            if attempt > 0 {
                let delay = backoff(self.config.retry_delay, attempt);
                log::debug!(
                    "{endpoint}: {reason}; retry {attempt}/{} in {:.1}s",
                    self.config.retries,
                    delay.as_secs_f32()
                );
                std::thread::sleep(delay);
            }

            match self.attempt(&url, params)? {
                Attempt::Done(root) => return Ok(root),
                Attempt::Retry(why) => reason = why,
            }
        }

        Err(BggError::RetriesExhausted { attempts, reason })
    }

    fn attempt(&self, url: &str, params: &[(&str, String)]) -> Result<Attempt, BggError> {
        let mut request = self.http.get(url).query(params);
        if let Some(token) = &self.config.api_token {
            request = request.bearer_auth(token);
        }

        let resp = match request.send() {
            Ok(r) => r,
            Err(e) if e.is_timeout() => {
                return Ok(Attempt::Retry(e.to_string()));
            }
            Err(e) => return Err(e.into()),
        };

        let status = resp.status();
        if let Some(why) = retry_reason(status) {
            return Ok(Attempt::Retry(why.to_string()));
        }
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(BggError::Unauthorized(format!(
                "HTTP {} (is an API token configured?)",
                status.as_u16()
            )));
        }

        let text = match resp.text() {
            Ok(t) => t,
            Err(e) if e.is_timeout() => return Ok(Attempt::Retry(e.to_string())),
            Err(e) => return Err(e.into()),
        };
        if !status.is_success() {
            return Err(BggError::Server {
                status: status.as_u16(),
                message: excerpt(&text),
            });
        }

        let root = xml::parse_document(&text)?;
        parse::check_errors(&root)?;
        if parse::is_queued_message(&root) {
            return Ok(Attempt::Retry("request queued by BoardGameGeek".to_string()));
        }
        Ok(Attempt::Done(root))
    }
}

fn user_params(name: &str) -> Vec<(&'static str, String)> {
    vec![
        ("name", name.to_string()),
        ("buddies", "1".to_string()),
        ("guilds", "1".to_string()),
        ("hot", "1".to_string()),
        ("top", "1".to_string()),
    ]
}

fn report_user_progress(user: &User, progress: Option<Progress<'_>>) {
    if let Some(cb) = progress {
        cb(
            user.buddies.len() + user.guilds.len(),
            user.total_buddies + user.total_guilds,
        );
    }
}

/// Statuses worth retrying, with a short description for logs.
fn retry_reason(status: StatusCode) -> Option<&'static str> {
    if status == StatusCode::ACCEPTED {
        Some("request queued by BoardGameGeek")
    } else if status == StatusCode::TOO_MANY_REQUESTS {
        Some("rate limited")
    } else if status.is_server_error() {
        Some("server error")
    } else {
        None
    }
}

/// Delay before retry number `attempt` (1-based): `base * 2^(attempt-1)`,
/// capped at one minute.
fn backoff(base: Duration, attempt: u32) -> Duration {
    let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
    base.saturating_mul(factor).min(MAX_RETRY_DELAY)
}

fn excerpt(text: &str) -> String {
    text.trim().chars().take(200).collect()
}
