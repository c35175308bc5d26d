// src/net.rs
//
// Sheet retrieval. Every request carries a fresh `t=<millis>` query value
// so no cache between us and the sheet can serve a stale export.

use std::{
    fmt,
    time::{Duration, SystemTime, UNIX_EPOCH},
};

use reqwest::{Url, blocking::Client};

use crate::config::consts::{CACHE_BUST_PARAM, USER_AGENT};
use crate::config::options::SourceOptions;

#[derive(Debug)]
pub enum FetchError {
    /// URL could not be built.
    BadUrl(String),
    /// Connect/DNS/TLS failure or timeout.
    Transport(String),
    /// Server answered with a non-success status.
    Status(u16),
    /// Body could not be read as text.
    Body(String),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::BadUrl(e)    => write!(f, "invalid sheet URL: {e}"),
            FetchError::Transport(e) => write!(f, "network error: {e}"),
            FetchError::Status(code) => write!(f, "HTTP error: {code}"),
            FetchError::Body(e)      => write!(f, "unreadable response body: {e}"),
        }
    }
}

impl std::error::Error for FetchError {}

/// Anything that can hand back the raw sheet export.
pub trait SheetSource: Send + Sync {
    fn fetch(&self) -> Result<String, FetchError>;
}

impl<F> SheetSource for F
where
    F: Fn() -> Result<String, FetchError> + Send + Sync,
{
    fn fetch(&self) -> Result<String, FetchError> { self() }
}

/// Published Google Sheet (or any URL serving CSV).
pub struct HttpSheet {
    client: Client,
    url: String,
}

impl HttpSheet {
    pub fn new(url: impl Into<String>, timeout: Option<Duration>) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        let url = url.into();
        // Validate once up front so a typo fails at startup, not every tick.
        Url::parse(&url).map_err(|e| FetchError::BadUrl(e.to_string()))?;
        Ok(Self { client, url })
    }

    pub fn from_options(opts: &SourceOptions) -> Result<Self, FetchError> {
        Self::new(opts.url.clone(), opts.timeout)
    }

    pub fn url(&self) -> &str { &self.url }
}

impl SheetSource for HttpSheet {
    fn fetch(&self) -> Result<String, FetchError> {
        let url = cache_busted(&self.url, now_millis())?;
        logd!("Fetch: GET {}", url);

        let resp = self
            .client
            .get(url)
            .send()
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }
        resp.text().map_err(|e| FetchError::Body(e.to_string()))
    }
}

/// Append (or replace) the cache-busting query parameter.
pub fn cache_busted(base: &str, millis: u128) -> Result<Url, FetchError> {
    let mut url = Url::parse(base).map_err(|e| FetchError::BadUrl(e.to_string()))?;
    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(k, _)| k != CACHE_BUST_PARAM)
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    {
        let mut q = url.query_pairs_mut();
        q.clear();
        for (k, v) in &kept {
            q.append_pair(k, v);
        }
        q.append_pair(CACHE_BUST_PARAM, &millis.to_string());
    }
    Ok(url)
}

fn now_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0)
}
