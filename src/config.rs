use crate::error::ConfigError;
use crate::user_settings::UserSettings;
use std::env;
use std::time::Duration;
use url::Url;

/// API base used when `TXADMIN_API_URL` is not set
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3000/api";

/// Rows per page when nothing else is configured
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Page sizes offered in the pagination bar
pub const PAGE_SIZE_OPTIONS: &[u32] = &[10, 20, 30, 40, 50];

/// Timeout applied to every HTTP request
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Parse and validate an API base URL.
///
/// Only http(s) URLs are accepted; the path may or may not end in a slash.
pub fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let trimmed = raw.trim();
    let invalid = |reason: String| ConfigError::InvalidBaseUrl {
        url: trimmed.to_string(),
        reason,
    };

    let url = Url::parse(trimmed).map_err(|e| invalid(e.to_string()))?;
    match url.scheme() {
        "http" | "https" => {}
        other => return Err(invalid(format!("unsupported scheme '{}'", other))),
    }
    if url.cannot_be_a_base() {
        return Err(invalid("URL cannot be used as a base".to_string()));
    }
    Ok(url)
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

#[derive(Clone, Debug)]
pub struct Config {
    pub api_base_url: Url,
    pub page_size: u32,
    pub request_timeout: Duration,
}

impl Config {
    pub fn new(api_base_url: &str) -> Result<Self, ConfigError> {
        let page_size = env_parse::<u32>("TXADMIN_PAGE_SIZE")
            .filter(|size| *size > 0)
            .unwrap_or(DEFAULT_PAGE_SIZE);

        let timeout_secs = env_parse::<u64>("TXADMIN_REQUEST_TIMEOUT_SECS")
            .filter(|secs| *secs > 0)
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS);

        Ok(Self {
            api_base_url: parse_base_url(api_base_url)?,
            page_size,
            request_timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// Build the config from `TXADMIN_*` environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let base = env::var("TXADMIN_API_URL").unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string());
        Self::new(&base)
    }

    /// Apply persisted user settings on top of the environment values
    pub fn with_settings(mut self, settings: &UserSettings) -> Result<Self, ConfigError> {
        if let Some(url) = settings.api_base_url.as_deref().filter(|u| !u.trim().is_empty()) {
            self.api_base_url = parse_base_url(url)?;
        }
        match settings.default_page_size {
            Some(0) => tracing::warn!(
                "Ignoring saved page size 0, using {}",
                self.page_size
            ),
            Some(size) => self.page_size = size,
            None => {}
        }
        Ok(self)
    }
}
