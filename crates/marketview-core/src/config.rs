//! Client configuration injected at process start.

use std::fmt::{Debug, Formatter};

use tracing::warn;

pub const API_KEY_ENV: &str = "MARKETVIEW_ALPHAVANTAGE_API_KEY";
pub const BASE_URL_ENV: &str = "MARKETVIEW_ALPHAVANTAGE_BASE_URL";

pub const DEFAULT_BASE_URL: &str = "https://www.alphavantage.co/query";
pub const DEFAULT_TIMEOUT_MS: u64 = 5_000;

/// Alpha Vantage's public key; it only serves a handful of demo symbols.
const DEMO_API_KEY: &str = "demo";

/// Provider credential. Never printed in full.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn demo() -> Self {
        Self::new(DEMO_API_KEY)
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_demo(&self) -> bool {
        self.0 == DEMO_API_KEY
    }
}

impl Debug for ApiKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_key: ApiKey,
    pub base_url: String,
    pub timeout_ms: u64,
}

impl ClientConfig {
    pub fn new(api_key: ApiKey) -> Self {
        Self {
            api_key,
            base_url: String::from(DEFAULT_BASE_URL),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }

    /// Read the credential and endpoint from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable source. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
        };

        let api_key = match read(API_KEY_ENV) {
            Some(value) => ApiKey::new(value),
            None => {
                warn!("{API_KEY_ENV} is not set; using the provider demo key");
                ApiKey::demo()
            }
        };

        let mut config = Self::new(api_key);
        if let Some(base_url) = read(BASE_URL_ENV) {
            config.base_url = base_url.trim_end_matches('/').to_owned();
        }
        config
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }
}
