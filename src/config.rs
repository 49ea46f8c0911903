//! Endpoint and transport settings.
//!
//! `Config` derives `Deserialize` so a host application can embed it in its
//! own configuration file; every field falls back to the ClassLink defaults.

use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_AUTH_URL: &str = "https://launchpad.classlink.com/oauth2/v2/auth";
pub const DEFAULT_TOKEN_URL: &str = "https://launchpad.classlink.com/oauth2/v2/token";
pub const DEFAULT_INFO_URL: &str = "https://nodeapi.classlink.com/";
pub const DEFAULT_REDIRECT_URI: &str = "https://localhost:8080/code";

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub auth_url: String,
    pub token_url: String,
    /// Base for OneClick info endpoints. A missing trailing `/` is added.
    pub info_url: String,
    pub redirect_uri: String,
    /// Default per-request deadline in seconds. `None` waits indefinitely.
    pub timeout_secs: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            auth_url: DEFAULT_AUTH_URL.to_string(),
            token_url: DEFAULT_TOKEN_URL.to_string(),
            info_url: DEFAULT_INFO_URL.to_string(),
            redirect_uri: DEFAULT_REDIRECT_URI.to_string(),
            timeout_secs: None,
        }
    }
}

impl Config {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}
