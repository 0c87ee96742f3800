// Optional JSON config file for extraction rules and HTTP settings

use crate::error::ConfigError;
use imgschema_scanner::fetcher::MOBILE_CRAWLER_USER_AGENT;
use imgschema_scanner::{ExtractionRules, FetchOptions};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Every field is optional; unset fields fall back to the built-in defaults.
///
/// ```json
/// {
///   "scope": "body > div:nth-child(3) > main > article",
///   "deny_substrings": ["blurred", "googleusercontent.com"],
///   "alt_prefix": "Writer: ",
///   "mobile_crawler": true,
///   "timeout_secs": 20
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    pub scope: Option<String>,
    pub deny_substrings: Option<Vec<String>>,
    pub alt_prefix: Option<String>,
    pub mobile_crawler: Option<bool>,
    pub user_agent: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl RunConfig {
    pub fn rules(&self) -> ExtractionRules {
        let defaults = ExtractionRules::default();
        ExtractionRules {
            scope: self.scope.clone().filter(|s| !s.trim().is_empty()),
            deny_substrings: self
                .deny_substrings
                .clone()
                .unwrap_or(defaults.deny_substrings),
            // An empty prefix in the file switches stripping off.
            alt_prefix: match &self.alt_prefix {
                Some(prefix) if prefix.is_empty() => None,
                Some(prefix) => Some(prefix.clone()),
                None => defaults.alt_prefix,
            },
        }
    }

    /// An explicit `user_agent` wins over `mobile_crawler`.
    pub fn fetch_options(&self) -> FetchOptions {
        let mut options = FetchOptions::default();
        if self.mobile_crawler.unwrap_or(false) {
            options.user_agent = MOBILE_CRAWLER_USER_AGENT.to_string();
        }
        if let Some(ref ua) = self.user_agent {
            options.user_agent = ua.clone();
        }
        if let Some(secs) = self.timeout_secs {
            options.timeout_secs = secs;
        }
        options
    }
}

/// Load a config file. `~` is expanded.
pub fn load_config(path: &str) -> Result<RunConfig, ConfigError> {
    let path = PathBuf::from(shellexpand::tilde(path).as_ref());
    let content = fs::read_to_string(&path).map_err(|source| ConfigError::Io {
        path: path.clone(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| ConfigError::Parse { path, source })
}
