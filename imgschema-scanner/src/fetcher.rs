use crate::error::{Result, ScanError};
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::debug;
use url::Url;

pub const DEFAULT_USER_AGENT: &str = concat!("imgschema/", env!("CARGO_PKG_VERSION"));

/// Googlebot smartphone. Some sites only serve their full image markup to it.
pub const MOBILE_CRAWLER_USER_AGENT: &str = "Mozilla/5.0 (Linux; Android 6.0.1; Nexus 5X Build/MMB29P) \
AppleWebKit/537.36 (KHTML, like Gecko) Chrome/41.0.2272.96 Mobile Safari/537.36 \
(compatible; Googlebot/2.1; +http://www.google.com/bot.html)";

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// HTTP settings shared by every request of a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOptions {
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl FetchOptions {
    pub fn mobile_crawler() -> Self {
        Self {
            user_agent: MOBILE_CRAWLER_USER_AGENT.to_string(),
            ..Self::default()
        }
    }
}

pub struct PageFetcher {
    client: Client,
}

impl PageFetcher {
    pub fn new() -> Result<Self> {
        Self::with_options(&FetchOptions::default())
    }

    pub fn with_options(options: &FetchOptions) -> Result<Self> {
        let timeout = Duration::from_secs(options.timeout_secs.max(1));
        let client = Client::builder()
            .user_agent(options.user_agent.as_str())
            .timeout(timeout)
            .connect_timeout(Duration::from_secs((options.timeout_secs / 2).max(1)))
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;

        Ok(Self { client })
    }

    /// GET the page and return its body. Non-2xx responses are errors.
    pub async fn fetch(&self, url: &str) -> Result<String> {
        let parsed =
            Url::parse(url).map_err(|e| ScanError::InvalidUrl(format!("{}: {}", url, e)))?;

        debug!("Fetching {}", url);
        let start = Instant::now();
        let response = self.client.get(parsed).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScanError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        debug!(
            "Fetched {} ({} bytes in {:?})",
            url,
            body.len(),
            start.elapsed()
        );
        Ok(body)
    }
}
