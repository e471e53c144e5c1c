//! API-Football HTTP client
//!
//! Talks to the v3 `/players` endpoint. The provider signals request
//! problems two ways: a non-2xx status, or an HTTP 200 envelope whose
//! `errors` field is populated. Both surface as [`SourceError::Api`].

use crate::config::ProviderConfig;
use crate::models::ImportParameters;
use crate::services::source::{PlayersPage, PlayersSource, SourceError};
use async_trait::async_trait;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

/// Production endpoint; overridable for tests and proxies
pub const DEFAULT_BASE_URL: &str = "https://v3.football.api-sports.io";

const USER_AGENT: &str = concat!("terrace-data/", env!("CARGO_PKG_VERSION"));

/// Spaces requests out to stay under the provider's per-minute quota
struct RequestPacer {
    last_request: Mutex<Option<Instant>>,
    min_interval: Duration,
}

impl RequestPacer {
    fn new(min_interval: Duration) -> Self {
        Self {
            last_request: Mutex::new(None),
            min_interval,
        }
    }

    /// Wait if necessary to comply with the request spacing
    async fn wait(&self) {
        let mut last = self.last_request.lock().await;

        if let Some(last_time) = *last {
            let elapsed = last_time.elapsed();
            if elapsed < self.min_interval {
                let wait_time = self.min_interval - elapsed;
                tracing::debug!("Pacing provider requests: waiting {:?}", wait_time);
                tokio::time::sleep(wait_time).await;
            }
        }

        *last = Some(Instant::now());
    }
}

/// API-Football client
pub struct ApiFootballClient {
    http_client: reqwest::Client,
    base_url: String,
    api_key: String,
    pacer: RequestPacer,
}

impl ApiFootballClient {
    pub fn new(config: &ProviderConfig) -> Result<Self, SourceError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.timeout)
            .build()
            .map_err(|e| SourceError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.key.clone(),
            pacer: RequestPacer::new(config.min_interval),
        })
    }
}

#[async_trait]
impl PlayersSource for ApiFootballClient {
    async fn fetch_page(&self, params: &ImportParameters) -> Result<PlayersPage, SourceError> {
        self.pacer.wait().await;

        let url = format!("{}/players", self.base_url);
        tracing::debug!(
            season = params.season,
            league = params.league,
            team = params.team,
            page = params.page,
            "Querying players endpoint"
        );

        let response = self
            .http_client
            .get(&url)
            .header("x-apisports-key", &self.api_key)
            .query(&[
                ("season", params.season),
                ("league", params.league),
                ("team", params.team),
                ("page", params.page),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SourceError::Api {
                status: status.as_u16(),
                message: truncate(&body, 200),
            });
        }

        let page = response.json::<PlayersPage>().await.map_err(|e| {
            if e.is_timeout() {
                SourceError::Timeout
            } else {
                SourceError::Parse(e.to_string())
            }
        })?;

        if let Some(message) = page.provider_error() {
            return Err(SourceError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(page)
    }
}

/// Cap provider error bodies so logs and responses stay readable
fn truncate(text: &str, max: usize) -> String {
    if text.len() <= max {
        return text.to_string();
    }
    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &text[..end])
}
