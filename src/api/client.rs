//! HTTP client for the NationStates region API.
//!
//! Requests are rate limited on the client side. NationStates allows 50
//! requests per 30 seconds per client and locks out clients that exceed it.

use super::{api_region_name, xml, RegionSource};
use crate::error::SourceError;
use crate::models::{Region, Shard};
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use reqwest::StatusCode;
use std::num::NonZeroU32;
use std::time::Duration;
use tracing::{debug, info};

/// Configuration for the API client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Endpoint of the NationStates API.
    pub base_url: String,
    /// User agent sent with every request. NationStates requires one that
    /// identifies the operator.
    pub user_agent: String,
    pub timeout_seconds: u64,
    /// Requests allowed per 30 seconds.
    pub requests_per_30s: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.nationstates.net/cgi-bin/api.cgi".to_string(),
            user_agent: concat!("embassycheck/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout_seconds: 30,
            requests_per_30s: 45,
        }
    }
}

/// Fetches regions from the NationStates API.
pub struct NationStatesClient {
    config: ClientConfig,
    http_client: reqwest::Client,
    limiter: DefaultDirectRateLimiter,
}

impl NationStatesClient {
    /// Create a new client.
    pub fn new(config: ClientConfig) -> Result<Self, SourceError> {
        info!(
            "Initializing NationStates client for {} ({} requests per 30s)",
            config.base_url, config.requests_per_30s
        );

        let http_client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        let limiter = RateLimiter::direct(quota(config.requests_per_30s));

        Ok(Self {
            config,
            http_client,
            limiter,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    async fn request(&self, name: &str, shards: &[Shard]) -> Result<Option<Region>, SourceError> {
        self.limiter.until_ready().await;

        let shard_list: Vec<&str> = shards.iter().map(Shard::api_name).collect();
        // serde_urlencoded turns the spaces into the '+' separators the API expects.
        let query = [
            ("region", api_region_name(name)),
            ("q", shard_list.join(" ")),
        ];

        debug!("GET region={} q={}", query[0].1, query[1].1);

        let response = self
            .http_client
            .get(&self.config.base_url)
            .query(&query)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    debug!("Request for {} timed out after {}s", name, self.config.timeout_seconds);
                }
                SourceError::Http(e)
            })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            debug!("Region {} does not exist", name);
            return Ok(None);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SourceError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        xml::parse_region(&body).map(Some)
    }
}

impl RegionSource for NationStatesClient {
    async fn fetch_region(
        &self,
        name: &str,
        shards: &[Shard],
    ) -> Result<Option<Region>, SourceError> {
        self.request(name, shards).await
    }
}

/// A quota spreading `per_30s` requests evenly over 30 seconds, without bursts.
fn quota(per_30s: u32) -> Quota {
    let period = Duration::from_secs(30) / per_30s.max(1);
    Quota::with_period(period).unwrap_or_else(|| Quota::per_second(NonZeroU32::MIN))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_config_default() {
        let config = ClientConfig::default();
        assert!(config.base_url.starts_with("https://"));
        assert!(config.user_agent.starts_with("embassycheck/"));
        assert!(config.requests_per_30s < 50);
    }

    #[test]
    fn test_quota_spreads_requests() {
        let q = quota(30);
        assert_eq!(q.replenish_interval(), Duration::from_secs(1));
        assert_eq!(q.burst_size().get(), 1);

        // A zero budget still yields a usable quota.
        assert_eq!(quota(0).replenish_interval(), Duration::from_secs(30));
    }

    #[tokio::test]
    async fn test_client_builds() {
        let client = NationStatesClient::new(ClientConfig::default()).unwrap();
        assert_eq!(client.config().requests_per_30s, 45);
    }
}
