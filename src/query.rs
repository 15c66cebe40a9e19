//! The embassy check query and the engine that runs it.
//!
//! A run resolves the embassies of the root region, fetches every relevant
//! embassy region one at a time while notifying listeners, runs each
//! enabled check over the retrieved regions and assembles a [`Report`].

use crate::api::RegionSource;
use crate::checks::Check;
use crate::error::CheckError;
use crate::events::{Listeners, RegionEventsListener};
use crate::models::{Region, RegionTag, Shard};
use crate::report::{render_text, Report};
use chrono::Utc;
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// What to check, and for which region.
///
/// Built with the chained setters and validated when the query runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryConfig {
    region: String,
    rmb_days: Option<i64>,
    min_age_days: Option<i64>,
    tags: Option<Vec<RegionTag>>,
}

impl QueryConfig {
    /// Start a query for the embassies of `region`.
    pub fn new(region: impl Into<String>) -> Self {
        Self {
            region: region.into().trim().to_string(),
            ..Self::default()
        }
    }

    /// Flag regions without a regional message board post in the last
    /// `max_days` days.
    pub fn rmb_activity(mut self, max_days: i64) -> Self {
        self.rmb_days = Some(max_days);
        self
    }

    /// Flag regions founded less than `min_days` days ago.
    pub fn minimum_age(mut self, min_days: i64) -> Self {
        self.min_age_days = Some(min_days);
        self
    }

    /// Flag regions carrying any of `tags`. Duplicates are ignored.
    pub fn region_tags<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<RegionTag>,
    {
        let mut unique: Vec<RegionTag> = Vec::new();
        for tag in tags.into_iter().map(Into::into) {
            if !unique.contains(&tag) {
                unique.push(tag);
            }
        }
        self.tags = Some(unique);
        self
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    /// Check the configuration and return the enabled checks in report
    /// order.
    pub fn validate(&self) -> Result<Vec<Check>, CheckError> {
        if self.region.is_empty() {
            return Err(CheckError::invalid("No region name supplied"));
        }

        let mut checks = Vec::new();

        if let Some(days) = self.rmb_days {
            if days <= 0 {
                return Err(CheckError::invalid(
                    "The maximum days of no RMB posts must be greater than 0",
                ));
            }
            checks.push(Check::RmbActivity {
                max_days: days as u64,
            });
        }

        if let Some(days) = self.min_age_days {
            if days <= 0 {
                return Err(CheckError::invalid(
                    "The minimum age of a region in days must be greater than 0",
                ));
            }
            checks.push(Check::Founded {
                min_days: days as u64,
            });
        }

        if let Some(ref tags) = self.tags {
            if tags.is_empty() {
                return Err(CheckError::invalid("At least one tag must be supplied"));
            }
            checks.push(Check::Tags { tags: tags.clone() });
        }

        if checks.is_empty() {
            return Err(CheckError::invalid("None of the checks is selected"));
        }

        Ok(checks)
    }
}

/// Shards to request for every embassy region.
fn shards_for(checks: &[Check]) -> Vec<Shard> {
    let mut shards = vec![Shard::Name];
    shards.extend(checks.iter().map(|c| c.kind().shard()));
    shards
}

/// Runs embassy check queries against a region source.
///
/// Running a query borrows the checker mutably, so one checker never runs
/// two queries at the same time.
pub struct EmbassyChecker<S> {
    source: S,
    listeners: Listeners,
    concurrency: usize,
    now: Option<i64>,
}

impl<S: RegionSource> EmbassyChecker<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            listeners: Listeners::new(),
            concurrency: 1,
            now: None,
        }
    }

    /// Allow up to `concurrency` embassy region fetches in flight.
    ///
    /// Progress events are still delivered in embassy order.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Measure all ages against `now` (epoch seconds) instead of the clock.
    pub fn at_time(mut self, now: i64) -> Self {
        self.now = Some(now);
        self
    }

    /// Register a progress listener. Returns false if it was already
    /// registered.
    pub fn add_listener(&mut self, listener: Arc<dyn RegionEventsListener>) -> bool {
        self.listeners.register(listener)
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Run the query and render the report as text.
    pub async fn execute(&mut self, config: &QueryConfig) -> Result<String, CheckError> {
        let report = self.run(config).await?;
        Ok(render_text(&report))
    }

    /// Run the query and return the structured report.
    pub async fn run(&mut self, config: &QueryConfig) -> Result<Report, CheckError> {
        self.run_until_cancelled(config, &CancellationToken::new())
            .await
    }

    /// Run the query, giving up with [`CheckError::Cancelled`] once `cancel`
    /// fires.
    pub async fn run_until_cancelled(
        &mut self,
        config: &QueryConfig,
        cancel: &CancellationToken,
    ) -> Result<Report, CheckError> {
        let checks = config.validate()?;
        let now = self.now.unwrap_or_else(|| Utc::now().timestamp());

        info!("Retrieving embassies of {}", config.region());
        let root = self
            .source
            .fetch_region(config.region(), &[Shard::Name, Shard::Embassies])
            .await?
            .ok_or_else(|| CheckError::RegionNotFound(config.region().to_string()))?;

        let embassies = root.relevant_embassies();
        info!(
            "{} has {} established or pending embassies",
            root.name,
            embassies.len()
        );

        self.listeners.retrieving_started(embassies.len());

        let shards = shards_for(&checks);
        let regions = self.retrieve_regions(&embassies, &shards, cancel).await?;
        info!(
            "Retrieved {} of {} embassy regions",
            regions.len(),
            embassies.len()
        );

        let sections = checks
            .iter()
            .map(|check| {
                let section = check.run(&regions, now);
                debug!("{} check flagged {} regions", check.kind(), section.total());
                section
            })
            .collect();

        Ok(Report {
            region: root.name,
            embassies_checked: embassies.len(),
            regions_retrieved: regions.len(),
            sections,
        })
    }

    /// Fetch the embassy regions in order, notifying listeners after each.
    ///
    /// Regions that no longer exist or fail to load are left out.
    async fn retrieve_regions(
        &self,
        names: &[String],
        shards: &[Shard],
        cancel: &CancellationToken,
    ) -> Result<Vec<Region>, CheckError> {
        let source = &self.source;
        let fetches = stream::iter(names.iter().map(|name| async move {
            let result = source.fetch_region(name, shards).await;
            (name, result)
        }))
        .buffered(self.concurrency);
        let mut fetches = std::pin::pin!(fetches);

        let mut regions = Vec::with_capacity(names.len());
        let mut index = 0;

        loop {
            let next = tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    warn!("Embassy check cancelled after {} of {} regions", index, names.len());
                    return Err(CheckError::Cancelled);
                }
                next = fetches.next() => next,
            };

            let Some((name, result)) = next else {
                break;
            };

            let retrieved = match result {
                Ok(Some(region)) => {
                    regions.push(region);
                    true
                }
                Ok(None) => {
                    debug!("Embassy region {} no longer exists", name);
                    false
                }
                Err(e) => {
                    warn!("Failed to retrieve embassy region {}: {}", name, e);
                    false
                }
            };

            self.listeners.region_retrieved(name, index, retrieved);
            index += 1;
        }

        Ok(regions)
    }
}
