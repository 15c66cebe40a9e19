//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.embassycheck.toml` files.

use crate::cli::Args;
use anyhow::{Context, Result};
use embassy_checker::{ClientConfig, QueryConfig};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Name of the configuration file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = ".embassycheck.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// NationStates API settings.
    #[serde(default)]
    pub api: ApiConfig,

    /// Check settings.
    #[serde(default)]
    pub checks: ChecksConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Region whose embassies are checked.
    #[serde(default = "default_region")]
    pub region: String,

    /// Report file. The report goes to stdout when unset.
    #[serde(default)]
    pub output: Option<String>,

    /// Enable verbose logging by default.
    #[serde(default)]
    pub verbose: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            region: default_region(),
            output: None,
            verbose: false,
        }
    }
}

fn default_region() -> String {
    "the western isles".to_string()
}

/// NationStates API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// User agent identifying the operator to NationStates.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Requests allowed per 30 seconds. NationStates allows at most 50.
    #[serde(default = "default_requests_per_30s")]
    pub requests_per_30s: u32,

    /// Number of embassy regions fetched at the same time.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            user_agent: default_user_agent(),
            timeout_seconds: default_timeout(),
            requests_per_30s: default_requests_per_30s(),
            concurrency: default_concurrency(),
        }
    }
}

fn default_base_url() -> String {
    ClientConfig::default().base_url
}

fn default_user_agent() -> String {
    ClientConfig::default().user_agent
}

fn default_timeout() -> u64 {
    ClientConfig::default().timeout_seconds
}

fn default_requests_per_30s() -> u32 {
    ClientConfig::default().requests_per_30s
}

fn default_concurrency() -> usize {
    1
}

/// Check settings. Each check has a switch and its parameter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChecksConfig {
    /// Run the RMB activity check.
    #[serde(default = "default_true")]
    pub rmb_activity: bool,

    /// Flag regions without RMB posts for at least this many days.
    #[serde(default = "default_rmb_days")]
    pub rmb_days: i64,

    /// Run the founding date check.
    #[serde(default = "default_true")]
    pub founded: bool,

    /// Flag regions founded less than this many days ago.
    #[serde(default = "default_min_age_days")]
    pub min_age_days: i64,

    /// Run the tag check.
    #[serde(default = "default_true")]
    pub region_tags: bool,

    /// Tags to flag.
    #[serde(default = "default_tags")]
    pub tags: Vec<String>,
}

impl Default for ChecksConfig {
    fn default() -> Self {
        Self {
            rmb_activity: true,
            rmb_days: default_rmb_days(),
            founded: true,
            min_age_days: default_min_age_days(),
            region_tags: true,
            tags: default_tags(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_rmb_days() -> i64 {
    30
}

fn default_min_age_days() -> i64 {
    90
}

fn default_tags() -> Vec<String> {
    vec!["Raider".to_string(), "Mercenary".to_string()]
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        Self::load_from_dir(Path::new("."))
    }

    /// Try to load `.embassycheck.toml` from a directory.
    pub fn load_from_dir(dir: &Path) -> Result<Option<Self>> {
        let config_path = dir.join(DEFAULT_CONFIG_FILE);

        if config_path.exists() {
            Ok(Some(Self::load(&config_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings.
    /// This method only overrides config when CLI provides explicit values.
    pub fn merge_with_args(&mut self, args: &Args) {
        if let Some(ref region) = args.region {
            self.general.region = region.trim().to_string();
        }
        if let Some(ref output) = args.output {
            self.general.output = Some(output.display().to_string());
        }

        if let Some(ref agent) = args.user_agent {
            self.api.user_agent = agent.clone();
        }
        if let Some(concurrency) = args.concurrency {
            self.api.concurrency = concurrency;
        }

        // Explicit values enable their check; --no-* flags win.
        if let Some(days) = args.rmb_days {
            self.checks.rmb_activity = true;
            self.checks.rmb_days = days;
        }
        if args.no_rmb {
            self.checks.rmb_activity = false;
        }

        if let Some(days) = args.min_age_days {
            self.checks.founded = true;
            self.checks.min_age_days = days;
        }
        if args.no_min_age {
            self.checks.founded = false;
        }

        if let Some(ref tags) = args.tags {
            self.checks.region_tags = true;
            self.checks.tags = tags.clone();
        }
        if args.no_tags {
            self.checks.region_tags = false;
        }

        if args.verbose {
            self.general.verbose = true;
        }
    }

    /// Build the query described by this configuration.
    pub fn query(&self) -> QueryConfig {
        let mut query = QueryConfig::new(self.general.region.as_str());

        if self.checks.rmb_activity {
            query = query.rmb_activity(self.checks.rmb_days);
        }
        if self.checks.founded {
            query = query.minimum_age(self.checks.min_age_days);
        }
        if self.checks.region_tags {
            query = query.region_tags(self.checks.tags.iter().map(String::as_str));
        }

        query
    }

    /// API client settings.
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.api.base_url.clone(),
            user_agent: self.api.user_agent.clone(),
            timeout_seconds: self.api.timeout_seconds,
            requests_per_30s: self.api.requests_per_30s,
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}
