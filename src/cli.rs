//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use clap::Parser;
use std::path::PathBuf;

/// Embassy Checker - audit the embassies of a NationStates region
///
/// Lists embassy regions with a silent regional message board, regions
/// founded recently and regions carrying unwanted tags.
///
/// Examples:
///   embassycheck --region "the western isles"
///   embassycheck --region lazarus --rmb-days 60 --no-min-age
///   embassycheck --tags raider,imperialist --no-rmb --format json
///   embassycheck --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Region whose embassies are checked
    ///
    /// Defaults to the region in .embassycheck.toml, or "the western isles".
    #[arg(short, long, value_name = "NAME", env = "EMBASSYCHECK_REGION")]
    pub region: Option<String>,

    /// Flag regions without RMB posts for at least this many days
    #[arg(long, value_name = "DAYS", conflicts_with = "no_rmb")]
    pub rmb_days: Option<i64>,

    /// Skip the RMB activity check
    #[arg(long)]
    pub no_rmb: bool,

    /// Flag regions founded less than this many days ago
    #[arg(long, value_name = "DAYS", conflicts_with = "no_min_age")]
    pub min_age_days: Option<i64>,

    /// Skip the founding date check
    #[arg(long)]
    pub no_min_age: bool,

    /// Region tags to flag (comma-separated)
    ///
    /// Example: --tags raider,mercenary,"anti-fascist"
    #[arg(long, value_name = "TAGS", value_delimiter = ',', conflicts_with = "no_tags")]
    pub tags: Option<Vec<String>>,

    /// Skip the tag check
    #[arg(long)]
    pub no_tags: bool,

    /// Output file for the report
    ///
    /// The report is printed to stdout when no file is given.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format (text, json)
    #[arg(long, default_value = "text", value_name = "FORMAT")]
    pub format: OutputFormat,

    /// Path to configuration file
    ///
    /// If not specified, looks for .embassycheck.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// User agent sent to the NationStates API
    ///
    /// NationStates asks for one that identifies you, e.g. your nation name.
    #[arg(long, value_name = "AGENT", env = "EMBASSYCHECK_USER_AGENT")]
    pub user_agent: Option<String>,

    /// Number of embassy regions fetched at the same time
    #[arg(long, value_name = "NUM")]
    pub concurrency: Option<usize>,

    /// Exit with code 2 when any check flags a region
    ///
    /// Useful for scheduled jobs.
    #[arg(long)]
    pub fail_on_findings: bool,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,

    /// Generate a default .embassycheck.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

/// Output format for the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Plain text (default)
    #[default]
    Text,
    /// JSON format
    Json,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    ///
    /// Check parameters themselves are validated by the query.
    pub fn validate(&self) -> Result<(), String> {
        if self.init_config {
            return Ok(());
        }

        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if self.no_rmb && self.no_min_age && self.no_tags {
            return Err("All checks are disabled; nothing to do".to_string());
        }

        if let Some(ref region) = self.region {
            if region.trim().is_empty() {
                return Err("Region name must not be empty".to_string());
            }
        }

        if let Some(ref agent) = self.user_agent {
            if agent.trim().is_empty() {
                return Err("User agent must not be empty".to_string());
            }
        }

        if self.concurrency == Some(0) {
            return Err("Concurrency must be at least 1".to_string());
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_args() -> Args {
        Args {
            region: Some("the western isles".to_string()),
            rmb_days: None,
            no_rmb: false,
            min_age_days: None,
            no_min_age: false,
            tags: None,
            no_tags: false,
            output: None,
            format: OutputFormat::Text,
            config: None,
            user_agent: None,
            concurrency: None,
            fail_on_findings: false,
            verbose: false,
            quiet: false,
            init_config: false,
        }
    }

    #[test]
    fn test_validation_ok() {
        assert!(make_args().validate().is_ok());
    }

    #[test]
    fn test_validation_conflicting_options() {
        let mut args = make_args();
        args.verbose = true;
        args.quiet = true;
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_all_checks_disabled() {
        let mut args = make_args();
        args.no_rmb = true;
        args.no_min_age = true;
        args.no_tags = true;
        assert!(args.validate().is_err());

        args.init_config = true;
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_validation_blank_values() {
        let mut args = make_args();
        args.region = Some("  ".to_string());
        assert!(args.validate().is_err());

        let mut args = make_args();
        args.user_agent = Some(String::new());
        assert!(args.validate().is_err());

        let mut args = make_args();
        args.concurrency = Some(0);
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_parse_flags() {
        let args = Args::try_parse_from([
            "embassycheck",
            "--region",
            "lazarus",
            "--tags",
            "raider,fascist",
            "--no-rmb",
            "--format",
            "json",
        ])
        .unwrap();

        assert_eq!(args.region.as_deref(), Some("lazarus"));
        assert_eq!(
            args.tags,
            Some(vec!["raider".to_string(), "fascist".to_string()])
        );
        assert!(args.no_rmb);
        assert_eq!(args.format, OutputFormat::Json);
    }

    #[test]
    fn test_conflicting_check_flags_rejected() {
        let result = Args::try_parse_from(["embassycheck", "--rmb-days", "30", "--no-rmb"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_log_level() {
        let mut args = make_args();
        assert_eq!(args.log_level(), tracing::Level::INFO);

        args.verbose = true;
        assert_eq!(args.log_level(), tracing::Level::DEBUG);

        args.verbose = false;
        args.quiet = true;
        assert_eq!(args.log_level(), tracing::Level::ERROR);
    }
}
