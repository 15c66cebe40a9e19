//! The individual embassy checks.
//!
//! Every check is a pure function over the retrieved regions. It returns its
//! findings already sorted in report order, and wraps them in a [`Section`].

pub mod activity;
pub mod founded;
pub mod tags;

use crate::metrics::{RegionFounded, RegionLastMessage, RegionWithTags};
use crate::models::{Region, RegionTag, Shard};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The available checks, in report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckKind {
    /// Regions without recent regional message board posts
    RmbActivity,
    /// Regions founded recently
    Founded,
    /// Regions carrying flagged tags
    Tags,
}

impl CheckKind {
    /// The shard a region must be fetched with for this check.
    pub fn shard(&self) -> Shard {
        match self {
            CheckKind::RmbActivity => Shard::Messages,
            CheckKind::Founded => Shard::FoundedTime,
            CheckKind::Tags => Shard::Tags,
        }
    }
}

impl fmt::Display for CheckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckKind::RmbActivity => write!(f, "RMB activity"),
            CheckKind::Founded => write!(f, "Founded"),
            CheckKind::Tags => write!(f, "Tags"),
        }
    }
}

/// A check together with its parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Check {
    /// Flag regions whose last post is at least this many days old.
    RmbActivity { max_days: u64 },
    /// Flag regions founded less than this many days ago.
    Founded { min_days: u64 },
    /// Flag regions carrying any of these tags.
    Tags { tags: Vec<RegionTag> },
}

impl Check {
    pub fn kind(&self) -> CheckKind {
        match self {
            Check::RmbActivity { .. } => CheckKind::RmbActivity,
            Check::Founded { .. } => CheckKind::Founded,
            Check::Tags { .. } => CheckKind::Tags,
        }
    }

    /// Run this check over the retrieved regions.
    pub fn run(&self, regions: &[Region], now: i64) -> Section {
        match self {
            Check::RmbActivity { max_days } => {
                activity::section(activity::evaluate(regions, *max_days, now), *max_days)
            }
            Check::Founded { min_days } => {
                founded::section(founded::evaluate(regions, *min_days, now), *min_days)
            }
            Check::Tags { tags: wanted } => tags::section(tags::evaluate(regions, wanted)),
        }
    }
}

/// One region flagged by a check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Finding {
    LastMessage(RegionLastMessage),
    Founded(RegionFounded),
    Tags(RegionWithTags),
}

impl Finding {
    /// Name of the flagged region.
    pub fn region(&self) -> &str {
        match self {
            Finding::LastMessage(m) => &m.region,
            Finding::Founded(m) => &m.region,
            Finding::Tags(m) => &m.region,
        }
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Finding::LastMessage(m) => fmt::Display::fmt(m, f),
            Finding::Founded(m) => fmt::Display::fmt(m, f),
            Finding::Tags(m) => fmt::Display::fmt(m, f),
        }
    }
}

/// The outcome of one check, ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Which check produced this section.
    pub check: CheckKind,
    /// Human-readable title including the check's parameter.
    pub title: String,
    /// Flagged regions, in report order.
    pub findings: Vec<Finding>,
}

impl Section {
    /// Number of flagged regions.
    pub fn total(&self) -> usize {
        self.findings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }
}
