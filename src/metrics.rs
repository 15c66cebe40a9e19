//! Per-region results of the individual checks.
//!
//! Each metric type orders itself the way it is listed in a report, and
//! displays itself as one report line.

use crate::models::RegionTag;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

const SECONDS_PER_DAY: i64 = 86_400;

/// Whole days elapsed between `timestamp` and `now`, truncated.
///
/// Timestamps in the future count as zero days.
pub fn days_between(timestamp: i64, now: i64) -> u64 {
    (now.saturating_sub(timestamp).max(0) / SECONDS_PER_DAY) as u64
}

/// Days since something last happened.
///
/// `Never` is greater than every `Days` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DaysSince {
    Days(u64),
    Never,
}

impl fmt::Display for DaysSince {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DaysSince::Days(days) => write!(f, "{} days ago", days),
            DaysSince::Never => write!(f, "Never"),
        }
    }
}

/// A region with the time since its last regional message board post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionLastMessage {
    pub region: String,
    pub last_message: DaysSince,
}

impl Ord for RegionLastMessage {
    /// Longest silence first, then by name.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .last_message
            .cmp(&self.last_message)
            .then_with(|| self.region.cmp(&other.region))
    }
}

impl PartialOrd for RegionLastMessage {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for RegionLastMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Region: {}; Last RMB msg: {}.", self.region, self.last_message)
    }
}

/// A region with the number of days since it was founded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionFounded {
    pub region: String,
    pub days: u64,
}

impl Ord for RegionFounded {
    /// Youngest first, then by name.
    fn cmp(&self, other: &Self) -> Ordering {
        self.days
            .cmp(&other.days)
            .then_with(|| self.region.cmp(&other.region))
    }
}

impl PartialOrd for RegionFounded {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for RegionFounded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Region: {}; Founded: {} days ago.", self.region, self.days)
    }
}

/// A region with the flagged tags it carries. `tags` is never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionWithTags {
    pub region: String,
    pub tags: Vec<RegionTag>,
}

impl Ord for RegionWithTags {
    fn cmp(&self, other: &Self) -> Ordering {
        self.region
            .cmp(&other.region)
            .then_with(|| self.tags.cmp(&other.tags))
    }
}

impl PartialOrd for RegionWithTags {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for RegionWithTags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tags: Vec<String> = self.tags.iter().map(ToString::to_string).collect();
        write!(f, "Region: {}; Tags: {}.", self.region, tags.join(", "))
    }
}
