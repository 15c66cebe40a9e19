//! Regional message board activity check.

use super::{CheckKind, Finding, Section};
use crate::metrics::{days_between, DaysSince, RegionLastMessage};
use crate::models::Region;

/// Find regions whose most recent message board post is at least
/// `max_days` old, or that have no posts at all.
///
/// The result is sorted with the longest silence first.
pub fn evaluate(regions: &[Region], max_days: u64, now: i64) -> Vec<RegionLastMessage> {
    let mut inactive: Vec<RegionLastMessage> = regions
        .iter()
        .filter_map(|region| {
            let last_message = match region.last_message_at() {
                Some(timestamp) => DaysSince::Days(days_between(timestamp, now)),
                None => DaysSince::Never,
            };

            let overdue = match last_message {
                DaysSince::Days(days) => days >= max_days,
                DaysSince::Never => true,
            };

            overdue.then(|| RegionLastMessage {
                region: region.name.clone(),
                last_message,
            })
        })
        .collect();

    inactive.sort();
    inactive
}

/// Wrap the findings in a report section.
pub fn section(findings: Vec<RegionLastMessage>, max_days: u64) -> Section {
    Section {
        check: CheckKind::RmbActivity,
        title: format!(
            "Regions without new RMB messages during the last {} days",
            max_days
        ),
        findings: findings.into_iter().map(Finding::LastMessage).collect(),
    }
}
