//! Region founding age check.

use super::{CheckKind, Finding, Section};
use crate::metrics::{days_between, RegionFounded};
use crate::models::Region;

/// Find regions founded less than `min_days` ago, youngest first.
///
/// Regions without a known founding time are skipped.
pub fn evaluate(regions: &[Region], min_days: u64, now: i64) -> Vec<RegionFounded> {
    let mut young: Vec<RegionFounded> = regions
        .iter()
        .filter_map(|region| {
            let days = days_between(region.founded?, now);
            (days < min_days).then(|| RegionFounded {
                region: region.name.clone(),
                days,
            })
        })
        .collect();

    young.sort();
    young
}

pub fn section(findings: Vec<RegionFounded>, min_days: u64) -> Section {
    Section {
        check: CheckKind::Founded,
        title: format!("Regions that were founded less than {} days ago", min_days),
        findings: findings.into_iter().map(Finding::Founded).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DAY: i64 = 86_400;
    const NOW: i64 = 20_000 * DAY;

    fn founded(name: &str, days_ago: i64) -> Region {
        Region {
            founded: Some(NOW - days_ago * DAY),
            ..Region::named(name)
        }
    }

    #[test]
    fn test_young_regions_newest_first() {
        let regions = vec![
            founded("Fifty", 50),
            founded("Old", 200),
            founded("Ten", 10),
        ];

        let young = evaluate(&regions, 90, NOW);
        assert_eq!(
            young,
            vec![
                RegionFounded {
                    region: "Ten".to_string(),
                    days: 10
                },
                RegionFounded {
                    region: "Fifty".to_string(),
                    days: 50
                },
            ]
        );
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let regions = vec![founded("Exactly", 90), founded("Almost", 89)];

        let young = evaluate(&regions, 90, NOW);
        assert_eq!(young.len(), 1);
        assert_eq!(young[0].region, "Almost");
    }

    #[test]
    fn test_unknown_founding_is_skipped() {
        let regions = vec![Region::named("Antiquity"), founded("New", 1)];

        let young = evaluate(&regions, 90, NOW);
        assert_eq!(young.len(), 1);
        assert_eq!(young[0].region, "New");
    }

    #[test]
    fn test_section_title() {
        let section = section(Vec::new(), 90);
        assert_eq!(section.title, "Regions that were founded less than 90 days ago");
        assert!(section.is_empty());
    }
}
