//! Region tag check.

use super::{CheckKind, Finding, Section};
use crate::metrics::RegionWithTags;
use crate::models::{Region, RegionTag};

/// Find regions carrying one or more of `wanted`, sorted by name.
///
/// The matched tags keep the order in which they appear in `wanted`.
pub fn evaluate(regions: &[Region], wanted: &[RegionTag]) -> Vec<RegionWithTags> {
    let mut tagged: Vec<RegionWithTags> = regions
        .iter()
        .filter(|region| !region.tags.is_empty())
        .filter_map(|region| {
            // Matched tags keep the spelling the region uses.
            let found: Vec<RegionTag> = wanted
                .iter()
                .filter_map(|tag| region.tags.iter().find(|t| *t == tag))
                .cloned()
                .collect();

            (!found.is_empty()).then(|| RegionWithTags {
                region: region.name.clone(),
                tags: found,
            })
        })
        .collect();

    tagged.sort();
    tagged
}

pub fn section(findings: Vec<RegionWithTags>) -> Section {
    Section {
        check: CheckKind::Tags,
        title: "Regions with one or more of the specified tags".to_string(),
        findings: findings.into_iter().map(Finding::Tags).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tagged(name: &str, tags: Vec<RegionTag>) -> Region {
        Region {
            tags,
            ..Region::named(name)
        }
    }

    #[test]
    fn test_intersection_with_wanted_tags() {
        let regions = vec![
            tagged("Horde", vec![RegionTag::Raider, RegionTag::Fascist]),
            tagged("Blackshirts", vec![RegionTag::Fascist]),
        ];
        let wanted = vec![RegionTag::Raider, RegionTag::Mercenary];

        let found = evaluate(&regions, &wanted);
        assert_eq!(
            found,
            vec![RegionWithTags {
                region: "Horde".to_string(),
                tags: vec![RegionTag::Raider],
            }]
        );
    }

    #[test]
    fn test_matches_follow_wanted_order() {
        let regions = vec![tagged(
            "Sellswords",
            vec![RegionTag::Raider, RegionTag::Defender, RegionTag::Mercenary],
        )];
        let wanted = vec![RegionTag::Mercenary, RegionTag::Raider];

        let found = evaluate(&regions, &wanted);
        assert_eq!(found[0].tags, vec![RegionTag::Mercenary, RegionTag::Raider]);
    }

    #[test]
    fn test_sorted_by_region_name() {
        let regions = vec![
            tagged("Zulu", vec![RegionTag::Raider]),
            tagged("Alpha", vec![RegionTag::Mercenary]),
            tagged("Untagged", Vec::new()),
        ];
        let wanted = vec![RegionTag::Raider, RegionTag::Mercenary];

        let found = evaluate(&regions, &wanted);
        let names: Vec<&str> = found.iter().map(|r| r.region.as_str()).collect();
        assert_eq!(names, vec!["Alpha", "Zulu"]);
    }

    #[test]
    fn test_unknown_tags_match_regardless_of_spelling() {
        let regions = vec![
            tagged("Archive", vec![RegionTag::from("Embassy Collector")]),
            tagged("Gears", vec![RegionTag::from("Steampunk")]),
        ];
        let wanted = vec![
            RegionTag::from("embassy collector"),
            RegionTag::from("STEAM-PUNK"),
        ];

        let found = evaluate(&regions, &wanted);
        let names: Vec<&str> = found.iter().map(|r| r.region.as_str()).collect();
        assert_eq!(names, vec!["Archive", "Gears"]);
        assert_eq!(found[0].to_string(), "Region: Archive; Tags: Embassy Collector.");
    }

    #[test]
    fn test_unknown_tags_match_verbatim() {
        let regions = vec![tagged("Gears", vec![RegionTag::from("Steampunk")])];
        let wanted = vec![RegionTag::from("Steampunk")];

        assert_eq!(evaluate(&regions, &wanted).len(), 1);
    }
}
