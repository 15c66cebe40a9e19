//! Text and JSON report generation.

use super::Report;
use crate::checks::Section;

/// Render the report as plain text.
///
/// Each section is followed by a blank line. Only the sections are
/// rendered, so two runs over the same data produce identical text.
pub fn render_text(report: &Report) -> String {
    let mut output = String::new();

    for section in &report.sections {
        output.push_str(&render_section(section));
        output.push('\n');
    }

    output
}

/// Render a single section: header, count, then one line per finding.
pub fn render_section(section: &Section) -> String {
    let mut text = String::new();

    text.push_str(&format!("-------{}-------\n", section.title));
    text.push_str(&format!("Total regions found: {}.\n", section.total()));

    for finding in &section.findings {
        text.push_str(&format!("{}\n", finding));
    }

    text
}

/// Generate a JSON report.
pub fn render_json(report: &Report) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::{activity, founded, tags, CheckKind};
    use crate::metrics::{DaysSince, RegionFounded, RegionLastMessage, RegionWithTags};
    use crate::models::RegionTag;

    fn create_test_report() -> Report {
        Report {
            region: "The Western Isles".to_string(),
            embassies_checked: 3,
            regions_retrieved: 3,
            sections: vec![
                activity::section(
                    vec![
                        RegionLastMessage {
                            region: "Quiet".to_string(),
                            last_message: DaysSince::Never,
                        },
                        RegionLastMessage {
                            region: "Sleepy".to_string(),
                            last_message: DaysSince::Days(31),
                        },
                    ],
                    30,
                ),
                founded::section(Vec::new(), 90),
                tags::section(vec![RegionWithTags {
                    region: "Horde".to_string(),
                    tags: vec![RegionTag::Raider, RegionTag::Mercenary],
                }]),
            ],
        }
    }

    #[test]
    fn test_render_text() {
        let text = render_text(&create_test_report());

        let expected = "\
-------Regions without new RMB messages during the last 30 days-------
Total regions found: 2.
Region: Quiet; Last RMB msg: Never.
Region: Sleepy; Last RMB msg: 31 days ago.

-------Regions that were founded less than 90 days ago-------
Total regions found: 0.

-------Regions with one or more of the specified tags-------
Total regions found: 1.
Region: Horde; Tags: Raider, Mercenary.

";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_render_section() {
        let section = founded::section(
            vec![RegionFounded {
                region: "Fresh".to_string(),
                days: 3,
            }],
            90,
        );

        let text = render_section(&section);
        assert!(text.starts_with("-------Regions that were founded less than 90 days ago-------\n"));
        assert!(text.contains("Total regions found: 1.\n"));
        assert!(text.ends_with("Region: Fresh; Founded: 3 days ago.\n"));
    }

    #[test]
    fn test_render_json() {
        let report = create_test_report();
        let json = render_json(&report).unwrap();

        assert!(json.contains("\"region\": \"The Western Isles\""));
        assert!(json.contains("\"check\": \"rmb_activity\""));
        assert!(json.contains("\"last_message\": \"never\""));
        assert!(json.contains("\"Mercenary\""));

        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["sections"].as_array().map(Vec::len), Some(3));
        assert_eq!(parsed["sections"][1]["check"], "founded");
    }

    #[test]
    fn test_report_totals() {
        let report = create_test_report();
        assert_eq!(report.total_findings(), 3);
        assert!(report.has_findings());
        assert_eq!(report.sections[2].check, CheckKind::Tags);

        let empty = Report {
            sections: vec![founded::section(Vec::new(), 90)],
            ..report
        };
        assert!(!empty.has_findings());
    }
}
