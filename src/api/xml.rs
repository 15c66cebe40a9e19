//! Parsing of NationStates region API responses.

use crate::error::SourceError;
use crate::models::{Embassy, EmbassyStatus, Region, RegionTag, RegionalMessage};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use tracing::debug;

/// Parse a `<REGION>` document into a [`Region`].
///
/// Elements belonging to shards that were not requested are simply absent
/// and leave the corresponding fields empty.
pub fn parse_region(xml: &str) -> Result<Region, SourceError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut region = Region::default();
    let mut region_id: Option<String> = None;
    let mut path: Vec<String> = Vec::new();
    let mut embassy_status = EmbassyStatus::Established;
    let mut post_has_timestamp = false;

    loop {
        match reader.read_event()? {
            Event::Start(ref e) => {
                let tag = tag_name(e);
                match tag.as_str() {
                    "REGION" => region_id = attribute(e, "id")?,
                    "EMBASSY" => {
                        embassy_status = EmbassyStatus::from_api(attribute(e, "type")?.as_deref())
                    }
                    "POST" => {
                        post_has_timestamp = false;
                        region.messages.push(RegionalMessage {
                            timestamp: 0,
                            nation: String::new(),
                        });
                    }
                    _ => {}
                }
                path.push(tag);
            }
            Event::Empty(ref e) => {
                if tag_name(e) == "REGION" {
                    region_id = attribute(e, "id")?;
                }
            }
            Event::End(_) => {
                // Posts without a timestamp say nothing about activity.
                if path.pop().as_deref() == Some("POST") && !post_has_timestamp {
                    region.messages.pop();
                }
            }
            Event::Text(e) => {
                let text = e.unescape()?;
                apply_text(&mut region, &path, &text, embassy_status)?;
                if matches!(path.as_slice(), [.., parent, current] if parent == "POST" && current == "TIMESTAMP")
                {
                    post_has_timestamp = true;
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if region.name.is_empty() {
        match region_id {
            Some(id) => region.name = id.replace('_', " "),
            None => return Err(SourceError::Xml("missing REGION element".to_string())),
        }
    }

    debug!(
        "Parsed region {}: {} embassies, {} messages, {} tags",
        region.name,
        region.embassies.len(),
        region.messages.len(),
        region.tags.len()
    );

    Ok(region)
}

fn tag_name(e: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(e.local_name().as_ref()).to_uppercase()
}

fn attribute(e: &BytesStart<'_>, name: &str) -> Result<Option<String>, SourceError> {
    let attr = e
        .try_get_attribute(name)
        .map_err(|err| SourceError::Xml(err.to_string()))?;

    match attr {
        Some(attr) => Ok(Some(attr.unescape_value()?.into_owned())),
        None => Ok(None),
    }
}

fn apply_text(
    region: &mut Region,
    path: &[String],
    text: &str,
    embassy_status: EmbassyStatus,
) -> Result<(), SourceError> {
    let (current, parent) = match path {
        [.., parent, current] => (current.as_str(), parent.as_str()),
        _ => return Ok(()),
    };

    match (parent, current) {
        ("REGION", "NAME") => region.name = text.to_string(),
        ("EMBASSIES", "EMBASSY") => region.embassies.push(Embassy::new(text, embassy_status)),
        ("POST", "TIMESTAMP") => {
            if let Some(post) = region.messages.last_mut() {
                post.timestamp = parse_number(current, text)?;
            }
        }
        ("POST", "NATION") => {
            if let Some(post) = region.messages.last_mut() {
                post.nation = text.to_string();
            }
        }
        ("REGION", "FOUNDEDTIME") => {
            let founded = parse_number(current, text)?;
            region.founded = (founded > 0).then_some(founded);
        }
        ("TAGS", "TAG") => region.tags.push(RegionTag::from(text)),
        _ => {}
    }

    Ok(())
}

fn parse_number(tag: &str, text: &str) -> Result<i64, SourceError> {
    text.trim()
        .parse()
        .map_err(|_| SourceError::Xml(format!("invalid {} value: {:?}", tag, text)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EMBASSIES: &str = r#"<REGION id="the_western_isles">
<NAME>The Western Isles</NAME>
<EMBASSIES>
<EMBASSY>Lazarus</EMBASSY>
<EMBASSY type="closing">Old Friends</EMBASSY>
<EMBASSY type="pending">New Friends</EMBASSY>
<EMBASSY type="denied">The Rejected Realms</EMBASSY>
</EMBASSIES>
</REGION>"#;

    #[test]
    fn test_parse_embassies() {
        let region = parse_region(EMBASSIES).unwrap();

        assert_eq!(region.name, "The Western Isles");
        assert_eq!(
            region.embassies,
            vec![
                Embassy::new("Lazarus", EmbassyStatus::Established),
                Embassy::new("Old Friends", EmbassyStatus::Closing),
                Embassy::new("New Friends", EmbassyStatus::Pending),
                Embassy::new("The Rejected Realms", EmbassyStatus::Denied),
            ]
        );
        assert_eq!(region.relevant_embassies(), vec!["Lazarus", "New Friends"]);
    }

    #[test]
    fn test_parse_check_shards() {
        let xml = r#"<REGION id="lazarus">
<NAME>Lazarus</NAME>
<MESSAGES>
<POST id="1"><TIMESTAMP>1600000000</TIMESTAMP><NATION>first</NATION><STATUS>0</STATUS><MESSAGE><![CDATA[Hello & welcome]]></MESSAGE></POST>
<POST id="2"><TIMESTAMP>1600086400</TIMESTAMP><NATION>second</NATION><STATUS>0</STATUS><MESSAGE>Bye</MESSAGE></POST>
</MESSAGES>
<FOUNDEDTIME>1500000000</FOUNDEDTIME>
<TAGS>
<TAG>Raider</TAG>
<TAG>Anti-Fascist</TAG>
<TAG>Steampunk</TAG>
</TAGS>
</REGION>"#;

        let region = parse_region(xml).unwrap();

        assert_eq!(region.name, "Lazarus");
        assert_eq!(region.messages.len(), 2);
        assert_eq!(region.messages[1].nation, "second");
        assert_eq!(region.last_message_at(), Some(1_600_086_400));
        assert_eq!(region.founded, Some(1_500_000_000));
        assert_eq!(
            region.tags,
            vec![
                RegionTag::Raider,
                RegionTag::AntiFascist,
                RegionTag::Other("Steampunk".to_string())
            ]
        );
    }

    #[test]
    fn test_post_without_timestamp_is_ignored() {
        let xml = r#"<REGION id="quiet"><NAME>Quiet</NAME><MESSAGES>
<POST id="1"><NATION>ghost</NATION><MESSAGE>?</MESSAGE></POST>
<POST id="2"><TIMESTAMP>1600000000</TIMESTAMP><NATION>real</NATION></POST>
<POST id="3"><NATION>another ghost</NATION></POST>
</MESSAGES></REGION>"#;

        let region = parse_region(xml).unwrap();
        assert_eq!(region.messages.len(), 1);
        assert_eq!(region.messages[0].nation, "real");

        let only_ghosts = "<REGION id=\"x\"><MESSAGES><POST><NATION>ghost</NATION></POST></MESSAGES></REGION>";
        assert_eq!(parse_region(only_ghosts).unwrap().last_message_at(), None);
    }

    #[test]
    fn test_founded_zero_means_unknown() {
        let xml = "<REGION id=\"the_pacific\"><NAME>The Pacific</NAME><FOUNDEDTIME>0</FOUNDEDTIME></REGION>";
        let region = parse_region(xml).unwrap();
        assert_eq!(region.founded, None);
    }

    #[test]
    fn test_name_falls_back_to_id() {
        let xml = "<REGION id=\"the_north_pacific\"><TAGS></TAGS></REGION>";
        let region = parse_region(xml).unwrap();
        assert_eq!(region.name, "the north pacific");
    }

    #[test]
    fn test_escaped_names() {
        let xml = "<REGION id=\"x\"><NAME>Cats &amp; Dogs</NAME></REGION>";
        let region = parse_region(xml).unwrap();
        assert_eq!(region.name, "Cats & Dogs");
    }

    #[test]
    fn test_invalid_timestamp_is_an_error() {
        let xml = "<REGION id=\"x\"><FOUNDEDTIME>yesterday</FOUNDEDTIME></REGION>";
        assert!(matches!(parse_region(xml), Err(SourceError::Xml(_))));
    }

    #[test]
    fn test_missing_region_is_an_error() {
        assert!(parse_region("<NATION id=\"x\"></NATION>").is_err());
    }
}
