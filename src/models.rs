//! Data models for the embassy checker.
//!
//! This module contains the region records returned by a [`RegionSource`]
//! and the small enums describing embassies, shards and region tags.
//!
//! [`RegionSource`]: crate::api::RegionSource

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::convert::Infallible;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// A group of fields the API can be asked to return for a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shard {
    /// The region's display name
    Name,
    /// The region's embassy list
    Embassies,
    /// Recent regional message board posts
    Messages,
    /// Founding timestamp
    FoundedTime,
    /// Region tags
    Tags,
}

impl Shard {
    /// Name of the shard as understood by the NationStates API.
    pub fn api_name(&self) -> &'static str {
        match self {
            Shard::Name => "name",
            Shard::Embassies => "embassies",
            Shard::Messages => "messages",
            Shard::FoundedTime => "foundedtime",
            Shard::Tags => "tags",
        }
    }
}

impl fmt::Display for Shard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.api_name())
    }
}

/// State of an embassy between two regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmbassyStatus {
    Established,
    Pending,
    Invited,
    Requested,
    Denied,
    Rejected,
    Closing,
}

impl EmbassyStatus {
    /// Parse the `type` attribute of an `EMBASSY` element.
    ///
    /// An embassy without a type is established. Unknown types are treated
    /// as closing so they never end up in an audit.
    pub fn from_api(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_lowercase()).as_deref() {
            None | Some("") => EmbassyStatus::Established,
            Some("pending") => EmbassyStatus::Pending,
            Some("invited") => EmbassyStatus::Invited,
            Some("requested") => EmbassyStatus::Requested,
            Some("denied") => EmbassyStatus::Denied,
            Some("rejected") => EmbassyStatus::Rejected,
            Some(_) => EmbassyStatus::Closing,
        }
    }

    /// Whether an embassy in this state belongs in an audit.
    pub fn is_relevant(&self) -> bool {
        matches!(self, EmbassyStatus::Established | EmbassyStatus::Pending)
    }
}

impl fmt::Display for EmbassyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmbassyStatus::Established => write!(f, "established"),
            EmbassyStatus::Pending => write!(f, "pending"),
            EmbassyStatus::Invited => write!(f, "invited"),
            EmbassyStatus::Requested => write!(f, "requested"),
            EmbassyStatus::Denied => write!(f, "denied"),
            EmbassyStatus::Rejected => write!(f, "rejected"),
            EmbassyStatus::Closing => write!(f, "closing"),
        }
    }
}

/// An embassy listed by a region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Embassy {
    /// Name of the region on the other end of the embassy.
    pub region: String,
    /// Current state of the embassy.
    pub status: EmbassyStatus,
}

impl Embassy {
    pub fn new(region: impl Into<String>, status: EmbassyStatus) -> Self {
        Self {
            region: region.into(),
            status,
        }
    }
}

/// A post on a regional message board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionalMessage {
    /// Posting time in epoch seconds.
    pub timestamp: i64,
    /// Nation that posted the message.
    #[serde(default)]
    pub nation: String,
}

/// A region as returned by the data source.
///
/// Only the fields belonging to requested shards are populated; the rest
/// stay empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    /// Display name of the region.
    pub name: String,
    /// Embassies of the region, in API order.
    #[serde(default)]
    pub embassies: Vec<Embassy>,
    /// Recent regional message board posts.
    #[serde(default)]
    pub messages: Vec<RegionalMessage>,
    /// Founding time in epoch seconds. `None` for regions founded before
    /// founding times were recorded.
    #[serde(default)]
    pub founded: Option<i64>,
    /// Tags the region carries.
    #[serde(default)]
    pub tags: Vec<RegionTag>,
}

impl Region {
    /// Creates a region with only a name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Timestamp of the most recent message board post, if any.
    pub fn last_message_at(&self) -> Option<i64> {
        self.messages.iter().map(|m| m.timestamp).max()
    }

    /// Names of the embassy regions worth auditing, in API order.
    pub fn relevant_embassies(&self) -> Vec<String> {
        self.embassies
            .iter()
            .filter(|e| e.status.is_relevant())
            .map(|e| e.region.clone())
            .collect()
    }
}

/// A region tag.
///
/// Well-known tags get their own variant; anything else the API returns is
/// kept verbatim in `Other`.
///
/// Tags compare by their letters and digits only, ignoring case, so
/// `Other("Embassy Collector")` equals `Other("embassy-collector")`.
#[derive(Debug, Clone)]
pub enum RegionTag {
    Anarchist,
    AntiCapitalist,
    AntiCommunist,
    AntiFascist,
    Capitalist,
    Communist,
    Conservative,
    Defender,
    Democratic,
    Egalitarian,
    Fascist,
    Feminist,
    Founderless,
    Frontier,
    Imperialist,
    Independent,
    Invader,
    Isolationist,
    Liberal,
    Libertarian,
    Mercenary,
    Monarchist,
    Neutral,
    Pacifist,
    Password,
    Raider,
    Religious,
    RolePlayer,
    Socialist,
    Theocratic,
    Totalitarian,
    Other(String),
}

impl RegionTag {
    fn canonical(&self) -> &str {
        match self {
            RegionTag::Anarchist => "Anarchist",
            RegionTag::AntiCapitalist => "Anti-Capitalist",
            RegionTag::AntiCommunist => "Anti-Communist",
            RegionTag::AntiFascist => "Anti-Fascist",
            RegionTag::Capitalist => "Capitalist",
            RegionTag::Communist => "Communist",
            RegionTag::Conservative => "Conservative",
            RegionTag::Defender => "Defender",
            RegionTag::Democratic => "Democratic",
            RegionTag::Egalitarian => "Egalitarian",
            RegionTag::Fascist => "Fascist",
            RegionTag::Feminist => "Feminist",
            RegionTag::Founderless => "Founderless",
            RegionTag::Frontier => "Frontier",
            RegionTag::Imperialist => "Imperialist",
            RegionTag::Independent => "Independent",
            RegionTag::Invader => "Invader",
            RegionTag::Isolationist => "Isolationist",
            RegionTag::Liberal => "Liberal",
            RegionTag::Libertarian => "Libertarian",
            RegionTag::Mercenary => "Mercenary",
            RegionTag::Monarchist => "Monarchist",
            RegionTag::Neutral => "Neutral",
            RegionTag::Pacifist => "Pacifist",
            RegionTag::Password => "Password",
            RegionTag::Raider => "Raider",
            RegionTag::Religious => "Religious",
            RegionTag::RolePlayer => "Role Player",
            RegionTag::Socialist => "Socialist",
            RegionTag::Theocratic => "Theocratic",
            RegionTag::Totalitarian => "Totalitarian",
            RegionTag::Other(s) => s.as_str(),
        }
    }

    fn key(&self) -> impl Iterator<Item = char> + '_ {
        normalized(self.canonical())
    }
}

/// Letters and digits of `s`, lowercased.
fn normalized(s: &str) -> impl Iterator<Item = char> + '_ {
    s.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
}

impl PartialEq for RegionTag {
    fn eq(&self, other: &Self) -> bool {
        self.key().eq(other.key())
    }
}

impl Eq for RegionTag {}

impl Hash for RegionTag {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for c in self.key() {
            c.hash(state);
        }
    }
}

impl Ord for RegionTag {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(other.key())
    }
}

impl PartialOrd for RegionTag {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for RegionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.canonical())
    }
}

impl FromStr for RegionTag {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(RegionTag::from(s))
    }
}

impl From<&str> for RegionTag {
    /// Case, spaces, dashes and underscores are ignored, so `anti_fascist`,
    /// `Anti-Fascist` and `antifascist` are the same tag.
    fn from(s: &str) -> Self {
        let key: String = normalized(s).collect();

        match key.as_str() {
            "anarchist" => RegionTag::Anarchist,
            "anticapitalist" => RegionTag::AntiCapitalist,
            "anticommunist" => RegionTag::AntiCommunist,
            "antifascist" => RegionTag::AntiFascist,
            "capitalist" => RegionTag::Capitalist,
            "communist" => RegionTag::Communist,
            "conservative" => RegionTag::Conservative,
            "defender" => RegionTag::Defender,
            "democratic" => RegionTag::Democratic,
            "egalitarian" => RegionTag::Egalitarian,
            "fascist" => RegionTag::Fascist,
            "feminist" => RegionTag::Feminist,
            "founderless" => RegionTag::Founderless,
            "frontier" => RegionTag::Frontier,
            "imperialist" => RegionTag::Imperialist,
            "independent" => RegionTag::Independent,
            "invader" => RegionTag::Invader,
            "isolationist" => RegionTag::Isolationist,
            "liberal" => RegionTag::Liberal,
            "libertarian" => RegionTag::Libertarian,
            "mercenary" => RegionTag::Mercenary,
            "monarchist" => RegionTag::Monarchist,
            "neutral" => RegionTag::Neutral,
            "pacifist" => RegionTag::Pacifist,
            "password" => RegionTag::Password,
            "raider" => RegionTag::Raider,
            "religious" => RegionTag::Religious,
            "roleplayer" => RegionTag::RolePlayer,
            "socialist" => RegionTag::Socialist,
            "theocratic" => RegionTag::Theocratic,
            "totalitarian" => RegionTag::Totalitarian,
            _ => RegionTag::Other(s.trim().to_string()),
        }
    }
}

impl Serialize for RegionTag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.canonical())
    }
}

impl<'de> Deserialize<'de> for RegionTag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(RegionTag::from(s.as_str()))
    }
}
