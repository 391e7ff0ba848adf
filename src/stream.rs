use std::{
    fmt::{self, Display},
    hash::{Hash, Hasher},
};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{kick, twitch, youtube};

/// Streaming platform a [`StreamRef`] points at.
///
/// Names that are not recognised survive as [`Platform::Other`] so a layout
/// written by a newer build still round-trips through persistence.
///
/// Platforms compare by name, so `Other("twitch")` is the same platform as
/// `Twitch`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Platform {
    Twitch,
    Kick,
    Youtube,
    Other(String),
}

impl Platform {
    pub fn name(&self) -> &str {
        match self {
            Platform::Twitch => "twitch",
            Platform::Kick => "kick",
            Platform::Youtube => "youtube",
            Platform::Other(name) => name,
        }
    }

    /// First character of the platform name, used by the compact share format.
    pub fn initial(&self) -> String {
        self.name().chars().take(1).collect()
    }

    /// Inverse of [`Platform::initial`] for the known platforms. Anything else is
    /// taken verbatim as a platform name.
    pub fn from_initial(initial: &str) -> Self {
        match initial {
            "t" => Platform::Twitch,
            "k" => Platform::Kick,
            "y" => Platform::Youtube,
            other => Platform::from(other),
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            Platform::Twitch => "Twitch",
            Platform::Kick => "Kick",
            Platform::Youtube => "YouTube",
            Platform::Other(name) => name,
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Platform::Twitch => "🟣",
            Platform::Kick => "🟢",
            Platform::Youtube => "🔴",
            Platform::Other(_) => "📺",
        }
    }
}

impl PartialEq for Platform {
    fn eq(&self, other: &Self) -> bool {
        self.name() == other.name()
    }
}

impl Eq for Platform {}

impl Hash for Platform {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name().hash(state);
    }
}

impl From<&str> for Platform {
    fn from(name: &str) -> Self {
        match name {
            "twitch" => Platform::Twitch,
            "kick" => Platform::Kick,
            "youtube" => Platform::Youtube,
            other => Platform::Other(other.to_string()),
        }
    }
}

impl From<String> for Platform {
    fn from(name: String) -> Self {
        match name.as_str() {
            "twitch" | "kick" | "youtube" => Platform::from(name.as_str()),
            _ => Platform::Other(name),
        }
    }
}

impl From<Platform> for String {
    fn from(platform: Platform) -> Self {
        match platform {
            Platform::Other(name) => name,
            known => known.name().to_string(),
        }
    }
}

impl Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A channel or video reference: what a single tile embeds.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StreamRef {
    pub platform: Platform,
    pub id: String,
}

impl StreamRef {
    pub fn new(platform: Platform, id: impl Into<String>) -> Self {
        Self {
            platform,
            id: id.into(),
        }
    }

    pub fn twitch(channel: impl Into<String>) -> Self {
        Self::new(Platform::Twitch, channel)
    }

    pub fn kick(channel: impl Into<String>) -> Self {
        Self::new(Platform::Kick, channel)
    }

    pub fn youtube(video_id: impl Into<String>) -> Self {
        Self::new(Platform::Youtube, video_id)
    }

    pub fn is(&self, platform: &Platform, id: &str) -> bool {
        &self.platform == platform && self.id == id
    }

    /// Builds a reference out of untrusted JSON. Both fields must be present,
    /// be strings and be non-empty.
    pub(crate) fn from_json_object(value: &Value) -> Option<Self> {
        let platform = non_empty_str(value.get("platform"))?;
        let id = non_empty_str(value.get("id"))?;
        Some(Self::new(Platform::from(platform), id))
    }

    /// Same as [`StreamRef::from_json_object`] for a `[initial, id]` share tuple.
    pub(crate) fn from_share_tuple(value: &Value) -> Option<Self> {
        let tuple = value.as_array()?;
        let initial = non_empty_str(tuple.first())?;
        let id = non_empty_str(tuple.get(1))?;
        Some(Self::new(Platform::from_initial(initial), id))
    }

    pub(crate) fn to_share_tuple(&self) -> [String; 2] {
        [self.platform.initial(), self.id.clone()]
    }

    /// Player URL for an embedded tile. `parent` is the host the player is
    /// embedded in, Twitch refuses to play without it. Unknown platforms have no
    /// player and yield an empty string.
    pub fn embed_url(&self, parent: &str) -> String {
        match &self.platform {
            Platform::Twitch => twitch::embed_url(&self.id, parent),
            Platform::Kick => kick::embed_url(&self.id),
            Platform::Youtube => youtube::embed_url(&self.id),
            Platform::Other(_) => String::new(),
        }
    }

    /// Public page of the channel or video.
    pub fn watch_url(&self) -> Option<String> {
        match &self.platform {
            Platform::Twitch => Some(twitch::channel_url(&self.id)),
            Platform::Kick => Some(kick::channel_url(&self.id)),
            Platform::Youtube => Some(youtube::watch_url(&self.id)),
            Platform::Other(_) => None,
        }
    }

    pub fn label(&self) -> String {
        format!("{}: {}", self.platform.display_name(), self.id)
    }
}

impl Display for StreamRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.platform, self.id)
    }
}

fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    value.and_then(Value::as_str).filter(|s| !s.is_empty())
}
