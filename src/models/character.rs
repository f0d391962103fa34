use serde::{Deserialize, Serialize};
use std::fmt;

/// Life status reported by the catalog.
///
/// The catalog may add values at any time, so anything unrecognised lands in
/// `Other` instead of failing deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CharacterStatus {
    Alive,
    Dead,
    Unknown,
    Other(String),
}

/// Display grouping for a status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusBucket {
    Alive,
    Dead,
    Other,
}

impl CharacterStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Alive => "Alive",
            Self::Dead => "Dead",
            Self::Unknown => "unknown",
            Self::Other(value) => value,
        }
    }

    pub fn bucket(&self) -> StatusBucket {
        match self {
            Self::Alive => StatusBucket::Alive,
            Self::Dead => StatusBucket::Dead,
            Self::Unknown | Self::Other(_) => StatusBucket::Other,
        }
    }
}

impl From<String> for CharacterStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Alive" => Self::Alive,
            "Dead" => Self::Dead,
            "unknown" => Self::Unknown,
            _ => Self::Other(value),
        }
    }
}

impl From<CharacterStatus> for String {
    fn from(status: CharacterStatus) -> Self {
        match status {
            CharacterStatus::Other(value) => value,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for CharacterStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Name plus optional link, as used for `origin` and `location`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NamedResource {
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub url: String,
}

/// One character from the catalog, plus the derived first-episode name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterEntity {
    pub id: u64,
    pub name: String,
    pub status: CharacterStatus,
    #[serde(default)]
    pub species: String,
    #[serde(default)]
    pub gender: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub origin: NamedResource,
    #[serde(default)]
    pub location: NamedResource,
    #[serde(default)]
    pub episode: Vec<String>,
    #[serde(default)]
    pub image: String,

    /// Set only when the enrichment fetch succeeded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_episode_name: Option<String>,
}

impl CharacterEntity {
    /// URI of the episode the character first appeared in
    pub fn first_episode_url(&self) -> Option<&str> {
        self.episode.first().map(String::as_str)
    }
}

/// One page of the catalog's character listing
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CharacterPage {
    pub results: Vec<CharacterEntity>,
}

/// Episode resource; only the name is used
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Episode {
    pub name: String,
    #[serde(default)]
    pub episode: Option<String>,
    #[serde(default)]
    pub air_date: Option<String>,
}

/// Location resource from `api/location`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: u64,
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub dimension: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LocationPage {
    pub results: Vec<Location>,
}
