use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The sentinel value meaning "no filter applied"
pub const ALL: &str = "All";

/// One filter dimension: either unrestricted or pinned to a concrete value
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Selector {
    #[default]
    All,
    Value(String),
}

impl Selector {
    pub fn value(&self) -> Option<&str> {
        match self {
            Self::All => None,
            Self::Value(value) => Some(value),
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }
}

impl From<String> for Selector {
    fn from(value: String) -> Self {
        if value == ALL { Self::All } else { Self::Value(value) }
    }
}

impl From<&str> for Selector {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<Option<String>> for Selector {
    fn from(value: Option<String>) -> Self {
        value.map(Self::from).unwrap_or_default()
    }
}

impl From<Selector> for String {
    fn from(selector: Selector) -> Self {
        match selector {
            Selector::All => ALL.to_string(),
            Selector::Value(value) => value,
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value().unwrap_or(ALL))
    }
}

/// Which of the four filter dimensions a selector belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectorKind {
    Status,
    Gender,
    Species,
    Type,
}

impl SelectorKind {
    pub const ALL_KINDS: [SelectorKind; 4] =
        [Self::Status, Self::Gender, Self::Species, Self::Type];

    /// Query parameter name used by the catalog
    pub fn param(&self) -> &'static str {
        match self {
            Self::Status => "status",
            Self::Gender => "gender",
            Self::Species => "species",
            Self::Type => "type",
        }
    }

    /// Known values offered by the filter panel. Free text is still accepted.
    pub fn known_options(&self) -> &'static [FilterOption] {
        match self {
            Self::Status => STATUS_OPTIONS,
            Self::Gender => GENDER_OPTIONS,
            Self::Species => SPECIES_OPTIONS,
            Self::Type => TYPE_OPTIONS,
        }
    }
}

impl FromStr for SelectorKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "status" => Ok(Self::Status),
            "gender" => Ok(Self::Gender),
            "species" => Ok(Self::Species),
            "type" => Ok(Self::Type),
            _ => Err(format!("Unknown filter: {}", s)),
        }
    }
}

/// A value and its human label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterOption {
    pub value: &'static str,
    pub label: &'static str,
}

const fn option(value: &'static str, label: &'static str) -> FilterOption {
    FilterOption { value, label }
}

const STATUS_OPTIONS: &[FilterOption] = &[
    option("Alive", "Alive"),
    option("Dead", "Dead"),
    option("unknown", "Unknown"),
];

const GENDER_OPTIONS: &[FilterOption] = &[
    option("female", "Female"),
    option("male", "Male"),
    option("genderless", "Genderless"),
];

const SPECIES_OPTIONS: &[FilterOption] = &[option("Human", "Human"), option("Alien", "Alien")];

const TYPE_OPTIONS: &[FilterOption] = &[
    option("Human with ants in his eyes", "Human with ants in his eyes"),
    option(
        "Superhuman (Ghost trains summoner)",
        "Superhuman (Ghost trains summoner)",
    ),
];

/// The four selectors, combined with a logical AND by the catalog
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterState {
    #[serde(default)]
    pub status: Selector,
    #[serde(default)]
    pub gender: Selector,
    #[serde(default)]
    pub species: Selector,
    #[serde(rename = "type", default)]
    pub kind: Selector,
}

impl FilterState {
    pub fn get(&self, kind: SelectorKind) -> &Selector {
        match kind {
            SelectorKind::Status => &self.status,
            SelectorKind::Gender => &self.gender,
            SelectorKind::Species => &self.species,
            SelectorKind::Type => &self.kind,
        }
    }

    /// Replace one selector; returns true when the value actually changed
    pub fn set(&mut self, kind: SelectorKind, selector: Selector) -> bool {
        let slot = match kind {
            SelectorKind::Status => &mut self.status,
            SelectorKind::Gender => &mut self.gender,
            SelectorKind::Species => &mut self.species,
            SelectorKind::Type => &mut self.kind,
        };
        if *slot == selector {
            return false;
        }
        *slot = selector;
        true
    }

    /// Query parameters for the listing request, skipping `All` selectors
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        SelectorKind::ALL_KINDS
            .iter()
            .filter_map(|kind| {
                self.get(*kind)
                    .value()
                    .map(|value| (kind.param(), value.to_string()))
            })
            .collect()
    }
}
