//! Catalog character entity.

use serde::{Deserialize, Serialize};

/// Catalog-assigned character identifier.
pub type CharacterId = String;

/// Named place reference (origin or last known location).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PlaceRef {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Episode appearance reference.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EpisodeRef {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Season/episode code such as `S01E01`.
    #[serde(default, rename = "episode")]
    pub code: String,
}

/// Read-only catalog entity as delivered by the remote provider.
///
/// Text fields missing from the payload deserialize to empty strings so the
/// view pipeline can treat "missing" and "empty" the same way.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Character {
    pub id: CharacterId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub species: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<PlaceRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<PlaceRef>,
    /// Serialized as `type` to match the catalog schema.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, alias = "episodes")]
    pub episode: Vec<EpisodeRef>,
}

impl Character {
    /// Creates a character with only identity and name populated.
    pub fn new(id: impl Into<CharacterId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Self::default()
        }
    }
}
