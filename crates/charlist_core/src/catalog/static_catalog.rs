//! In-memory catalog provider.

use super::{CatalogError, CatalogFilter, CatalogProvider, CatalogResult};
use crate::model::character::Character;
use log::debug;

/// Catalog backed by an owned character list in provider order.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    characters: Vec<Character>,
}

impl StaticCatalog {
    pub fn new(characters: Vec<Character>) -> Self {
        Self { characters }
    }

    /// Parses a JSON array of characters.
    ///
    /// # Errors
    /// - Returns `CatalogError::InvalidData` when the payload is not a
    ///   character array.
    pub fn from_json(value: &str) -> CatalogResult<Self> {
        let characters: Vec<Character> = serde_json::from_str(value)
            .map_err(|err| CatalogError::InvalidData(err.to_string()))?;
        Ok(Self::new(characters))
    }

    pub fn characters(&self) -> &[Character] {
        &self.characters
    }
}

impl CatalogProvider for StaticCatalog {
    fn fetch(&self, filter: &CatalogFilter) -> CatalogResult<Vec<Character>> {
        let results: Vec<Character> = self
            .characters
            .iter()
            .filter(|character| filter.matches(character))
            .cloned()
            .collect();
        debug!(
            "event=catalog_fetch module=catalog status=ok total={} matched={}",
            self.characters.len(),
            results.len()
        );
        Ok(results)
    }
}
