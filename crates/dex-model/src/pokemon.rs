//! The Pokemon field record

use crate::error::ModelError;
use crate::preview::Preview;
use crate::types::{PokemonType, MAX_TYPES};
use serde::{Deserialize, Serialize};

/// Denormalized snapshot of a reference-API creature
///
/// Used both for transient lookup candidates and for the value persisted in
/// a host document. Serializes with the document's camelCase field names;
/// absent measurements are omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pokemon {
    /// Reference-API identifier (positive)
    pub id: u32,
    /// Lowercase name, also the lookup key
    pub name: String,
    /// 1 to 2 known type tags
    pub types: Vec<PokemonType>,
    /// Sprite image URL
    pub sprite_url: String,
    /// Height in decimetres
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    /// Weight in hectograms
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<u32>,
}

impl Pokemon {
    /// Check the field's storage rules
    ///
    /// # Errors
    /// - `ModelError::InvalidId` if `id` is zero
    /// - `ModelError::EmptyName` if `name` is blank
    /// - `ModelError::TypeCount` unless there are 1 to 2 types
    /// - `ModelError::InvalidSpriteUrl` unless `sprite_url` is an absolute URI
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.id == 0 {
            return Err(ModelError::InvalidId(0));
        }
        if self.name.trim().is_empty() {
            return Err(ModelError::EmptyName);
        }
        if self.types.is_empty() || self.types.len() > MAX_TYPES {
            return Err(ModelError::TypeCount(self.types.len()));
        }
        url::Url::parse(&self.sprite_url).map_err(|e| ModelError::InvalidSpriteUrl {
            url: self.sprite_url.clone(),
            reason: e.to_string(),
        })?;
        Ok(())
    }

    /// Name with its first letter upper-cased
    #[must_use]
    pub fn display_name(&self) -> String {
        let mut chars = self.name.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    /// Type titles in order
    #[must_use]
    pub fn type_titles(&self) -> Vec<&'static str> {
        self.types.iter().map(|t| t.title()).collect()
    }

    /// Summary used by document listings
    #[inline]
    #[must_use]
    pub fn preview(&self) -> Preview {
        Preview::of(Some(self))
    }
}
