//! Reference-API payload and normalization
//!
//! Only the fields the record needs are decoded; the rest of the response
//! (abilities, stats, moves, ...) is ignored.

use crate::error::ModelError;
use crate::pokemon::Pokemon;
use crate::types::normalize_types;
use serde::Deserialize;

/// `GET /pokemon/{name}` response body
#[derive(Debug, Clone, Deserialize)]
pub struct ApiPokemon {
    /// Identifier
    pub id: i64,
    /// Name
    pub name: String,
    /// Type slots
    #[serde(default)]
    pub types: Vec<ApiTypeSlot>,
    /// Sprite set
    #[serde(default)]
    pub sprites: ApiSprites,
    /// Height in decimetres
    #[serde(default)]
    pub height: Option<i64>,
    /// Weight in hectograms
    #[serde(default)]
    pub weight: Option<i64>,
}

/// One entry of the `types` array
#[derive(Debug, Clone, Deserialize)]
pub struct ApiTypeSlot {
    /// 1-based slot position
    #[serde(default)]
    pub slot: Option<u8>,
    /// The type resource
    #[serde(rename = "type")]
    pub kind: NamedResource,
}

/// Name + URL reference used throughout the API
#[derive(Debug, Clone, Deserialize)]
pub struct NamedResource {
    /// Resource name
    pub name: String,
    /// Resource URL
    #[serde(default)]
    pub url: Option<String>,
}

/// Sprite URLs
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiSprites {
    /// Default front sprite
    #[serde(default)]
    pub front_default: Option<String>,
}

impl ApiPokemon {
    /// Decode a response body
    ///
    /// # Errors
    /// `ModelError::Decode` if the body is not the expected JSON shape
    pub fn from_slice(body: &[u8]) -> Result<Self, ModelError> {
        Ok(serde_json::from_slice(body)?)
    }

    /// Reported type names ordered by slot
    #[must_use]
    pub fn type_names(&self) -> Vec<&str> {
        let mut slots: Vec<&ApiTypeSlot> = self.types.iter().collect();
        slots.sort_by_key(|s| s.slot.unwrap_or(u8::MAX));
        slots.into_iter().map(|s| s.kind.name.as_str()).collect()
    }

    /// Convert into a field record
    ///
    /// Types go through [`normalize_types`]; measurements are copied when
    /// present and representable. The result is validated before return.
    ///
    /// # Errors
    /// - `ModelError::InvalidId` for a non-positive id
    /// - `ModelError::MissingSprite` when no default sprite is reported
    /// - any rule violation from [`Pokemon::validate`]
    pub fn normalize(self) -> Result<Pokemon, ModelError> {
        let id = u32::try_from(self.id)
            .ok()
            .filter(|id| *id > 0)
            .ok_or(ModelError::InvalidId(self.id))?;

        let types = normalize_types(self.type_names());

        let sprite_url = self
            .sprites
            .front_default
            .filter(|s| !s.is_empty())
            .ok_or(ModelError::MissingSprite)?;

        let pokemon = Pokemon {
            id,
            name: self.name.to_lowercase(),
            types,
            sprite_url,
            height: self.height.and_then(|h| u32::try_from(h).ok()),
            weight: self.weight.and_then(|w| u32::try_from(w).ok()),
        };
        pokemon.validate()?;
        Ok(pokemon)
    }
}

impl TryFrom<ApiPokemon> for Pokemon {
    type Error = ModelError;

    fn try_from(raw: ApiPokemon) -> Result<Self, Self::Error> {
        raw.normalize()
    }
}
