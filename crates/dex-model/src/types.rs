//! Pokemon type tags
//!
//! The field accepts a closed set of 18 type names. Anything else the
//! reference API reports is dropped during normalization.

use crate::error::ModelError;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Maximum number of type tags a record may carry
pub const MAX_TYPES: usize = 2;

/// Known type tags
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PokemonType {
    Normal,
    Fire,
    Water,
    Electric,
    Grass,
    Ice,
    Fighting,
    Poison,
    Ground,
    Flying,
    Psychic,
    Bug,
    Rock,
    Ghost,
    Dragon,
    Dark,
    Steel,
    Fairy,
}

impl PokemonType {
    /// Every known tag, in schema order
    pub const ALL: [PokemonType; 18] = [
        Self::Normal,
        Self::Fire,
        Self::Water,
        Self::Electric,
        Self::Grass,
        Self::Ice,
        Self::Fighting,
        Self::Poison,
        Self::Ground,
        Self::Flying,
        Self::Psychic,
        Self::Bug,
        Self::Rock,
        Self::Ghost,
        Self::Dragon,
        Self::Dark,
        Self::Steel,
        Self::Fairy,
    ];

    /// Substituted when no reported tag is recognized
    pub const FALLBACK: PokemonType = Self::Normal;

    /// Wire name (lowercase)
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Fire => "fire",
            Self::Water => "water",
            Self::Electric => "electric",
            Self::Grass => "grass",
            Self::Ice => "ice",
            Self::Fighting => "fighting",
            Self::Poison => "poison",
            Self::Ground => "ground",
            Self::Flying => "flying",
            Self::Psychic => "psychic",
            Self::Bug => "bug",
            Self::Rock => "rock",
            Self::Ghost => "ghost",
            Self::Dragon => "dragon",
            Self::Dark => "dark",
            Self::Steel => "steel",
            Self::Fairy => "fairy",
        }
    }

    /// Display title
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::Fire => "Fire",
            Self::Water => "Water",
            Self::Electric => "Electric",
            Self::Grass => "Grass",
            Self::Ice => "Ice",
            Self::Fighting => "Fighting",
            Self::Poison => "Poison",
            Self::Ground => "Ground",
            Self::Flying => "Flying",
            Self::Psychic => "Psychic",
            Self::Bug => "Bug",
            Self::Rock => "Rock",
            Self::Ghost => "Ghost",
            Self::Dragon => "Dragon",
            Self::Dark => "Dark",
            Self::Steel => "Steel",
            Self::Fairy => "Fairy",
        }
    }
}

impl Display for PokemonType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PokemonType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| ModelError::UnknownType(s.to_string()))
    }
}

/// Filter reported type names down to a valid tag list
///
/// Unknown names are discarded, the first [`MAX_TYPES`] survivors are kept
/// in order, and an empty result becomes `[FALLBACK]`. The returned list
/// therefore always has 1 or 2 entries.
#[must_use]
pub fn normalize_types<I, S>(names: I) -> Vec<PokemonType>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut types: Vec<PokemonType> = Vec::with_capacity(MAX_TYPES);
    for name in names {
        let Ok(kind) = name.as_ref().parse::<PokemonType>() else {
            continue;
        };
        if types.contains(&kind) {
            continue;
        }
        types.push(kind);
        if types.len() == MAX_TYPES {
            break;
        }
    }

    if types.is_empty() {
        types.push(PokemonType::FALLBACK);
    }
    types
}
