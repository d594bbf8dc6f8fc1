//! Field preview

use crate::pokemon::Pokemon;
use serde::Serialize;

const UNKNOWN_TITLE: &str = "Unknown Pokemon";
const NO_TYPES: &str = "No types";

/// Title/subtitle/media summary of a field value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Preview {
    /// Creature name, or a placeholder
    pub title: String,
    /// Comma-separated type tags, or a placeholder
    pub subtitle: String,
    /// Sprite URL when one is set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media: Option<String>,
}

impl Preview {
    /// Build a preview for a possibly-empty field
    #[must_use]
    pub fn of(value: Option<&Pokemon>) -> Self {
        let Some(p) = value else {
            return Self {
                title: UNKNOWN_TITLE.to_string(),
                subtitle: NO_TYPES.to_string(),
                media: None,
            };
        };

        let title = if p.name.is_empty() {
            UNKNOWN_TITLE.to_string()
        } else {
            p.name.clone()
        };
        let subtitle = if p.types.is_empty() {
            NO_TYPES.to_string()
        } else {
            p.types
                .iter()
                .map(|t| t.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        };
        let media = (!p.sprite_url.is_empty()).then(|| p.sprite_url.clone());

        Self {
            title,
            subtitle,
            media,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PokemonType;

    #[test]
    fn preview_of_empty_field() {
        let preview = Preview::of(None);
        assert_eq!(preview.title, "Unknown Pokemon");
        assert_eq!(preview.subtitle, "No types");
        assert!(preview.media.is_none());
    }

    #[test]
    fn preview_joins_types() {
        let p = Pokemon {
            id: 6,
            name: "charizard".to_string(),
            types: vec![PokemonType::Fire, PokemonType::Flying],
            sprite_url: "https://example.test/6.png".to_string(),
            height: None,
            weight: None,
        };
        let preview = p.preview();
        assert_eq!(preview.title, "charizard");
        assert_eq!(preview.subtitle, "fire, flying");
        assert_eq!(preview.media.as_deref(), Some("https://example.test/6.png"));
    }
}
