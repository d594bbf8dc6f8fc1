//! Presentation model
//!
//! What a renderer needs to draw the field, with no rendering of its own.
//! A selected value replaces the search panel entirely.

use crate::session::FieldSnapshot;
use dex_model::Pokemon;
use serde::Serialize;

/// Hint shown under the search box
pub const SEARCH_HINT: &str = "Type a Pokemon name to search";
/// Placeholder for a missing measurement
pub const UNKNOWN_MEASUREMENT: &str = "Unknown";

/// A record rendered as a card
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PokemonCard {
    /// Capitalized name
    pub title: String,
    /// Type titles in slot order
    pub types: Vec<&'static str>,
    /// Sprite image
    pub sprite_url: String,
    /// `ID: .. • Height: ..dm • Weight: ..hg`
    pub details: String,
}

impl PokemonCard {
    /// Build a card for `pokemon`
    #[must_use]
    pub fn of(pokemon: &Pokemon) -> Self {
        Self {
            title: pokemon.display_name(),
            types: pokemon.type_titles(),
            sprite_url: pokemon.sprite_url.clone(),
            details: details_line(pokemon),
        }
    }
}

/// Search box, status and candidates
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchPanel {
    /// Text in the search box
    pub term: String,
    /// Show a spinner
    pub loading: bool,
    /// Message line, if any
    pub error: Option<String>,
    /// Selectable results
    pub candidates: Vec<PokemonCard>,
    /// Placeholder hint
    pub hint: &'static str,
}

/// Field presentation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum FieldView {
    /// A value is stored; show it with a clear action
    Selected(PokemonCard),
    /// No value; show the search UI
    Search(SearchPanel),
}

impl FieldView {
    /// Derive the view from the stored value and the session state
    #[must_use]
    pub fn render(value: Option<&Pokemon>, state: &FieldSnapshot) -> Self {
        match value {
            Some(pokemon) => Self::Selected(PokemonCard::of(pokemon)),
            None => Self::Search(SearchPanel {
                term: state.search_term.clone(),
                loading: state.loading,
                error: state.error.clone(),
                candidates: state.candidates.iter().map(PokemonCard::of).collect(),
                hint: SEARCH_HINT,
            }),
        }
    }

    /// Whether a value is selected
    #[inline]
    #[must_use]
    pub fn is_selected(&self) -> bool {
        matches!(self, Self::Selected(_))
    }
}

fn details_line(pokemon: &Pokemon) -> String {
    // zero reads as unmeasured
    let measure = |v: Option<u32>, unit: &str| match v {
        Some(v) if v > 0 => format!("{v}{unit}"),
        _ => UNKNOWN_MEASUREMENT.to_string(),
    };
    format!(
        "ID: {} • Height: {} • Weight: {}",
        pokemon.id,
        measure(pokemon.height, "dm"),
        measure(pokemon.weight, "hg")
    )
}
