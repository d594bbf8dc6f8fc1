//! Reference records and matching API payloads

use dex_model::{Pokemon, PokemonType};
use serde_json::json;

/// Sprite host used by every fixture
pub const SPRITE_BASE: &str = "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon";

/// #25, single type, both measurements
pub fn pikachu() -> Pokemon {
    Pokemon {
        id: 25,
        name: "pikachu".to_string(),
        types: vec![PokemonType::Electric],
        sprite_url: format!("{SPRITE_BASE}/25.png"),
        height: Some(4),
        weight: Some(60),
    }
}

/// #6, two types
pub fn charizard() -> Pokemon {
    Pokemon {
        id: 6,
        name: "charizard".to_string(),
        types: vec![PokemonType::Fire, PokemonType::Flying],
        sprite_url: format!("{SPRITE_BASE}/6.png"),
        height: Some(17),
        weight: Some(905),
    }
}

/// Reference-API payload with the fields the lookup reads plus some noise
pub fn api_body(id: i64, name: &str, types: &[&str], height: i64, weight: i64) -> String {
    let slots: Vec<_> = types
        .iter()
        .enumerate()
        .map(|(i, t)| {
            json!({
                "slot": i + 1,
                "type": { "name": t, "url": format!("https://pokeapi.co/api/v2/type/{t}/") }
            })
        })
        .collect();

    json!({
        "id": id,
        "name": name,
        "base_experience": 112,
        "order": id,
        "types": slots,
        "sprites": {
            "front_default": format!("{SPRITE_BASE}/{id}.png"),
            "back_default": null
        },
        "height": height,
        "weight": weight
    })
    .to_string()
}

/// API payload that decodes to [`pikachu`]
pub fn pikachu_body() -> String {
    api_body(25, "pikachu", &["electric"], 4, 60)
}

/// API payload whose type tags are all unrecognized
pub fn unknown_types_body() -> String {
    api_body(10001, "missingno", &["unknown1", "unknown2"], 10, 100)
}
