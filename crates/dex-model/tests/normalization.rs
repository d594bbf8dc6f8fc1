use dex_model::{ApiPokemon, Pokemon, PokemonType, MAX_TYPES};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use serde_json::json;

fn body(types: &[String]) -> Vec<u8> {
    let slots: Vec<_> = types
        .iter()
        .enumerate()
        .map(|(i, t)| json!({ "slot": i + 1, "type": { "name": t } }))
        .collect();
    json!({
        "id": 132,
        "name": "Ditto",
        "types": slots,
        "sprites": { "front_default": "https://example.test/132.png" },
        "height": 3,
        "weight": 40
    })
    .to_string()
    .into_bytes()
}

fn type_name() -> impl Strategy<Value = String> {
    prop_oneof![
        proptest::sample::select(PokemonType::ALL.to_vec()).prop_map(|t| t.as_str().to_string()),
        "[a-z]{3,10}",
    ]
}

#[test]
fn stored_shape_uses_camel_case() {
    let pokemon = ApiPokemon::from_slice(&body(&["normal".to_string()]))
        .unwrap()
        .normalize()
        .unwrap();

    assert_eq!(
        serde_json::to_value(&pokemon).unwrap(),
        json!({
            "id": 132,
            "name": "ditto",
            "types": ["normal"],
            "spriteUrl": "https://example.test/132.png",
            "height": 3,
            "weight": 40
        })
    );
}

#[test]
fn missing_measurements_are_omitted() {
    let raw = json!({
        "id": 151,
        "name": "mew",
        "types": [{ "slot": 1, "type": { "name": "psychic" } }],
        "sprites": { "front_default": "https://example.test/151.png" }
    });
    let pokemon = ApiPokemon::from_slice(raw.to_string().as_bytes())
        .unwrap()
        .normalize()
        .unwrap();

    let stored = serde_json::to_value(&pokemon).unwrap();
    assert!(stored.get("height").is_none());
    assert!(stored.get("weight").is_none());

    let back: Pokemon = serde_json::from_value(stored).unwrap();
    assert_eq!(back, pokemon);
}

proptest! {
    #[test]
    fn prop_resolved_types_are_capped_and_known(names in proptest::collection::vec(type_name(), 0..6)) {
        let pokemon = ApiPokemon::from_slice(&body(&names)).unwrap().normalize().unwrap();

        prop_assert!(!pokemon.types.is_empty());
        prop_assert!(pokemon.types.len() <= MAX_TYPES);

        let any_known = names.iter().any(|n| n.parse::<PokemonType>().is_ok());
        if !any_known {
            prop_assert_eq!(pokemon.types, vec![PokemonType::Normal]);
        }
    }
}
