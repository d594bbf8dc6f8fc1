//! End-to-end field behaviour on paused tokio time

use dex_field::prelude::*;
use dex_field::{FieldConfig, NOT_FOUND_MESSAGE, LOOKUP_FAILED_MESSAGE, SAVE_FAILED_MESSAGE};
use dex_model::{Pokemon, PokemonType};
use dex_store::{DocumentStore, FieldPath, JsonFileDocument};
use dex_test_utils::{charizard, memory_field, pikachu, test_config, RecordingObserver, Reply, ScriptedLookup};
use pretty_assertions::assert_eq;
use std::time::Duration;

fn start(
    lookup: ScriptedLookup,
    host: Arc<dyn HostField>,
) -> (FieldHandle, Arc<ScriptedLookup>, Arc<RecordingObserver>) {
    start_with(&test_config(300), lookup, host)
}

fn start_with(
    config: &FieldConfig,
    lookup: ScriptedLookup,
    host: Arc<dyn HostField>,
) -> (FieldHandle, Arc<ScriptedLookup>, Arc<RecordingObserver>) {
    let lookup = Arc::new(lookup);
    let observer = Arc::new(RecordingObserver::new());
    let (field, _task) = spawn_field(config, lookup.clone(), host, observer.clone());
    (field, lookup, observer)
}

async fn settle(field: &FieldHandle) -> FieldSnapshot {
    field
        .wait_until(|s| s.phase == Phase::Settled)
        .await
        .unwrap()
}

#[tokio::test(start_paused = true)]
async fn burst_commits_only_last_value() {
    let (field, lookup, _) = start(
        ScriptedLookup::new().found("pikachu", pikachu()),
        Arc::new(memory_field()),
    );

    for raw in ["p", "pi", "pik", "pika", "pikac", "pikach", "pikachu"] {
        field.input(raw).unwrap();
        tokio::time::sleep(Duration::from_millis(120)).await;
    }
    let state = settle(&field).await;

    assert_eq!(lookup.requests(), vec!["pikachu".to_string()]);
    assert_eq!(state.candidates, vec![pikachu()]);
    assert_eq!(state.committed.as_deref(), Some("pikachu"));
}

#[tokio::test(start_paused = true)]
async fn nothing_happens_inside_the_window() {
    let (field, lookup, _) = start(ScriptedLookup::new(), Arc::new(memory_field()));

    field.input("eevee").unwrap();
    tokio::time::sleep(Duration::from_millis(299)).await;

    assert_eq!(lookup.request_count(), 0);
    assert_eq!(field.snapshot().phase, Phase::AwaitingQuiescence);
}

#[tokio::test(start_paused = true)]
async fn term_is_trimmed_and_lowercased() {
    let (field, lookup, _) = start(
        ScriptedLookup::new().found("pikachu", pikachu()),
        Arc::new(memory_field()),
    );

    field.input("  PiKaChU  ").unwrap();
    let state = settle(&field).await;

    assert_eq!(lookup.requests(), vec!["pikachu".to_string()]);
    assert_eq!(state.search_term, "  PiKaChU  ");
    assert_eq!(state.candidates[0].id, 25);
}

#[tokio::test(start_paused = true)]
async fn not_found_clears_candidates_and_reports() {
    let (field, _, observer) = start(
        ScriptedLookup::new().reply("zzzzz", Reply::NotFound, Duration::from_millis(40)),
        Arc::new(memory_field()),
    );

    field.input("zzzzz").unwrap();
    let loading = field.wait_until(|s| s.loading).await.unwrap();
    assert!(loading.error.is_none());

    let state = field.wait_until(|s| !s.loading).await.unwrap();
    assert!(state.candidates.is_empty());
    assert_eq!(state.error.as_deref(), Some(NOT_FOUND_MESSAGE));
    assert_eq!(
        observer.phases(),
        vec![Phase::AwaitingQuiescence, Phase::InFlight, Phase::Settled]
    );
}

#[tokio::test(start_paused = true)]
async fn service_failure_is_generic() {
    let (field, _, _) = start(
        ScriptedLookup::new().status("mew", 503),
        Arc::new(memory_field()),
    );

    field.input("mew").unwrap();
    let state = settle(&field).await;

    assert!(state.candidates.is_empty());
    assert_eq!(state.error.as_deref(), Some(LOOKUP_FAILED_MESSAGE));
}

#[tokio::test(start_paused = true)]
async fn slow_earlier_result_never_clobbers_later_one() {
    let (field, lookup, observer) = start(
        ScriptedLookup::new()
            .reply("pika", Reply::NotFound, Duration::from_millis(500))
            .reply("pikachu", Reply::Found(pikachu()), Duration::from_millis(10)),
        Arc::new(memory_field()),
    );

    field.input("pika").unwrap();
    // "pika" commits at 300ms and answers at 800ms
    tokio::time::sleep(Duration::from_millis(350)).await;
    field.input("pikachu").unwrap();
    // "pikachu" commits at 650ms and answers at 660ms
    let state = settle(&field).await;
    assert_eq!(state.candidates, vec![pikachu()]);

    tokio::time::sleep(Duration::from_millis(500)).await;
    let state = field.snapshot();

    assert_eq!(lookup.requests(), vec!["pika".to_string(), "pikachu".to_string()]);
    assert_eq!(state.candidates, vec![pikachu()]);
    assert!(state.error.is_none());
    assert_eq!(observer.stale_results(), vec![(1, 2)]);
}

#[tokio::test(start_paused = true)]
async fn blank_input_clears_immediately() {
    let (field, lookup, _) = start(
        ScriptedLookup::new().found("pikachu", pikachu()),
        Arc::new(memory_field()),
    );

    field.input("pikachu").unwrap();
    settle(&field).await;

    field.input("   ").unwrap();
    let state = field.wait_until(|s| s.phase == Phase::Idle).await.unwrap();

    assert!(state.candidates.is_empty());
    assert!(state.error.is_none());
    assert!(!state.loading);
    assert_eq!(lookup.request_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn select_then_clear_round_trips_the_host_field() {
    let binding = memory_field();
    let (field, _, _) = start(
        ScriptedLookup::new().found("charizard", charizard()),
        Arc::new(binding.clone()),
    );

    field.input("charizard").unwrap();
    let state = settle(&field).await;
    let outcome = field.select(state.candidates[0].clone()).await.unwrap();

    assert_eq!(outcome, CommitOutcome::Committed);
    assert_eq!(binding.value(), Some(charizard()));
    let after = field.snapshot();
    assert_eq!(after.search_term, "");
    assert!(after.candidates.is_empty());
    assert!(FieldView::render(binding.value().as_ref(), &after).is_selected());

    assert_eq!(field.clear().await.unwrap(), CommitOutcome::Committed);
    assert_eq!(binding.value(), None);
    assert!(binding.store().get(binding.path()).is_none());
}

#[tokio::test(start_paused = true)]
async fn rejected_write_keeps_search_state() {
    let doc = dex_store::MemoryDocument::from_value(serde_json::json!({ "team": "locked" }));
    let path: FieldPath = "team.lead".parse().unwrap();
    let (field, _, _) = start(
        ScriptedLookup::new().found("pikachu", pikachu()),
        Arc::new(FieldBinding::new(doc, path)),
    );

    field.input("pikachu").unwrap();
    let state = settle(&field).await;
    let outcome = field.select(state.candidates[0].clone()).await.unwrap();

    assert_eq!(outcome, CommitOutcome::Failed(SAVE_FAILED_MESSAGE.to_string()));
    let after = field.snapshot();
    assert_eq!(after.search_term, "pikachu");
    assert_eq!(after.candidates, vec![pikachu()]);
    assert_eq!(after.error.as_deref(), Some(SAVE_FAILED_MESSAGE));
}

#[tokio::test(start_paused = true)]
async fn unknown_types_are_stored_as_normal() {
    let missingno = Pokemon {
        id: 10001,
        name: "missingno".to_string(),
        types: dex_model::normalize_types(["unknown1", "unknown2"]),
        sprite_url: "https://example.test/missingno.png".to_string(),
        height: None,
        weight: None,
    };
    let binding = memory_field();
    let (field, _, _) = start(
        ScriptedLookup::new().found("missingno", missingno.clone()),
        Arc::new(binding.clone()),
    );

    field.input("missingno").unwrap();
    let state = settle(&field).await;
    field.select(state.candidates[0].clone()).await.unwrap();

    assert_eq!(binding.value().unwrap().types, vec![PokemonType::Normal]);
}

#[tokio::test(start_paused = true)]
async fn selection_persists_to_json_file() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("entry.json");
    let doc = Arc::new(JsonFileDocument::open(&file).unwrap());
    let binding = FieldBinding::new(Arc::clone(&doc), "starter".parse().unwrap());

    let (field, _, _) = start_with(
        &test_config(50),
        ScriptedLookup::new().found("pikachu", pikachu()),
        Arc::new(binding),
    );
    field.input("pikachu").unwrap();
    let state = settle(&field).await;
    field.select(state.candidates[0].clone()).await.unwrap();

    let reopened = JsonFileDocument::open(&file).unwrap();
    let stored: Pokemon =
        serde_json::from_value(reopened.get(&"starter".parse().unwrap()).unwrap()).unwrap();
    assert_eq!(stored, pikachu());
    assert!(reopened.revision().is_some());
}
