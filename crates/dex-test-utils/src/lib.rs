//! Testing utilities for the dexfield workspace
//!
//! Shared fixtures, fakes, and a loopback HTTP stub.

mod fixtures;
mod observer;
mod scripted;
mod server;

pub use fixtures::{api_body, charizard, pikachu, pikachu_body, unknown_types_body, SPRITE_BASE};
pub use observer::RecordingObserver;
pub use scripted::{Reply, ScriptedLookup};
pub use server::{StubResponse, StubServer};

use dex_field::{FieldBinding, FieldConfig};
use dex_store::{FieldPath, MemoryDocument};

/// Config with the given debounce window and the default base URL
pub fn test_config(debounce_ms: u64) -> FieldConfig {
    FieldConfig::new().with_debounce_ms(debounce_ms)
}

/// In-memory host field bound at `pokemon`
pub fn memory_field() -> FieldBinding<MemoryDocument> {
    FieldBinding::new(MemoryDocument::new(), FieldPath::single("pokemon").unwrap())
}
