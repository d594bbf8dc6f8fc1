//! dexfield widget core
//!
//! A form field whose value is a Pokemon record, found by typing a name:
//! - [`Debouncer`]: coalesces keystrokes into committed search terms
//! - [`SearchSession`]: the phase/generation state machine and its messages
//! - [`HostField`]: set/unset capability over the host document
//! - [`spawn_field`]: tokio controller that drives a session end to end
//! - [`FieldView`]: what a renderer shows
//!
//! # Example
//!
//! ```rust,ignore
//! use dex_field::prelude::*;
//!
//! let (field, _task) = spawn_field(&config, lookup, host, Arc::new(TracingObserver));
//! field.input("pikachu")?;
//! let state = field.wait_until(|s| s.phase == Phase::Settled).await?;
//! if let Some(candidate) = state.candidates.first() {
//!     field.select(candidate.clone()).await?;
//! }
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod config;
pub mod controller;
pub mod debounce;
pub mod error;
pub mod host;
pub mod observer;
pub mod phase;
pub mod session;
pub mod view;

pub use config::{FieldConfig, ENV_API_BASE_URL, ENV_DEBOUNCE_MS};
pub use controller::{spawn_field, FieldHandle};
pub use debounce::{DebounceTicket, Debounced, Debouncer};
pub use error::{CommitError, ConfigError, FieldError};
pub use host::{FieldBinding, HostField};
pub use observer::{FieldObserver, NoopObserver, TracingObserver};
pub use phase::{allowed_transitions, is_allowed, Phase, Transition};
pub use session::{
    CommitOutcome, Completion, FieldSnapshot, InputEffect, LookupRequest, SearchSession,
    CLEAR_FAILED_MESSAGE, LOOKUP_FAILED_MESSAGE, NOT_FOUND_MESSAGE, SAVE_FAILED_MESSAGE,
};
pub use view::{FieldView, PokemonCard, SearchPanel};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports
pub mod prelude {
    pub use crate::config::FieldConfig;
    pub use crate::controller::{spawn_field, FieldHandle};
    pub use crate::error::{CommitError, FieldError};
    pub use crate::host::{FieldBinding, HostField};
    pub use crate::observer::{FieldObserver, NoopObserver, TracingObserver};
    pub use crate::phase::Phase;
    pub use crate::session::{CommitOutcome, FieldSnapshot};
    pub use crate::view::FieldView;
    pub use std::sync::Arc;
}
