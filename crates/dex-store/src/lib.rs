//! dexfield host document store
//!
//! The widget never talks to a content backend directly. It emits
//! [`Patch`]es addressed by a [`FieldPath`] into something implementing
//! [`DocumentStore`]:
//! - [`MemoryDocument`]: shared in-process document (tests, embedding)
//! - [`JsonFileDocument`]: a JSON document on disk, rewritten atomically
//!
//! Every applied patch produces a fresh [`Revision`].

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod document;
mod error;
mod file;
mod memory;
mod patch;
mod path;

pub use document::{DocumentStore, Revision, REVISION_FIELD};
pub use error::StoreError;
pub use file::JsonFileDocument;
pub use memory::MemoryDocument;
pub use patch::Patch;
pub use path::FieldPath;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
