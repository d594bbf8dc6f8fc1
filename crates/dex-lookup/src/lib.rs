//! dexfield lookup
//!
//! One request per committed search term against the public reference API:
//! - [`SearchTerm`]: trimmed, lowercased, non-empty lookup key
//! - [`PokemonLookup`]: the seam the field widget depends on
//! - [`PokeApiClient`]: reqwest implementation of that seam
//!
//! # Example
//!
//! ```rust,ignore
//! use dex_lookup::{LookupConfig, LookupOutcome, PokeApiClient, PokemonLookup, SearchTerm};
//!
//! let client = PokeApiClient::new(&LookupConfig::default())?;
//! let term = SearchTerm::parse("Pikachu").unwrap();
//! if let LookupOutcome::Found(p) = client.lookup(&term).await? {
//!     println!("{} #{}", p.name, p.id);
//! }
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod client;
mod error;
mod lookup;
mod term;

pub use client::{LookupConfig, PokeApiClient, DEFAULT_BASE_URL};
pub use error::LookupError;
pub use lookup::{LookupOutcome, PokemonLookup};
pub use term::SearchTerm;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
