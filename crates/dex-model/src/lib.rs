//! dexfield model
//!
//! The record a Pokemon field stores, and how it is derived from the
//! reference API:
//! - [`Pokemon`]: the candidate / selected value shape
//! - [`PokemonType`]: the fixed enumeration of known type tags
//! - [`ApiPokemon`]: the raw reference-API payload and its normalization
//! - [`Preview`]: the title/subtitle/media summary shown for a field value
//!
//! # Example
//!
//! ```rust,ignore
//! use dex_model::ApiPokemon;
//!
//! let raw = ApiPokemon::from_slice(body)?;
//! let pokemon = raw.normalize()?;
//! assert!(pokemon.validate().is_ok());
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod api;
mod error;
mod pokemon;
mod preview;
mod types;

pub use api::{ApiPokemon, ApiSprites, ApiTypeSlot, NamedResource};
pub use error::ModelError;
pub use pokemon::Pokemon;
pub use preview::Preview;
pub use types::{normalize_types, PokemonType, MAX_TYPES};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
