//! Error types for the Pokemon model

/// Errors raised while decoding, normalizing or validating a record
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// Tag is not one of the known type names
    #[error("unknown pokemon type: {0}")]
    UnknownType(String),

    /// Identifier is zero, negative or out of range
    #[error("invalid pokemon id: {0}")]
    InvalidId(i64),

    /// Name is missing or blank
    #[error("pokemon name is empty")]
    EmptyName,

    /// Tag count outside the allowed range
    #[error("pokemon must have 1 to 2 types, found {0}")]
    TypeCount(usize),

    /// Reference API returned no sprite image
    #[error("pokemon has no sprite image")]
    MissingSprite,

    /// Sprite reference is not an absolute URI
    #[error("invalid sprite url {url}: {reason}")]
    InvalidSpriteUrl {
        /// The offending value
        url: String,
        /// Parser message
        reason: String,
    },

    /// Payload is not valid JSON for the expected shape
    #[error("failed to decode pokemon payload: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ModelError {
    /// Whether the error came from the payload itself rather than a rule
    #[inline]
    #[must_use]
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decode(_))
    }
}
