//! Error types for dice parsing and fair random draws.

/// Errors that can occur in the core layer.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A die configuration did not contain exactly the required number of faces.
    #[error("each dice must have exactly {expected} integers, got {found}")]
    InvalidFaceCount {
        /// Number of faces a die must have.
        expected: usize,
        /// Number of faces that were supplied.
        found: usize,
    },

    /// A face token could not be parsed as an integer.
    #[error("invalid face value: \"{0}\"")]
    InvalidFace(String),

    /// Fewer dice were configured than a match needs.
    #[error("at least {required} dice configurations are required, got {found}")]
    NotEnoughDice {
        /// Number of dice that were supplied.
        found: usize,
        /// Minimum number of dice.
        required: usize,
    },

    /// The secure entropy source failed. There is no fallback.
    #[error("secure random source failed: {0}")]
    Entropy(String),

    /// A key could not be used to initialise the keyed hash.
    #[error("invalid commitment key")]
    InvalidKey,

    /// A hex-encoded key or digest was malformed.
    #[error("invalid hex: {0}")]
    InvalidHex(String),

    /// A transcript could not be serialized or parsed.
    #[error("transcript error: {0}")]
    Transcript(#[from] serde_json::Error),
}

/// Convenience result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;
