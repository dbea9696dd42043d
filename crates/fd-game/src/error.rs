//! Error types for the game layer.

use thiserror::Error;

use fd_core::CoreError;

/// Result type for game operations.
pub type GameResult<T> = Result<T, GameError>;

/// Errors that end a match early.
///
/// Invalid player input is not an error; it is handled inside the prompt
/// loop that read it.
#[derive(Debug, Error)]
pub enum GameError {
    /// Dice configuration or fair random source failure.
    #[error("{0}")]
    Core(#[from] CoreError),

    /// Reading input or writing narration failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
