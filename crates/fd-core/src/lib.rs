//! Core types for fairdice: dice, commitment-based fair random draws,
//! pairwise odds and match transcripts.
//!
//! Nothing here performs I/O. The secure random source is passed in by
//! the caller, so every draw can be reproduced with a seeded generator
//! in tests.

/// Six-faced dice parsed from comma-separated configurations.
pub mod dice;
/// Error types used throughout the crate.
pub mod error;
/// Fair random draws with HMAC commitments.
pub mod fair;
/// Win/loss/draw odds between dice.
pub mod odds;
/// Serializable record of revealed draws.
pub mod transcript;

pub use dice::{Dice, FACE_COUNT, MIN_DICE, parse_dice_set};
pub use error::{CoreError, CoreResult};
pub use fair::{Commitment, Draw, FairRandom, Reveal, RevealRecord, SecretKey, verify_hex};
pub use odds::{Odds, PairOdds, compare, pairwise};
pub use transcript::{Transcript, TranscriptEntry};
