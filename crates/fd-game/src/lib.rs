//! Turn and throw state machine for fairdice.
//!
//! A match is played between the user and the computer over a shared
//! dice set. The first move and both throws are fair draws combined with
//! a number the user picks after seeing the commitment.

/// Match configuration.
pub mod config;
/// The match state machine.
pub mod controller;
/// Error types used throughout the crate.
pub mod error;
/// Parsing of answers at a choice prompt.
pub mod input;
/// First move, throw combination, and winner rules.
pub mod rules;
/// Narration events and the input/output boundary.
pub mod surface;

pub use config::GameConfig;
pub use controller::{GameController, MatchEnd, MatchReport, Step};
pub use error::{GameError, GameResult};
pub use input::{Token, parse_token};
pub use rules::{Outcome, Party, first_mover, take_die, throw_index};
pub use surface::{MenuKind, Narration, Surface};
