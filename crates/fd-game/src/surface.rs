//! The boundary between the match and whoever is playing it.
//!
//! The controller emits [`Narration`] events and reads raw lines; a
//! surface decides how they look. The CLI renders them to the terminal,
//! tests record them.

use fd_core::{Commitment, Dice, Reveal};

use crate::error::GameResult;
use crate::rules::{Outcome, Party};

/// Which question a menu asks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuKind {
    /// Guess the committed bit.
    GuessBit,
    /// Pick a die from the pool.
    ChooseDice,
    /// Pick a number to add to the committed offset.
    AddNumber,
}

/// Something that happened in the match and should be shown.
#[derive(Debug, Clone, Copy)]
pub enum Narration<'a> {
    /// The first-move draw is about to start.
    FirstMoveIntro,
    /// A fair draw was committed. Always shown before the matching prompt.
    Committed {
        /// Upper bound of the drawn range.
        max: u32,
        /// The published commitment.
        commitment: &'a Commitment,
    },
    /// A menu of numbered options.
    Menu {
        /// What is being asked.
        kind: MenuKind,
        /// Option labels, numbered from zero.
        options: &'a [String],
    },
    /// The last input was rejected.
    Invalid {
        /// Why.
        reason: &'a str,
    },
    /// The first-move draw was opened after the guess.
    GuessRevealed {
        /// The opened draw.
        reveal: &'a Reveal,
    },
    /// A party took a die.
    DiceChosen {
        /// Who chose.
        party: Party,
        /// The die taken.
        dice: &'a Dice,
        /// Whether this was the first pick of the match.
        first: bool,
    },
    /// A party's throw starts.
    ThrowStart {
        /// Whose throw.
        party: Party,
    },
    /// A throw draw was opened after the user's addend.
    ThrowRevealed {
        /// The opened draw.
        reveal: &'a Reveal,
    },
    /// How the face index was combined.
    ThrowCombined {
        /// The committed offset.
        offset: u32,
        /// The user's addend.
        addend: u32,
        /// The resulting face index.
        index: usize,
    },
    /// The face value a party threw.
    ThrowValue {
        /// Whose throw.
        party: Party,
        /// The face value.
        value: i64,
    },
    /// The match result.
    Outcome(Outcome),
    /// The user asked to leave.
    Exiting,
}

/// Input and output for one match.
pub trait Surface {
    /// Show a narration event.
    fn narrate(&mut self, narration: Narration<'_>) -> GameResult<()>;

    /// Read one answer. `None` means the input is exhausted.
    fn read_choice(&mut self) -> GameResult<Option<String>>;

    /// Show the help text and the odds table for `dice`.
    fn show_help(&mut self, dice: &[Dice]) -> GameResult<()>;
}
