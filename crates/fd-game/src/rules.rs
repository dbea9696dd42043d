//! Pure game rules: who moves first, throw combination, and the winner.

use fd_core::{Dice, FACE_COUNT};

/// One side of the match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Party {
    /// The automated player.
    Computer,
    /// The human player.
    User,
}

impl std::fmt::Display for Party {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Computer => write!(f, "computer"),
            Self::User => write!(f, "user"),
        }
    }
}

/// Who picks a die first after the user guessed the committed bit.
///
/// A correct guess gives the computer the first move; a wrong guess gives
/// it to the user.
pub fn first_mover(guess: u32, committed_bit: u32) -> Party {
    if guess == committed_bit {
        Party::Computer
    } else {
        Party::User
    }
}

/// Face index for a throw: the committed offset plus the user's addend,
/// modulo the face count.
pub fn throw_index(offset: u32, addend: u32) -> usize {
    (offset as usize + addend as usize) % FACE_COUNT
}

/// Remove the die at `index` from the pool, returning it and the rest.
///
/// # Panics
///
/// Panics if `index` is out of bounds.
pub fn take_die(mut pool: Vec<Dice>, index: usize) -> (Dice, Vec<Dice>) {
    let dice = pool.remove(index);
    (dice, pool)
}

/// Result of comparing the two throws.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The user's throw is strictly higher.
    UserWins {
        /// The user's throw.
        user: i64,
        /// The computer's throw.
        computer: i64,
    },
    /// The computer's throw is strictly higher.
    ComputerWins {
        /// The user's throw.
        user: i64,
        /// The computer's throw.
        computer: i64,
    },
    /// Both throws are equal.
    Draw {
        /// The value both sides threw.
        value: i64,
    },
}

impl Outcome {
    /// Compare the two throws.
    pub fn decide(user: i64, computer: i64) -> Self {
        match user.cmp(&computer) {
            std::cmp::Ordering::Greater => Self::UserWins { user, computer },
            std::cmp::Ordering::Less => Self::ComputerWins { user, computer },
            std::cmp::Ordering::Equal => Self::Draw { value: user },
        }
    }

    /// The winning party, if any.
    pub fn winner(&self) -> Option<Party> {
        match self {
            Self::UserWins { .. } => Some(Party::User),
            Self::ComputerWins { .. } => Some(Party::Computer),
            Self::Draw { .. } => None,
        }
    }
}
