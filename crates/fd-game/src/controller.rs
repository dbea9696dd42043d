//! The match state machine.
//!
//! A match moves through `DeterminingFirstMove -> SelectingDice ->
//! ResolvingComputerThrow -> ResolvingUserThrow -> Done`. Every random
//! step is a fair draw whose commitment is narrated before the user is
//! asked for input, and whose reveal is narrated right after the input
//! is accepted.
//!
//! An exit request at any prompt ends the match with
//! [`MatchEnd::Exited`]; the caller decides what to do with the process.

use rand::{Rng, TryCryptoRng};
use tracing::{debug, info};

use fd_core::{
    CoreError, Dice, FACE_COUNT, FairRandom, MIN_DICE, RevealRecord, Transcript, TranscriptEntry,
};

use crate::error::GameResult;
use crate::input::{Token, parse_token};
use crate::rules::{Outcome, Party, first_mover, take_die, throw_index};
use crate::surface::{MenuKind, Narration, Surface};

const MAX_OFFSET: u32 = FACE_COUNT as u32 - 1;

/// Whether a step produced a value or the user asked to leave.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step<T> {
    /// Carry on with this value.
    Next(T),
    /// The user asked to exit.
    Exit,
}

/// Summary of a completed match.
#[derive(Debug, Clone)]
pub struct MatchReport {
    /// Who picked a die first.
    pub first_mover: Party,
    /// The computer's die.
    pub computer_dice: Dice,
    /// The user's die.
    pub user_dice: Dice,
    /// The computer's throw.
    pub computer_throw: i64,
    /// The user's throw.
    pub user_throw: i64,
    /// The comparison result.
    pub outcome: Outcome,
    /// Every revealed draw.
    pub transcript: Transcript,
}

/// How a match ended.
#[derive(Debug, Clone)]
pub enum MatchEnd {
    /// All steps were played.
    Finished(Box<MatchReport>),
    /// The user exited. Holds the draws revealed so far.
    Exited(Transcript),
}

enum Phase {
    DeterminingFirstMove {
        pool: Vec<Dice>,
    },
    SelectingDice {
        pool: Vec<Dice>,
        first: Party,
    },
    ResolvingComputerThrow {
        first: Party,
        computer: Dice,
        user: Dice,
    },
    ResolvingUserThrow {
        first: Party,
        computer: Dice,
        user: Dice,
        computer_throw: i64,
    },
    Done(Box<MatchReport>),
}

/// Runs one match between the user and the computer.
///
/// `F` is the secure source for fair draws, `P` the ordinary generator
/// for the computer's dice pick.
pub struct GameController<F, P, S> {
    fair: FairRandom<F>,
    picker: P,
    surface: S,
    dice: Vec<Dice>,
    transcript: Transcript,
}

impl<F, P, S> GameController<F, P, S>
where
    F: TryCryptoRng,
    P: Rng,
    S: Surface,
{
    /// Create a controller for a validated dice set.
    pub fn new(fair: FairRandom<F>, picker: P, surface: S, dice: Vec<Dice>) -> GameResult<Self> {
        if dice.len() < MIN_DICE {
            return Err(CoreError::NotEnoughDice {
                found: dice.len(),
                required: MIN_DICE,
            }
            .into());
        }
        Ok(Self {
            fair,
            picker,
            surface,
            dice,
            transcript: Transcript::new(),
        })
    }

    /// The surface, for inspection after a match.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Play the match to the end or until the user exits.
    pub fn play(&mut self) -> GameResult<MatchEnd> {
        self.transcript = Transcript::new();
        let mut phase = Phase::DeterminingFirstMove {
            pool: self.dice.clone(),
        };
        loop {
            phase = match phase {
                Phase::DeterminingFirstMove { pool } => match self.determine_first_move()? {
                    Step::Next(first) => Phase::SelectingDice { pool, first },
                    Step::Exit => return self.exit(),
                },
                Phase::SelectingDice { pool, first } => match self.select_dice(pool, first)? {
                    Step::Next((computer, user)) => Phase::ResolvingComputerThrow {
                        first,
                        computer,
                        user,
                    },
                    Step::Exit => return self.exit(),
                },
                Phase::ResolvingComputerThrow {
                    first,
                    computer,
                    user,
                } => match self.resolve_throw(Party::Computer, &computer)? {
                    Step::Next(computer_throw) => Phase::ResolvingUserThrow {
                        first,
                        computer,
                        user,
                        computer_throw,
                    },
                    Step::Exit => return self.exit(),
                },
                Phase::ResolvingUserThrow {
                    first,
                    computer,
                    user,
                    computer_throw,
                } => match self.resolve_throw(Party::User, &user)? {
                    Step::Next(user_throw) => {
                        let outcome = Outcome::decide(user_throw, computer_throw);
                        Phase::Done(Box::new(MatchReport {
                            first_mover: first,
                            computer_dice: computer,
                            user_dice: user,
                            computer_throw,
                            user_throw,
                            outcome,
                            transcript: std::mem::take(&mut self.transcript),
                        }))
                    }
                    Step::Exit => return self.exit(),
                },
                Phase::Done(report) => {
                    info!(
                        outcome = ?report.outcome,
                        winner = ?report.outcome.winner(),
                        "match finished"
                    );
                    self.surface.narrate(Narration::Outcome(report.outcome))?;
                    return Ok(MatchEnd::Finished(report));
                }
            };
        }
    }

    fn exit(&mut self) -> GameResult<MatchEnd> {
        info!("user exited the match");
        self.surface.narrate(Narration::Exiting)?;
        Ok(MatchEnd::Exited(std::mem::take(&mut self.transcript)))
    }

    fn determine_first_move(&mut self) -> GameResult<Step<Party>> {
        self.surface.narrate(Narration::FirstMoveIntro)?;
        let draw = self.fair.draw(1)?;
        self.surface.narrate(Narration::Committed {
            max: draw.max(),
            commitment: draw.commitment(),
        })?;

        let options = numbered(2);
        let guess = match self.prompt(MenuKind::GuessBit, &options)? {
            Step::Next(guess) => guess as u32,
            Step::Exit => return Ok(Step::Exit),
        };

        let commitment = *draw.commitment();
        let reveal = draw.reveal();
        self.surface
            .narrate(Narration::GuessRevealed { reveal: &reveal })?;

        let first = first_mover(guess, reveal.value());
        info!(%first, "first move determined");
        self.transcript.record(TranscriptEntry {
            label: "first-move".into(),
            reveal: RevealRecord::new(&commitment, &reveal),
            user_input: guess,
            result: i64::from(guess == reveal.value()),
        });
        Ok(Step::Next(first))
    }

    /// Returns `(computer, user)` dice.
    fn select_dice(&mut self, pool: Vec<Dice>, first: Party) -> GameResult<Step<(Dice, Dice)>> {
        match first {
            Party::Computer => {
                let (computer, pool) = self.computer_pick(pool);
                self.surface.narrate(Narration::DiceChosen {
                    party: Party::Computer,
                    dice: &computer,
                    first: true,
                })?;
                let Step::Next((user, _)) = self.user_pick(pool)? else {
                    return Ok(Step::Exit);
                };
                self.surface.narrate(Narration::DiceChosen {
                    party: Party::User,
                    dice: &user,
                    first: false,
                })?;
                Ok(Step::Next((computer, user)))
            }
            Party::User => {
                let Step::Next((user, pool)) = self.user_pick(pool)? else {
                    return Ok(Step::Exit);
                };
                self.surface.narrate(Narration::DiceChosen {
                    party: Party::User,
                    dice: &user,
                    first: true,
                })?;
                let (computer, _) = self.computer_pick(pool);
                self.surface.narrate(Narration::DiceChosen {
                    party: Party::Computer,
                    dice: &computer,
                    first: false,
                })?;
                Ok(Step::Next((computer, user)))
            }
        }
    }

    fn computer_pick(&mut self, pool: Vec<Dice>) -> (Dice, Vec<Dice>) {
        let index = self.picker.random_range(0..pool.len());
        debug!(index, remaining = pool.len(), "computer picks a die");
        take_die(pool, index)
    }

    fn user_pick(&mut self, pool: Vec<Dice>) -> GameResult<Step<(Dice, Vec<Dice>)>> {
        let options: Vec<String> = pool.iter().map(Dice::to_string).collect();
        match self.prompt(MenuKind::ChooseDice, &options)? {
            Step::Next(index) => {
                debug!(index, remaining = pool.len(), "user picks a die");
                Ok(Step::Next(take_die(pool, index)))
            }
            Step::Exit => Ok(Step::Exit),
        }
    }

    fn resolve_throw(&mut self, party: Party, dice: &Dice) -> GameResult<Step<i64>> {
        self.surface.narrate(Narration::ThrowStart { party })?;
        let draw = self.fair.draw(MAX_OFFSET)?;
        self.surface.narrate(Narration::Committed {
            max: draw.max(),
            commitment: draw.commitment(),
        })?;

        let options = numbered(FACE_COUNT);
        let addend = match self.prompt(MenuKind::AddNumber, &options)? {
            Step::Next(addend) => addend as u32,
            Step::Exit => return Ok(Step::Exit),
        };

        let commitment = *draw.commitment();
        let reveal = draw.reveal();
        self.surface
            .narrate(Narration::ThrowRevealed { reveal: &reveal })?;

        let index = throw_index(reveal.value(), addend);
        self.surface.narrate(Narration::ThrowCombined {
            offset: reveal.value(),
            addend,
            index,
        })?;
        let value = dice.face(index);
        self.surface
            .narrate(Narration::ThrowValue { party, value })?;
        info!(%party, value, "throw resolved");

        self.transcript.record(TranscriptEntry {
            label: format!("{party}-throw"),
            reveal: RevealRecord::new(&commitment, &reveal),
            user_input: addend,
            result: value,
        });
        Ok(Step::Next(value))
    }

    /// Show a menu and read until a valid choice or an exit request.
    ///
    /// Invalid input and help requests never leave this loop.
    fn prompt(&mut self, kind: MenuKind, options: &[String]) -> GameResult<Step<usize>> {
        self.surface.narrate(Narration::Menu { kind, options })?;
        loop {
            let Some(line) = self.surface.read_choice()? else {
                debug!("input exhausted");
                return Ok(Step::Exit);
            };
            match parse_token(&line, options.len()) {
                Token::Choice(n) => return Ok(Step::Next(n)),
                Token::Exit => return Ok(Step::Exit),
                Token::Help => {
                    self.surface.show_help(&self.dice)?;
                    self.surface.narrate(Narration::Menu { kind, options })?;
                }
                Token::Invalid(reason) => {
                    self.surface.narrate(Narration::Invalid { reason: &reason })?;
                }
            }
        }
    }
}

fn numbered(count: usize) -> Vec<String> {
    (0..count).map(|i| i.to_string()).collect()
}
