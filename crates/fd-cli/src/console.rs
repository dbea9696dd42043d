//! Terminal rendering of a match.

use std::io::{BufRead, Write};

use colored::Colorize;

use fd_core::Dice;
use fd_game::{GameResult, MenuKind, Narration, Outcome, Party, Surface};

use crate::table::odds_table;

/// Plays a match over a line-based reader and a writer.
pub struct ConsoleSurface<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> ConsoleSurface<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> Surface for ConsoleSurface<R, W> {
    fn narrate(&mut self, narration: Narration<'_>) -> GameResult<()> {
        let out = &mut self.output;
        match narration {
            Narration::FirstMoveIntro => {
                writeln!(out, "Let's determine who makes the first move.")?;
            }
            Narration::Committed { max, commitment } => {
                writeln!(
                    out,
                    "I selected a random value in the range 0..{max} (HMAC={}).",
                    commitment.to_hex().cyan()
                )?;
            }
            Narration::Menu { kind, options } => {
                let title = match kind {
                    MenuKind::GuessBit => "Try to guess my selection.",
                    MenuKind::ChooseDice => "Choose your dice:",
                    MenuKind::AddNumber => "Add your number modulo 6.",
                };
                writeln!(out, "{title}")?;
                for (i, option) in options.iter().enumerate() {
                    writeln!(out, "{i} - {option}")?;
                }
                writeln!(out, "X - exit")?;
                writeln!(out, "? - help")?;
            }
            Narration::Invalid { reason } => {
                writeln!(out, "{}", reason.yellow())?;
            }
            Narration::GuessRevealed { reveal } => {
                writeln!(
                    out,
                    "My selection: {} (KEY={}).",
                    reveal.value(),
                    reveal.key().to_hex().cyan()
                )?;
            }
            Narration::DiceChosen { party, dice, first } => {
                match (party, first) {
                    (Party::Computer, true) => {
                        writeln!(out, "I make the first move and choose the {dice} dice.")?
                    }
                    (Party::Computer, false) => writeln!(out, "I choose the {dice} dice.")?,
                    (Party::User, true) => {
                        writeln!(out, "You make the first move and choose the {dice} dice.")?
                    }
                    (Party::User, false) => writeln!(out, "You choose the {dice} dice.")?,
                }
            }
            Narration::ThrowStart { party } => {
                let whose = match party {
                    Party::Computer => "my",
                    Party::User => "your",
                };
                writeln!(out, "It's time for {whose} throw.")?;
            }
            Narration::ThrowRevealed { reveal } => {
                writeln!(
                    out,
                    "My number is {} (KEY={}).",
                    reveal.value(),
                    reveal.key().to_hex().cyan()
                )?;
            }
            Narration::ThrowCombined {
                offset,
                addend,
                index,
            } => {
                writeln!(out, "The result is {offset} + {addend} = {index} (mod 6).")?;
            }
            Narration::ThrowValue { party, value } => {
                let whose = match party {
                    Party::Computer => "My",
                    Party::User => "Your",
                };
                writeln!(out, "{whose} throw is {}.", value.to_string().bold())?;
            }
            Narration::Outcome(outcome) => {
                let line = match outcome {
                    Outcome::UserWins { user, computer } => {
                        format!("You win! ({user} > {computer})").green()
                    }
                    Outcome::ComputerWins { user, computer } => {
                        format!("I win! ({user} < {computer})").red()
                    }
                    Outcome::Draw { value } => {
                        format!("It's a draw! ({value} = {value})").normal()
                    }
                };
                writeln!(out, "{}", line.bold())?;
            }
            Narration::Exiting => {
                writeln!(out, "Exiting...")?;
            }
        }
        Ok(())
    }

    fn read_choice(&mut self) -> GameResult<Option<String>> {
        write!(self.output, "Your selection: ")?;
        self.output.flush()?;

        // Non-UTF-8 bytes become U+FFFD and fail token parsing like any other junk.
        let mut line = Vec::new();
        match self.input.read_until(b'\n', &mut line)? {
            0 => Ok(None),
            _ => Ok(Some(String::from_utf8_lossy(&line).into_owned())),
        }
    }

    fn show_help(&mut self, dice: &[Dice]) -> GameResult<()> {
        writeln!(self.output, "Help: This is a non-transitive dice game.")?;
        writeln!(
            self.output,
            "Each throw adds your number to mine modulo 6, so neither of us controls the face."
        )?;
        writeln!(
            self.output,
            "The table below shows the probabilities of winning for each pair of dice:"
        )?;
        writeln!(self.output, "{}", odds_table(dice))?;
        Ok(())
    }
}
