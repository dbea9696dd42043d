//! Parsing of player input at a choice prompt.

/// A parsed answer to a choice prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// A valid option index.
    Choice(usize),
    /// `x` or `X`: leave the game.
    Exit,
    /// `?`: show the odds table and ask again.
    Help,
    /// Anything else, with a message for the player.
    Invalid(String),
}

/// Parse one line of input against a menu with `options` numbered entries.
///
/// Surrounding whitespace is ignored. Valid choices are `0..options`.
pub fn parse_token(input: &str, options: usize) -> Token {
    let input = input.trim();
    match input {
        "x" | "X" => Token::Exit,
        "?" => Token::Help,
        _ => match input.parse::<usize>() {
            Ok(n) if n < options => Token::Choice(n),
            _ if options == 0 => Token::Invalid("There is nothing to choose.".into()),
            _ => Token::Invalid(format!(
                "Invalid selection. Please enter a number from 0 to {}, X or ?.",
                options - 1
            )),
        },
    }
}
