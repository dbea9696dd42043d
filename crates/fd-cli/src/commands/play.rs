use std::io;
use std::path::Path;

use rand::rngs::OsRng;
use tracing::info;

use fd_core::{CoreError, FairRandom, MIN_DICE, Transcript, parse_dice_set};
use fd_game::{GameConfig, GameController, MatchEnd};

use crate::console::ConsoleSurface;

const USAGE_EXAMPLE: &str = "fairdice 2,2,4,4,9,9 6,8,1,1,8,6 7,5,3,7,5,3";

pub fn run(dice: &[String], seed: Option<u64>, transcript: Option<&Path>) -> Result<(), String> {
    let dice = parse_dice_set(dice).map_err(|e| match e {
        CoreError::NotEnoughDice { found, .. } => format!(
            "incorrect number of arguments: you must provide at least {MIN_DICE} dice \
             configurations, got {found}.\nExample: {USAGE_EXAMPLE}"
        ),
        other => format!("{other}\nExample: {USAGE_EXAMPLE}"),
    })?;
    info!(count = dice.len(), "dice configured");

    let config = match seed {
        Some(seed) => GameConfig::default().with_seed(seed),
        None => GameConfig::default(),
    };
    let picker = config.picker().map_err(|e| e.to_string())?;
    let surface = ConsoleSurface::new(io::stdin().lock(), io::stdout().lock());

    let mut game = GameController::new(FairRandom::new(OsRng), picker, surface, dice)
        .map_err(|e| e.to_string())?;

    match game.play().map_err(|e| e.to_string())? {
        MatchEnd::Finished(report) => {
            if let Some(path) = transcript {
                write_transcript(path, &report.transcript)?;
            }
        }
        MatchEnd::Exited(partial) => {
            if let Some(path) = transcript {
                write_transcript(path, &partial)?;
            }
        }
    }
    Ok(())
}

fn write_transcript(path: &Path, transcript: &Transcript) -> Result<(), String> {
    let json = transcript.to_json().map_err(|e| e.to_string())?;
    std::fs::write(path, json)
        .map_err(|e| format!("failed to write transcript {}: {e}", path.display()))?;
    info!(path = %path.display(), entries = transcript.len(), "transcript written");
    Ok(())
}
