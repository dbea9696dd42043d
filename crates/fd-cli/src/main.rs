//! CLI frontend for the fairdice game.

mod commands;
mod console;
mod table;

use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "fairdice",
    about = "Non-transitive dice game with verifiable fair throws",
    version,
    args_conflicts_with_subcommands = true
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    play: PlayArgs,
}

#[derive(Args)]
struct PlayArgs {
    /// Dice configurations: six comma-separated integers each, at least three dice
    #[arg(value_name = "DICE", allow_hyphen_values = true)]
    dice: Vec<String>,

    /// Seed for the computer's dice pick (fair draws always use the OS source)
    #[arg(long)]
    seed: Option<u64>,

    /// Write every commitment and reveal of the match to this JSON file
    #[arg(long)]
    transcript: Option<PathBuf>,

    /// Increase log verbosity on stderr (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a revealed key and value against a published HMAC
    Verify {
        /// Revealed key as hex
        #[arg(long, requires_all = ["value", "hmac"], conflicts_with = "transcript")]
        key: Option<String>,

        /// Revealed value
        #[arg(long)]
        value: Option<u32>,

        /// Published HMAC as hex
        #[arg(long)]
        hmac: Option<String>,

        /// Verify every entry of a transcript file instead
        #[arg(long, required_unless_present = "key")]
        transcript: Option<PathBuf>,
    },
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    // Ignore the error if a subscriber is already installed.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Verify {
            key,
            value,
            hmac,
            transcript,
        }) => {
            init_logging(0);
            match (key, value, hmac, transcript) {
                (Some(key), Some(value), Some(hmac), _) => {
                    commands::verify::run_single(&key, value, &hmac)
                }
                (_, _, _, Some(path)) => commands::verify::run_transcript(&path),
                _ => Err("verify needs --key, --value and --hmac, or --transcript".into()),
            }
        }
        None => {
            let play = cli.play;
            init_logging(play.verbose);
            if play.no_color {
                colored::control::set_override(false);
            }
            commands::play::run(&play.dice, play.seed, play.transcript.as_deref())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
