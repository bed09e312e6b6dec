//! # Suited CLI Library
//!
//! Command-line front end for the suited Hold'em rules engine: inspect the
//! configuration, deal and evaluate hands, and run seeded simulations that
//! write JSONL hand histories.
//!
//! ## Main Entry Point
//!
//! The primary entry point is the [`run`] function, which parses command-line arguments
//! and executes the appropriate subcommand.
//!
//! ## Example Usage
//!
//! ```no_run
//! use std::io;
//! let args = vec!["suited", "sim", "--hands", "10", "--seed", "1"];
//! let code = suited_cli::run(args, &mut io::stdout(), &mut io::stderr());
//! assert_eq!(code, 0);
//! ```
//!
//! ## Available Subcommands
//!
//! - `cfg`: Display current configuration settings
//! - `deal`: Play a single passive hand for inspection
//! - `eval`: Evaluate a set of cards
//! - `sim`: Run seeded simulations and generate hand histories

use clap::Parser;
use std::io::Write;
pub mod cli;
mod commands;
pub mod config;
mod error;
pub mod logging;
pub mod ui;

use cli::{Commands, SuitedCli};
use commands::{handle_cfg_command, handle_deal_command, handle_eval_command, handle_sim_command};

pub use error::CliError;

const COMMANDS: &[&str] = &["cfg", "deal", "eval", "sim"];

/// Main entry point for the CLI application.
///
/// Parses command-line arguments and dispatches to the appropriate subcommand handler.
///
/// # Arguments
///
/// * `args` - Iterator over command-line arguments (typically `std::env::args()`)
/// * `out` - Output stream for normal output (typically `stdout`)
/// * `err` - Output stream for error messages (typically `stderr`)
///
/// # Returns
///
/// Exit code: `0` for success, `2` for errors
///
/// # Example
///
/// ```
/// use std::io;
/// let args = vec!["suited", "eval", "As", "Ks", "Qs", "Js", "Ts"];
/// let mut out = Vec::new();
/// let code = suited_cli::run(args, &mut out, &mut io::stderr());
/// assert_eq!(code, 0);
/// assert!(String::from_utf8(out).unwrap().contains("Royal flush"));
/// ```
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let parsed = SuitedCli::try_parse_from(&argv);
    match parsed {
        Err(e) => {
            use clap::error::ErrorKind;

            // Help and version should print to stdout and exit 0
            match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                    if write!(out, "{}", e).is_err() {
                        return 2;
                    }
                    0
                }
                _ => {
                    if write_usage(err, &e.to_string()).is_err() {
                        return 2;
                    }
                    2
                }
            }
        }
        Ok(cli) => {
            let result = match cli.cmd {
                Commands::Cfg => handle_cfg_command(out, err),
                Commands::Deal { seed, players } => {
                    handle_deal_command(seed, players.map(usize::from), out)
                }
                Commands::Eval { cards } => handle_eval_command(&cards, out),
                Commands::Sim {
                    hands,
                    seed,
                    players,
                    output,
                } => handle_sim_command(hands, seed, players.map(usize::from), output, out, err),
            };
            match result {
                Ok(()) => 0,
                Err(e) => {
                    tracing::debug!(error = ?e, "command failed");
                    let _ = ui::write_error(err, &e.to_string());
                    2
                }
            }
        }
    }
}

fn write_usage(err: &mut dyn Write, clap_message: &str) -> std::io::Result<()> {
    // Print clap error first
    writeln!(err, "{}", clap_message)?;
    writeln!(err)?;
    writeln!(err, "Suited Hold'em CLI")?;
    writeln!(err, "Usage: suited <command> [options]\n")?;
    writeln!(err, "Commands:")?;
    for c in COMMANDS {
        writeln!(err, "  {}", c)?;
    }
    writeln!(err, "\nFor full help, run: suited --help")
}
