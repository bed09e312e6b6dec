//! Command-line argument definitions.

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "suited", version, about = "Texas Hold'em table rules engine")]
pub struct SuitedCli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the resolved configuration and where each value came from
    Cfg,
    /// Play one passive hand (everyone checks or calls) and print it
    Deal {
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, value_parser = clap::value_parser!(u8).range(2..=9))]
        players: Option<u8>,
    },
    /// Evaluate the best five-card hand among 5 to 7 cards
    Eval {
        /// Cards in short notation, e.g. `As Kd 7c 7h 2s`
        #[arg(required = true, num_args = 1..)]
        cards: Vec<String>,
    },
    /// Play seeded random-policy hands and record them as JSON lines
    Sim {
        #[arg(long)]
        hands: u64,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, value_parser = clap::value_parser!(u8).range(2..=9))]
        players: Option<u8>,
        #[arg(long)]
        output: Option<String>,
    },
}
