//! Command-line surface.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "star-board", version, about = "Reward chart for tracking a child's stars")]
pub struct Cli {
    /// Data directory (overrides STAR_BOARD_DATA_DIR and the default location)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show the balance, next reward and star grid
    Status,
    /// Add one star
    AddStar,
    /// Quick actions that award stars
    Quick {
        #[command(subcommand)]
        action: QuickCommand,
    },
    /// Reward catalog
    Rewards {
        #[command(subcommand)]
        action: RewardsCommand,
    },
    /// Spend stars on a reward
    Redeem {
        /// Reward id
        id: String,
    },
    /// Show the action and redemption logs
    History {
        /// Only show the most recent entries of each log
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Sound effects
    Sound {
        #[command(subcommand)]
        action: SoundCommand,
    },
    /// Write a JSON backup of the whole board
    Export {
        /// Output file (defaults to the configured backup file name)
        path: Option<PathBuf>,
    },
    /// Write the action and redemption logs as CSV
    ExportHistory {
        /// Output file
        path: PathBuf,
    },
    /// Parent-only settings (PIN required)
    Parent(ParentArgs),
}

#[derive(Debug, Subcommand)]
pub enum QuickCommand {
    /// List quick actions
    List,
    /// Award the stars of a quick action
    Award {
        /// Quick action id
        id: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum RewardsCommand {
    /// List rewards, cheapest first
    List,
}

#[derive(Debug, Subcommand)]
pub enum SoundCommand {
    /// Turn sound effects on or off
    Toggle,
}

#[derive(Debug, Args)]
pub struct ParentArgs {
    /// Parent PIN
    #[arg(long)]
    pub pin: String,

    #[command(subcommand)]
    pub action: ParentCommand,
}

#[derive(Debug, Subcommand)]
pub enum ParentCommand {
    /// Change the child's name
    Rename { name: String },
    /// Change the parent PIN
    SetPin { new_pin: String },
    /// Edit the reward catalog
    Reward {
        #[command(subcommand)]
        action: ParentRewardCommand,
    },
    /// Edit quick actions
    Quick {
        #[command(subcommand)]
        action: ParentQuickCommand,
    },
    /// Add or remove stars by hand
    Adjust {
        #[arg(allow_negative_numbers = true)]
        amount: i64,
        /// Logged description
        #[arg(default_value = "")]
        reason: String,
    },
    /// Replace the board with a JSON backup
    Import { path: PathBuf },
    /// Start over from the default board
    Reset,
}

#[derive(Debug, Subcommand)]
pub enum ParentRewardCommand {
    Add {
        name: String,
        #[arg(allow_negative_numbers = true)]
        cost: i64,
    },
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long, allow_negative_numbers = true)]
        cost: Option<i64>,
    },
    Remove { id: String },
}

#[derive(Debug, Subcommand)]
pub enum ParentQuickCommand {
    Add {
        emoji: String,
        name: String,
        #[arg(allow_negative_numbers = true)]
        stars: i64,
    },
    Update {
        id: String,
        #[arg(long)]
        emoji: Option<String>,
        #[arg(long)]
        name: Option<String>,
        #[arg(long, allow_negative_numbers = true)]
        stars: Option<i64>,
    },
    Remove { id: String },
}
