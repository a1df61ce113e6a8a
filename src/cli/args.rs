//! CLI argument definitions using clap

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// notesmith - Turn a meeting recording into classified minutes or lab notes
#[derive(Parser, Debug)]
#[command(name = "notesmith")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Process a recording into a rendered document set
    Run(RunArgs),

    /// Run diagnostic checks for service credentials and the PDF engine
    Doctor {
        /// Emit the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommand),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: clap_complete::Shell,
    },
}

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Path to the audio recording (flac, m4a, mp3, mp4, mpeg, mpga, oga, ogg, wav, webm)
    pub audio: PathBuf,

    /// Meeting or session title
    #[arg(short, long)]
    pub title: Option<String>,

    /// Date/time of the meeting (free-form, defaults to now)
    #[arg(short, long)]
    pub date: Option<String>,

    /// Meeting location
    #[arg(short, long)]
    pub location: Option<String>,

    /// Attendee name (repeat for multiple attendees)
    #[arg(short, long = "attendee")]
    pub attendees: Vec<String>,

    /// Facilitator name
    #[arg(short, long)]
    pub facilitator: Option<String>,

    /// Note-taker name
    #[arg(short = 'n', long)]
    pub note_taker: Option<String>,

    /// Output directory (defaults to general.output_dir)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Initialize default configuration
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}
