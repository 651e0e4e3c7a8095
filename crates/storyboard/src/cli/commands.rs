//! CLI command definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use storyboard::{ArtStyle, Resolution};

/// Storyboard - turn a script into illustrated panels with Gemini
#[derive(Parser, Debug)]
#[command(name = "storyboard")]
#[command(about = "Turn a script into storyboard panels with Gemini", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file layered over the defaults
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Break a script into scenes and print them
    Analyze {
        /// Path to the script text file
        script: PathBuf,

        /// Print the storyboard as JSON
        #[arg(long)]
        json: bool,
    },

    /// Analyze a script and render its panels
    Generate {
        /// Path to the script text file
        script: PathBuf,

        /// Directory the panels are written to
        #[arg(short, long, value_name = "DIR")]
        out: PathBuf,

        /// Resolution tier (1K, 2K, 4K)
        #[arg(long)]
        resolution: Option<Resolution>,

        /// Art style, e.g. "Comic Book"
        #[arg(long)]
        style: Option<ArtStyle>,

        /// Render only the scene at this position (1-based)
        #[arg(long, value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
        scene: Option<u32>,
    },

    /// Talk to the creative assistant
    Chat,

    /// List resolution tiers and art styles
    Styles,
}
