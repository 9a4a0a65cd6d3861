//! Command-line interface definitions for atelier

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Rendering context for the render command
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum RenderModeArg {
    /// Public reading view: dangling image tokens are dropped
    Reading,
    /// Authoring preview: dangling image tokens show a placeholder
    Preview,
}

/// CLI structure for the atelier application
#[derive(Parser)]
#[command(name = "atelier")]
#[command(version)]
#[command(about = "Course chapter authoring tool", long_about = None)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands for atelier
#[derive(Subcommand)]
pub enum Commands {
    /// Render a course document to a single HTML page
    Render {
        /// Course document (JSON file)
        input: PathBuf,

        /// Output HTML file path
        #[arg(short, long, default_value = "course.html")]
        output: PathBuf,

        /// Rendering context
        #[arg(short, long, value_enum, default_value = "reading")]
        mode: RenderModeArg,

        /// Static-asset base path for server-side attachments
        /// (overrides atelier.toml)
        #[arg(long)]
        asset_base: Option<String>,

        /// Path to atelier.toml
        #[arg(short, long, default_value = "atelier.toml")]
        config: PathBuf,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Check a course document for dangling image tokens
    Validate {
        /// Course document (JSON file)
        input: PathBuf,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Push a course document to the backend (whole-document replace)
    Push {
        /// Course document (JSON file)
        input: PathBuf,

        /// Path to atelier.toml
        #[arg(short, long, default_value = "atelier.toml")]
        config: PathBuf,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}
