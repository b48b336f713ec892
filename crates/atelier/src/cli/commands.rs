//! CLI command definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Atelier - Upload digital asset images to Dropbox with AI-generated marketing copy
#[derive(Parser, Debug)]
#[command(name = "atelier")]
#[command(about = "Upload asset images to Dropbox with AI-generated marketing copy", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Upload images and companion asset archives, then review the results
    Upload {
        /// Image files (jpg, jpeg, png) and companion archives (zip, sbsar)
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Destination folder in Dropbox
        #[arg(long)]
        folder: Option<String>,

        /// Print results to stdout instead of launching the review TUI
        #[arg(long)]
        no_tui: bool,
    },

    /// Obtain a long-lived Dropbox refresh token via the no-redirect OAuth2 flow
    Auth,
}
