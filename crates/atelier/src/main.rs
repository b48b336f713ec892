//! Atelier CLI binary.
//!
//! This binary provides command-line access to Atelier's functionality:
//! - Upload asset images and companion archives to Dropbox
//! - Review processed items (links, thumbnails, marketing copy) in a TUI
//! - Bootstrap a long-lived Dropbox refresh token

use clap::Parser;

mod cli;
mod config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{Cli, Commands, handle_auth_command, handle_upload_command};

    // Load .env before reading any configuration
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();

    // Initialize tracing
    let log_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .init();

    // Execute the requested command
    match cli.command {
        Commands::Upload {
            files,
            folder,
            no_tui,
        } => {
            handle_upload_command(files, folder, no_tui).await?;
        }

        Commands::Auth => {
            handle_auth_command().await?;
        }
    }

    Ok(())
}
