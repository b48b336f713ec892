//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the atelier binary.

mod auth;
mod commands;
mod upload;

pub use auth::handle_auth_command;
pub use commands::{Cli, Commands};
pub use upload::handle_upload_command;
