//! Terminal UI for reviewing Atelier upload results.
//!
//! Presents the processed batch as a navigable list with a detail view
//! (links, summary and the copyable HTML snippet) and a per-item status
//! feed. The pipeline has already run by the time this launches; the TUI is
//! purely a review surface.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod app;
mod events;
mod runner;
mod ui;

pub use app::{App, ViewMode};
pub use events::{Event, EventHandler};
pub use runner::run_tui;
