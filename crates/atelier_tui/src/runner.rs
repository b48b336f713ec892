//! TUI runner - terminal lifecycle and main loop.

use crate::{App, Event, EventHandler, ViewMode};
use atelier_core::{ProcessingResult, SessionContext};
use atelier_error::{AtelierResult, TuiError, TuiErrorKind};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;

/// Run the review TUI over a processed batch.
pub fn run_tui(results: Vec<ProcessingResult>, session: SessionContext) -> AtelierResult<()> {
    enable_raw_mode().map_err(|e| {
        TuiError::new(TuiErrorKind::TerminalSetup(format!(
            "Failed to enable raw mode: {e}"
        )))
    })?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture).map_err(|e| {
        TuiError::new(TuiErrorKind::TerminalSetup(format!(
            "Failed to setup terminal: {e}"
        )))
    })?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).map_err(|e| {
        TuiError::new(TuiErrorKind::TerminalSetup(format!(
            "Failed to create terminal: {e}"
        )))
    })?;

    let mut app = App::new(results, session);
    let events = EventHandler::new(250);

    while !app.should_quit {
        terminal
            .draw(|f| crate::ui::draw(f, &app))
            .map_err(|e| TuiError::new(TuiErrorKind::Rendering(format!("Failed to draw: {e}"))))?;

        if let Ok(Some(event)) = events.next() {
            handle_event(&mut app, event);
        }
    }

    disable_raw_mode().map_err(|e| {
        TuiError::new(TuiErrorKind::TerminalRestore(format!(
            "Failed to disable raw mode: {e}"
        )))
    })?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .map_err(|e| {
        TuiError::new(TuiErrorKind::TerminalRestore(format!(
            "Failed to cleanup terminal: {e}"
        )))
    })?;
    terminal.show_cursor().map_err(|e| {
        TuiError::new(TuiErrorKind::TerminalRestore(format!(
            "Failed to show cursor: {e}"
        )))
    })?;

    Ok(())
}

/// Handle a single event.
fn handle_event(app: &mut App, event: Event) {
    use crossterm::event::{KeyCode, KeyModifiers};

    match event {
        Event::Key(key) => match key.code {
            KeyCode::Char('q') => app.quit(),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => app.quit(),
            KeyCode::Esc => match app.mode {
                ViewMode::List => app.quit(),
                _ => app.return_to_list(),
            },
            KeyCode::Up | KeyCode::Char('k') => match app.mode {
                ViewMode::Detail => app.scroll_detail(-1),
                _ => app.select_previous(),
            },
            KeyCode::Down | KeyCode::Char('j') => match app.mode {
                ViewMode::Detail => app.scroll_detail(1),
                _ => app.select_next(),
            },
            KeyCode::Enter => app.enter_detail(),
            KeyCode::Tab => app.toggle_status(),
            _ => {}
        },
        Event::Tick => {}
    }
}
