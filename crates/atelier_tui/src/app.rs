//! Application state and core TUI types.

use atelier_core::{ProcessingResult, SessionContext};

/// Which view is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ViewMode {
    /// List view - browse processed items
    List,
    /// Detail view - links, summary and snippet for one item
    Detail,
    /// Status view - the per-item progress feed
    Status,
}

/// Main application state.
pub struct App {
    /// Current view
    pub mode: ViewMode,
    /// Processed results, in pipeline order
    pub results: Vec<ProcessingResult>,
    /// Session context holding the status logs
    pub session: SessionContext,
    /// Currently selected index in the list
    pub selected_index: usize,
    /// Vertical scroll offset in the detail view
    pub detail_scroll: u16,
    /// Status message to display
    pub status_message: String,
    /// Whether to quit the application
    pub should_quit: bool,
}

impl App {
    /// Create a new App over the processed batch.
    pub fn new(results: Vec<ProcessingResult>, session: SessionContext) -> Self {
        Self {
            mode: ViewMode::List,
            results,
            session,
            selected_index: 0,
            detail_scroll: 0,
            status_message: String::from("Enter: detail | Tab: status | q: quit"),
            should_quit: false,
        }
    }

    /// Currently selected result, if any.
    pub fn selected(&self) -> Option<&ProcessingResult> {
        self.results.get(self.selected_index)
    }

    /// Move selection up.
    pub fn select_previous(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
            self.detail_scroll = 0;
        }
    }

    /// Move selection down.
    pub fn select_next(&mut self) {
        if self.selected_index < self.results.len().saturating_sub(1) {
            self.selected_index += 1;
            self.detail_scroll = 0;
        }
    }

    /// Enter the detail view for the selected item.
    pub fn enter_detail(&mut self) {
        if self.selected().is_some() {
            self.mode = ViewMode::Detail;
            self.detail_scroll = 0;
        }
    }

    /// Toggle the status-feed view.
    pub fn toggle_status(&mut self) {
        self.mode = match self.mode {
            ViewMode::Status => ViewMode::List,
            _ => ViewMode::Status,
        };
    }

    /// Return to the list view.
    pub fn return_to_list(&mut self) {
        self.mode = ViewMode::List;
    }

    /// Scroll the detail view.
    pub fn scroll_detail(&mut self, delta: i16) {
        self.detail_scroll = self.detail_scroll.saturating_add_signed(delta);
    }

    /// Quit on the next tick.
    pub fn quit(&mut self) {
        self.should_quit = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(stem: &str) -> ProcessingResult {
        ProcessingResult {
            stem: stem.to_string(),
            file_name: format!("{stem}.png"),
            width: 10,
            height: 10,
            format: "png".into(),
            display_url: String::new(),
            download_url: String::new(),
            thumb_jpeg_url: String::new(),
            thumb_webp_url: String::new(),
            alpha_thumb_url: None,
            summary: String::new(),
            asset_url: None,
        }
    }

    #[test]
    fn selection_stays_in_bounds() {
        let mut app = App::new(vec![result("a"), result("b")], SessionContext::new());
        app.select_previous();
        assert_eq!(app.selected_index, 0);
        app.select_next();
        app.select_next();
        assert_eq!(app.selected_index, 1);
    }

    #[test]
    fn detail_requires_a_selection() {
        let mut app = App::new(Vec::new(), SessionContext::new());
        app.enter_detail();
        assert_eq!(app.mode, ViewMode::List);
    }

    #[test]
    fn status_view_toggles() {
        let mut app = App::new(vec![result("a")], SessionContext::new());
        app.toggle_status();
        assert_eq!(app.mode, ViewMode::Status);
        app.toggle_status();
        assert_eq!(app.mode, ViewMode::List);
    }
}
