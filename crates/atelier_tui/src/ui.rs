//! UI rendering for the review TUI.

use crate::app::{App, ViewMode};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph, Row, Table, Wrap},
};

/// Draw the main UI.
pub fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Main content
            Constraint::Length(3), // Status bar
        ])
        .split(f.area());

    draw_header(f, app, chunks[0]);

    match app.mode {
        ViewMode::List => draw_list_view(f, app, chunks[1]),
        ViewMode::Detail => draw_detail_view(f, app, chunks[1]),
        ViewMode::Status => draw_status_view(f, app, chunks[1]),
    }

    draw_status_bar(f, app, chunks[2]);
}

fn draw_header(f: &mut Frame, app: &App, area: ratatui::layout::Rect) {
    let title = format!("Atelier Upload Review - {} item(s)", app.results.len());
    let header = Paragraph::new(title)
        .block(Block::default().borders(Borders::ALL))
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center);
    f.render_widget(header, area);
}

fn draw_status_bar(f: &mut Frame, app: &App, area: ratatui::layout::Rect) {
    let help_text = match app.mode {
        ViewMode::List => "↑↓: Navigate | Enter: Detail | Tab: Status feed | Q: Quit",
        ViewMode::Detail => "↑↓: Scroll | Esc: Back | Q: Quit",
        ViewMode::Status => "↑↓: Navigate | Tab/Esc: Back | Q: Quit",
    };
    let status_text = format!("{} | {}", app.status_message, help_text);
    let status = Paragraph::new(status_text)
        .block(Block::default().borders(Borders::ALL))
        .style(Style::default().fg(Color::Gray));
    f.render_widget(status, area);
}

fn draw_list_view(f: &mut Frame, app: &App, area: ratatui::layout::Rect) {
    let header = Row::new(vec!["Title", "Size", "Format", "Asset", "Alpha", "Summary"])
        .style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .bottom_margin(1);

    let rows: Vec<Row> = app
        .results
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let style = if i == app.selected_index {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };

            let summary_preview: String = item.summary.chars().take(40).collect();
            Row::new(vec![
                item.stem.clone(),
                format!("{}x{}", item.width, item.height),
                item.format.clone(),
                if item.asset_url.is_some() { "yes" } else { "-" }.to_string(),
                if item.alpha_thumb_url.is_some() { "yes" } else { "-" }.to_string(),
                summary_preview,
            ])
            .style(style)
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(24),
            Constraint::Length(11),
            Constraint::Length(7),
            Constraint::Length(6),
            Constraint::Length(6),
            Constraint::Min(20),
        ],
    )
    .header(header)
    .block(Block::default().borders(Borders::ALL).title("Processed Items"));

    f.render_widget(table, area);
}

fn draw_detail_view(f: &mut Frame, app: &App, area: ratatui::layout::Rect) {
    let Some(item) = app.selected() else {
        return;
    };

    let mut lines = vec![
        format!("Title: {}", item.stem),
        format!("File: {} ({}x{}, {})", item.file_name, item.width, item.height, item.format),
        String::new(),
        format!("Display URL:   {}", item.display_url),
        format!("Download URL:  {}", item.download_url),
        format!("Thumb (JPG):   {}", item.thumb_jpeg_url),
        format!("Thumb (WebP):  {}", item.thumb_webp_url),
    ];
    if let Some(alpha) = &item.alpha_thumb_url {
        lines.push(format!("Thumb (Alpha): {alpha}"));
    }
    match &item.asset_url {
        Some(asset) => lines.push(format!("Asset link:    {asset}")),
        None => lines.push("Asset link:    (no companion asset)".to_string()),
    }
    lines.push(String::new());
    lines.push("--- HTML snippet (copy below) ---".to_string());
    lines.push(item.html_snippet());

    let detail = Paragraph::new(lines.join("\n"))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Detail - {}", item.stem)),
        )
        .wrap(Wrap { trim: false })
        .scroll((app.detail_scroll, 0));
    f.render_widget(detail, area);
}

fn draw_status_view(f: &mut Frame, app: &App, area: ratatui::layout::Rect) {
    let Some(item) = app.selected() else {
        let empty = Paragraph::new("No items in this batch")
            .block(Block::default().borders(Borders::ALL).title("Status Feed"));
        f.render_widget(empty, area);
        return;
    };

    let log = app
        .session
        .status_for(&item.file_name)
        .map(|lines| lines.join("\n"))
        .unwrap_or_else(|| "(no status recorded)".to_string());

    let feed = Paragraph::new(log)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Status Feed - {}", item.file_name)),
        )
        .wrap(Wrap { trim: false });
    f.render_widget(feed, area);
}
