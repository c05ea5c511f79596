//! Rendering for the main view.

use ratatui::{
    Frame,
    prelude::*,
    widgets::{Block, Borders, Paragraph, Tabs, Wrap},
};

use crate::{
    grid::{self, PlacedKind, Viewport},
    input, layout,
    schema::Screen,
    shortcuts::Shortcuts,
};

use super::App;

/// Draw the whole frame.
pub fn draw(f: &mut Frame, app: &App) {
    let chrome = layout::create_chrome_layout(f.area());
    let body = layout::create_body_layout(chrome.body);

    draw_tabs(f, app, chrome.tabs);
    draw_grid(f, app, body.grid);
    draw_log_panel(f, app, body.log_panel);

    let help_bar = Paragraph::new(help_text(&app.shortcuts))
        .block(Block::default().borders(Borders::ALL).title("HELP"))
        .wrap(Wrap { trim: true });
    f.render_widget(help_bar, chrome.help_bar);

    f.render_widget(build_status_bar(app), chrome.status_bar);

    // An open input box is drawn over everything else.
    if let Some(input_state) = &app.input_box {
        input::render_input_box(f, input_state);
    }
}

/// Tab strip: one tab per screen, current screen highlighted.
fn draw_tabs(f: &mut Frame, app: &App, area: Rect) {
    let state = app.store.state();
    let titles: Vec<String> = state.screens.iter().map(|s| s.title.clone()).collect();
    let tabs = Tabs::new(titles)
        .block(Block::default().borders(Borders::ALL).title("SCREENS"))
        .select(state.current_screen_index)
        .highlight_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );
    f.render_widget(tabs, area);
}

/// Button grid for the current screen.
fn draw_grid(f: &mut Frame, app: &App, area: Rect) {
    let Some(screen) = app.store.current_screen() else {
        let placeholder = Paragraph::new(
            "No screens configured yet.\n\nPress i and enter a YAML configuration URL to import one.",
        )
        .block(Block::default().borders(Borders::ALL).title("GRID"))
        .wrap(Wrap { trim: true });
        f.render_widget(placeholder, area);
        return;
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(screen.title.clone());
    let inner = block.inner(area);
    f.render_widget(block, area);

    let viewport = Viewport::new(inner);
    let placed = grid::layout_screen(screen, &viewport, &app.cfg.grid);
    let selected = selected_ui_index(screen, app.ui.selected);

    for item in placed {
        // Clip to the visible grid area; offscreen items vanish.
        let rect = item.rect.intersection(inner);
        if rect.width == 0 || rect.height == 0 {
            continue;
        }
        match item.kind {
            PlacedKind::Separator => {
                let line = Paragraph::new("─".repeat(rect.width as usize))
                    .style(Style::default().fg(Color::DarkGray));
                f.render_widget(line, rect);
            }
            PlacedKind::Button => {
                let button = &screen.ui[item.index];
                let style = if selected == Some(item.index) {
                    Style::default()
                        .bg(Color::Rgb(255, 140, 0))
                        .fg(Color::Black)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::Cyan)
                };
                let widget = Paragraph::new(button.label.clone())
                    .alignment(Alignment::Center)
                    .block(Block::default().borders(Borders::ALL))
                    .style(style);
                f.render_widget(widget, rect);
            }
        }
    }
}

/// Map the actionable-button cursor back to an index into `Screen::ui`.
fn selected_ui_index(screen: &Screen, selected: usize) -> Option<usize> {
    screen
        .ui
        .iter()
        .enumerate()
        .filter(|(_, b)| !b.label.is_empty())
        .nth(selected)
        .map(|(i, _)| i)
}

/// Rolling log of import and trigger outcomes.
fn draw_log_panel(f: &mut Frame, app: &App, area: Rect) {
    let visible = area.height.saturating_sub(2) as usize;
    let text = app
        .ui
        .log
        .iter()
        .rev()
        .take(visible.max(1))
        .rev()
        .cloned()
        .collect::<Vec<_>>()
        .join("\n");
    let panel = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title("LOG"))
        .wrap(Wrap { trim: true });
    f.render_widget(panel, area);
}

/// Status bar: screen count, cursor position, and status or error.
fn build_status_bar(app: &App) -> Paragraph<'static> {
    let state = app.store.state();
    let position = if state.screens.is_empty() {
        "no screens".to_string()
    } else {
        format!(
            "screen {}/{}",
            state.current_screen_index + 1,
            state.screens.len()
        )
    };

    let status_text = if let Some(err) = &app.ui.error {
        format!("[{position}] ERROR: {err}")
    } else {
        format!("[{position}] {}", app.ui.status)
    };

    let mut status_bar = Paragraph::new(status_text)
        .block(Block::default().borders(Borders::ALL).title("STATUS"))
        .wrap(Wrap { trim: true });

    if app.ui.error.is_some() {
        status_bar = status_bar.style(Style::default().fg(Color::Red));
    }

    status_bar
}

/// Help line built from the configured bindings.
fn help_text(shortcuts: &Shortcuts) -> String {
    let sc = &shortcuts.main;
    format!(
        "{}: quit | {}: import | {}: delete screen | {}/{}: switch screen | {}/{}: select | {}: press",
        format_keys(&sc.quit),
        format_keys(&sc.import),
        format_keys(&sc.delete),
        format_keys(&sc.prev_screen),
        format_keys(&sc.next_screen),
        format_keys(&sc.up),
        format_keys(&sc.down),
        format_keys(&sc.press),
    )
}

/// Join alternate bindings for display.
fn format_keys(keys: &[String]) -> String {
    keys.join("/")
}
