//! Chrome layout helpers for the main view.

use ratatui::prelude::*;

/// The four vertical regions of the main view.
pub struct ChromeLayout {
    /// Tab strip with one tab per screen.
    pub tabs: Rect,
    /// Button grid plus the log panel.
    pub body: Rect,
    /// HELP bar.
    pub help_bar: Rect,
    /// STATUS bar.
    pub status_bar: Rect,
}

/// The two body regions (button grid + log panel).
pub struct BodyLayout {
    pub grid: Rect,
    pub log_panel: Rect,
}

/// Split the whole frame into tabs, body, HELP, and STATUS.
pub fn create_chrome_layout(area: Rect) -> ChromeLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Tab strip
            Constraint::Min(1),    // Body (grid + log)
            Constraint::Length(3), // HELP bar
            Constraint::Length(3), // STATUS bar
        ])
        .split(area);

    ChromeLayout {
        tabs: chunks[0],
        body: chunks[1],
        help_bar: chunks[2],
        status_bar: chunks[3],
    }
}

/// Split the body into the button grid (75%) and the log panel (25%).
pub fn create_body_layout(area: Rect) -> BodyLayout {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(75), Constraint::Percentage(25)])
        .split(area);

    BodyLayout {
        grid: chunks[0],
        log_panel: chunks[1],
    }
}
