//! UI state shared with the render layer.

/// Transient presentation state. Everything durable lives in the screen
/// store; this is just what the current frame needs.
#[derive(Clone, Debug)]
pub struct UiState {
    /// Cursor over the actionable buttons of the current screen.
    pub selected: usize,
    /// Status bar text.
    pub status: String,
    /// Rolling log shown in the side panel.
    pub log: Vec<String>,
    /// Error message for emphasized display.
    pub error: Option<String>,
}

impl UiState {
    pub fn new() -> Self {
        Self {
            selected: 0,
            status: "Ready".into(),
            log: Vec::new(),
            error: None,
        }
    }

    /// Append a log line, surfacing it briefly in the status bar too.
    pub fn note(&mut self, line: impl Into<String>) {
        let line = line.into();
        self.status = line.clone();
        self.log.push(line);
    }
}
