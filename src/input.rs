//! Popup text input used for entering the import URL.

use ratatui::{
    layout::Alignment,
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph},
};

/// Single-line editor state. The cursor is a byte offset that always sits on
/// a char boundary.
#[derive(Clone, Debug)]
pub struct InputBox {
    /// Prompt shown above the field.
    pub prompt: String,
    /// Current input value.
    pub value: String,
    cursor: usize,
}

impl InputBox {
    pub fn new(prompt: impl Into<String>, initial: impl Into<String>) -> Self {
        let value = initial.into();
        let cursor = value.len();
        Self { prompt: prompt.into(), value, cursor }
    }

    /// Byte offset of the char before the cursor, if any.
    fn prev_boundary(&self) -> Option<usize> {
        self.value[..self.cursor].char_indices().last().map(|(i, _)| i)
    }

    pub fn insert_char(&mut self, c: char) {
        self.value.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn backspace(&mut self) {
        if let Some(i) = self.prev_boundary() {
            self.value.remove(i);
            self.cursor = i;
        }
    }

    pub fn delete(&mut self) {
        if self.cursor < self.value.len() {
            self.value.remove(self.cursor);
        }
    }

    pub fn move_left(&mut self) {
        if let Some(i) = self.prev_boundary() {
            self.cursor = i;
        }
    }

    pub fn move_right(&mut self) {
        if let Some(c) = self.value[self.cursor..].chars().next() {
            self.cursor += c.len_utf8();
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.value.len();
    }

    pub fn clear_line(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    /// Cursor position counted in chars, for display math.
    fn cursor_chars(&self) -> usize {
        self.value[..self.cursor].chars().count()
    }
}

/// Render the input box as a centered popup over the current frame.
pub fn render_input_box(f: &mut Frame, state: &InputBox) {
    let popup_area = centered_popup(f.area(), 70, 7);
    f.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title("Input")
        .style(Style::default().bg(Color::DarkGray));
    f.render_widget(block, popup_area);

    let inner = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(1), // prompt
            Constraint::Length(1), // field
            Constraint::Length(1),
            Constraint::Length(1), // help
        ])
        .split(popup_area);

    let prompt = Paragraph::new(state.prompt.clone()).style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    );
    f.render_widget(prompt, inner[0]);

    // Horizontal scroll keeps the cursor visible in the field width.
    let width = inner[1].width as usize;
    let cursor = state.cursor_chars();
    let scroll = cursor.saturating_sub(width.saturating_sub(2));

    let chars: Vec<char> = state.value.chars().collect();
    let visible_cursor = cursor - scroll;
    let before: String = chars.iter().skip(scroll).take(visible_cursor).collect();
    let at: String = chars
        .get(scroll + visible_cursor)
        .map(|c| c.to_string())
        .unwrap_or_else(|| " ".into());
    let after: String = chars
        .iter()
        .skip(scroll + visible_cursor + 1)
        .take(width.saturating_sub(visible_cursor + 1))
        .collect();

    // The char under the cursor is drawn reversed instead of inserting a
    // marker character.
    let field = Line::from(vec![
        Span::styled(before, Style::default().fg(Color::Green)),
        Span::styled(at, Style::default().fg(Color::Green).add_modifier(Modifier::REVERSED)),
        Span::styled(after, Style::default().fg(Color::Green)),
    ]);
    f.render_widget(Paragraph::new(field), inner[1]);

    let help = Paragraph::new("Enter=confirm | ESC=cancel | Ctrl+U=clear")
        .style(Style::default().fg(Color::Gray))
        .alignment(Alignment::Center);
    f.render_widget(help, inner[3]);
}

/// Compute a centered popup area.
fn centered_popup(area: Rect, width_percent: u16, height: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(area.height.saturating_sub(height) / 2),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - width_percent) / 2),
            Constraint::Percentage(width_percent),
            Constraint::Percentage((100 - width_percent) / 2),
        ])
        .split(vertical[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_editing_keeps_char_boundaries() {
        let mut b = InputBox::new("URL:", "héllo");
        b.move_home();
        b.move_right();
        b.move_right();
        b.backspace();
        assert_eq!(b.value, "hllo");
        b.insert_char('é');
        assert_eq!(b.value, "héllo");
    }

    #[test]
    fn test_cursor_stops_at_ends() {
        let mut b = InputBox::new("URL:", "ab");
        b.move_end();
        b.move_right();
        b.insert_char('c');
        assert_eq!(b.value, "abc");
        b.move_home();
        b.move_left();
        b.delete();
        assert_eq!(b.value, "bc");
    }

    #[test]
    fn test_clear_line() {
        let mut b = InputBox::new("URL:", "http://example");
        b.clear_line();
        assert_eq!(b.value, "");
        b.insert_char('x');
        assert_eq!(b.value, "x");
    }
}
