use crossterm::event::{Event, KeyCode, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};

use crate::components::{Component, ComponentContext};
use crate::ui::{UiFrame, safe_set_string};

/// Minimal multi-line text buffer. Positions are counted in chars.
#[derive(Debug)]
pub struct EditorComponent {
    lines: Vec<String>,
    row: usize,
    col: usize,
    // first visible row, kept so the cursor stays on screen
    top: usize,
}

impl Component for EditorComponent {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, ctx: &ComponentContext) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let height = area.height as usize;
        if self.row < self.top {
            self.top = self.row;
        } else if self.row >= self.top + height {
            self.top = self.row + 1 - height;
        }
        let style = Style::default()
            .bg(crate::theme::window_bg())
            .fg(crate::theme::window_fg());
        let buffer = frame.buffer_mut();
        let bounds = area.intersection(buffer.area);
        for y in bounds.y..bounds.y.saturating_add(bounds.height) {
            for x in bounds.x..bounds.x.saturating_add(bounds.width) {
                if let Some(cell) = buffer.cell_mut((x, y)) {
                    cell.set_symbol(" ");
                    cell.set_style(style);
                }
            }
        }
        for (offset, line) in self.lines.iter().skip(self.top).take(height).enumerate() {
            safe_set_string(buffer, bounds, area.x, area.y + offset as u16, line, style);
        }
        if ctx.focused() {
            let cy = area.y + (self.row - self.top) as u16;
            let cx = area.x.saturating_add(self.col.min(u16::MAX as usize) as u16);
            if cx < area.x.saturating_add(area.width)
                && let Some(cell) = buffer.cell_mut((cx, cy))
            {
                cell.set_style(style.add_modifier(Modifier::REVERSED));
            }
        }
    }

    fn handle_event(&mut self, event: &Event, _ctx: &ComponentContext) -> bool {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => {
                if key.modifiers.contains(KeyModifiers::CONTROL)
                    || key.modifiers.contains(KeyModifiers::ALT)
                {
                    return false;
                }
                match key.code {
                    KeyCode::Char(c) => self.insert(c),
                    KeyCode::Tab => {
                        for _ in 0..4 {
                            self.insert(' ');
                        }
                    }
                    KeyCode::Enter => self.newline(),
                    KeyCode::Backspace => self.backspace(),
                    KeyCode::Delete => self.delete(),
                    KeyCode::Left => self.move_left(),
                    KeyCode::Right => self.move_right(),
                    KeyCode::Up => self.move_vertical(-1),
                    KeyCode::Down => self.move_vertical(1),
                    KeyCode::Home => self.col = 0,
                    KeyCode::End => self.col = self.line_len(self.row),
                    _ => return false,
                }
                true
            }
            Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                self.row = (self.top + mouse.row as usize).min(self.lines.len() - 1);
                self.col = (mouse.column as usize).min(self.line_len(self.row));
                true
            }
            Event::Paste(text) => {
                for c in text.chars() {
                    match c {
                        '\n' => self.newline(),
                        '\r' => {}
                        c => self.insert(c),
                    }
                }
                true
            }
            _ => false,
        }
    }
}

impl EditorComponent {
    pub fn new() -> Self {
        Self {
            lines: vec![String::new()],
            row: 0,
            col: 0,
            top: 0,
        }
    }

    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    pub fn cursor(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    fn line_len(&self, row: usize) -> usize {
        self.lines.get(row).map(|l| l.chars().count()).unwrap_or(0)
    }

    fn byte_index(line: &str, col: usize) -> usize {
        line.char_indices()
            .nth(col)
            .map(|(i, _)| i)
            .unwrap_or(line.len())
    }

    fn insert(&mut self, c: char) {
        let line = &mut self.lines[self.row];
        let at = Self::byte_index(line, self.col);
        line.insert(at, c);
        self.col += 1;
    }

    fn newline(&mut self) {
        let line = &mut self.lines[self.row];
        let at = Self::byte_index(line, self.col);
        let rest = line.split_off(at);
        self.row += 1;
        self.col = 0;
        self.lines.insert(self.row, rest);
    }

    fn backspace(&mut self) {
        if self.col > 0 {
            self.col -= 1;
            let line = &mut self.lines[self.row];
            let at = Self::byte_index(line, self.col);
            line.remove(at);
        } else if self.row > 0 {
            let tail = self.lines.remove(self.row);
            self.row -= 1;
            self.col = self.line_len(self.row);
            self.lines[self.row].push_str(&tail);
        }
    }

    fn delete(&mut self) {
        if self.col < self.line_len(self.row) {
            let line = &mut self.lines[self.row];
            let at = Self::byte_index(line, self.col);
            line.remove(at);
        } else if self.row + 1 < self.lines.len() {
            let next = self.lines.remove(self.row + 1);
            self.lines[self.row].push_str(&next);
        }
    }

    fn move_left(&mut self) {
        if self.col > 0 {
            self.col -= 1;
        } else if self.row > 0 {
            self.row -= 1;
            self.col = self.line_len(self.row);
        }
    }

    fn move_right(&mut self) {
        if self.col < self.line_len(self.row) {
            self.col += 1;
        } else if self.row + 1 < self.lines.len() {
            self.row += 1;
            self.col = 0;
        }
    }

    fn move_vertical(&mut self, delta: isize) {
        let target = self.row as isize + delta;
        if target < 0 || target as usize >= self.lines.len() {
            return;
        }
        self.row = target as usize;
        self.col = self.col.min(self.line_len(self.row));
    }
}

impl Default for EditorComponent {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEvent;

    fn press(editor: &mut EditorComponent, code: KeyCode) {
        editor.handle_event(
            &Event::Key(KeyEvent::new(code, KeyModifiers::NONE)),
            &ComponentContext::detached(),
        );
    }

    fn type_text(editor: &mut EditorComponent, text: &str) {
        for c in text.chars() {
            press(editor, KeyCode::Char(c));
        }
    }

    #[test]
    fn typing_enter_and_backspace() {
        let mut e = EditorComponent::new();
        type_text(&mut e, "héllo");
        press(&mut e, KeyCode::Enter);
        type_text(&mut e, "world");
        assert_eq!(e.text(), "héllo\nworld");
        press(&mut e, KeyCode::Home);
        press(&mut e, KeyCode::Backspace);
        assert_eq!(e.text(), "hélloworld");
        assert_eq!(e.cursor(), (0, 5));
    }

    #[test]
    fn split_in_middle_of_line() {
        let mut e = EditorComponent::new();
        type_text(&mut e, "abcd");
        press(&mut e, KeyCode::Left);
        press(&mut e, KeyCode::Left);
        press(&mut e, KeyCode::Enter);
        assert_eq!(e.text(), "ab\ncd");
        press(&mut e, KeyCode::Up);
        press(&mut e, KeyCode::End);
        press(&mut e, KeyCode::Delete);
        assert_eq!(e.text(), "abcd");
    }

    #[test]
    fn vertical_motion_clamps_column() {
        let mut e = EditorComponent::new();
        type_text(&mut e, "a");
        press(&mut e, KeyCode::Enter);
        type_text(&mut e, "longer line");
        press(&mut e, KeyCode::Up);
        assert_eq!(e.cursor(), (0, 1));
        press(&mut e, KeyCode::Up);
        assert_eq!(e.cursor(), (0, 1));
    }

    #[test]
    fn control_chords_are_not_consumed() {
        let mut e = EditorComponent::new();
        let handled = e.handle_event(
            &Event::Key(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL)),
            &ComponentContext::detached(),
        );
        assert!(!handled);
        assert_eq!(e.text(), "");
    }
}
