use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::components::{Component, ComponentContext};
use crate::ui::UiFrame;

const SCROLLBACK_LEN: usize = 500;
const PROMPT: &str = "$ ";

/// Mock shell: a line editor over a small built-in command table.
#[derive(Debug)]
pub struct TerminalComponent {
    scrollback: Vec<String>,
    input: String,
    history: Vec<String>,
    // index into `history` while browsing with Up/Down
    history_cursor: Option<usize>,
    user: String,
}

impl Component for TerminalComponent {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, ctx: &ComponentContext) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let base = Style::default()
            .bg(crate::theme::terminal_bg())
            .fg(crate::theme::terminal_fg());
        let visible = area.height as usize;
        let mut lines: Vec<Line> = self
            .scrollback
            .iter()
            .map(|l| Line::from(l.clone()))
            .collect();
        let mut prompt = vec![
            Span::styled(self.prompt(), base.add_modifier(Modifier::BOLD)),
            Span::raw(self.input.clone()),
        ];
        if ctx.focused() {
            prompt.push(Span::styled(" ", base.add_modifier(Modifier::REVERSED)));
        }
        lines.push(Line::from(prompt));
        let skip = lines.len().saturating_sub(visible);
        let shown: Vec<Line> = lines.into_iter().skip(skip).collect();
        frame.render_widget(Paragraph::new(shown).style(base), area);
    }

    fn handle_event(&mut self, event: &Event, _ctx: &ComponentContext) -> bool {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => self.handle_key(key),
            Event::Paste(text) => {
                self.input.extend(text.chars().filter(|c| !c.is_control()));
                true
            }
            _ => false,
        }
    }
}

impl TerminalComponent {
    pub fn new() -> Self {
        let user = std::env::var("USER")
            .ok()
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| "guest".to_string());
        Self {
            scrollback: vec!["Type `help` to list commands.".to_string()],
            input: String::new(),
            history: Vec::new(),
            history_cursor: None,
            user,
        }
    }

    fn prompt(&self) -> String {
        format!("{}@desk:~{PROMPT}", self.user)
    }

    pub fn scrollback(&self) -> &[String] {
        &self.scrollback
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    fn handle_key(&mut self, key: &KeyEvent) -> bool {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('l') => {
                    self.scrollback.clear();
                    true
                }
                KeyCode::Char('c') => {
                    let line = format!("{}{}^C", self.prompt(), self.input);
                    self.print(line);
                    self.input.clear();
                    self.history_cursor = None;
                    true
                }
                _ => false,
            };
        }
        match key.code {
            KeyCode::Char(c) => self.input.push(c),
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Enter => self.submit(),
            KeyCode::Up => self.browse_history(true),
            KeyCode::Down => self.browse_history(false),
            _ => return false,
        }
        true
    }

    fn browse_history(&mut self, older: bool) {
        if self.history.is_empty() {
            return;
        }
        let last = self.history.len() - 1;
        self.history_cursor = match (self.history_cursor, older) {
            (None, true) => Some(last),
            (None, false) => None,
            (Some(i), true) => Some(i.saturating_sub(1)),
            (Some(i), false) if i >= last => None,
            (Some(i), false) => Some(i + 1),
        };
        self.input = self
            .history_cursor
            .and_then(|i| self.history.get(i).cloned())
            .unwrap_or_default();
    }

    fn submit(&mut self) {
        let line = std::mem::take(&mut self.input);
        self.history_cursor = None;
        let echo = format!("{}{line}", self.prompt());
        self.print(echo);
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return;
        }
        self.history.push(trimmed.to_string());
        let (command, args) = trimmed
            .split_once(char::is_whitespace)
            .map(|(c, a)| (c, a.trim()))
            .unwrap_or((trimmed, ""));
        tracing::trace!(command, "shell command");
        match command {
            "help" => {
                for line in [
                    "help       list commands",
                    "clear      clear the screen",
                    "echo TEXT  print TEXT",
                    "whoami     current user",
                    "hostname   machine name",
                    "uname [-a] system information",
                    "history    previous commands",
                ] {
                    self.print(line.to_string());
                }
            }
            "clear" => self.scrollback.clear(),
            "echo" => self.print(args.to_string()),
            "whoami" => self.print(self.user.clone()),
            "hostname" => {
                let name = hostname::get()
                    .ok()
                    .and_then(|s| s.into_string().ok())
                    .unwrap_or_else(|| "localhost".to_string());
                self.print(name);
            }
            "uname" => {
                let os = std::env::consts::OS;
                if args == "-a" {
                    self.print(format!(
                        "{os} {} {} {}",
                        std::env::consts::ARCH,
                        env!("CARGO_PKG_NAME"),
                        env!("CARGO_PKG_VERSION")
                    ));
                } else {
                    self.print(os.to_string());
                }
            }
            "history" => {
                let entries: Vec<String> = self
                    .history
                    .iter()
                    .enumerate()
                    .map(|(i, h)| format!("{:>4}  {h}", i + 1))
                    .collect();
                for entry in entries {
                    self.print(entry);
                }
            }
            other => self.print(format!("{other}: command not found")),
        }
    }

    fn print(&mut self, line: String) {
        self.scrollback.push(line);
        if self.scrollback.len() > SCROLLBACK_LEN {
            let excess = self.scrollback.len() - SCROLLBACK_LEN;
            self.scrollback.drain(..excess);
        }
    }
}

impl Default for TerminalComponent {
    fn default() -> Self {
        Self::new()
    }
}
