use std::io;

use crossterm::event::{Event, KeyCode, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};

use crate::components::{Component, ComponentContext};
use crate::ui::UiFrame;

type Launcher = fn(&str) -> io::Result<()>;

fn system_browser(url: &str) -> io::Result<()> {
    webbrowser::open(url)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchStatus {
    Idle,
    Opened(String),
    Failed(String),
}

/// Address bar that hands its URL to the host's web browser.
///
/// Launch failures are logged and shown in the window; they never leave
/// the component.
#[derive(Debug)]
pub struct BrowserComponent {
    url: String,
    status: LaunchStatus,
    launcher: Launcher,
}

impl Component for BrowserComponent {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, ctx: &ComponentContext) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let base = Style::default()
            .bg(crate::theme::window_bg())
            .fg(crate::theme::window_fg());
        let bar = Style::default()
            .bg(crate::theme::address_bar_bg())
            .fg(crate::theme::window_fg());
        let mut address = vec![
            Span::styled(" url: ", bar.add_modifier(Modifier::BOLD)),
            Span::styled(self.url.clone(), bar),
        ];
        if ctx.focused() {
            address.push(Span::styled(" ", bar.add_modifier(Modifier::REVERSED)));
        }
        let status = match &self.status {
            LaunchStatus::Idle => Line::from("Press Enter to open this page in your browser."),
            LaunchStatus::Opened(url) => Line::from(format!("Opened {url}")),
            LaunchStatus::Failed(reason) => Line::from(Span::styled(
                format!("Could not open browser: {reason}"),
                base.fg(crate::theme::error_fg()),
            )),
        };
        let text = vec![Line::from(address), Line::from(""), status];
        frame.render_widget(
            Paragraph::new(text).style(base).wrap(Wrap { trim: false }),
            area,
        );
    }

    fn handle_event(&mut self, event: &Event, ctx: &ComponentContext) -> bool {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => {
                if key.modifiers.contains(KeyModifiers::CONTROL)
                    || key.modifiers.contains(KeyModifiers::ALT)
                {
                    return false;
                }
                match key.code {
                    KeyCode::Enter => self.launch(ctx),
                    KeyCode::Char(c) => {
                        self.url.push(c);
                        self.status = LaunchStatus::Idle;
                    }
                    KeyCode::Backspace => {
                        self.url.pop();
                        self.status = LaunchStatus::Idle;
                    }
                    _ => return false,
                }
                true
            }
            Event::Mouse(mouse)
                if mouse.kind == MouseEventKind::Down(MouseButton::Left) && mouse.row == 0 =>
            {
                self.launch(ctx);
                true
            }
            _ => false,
        }
    }
}

impl BrowserComponent {
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_launcher(url, system_browser)
    }

    pub fn with_launcher(url: impl Into<String>, launcher: Launcher) -> Self {
        Self {
            url: url.into(),
            status: LaunchStatus::Idle,
            launcher,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn status(&self) -> &LaunchStatus {
        &self.status
    }

    fn launch(&mut self, ctx: &ComponentContext) {
        let url = self.url.trim().to_string();
        if url.is_empty() {
            self.status = LaunchStatus::Failed("empty address".to_string());
            return;
        }
        match (self.launcher)(&url) {
            Ok(()) => {
                tracing::debug!(window_id = ?ctx.window(), %url, "opened url");
                self.status = LaunchStatus::Opened(url);
            }
            Err(err) => {
                tracing::warn!(window_id = ?ctx.window(), %url, error = %err, "browser launch failed");
                self.status = LaunchStatus::Failed(err.to_string());
            }
        }
    }
}
