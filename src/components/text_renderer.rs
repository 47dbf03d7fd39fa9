use crossterm::event::{Event, KeyCode, KeyEventKind, MouseEventKind};
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Text};
use ratatui::widgets::{Paragraph, Wrap};

use crate::components::{Component, ComponentContext};
use crate::ui::UiFrame;

/// Scrollable block of styled text.
#[derive(Debug)]
pub struct TextRendererComponent {
    text: Text<'static>,
    wrap: bool,
    offset: usize,
    // rows visible in the last rendered area
    view: usize,
    // display lines counted at the last render width
    total: usize,
}

impl Component for TextRendererComponent {
    fn resize(&mut self, area: Rect, _ctx: &ComponentContext) {
        self.view = area.height as usize;
    }

    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, _ctx: &ComponentContext) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        self.view = area.height as usize;
        self.total = if self.wrap {
            compute_display_lines(&self.text, area.width)
        } else {
            self.text.lines.len().max(1)
        };
        self.offset = self.offset.min(self.max_offset());

        let mut paragraph = Paragraph::new(self.text.clone())
            .style(Style::default().bg(crate::theme::window_bg()).fg(crate::theme::window_fg()));
        if self.wrap {
            paragraph = paragraph.wrap(Wrap { trim: false });
        }
        let offset = self.offset.min(u16::MAX as usize) as u16;
        frame.render_widget(paragraph.scroll((offset, 0)), area);
    }

    fn handle_event(&mut self, event: &Event, _ctx: &ComponentContext) -> bool {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => {
                let page = self.view.max(1);
                match key.code {
                    KeyCode::Up => self.scroll_by(-1),
                    KeyCode::Down => self.scroll_by(1),
                    KeyCode::PageUp => self.scroll_by(-(page as isize)),
                    KeyCode::PageDown => self.scroll_by(page as isize),
                    KeyCode::Home => self.offset = 0,
                    KeyCode::End => self.offset = self.max_offset(),
                    _ => return false,
                }
                true
            }
            Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::ScrollUp => {
                    self.scroll_by(-3);
                    true
                }
                MouseEventKind::ScrollDown => {
                    self.scroll_by(3);
                    true
                }
                _ => false,
            },
            _ => false,
        }
    }
}

impl TextRendererComponent {
    pub fn new() -> Self {
        Self {
            text: Text::from(vec![Line::from(String::new())]),
            wrap: true,
            offset: 0,
            view: 0,
            total: 1,
        }
    }

    pub fn set_text(&mut self, text: Text<'static>) {
        self.text = text;
        self.offset = 0;
    }

    pub fn set_wrap(&mut self, wrap: bool) {
        self.wrap = wrap;
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn set_offset(&mut self, offset: usize) {
        self.offset = offset.min(self.max_offset());
    }

    pub fn view(&self) -> usize {
        self.view
    }

    fn max_offset(&self) -> usize {
        self.total.saturating_sub(self.view.max(1))
    }

    fn scroll_by(&mut self, delta: isize) {
        let next = if delta < 0 {
            self.offset.saturating_sub(delta.unsigned_abs())
        } else {
            self.offset.saturating_add(delta as usize)
        };
        self.set_offset(next);
    }

    pub fn rendered_lines(&self) -> Vec<String> {
        self.text
            .lines
            .iter()
            .map(|line| {
                line.spans
                    .iter()
                    .map(|span| span.content.as_ref())
                    .collect::<String>()
            })
            .collect()
    }
}

fn compute_display_lines(text: &Text<'_>, width: u16) -> usize {
    let usable = width.max(1) as usize;
    text.lines
        .iter()
        .map(|line| line.width().div_ceil(usable).max(1))
        .sum::<usize>()
        .max(1)
}

impl Default for TextRendererComponent {
    fn default() -> Self {
        Self::new()
    }
}
