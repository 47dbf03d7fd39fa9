use ratatui::buffer::Buffer;
use ratatui::prelude::Rect;
use ratatui::style::{Modifier, Style};

use super::{FloatRect, Point};
use crate::ui::UiFrame;

/// What a pointer-down on a window's top row should do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderAction {
    Minimize,
    Maximize,
    Close,
    Drag,
    None,
}

impl HeaderAction {
    pub fn is_control(self) -> bool {
        matches!(
            self,
            HeaderAction::Minimize | HeaderAction::Maximize | HeaderAction::Close
        )
    }
}

const CONTROL_WIDTH: i32 = 3;
const CONTROLS: [(HeaderAction, &str); 3] = [
    (HeaderAction::Minimize, " _ "),
    (HeaderAction::Maximize, " □ "),
    (HeaderAction::Close, " x "),
];

/// Narrowest window that still shows all title-bar controls between its two
/// corner cells.
pub const CONTROLS_MIN_WIDTH: u16 = (CONTROL_WIDTH as usize * CONTROLS.len() + 2) as u16;

pub trait WindowDecorator: std::fmt::Debug {
    /// Classify `point` against the chrome of a window occupying `rect`.
    fn hit_test(&self, rect: FloatRect, point: Point) -> HeaderAction;

    /// Area left for application content once the chrome is drawn.
    fn content_rect(&self, rect: FloatRect) -> FloatRect {
        FloatRect {
            x: rect.x + 1,
            y: rect.y + 1,
            width: rect.width.saturating_sub(2),
            height: rect.height.saturating_sub(2),
        }
    }

    fn render_window(
        &self,
        frame: &mut UiFrame<'_>,
        rect: FloatRect,
        bounds: Rect,
        title: &str,
        focused: bool,
        maximized: bool,
    );
}

#[derive(Debug, Default)]
pub struct DefaultDecorator;

impl DefaultDecorator {
    /// Controls sit right-aligned on the title row, inside the corner cell.
    /// Windows too narrow to fit them get none.
    fn control_span(rect: FloatRect) -> Option<i32> {
        if rect.width < CONTROLS_MIN_WIDTH {
            return None;
        }
        Some(rect.right() - 1 - CONTROL_WIDTH * CONTROLS.len() as i32)
    }
}

impl WindowDecorator for DefaultDecorator {
    fn hit_test(&self, rect: FloatRect, point: Point) -> HeaderAction {
        if !rect.contains(point) || point.y != rect.y {
            return HeaderAction::None;
        }
        if let Some(start) = Self::control_span(rect)
            && point.x >= start
            && point.x < rect.right() - 1
        {
            let idx = ((point.x - start) / CONTROL_WIDTH) as usize;
            return CONTROLS[idx].0;
        }
        if point.x == rect.x || point.x == rect.right() - 1 {
            // corner cells resize
            return HeaderAction::None;
        }
        HeaderAction::Drag
    }

    fn render_window(
        &self,
        frame: &mut UiFrame<'_>,
        rect: FloatRect,
        bounds: Rect,
        title: &str,
        focused: bool,
        maximized: bool,
    ) {
        if rect.width < 2 || rect.height < 2 {
            return;
        }
        let buffer = frame.buffer_mut();
        let bounds = bounds.intersection(buffer.area);

        let header_style = if focused {
            Style::default()
                .bg(crate::theme::decorator_header_bg())
                .fg(crate::theme::decorator_header_fg())
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
                .bg(crate::theme::decorator_inactive_bg())
                .fg(crate::theme::decorator_header_fg())
        };
        let border_style = Style::default()
            .fg(crate::theme::decorator_border())
            .bg(crate::theme::window_bg());

        let left = rect.x;
        let top = rect.y;
        let right = rect.right() - 1;
        let bottom = rect.bottom() - 1;

        // Title row
        put(buffer, bounds, left, top, "┌", border_style);
        put(buffer, bounds, right, top, "┐", border_style);
        for x in left + 1..right {
            put(buffer, bounds, x, top, " ", header_style);
        }
        let controls_start = Self::control_span(rect);
        let title_start = left.saturating_add(2);
        let title_limit = controls_start.unwrap_or(right) - title_start;
        if title_limit > 0 {
            for (idx, ch) in title.chars().take(title_limit as usize).enumerate() {
                let mut tmp = [0u8; 4];
                put(
                    buffer,
                    bounds,
                    title_start.saturating_add(idx as i32),
                    top,
                    ch.encode_utf8(&mut tmp),
                    header_style,
                );
            }
        }
        if let Some(start) = controls_start {
            for (idx, (action, label)) in CONTROLS.iter().enumerate() {
                let label = match action {
                    HeaderAction::Maximize if maximized => " ◱ ",
                    _ => label,
                };
                let x0 = start + idx as i32 * CONTROL_WIDTH;
                for (offset, ch) in label.chars().enumerate() {
                    let mut tmp = [0u8; 4];
                    put(
                        buffer,
                        bounds,
                        x0 + offset as i32,
                        top,
                        ch.encode_utf8(&mut tmp),
                        header_style,
                    );
                }
            }
        }

        // Sides and bottom
        for y in top + 1..bottom {
            put(buffer, bounds, left, y, "│", border_style);
            put(buffer, bounds, right, y, "│", border_style);
        }
        put(buffer, bounds, left, bottom, "└", border_style);
        put(buffer, bounds, right, bottom, "┘", border_style);
        for x in left + 1..right {
            put(buffer, bounds, x, bottom, "─", border_style);
        }
    }
}

fn put(buffer: &mut Buffer, bounds: Rect, x: i32, y: i32, symbol: &str, style: Style) {
    if x < bounds.x as i32
        || y < bounds.y as i32
        || x >= bounds.x as i32 + bounds.width as i32
        || y >= bounds.y as i32 + bounds.height as i32
    {
        return;
    }
    if let Some(cell) = buffer.cell_mut((x as u16, y as u16)) {
        cell.set_symbol(symbol);
        cell.set_style(style);
    }
}
