use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
};

use crate::apps::AppKind;
use crate::layout::{RegionMap, rect_contains};
use crate::ui::{UiFrame, safe_set_string, truncate_to_width};
use crate::window::WindowId;

const START_LABEL: &str = " ≡ Start ";

/// One taskbar button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskbarEntry {
    pub id: WindowId,
    pub label: String,
    pub active: bool,
    pub minimized: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartMenuItem {
    Launch(AppKind),
    Exit,
}

impl StartMenuItem {
    /// Launchers for every catalog entry followed by Exit.
    pub fn catalog() -> Vec<StartMenuItem> {
        AppKind::ALL
            .into_iter()
            .map(StartMenuItem::Launch)
            .chain(std::iter::once(StartMenuItem::Exit))
            .collect()
    }

    pub fn label(&self) -> String {
        match self {
            StartMenuItem::Launch(kind) => format!("{} {}", kind.icon(), kind.title()),
            StartMenuItem::Exit => "    Exit".to_string(),
        }
    }
}

/// Taskbar pinned to the bottom of the screen plus the start menu that pops
/// up above it. Hit regions are rebuilt on every render.
#[derive(Debug, Default)]
pub struct Panel {
    area: Rect,
    start_rect: Option<Rect>,
    window_hits: RegionMap<WindowId>,
    menu_bounds: Option<Rect>,
    menu_item_hits: RegionMap<usize>,
    hostname: Option<String>,
}

impl Panel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_frame(&mut self) {
        self.start_rect = None;
        self.window_hits.clear();
        self.menu_bounds = None;
        self.menu_item_hits.clear();
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    /// Place the taskbar in the bottom `height` rows of `screen`.
    pub fn layout(&mut self, screen: Rect, height: u16) {
        let height = height.min(screen.height);
        self.area = Rect {
            x: screen.x,
            y: screen.y + screen.height - height,
            width: screen.width,
            height,
        };
    }

    pub fn contains(&self, column: u16, row: u16) -> bool {
        rect_contains(self.area, column, row)
    }

    pub fn render(&mut self, frame: &mut UiFrame<'_>, entries: &[TaskbarEntry], menu_open: bool) {
        let area = self.area;
        if area.width == 0 || area.height == 0 {
            return;
        }
        let base = Style::default()
            .bg(crate::theme::taskbar_bg())
            .fg(crate::theme::taskbar_fg());
        frame.fill(area, base);
        let hostname = self.hostname_label();
        let buffer = frame.buffer_mut();
        let bounds = area.intersection(buffer.area);
        if bounds.width == 0 || bounds.height == 0 {
            return;
        }
        let y = area.y;
        let max_x = area.x.saturating_add(area.width);
        let mut x = area.x;

        let start_width = START_LABEL.chars().count() as u16;
        let mut start_style = Style::default()
            .bg(crate::theme::start_button_bg())
            .fg(crate::theme::taskbar_fg())
            .add_modifier(Modifier::BOLD);
        if menu_open {
            start_style = start_style.add_modifier(Modifier::REVERSED);
        }
        safe_set_string(buffer, bounds, x, y, START_LABEL, start_style);
        self.start_rect = Some(Rect {
            x,
            y,
            width: start_width.min(area.width),
            height: 1,
        });
        x = x.saturating_add(start_width).saturating_add(1);

        // Right-aligned host label, only when it leaves room for buttons.
        let host_width = hostname.chars().count() as u16;
        let buttons_end = if host_width + 20 < area.width {
            let hx = max_x - host_width;
            safe_set_string(buffer, bounds, hx, y, &hostname, base.add_modifier(Modifier::DIM));
            hx.saturating_sub(1)
        } else {
            max_x
        };

        for entry in entries {
            let room = buttons_end.saturating_sub(x);
            if room < 5 {
                break;
            }
            let label = if entry.minimized {
                format!("[{}]", entry.label)
            } else {
                entry.label.clone()
            };
            let chunk = format!(" {} ", truncate_to_width(&label, room as usize - 2));
            let width = chunk.chars().count() as u16;
            let style = if entry.active {
                Style::default()
                    .bg(crate::theme::taskbar_active_bg())
                    .fg(crate::theme::taskbar_fg())
                    .add_modifier(Modifier::BOLD)
            } else if entry.minimized {
                base.fg(crate::theme::taskbar_minimized_fg())
            } else {
                base
            };
            safe_set_string(buffer, bounds, x, y, &chunk, style);
            self.window_hits.set(
                entry.id,
                Rect {
                    x,
                    y,
                    width,
                    height: 1,
                },
            );
            x = x.saturating_add(width).saturating_add(1);
        }
    }

    /// Draw the start menu above the start button, inside `bounds`.
    pub fn render_menu(
        &mut self,
        frame: &mut UiFrame<'_>,
        bounds: Rect,
        items: &[StartMenuItem],
        selected: usize,
    ) {
        if items.is_empty() || bounds.width < 4 || bounds.height < 3 {
            return;
        }
        let labels: Vec<String> = items.iter().map(StartMenuItem::label).collect();
        let label_width = labels.iter().map(|l| l.chars().count()).max().unwrap_or(0) as u16;
        let width = (label_width + 4).min(bounds.width);
        let height = (items.len() as u16 + 2).min(bounds.height);
        let menu = Rect {
            x: bounds.x,
            y: bounds.y + bounds.height - height,
            width,
            height,
        };
        let style = Style::default()
            .bg(crate::theme::menu_bg())
            .fg(crate::theme::menu_fg());
        let selected_style = Style::default()
            .bg(crate::theme::menu_selected_bg())
            .fg(crate::theme::menu_selected_fg())
            .add_modifier(Modifier::BOLD);
        frame.fill(menu, style);
        let buffer = frame.buffer_mut();
        let clip = menu.intersection(buffer.area);

        let horizontal = "─".repeat(width.saturating_sub(2) as usize);
        let right = menu.x + width - 1;
        let bottom = menu.y + height - 1;
        safe_set_string(buffer, clip, menu.x, menu.y, &format!("┌{horizontal}┐"), style);
        safe_set_string(buffer, clip, menu.x, bottom, &format!("└{horizontal}┘"), style);
        for y in menu.y + 1..bottom {
            safe_set_string(buffer, clip, menu.x, y, "│", style);
            safe_set_string(buffer, clip, right, y, "│", style);
        }

        let inner_width = width.saturating_sub(2);
        for (idx, label) in labels.iter().enumerate() {
            let y = menu.y + 1 + idx as u16;
            if y >= bottom {
                break;
            }
            let row = Rect {
                x: menu.x + 1,
                y,
                width: inner_width,
                height: 1,
            };
            let row_style = if idx == selected { selected_style } else { style };
            let text = format!(" {label:<w$}", w = inner_width.saturating_sub(1) as usize);
            safe_set_string(buffer, row.intersection(clip), row.x, y, &text, row_style);
            self.menu_item_hits.set(idx, row);
        }
        self.menu_bounds = Some(menu);
    }

    pub fn hit_test_start(&self, column: u16, row: u16) -> bool {
        self.start_rect
            .is_some_and(|rect| rect_contains(rect, column, row))
    }

    pub fn hit_test_window(&self, column: u16, row: u16) -> Option<WindowId> {
        self.window_hits.hit_test(column, row)
    }

    pub fn hit_test_menu_item(&self, column: u16, row: u16) -> Option<usize> {
        self.menu_item_hits.hit_test(column, row)
    }

    pub fn menu_contains_point(&self, column: u16, row: u16) -> bool {
        self.menu_bounds
            .is_some_and(|rect| rect_contains(rect, column, row))
    }

    fn hostname_label(&mut self) -> String {
        self.hostname
            .get_or_insert_with(|| {
                let host = hostname::get()
                    .ok()
                    .and_then(|s| s.into_string().ok())
                    .unwrap_or_else(|| "localhost".to_string());
                format!("{host} ")
            })
            .clone()
    }
}
