//! Desktop shell: routes terminal input to the window manager and draws the
//! whole screen (background icons, windows in stacking order, taskbar, start
//! menu).

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use crossterm::event::{Event, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};

use crate::apps::{AppKind, provider_for};
use crate::components::{Component, ComponentContext};
use crate::config::DeskConfig;
use crate::constants::ICON_COLUMN_WIDTH;
use crate::keybindings::{Action, KeyBindings};
use crate::layout::RegionMap;
use crate::panel::{Panel, StartMenuItem, TaskbarEntry};
use crate::state::{ClickTarget, DesktopState};
use crate::ui::{UiFrame, safe_set_string, truncate_to_width};
use crate::window::decorator::HeaderAction;
use crate::window::{FloatRect, HitRegion, Point, Size, WindowId, WindowManager, WmPolicy};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DesktopCommand {
    Continue,
    Quit,
}

pub struct Desktop {
    wm: WindowManager,
    contents: BTreeMap<WindowId, Box<dyn Component>>,
    panel: Panel,
    state: DesktopState,
    keys: KeyBindings,
    menu_items: Vec<StartMenuItem>,
    icon_hits: RegionMap<usize>,
    // window whose content took the last button press; drags and the
    // release are delivered there even if the pointer wanders off
    pointer_grab: Option<WindowId>,
}

impl Desktop {
    pub fn new(viewport: Size, policy: WmPolicy, double_click: Duration) -> Self {
        Self {
            wm: WindowManager::with_policy(viewport, policy),
            contents: BTreeMap::new(),
            panel: Panel::new(),
            state: DesktopState::new(double_click),
            keys: KeyBindings::default(),
            menu_items: StartMenuItem::catalog(),
            icon_hits: RegionMap::default(),
            pointer_grab: None,
        }
    }

    /// Desktop for a validated config, with the startup apps already open.
    pub fn from_config(viewport: Size, config: &DeskConfig) -> Self {
        let mut desktop = Self::new(viewport, config.policy, config.double_click);
        desktop
            .state
            .set_mouse_capture_enabled(config.mouse_capture);
        for kind in &config.open {
            desktop.open_app(kind.clone(), None);
        }
        desktop
    }

    pub fn wm(&self) -> &WindowManager {
        &self.wm
    }

    pub fn state(&self) -> &DesktopState {
        &self.state
    }

    pub fn has_content(&self, id: WindowId) -> bool {
        self.contents.contains_key(&id)
    }

    pub fn mouse_capture_enabled(&self) -> bool {
        self.state.mouse_capture_enabled()
    }

    pub fn take_mouse_capture_change(&mut self) -> Option<bool> {
        self.state.take_mouse_capture_change()
    }

    pub fn open_app(&mut self, kind: impl Into<AppKind>, geometry: Option<FloatRect>) -> WindowId {
        let kind = kind.into();
        let provider = provider_for(&kind);
        let id = self.wm.open_app(kind, geometry);
        self.contents.insert(id, provider);
        id
    }

    pub fn handle_event(&mut self, event: &Event) -> DesktopCommand {
        self.handle_event_at(event, Instant::now())
    }

    /// Route one input event. `now` timestamps clicks for double-click
    /// detection.
    pub fn handle_event_at(&mut self, event: &Event, now: Instant) -> DesktopCommand {
        let command = match event {
            Event::Resize(width, height) => {
                self.wm.set_viewport(Size::new(*width, *height));
                DesktopCommand::Continue
            }
            Event::FocusLost => {
                self.wm.cancel_interaction();
                self.pointer_grab = None;
                self.state.forget_clicks();
                DesktopCommand::Continue
            }
            Event::Mouse(mouse) if self.state.mouse_capture_enabled() => {
                self.handle_mouse(mouse, now)
            }
            Event::Key(key) => self.handle_key(key),
            Event::Paste(_) => {
                self.forward_to_active(event);
                DesktopCommand::Continue
            }
            _ => DesktopCommand::Continue,
        };
        self.drop_closed_contents();
        command
    }

    fn handle_mouse(&mut self, mouse: &MouseEvent, now: Instant) -> DesktopCommand {
        let point = Point::new(mouse.column as i32, mouse.row as i32);
        match mouse.kind {
            MouseEventKind::Down(button) => return self.pointer_down(mouse, button, point, now),
            MouseEventKind::Drag(_) => {
                if let Some(id) = self.wm.dragging() {
                    self.wm.update_drag(id, point);
                } else if let Some(id) = self.wm.resizing() {
                    self.wm.update_resize(id, point);
                } else if let Some(id) = self.pointer_grab {
                    self.forward_mouse(id, mouse);
                }
            }
            MouseEventKind::Up(_) => {
                if let Some(id) = self.wm.dragging() {
                    self.wm.end_drag(id);
                }
                if let Some(id) = self.wm.resizing() {
                    self.wm.end_resize(id);
                }
                if let Some(id) = self.pointer_grab.take() {
                    self.forward_mouse(id, mouse);
                }
            }
            MouseEventKind::ScrollUp | MouseEventKind::ScrollDown => {
                if let Some(id) = self.wm.window_at(point)
                    && self.wm.hit_test(id, point) == Some(HitRegion::Content)
                {
                    self.forward_mouse(id, mouse);
                }
            }
            _ => {}
        }
        DesktopCommand::Continue
    }

    fn pointer_down(
        &mut self,
        mouse: &MouseEvent,
        button: MouseButton,
        point: Point,
        now: Instant,
    ) -> DesktopCommand {
        let (column, row) = (mouse.column, mouse.row);

        if self.panel.hit_test_start(column, row) {
            self.state.toggle_menu();
            return DesktopCommand::Continue;
        }

        if self.state.menu_open() {
            if let Some(idx) = self.panel.hit_test_menu_item(column, row) {
                return self.activate_menu_item(idx);
            }
            let on_frame = self.panel.menu_contains_point(column, row);
            self.state.close_menu();
            if on_frame {
                return DesktopCommand::Continue;
            }
        }

        if self.panel.contains(column, row) {
            if let Some(id) = self.panel.hit_test_window(column, row) {
                self.wm.toggle_from_taskbar(id);
            }
            return DesktopCommand::Continue;
        }

        let Some(id) = self.wm.window_at(point) else {
            self.click_background(button, column, row, now);
            return DesktopCommand::Continue;
        };
        self.state.set_selected_icon(None);
        let Some(region) = self.wm.hit_test(id, point) else {
            return DesktopCommand::Continue;
        };
        if button != MouseButton::Left {
            self.wm.focus_window(id);
            if region == HitRegion::Content {
                self.forward_mouse(id, mouse);
            }
            return DesktopCommand::Continue;
        }
        match region {
            HitRegion::Control(HeaderAction::Minimize) => self.wm.minimize_window(id),
            HitRegion::Control(HeaderAction::Maximize) => self.wm.toggle_maximize(id),
            HitRegion::Control(HeaderAction::Close) => self.wm.close_window(id),
            HitRegion::Control(_) => self.wm.focus_window(id),
            HitRegion::TitleBar => {
                if self.state.register_click(ClickTarget::TitleBar(id), now) {
                    self.wm.toggle_maximize(id);
                } else if !self.wm.begin_drag(id, point) {
                    self.wm.focus_window(id);
                }
            }
            HitRegion::Border(edge) => {
                if !self.wm.begin_resize(id, edge, point) {
                    self.wm.focus_window(id);
                }
            }
            HitRegion::Content => {
                self.wm.focus_window(id);
                self.pointer_grab = Some(id);
                self.forward_mouse(id, mouse);
            }
        }
        DesktopCommand::Continue
    }

    fn click_background(&mut self, button: MouseButton, column: u16, row: u16, now: Instant) {
        let icon = self.icon_hits.hit_test(column, row);
        match icon {
            Some(idx) if button == MouseButton::Left => {
                self.state.set_selected_icon(Some(idx));
                if self.state.register_click(ClickTarget::Icon(idx), now)
                    && let Some(kind) = AppKind::ALL.get(idx).cloned()
                {
                    self.open_app(kind, None);
                }
            }
            _ => {
                self.state.set_selected_icon(None);
                self.state.forget_clicks();
            }
        }
    }

    fn handle_key(&mut self, key: &KeyEvent) -> DesktopCommand {
        if key.kind == KeyEventKind::Release {
            return DesktopCommand::Continue;
        }
        if self.keys.matches(Action::Quit, key) {
            return DesktopCommand::Quit;
        }

        if self.state.menu_open() {
            let len = self.menu_items.len();
            let menu_actions = [
                Action::MenuUp,
                Action::MenuDown,
                Action::MenuSelect,
                Action::MenuClose,
                Action::ToggleStartMenu,
            ];
            match self.keys.first_match(&menu_actions, key) {
                Some(Action::MenuUp) => self.state.move_menu_selection(-1, len),
                Some(Action::MenuDown) => self.state.move_menu_selection(1, len),
                Some(Action::MenuSelect) => {
                    let selected = self.state.menu_selected();
                    return self.activate_menu_item(selected);
                }
                Some(_) => self.state.close_menu(),
                None => {}
            }
            return DesktopCommand::Continue;
        }

        let global = [
            Action::CloseWindow,
            Action::MinimizeWindow,
            Action::ToggleMaximize,
            Action::CycleNextWindow,
            Action::CyclePrevWindow,
            Action::ToggleStartMenu,
            Action::ToggleMouseCapture,
        ];
        let active = self.wm.active();
        match (self.keys.first_match(&global, key), active) {
            (Some(Action::CloseWindow), Some(id)) => self.wm.close_window(id),
            (Some(Action::MinimizeWindow), Some(id)) => self.wm.minimize_window(id),
            (Some(Action::ToggleMaximize), Some(id)) => self.wm.toggle_maximize(id),
            (Some(Action::CycleNextWindow), _) => self.wm.cycle_focus(true),
            (Some(Action::CyclePrevWindow), _) => self.wm.cycle_focus(false),
            (Some(Action::ToggleStartMenu), _) => self.state.toggle_menu(),
            (Some(Action::ToggleMouseCapture), _) => self.state.toggle_mouse_capture(),
            (None, _) => {
                self.forward_to_active(&Event::Key(*key));
            }
            // window actions with nothing focused
            (Some(_), _) => {}
        }
        DesktopCommand::Continue
    }

    fn activate_menu_item(&mut self, idx: usize) -> DesktopCommand {
        self.state.close_menu();
        match self.menu_items.get(idx).cloned() {
            Some(StartMenuItem::Launch(kind)) => {
                self.open_app(kind, None);
                DesktopCommand::Continue
            }
            Some(StartMenuItem::Exit) => DesktopCommand::Quit,
            None => DesktopCommand::Continue,
        }
    }

    fn forward_to_active(&mut self, event: &Event) -> bool {
        let Some(id) = self.wm.active() else {
            return false;
        };
        let ctx = ComponentContext::new(id, true);
        self.contents
            .get_mut(&id)
            .is_some_and(|content| content.handle_event(event, &ctx))
    }

    /// Deliver a mouse event to a window's content, rebased so (0, 0) is the
    /// content's top-left cell.
    fn forward_mouse(&mut self, id: WindowId, mouse: &MouseEvent) -> bool {
        let Some(window) = self.wm.window(id) else {
            return false;
        };
        let content = self.wm.decorator().content_rect(window.rect());
        let local = MouseEvent {
            kind: mouse.kind,
            column: to_local(mouse.column, content.x, content.width),
            row: to_local(mouse.row, content.y, content.height),
            modifiers: mouse.modifiers,
        };
        let ctx = ComponentContext::new(id, self.wm.active() == Some(id));
        self.contents
            .get_mut(&id)
            .is_some_and(|c| c.handle_event(&Event::Mouse(local), &ctx))
    }

    fn drop_closed_contents(&mut self) {
        for id in self.wm.take_closed_windows() {
            if self.contents.remove(&id).is_some() {
                tracing::trace!(window_id = id, "dropped window content");
            }
            if self.pointer_grab == Some(id) {
                self.pointer_grab = None;
            }
        }
    }

    pub fn draw(&mut self, frame: &mut UiFrame<'_>) {
        self.drop_closed_contents();
        let screen = frame.area();
        let viewport = Size::new(screen.width, screen.height);
        if self.wm.viewport() != viewport {
            self.wm.set_viewport(viewport);
        }
        let desk = self.wm.available_area();

        self.panel.begin_frame();
        self.panel.layout(screen, self.wm.policy().taskbar_height);

        frame.fill(
            desk,
            Style::default()
                .bg(crate::theme::desktop_bg())
                .fg(crate::theme::desktop_fg()),
        );
        self.draw_icons(frame, desk);

        let decorator = self.wm.decorator();
        for id in self.wm.stacking_order() {
            let Some(window) = self.wm.window(id) else {
                continue;
            };
            let rect = window.rect();
            let focused = self.wm.active() == Some(id);
            let content = decorator.content_rect(rect);
            if content.width > 0
                && content.height > 0
                && let Some(component) = self.contents.get_mut(&id)
            {
                // Render at the logical size, then composite so partially
                // off-screen windows clip instead of squashing.
                let local = Rect::new(0, 0, content.width, content.height);
                let mut scratch = Buffer::empty(local);
                let ctx = ComponentContext::new(id, focused);
                {
                    let mut offscreen = UiFrame::from_parts(local, &mut scratch);
                    offscreen.fill(local, Style::default().bg(crate::theme::window_bg()));
                    component.resize(local, &ctx);
                    component.render(&mut offscreen, local, &ctx);
                }
                frame.blit_from_signed(&scratch, content);
            }
            decorator.render_window(
                frame,
                rect,
                desk,
                window.title(),
                focused,
                window.is_maximized(),
            );
        }

        let active = self.wm.active();
        let entries: Vec<TaskbarEntry> = self
            .wm
            .windows()
            .map(|w| TaskbarEntry {
                id: w.id(),
                label: w.title().to_string(),
                active: active == Some(w.id()),
                minimized: w.is_minimized(),
            })
            .collect();
        self.panel.render(frame, &entries, self.state.menu_open());
        if self.state.menu_open() {
            self.panel
                .render_menu(frame, desk, &self.menu_items, self.state.menu_selected());
        }
    }

    fn draw_icons(&mut self, frame: &mut UiFrame<'_>, desk: Rect) {
        self.icon_hits.clear();
        let base = Style::default()
            .bg(crate::theme::desktop_bg())
            .fg(crate::theme::desktop_fg());
        let selected_style = Style::default()
            .bg(crate::theme::icon_selected_bg())
            .fg(crate::theme::icon_selected_fg())
            .add_modifier(Modifier::BOLD);
        let width = ICON_COLUMN_WIDTH as usize;
        let buffer = frame.buffer_mut();
        for (idx, kind) in AppKind::ALL.iter().enumerate() {
            let y = desk.y + 1 + idx as u16 * 3;
            if y + 1 >= desk.y + desk.height {
                break;
            }
            let rect = Rect::new(desk.x + 1, y, ICON_COLUMN_WIDTH, 2).intersection(desk);
            let style = if self.state.selected_icon() == Some(idx) {
                selected_style
            } else {
                base
            };
            let glyph = format!("{:^width$}", kind.icon());
            let label = format!("{:^width$}", truncate_to_width(&kind.title(), width));
            safe_set_string(buffer, desk, rect.x, y, &glyph, style);
            safe_set_string(buffer, desk, rect.x, y + 1, &label, style);
            self.icon_hits.set(idx, rect);
        }
    }
}

fn to_local(coordinate: u16, origin: i32, extent: u16) -> u16 {
    let max = extent.saturating_sub(1) as i32;
    (coordinate as i32 - origin).clamp(0, max) as u16
}
