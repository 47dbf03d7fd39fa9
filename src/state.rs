use std::time::{Duration, Instant};

use crate::window::WindowId;

/// Things that react to a double-click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    TitleBar(WindowId),
    Icon(usize),
}

/// Desktop-level UI state that lives outside the window manager.
#[derive(Debug, Clone)]
pub struct DesktopState {
    menu_open: bool,
    menu_selected: usize,
    selected_icon: Option<usize>,
    last_click: Option<(ClickTarget, Instant)>,
    double_click: Duration,
    mouse_capture_enabled: bool,
    mouse_capture_dirty: bool,
}

impl DesktopState {
    pub fn new(double_click: Duration) -> Self {
        Self {
            menu_open: false,
            menu_selected: 0,
            selected_icon: None,
            last_click: None,
            double_click,
            mouse_capture_enabled: true,
            mouse_capture_dirty: false,
        }
    }

    pub fn menu_open(&self) -> bool {
        self.menu_open
    }

    pub fn open_menu(&mut self) {
        self.menu_open = true;
        self.menu_selected = 0;
    }

    pub fn close_menu(&mut self) {
        self.menu_open = false;
    }

    pub fn toggle_menu(&mut self) {
        if self.menu_open {
            self.close_menu();
        } else {
            self.open_menu();
        }
    }

    pub fn menu_selected(&self) -> usize {
        self.menu_selected
    }

    /// Move the menu highlight by `delta`, wrapping within `len` entries.
    pub fn move_menu_selection(&mut self, delta: isize, len: usize) {
        if len == 0 {
            self.menu_selected = 0;
            return;
        }
        let next = (self.menu_selected as isize + delta).rem_euclid(len as isize);
        self.menu_selected = next as usize;
    }

    pub fn selected_icon(&self) -> Option<usize> {
        self.selected_icon
    }

    pub fn set_selected_icon(&mut self, icon: Option<usize>) {
        self.selected_icon = icon;
    }

    /// Record a click and report whether it completes a double-click on the
    /// same target. A completed double-click resets tracking so a third
    /// click starts over.
    pub fn register_click(&mut self, target: ClickTarget, at: Instant) -> bool {
        if let Some((previous, when)) = self.last_click
            && previous == target
            && at.saturating_duration_since(when) <= self.double_click
        {
            self.last_click = None;
            return true;
        }
        self.last_click = Some((target, at));
        false
    }

    pub fn forget_clicks(&mut self) {
        self.last_click = None;
    }

    pub fn mouse_capture_enabled(&self) -> bool {
        self.mouse_capture_enabled
    }

    pub fn set_mouse_capture_enabled(&mut self, enabled: bool) {
        if self.mouse_capture_enabled == enabled {
            return;
        }
        self.mouse_capture_enabled = enabled;
        self.mouse_capture_dirty = true;
    }

    pub fn toggle_mouse_capture(&mut self) {
        let enabled = !self.mouse_capture_enabled;
        self.set_mouse_capture_enabled(enabled);
    }

    pub fn take_mouse_capture_change(&mut self) -> Option<bool> {
        if self.mouse_capture_dirty {
            self.mouse_capture_dirty = false;
            Some(self.mouse_capture_enabled)
        } else {
            None
        }
    }
}
