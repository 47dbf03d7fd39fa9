//! Per-call context handed to content providers.
//!
//! Providers are opaque to the window manager; the desktop tells them which
//! window they live in and whether that window currently has focus.

use crate::window::WindowId;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ComponentContext {
    window: Option<WindowId>,
    focused: bool,
}

impl ComponentContext {
    pub const fn new(window: WindowId, focused: bool) -> Self {
        Self {
            window: Some(window),
            focused,
        }
    }

    /// Context for a component rendered outside any window.
    pub const fn detached() -> Self {
        Self {
            window: None,
            focused: false,
        }
    }

    pub const fn window(&self) -> Option<WindowId> {
        self.window
    }

    pub const fn focused(&self) -> bool {
        self.focused
    }

    pub const fn with_focus(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }
}
