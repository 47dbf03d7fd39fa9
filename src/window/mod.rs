pub mod decorator;

mod window_manager;
use ratatui::prelude::Rect;

use crate::apps::AppKind;
use crate::layout::floating::ResizeEdge;

pub use window_manager::{HitRegion, WindowManager, WmPolicy};

/// Identifier handed out by a [`WindowManager`]; never reused within one manager.
pub type WindowId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn offset_from(self, origin: Point) -> Point {
        Point {
            x: self.x - origin.x,
            y: self.y - origin.y,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Size {
    pub width: u16,
    pub height: u16,
}

impl Size {
    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    /// Component-wise maximum, used to enforce minimum-size floors.
    pub fn at_least(self, min: Size) -> Size {
        Size {
            width: self.width.max(min.width),
            height: self.height.max(min.height),
        }
    }
}

/// Signed floating rectangle origin with unsigned size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FloatRect {
    pub x: i32,
    pub y: i32,
    pub width: u16,
    pub height: u16,
}

impl FloatRect {
    pub const fn new(x: i32, y: i32, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_parts(position: Point, size: Size) -> Self {
        Self::new(position.x, position.y, size.width, size.height)
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn right(&self) -> i32 {
        self.x.saturating_add(self.width as i32)
    }

    pub fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height as i32)
    }

    pub fn contains(&self, point: Point) -> bool {
        if self.width == 0 || self.height == 0 {
            return false;
        }
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }

    /// Portion of the rectangle that lies inside `bounds`, as an unsigned `Rect`.
    pub fn visible_in(&self, bounds: Rect) -> Rect {
        let left = self.x.max(bounds.x as i32);
        let top = self.y.max(bounds.y as i32);
        let right = self.right().min(bounds.x as i32 + bounds.width as i32);
        let bottom = self.bottom().min(bounds.y as i32 + bounds.height as i32);
        if right <= left || bottom <= top {
            return Rect::default();
        }
        Rect {
            x: left as u16,
            y: top as u16,
            width: (right - left) as u16,
            height: (bottom - top) as u16,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WindowState {
    #[default]
    Normal,
    Maximized,
    Minimized,
}

/// Per-window drag tracking: pointer position relative to the window origin
/// captured when the drag began.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragState {
    pub offset: Point,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeState {
    pub edge: ResizeEdge,
    pub pointer_start: Point,
    pub start: FloatRect,
}

#[derive(Debug, Clone)]
pub struct WindowEntity {
    id: WindowId,
    title: String,
    app_kind: AppKind,
    position: Point,
    size: Size,
    z_index: u64,
    state: WindowState,
    restore_state: WindowState,
    saved_geometry: Option<FloatRect>,
    drag: Option<DragState>,
    resize: Option<ResizeState>,
}

impl WindowEntity {
    fn new(id: WindowId, app_kind: AppKind, geometry: FloatRect, z_index: u64) -> Self {
        Self {
            id,
            title: app_kind.title(),
            app_kind,
            position: geometry.position(),
            size: geometry.size(),
            z_index,
            state: WindowState::Normal,
            restore_state: WindowState::Normal,
            saved_geometry: None,
            drag: None,
            resize: None,
        }
    }

    pub fn id(&self) -> WindowId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn app_kind(&self) -> &AppKind {
        &self.app_kind
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn rect(&self) -> FloatRect {
        FloatRect::from_parts(self.position, self.size)
    }

    pub fn z_index(&self) -> u64 {
        self.z_index
    }

    pub fn state(&self) -> WindowState {
        self.state
    }

    pub fn saved_geometry(&self) -> Option<FloatRect> {
        self.saved_geometry
    }

    pub fn is_minimized(&self) -> bool {
        self.state == WindowState::Minimized
    }

    pub fn is_maximized(&self) -> bool {
        self.state == WindowState::Maximized
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn is_resizing(&self) -> bool {
        self.resize.is_some()
    }

    fn set_rect(&mut self, rect: FloatRect) {
        self.position = rect.position();
        self.size = rect.size();
    }

    fn clear_interaction(&mut self) {
        self.drag = None;
        self.resize = None;
    }
}
