use std::collections::BTreeMap;
use std::sync::Arc;

use ratatui::prelude::Rect;

use super::decorator::{DefaultDecorator, HeaderAction, WindowDecorator};
use super::{
    DragState, FloatRect, Point, ResizeState, Size, WindowEntity, WindowId, WindowState,
};
use crate::apps::AppKind;
use crate::constants::{
    CASCADE_ORIGIN_X, CASCADE_ORIGIN_Y, CASCADE_STEP_X, CASCADE_STEP_Y, DEFAULT_WINDOW_HEIGHT,
    DEFAULT_WINDOW_WIDTH, MIN_WINDOW_HEIGHT, MIN_WINDOW_WIDTH, TASKBAR_HEIGHT,
};
use crate::layout::floating::{ResizeEdge, apply_drag, apply_resize, resize_edge_at};

/// Geometry rules the manager applies when spawning, maximizing, dragging
/// and resizing windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WmPolicy {
    /// Rows at the bottom of the viewport kept free for the taskbar.
    pub taskbar_height: u16,
    pub cascade_origin: Point,
    /// Per-ordinal offset for default spawn positions.
    pub cascade_step: Point,
    pub default_size: Size,
    pub min_size: Size,
    /// Keep dragged windows horizontally inside the viewport. Off by
    /// default: only the top edge is clamped.
    pub clamp_horizontal: bool,
}

impl Default for WmPolicy {
    fn default() -> Self {
        Self {
            taskbar_height: TASKBAR_HEIGHT,
            cascade_origin: Point::new(CASCADE_ORIGIN_X, CASCADE_ORIGIN_Y),
            cascade_step: Point::new(CASCADE_STEP_X, CASCADE_STEP_Y),
            default_size: Size::new(DEFAULT_WINDOW_WIDTH, DEFAULT_WINDOW_HEIGHT),
            min_size: Size::new(MIN_WINDOW_WIDTH, MIN_WINDOW_HEIGHT),
            clamp_horizontal: false,
        }
    }
}

/// Where a point lands on a particular window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitRegion {
    TitleBar,
    Control(HeaderAction),
    Border(ResizeEdge),
    Content,
}

/// Owner of the window registry.
///
/// Every operation addressing an unknown id is a silent no-op: input events
/// for a window can still be queued after that window was closed.
#[derive(Debug)]
pub struct WindowManager {
    windows: BTreeMap<WindowId, WindowEntity>,
    next_id: WindowId,
    top_z: u64,
    active: Option<WindowId>,
    // window holding the live drag or resize, if any
    grabbed: Option<WindowId>,
    viewport: Size,
    policy: WmPolicy,
    decorator: Arc<dyn WindowDecorator>,
    // queue of ids removed since the last `take_closed_windows`
    closed: Vec<WindowId>,
}

impl WindowManager {
    pub fn new(viewport: Size) -> Self {
        Self::with_policy(viewport, WmPolicy::default())
    }

    pub fn with_policy(viewport: Size, policy: WmPolicy) -> Self {
        Self {
            windows: BTreeMap::new(),
            next_id: 1,
            top_z: 0,
            active: None,
            grabbed: None,
            viewport,
            policy,
            decorator: Arc::new(DefaultDecorator),
            closed: Vec::new(),
        }
    }

    pub fn decorator(&self) -> Arc<dyn WindowDecorator> {
        Arc::clone(&self.decorator)
    }

    pub fn policy(&self) -> &WmPolicy {
        &self.policy
    }

    pub fn viewport(&self) -> Size {
        self.viewport
    }

    /// Viewport minus the rows reserved for the taskbar.
    pub fn available_area(&self) -> Rect {
        Rect {
            x: 0,
            y: 0,
            width: self.viewport.width,
            height: self
                .viewport
                .height
                .saturating_sub(self.policy.taskbar_height),
        }
    }

    pub fn set_viewport(&mut self, viewport: Size) {
        if self.viewport == viewport {
            return;
        }
        tracing::debug!(width = viewport.width, height = viewport.height, "viewport resized");
        self.viewport = viewport;
        let full = self.maximized_rect();
        for window in self.windows.values_mut() {
            let maximized = window.state == WindowState::Maximized
                || (window.state == WindowState::Minimized
                    && window.restore_state == WindowState::Maximized);
            if maximized {
                window.set_rect(full);
            }
        }
    }

    pub fn window(&self, id: WindowId) -> Option<&WindowEntity> {
        self.windows.get(&id)
    }

    /// All registered windows, minimized ones included, in id order.
    pub fn windows(&self) -> impl Iterator<Item = &WindowEntity> {
        self.windows.values()
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    pub fn active(&self) -> Option<WindowId> {
        self.active
    }

    pub fn take_closed_windows(&mut self) -> Vec<WindowId> {
        std::mem::take(&mut self.closed)
    }

    /// Open a window for `kind`. Unknown kinds get a placeholder window;
    /// this never fails.
    pub fn open_app(&mut self, kind: impl Into<AppKind>, geometry: Option<FloatRect>) -> WindowId {
        let kind = kind.into();
        let id = self.next_id;
        self.next_id = self.next_id.saturating_add(1);
        let rect = match geometry {
            Some(rect) => FloatRect::from_parts(
                self.clamp_origin(rect.position()),
                rect.size().at_least(self.policy.min_size),
            ),
            None => {
                let size = self.default_size();
                FloatRect::from_parts(self.cascade_position(id - 1, size), size)
            }
        };
        self.top_z += 1;
        tracing::debug!(window_id = id, kind = %kind, z = self.top_z, ?rect, "opened window");
        self.windows
            .insert(id, WindowEntity::new(id, kind, rect, self.top_z));
        self.active = Some(id);
        id
    }

    pub fn close_window(&mut self, id: WindowId) {
        if self.windows.remove(&id).is_none() {
            return;
        }
        tracing::debug!(window_id = id, "closing window");
        if self.grabbed == Some(id) {
            self.grabbed = None;
        }
        if self.active == Some(id) {
            self.select_fallback_focus();
        }
        self.closed.push(id);
    }

    /// Make `id` active and raise it above every other window. Focusing the
    /// already-active window still raises it. Minimized windows must go
    /// through [`restore_window`](Self::restore_window) instead.
    pub fn focus_window(&mut self, id: WindowId) {
        let Some(window) = self.windows.get_mut(&id) else {
            return;
        };
        if window.state == WindowState::Minimized {
            return;
        }
        self.top_z += 1;
        window.z_index = self.top_z;
        self.active = Some(id);
        tracing::trace!(window_id = id, z = self.top_z, "focused window");
    }

    pub fn minimize_window(&mut self, id: WindowId) {
        let Some(window) = self.windows.get_mut(&id) else {
            return;
        };
        if window.state == WindowState::Minimized {
            return;
        }
        window.restore_state = window.state;
        window.state = WindowState::Minimized;
        window.clear_interaction();
        tracing::debug!(window_id = id, "minimized window");
        if self.grabbed == Some(id) {
            self.grabbed = None;
        }
        if self.active == Some(id) {
            self.select_fallback_focus();
        }
    }

    /// Bring a minimized window back to the state it had before minimizing,
    /// then focus it.
    pub fn restore_window(&mut self, id: WindowId) {
        let full = self.maximized_rect();
        let Some(window) = self.windows.get_mut(&id) else {
            return;
        };
        if window.state == WindowState::Minimized {
            window.state = window.restore_state;
            if window.state == WindowState::Maximized {
                window.set_rect(full);
            }
            tracing::debug!(window_id = id, state = ?window.state, "restored window");
        }
        self.focus_window(id);
    }

    pub fn toggle_maximize(&mut self, id: WindowId) {
        let full = self.maximized_rect();
        let Some(window) = self.windows.get_mut(&id) else {
            return;
        };
        let current = if window.state == WindowState::Minimized {
            window.restore_state
        } else {
            window.state
        };
        window.clear_interaction();
        if current == WindowState::Maximized {
            let restored = window.saved_geometry.take().unwrap_or_else(|| window.rect());
            window.set_rect(restored);
            window.state = WindowState::Normal;
        } else {
            window.saved_geometry = Some(window.rect());
            window.set_rect(full);
            window.state = WindowState::Maximized;
        }
        window.restore_state = window.state;
        tracing::debug!(window_id = id, state = ?window.state, "toggled maximize");
        if self.grabbed == Some(id) {
            self.grabbed = None;
        }
        self.focus_window(id);
    }

    /// Start dragging `id` from `pointer`. Refused (returns `false`) when the
    /// pointer is on a title-bar control, or the window is minimized,
    /// maximized or unknown.
    pub fn begin_drag(&mut self, id: WindowId, pointer: Point) -> bool {
        let Some(window) = self.windows.get(&id) else {
            return false;
        };
        if window.state != WindowState::Normal {
            return false;
        }
        if self.decorator.hit_test(window.rect(), pointer).is_control() {
            return false;
        }
        self.cancel_interaction();
        self.focus_window(id);
        if let Some(window) = self.windows.get_mut(&id) {
            window.drag = Some(DragState {
                offset: pointer.offset_from(window.position),
            });
            self.grabbed = Some(id);
        }
        true
    }

    pub fn update_drag(&mut self, id: WindowId, pointer: Point) {
        let bounds = self.available_area();
        let clamp_horizontal = self.policy.clamp_horizontal;
        let Some(window) = self.windows.get_mut(&id) else {
            return;
        };
        let Some(drag) = window.drag else {
            return;
        };
        window.position = apply_drag(drag.offset, pointer, window.size, bounds, clamp_horizontal);
        tracing::trace!(window_id = id, x = window.position.x, y = window.position.y, "drag");
    }

    pub fn end_drag(&mut self, id: WindowId) {
        let Some(window) = self.windows.get_mut(&id) else {
            return;
        };
        if window.drag.take().is_some() && self.grabbed == Some(id) {
            self.grabbed = None;
        }
    }

    pub fn begin_resize(&mut self, id: WindowId, edge: ResizeEdge, pointer: Point) -> bool {
        let Some(window) = self.windows.get(&id) else {
            return false;
        };
        if window.state != WindowState::Normal {
            return false;
        }
        self.cancel_interaction();
        self.focus_window(id);
        if let Some(window) = self.windows.get_mut(&id) {
            window.resize = Some(ResizeState {
                edge,
                pointer_start: pointer,
                start: window.rect(),
            });
            self.grabbed = Some(id);
        }
        true
    }

    pub fn update_resize(&mut self, id: WindowId, pointer: Point) {
        let min = self.policy.min_size;
        let Some(window) = self.windows.get_mut(&id) else {
            return;
        };
        let Some(resize) = window.resize else {
            return;
        };
        let rect = apply_resize(resize.start, resize.edge, resize.pointer_start, pointer, min);
        window.set_rect(rect);
        tracing::trace!(window_id = id, ?rect, "resize");
    }

    pub fn end_resize(&mut self, id: WindowId) {
        let Some(window) = self.windows.get_mut(&id) else {
            return;
        };
        if window.resize.take().is_some() && self.grabbed == Some(id) {
            self.grabbed = None;
        }
    }

    /// Abort whatever drag or resize is live, leaving geometry where the
    /// last update put it.
    pub fn cancel_interaction(&mut self) {
        if let Some(id) = self.grabbed.take()
            && let Some(window) = self.windows.get_mut(&id)
        {
            window.clear_interaction();
        }
    }

    pub fn dragging(&self) -> Option<WindowId> {
        self.grabbed
            .filter(|id| self.windows.get(id).is_some_and(|w| w.is_dragging()))
    }

    pub fn resizing(&self) -> Option<WindowId> {
        self.grabbed
            .filter(|id| self.windows.get(id).is_some_and(|w| w.is_resizing()))
    }

    /// Taskbar button semantics: restore a minimized window, minimize the
    /// active one, focus anything else.
    pub fn toggle_from_taskbar(&mut self, id: WindowId) {
        let Some(window) = self.windows.get(&id) else {
            return;
        };
        if window.is_minimized() {
            self.restore_window(id);
        } else if self.active == Some(id) {
            self.minimize_window(id);
        } else {
            self.focus_window(id);
        }
    }

    /// Move focus to the next (or previous) visible window in id order.
    pub fn cycle_focus(&mut self, forward: bool) {
        let order: Vec<WindowId> = self
            .windows
            .values()
            .filter(|w| !w.is_minimized())
            .map(|w| w.id)
            .collect();
        if order.is_empty() {
            return;
        }
        let next = match self.active.and_then(|id| order.iter().position(|x| *x == id)) {
            Some(idx) => {
                let step = if forward { 1isize } else { -1isize };
                ((idx as isize + step).rem_euclid(order.len() as isize)) as usize
            }
            None => 0,
        };
        self.focus_window(order[next]);
    }

    /// Visible window ids from bottom to top; the render order.
    pub fn stacking_order(&self) -> Vec<WindowId> {
        let mut visible: Vec<&WindowEntity> =
            self.windows.values().filter(|w| !w.is_minimized()).collect();
        visible.sort_by_key(|w| w.z_index);
        visible.into_iter().map(|w| w.id).collect()
    }

    /// Topmost visible window under `point`.
    pub fn window_at(&self, point: Point) -> Option<WindowId> {
        self.stacking_order()
            .into_iter()
            .rev()
            .find(|id| self.windows.get(id).is_some_and(|w| w.rect().contains(point)))
    }

    pub fn hit_test(&self, id: WindowId, point: Point) -> Option<HitRegion> {
        let window = self.windows.get(&id)?;
        if window.is_minimized() {
            return None;
        }
        let rect = window.rect();
        if !rect.contains(point) {
            return None;
        }
        let action = self.decorator.hit_test(rect, point);
        if action.is_control() {
            return Some(HitRegion::Control(action));
        }
        if !window.is_maximized()
            && let Some(edge) = resize_edge_at(rect, point)
        {
            return Some(HitRegion::Border(edge));
        }
        if point.y == rect.y {
            return Some(HitRegion::TitleBar);
        }
        Some(HitRegion::Content)
    }

    fn select_fallback_focus(&mut self) {
        self.active = self
            .windows
            .values()
            .filter(|w| !w.is_minimized())
            .max_by_key(|w| w.z_index)
            .map(|w| w.id);
        tracing::trace!(active = ?self.active, "fallback focus");
    }

    /// Keep a caller-supplied origin within one `u16` span of the viewport
    /// so edge arithmetic stays in range.
    fn clamp_origin(&self, origin: Point) -> Point {
        let span = u16::MAX as i32;
        Point {
            x: origin.x.clamp(-span, self.viewport.width as i32 + span),
            y: origin.y.clamp(-span, self.viewport.height as i32 + span),
        }
    }

    fn maximized_rect(&self) -> FloatRect {
        let area = self.available_area();
        FloatRect::new(0, 0, area.width, area.height)
    }

    fn default_size(&self) -> Size {
        let area = self.available_area();
        Size {
            width: self.policy.default_size.width.min(area.width),
            height: self.policy.default_size.height.min(area.height),
        }
        .at_least(self.policy.min_size)
    }

    /// Cascade position for the `ordinal`-th window, wrapped so a window of
    /// `size` stays within the available area.
    fn cascade_position(&self, ordinal: u64, size: Size) -> Point {
        let area = self.available_area();
        let axis = |origin: i32, step: i32, extent: u16, len: u16| -> i32 {
            let room = (extent as i32 - len as i32).max(0);
            let origin = origin.clamp(0, room);
            let span = (room - origin) as i64 + 1;
            if step <= 0 {
                return origin;
            }
            origin + ((ordinal as i64 * step as i64) % span) as i32
        };
        Point {
            x: axis(
                self.policy.cascade_origin.x,
                self.policy.cascade_step.x,
                area.width,
                size.width,
            ),
            y: axis(
                self.policy.cascade_origin.y,
                self.policy.cascade_step.y,
                area.height,
                size.height,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn wm() -> WindowManager {
        WindowManager::new(Size::new(120, 40))
    }

    fn z(wm: &WindowManager, id: WindowId) -> u64 {
        wm.window(id).map(|w| w.z_index()).unwrap_or_default()
    }

    #[test]
    fn ids_are_strictly_increasing() {
        let mut wm = wm();
        let ids: Vec<WindowId> = (0..6).map(|_| wm.open_app(AppKind::About, None)).collect();
        assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));
        wm.close_window(ids[5]);
        let next = wm.open_app(AppKind::About, None);
        assert!(next > ids[5], "closed ids must not be reused");
    }

    #[test]
    fn open_focuses_new_window_on_top() {
        let mut wm = wm();
        let a = wm.open_app(AppKind::About, None);
        let b = wm.open_app(AppKind::Terminal, None);
        assert_eq!(wm.active(), Some(b));
        assert!(z(&wm, b) > z(&wm, a));
        assert_eq!(wm.window(b).map(|w| w.title()), Some("Terminal"));
    }

    #[test]
    fn unknown_kind_opens_placeholder() {
        let mut wm = wm();
        let id = wm.open_app("solitaire", None);
        let w = wm.window(id).expect("window");
        assert_eq!(w.app_kind(), &AppKind::Other("solitaire".into()));
        assert_eq!(w.title(), "solitaire");
    }

    #[test]
    fn cascade_avoids_exact_overlap() {
        let mut wm = wm();
        let a = wm.open_app(AppKind::About, None);
        let b = wm.open_app(AppKind::About, None);
        let pa = wm.window(a).map(|w| w.position());
        let pb = wm.window(b).map(|w| w.position());
        assert_ne!(pa, pb);
    }

    #[test]
    fn cascade_wraps_inside_viewport() {
        let mut wm = WindowManager::new(Size::new(70, 24));
        for _ in 0..40 {
            let id = wm.open_app(AppKind::Editor, None);
            let rect = wm.window(id).map(|w| w.rect()).expect("window");
            assert!(rect.x >= 0 && rect.right() <= 70, "{rect:?}");
            assert!(rect.y >= 0 && rect.bottom() <= 23, "{rect:?}");
        }
    }

    #[test]
    fn explicit_geometry_is_honoured_with_floor() {
        let mut wm = wm();
        let id = wm.open_app(AppKind::Mail, Some(FloatRect::new(-5, 3, 2, 1)));
        let rect = wm.window(id).map(|w| w.rect()).expect("window");
        assert_eq!(rect, FloatRect::new(-5, 3, MIN_WINDOW_WIDTH, MIN_WINDOW_HEIGHT));
    }

    #[test]
    fn far_off_origins_are_pulled_toward_the_viewport() {
        let mut wm = wm();
        let id = wm.open_app(AppKind::About, Some(FloatRect::new(i32::MAX - 5, i32::MIN, 30, 10)));
        let rect = wm.window(id).map(|w| w.rect()).expect("window");
        let span = u16::MAX as i32;
        assert_eq!(rect.position(), Point::new(120 + span, -span));
        assert_eq!(rect.right(), 120 + span + 30);
        assert_eq!(wm.window_at(Point::new(0, 0)), None);
    }

    #[test]
    fn z_indices_stay_unique() {
        let mut wm = wm();
        let ids: Vec<WindowId> = (0..5).map(|_| wm.open_app(AppKind::About, None)).collect();
        for id in [ids[2], ids[0], ids[2], ids[4], ids[1], ids[1]] {
            wm.focus_window(id);
            let zs: BTreeSet<u64> = wm.windows().map(|w| w.z_index()).collect();
            assert_eq!(zs.len(), wm.len());
        }
    }

    #[test]
    fn focus_raises_strictly_above_everything() {
        let mut wm = wm();
        let a = wm.open_app(AppKind::About, None);
        let b = wm.open_app(AppKind::About, None);
        wm.focus_window(a);
        assert_eq!(wm.active(), Some(a));
        assert!(z(&wm, a) > z(&wm, b));
        let before = z(&wm, a);
        wm.focus_window(a);
        assert!(z(&wm, a) > before, "refocus still raises");
    }

    #[test]
    fn close_active_falls_back_to_next_highest() {
        let mut wm = wm();
        let a = wm.open_app(AppKind::About, None);
        let b = wm.open_app(AppKind::Projects, None);
        let c = wm.open_app(AppKind::Terminal, None);
        wm.focus_window(c);
        wm.focus_window(b);
        assert!(z(&wm, a) < z(&wm, c) && z(&wm, c) < z(&wm, b));
        wm.close_window(b);
        assert_eq!(wm.active(), Some(c));
        assert_eq!(wm.take_closed_windows(), vec![b]);
        assert!(wm.take_closed_windows().is_empty());
    }

    #[test]
    fn close_inactive_keeps_focus() {
        let mut wm = wm();
        let a = wm.open_app(AppKind::About, None);
        let b = wm.open_app(AppKind::About, None);
        wm.close_window(a);
        assert_eq!(wm.active(), Some(b));
        wm.close_window(b);
        assert_eq!(wm.active(), None);
        assert!(wm.is_empty());
    }

    #[test]
    fn minimized_window_never_gets_fallback_focus() {
        let mut wm = wm();
        let a = wm.open_app(AppKind::About, None);
        let b = wm.open_app(AppKind::About, None);
        let c = wm.open_app(AppKind::About, None);
        wm.focus_window(b);
        wm.minimize_window(b);
        // b still has the highest z but is minimized
        assert!(z(&wm, b) > z(&wm, c));
        assert_eq!(wm.active(), Some(c));
        wm.close_window(c);
        assert_eq!(wm.active(), Some(a));
        wm.minimize_window(a);
        assert_eq!(wm.active(), None);
        assert_eq!(wm.len(), 2);
        assert!(wm.stacking_order().is_empty());
    }

    #[test]
    fn focusing_a_minimized_window_is_ignored() {
        let mut wm = wm();
        let a = wm.open_app(AppKind::About, None);
        let b = wm.open_app(AppKind::About, None);
        wm.minimize_window(a);
        let before = z(&wm, a);
        wm.focus_window(a);
        assert_eq!(wm.active(), Some(b));
        assert_eq!(z(&wm, a), before);
    }

    #[test]
    fn unknown_ids_are_noops() {
        let mut wm = wm();
        let a = wm.open_app(AppKind::About, None);
        let snapshot: Vec<(WindowId, u64, FloatRect)> =
            wm.windows().map(|w| (w.id(), w.z_index(), w.rect())).collect();
        for id in [0, 42, a + 1] {
            wm.close_window(id);
            wm.focus_window(id);
            wm.minimize_window(id);
            wm.restore_window(id);
            wm.toggle_maximize(id);
            wm.toggle_from_taskbar(id);
            assert!(!wm.begin_drag(id, Point::new(1, 1)));
            wm.update_drag(id, Point::new(5, 5));
            wm.end_drag(id);
            assert!(!wm.begin_resize(id, ResizeEdge::Right, Point::new(1, 1)));
            wm.update_resize(id, Point::new(9, 9));
            wm.end_resize(id);
        }
        let after: Vec<(WindowId, u64, FloatRect)> =
            wm.windows().map(|w| (w.id(), w.z_index(), w.rect())).collect();
        assert_eq!(snapshot, after);
        assert_eq!(wm.active(), Some(a));
        assert!(wm.take_closed_windows().is_empty());
    }

    #[test]
    fn maximize_round_trip_restores_geometry() {
        let mut wm = wm();
        let geometry = FloatRect::new(-7, 5, 33, 11);
        let id = wm.open_app(AppKind::Browser, Some(geometry));
        wm.toggle_maximize(id);
        let w = wm.window(id).expect("window");
        assert_eq!(w.state(), WindowState::Maximized);
        assert_eq!(w.rect(), FloatRect::new(0, 0, 120, 39));
        assert_eq!(w.saved_geometry(), Some(geometry));
        wm.toggle_maximize(id);
        let w = wm.window(id).expect("window");
        assert_eq!(w.state(), WindowState::Normal);
        assert_eq!(w.rect(), geometry);
        assert!(w.saved_geometry().is_none());
    }

    #[test]
    fn restore_returns_to_pre_minimize_state() {
        let mut wm = wm();
        let a = wm.open_app(AppKind::About, None);
        let b = wm.open_app(AppKind::About, None);
        wm.toggle_maximize(a);
        wm.minimize_window(a);
        assert_eq!(wm.window(a).map(|w| w.state()), Some(WindowState::Minimized));
        assert_eq!(wm.active(), Some(b));
        wm.restore_window(a);
        assert_eq!(wm.window(a).map(|w| w.state()), Some(WindowState::Maximized));
        assert_eq!(wm.active(), Some(a));

        wm.minimize_window(b);
        wm.restore_window(b);
        assert_eq!(wm.window(b).map(|w| w.state()), Some(WindowState::Normal));
        assert_eq!(wm.active(), Some(b));
    }

    #[test]
    fn maximize_persists_across_resize() {
        let mut wm = wm();
        let id = wm.open_app(AppKind::About, None);
        wm.toggle_maximize(id);
        wm.set_viewport(Size::new(90, 30));
        assert_eq!(
            wm.window(id).map(|w| w.rect()),
            Some(FloatRect::new(0, 0, 90, 29))
        );
    }

    #[test]
    fn drag_moves_by_pointer_offset_and_clamps_top() {
        let mut wm = wm();
        let id = wm.open_app(AppKind::About, Some(FloatRect::new(10, 10, 30, 10)));
        assert!(wm.begin_drag(id, Point::new(15, 10)));
        assert_eq!(wm.dragging(), Some(id));
        wm.update_drag(id, Point::new(25, 14));
        assert_eq!(wm.window(id).map(|w| w.position()), Some(Point::new(20, 14)));
        wm.update_drag(id, Point::new(-50, -8));
        assert_eq!(wm.window(id).map(|w| w.position()), Some(Point::new(-55, 0)));
        wm.update_drag(id, Point::new(400, 3));
        assert_eq!(wm.window(id).map(|w| w.position()), Some(Point::new(395, 3)));
        wm.end_drag(id);
        assert_eq!(wm.dragging(), None);
        wm.update_drag(id, Point::new(30, 30));
        assert_eq!(wm.window(id).map(|w| w.position()), Some(Point::new(395, 3)));
    }

    #[test]
    fn drag_refused_on_controls() {
        let mut wm = wm();
        let id = wm.open_app(AppKind::About, Some(FloatRect::new(0, 0, 30, 10)));
        // close control is the last three cells before the right corner
        assert!(!wm.begin_drag(id, Point::new(27, 0)));
        assert!(wm.dragging().is_none());
        assert!(wm.begin_drag(id, Point::new(4, 0)));
    }

    #[test]
    fn drag_refused_while_maximized() {
        let mut wm = wm();
        let id = wm.open_app(AppKind::About, None);
        wm.toggle_maximize(id);
        assert!(!wm.begin_drag(id, Point::new(3, 0)));
    }

    #[test]
    fn latest_begin_wins() {
        let mut wm = wm();
        let a = wm.open_app(AppKind::About, Some(FloatRect::new(0, 5, 30, 10)));
        let b = wm.open_app(AppKind::About, Some(FloatRect::new(40, 5, 30, 10)));
        assert!(wm.begin_drag(a, Point::new(3, 5)));
        assert!(wm.begin_drag(b, Point::new(43, 5)));
        wm.update_drag(a, Point::new(10, 10));
        wm.update_drag(b, Point::new(50, 10));
        assert_eq!(wm.window(a).map(|w| w.position()), Some(Point::new(0, 5)));
        assert_eq!(wm.window(b).map(|w| w.position()), Some(Point::new(47, 10)));
        assert!(!wm.window(a).is_some_and(|w| w.is_dragging()));
    }

    #[test]
    fn resize_respects_floor_and_cancel() {
        let mut wm = wm();
        let id = wm.open_app(AppKind::Editor, Some(FloatRect::new(10, 10, 30, 10)));
        assert!(wm.begin_resize(id, ResizeEdge::BottomRight, Point::new(39, 19)));
        assert_eq!(wm.resizing(), Some(id));
        wm.update_resize(id, Point::new(44, 21));
        assert_eq!(wm.window(id).map(|w| w.size()), Some(Size::new(35, 12)));
        wm.update_resize(id, Point::new(-100, -100));
        assert_eq!(
            wm.window(id).map(|w| w.size()),
            Some(Size::new(MIN_WINDOW_WIDTH, MIN_WINDOW_HEIGHT))
        );
        wm.cancel_interaction();
        assert_eq!(wm.resizing(), None);
        wm.update_resize(id, Point::new(60, 30));
        assert_eq!(
            wm.window(id).map(|w| w.size()),
            Some(Size::new(MIN_WINDOW_WIDTH, MIN_WINDOW_HEIGHT))
        );
    }

    #[test]
    fn minimize_aborts_drag() {
        let mut wm = wm();
        let id = wm.open_app(AppKind::About, Some(FloatRect::new(0, 5, 30, 10)));
        assert!(wm.begin_drag(id, Point::new(3, 5)));
        wm.minimize_window(id);
        assert_eq!(wm.dragging(), None);
        wm.restore_window(id);
        wm.update_drag(id, Point::new(20, 20));
        assert_eq!(wm.window(id).map(|w| w.position()), Some(Point::new(0, 5)));
    }

    #[test]
    fn taskbar_toggle_cycles_states() {
        let mut wm = wm();
        let a = wm.open_app(AppKind::About, None);
        let b = wm.open_app(AppKind::About, None);
        wm.toggle_from_taskbar(a);
        assert_eq!(wm.active(), Some(a));
        wm.toggle_from_taskbar(a);
        assert!(wm.window(a).is_some_and(|w| w.is_minimized()));
        assert_eq!(wm.active(), Some(b));
        wm.toggle_from_taskbar(a);
        assert!(!wm.window(a).is_some_and(|w| w.is_minimized()));
        assert_eq!(wm.active(), Some(a));
    }

    #[test]
    fn cycle_focus_wraps_and_skips_minimized() {
        let mut wm = wm();
        let a = wm.open_app(AppKind::About, None);
        let b = wm.open_app(AppKind::About, None);
        let c = wm.open_app(AppKind::About, None);
        wm.minimize_window(b);
        assert_eq!(wm.active(), Some(c));
        wm.cycle_focus(true);
        assert_eq!(wm.active(), Some(a));
        wm.cycle_focus(false);
        assert_eq!(wm.active(), Some(c));
    }

    #[test]
    fn window_at_and_hit_test_use_topmost() {
        let mut wm = wm();
        let a = wm.open_app(AppKind::About, Some(FloatRect::new(0, 0, 30, 10)));
        let b = wm.open_app(AppKind::About, Some(FloatRect::new(10, 2, 30, 10)));
        assert_eq!(wm.window_at(Point::new(15, 5)), Some(b));
        assert_eq!(wm.window_at(Point::new(2, 5)), Some(a));
        assert_eq!(wm.window_at(Point::new(100, 30)), None);
        assert_eq!(wm.hit_test(b, Point::new(15, 2)), Some(HitRegion::TitleBar));
        assert_eq!(wm.hit_test(b, Point::new(15, 5)), Some(HitRegion::Content));
        assert_eq!(
            wm.hit_test(b, Point::new(39, 11)),
            Some(HitRegion::Border(ResizeEdge::BottomRight))
        );
        assert_eq!(
            wm.hit_test(b, Point::new(37, 2)),
            Some(HitRegion::Control(HeaderAction::Close))
        );
        wm.minimize_window(b);
        assert_eq!(wm.window_at(Point::new(15, 5)), Some(a));
        assert_eq!(wm.hit_test(b, Point::new(15, 5)), None);
    }

    #[test]
    fn managers_do_not_share_counters() {
        let mut one = wm();
        let mut two = wm();
        one.open_app(AppKind::About, None);
        one.open_app(AppKind::About, None);
        assert_eq!(two.open_app(AppKind::About, None), 1);
    }
}
