use ratatui::prelude::Rect;

use crate::window::{FloatRect, Point, Size};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeEdge {
    Left,
    Right,
    Top,
    Bottom,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl ResizeEdge {
    fn moves_left(self) -> bool {
        matches!(
            self,
            ResizeEdge::Left | ResizeEdge::TopLeft | ResizeEdge::BottomLeft
        )
    }

    fn moves_right(self) -> bool {
        matches!(
            self,
            ResizeEdge::Right | ResizeEdge::TopRight | ResizeEdge::BottomRight
        )
    }

    fn moves_top(self) -> bool {
        matches!(
            self,
            ResizeEdge::Top | ResizeEdge::TopLeft | ResizeEdge::TopRight
        )
    }

    fn moves_bottom(self) -> bool {
        matches!(
            self,
            ResizeEdge::Bottom | ResizeEdge::BottomLeft | ResizeEdge::BottomRight
        )
    }
}

/// Which border cell of `rect` (if any) sits under `point`.
///
/// Corners win over straight edges. The top border row doubles as the title
/// bar's upper frame, so only its two corner cells resize; dragging the rest
/// of it moves the window instead.
pub fn resize_edge_at(rect: FloatRect, point: Point) -> Option<ResizeEdge> {
    if rect.width < 2 || rect.height < 2 || !rect.contains(point) {
        return None;
    }
    let right = rect.right() - 1;
    let bottom = rect.bottom() - 1;
    let on_left = point.x == rect.x;
    let on_right = point.x == right;
    let on_top = point.y == rect.y;
    let on_bottom = point.y == bottom;
    match (on_left, on_right, on_top, on_bottom) {
        (true, _, true, _) => Some(ResizeEdge::TopLeft),
        (_, true, true, _) => Some(ResizeEdge::TopRight),
        (true, _, _, true) => Some(ResizeEdge::BottomLeft),
        (_, true, _, true) => Some(ResizeEdge::BottomRight),
        (true, _, _, _) => Some(ResizeEdge::Left),
        (_, true, _, _) => Some(ResizeEdge::Right),
        (_, _, _, true) => Some(ResizeEdge::Bottom),
        _ => None,
    }
}

/// Resize `start` by the pointer delta along `edge`.
///
/// The size never drops below `min`; when a left/top edge hits the floor the
/// origin is pushed back so the opposite edge stays put. The top edge is
/// never pulled above row 0.
pub fn apply_resize(
    start: FloatRect,
    edge: ResizeEdge,
    pointer_start: Point,
    pointer: Point,
    min: Size,
) -> FloatRect {
    let dx = pointer.x - pointer_start.x;
    let dy = pointer.y - pointer_start.y;
    let mut x = start.x;
    let mut y = start.y;
    let mut width = start.width as i32;
    let mut height = start.height as i32;

    if edge.moves_left() {
        x += dx;
        width -= dx;
    } else if edge.moves_right() {
        width += dx;
    }
    if edge.moves_top() {
        y += dy;
        height -= dy;
    } else if edge.moves_bottom() {
        height += dy;
    }

    if edge.moves_top() && y < 0 {
        height += y;
        y = 0;
    }

    let min_w = min.width.max(1) as i32;
    let min_h = min.height.max(1) as i32;
    if width < min_w {
        if edge.moves_left() {
            x -= min_w - width;
        }
        width = min_w;
    }
    if height < min_h {
        if edge.moves_top() {
            y -= min_h - height;
        }
        height = min_h;
    }

    let max_dim = u16::MAX as i32;
    FloatRect {
        x,
        y,
        width: width.min(max_dim) as u16,
        height: height.min(max_dim) as u16,
    }
}

/// New window origin for a drag: `pointer - offset`, with the top clamped
/// to row 0. When `clamp_horizontal` is set the window is also kept fully
/// inside `bounds` horizontally.
pub fn apply_drag(
    offset: Point,
    pointer: Point,
    size: Size,
    bounds: Rect,
    clamp_horizontal: bool,
) -> Point {
    let mut x = pointer.x - offset.x;
    let y = (pointer.y - offset.y).max(0);
    if clamp_horizontal {
        let left = bounds.x as i32;
        let max_x = (left + bounds.width as i32 - size.width as i32).max(left);
        x = x.clamp(left, max_x);
    }
    Point { x, y }
}
