//! Shared crate-wide constants.

/// Rows reserved at the bottom of the viewport for the taskbar.
///
/// Maximized windows and default spawn positions never overlap this strip.
pub const TASKBAR_HEIGHT: u16 = 1;

/// Smallest width (in terminal columns) a window may be resized to.
///
/// Wide enough to keep the title bar controls (` _  □  x `) plus a one-cell
/// border on each side usable.
pub const MIN_WINDOW_WIDTH: u16 = 12;

/// Smallest height (in terminal rows) a window may be resized to: the title
/// row, two content rows and the bottom border.
pub const MIN_WINDOW_HEIGHT: u16 = 4;

/// Default size of a freshly opened window before it is clamped to the
/// available area.
pub const DEFAULT_WINDOW_WIDTH: u16 = 56;
pub const DEFAULT_WINDOW_HEIGHT: u16 = 16;

/// Where the first cascaded window lands, leaving room for the icon column.
pub const CASCADE_ORIGIN_X: i32 = 14;
pub const CASCADE_ORIGIN_Y: i32 = 1;

/// Offset applied per window ordinal to default spawn positions.
pub const CASCADE_STEP_X: i32 = 3;
pub const CASCADE_STEP_Y: i32 = 2;

/// Two clicks on the same title bar or icon within this many milliseconds
/// count as a double-click.
pub const DOUBLE_CLICK_MS: u64 = 500;

/// Default redraw cadence for the event loop.
pub const POLL_INTERVAL_MS: u64 = 16;

/// Width of the desktop icon column, in terminal columns.
pub const ICON_COLUMN_WIDTH: u16 = 12;
