use ratatui::style::Color;

// Centralized theme colors. Named palette entries only, so the desktop
// degrades gracefully on 16-color terminals.

pub fn accent() -> Color {
    Color::LightYellow
}

// Desktop
pub fn desktop_bg() -> Color {
    Color::Cyan
}
pub fn desktop_fg() -> Color {
    Color::Black
}
pub fn icon_selected_bg() -> Color {
    Color::Blue
}
pub fn icon_selected_fg() -> Color {
    Color::White
}

// Taskbar
pub fn taskbar_bg() -> Color {
    Color::Gray
}
pub fn taskbar_fg() -> Color {
    Color::Black
}
pub fn taskbar_active_bg() -> Color {
    Color::White
}
pub fn taskbar_minimized_fg() -> Color {
    Color::DarkGray
}
pub fn start_button_bg() -> Color {
    Color::Green
}

// Start menu
pub fn menu_bg() -> Color {
    Color::Gray
}
pub fn menu_fg() -> Color {
    Color::Black
}
pub fn menu_selected_bg() -> Color {
    Color::Blue
}
pub fn menu_selected_fg() -> Color {
    Color::White
}

// Window content
pub fn window_bg() -> Color {
    Color::Black
}
pub fn window_fg() -> Color {
    Color::White
}
pub fn terminal_bg() -> Color {
    Color::Black
}
pub fn terminal_fg() -> Color {
    Color::LightGreen
}
pub fn address_bar_bg() -> Color {
    Color::DarkGray
}
pub fn code_fg() -> Color {
    Color::Yellow
}
pub fn error_fg() -> Color {
    Color::LightRed
}

// Decorator
pub fn decorator_header_bg() -> Color {
    Color::Blue
}
pub fn decorator_inactive_bg() -> Color {
    Color::DarkGray
}
pub fn decorator_header_fg() -> Color {
    Color::White
}
pub fn decorator_border() -> Color {
    Color::Gray
}
