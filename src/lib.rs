//! A portfolio desktop rendered in the terminal: desktop icons, a taskbar
//! with a start menu, and a floating window manager hosting small apps.
//!
//! [`window::WindowManager`] is headless and can be driven directly;
//! [`desktop::Desktop`] maps terminal input onto it and paints the screen.

pub mod apps;
pub mod component_context;
pub mod components;
pub mod config;
pub mod constants;
pub mod desktop;
pub mod drivers;
pub mod error;
pub mod event_loop;
pub mod keybindings;
pub mod layout;
pub mod panel;
pub mod runner;
pub mod state;
pub mod theme;
pub mod tracing_sub;
pub mod ui;
pub mod window;
