use crossterm::event::Event;
use ratatui::layout::Rect;

use crate::ui::UiFrame;

pub mod browser;
pub mod editor;
pub mod markdown_viewer;
pub mod terminal;
pub mod text_renderer;

pub use browser::BrowserComponent;
pub use editor::EditorComponent;
pub use markdown_viewer::MarkdownViewerComponent;
pub use terminal::TerminalComponent;
pub use text_renderer::TextRendererComponent;

pub use crate::component_context::ComponentContext;

/// Window content. Areas passed to a component are in its own local
/// coordinate space; mouse events are rebased the same way before delivery.
pub trait Component {
    fn resize(&mut self, _area: Rect, _ctx: &ComponentContext) {}

    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, ctx: &ComponentContext);

    /// Returns `true` when the event was consumed.
    fn handle_event(&mut self, _event: &Event, _ctx: &ComponentContext) -> bool {
        false
    }
}
