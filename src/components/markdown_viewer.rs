use crossterm::event::Event;
use pulldown_cmark::{Event as MdEvent, HeadingLevel, Options, Parser, Tag, TagEnd};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span, Text};

use crate::components::{Component, ComponentContext, TextRendererComponent};
use crate::ui::UiFrame;

/// Read-only document window backed by a markdown source.
#[derive(Debug, Default)]
pub struct MarkdownViewerComponent {
    renderer: TextRendererComponent,
}

impl Component for MarkdownViewerComponent {
    fn resize(&mut self, area: Rect, ctx: &ComponentContext) {
        self.renderer.resize(area, ctx);
    }

    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, ctx: &ComponentContext) {
        self.renderer.render(frame, area, ctx);
    }

    fn handle_event(&mut self, event: &Event, ctx: &ComponentContext) -> bool {
        self.renderer.handle_event(event, ctx)
    }
}

impl MarkdownViewerComponent {
    pub fn from_markdown(raw: &str) -> Self {
        let mut viewer = Self::default();
        viewer.set_markdown(raw);
        viewer
    }

    pub fn set_markdown(&mut self, raw: &str) {
        self.renderer.set_text(markdown_to_text(raw));
        self.renderer.set_wrap(true);
    }

    pub fn rendered_lines(&self) -> Vec<String> {
        self.renderer.rendered_lines()
    }
}

#[derive(Default)]
struct TextBuilder {
    lines: Vec<Line<'static>>,
    current: Vec<Span<'static>>,
    // one entry per open list: next ordinal, or None for bullets
    lists: Vec<Option<u64>>,
    heading: Option<HeadingLevel>,
    strong: bool,
    emphasis: bool,
    code_block: bool,
    link: Option<String>,
}

impl TextBuilder {
    fn style(&self) -> Style {
        if self.code_block {
            return Style::default().fg(crate::theme::code_fg());
        }
        let mut style = Style::default();
        match self.heading {
            Some(HeadingLevel::H1) => {
                style = style
                    .fg(crate::theme::accent())
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
            }
            Some(_) => style = style.add_modifier(Modifier::BOLD),
            None => {}
        }
        if self.strong {
            style = style.add_modifier(Modifier::BOLD);
        }
        if self.emphasis {
            style = style.add_modifier(Modifier::ITALIC);
        }
        if self.link.is_some() {
            style = style.add_modifier(Modifier::UNDERLINED);
        }
        style
    }

    fn flush(&mut self) {
        let spans = std::mem::take(&mut self.current);
        self.lines.push(Line::from(spans));
    }

    fn blank(&mut self) {
        if self.lines.last().is_some_and(|l| l.width() == 0) {
            return;
        }
        self.lines.push(Line::from(""));
    }

    fn push(&mut self, text: String, style: Style) {
        self.current.push(Span::styled(text, style));
    }

    fn finish(mut self) -> Text<'static> {
        if !self.current.is_empty() {
            self.flush();
        }
        while self.lines.last().is_some_and(|l| l.width() == 0) {
            self.lines.pop();
        }
        if self.lines.is_empty() {
            self.lines.push(Line::from(""));
        }
        Text::from(self.lines)
    }
}

/// Flatten a markdown document into styled terminal lines.
pub fn markdown_to_text(raw: &str) -> Text<'static> {
    let mut out = TextBuilder::default();
    for event in Parser::new_ext(raw, Options::all()) {
        match event {
            MdEvent::Start(Tag::Heading { level, .. }) => out.heading = Some(level),
            MdEvent::End(TagEnd::Heading(_)) => {
                out.heading = None;
                out.flush();
                out.blank();
            }
            MdEvent::Start(Tag::Strong) => out.strong = true,
            MdEvent::End(TagEnd::Strong) => out.strong = false,
            MdEvent::Start(Tag::Emphasis) => out.emphasis = true,
            MdEvent::End(TagEnd::Emphasis) => out.emphasis = false,
            MdEvent::Start(Tag::List(first)) => {
                if !out.current.is_empty() {
                    out.flush();
                }
                out.lists.push(first);
            }
            MdEvent::End(TagEnd::List(_)) => {
                out.lists.pop();
                if out.lists.is_empty() {
                    out.blank();
                }
            }
            MdEvent::Start(Tag::Item) => {
                let indent = "  ".repeat(out.lists.len().saturating_sub(1));
                let marker = match out.lists.last_mut() {
                    Some(Some(n)) => {
                        let label = format!("{indent}{n}. ");
                        *n += 1;
                        label
                    }
                    _ => format!("{indent}- "),
                };
                out.push(marker, Style::default());
            }
            MdEvent::End(TagEnd::Item) => {
                if !out.current.is_empty() {
                    out.flush();
                }
            }
            MdEvent::End(TagEnd::Paragraph) => {
                out.flush();
                if out.lists.is_empty() {
                    out.blank();
                }
            }
            MdEvent::Start(Tag::CodeBlock(_)) => out.code_block = true,
            MdEvent::End(TagEnd::CodeBlock) => {
                out.code_block = false;
                if !out.current.is_empty() {
                    out.flush();
                }
                out.blank();
            }
            MdEvent::Start(Tag::Link { dest_url, .. }) => out.link = Some(dest_url.to_string()),
            MdEvent::End(TagEnd::Link) => {
                if let Some(url) = out.link.take() {
                    out.push(format!(" <{url}>"), Style::default().add_modifier(Modifier::DIM));
                }
            }
            MdEvent::Text(text) => {
                if out.code_block {
                    let mut parts = text.split('\n').peekable();
                    while let Some(part) = parts.next() {
                        if !part.is_empty() {
                            out.push(format!("  {part}"), out.style());
                        }
                        if parts.peek().is_some() {
                            out.flush();
                        }
                    }
                } else {
                    let style = out.style();
                    out.push(text.to_string(), style);
                }
            }
            MdEvent::Code(text) => {
                out.push(text.to_string(), Style::default().fg(crate::theme::code_fg()));
            }
            MdEvent::SoftBreak => out.push(" ".to_string(), Style::default()),
            MdEvent::HardBreak => out.flush(),
            MdEvent::Rule => {
                out.push("─".repeat(24), Style::default().add_modifier(Modifier::DIM));
                out.flush();
                out.blank();
            }
            _ => {}
        }
    }
    out.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use ratatui::buffer::Buffer;

    const SAMPLE: &str = indoc! {"
        # Heading

        Some *intro* text
        that wraps onto a soft break.

        - alpha
        - beta

        1. first
        2. second

        See [the repo](https://example.com/repo).
    "};

    #[test]
    fn lists_and_paragraphs_are_separated() {
        let lines = MarkdownViewerComponent::from_markdown(SAMPLE).rendered_lines();
        assert_eq!(lines[0], "Heading");
        assert_eq!(lines[1], "");
        assert_eq!(lines[2], "Some intro text that wraps onto a soft break.");
        let beta = lines.iter().position(|l| l == "- beta").expect("bullet");
        assert_eq!(lines[beta - 1], "- alpha");
        assert_eq!(lines[beta + 1], "");
        assert!(lines.contains(&"1. first".to_string()));
        assert!(lines.contains(&"2. second".to_string()));
    }

    #[test]
    fn links_show_their_target() {
        let lines = MarkdownViewerComponent::from_markdown(SAMPLE).rendered_lines();
        assert_eq!(
            lines.last().map(String::as_str),
            Some("See the repo <https://example.com/repo>.")
        );
    }

    #[test]
    fn code_blocks_keep_their_lines() {
        let md = indoc! {"
            ```
            cargo run
            --help
            ```
        "};
        let lines = MarkdownViewerComponent::from_markdown(md).rendered_lines();
        assert_eq!(lines, vec!["  cargo run".to_string(), "  --help".to_string()]);
    }

    #[test]
    fn empty_document_renders_one_blank_line() {
        let lines = MarkdownViewerComponent::from_markdown("").rendered_lines();
        assert_eq!(lines, vec![String::new()]);
    }

    #[test]
    fn renders_into_buffer() {
        let mut viewer = MarkdownViewerComponent::from_markdown(SAMPLE);
        let area = Rect::new(0, 0, 30, 4);
        let mut buf = Buffer::empty(area);
        let mut ui = UiFrame::from_parts(area, &mut buf);
        viewer.render(&mut ui, area, &ComponentContext::detached());
        let top: String = (0..7)
            .map(|x| buf.cell((x, 0)).map(|c| c.symbol()).unwrap_or(" "))
            .collect();
        assert_eq!(top, "Heading");
    }
}
