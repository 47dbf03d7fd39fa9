//! Application catalog.
//!
//! Maps an [`AppKind`] to the title shown in its window and to the content
//! provider hosted inside it. Lookups never fail: an unrecognized kind still
//! gets a window, backed by a placeholder panel.

use std::fmt;

use ratatui::text::{Line, Text};

use crate::components::{
    BrowserComponent, Component, EditorComponent, MarkdownViewerComponent, TerminalComponent,
    TextRendererComponent,
};

const ABOUT_MD: &str = include_str!("../../assets/about.md");
const PROJECTS_MD: &str = include_str!("../../assets/projects.md");
const GAMES_MD: &str = include_str!("../../assets/games.md");
const MAIL_MD: &str = include_str!("../../assets/mail.md");

pub const HOME_URL: &str = "https://github.com/jzombie/term-desk";

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AppKind {
    About,
    Projects,
    Terminal,
    Games,
    Browser,
    Mail,
    Editor,
    Other(String),
}

impl AppKind {
    /// Launchable kinds, in start menu and desktop icon order.
    pub const ALL: [AppKind; 7] = [
        AppKind::About,
        AppKind::Projects,
        AppKind::Terminal,
        AppKind::Games,
        AppKind::Browser,
        AppKind::Mail,
        AppKind::Editor,
    ];

    pub fn parse(raw: &str) -> AppKind {
        let trimmed = raw.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "about" => AppKind::About,
            "projects" => AppKind::Projects,
            "terminal" => AppKind::Terminal,
            "games" => AppKind::Games,
            "browser" => AppKind::Browser,
            "mail" => AppKind::Mail,
            "editor" => AppKind::Editor,
            _ => AppKind::Other(trimmed.to_string()),
        }
    }

    /// Stable lowercase identifier, the inverse of [`AppKind::parse`].
    pub fn id(&self) -> &str {
        match self {
            AppKind::About => "about",
            AppKind::Projects => "projects",
            AppKind::Terminal => "terminal",
            AppKind::Games => "games",
            AppKind::Browser => "browser",
            AppKind::Mail => "mail",
            AppKind::Editor => "editor",
            AppKind::Other(name) => name,
        }
    }

    pub fn title(&self) -> String {
        match self {
            AppKind::About => "About Me".to_string(),
            AppKind::Projects => "Projects".to_string(),
            AppKind::Terminal => "Terminal".to_string(),
            AppKind::Games => "Games".to_string(),
            AppKind::Browser => "Browser".to_string(),
            AppKind::Mail => "Mail".to_string(),
            AppKind::Editor => "Editor".to_string(),
            AppKind::Other(name) if name.is_empty() => "Untitled".to_string(),
            AppKind::Other(name) => name.clone(),
        }
    }

    /// Glyph drawn on the desktop icon.
    pub fn icon(&self) -> &'static str {
        match self {
            AppKind::About => "[i]",
            AppKind::Projects => "[#]",
            AppKind::Terminal => "[>]",
            AppKind::Games => "[*]",
            AppKind::Browser => "[@]",
            AppKind::Mail => "[m]",
            AppKind::Editor => "[e]",
            AppKind::Other(_) => "[?]",
        }
    }
}

impl From<&str> for AppKind {
    fn from(raw: &str) -> Self {
        AppKind::parse(raw)
    }
}

impl fmt::Display for AppKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Build the content provider for a freshly opened window.
pub fn provider_for(kind: &AppKind) -> Box<dyn Component> {
    match kind {
        AppKind::About => Box::new(MarkdownViewerComponent::from_markdown(ABOUT_MD)),
        AppKind::Projects => Box::new(MarkdownViewerComponent::from_markdown(PROJECTS_MD)),
        AppKind::Games => Box::new(MarkdownViewerComponent::from_markdown(GAMES_MD)),
        AppKind::Mail => Box::new(MarkdownViewerComponent::from_markdown(MAIL_MD)),
        AppKind::Terminal => Box::new(TerminalComponent::new()),
        AppKind::Editor => Box::new(EditorComponent::new()),
        AppKind::Browser => Box::new(BrowserComponent::new(HOME_URL)),
        AppKind::Other(name) => Box::new(placeholder(name)),
    }
}

fn placeholder(name: &str) -> TextRendererComponent {
    let mut renderer = TextRendererComponent::new();
    renderer.set_text(Text::from(vec![
        Line::from(format!("\"{name}\" is not installed on this desktop.")),
        Line::from(""),
        Line::from("Nothing to see here yet."),
    ]));
    renderer
}
