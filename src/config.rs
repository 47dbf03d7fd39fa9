use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use indoc::indoc;
use thiserror::Error;
use tracing::level_filters::LevelFilter;

use crate::apps::AppKind;
use crate::constants::{
    CASCADE_STEP_X, CASCADE_STEP_Y, DEFAULT_WINDOW_HEIGHT, DEFAULT_WINDOW_WIDTH, DOUBLE_CLICK_MS,
    MIN_WINDOW_HEIGHT, MIN_WINDOW_WIDTH, POLL_INTERVAL_MS,
};
use crate::tracing_sub::LogTarget;
use crate::window::decorator::CONTROLS_MIN_WIDTH;
use crate::window::{Point, Size, WmPolicy};

const AFTER_HELP: &str = indoc! {"
    Keys:
      Ctrl+Q          quit
      Alt+S, F1       start menu
      Alt+W, Alt+F4   close window
      Alt+M           minimize window
      Alt+X, F11      maximize / restore window
      Alt+N, Alt+P    next / previous window
      F12             turn mouse capture on / off

    Drag a title bar to move a window, drag a border to resize it,
    double-click a title bar to maximize.
"};

#[derive(Parser, Debug, Clone)]
#[command(
    name = "term-desk",
    version = env!("CARGO_PKG_VERSION"),
    about = "A portfolio desktop with floating windows, in your terminal",
    after_help = AFTER_HELP
)]
pub struct Cli {
    /// Apps to open at startup (about, projects, terminal, games, browser, mail, editor).
    #[arg(short = 'o', long = "open", value_name = "KIND")]
    pub open: Vec<String>,

    /// Columns between successive default window positions.
    #[arg(long = "cascade-x", value_name = "COLS", default_value_t = CASCADE_STEP_X)]
    pub cascade_x: i32,

    /// Rows between successive default window positions.
    #[arg(long = "cascade-y", value_name = "ROWS", default_value_t = CASCADE_STEP_Y)]
    pub cascade_y: i32,

    #[arg(long = "default-width", value_name = "COLS", default_value_t = DEFAULT_WINDOW_WIDTH)]
    pub default_width: u16,

    #[arg(long = "default-height", value_name = "ROWS", default_value_t = DEFAULT_WINDOW_HEIGHT)]
    pub default_height: u16,

    /// Smallest width a window can be resized to; at least 11 so the
    /// title-bar buttons always fit.
    #[arg(long = "min-width", value_name = "COLS", default_value_t = MIN_WINDOW_WIDTH)]
    pub min_width: u16,

    /// Smallest height a window can be resized to.
    #[arg(long = "min-height", value_name = "ROWS", default_value_t = MIN_WINDOW_HEIGHT)]
    pub min_height: u16,

    /// Keep dragged windows horizontally on screen.
    #[arg(long = "clamp-horizontal")]
    pub clamp_horizontal: bool,

    #[arg(long = "double-click-ms", value_name = "MS", default_value_t = DOUBLE_CLICK_MS)]
    pub double_click_ms: u64,

    /// Input poll interval, which also paces redraws.
    #[arg(long = "poll-ms", value_name = "MS", default_value_t = POLL_INTERVAL_MS)]
    pub poll_ms: u64,

    /// Append logs to this file. Without it, logs are discarded.
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// One of: off, error, warn, info, debug, trace.
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "info")]
    pub log_level: String,

    /// Start with mouse capture disabled; F12 turns it back on.
    #[arg(long = "no-mouse")]
    pub no_mouse: bool,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("cascade step must be positive on at least one axis (got {x},{y})")]
    CascadeStep { x: i32, y: i32 },
    #[error("minimum window size must be at least {}x3 cells (got {width}x{height})", CONTROLS_MIN_WIDTH)]
    MinimumSize { width: u16, height: u16 },
    #[error("default window size {width}x{height} is smaller than the minimum size")]
    DefaultSize { width: u16, height: u16 },
    #[error("double-click interval must be between 50 and 5000 ms (got {0})")]
    DoubleClick(u64),
    #[error("poll interval must be between 1 and 1000 ms (got {0})")]
    PollInterval(u64),
    #[error("unknown log level {0:?}")]
    LogLevel(String),
}

/// Validated settings for one desktop session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeskConfig {
    pub policy: WmPolicy,
    pub open: Vec<AppKind>,
    pub double_click: Duration,
    pub poll_interval: Duration,
    pub mouse_capture: bool,
    pub log_target: LogTarget,
    pub log_level: LevelFilter,
}

impl Default for DeskConfig {
    fn default() -> Self {
        Self {
            policy: WmPolicy::default(),
            open: Vec::new(),
            double_click: Duration::from_millis(DOUBLE_CLICK_MS),
            poll_interval: Duration::from_millis(POLL_INTERVAL_MS),
            mouse_capture: true,
            log_target: LogTarget::Sink,
            log_level: LevelFilter::INFO,
        }
    }
}

impl TryFrom<&Cli> for DeskConfig {
    type Error = ConfigError;

    fn try_from(cli: &Cli) -> Result<Self, Self::Error> {
        if cli.cascade_x < 0 || cli.cascade_y < 0 || (cli.cascade_x == 0 && cli.cascade_y == 0) {
            return Err(ConfigError::CascadeStep {
                x: cli.cascade_x,
                y: cli.cascade_y,
            });
        }
        if cli.min_width < CONTROLS_MIN_WIDTH || cli.min_height < 3 {
            return Err(ConfigError::MinimumSize {
                width: cli.min_width,
                height: cli.min_height,
            });
        }
        if cli.default_width < cli.min_width || cli.default_height < cli.min_height {
            return Err(ConfigError::DefaultSize {
                width: cli.default_width,
                height: cli.default_height,
            });
        }
        if !(50..=5000).contains(&cli.double_click_ms) {
            return Err(ConfigError::DoubleClick(cli.double_click_ms));
        }
        if !(1..=1000).contains(&cli.poll_ms) {
            return Err(ConfigError::PollInterval(cli.poll_ms));
        }
        let log_level = cli
            .log_level
            .parse::<LevelFilter>()
            .map_err(|_| ConfigError::LogLevel(cli.log_level.clone()))?;

        let defaults = WmPolicy::default();
        Ok(Self {
            policy: WmPolicy {
                cascade_step: Point::new(cli.cascade_x, cli.cascade_y),
                default_size: Size::new(cli.default_width, cli.default_height),
                min_size: Size::new(cli.min_width, cli.min_height),
                clamp_horizontal: cli.clamp_horizontal,
                ..defaults
            },
            open: cli.open.iter().map(|raw| AppKind::parse(raw)).collect(),
            double_click: Duration::from_millis(cli.double_click_ms),
            poll_interval: Duration::from_millis(cli.poll_ms),
            mouse_capture: !cli.no_mouse,
            log_target: cli
                .log_file
                .clone()
                .map(LogTarget::File)
                .unwrap_or_default(),
            log_level,
        })
    }
}
