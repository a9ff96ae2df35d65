use chrono::{DateTime, Duration as ChronoDuration, Local};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::ui::layout::LayoutConfig;
use crate::ui::session::{Roster, User, UserStatus};

/// Root configuration container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub theme: ThemeConfig,
    #[serde(default)]
    pub pty: PtyConfig,
    /// Initial sidebar roster.
    #[serde(default = "default_users")]
    pub users: Vec<UserEntry>,
}

/// Event loop and pane sizing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiConfig {
    /// Redraw interval when no input arrives (default: 250).
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,
    /// Maximum scrollback lines kept; unset keeps everything.
    #[serde(default)]
    pub scrollback_limit: Option<usize>,
    #[serde(default = "default_sidebar_min_width")]
    pub sidebar_min_width: u16,
    /// Fraction of the terminal width given to the sidebar (default: 0.20).
    #[serde(default = "default_sidebar_ratio")]
    pub sidebar_ratio: f32,
    #[serde(default = "default_main_min_width")]
    pub main_min_width: u16,
    #[serde(default = "default_main_min_height")]
    pub main_min_height: u16,
}

/// Colours as `#rrggbb` or ANSI colour names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    pub border: String,
    pub title: String,
    pub text: String,
    pub selected: String,
    pub prompt: String,
    pub input: String,
    pub cursor: String,
    pub active: String,
    pub idle: String,
}

/// Pseudo-terminal settings for spawned programs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PtyConfig {
    #[serde(default = "default_pty_rows")]
    pub rows: u16,
    #[serde(default = "default_pty_cols")]
    pub cols: u16,
    /// Value of `TERM` in the child environment.
    #[serde(default = "default_term")]
    pub term: String,
    /// Kill the child after this many seconds; unset waits forever.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

/// Upper bound for `connected_minutes_ago`: one year.
pub const MAX_CONNECTED_MINUTES: i64 = 525_600;

/// A `[[users]]` entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserEntry {
    pub name: String,
    pub status: UserStatus,
    /// How long before startup the user connected.
    #[serde(default)]
    pub connected_minutes_ago: i64,
}

fn default_tick_rate_ms() -> u64 {
    250
}

fn default_sidebar_min_width() -> u16 {
    15
}

fn default_sidebar_ratio() -> f32 {
    0.20
}

fn default_main_min_width() -> u16 {
    30
}

fn default_main_min_height() -> u16 {
    5
}

fn default_pty_rows() -> u16 {
    24
}

fn default_pty_cols() -> u16 {
    80
}

fn default_term() -> String {
    crate::pty::DEFAULT_TERM.to_string()
}

fn default_users() -> Vec<UserEntry> {
    vec![
        UserEntry::new("john_doe", UserStatus::Active, 120),
        UserEntry::new("jane_smith", UserStatus::Idle, 30),
        UserEntry::new("admin", UserStatus::Active, 5),
    ]
}

impl UserEntry {
    pub fn new(name: impl Into<String>, status: UserStatus, connected_minutes_ago: i64) -> Self {
        Self {
            name: name.into(),
            status,
            connected_minutes_ago,
        }
    }
}

impl Config {
    /// Build the startup roster relative to `now`.
    pub fn roster(&self, now: DateTime<Local>) -> Roster {
        Roster::new(
            self.users
                .iter()
                .map(|entry| {
                    let connected_at = ChronoDuration::try_minutes(entry.connected_minutes_ago)
                        .and_then(|ago| now.checked_sub_signed(ago))
                        .unwrap_or(now);
                    User::new(entry.name.clone(), entry.status, connected_at)
                })
                .collect(),
        )
    }
}

impl UiConfig {
    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms)
    }

    pub fn layout(&self) -> LayoutConfig {
        LayoutConfig {
            sidebar_min_width: self.sidebar_min_width,
            sidebar_ratio: self.sidebar_ratio,
            main_min_width: self.main_min_width,
            main_min_height: self.main_min_height,
        }
    }
}

impl PtyConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ui: UiConfig::default(),
            theme: ThemeConfig::default(),
            pty: PtyConfig::default(),
            users: default_users(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate_ms(),
            scrollback_limit: None,
            sidebar_min_width: default_sidebar_min_width(),
            sidebar_ratio: default_sidebar_ratio(),
            main_min_width: default_main_min_width(),
            main_min_height: default_main_min_height(),
        }
    }
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            border: "#666666".to_string(),
            title: "#fafafa".to_string(),
            text: "#cccccc".to_string(),
            selected: "#00ff00".to_string(),
            prompt: "#00ff00".to_string(),
            input: "#ffffff".to_string(),
            cursor: "#ffffff".to_string(),
            active: "#22c55e".to_string(),
            idle: "#6b7280".to_string(),
        }
    }
}

impl Default for PtyConfig {
    fn default() -> Self {
        Self {
            rows: default_pty_rows(),
            cols: default_pty_cols(),
            term: default_term(),
            timeout_secs: None,
        }
    }
}
