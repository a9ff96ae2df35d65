//! Shared test utilities.

#![allow(dead_code, unused_imports)]

use chrono::{DateTime, Local, TimeZone};
use pty_terminal::ui::mvi::Reducer;
use pty_terminal::ui::session::{
    Key, Roster, SessionEffect, SessionIntent, SessionReducer, SessionState, User, UserStatus,
};
use std::path::PathBuf;
use std::time::Duration;
use tempfile::TempDir;

/// Generous bound for anything that waits on a real child process.
pub const PTY_TIMEOUT: Duration = Duration::from_secs(10);

/// 2024-05-01 09:08:07 local time.
pub fn fixed_time() -> DateTime<Local> {
    Local
        .with_ymd_and_hms(2024, 5, 1, 9, 8, 7)
        .single()
        .expect("unambiguous local time")
}

pub fn roster(names: &[&str]) -> Roster {
    Roster::new(
        names
            .iter()
            .map(|name| User::new(*name, UserStatus::Active, fixed_time()))
            .collect(),
    )
}

/// Session with the given users, started at `fixed_time()`, unbounded
/// scrollback.
pub fn session(names: &[&str]) -> SessionState {
    SessionState::new(roster(names), fixed_time(), None)
}

pub fn press(state: SessionState, key: Key) -> (SessionState, Option<SessionEffect>) {
    SessionReducer::reduce(
        state,
        SessionIntent::Key {
            key,
            at: fixed_time(),
        },
    )
}

/// Type `text` then Enter; returns the effect of the Enter press.
pub fn submit(mut state: SessionState, text: &str) -> (SessionState, Option<SessionEffect>) {
    for c in text.chars() {
        state = press(state, Key::Char(c)).0;
    }
    press(state, Key::Enter)
}

pub fn scrollback_lines(state: &SessionState) -> Vec<String> {
    state.scrollback().iter().map(str::to_string).collect()
}

/// Write `content` to `config.toml` in a fresh temp dir.
pub fn temp_config(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, content).expect("Failed to write config");
    (temp_dir, config_path)
}
