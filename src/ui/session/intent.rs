//! Intents and effects for the interactive session.

use crate::ui::mvi::Intent;
use chrono::{DateTime, Local};

/// Terminal-independent key alphabet understood by the session reducer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Esc,
    CtrlC,
    Up,
    Down,
    Tab,
    Enter,
    Backspace,
    Char(char),
    Other,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionIntent {
    /// A key press; `at` is when it arrived (used by the `time` command).
    Key { key: Key, at: DateTime<Local> },

    Resize { width: u16, height: u16 },

    /// One line of output from a running job.
    JobOutput { job: u64, line: String },

    /// The job's child exited and its output was fully drained.
    JobFinished { job: u64, exit_code: u32 },

    /// The job could not be started or did not finish cleanly.
    JobFailed { job: u64, message: String },
}

impl Intent for SessionIntent {}

impl SessionIntent {
    pub fn key(key: Key) -> Self {
        SessionIntent::Key {
            key,
            at: Local::now(),
        }
    }
}

/// Side effects requested by the reducer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEffect {
    Quit,
    Spawn {
        job: u64,
        program: String,
        args: Vec<String>,
    },
}
