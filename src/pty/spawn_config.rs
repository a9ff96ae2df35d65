use portable_pty::{CommandBuilder, PtySize};
use std::path::PathBuf;

pub const DEFAULT_TERM: &str = "xterm-256color";

/// Everything needed to start one child process on a fresh pty.
///
/// Command and arguments are passed to the OS unmodified; there is no
/// shell in between unless the command itself is a shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpawnConfig {
    command: String,
    args: Vec<String>,
    cwd: Option<PathBuf>,
    env: Vec<(String, String)>,
    rows: u16,
    cols: u16,
}

impl SpawnConfig {
    pub fn new(command: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            command: command.into(),
            args,
            cwd: None,
            env: vec![("TERM".to_string(), DEFAULT_TERM.to_string())],
            rows: 24,
            cols: 80,
        }
    }

    pub fn with_size(mut self, rows: u16, cols: u16) -> Self {
        self.rows = rows.max(1);
        self.cols = cols.max(1);
        self
    }

    pub fn with_cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    /// Set an environment variable, replacing an earlier value for the same key.
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        self.env.retain(|(existing, _)| existing != &key);
        self.env.push((key, value.into()));
        self
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn env(&self) -> &[(String, String)] {
        &self.env
    }

    pub fn size(&self) -> (u16, u16) {
        (self.rows, self.cols)
    }

    pub(crate) fn pty_size(&self) -> PtySize {
        PtySize {
            rows: self.rows,
            cols: self.cols,
            pixel_width: 0,
            pixel_height: 0,
        }
    }

    pub(crate) fn command_builder(&self) -> CommandBuilder {
        let mut cmd = CommandBuilder::new(&self.command);
        cmd.args(&self.args);
        match &self.cwd {
            Some(cwd) => cmd.cwd(cwd),
            None => {
                if let Ok(cwd) = std::env::current_dir() {
                    cmd.cwd(cwd);
                }
            }
        }
        for (key, value) in &self.env {
            cmd.env(key, value);
        }
        cmd
    }
}
