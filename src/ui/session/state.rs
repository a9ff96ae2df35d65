//! State for the interactive session.

use crate::ui::mvi::UiState;
use crate::ui::session::roster::{Roster, User};
use crate::ui::session::scrollback::Scrollback;
use chrono::{DateTime, Local};

/// Which region receives keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    Sidebar,
    #[default]
    CommandLine,
}

impl Focus {
    pub fn toggled(self) -> Self {
        match self {
            Focus::Sidebar => Focus::CommandLine,
            Focus::CommandLine => Focus::Sidebar,
        }
    }
}

/// Once `Terminating`, every intent is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Running,
    Terminating,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    /// True until the first resize reports a real size.
    pub fn is_unknown(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// The PTY command currently launched from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobInfo {
    pub id: u64,
    pub program: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SessionState {
    pub(super) phase: Phase,
    pub(super) focus: Focus,
    pub(super) cursor: usize,
    pub(super) roster: Roster,
    pub(super) scrollback: Scrollback,
    pub(super) command_buffer: String,
    pub(super) viewport: Viewport,
    pub(super) job: Option<JobInfo>,
    pub(super) next_job: u64,
}

impl UiState for SessionState {}

impl SessionState {
    /// Initial state: command line focused, welcome banner in scrollback.
    pub fn new(roster: Roster, started_at: DateTime<Local>, scrollback_limit: Option<usize>) -> Self {
        let mut scrollback = Scrollback::new(scrollback_limit);
        scrollback.push("Welcome to pty-terminal");
        scrollback.push("Type 'help' for available commands");
        scrollback.push(format!(
            "Current session started at {}",
            started_at.format("%H:%M:%S")
        ));

        Self {
            roster,
            scrollback,
            next_job: 1,
            ..Self::default()
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_terminating(&self) -> bool {
        self.phase == Phase::Terminating
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn scrollback(&self) -> &Scrollback {
        &self.scrollback
    }

    pub fn command_buffer(&self) -> &str {
        &self.command_buffer
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn job(&self) -> Option<&JobInfo> {
        self.job.as_ref()
    }

    pub fn add_user(&mut self, user: User) {
        self.roster.add(user);
    }

    /// Remove a user and keep the cursor inside the shorter roster.
    pub fn remove_user(&mut self, name: &str) -> Option<User> {
        let removed = self.roster.remove(name);
        self.cursor = self.roster.clamp(self.cursor);
        removed
    }

    pub(super) fn is_current_job(&self, id: u64) -> bool {
        self.job.as_ref().is_some_and(|job| job.id == id)
    }

    pub(super) fn take_job(&mut self, id: u64) -> Option<JobInfo> {
        if self.is_current_job(id) {
            self.job.take()
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::session::roster::UserStatus;

    #[test]
    fn new_has_three_line_banner_and_command_focus() {
        let state = SessionState::new(Roster::default(), Local::now(), None);
        assert_eq!(state.scrollback().len(), 3);
        assert_eq!(state.focus(), Focus::CommandLine);
        assert_eq!(state.cursor(), 0);
        assert!(state.command_buffer().is_empty());
        assert_eq!(state.phase(), Phase::Running);
        assert!(state
            .scrollback()
            .last()
            .is_some_and(|line| line.starts_with("Current session started at ")));
    }

    #[test]
    fn remove_user_reclamps_cursor() {
        let now = Local::now();
        let roster = Roster::new(vec![
            User::new("a", UserStatus::Active, now),
            User::new("b", UserStatus::Idle, now),
        ]);
        let mut state = SessionState::new(roster, now, None);
        state.cursor = 1;
        state.remove_user("b");
        assert_eq!(state.cursor(), 0);
        state.remove_user("a");
        assert_eq!(state.cursor(), 0);
        state.add_user(User::new("c", UserStatus::Active, now));
        assert_eq!(state.roster().len(), 1);
    }
}
