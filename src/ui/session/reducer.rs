//! Reducer for the interactive session.

use crate::ui::mvi::Reducer;
use chrono::{DateTime, Local};

use super::command::{Command, HELP_TEXT, RUN_USAGE};
use super::intent::{Key, SessionEffect, SessionIntent};
use super::state::{Focus, JobInfo, Phase, SessionState, Viewport};

type Transition = (SessionState, Option<SessionEffect>);

/// Session state transitions.
///
/// Total over its input: keys that make no sense in the current state
/// leave it unchanged instead of failing.
pub struct SessionReducer;

impl Reducer for SessionReducer {
    type State = SessionState;
    type Intent = SessionIntent;
    type Effect = SessionEffect;

    fn reduce(mut state: Self::State, intent: Self::Intent) -> Transition {
        if state.phase == Phase::Terminating {
            return (state, None);
        }

        match intent {
            SessionIntent::Key { key, at } => on_key(state, key, at),

            SessionIntent::Resize { width, height } => {
                state.viewport = Viewport { width, height };
                (state, None)
            }

            SessionIntent::JobOutput { job, line } => {
                if state.is_current_job(job) {
                    state.scrollback.push(line);
                }
                (state, None)
            }

            SessionIntent::JobFinished { job, exit_code } => {
                if let Some(info) = state.take_job(job) {
                    state
                        .scrollback
                        .push(format!("[{} exited with code {}]", info.program, exit_code));
                    state.scrollback.push("");
                }
                (state, None)
            }

            SessionIntent::JobFailed { job, message } => {
                if state.take_job(job).is_some() {
                    state.scrollback.push(format!("Error: {message}"));
                    state.scrollback.push("");
                }
                (state, None)
            }
        }
    }
}

fn on_key(mut state: SessionState, key: Key, at: DateTime<Local>) -> Transition {
    let sidebar = state.focus == Focus::Sidebar;
    match key {
        Key::Esc | Key::CtrlC => return quit(state),
        Key::Tab => state.focus = state.focus.toggled(),
        Key::Up if sidebar => state.cursor = state.roster.clamp(state.cursor.saturating_sub(1)),
        Key::Down if sidebar => state.cursor = state.roster.clamp(state.cursor + 1),
        Key::Char('k') if sidebar => {
            state.cursor = state.roster.clamp(state.cursor.saturating_sub(1))
        }
        Key::Char('j') if sidebar => state.cursor = state.roster.clamp(state.cursor + 1),
        Key::Enter if !sidebar => return submit(state, at),
        Key::Backspace if !sidebar => {
            state.command_buffer.pop();
        }
        Key::Char(c) if !sidebar && !c.is_control() => state.command_buffer.push(c),
        _ => {}
    }
    (state, None)
}

fn quit(mut state: SessionState) -> Transition {
    state.phase = Phase::Terminating;
    (state, Some(SessionEffect::Quit))
}

fn submit(mut state: SessionState, at: DateTime<Local>) -> Transition {
    let input = state.command_buffer.trim().to_string();
    if input.is_empty() {
        return (state, None);
    }
    state.command_buffer.clear();

    let command = Command::parse(&input);
    if command == Command::Clear {
        state.scrollback.clear();
        return (state, None);
    }

    state.scrollback.push(format!("> {input}"));
    let (output, effect) = match command {
        Command::Help => (Some(HELP_TEXT.to_string()), None),
        Command::Users => (Some(format!("Active users: {}", state.roster.len())), None),
        Command::Time => (Some(at.format("Current time: %H:%M:%S").to_string()), None),
        Command::Exit => {
            state.phase = Phase::Terminating;
            (None, Some(SessionEffect::Quit))
        }
        Command::Run(words) => start_job(&mut state, words),
        Command::Unknown(text) => (Some(format!("Unknown command: {text}")), None),
        Command::Clear => (None, None),
    };

    if let Some(line) = output {
        state.scrollback.push(line);
    }
    state.scrollback.push("");
    (state, effect)
}

fn start_job(state: &mut SessionState, words: Vec<String>) -> (Option<String>, Option<SessionEffect>) {
    if let Some(job) = &state.job {
        return (
            Some(format!("A command is already running: {}", job.program)),
            None,
        );
    }
    let mut words = words.into_iter();
    let Some(program) = words.next() else {
        return (Some(RUN_USAGE.to_string()), None);
    };

    let id = state.next_job.max(1);
    state.next_job = id + 1;
    state.job = Some(JobInfo {
        id,
        program: program.clone(),
    });
    (
        None,
        Some(SessionEffect::Spawn {
            job: id,
            program,
            args: words.collect(),
        }),
    )
}
