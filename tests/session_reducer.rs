//! Session reducer behaviour, driven through the public API.

mod common;

use common::{fixed_time, press, scrollback_lines, session, submit};
use pty_terminal::ui::layout::LayoutConfig;
use pty_terminal::ui::mvi::Reducer;
use pty_terminal::ui::session::{
    Focus, Key, SessionEffect, SessionIntent, SessionReducer, SessionState, HELP_TEXT, RUN_USAGE,
};
use pty_terminal::ui::view::ScreenView;

const NAVIGATION: [Key; 6] = [
    Key::Up,
    Key::Down,
    Key::Tab,
    Key::Char('j'),
    Key::Char('k'),
    Key::Other,
];

/// Every key sequence of exactly `len` presses drawn from `alphabet`.
fn sequences(alphabet: &[Key], len: usize) -> Vec<Vec<Key>> {
    (0..len).fold(vec![Vec::new()], |acc, _| {
        acc.into_iter()
            .flat_map(|prefix| {
                alphabet.iter().map(move |key| {
                    let mut next = prefix.clone();
                    next.push(*key);
                    next
                })
            })
            .collect()
    })
}

fn resize(state: SessionState, width: u16, height: u16) -> SessionState {
    SessionReducer::reduce(state, SessionIntent::Resize { width, height }).0
}

// -- Focus and cursor -------------------------------------------------------

#[test]
fn cursor_stays_in_bounds_for_any_navigation() {
    let names = ["a", "b", "c"];
    for count in 0..=names.len() {
        for keys in sequences(&NAVIGATION, 5) {
            let mut state = session(&names[..count]);
            for key in &keys {
                state = press(state, *key).0;
                assert!(
                    state.cursor() <= count.saturating_sub(1),
                    "cursor {} out of range for {} users after {:?}",
                    state.cursor(),
                    count,
                    keys
                );
                assert!(matches!(state.focus(), Focus::Sidebar | Focus::CommandLine));
            }
        }
    }
}

#[test]
fn down_with_no_users_keeps_cursor_at_zero() {
    let (state, _) = press(session(&[]), Key::Tab);
    assert_eq!(state.focus(), Focus::Sidebar);
    let (state, effect) = press(state, Key::Down);
    assert_eq!(state.cursor(), 0);
    assert!(effect.is_none());
}

#[test]
fn typing_in_sidebar_does_not_touch_buffer() {
    let (state, _) = press(session(&["a", "b"]), Key::Tab);
    let (state, _) = press(state, Key::Char('x'));
    let (state, _) = press(state, Key::Enter);
    assert_eq!(state.command_buffer(), "");
    assert_eq!(state.scrollback().len(), 3);
}

// -- Editing ----------------------------------------------------------------

fn typed(text: &str) -> SessionState {
    text.chars()
        .fold(session(&["a"]), |state, c| press(state, Key::Char(c)).0)
}

#[test]
fn backspace_drops_last_character() {
    let (state, effect) = press(typed("help"), Key::Backspace);
    assert_eq!(state.command_buffer(), "hel");
    assert!(effect.is_none());
}

#[test]
fn backspace_on_empty_buffer_is_a_no_op() {
    let before = session(&["a"]);
    let (state, effect) = press(before.clone(), Key::Backspace);
    assert_eq!(state, before);
    assert!(effect.is_none());
}

#[test]
fn backspace_with_sidebar_focus_keeps_buffer() {
    let (state, _) = press(typed("ls"), Key::Tab);
    let (state, _) = press(state, Key::Backspace);
    assert_eq!(state.command_buffer(), "ls");
    assert_eq!(state.focus(), Focus::Sidebar);
}

#[test]
fn backspace_removes_whole_multibyte_characters() {
    let (state, _) = press(typed("añ€🦀"), Key::Backspace);
    assert_eq!(state.command_buffer(), "añ€");
    let (state, _) = press(state, Key::Backspace);
    assert_eq!(state.command_buffer(), "añ");
    let (state, _) = press(state, Key::Backspace);
    let (state, _) = press(state, Key::Backspace);
    let (state, _) = press(state, Key::Backspace);
    assert_eq!(state.command_buffer(), "");
}

// -- Command dispatch -------------------------------------------------------

#[test]
fn every_command_but_clear_echoes_exactly_once() {
    for command in ["help", "users", "time", "bogus", "run"] {
        let before = session(&["a"]).scrollback().len();
        let (state, _) = submit(session(&["a"]), command);
        let lines = scrollback_lines(&state);
        let echoes = lines.iter().filter(|line| line.starts_with("> ")).count();
        assert_eq!(echoes, 1, "{command}");
        assert_eq!(lines[before], format!("> {command}"));
        assert_eq!(lines.last().map(String::as_str), Some(""));
    }
}

#[test]
fn command_outputs() {
    let (state, _) = submit(session(&["a", "b"]), "help");
    assert!(scrollback_lines(&state).contains(&HELP_TEXT.to_string()));

    let (state, _) = submit(session(&["a", "b"]), "users");
    assert!(scrollback_lines(&state).contains(&"Active users: 2".to_string()));

    let (state, _) = submit(session(&[]), "time");
    assert!(scrollback_lines(&state).contains(&"Current time: 09:08:07".to_string()));

    let (state, _) = submit(session(&[]), "  frobnicate  ");
    let lines = scrollback_lines(&state);
    assert!(lines.contains(&"> frobnicate".to_string()));
    assert!(lines.contains(&"Unknown command: frobnicate".to_string()));
}

#[test]
fn clear_then_render_shows_empty_main_pane() {
    let (state, _) = submit(session(&["a"]), "help");
    let (state, _) = submit(state, "clear");
    let state = resize(state, 100, 30);
    let view = ScreenView::project(&state, &LayoutConfig::default());
    assert!(view.main.is_empty());
    assert_eq!(state.command_buffer(), "");
}

#[test]
fn blank_enter_is_a_no_op() {
    let state = session(&["a"]);
    let (after, effect) = submit(state.clone(), "   ");
    assert_eq!(after.scrollback(), state.scrollback());
    assert!(effect.is_none());
}

#[test]
fn exit_and_quit_keys_terminate() {
    let (state, effect) = submit(session(&[]), "exit");
    assert!(state.is_terminating());
    assert_eq!(effect, Some(SessionEffect::Quit));
    assert!(scrollback_lines(&state).contains(&"> exit".to_string()));

    for key in [Key::Esc, Key::CtrlC] {
        let (state, effect) = press(session(&[]), key);
        assert!(state.is_terminating());
        assert_eq!(effect, Some(SessionEffect::Quit));
    }
}

// -- Resize -----------------------------------------------------------------

#[test]
fn resize_only_updates_viewport() {
    let (state, _) = press(session(&["a", "b"]), Key::Char('h'));
    let (state, _) = press(state, Key::Tab);
    let (state, _) = press(state, Key::Down);
    let resized = resize(state.clone(), 120, 40);
    assert_eq!(resized.command_buffer(), state.command_buffer());
    assert_eq!(resized.roster(), state.roster());
    assert_eq!(resized.focus(), state.focus());
    assert_eq!(resized.cursor(), state.cursor());
    assert_eq!(resized.viewport().width, 120);
    assert_eq!(resized.viewport().height, 40);
}

// -- Jobs -------------------------------------------------------------------

#[test]
fn run_spawns_and_job_lines_land_in_scrollback() {
    let (state, effect) = submit(session(&[]), "run echo hi there");
    assert_eq!(
        effect,
        Some(SessionEffect::Spawn {
            job: 1,
            program: "echo".to_string(),
            args: vec!["hi".to_string(), "there".to_string()],
        })
    );
    assert_eq!(state.job().map(|job| job.program.as_str()), Some("echo"));

    let (state, _) = SessionReducer::reduce(
        state,
        SessionIntent::JobOutput {
            job: 1,
            line: "hi there".to_string(),
        },
    );
    let (state, _) = SessionReducer::reduce(state, SessionIntent::JobFinished { job: 1, exit_code: 0 });
    let lines = scrollback_lines(&state);
    assert!(lines.contains(&"hi there".to_string()));
    assert!(lines.contains(&"[echo exited with code 0]".to_string()));
    assert!(state.job().is_none());
}

#[test]
fn second_run_while_busy_is_refused() {
    let (state, _) = submit(session(&[]), "run sleep 5");
    let (state, effect) = submit(state, "run ls");
    assert!(effect.is_none());
    assert!(scrollback_lines(&state).contains(&"A command is already running: sleep".to_string()));
}

#[test]
fn bare_run_prints_usage() {
    let (state, effect) = submit(session(&[]), "run");
    assert!(effect.is_none());
    assert!(scrollback_lines(&state).contains(&RUN_USAGE.to_string()));
}

#[test]
fn stale_job_events_are_ignored() {
    let (state, _) = submit(session(&[]), "run true");
    let (state, _) = SessionReducer::reduce(state, SessionIntent::JobFinished { job: 1, exit_code: 0 });
    let settled = state.clone();
    let (state, _) = SessionReducer::reduce(
        state,
        SessionIntent::JobOutput {
            job: 1,
            line: "late".to_string(),
        },
    );
    let (state, _) = SessionReducer::reduce(
        state,
        SessionIntent::JobFailed {
            job: 1,
            message: "late".to_string(),
        },
    );
    assert_eq!(state, settled);
}

#[test]
fn failed_job_reports_error_and_frees_the_slot() {
    let (state, _) = submit(session(&[]), "run nope");
    let (state, _) = SessionReducer::reduce(
        state,
        SessionIntent::JobFailed {
            job: 1,
            message: "no such file".to_string(),
        },
    );
    assert!(scrollback_lines(&state).contains(&"Error: no such file".to_string()));
    let (_, effect) = submit(state, "run ls");
    assert!(matches!(effect, Some(SessionEffect::Spawn { job: 2, .. })));
}

#[test]
fn banner_mentions_start_time() {
    let state = session(&[]);
    let expected = format!(
        "Current session started at {}",
        fixed_time().format("%H:%M:%S")
    );
    assert_eq!(scrollback_lines(&state)[2], expected);
}
