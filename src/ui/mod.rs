//! Terminal UI: a users sidebar, a scrollback pane and a command line.
//!
//! Session behaviour lives in the `session` reducer; this module wires it to
//! crossterm input, ratatui output and pty jobs.

pub mod app;
pub mod events;
pub mod input;
pub mod layout;
pub mod mvi;
pub mod render;
pub mod runtime;
pub mod session;
pub mod terminal_guard;
pub mod theme;
pub mod view;

pub use runtime::run;
