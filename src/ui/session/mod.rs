//! Interactive session feature module.
//!
//! Owns everything the three panes display: the user roster and sidebar
//! cursor, the scrollback, the command buffer, focus, and the viewport.
//!
//! # Architecture
//!
//! Uses MVI (Model-View-Intent) pattern:
//! - `state.rs` - `SessionState` (Running → Terminating)
//! - `intent.rs` - key, resize and job intents, plus the effects they emit
//! - `reducer.rs` - state transitions (pure, no side effects)
//! - `command.rs` - the closed command set typed on the command line

mod command;
mod intent;
mod reducer;
mod roster;
mod scrollback;
mod state;

pub use command::{Command, HELP_TEXT, RUN_USAGE};
pub use intent::{Key, SessionEffect, SessionIntent};
pub use reducer::SessionReducer;
pub use roster::{Roster, User, UserStatus};
pub use scrollback::Scrollback;
pub use state::{Focus, JobInfo, Phase, SessionState, Viewport};
