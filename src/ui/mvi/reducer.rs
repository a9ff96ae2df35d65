//! Reducer trait.

use super::intent::Intent;
use super::state::UiState;

/// Reducer transforms state based on intents.
///
/// The reducer is the only place where state transitions happen. It is a
/// pure function `(State, Intent) -> (State, Option<Effect>)`: anything that
/// touches the outside world (quitting, spawning a process) is returned as
/// an effect for the caller to carry out.
pub trait Reducer {
    type State: UiState;
    type Intent: Intent;
    type Effect;

    /// Process one intent and return the new state plus at most one effect.
    fn reduce(state: Self::State, intent: Self::Intent) -> (Self::State, Option<Self::Effect>);
}
