//! Base trait for intents.

/// Marker trait for intent objects.
///
/// Intents are produced by the terminal input thread, by resize
/// notifications, and by background PTY jobs, and are consumed one at a
/// time by a reducer.
pub trait Intent: Send + 'static {}
