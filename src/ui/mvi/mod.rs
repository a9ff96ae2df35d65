//! Model-View-Intent (MVI) primitives.
//!
//! ```text
//! Intent ──→ Reducer ──→ (State, Effect?) ──→ View
//!    ↑                                          │
//!    └──────────────────────────────────────────┘
//! ```
//!
//! - **State**: plain value holding everything the view needs
//! - **Intent**: key presses, resizes, and job notifications
//! - **Reducer**: pure transition; side effects are returned, not performed

mod intent;
mod reducer;
mod state;

pub use intent::Intent;
pub use reducer::Reducer;
pub use state::UiState;
