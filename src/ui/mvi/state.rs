//! Base trait for UI state.

/// Marker trait for UI state objects.
///
/// States are cloneable values (the reducer takes ownership and returns a
/// new one) and comparable so tests can assert a transition was a no-op.
pub trait UiState: Clone + PartialEq + Default + Send + 'static {}
