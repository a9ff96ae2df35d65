use std::io;
use std::time::Duration;
use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors produced by a PTY session and its output pump.
///
/// None of these are fatal to the process: the caller reports them and
/// carries on (the UI appends them to scrollback, `exec` exits non-zero).
#[derive(Debug, Error)]
pub enum PtyError {
    /// The pty could not be allocated or the child could not be started.
    #[error("failed to spawn '{command}': {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: BoxError,
    },

    /// Keystroke injection into the child failed.
    #[error("failed to write to pty: {0}")]
    WriteFailed(#[source] io::Error),

    /// The wait syscall for the child failed.
    #[error("failed to wait for child: {0}")]
    WaitFailed(#[source] io::Error),

    /// Reading the pty failed with something other than a hang-up.
    #[error("pty read error: {0}")]
    ReadError(#[source] io::Error),

    /// The output sink refused a chunk.
    #[error("output sink failed: {0}")]
    SinkFailed(#[source] io::Error),

    #[error("failed to resize pty: {0}")]
    ResizeFailed(#[source] BoxError),

    #[error("failed to start output pump: {0}")]
    PumpStartFailed(#[source] io::Error),

    #[error("output pump panicked")]
    PumpPanicked,

    /// An opt-in wait deadline passed while the child was still running.
    #[error("command timed out after {}s", after.as_secs_f32())]
    TimedOut { after: Duration },

    #[error("pty session closed")]
    SessionClosed,

    /// The output stream is single-use.
    #[error("pty reader already taken")]
    ReaderTaken,
}

impl PtyError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, PtyError::TimedOut { .. })
    }
}
