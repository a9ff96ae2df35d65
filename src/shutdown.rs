use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared "stop now" flag, raised by SIGTERM/SIGINT/SIGQUIT or by hand.
///
/// Cloning shares the flag, so the input thread, the `exec` watcher and the
/// main loop all observe the same signal.
#[derive(Clone, Debug, Default)]
pub struct ShutdownHandle {
    shutdown: Arc<AtomicBool>,
}

impl ShutdownHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Route the termination signals to this flag instead of killing the
    /// process, so the pty child is closed and the terminal restored first.
    pub fn register_signals(&self) -> io::Result<()> {
        for &signal in signal_hook::consts::TERM_SIGNALS {
            signal_hook::flag::register(signal, Arc::clone(&self.shutdown))?;
        }
        Ok(())
    }

    pub fn is_shutting_down(&self) -> bool {
        self.shutdown.load(Ordering::SeqCst)
    }

    /// Returns `true` only for the call that raised the flag.
    pub fn signal(&self) -> bool {
        let first = !self.shutdown.swap(true, Ordering::SeqCst);
        if first {
            tracing::info!("graceful shutdown initiated");
        }
        first
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_flag() {
        let handle = ShutdownHandle::new();
        let other = handle.clone();
        assert!(!other.is_shutting_down());
        assert!(handle.signal());
        assert!(other.is_shutting_down());
        assert!(!other.signal());
    }
}
