use crossterm::event::{self, Event};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crate::shutdown::ShutdownHandle;
use crate::ui::input::key_from_event;
use crate::ui::session::Key;

/// Upper bound on how long the input thread blocks before rechecking the
/// stop and shutdown flags.
const INPUT_POLL: Duration = Duration::from_millis(50);

/// Everything the main loop reacts to, from any thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    Key(Key),
    /// New terminal size as (cols, rows).
    Resize(u16, u16),
    /// One line of output from job `job`.
    PtyLine { job: u64, line: String },
    /// Job `job` exited and its output pump has drained.
    JobExited { job: u64, exit_code: u32 },
    JobFailed { job: u64, message: String },
    /// OS signal received (SIGTERM, SIGINT, SIGQUIT)
    Shutdown,
}

pub struct EventHandler {
    rx: Receiver<AppEvent>,
    tx: mpsc::Sender<AppEvent>,
    stop: Arc<AtomicBool>,
}

impl EventHandler {
    pub fn new(tick_rate: Duration, shutdown: ShutdownHandle) -> Self {
        let (tx, rx) = mpsc::channel();
        let event_tx = tx.clone();
        let stop = Arc::new(AtomicBool::new(false));
        let thread_stop = Arc::clone(&stop);
        let poll = tick_rate.min(INPUT_POLL);

        let spawned = thread::Builder::new()
            .name("ui-input".to_string())
            .spawn(move || {
                let mut announced = false;
                while !thread_stop.load(Ordering::Relaxed) {
                    if shutdown.is_shutting_down() && !announced {
                        announced = true;
                        if event_tx.send(AppEvent::Shutdown).is_err() {
                            break;
                        }
                    }

                    let ready = match event::poll(poll) {
                        Ok(ready) => ready,
                        Err(err) => {
                            tracing::error!(error = %err, "terminal poll failed");
                            break;
                        }
                    };
                    if !ready {
                        continue;
                    }

                    let forwarded = match event::read() {
                        Ok(Event::Key(key)) => match key_from_event(key) {
                            Some(key) => event_tx.send(AppEvent::Key(key)),
                            None => Ok(()),
                        },
                        Ok(Event::Resize(cols, rows)) => {
                            event_tx.send(AppEvent::Resize(cols, rows))
                        }
                        Ok(_) => Ok(()),
                        Err(err) => {
                            tracing::error!(error = %err, "terminal read failed");
                            break;
                        }
                    };
                    if forwarded.is_err() {
                        break;
                    }
                }
                tracing::debug!("input thread stopped");
            });
        if let Err(err) = spawned {
            tracing::error!(error = %err, "failed to start input thread");
        }

        Self { rx, tx, stop }
    }

    pub fn next(&self, timeout: Duration) -> Result<AppEvent, mpsc::RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }

    /// An already-queued event, without blocking.
    pub fn try_next(&self) -> Option<AppEvent> {
        self.rx.try_recv().ok()
    }

    /// Handle for worker threads (pumps, job waiters) to post events.
    pub fn sender(&self) -> mpsc::Sender<AppEvent> {
        self.tx.clone()
    }
}

impl Drop for EventHandler {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
    }
}
