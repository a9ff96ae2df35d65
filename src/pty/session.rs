use crate::pty::error::PtyError;
#[cfg(unix)]
use crate::pty::process_group::ProcessGroup;
use crate::pty::reader::PtyReader;
use crate::pty::spawn_config::SpawnConfig;
use parking_lot::Mutex;
use portable_pty::{native_pty_system, Child, ChildKiller, MasterPty, PtySize};
use std::io::{Read, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};
use uuid::Uuid;

const WAIT_POLL_INTERVAL: Duration = Duration::from_millis(20);
/// How long `close` waits after each signal before escalating.
const REAP_GRACE: Duration = Duration::from_millis(500);

/// Exit status of a child process, recorded once by the first successful wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitStatus {
    code: u32,
}

impl ExitStatus {
    pub fn code(&self) -> u32 {
        self.code
    }

    pub fn success(&self) -> bool {
        self.code == 0
    }
}

impl From<portable_pty::ExitStatus> for ExitStatus {
    fn from(status: portable_pty::ExitStatus) -> Self {
        Self {
            code: status.exit_code(),
        }
    }
}

/// One child process bound to one pseudo-terminal.
///
/// All operations take `&self` so the session can be shared between the
/// thread that waits for the child and the thread that writes to it or
/// closes it. The killer is kept apart from the child handle so `close`
/// never queues behind a blocked `wait`.
pub struct PtySession {
    id: Uuid,
    command: String,
    pid: Option<u32>,
    child: Mutex<Box<dyn Child + Send + Sync>>,
    killer: Mutex<Box<dyn ChildKiller + Send + Sync>>,
    master: Mutex<Option<Box<dyn MasterPty + Send>>>,
    writer: Mutex<Option<Box<dyn Write + Send>>>,
    reader: Mutex<Option<Box<dyn Read + Send>>>,
    exit: Mutex<Option<ExitStatus>>,
    closed: AtomicBool,
}

impl PtySession {
    pub fn spawn(config: &SpawnConfig) -> Result<Self, PtyError> {
        let spawn_failed = |source: anyhow::Error| PtyError::SpawnFailed {
            command: config.command().to_string(),
            source: source.into(),
        };

        let pty_system = native_pty_system();
        let pair = pty_system
            .openpty(config.pty_size())
            .map_err(spawn_failed)?;
        let reader = pair.master.try_clone_reader().map_err(spawn_failed)?;
        let writer = pair.master.take_writer().map_err(spawn_failed)?;

        let child = pair
            .slave
            .spawn_command(config.command_builder())
            .map_err(spawn_failed)?;
        drop(pair.slave);

        let id = Uuid::new_v4();
        let pid = child.process_id();
        let killer = child.clone_killer();
        tracing::info!(
            session = %id,
            command = config.command(),
            args = ?config.args(),
            pid = ?pid,
            "spawned pty session"
        );

        Ok(Self {
            id,
            command: config.command().to_string(),
            pid,
            child: Mutex::new(child),
            killer: Mutex::new(killer),
            master: Mutex::new(Some(pair.master)),
            writer: Mutex::new(Some(writer)),
            reader: Mutex::new(Some(reader)),
            exit: Mutex::new(None),
            closed: AtomicBool::new(false),
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn pid(&self) -> Option<u32> {
        self.pid
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// The recorded exit status, if some wait has observed the exit.
    pub fn exit_status(&self) -> Option<ExitStatus> {
        *self.exit.lock()
    }

    /// Forward bytes to the child's terminal input.
    pub fn write(&self, bytes: &[u8]) -> Result<(), PtyError> {
        if self.is_closed() {
            return Err(PtyError::SessionClosed);
        }
        let mut writer = self.writer.lock();
        let writer = writer.as_mut().ok_or(PtyError::SessionClosed)?;
        writer.write_all(bytes).map_err(PtyError::WriteFailed)?;
        writer.flush().map_err(PtyError::WriteFailed)
    }

    /// Hand out the output stream. It can be taken exactly once.
    pub fn take_reader(&self) -> Result<PtyReader, PtyError> {
        if self.is_closed() {
            return Err(PtyError::SessionClosed);
        }
        self.reader
            .lock()
            .take()
            .map(PtyReader::new)
            .ok_or(PtyError::ReaderTaken)
    }

    pub fn resize(&self, rows: u16, cols: u16) -> Result<(), PtyError> {
        if self.is_closed() {
            return Err(PtyError::SessionClosed);
        }
        let master = self.master.lock();
        let master = master.as_ref().ok_or(PtyError::SessionClosed)?;
        master
            .resize(PtySize {
                rows,
                cols,
                pixel_width: 0,
                pixel_height: 0,
            })
            .map_err(|err| PtyError::ResizeFailed(err.into()))
    }

    /// Block until the child exits. Later calls return the recorded status.
    ///
    /// Still valid after `close`, which kills the child, so a waiter racing
    /// a close gets the killed child's status rather than an error.
    pub fn wait(&self) -> Result<ExitStatus, PtyError> {
        if let Some(status) = self.exit_status() {
            return Ok(status);
        }
        let mut child = self.child.lock();
        if let Some(status) = self.exit_status() {
            return Ok(status);
        }
        let status = ExitStatus::from(child.wait().map_err(PtyError::WaitFailed)?);
        self.record_exit(status);
        Ok(status)
    }

    /// Non-blocking check for exit.
    pub fn try_wait(&self) -> Result<Option<ExitStatus>, PtyError> {
        if let Some(status) = self.exit_status() {
            return Ok(Some(status));
        }
        let mut child = self.child.lock();
        match child.try_wait().map_err(PtyError::WaitFailed)? {
            Some(status) => {
                let status = ExitStatus::from(status);
                self.record_exit(status);
                Ok(Some(status))
            }
            None => Ok(None),
        }
    }

    /// Like `wait`, but gives up after `timeout`. The child keeps running;
    /// call `close` to stop it.
    pub fn wait_timeout(&self, timeout: Duration) -> Result<ExitStatus, PtyError> {
        let deadline = Instant::now() + timeout;
        loop {
            if let Some(status) = self.try_wait()? {
                return Ok(status);
            }
            let now = Instant::now();
            if now >= deadline {
                tracing::warn!(session = %self.id, ?timeout, "pty wait timed out");
                return Err(PtyError::TimedOut { after: timeout });
            }
            thread::sleep(WAIT_POLL_INTERVAL.min(deadline - now));
        }
    }

    /// Release the pty and the child. Hangs up the child's process group,
    /// escalating to SIGKILL after a grace period, which also ends any
    /// reader blocked on the output stream. Returns within a bounded time
    /// even if the child ignores SIGHUP.
    pub fn close(&self) {
        if self.closed.swap(true, Ordering::SeqCst) {
            return;
        }

        self.terminate();

        self.writer.lock().take();
        self.reader.lock().take();
        self.master.lock().take();
        tracing::info!(session = %self.id, exit = ?self.exit_status(), "pty session closed");
    }

    /// Background jobs forked by the child hold the pty slave open, so the
    /// whole group is signalled even when the child itself already exited.
    #[cfg(unix)]
    fn terminate(&self) {
        let Some(group) = self.pid.and_then(ProcessGroup::of_leader) else {
            self.kill_child();
            return;
        };
        if self.reaped() && !group.is_alive() {
            return;
        }

        group.hangup();
        if self.settle(&group) {
            return;
        }
        tracing::debug!(session = %self.id, "process group survived SIGHUP, sending SIGKILL");
        group.kill();
        if !self.settle(&group) {
            tracing::warn!(session = %self.id, "process group still present after SIGKILL");
        }
    }

    #[cfg(not(unix))]
    fn terminate(&self) {
        self.kill_child();
    }

    fn kill_child(&self) {
        if self.reaped() {
            return;
        }
        if let Err(err) = self.killer.lock().kill() {
            tracing::debug!(session = %self.id, error = %err, "kill on close failed");
        }
        let deadline = Instant::now() + REAP_GRACE;
        while !self.reaped() && Instant::now() < deadline {
            thread::sleep(WAIT_POLL_INTERVAL);
        }
    }

    /// Poll until the child is reaped and its group is gone, for at most
    /// `REAP_GRACE`.
    #[cfg(unix)]
    fn settle(&self, group: &ProcessGroup) -> bool {
        let deadline = Instant::now() + REAP_GRACE;
        loop {
            if self.reaped() && !group.is_alive() {
                return true;
            }
            if Instant::now() >= deadline {
                return false;
            }
            thread::sleep(WAIT_POLL_INTERVAL);
        }
    }

    /// Non-blocking. A concurrent `wait` holding the child records the exit
    /// itself, so a busy lock just means "not yet".
    fn reaped(&self) -> bool {
        if self.exit_status().is_some() {
            return true;
        }
        let Some(mut child) = self.child.try_lock() else {
            return false;
        };
        match child.try_wait() {
            Ok(Some(status)) => {
                self.record_exit(status.into());
                true
            }
            Ok(None) => false,
            Err(err) => {
                tracing::warn!(session = %self.id, error = %err, "reaping child on close failed");
                false
            }
        }
    }

    fn record_exit(&self, status: ExitStatus) {
        let mut exit = self.exit.lock();
        if exit.is_none() {
            tracing::info!(session = %self.id, code = status.code(), "child exited");
            *exit = Some(status);
        }
    }
}

impl Drop for PtySession {
    fn drop(&mut self) {
        self.close();
    }
}
