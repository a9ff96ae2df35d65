//! One-shot command execution for `pty-terminal exec`.

use crate::config::PtyConfig;
use crate::pty::{BufferSink, ExitStatus, OutputPump, PtyError, PtySession, SpawnConfig, WriterSink};
use crate::shutdown::ShutdownHandle;
use std::io::{self, BufRead};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

const SIGNAL_POLL: Duration = Duration::from_millis(50);

/// Line that ends interactive forwarding once sent.
const EXIT_LINE: &str = "exit";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecOptions {
    pub command: String,
    pub args: Vec<String>,
    /// Overrides `[pty] timeout_secs`.
    pub timeout: Option<Duration>,
    /// Forward stdin lines to the child.
    pub interactive: bool,
    /// Buffer output and hand it back instead of streaming to stdout.
    pub capture: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecOutcome {
    pub status: ExitStatus,
    /// Everything the child printed, when capturing.
    pub captured: Option<String>,
}

/// Run `options.command` in a pty until it exits, times out, or `shutdown`
/// is raised. Output is fully drained before this returns.
pub fn run(
    options: &ExecOptions,
    pty: &PtyConfig,
    shutdown: &ShutdownHandle,
) -> Result<ExecOutcome, PtyError> {
    let config = SpawnConfig::new(options.command.clone(), options.args.clone())
        .with_size(pty.rows, pty.cols)
        .with_env("TERM", pty.term.clone());

    let session = Arc::new(PtySession::spawn(&config)?);
    let session = scopeguard::guard(session, |session| session.close());

    let reader = session.take_reader()?;
    let capture = options.capture.then(BufferSink::new);
    let pump = match &capture {
        Some(buffer) => OutputPump::start(reader, buffer.clone())?,
        None => OutputPump::start(reader, WriterSink::new(io::stdout()))?,
    };

    if options.interactive {
        forward_stdin(Arc::clone(&*session));
    }
    watch_shutdown(Arc::clone(&*session), shutdown.clone());

    let outcome = match options.timeout.or_else(|| pty.timeout()) {
        Some(limit) => session.wait_timeout(limit),
        None => session.wait(),
    };
    session.close();
    let report = pump.join();

    let status = outcome?;
    let report = report?;
    tracing::info!(
        command = %options.command,
        code = status.code(),
        bytes = report.bytes,
        "exec finished"
    );

    Ok(ExecOutcome {
        status,
        captured: capture.map(|buffer| buffer.text()),
    })
}

/// Send each stdin line as `line\r\n`. The thread is left detached since a
/// blocked stdin read can't be interrupted.
fn forward_stdin(session: Arc<PtySession>) {
    let spawned = thread::Builder::new()
        .name("exec-stdin".to_string())
        .spawn(move || {
            for line in io::stdin().lock().lines() {
                let Ok(line) = line else {
                    break;
                };
                let line = line.trim_end_matches('\r');
                if let Err(err) = session.write(format!("{line}\r\n").as_bytes()) {
                    tracing::debug!(error = %err, "stdin forwarding stopped");
                    break;
                }
                if line.trim() == EXIT_LINE {
                    break;
                }
            }
        });
    if let Err(err) = spawned {
        tracing::warn!(error = %err, "failed to start stdin forwarder");
    }
}

fn watch_shutdown(session: Arc<PtySession>, shutdown: ShutdownHandle) {
    let spawned = thread::Builder::new()
        .name("exec-signal-watch".to_string())
        .spawn(move || {
            while !session.is_closed() {
                if shutdown.is_shutting_down() {
                    tracing::info!(command = session.command(), "signal received, closing");
                    session.close();
                    break;
                }
                thread::sleep(SIGNAL_POLL);
            }
        });
    if let Err(err) = spawned {
        tracing::warn!(error = %err, "failed to start signal watcher");
    }
}
