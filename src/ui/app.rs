use crate::config::PtyConfig;
use crate::pty::{EventSink, OutputPump, PtyError, PtySession, SpawnConfig};
use crate::ui::events::AppEvent;
use crate::ui::layout::{LayoutConfig, PaneLayout};
use crate::ui::mvi::Reducer;
use crate::ui::session::{SessionEffect, SessionIntent, SessionReducer, SessionState};
use crate::ui::view::ScreenView;
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::thread;

/// Columns taken by the main pane's left and right border.
const MAIN_BORDER_WIDTH: u16 = 2;

/// A job's pty, shared with its waiter thread.
struct RunningJob {
    id: u64,
    session: Arc<PtySession>,
}

/// Owns the session state and the resources the reducer can't: the job's
/// pty and the channel its threads report back on.
pub struct App {
    state: SessionState,
    layout: LayoutConfig,
    pty: PtyConfig,
    events: Sender<AppEvent>,
    job: Option<RunningJob>,
    should_quit: bool,
}

impl App {
    pub fn new(
        state: SessionState,
        layout: LayoutConfig,
        pty: PtyConfig,
        events: Sender<AppEvent>,
    ) -> Self {
        Self {
            state,
            layout,
            pty,
            events,
            job: None,
            should_quit: false,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn request_quit(&mut self) {
        self.should_quit = true;
    }

    pub fn view(&self) -> ScreenView {
        ScreenView::project(&self.state, &self.layout)
    }

    /// Run the reducer and carry out whatever effect it asks for.
    pub fn dispatch(&mut self, intent: SessionIntent) {
        let (state, effect) = SessionReducer::reduce(std::mem::take(&mut self.state), intent);
        self.state = state;
        if let Some(effect) = effect {
            self.apply(effect);
        }
    }

    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Key(key) => self.dispatch(SessionIntent::key(key)),
            AppEvent::Resize(width, height) => {
                self.dispatch(SessionIntent::Resize { width, height });
                self.resize_job();
            }
            AppEvent::PtyLine { job, line } => {
                self.dispatch(SessionIntent::JobOutput { job, line });
            }
            AppEvent::JobExited { job, exit_code } => {
                self.release_job(job);
                self.dispatch(SessionIntent::JobFinished { job, exit_code });
            }
            AppEvent::JobFailed { job, message } => {
                self.release_job(job);
                self.dispatch(SessionIntent::JobFailed { job, message });
            }
            AppEvent::Shutdown => self.request_quit(),
        }
    }

    /// Kill a running job, if any. Safe to call more than once.
    pub fn shutdown(&mut self) {
        if let Some(job) = self.job.take() {
            tracing::info!(job = job.id, command = job.session.command(), "closing job on exit");
            job.session.close();
        }
    }

    fn apply(&mut self, effect: SessionEffect) {
        match effect {
            SessionEffect::Quit => self.request_quit(),
            SessionEffect::Spawn { job, program, args } => {
                if let Err(err) = self.start_job(job, &program, args) {
                    tracing::warn!(job, program = %program, error = %err, "job failed to start");
                    self.dispatch(SessionIntent::JobFailed {
                        job,
                        message: err.to_string(),
                    });
                }
            }
        }
    }

    fn start_job(&mut self, job: u64, program: &str, args: Vec<String>) -> Result<(), PtyError> {
        let (rows, cols) = self.job_size();
        let config = SpawnConfig::new(program, args)
            .with_size(rows, cols)
            .with_env("TERM", self.pty.term.clone());

        let session = Arc::new(PtySession::spawn(&config)?);
        let pump = match session
            .take_reader()
            .and_then(|reader| {
                let sink =
                    EventSink::new(self.events.clone(), move |line| AppEvent::PtyLine { job, line });
                OutputPump::start(reader, sink)
            })
        {
            Ok(pump) => pump,
            Err(err) => {
                session.close();
                return Err(err);
            }
        };

        let waiter_session = Arc::clone(&session);
        let tx = self.events.clone();
        let timeout = self.pty.timeout();
        thread::Builder::new()
            .name("pty-job-waiter".to_string())
            .spawn(move || {
                let outcome = match timeout {
                    Some(limit) => waiter_session.wait_timeout(limit),
                    None => waiter_session.wait(),
                };
                waiter_session.close();
                // Joining first keeps every PtyLine ahead of the exit event.
                let drained = pump.join();

                let event = match (outcome, drained) {
                    (Ok(status), Ok(report)) => {
                        tracing::debug!(job, chunks = report.chunks, bytes = report.bytes, "job drained");
                        AppEvent::JobExited {
                            job,
                            exit_code: status.code(),
                        }
                    }
                    (Err(err), _) | (Ok(_), Err(err)) => AppEvent::JobFailed {
                        job,
                        message: err.to_string(),
                    },
                };
                if tx.send(event).is_err() {
                    tracing::debug!(job, "ui gone before job finished");
                }
            })
            .map_err(|err| {
                session.close();
                PtyError::PumpStartFailed(err)
            })?;

        self.job = Some(RunningJob { id: job, session });
        Ok(())
    }

    fn release_job(&mut self, id: u64) {
        if self.job.as_ref().is_some_and(|job| job.id == id) {
            self.job = None;
        }
    }

    /// The main pane's inner area, or the configured default before the
    /// first resize.
    fn job_size(&self) -> (u16, u16) {
        let viewport = self.state.viewport();
        if viewport.is_unknown() {
            return (self.pty.rows, self.pty.cols);
        }
        let layout = PaneLayout::compute(viewport, &self.layout);
        (
            layout.main_height,
            layout.main_width.saturating_sub(MAIN_BORDER_WIDTH).max(1),
        )
    }

    fn resize_job(&self) {
        let Some(job) = &self.job else {
            return;
        };
        let (rows, cols) = self.job_size();
        if let Err(err) = job.session.resize(rows, cols) {
            tracing::warn!(job = job.id, error = %err, "failed to resize job pty");
        }
    }
}

impl Drop for App {
    fn drop(&mut self) {
        self.shutdown();
    }
}
