use crate::config::Config;
use crate::shutdown::ShutdownHandle;
use crate::ui::app::App;
use crate::ui::events::{AppEvent, EventHandler};
use crate::ui::render::draw;
use crate::ui::session::SessionState;
use crate::ui::terminal_guard::setup_terminal;
use crate::ui::theme::Theme;
use chrono::Local;
use std::io;
use std::sync::mpsc::RecvTimeoutError;

/// Events applied per redraw at most, so a chatty job can't starve input.
const MAX_EVENTS_PER_FRAME: usize = 256;

pub fn run(config: &Config, theme: Theme) -> io::Result<()> {
    let shutdown = ShutdownHandle::new();
    shutdown.register_signals()?;

    let (mut terminal, guard) = setup_terminal()?;
    let tick_rate = config.ui.tick_rate();
    let events = EventHandler::new(tick_rate, shutdown.clone());

    let now = Local::now();
    let state = SessionState::new(config.roster(now), now, config.ui.scrollback_limit);
    let mut app = App::new(state, config.ui.layout(), config.pty.clone(), events.sender());
    if let Ok((cols, rows)) = crossterm::terminal::size() {
        app.handle_event(AppEvent::Resize(cols, rows));
    }
    tracing::info!(users = app.state().roster().len(), "session started");

    loop {
        let view = app.view();
        terminal.draw(|frame| draw(frame, &view, &theme))?;
        if app.should_quit() {
            break;
        }

        match events.next(tick_rate) {
            Ok(event) => {
                app.handle_event(event);
                for _ in 1..MAX_EVENTS_PER_FRAME {
                    match events.try_next() {
                        Some(event) => app.handle_event(event),
                        None => break,
                    }
                }
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }

    app.shutdown();
    drop(events);
    drop(guard);
    tracing::info!("session ended");
    Ok(())
}
