use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use pty_terminal::config::Config;
use pty_terminal::logging::{default_log_path, init_tracing, LogTarget};
use pty_terminal::runner::{self, ExecOptions};
use pty_terminal::shutdown::ShutdownHandle;
use pty_terminal::ui::theme::Theme;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;

/// Exit code used when `exec --timeout` kills the child, as `timeout(1)` does.
const TIMEOUT_EXIT_CODE: i32 = 124;

#[derive(Debug, Parser)]
#[command(name = "pty-terminal", version, about = "Terminal session UI with pty-backed commands")]
struct Cli {
    /// Config file (default: ~/.config/pty-terminal/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Mode>,
}

#[derive(Debug, Subcommand)]
enum Mode {
    /// Interactive session UI (default)
    Tui,
    /// Run one command in a pty, streaming its output
    Exec(ExecArgs),
}

#[derive(Debug, Args)]
struct ExecArgs {
    /// Kill the command after this many seconds
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Forward stdin lines to the command
    #[arg(long)]
    interactive: bool,

    /// Print output only after the command finishes
    #[arg(long)]
    capture: bool,

    /// Program to run
    command: String,

    /// Arguments for the program
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    args: Vec<String>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("loading configuration")?;

    match cli.command.unwrap_or(Mode::Tui) {
        Mode::Tui => run_tui(&config),
        Mode::Exec(args) => run_exec(&config, args),
    }
}

fn run_tui(config: &Config) -> anyhow::Result<()> {
    init_tracing(LogTarget::File(default_log_path()))?;
    let theme = Theme::try_from(&config.theme)?;
    pty_terminal::ui::run(config, theme).context("terminal UI failed")
}

fn run_exec(config: &Config, args: ExecArgs) -> anyhow::Result<()> {
    init_tracing(LogTarget::Stderr)?;
    let shutdown = ShutdownHandle::new();
    shutdown
        .register_signals()
        .context("installing signal handlers")?;

    let options = ExecOptions {
        command: args.command,
        args: args.args,
        timeout: args.timeout.map(Duration::from_secs),
        interactive: args.interactive,
        capture: args.capture,
    };

    let outcome = match runner::run(&options, &config.pty, &shutdown) {
        Ok(outcome) => outcome,
        Err(err) if err.is_timeout() => {
            eprintln!("Error: {err}");
            std::process::exit(TIMEOUT_EXIT_CODE);
        }
        Err(err) => return Err(err).with_context(|| format!("running '{}'", options.command)),
    };

    if let Some(text) = &outcome.captured {
        let mut stdout = io::stdout();
        stdout.write_all(text.as_bytes())?;
        stdout.flush()?;
    }

    if outcome.status.success() {
        return Ok(());
    }
    std::process::exit(outcome.status.code() as i32);
}
