//! The closed set of command-line commands.

pub const HELP_TEXT: &str =
    "Available commands: help, clear, users, time, run <program> [args...], exit";
pub const RUN_USAGE: &str = "Usage: run <program> [args...]";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Clear,
    Users,
    Time,
    Exit,
    /// `run` followed by whitespace-separated words; empty when bare `run`.
    Run(Vec<String>),
    Unknown(String),
}

impl Command {
    /// Classify already-trimmed input. No quoting or escaping is recognised.
    pub fn parse(input: &str) -> Self {
        match input {
            "help" => Command::Help,
            "clear" => Command::Clear,
            "users" => Command::Users,
            "time" => Command::Time,
            "exit" => Command::Exit,
            _ => {
                let mut words = input.split_whitespace();
                if words.next() == Some("run") {
                    Command::Run(words.map(str::to_string).collect())
                } else {
                    Command::Unknown(input.to_string())
                }
            }
        }
    }
}
