mod common;

use common::temp_config;
use pty_terminal::config::{Config, ConfigError, UserEntry, MAX_CONNECTED_MINUTES};
use pty_terminal::ui::session::UserStatus;
use pty_terminal::ui::theme::Theme;
use ratatui::style::Color;
use std::path::Path;

/// Test that Config::default() produces the documented values.
#[test]
fn test_config_default_values() {
    let config = Config::default();

    assert_eq!(config.ui.tick_rate_ms, 250);
    assert_eq!(config.ui.scrollback_limit, None);
    assert_eq!(config.ui.sidebar_min_width, 15);
    assert!((config.ui.sidebar_ratio - 0.20).abs() < f32::EPSILON);
    assert_eq!(config.ui.main_min_width, 30);
    assert_eq!(config.ui.main_min_height, 5);

    assert_eq!(config.pty.rows, 24);
    assert_eq!(config.pty.cols, 80);
    assert_eq!(config.pty.term, "xterm-256color");
    assert_eq!(config.pty.timeout_secs, None);

    assert_eq!(
        config.users,
        vec![
            UserEntry::new("john_doe", UserStatus::Active, 120),
            UserEntry::new("jane_smith", UserStatus::Idle, 30),
            UserEntry::new("admin", UserStatus::Active, 5),
        ]
    );
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_path_ends_with_expected() {
    let path = Config::config_path();
    assert!(path.ends_with("pty-terminal/config.toml"));
}

#[test]
fn test_missing_file_gives_defaults() {
    let config = Config::load_from(Path::new("/nonexistent/pty-terminal/config.toml"))
        .expect("defaults");
    assert_eq!(config, Config::default());
}

#[test]
fn test_partial_file_fills_in_defaults() {
    let (_dir, path) = temp_config(
        r#"
[ui]
scrollback_limit = 500

[pty]
timeout_secs = 15

[[users]]
name = "ops"
status = "idle"
"#,
    );
    let config = Config::load_from(&path).expect("load");

    assert_eq!(config.ui.scrollback_limit, Some(500));
    assert_eq!(config.ui.tick_rate_ms, 250);
    assert_eq!(config.pty.timeout_secs, Some(15));
    assert_eq!(config.pty.rows, 24);
    assert_eq!(config.users, vec![UserEntry::new("ops", UserStatus::Idle, 0)]);
}

#[test]
fn test_theme_section_overrides_colours() {
    let (_dir, path) = temp_config(
        r##"
[theme]
border = "blue"
active = "#ff0000"
"##,
    );
    let config = Config::load_from(&path).expect("load");
    let theme = Theme::try_from(&config.theme).expect("theme");
    assert_eq!(theme.border, Color::Blue);
    assert_eq!(theme.active, Color::Rgb(0xff, 0, 0));
    assert_eq!(theme.idle, Theme::default().idle);
}

#[test]
fn test_malformed_toml_is_parse_error() {
    let (_dir, path) = temp_config("[ui\ntick_rate_ms = ");
    let err = Config::load_from(&path).expect_err("should fail");
    assert!(matches!(err, ConfigError::ParseError { .. }));
    assert!(err.to_string().contains("config.toml"));
}

#[test]
fn test_unknown_status_is_parse_error() {
    let (_dir, path) = temp_config("[[users]]\nname = \"x\"\nstatus = \"away\"\n");
    let err = Config::load_from(&path).expect_err("should fail");
    assert!(matches!(err, ConfigError::ParseError { .. }));
}

// -- Validation -------------------------------------------------------------

fn validation_message(config: &Config) -> String {
    match config.validate() {
        Err(ConfigError::ValidationError { message }) => message,
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn test_validation_rejects_bad_ratio() {
    for ratio in [0.0, -0.5, 1.5, f32::NAN] {
        let mut config = Config::default();
        config.ui.sidebar_ratio = ratio;
        assert!(validation_message(&config).contains("sidebar_ratio"));
    }
}

#[test]
fn test_validation_rejects_zero_values() {
    let mut config = Config::default();
    config.ui.scrollback_limit = Some(0);
    assert!(validation_message(&config).contains("scrollback_limit"));

    let mut config = Config::default();
    config.ui.tick_rate_ms = 0;
    assert!(validation_message(&config).contains("tick_rate_ms"));

    let mut config = Config::default();
    config.pty.cols = 0;
    assert!(validation_message(&config).contains("pty size"));
}

#[test]
fn test_validation_rejects_blank_user_name() {
    let mut config = Config::default();
    config.users.push(UserEntry::new("  ", UserStatus::Active, 0));
    assert!(validation_message(&config).contains("users[3]"));
}

#[test]
fn test_validation_rejects_out_of_range_connection_age() {
    for minutes in [-1, MAX_CONNECTED_MINUTES + 1, i64::MAX, i64::MIN] {
        let mut config = Config::default();
        config.users[1].connected_minutes_ago = minutes;
        assert!(
            validation_message(&config).contains("users[1].connected_minutes_ago"),
            "{minutes}"
        );
    }

    let mut config = Config::default();
    config.users[0].connected_minutes_ago = MAX_CONNECTED_MINUTES;
    assert!(config.validate().is_ok());
}

#[test]
fn test_huge_connection_age_in_file_is_rejected_not_fatal() {
    let (_dir, path) = temp_config(
        "[[users]]\nname = \"x\"\nstatus = \"active\"\nconnected_minutes_ago = 9223372036854775807\n",
    );
    let err = Config::load_from(&path).expect_err("should fail");
    assert!(matches!(err, ConfigError::ValidationError { .. }));
}

#[test]
fn test_roster_tolerates_unvalidated_extremes() {
    let now = chrono::Local::now();
    let mut config = Config::default();
    config.users = vec![
        UserEntry::new("far", UserStatus::Active, i64::MAX),
        UserEntry::new("near", UserStatus::Idle, 10),
    ];
    let roster = config.roster(now);
    assert_eq!(roster.len(), 2);
}

#[test]
fn test_validation_rejects_bad_colour() {
    let (_dir, path) = temp_config("[theme]\nprompt = \"chartreuse-ish\"\n");
    let err = Config::load_from(&path).expect_err("should fail");
    assert!(err.to_string().contains("theme.prompt"));
}
