use crate::config::{ConfigError, ThemeConfig};
use ratatui::style::Color;

/// Resolved colours used by `render::draw`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub border: Color,
    pub title: Color,
    pub text: Color,
    pub selected: Color,
    pub prompt: Color,
    pub input: Color,
    pub cursor: Color,
    pub active: Color,
    pub idle: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            border: Color::Rgb(0x66, 0x66, 0x66),
            title: Color::Rgb(0xfa, 0xfa, 0xfa),
            text: Color::Rgb(0xcc, 0xcc, 0xcc),
            selected: Color::Rgb(0x00, 0xff, 0x00),
            prompt: Color::Rgb(0x00, 0xff, 0x00),
            input: Color::Rgb(0xff, 0xff, 0xff),
            cursor: Color::Rgb(0xff, 0xff, 0xff),
            active: Color::Rgb(0x22, 0xc5, 0x5e),
            idle: Color::Rgb(0x6b, 0x72, 0x80),
        }
    }
}

impl TryFrom<&ThemeConfig> for Theme {
    type Error = ConfigError;

    fn try_from(config: &ThemeConfig) -> Result<Self, Self::Error> {
        Ok(Self {
            border: parse_color("border", &config.border)?,
            title: parse_color("title", &config.title)?,
            text: parse_color("text", &config.text)?,
            selected: parse_color("selected", &config.selected)?,
            prompt: parse_color("prompt", &config.prompt)?,
            input: parse_color("input", &config.input)?,
            cursor: parse_color("cursor", &config.cursor)?,
            active: parse_color("active", &config.active)?,
            idle: parse_color("idle", &config.idle)?,
        })
    }
}

/// Accepts `#rrggbb`, ANSI names like `green`, or a palette index.
fn parse_color(field: &str, value: &str) -> Result<Color, ConfigError> {
    value
        .parse::<Color>()
        .map_err(|_| ConfigError::ValidationError {
            message: format!("theme.{field}: '{value}' is not a colour"),
        })
}
