mod loader;
mod types;

pub use loader::ConfigError;
pub use types::{Config, PtyConfig, ThemeConfig, UiConfig, UserEntry, MAX_CONNECTED_MINUTES};
