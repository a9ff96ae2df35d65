pub mod config;
pub mod logging;
pub mod pty;
pub mod runner;
pub mod shutdown;
pub mod ui;
