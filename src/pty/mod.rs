//! Pseudo-terminal command execution.
//!
//! A `PtySession` owns one child bound to one pty. Its output is a
//! single-use `PtyReader`, normally handed to an `OutputPump` thread so the
//! caller can write and wait at the same time without the child stalling on
//! a full output buffer.

mod error;
mod lines;
#[cfg(unix)]
mod process_group;
mod pump;
mod reader;
mod session;
mod spawn_config;

pub use error::{BoxError, PtyError};
pub use lines::LineAssembler;
pub use pump::{BufferSink, EventSink, OutputPump, OutputSink, PumpReport, WriterSink};
pub use reader::PtyReader;
pub use session::{ExitStatus, PtySession};
pub use spawn_config::{SpawnConfig, DEFAULT_TERM};
