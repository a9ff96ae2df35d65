//! Turns raw terminal output into plain display lines.

use vte::{Parser, Perform};

const TAB_WIDTH: usize = 4;

/// Incremental decoder from pty bytes to text lines.
///
/// Escape sequences are consumed and dropped. A carriage return moves back
/// to column zero, so the next printable character starts the line over;
/// this keeps progress-bar style output to its final state.
pub struct LineAssembler {
    parser: Parser,
    collector: Collector,
}

#[derive(Default)]
struct Collector {
    current: String,
    at_line_start: bool,
    completed: Vec<String>,
}

impl Perform for Collector {
    fn print(&mut self, c: char) {
        if self.at_line_start {
            self.current.clear();
            self.at_line_start = false;
        }
        self.current.push(c);
    }

    fn execute(&mut self, byte: u8) {
        match byte {
            b'\n' => {
                self.at_line_start = false;
                self.completed.push(std::mem::take(&mut self.current));
            }
            b'\r' => self.at_line_start = true,
            b'\t' => {
                let pad = TAB_WIDTH - self.current.chars().count() % TAB_WIDTH;
                self.current.extend(std::iter::repeat(' ').take(pad));
            }
            0x08 => {
                self.current.pop();
            }
            _ => {}
        }
    }
}

impl Default for LineAssembler {
    fn default() -> Self {
        Self::new()
    }
}

impl LineAssembler {
    pub fn new() -> Self {
        Self {
            parser: Parser::new(),
            collector: Collector::default(),
        }
    }

    /// Feed a chunk and return every line it completed.
    pub fn feed(&mut self, bytes: &[u8]) -> Vec<String> {
        self.parser.advance(&mut self.collector, bytes);
        std::mem::take(&mut self.collector.completed)
    }

    /// Flush a trailing line that never saw its newline.
    pub fn finish(&mut self) -> Option<String> {
        let line = std::mem::take(&mut self.collector.current);
        self.collector.at_line_start = false;
        if line.is_empty() {
            None
        } else {
            Some(line)
        }
    }
}
