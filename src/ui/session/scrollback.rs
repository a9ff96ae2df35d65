use std::collections::VecDeque;

/// Display history for the main pane.
///
/// Append-only apart from `clear`. With a limit set it behaves as a ring
/// buffer and drops the oldest lines first; without one it grows unbounded.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Scrollback {
    lines: VecDeque<String>,
    limit: Option<usize>,
}

impl Scrollback {
    pub fn new(limit: Option<usize>) -> Self {
        Self {
            lines: VecDeque::new(),
            limit,
        }
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    pub fn push(&mut self, line: impl Into<String>) {
        self.lines.push_back(line.into());
        if let Some(limit) = self.limit {
            while self.lines.len() > limit {
                self.lines.pop_front();
            }
        }
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    pub fn last(&self) -> Option<&str> {
        self.lines.back().map(String::as_str)
    }

    /// The newest `count` lines, oldest first.
    pub fn tail(&self, count: usize) -> impl Iterator<Item = &str> {
        self.iter().skip(self.lines.len().saturating_sub(count))
    }
}
