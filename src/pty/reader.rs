use crate::pty::error::PtyError;
use std::io::{self, Read};
use std::iter::FusedIterator;

const CHUNK_SIZE: usize = 8192;

/// Lazy stream of output chunks from the master side of a pty.
///
/// Ends when the child hangs up and the pty is drained. Once it has
/// returned `None` (or an error) it stays finished.
pub struct PtyReader {
    inner: Box<dyn Read + Send>,
    buffer: Box<[u8]>,
    done: bool,
}

impl PtyReader {
    pub(crate) fn new(inner: Box<dyn Read + Send>) -> Self {
        Self {
            inner,
            buffer: vec![0u8; CHUNK_SIZE].into_boxed_slice(),
            done: false,
        }
    }
}

impl Iterator for PtyReader {
    type Item = Result<Vec<u8>, PtyError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        loop {
            match self.inner.read(&mut self.buffer) {
                Ok(0) => {
                    self.done = true;
                    return None;
                }
                Ok(count) => return Some(Ok(self.buffer[..count].to_vec())),
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) if is_hangup(&err) => {
                    self.done = true;
                    return None;
                }
                Err(err) => {
                    self.done = true;
                    return Some(Err(PtyError::ReadError(err)));
                }
            }
        }
    }
}

impl FusedIterator for PtyReader {}

/// Linux reports EIO on the master once every slave descriptor is closed.
#[cfg(unix)]
fn is_hangup(err: &io::Error) -> bool {
    err.raw_os_error() == Some(libc::EIO)
}

#[cfg(not(unix))]
fn is_hangup(err: &io::Error) -> bool {
    err.kind() == io::ErrorKind::BrokenPipe
}
