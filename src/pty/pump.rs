use crate::pty::error::PtyError;
use crate::pty::lines::LineAssembler;
use crate::pty::reader::PtyReader;
use parking_lot::Mutex;
use std::io::{self, Write};
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::thread;

/// Destination for pty output chunks.
pub trait OutputSink: Send {
    fn write_chunk(&mut self, chunk: &[u8]) -> io::Result<()>;

    /// Called once after the last chunk, including after a read error.
    fn finish(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Raw passthrough to any writer, flushed per chunk (stdout in `exec`).
pub struct WriterSink<W> {
    writer: W,
}

impl<W: Write + Send> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write + Send> OutputSink for WriterSink<W> {
    fn write_chunk(&mut self, chunk: &[u8]) -> io::Result<()> {
        self.writer.write_all(chunk)?;
        self.writer.flush()
    }

    fn finish(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

/// Collects everything into a shared buffer that stays readable while the
/// pump is running.
#[derive(Clone, Default)]
pub struct BufferSink {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl BufferSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> Vec<u8> {
        self.buffer.lock().clone()
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.buffer.lock()).into_owned()
    }
}

impl OutputSink for BufferSink {
    fn write_chunk(&mut self, chunk: &[u8]) -> io::Result<()> {
        self.buffer.lock().extend_from_slice(chunk);
        Ok(())
    }
}

/// Decodes output into lines and posts each one to a channel, wrapped by
/// `wrap` into whatever message type the receiver expects.
pub struct EventSink<T, F> {
    tx: Sender<T>,
    wrap: F,
    lines: LineAssembler,
}

impl<T, F> EventSink<T, F>
where
    T: Send,
    F: Fn(String) -> T + Send,
{
    pub fn new(tx: Sender<T>, wrap: F) -> Self {
        Self {
            tx,
            wrap,
            lines: LineAssembler::new(),
        }
    }

    fn send(&self, line: String) -> io::Result<()> {
        self.tx
            .send((self.wrap)(line))
            .map_err(|_| io::Error::new(io::ErrorKind::BrokenPipe, "event queue closed"))
    }
}

impl<T, F> OutputSink for EventSink<T, F>
where
    T: Send,
    F: Fn(String) -> T + Send,
{
    fn write_chunk(&mut self, chunk: &[u8]) -> io::Result<()> {
        for line in self.lines.feed(chunk) {
            self.send(line)?;
        }
        Ok(())
    }

    fn finish(&mut self) -> io::Result<()> {
        match self.lines.finish() {
            Some(line) => self.send(line),
            None => Ok(()),
        }
    }
}

/// What a finished pump forwarded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PumpReport {
    pub chunks: usize,
    pub bytes: usize,
}

/// Background thread draining a `PtyReader` into an `OutputSink`.
///
/// The pump ends on end-of-stream, which follows the child's exit once the
/// pty is drained, or `PtySession::close`. Join it before treating a
/// command as finished when complete output matters.
pub struct OutputPump {
    handle: thread::JoinHandle<Result<PumpReport, PtyError>>,
}

impl OutputPump {
    pub fn start<S>(reader: PtyReader, sink: S) -> Result<Self, PtyError>
    where
        S: OutputSink + 'static,
    {
        let handle = thread::Builder::new()
            .name("pty-output-pump".to_string())
            .spawn(move || drain(reader, sink))
            .map_err(PtyError::PumpStartFailed)?;
        Ok(Self { handle })
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    pub fn join(self) -> Result<PumpReport, PtyError> {
        self.handle.join().unwrap_or(Err(PtyError::PumpPanicked))
    }
}

fn drain<S: OutputSink>(reader: PtyReader, mut sink: S) -> Result<PumpReport, PtyError> {
    let mut report = PumpReport::default();
    let mut failure = None;

    for chunk in reader {
        match chunk {
            Ok(chunk) => {
                report.chunks += 1;
                report.bytes += chunk.len();
                if let Err(err) = sink.write_chunk(&chunk) {
                    failure = Some(PtyError::SinkFailed(err));
                    break;
                }
            }
            Err(err) => {
                failure = Some(err);
                break;
            }
        }
    }

    if let Err(err) = sink.finish() {
        failure.get_or_insert(PtyError::SinkFailed(err));
    }

    match failure {
        Some(err) => {
            tracing::warn!(error = %err, bytes = report.bytes, "output pump stopped early");
            Err(err)
        }
        None => {
            tracing::debug!(chunks = report.chunks, bytes = report.bytes, "output pump drained");
            Ok(report)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::sync::mpsc;

    fn reader(bytes: &[u8]) -> PtyReader {
        PtyReader::new(Box::new(Cursor::new(bytes.to_vec())))
    }

    #[test]
    fn buffer_sink_receives_everything() {
        let sink = BufferSink::new();
        let pump = OutputPump::start(reader(b"abc\r\ndef"), sink.clone()).expect("start");
        let report = pump.join().expect("join");
        assert_eq!(report.bytes, 8);
        assert_eq!(sink.text(), "abc\r\ndef");
    }

    #[test]
    fn event_sink_posts_lines_and_trailing_fragment() {
        let (tx, rx) = mpsc::channel();
        let sink = EventSink::new(tx, |line| (7u64, line));
        let pump = OutputPump::start(reader(b"first\r\nsecond"), sink).expect("start");
        pump.join().expect("join");

        let lines: Vec<(u64, String)> = rx.try_iter().collect();
        assert_eq!(
            lines,
            vec![(7, "first".to_string()), (7, "second".to_string())]
        );
    }

    #[test]
    fn closed_event_queue_fails_the_pump() {
        let (tx, rx) = mpsc::channel();
        drop(rx);
        let sink = EventSink::new(tx, |line: String| line);
        let pump = OutputPump::start(reader(b"line\n"), sink).expect("start");
        assert!(matches!(pump.join(), Err(PtyError::SinkFailed(_))));
    }
}
