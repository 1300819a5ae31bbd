//! OutputSink — the explicit destination for everything a module emits.
//!
//! The capability bridge serializes its calls into this handle in the exact
//! order the module makes them. Production runs point it at stdout; tests use
//! `memory()` and read the captured bytes back. The sink has no init or
//! teardown of its own — stream lifecycle belongs to the hosting process.

use std::io::Write;
use std::sync::{Arc, Mutex};

/// Destination stream for module output.
///
/// The capability signatures return nothing to the module, so there is no
/// failure channel: I/O errors on the underlying writer are dropped here.
pub struct OutputSink {
    writer: Box<dyn Write + Send>,
}

impl OutputSink {
    /// Sink writing to the process's standard output.
    pub fn stdout() -> Self {
        Self::from_writer(std::io::stdout())
    }

    /// Sink writing to any owned writer.
    pub fn from_writer(writer: impl Write + Send + 'static) -> Self {
        Self {
            writer: Box::new(writer),
        }
    }

    /// In-memory sink plus a handle for reading the captured bytes back.
    pub fn memory() -> (Self, SinkBuffer) {
        let buffer = SinkBuffer::default();
        (Self::from_writer(buffer.clone()), buffer)
    }

    /// Append one character, no separator.
    pub fn put_char(&mut self, c: char) {
        let _ = write!(self.writer, "{c}");
    }

    /// Append text verbatim.
    pub fn put_str(&mut self, s: &str) {
        let _ = self.writer.write_all(s.as_bytes());
    }

    /// Append text followed by a newline.
    pub fn put_line(&mut self, s: &str) {
        let _ = writeln!(self.writer, "{s}");
    }
}

/// Cloneable view of an in-memory sink's contents.
#[derive(Clone, Default)]
pub struct SinkBuffer(Arc<Mutex<Vec<u8>>>);

impl SinkBuffer {
    /// Everything written so far, lossily decoded.
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().expect("sink buffer poisoned")).into_owned()
    }

    pub fn is_empty(&self) -> bool {
        self.0.lock().expect("sink buffer poisoned").is_empty()
    }
}

impl Write for SinkBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0
            .lock()
            .expect("sink buffer poisoned")
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_char_appends_without_separators() {
        let (mut sink, buffer) = OutputSink::memory();
        sink.put_char('A');
        sink.put_char('B');
        assert_eq!(buffer.contents(), "AB");
    }

    #[test]
    fn put_str_is_verbatim() {
        let (mut sink, buffer) = OutputSink::memory();
        sink.put_str("-42");
        sink.put_str("7");
        assert_eq!(buffer.contents(), "-427");
    }

    #[test]
    fn put_line_appends_newline() {
        let (mut sink, buffer) = OutputSink::memory();
        sink.put_line("-42");
        sink.put_line("7");
        assert_eq!(buffer.contents(), "-42\n7\n");
    }

    #[test]
    fn mixed_writes_keep_order() {
        let (mut sink, buffer) = OutputSink::memory();
        sink.put_char('H');
        sink.put_str("105");
        sink.put_char('!');
        assert_eq!(buffer.contents(), "H105!");
    }

    #[test]
    fn empty_buffer_reports_empty() {
        let (_sink, buffer) = OutputSink::memory();
        assert!(buffer.is_empty());
        assert_eq!(buffer.contents(), "");
    }

    #[test]
    fn non_ascii_chars_survive() {
        let (mut sink, buffer) = OutputSink::memory();
        sink.put_char('λ');
        sink.put_char('\u{FFFD}');
        assert_eq!(buffer.contents(), "λ\u{FFFD}");
    }
}
