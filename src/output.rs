//! # Report Output
//!
//! User-facing report printer with a shared indentation cursor. Diagnostics
//! go through `tracing`; everything the user asked for goes through here.

use parking_lot::Mutex;
use std::io::{self, Write};
use std::sync::Arc;

const INDENT: &str = "    ";

const BLUE: &str = "\x1b[34m";
const YELLOW: &str = "\x1b[33m";
const RESET: &str = "\x1b[0m";

pub struct Printer {
    sink: Box<dyn Write + Send>,
    level: usize,
    color: bool,
}

impl Printer {
    pub fn new(sink: Box<dyn Write + Send>, color: bool) -> Self {
        Self {
            sink,
            level: 0,
            color,
        }
    }

    pub fn stdout(color: bool) -> Self {
        Self::new(Box::new(io::stdout()), color)
    }

    /// Printer writing into a buffer that can be read back, without colors
    pub fn buffered() -> (Self, SharedBuffer) {
        let buffer = SharedBuffer::default();
        (Self::new(Box::new(buffer.clone()), false), buffer)
    }

    pub fn indent(&mut self) {
        self.level += 1;
    }

    pub fn dedent(&mut self) {
        self.level = self.level.saturating_sub(1);
    }

    pub fn level(&self) -> usize {
        self.level
    }

    fn prefix(&self) -> String {
        INDENT.repeat(self.level)
    }

    fn paint(&self, color: &str, text: &str) -> String {
        if self.color {
            format!("{color}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    /// Indented line
    pub fn line(&mut self, text: &str) -> io::Result<()> {
        let prefix = self.prefix();
        writeln!(self.sink, "{prefix}{text}")
    }

    /// Indented `label` followed by a highlighted `value`
    pub fn mixed(&mut self, label: &str, value: &str) -> io::Result<()> {
        let prefix = self.prefix();
        let value = self.paint(BLUE, value);
        writeln!(self.sink, "{prefix}{label}{value}")
    }

    /// Raw text without indentation or newline
    pub fn plain(&mut self, text: &str) -> io::Result<()> {
        write!(self.sink, "{text}")
    }

    pub fn warn(&mut self, text: &str) -> io::Result<()> {
        let prefix = self.prefix();
        let text = self.paint(YELLOW, text);
        writeln!(self.sink, "{prefix}[-] {text}")
    }

    pub fn newline(&mut self) -> io::Result<()> {
        writeln!(self.sink)
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.sink.flush()
    }
}

impl std::fmt::Debug for Printer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Printer")
            .field("sink", &"dyn Write")
            .field("level", &self.level)
            .field("color", &self.color)
            .finish()
    }
}

/// Cloneable in-memory sink
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer {
    inner: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.inner.lock()).into_owned()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indentation_cursor() {
        let (mut printer, buffer) = Printer::buffered();

        printer.line("top").unwrap();
        printer.indent();
        printer.mixed("Endpoint: ", "10.0.0.5:1099").unwrap();
        printer.dedent();
        printer.dedent();
        printer.plain("ff").unwrap();

        assert_eq!(buffer.contents(), "top\n    Endpoint: 10.0.0.5:1099\nff");
        assert_eq!(printer.level(), 0);
    }

    #[test]
    fn test_colored_output() {
        let buffer = SharedBuffer::default();
        let mut printer = Printer::new(Box::new(buffer.clone()), true);

        printer.warn("Unsupported object type.").unwrap();
        assert_eq!(
            buffer.contents(),
            "[-] \x1b[33mUnsupported object type.\x1b[0m\n"
        );
    }
}
