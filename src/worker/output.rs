//! Colored line output for worker modes.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use colored::{Color, Colorize};
use log::warn;

type SharedWriter = Arc<Mutex<Box<dyn Write + Send>>>;

/// Writes whole lines in the worker's configured color.
#[derive(Clone)]
pub struct OutputHelper {
    color: Color,
    writer: SharedWriter,
}

impl OutputHelper {
    /// Output to the process stdout.
    pub fn stdout(color: Color) -> Self {
        Self::with_writer(color, io::stdout())
    }

    pub fn with_writer(color: Color, writer: impl Write + Send + 'static) -> Self {
        Self {
            color,
            writer: Arc::new(Mutex::new(Box::new(writer))),
        }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn write_line(&self, message: &str) {
        let mut writer = self.writer.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let result = if message.is_empty() {
            writeln!(writer)
        } else {
            writeln!(writer, "{}", message.color(self.color))
        };
        if let Err(e) = result.and_then(|_| writer.flush()) {
            warn!("Failed to write worker output: {}", e);
        }
    }

    pub fn blank_line(&self) {
        self.write_line("");
    }

    /// Standard hint for the long-running modes.
    pub fn print_exit_hint(&self) {
        self.write_line("Press Ctrl+C to exit.");
        self.blank_line();
    }
}

impl std::fmt::Debug for OutputHelper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OutputHelper").field("color", &self.color).finish_non_exhaustive()
    }
}

/// In-memory writer whose contents can be read back; for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct CapturedOutput {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl CapturedOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, ANSI sequences stripped.
    pub fn contents(&self) -> String {
        let buffer = self.buffer.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        strip_ansi(&String::from_utf8_lossy(&buffer))
    }

    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }
}

impl Write for CapturedOutput {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut buffer = self.buffer.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn strip_ansi(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c == '\u{1b}' {
            // CSI: ESC [ params final-byte
            for next in chars.by_ref() {
                if next.is_ascii_alphabetic() {
                    break;
                }
            }
        } else {
            out.push(c);
        }
    }
    out
}
