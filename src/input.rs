//! Line-based input sources.
//!
//! The menu and the echo worker only need "next line or end of input"; the
//! terminal itself is never configured here.

use std::collections::VecDeque;

use async_trait::async_trait;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Stdin};

use crate::error::Result;

/// Yields one line at a time, `None` at end of input.
#[async_trait]
pub trait LineReader: Send {
    async fn read_line(&mut self) -> Result<Option<String>>;
}

/// Reads lines from any buffered async source.
///
/// Bytes that are not valid UTF-8 are replaced, never reported as errors, so
/// a garbled line reaches the resolver as ordinary (invalid) input.
pub struct BufLineReader<R> {
    reader: R,
}

impl<R: AsyncBufRead + Unpin + Send> BufLineReader<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

/// Reads lines from the process stdin.
pub type StdinReader = BufLineReader<BufReader<Stdin>>;

impl StdinReader {
    pub fn stdin() -> Self {
        Self::new(BufReader::new(tokio::io::stdin()))
    }
}

impl Default for StdinReader {
    fn default() -> Self {
        Self::stdin()
    }
}

#[async_trait]
impl<R: AsyncBufRead + Unpin + Send> LineReader for BufLineReader<R> {
    async fn read_line(&mut self) -> Result<Option<String>> {
        let mut bytes = Vec::new();
        let read = self.reader.read_until(b'\n', &mut bytes).await?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(strip_line_ending(String::from_utf8_lossy(&bytes).into_owned())))
    }
}

/// Replays a fixed list of lines, then reports end of input.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    lines: VecDeque<String>,
}

impl ScriptedInput {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    /// Lines not yet consumed.
    pub fn remaining(&self) -> usize {
        self.lines.len()
    }
}

#[async_trait]
impl LineReader for ScriptedInput {
    async fn read_line(&mut self) -> Result<Option<String>> {
        Ok(self.lines.pop_front())
    }
}

fn strip_line_ending(mut line: String) -> String {
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    line
}
