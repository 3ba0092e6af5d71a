//! Line-based command input
//!
//! One submitted line per command. Works the same for an interactive
//! terminal and for piped or redirected input (`./escape < commands.txt`).

use log::debug;
use std::io::{self, BufRead, Write};

pub struct LineInput<R> {
    reader: R,
    /// Input buffer for building lines
    buffer: String,
    show_prompt: bool,
}

impl LineInput<io::StdinLock<'static>> {
    /// Read from stdin, prompting only when a person is typing
    pub fn stdin() -> Self {
        let interactive = atty::is(atty::Stream::Stdin);
        LineInput::new(io::stdin().lock(), interactive)
    }
}

impl<R: BufRead> LineInput<R> {
    pub fn new(reader: R, show_prompt: bool) -> Self {
        LineInput {
            reader,
            buffer: String::new(),
            show_prompt,
        }
    }

    /// Read the next line, without its line terminator
    ///
    /// Returns `Ok(None)` at end of input. Without that check a closed pipe
    /// would hand back empty lines forever.
    pub fn read_line(&mut self) -> io::Result<Option<String>> {
        if self.show_prompt {
            let mut out = io::stdout();
            write!(out, "> ")?;
            out.flush()?;
        }

        self.buffer.clear();
        let bytes_read = self.reader.read_line(&mut self.buffer)?;
        if bytes_read == 0 {
            debug!("Input: EOF detected");
            return Ok(None);
        }

        // Remove trailing newline
        if self.buffer.ends_with('\n') {
            self.buffer.pop();
            if self.buffer.ends_with('\r') {
                self.buffer.pop();
            }
        }

        debug!("Input received: '{}'", self.buffer);
        Ok(Some(self.buffer.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use test_log::test;

    #[test]
    fn reads_lines_until_eof() {
        let mut input = LineInput::new(Cursor::new("look\r\ngo east\n\nlast"), false);
        assert_eq!(input.read_line().unwrap().as_deref(), Some("look"));
        assert_eq!(input.read_line().unwrap().as_deref(), Some("go east"));
        assert_eq!(input.read_line().unwrap().as_deref(), Some(""));
        assert_eq!(input.read_line().unwrap().as_deref(), Some("last"));
        assert_eq!(input.read_line().unwrap(), None);
    }
}
