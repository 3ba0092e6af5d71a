//! Headless display implementation for testing and non-interactive use
//!
//! Collects all output in memory. In echoing mode every line is also written
//! to stdout as plain text, which is what piped sessions
//! (`./escape < commands.txt`) want.

use super::{DisplayError, GameDisplay, HELP_TEXT};
use log::debug;
use std::io::{self, Write};

#[derive(Debug, Default)]
pub struct HeadlessDisplay {
    buffer: Vec<String>,
    help_visible: bool,
    echo: bool,
    terminal_width: u16,
    terminal_height: u16,
}

impl HeadlessDisplay {
    pub fn new() -> Self {
        Self {
            buffer: Vec::new(),
            help_visible: false,
            echo: false,
            terminal_width: 80,
            terminal_height: 24,
        }
    }

    /// Headless display that also writes every line to stdout
    pub fn echoing() -> Self {
        Self {
            echo: true,
            ..Self::new()
        }
    }

    /// Get the current buffer content (for testing)
    pub fn get_buffer(&self) -> &[String] {
        &self.buffer
    }

    /// Whether the help overlay is currently shown
    pub fn help_visible(&self) -> bool {
        self.help_visible
    }

    /// Forget everything printed so far
    pub fn take_buffer(&mut self) -> Vec<String> {
        std::mem::take(&mut self.buffer)
    }

    fn echo_line(&self, text: &str) -> Result<(), DisplayError> {
        if self.echo {
            let mut out = io::stdout().lock();
            writeln!(out, "{}", text)?;
        }
        Ok(())
    }
}

impl GameDisplay for HeadlessDisplay {
    fn print_line(&mut self, text: &str) -> Result<(), DisplayError> {
        // Embedded newlines become separate scrollback entries
        for line in text.split('\n') {
            self.echo_line(line)?;
            self.buffer.push(line.to_string());
        }
        Ok(())
    }

    fn clear_screen(&mut self) -> Result<(), DisplayError> {
        debug!("Headless: clear_screen ({} lines dropped)", self.buffer.len());
        self.buffer.clear();
        Ok(())
    }

    fn show_help(&mut self, visible: bool) -> Result<(), DisplayError> {
        debug!("Headless: show_help({})", visible);
        self.help_visible = visible;
        if visible {
            for line in HELP_TEXT {
                self.echo_line(line)?;
            }
        }
        Ok(())
    }

    fn get_terminal_size(&self) -> (u16, u16) {
        (self.terminal_width, self.terminal_height)
    }

    fn force_refresh(&mut self) -> Result<(), DisplayError> {
        if self.echo {
            io::stdout().flush()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn splits_embedded_newlines() {
        let mut display = HeadlessDisplay::new();
        display.print_line("first\nsecond").unwrap();
        assert_eq!(display.get_buffer(), &["first", "second"]);
    }

    #[test]
    fn clear_empties_scrollback_but_keeps_help_state() {
        let mut display = HeadlessDisplay::new();
        display.print_line("hello").unwrap();
        display.show_help(true).unwrap();
        display.clear_screen().unwrap();
        assert!(display.get_buffer().is_empty());
        assert!(display.help_visible());
    }

    #[test]
    fn help_overlay_does_not_touch_scrollback() {
        let mut display = HeadlessDisplay::new();
        display.show_help(true).unwrap();
        assert!(display.get_buffer().is_empty());
        display.show_help(false).unwrap();
        assert!(!display.help_visible());
    }
}
