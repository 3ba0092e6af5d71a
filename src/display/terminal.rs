//! Terminal display implementation
//!
//! Plain scrollback on stdout, with crossterm for clearing the screen and
//! drawing the help panel in reverse video. The terminal scrolls itself, so
//! the newest line is always visible.

use super::{DisplayError, GameDisplay, HELP_TEXT};
use crossterm::{
    cursor::MoveTo,
    execute, queue,
    style::{Attribute, Print, SetAttribute},
    terminal::{self, Clear, ClearType},
};
use log::debug;
use std::io::{self, Write};

pub struct TerminalDisplay {
    terminal_width: u16,
    terminal_height: u16,
    help_visible: bool,
    input_on_screen: bool,
}

impl TerminalDisplay {
    /// `input_on_screen` is true when the player types into this same
    /// terminal; piped input is echoed back as `> text` instead.
    pub fn new(input_on_screen: bool) -> Result<Self, DisplayError> {
        let (width, height) = terminal::size().unwrap_or((80, 24));

        Ok(TerminalDisplay {
            terminal_width: width,
            terminal_height: height,
            help_visible: false,
            input_on_screen,
        })
    }

    pub fn echoes_input(&self) -> bool {
        !self.input_on_screen
    }

    /// Draw the help panel as a reverse-video block padded to a common width
    fn draw_help_panel(&self) -> Result<(), DisplayError> {
        let inner = HELP_TEXT.iter().map(|l| l.chars().count()).max().unwrap_or(0) + 2;
        let width = inner.min(self.terminal_width.saturating_sub(1) as usize);

        let mut out = io::stdout();
        for line in HELP_TEXT {
            let text: String = line.chars().take(width).collect();
            queue!(
                out,
                SetAttribute(Attribute::Reverse),
                Print(format!(" {:<width$}", text, width = width.saturating_sub(1))),
                SetAttribute(Attribute::Reset),
                Print("\n"),
            )?;
        }
        out.flush()?;
        Ok(())
    }
}

impl GameDisplay for TerminalDisplay {
    fn print_line(&mut self, text: &str) -> Result<(), DisplayError> {
        let mut out = io::stdout();
        queue!(out, Print(text), Print("\n"))?;
        out.flush()?;
        Ok(())
    }

    fn print_input_echo(&mut self, text: &str) -> Result<(), DisplayError> {
        if self.input_on_screen {
            return Ok(());
        }
        let mut out = io::stdout();
        queue!(
            out,
            SetAttribute(Attribute::Bold),
            Print(format!("> {}", text)),
            SetAttribute(Attribute::Reset),
            Print("\n"),
        )?;
        out.flush()?;
        Ok(())
    }

    fn clear_screen(&mut self) -> Result<(), DisplayError> {
        execute!(io::stdout(), Clear(ClearType::All), MoveTo(0, 0))?;
        io::stdout().flush()?;
        Ok(())
    }

    fn show_help(&mut self, visible: bool) -> Result<(), DisplayError> {
        debug!("Terminal: show_help({})", visible);
        self.help_visible = visible;
        if visible {
            self.draw_help_panel()?;
        }
        Ok(())
    }

    fn get_terminal_size(&self) -> (u16, u16) {
        (self.terminal_width, self.terminal_height)
    }

    fn force_refresh(&mut self) -> Result<(), DisplayError> {
        if let Ok((width, height)) = terminal::size() {
            self.terminal_width = width;
            self.terminal_height = height;
        }
        io::stdout().flush()?;
        Ok(())
    }
}

impl Drop for TerminalDisplay {
    fn drop(&mut self) {
        let _ = execute!(
            io::stdout(),
            SetAttribute(Attribute::Reset),
            crossterm::cursor::Show,
        );
        let _ = io::stdout().flush();
        debug!("TerminalDisplay: Terminal cleanup completed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn echoes_input_only_when_it_was_not_typed_here() {
        assert!(TerminalDisplay::new(false).unwrap().echoes_input());
        assert!(!TerminalDisplay::new(true).unwrap().echoes_input());
    }
}
