//! Logging wrapper for display implementations
//!
//! This wrapper logs every single display operation to help debug display issues.

use super::{DisplayError, GameDisplay};
use log::info;

pub struct LoggingDisplay {
    inner: Box<dyn GameDisplay>,
    op_count: usize,
}

impl LoggingDisplay {
    pub fn new(inner: Box<dyn GameDisplay>) -> Self {
        info!("=== DISPLAY LOGGING STARTED ===");
        Self { inner, op_count: 0 }
    }

    fn log_op(&mut self, op: &str) {
        self.op_count += 1;
        info!("[OP {:04}] {}", self.op_count, op);
    }

    pub fn op_count(&self) -> usize {
        self.op_count
    }
}

impl GameDisplay for LoggingDisplay {
    fn print_line(&mut self, text: &str) -> Result<(), DisplayError> {
        let preview = text
            .chars()
            .take(50)
            .collect::<String>()
            .replace('\n', "\\n");
        self.log_op(&format!("print_line('{}')", preview));
        self.inner.print_line(text)
    }

    fn blank_line(&mut self) -> Result<(), DisplayError> {
        self.log_op("blank_line()");
        self.inner.blank_line()
    }

    fn print_input_echo(&mut self, text: &str) -> Result<(), DisplayError> {
        self.log_op(&format!("print_input_echo('{}')", text));
        self.inner.print_input_echo(text)
    }

    fn clear_screen(&mut self) -> Result<(), DisplayError> {
        self.log_op("clear_screen()");
        self.inner.clear_screen()
    }

    fn show_help(&mut self, visible: bool) -> Result<(), DisplayError> {
        self.log_op(&format!("show_help({})", visible));
        self.inner.show_help(visible)
    }

    fn get_terminal_size(&self) -> (u16, u16) {
        self.inner.get_terminal_size()
    }

    fn force_refresh(&mut self) -> Result<(), DisplayError> {
        self.log_op("force_refresh()");
        self.inner.force_refresh()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::HeadlessDisplay;
    use test_log::test;

    #[test]
    fn counts_every_forwarded_operation() {
        let mut display = LoggingDisplay::new(Box::new(HeadlessDisplay::new()));
        display.print_line("one").unwrap();
        display.blank_line().unwrap();
        display.clear_screen().unwrap();
        assert_eq!(display.op_count(), 3);
        assert_eq!(display.get_terminal_size(), (80, 24));
    }
}
