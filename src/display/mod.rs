//! Display surface for the game
//!
//! The interpreter only ever appends lines to a scrollback, clears it, or
//! asks for the help overlay. Every front end implements [`GameDisplay`]:
//! a crossterm terminal, an in-memory headless buffer for tests and piped
//! input, and a logging wrapper for debugging display traffic.

mod headless;
mod logging;
mod terminal;

pub use headless::HeadlessDisplay;
pub use logging::LoggingDisplay;
pub use terminal::TerminalDisplay;

use log::debug;
use serde::Deserialize;
use std::fmt;

/// Static help overlay content
pub const HELP_TEXT: &[&str] = &[
    "Commands:",
    "  look                 describe where you are",
    "  go <direction>       move (or just type north, east, ne, ...)",
    "  inventory / inv      list what you carry",
    "  take <item>          pick something up",
    "  drop <item>          leave something behind",
    "  examine              look more closely at your surroundings",
    "  sit / jump / poke    try your luck",
    "  clear                clear the screen",
    "  help                 show this help",
    "  quit                 leave the complex",
];

/// Core trait for game display operations
pub trait GameDisplay {
    /// Append one line to the scrollback
    fn print_line(&mut self, text: &str) -> Result<(), DisplayError>;

    /// Append the blank separator that ends every command
    fn blank_line(&mut self) -> Result<(), DisplayError> {
        self.print_line("")
    }

    /// Echo the player's command back into the scrollback
    fn print_input_echo(&mut self, text: &str) -> Result<(), DisplayError> {
        self.print_line(&format!("> {}", text))
    }

    /// Empty the scrollback entirely
    fn clear_screen(&mut self) -> Result<(), DisplayError>;

    /// Show or hide the help overlay
    fn show_help(&mut self, visible: bool) -> Result<(), DisplayError>;

    /// Get the current terminal dimensions
    fn get_terminal_size(&self) -> (u16, u16);

    /// Force a display refresh
    fn force_refresh(&mut self) -> Result<(), DisplayError>;
}

/// Display error type
#[derive(Debug, Clone)]
pub struct DisplayError {
    pub message: String,
}

impl DisplayError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for DisplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Display error: {}", self.message)
    }
}

impl std::error::Error for DisplayError {}

impl From<std::io::Error> for DisplayError {
    fn from(error: std::io::Error) -> Self {
        Self::new(format!("I/O error: {}", error))
    }
}

/// Display mode selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    /// Terminal when stdout is a TTY, headless otherwise
    #[default]
    Auto,
    /// Force crossterm terminal display
    Terminal,
    /// Collect output in memory and echo it plainly
    Headless,
}

impl std::str::FromStr for DisplayMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "auto" => Ok(DisplayMode::Auto),
            "terminal" => Ok(DisplayMode::Terminal),
            "headless" => Ok(DisplayMode::Headless),
            other => Err(format!("Unknown display mode: {}", other)),
        }
    }
}

/// Display environment capabilities
#[derive(Debug)]
pub struct DisplayCapabilities {
    pub has_terminal: bool,
    pub is_interactive: bool,
}

impl DisplayCapabilities {
    /// Detect current environment capabilities
    pub fn detect() -> Self {
        Self {
            has_terminal: atty::is(atty::Stream::Stdout),
            is_interactive: atty::is(atty::Stream::Stdin) && atty::is(atty::Stream::Stdout),
        }
    }
}

/// Create a display implementation for the given mode
pub fn create_display(mode: DisplayMode) -> Result<Box<dyn GameDisplay>, DisplayError> {
    let caps = DisplayCapabilities::detect();
    debug!("Display capabilities: {:?}", caps);
    debug!("Creating display with mode {:?}", mode);

    let mut display: Box<dyn GameDisplay> = match mode {
        DisplayMode::Auto => {
            if caps.has_terminal {
                debug!("Using terminal display");
                Box::new(TerminalDisplay::new(caps.is_interactive)?)
            } else {
                debug!("Stdout is not a terminal, using headless echo display");
                Box::new(HeadlessDisplay::echoing())
            }
        }
        DisplayMode::Terminal => Box::new(TerminalDisplay::new(caps.is_interactive)?),
        DisplayMode::Headless => Box::new(HeadlessDisplay::echoing()),
    };

    // Check if we should wrap with logging
    if std::env::var("DISPLAY_LOG").is_ok() {
        debug!("Wrapping display with logging");
        display = Box::new(LoggingDisplay::new(display));
    }

    Ok(display)
}
