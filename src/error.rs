// Game Error Handling

use crate::display::DisplayError;
use std::fmt;

#[derive(Debug, Clone)]
pub enum GameError {
    // Resource errors
    Io { path: String, message: String },
    Json { path: String, message: String },
    Toml { path: String, message: String },

    // World errors
    NoRooms,
    UnknownStartRoom(String),

    // Startup errors
    Config(String),
    Display(DisplayError),
}

impl GameError {
    /// Path of the resource that failed to load, if any
    pub fn path(&self) -> Option<&str> {
        match self {
            GameError::Io { path, .. }
            | GameError::Json { path, .. }
            | GameError::Toml { path, .. } => Some(path),
            _ => None,
        }
    }
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GameError::Io { path, message } => {
                write!(f, "Cannot read '{}': {}", path, message)
            }
            GameError::Json { path, message } => {
                write!(f, "Malformed JSON in '{}': {}", path, message)
            }
            GameError::Toml { path, message } => {
                write!(f, "Malformed TOML in '{}': {}", path, message)
            }
            GameError::NoRooms => write!(f, "Room list is empty - nowhere to start"),
            GameError::UnknownStartRoom(id) => {
                write!(f, "Configured start room '{}' does not exist", id)
            }
            GameError::Config(msg) => write!(f, "Configuration error: {}", msg),
            GameError::Display(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for GameError {}

impl From<DisplayError> for GameError {
    fn from(error: DisplayError) -> Self {
        GameError::Display(error)
    }
}
