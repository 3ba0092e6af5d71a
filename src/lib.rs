#[macro_use]
extern crate lazy_static;

pub mod command;
pub mod config;
pub mod display;
pub mod error;
pub mod input;
pub mod interpreter;
pub mod narrative;
pub mod rng;
pub mod room;
pub mod state;

pub use error::GameError;
pub use interpreter::Interpreter;
