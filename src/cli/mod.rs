//! Command-line front end.

mod command;
mod console;
mod render;

pub use command::*;
pub use console::*;
