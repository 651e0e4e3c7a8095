//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the storyboard binary.

mod analyze;
mod chat;
mod commands;
mod gateway;
mod generate;
mod studio;
mod styles;

pub use analyze::analyze_command;
pub use chat::chat_command;
pub use commands::{Cli, Commands};
pub use generate::generate_command;
pub use studio::open_studio;
pub use styles::styles_command;
