//! Presentation layer for aida
//!
//! This crate contains the CLI definitions, the HTTP/WebSocket chat server
//! and the terminal chat client.

pub mod chat;
pub mod cli;
pub mod server;

// Re-export commonly used types
pub use chat::{ChatClient, ChatRepl};
pub use cli::commands::{ChatArgs, Cli, Command, ServeArgs};
pub use server::{AppState, ConnectionRegistry, build_router};
