//! Interactive chat module
//!
//! A readline-based terminal client for a running AIda server.

mod client;
mod repl;

pub use client::{CONNECTION_ERROR_MESSAGE, ChatClient};
pub use repl::ChatRepl;
