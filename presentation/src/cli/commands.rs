//! CLI command definitions

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Default endpoint for `aida chat`
pub const DEFAULT_CHAT_URL: &str = "http://localhost:8001/chat";

/// CLI arguments for aida
#[derive(Parser, Debug)]
#[command(name = "aida")]
#[command(author, version, about = "AIda - conversational assistant for a computer inventory")]
#[command(long_about = r#"
AIda answers questions about a product inventory. The model fetches the
current product list from the inventory backend whenever it needs it.

Configuration files are loaded from (in priority order):
1. AIDA_<SECTION>__<KEY>  Environment variables (e.g. AIDA_SERVER__PORT=9000)
2. --config <path>        Explicit config file
3. ./aida.toml            Project-level config
4. ~/.config/aida/config.toml   Global config

Example:
  aida serve --port 8001
  aida chat --url http://localhost:8001/chat
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP/WebSocket chat server
    Serve(ServeArgs),
    /// Chat with a running server from the terminal
    Chat(ChatArgs),
}

#[derive(Args, Debug, Default)]
pub struct ServeArgs {
    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Print the merged configuration and its sources, then exit
    #[arg(long)]
    pub show_config: bool,

    /// Bind address (overrides server.host)
    #[arg(long, value_name = "HOST")]
    pub host: Option<String>,

    /// Listen port (overrides server.port)
    #[arg(short, long, value_name = "PORT")]
    pub port: Option<u16>,
}

#[derive(Args, Debug)]
pub struct ChatArgs {
    /// Chat endpoint of a running server
    #[arg(long, default_value = DEFAULT_CHAT_URL)]
    pub url: String,

    /// Suppress the waiting spinner
    #[arg(short, long)]
    pub quiet: bool,
}
