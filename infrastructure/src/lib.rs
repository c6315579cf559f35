//! Infrastructure layer for aida
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod catalog;
pub mod config;
pub mod openai;
pub mod session;
pub mod tools;

// Re-export commonly used types
pub use catalog::HttpCatalogClient;
pub use config::{
    ConfigError, ConfigLoader, ConfigValidationError, FileCatalogConfig, FileConfig,
    FileLlmConfig, FileLoggingConfig, FileRelayConfig, FileServerConfig,
};
pub use openai::OpenAiGateway;
pub use session::InMemorySessionStore;
pub use tools::{ProductListTool, ToolHandler, ToolRegistry, inventory_tools};
