//! Configuration file loading for aida
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. Environment: `AIDA_<SECTION>__<KEY>` (e.g. `AIDA_SERVER__PORT=9000`)
//! 2. `--config <path>` specified file
//! 3. Project root: `./aida.toml` or `./.aida.toml`
//! 4. Global: `$XDG_CONFIG_HOME/aida/config.toml` (or `~/.config/aida/config.toml`)
//! 5. Default values
//!
//! Command-line flags are applied on top by the binary.

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileCatalogConfig, FileConfig, FileLlmConfig, FileLoggingConfig,
    FileRelayConfig, FileServerConfig,
};
pub use loader::{ConfigError, ConfigLoader};
