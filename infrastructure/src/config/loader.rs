//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Prefix for environment overrides (`AIDA_SERVER__PORT=9000`)
pub const ENV_PREFIX: &str = "AIDA_";

const PROJECT_FILES: [&str; 2] = ["aida.toml", ".aida.toml"];

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] Box<figment::Error>),

    #[error("Config file not found: {0}")]
    NotFound(PathBuf),
}

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. `AIDA_*` environment variables
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./aida.toml` or `./.aida.toml`
    /// 4. Global: `<config dir>/aida/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileConfig, ConfigError> {
        if let Some(path) = config_path.filter(|p| !p.exists()) {
            return Err(ConfigError::NotFound(path.clone()));
        }

        let figment = Self::figment(
            Self::global_config_path().as_deref(),
            Self::project_config_path().as_deref(),
            config_path.map(PathBuf::as_path),
            ENV_PREFIX,
        );
        figment.extract().map_err(|e| ConfigError::Load(Box::new(e)))
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    fn figment(
        global: Option<&Path>,
        project: Option<&Path>,
        explicit: Option<&Path>,
        env_prefix: &str,
    ) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        for path in [global, project, explicit].into_iter().flatten() {
            if path.exists() {
                figment = figment.merge(Toml::file(path));
            }
        }

        figment.merge(Env::prefixed(env_prefix).split("__"))
    }

    /// Get the global config file path
    ///
    /// Returns XDG_CONFIG_HOME/aida/config.toml if set,
    /// otherwise the platform config directory.
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("aida").join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Print the config file locations being used (for debugging)
    pub fn print_config_sources(explicit: Option<&PathBuf>) {
        println!("Configuration sources (in priority order):");

        println!("  [ENV  ] {}<SECTION>__<KEY>", ENV_PREFIX);

        if let Some(path) = explicit {
            println!("  [FOUND] Explicit: {}", path.display());
        }

        if let Some(path) = Self::project_config_path() {
            println!("  [FOUND] Project: {}", path.display());
        } else {
            println!("  [     ] Project: ./aida.toml or ./.aida.toml");
        }

        if let Some(path) = Self::global_config_path() {
            if path.exists() {
                println!("  [FOUND] Global:  {}", path.display());
            } else {
                println!("  [     ] Global:  {}", path.display());
            }
        }

        println!("  [     ] Default: built-in defaults");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_toml(dir: &tempfile::TempDir, name: &str, body: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(body.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_defaults();
        assert_eq!(config.server.port, 8001);
        assert_eq!(config.relay.history_window, 5);
    }

    #[test]
    fn test_global_config_path_returns_some() {
        let path = ConfigLoader::global_config_path();
        assert!(path.is_some());
        assert!(path.unwrap().to_string_lossy().contains("aida"));
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let missing = PathBuf::from("/definitely/not/here/aida.toml");
        assert!(matches!(
            ConfigLoader::load(Some(&missing)),
            Err(ConfigError::NotFound(_))
        ));
    }

    #[test]
    fn test_later_files_override_earlier() {
        let dir = tempfile::tempdir().unwrap();
        let global = write_toml(
            &dir,
            "global.toml",
            "[server]\nport = 9000\nhost = \"127.0.0.1\"\n",
        );
        let project = write_toml(&dir, "project.toml", "[server]\nport = 9100\n");

        let config: FileConfig = ConfigLoader::figment(
            Some(&global),
            Some(&project),
            None,
            "AIDA_LOADER_TEST_UNUSED_",
        )
        .extract()
        .unwrap();

        assert_eq!(config.server.port, 9100);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.catalog.timeout_secs, 10);
    }

    #[test]
    fn test_env_overrides_file() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "aida.toml",
                "[server]\nport = 9000\n\n[relay]\nhistory_window = 7\n",
            )?;
            jail.set_env("AIDA_SERVER__PORT", "9200");
            jail.set_env("AIDA_CATALOG__BASE_URL", "http://inventory:8081/api");

            let config: FileConfig =
                ConfigLoader::figment(None, None, Some(Path::new("aida.toml")), ENV_PREFIX)
                    .extract()?;

            assert_eq!(config.server.port, 9200);
            assert_eq!(config.catalog.base_url, "http://inventory:8081/api");
            assert_eq!(config.relay.history_window, 7);
            assert_eq!(config.llm.model, "gpt-3.5-turbo");
            Ok(())
        });
    }

    #[test]
    fn test_invalid_value_is_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let explicit = write_toml(&dir, "aida.toml", "[server]\nport = \"not a port\"\n");

        let result: Result<FileConfig, _> =
            ConfigLoader::figment(None, None, Some(&explicit), "AIDA_LOADER_TEST_UNUSED_")
                .extract();
        assert!(result.is_err());
    }
}
