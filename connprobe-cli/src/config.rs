//! CLI configuration handling.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use connprobe_axum::{CorsConfig, ServerConfig};

use crate::cli::ServeArgs;
use crate::error::{CliError, CliResult};

/// Default config file name, looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "connprobe.toml";

/// connprobe service configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Listener settings
    pub server: ServerConfig,

    /// Cross-origin settings
    pub cors: CorsConfig,
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> CliResult<Self> {
        debug!(path = %path.display(), "Loading configuration");
        let content = std::fs::read_to_string(path).map_err(|e| {
            CliError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load the explicit file, else `./connprobe.toml` if present, else defaults
    pub fn discover(explicit: Option<&Path>) -> CliResult<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        let local = Path::new(CONFIG_FILE_NAME);
        if local.is_file() {
            return Self::load(local);
        }
        Ok(Self::default())
    }

    /// Apply command-line overrides
    pub fn apply(&mut self, args: &ServeArgs) {
        if let Some(host) = args.host {
            self.server.host = host;
        }
        if let Some(port) = args.port {
            self.server.port = port;
        }
        if !args.cors_origins.is_empty() {
            self.cors.allowed_origins = args.cors_origins.clone();
        }
    }

    /// Check the merged settings before serving
    pub fn validate(&self) -> CliResult<()> {
        self.cors
            .validate()
            .map_err(|e| CliError::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_full_config() {
        let file = write_config(
            r#"
[server]
host = "127.0.0.1"
port = 9090

[cors]
allowed_origins = ["https://app.example.com"]
allow_credentials = false
max_age_seconds = 60
"#,
        );

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.server.addr().to_string(), "127.0.0.1:9090");
        assert_eq!(config.cors.allowed_origins, vec!["https://app.example.com"]);
        assert!(!config.cors.allow_credentials);
        assert_eq!(config.cors.max_age_seconds, 60);
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let file = write_config("[server]\nport = 8082\n");

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.server.addr().to_string(), "0.0.0.0:8082");
        assert_eq!(config.cors, CorsConfig::default());
    }

    #[test]
    fn test_invalid_toml() {
        let file = write_config("[server\nport = ");
        let err = Config::load(file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse TOML"), "{}", err);
    }

    #[test]
    fn test_missing_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::discover(Some(&dir.path().join("nope.toml"))).unwrap_err();
        assert!(matches!(err, CliError::Config(_)));
    }

    #[test]
    fn test_apply_overrides() {
        let mut config = Config::default();
        config.apply(&ServeArgs {
            host: Some("127.0.0.1".parse().unwrap()),
            port: Some(1),
            cors_origins: vec!["http://x.test".into()],
            ..Default::default()
        });

        assert_eq!(config.server.addr().to_string(), "127.0.0.1:1");
        assert_eq!(config.cors.allowed_origins, vec!["http://x.test"]);
    }

    #[test]
    fn test_wildcard_origin_is_config_error() {
        let file = write_config("[cors]\nallowed_origins = [\"*\"]\n");
        let config = Config::load(file.path()).unwrap();

        let err = config.validate().unwrap_err();
        assert!(matches!(err, CliError::Config(_)));
        assert!(err.to_string().contains("wildcard CORS origin"), "{}", err);

        let mut config = Config::default();
        config.apply(&ServeArgs {
            cors_origins: vec!["*".into()],
            ..Default::default()
        });
        assert!(config.validate().is_err());
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_apply_without_overrides_keeps_file_values() {
        let mut config = Config::default();
        config.apply(&ServeArgs::default());
        assert_eq!(config, Config::default());
    }
}
