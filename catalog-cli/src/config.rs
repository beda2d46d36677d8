///! CLI configuration management

use anyhow::{Context, Result};
use catalog_client::{ClientConfig, DEFAULT_API_URL, DEFAULT_STATIC_URL};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub default_server: String,
    pub static_url: String,
    pub default_output: String,
    pub token: Option<String>,
    pub email: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_server: DEFAULT_API_URL.to_string(),
            static_url: DEFAULT_STATIC_URL.to_string(),
            default_output: "table".to_string(),
            token: None,
            email: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("parsing {}", path.display()))?;

        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents)?;

        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        let home = std::env::var("HOME").context("HOME is not set")?;
        Ok(PathBuf::from(home).join(".config/catalog/cli.toml"))
    }

    /// Flags and environment win over the file
    pub fn client_config(
        &self,
        server: Option<String>,
        static_url: Option<String>,
        token: Option<String>,
    ) -> ClientConfig {
        ClientConfig {
            base_url: server.unwrap_or_else(|| self.default_server.clone()),
            static_url: static_url.unwrap_or_else(|| self.static_url.clone()),
            token: token.or_else(|| self.token.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/cli.toml");

        let config = Config {
            token: Some("abc".to_string()),
            email: Some("admin@example.com".to_string()),
            ..Config::default()
        };
        config.save_to(&path).unwrap();

        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cli.toml");
        std::fs::write(&path, "default_output = \"json\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.default_output, "json");
        assert_eq!(config.default_server, DEFAULT_API_URL);
    }

    #[test]
    fn test_flags_override_file() {
        let config = Config {
            token: Some("stored".to_string()),
            ..Config::default()
        };

        let client = config.client_config(Some("http://other".to_string()), None, None);
        assert_eq!(client.base_url, "http://other");
        assert_eq!(client.static_url, DEFAULT_STATIC_URL);
        assert_eq!(client.token.as_deref(), Some("stored"));

        let client = config.client_config(None, None, Some("flag".to_string()));
        assert_eq!(client.base_url, DEFAULT_API_URL);
        assert_eq!(client.token.as_deref(), Some("flag"));
    }

    #[test]
    fn test_static_url_flag_overrides_file() {
        let config = Config {
            static_url: "http://files.local/static".to_string(),
            ..Config::default()
        };

        let client = config.client_config(None, None, None);
        assert_eq!(client.static_url, "http://files.local/static");

        let client = config.client_config(None, Some("http://cdn.example.com".to_string()), None);
        assert_eq!(client.static_url, "http://cdn.example.com");
    }
}
