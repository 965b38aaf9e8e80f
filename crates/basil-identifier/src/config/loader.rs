use super::schema::AnalyserConfig;
use crate::error::ConfigError;
use crate::extractor::ChainSyntax;
use std::path::{Path, PathBuf};
use tracing::debug;

pub struct ConfigLoader;

impl ConfigLoader {
    /// `~/.basil/config.yaml`, if a home directory is known.
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".basil").join("config.yaml"))
    }

    /// Loads the default config file, falling back to defaults when it is absent.
    pub async fn load_default() -> Result<AnalyserConfig, ConfigError> {
        match Self::default_path() {
            Some(path) if tokio::fs::try_exists(&path).await.unwrap_or(false) => {
                Self::load_from(&path).await
            }
            _ => {
                debug!("No config file found, using defaults");
                Ok(AnalyserConfig::default())
            }
        }
    }

    pub async fn load_from(path: &Path) -> Result<AnalyserConfig, ConfigError> {
        debug!("Loading config from {}", path.display());
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        Self::parse(&content)
    }

    /// An empty document yields the defaults.
    pub fn parse(content: &str) -> Result<AnalyserConfig, ConfigError> {
        if content.trim().is_empty() {
            return Ok(AnalyserConfig::default());
        }
        let config: AnalyserConfig = serde_yaml::from_str(content)?;
        if config.chain.syntax == ChainSyntax::Separator && config.chain.separator.trim().is_empty()
        {
            return Err(ConfigError::EmptySeparator);
        }
        Ok(config)
    }
}
