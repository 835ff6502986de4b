use super::Config;
use anyhow::{anyhow, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tracing::{debug, info};

pub struct ConfigManager {
    path: PathBuf,
    current_config: Arc<Config>,
}

impl ConfigManager {
    pub async fn new(config_path: impl AsRef<Path>) -> Result<Self> {
        let path = config_path.as_ref().to_path_buf();
        let config = Self::load_configuration(&path).await?;
        Ok(Self {
            path,
            current_config: Arc::new(config),
        })
    }

    /// Use built-in defaults when the file does not exist
    pub async fn load_or_default(config_path: impl AsRef<Path>) -> Result<Self> {
        let path = config_path.as_ref().to_path_buf();
        if fs::try_exists(&path).await.unwrap_or(false) {
            return Self::new(path).await;
        }

        info!("No config at {}, using defaults", path.display());
        Ok(Self {
            path,
            current_config: Arc::new(Config::default()),
        })
    }

    pub fn get_current_config(&self) -> Arc<Config> {
        self.current_config.clone()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load_configuration(path: &Path) -> Result<Config> {
        debug!("Loading config: {}", path.display());

        let content = fs::read_to_string(path)
            .await
            .map_err(|e| anyhow!("Failed to read config {}: {}", path.display(), e))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| anyhow!("Failed to parse {}: {}", path.display(), e))?;

        config
            .validate()
            .map_err(|e| anyhow!("Invalid config {}: {}", path.display(), e))?;

        info!(
            "Loaded config from {} (log threshold {}, default url '{}')",
            path.display(),
            config.logging.threshold,
            config.component.default_url
        );

        Ok(config)
    }
}
