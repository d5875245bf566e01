use crate::error::{ProductSearchError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const ACCESS_TOKEN_ENV: &str = "PRODUCT_SEARCH_ACCESS_TOKEN";
pub const DEFAULT_ENDPOINT: &str = "https://vision.googleapis.com";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub access_token: Option<String>,
    pub endpoint: String,
    /// Billed project sent as `x-goog-user-project`
    pub quota_project: Option<String>,
    pub page_size: u32,
    pub timeout_seconds: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            access_token: None,
            endpoint: DEFAULT_ENDPOINT.into(),
            quota_project: None,
            page_size: 100,
            timeout_seconds: 60,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| ProductSearchError::Config("home directory not found".into()))?;
        Ok(home.join(".config").join("product-search").join("config.json"))
    }

    /// Access token, environment variable first
    pub fn access_token(&self) -> Result<String> {
        self.resolve_access_token(std::env::var(ACCESS_TOKEN_ENV).ok())
    }

    pub fn resolve_access_token(&self, from_env: Option<String>) -> Result<String> {
        from_env
            .filter(|token| !token.trim().is_empty())
            .or_else(|| self.access_token.clone())
            .filter(|token| !token.trim().is_empty())
            .ok_or(ProductSearchError::MissingAccessToken)
    }

    /// `None` disables the deadline
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_seconds > 0).then(|| Duration::from_secs(self.timeout_seconds))
    }

    pub fn set_access_token(&mut self, token: String) -> Result<()> {
        self.access_token = Some(token);
        self.save()
    }

    pub fn set_endpoint(&mut self, endpoint: String) -> Result<()> {
        if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
            return Err(ProductSearchError::Config(format!(
                "endpoint must be an http(s) URL: {}",
                endpoint
            )));
        }
        self.endpoint = endpoint;
        self.save()
    }
}
