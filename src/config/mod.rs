mod types;

pub use types::*;

use crate::{Error, Result};
use std::{env, path::Path};
use tracing::debug;

pub const CONFIG_PATH_VAR: &str = "CONFIG_PATH";
pub const API_KEY_VAR: &str = "DASHSCOPE_API_KEY";
const DEFAULT_CONFIG_PATH: &str = "config.yaml";

/// Loads the configuration, applies environment overrides and validates it.
pub async fn load() -> Result<Config> {
    let explicit_path = env::var(CONFIG_PATH_VAR).ok();
    let mut config = load_from(explicit_path.as_deref()).await?;

    if let Ok(api_key) = env::var(API_KEY_VAR) {
        config.dashscope.api_key = Some(api_key);
    }

    config.validate()?;
    if let Some(config_path) = config_file(explicit_path.as_deref()) {
        config.validate_static_dir(Path::new(config_path))?;
    }
    Ok(config)
}

fn config_file(path: Option<&str>) -> Option<&str> {
    match path {
        Some(path) => Some(path),
        None if Path::new(DEFAULT_CONFIG_PATH).exists() => Some(DEFAULT_CONFIG_PATH),
        None => None,
    }
}

/// Reads the YAML file at `path`, or `config.yaml` if it exists.
///
/// An explicitly named file must exist; the default one is optional and
/// built-in defaults are used without it.
pub async fn load_from(path: Option<&str>) -> Result<Config> {
    let Some(config_path) = config_file(path) else {
        debug!("No {} found, using built-in defaults", DEFAULT_CONFIG_PATH);
        return Ok(Config::default());
    };

    debug!("Loading configuration from: {}", config_path);

    let config_str = tokio::fs::read_to_string(config_path).await?;
    parse(&config_str)
}

pub fn parse(config_str: &str) -> Result<Config> {
    if config_str.trim().is_empty() {
        return Ok(Config::default());
    }
    Ok(serde_yaml::from_str(config_str)?)
}

impl Config {
    /// Fails when the service could not possibly serve a request.
    pub fn validate(&self) -> Result<()> {
        match self.dashscope.api_key.as_deref() {
            Some(key) if !key.trim().is_empty() => {}
            _ => {
                return Err(Error::config(format!(
                    "missing DashScope API key; set dashscope.api_key or {}",
                    API_KEY_VAR
                )));
            }
        }

        if self.dashscope.edit_timeout_secs == 0 || self.dashscope.debug_timeout_secs == 0 {
            return Err(Error::config("upstream timeouts must be greater than zero"));
        }

        if self.dashscope.base_url.trim().is_empty() {
            return Err(Error::config("dashscope.base_url must not be empty"));
        }

        Ok(())
    }

    /// Fails when `config_path` sits inside `static_dir`.
    ///
    /// A missing static dir serves nothing and is accepted.
    pub fn validate_static_dir(&self, config_path: &Path) -> Result<()> {
        let Ok(static_dir) = std::fs::canonicalize(&self.server.static_dir) else {
            return Ok(());
        };
        let config_path = std::fs::canonicalize(config_path)?;

        if config_path.starts_with(&static_dir) {
            return Err(Error::config(format!(
                "config file {} is inside server.static_dir {}; move it or point static_dir elsewhere",
                config_path.display(),
                static_dir.display()
            )));
        }

        Ok(())
    }

    /// The API key; only meaningful after [`Config::validate`] succeeded.
    pub fn api_key(&self) -> &str {
        self.dashscope.api_key.as_deref().unwrap_or_default()
    }
}
