//! Configuration loader for Lectern.
//!
//! Reads `lectern.toml` (or the path given with `--config`) and
//! deserializes it into [`LecternConfig`], then applies `LECTERN_AI_*`
//! environment overrides. A missing file yields defaults; a file that
//! exists but cannot be read or parsed is an error.

use std::path::Path;

use secrecy::SecretString;

use lectern_types::config::LecternConfig;
use lectern_types::error::ConfigError;

/// Default config file name, resolved against the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "lectern.toml";

pub const ENV_DEPLOYMENT_URI: &str = "LECTERN_AI_DEPLOYMENT_URI";
pub const ENV_API_KEY: &str = "LECTERN_AI_API_KEY";
pub const ENV_DEPLOYMENT_MODEL_NAME: &str = "LECTERN_AI_DEPLOYMENT_MODEL_NAME";

/// Load configuration from `path` and the process environment.
pub async fn load_config(path: &Path) -> Result<LecternConfig, ConfigError> {
    let config = read_config_file(path).await?;
    Ok(apply_overrides(config, |key| std::env::var(key).ok()))
}

/// Read and parse `path` without environment overrides.
pub async fn read_config_file(path: &Path) -> Result<LecternConfig, ConfigError> {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config file found at {}, using defaults", path.display());
            return Ok(LecternConfig::default());
        }
        Err(err) => {
            return Err(ConfigError::Read {
                path: path.display().to_string(),
                message: err.to_string(),
            });
        }
    };

    toml::from_str::<LecternConfig>(&content).map_err(|err| ConfigError::Parse {
        path: path.display().to_string(),
        message: err.to_string(),
    })
}

/// Overlay non-empty values returned by `lookup` onto `config`.
pub fn apply_overrides<F>(mut config: LecternConfig, lookup: F) -> LecternConfig
where
    F: Fn(&str) -> Option<String>,
{
    let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(uri) = non_blank(ENV_DEPLOYMENT_URI) {
        config.ai.deployment_uri = Some(uri);
    }
    if let Some(key) = non_blank(ENV_API_KEY) {
        config.ai.api_key = Some(SecretString::from(key));
    }
    if let Some(model) = non_blank(ENV_DEPLOYMENT_MODEL_NAME) {
        config.ai.deployment_model_name = model;
    }
    config
}
