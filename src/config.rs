use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::GenerateError;

pub const CONFIG_ENV_VAR: &str = "ENVGEN_CONFIG";
pub const PROJECT_CONFIG_FILE: &str = "envgen.toml";

/// `envgen.toml`. Every field is optional; CLI flags win over it.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub envgen: EnvgenSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnvgenSection {
    pub env_file: Option<String>,
    pub output: Option<PathBuf>,
    pub use_env_loader: Option<bool>,
    pub infer_numbers: Option<bool>,
}

impl Config {
    pub fn load_from_path(path: &Path) -> Result<Self, GenerateError> {
        let text = std::fs::read_to_string(path).map_err(|e| GenerateError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_toml(path, &text)
    }

    pub fn from_toml(path: &Path, text: &str) -> Result<Self, GenerateError> {
        toml::from_str(text).map_err(|e| GenerateError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}

/// User-level fallback, e.g. `~/.config/envgen/config.toml`.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("envgen").join("config.toml"))
}

/// Config path precedence (relative paths resolve against `cwd`):
/// 1) CLI --config (must exist)
/// 2) ENVGEN_CONFIG (must exist)
/// 3) ./envgen.toml (if present)
/// 4) user config dir (if present)
pub fn locate_config(cli_config: Option<&Path>, cwd: &Path) -> Result<Option<PathBuf>, GenerateError> {
    let from_env = std::env::var(CONFIG_ENV_VAR).ok();
    locate_config_from(cli_config, from_env.as_deref(), cwd, user_config_path())
}

fn locate_config_from(
    cli_config: Option<&Path>,
    env_value: Option<&str>,
    cwd: &Path,
    user_path: Option<PathBuf>,
) -> Result<Option<PathBuf>, GenerateError> {
    if let Some(p) = cli_config {
        let p = cwd.join(p);
        if !p.exists() {
            return Err(GenerateError::Config {
                path: p,
                message: "--config was provided but file does not exist".to_string(),
            });
        }
        return Ok(Some(p));
    }

    if let Some(raw) = env_value.map(str::trim).filter(|s| !s.is_empty()) {
        let p = cwd.join(raw);
        if !p.exists() {
            return Err(GenerateError::Config {
                path: p,
                message: format!("{CONFIG_ENV_VAR} is set but file does not exist"),
            });
        }
        return Ok(Some(p));
    }

    let project = cwd.join(PROJECT_CONFIG_FILE);
    if project.exists() {
        return Ok(Some(project));
    }

    Ok(user_path.filter(|p| p.exists()))
}
