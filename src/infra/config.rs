use crate::infra::docker_adapter::DEFAULT_DOCKER_BIN;
use crate::infra::minikube_adapter::DEFAULT_MINIKUBE_BIN;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

pub const DEFAULT_CONFIG_NAME: &str = "dockerbar.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid configuration in {path:?}")]
    Invalid {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub fn default_config_dir() -> PathBuf {
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("/tmp"))
        .join(".config/dockerbar")
}

pub fn config_path(config_dir: &Path) -> PathBuf {
    config_dir.join(DEFAULT_CONFIG_NAME)
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct DockerConfig {
    pub bin: PathBuf,
}

impl Default for DockerConfig {
    fn default() -> Self {
        Self {
            bin: PathBuf::from(DEFAULT_DOCKER_BIN),
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct MinikubeConfig {
    pub enabled: bool,
    pub bin: PathBuf,
}

impl Default for MinikubeConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            bin: PathBuf::from(DEFAULT_MINIKUBE_BIN),
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct MenuConfig {
    pub show_networks: bool,
    pub show_volumes: bool,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            show_networks: true,
            show_volumes: true,
        }
    }
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct AppConfig {
    pub docker: DockerConfig,
    pub minikube: MinikubeConfig,
    pub menu: MenuConfig,
}

impl AppConfig {
    /// Loads `dockerbar.toml` from `config_dir`; a missing or empty file gives defaults.
    pub fn load(config_dir: &Path) -> Result<Self> {
        let path = config_path(config_dir);

        if !path.exists() {
            debug!("no config at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path).with_context(|| format!("reading {:?}", path))?;
        Ok(Self::parse(&content, &path)?)
    }

    pub fn parse(content: &str, path: &Path) -> Result<Self, ConfigError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        toml::from_str(content).map_err(|source| ConfigError::Invalid {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Command line override of the runtime binary
    pub fn with_docker_bin(mut self, bin: Option<PathBuf>) -> Self {
        if let Some(bin) = bin {
            self.docker.bin = bin;
        }
        self
    }

    pub fn docker_bin(&self) -> PathBuf {
        expand_tilde(&self.docker.bin)
    }

    pub fn minikube_bin(&self) -> PathBuf {
        expand_tilde(&self.minikube.bin)
    }
}

fn expand_tilde(path: &Path) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path.to_string_lossy().as_ref()).into_owned())
}
