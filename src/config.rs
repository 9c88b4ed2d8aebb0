//! Configuration file loading.
//!
//! The configuration is a TOML file read once at startup and passed by value
//! into the registry and server; nothing reads it after that.
//!
//! ```toml
//! debug = false
//!
//! [server]
//! bind_address = "127.0.0.1"
//! port = 3001
//!
//! # A directory whose subdirectories are repositories:
//! repositories = "/srv/git"
//! # or one repository:
//! # repositories = { single = "/srv/git/app" }
//! # or an explicit, ordered mapping:
//! # [repositories.mapping]
//! # alpha = "/srv/git/alpha"
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{AppError, Result};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub debug: bool,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub repositories: Option<RepositoriesConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Where the served repositories come from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum RepositoriesConfig {
    Directory(PathBuf),
    Single { single: PathBuf },
    Mapping { mapping: IndexMap<String, PathBuf> },
}

fn default_bind_address() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3001
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            port: default_port(),
        }
    }
}

impl Config {
    /// Load and validate a config file. The file must declare `repositories`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let config = Self::read(path)?;

        if config.repositories.is_none() {
            return Err(AppError::Configuration(format!(
                "you should declare some repositories in the config file: \"{}\"",
                path.display()
            )));
        }

        Ok(config)
    }

    /// Load a config file without requiring `repositories`, for when the
    /// command line supplies them.
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(AppError::Configuration(format!(
                "can not find config file: \"{}\"",
                path.display()
            )));
        }

        let content = fs::read_to_string(path).map_err(|e| {
            AppError::Configuration(format!("failed to read config file \"{}\": {}", path.display(), e))
        })?;

        Self::parse(&content).map_err(|e| match e {
            AppError::Configuration(msg) => {
                AppError::Configuration(format!("{} in \"{}\"", msg, path.display()))
            }
            other => other,
        })
    }

    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| AppError::Configuration(e.message().to_string()))
    }
}
