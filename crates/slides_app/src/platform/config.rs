use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use engine_logging::{engine_info, engine_warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

pub const CONFIG_FILENAME: &str = "presenter.ron";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path:?}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
    #[error("invalid url {url:?}: {source}")]
    InvalidUrl {
        url: String,
        source: url::ParseError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server_url: String,
    pub generate_route: String,
    pub download_route: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:5000".to_string(),
            generate_route: "/gerar".to_string(),
            download_route: "/download/".to_string(),
        }
    }
}

impl AppConfig {
    /// `Ok(None)` when the file does not exist.
    pub fn load(path: &Path) -> Result<Option<Self>, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        ron::from_str(&content)
            .map(Some)
            .map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })
    }

    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(Some(config)) => {
                engine_info!("Loaded config from {:?}", path);
                config
            }
            Ok(None) => Self::default(),
            Err(err) => {
                engine_warn!("{}; using defaults", err);
                Self::default()
            }
        }
    }

    pub fn with_server(mut self, server_url: Option<String>) -> Self {
        if let Some(server_url) = server_url {
            self.server_url = server_url;
        }
        self
    }

    pub fn generation_url(&self) -> Result<String, ConfigError> {
        self.resolve(&self.generate_route)
    }

    /// Absolute prefix the download token is appended to.
    pub fn download_prefix(&self) -> Result<String, ConfigError> {
        self.resolve(&self.download_route)
    }

    fn resolve(&self, route: &str) -> Result<String, ConfigError> {
        let invalid = |source| ConfigError::InvalidUrl {
            url: self.server_url.clone(),
            source,
        };
        let base = Url::parse(&self.server_url).map_err(invalid)?;
        Ok(base.join(route).map_err(invalid)?.to_string())
    }
}
