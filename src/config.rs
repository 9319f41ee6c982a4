//! Node configuration
//!
//! Values come from an optional TOML file, then CLI flags override them.

use crate::consensus::{ProofOfWork, DEFAULT_DIFFICULTY, MAX_DIFFICULTY};
use serde::Deserialize;
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("difficulty must be between 1 and {max}, got {0}", max = MAX_DIFFICULTY)]
    InvalidDifficulty(usize),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NodeConfig {
    /// Address the HTTP server listens on
    pub bind: SocketAddr,
    /// Leading hex zeros a proof's hash must carry
    pub difficulty: usize,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            difficulty: DEFAULT_DIFFICULTY,
        }
    }
}

fn default_bind() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 5000))
}

impl NodeConfig {
    /// Read and validate a TOML config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: NodeConfig = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply command-line overrides on top of this config
    pub fn with_overrides(
        mut self,
        bind: Option<SocketAddr>,
        difficulty: Option<usize>,
    ) -> Result<Self, ConfigError> {
        if let Some(bind) = bind {
            self.bind = bind;
        }
        if let Some(difficulty) = difficulty {
            self.difficulty = difficulty;
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_DIFFICULTY).contains(&self.difficulty) {
            return Err(ConfigError::InvalidDifficulty(self.difficulty));
        }
        Ok(())
    }

    pub fn proof_of_work(&self) -> ProofOfWork {
        ProofOfWork::new(self.difficulty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = NodeConfig::default();
        assert_eq!(config.bind.to_string(), "0.0.0.0:5000");
        assert_eq!(config.difficulty, 6);
        assert_eq!(config.proof_of_work(), ProofOfWork::default());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = NodeConfig::from_toml_str("difficulty = 4").unwrap();
        assert_eq!(config.difficulty, 4);
        assert_eq!(config.bind, default_bind());

        let config = NodeConfig::from_toml_str("").unwrap();
        assert_eq!(config, NodeConfig::default());
    }

    #[test]
    fn test_full_toml() {
        let config = NodeConfig::from_toml_str(
            r#"
            bind = "127.0.0.1:8080"
            difficulty = 5
            "#,
        )
        .unwrap();
        assert_eq!(config.bind.port(), 8080);
        assert_eq!(config.difficulty, 5);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            NodeConfig::from_toml_str("difficulty = 0"),
            Err(ConfigError::InvalidDifficulty(0))
        ));
        assert!(matches!(
            NodeConfig::from_toml_str("difficulty = 65"),
            Err(ConfigError::InvalidDifficulty(65))
        ));
        assert!(matches!(
            NodeConfig::from_toml_str("bind = \"nowhere\""),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_overrides() {
        let bind: SocketAddr = "127.0.0.1:9000".parse().unwrap();
        let config = NodeConfig::default()
            .with_overrides(Some(bind), Some(3))
            .unwrap();
        assert_eq!(config.bind, bind);
        assert_eq!(config.difficulty, 3);

        assert!(NodeConfig::default().with_overrides(None, Some(0)).is_err());
    }

    #[test]
    fn test_missing_file() {
        let err = NodeConfig::load(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
