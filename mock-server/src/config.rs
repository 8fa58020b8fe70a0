//! Environment configuration for the mock-server binary.

use std::path::PathBuf;

use thiserror::Error;

use crate::CONTACTS_FIXTURE;

pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid PORT {value:?}: {source}")]
    InvalidPort {
        value: String,
        source: std::num::ParseIntError,
    },

    #[error("could not read fixture {path:?}: {source}")]
    Fixture {
        path: PathBuf,
        source: std::io::Error,
    },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// Document served on the contacts route.
    pub document: String,
}

impl Config {
    /// Read `PORT` and `CONTACTS_FIXTURE` from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(
            std::env::var("PORT").ok(),
            std::env::var_os("CONTACTS_FIXTURE").map(PathBuf::from),
        )
    }

    pub fn from_vars(port: Option<String>, fixture: Option<PathBuf>) -> Result<Self, ConfigError> {
        let port = match port {
            Some(value) => value
                .trim()
                .parse()
                .map_err(|source| ConfigError::InvalidPort { value, source })?,
            None => DEFAULT_PORT,
        };
        let document = match fixture {
            Some(path) => std::fs::read_to_string(&path)
                .map_err(|source| ConfigError::Fixture { path, source })?,
            None => CONTACTS_FIXTURE.to_string(),
        };
        Ok(Self { port, document })
    }

    pub fn addr(&self) -> String {
        format!("127.0.0.1:{}", self.port)
    }
}
