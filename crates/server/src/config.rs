//! Server configuration from environment variables

use std::num::ParseIntError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("TICKET_PORT must be a port number, got '{value}': {source}")]
    InvalidPort {
        value: String,
        #[source]
        source: ParseIntError,
    },
}

/// Runtime settings for the ticket server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Directory generated tickets are written to
    pub output_dir: PathBuf,
    /// Dhivehi TrueType font
    pub font_path: PathBuf,
    /// Title emblem image
    pub emblem_path: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            output_dir: PathBuf::from("generated_tickets"),
            font_path: PathBuf::from("faruma.ttf"),
            emblem_path: PathBuf::from("static").join("crown.png"),
        }
    }
}

impl AppConfig {
    /// Read `TICKET_*` variables from the process environment.
    ///
    /// Call `dotenvy::dotenv()` first to pick up a `.env` file.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build a config from a variable lookup, using defaults for unset variables
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let port = match lookup("TICKET_PORT") {
            Some(value) => value
                .trim()
                .parse()
                .map_err(|source| ConfigError::InvalidPort { value, source })?,
            None => defaults.port,
        };

        Ok(Self {
            host: lookup("TICKET_HOST").unwrap_or(defaults.host),
            port,
            output_dir: lookup("TICKET_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.output_dir),
            font_path: lookup("TICKET_FONT_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.font_path),
            emblem_path: lookup("TICKET_EMBLEM_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.emblem_path),
        })
    }
}
