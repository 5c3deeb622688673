//! Locating and loading the status definitions file.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use flagcraft::{ConfigError, Schema};
use serde_yaml::Value;
use thiserror::Error;

/// File looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG: &str = "status_codes.yaml";

/// Environment variable that overrides [DEFAULT_CONFIG].
pub const CONFIG_ENV: &str = "FLAGCRAFT_CONFIG";

/// Errors that leave the application without a usable schema.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("configuration file '{}' was not found", .path.display())]
    Missing { path: PathBuf },
    #[error("failed to read configuration file '{}'", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("configuration file '{}' is not valid YAML", .path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("configuration file '{}' has no usable status definitions", .path.display())]
    Schema {
        path: PathBuf,
        #[source]
        source: ConfigError,
    },
}

/// Reads and parses the status definitions at `path`.
pub fn load_schema(path: &Path) -> Result<Schema, LoadError> {
    tracing::debug!(path = %path.display(), "loading status definitions");

    let text = fs::read_to_string(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => LoadError::Missing {
            path: path.to_path_buf(),
        },
        _ => LoadError::Read {
            path: path.to_path_buf(),
            source,
        },
    })?;

    let schema = parse_schema(&text).map_err(|err| match err {
        ParseFailure::Yaml(source) => LoadError::Malformed {
            path: path.to_path_buf(),
            source,
        },
        ParseFailure::Schema(source) => LoadError::Schema {
            path: path.to_path_buf(),
            source,
        },
    })?;

    tracing::info!(
        path = %path.display(),
        status_types = schema.len(),
        "loaded status definitions"
    );

    Ok(schema)
}

enum ParseFailure {
    Yaml(serde_yaml::Error),
    Schema(ConfigError),
}

fn parse_schema(text: &str) -> Result<Schema, ParseFailure> {
    // An empty document has no definitions rather than a syntax error.
    let raw = if text.trim().is_empty() {
        Value::Null
    } else {
        serde_yaml::from_str(text).map_err(ParseFailure::Yaml)?
    };

    Schema::parse(&raw).map_err(ParseFailure::Schema)
}
