//! Error types for configuration loading.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error reading a configuration file.
	#[error("I/O error reading {path}: {error}")]
	Io {
		/// Path to the file that failed to read.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},

	/// Error parsing TOML syntax or structure.
	#[error("TOML parse error: {0}")]
	Toml(#[from] toml::de::Error),

	/// The service endpoint is not a valid URL.
	#[error("invalid endpoint {value:?}: {error}")]
	InvalidEndpoint {
		value: String,
		error: url::ParseError,
	},

	/// A setting has an unusable value.
	#[error("invalid value for {key}: {reason}")]
	InvalidValue {
		/// Dotted key, or the environment variable the value came from.
		key: String,
		reason: String,
	},
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
