//! Configuration for selko.
//!
//! Settings come from three layers, later ones winning:
//!
//! 1. Built-in defaults.
//! 2. A TOML file: an explicit path, else `$XDG_CONFIG_HOME/selko/selko.toml`
//!    (or the platform equivalent) when it exists.
//! 3. Environment variables (`SELKO_ENDPOINT`, `SELKO_DEBOUNCE_MS`,
//!    `SELKO_TIMEOUT_MS`, `SELKO_LOG`).
//!
//! ```toml
//! [service]
//! endpoint = "http://localhost:8000/api/annotate"
//! timeout_ms = 10000
//!
//! [sync]
//! debounce_ms = 500
//!
//! [log]
//! filter = "info,selko_sync=debug"
//! ```

pub mod error;

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use tracing::debug;
use url::Url;

pub use error::{ConfigError, Result};

/// Analysis endpoint used when nothing else is configured.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8000/api/annotate";
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;
pub const DEFAULT_DEBOUNCE_MS: u64 = 500;
pub const DEFAULT_LOG_FILTER: &str = "info";

pub const ENV_ENDPOINT: &str = "SELKO_ENDPOINT";
pub const ENV_DEBOUNCE_MS: &str = "SELKO_DEBOUNCE_MS";
pub const ENV_TIMEOUT_MS: &str = "SELKO_TIMEOUT_MS";
pub const ENV_LOG: &str = "SELKO_LOG";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
	pub service: ServiceConfig,
	pub sync: SyncSettings,
	pub log: LogConfig,
}

/// `[service]`: where and how to reach the analysis service.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServiceConfig {
	pub endpoint: String,
	/// Per-request timeout in milliseconds.
	pub timeout_ms: u64,
}

impl Default for ServiceConfig {
	fn default() -> Self {
		Self {
			endpoint: DEFAULT_ENDPOINT.to_string(),
			timeout_ms: DEFAULT_TIMEOUT_MS,
		}
	}
}

/// `[sync]`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SyncSettings {
	/// Pause in typing, in milliseconds, before the text is analyzed.
	pub debounce_ms: u64,
}

impl Default for SyncSettings {
	fn default() -> Self {
		Self {
			debounce_ms: DEFAULT_DEBOUNCE_MS,
		}
	}
}

/// `[log]`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogConfig {
	/// `tracing` env-filter directive.
	pub filter: String,
}

impl Default for LogConfig {
	fn default() -> Self {
		Self {
			filter: DEFAULT_LOG_FILTER.to_string(),
		}
	}
}

impl Config {
	/// Parse a TOML string. Missing sections and keys keep their defaults.
	pub fn parse(input: &str) -> Result<Self> {
		Ok(toml::from_str(input)?)
	}

	/// Load configuration from a file.
	pub fn load(path: impl AsRef<Path>) -> Result<Self> {
		let path = path.as_ref();
		let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
			path: path.to_path_buf(),
			error: e,
		})?;
		Self::parse(&content)
	}

	/// Location of the user's config file, whether or not it exists.
	pub fn default_path() -> Option<PathBuf> {
		dirs::config_dir().map(|dir| dir.join("selko").join("selko.toml"))
	}

	/// Resolve the effective configuration.
	///
	/// An explicit `path` must exist. Without one, the default location is
	/// used when present. Environment overrides are applied last and the
	/// result is validated.
	pub fn resolve(path: Option<&Path>) -> Result<Self> {
		let mut config = match path {
			Some(path) => Self::load(path)?,
			None => match Self::default_path().filter(|p| p.is_file()) {
				Some(path) => {
					debug!(path = %path.display(), "config.load");
					Self::load(&path)?
				}
				None => Self::default(),
			},
		};
		config.apply_env(|key| std::env::var(key).ok())?;
		config.validate()?;
		Ok(config)
	}

	/// Apply overrides from `lookup`, which maps variable names to values.
	///
	/// Empty values are ignored.
	pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
		let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

		if let Some(endpoint) = get(ENV_ENDPOINT) {
			self.service.endpoint = endpoint;
		}
		if let Some(ms) = get(ENV_TIMEOUT_MS) {
			self.service.timeout_ms = parse_millis(ENV_TIMEOUT_MS, &ms)?;
		}
		if let Some(ms) = get(ENV_DEBOUNCE_MS) {
			self.sync.debounce_ms = parse_millis(ENV_DEBOUNCE_MS, &ms)?;
		}
		if let Some(filter) = get(ENV_LOG) {
			self.log.filter = filter;
		}
		Ok(())
	}

	/// Check that every value is usable.
	pub fn validate(&self) -> Result<()> {
		self.endpoint()?;
		if self.service.timeout_ms == 0 {
			return Err(invalid("service.timeout_ms", "must be greater than zero"));
		}
		if self.sync.debounce_ms == 0 {
			return Err(invalid("sync.debounce_ms", "must be greater than zero"));
		}
		Ok(())
	}

	/// The parsed service endpoint.
	pub fn endpoint(&self) -> Result<Url> {
		let url = Url::parse(&self.service.endpoint).map_err(|error| ConfigError::InvalidEndpoint {
			value: self.service.endpoint.clone(),
			error,
		})?;
		match url.scheme() {
			"http" | "https" => Ok(url),
			other => Err(invalid("service.endpoint", format!("unsupported scheme {other:?}"))),
		}
	}

	pub fn timeout(&self) -> Duration {
		Duration::from_millis(self.service.timeout_ms)
	}

	pub fn debounce(&self) -> Duration {
		Duration::from_millis(self.sync.debounce_ms)
	}
}

fn parse_millis(key: &str, value: &str) -> Result<u64> {
	value
		.trim()
		.parse()
		.map_err(|e: std::num::ParseIntError| invalid(key, format!("{value:?} is not a millisecond count: {e}")))
}

fn invalid(key: &str, reason: impl Into<String>) -> ConfigError {
	ConfigError::InvalidValue {
		key: key.to_string(),
		reason: reason.into(),
	}
}
