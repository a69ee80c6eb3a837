//! Configuration module for the couture order system.
//!
//! Configuration is read from a TOML file. `${VAR}` and `${VAR:-default}`
//! references are replaced with environment values before parsing, and the
//! result is validated before it is handed to the rest of the system.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur during configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error that occurs during file I/O operations.
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),
	/// Error that occurs when parsing TOML configuration.
	#[error("Configuration error: {0}")]
	Parse(String),
	/// Error that occurs when configuration validation fails.
	#[error("Validation error: {0}")]
	Validation(String),
}

impl From<toml::de::Error> for ConfigError {
	fn from(err: toml::de::Error) -> Self {
		// Keep only the message, not the echoed input
		ConfigError::Parse(err.message().to_string())
	}
}

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
	/// Configuration for the storage backend.
	pub storage: StorageConfig,
	/// Settings for the order lookup surface.
	#[serde(default)]
	pub tracking: TrackingConfig,
	/// Settings for order intake.
	#[serde(default)]
	pub intake: IntakeConfig,
}

/// Configuration for the storage backend.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
	/// Which implementation to use as primary.
	pub primary: String,
	/// Map of storage implementation names to their configurations.
	pub implementations: HashMap<String, toml::Value>,
}

impl StorageConfig {
	/// Returns the configuration table of the primary implementation.
	pub fn primary_config(&self) -> Option<&toml::Value> {
		self.implementations.get(&self.primary)
	}
}

/// Settings for the order lookup surface.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TrackingConfig {
	/// How many orders the recent list shows.
	#[serde(default = "default_recent_limit")]
	pub recent_limit: usize,
}

impl Default for TrackingConfig {
	fn default() -> Self {
		Self {
			recent_limit: default_recent_limit(),
		}
	}
}

fn default_recent_limit() -> usize {
	5
}

/// Settings for order intake.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IntakeConfig {
	/// Minimum number of days between submission and the requested delivery date.
	#[serde(default = "default_min_lead_days")]
	pub min_lead_days: u32,
	/// How many order ids are tried before a submission gives up on collisions.
	#[serde(default = "default_max_id_attempts")]
	pub max_id_attempts: u32,
}

impl Default for IntakeConfig {
	fn default() -> Self {
		Self {
			min_lead_days: default_min_lead_days(),
			max_id_attempts: default_max_id_attempts(),
		}
	}
}

/// Two weeks, the shortest turnaround the workshop accepts.
fn default_min_lead_days() -> u32 {
	14
}

fn default_max_id_attempts() -> u32 {
	5
}

/// Resolves environment variables in a string.
///
/// Replaces ${VAR_NAME} with the value of the environment variable VAR_NAME.
/// Supports default values with ${VAR_NAME:-default_value}.
///
/// Input strings are limited to 1MB to keep the regex scan bounded.
pub fn resolve_env_vars(input: &str) -> Result<String, ConfigError> {
	const MAX_INPUT_SIZE: usize = 1024 * 1024;
	if input.len() > MAX_INPUT_SIZE {
		return Err(ConfigError::Validation(format!(
			"Configuration file too large: {} bytes (max: {} bytes)",
			input.len(),
			MAX_INPUT_SIZE
		)));
	}

	let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]{0,127})(?::-([^}]{0,256}))?\}")
		.map_err(|e| ConfigError::Parse(format!("Regex error: {}", e)))?;

	let mut result = String::with_capacity(input.len());
	let mut last_end = 0;

	for cap in re.captures_iter(input) {
		let Some(full_match) = cap.get(0) else {
			continue;
		};
		let var_name = &cap[1];
		let default_value = cap.get(2).map(|m| m.as_str());

		let value = match std::env::var(var_name) {
			Ok(v) => v,
			Err(_) => match default_value {
				Some(default) => default.to_string(),
				None => {
					return Err(ConfigError::Validation(format!(
						"Environment variable '{}' not found",
						var_name
					)))
				},
			},
		};

		result.push_str(&input[last_end..full_match.start()]);
		result.push_str(&value);
		last_end = full_match.end();
	}

	result.push_str(&input[last_end..]);
	Ok(result)
}

impl Config {
	/// Loads configuration from a file, resolving environment variables.
	pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
		let content = tokio::fs::read_to_string(path.as_ref()).await?;
		content.parse()
	}

	/// A configuration that keeps orders in memory. Used by tests and dry runs.
	pub fn in_memory() -> Self {
		Self {
			storage: StorageConfig {
				primary: "memory".to_string(),
				implementations: HashMap::from([(
					"memory".to_string(),
					toml::Value::Table(toml::map::Map::new()),
				)]),
			},
			tracking: TrackingConfig::default(),
			intake: IntakeConfig::default(),
		}
	}

	/// Validates the configuration to ensure all required fields are properly set.
	///
	/// Backend-specific tables are checked by the backend's own schema when it
	/// is constructed; this only checks the cross-section rules.
	pub fn validate(&self) -> Result<(), ConfigError> {
		if self.storage.implementations.is_empty() {
			return Err(ConfigError::Validation(
				"At least one storage implementation must be configured".into(),
			));
		}
		if self.storage.primary.is_empty() {
			return Err(ConfigError::Validation(
				"Storage primary implementation cannot be empty".into(),
			));
		}
		if self.storage.primary_config().is_none() {
			return Err(ConfigError::Validation(format!(
				"Primary storage '{}' not found in implementations",
				self.storage.primary
			)));
		}

		if self.tracking.recent_limit == 0 || self.tracking.recent_limit > 100 {
			return Err(ConfigError::Validation(
				"tracking.recent_limit must be between 1 and 100".into(),
			));
		}

		if self.intake.min_lead_days > 365 {
			return Err(ConfigError::Validation(
				"intake.min_lead_days cannot exceed 365".into(),
			));
		}
		if self.intake.max_id_attempts == 0 || self.intake.max_id_attempts > 50 {
			return Err(ConfigError::Validation(
				"intake.max_id_attempts must be between 1 and 50".into(),
			));
		}

		Ok(())
	}
}

/// Parses a TOML string, resolving environment variables and validating the
/// result.
impl FromStr for Config {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let resolved = resolve_env_vars(s)?;
		let config: Config = toml::from_str(&resolved)?;
		config.validate()?;
		Ok(config)
	}
}
