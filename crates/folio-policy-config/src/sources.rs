// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration sources: defaults, TOML files and environment variables.

use std::path::PathBuf;

use tracing::{debug, trace};

use crate::error::ConfigError;
use crate::layer::PolicyFileLayer;
use crate::sections::{LogFormat, LoggingConfigLayer, PolicyConfigLayer};

pub const SYSTEM_CONFIG_PATH: &str = "/etc/folio/policy.toml";

/// Source precedence levels (higher = overrides lower).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
	Defaults = 10,
	ConfigFile = 20,
	Environment = 50,
}

/// Trait for configuration sources.
pub trait ConfigSource: Send + Sync {
	fn name(&self) -> &'static str;
	fn precedence(&self) -> Precedence;
	fn load(&self) -> Result<PolicyFileLayer, ConfigError>;
}

/// Built-in defaults source.
pub struct DefaultsSource;

impl ConfigSource for DefaultsSource {
	fn name(&self) -> &'static str {
		"defaults"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Defaults
	}

	fn load(&self) -> Result<PolicyFileLayer, ConfigError> {
		debug!("loading defaults");
		Ok(PolicyFileLayer::default())
	}
}

/// TOML file configuration source. A missing file yields an empty layer.
pub struct TomlSource {
	path: PathBuf,
}

impl TomlSource {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}

	pub fn system() -> Self {
		Self::new(SYSTEM_CONFIG_PATH)
	}
}

impl ConfigSource for TomlSource {
	fn name(&self) -> &'static str {
		"toml-config"
	}

	fn precedence(&self) -> Precedence {
		Precedence::ConfigFile
	}

	fn load(&self) -> Result<PolicyFileLayer, ConfigError> {
		if !self.path.exists() {
			debug!(path = %self.path.display(), "config file not found, skipping");
			return Ok(PolicyFileLayer::default());
		}

		debug!(path = %self.path.display(), "loading config file");
		let content = std::fs::read_to_string(&self.path).map_err(|e| ConfigError::FileRead {
			path: self.path.clone(),
			source: e,
		})?;

		let layer: PolicyFileLayer =
			toml::from_str(&content).map_err(|e| ConfigError::TomlParse {
				path: self.path.clone(),
				source: e,
			})?;

		trace!("parsed config layer from TOML");
		Ok(layer)
	}
}

/// Environment variable source.
///
/// Convention: FOLIO_<SECTION>_<FIELD>
pub struct EnvSource;

impl ConfigSource for EnvSource {
	fn name(&self) -> &'static str {
		"environment"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Environment
	}

	fn load(&self) -> Result<PolicyFileLayer, ConfigError> {
		debug!("loading environment variables");
		load_from(&|name| std::env::var(name).ok())
	}
}

type Lookup<'a> = &'a dyn Fn(&str) -> Option<String>;

fn load_from(lookup: Lookup<'_>) -> Result<PolicyFileLayer, ConfigError> {
	Ok(PolicyFileLayer {
		policy: Some(load_policy_from_env(lookup)?),
		logging: Some(load_logging_from_env(lookup)?),
	})
}

fn env_var(lookup: Lookup<'_>, name: &str) -> Option<String> {
	lookup(name).filter(|s| !s.is_empty())
}

fn env_bool(lookup: Lookup<'_>, name: &str) -> Result<Option<bool>, ConfigError> {
	match env_var(lookup, name) {
		Some(v) if v == "1" || v.eq_ignore_ascii_case("true") => Ok(Some(true)),
		Some(v) if v == "0" || v.eq_ignore_ascii_case("false") => Ok(Some(false)),
		Some(v) => Err(ConfigError::InvalidValue {
			key: name.to_string(),
			message: format!("invalid bool value '{v}'"),
		}),
		None => Ok(None),
	}
}

fn load_policy_from_env(lookup: Lookup<'_>) -> Result<PolicyConfigLayer, ConfigError> {
	Ok(PolicyConfigLayer {
		deny_duplicate_rules: env_bool(lookup, "FOLIO_POLICY_DENY_DUPLICATE_RULES")?,
		trace_decisions: env_bool(lookup, "FOLIO_POLICY_TRACE_DECISIONS")?,
	})
}

fn load_logging_from_env(lookup: Lookup<'_>) -> Result<LoggingConfigLayer, ConfigError> {
	let format = match env_var(lookup, "FOLIO_LOG_FORMAT") {
		Some(v) => Some(v.parse::<LogFormat>().map_err(|message| {
			ConfigError::InvalidValue {
				key: "FOLIO_LOG_FORMAT".to_string(),
				message,
			}
		})?),
		None => None,
	};

	Ok(LoggingConfigLayer {
		level: env_var(lookup, "FOLIO_LOG_LEVEL"),
		format,
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::collections::HashMap;
	use std::io::Write;

	fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
		pairs
			.iter()
			.map(|(k, v)| (k.to_string(), v.to_string()))
			.collect()
	}

	fn load_env(vars: &HashMap<String, String>) -> Result<PolicyFileLayer, ConfigError> {
		load_from(&|name| vars.get(name).cloned())
	}

	#[test]
	fn test_precedence_ordering() {
		assert!(Precedence::Environment > Precedence::ConfigFile);
		assert!(Precedence::ConfigFile > Precedence::Defaults);
	}

	#[test]
	fn test_defaults_source_returns_empty_layer() {
		let layer = DefaultsSource.load().unwrap();
		assert!(layer.policy.is_none());
		assert!(layer.logging.is_none());
	}

	#[test]
	fn test_toml_source_missing_file_returns_empty() {
		let layer = TomlSource::new("/nonexistent/policy.toml").load().unwrap();
		assert_eq!(layer, PolicyFileLayer::default());
	}

	#[test]
	fn test_toml_source_parses_sections() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		writeln!(
			file,
			"[policy]\ndeny_duplicate_rules = true\n\n[logging]\nlevel = \"debug\"\nformat = \"json\""
		)
		.unwrap();

		let layer = TomlSource::new(file.path()).load().unwrap();
		let policy = layer.policy.unwrap();
		assert_eq!(policy.deny_duplicate_rules, Some(true));
		assert_eq!(policy.trace_decisions, None);
		let logging = layer.logging.unwrap();
		assert_eq!(logging.level.as_deref(), Some("debug"));
		assert_eq!(logging.format, Some(LogFormat::Json));
	}

	#[test]
	fn test_toml_source_reports_parse_errors() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		writeln!(file, "[policy]\ndeny_duplicate_rules = \"maybe\"").unwrap();

		let err = TomlSource::new(file.path()).load().unwrap_err();
		assert!(matches!(err, ConfigError::TomlParse { .. }));
	}

	#[test]
	fn test_toml_source_rejects_misspelled_key() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		writeln!(file, "[policy]\ndeny_duplicate_rule = true").unwrap();

		let err = TomlSource::new(file.path()).load().unwrap_err();
		assert!(matches!(err, ConfigError::TomlParse { .. }));
	}

	#[test]
	fn test_env_source_reads_folio_variables() {
		let vars = env(&[
			("FOLIO_POLICY_DENY_DUPLICATE_RULES", "1"),
			("FOLIO_POLICY_TRACE_DECISIONS", "false"),
			("FOLIO_LOG_LEVEL", "trace"),
			("FOLIO_LOG_FORMAT", "json"),
		]);
		let layer = load_env(&vars).unwrap();
		let policy = layer.policy.unwrap();
		assert_eq!(policy.deny_duplicate_rules, Some(true));
		assert_eq!(policy.trace_decisions, Some(false));
		let logging = layer.logging.unwrap();
		assert_eq!(logging.level.as_deref(), Some("trace"));
		assert_eq!(logging.format, Some(LogFormat::Json));
	}

	#[test]
	fn test_env_source_ignores_empty_values() {
		let vars = env(&[("FOLIO_LOG_LEVEL", ""), ("FOLIO_POLICY_TRACE_DECISIONS", "")]);
		let layer = load_env(&vars).unwrap();
		assert_eq!(layer.logging.unwrap().level, None);
		assert_eq!(layer.policy.unwrap().trace_decisions, None);
	}

	#[test]
	fn test_env_source_rejects_bad_values() {
		let vars = env(&[("FOLIO_POLICY_DENY_DUPLICATE_RULES", "sometimes")]);
		let err = load_env(&vars).unwrap_err();
		assert!(
			matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "FOLIO_POLICY_DENY_DUPLICATE_RULES")
		);

		let vars = env(&[("FOLIO_LOG_FORMAT", "xml")]);
		assert!(matches!(
			load_env(&vars).unwrap_err(),
			ConfigError::InvalidValue { .. }
		));
	}
}
