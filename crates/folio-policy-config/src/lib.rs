// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration for the Folio policy engine.
//!
//! This crate provides:
//! - Layered configuration from defaults, a TOML file and the environment
//! - Consistent environment variable naming (`FOLIO_*`)
//! - Conversion into [`folio_policy::EngineSettings`]
//!
//! # Usage
//!
//! ```ignore
//! use folio_policy::Engine;
//! use folio_policy_config::load_config;
//!
//! let config = load_config()?;
//! let engine = Engine::standard_with(config.policy.engine_settings())?;
//! ```

pub mod error;
pub mod layer;
pub mod sections;
pub mod sources;

pub use error::ConfigError;
pub use layer::PolicyFileLayer;
pub use sections::*;
pub use sources::{ConfigSource, DefaultsSource, EnvSource, Precedence, TomlSource};

use tracing::{debug, info};

/// Fully resolved configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FolioPolicyConfig {
	pub policy: PolicyConfig,
	pub logging: LoggingConfig,
}

/// Load configuration from all sources with standard precedence.
///
/// Precedence (highest to lowest):
/// 1. Environment variables (`FOLIO_*`)
/// 2. Config file (`/etc/folio/policy.toml`)
/// 3. Built-in defaults
pub fn load_config() -> Result<FolioPolicyConfig, ConfigError> {
	load_from_sources(vec![
		Box::new(DefaultsSource),
		Box::new(TomlSource::system()),
		Box::new(EnvSource),
	])
}

/// Load configuration with a custom config file path.
pub fn load_config_with_file(
	config_path: impl Into<std::path::PathBuf>,
) -> Result<FolioPolicyConfig, ConfigError> {
	load_from_sources(vec![
		Box::new(DefaultsSource),
		Box::new(TomlSource::new(config_path)),
		Box::new(EnvSource),
	])
}

/// Merge the given sources in precedence order and resolve the result.
pub fn load_from_sources(
	mut sources: Vec<Box<dyn ConfigSource>>,
) -> Result<FolioPolicyConfig, ConfigError> {
	sources.sort_by_key(|s| s.precedence());

	let mut merged = PolicyFileLayer::default();
	for source in sources {
		debug!(source = source.name(), "loading configuration source");
		let layer = source.load()?;
		merged.merge(layer);
	}

	Ok(finalize(merged))
}

fn finalize(layer: PolicyFileLayer) -> FolioPolicyConfig {
	let policy = layer.policy.unwrap_or_default().finalize();
	let logging = layer.logging.unwrap_or_default().finalize();

	info!(
		deny_duplicate_rules = policy.deny_duplicate_rules,
		trace_decisions = policy.trace_decisions,
		log_level = %logging.level,
		log_format = %logging.format,
		"Policy configuration loaded"
	);

	FolioPolicyConfig { policy, logging }
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	struct FixedSource {
		precedence: Precedence,
		layer: PolicyFileLayer,
	}

	impl ConfigSource for FixedSource {
		fn name(&self) -> &'static str {
			"fixed"
		}

		fn precedence(&self) -> Precedence {
			self.precedence
		}

		fn load(&self) -> Result<PolicyFileLayer, ConfigError> {
			Ok(self.layer.clone())
		}
	}

	fn policy_layer(deny: Option<bool>, trace: Option<bool>) -> PolicyFileLayer {
		PolicyFileLayer {
			policy: Some(PolicyConfigLayer {
				deny_duplicate_rules: deny,
				trace_decisions: trace,
			}),
			logging: None,
		}
	}

	fn fixed(precedence: Precedence, layer: PolicyFileLayer) -> Box<dyn ConfigSource> {
		Box::new(FixedSource { precedence, layer })
	}

	#[test]
	fn test_defaults_only() {
		let config = load_from_sources(vec![Box::new(DefaultsSource)]).unwrap();
		assert_eq!(config, FolioPolicyConfig::default());
		assert_eq!(config.logging.level, "info");
	}

	#[test]
	fn test_missing_file_falls_back_to_defaults() {
		let config = load_from_sources(vec![
			Box::new(DefaultsSource),
			Box::new(TomlSource::new("/nonexistent/policy.toml")),
		])
		.unwrap();
		assert_eq!(config, FolioPolicyConfig::default());
	}

	#[test]
	fn test_file_values_are_resolved() {
		use std::io::Write;

		let mut file = tempfile::NamedTempFile::new().unwrap();
		writeln!(file, "[policy]\ntrace_decisions = true").unwrap();

		let config = load_from_sources(vec![
			Box::new(DefaultsSource),
			Box::new(TomlSource::new(file.path())),
		])
		.unwrap();
		assert!(config.policy.trace_decisions);
		assert!(!config.policy.deny_duplicate_rules);
	}

	#[test]
	fn test_source_order_does_not_matter() {
		let config = load_from_sources(vec![
			fixed(Precedence::Environment, policy_layer(Some(false), None)),
			fixed(Precedence::ConfigFile, policy_layer(Some(true), Some(true))),
		])
		.unwrap();
		assert!(!config.policy.deny_duplicate_rules);
		assert!(config.policy.trace_decisions);
	}

	proptest! {
		#[test]
		fn higher_precedence_wins_when_set(
			file in proptest::option::of(any::<bool>()),
			env in proptest::option::of(any::<bool>()),
		) {
			let config = load_from_sources(vec![
				fixed(Precedence::Environment, policy_layer(env, None)),
				Box::new(DefaultsSource),
				fixed(Precedence::ConfigFile, policy_layer(file, None)),
			])
			.unwrap();
			let expected = env.or(file).unwrap_or(false);
			prop_assert_eq!(config.policy.deny_duplicate_rules, expected);
		}
	}
}
