// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Decision engine configuration section.

use folio_policy::EngineSettings;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct PolicyConfigLayer {
	pub deny_duplicate_rules: Option<bool>,
	pub trace_decisions: Option<bool>,
}

impl PolicyConfigLayer {
	pub fn merge(&mut self, other: Self) {
		if other.deny_duplicate_rules.is_some() {
			self.deny_duplicate_rules = other.deny_duplicate_rules;
		}
		if other.trace_decisions.is_some() {
			self.trace_decisions = other.trace_decisions;
		}
	}

	pub fn finalize(self) -> PolicyConfig {
		PolicyConfig {
			deny_duplicate_rules: self.deny_duplicate_rules.unwrap_or(false),
			trace_decisions: self.trace_decisions.unwrap_or(false),
		}
	}
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PolicyConfig {
	pub deny_duplicate_rules: bool,
	pub trace_decisions: bool,
}

impl PolicyConfig {
	/// Settings for [`folio_policy::Engine::new`].
	pub fn engine_settings(&self) -> EngineSettings {
		EngineSettings {
			deny_duplicate_rules: self.deny_duplicate_rules,
			trace_decisions: self.trace_decisions,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_defaults_are_permissive_and_quiet() {
		let config = PolicyConfigLayer::default().finalize();
		assert!(!config.deny_duplicate_rules);
		assert!(!config.trace_decisions);
		assert_eq!(config.engine_settings(), EngineSettings::default());
	}

	#[test]
	fn test_merge_only_overrides_set_fields() {
		let mut base = PolicyConfigLayer {
			deny_duplicate_rules: Some(true),
			trace_decisions: Some(false),
		};
		base.merge(PolicyConfigLayer {
			deny_duplicate_rules: None,
			trace_decisions: Some(true),
		});
		let config = base.finalize();
		assert!(config.deny_duplicate_rules);
		assert!(config.trace_decisions);
	}
}
