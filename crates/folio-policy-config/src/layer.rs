// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Partial configuration produced by a single source.

use serde::{Deserialize, Serialize};

use crate::sections::{LoggingConfigLayer, PolicyConfigLayer};

/// One source's view of the configuration. Unset fields defer to sources of
/// lower precedence.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct PolicyFileLayer {
	pub policy: Option<PolicyConfigLayer>,
	pub logging: Option<LoggingConfigLayer>,
}

impl PolicyFileLayer {
	pub fn merge(&mut self, other: Self) {
		merge_section(&mut self.policy, other.policy, PolicyConfigLayer::merge);
		merge_section(&mut self.logging, other.logging, LoggingConfigLayer::merge);
	}
}

fn merge_section<T>(current: &mut Option<T>, other: Option<T>, merge: fn(&mut T, T)) {
	match (current.as_mut(), other) {
		(Some(existing), Some(other)) => merge(existing, other),
		(None, Some(other)) => *current = Some(other),
		(_, None) => {}
	}
}
