// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Built-in rule families.
//!
//! Every rule ends in the team gate: the actor and the resource must belong to
//! the same team. The other checks in a rule only ever add restrictions on top
//! of that gate.

pub mod collection;
pub mod document;
pub mod revision;
pub mod team;
pub mod user;

use crate::registry::RuleRegistry;

/// Registers every built-in rule family, parents before children.
pub fn register_all(registry: &mut RuleRegistry) {
	team::register(registry);
	collection::register(registry);
	document::register(registry);
	revision::register(registry);
	user::register(registry);
}

/// A registry holding every built-in rule family.
pub fn standard_registry() -> RuleRegistry {
	let mut registry = RuleRegistry::new();
	register_all(&mut registry);
	registry
}
