// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Policy decision engine.
//!
//! [`Engine::can`] looks up the rules governing (actor kind, resource kind,
//! action) and evaluates them in registration order:
//!
//! 1. **No rule**: the action is denied. Adding a new action without a rule
//!    degrades to a denial, never to a grant.
//! 2. **First grant wins**: evaluation stops at the first rule returning true.
//! 3. **All deny**: the action is denied.
//!
//! Rules may call back into the engine for a parent resource reached through a
//! relation (a document's collection, a collection's team). A missing relation
//! surfaces as [`PolicyError`] and aborts the decision; it is never treated as
//! a denial.
//!
//! The engine holds no mutable state, so one instance can serve any number of
//! threads.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, trace};

use crate::entity::{Actor, Resource};
use crate::error::{AuthorizeError, PolicyError, RegistryError};
use crate::policies;
use crate::registry::RuleRegistry;
use crate::types::Action;

/// Runtime switches for the engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineSettings {
	/// Reject a registry in which a triple is governed by more than one rule.
	pub deny_duplicate_rules: bool,
	/// Log every decision outcome at debug level.
	pub trace_decisions: bool,
}

/// Evaluates permission rules. Immutable once constructed.
#[derive(Debug)]
pub struct Engine {
	registry: RuleRegistry,
	settings: EngineSettings,
}

impl Engine {
	/// Creates an engine over a fully populated registry.
	pub fn new(registry: RuleRegistry, settings: EngineSettings) -> Result<Self, RegistryError> {
		if settings.deny_duplicate_rules {
			if let Some(key) = registry.duplicates().first() {
				return Err(RegistryError::DuplicateRule {
					actor: key.actor,
					resource: key.resource,
					action: key.action,
				});
			}
		}
		debug!(rules = registry.len(), "policy engine initialized");
		Ok(Self { registry, settings })
	}

	/// Creates an engine with every built-in rule family and default settings.
	pub fn standard() -> Self {
		Self {
			registry: policies::standard_registry(),
			settings: EngineSettings::default(),
		}
	}

	/// Creates an engine with every built-in rule family.
	pub fn standard_with(settings: EngineSettings) -> Result<Self, RegistryError> {
		Self::new(policies::standard_registry(), settings)
	}

	pub fn registry(&self) -> &RuleRegistry {
		&self.registry
	}

	pub fn settings(&self) -> EngineSettings {
		self.settings
	}

	/// Returns `Ok(true)` if `actor` may perform `action` on `resource`.
	///
	/// `Ok(false)` is a denial. `Err` means a rule needed a relation the caller
	/// did not load.
	pub fn can<'a>(
		&self,
		actor: impl Into<Actor<'a>>,
		action: Action,
		resource: impl Into<Resource<'a>>,
	) -> Result<bool, PolicyError> {
		self.evaluate(actor.into(), action, resource.into())
	}

	/// The negation of [`Engine::can`]. Faults propagate unchanged.
	pub fn cannot<'a>(
		&self,
		actor: impl Into<Actor<'a>>,
		action: Action,
		resource: impl Into<Resource<'a>>,
	) -> Result<bool, PolicyError> {
		self.can(actor, action, resource).map(|allowed| !allowed)
	}

	/// Like [`Engine::can`], but turns a denial into [`AuthorizeError::Denied`]
	/// for request handlers that want a single `?`.
	pub fn authorize<'a>(
		&self,
		actor: impl Into<Actor<'a>>,
		action: Action,
		resource: impl Into<Resource<'a>>,
	) -> Result<(), AuthorizeError> {
		let resource = resource.into();
		if self.evaluate(actor.into(), action, resource)? {
			Ok(())
		} else {
			Err(AuthorizeError::Denied {
				action,
				resource: resource.kind(),
			})
		}
	}

	#[instrument(
		level = "debug",
		skip(self, actor, resource),
		fields(
			actor = %actor.kind(),
			action = %action,
			resource = %resource.kind(),
		)
	)]
	fn evaluate(
		&self,
		actor: Actor<'_>,
		action: Action,
		resource: Resource<'_>,
	) -> Result<bool, PolicyError> {
		let mut rules = self
			.registry
			.lookup(actor.kind(), resource.kind(), action)
			.peekable();

		if rules.peek().is_none() {
			trace!("no rule governs this action, denying");
			return Ok(false);
		}

		let mut allowed = false;
		for rule in rules {
			if rule.evaluate(self, actor, resource)? {
				allowed = true;
				break;
			}
		}

		if self.settings.trace_decisions {
			debug!(
				allowed,
				actor_team = %actor.team_id(),
				resource_team = %resource.team_id(),
				"policy decision"
			);
		}
		Ok(allowed)
	}
}
