// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Declarative permission rules keyed by (actor kind, resource kind, action).
//!
//! Rules are registered once while the process starts and handed to the
//! [`Engine`](crate::Engine), which owns them read-only from then on. There is
//! no removal. Several rules may govern the same triple; their outcomes are
//! combined with OR in registration order, which is the only form of
//! priority.

use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;

use tracing::warn;

use crate::engine::Engine;
use crate::entity::{Actor, ActorEntity, Resource, ResourceEntity};
use crate::error::PolicyError;
use crate::types::{Action, ActorKind, ResourceKind};

/// A rule body: decides one actor/resource pair and may query the engine
/// about a parent resource reached through a relation.
pub type Predicate<A, R> = fn(&Engine, &A, &R) -> Result<bool, PolicyError>;

/// The (actor kind, resource kind, action) triple a rule governs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RuleKey {
	pub actor: ActorKind,
	pub resource: ResourceKind,
	pub action: Action,
}

impl fmt::Display for RuleKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{} {} {}", self.actor, self.action, self.resource)
	}
}

trait ErasedPredicate: Send + Sync {
	fn evaluate(
		&self,
		engine: &Engine,
		actor: Actor<'_>,
		resource: Resource<'_>,
	) -> Result<bool, PolicyError>;
}

struct TypedPredicate<A, R> {
	predicate: Predicate<A, R>,
	_marker: PhantomData<fn(&A, &R)>,
}

impl<A: ActorEntity, R: ResourceEntity> ErasedPredicate for TypedPredicate<A, R> {
	fn evaluate(
		&self,
		engine: &Engine,
		actor: Actor<'_>,
		resource: Resource<'_>,
	) -> Result<bool, PolicyError> {
		match (A::from_actor(actor), R::from_resource(resource)) {
			(Some(actor), Some(resource)) => (self.predicate)(engine, actor, resource),
			// Unreachable through the kind-keyed index.
			_ => Ok(false),
		}
	}
}

/// One registered rule.
pub struct Rule {
	actor: ActorKind,
	resource: ResourceKind,
	actions: Vec<Action>,
	predicate: Box<dyn ErasedPredicate>,
}

impl Rule {
	pub fn actor(&self) -> ActorKind {
		self.actor
	}

	pub fn resource(&self) -> ResourceKind {
		self.resource
	}

	/// Actions this rule governs, in the order they were registered.
	pub fn actions(&self) -> &[Action] {
		&self.actions
	}

	pub(crate) fn evaluate(
		&self,
		engine: &Engine,
		actor: Actor<'_>,
		resource: Resource<'_>,
	) -> Result<bool, PolicyError> {
		self.predicate.evaluate(engine, actor, resource)
	}
}

impl fmt::Debug for Rule {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Rule")
			.field("actor", &self.actor)
			.field("resource", &self.resource)
			.field("actions", &self.actions)
			.finish_non_exhaustive()
	}
}

/// Ordered collection of rules with a lookup index by triple.
#[derive(Debug, Default)]
pub struct RuleRegistry {
	rules: Vec<Rule>,
	index: HashMap<RuleKey, Vec<usize>>,
	duplicates: Vec<RuleKey>,
}

impl RuleRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers a predicate governing `actions` for actor type `A` on
	/// resource type `R`.
	///
	/// Registering a triple that is already governed is allowed (the rules
	/// are OR-combined) but is logged and recorded, since it usually signals
	/// a mistake.
	pub fn allow<A, R>(&mut self, actions: &[Action], predicate: Predicate<A, R>) -> &mut Self
	where
		A: ActorEntity,
		R: ResourceEntity,
	{
		let position = self.rules.len();
		for &action in actions {
			let key = RuleKey {
				actor: A::KIND,
				resource: R::KIND,
				action,
			};
			let entry = self.index.entry(key).or_default();
			if !entry.is_empty() {
				warn!(rule = %key, "rule registered more than once for the same triple");
				self.duplicates.push(key);
			}
			if entry.last() != Some(&position) {
				entry.push(position);
			}
		}
		self.rules.push(Rule {
			actor: A::KIND,
			resource: R::KIND,
			actions: actions.to_vec(),
			predicate: Box::new(TypedPredicate {
				predicate,
				_marker: PhantomData,
			}),
		});
		self
	}

	/// Returns the rules governing a triple, in registration order. Empty when
	/// nothing governs it.
	pub fn lookup(
		&self,
		actor: ActorKind,
		resource: ResourceKind,
		action: Action,
	) -> impl Iterator<Item = &Rule> + '_ {
		let key = RuleKey {
			actor,
			resource,
			action,
		};
		self
			.index
			.get(&key)
			.into_iter()
			.flatten()
			.map(|&position| &self.rules[position])
	}

	/// Returns true if at least one rule governs the triple.
	pub fn governs(&self, actor: ActorKind, resource: ResourceKind, action: Action) -> bool {
		self.lookup(actor, resource, action).next().is_some()
	}

	/// All rules in registration order.
	pub fn rules(&self) -> &[Rule] {
		&self.rules
	}

	/// Triples that were registered more than once.
	pub fn duplicates(&self) -> &[RuleKey] {
		&self.duplicates
	}

	pub fn len(&self) -> usize {
		self.rules.len()
	}

	pub fn is_empty(&self) -> bool {
		self.rules.is_empty()
	}
}
