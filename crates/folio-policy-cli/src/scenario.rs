// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! JSON scenarios: one actor, one action and one hydrated resource graph.
//!
//! ```json
//! {
//!   "actor": { "user": { "id": "...", "teamId": "...", "createdAt": "..." } },
//!   "action": "unpublish",
//!   "resource": { "document": { "id": "...", "collection": { ... } } }
//! }
//! ```

use std::path::Path;

use anyhow::Context;
use folio_policy::{
	Action, Actor, Collection, Document, Engine, PolicyError, Resource, Revision, Team, User,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioActor {
	User(User),
	Document(Document),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioResource {
	Team(Team),
	Collection(Collection),
	Document(Document),
	Revision(Revision),
	User(User),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
	pub actor: ScenarioActor,
	pub action: Action,
	pub resource: ScenarioResource,
}

/// Result of evaluating a scenario.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
	Allowed,
	Denied,
	Fault(PolicyError),
}

impl Outcome {
	pub fn exit_code(&self) -> u8 {
		match self {
			Self::Allowed => 0,
			Self::Denied => 1,
			Self::Fault(_) => 2,
		}
	}
}

impl Scenario {
	pub fn from_path(path: &Path) -> anyhow::Result<Self> {
		let content = std::fs::read_to_string(path)
			.with_context(|| format!("failed to read scenario {}", path.display()))?;
		serde_json::from_str(&content)
			.with_context(|| format!("failed to parse scenario {}", path.display()))
	}

	pub fn actor(&self) -> Actor<'_> {
		match &self.actor {
			ScenarioActor::User(user) => Actor::User(user),
			ScenarioActor::Document(document) => Actor::Document(document),
		}
	}

	pub fn resource(&self) -> Resource<'_> {
		match &self.resource {
			ScenarioResource::Team(team) => Resource::Team(team),
			ScenarioResource::Collection(collection) => Resource::Collection(collection),
			ScenarioResource::Document(document) => Resource::Document(document),
			ScenarioResource::Revision(revision) => Resource::Revision(revision),
			ScenarioResource::User(user) => Resource::User(user),
		}
	}

	#[instrument(skip(self, engine), fields(action = %self.action))]
	pub fn evaluate(&self, engine: &Engine) -> Outcome {
		let outcome = match engine.can(self.actor(), self.action, self.resource()) {
			Ok(true) => Outcome::Allowed,
			Ok(false) => Outcome::Denied,
			Err(err) => Outcome::Fault(err),
		};
		debug!(?outcome, "scenario evaluated");
		outcome
	}
}
