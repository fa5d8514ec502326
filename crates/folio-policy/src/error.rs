// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for the decision engine.
//!
//! A denial is never an error: [`crate::Engine::can`] returns `Ok(false)`.
//! The errors here describe caller defects (a relation the rule needed was not
//! loaded) or registry misconfiguration.

use thiserror::Error;

use crate::types::{Action, ActorKind, ResourceKind};

/// Raised while evaluating a rule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolicyError {
	/// A rule dereferenced a relation the caller did not attach.
	#[error("precondition failed: {message}")]
	Precondition { message: String },
}

impl PolicyError {
	pub fn precondition(message: impl Into<String>) -> Self {
		Self::Precondition {
			message: message.into(),
		}
	}
}

/// Raised when a rule registry is handed to the engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
	/// The same (actor, resource, action) triple was registered more than once
	/// and duplicate rules are configured to be rejected.
	#[error("duplicate rule for {actor} {action} {resource}")]
	DuplicateRule {
		actor: ActorKind,
		resource: ResourceKind,
		action: Action,
	},
}

/// Outcome of [`crate::Engine::authorize`] when the action may not proceed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthorizeError {
	/// The actor is not permitted. User-facing as "forbidden".
	#[error("not permitted to {action} this {resource}")]
	Denied {
		action: Action,
		resource: ResourceKind,
	},

	/// The caller built the resource graph without a relation a rule needed.
	#[error(transparent)]
	Precondition(#[from] PolicyError),
}

impl AuthorizeError {
	/// Returns true if this error is a server-side defect rather than a
	/// legitimate access decision.
	pub fn is_caller_defect(&self) -> bool {
		matches!(self, AuthorizeError::Precondition(_))
	}
}
