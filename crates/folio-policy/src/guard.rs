// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Precondition checks for rules that dereference pre-loaded relations.
//!
//! A failed precondition means the calling layer built the resource graph
//! without a relation the rule needs. It is reported as
//! [`PolicyError::Precondition`] and must never be folded into a denial.

use tracing::error;

use crate::error::PolicyError;
use crate::model::{Collection, Document, Team};

pub const MISSING_COLLECTION: &str =
	"collection is missing, did you forget to include it in the query scope?";
pub const MISSING_TEAM: &str = "team is missing, did you forget to include it in the query scope?";

/// Fails with a precondition fault when `condition` is false.
pub fn require(condition: bool, message: &str) -> Result<(), PolicyError> {
	if condition {
		Ok(())
	} else {
		Err(fault(message))
	}
}

/// Returns the document's collection relation, failing if it was not loaded.
pub fn require_collection(document: &Document) -> Result<&Collection, PolicyError> {
	document
		.collection
		.as_ref()
		.ok_or_else(|| fault(MISSING_COLLECTION))
}

/// Returns the collection's team relation, failing if it was not loaded.
pub fn require_team(collection: &Collection) -> Result<&Team, PolicyError> {
	collection.team.as_ref().ok_or_else(|| fault(MISSING_TEAM))
}

fn fault(message: &str) -> PolicyError {
	error!(message, "policy precondition failed");
	PolicyError::precondition(message)
}
