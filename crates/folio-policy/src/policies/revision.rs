// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Revision policies. Here the document is the actor: a document may only be
//! restored to one of its own revisions.

use crate::engine::Engine;
use crate::error::PolicyError;
use crate::model::{Document, Revision};
use crate::registry::RuleRegistry;
use crate::types::Action;

pub fn register(registry: &mut RuleRegistry) {
	registry.allow(&[Action::Restore], restore);
}

fn restore(_: &Engine, document: &Document, revision: &Revision) -> Result<bool, PolicyError> {
	Ok(document.id == revision.document_id && document.team_id == revision.team_id)
}
