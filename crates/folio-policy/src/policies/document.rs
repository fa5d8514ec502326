// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Document access policies.
//!
//! A document's lifecycle is carried by three independent timestamps
//! (`published_at`, `archived_at`, `deleted_at`). Each rule first rejects the
//! lifecycle states the action makes no sense in, then delegates to the
//! owning collection, then applies the team gate.
//!
//! Rules that need the collection relation assert it was loaded through
//! [`guard::require_collection`]. `read`, `download`, `delete`,
//! `permanent_delete` and `restore` tolerate documents without a collection
//! and fall back to the team gate alone.

use crate::engine::Engine;
use crate::error::PolicyError;
use crate::guard;
use crate::model::{Document, User};
use crate::registry::RuleRegistry;
use crate::tree::has_descendant;
use crate::types::Action;

pub fn register(registry: &mut RuleRegistry) {
	registry
		.allow(&[Action::Read, Action::Download], read)
		.allow(&[Action::Star, Action::Unstar], star)
		.allow(&[Action::Share], share)
		.allow(&[Action::Update], update)
		.allow(&[Action::CreateChildDocument], create_child_document)
		.allow(&[Action::Move], move_document)
		.allow(&[Action::Pin, Action::Unpin], pin)
		.allow(&[Action::PinToHome], pin_to_home)
		.allow(&[Action::Delete], delete)
		.allow(&[Action::PermanentDelete], permanent_delete)
		.allow(&[Action::Restore], restore)
		.allow(&[Action::Archive], archive)
		.allow(&[Action::Unarchive], unarchive)
		.allow(&[Action::Unpublish], unpublish);
}

fn read(engine: &Engine, user: &User, document: &Document) -> Result<bool, PolicyError> {
	// Share links can resolve documents without their collection.
	if let Some(collection) = &document.collection {
		if engine.cannot(user, Action::Read, collection)? {
			return Ok(false);
		}
	}
	Ok(user.team_id == document.team_id)
}

fn star(engine: &Engine, user: &User, document: &Document) -> Result<bool, PolicyError> {
	if document.is_archived() || document.is_deleted() || document.template {
		return Ok(false);
	}
	let collection = guard::require_collection(document)?;
	if engine.cannot(user, Action::Read, collection)? {
		return Ok(false);
	}
	Ok(user.team_id == document.team_id)
}

fn share(engine: &Engine, user: &User, document: &Document) -> Result<bool, PolicyError> {
	if document.is_archived() || document.is_deleted() {
		return Ok(false);
	}
	let collection = guard::require_collection(document)?;
	if engine.cannot(user, Action::Share, collection)? {
		return Ok(false);
	}
	Ok(user.team_id == document.team_id)
}

fn update(engine: &Engine, user: &User, document: &Document) -> Result<bool, PolicyError> {
	if document.is_archived() || document.is_deleted() {
		return Ok(false);
	}
	let collection = guard::require_collection(document)?;
	if engine.cannot(user, Action::Update, collection)? {
		return Ok(false);
	}
	Ok(user.team_id == document.team_id)
}

fn create_child_document(
	engine: &Engine,
	user: &User,
	document: &Document,
) -> Result<bool, PolicyError> {
	if document.is_archived() || document.is_deleted() || document.template {
		return Ok(false);
	}
	if !document.is_published() {
		return Ok(false);
	}
	let collection = guard::require_collection(document)?;
	if engine.cannot(user, Action::Update, collection)? {
		return Ok(false);
	}
	Ok(user.team_id == document.team_id)
}

fn move_document(engine: &Engine, user: &User, document: &Document) -> Result<bool, PolicyError> {
	if document.is_archived() || document.is_deleted() || !document.is_published() {
		return Ok(false);
	}
	let collection = guard::require_collection(document)?;
	if engine.cannot(user, Action::Update, collection)? {
		return Ok(false);
	}
	Ok(user.team_id == document.team_id)
}

fn pin(engine: &Engine, user: &User, document: &Document) -> Result<bool, PolicyError> {
	if document.is_archived() || document.is_deleted() || document.template {
		return Ok(false);
	}
	if !document.is_published() {
		return Ok(false);
	}
	let collection = guard::require_collection(document)?;
	if engine.cannot(user, Action::Update, collection)? {
		return Ok(false);
	}
	Ok(user.team_id == document.team_id)
}

fn pin_to_home(_: &Engine, user: &User, document: &Document) -> Result<bool, PolicyError> {
	if document.is_archived() || document.is_deleted() || document.template {
		return Ok(false);
	}
	if !document.is_published() {
		return Ok(false);
	}
	Ok(user.team_id == document.team_id && user.is_admin)
}

fn delete(engine: &Engine, user: &User, document: &Document) -> Result<bool, PolicyError> {
	if user.is_viewer || document.is_deleted() {
		return Ok(false);
	}
	if let Some(collection) = &document.collection {
		if engine.cannot(user, Action::Update, collection)? {
			return Ok(false);
		}
	}
	// Unpublished drafts are always deletable by their team.
	if !document.is_published() && user.team_id == document.team_id {
		return Ok(true);
	}
	Ok(user.team_id == document.team_id)
}

fn permanent_delete(engine: &Engine, user: &User, document: &Document) -> Result<bool, PolicyError> {
	if user.is_viewer || !document.is_deleted() {
		return Ok(false);
	}
	if let Some(collection) = &document.collection {
		if engine.cannot(user, Action::Update, collection)? {
			return Ok(false);
		}
	}
	Ok(user.team_id == document.team_id)
}

fn restore(engine: &Engine, user: &User, document: &Document) -> Result<bool, PolicyError> {
	if user.is_viewer || !document.is_deleted() {
		return Ok(false);
	}
	if let Some(collection) = &document.collection {
		if engine.cannot(user, Action::Update, collection)? {
			return Ok(false);
		}
	}
	Ok(user.team_id == document.team_id)
}

fn archive(engine: &Engine, user: &User, document: &Document) -> Result<bool, PolicyError> {
	if !document.is_published() || document.is_archived() || document.is_deleted() {
		return Ok(false);
	}
	let collection = guard::require_collection(document)?;
	if engine.cannot(user, Action::Update, collection)? {
		return Ok(false);
	}
	Ok(user.team_id == document.team_id)
}

fn unarchive(engine: &Engine, user: &User, document: &Document) -> Result<bool, PolicyError> {
	let collection = guard::require_collection(document)?;
	if engine.cannot(user, Action::Update, collection)? {
		return Ok(false);
	}
	if !document.is_archived() || document.is_deleted() {
		return Ok(false);
	}
	Ok(user.team_id == document.team_id)
}

/// Only leaf documents may be unpublished, so no published child is left
/// without a published parent.
fn unpublish(engine: &Engine, user: &User, document: &Document) -> Result<bool, PolicyError> {
	let collection = guard::require_collection(document)?;
	if !document.is_published() || document.is_deleted() || document.is_archived() {
		return Ok(false);
	}
	if engine.cannot(user, Action::Update, collection)? {
		return Ok(false);
	}
	Ok(!has_descendant(&collection.document_structure, document.id)
		&& user.team_id == document.team_id)
}
