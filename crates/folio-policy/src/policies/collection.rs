// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Collection access policies.

use crate::engine::Engine;
use crate::error::PolicyError;
use crate::guard;
use crate::model::{Collection, User};
use crate::registry::RuleRegistry;
use crate::types::Action;

pub fn register(registry: &mut RuleRegistry) {
	registry
		.allow(&[Action::Read], read)
		.allow(&[Action::Update], update)
		.allow(&[Action::Share], share)
		.allow(&[Action::CreateDocument], create_document);
}

/// Team-wide collections are readable by the whole team; private ones only by
/// their members and admins.
fn read(_: &Engine, user: &User, collection: &Collection) -> Result<bool, PolicyError> {
	if collection.deleted_at.is_some() {
		return Ok(false);
	}
	let visible = user.is_admin
		|| collection.permission.is_some()
		|| collection.membership_for(user.id).is_some();
	Ok(visible && user.team_id == collection.team_id)
}

/// An explicit read-write membership outranks the viewer role; otherwise
/// viewers never write.
fn update(_: &Engine, user: &User, collection: &Collection) -> Result<bool, PolicyError> {
	if collection.deleted_at.is_some() {
		return Ok(false);
	}
	let writable = if user.is_admin {
		true
	} else if let Some(permission) = collection.membership_for(user.id) {
		permission.allows_write()
	} else if user.is_viewer {
		false
	} else {
		collection
			.permission
			.map(|p| p.allows_write())
			.unwrap_or(false)
	};
	Ok(writable && user.team_id == collection.team_id)
}

fn share(engine: &Engine, user: &User, collection: &Collection) -> Result<bool, PolicyError> {
	if collection.deleted_at.is_some() || !collection.sharing {
		return Ok(false);
	}
	let team = guard::require_team(collection)?;
	if engine.cannot(user, Action::Share, team)? {
		return Ok(false);
	}
	if engine.cannot(user, Action::Read, collection)? {
		return Ok(false);
	}
	Ok(user.team_id == collection.team_id)
}

fn create_document(engine: &Engine, user: &User, collection: &Collection) -> Result<bool, PolicyError> {
	if collection.archived_at.is_some() {
		return Ok(false);
	}
	engine.can(user, Action::Update, collection)
}
