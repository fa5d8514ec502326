// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Team access policies.

use crate::engine::Engine;
use crate::error::PolicyError;
use crate::model::{Team, User};
use crate::registry::RuleRegistry;
use crate::types::Action;

pub fn register(registry: &mut RuleRegistry) {
	registry
		.allow(&[Action::Read], read)
		.allow(&[Action::Update], update)
		.allow(&[Action::Share], share)
		.allow(&[Action::CreateDocument], create_document)
		.allow(&[Action::CreateCollection], create_collection);
}

fn read(_: &Engine, user: &User, team: &Team) -> Result<bool, PolicyError> {
	Ok(user.team_id == team.id)
}

fn update(_: &Engine, user: &User, team: &Team) -> Result<bool, PolicyError> {
	Ok(user.is_admin && user.team_id == team.id)
}

fn share(_: &Engine, user: &User, team: &Team) -> Result<bool, PolicyError> {
	Ok(team.sharing && user.team_id == team.id)
}

fn create_document(_: &Engine, user: &User, team: &Team) -> Result<bool, PolicyError> {
	if user.is_viewer {
		return Ok(false);
	}
	Ok(user.team_id == team.id)
}

fn create_collection(_: &Engine, user: &User, team: &Team) -> Result<bool, PolicyError> {
	if user.is_viewer {
		return Ok(false);
	}
	Ok((user.is_admin || team.member_collection_create) && user.team_id == team.id)
}
