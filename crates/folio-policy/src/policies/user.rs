// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Policies for users acting on other users of their team.
//!
//! These rules only decide whether the actor may attempt a role change. The
//! team-wide invariant that at least one admin remains is enforced when the
//! change is applied, see [`crate::membership`].

use crate::engine::Engine;
use crate::error::PolicyError;
use crate::model::User;
use crate::registry::RuleRegistry;
use crate::types::Action;

pub fn register(registry: &mut RuleRegistry) {
	registry
		.allow(&[Action::Read], read)
		.allow(&[Action::Update, Action::Delete], update)
		.allow(&[Action::Promote, Action::Suspend], manage_other)
		.allow(&[Action::Demote], demote)
		.allow(&[Action::Activate], activate);
}

fn read(_: &Engine, actor: &User, user: &User) -> Result<bool, PolicyError> {
	Ok(actor.team_id == user.team_id)
}

fn update(_: &Engine, actor: &User, user: &User) -> Result<bool, PolicyError> {
	Ok((actor.id == user.id || actor.is_admin) && actor.team_id == user.team_id)
}

fn manage_other(_: &Engine, actor: &User, user: &User) -> Result<bool, PolicyError> {
	if actor.id == user.id {
		return Ok(false);
	}
	Ok(actor.is_admin && actor.team_id == user.team_id)
}

/// Admins may demote anyone in their team, themselves included. Demoting a
/// member moves them to viewer.
fn demote(_: &Engine, actor: &User, user: &User) -> Result<bool, PolicyError> {
	Ok(actor.is_admin && actor.team_id == user.team_id)
}

fn activate(_: &Engine, actor: &User, user: &User) -> Result<bool, PolicyError> {
	if !user.is_suspended() {
		return Ok(false);
	}
	Ok(actor.is_admin && actor.team_id == user.team_id)
}
