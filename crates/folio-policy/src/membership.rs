// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Role changes for team members.
//!
//! Policies decide whether an actor may attempt a change; the functions here
//! apply it and enforce the team-wide invariant that a team always keeps at
//! least one admin.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::model::User;
use crate::types::{MemberRole, UserId};

/// Errors raised when applying a role change.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MembershipError {
	/// The change would leave the team without an admin.
	#[error("at least one admin is required")]
	LastAdmin,

	/// The user is not among the given team members.
	#[error("user {0} is not a member of this team")]
	UnknownUser(UserId),
}

/// Role a user can be demoted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DemoteTo {
	Member,
	Viewer,
}

impl From<DemoteTo> for MemberRole {
	fn from(to: DemoteTo) -> Self {
		match to {
			DemoteTo::Member => MemberRole::Member,
			DemoteTo::Viewer => MemberRole::Viewer,
		}
	}
}

/// Moves a user to the member or viewer role. Admins lose their admin flag;
/// members can be demoted to viewer.
///
/// `other_admins` is the number of admins in the same team excluding `user`.
/// With none left the demotion is rejected, so the sole admin can never
/// demote themselves.
pub fn demote(user: &mut User, to: DemoteTo, other_admins: usize) -> Result<(), MembershipError> {
	if other_admins == 0 {
		warn!(user_id = %user.id, team_id = %user.team_id, "refusing to demote last admin");
		return Err(MembershipError::LastAdmin);
	}
	user.is_admin = false;
	user.is_viewer = matches!(to, DemoteTo::Viewer);
	info!(user_id = %user.id, role = %MemberRole::from(to), "user demoted");
	Ok(())
}

/// Demotes `user_id` within `members`, counting the other admins from the
/// same slice.
pub fn demote_in(
	members: &mut [User],
	user_id: UserId,
	to: DemoteTo,
) -> Result<(), MembershipError> {
	let other_admins = members
		.iter()
		.filter(|m| m.id != user_id && m.is_admin && !m.is_deleted())
		.count();
	match members.iter_mut().find(|m| m.id == user_id) {
		Some(user) => demote(user, to, other_admins),
		None => Err(MembershipError::UnknownUser(user_id)),
	}
}

/// Promotes a user to admin.
pub fn promote(user: &mut User) {
	user.is_admin = true;
	user.is_viewer = false;
	info!(user_id = %user.id, "user promoted");
}

/// Lifts a suspension.
pub fn activate(user: &mut User) {
	user.suspended_at = None;
}

/// Suspends a user now.
pub fn suspend(user: &mut User) {
	user.suspended_at = Some(Utc::now());
}

/// Member counts for a team, excluding deleted users.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMemberCounts {
	pub admins: usize,
	pub viewers: usize,
	pub all: usize,
	pub invited: usize,
	pub suspended: usize,
	pub active: usize,
}

impl TeamMemberCounts {
	pub fn from_users(users: &[User]) -> Self {
		users
			.iter()
			.filter(|u| !u.is_deleted())
			.fold(Self::default(), |mut counts, user| {
				counts.all += 1;
				if user.is_admin {
					counts.admins += 1;
				}
				if user.is_viewer {
					counts.viewers += 1;
				}
				if user.is_invited() {
					counts.invited += 1;
				}
				if user.is_suspended() {
					counts.suspended += 1;
				} else if !user.is_invited() {
					counts.active += 1;
				}
				counts
			})
	}
}
