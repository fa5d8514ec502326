// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Hydrated entities the decision engine reasons about.
//!
//! The persistence layer builds these per request with whatever relations the
//! requested action needs already attached. Relations only point towards the
//! parent (document -> collection -> team), so any chain of rules that follows
//! them terminates after a fixed number of hops.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::tree::DocumentTreeNode;
use crate::types::{
	CollectionId, CollectionPermission, DocumentId, MemberRole, RevisionId, TeamId, UserId,
};

/// A member of a team. Acts on resources and can itself be a resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
	pub id: UserId,
	pub team_id: TeamId,
	#[serde(default)]
	pub is_admin: bool,
	#[serde(default)]
	pub is_viewer: bool,
	#[serde(default)]
	pub suspended_at: Option<DateTime<Utc>>,
	#[serde(default)]
	pub last_active_at: Option<DateTime<Utc>>,
	#[serde(default)]
	pub deleted_at: Option<DateTime<Utc>>,
	pub created_at: DateTime<Utc>,
}

impl User {
	/// Creates an active member of the given team with no elevated flags.
	pub fn new(team_id: TeamId) -> Self {
		let now = Utc::now();
		Self {
			id: UserId::generate(),
			team_id,
			is_admin: false,
			is_viewer: false,
			suspended_at: None,
			last_active_at: Some(now),
			deleted_at: None,
			created_at: now,
		}
	}

	/// Builder: mark as team admin.
	pub fn admin(mut self) -> Self {
		self.is_admin = true;
		self.is_viewer = false;
		self
	}

	/// Builder: mark as read-only viewer.
	pub fn viewer(mut self) -> Self {
		self.is_admin = false;
		self.is_viewer = true;
		self
	}

	/// Returns the role implied by the admin and viewer flags.
	pub fn role(&self) -> MemberRole {
		if self.is_admin {
			MemberRole::Admin
		} else if self.is_viewer {
			MemberRole::Viewer
		} else {
			MemberRole::Member
		}
	}

	pub fn is_suspended(&self) -> bool {
		self.suspended_at.is_some()
	}

	/// Returns true if the user was invited but never signed in.
	pub fn is_invited(&self) -> bool {
		self.last_active_at.is_none()
	}

	pub fn is_deleted(&self) -> bool {
		self.deleted_at.is_some()
	}
}

/// A team: the tenant that owns users, collections and documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
	pub id: TeamId,
	pub name: String,
	/// Whether documents may be shared publicly outside the team.
	#[serde(default = "default_true")]
	pub sharing: bool,
	/// Whether non-admin members may create collections.
	#[serde(default = "default_true")]
	pub member_collection_create: bool,
	pub created_at: DateTime<Utc>,
}

impl Team {
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			id: TeamId::generate(),
			name: name.into(),
			sharing: true,
			member_collection_create: true,
			created_at: Utc::now(),
		}
	}
}

/// An explicit grant of a collection permission to one user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionMembership {
	pub user_id: UserId,
	pub permission: CollectionPermission,
}

/// A collection groups documents into a tree within a team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collection {
	pub id: CollectionId,
	pub team_id: TeamId,
	pub name: String,
	/// Team-wide permission; `None` makes the collection private to its members.
	#[serde(default)]
	pub permission: Option<CollectionPermission>,
	#[serde(default)]
	pub memberships: Vec<CollectionMembership>,
	#[serde(default = "default_true")]
	pub sharing: bool,
	/// Nested layout of the collection's published documents.
	#[serde(default)]
	pub document_structure: Vec<DocumentTreeNode>,
	#[serde(default)]
	pub archived_at: Option<DateTime<Utc>>,
	#[serde(default)]
	pub deleted_at: Option<DateTime<Utc>>,
	/// Owning team relation, when loaded.
	#[serde(default)]
	pub team: Option<Team>,
}

impl Collection {
	/// Creates a team-wide read-write collection with an empty structure.
	pub fn new(team_id: TeamId, name: impl Into<String>) -> Self {
		Self {
			id: CollectionId::generate(),
			team_id,
			name: name.into(),
			permission: Some(CollectionPermission::ReadWrite),
			memberships: Vec::new(),
			sharing: true,
			document_structure: Vec::new(),
			archived_at: None,
			deleted_at: None,
			team: None,
		}
	}

	/// Builder: set the team-wide permission.
	pub fn with_permission(mut self, permission: Option<CollectionPermission>) -> Self {
		self.permission = permission;
		self
	}

	/// Builder: grant a permission to one user.
	pub fn with_member(mut self, user_id: UserId, permission: CollectionPermission) -> Self {
		self.memberships.push(CollectionMembership {
			user_id,
			permission,
		});
		self
	}

	/// Builder: set the document structure.
	pub fn with_structure(mut self, structure: Vec<DocumentTreeNode>) -> Self {
		self.document_structure = structure;
		self
	}

	/// Builder: attach the owning team relation.
	pub fn with_team(mut self, team: Team) -> Self {
		self.team = Some(team);
		self
	}

	/// Returns the permission explicitly granted to a user, if any.
	pub fn membership_for(&self, user_id: UserId) -> Option<CollectionPermission> {
		self
			.memberships
			.iter()
			.find(|m| m.user_id == user_id)
			.map(|m| m.permission)
	}
}

/// Visible lifecycle state derived from a document's timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentState {
	Draft,
	Published,
	Archived,
	Deleted,
}

/// A document, optionally with its collection relation loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
	pub id: DocumentId,
	pub team_id: TeamId,
	#[serde(default)]
	pub collection_id: Option<CollectionId>,
	pub created_by_id: UserId,
	#[serde(default)]
	pub template: bool,
	#[serde(default)]
	pub published_at: Option<DateTime<Utc>>,
	#[serde(default)]
	pub archived_at: Option<DateTime<Utc>>,
	#[serde(default)]
	pub deleted_at: Option<DateTime<Utc>>,
	pub created_at: DateTime<Utc>,
	pub updated_at: DateTime<Utc>,
	/// Owning collection relation, when loaded.
	#[serde(default)]
	pub collection: Option<Collection>,
}

impl Document {
	/// Creates an unpublished draft in the given team, outside any collection.
	pub fn draft(team_id: TeamId, created_by_id: UserId) -> Self {
		let now = Utc::now();
		Self {
			id: DocumentId::generate(),
			team_id,
			collection_id: None,
			created_by_id,
			template: false,
			published_at: None,
			archived_at: None,
			deleted_at: None,
			created_at: now,
			updated_at: now,
			collection: None,
		}
	}

	/// Builder: place the document in a collection and attach the relation.
	pub fn in_collection(mut self, collection: Collection) -> Self {
		self.collection_id = Some(collection.id);
		self.collection = Some(collection);
		self
	}

	/// Builder: place the document in a collection without loading the relation.
	pub fn in_unloaded_collection(mut self, collection_id: CollectionId) -> Self {
		self.collection_id = Some(collection_id);
		self.collection = None;
		self
	}

	/// Builder: mark as published now.
	pub fn published(mut self) -> Self {
		self.published_at = Some(Utc::now());
		self
	}

	/// Builder: mark as archived now.
	pub fn archived(mut self) -> Self {
		self.archived_at = Some(Utc::now());
		self
	}

	/// Builder: mark as soft-deleted now.
	pub fn deleted(mut self) -> Self {
		self.deleted_at = Some(Utc::now());
		self
	}

	/// Builder: mark as template.
	pub fn as_template(mut self) -> Self {
		self.template = true;
		self
	}

	pub fn is_published(&self) -> bool {
		self.published_at.is_some()
	}

	pub fn is_archived(&self) -> bool {
		self.archived_at.is_some()
	}

	pub fn is_deleted(&self) -> bool {
		self.deleted_at.is_some()
	}

	/// Returns the visible lifecycle state. Deletion wins over archival, which
	/// wins over publication.
	pub fn lifecycle(&self) -> DocumentState {
		if self.is_deleted() {
			DocumentState::Deleted
		} else if self.is_archived() {
			DocumentState::Archived
		} else if self.is_published() {
			DocumentState::Published
		} else {
			DocumentState::Draft
		}
	}
}

/// A saved revision of a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Revision {
	pub id: RevisionId,
	pub document_id: DocumentId,
	pub team_id: TeamId,
	pub created_at: DateTime<Utc>,
}

impl Revision {
	/// Creates a revision of the given document.
	pub fn of(document: &Document) -> Self {
		Self {
			id: RevisionId::generate(),
			document_id: document.id,
			team_id: document.team_id,
			created_at: Utc::now(),
		}
	}
}

fn default_true() -> bool {
	true
}
