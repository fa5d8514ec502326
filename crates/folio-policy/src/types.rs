// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Core type definitions shared by the decision engine and its rule families.
//!
//! - **ID newtypes**: Type-safe wrappers around UUIDs for every entity the
//!   engine reasons about ([`UserId`], [`TeamId`], [`DocumentId`], etc.)
//! - **Role enums**: [`MemberRole`] within a team and [`CollectionPermission`]
//!   for collection-wide or per-member grants
//! - **Kinds**: [`ActorKind`] and [`ResourceKind`], the tags the rule registry
//!   is keyed by
//! - **Actions**: [`Action`], every operation a rule can govern
//!
//! The team is the tenant boundary: every entity carries the [`TeamId`] it
//! belongs to.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

// =============================================================================
// ID Newtypes
// =============================================================================

macro_rules! define_id_type {
	($name:ident, $doc:expr) => {
		#[doc = $doc]
		#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
		#[serde(transparent)]
		pub struct $name(Uuid);

		impl $name {
			/// Create a new ID from a UUID.
			pub fn new(id: Uuid) -> Self {
				Self(id)
			}

			/// Generate a new random ID.
			pub fn generate() -> Self {
				Self(Uuid::new_v4())
			}

			/// Get the inner UUID value.
			pub fn into_inner(self) -> Uuid {
				self.0
			}
		}

		impl fmt::Display for $name {
			fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
				write!(f, "{}", self.0)
			}
		}

		impl From<Uuid> for $name {
			fn from(id: Uuid) -> Self {
				Self(id)
			}
		}
	};
}

define_id_type!(UserId, "Unique identifier for a user.");
define_id_type!(TeamId, "Unique identifier for a team (the tenant).");
define_id_type!(CollectionId, "Unique identifier for a collection.");
define_id_type!(DocumentId, "Unique identifier for a document.");
define_id_type!(RevisionId, "Unique identifier for a document revision.");

// =============================================================================
// Roles
// =============================================================================

/// A user's role within their team, derived from the admin and viewer flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberRole {
	/// Manages members, settings and every collection.
	Admin,
	/// Standard member access.
	Member,
	/// Read-only access; may never mutate content.
	Viewer,
}

impl fmt::Display for MemberRole {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			MemberRole::Admin => write!(f, "admin"),
			MemberRole::Member => write!(f, "member"),
			MemberRole::Viewer => write!(f, "viewer"),
		}
	}
}

/// Access level granted on a collection, either team-wide or to one member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollectionPermission {
	Read,
	ReadWrite,
}

impl CollectionPermission {
	/// Returns true if this permission allows modifying the collection's documents.
	pub fn allows_write(&self) -> bool {
		matches!(self, CollectionPermission::ReadWrite)
	}
}

// =============================================================================
// Kinds
// =============================================================================

/// Kinds of entity that can request an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActorKind {
	User,
	Document,
}

impl fmt::Display for ActorKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			ActorKind::User => write!(f, "user"),
			ActorKind::Document => write!(f, "document"),
		}
	}
}

/// Kinds of entity that can be the target of an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
	Team,
	Collection,
	Document,
	Revision,
	User,
}

impl fmt::Display for ResourceKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			ResourceKind::Team => write!(f, "team"),
			ResourceKind::Collection => write!(f, "collection"),
			ResourceKind::Document => write!(f, "document"),
			ResourceKind::Revision => write!(f, "revision"),
			ResourceKind::User => write!(f, "user"),
		}
	}
}

// =============================================================================
// Actions
// =============================================================================

macro_rules! define_actions {
	($($variant:ident => $name:literal),+ $(,)?) => {
		/// Actions that rules can govern.
		#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
		#[serde(rename_all = "snake_case")]
		pub enum Action {
			$($variant,)+
		}

		impl Action {
			/// Returns every action, in declaration order.
			pub fn all() -> &'static [Action] {
				&[$(Action::$variant,)+]
			}

			/// Returns the snake_case wire name of this action.
			pub fn as_str(&self) -> &'static str {
				match self {
					$(Action::$variant => $name,)+
				}
			}
		}

		impl FromStr for Action {
			type Err = UnknownAction;

			fn from_str(s: &str) -> Result<Self, Self::Err> {
				match s {
					$($name => Ok(Action::$variant),)+
					other => Err(UnknownAction(other.to_string())),
				}
			}
		}
	};
}

define_actions! {
	Read => "read",
	Download => "download",
	Update => "update",
	Share => "share",
	Star => "star",
	Unstar => "unstar",
	Move => "move",
	CreateDocument => "create_document",
	CreateChildDocument => "create_child_document",
	CreateCollection => "create_collection",
	Pin => "pin",
	Unpin => "unpin",
	PinToHome => "pin_to_home",
	Archive => "archive",
	Unarchive => "unarchive",
	Unpublish => "unpublish",
	Delete => "delete",
	PermanentDelete => "permanent_delete",
	Restore => "restore",
	Promote => "promote",
	Demote => "demote",
	Suspend => "suspend",
	Activate => "activate",
}

impl fmt::Display for Action {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Returned when parsing an action name that no rule family knows about.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown action `{0}`")]
pub struct UnknownAction(pub String);
