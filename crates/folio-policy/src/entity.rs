// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Tagged views over the entities that take part in a decision.
//!
//! [`Actor`] and [`Resource`] borrow a hydrated entity and carry its kind, so
//! the registry can select rules by an explicit enum pair. The
//! [`ActorEntity`] and [`ResourceEntity`] traits tie each concrete type to its
//! kind and let typed rule predicates be stored behind one erased signature.

use crate::model::{Collection, Document, Revision, Team, User};
use crate::types::{ActorKind, ResourceKind, TeamId};

/// The entity requesting permission.
#[derive(Debug, Clone, Copy)]
pub enum Actor<'a> {
	User(&'a User),
	Document(&'a Document),
}

impl Actor<'_> {
	pub fn kind(&self) -> ActorKind {
		match self {
			Actor::User(_) => ActorKind::User,
			Actor::Document(_) => ActorKind::Document,
		}
	}

	/// The team the actor belongs to.
	pub fn team_id(&self) -> TeamId {
		match self {
			Actor::User(user) => user.team_id,
			Actor::Document(document) => document.team_id,
		}
	}
}

/// The entity being acted upon.
#[derive(Debug, Clone, Copy)]
pub enum Resource<'a> {
	Team(&'a Team),
	Collection(&'a Collection),
	Document(&'a Document),
	Revision(&'a Revision),
	User(&'a User),
}

impl Resource<'_> {
	pub fn kind(&self) -> ResourceKind {
		match self {
			Resource::Team(_) => ResourceKind::Team,
			Resource::Collection(_) => ResourceKind::Collection,
			Resource::Document(_) => ResourceKind::Document,
			Resource::Revision(_) => ResourceKind::Revision,
			Resource::User(_) => ResourceKind::User,
		}
	}

	/// The team the resource belongs to. For a team, its own id.
	pub fn team_id(&self) -> TeamId {
		match self {
			Resource::Team(team) => team.id,
			Resource::Collection(collection) => collection.team_id,
			Resource::Document(document) => document.team_id,
			Resource::Revision(revision) => revision.team_id,
			Resource::User(user) => user.team_id,
		}
	}
}

/// A concrete type that can act in a rule.
pub trait ActorEntity: 'static {
	const KIND: ActorKind;

	fn from_actor<'a>(actor: Actor<'a>) -> Option<&'a Self>;
}

/// A concrete type that can be the target of a rule.
pub trait ResourceEntity: 'static {
	const KIND: ResourceKind;

	fn from_resource<'a>(resource: Resource<'a>) -> Option<&'a Self>;
}

macro_rules! impl_actor {
	($ty:ident) => {
		impl ActorEntity for $ty {
			const KIND: ActorKind = ActorKind::$ty;

			fn from_actor<'a>(actor: Actor<'a>) -> Option<&'a Self> {
				match actor {
					Actor::$ty(inner) => Some(inner),
					_ => None,
				}
			}
		}

		impl<'a> From<&'a $ty> for Actor<'a> {
			fn from(inner: &'a $ty) -> Self {
				Actor::$ty(inner)
			}
		}
	};
}

macro_rules! impl_resource {
	($ty:ident) => {
		impl ResourceEntity for $ty {
			const KIND: ResourceKind = ResourceKind::$ty;

			fn from_resource<'a>(resource: Resource<'a>) -> Option<&'a Self> {
				match resource {
					Resource::$ty(inner) => Some(inner),
					_ => None,
				}
			}
		}

		impl<'a> From<&'a $ty> for Resource<'a> {
			fn from(inner: &'a $ty) -> Self {
				Resource::$ty(inner)
			}
		}
	};
}

impl_actor!(User);
impl_actor!(Document);

impl_resource!(Team);
impl_resource!(Collection);
impl_resource!(Document);
impl_resource!(Revision);
impl_resource!(User);
