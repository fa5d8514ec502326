// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Authorization decisions for Folio.
//!
//! This crate answers one question: may this actor perform this action on this
//! resource? Decisions are pure functions of hydrated entities. The crate does
//! no I/O and keeps no state between calls.
//!
//! # Overview
//!
//! - [`RuleRegistry`] maps (actor kind, resource kind, action) to rules.
//! - [`Engine`] evaluates them: no rule denies, any granting rule allows.
//! - [`guard`] turns a relation the caller forgot to load into a
//!   [`PolicyError`] instead of a silent denial.
//! - [`policies`] holds the built-in rule families.
//! - [`membership`] applies role changes and keeps at least one admin per team.
//!
//! # Example
//!
//! ```
//! use folio_policy::{Action, Collection, Document, Engine, Team, User};
//!
//! let engine = Engine::standard();
//! let team = Team::new("Acme");
//! let user = User::new(team.id);
//! let collection = Collection::new(team.id, "Handbook").with_team(team.clone());
//! let document = Document::draft(team.id, user.id)
//! 	.in_collection(collection)
//! 	.published();
//!
//! assert_eq!(engine.can(&user, Action::Read, &document), Ok(true));
//! assert_eq!(engine.can(&user.clone().viewer(), Action::Delete, &document), Ok(false));
//! ```

pub mod engine;
pub mod entity;
pub mod error;
pub mod guard;
pub mod membership;
pub mod model;
pub mod policies;
pub mod registry;
pub mod tree;
pub mod types;

pub use engine::{Engine, EngineSettings};
pub use entity::{Actor, ActorEntity, Resource, ResourceEntity};
pub use error::{AuthorizeError, PolicyError, RegistryError};
pub use membership::{DemoteTo, MembershipError, TeamMemberCounts};
pub use model::{Collection, CollectionMembership, Document, DocumentState, Revision, Team, User};
pub use registry::{Predicate, Rule, RuleKey, RuleRegistry};
pub use tree::{has_descendant, DocumentTreeNode};
pub use types::{
	Action, ActorKind, CollectionId, CollectionPermission, DocumentId, MemberRole, ResourceKind,
	RevisionId, TeamId, UnknownAction, UserId,
};
