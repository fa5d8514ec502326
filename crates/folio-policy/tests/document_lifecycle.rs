// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! End-to-end decisions against the standard engine: a document moving
//! through draft, published, archived and deleted, plus team administration.

use chrono::Utc;
use folio_policy::guard::{MISSING_COLLECTION, MISSING_TEAM};
use folio_policy::membership::{self, DemoteTo, MembershipError};
use folio_policy::{
	has_descendant, Action, ActorKind, AuthorizeError, Collection, CollectionPermission, Document,
	DocumentId, DocumentTreeNode, Engine, PolicyError, ResourceKind, Revision, Team, TeamId, User,
};
use proptest::prelude::*;

struct Workspace {
	engine: Engine,
	team: Team,
	admin: User,
	member: User,
	viewer: User,
	collection: Collection,
}

impl Workspace {
	fn new() -> Self {
		let team = Team::new("Acme");
		let collection = Collection::new(team.id, "Handbook").with_team(team.clone());
		Self {
			engine: Engine::standard(),
			admin: User::new(team.id).admin(),
			member: User::new(team.id),
			viewer: User::new(team.id).viewer(),
			collection,
			team,
		}
	}

	fn draft(&self) -> Document {
		Document::draft(self.team.id, self.member.id).in_collection(self.collection.clone())
	}

	fn allowed(&self, user: &User, action: Action, document: &Document) -> bool {
		self.engine
			.can(user, action, document)
			.expect("relations are loaded")
	}
}

#[test]
fn draft_to_published_to_archived_to_deleted() {
	let ws = Workspace::new();

	let draft = ws.draft();
	assert!(ws.allowed(&ws.member, Action::Update, &draft));
	assert!(!ws.allowed(&ws.member, Action::Pin, &draft));
	assert!(!ws.allowed(&ws.member, Action::Archive, &draft));
	assert!(ws.allowed(&ws.member, Action::Delete, &draft));

	let published = draft.published();
	assert!(ws.allowed(&ws.member, Action::Pin, &published));
	assert!(ws.allowed(&ws.member, Action::Move, &published));
	assert!(ws.allowed(&ws.member, Action::Archive, &published));
	assert!(!ws.allowed(&ws.member, Action::Unarchive, &published));
	assert!(!ws.allowed(&ws.member, Action::PinToHome, &published));
	assert!(ws.allowed(&ws.admin, Action::PinToHome, &published));

	let archived = published.archived();
	assert!(!ws.allowed(&ws.member, Action::Update, &archived));
	assert!(!ws.allowed(&ws.member, Action::Star, &archived));
	assert!(ws.allowed(&ws.member, Action::Unarchive, &archived));
	assert!(ws.allowed(&ws.member, Action::Read, &archived));

	let deleted = archived.deleted();
	assert!(!ws.allowed(&ws.member, Action::Delete, &deleted));
	assert!(!ws.allowed(&ws.member, Action::Unarchive, &deleted));
	assert!(ws.allowed(&ws.member, Action::Restore, &deleted));
	assert!(ws.allowed(&ws.member, Action::PermanentDelete, &deleted));
	assert!(!ws.allowed(&ws.viewer, Action::Restore, &deleted));
}

#[test]
fn viewers_read_but_never_write() {
	let ws = Workspace::new();
	let doc = ws.draft().published();
	assert!(ws.allowed(&ws.viewer, Action::Read, &doc));
	assert!(ws.allowed(&ws.viewer, Action::Download, &doc));
	for action in [
		Action::Update,
		Action::Move,
		Action::Pin,
		Action::Archive,
		Action::Delete,
		Action::Unpublish,
		Action::CreateChildDocument,
	] {
		assert!(!ws.allowed(&ws.viewer, action, &doc), "viewer allowed {action}");
	}
}

#[test]
fn unpublish_only_leaf_documents() {
	let ws = Workspace::new();
	let parent = ws.draft().published();
	let child = DocumentId::generate();
	let structure = vec![DocumentTreeNode::leaf(parent.id)
		.with_children(vec![DocumentTreeNode::leaf(child)])];
	assert!(has_descendant(&structure, parent.id));
	assert!(!has_descendant(&structure, child));

	let collection = ws.collection.clone().with_structure(structure);
	let parent = parent.in_collection(collection.clone());
	assert!(!ws.allowed(&ws.member, Action::Unpublish, &parent));

	let mut leaf = ws.draft().published().in_collection(collection);
	leaf.id = child;
	assert!(ws.allowed(&ws.member, Action::Unpublish, &leaf));
}

#[test]
fn missing_relations_fault_instead_of_denying() {
	let ws = Workspace::new();
	let doc = Document::draft(ws.team.id, ws.member.id)
		.in_unloaded_collection(ws.collection.id)
		.published();

	assert_eq!(
		ws.engine.can(&ws.member, Action::Update, &doc),
		Err(PolicyError::precondition(MISSING_COLLECTION))
	);
	let err = ws
		.engine
		.authorize(&ws.member, Action::Update, &doc)
		.expect_err("missing collection");
	assert!(err.is_caller_defect());

	let mut collection = ws.collection.clone();
	collection.team = None;
	let doc = ws.draft().published().in_collection(collection);
	assert_eq!(
		ws.engine.can(&ws.member, Action::Share, &doc),
		Err(PolicyError::precondition(MISSING_TEAM))
	);

	// Read tolerates the absent relation.
	let shared = Document::draft(ws.team.id, ws.member.id).published();
	assert!(ws.allowed(&ws.member, Action::Read, &shared));
}

#[test]
fn authorize_reports_denials() {
	let ws = Workspace::new();
	let doc = ws.draft().published();
	assert_eq!(ws.engine.authorize(&ws.member, Action::Read, &doc), Ok(()));
	assert_eq!(
		ws.engine.authorize(&ws.viewer, Action::Delete, &doc),
		Err(AuthorizeError::Denied {
			action: Action::Delete,
			resource: ResourceKind::Document,
		})
	);
}

#[test]
fn private_collection_membership_controls_document_access() {
	let ws = Workspace::new();
	let outsider = User::new(ws.team.id);
	let collection = ws
		.collection
		.clone()
		.with_permission(None)
		.with_member(ws.member.id, CollectionPermission::ReadWrite)
		.with_member(ws.viewer.id, CollectionPermission::Read);
	let doc = Document::draft(ws.team.id, ws.member.id)
		.in_collection(collection)
		.published();

	assert!(ws.allowed(&ws.member, Action::Update, &doc));
	assert!(ws.allowed(&ws.viewer, Action::Read, &doc));
	assert!(!ws.allowed(&ws.viewer, Action::Update, &doc));
	assert!(!ws.allowed(&outsider, Action::Read, &doc));
	assert!(ws.allowed(&ws.admin, Action::Read, &doc));
}

#[test]
fn documents_restore_only_their_own_revisions() {
	let ws = Workspace::new();
	let doc = ws.draft().published();
	let other = ws.draft();
	let revision = Revision::of(&doc);
	assert_eq!(ws.engine.can(&doc, Action::Restore, &revision), Ok(true));
	assert_eq!(ws.engine.can(&other, Action::Restore, &revision), Ok(false));
}

#[test]
fn last_admin_survives_demotion_attempts() {
	let ws = Workspace::new();
	let mut members = vec![ws.admin.clone(), ws.member.clone(), ws.viewer.clone()];

	assert_eq!(ws.engine.can(&ws.admin, Action::Demote, &ws.admin), Ok(true));
	assert_eq!(
		membership::demote_in(&mut members, ws.admin.id, DemoteTo::Member),
		Err(MembershipError::LastAdmin)
	);

	assert_eq!(ws.engine.can(&ws.admin, Action::Promote, &ws.member), Ok(true));
	membership::promote(&mut members[1]);
	assert_eq!(
		membership::demote_in(&mut members, ws.admin.id, DemoteTo::Viewer),
		Ok(())
	);
	assert!(!members[0].is_admin);
	assert!(members[1].is_admin);
}

#[test]
fn admins_demote_members_to_viewers() {
	let ws = Workspace::new();
	let mut members = vec![ws.admin.clone(), ws.member.clone()];
	let doc = ws.draft().published();

	assert_eq!(ws.engine.can(&ws.admin, Action::Demote, &ws.member), Ok(true));
	assert_eq!(
		membership::demote_in(&mut members, ws.member.id, DemoteTo::Viewer),
		Ok(())
	);
	assert!(members[1].is_viewer);
	assert!(!ws.allowed(&members[1], Action::Update, &doc));
	assert!(ws.allowed(&members[1], Action::Read, &doc));
}

#[test]
fn suspended_users_can_be_reactivated_by_admins() {
	let ws = Workspace::new();
	let mut member = ws.member.clone();
	member.suspended_at = Some(Utc::now());
	assert_eq!(ws.engine.can(&ws.admin, Action::Activate, &member), Ok(true));
	assert_eq!(ws.engine.can(&ws.member, Action::Activate, &member), Ok(false));
}

fn arb_action() -> impl Strategy<Value = Action> {
	prop::sample::select(Action::all().to_vec())
}

proptest! {
	#[test]
	fn ungoverned_triples_always_deny(action in arb_action()) {
		let ws = Workspace::new();
		let doc = ws.draft().published();
		let revision = Revision::of(&doc);
		let registry = ws.engine.registry();

		if !registry.governs(ActorKind::User, ResourceKind::Team, action) {
			prop_assert_eq!(ws.engine.can(&ws.admin, action, &ws.team), Ok(false));
		}
		if !registry.governs(ActorKind::User, ResourceKind::Collection, action) {
			prop_assert_eq!(ws.engine.can(&ws.admin, action, &ws.collection), Ok(false));
		}
		if !registry.governs(ActorKind::User, ResourceKind::Document, action) {
			prop_assert_eq!(ws.engine.can(&ws.admin, action, &doc), Ok(false));
		}
		if !registry.governs(ActorKind::Document, ResourceKind::Revision, action) {
			prop_assert_eq!(ws.engine.can(&doc, action, &revision), Ok(false));
		}
	}

	#[test]
	fn decisions_are_stable(action in arb_action(), pick in 0usize..3) {
		let ws = Workspace::new();
		let user = [&ws.admin, &ws.member, &ws.viewer][pick];
		let doc = ws.draft().published();
		let first = ws.engine.can(user, action, &doc);
		let second = ws.engine.can(user, action, &doc);
		prop_assert_eq!(first, second);
	}

	#[test]
	fn foreign_team_members_are_denied_every_document_action(
		action in arb_action(),
		admin in any::<bool>(),
	) {
		let ws = Workspace::new();
		let stranger = User::new(TeamId::generate());
		let stranger = if admin { stranger.admin() } else { stranger };
		let doc = ws.draft().published();
		prop_assert_eq!(ws.engine.can(&stranger, action, &doc), Ok(false));
	}

	#[test]
	fn viewers_never_write_in_any_lifecycle_state(
		published in any::<bool>(),
		archived in any::<bool>(),
		deleted in any::<bool>(),
		template in any::<bool>(),
	) {
		let ws = Workspace::new();
		let mut doc = ws.draft();
		if published {
			doc = doc.published();
		}
		if archived {
			doc = doc.archived();
		}
		if deleted {
			doc = doc.deleted();
		}
		if template {
			doc = doc.as_template();
		}
		for action in [
			Action::Update,
			Action::Move,
			Action::Pin,
			Action::Archive,
			Action::Unarchive,
			Action::Unpublish,
			Action::Delete,
			Action::PermanentDelete,
			Action::Restore,
		] {
			prop_assert_eq!(ws.engine.can(&ws.viewer, action, &doc), Ok(false));
		}
	}
}
