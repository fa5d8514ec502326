// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Containment checks over a collection's nested document structure.

use serde::{Deserialize, Serialize};

use crate::types::DocumentId;

/// One document in a collection's structure, with its nested children in
/// display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentTreeNode {
	pub id: DocumentId,
	#[serde(default)]
	pub title: String,
	#[serde(default)]
	pub url: String,
	#[serde(default)]
	pub children: Vec<DocumentTreeNode>,
}

impl DocumentTreeNode {
	/// Creates a node with no children.
	pub fn leaf(id: DocumentId) -> Self {
		Self {
			id,
			title: String::new(),
			url: String::new(),
			children: Vec::new(),
		}
	}

	/// Builder: set the children.
	pub fn with_children(mut self, children: Vec<DocumentTreeNode>) -> Self {
		self.children = children;
		self
	}

	pub fn has_children(&self) -> bool {
		!self.children.is_empty()
	}
}

/// Returns true if the node with id `target` appears in the forest and has at
/// least one child.
///
/// An absent target is treated like a leaf. The search is depth-first in
/// sibling order and stops at the first match; the matched node's subtree is
/// not searched further.
pub fn has_descendant(roots: &[DocumentTreeNode], target: DocumentId) -> bool {
	roots.iter().any(|node| {
		if node.id == target {
			node.has_children()
		} else {
			has_descendant(&node.children, target)
		}
	})
}

/// Finds the first node with the given id, depth-first in sibling order.
pub fn find(roots: &[DocumentTreeNode], target: DocumentId) -> Option<&DocumentTreeNode> {
	for node in roots {
		if node.id == target {
			return Some(node);
		}
		if let Some(found) = find(&node.children, target) {
			return Some(found);
		}
	}
	None
}
