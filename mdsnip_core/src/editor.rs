//! Two-phase tree editing.
//!
//! The scan over the document only ever *records* edits; the tree is not
//! touched until the whole walk has completed. This keeps sibling and
//! parent links valid for nodes the walk has not reached yet, and makes
//! the apply step a single place where mutation happens.

use crate::tree::NodeId;
use crate::tree::NodeKind;
use crate::tree::SnippetTree;

/// One fragment queued to be spliced in front of an anchor node.
#[derive(Debug)]
pub struct Insertion {
	/// The paragraph the directive occupied; fragment nodes land before it.
	pub anchor: NodeId,
	/// Top-level nodes of the fragment, in order.
	pub nodes: Vec<NodeId>,
}

/// Edits collected during one traversal, applied exactly once afterwards.
///
/// Insertions are applied first, in collection order, then removals, in
/// collection order. Removals run last so every anchor is still attached
/// when its insertions execute.
#[derive(Debug, Default)]
pub struct EditPlan {
	insertions: Vec<Insertion>,
	removals: Vec<NodeId>,
}

impl EditPlan {
	pub fn new() -> Self {
		Self::default()
	}

	/// Queue a fragment to be spliced immediately before `anchor`.
	pub fn insert_before(&mut self, anchor: NodeId, nodes: Vec<NodeId>) {
		self.insertions.push(Insertion { anchor, nodes });
	}

	/// Queue a node for removal once the walk completes.
	pub fn remove(&mut self, node: NodeId) {
		self.removals.push(node);
	}

	pub fn is_empty(&self) -> bool {
		self.insertions.is_empty() && self.removals.is_empty()
	}

	/// Apply all recorded edits to the tree, consuming the plan.
	pub fn apply(self, tree: &mut SnippetTree) {
		tracing::debug!(
			insertions = self.insertions.len(),
			removals = self.removals.len(),
			"applying edit plan"
		);

		for insertion in self.insertions {
			for node in insertion.nodes {
				tree.insert_before(insertion.anchor, node);
			}
		}

		for node in self.removals {
			tree.detach(node);
		}
	}
}

/// Record the removals a handled directive leaves behind.
///
/// The blockquote immediately above the paragraph goes first, and only
/// when the directive inserted nothing: a quote introducing an example
/// survives an injection, but a directive that matched nothing would
/// leave it dangling, so the two are cleaned up together. The paragraph
/// itself goes second. Both removals honor their keep flag.
pub fn record_directive_cleanup(
	plan: &mut EditPlan,
	tree: &SnippetTree,
	paragraph: NodeId,
	inserted: usize,
	keep_tags: bool,
	keep_quotes: bool,
) {
	if !keep_quotes && inserted == 0 {
		if let Some(previous) = tree.prev_sibling(paragraph) {
			if tree.kind(previous) == NodeKind::Blockquote {
				plan.remove(previous);
			}
		}
	}

	if !keep_tags {
		plan.remove(paragraph);
	}
}
