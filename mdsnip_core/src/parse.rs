use markdown::ParseOptions;
use markdown::mdast::Node;
use markdown::to_mdast;

use crate::SnipError;
use crate::SnipResult;
use crate::tree::BufferId;
use crate::tree::NodeId;
use crate::tree::NodeKind;
use crate::tree::Span;
use crate::tree::SnippetTree;

/// Parse a full markdown document into a [`SnippetTree`] whose main buffer
/// is `source`.
pub fn parse_document(source: String) -> SnipResult<SnippetTree> {
	let mdast = to_mdast(&source, &ParseOptions::gfm())
		.map_err(|error| SnipError::Markdown(error.to_string()))?;
	let mut tree = SnippetTree::new(source);
	let root = tree.root();

	if let Some(children) = mdast.children() {
		for child in children {
			let id = add_subtree(&mut tree, child, BufferId::MAIN);
			tree.append_child(root, id);
		}
	}

	Ok(tree)
}

/// Parse `source` with the same grammar as the main document and return its
/// top-level nodes as a detached fragment, each node recording the new
/// buffer as its own.
///
/// The wrapper root the grammar produces is discarded; only its children
/// are returned, in order.
pub fn parse_fragment(tree: &mut SnippetTree, source: String) -> SnipResult<Vec<NodeId>> {
	let mdast = to_mdast(&source, &ParseOptions::gfm())
		.map_err(|error| SnipError::Markdown(error.to_string()))?;
	let buffer = tree.add_buffer(source);
	let mut fragment = vec![];

	if let Some(children) = mdast.children() {
		for child in children {
			fragment.push(add_subtree(tree, child, buffer));
		}
	}

	Ok(fragment)
}

fn add_subtree(tree: &mut SnippetTree, node: &Node, buffer: BufferId) -> NodeId {
	let id = tree.add_node(kind_of(node), span_of(node), buffer);

	if let Some(children) = node.children() {
		for child in children {
			let child_id = add_subtree(tree, child, buffer);
			tree.append_child(id, child_id);
		}
	}

	id
}

fn kind_of(node: &Node) -> NodeKind {
	match node {
		Node::Root(_) => NodeKind::Document,
		Node::Paragraph(_) => NodeKind::Paragraph,
		Node::Text(_) => NodeKind::Text,
		Node::Code(_) => NodeKind::CodeBlock,
		Node::Blockquote(_) => NodeKind::Blockquote,
		_ => NodeKind::Other,
	}
}

fn span_of(node: &Node) -> Option<Span> {
	node.position()
		.map(|position| Span::new(position.start.offset, position.end.offset))
}
