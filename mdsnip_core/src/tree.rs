//! Arena document tree.
//!
//! Nodes are addressed by stable [`NodeId`] indices, so edits collected
//! during a traversal can be applied afterwards without invalidating
//! anything the walk still holds. Every node records the [`BufferId`] its
//! byte ranges are measured against; the main document is buffer zero and
//! each injected file contributes its own buffer.

/// Stable handle to a node in a [`SnippetTree`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct NodeId(usize);

/// Handle to one of the byte buffers a tree renders from.
///
/// [`BufferId::MAIN`] is the buffer the host document was parsed from.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct BufferId(usize);

impl BufferId {
	/// The host document's own buffer.
	pub const MAIN: BufferId = BufferId(0);
}

/// Byte range into the buffer a node was parsed from.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Span {
	pub start: usize,
	pub end: usize,
}

impl Span {
	pub fn new(start: usize, end: usize) -> Self {
		Self { start, end }
	}
}

/// The node kinds the injection engine distinguishes.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum NodeKind {
	/// The document root.
	Document,
	/// A paragraph; the only container a directive is honored in.
	Paragraph,
	/// A literal text run inside a paragraph.
	Text,
	/// A fenced or indented code block.
	CodeBlock,
	/// A block quote; removable placeholder when it precedes a directive.
	Blockquote,
	/// Anything else. Passed through untouched.
	Other,
}

#[derive(Debug)]
struct Node {
	kind: NodeKind,
	span: Option<Span>,
	buffer: BufferId,
	parent: Option<NodeId>,
	first_child: Option<NodeId>,
	last_child: Option<NodeId>,
	prev: Option<NodeId>,
	next: Option<NodeId>,
}

/// The document tree for one injection run.
///
/// Owns the node arena and every source buffer the nodes reference. The
/// tree is built once from the main buffer, mutated by applying an edit
/// plan, rendered, and dropped.
#[derive(Debug)]
pub struct SnippetTree {
	nodes: Vec<Node>,
	buffers: Vec<String>,
	root: NodeId,
}

impl SnippetTree {
	/// Create a tree holding `source` as the main buffer, with an empty
	/// document root spanning it.
	pub fn new(source: String) -> Self {
		let span = Span::new(0, source.len());
		let root_node = Node {
			kind: NodeKind::Document,
			span: Some(span),
			buffer: BufferId::MAIN,
			parent: None,
			first_child: None,
			last_child: None,
			prev: None,
			next: None,
		};

		Self {
			nodes: vec![root_node],
			buffers: vec![source],
			root: NodeId(0),
		}
	}

	pub fn root(&self) -> NodeId {
		self.root
	}

	/// Register an additional source buffer, e.g. an injected file's
	/// contents or a synthesized fence.
	pub fn add_buffer(&mut self, content: String) -> BufferId {
		self.buffers.push(content);
		BufferId(self.buffers.len() - 1)
	}

	pub fn buffer(&self, id: BufferId) -> &str {
		&self.buffers[id.0]
	}

	pub fn main_source(&self) -> &str {
		self.buffer(BufferId::MAIN)
	}

	/// Create a detached node. It joins the document through
	/// [`Self::append_child`] or [`Self::insert_before`].
	pub fn add_node(&mut self, kind: NodeKind, span: Option<Span>, buffer: BufferId) -> NodeId {
		self.nodes.push(Node {
			kind,
			span,
			buffer,
			parent: None,
			first_child: None,
			last_child: None,
			prev: None,
			next: None,
		});

		NodeId(self.nodes.len() - 1)
	}

	pub fn kind(&self, id: NodeId) -> NodeKind {
		self.node(id).kind
	}

	pub fn span(&self, id: NodeId) -> Option<Span> {
		self.node(id).span
	}

	/// The buffer this node's span is measured against.
	pub fn buffer_of(&self, id: NodeId) -> BufferId {
		self.node(id).buffer
	}

	pub fn parent(&self, id: NodeId) -> Option<NodeId> {
		self.node(id).parent
	}

	pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
		self.node(id).first_child
	}

	pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
		self.node(id).next
	}

	pub fn prev_sibling(&self, id: NodeId) -> Option<NodeId> {
		self.node(id).prev
	}

	/// The raw text of a node's span, sliced from its own buffer. Empty
	/// for synthetic nodes without a recorded span.
	pub fn node_text(&self, id: NodeId) -> &str {
		match self.node(id).span {
			Some(span) => &self.buffer(self.node(id).buffer)[span.start..span.end],
			None => "",
		}
	}

	/// Append `child` as the last child of `parent`, detaching it from
	/// any previous position first.
	pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
		self.detach(child);

		let last = self.node(parent).last_child;
		self.node_mut(child).parent = Some(parent);
		self.node_mut(child).prev = last;

		match last {
			Some(last) => self.node_mut(last).next = Some(child),
			None => self.node_mut(parent).first_child = Some(child),
		}

		self.node_mut(parent).last_child = Some(child);
	}

	/// Insert `node` as the sibling immediately before `anchor`.
	///
	/// A detached anchor has no position to insert at, so the call is a
	/// no-op; the edit plan applies insertions before removals to keep
	/// anchors attached.
	pub fn insert_before(&mut self, anchor: NodeId, node: NodeId) {
		let Some(parent) = self.node(anchor).parent else {
			return;
		};

		self.detach(node);

		let prev = self.node(anchor).prev;
		self.node_mut(node).parent = Some(parent);
		self.node_mut(node).prev = prev;
		self.node_mut(node).next = Some(anchor);
		self.node_mut(anchor).prev = Some(node);

		match prev {
			Some(prev) => self.node_mut(prev).next = Some(node),
			None => self.node_mut(parent).first_child = Some(node),
		}
	}

	/// Unlink `node` from its parent and siblings. Idempotent: detaching
	/// an already detached node (or the root) does nothing.
	pub fn detach(&mut self, node: NodeId) {
		let Some(parent) = self.node(node).parent else {
			return;
		};

		let prev = self.node(node).prev;
		let next = self.node(node).next;

		match prev {
			Some(prev) => self.node_mut(prev).next = next,
			None => self.node_mut(parent).first_child = next,
		}

		match next {
			Some(next) => self.node_mut(next).prev = prev,
			None => self.node_mut(parent).last_child = prev,
		}

		let node = self.node_mut(node);
		node.parent = None;
		node.prev = None;
		node.next = None;
	}

	pub fn children(&self, id: NodeId) -> Children<'_> {
		Children {
			tree: self,
			next: self.node(id).first_child,
		}
	}

	/// Every node in document order, root first.
	pub fn descendants(&self) -> Descendants<'_> {
		Descendants {
			tree: self,
			next: Some(self.root),
		}
	}

	fn next_in_document(&self, id: NodeId) -> Option<NodeId> {
		if let Some(child) = self.node(id).first_child {
			return Some(child);
		}

		let mut current = id;

		loop {
			if let Some(sibling) = self.node(current).next {
				return Some(sibling);
			}

			current = self.node(current).parent?;
		}
	}

	fn node(&self, id: NodeId) -> &Node {
		&self.nodes[id.0]
	}

	fn node_mut(&mut self, id: NodeId) -> &mut Node {
		&mut self.nodes[id.0]
	}
}

/// Iterator over the children of one node.
pub struct Children<'t> {
	tree: &'t SnippetTree,
	next: Option<NodeId>,
}

impl Iterator for Children<'_> {
	type Item = NodeId;

	fn next(&mut self) -> Option<Self::Item> {
		let current = self.next?;
		self.next = self.tree.node(current).next;
		Some(current)
	}
}

/// Pre-order iterator over the whole tree.
pub struct Descendants<'t> {
	tree: &'t SnippetTree,
	next: Option<NodeId>,
}

impl Iterator for Descendants<'_> {
	type Item = NodeId;

	fn next(&mut self) -> Option<Self::Item> {
		let current = self.next?;
		self.next = self.tree.next_in_document(current);
		Some(current)
	}
}
