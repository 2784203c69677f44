//! Fragment construction from resolved snippet files.

use crate::SnipError;
use crate::SnipResult;
use crate::parse::parse_fragment;
use crate::resolver::Candidate;
use crate::tree::NodeId;
use crate::tree::SnippetTree;

/// The display tag whose candidates are spliced as parsed markdown
/// instead of being fenced. Compared after alias lookup, so an alias
/// entry can reclassify files in either direction.
pub const MARKDOWN_TAG: &str = "md";

/// Build the tree fragment for one candidate.
///
/// A markdown candidate is parsed with the same grammar as the host
/// document and contributes its top-level blocks. Anything else is
/// wrapped in a synthesized fence and parsed, so the resulting code
/// block's byte ranges come from the same parser as the rest of the tree.
/// Either way the fragment's nodes record their own buffer.
pub fn build_fragment(tree: &mut SnippetTree, candidate: &Candidate) -> SnipResult<Vec<NodeId>> {
	let content =
		std::fs::read_to_string(&candidate.path).map_err(|error| {
			SnipError::ReadFile {
				path: candidate.path.display().to_string(),
				reason: error.to_string(),
			}
		})?;

	let source = if candidate.tag == MARKDOWN_TAG {
		content
	} else {
		fence_block(&candidate.tag, &content)
	};

	parse_fragment(tree, source)
}

/// Wrap raw content in a tilde fence, with the candidate's tag as the
/// language hint. The fence is one tilde longer than any tilde run the
/// content opens a line with, so the content cannot close it early.
fn fence_block(tag: &str, content: &str) -> String {
	let fence = "~".repeat(fence_len(content));
	let newline = if content.is_empty() || content.ends_with('\n') {
		""
	} else {
		"\n"
	};

	format!("{fence}{tag}\n{content}{newline}{fence}\n")
}

fn fence_len(content: &str) -> usize {
	let longest = content
		.lines()
		.map(|line| {
			line.trim_start_matches(' ')
				.bytes()
				.take_while(|byte| *byte == b'~')
				.count()
		})
		.max()
		.unwrap_or(0);

	(longest + 1).max(4)
}
