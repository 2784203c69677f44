//! Serialization of the edited tree back to markdown text.
//!
//! Rendering is span based: each top-level block is emitted verbatim from
//! the buffer it was parsed out of, extended to whole lines so indented
//! constructs keep their indentation. A document with no edits therefore
//! round-trips byte for byte, apart from the leading blank line trim.

use crate::tree::BufferId;
use crate::tree::SnippetTree;

/// Render the tree to markdown text.
///
/// Consecutive blocks from the same buffer, in original order, keep the
/// exact whitespace that separated them; every other boundary (an
/// injected fragment, or a gap that used to hold removed markup) is
/// normalized to one blank line. Leading blank lines are trimmed from the
/// result. Trailing whitespace of the main buffer is preserved when the
/// last block still renders from it.
pub fn render(tree: &SnippetTree) -> String {
	let mut output = String::new();
	let mut previous: Option<(BufferId, usize)> = None;

	for child in tree.children(tree.root()) {
		let Some(span) = tree.span(child) else {
			continue;
		};

		let buffer_id = tree.buffer_of(child);
		let buffer = tree.buffer(buffer_id);
		let (start, end) = extend_to_lines(buffer, span.start, span.end);

		match previous {
			None => {}
			Some((previous_buffer, previous_end))
				if previous_buffer == buffer_id
					&& previous_end <= start
					&& buffer[previous_end..start].chars().all(char::is_whitespace) =>
			{
				output.push_str(&buffer[previous_end..start]);
			}
			Some(_) => ensure_blank_line(&mut output),
		}

		output.push_str(&buffer[start..end]);
		previous = Some((buffer_id, end));
	}

	if let Some((buffer_id, end)) = previous {
		let buffer = tree.buffer(buffer_id);
		let tail = &buffer[end.min(buffer.len())..];

		if !tail.is_empty() && tail.chars().all(char::is_whitespace) {
			output.push_str(tail);
		}
	}

	trim_leading_blank_lines(output)
}

/// Extend a span backwards to the start of its first line and forwards
/// through the newline that ends its last line.
fn extend_to_lines(buffer: &str, start: usize, end: usize) -> (usize, usize) {
	let line_start = buffer[..start].rfind('\n').map_or(0, |index| index + 1);

	let line_end = if end > 0 && buffer.as_bytes()[end - 1] == b'\n' {
		end
	} else {
		buffer[end..]
			.find('\n')
			.map_or(buffer.len(), |index| end + index + 1)
	};

	(line_start, line_end)
}

fn ensure_blank_line(output: &mut String) {
	if output.is_empty() {
		return;
	}

	while !output.ends_with("\n\n") {
		output.push('\n');
	}
}

/// Deleted directive lines can leave stray blank lines at the very top;
/// strip them, exactly like trimming leading `\n` bytes.
fn trim_leading_blank_lines(output: String) -> String {
	match output.find(|character| character != '\n') {
		Some(0) => output,
		Some(index) => output[index..].to_string(),
		None => String::new(),
	}
}
