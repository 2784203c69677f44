//! Directive scanning over joined text runs.
//!
//! A directive is the author-facing marker `{{ snippet <name> [<exts>]? }}`.
//! The markdown grammar is free to split one logical line of text into
//! several sibling [`NodeKind::Text`] runs (emphasis markers and bracket
//! constructs do this), so the scanner joins consecutive sibling runs and
//! re-tokenizes the joined bytes until the grammar matches or the siblings
//! run out.

use logos::Logos;

use crate::tree::NodeId;
use crate::tree::NodeKind;
use crate::tree::SnippetTree;

/// Shortest snippet name the scanner honors. A complete directive with a
/// shorter name is treated as inert text.
pub const MIN_NAME_LEN: usize = 2;

/// Raw tokens produced by logos for flat tokenization of joined text runs.
#[derive(Logos, Debug, PartialEq)]
enum RawToken {
	#[token("{{")]
	OpenBraces,
	#[token("}}")]
	CloseBraces,
	#[token("[")]
	OpenBracket,
	#[token("]")]
	CloseBracket,
	#[token(",")]
	Comma,
	#[regex(r"[ \t\r\n]+")]
	Whitespace,
	#[regex(r"[^ \t\r\n{}\[\],]+")]
	Word,
}

/// A parsed snippet directive.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Directive {
	/// Snippet group identifier; the file stem the resolver globs for.
	pub name: String,
	/// Requested extensions, in the order the author wrote them.
	pub extensions: Vec<String>,
	/// Whether the author wrote a bracket list at all. `{{snippet x []}}`
	/// carries a filter with zero extensions; `{{snippet x}}` carries
	/// none. The distinction drives candidate ordering.
	pub has_filter: bool,
}

/// A directive found in a paragraph, together with the text nodes whose
/// joined content produced the match.
#[derive(Debug)]
pub struct DirectiveMatch {
	pub directive: Directive,
	pub consumed: Vec<NodeId>,
}

/// Whether a matched directive at this node would be honored: only text
/// directly inside a paragraph that itself sits directly under the
/// document root. Directives inside lists, block quotes, or any other
/// container are inert text.
pub fn is_actionable(tree: &SnippetTree, text: NodeId) -> bool {
	let Some(parent) = tree.parent(text) else {
		return false;
	};

	if tree.kind(parent) != NodeKind::Paragraph {
		return false;
	}

	let Some(grandparent) = tree.parent(parent) else {
		return false;
	};

	tree.kind(grandparent) == NodeKind::Document
}

/// Scan for a directive starting at `start`, joining consecutive sibling
/// text runs until the grammar matches or the run of text nodes ends.
///
/// Only the first directive in the joined text is honored. Returns the
/// parsed directive plus every text node joined up to the point the match
/// completed.
pub fn scan_text(tree: &SnippetTree, start: NodeId) -> Option<DirectiveMatch> {
	if tree.kind(start) != NodeKind::Text {
		return None;
	}

	let mut joined = String::new();
	let mut consumed = vec![];
	let mut current = Some(start);

	while let Some(node) = current {
		if tree.kind(node) != NodeKind::Text {
			break;
		}

		joined.push_str(tree.node_text(node));
		consumed.push(node);

		if let Some(directive) = match_directive(&joined) {
			tracing::trace!(name = %directive.name, runs = consumed.len(), "directive matched");
			return Some(DirectiveMatch { directive, consumed });
		}

		current = tree.next_sibling(node);
	}

	None
}

/// Outcome of one directive parse attempt at a given `{{` token.
enum Parsed {
	Directive(Directive),
	/// The directive completed but its name is below [`MIN_NAME_LEN`].
	/// First-match-wins: this poisons the rest of the text.
	NameTooShort,
	/// Unexpected token at this index; the search resumes there.
	Failed(usize),
}

/// Find the first complete directive anywhere in `text`.
fn match_directive(text: &str) -> Option<Directive> {
	let tokens: Vec<_> = RawToken::lexer(text).spanned().collect();
	let mut index = 0;

	while index < tokens.len() {
		if !matches!(tokens[index].0, Ok(RawToken::OpenBraces)) {
			index += 1;
			continue;
		}

		match parse_directive(text, &tokens, index + 1) {
			Parsed::Directive(directive) => return Some(directive),
			Parsed::NameTooShort => return None,
			Parsed::Failed(at) => index = at.max(index + 1),
		}
	}

	None
}

type SpannedTokens = [(Result<RawToken, ()>, std::ops::Range<usize>)];

/// Parse the remainder of a directive after its opening `{{`.
fn parse_directive(text: &str, tokens: &SpannedTokens, start: usize) -> Parsed {
	let mut cursor = skip_whitespace(tokens, start);

	match word_at(text, tokens, cursor) {
		Some("snippet") => cursor += 1,
		_ => return Parsed::Failed(cursor),
	}

	cursor = skip_whitespace(tokens, cursor);
	let Some(name) = word_at(text, tokens, cursor) else {
		return Parsed::Failed(cursor);
	};
	let name = name.to_string();
	cursor = skip_whitespace(tokens, cursor + 1);

	let mut extensions = vec![];
	let mut has_filter = false;

	if matches!(token_at(tokens, cursor), Some(RawToken::OpenBracket)) {
		has_filter = true;
		cursor = skip_whitespace(tokens, cursor + 1);

		loop {
			if matches!(token_at(tokens, cursor), Some(RawToken::CloseBracket)) {
				cursor += 1;
				break;
			}

			let Some(extension) = word_at(text, tokens, cursor) else {
				return Parsed::Failed(cursor);
			};

			extensions.push(extension.to_string());
			cursor = skip_whitespace(tokens, cursor + 1);

			if matches!(token_at(tokens, cursor), Some(RawToken::Comma)) {
				cursor = skip_whitespace(tokens, cursor + 1);
			} else if !matches!(token_at(tokens, cursor), Some(RawToken::CloseBracket)) {
				return Parsed::Failed(cursor);
			}
		}

		cursor = skip_whitespace(tokens, cursor);
	}

	if !matches!(token_at(tokens, cursor), Some(RawToken::CloseBraces)) {
		return Parsed::Failed(cursor);
	}

	if name.len() < MIN_NAME_LEN {
		return Parsed::NameTooShort;
	}

	Parsed::Directive(Directive {
		name,
		extensions,
		has_filter,
	})
}

fn token_at(tokens: &SpannedTokens, index: usize) -> Option<&RawToken> {
	tokens.get(index).and_then(|(token, _)| token.as_ref().ok())
}

/// The slice of a `Word` token at `index`, if that is what sits there.
fn word_at<'t>(text: &'t str, tokens: &SpannedTokens, index: usize) -> Option<&'t str> {
	let (token, span) = tokens.get(index)?;

	match token {
		Ok(RawToken::Word) => Some(&text[span.clone()]),
		_ => None,
	}
}

fn skip_whitespace(tokens: &SpannedTokens, mut index: usize) -> usize {
	while matches!(token_at(tokens, index), Some(RawToken::Whitespace)) {
		index += 1;
	}

	index
}
