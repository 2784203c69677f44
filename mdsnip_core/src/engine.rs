//! Orchestration of one injection run.

use std::path::PathBuf;

use crate::SnipError;
use crate::SnipResult;
use crate::builder::build_fragment;
use crate::config::ExtensionEntry;
use crate::config::SnipConfig;
use crate::config::TagAliases;
use crate::editor::EditPlan;
use crate::editor::record_directive_cleanup;
use crate::parse::parse_document;
use crate::render::render;
use crate::resolver::resolve_candidates;
use crate::scanner;
use crate::scanner::Directive;
use crate::tree::NodeId;
use crate::tree::NodeKind;
use crate::tree::SnippetTree;

/// Options for a single injection run.
///
/// Finalized before the scan starts and read-only afterwards; the engine
/// never mutates options mid-run.
#[derive(Clone, Debug)]
pub struct InjectOptions {
	/// Directory snippet files are resolved in.
	pub snippet_dir: PathBuf,
	/// Search the snippet directory recursively.
	pub recursive: bool,
	/// Extension to fence-tag aliases.
	pub aliases: TagAliases,
	/// Raw extensions considered at all; empty means no restriction.
	pub allowed_extensions: Vec<String>,
	/// Leave directive paragraphs in place.
	pub keep_tags: bool,
	/// Never remove placeholder blockquotes.
	pub keep_quotes: bool,
}

impl Default for InjectOptions {
	fn default() -> Self {
		Self {
			snippet_dir: PathBuf::from("."),
			recursive: true,
			aliases: TagAliases::default(),
			allowed_extensions: vec![],
			keep_tags: false,
			keep_quotes: false,
		}
	}
}

impl InjectOptions {
	/// Build options from a loaded config file, with built-in defaults
	/// for anything unset.
	pub fn from_config(config: &SnipConfig) -> SnipResult<Self> {
		let mut options = Self::default();

		if let Some(snippet_dir) = &config.snippet_dir {
			options.snippet_dir = snippet_dir.clone();
		}

		if let Some(recursive) = config.recursive {
			options.recursive = recursive;
		}

		if let Some(keep_tags) = config.keep_tags {
			options.keep_tags = keep_tags;
		}

		if let Some(keep_quotes) = config.keep_quotes {
			options.keep_quotes = keep_quotes;
		}

		options.apply_extension_entries(&config.extensions)?;

		Ok(options)
	}

	/// Fold `ext` / `ext:tag` entries into the alias map and allow-list.
	/// Pairs extend the aliases; bare entries restrict which extensions
	/// are considered at all. Pairs alone leave the allow-list empty, so
	/// they only extend.
	pub fn apply_extension_entries(&mut self, entries: &[String]) -> SnipResult<()> {
		for entry in entries {
			match ExtensionEntry::parse(entry)? {
				ExtensionEntry::Allow(extension) => {
					self.allowed_extensions.push(extension);
				}
				ExtensionEntry::Alias { extension, tag } => {
					self.aliases.insert(extension, tag);
				}
			}
		}

		Ok(())
	}
}

/// A non-fatal problem encountered during a run. A candidate that cannot
/// be read is skipped so the rest of the directive's matches still land.
#[derive(Clone, Debug)]
pub struct InjectDiagnostic {
	/// Path of the skipped candidate.
	pub path: String,
	/// Why it was skipped.
	pub reason: String,
}

impl InjectDiagnostic {
	pub fn message(&self) -> String {
		format!("skipped `{}`: {}", self.path, self.reason)
	}
}

/// Result of one injection run.
#[derive(Debug)]
pub struct InjectOutcome {
	/// The rendered document.
	pub output: String,
	/// Directives honored during the walk.
	pub directives: usize,
	/// Snippet files spliced into the document.
	pub injected: usize,
	/// Candidates skipped because they could not be read.
	pub diagnostics: Vec<InjectDiagnostic>,
}

/// Run snippet injection over `source` and render the result.
///
/// The run is strictly sequential: parse, scan for directives, resolve
/// and build fragments into an edit plan, apply the plan, render. The
/// tree never mutates while the scan walks it.
pub fn inject(source: String, options: &InjectOptions) -> SnipResult<InjectOutcome> {
	let mut tree = parse_document(source)?;
	let scans = scan_directives(&tree);

	let mut plan = EditPlan::new();
	let mut diagnostics = vec![];
	let mut directives = 0;
	let mut injected = 0;

	for (paragraph, found) in scans {
		let mut inserted = 0;

		for directive in found {
			directives += 1;
			tracing::debug!(name = %directive.name, "processing directive");

			let candidates = resolve_candidates(
				&options.snippet_dir,
				options.recursive,
				&options.aliases,
				&options.allowed_extensions,
				&directive,
			)?;

			for candidate in candidates {
				match build_fragment(&mut tree, &candidate) {
					Ok(nodes) => {
						plan.insert_before(paragraph, nodes);
						inserted += 1;
						injected += 1;
					}
					Err(SnipError::ReadFile { path, reason }) => {
						tracing::warn!(%path, %reason, "skipping unreadable candidate");
						diagnostics.push(InjectDiagnostic { path, reason });
					}
					Err(error) => return Err(error),
				}
			}
		}

		record_directive_cleanup(
			&mut plan,
			&tree,
			paragraph,
			inserted,
			options.keep_tags,
			options.keep_quotes,
		);
	}

	plan.apply(&mut tree);
	let output = render(&tree);

	tracing::debug!(directives, injected, "injection run complete");

	Ok(InjectOutcome {
		output,
		directives,
		injected,
		diagnostics,
	})
}

/// Walk the tree and collect every honored directive, grouped by the
/// paragraph that holds it, in document order. The walk is read-only;
/// fragments for several directives in one paragraph share the paragraph's
/// cleanup decision.
fn scan_directives(tree: &SnippetTree) -> Vec<(NodeId, Vec<Directive>)> {
	let mut scans: Vec<(NodeId, Vec<Directive>)> = vec![];

	for node in tree.descendants() {
		if tree.kind(node) != NodeKind::Text || !scanner::is_actionable(tree, node) {
			continue;
		}

		let Some(found) = scanner::scan_text(tree, node) else {
			continue;
		};

		let Some(paragraph) = tree.parent(node) else {
			continue;
		};

		match scans.last_mut() {
			Some((last, directives)) if *last == paragraph => {
				directives.push(found.directive);
			}
			_ => scans.push((paragraph, vec![found.directive])),
		}
	}

	scans
}
