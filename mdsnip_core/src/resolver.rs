//! Candidate file resolution.
//!
//! A directive's name becomes the glob `<name>.*`, matched against the
//! snippet directory (with a `**/` prefix when recursion is on). The
//! ordering policy is part of the user-facing contract:
//!
//! - no extension filter — every match, sorted lexicographically by path;
//! - explicit filter — one pass per requested extension, in the order the
//!   author wrote them, so `[sh,go]` always places shell snippets first.

use std::collections::HashSet;
use std::path::Path;
use std::path::PathBuf;

use globset::GlobBuilder;
use globset::GlobMatcher;

use crate::SnipError;
use crate::SnipResult;
use crate::config::TagAliases;
use crate::scanner::Directive;

/// A resolved snippet file, ready for the node builder.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Candidate {
	pub path: PathBuf,
	/// Raw file extension, without the leading dot.
	pub extension: String,
	/// Fence tag to display, after alias lookup.
	pub tag: String,
}

/// Enumerate the candidate files for one directive, in injection order.
///
/// A missing snippet directory resolves to zero candidates rather than an
/// error; the directive is then handled like any other zero-match one.
pub fn resolve_candidates(
	snippet_dir: &Path,
	recursive: bool,
	aliases: &TagAliases,
	allowed: &[String],
	directive: &Directive,
) -> SnipResult<Vec<Candidate>> {
	let matcher = build_matcher(recursive, &directive.name)?;

	if !snippet_dir.is_dir() {
		tracing::warn!(path = %snippet_dir.display(), "snippet directory not found");
		return Ok(vec![]);
	}

	let mut files = vec![];
	let mut visited = HashSet::new();
	collect_files(snippet_dir, recursive, &mut visited, &mut files);
	files.sort();

	let matches: Vec<&PathBuf> = files
		.iter()
		.filter(|path| {
			let relative = path.strip_prefix(snippet_dir).unwrap_or(path);
			matcher.is_match(relative)
		})
		.collect();

	let mut candidates = vec![];

	if directive.has_filter {
		for requested in &directive.extensions {
			if !is_allowed(allowed, requested) {
				tracing::debug!(extension = %requested, "extension not in allow list");
				continue;
			}

			for path in &matches {
				if extension_of(path) == *requested {
					candidates.push(candidate(path, aliases));
				}
			}
		}
	} else {
		for path in &matches {
			if is_allowed(allowed, &extension_of(path)) {
				candidates.push(candidate(path, aliases));
			}
		}
	}

	tracing::debug!(name = %directive.name, count = candidates.len(), "resolved candidates");

	Ok(candidates)
}

fn build_matcher(recursive: bool, name: &str) -> SnipResult<GlobMatcher> {
	let pattern = if recursive {
		format!("**/{name}.*")
	} else {
		format!("{name}.*")
	};

	let glob = GlobBuilder::new(&pattern)
		.literal_separator(true)
		.build()
		.map_err(|error| {
			SnipError::Pattern {
				pattern: pattern.clone(),
				reason: error.to_string(),
			}
		})?;

	Ok(glob.compile_matcher())
}

/// Collect every file below `dir`, breaking symlink cycles via canonical
/// paths. Unreadable entries are skipped.
fn collect_files(
	dir: &Path,
	recursive: bool,
	visited: &mut HashSet<PathBuf>,
	files: &mut Vec<PathBuf>,
) {
	let Ok(canonical) = std::fs::canonicalize(dir) else {
		tracing::debug!(path = %dir.display(), "cannot canonicalize, skipping");
		return;
	};

	if !visited.insert(canonical) {
		tracing::debug!(path = %dir.display(), "symlink cycle, skipping");
		return;
	}

	let Ok(entries) = std::fs::read_dir(dir) else {
		tracing::debug!(path = %dir.display(), "cannot read directory, skipping");
		return;
	};

	for entry in entries.flatten() {
		let path = entry.path();

		let Ok(metadata) = std::fs::metadata(&path) else {
			tracing::debug!(path = %path.display(), "unreadable entry, skipping");
			continue;
		};

		if metadata.is_dir() {
			if recursive {
				collect_files(&path, recursive, visited, files);
			}
		} else {
			files.push(path);
		}
	}
}

fn is_allowed(allowed: &[String], extension: &str) -> bool {
	allowed.is_empty() || allowed.iter().any(|entry| entry == extension)
}

fn candidate(path: &Path, aliases: &TagAliases) -> Candidate {
	let extension = extension_of(path);
	let tag = aliases.display(&extension).to_string();

	Candidate {
		path: path.to_path_buf(),
		extension,
		tag,
	}
}

fn extension_of(path: &Path) -> String {
	path.extension()
		.and_then(|extension| extension.to_str())
		.unwrap_or_default()
		.to_string()
}
