use std::collections::BTreeMap;
use std::path::Path;
use std::path::PathBuf;

use derive_more::Deref;
use derive_more::DerefMut;
use serde::Deserialize;

use crate::SnipError;
use crate::SnipResult;

/// Supported config file locations in discovery order (highest precedence
/// first).
pub const CONFIG_FILE_CANDIDATES: [&str; 3] =
	["mdsnip.toml", ".mdsnip.toml", ".config/mdsnip.toml"];

/// Extension to display-tag aliases for code fence language hints.
///
/// A candidate file's raw extension is looked up here to pick the fence
/// tag; unmapped extensions fall back to themselves. The map is built from
/// configuration before a run starts and stays immutable while the run
/// scans.
#[derive(Clone, Debug, Deref, DerefMut, Eq, PartialEq)]
pub struct TagAliases(BTreeMap<String, String>);

impl Default for TagAliases {
	fn default() -> Self {
		let mut aliases = BTreeMap::new();
		aliases.insert("sh".to_string(), "shell".to_string());
		aliases.insert("cpp".to_string(), "c++".to_string());
		Self(aliases)
	}
}

impl TagAliases {
	/// An empty map, without the built-in aliases.
	pub fn empty() -> Self {
		Self(BTreeMap::new())
	}

	/// The fence tag to display for a raw extension.
	pub fn display<'a>(&'a self, extension: &'a str) -> &'a str {
		self.0.get(extension).map_or(extension, String::as_str)
	}
}

/// One entry of the extension list: either a bare extension joining the
/// allow-list, or an `ext:tag` pair extending the alias map.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ExtensionEntry {
	Allow(String),
	Alias { extension: String, tag: String },
}

impl ExtensionEntry {
	/// Parse a single `ext` or `ext:tag` entry.
	pub fn parse(entry: &str) -> SnipResult<Self> {
		let parts: Vec<&str> = entry.split(':').collect();

		match parts.as_slice() {
			[extension] if !extension.is_empty() => Ok(Self::Allow((*extension).to_string())),
			[extension, tag] if !extension.is_empty() && !tag.is_empty() => {
				Ok(Self::Alias {
					extension: (*extension).to_string(),
					tag: (*tag).to_string(),
				})
			}
			_ => Err(SnipError::InvalidExtensionEntry(entry.to_string())),
		}
	}
}

/// Configuration loaded from an `mdsnip.toml` file.
///
/// ```toml
/// snippet_dir = "examples"
/// recursive = true
/// extensions = ["rs", "sh:bash"]
/// keep_tags = false
/// keep_quotes = false
/// ```
///
/// Every field is optional; unset fields fall back to built-in defaults,
/// and command line flags override anything set here.
#[derive(Debug, Default, Deserialize)]
pub struct SnipConfig {
	/// Directory snippet files are resolved in.
	#[serde(default)]
	pub snippet_dir: Option<PathBuf>,
	/// Whether the snippet directory is searched recursively.
	#[serde(default)]
	pub recursive: Option<bool>,
	/// Where the rendered document is written. `-` means stdout.
	#[serde(default)]
	pub output: Option<PathBuf>,
	/// Extension list entries, `ext` or `ext:tag`.
	#[serde(default)]
	pub extensions: Vec<String>,
	/// Leave directive paragraphs in place.
	#[serde(default)]
	pub keep_tags: Option<bool>,
	/// Never remove placeholder blockquotes.
	#[serde(default)]
	pub keep_quotes: Option<bool>,
}

impl SnipConfig {
	/// Resolve the config path from known discovery candidates.
	#[must_use]
	pub fn resolve_path(root: &Path) -> Option<PathBuf> {
		CONFIG_FILE_CANDIDATES
			.iter()
			.map(|candidate| root.join(candidate))
			.find(|path| path.is_file())
	}

	/// Load the config from the first discovered config file at `root`.
	/// Returns `None` if no config file exists.
	pub fn load(root: &Path) -> SnipResult<Option<SnipConfig>> {
		let Some(config_path) = Self::resolve_path(root) else {
			return Ok(None);
		};

		Ok(Some(Self::load_file(&config_path)?))
	}

	/// Load the config from an explicit file path.
	pub fn load_file(path: &Path) -> SnipResult<SnipConfig> {
		let content = std::fs::read_to_string(path).map_err(|error| SnipError::ReadFile {
			path: path.display().to_string(),
			reason: error.to_string(),
		})?;
		let config: SnipConfig =
			toml::from_str(&content).map_err(|error| SnipError::ConfigParse(error.to_string()))?;

		Ok(config)
	}
}
