use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum SnipError {
	#[error(transparent)]
	#[diagnostic(code(mdsnip::io_error))]
	Io(#[from] std::io::Error),

	#[error("failure to load markdown: {0}")]
	#[diagnostic(code(mdsnip::markdown))]
	Markdown(String),

	#[error("failed to read `{path}`: {reason}")]
	#[diagnostic(code(mdsnip::read_file))]
	ReadFile { path: String, reason: String },

	#[error("failed to write `{path}`: {reason}")]
	#[diagnostic(code(mdsnip::write_file))]
	WriteFile { path: String, reason: String },

	#[error("invalid snippet pattern `{pattern}`: {reason}")]
	#[diagnostic(
		code(mdsnip::glob_pattern),
		help("snippet names may only contain characters that are valid in a glob stem")
	)]
	Pattern { pattern: String, reason: String },

	#[error("failed to parse config file: {0}")]
	#[diagnostic(
		code(mdsnip::config_parse),
		help("check that mdsnip.toml is valid TOML")
	)]
	ConfigParse(String),

	#[error("invalid extension entry: `{0}`")]
	#[diagnostic(
		code(mdsnip::extension_entry),
		help("use `ext` to allow an extension or `ext:tag` to map it to a fence tag")
	)]
	InvalidExtensionEntry(String),

	#[error("no input selected")]
	#[diagnostic(
		code(mdsnip::missing_input),
		help("pass `--target <FILE>` or `--stdin`")
	)]
	MissingInput,

	#[error("`--target` and `--stdin` are mutually exclusive")]
	#[diagnostic(
		code(mdsnip::conflicting_input),
		help("pick one input source per run")
	)]
	ConflictingInput,
}

pub type SnipResult<T> = Result<T, SnipError>;
pub type AnyError = Box<dyn std::error::Error>;
pub type AnyEmptyResult = Result<(), AnyError>;
pub type AnyResult<T> = Result<T, AnyError>;
