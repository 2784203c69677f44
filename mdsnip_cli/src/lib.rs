use std::path::PathBuf;

use clap::ArgAction;
use clap::Parser;

#[derive(Parser)]
#[command(
	author,
	version,
	about = "Inject source code snippets into markdown documents.",
	long_about = "mdsnip keeps documentation synchronized with real, compilable example code.\n\nIt \
	              scans a markdown document for `{{ snippet <name> }}` directives, finds every \
	              `<name>.*` file under the snippet directory, and replaces the directive with the \
	              files' contents as fenced code blocks (markdown files are spliced in as parsed \
	              blocks instead).\n\nQuick start:\n  mdsnip -t readme.md -d examples       Update \
	              readme.md in place\n  mdsnip -s -d examples < in.md > out.md Filter stdin to \
	              stdout\n  mdsnip -t readme.md -e rs -e sh:bash   Restrict and retag extensions"
)]
#[allow(clippy::struct_excessive_bools)]
pub struct MdsnipCli {
	/// Markdown document to process. The rendered result overwrites this
	/// file unless `--output` says otherwise.
	#[arg(long, short)]
	pub target: Option<PathBuf>,

	/// Read the document from stdin instead of a file; the result goes to
	/// stdout. Mutually exclusive with `--target`.
	#[arg(long, short, default_value_t = false)]
	pub stdin: bool,

	/// Directory snippet files are resolved in.
	#[arg(long, short = 'd', value_name = "DIR")]
	pub snippet_dir: Option<PathBuf>,

	/// Do not descend into subdirectories of the snippet directory.
	#[arg(long, default_value_t = false)]
	pub no_recursive: bool,

	/// Where to write the rendered document; `-` means stdout. Defaults to
	/// the target path, or stdout when reading from stdin.
	#[arg(long, short, value_name = "FILE")]
	pub output: Option<PathBuf>,

	/// Extension entries, repeatable and comma separated. A bare `ext`
	/// restricts injection to the listed extensions; an `ext:tag` pair maps
	/// the extension to a different code fence tag.
	#[arg(
		long = "extension",
		short = 'e',
		value_name = "EXT[:TAG]",
		value_delimiter = ','
	)]
	pub extensions: Vec<String>,

	/// Leave directive paragraphs in the document after injecting.
	#[arg(long, default_value_t = false)]
	pub keep_tags: bool,

	/// Never remove the placeholder blockquote above a directive.
	#[arg(long, default_value_t = false)]
	pub keep_quotes: bool,

	/// Explicit config file path, instead of discovering `mdsnip.toml` from
	/// the current directory.
	#[arg(long, short, value_name = "FILE")]
	pub config: Option<PathBuf>,

	/// Increase log verbosity (`-v` info, `-vv` debug, `-vvv` trace).
	#[arg(long, short, action = ArgAction::Count)]
	pub verbose: u8,

	/// Disable colored output.
	#[arg(long, default_value_t = false)]
	pub no_color: bool,
}
