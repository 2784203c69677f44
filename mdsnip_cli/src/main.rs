use std::io::Read;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use mdsnip_cli::MdsnipCli;
use mdsnip_core::InjectOptions;
use mdsnip_core::InjectOutcome;
use mdsnip_core::SnipConfig;
use mdsnip_core::SnipError;
use mdsnip_core::SnipResult;
use mdsnip_core::TagAliases;
use mdsnip_core::inject;
use owo_colors::OwoColorize;
use owo_colors::Stream;
use tracing_subscriber::EnvFilter;

fn main() {
	let args = MdsnipCli::parse();

	// Respect NO_COLOR, --no-color, and non-terminal stderr.
	let use_color = !args.no_color
		&& std::env::var_os("NO_COLOR").is_none()
		&& supports_color::on(supports_color::Stream::Stderr).is_some();
	if !use_color {
		owo_colors::set_override(false);
	}

	// Install miette's fancy handler for rich error diagnostics.
	miette::set_hook(Box::new(move |_| {
		Box::new(
			miette::MietteHandlerOpts::new()
				.color(use_color)
				.unicode(use_color)
				.build(),
		)
	}))
	.ok();

	init_tracing(args.verbose);

	if let Err(error) = run(&args) {
		let code = exit_code(&error);
		let report: miette::Report = error.into();
		eprintln!("{report:?}");
		process::exit(code);
	}
}

/// Route library logs to stderr so stdout stays clean for the rendered
/// document. `-v` occurrences raise the level; `RUST_LOG` wins when no
/// `-v` is given.
fn init_tracing(verbosity: u8) {
	let filter = match verbosity {
		0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
		1 => EnvFilter::new("info"),
		2 => EnvFilter::new("debug"),
		_ => EnvFilter::new("trace"),
	};

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.init();
}

/// Usage mistakes exit 2, matching clap's own exit code for argument
/// errors; run failures exit 1.
fn exit_code(error: &SnipError) -> i32 {
	match error {
		SnipError::MissingInput
		| SnipError::ConflictingInput
		| SnipError::InvalidExtensionEntry(_) => 2,
		_ => 1,
	}
}

fn run(args: &MdsnipCli) -> SnipResult<()> {
	let config = match &args.config {
		Some(path) => Some(SnipConfig::load_file(path)?),
		None => SnipConfig::load(&std::env::current_dir()?)?,
	};

	let mut options = match &config {
		Some(config) => InjectOptions::from_config(config)?,
		None => InjectOptions::default(),
	};

	if let Some(snippet_dir) = &args.snippet_dir {
		options.snippet_dir = snippet_dir.clone();
	}

	if args.no_recursive {
		options.recursive = false;
	}

	if args.keep_tags {
		options.keep_tags = true;
	}

	if args.keep_quotes {
		options.keep_quotes = true;
	}

	// `--extension` replaces the config's list wholesale.
	if !args.extensions.is_empty() {
		options.aliases = TagAliases::default();
		options.allowed_extensions = vec![];
		options.apply_extension_entries(&args.extensions)?;
	}

	let source = read_source(args)?;
	let destination = resolve_destination(args, config.as_ref());
	let outcome = inject(source, &options)?;

	write_output(&outcome, &destination)?;
	report_outcome(&outcome, &destination);

	Ok(())
}

fn read_source(args: &MdsnipCli) -> SnipResult<String> {
	match (&args.target, args.stdin) {
		(Some(_), true) => Err(SnipError::ConflictingInput),
		(None, false) => Err(SnipError::MissingInput),
		(Some(target), false) => {
			std::fs::read_to_string(target).map_err(|error| {
				SnipError::ReadFile {
					path: target.display().to_string(),
					reason: error.to_string(),
				}
			})
		}
		(None, true) => {
			let mut source = String::new();
			std::io::stdin().read_to_string(&mut source)?;
			Ok(source)
		}
	}
}

enum Destination {
	Stdout,
	File(PathBuf),
}

/// An explicit `--output` (or the config `output` key) wins, with `-`
/// forcing stdout. Otherwise a file target is updated in place and a
/// stdin document goes to stdout.
fn resolve_destination(args: &MdsnipCli, config: Option<&SnipConfig>) -> Destination {
	let explicit = args
		.output
		.clone()
		.or_else(|| config.and_then(|config| config.output.clone()));

	match explicit {
		Some(path) if path.as_os_str() == "-" => Destination::Stdout,
		Some(path) => Destination::File(path),
		None => {
			match &args.target {
				Some(target) => Destination::File(target.clone()),
				None => Destination::Stdout,
			}
		}
	}
}

fn write_output(outcome: &InjectOutcome, destination: &Destination) -> SnipResult<()> {
	match destination {
		Destination::Stdout => {
			print!("{}", outcome.output);
			Ok(())
		}
		Destination::File(path) => {
			std::fs::write(path, &outcome.output).map_err(|error| {
				SnipError::WriteFile {
					path: path.display().to_string(),
					reason: error.to_string(),
				}
			})
		}
	}
}

/// Skipped candidates are listed on stderr; the run summary goes to
/// stdout unless the document itself is on stdout.
fn report_outcome(outcome: &InjectOutcome, destination: &Destination) {
	for diagnostic in &outcome.diagnostics {
		eprintln!(
			"{} {}",
			"warning:".if_supports_color(Stream::Stderr, |text| text.yellow()),
			diagnostic.message()
		);
	}

	let summary = format!(
		"{} directive(s), {} snippet(s) injected, {} candidate(s) skipped",
		outcome.directives,
		outcome.injected,
		outcome.diagnostics.len()
	);

	match destination {
		Destination::Stdout => eprintln!("{summary}"),
		Destination::File(path) => println!("Updated {}: {summary}", path.display()),
	}
}
