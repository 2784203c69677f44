//! `mdsnip_core` is the engine behind [mdsnip](https://github.com/ifiokjr/mdsnip).
//! It scans a markdown document for `{{ snippet ... }}` directives and
//! splices real source files into the document tree in their place, so
//! documentation stays synchronized with compilable example code.
//!
//! ## Processing Pipeline
//!
//! ```text
//! Markdown document
//!   → Parser (markdown grammar → arena SnippetTree, spans into the main buffer)
//!   → Scanner (joins sibling text runs, matches `{{ snippet <name> [<exts>] }}`)
//!   → Resolver (globs `<name>.*` under the snippet dir, orders candidates)
//!   → Builder (markdown files parse as fragments, others get a synthesized fence)
//!   → Editor (edit plan: fragments spliced before the directive, markup removed)
//!   → Renderer (per-node buffer selection, emits the final text)
//! ```
//!
//! ## Key Types
//!
//! - [`SnippetTree`] — arena document tree with per-node buffer tracking.
//! - [`Directive`] — a parsed `{{ snippet ... }}` marker.
//! - [`EditPlan`] — insertions and removals collected during the walk,
//!   applied exactly once after it.
//! - [`InjectOptions`] / [`InjectOutcome`] — one run's configuration and
//!   result.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use mdsnip_core::InjectOptions;
//! use mdsnip_core::inject;
//!
//! let source = std::fs::read_to_string("readme.md").unwrap();
//! let outcome = inject(source, &InjectOptions::default()).unwrap();
//! std::fs::write("readme.md", outcome.output).unwrap();
//! ```

pub use builder::*;
pub use config::*;
pub use editor::*;
pub use engine::*;
pub use error::*;
pub use parse::*;
pub use render::*;
pub use resolver::*;
pub use scanner::*;
pub use tree::*;

mod builder;
pub mod config;
mod editor;
mod engine;
mod error;
mod parse;
mod render;
mod resolver;
pub mod scanner;
pub mod tree;
