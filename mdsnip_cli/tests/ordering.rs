use std::fs;

use mdsnip_core::AnyEmptyResult;
use rstest::rstest;
use similar_asserts::assert_eq;

mod common;

#[test]
fn injects_every_match_alphabetically() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	fs::create_dir_all(tmp.path().join("snippets"))?;
	fs::write(tmp.path().join("snippets/foo.go"), "package main\n")?;
	fs::write(tmp.path().join("snippets/foo.json"), "{}\n")?;
	fs::write(tmp.path().join("snippets/foo.sh"), "echo hi\n")?;
	fs::write(
		tmp.path().join("readme.md"),
		"Intro\n\n{{ snippet foo }}\n\nOutro\n",
	)?;

	common::mdsnip_cmd()
		.current_dir(tmp.path())
		.arg("--target")
		.arg("readme.md")
		.arg("--snippet-dir")
		.arg("snippets")
		.assert()
		.success()
		.stdout(predicates::str::contains("3 snippet(s) injected"));

	assert_eq!(
		fs::read_to_string(tmp.path().join("readme.md"))?,
		"Intro\n\n~~~~go\npackage main\n~~~~\n\n~~~~json\n{}\n~~~~\n\n~~~~shell\necho \
		 hi\n~~~~\n\nOutro\n"
	);

	Ok(())
}

#[test]
fn filter_controls_order_and_selection() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	fs::create_dir_all(tmp.path().join("snippets"))?;
	fs::write(tmp.path().join("snippets/foo.go"), "package main\n")?;
	fs::write(tmp.path().join("snippets/foo.json"), "{}\n")?;
	fs::write(tmp.path().join("snippets/foo.sh"), "echo hi\n")?;
	fs::write(tmp.path().join("readme.md"), "{{ snippet foo [sh,go] }}\n")?;

	common::mdsnip_cmd()
		.current_dir(tmp.path())
		.arg("--target")
		.arg("readme.md")
		.arg("--snippet-dir")
		.arg("snippets")
		.assert()
		.success()
		.stdout(predicates::str::contains("2 snippet(s) injected"));

	assert_eq!(
		fs::read_to_string(tmp.path().join("readme.md"))?,
		"~~~~shell\necho hi\n~~~~\n\n~~~~go\npackage main\n~~~~\n"
	);

	Ok(())
}

#[rstest]
#[case::default(&[], "After\n")]
#[case::keep_quotes(&["--keep-quotes"], "> placeholder\n\nAfter\n")]
fn placeholder_quotes_follow_their_directive(
	#[case] extra_args: &[&str],
	#[case] expected: &str,
) -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	fs::create_dir_all(tmp.path().join("snippets"))?;
	fs::write(
		tmp.path().join("readme.md"),
		"> placeholder\n\n{{ snippet foo }}\n\nAfter\n",
	)?;

	common::mdsnip_cmd()
		.current_dir(tmp.path())
		.arg("--target")
		.arg("readme.md")
		.arg("--snippet-dir")
		.arg("snippets")
		.args(extra_args)
		.assert()
		.success()
		.stdout(predicates::str::contains("0 snippet(s) injected"));

	assert_eq!(fs::read_to_string(tmp.path().join("readme.md"))?, expected);

	Ok(())
}

#[test]
fn markdown_snippets_splice_as_markdown() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	fs::create_dir_all(tmp.path().join("snippets"))?;
	fs::write(
		tmp.path().join("snippets/foo.md"),
		"# Example\n\nSome *docs*.\n",
	)?;
	fs::write(tmp.path().join("readme.md"), "Intro\n\n{{ snippet foo }}\n")?;

	common::mdsnip_cmd()
		.current_dir(tmp.path())
		.arg("--target")
		.arg("readme.md")
		.arg("--snippet-dir")
		.arg("snippets")
		.assert()
		.success();

	assert_eq!(
		fs::read_to_string(tmp.path().join("readme.md"))?,
		"Intro\n\n# Example\n\nSome *docs*.\n"
	);

	Ok(())
}
