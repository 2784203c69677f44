use std::fs;

use mdsnip_core::AnyEmptyResult;
use rstest::rstest;
use similar_asserts::assert_eq;

mod common;

#[test]
fn updates_the_target_file_in_place() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	fs::write(tmp.path().join("readme.md"), "Intro\n\n{{ snippet foo }}\n")?;
	fs::write(tmp.path().join("foo.go"), "package main\n")?;

	common::mdsnip_cmd()
		.current_dir(tmp.path())
		.arg("--target")
		.arg("readme.md")
		.assert()
		.success()
		.stdout(predicates::str::contains("Updated readme.md"))
		.stdout(predicates::str::contains("1 snippet(s) injected"));

	let content = fs::read_to_string(tmp.path().join("readme.md"))?;
	assert_eq!(content, "Intro\n\n~~~~go\npackage main\n~~~~\n");

	Ok(())
}

#[test]
fn reads_stdin_and_writes_stdout() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	fs::write(tmp.path().join("foo.go"), "package main\n")?;

	common::mdsnip_cmd()
		.current_dir(tmp.path())
		.arg("--stdin")
		.write_stdin("{{ snippet foo }}\n")
		.assert()
		.success()
		.stdout("~~~~go\npackage main\n~~~~\n")
		.stderr(predicates::str::contains("1 snippet(s) injected"));

	Ok(())
}

#[test]
fn output_flag_redirects_without_touching_the_target() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let original = "Intro\n\n{{ snippet foo }}\n";
	fs::write(tmp.path().join("readme.md"), original)?;
	fs::write(tmp.path().join("foo.go"), "package main\n")?;

	common::mdsnip_cmd()
		.current_dir(tmp.path())
		.arg("--target")
		.arg("readme.md")
		.arg("--output")
		.arg("rendered.md")
		.assert()
		.success()
		.stdout(predicates::str::contains("Updated rendered.md"));

	assert_eq!(fs::read_to_string(tmp.path().join("readme.md"))?, original);
	assert_eq!(
		fs::read_to_string(tmp.path().join("rendered.md"))?,
		"Intro\n\n~~~~go\npackage main\n~~~~\n"
	);

	Ok(())
}

#[test]
fn dash_output_forces_stdout() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let original = "{{ snippet foo }}\n";
	fs::write(tmp.path().join("readme.md"), original)?;
	fs::write(tmp.path().join("foo.go"), "package main\n")?;

	common::mdsnip_cmd()
		.current_dir(tmp.path())
		.arg("--target")
		.arg("readme.md")
		.arg("--output")
		.arg("-")
		.assert()
		.success()
		.stdout("~~~~go\npackage main\n~~~~\n");

	assert_eq!(fs::read_to_string(tmp.path().join("readme.md"))?, original);

	Ok(())
}

#[rstest]
#[case::no_input(&[], "no input selected")]
#[case::both_inputs(&["--target", "readme.md", "--stdin"], "mutually exclusive")]
fn input_selection_usage_errors(#[case] args: &[&str], #[case] message: &str) -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;

	common::mdsnip_cmd()
		.current_dir(tmp.path())
		.args(args)
		.write_stdin("")
		.assert()
		.failure()
		.code(2)
		.stderr(predicates::str::contains(message));

	Ok(())
}

#[test]
fn missing_target_exits_with_run_failure() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;

	common::mdsnip_cmd()
		.current_dir(tmp.path())
		.arg("--target")
		.arg("absent.md")
		.assert()
		.failure()
		.code(1)
		.stderr(predicates::str::contains("absent.md"));

	Ok(())
}

#[test]
fn keep_tags_leaves_the_directive_behind() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	fs::write(tmp.path().join("readme.md"), "{{ snippet foo }}\n")?;
	fs::write(tmp.path().join("foo.go"), "package main\n")?;

	common::mdsnip_cmd()
		.current_dir(tmp.path())
		.arg("--target")
		.arg("readme.md")
		.arg("--keep-tags")
		.assert()
		.success();

	assert_eq!(
		fs::read_to_string(tmp.path().join("readme.md"))?,
		"~~~~go\npackage main\n~~~~\n\n{{ snippet foo }}\n"
	);

	Ok(())
}

#[test]
fn extension_flag_restricts_candidates() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	fs::write(tmp.path().join("readme.md"), "{{ snippet foo }}\n")?;
	fs::write(tmp.path().join("foo.go"), "package main\n")?;
	fs::write(tmp.path().join("foo.sh"), "echo hi\n")?;

	common::mdsnip_cmd()
		.current_dir(tmp.path())
		.arg("--target")
		.arg("readme.md")
		.arg("--extension")
		.arg("go")
		.assert()
		.success()
		.stdout(predicates::str::contains("1 snippet(s) injected"));

	assert_eq!(
		fs::read_to_string(tmp.path().join("readme.md"))?,
		"~~~~go\npackage main\n~~~~\n"
	);

	Ok(())
}

#[test]
fn extension_flag_remaps_fence_tags() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	fs::write(tmp.path().join("readme.md"), "{{ snippet foo }}\n")?;
	fs::write(tmp.path().join("foo.sh"), "echo hi\n")?;

	common::mdsnip_cmd()
		.current_dir(tmp.path())
		.arg("--target")
		.arg("readme.md")
		.arg("--extension")
		.arg("sh:bash")
		.assert()
		.success();

	assert_eq!(
		fs::read_to_string(tmp.path().join("readme.md"))?,
		"~~~~bash\necho hi\n~~~~\n"
	);

	Ok(())
}

#[test]
fn unreadable_candidates_warn_but_do_not_fail() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	fs::write(tmp.path().join("readme.md"), "{{ snippet foo }}\n")?;
	fs::write(tmp.path().join("foo.go"), "package main\n")?;
	fs::write(tmp.path().join("foo.sh"), [0xFF, 0xFE, 0xFD])?;

	common::mdsnip_cmd()
		.current_dir(tmp.path())
		.arg("--target")
		.arg("readme.md")
		.assert()
		.success()
		.stdout(predicates::str::contains("1 candidate(s) skipped"))
		.stderr(predicates::str::contains("warning:"))
		.stderr(predicates::str::contains("foo.sh"));

	assert_eq!(
		fs::read_to_string(tmp.path().join("readme.md"))?,
		"~~~~go\npackage main\n~~~~\n"
	);

	Ok(())
}

#[test]
fn no_recursive_skips_nested_snippets() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	fs::create_dir_all(tmp.path().join("snippets/nested"))?;
	fs::write(tmp.path().join("snippets/nested/foo.go"), "package main\n")?;
	fs::write(tmp.path().join("flat.md"), "{{ snippet foo }}\n")?;
	fs::write(tmp.path().join("deep.md"), "{{ snippet foo }}\n")?;

	common::mdsnip_cmd()
		.current_dir(tmp.path())
		.arg("--target")
		.arg("flat.md")
		.arg("--snippet-dir")
		.arg("snippets")
		.arg("--no-recursive")
		.assert()
		.success()
		.stdout(predicates::str::contains("0 snippet(s) injected"));

	common::mdsnip_cmd()
		.current_dir(tmp.path())
		.arg("--target")
		.arg("deep.md")
		.arg("--snippet-dir")
		.arg("snippets")
		.assert()
		.success()
		.stdout(predicates::str::contains("1 snippet(s) injected"));

	assert_eq!(fs::read_to_string(tmp.path().join("flat.md"))?, "");
	assert_eq!(
		fs::read_to_string(tmp.path().join("deep.md"))?,
		"~~~~go\npackage main\n~~~~\n"
	);

	Ok(())
}

#[test]
fn verbose_flag_surfaces_resolver_logs() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	fs::write(tmp.path().join("foo.go"), "package main\n")?;

	common::mdsnip_cmd()
		.current_dir(tmp.path())
		.arg("--stdin")
		.arg("-vv")
		.write_stdin("{{ snippet foo }}\n")
		.assert()
		.success()
		.stderr(predicates::str::contains("resolved candidates"));

	Ok(())
}
