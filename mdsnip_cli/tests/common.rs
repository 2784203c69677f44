use assert_cmd::Command;

pub fn mdsnip_cmd() -> Command {
	let mut cmd =
		Command::cargo_bin("mdsnip").unwrap_or_else(|error| panic!("missing binary: {error}"));
	cmd.env("NO_COLOR", "1");
	cmd
}
