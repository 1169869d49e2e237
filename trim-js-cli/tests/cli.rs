use assert_cmd::Command;
use serde_json::Value;
use std::time::Duration;

fn trim_js() -> Command {
  let mut cmd = Command::cargo_bin("trim-js").unwrap();
  cmd.timeout(Duration::from_secs(5));
  cmd
}

#[test]
fn minifies_stdin_to_stdout() {
  let assert = trim_js()
    .write_stdin("var x = 1;\nvar y = 2;")
    .assert()
    .success()
    .code(0);

  assert_eq!(
    String::from_utf8_lossy(&assert.get_output().stdout),
    "var x=1;var y=2;"
  );
  assert!(
    assert.get_output().stderr.is_empty(),
    "expected stderr to be empty, got: {}",
    String::from_utf8_lossy(&assert.get_output().stderr)
  );
}

#[test]
fn mangle_renames_locals() {
  let assert = trim_js()
    .arg("--mangle")
    .write_stdin("function f(longname) { return longname; }")
    .assert()
    .success();

  assert_eq!(
    String::from_utf8_lossy(&assert.get_output().stdout),
    "function f(a){return a;}"
  );
}

#[test]
fn syntax_errors_go_to_stderr_with_position() {
  let assert = trim_js()
    .write_stdin("var x = ;")
    .assert()
    .failure()
    .code(1);

  assert!(
    assert.get_output().stdout.is_empty(),
    "expected stdout to be empty"
  );
  let stderr = String::from_utf8_lossy(&assert.get_output().stderr);
  assert!(
    stderr.contains("<stdin>:1:9"),
    "expected position in stderr, got: {stderr}"
  );
}

#[test]
fn dump_ast_prints_json() {
  let assert = trim_js()
    .arg("--dump-ast")
    .write_stdin("var x = 1;")
    .assert()
    .success();

  let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
  let value: Value = serde_json::from_str(&stdout).expect("stdout to be valid JSON");
  assert!(value["body"].is_array());
}
