use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn copy_fixture(name: &str, dir: &tempfile::TempDir) -> PathBuf {
    let target = dir.path().join(name);
    fs::copy(fixture_path(name), &target).unwrap();
    target
}

#[test]
fn compile_argument_to_stdout() {
    let mut cmd = cargo_bin_cmd!("iris");
    cmd.arg("compile").arg("V(g4){ S(h4) }");

    let output_pred = predicate::str::contains("<div className=\"flex flex-col gap-4\">")
        .and(predicate::str::contains("  <Skeleton className=\"h-4\" />"));

    cmd.assert().success().stdout(output_pred);
}

#[test]
fn compile_reads_stdin() {
    let mut cmd = cargo_bin_cmd!("iris");
    cmd.arg("compile").write_stdin("S(h4 w.5)");

    cmd.assert()
        .success()
        .stdout("<Skeleton className=\"w-[50%] h-4\" />\n");
}

#[test]
fn compile_minified_without_fragment() {
    let mut cmd = cargo_bin_cmd!("iris");
    cmd.args(["compile", "S(h4) S(h3)", "--minify", "--no-fragment"]);

    cmd.assert().success().stdout(
        "<div className=\"flex flex-col\"><Skeleton className=\"h-4\" /><Skeleton className=\"h-3\" /></div>\n",
    );
}

#[test]
fn compile_emits_ast() {
    let mut cmd = cargo_bin_cmd!("iris");
    cmd.args(["compile", "V(g4){ x2{ S } }", "--emit", "ast", "--minify"]);

    cmd.assert().success().stdout(
        "{\"type\":\"VStack\",\"gap\":4,\"children\":[{\"type\":\"Repeat\",\"count\":2,\"child\":{\"type\":\"Skeleton\"}}]}\n",
    );
}

#[test]
fn compile_writes_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("out.jsx");

    let mut cmd = cargo_bin_cmd!("iris");
    cmd.arg("compile").arg("S(r)").arg("-o").arg(&target);
    cmd.assert().success().stdout(predicate::str::is_empty());

    assert_eq!(
        fs::read_to_string(&target).unwrap(),
        "<Skeleton className=\"rounded-full\" />\n"
    );
}

#[test]
fn parse_errors_exit_with_failure() {
    let mut cmd = cargo_bin_cmd!("iris");
    cmd.arg("compile").arg("V{ S(g2) }");

    cmd.assert().failure().code(1).stderr(
        predicate::str::contains("Parse error at line 1, column 6:")
            .and(predicate::str::contains("Property `g2` is not allowed on S")),
    );
}

#[test]
fn validate_flag_rejects_out_of_range_values() {
    let mut cmd = cargo_bin_cmd!("iris");
    cmd.args(["compile", "S(w0)", "--validate"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Invalid width value: 0. Must be > 0."));

    let mut cmd = cargo_bin_cmd!("iris");
    cmd.args(["compile", "S(w0)"]);
    cmd.assert().success().stdout(predicate::str::contains("w-0"));
}

#[test]
fn file_mode_writes_sibling_jsx() {
    let dir = tempfile::tempdir().unwrap();
    let input = copy_fixture("example.iris", &dir);

    let mut cmd = cargo_bin_cmd!("iris");
    cmd.arg(&input);
    cmd.assert().success();

    let written = fs::read_to_string(dir.path().join("example.jsx")).unwrap();
    let expected = fs::read_to_string(fixture_path("example.jsx")).unwrap();
    assert_eq!(written.trim_end(), expected.trim_end());
}

#[test]
fn file_mode_honours_output_and_indent() {
    let dir = tempfile::tempdir().unwrap();
    let input = copy_fixture("simple.iris", &dir);
    let target = dir.path().join("simple-out.jsx");

    let mut cmd = cargo_bin_cmd!("iris");
    cmd.arg(&input).arg("-o").arg(&target).args(["--indent", "4"]);
    cmd.assert().success();

    assert_eq!(
        fs::read_to_string(&target).unwrap(),
        "<div className=\"flex flex-col gap-4\">\n    <Skeleton className=\"h-4\" />\n</div>\n"
    );
}

#[test]
fn file_mode_rejects_other_extensions() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("layout.txt");
    fs::write(&input, "S(h4)").unwrap();

    let mut cmd = cargo_bin_cmd!("iris");
    cmd.arg(&input);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("must have a .iris extension"));
    assert!(!dir.path().join("layout.jsx").exists());
}

#[test]
fn file_mode_reports_missing_input() {
    let dir = tempfile::tempdir().unwrap();

    let mut cmd = cargo_bin_cmd!("iris");
    cmd.arg(dir.path().join("missing.iris"));
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read"));
}

#[test]
fn no_arguments_prints_help() {
    let mut cmd = cargo_bin_cmd!("iris");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Usage:"));
}
