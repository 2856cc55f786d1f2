// in tests/integration.rs

use std::{
    fs,
    io::Write,
    path::Path,
    process::{Command, Output, Stdio},
};

use which::which;

fn gobake(args: &[&str], stdin: &[u8], dir: &Path) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_gobake"))
        .args(args)
        .current_dir(dir)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to start gobake");
    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(stdin)
        .expect("Failed to write stdin");
    child.wait_with_output().expect("Failed to wait for gobake")
}

fn assert_success(output: &Output) {
    assert!(
        output.status.success(),
        "gobake failed:\n--- stdout\n{}\n--- stderr\n{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
}

/// Checks that gofmt can parse `source`, if Go is installed.
fn assert_parses_as_go(source: &str) {
    let Ok(gofmt) = which("gofmt") else {
        eprintln!("gofmt not found in PATH, skipping parse check");
        return;
    };
    let tmp = tempfile::tempdir().expect("tempdir");
    let file = tmp.path().join("baked.go");
    fs::write(&file, source).expect("write Go file");
    let output = Command::new(gofmt)
        .arg("-e")
        .arg("-l")
        .arg(&file)
        .output()
        .expect("Failed to run gofmt");
    assert!(
        output.status.success(),
        "gofmt rejected generated source:\n{source}\n--- stderr\n{}",
        String::from_utf8_lossy(&output.stderr)
    );
}

#[test]
fn stdin_to_stdout() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let output = gobake(&[], b"hi", tmp.path());
    assert_success(&output);

    let stdout = String::from_utf8(output.stdout).expect("non UTF-8 output from gobake");
    assert_eq!(
        stdout,
        "// File generated by \"gobake\"\n\
         // DO NOT EDIT!\n\
         \n\
         package main\n\
         \n\
         import (\n\
         \t\"io\"\n\
         \t\"io/ioutil\"\n\
         \t\"strings\"\n\
         )\n\
         \n\
         func stdin() io.ReadCloser {\n\
         \tconst a = \"\\x68\\x69\"\n\
         \treturn ioutil.NopCloser(strings.NewReader(a))\n\
         }\n"
    );
    assert_parses_as_go(&stdout);
}

#[test]
fn file_to_file_with_gzip() {
    let tmp = tempfile::tempdir().expect("tempdir");
    fs::write(tmp.path().join("doc.go"), "// Package assets holds baked files.\npackage assets\n")
        .expect("write doc.go");
    let value: Vec<u8> = (0..=255u8).cycle().take(1000).collect();
    fs::write(tmp.path().join("table.bin"), &value).expect("write input");

    let args = [
        "--compress",
        "gzip",
        "--export",
        "--output",
        "table.go",
        "table.bin",
    ];
    let output = gobake(&args, b"", tmp.path());
    assert_success(&output);
    assert!(output.stdout.is_empty());

    let source = fs::read_to_string(tmp.path().join("table.go")).expect("read output");
    assert!(source.starts_with(
        "// File generated by \"gobake --compress gzip --export --output table.go table.bin\"\n"
    ));
    assert!(source.contains("package assets\n"));
    assert!(source.contains("import (\n\t\"compress/gzip\"\n\t\"io\"\n\t\"strings\"\n)\n"));
    assert!(source.contains("func Table() io.ReadCloser {\n\tconst a = \""));
    assert!(source.ends_with("\tgr, _ := gzip.NewReader(strings.NewReader(a))\n\treturn gr\n}\n"));
    assert_parses_as_go(&source);
}

#[test]
fn typed_var_with_import() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let args = [
        "--decl",
        "var",
        "--type",
        "json.RawMessage",
        "--import",
        "encoding/json",
        "--name",
        "config.json",
        "--package",
        "conf",
    ];
    let output = gobake(&args, b"{}", tmp.path());
    assert_success(&output);

    let stdout = String::from_utf8(output.stdout).expect("non UTF-8 output from gobake");
    assert!(stdout.contains("package conf\n\nimport (\n\t\"encoding/json\"\n)\n\n"));
    assert!(stdout.ends_with("var config_json = json.RawMessage(\"\\x7b\\x7d\")\n"));
    assert_parses_as_go(&stdout);
}

#[test]
fn empty_const_has_no_imports() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let output = gobake(&["--decl", "const", "--type", "[]byte"], b"", tmp.path());
    assert_success(&output);

    let stdout = String::from_utf8(output.stdout).expect("non UTF-8 output from gobake");
    assert!(!stdout.contains("import"));
    assert!(stdout.ends_with("\n\nconst stdin = \"\"\n"));
    assert_parses_as_go(&stdout);
}

#[test]
fn long_value_wraps() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let value = [b'z'; 33];
    let output = gobake(&["--decl", "const"], &value, tmp.path());
    assert_success(&output);

    let stdout = String::from_utf8(output.stdout).expect("non UTF-8 output from gobake");
    let decl: Vec<&str> = stdout
        .lines()
        .skip_while(|l| !l.starts_with("const "))
        .collect();
    assert_eq!(decl.len(), 3);
    assert!(decl[0].ends_with("\" +"));
    assert!(decl[1].starts_with("\t\""));
    assert_eq!(decl[2], "\t\"\\x7a\"");
    assert_parses_as_go(&stdout);
}

#[test]
fn missing_input_fails_without_output() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let output = gobake(&["--output", "out.go", "missing.bin"], b"", tmp.path());
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("read file 'missing.bin'"), "stderr: {stderr}");
    assert!(!tmp.path().join("out.go").exists());
}

#[test]
fn name_without_letters_fails() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let output = gobake(&["--name", "404", "--output", "out.go"], b"x", tmp.path());
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("has no letters"), "stderr: {stderr}");
    assert!(!tmp.path().join("out.go").exists());
}
