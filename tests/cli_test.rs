use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Get the path to the logstrip binary
fn bin_path() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_logstrip"))
}

fn write(root: &Path, rel: &str, content: &[u8]) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// A small frontend tree with the conventional top-level folders
fn fixture_tree() -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path();

    write(
        root,
        "app/page.tsx",
        b"export default function Page() {\n  console.log('render');\n  return null;\n}\n",
    );
    write(
        root,
        "components/Card.jsx",
        b"console.log({\n  props,\n});\nconsole.error('bad');\nexport const Card = 1;\n",
    );
    write(root, "hooks/useThing.ts", b"console.warn('deprecated');\nexport {};\n");
    write(root, "lib/clean.js", b"export const x = 1;\n");
    write(root, "lib/styles.css", b"console.log(1);\n");
    write(root, "lib/node_modules/pkg/index.js", b"console.log('vendored');\n");
    write(root, "scripts/seed.ts", b"console.log('outside include dirs');\n");

    dir
}

fn run(args: &[&str]) -> Output {
    Command::new(bin_path())
        .args(args)
        .output()
        .expect("Failed to execute binary")
}

fn read(root: &Path, rel: &str) -> String {
    fs::read_to_string(root.join(rel)).unwrap()
}

#[test]
fn test_sweep_rewrites_files() {
    let dir = fixture_tree();
    let root = dir.path();

    let output = run(&[root.to_str().unwrap()]);

    assert!(output.status.success(), "Binary failed: {:?}", String::from_utf8_lossy(&output.stderr));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("✓ app/page.tsx"), "Unexpected output: {}", stdout);
    assert!(stdout.contains("Files scanned: 4"), "Unexpected output: {}", stdout);
    assert!(stdout.contains("Files modified: 3"), "Unexpected output: {}", stdout);

    assert_eq!(
        read(root, "app/page.tsx"),
        "export default function Page() {\n  return null;\n}\n"
    );
    assert_eq!(
        read(root, "components/Card.jsx"),
        "console.error('bad');\nexport const Card = 1;\n"
    );
    assert_eq!(read(root, "hooks/useThing.ts"), "export {};\n");
    assert_eq!(read(root, "lib/clean.js"), "export const x = 1;\n");

    // Outside the extension set, excluded, or outside include dirs
    assert_eq!(read(root, "lib/styles.css"), "console.log(1);\n");
    assert_eq!(read(root, "lib/node_modules/pkg/index.js"), "console.log('vendored');\n");
    assert_eq!(read(root, "scripts/seed.ts"), "console.log('outside include dirs');\n");
}

#[test]
fn test_second_run_changes_nothing() {
    let dir = fixture_tree();
    let root = dir.path().to_str().unwrap();

    assert!(run(&[root]).status.success());
    let output = run(&[root]);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Files modified: 0"), "Unexpected output: {}", stdout);
}

#[test]
fn test_dry_run_writes_nothing() {
    let dir = fixture_tree();
    let root = dir.path();

    let output = run(&[root.to_str().unwrap(), "--dry-run"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("(dry run"), "Unexpected output: {}", stdout);
    assert!(read(root, "app/page.tsx").contains("console.log('render');"));
}

#[test]
fn test_json_output() {
    let dir = fixture_tree();
    let root = dir.path();

    let output = run(&[root.to_str().unwrap(), "--json", "--execution-id", "run-1"]);

    assert!(output.status.success(), "Binary failed: {:?}", String::from_utf8_lossy(&output.stderr));

    let stdout = String::from_utf8_lossy(&output.stdout);
    let json: serde_json::Value = serde_json::from_str(&stdout).expect("Output should be valid JSON");

    assert_eq!(json["execution_id"], "run-1");
    assert_eq!(json["files_scanned"], 4);
    assert_eq!(json["files_modified"], 3);
    assert_eq!(json["lines_removed"], 5);

    let files = json["files"].as_array().unwrap();
    assert_eq!(files.len(), 3);
    let card = files
        .iter()
        .find(|f| f["path"] == "components/Card.jsx")
        .expect("Card.jsx should be reported");
    assert_eq!(card["status"], "modified");
    assert_eq!(card["spans"][0]["start_line"], 1);
    assert_eq!(card["spans"][0]["end_line"], 3);
}

#[test]
fn test_json_output_to_file() {
    let dir = fixture_tree();
    let root = dir.path();
    let out_dir = TempDir::new().unwrap();
    let output_file = out_dir.path().join("report.json");

    let output = run(&[
        root.to_str().unwrap(),
        "--json",
        "--output",
        output_file.to_str().unwrap(),
    ]);

    assert!(output.status.success(), "Binary failed: {:?}", String::from_utf8_lossy(&output.stderr));
    assert!(output.stdout.is_empty());

    let content = fs::read_to_string(&output_file).expect("Failed to read output file");
    let json: serde_json::Value = serde_json::from_str(&content).expect("Output file should contain valid JSON");
    assert!(uuid_like(json["execution_id"].as_str().unwrap()));
}

fn uuid_like(s: &str) -> bool {
    s.len() == 36 && s.chars().filter(|c| *c == '-').count() == 4
}

#[test]
fn test_all_flag_and_extra_exclude() {
    let dir = fixture_tree();
    let root = dir.path();

    let output = run(&[root.to_str().unwrap(), "--all", "--exclude", "components"]);

    assert!(output.status.success());
    assert_eq!(read(root, "scripts/seed.ts"), "");
    assert!(read(root, "components/Card.jsx").starts_with("console.log({"));
    assert_eq!(read(root, "lib/node_modules/pkg/index.js"), "console.log('vendored');\n");
}

#[test]
fn test_custom_tokens_and_extensions() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    write(root, "src/app.py", b"logger.debug(\n  x\n)\nlogger.error(y)\nprint(z)\n");

    let output = run(&[
        root.to_str().unwrap(),
        "--dir",
        "src",
        "--ext",
        ".py",
        "--target",
        "logger.debug(",
        "--exempt",
        "logger.error",
        "--warn",
        "logger.warning",
    ]);

    assert!(output.status.success(), "Binary failed: {:?}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(read(root, "src/app.py"), "logger.error(y)\nprint(z)\n");
}

#[test]
fn test_config_file() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    write(root, "web/index.mjs", b"console.log('a');\nrun();\n");
    write(root, "web/other.ts", b"console.log('b');\n");

    let config_path = root.join("logstrip.toml");
    fs::write(
        &config_path,
        format!(
            "root = {:?}\ninclude_dirs = [\"web\"]\nextensions = [\"mjs\"]\n",
            root.to_str().unwrap()
        ),
    )
    .unwrap();

    let output = run(&["--config", config_path.to_str().unwrap()]);

    assert!(output.status.success(), "Binary failed: {:?}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(read(root, "web/index.mjs"), "run();\n");
    assert_eq!(read(root, "web/other.ts"), "console.log('b');\n");
}

#[test]
fn test_binary_file_is_skipped_not_fatal() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    write(root, "lib/blob.js", b"\xFF\xFE\x00\x01");
    write(root, "lib/ok.js", b"console.log(1);\nok();\n");

    let output = run(&[root.to_str().unwrap()]);

    assert!(output.status.success(), "Skipped files should not fail the run");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Files skipped: 1"), "Unexpected output: {}", stdout);
    assert_eq!(read(root, "lib/ok.js"), "ok();\n");
    assert_eq!(fs::read(root.join("lib/blob.js")).unwrap(), b"\xFF\xFE\x00\x01".to_vec());
}

#[test]
fn test_missing_config_fails() {
    let output = run(&["--config", "/nonexistent/logstrip.toml"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error:"), "Expected error message, got: {}", stderr);
}

#[test]
fn test_root_must_be_directory() {
    let output = run(&["/nonexistent/project/root"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("not a directory"), "Unexpected error: {}", stderr);
}

#[test]
fn test_write_failure_does_not_stop_the_run() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    write(root, "app/a.ts", b"console.log(1);\na();\n");
    write(root, "app/b.ts", b"console.log(2);\nb();\n");
    // A directory sitting on a.ts's temp path makes its rewrite fail
    fs::create_dir_all(root.join("app/.a.ts.logstrip.tmp")).unwrap();

    let output = run(&[root.to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(1), "A failed file should set exit status 1");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("✗ app/a.ts failed"), "Unexpected output: {}", stdout);
    assert!(stdout.contains("✓ app/b.ts"), "Unexpected output: {}", stdout);
    assert!(stdout.contains("Files failed: 1"), "Unexpected output: {}", stdout);
    assert_eq!(read(root, "app/a.ts"), "console.log(1);\na();\n");
    assert_eq!(read(root, "app/b.ts"), "b();\n");
}
