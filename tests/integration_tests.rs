use std::io::Write;
use std::process::{Command, Stdio};

fn fastautils_cmd() -> Command {
    Command::new(env!("CARGO_BIN_EXE_fastautils"))
}

#[test]
fn cli_help_flag() {
    let output = fastautils_cmd()
        .arg("--help")
        .output()
        .expect("Failed to execute");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("fastautils"));
    assert!(stdout.contains("--count"));
    assert!(stdout.contains("--orf"));
}

#[test]
fn cli_version_flag() {
    let output = fastautils_cmd()
        .arg("--version")
        .output()
        .expect("Failed to execute");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn cli_missing_task() {
    let output = fastautils_cmd()
        .arg("tests/fixtures/simple.fa")
        .output()
        .expect("Failed to execute");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("required") || stderr.contains("Usage"));
}

#[test]
fn cli_invalid_sizes() {
    for sizes in ["abc", "0,2", "3,1", "2"] {
        let output = fastautils_cmd()
            .args(["-c", sizes, "tests/fixtures/simple.fa"])
            .output()
            .expect("Failed to execute");
        assert!(!output.status.success(), "sizes {sizes} should be rejected");
    }
}

#[test]
fn cli_invalid_file_path() {
    let output = fastautils_cmd()
        .args(["--orf", "--quiet", "/nonexistent/file.fa"])
        .output()
        .expect("Failed to execute");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Application error:"));
}

#[test]
fn cli_count_patterns() {
    let output = fastautils_cmd()
        .args(["-c", "1,1", "--quiet", "tests/fixtures/simple.fa"])
        .output()
        .expect("Failed to execute");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(
        stdout,
        "\"Sequence Id\",\"Size\",\"Sequence\",\"A\",\"C\",\"G\",\"T\"\n\
         \"seq1\",8,\"ACGTACGT\",2,2,2,2\n\
         \"seq2\",7,\"GATTACA\",3,1,1,2\n"
    );
}

#[test]
fn cli_find_orfs() {
    let output = fastautils_cmd()
        .args(["--orf", "--quiet", "tests/fixtures/orfs.fa"])
        .output()
        .expect("Failed to execute");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("\"Sequence\",\"First ORF\""));
    assert_eq!(stdout.lines().count(), 4);
}

#[test]
fn cli_not_fasta_fails_without_output() {
    let output = fastautils_cmd()
        .args(["-c", "1,2", "--quiet", "tests/fixtures/invalid.txt"])
        .output()
        .expect("Failed to execute");
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("not a valid FASTA file"));
}

#[test]
fn cli_stdin_default_when_path_omitted() {
    let mut child = fastautils_cmd()
        .args(["--orf", "--quiet"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn");

    child
        .stdin
        .as_mut()
        .unwrap()
        .write_all(b">seq\nATGAAATAAGGG\n")
        .expect("Failed to write to stdin");

    let output = child.wait_with_output().expect("Failed to wait");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(
        stdout.lines().nth(1),
        Some("\"seq\",\"ATGAAATAA\",0,9,\"ATGAAATAA\",0,9")
    );
}

#[test]
fn cli_format_json() {
    let output = fastautils_cmd()
        .args(["-c", "1,1", "-f", "json", "--quiet", "tests/fixtures/simple.fa"])
        .output()
        .expect("Failed to execute");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    for line in stdout.lines() {
        let row: serde_json::Value = serde_json::from_str(line).expect("valid JSON line");
        assert!(row.get("Sequence Id").is_some());
    }
}

#[test]
fn cli_percent_requires_count() {
    let output = fastautils_cmd()
        .args(["--orf", "--percent", "tests/fixtures/simple.fa"])
        .output()
        .expect("Failed to execute");
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("--percent"));
}

#[test]
fn cli_output_file_and_force() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let out = dir.path().join("table.csv");

    let first = fastautils_cmd()
        .args(["--orf", "--quiet", "tests/fixtures/orfs.fa", "-o"])
        .arg(&out)
        .output()
        .expect("Failed to execute");
    assert!(first.status.success());
    assert!(first.stdout.is_empty());
    let written = std::fs::read_to_string(&out).expect("output file written");
    assert_eq!(written.lines().count(), 4);

    let refused = fastautils_cmd()
        .args(["--orf", "--quiet", "tests/fixtures/simple.fa", "-o"])
        .arg(&out)
        .output()
        .expect("Failed to execute");
    assert!(!refused.status.success());
    assert!(String::from_utf8_lossy(&refused.stderr).contains("already exists"));
    assert_eq!(std::fs::read_to_string(&out).unwrap(), written);

    let forced = fastautils_cmd()
        .args(["--orf", "--quiet", "--force", "tests/fixtures/simple.fa", "-o"])
        .arg(&out)
        .output()
        .expect("Failed to execute");
    assert!(forced.status.success());
    assert_eq!(std::fs::read_to_string(&out).unwrap().lines().count(), 3);
}

#[test]
fn cli_missing_input_leaves_no_output_file() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let out = dir.path().join("table.csv");

    let output = fastautils_cmd()
        .args(["--orf", "--quiet", "/nonexistent/file.fa", "-o"])
        .arg(&out)
        .output()
        .expect("Failed to execute");
    assert!(!output.status.success());
    assert!(!out.exists(), "output file should not be created");
}

#[test]
fn cli_universe_too_large() {
    let output = fastautils_cmd()
        .args(["-c", "1,9", "-a", "amino-acid", "--quiet", "tests/fixtures/simple.fa"])
        .output()
        .expect("Failed to execute");
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}
