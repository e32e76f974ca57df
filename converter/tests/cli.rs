use std::fs;
use std::process::Command;
use tempfile::tempdir;

fn converter() -> Command {
    Command::new(env!("CARGO_BIN_EXE_format_converter"))
}

#[test]
fn converts_and_verifies() {
    let dir = tempdir().unwrap();
    let data = dir.path().join("docword.txt");
    let output = dir.path().join("train.txt");
    fs::write(&data, "3\n4\n4\n2 4 1\n1 1 5\n2 2 3\n3 3 0\n").unwrap();

    let status = converter()
        .arg("--data_file").arg(&data)
        .arg("--output_file").arg(&output)
        .arg("--verify")
        .status()
        .unwrap();
    assert!(status.success());
    assert_eq!(fs::read_to_string(&output).unwrap(), "1 4:1 2:3\n0 1:5\n2 3:0\n");
}

#[test]
fn sorted_order_flag() {
    let dir = tempdir().unwrap();
    let data = dir.path().join("docword.txt");
    let output = dir.path().join("train.txt");
    fs::write(&data, "2\n3\n2\n2 2 3\n1 1 5\n").unwrap();

    let status = converter()
        .arg("--data_file").arg(&data)
        .arg("--output_file").arg(&output)
        .args(["--order", "sorted"])
        .status()
        .unwrap();
    assert!(status.success());
    assert_eq!(fs::read_to_string(&output).unwrap(), "0 1:5\n1 2:3\n");
}

#[test]
fn malformed_input_fails_with_line_context() {
    let dir = tempdir().unwrap();
    let data = dir.path().join("docword.txt");
    fs::write(&data, "1\n1\n1\n1 one 1\n").unwrap();

    let out = converter()
        .arg("--data_file").arg(&data)
        .arg("--output_file").arg(dir.path().join("train.txt"))
        .output()
        .unwrap();
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("docword.txt:4"), "stderr: {stderr}");
}

#[test]
fn missing_flags_and_files_fail() {
    let out = converter().output().unwrap();
    assert!(!out.status.success());

    let dir = tempdir().unwrap();
    let out = converter()
        .arg("--data_file").arg(dir.path().join("absent.txt"))
        .arg("--output_file").arg(dir.path().join("train.txt"))
        .output()
        .unwrap();
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("absent.txt"));
}
