use std::fs;

use homeui_engine::{ensure_output_dir, AtomicFileWriter};
use tempfile::TempDir;

#[test]
fn creates_missing_output_dir() {
    let temp = TempDir::new().unwrap();
    let new_dir = temp.path().join("out");
    assert!(!new_dir.exists());
    ensure_output_dir(&new_dir).unwrap();
    assert!(new_dir.is_dir());
}

#[test]
fn atomic_write_replaces_existing_image() {
    let temp = TempDir::new().unwrap();
    let writer = AtomicFileWriter::new(temp.path().to_path_buf());

    let first = writer.write("output.png", b"old-bytes").unwrap();
    assert_eq!(first.file_name().unwrap(), "output.png");
    assert_eq!(fs::read(&first).unwrap(), b"old-bytes");

    // Rerunning a capture overwrites the previous image.
    let second = writer.write("output.png", b"new-bytes").unwrap();
    assert_eq!(first, second);
    assert_eq!(fs::read(&second).unwrap(), b"new-bytes");
}

#[test]
fn no_partial_file_on_error() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("not_a_dir");
    fs::write(&file_path, "x").unwrap();

    let writer = AtomicFileWriter::new(file_path.clone());
    let result = writer.write("output.png", b"data");
    assert!(result.is_err());
    assert!(!file_path.with_file_name("output.png").exists());
}
