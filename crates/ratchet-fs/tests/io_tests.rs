use ratchet_fs::{NormalizedPath, io};
use std::fs;
use tempfile::TempDir;

const RECORD: &str = r#"{
  "recordVersion": 1,
  "configHash": "sha256:abc",
  "files": {}
}"#;

#[test]
fn test_write_atomic_creates_record() {
    let temp = TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path().join(".ratchet.rec.json"));

    io::write_atomic(&path, RECORD.as_bytes()).unwrap();

    let content = fs::read_to_string(path.to_native()).unwrap();
    assert_eq!(content, RECORD);
}

#[test]
fn test_write_atomic_replaces_existing_record() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join(".ratchet.rec.json");
    fs::write(&file_path, "<<<<<<< HEAD\nstale\n>>>>>>> branch\n").unwrap();

    let path = NormalizedPath::new(&file_path);
    io::write_atomic(&path, RECORD.as_bytes()).unwrap();

    let content = fs::read_to_string(&file_path).unwrap();
    assert_eq!(content, RECORD);
}

#[test]
fn test_read_text_existing_file() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join(".ratchet.rec.json");
    fs::write(&file_path, RECORD).unwrap();

    let path = NormalizedPath::new(&file_path);
    assert_eq!(io::read_text(&path).unwrap(), RECORD);
}

#[test]
fn test_read_text_nonexistent_file() {
    let path = NormalizedPath::new("/nonexistent/.ratchet.rec.json");
    assert!(io::read_text(&path).is_err());
}
