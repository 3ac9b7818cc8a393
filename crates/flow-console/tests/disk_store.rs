use flow::{FileStore, FlowError};
use flow_console::DiskFileStore;
use std::path::Path;

#[test]
fn writes_and_reads_relative_to_base_dir() {
  let dir = tempfile::tempdir().expect("tempdir");
  let store = DiskFileStore::new(dir.path());

  store.write(Path::new("out.txt"), "uno\ndos\n").expect("write");
  assert_eq!(std::fs::read_to_string(dir.path().join("out.txt")).unwrap(), "uno\ndos\n");

  let lines = store.read_lines(Path::new("out.txt")).expect("read");
  assert_eq!(lines, vec!["uno".to_string(), "dos".to_string()]);
}

#[test]
fn write_replaces_previous_content() {
  let dir = tempfile::tempdir().expect("tempdir");
  let store = DiskFileStore::new(dir.path());
  store.write(Path::new("a.csv"), "1,2,3\n").unwrap();
  store.write(Path::new("a.csv"), "4\n").unwrap();
  assert_eq!(store.read_lines(Path::new("a.csv")).unwrap(), vec!["4".to_string()]);
}

#[test]
fn absolute_paths_ignore_base_dir() {
  let dir = tempfile::tempdir().expect("tempdir");
  let store = DiskFileStore::new("/does/not/matter");
  let target = dir.path().join("abs.txt");
  store.write(&target, "x").unwrap();
  assert_eq!(store.read_lines(&target).unwrap(), vec!["x".to_string()]);
}

#[test]
fn missing_file_reports_the_resolved_path() {
  let dir = tempfile::tempdir().expect("tempdir");
  let store = DiskFileStore::new(dir.path());
  match store.read_lines(Path::new("nope.txt")) {
    Err(FlowError::File { path, .. }) => assert_eq!(path, dir.path().join("nope.txt")),
    other => panic!("unexpected {:?}", other),
  }
}

#[test]
fn write_into_missing_directory_fails() {
  let dir = tempfile::tempdir().expect("tempdir");
  let store = DiskFileStore::new(dir.path().join("missing"));
  assert!(matches!(store.write(Path::new("x.txt"), "x"), Err(FlowError::File { .. })));
}
