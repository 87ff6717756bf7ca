use std::fs;
use std::path::PathBuf;

use airq_core::{BatchError, JsonLinesSource, SourceError, UplinkSource, decode_file};

fn repo_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
}

#[test]
fn jsonl_source_reads_uplinks_from_fixture() {
    let path = repo_root()
        .join("tests")
        .join("golden")
        .join("mixed")
        .join("input.jsonl");
    let mut source = JsonLinesSource::open(&path).unwrap();

    let mut uplinks = 0;
    while let Some(_uplink) = source.next_uplink().unwrap() {
        uplinks += 1;
    }

    assert_eq!(uplinks, 6);
}

#[test]
fn missing_file_is_io_error() {
    let temp = tempfile::TempDir::new().unwrap();
    let err = match JsonLinesSource::open(&temp.path().join("missing.jsonl")) {
        Ok(_) => panic!("expected missing file to be rejected"),
        Err(err) => err,
    };
    assert!(matches!(err, SourceError::Io(_)));
}

#[test]
fn invalid_record_aborts_batch() {
    let temp = tempfile::TempDir::new().unwrap();
    let path = temp.path().join("broken.jsonl");
    fs::write(&path, "{\"port\":1,\"hex\":\"012c0000\"}\n{\"port\":1,\"hex\":\"zz\"}\n").unwrap();

    let err = decode_file(&path).unwrap_err();
    assert!(matches!(
        err,
        BatchError::Source(SourceError::InvalidRecord { line: 2, .. })
    ));
    assert!(err.to_string().contains("invalid hex payload"));
}

#[test]
fn empty_file_decodes_to_empty_report() {
    let temp = tempfile::TempDir::new().unwrap();
    let path = temp.path().join("empty.jsonl");
    fs::write(&path, "").unwrap();

    let report = decode_file(&path).unwrap();
    assert_eq!(report.input.bytes, 0);
    assert!(report.entries.is_empty());
}
