use std::path::PathBuf;

use ast_diff_core::{parse, parse_file, write, write_file, ParseError};

fn fixture(path: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join(path)
}

#[test]
fn parses_fields_in_document_order() {
    let node = parse_file(&fixture("fixtures/trees/program_a.json")).expect("parse should succeed");
    assert_eq!(node.kind(), Some("Program"));

    let keys: Vec<&str> = node.as_object().expect("object root").keys().collect();
    assert_eq!(keys, ["type", "body", "sourceType"]);

    let body = node.get("body").and_then(|b| b.as_array()).expect("body array");
    assert_eq!(body.len(), 2);
    assert_eq!(body[1].kind(), Some("ExpressionStatement"));
}

#[test]
fn malformed_input_is_a_parse_error() {
    let err = parse(br#"{"type": "Program", "body": [}"#).expect_err("should fail");
    assert!(matches!(err, ParseError::Json(_)));
}

#[test]
fn write_then_parse_preserves_tree() {
    let source = fixture("fixtures/trees/program_b.json");
    let first = parse_file(&source).expect("initial parse should succeed");

    let written = write(&first).expect("write should succeed");
    assert_eq!(parse(written.as_bytes()).expect("re-parse"), first);

    let out_dir = tempfile::tempdir().expect("tempdir should be created");
    let out_path = out_dir.path().join("roundtrip.json");
    write_file(&first, &out_path).expect("write_file should succeed");
    assert_eq!(parse_file(&out_path).expect("parse_file"), first);
}
