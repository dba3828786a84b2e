//! Response Tests
//!
//! Tests for UTF-8 decoding and JSON parsing of response payloads.

use kvline::protocol::{decode_response, decode_response_as};
use kvline::{ErrorKind, KvError};
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, Deserialize, PartialEq)]
struct Project {
    title: String,
    url: String,
}

#[test]
fn test_decode_object() {
    let value = decode_response(br#"{"title": "p1", "url": "https://github.com/karchx"}"#).unwrap();
    assert_eq!(value, json!({ "title": "p1", "url": "https://github.com/karchx" }));
}

#[test]
fn test_decode_scalars_and_arrays() {
    assert_eq!(decode_response(b"null").unwrap(), json!(null));
    assert_eq!(decode_response(b"true").unwrap(), json!(true));
    assert_eq!(decode_response(b"-1.5").unwrap(), json!(-1.5));
    assert_eq!(decode_response(b"\"s\"").unwrap(), json!("s"));
    assert_eq!(decode_response(b"[1, \"two\"]").unwrap(), json!([1, "two"]));
}

#[test]
fn test_decode_tolerates_surrounding_whitespace() {
    assert_eq!(decode_response(b"  {\"a\": 1}\r\n").unwrap(), json!({ "a": 1 }));
}

#[test]
fn test_decode_matches_direct_parse() {
    let doc = r#"{"list":[1,2,3],"nested":{"x":"é"}}"#;
    let direct: serde_json::Value = serde_json::from_str(doc).unwrap();
    assert_eq!(decode_response(doc.as_bytes()).unwrap(), direct);
}

#[test]
fn test_invalid_utf8_is_decode_error() {
    let err = decode_response(&[0x7b, 0xff, 0xfe, 0x7d]).unwrap_err();
    assert!(matches!(err, KvError::Decode(_)));
    assert_eq!(err.kind(), ErrorKind::Decode);
}

#[test]
fn test_not_json_is_parse_error() {
    let err = decode_response(b"not json").unwrap_err();
    assert!(matches!(err, KvError::Parse(_)));
    assert_eq!(err.kind(), ErrorKind::Parse);
}

#[test]
fn test_ok_acknowledgement_is_parse_error() {
    assert!(matches!(decode_response(b"OK"), Err(KvError::Parse(_))));
}

#[test]
fn test_empty_payload_is_parse_error() {
    assert!(matches!(decode_response(b""), Err(KvError::Parse(_))));
}

#[test]
fn test_decode_typed() {
    let project: Project =
        decode_response_as(br#"{"title": "p1", "url": "https://github.com/karchx"}"#).unwrap();
    assert_eq!(
        project,
        Project {
            title: "p1".to_string(),
            url: "https://github.com/karchx".to_string(),
        }
    );
}

#[test]
fn test_decode_typed_shape_mismatch_is_parse_error() {
    let result: kvline::Result<Project> = decode_response_as(br#"{"title": 1}"#);
    assert!(matches!(result, Err(KvError::Parse(_))));
}
