//! Codec Tests
//!
//! Tests for request line encoding/decoding and validation.

use kvline::protocol::{decode_command, encode_command, validate_key, validate_line, Command, CommandType};
use kvline::KvError;
use serde_json::json;

// =============================================================================
// Command Encoding Tests
// =============================================================================

#[test]
fn test_encode_get() {
    let cmd = Command::get("projects").unwrap();
    assert_eq!(encode_command(&cmd).unwrap(), "GET projects");
}

#[test]
fn test_encode_set_is_compact_json() {
    let cmd = Command::set(
        "projects",
        json!({ "title": "p1", "url": "https://github.com/karchx" }),
    )
    .unwrap();
    let line = encode_command(&cmd).unwrap();

    assert_eq!(
        line,
        r#"SET projects {"title":"p1","url":"https://github.com/karchx"}"#
    );
}

#[test]
fn test_encode_set_escapes_newlines_in_strings() {
    let cmd = Command::set("note", json!("line one\nline two")).unwrap();
    let line = encode_command(&cmd).unwrap();

    assert!(!line.contains('\n'));
    assert_eq!(line, r#"SET note "line one\nline two""#);
}

#[test]
fn test_encode_rejects_hand_built_invalid_key() {
    let cmd = Command::Get {
        key: "two words".to_string(),
    };
    assert!(matches!(encode_command(&cmd), Err(KvError::Protocol(_))));
}

// =============================================================================
// Command Decoding Tests
// =============================================================================

#[test]
fn test_decode_get() {
    match decode_command("GET projects").unwrap() {
        Command::Get { key } => assert_eq!(key, "projects"),
        _ => panic!("Expected GET command"),
    }
}

#[test]
fn test_decode_set_with_spaced_json() {
    let cmd = decode_command(r#"SET projects { "title": "p1", "url": "https://github.com/karchx" }"#)
        .unwrap();

    match cmd {
        Command::Set { key, value } => {
            assert_eq!(key, "projects");
            assert_eq!(value["title"], "p1");
            assert_eq!(value["url"], "https://github.com/karchx");
        }
        _ => panic!("Expected SET command"),
    }
}

#[test]
fn test_decode_verb_is_case_insensitive() {
    assert_eq!(decode_command("get k").unwrap().command_type(), CommandType::Get);
    assert_eq!(decode_command("Set k 1").unwrap().command_type(), CommandType::Set);
}

#[test]
fn test_decode_strips_one_terminator() {
    assert_eq!(decode_command("GET k\n").unwrap().key(), "k");
    assert_eq!(decode_command("GET k\r\n").unwrap().key(), "k");
}

#[test]
fn test_encoded_set_decodes_to_same_command() {
    let cmd = Command::set("cfg", json!({ "nested": [1, 2, { "ok": true }], "n": null })).unwrap();
    let decoded = decode_command(&encode_command(&cmd).unwrap()).unwrap();
    assert_eq!(decoded, cmd);
}

// =============================================================================
// Error Handling Tests
// =============================================================================

#[test]
fn test_unknown_verb() {
    assert!(matches!(decode_command("DEL projects"), Err(KvError::Protocol(_))));
}

#[test]
fn test_get_missing_key() {
    assert!(matches!(decode_command("GET"), Err(KvError::Protocol(_))));
    assert!(matches!(decode_command("GET   "), Err(KvError::Protocol(_))));
}

#[test]
fn test_get_extra_arguments() {
    assert!(matches!(decode_command("GET a b"), Err(KvError::Protocol(_))));
}

#[test]
fn test_set_missing_value() {
    assert!(matches!(decode_command("SET projects"), Err(KvError::Protocol(_))));
    assert!(matches!(decode_command("SET"), Err(KvError::Protocol(_))));
}

#[test]
fn test_set_invalid_json_value() {
    assert!(matches!(decode_command("SET projects {oops"), Err(KvError::Parse(_))));
}

#[test]
fn test_embedded_newline_rejected() {
    assert!(matches!(decode_command("GET a\nGET b"), Err(KvError::Protocol(_))));
}

// =============================================================================
// Validation Tests
// =============================================================================

#[test]
fn test_validate_key() {
    assert!(validate_key("projects").is_ok());
    assert!(validate_key("user:42/settings").is_ok());
    assert!(validate_key("").is_err());
    assert!(validate_key("a b").is_err());
    assert!(validate_key("tab\tkey").is_err());
    assert!(validate_key("nul\0key").is_err());
}

#[test]
fn test_validate_line() {
    assert!(validate_line("GET projects").is_ok());
    assert!(validate_line("").is_err());
    assert!(validate_line("   ").is_err());
    assert!(validate_line("GET a\r").is_err());
}

#[test]
fn test_constructors_validate_keys() {
    assert!(Command::get("").is_err());
    assert!(Command::set("has space", json!(1)).is_err());
}
