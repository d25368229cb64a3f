use std::path::Path;

use super::definition_loader::{LoadError, load_definition, origin, parse_definition};

#[test]
fn parses_definition_text() {
    let def = parse_definition(
        Path::new("inline.json"),
        r#"{ "syntax": "a b", "actions": [{ "name": "a" }, { "name": "b" }] }"#,
    )
    .unwrap();

    assert_eq!(def.syntax, "a b");
    assert_eq!(def.actions.len(), 2);
}

#[test]
fn parse_errors_name_the_file() {
    let err = parse_definition(Path::new("broken.json"), r#"{ "syntax": "a" }"#).unwrap_err();

    assert!(matches!(err, LoadError::Parse { .. }));
    assert!(
        err.to_string()
            .starts_with("broken.json: invalid definition: missing field `actions`")
    );
}

#[test]
fn missing_file_is_a_read_error() {
    let err = load_definition(Path::new("does/not/exist.json")).unwrap_err();

    let LoadError::Read { path, .. } = &err else {
        panic!("expected a read error, got {err}");
    };
    assert_eq!(path, Path::new("does/not/exist.json"));
    assert!(err.to_string().starts_with("failed to read 'does/not/exist.json': "));
}

#[test]
fn stdin_origin() {
    assert_eq!(origin(Path::new("-")), "<stdin>");
    assert_eq!(origin(Path::new("defs/dates.json")), "defs/dates.json");
}
