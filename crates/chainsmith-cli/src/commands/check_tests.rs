use std::fs;
use std::path::{Path, PathBuf};

use chainsmith_compiler::Error;

use super::check::{CheckArgs, check_all, check_loaded};
use super::definition_loader::parse_definition;

const GOOD: &str = r#"{
  "syntax": "a b",
  "actions": [{ "name": "a" }, { "name": "b", "terminator": true }]
}"#;

const UNDEFINED: &str = r#"{
  "syntax": "a missing",
  "actions": [{ "name": "a" }]
}"#;

const DUPLICATE: &str = r#"{
  "syntax": "a",
  "actions": [{ "name": "a" }, { "name": "a" }]
}"#;

const UNUSED: &str = r#"{
  "syntax": "a",
  "where": [{ "name": "spare", "definedAs": "a a" }],
  "actions": [{ "name": "a" }]
}"#;

fn args(definitions: Vec<PathBuf>, strict: bool) -> CheckArgs {
    CheckArgs {
        definitions,
        strict,
        color: false,
    }
}

fn check_text(text: &str, strict: bool) -> Result<bool, Error> {
    let path = Path::new("def.json");
    let definition = parse_definition(path, text).unwrap();
    check_loaded(&definition, path, &args(Vec::new(), strict))
}

/// Writes `text` to a file unique to this test run.
fn write_definition(name: &str, text: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("chainsmith-check-{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    fs::write(&path, text).unwrap();
    path
}

#[test]
fn valid_definition_passes() {
    assert!(matches!(check_text(GOOD, false), Ok(true)));
}

#[test]
fn undefined_identifier_fails() {
    assert!(matches!(check_text(UNDEFINED, false), Ok(false)));
}

#[test]
fn duplicate_actions_abort() {
    assert!(matches!(
        check_text(DUPLICATE, false),
        Err(Error::DuplicateAction(_))
    ));
}

#[test]
fn strict_fails_on_warnings() {
    assert!(matches!(check_text(UNUSED, false), Ok(true)));
    assert!(matches!(check_text(UNUSED, true), Ok(false)));
}

#[test]
fn failures_do_not_stop_the_batch() {
    let bad = write_definition("batch-bad.json", UNDEFINED);
    let good = write_definition("batch-good.json", GOOD);
    let missing = PathBuf::from("does/not/exist.json");

    let failed = check_all(&args(vec![bad, missing, good], false)).unwrap();
    assert_eq!(failed, 2);
}

#[test]
fn duplicate_actions_abort_the_batch() {
    let good = write_definition("abort-good.json", GOOD);
    let dup = write_definition("abort-dup.json", DUPLICATE);

    let Err((path, err)) = check_all(&args(vec![good, dup.clone()], false)) else {
        panic!("expected the batch to abort");
    };
    assert_eq!(path, dup);
    assert!(matches!(err, Error::DuplicateAction(_)));
}
