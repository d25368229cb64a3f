use std::path::{Path, PathBuf};

use chainsmith_compiler::{DslDefinition, Error};

use super::definition_loader::{load_definition, origin};
use super::run_common::report;

pub struct CheckArgs {
    pub definitions: Vec<PathBuf>,
    pub strict: bool,
    pub color: bool,
}

pub fn run(args: CheckArgs) {
    match check_all(&args) {
        Ok(0) => {}
        Ok(_) => std::process::exit(1),
        Err((path, err)) => {
            eprintln!("error: {}: {}", origin(&path), err);
            std::process::exit(1);
        }
    }

    // Silent on success (like cargo check)
}

/// Checks every definition and returns how many failed.
///
/// A failing definition does not stop the batch; a broken action list does,
/// since it is not the grammar author's mistake.
pub(super) fn check_all(args: &CheckArgs) -> Result<usize, (PathBuf, Error)> {
    let mut failed = 0usize;
    for path in &args.definitions {
        match check_definition(path, args) {
            Ok(true) => {}
            Ok(false) => failed += 1,
            Err(err) => return Err((path.clone(), err)),
        }
    }

    log::debug!(
        "checked {} definitions, {} failed",
        args.definitions.len(),
        failed
    );
    Ok(failed)
}

fn check_definition(path: &Path, args: &CheckArgs) -> Result<bool, Error> {
    match load_definition(path) {
        Ok(definition) => check_loaded(&definition, path, args),
        Err(err) => {
            eprintln!("error: {}", err);
            Ok(false)
        }
    }
}

/// Whether `definition` compiles. `Err` only for failures that must abort the batch.
pub(super) fn check_loaded(
    definition: &DslDefinition,
    path: &Path,
    args: &CheckArgs,
) -> Result<bool, Error> {
    let builder = definition.builder()?.with_origin(origin(path));
    let analyzed = match builder.parse() {
        Ok(parsed) => parsed.analyze(),
        Err(err) => {
            eprintln!("error: {}: {}", origin(path), err);
            return Ok(false);
        }
    };

    report(analyzed.diagnostics(), analyzed.source_map(), args.color);
    let valid = if args.strict {
        !analyzed.diagnostics().has_errors() && !analyzed.diagnostics().has_warnings()
    } else {
        analyzed.is_valid()
    };
    if !valid {
        return Ok(false);
    }

    match analyzed.compile() {
        Ok(compiled) => {
            log::info!(
                "{} ({}): {} states",
                origin(path),
                definition.display_name(),
                compiled.automaton.state_count()
            );
            Ok(true)
        }
        Err(err) => {
            eprintln!("error: {}: {}", origin(path), err);
            Ok(false)
        }
    }
}
