//! Steps shared by the single-definition commands. Failures end the process.

use std::path::Path;

use chainsmith_compiler::{
    Diagnostics, DslDefinition, GrammarAnalyzed, GrammarBuilder, GrammarParsed, SourceMap,
};

use super::definition_loader::{load_definition, origin};

pub fn load_or_exit(path: &Path) -> DslDefinition {
    load_definition(path).unwrap_or_else(|err| {
        eprintln!("error: {}", err);
        std::process::exit(1);
    })
}

pub fn builder_or_exit(definition: &DslDefinition, path: &Path) -> GrammarBuilder {
    match definition.builder() {
        Ok(builder) => builder.with_origin(origin(path)),
        Err(err) => {
            eprintln!("error: {}", err);
            std::process::exit(1);
        }
    }
}

pub fn parse_or_exit(builder: GrammarBuilder, path: &Path) -> GrammarParsed {
    builder.parse().unwrap_or_else(|err| {
        eprintln!("error: {}: {}", origin(path), err);
        std::process::exit(1);
    })
}

/// Prints warnings, or everything and exits when there are errors.
pub fn analyze_or_exit(parsed: GrammarParsed, color: bool) -> GrammarAnalyzed {
    let analyzed = parsed.analyze();
    report(analyzed.diagnostics(), analyzed.source_map(), color);
    if !analyzed.is_valid() {
        std::process::exit(1);
    }
    analyzed
}

pub fn report(diagnostics: &Diagnostics, source_map: &SourceMap, color: bool) {
    if !diagnostics.is_empty() {
        eprint!("{}", diagnostics.render_colored(source_map, color));
    }
}
