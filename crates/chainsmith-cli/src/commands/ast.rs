//! Show the parsed grammar of a definition.

use std::fmt::Write;
use std::path::PathBuf;

use chainsmith_compiler::GrammarParsed;
use chainsmith_compiler::parser::dump_cst;

use super::run_common::{builder_or_exit, load_or_exit, parse_or_exit, report};

pub struct AstArgs {
    pub definition: PathBuf,
    pub raw: bool,
    pub color: bool,
}

pub fn run(args: AstArgs) {
    let definition = load_or_exit(&args.definition);
    let builder = builder_or_exit(&definition, &args.definition);
    let parsed = parse_or_exit(builder, &args.definition);

    report(parsed.diagnostics(), parsed.source_map(), args.color);

    // The CST is printable even for broken grammars, the AST is not.
    if parsed.diagnostics().has_errors() && !args.raw {
        std::process::exit(1);
    }

    print!("{}", render(&parsed, args.raw));
}

/// The root grammar first, then each subexpression in declaration order.
pub fn render(parsed: &GrammarParsed, raw: bool) -> String {
    let mut out = String::new();
    for (i, source) in parsed.sources().iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }

        let header = match source.name() {
            None => "<syntax>".to_owned(),
            Some(name) if source.is_own_scope() => format!("<{name}> (own scope)"),
            Some(name) => format!("<{name}>"),
        };
        writeln!(out, "# {header}").expect("String write never fails");

        if raw {
            out.push_str(&dump_cst(source.cst(), true));
            continue;
        }
        match source.ast() {
            Some(ast) => writeln!(out, "{ast}").expect("String write never fails"),
            None => out.push_str("(invalid)\n"),
        }
    }
    out
}
