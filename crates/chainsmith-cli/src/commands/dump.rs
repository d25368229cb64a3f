//! Show the compiled automaton.

use std::path::PathBuf;

use super::run_common::{analyze_or_exit, builder_or_exit, load_or_exit, parse_or_exit};

pub struct DumpArgs {
    pub definition: PathBuf,
    pub json: bool,
    pub color: bool,
}

pub fn run(args: DumpArgs) {
    let definition = load_or_exit(&args.definition);
    let builder = builder_or_exit(&definition, &args.definition);
    let analyzed = analyze_or_exit(parse_or_exit(builder, &args.definition), args.color);

    let compiled = match analyzed.compile() {
        Ok(compiled) => compiled,
        Err(err) => {
            eprintln!("error: {}", err);
            std::process::exit(1);
        }
    };

    if args.json {
        match serde_json::to_string_pretty(&compiled.automaton.export()) {
            Ok(json) => println!("{}", json),
            Err(err) => {
                eprintln!("error: failed to serialize automaton: {}", err);
                std::process::exit(1);
            }
        }
        return;
    }

    print!(
        "{}",
        compiled.automaton.printer().colored(args.color).dump()
    );
}
