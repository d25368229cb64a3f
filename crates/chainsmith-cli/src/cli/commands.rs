//! Command builders for the CLI.

use clap::Command;

use super::args::*;

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("chainsmith")
        .about("Compile chained-call grammars to fluent API automata")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(verbose_arg())
        .subcommand(ast_command())
        .subcommand(check_command())
        .subcommand(dump_command())
}

/// Show the parsed grammar of a definition.
pub fn ast_command() -> Command {
    Command::new("ast")
        .about("Show the parsed grammar and subexpressions")
        .after_help(
            r#"EXAMPLES:
  chainsmith ast dates.json          # grammar as parsed
  chainsmith ast dates.json --raw    # concrete syntax tree"#,
        )
        .arg(definition_path_arg())
        .arg(raw_arg())
        .arg(color_arg())
}

/// Validate definitions.
pub fn check_command() -> Command {
    Command::new("check")
        .about("Validate and compile definitions")
        .after_help(
            r#"EXAMPLES:
  chainsmith check dates.json                # silent on success
  chainsmith check a.json b.json --strict    # warnings fail too"#,
        )
        .arg(definition_paths_arg())
        .arg(strict_arg())
        .arg(color_arg())
}

/// Show the compiled automaton.
pub fn dump_command() -> Command {
    Command::new("dump")
        .about("Show the compiled automaton")
        .after_help(
            r#"EXAMPLES:
  chainsmith dump dates.json           # one line per state
  chainsmith dump dates.json --json    # input for code emitters"#,
        )
        .arg(definition_path_arg())
        .arg(json_arg())
        .arg(color_arg())
}
