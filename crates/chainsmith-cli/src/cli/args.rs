//! Shared argument builders for CLI commands.
//!
//! Each function returns a `clap::Arg` so the same definition can be reused
//! across commands.

use std::path::PathBuf;

use clap::{Arg, ArgAction, value_parser};

/// One or more definition files (positional).
pub fn definition_paths_arg() -> Arg {
    Arg::new("definitions")
        .value_name("DEF")
        .value_parser(value_parser!(PathBuf))
        .num_args(1..)
        .required(true)
        .help("DSL definition files (JSON), `-` for stdin")
}

/// A single definition file (positional).
pub fn definition_path_arg() -> Arg {
    Arg::new("definition")
        .value_name("DEF")
        .value_parser(value_parser!(PathBuf))
        .required(true)
        .help("DSL definition file (JSON), `-` for stdin")
}

/// Color output control (--color).
pub fn color_arg() -> Arg {
    Arg::new("color")
        .long("color")
        .value_name("WHEN")
        .default_value("auto")
        .value_parser(["auto", "always", "never"])
        .help("Colorize output")
}

/// Print the lossless syntax tree (--raw).
pub fn raw_arg() -> Arg {
    Arg::new("raw")
        .long("raw")
        .action(ArgAction::SetTrue)
        .help("Print the concrete syntax tree, whitespace included")
}

/// Treat warnings as errors (--strict).
pub fn strict_arg() -> Arg {
    Arg::new("strict")
        .long("strict")
        .action(ArgAction::SetTrue)
        .help("Treat warnings as errors")
}

/// Machine-readable output (--json).
pub fn json_arg() -> Arg {
    Arg::new("json")
        .long("json")
        .action(ArgAction::SetTrue)
        .help("Print the automaton as JSON")
}

/// Log verbosity (-v, -vv).
pub fn verbose_arg() -> Arg {
    Arg::new("verbose")
        .short('v')
        .long("verbose")
        .action(ArgAction::Count)
        .global(true)
        .help("Log compiler passes (-v debug, -vv trace)")
}
