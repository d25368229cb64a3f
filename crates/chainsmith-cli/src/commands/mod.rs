pub mod ast;
pub mod check;
pub mod definition_loader;
pub mod dump;
pub mod run_common;

#[cfg(test)]
mod ast_tests;
#[cfg(test)]
mod check_tests;
#[cfg(test)]
mod definition_loader_tests;
