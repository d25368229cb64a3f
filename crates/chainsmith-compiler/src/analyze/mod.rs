//! Semantic analysis of a parsed grammar.
//!
//! - Subexpression registry (registry)
//! - Reference resolution, cycle detection, unused subexpressions (resolve)

pub mod registry;
pub mod resolve;

#[cfg(test)]
mod resolve_tests;

pub use registry::{Registry, SubExpression};
pub use resolve::{Resolution, resolve};
