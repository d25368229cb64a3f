#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core data structures for chainsmith.
//!
//! Two layers:
//! - **Actions**: the alphabet of a chained-call grammar, with a validated total order
//! - **Automaton**: the compiled, prefix-closed state machine queried by code emitters
//!
//! The compiler crate builds an [`Automaton`] from a grammar; everything here is
//! independent of the grammar syntax.

mod action;
mod automaton;
mod canonical;
pub mod colors;
mod dump;
mod export;
mod invariants;


pub use action::{Action, ActionId, ActionTable, DuplicateActionError};
pub use automaton::{Automaton, StateId, Successor, Transition};
pub use canonical::{CanonicalNumbering, canonical_numbering};
pub use colors::Colors;
pub use dump::AutomatonPrinter;
pub use export::{ExportedAction, ExportedAutomaton, ExportedState, ExportedTransition};
