//! Finite automata over a dense integer alphabet.
//!
//! The grammar compiler builds Thompson-style [`Nfa`] fragments, determinizes
//! them into [`Dfa`]s, and runs the usual language operations on those.
//! Nothing here knows about actions or anchors: symbols are plain integers
//! in `0..alphabet_size`.

mod dfa;
mod nfa;

#[cfg(test)]
mod nfa_tests;

pub use dfa::{Dfa, DfaStateId};
pub use nfa::{Fragment, Nfa, NfaNodeId};

/// Index into the alphabet.
pub type Symbol = u32;

/// Half-open range of symbols, `start..end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SymbolRange {
    pub start: Symbol,
    pub end: Symbol,
}

impl SymbolRange {
    pub fn new(start: Symbol, end: Symbol) -> Self {
        debug_assert!(start <= end, "inverted symbol range {start}..{end}");
        Self { start, end }
    }

    pub fn single(symbol: Symbol) -> Self {
        Self::new(symbol, symbol + 1)
    }

    #[inline]
    pub fn contains(&self, symbol: Symbol) -> bool {
        self.start <= symbol && symbol < self.end
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}
