//! Symbol layout for the compiler's internal automata.
//!
//! Actions get symbols `0..N`, grouped by display name so a literal becomes
//! a single [`SymbolRange`]. The three scope anchors follow at `N..N+3`; they
//! never leave the compiler.

use chainsmith_core::{ActionId, ActionTable};
use indexmap::IndexMap;

use crate::automata::{Symbol, SymbolRange};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScopeAnchor {
    /// `^`
    Start,
    /// `!`
    End,
    /// `/`
    Inner,
}

impl ScopeAnchor {
    const ALL: [ScopeAnchor; 3] = [ScopeAnchor::Start, ScopeAnchor::End, ScopeAnchor::Inner];

    fn offset(self) -> u32 {
        match self {
            ScopeAnchor::Start => 0,
            ScopeAnchor::End => 1,
            ScopeAnchor::Inner => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    Action(ActionId),
    Anchor(ScopeAnchor),
}

#[derive(Debug, Clone)]
pub struct Alphabet {
    /// Action behind each action symbol.
    actions: Vec<ActionId>,
    /// Symbol of each action, indexed by `ActionId`.
    symbols: Vec<Symbol>,
    names: IndexMap<String, SymbolRange>,
}

impl Alphabet {
    pub fn new(table: &ActionTable) -> Self {
        let mut actions = Vec::with_capacity(table.len());
        let mut names = IndexMap::new();

        for name in table.names() {
            let start = actions.len() as Symbol;
            actions.extend_from_slice(table.by_name(name).unwrap_or_default());
            names.insert(name.to_owned(), SymbolRange::new(start, actions.len() as Symbol));
        }

        let mut symbols = vec![0; table.len()];
        for (symbol, id) in actions.iter().enumerate() {
            symbols[id.index()] = symbol as Symbol;
        }

        Self {
            actions,
            symbols,
            names,
        }
    }

    /// Action symbols plus the anchors.
    pub fn size(&self) -> u32 {
        self.action_symbols() + ScopeAnchor::ALL.len() as u32
    }

    pub fn action_symbols(&self) -> u32 {
        self.actions.len() as u32
    }

    /// Symbols of every overload of `name`.
    pub fn range(&self, name: &str) -> Option<SymbolRange> {
        self.names.get(name).copied()
    }

    pub fn symbol(&self, action: ActionId) -> Symbol {
        self.symbols[action.index()]
    }

    pub fn anchor(&self, anchor: ScopeAnchor) -> Symbol {
        self.action_symbols() + anchor.offset()
    }

    pub fn action(&self, symbol: Symbol) -> Option<ActionId> {
        self.actions.get(symbol as usize).copied()
    }

    pub fn is_anchor(&self, symbol: Symbol) -> bool {
        matches!(self.classify(symbol), SymbolKind::Anchor(_))
    }

    pub fn classify(&self, symbol: Symbol) -> SymbolKind {
        if let Some(action) = self.action(symbol) {
            return SymbolKind::Action(action);
        }
        let anchor = ScopeAnchor::ALL
            .into_iter()
            .find(|a| self.anchor(*a) == symbol)
            .expect("symbol outside alphabet");
        SymbolKind::Anchor(anchor)
    }
}
