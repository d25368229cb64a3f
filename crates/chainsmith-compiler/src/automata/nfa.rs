//! Thompson construction with single entry / single exit fragments.

use super::dfa::{Dfa, DfaStateId};
use super::{Symbol, SymbolRange};

/// Index into `Nfa::nodes`.
pub type NfaNodeId = u32;

/// A sub-automaton with one entry and one exit node.
///
/// The fragment accepts a word when the exit is reachable from the entry by
/// consuming it. Combinators wire fragments together with epsilon edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fragment {
    pub entry: NfaNodeId,
    pub exit: NfaNodeId,
}

impl Fragment {
    pub fn new(entry: NfaNodeId, exit: NfaNodeId) -> Self {
        Self { entry, exit }
    }
}

#[derive(Debug, Clone, Default)]
pub(super) struct NfaNode {
    pub(super) edges: Vec<(SymbolRange, NfaNodeId)>,
    pub(super) epsilons: Vec<NfaNodeId>,
}

#[derive(Debug, Clone)]
pub struct Nfa {
    alphabet_size: u32,
    nodes: Vec<NfaNode>,
}

impl Nfa {
    pub fn new(alphabet_size: u32) -> Self {
        Self {
            alphabet_size,
            nodes: Vec::new(),
        }
    }

    pub fn alphabet_size(&self) -> u32 {
        self.alphabet_size
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn add_node(&mut self) -> NfaNodeId {
        let id = self.nodes.len() as NfaNodeId;
        self.nodes.push(NfaNode::default());
        id
    }

    pub(super) fn node(&self, id: NfaNodeId) -> &NfaNode {
        &self.nodes[id as usize]
    }

    /// Edge consuming any symbol of `range`.
    pub fn connect(&mut self, from: NfaNodeId, range: SymbolRange, to: NfaNodeId) {
        debug_assert!(range.end <= self.alphabet_size, "symbol outside alphabet");
        if !range.is_empty() {
            self.nodes[from as usize].edges.push((range, to));
        }
    }

    pub fn connect_epsilon(&mut self, from: NfaNodeId, to: NfaNodeId) {
        self.nodes[from as usize].epsilons.push(to);
    }

    // ─────────────────────────────────────────────────────────────────────
    // Fragment Combinators
    // ─────────────────────────────────────────────────────────────────────

    /// Accepts exactly one symbol from `range`.
    pub fn symbols(&mut self, range: SymbolRange) -> Fragment {
        let entry = self.add_node();
        let exit = self.add_node();
        self.connect(entry, range, exit);
        Fragment::new(entry, exit)
    }

    pub fn symbol(&mut self, symbol: Symbol) -> Fragment {
        self.symbols(SymbolRange::single(symbol))
    }

    /// Accepts only the empty word.
    pub fn epsilon(&mut self) -> Fragment {
        let entry = self.add_node();
        let exit = self.add_node();
        self.connect_epsilon(entry, exit);
        Fragment::new(entry, exit)
    }

    /// Accepts nothing.
    pub fn nothing(&mut self) -> Fragment {
        let entry = self.add_node();
        let exit = self.add_node();
        Fragment::new(entry, exit)
    }

    /// f1 → f2 → ... → fn
    pub fn sequence(&mut self, fragments: &[Fragment]) -> Fragment {
        match fragments {
            [] => self.epsilon(),
            [single] => *single,
            [first, .., last] => {
                for window in fragments.windows(2) {
                    self.connect_epsilon(window[0].exit, window[1].entry);
                }
                Fragment::new(first.entry, last.exit)
            }
        }
    }

    /// entry → [f1|f2|...|fn] → exit
    pub fn alternation(&mut self, fragments: &[Fragment]) -> Fragment {
        match fragments {
            [] => self.nothing(),
            [single] => *single,
            _ => {
                let entry = self.add_node();
                let exit = self.add_node();
                for f in fragments {
                    self.connect_epsilon(entry, f.entry);
                    self.connect_epsilon(f.exit, exit);
                }
                Fragment::new(entry, exit)
            }
        }
    }

    /// inner*
    ///
    /// ```text
    ///          ┌──────────────┐
    ///          ↓              │
    /// entry ─→ branch ─→ inner ─┘
    ///            │
    ///            └─→ exit
    /// ```
    pub fn zero_or_more(&mut self, inner: Fragment) -> Fragment {
        let branch = self.add_node();
        let exit = self.add_node();
        self.connect_epsilon(branch, inner.entry);
        self.connect_epsilon(branch, exit);
        self.connect_epsilon(inner.exit, branch);
        Fragment::new(branch, exit)
    }

    /// inner+
    pub fn one_or_more(&mut self, inner: Fragment) -> Fragment {
        let branch = self.add_node();
        let exit = self.add_node();
        self.connect_epsilon(inner.exit, branch);
        self.connect_epsilon(branch, inner.entry);
        self.connect_epsilon(branch, exit);
        Fragment::new(inner.entry, exit)
    }

    /// inner?
    pub fn optional(&mut self, inner: Fragment) -> Fragment {
        let branch = self.add_node();
        let exit = self.add_node();
        self.connect_epsilon(branch, inner.entry);
        self.connect_epsilon(branch, exit);
        self.connect_epsilon(inner.exit, exit);
        Fragment::new(branch, exit)
    }

    /// Copies `dfa` into this automaton.
    ///
    /// Every accepting state of the copy gets an epsilon edge to the fragment
    /// exit. Runs of symbols with the same target collapse into one edge.
    pub fn embed(&mut self, dfa: &Dfa) -> Fragment {
        assert_eq!(
            dfa.alphabet_size(),
            self.alphabet_size,
            "embedding automaton over a different alphabet"
        );

        let base = self.nodes.len() as NfaNodeId;
        for _ in 0..dfa.state_count() {
            self.add_node();
        }
        let exit = self.add_node();

        for state in dfa.states() {
            let from = base + state;
            let mut runs: Vec<(SymbolRange, DfaStateId)> = Vec::new();
            for (symbol, target) in dfa.edges(state) {
                match runs.last_mut() {
                    Some((range, t)) if range.end == symbol && *t == target => range.end += 1,
                    _ => runs.push((SymbolRange::single(symbol), target)),
                }
            }
            for (range, target) in runs {
                self.connect(from, range, base + target);
            }
            if dfa.is_accepting(state) {
                self.connect_epsilon(from, exit);
            }
        }

        Fragment::new(base + dfa.initial(), exit)
    }

    /// Nodes reachable from `seeds` through epsilon edges, seeds included.
    pub(super) fn epsilon_closure(&self, seeds: impl IntoIterator<Item = NfaNodeId>) -> Vec<NfaNodeId> {
        let mut seen = vec![false; self.nodes.len()];
        let mut stack: Vec<NfaNodeId> = Vec::new();
        for seed in seeds {
            if !seen[seed as usize] {
                seen[seed as usize] = true;
                stack.push(seed);
            }
        }

        let mut closure = Vec::new();
        while let Some(node) = stack.pop() {
            closure.push(node);
            for &next in &self.nodes[node as usize].epsilons {
                if !seen[next as usize] {
                    seen[next as usize] = true;
                    stack.push(next);
                }
            }
        }
        closure.sort_unstable();
        closure
    }
}
