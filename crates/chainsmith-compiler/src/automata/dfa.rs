//! Deterministic automata: subset construction, minimization, and the
//! boolean operations the grammar compiler needs.
//!
//! Transitions are partial. A missing entry rejects the rest of the word, so
//! no explicit sink state exists unless [`Dfa::complement`] adds one.

use std::collections::{HashMap, VecDeque};

use super::nfa::{Fragment, Nfa, NfaNodeId};
use super::Symbol;

/// Index into the state table of a [`Dfa`].
pub type DfaStateId = u32;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dfa {
    alphabet_size: u32,
    /// Row-major: `table[state * alphabet_size + symbol]`.
    table: Vec<Option<DfaStateId>>,
    accepting: Vec<bool>,
    initial: DfaStateId,
}

impl Dfa {
    /// Automaton with a single, rejecting initial state.
    pub fn new(alphabet_size: u32) -> Self {
        let mut dfa = Self::without_states(alphabet_size);
        dfa.add_state(false);
        dfa
    }

    /// Accepts only the empty word.
    pub fn empty_word(alphabet_size: u32) -> Self {
        let mut dfa = Self::without_states(alphabet_size);
        dfa.add_state(true);
        dfa
    }

    fn without_states(alphabet_size: u32) -> Self {
        Self {
            alphabet_size,
            table: Vec::new(),
            accepting: Vec::new(),
            initial: 0,
        }
    }

    pub fn alphabet_size(&self) -> u32 {
        self.alphabet_size
    }

    pub fn state_count(&self) -> u32 {
        self.accepting.len() as u32
    }

    pub fn states(&self) -> std::ops::Range<DfaStateId> {
        0..self.state_count()
    }

    pub fn initial(&self) -> DfaStateId {
        self.initial
    }

    pub fn add_state(&mut self, accepting: bool) -> DfaStateId {
        let id = self.state_count();
        self.accepting.push(accepting);
        self.table
            .extend(std::iter::repeat_n(None, self.alphabet_size as usize));
        id
    }

    pub fn is_accepting(&self, state: DfaStateId) -> bool {
        self.accepting[state as usize]
    }

    /// Marks every state accepting, which makes the language prefix-closed.
    pub fn accept_all(&mut self) {
        self.accepting.fill(true);
    }

    #[inline]
    fn slot(&self, state: DfaStateId, symbol: Symbol) -> usize {
        debug_assert!(symbol < self.alphabet_size, "symbol {symbol} outside alphabet");
        state as usize * self.alphabet_size as usize + symbol as usize
    }

    pub fn transition(&self, state: DfaStateId, symbol: Symbol) -> Option<DfaStateId> {
        self.table[self.slot(state, symbol)]
    }

    pub fn set_transition(&mut self, state: DfaStateId, symbol: Symbol, target: Option<DfaStateId>) {
        let slot = self.slot(state, symbol);
        self.table[slot] = target;
    }

    pub fn clear_transitions(&mut self, state: DfaStateId) {
        let start = self.slot(state, 0);
        let end = start + self.alphabet_size as usize;
        self.table[start..end].fill(None);
    }

    /// Outgoing transitions of `state`, by ascending symbol.
    pub fn edges(&self, state: DfaStateId) -> impl Iterator<Item = (Symbol, DfaStateId)> + '_ {
        let start = state as usize * self.alphabet_size as usize;
        self.table[start..start + self.alphabet_size as usize]
            .iter()
            .enumerate()
            .filter_map(|(symbol, target)| target.map(|t| (symbol as Symbol, t)))
    }

    pub fn has_transitions(&self, state: DfaStateId) -> bool {
        self.edges(state).next().is_some()
    }

    pub fn transition_count(&self) -> usize {
        self.table.iter().filter(|t| t.is_some()).count()
    }

    pub fn accepts(&self, word: &[Symbol]) -> bool {
        let mut state = self.initial;
        for &symbol in word {
            match self.transition(state, symbol) {
                Some(next) => state = next,
                None => return false,
            }
        }
        self.is_accepting(state)
    }

    /// Subset construction over the part of `nfa` spanned by `fragment`.
    ///
    /// States are numbered in discovery order, visiting symbols in ascending
    /// order, so the result only depends on the input automaton.
    pub fn from_nfa(nfa: &Nfa, fragment: Fragment) -> Dfa {
        let mut dfa = Dfa::without_states(nfa.alphabet_size());
        let mut index: HashMap<Vec<NfaNodeId>, DfaStateId> = HashMap::new();
        let mut queue: VecDeque<Vec<NfaNodeId>> = VecDeque::new();

        let start = nfa.epsilon_closure([fragment.entry]);
        let initial = dfa.add_state(start.binary_search(&fragment.exit).is_ok());
        index.insert(start.clone(), initial);
        queue.push_back(start);

        while let Some(set) = queue.pop_front() {
            let from = index[&set];
            for symbol in 0..nfa.alphabet_size() {
                let moved: Vec<NfaNodeId> = set
                    .iter()
                    .flat_map(|&node| nfa.node(node).edges.iter())
                    .filter(|(range, _)| range.contains(symbol))
                    .map(|&(_, to)| to)
                    .collect();
                if moved.is_empty() {
                    continue;
                }

                let closure = nfa.epsilon_closure(moved);
                let to = match index.get(&closure) {
                    Some(&id) => id,
                    None => {
                        let id = dfa.add_state(closure.binary_search(&fragment.exit).is_ok());
                        index.insert(closure.clone(), id);
                        queue.push_back(closure);
                        id
                    }
                };
                dfa.set_transition(from, symbol, Some(to));
            }
        }

        dfa
    }

    /// States reachable from the initial state that can still reach an
    /// accepting state. The initial state is always live.
    fn live_states(&self) -> Vec<bool> {
        let n = self.state_count() as usize;

        let mut reachable = vec![false; n];
        let mut stack = vec![self.initial];
        reachable[self.initial as usize] = true;
        while let Some(state) = stack.pop() {
            for (_, next) in self.edges(state) {
                if !reachable[next as usize] {
                    reachable[next as usize] = true;
                    stack.push(next);
                }
            }
        }

        let mut reverse: Vec<Vec<DfaStateId>> = vec![Vec::new(); n];
        for state in self.states() {
            for (_, next) in self.edges(state) {
                reverse[next as usize].push(state);
            }
        }
        let mut productive = self.accepting.clone();
        let mut stack: Vec<DfaStateId> = self
            .states()
            .filter(|&s| self.accepting[s as usize])
            .collect();
        while let Some(state) = stack.pop() {
            for &prev in &reverse[state as usize] {
                if !productive[prev as usize] {
                    productive[prev as usize] = true;
                    stack.push(prev);
                }
            }
        }

        (0..n)
            .map(|s| reachable[s] && (productive[s] || s == self.initial as usize))
            .collect()
    }

    /// Smallest equivalent automaton.
    ///
    /// Drops unreachable and dead states, merges equivalent states by
    /// partition refinement, and numbers the result breadth-first from the
    /// initial state (which becomes state 0).
    pub fn minimize(&self) -> Dfa {
        let live = self.live_states();
        let target = |state: DfaStateId, symbol: Symbol| {
            self.transition(state, symbol)
                .filter(|&t| live[t as usize])
        };
        let live_ids: Vec<DfaStateId> = self.states().filter(|&s| live[s as usize]).collect();

        let mut block: Vec<u32> = self.accepting.iter().map(|&a| u32::from(a)).collect();
        let mut block_count = 0usize;
        loop {
            let mut signatures: HashMap<(u32, Vec<Option<u32>>), u32> = HashMap::new();
            let mut next = vec![0u32; block.len()];
            for &state in &live_ids {
                let row: Vec<Option<u32>> = (0..self.alphabet_size)
                    .map(|symbol| target(state, symbol).map(|t| block[t as usize]))
                    .collect();
                let fresh = signatures.len() as u32;
                next[state as usize] = *signatures
                    .entry((block[state as usize], row))
                    .or_insert(fresh);
            }
            block = next;
            if signatures.len() == block_count {
                break;
            }
            block_count = signatures.len();
        }

        let mut representative: Vec<Option<DfaStateId>> = vec![None; block_count];
        for &state in &live_ids {
            representative[block[state as usize] as usize].get_or_insert(state);
        }

        let mut result = Dfa::without_states(self.alphabet_size);
        let mut ids: Vec<Option<DfaStateId>> = vec![None; block_count];
        let mut queue = VecDeque::new();

        let initial_block = block[self.initial as usize];
        ids[initial_block as usize] = Some(result.add_state(self.is_accepting(self.initial)));
        queue.push_back(initial_block);

        while let Some(b) = queue.pop_front() {
            let from = ids[b as usize].expect("queued block has an id");
            let rep = representative[b as usize].expect("every block has a member");
            for symbol in 0..self.alphabet_size {
                let Some(t) = target(rep, symbol) else {
                    continue;
                };
                let tb = block[t as usize];
                let to = match ids[tb as usize] {
                    Some(id) => id,
                    None => {
                        let id = result.add_state(self.is_accepting(t));
                        ids[tb as usize] = Some(id);
                        queue.push_back(tb);
                        id
                    }
                };
                result.set_transition(from, symbol, Some(to));
            }
        }

        result
    }

    /// Automaton accepting exactly the words this one rejects.
    pub fn complement(&self) -> Dfa {
        let mut dfa = self.clone();
        let sink = dfa.add_state(false);
        for state in dfa.states() {
            for symbol in 0..dfa.alphabet_size {
                if dfa.transition(state, symbol).is_none() {
                    dfa.set_transition(state, symbol, Some(sink));
                }
            }
        }
        for accepting in &mut dfa.accepting {
            *accepting = !*accepting;
        }
        dfa
    }

    /// Product automaton accepting words both operands accept.
    pub fn intersect(&self, other: &Dfa) -> Dfa {
        assert_eq!(
            self.alphabet_size, other.alphabet_size,
            "intersecting automata over different alphabets"
        );

        let mut result = Dfa::without_states(self.alphabet_size);
        let mut index: HashMap<(DfaStateId, DfaStateId), DfaStateId> = HashMap::new();
        let mut queue = VecDeque::new();

        let start = (self.initial, other.initial);
        let initial = result.add_state(self.is_accepting(start.0) && other.is_accepting(start.1));
        index.insert(start, initial);
        queue.push_back(start);

        while let Some(pair) = queue.pop_front() {
            let from = index[&pair];
            for symbol in 0..self.alphabet_size {
                let (Some(a), Some(b)) = (
                    self.transition(pair.0, symbol),
                    other.transition(pair.1, symbol),
                ) else {
                    continue;
                };
                let to = match index.get(&(a, b)) {
                    Some(&id) => id,
                    None => {
                        let id = result.add_state(self.is_accepting(a) && other.is_accepting(b));
                        index.insert((a, b), id);
                        queue.push_back((a, b));
                        id
                    }
                };
                result.set_transition(from, symbol, Some(to));
            }
        }

        result
    }
}
