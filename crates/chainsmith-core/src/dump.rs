//! Text rendering of automata for snapshots and the CLI.
//!
//! One line per reachable state, in canonical order:
//!
//! ```text
//! S0: add → S1, to → ⊤
//! S1: days → S2
//! ```
//!
//! `⊤` marks a terminal transition, `∅` a state without transitions, and a
//! trailing `…` on a label a vararg-eligible transition.

use std::fmt::Write;

use crate::automaton::{Automaton, Successor};
use crate::colors::Colors;

pub struct AutomatonPrinter<'a> {
    automaton: &'a Automaton,
    colors: Colors,
}

impl<'a> AutomatonPrinter<'a> {
    pub fn new(automaton: &'a Automaton) -> Self {
        Self {
            automaton,
            colors: Colors::OFF,
        }
    }

    pub fn colored(mut self, enabled: bool) -> Self {
        self.colors = Colors::new(enabled);
        self
    }

    pub fn dump(&self) -> String {
        let mut out = String::new();
        self.format(&mut out).expect("String write never fails");
        out
    }

    fn format(&self, w: &mut String) -> std::fmt::Result {
        let c = self.colors;
        let numbering = self.automaton.canonical_numbering();

        for (id, &state) in numbering.order().iter().enumerate() {
            write!(w, "{}S{}{}:", c.blue, id, c.reset)?;

            let transitions = self.automaton.transitions(state);
            if transitions.is_empty() {
                writeln!(w, " {}∅{}", c.dim, c.reset)?;
                continue;
            }

            for (i, transition) in transitions.iter().enumerate() {
                let sep = if i == 0 { " " } else { ", " };
                let label = self.automaton.actions().label(transition.action);
                let varargs = if self.automaton.is_varargs_applicable(transition) {
                    "…"
                } else {
                    ""
                };
                write!(w, "{sep}{label}{varargs} {}→{} ", c.dim, c.reset)?;
                match transition.successor {
                    Successor::State(target) => {
                        write!(w, "{}S{}{}", c.blue, numbering.ensure_id(target), c.reset)?
                    }
                    Successor::Terminal => write!(w, "{}⊤{}", c.green, c.reset)?,
                }
            }
            writeln!(w)?;
        }

        Ok(())
    }
}

impl Automaton {
    pub fn printer(&self) -> AutomatonPrinter<'_> {
        AutomatonPrinter::new(self)
    }

    pub fn dump(&self) -> String {
        self.printer().dump()
    }
}
