//! Reference resolution over the subexpression graph.
//!
//! Depth-first from the root with a three-color marker per subexpression:
//! a reference to an unknown name is undefined, a reference to a name still
//! on the stack is recursive, and names never reached are unused. Literals of
//! every reached body are checked against the action table on the way.
//!
//! Unlike the compiler, which stops at the first problem, this pass reports
//! everything it finds.

use std::collections::{HashMap, HashSet};

use chainsmith_core::ActionTable;

use super::registry::{Registry, SubExpression};
use crate::diagnostics::{DiagnosticKind, Diagnostics};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Mark {
    InProgress,
    Done,
}

/// What resolution learned about the reference graph.
#[derive(Clone, Debug, Default)]
pub struct Resolution {
    /// Declared subexpressions the root never reaches.
    pub unused: Vec<String>,
}

pub fn resolve(registry: &Registry, actions: &ActionTable, diagnostics: &mut Diagnostics) -> Resolution {
    let mut resolver = Resolver {
        registry,
        actions,
        diagnostics,
        marks: HashMap::new(),
        resolution: Resolution::default(),
    };
    resolver.visit(registry.root());

    for sub in registry.iter() {
        let name = sub.name().expect("registered subexpressions are named");
        if resolver.marks.contains_key(name) {
            continue;
        }
        resolver
            .diagnostics
            .report(sub.source(), DiagnosticKind::UnusedSubExpression, sub.span())
            .message(name)
            .emit();
        resolver.resolution.unused.push(name.to_owned());
    }

    resolver.resolution
}

struct Resolver<'a> {
    registry: &'a Registry,
    actions: &'a ActionTable,
    diagnostics: &'a mut Diagnostics,
    marks: HashMap<&'a str, Mark>,
    resolution: Resolution,
}

impl<'a> Resolver<'a> {
    fn visit(&mut self, expr: &'a SubExpression) {
        self.check_literals(expr);

        let mut seen: HashSet<&str> = HashSet::new();
        for reference in expr.body().subexpr_refs() {
            let name = reference.text.as_str();
            if !seen.insert(name) {
                continue;
            }

            let Some(target) = self.registry.get(name) else {
                self.diagnostics
                    .report(expr.source(), DiagnosticKind::UndefinedSubExpression, reference.range)
                    .message(name)
                    .emit();
                continue;
            };

            match self.marks.get(name) {
                Some(Mark::Done) => {}
                Some(Mark::InProgress) => {
                    self.diagnostics
                        .report(expr.source(), DiagnosticKind::RecursiveSubExpression, reference.range)
                        .message(name)
                        .emit();
                }
                None => {
                    let key = target.name().expect("registered subexpressions are named");
                    self.marks.insert(key, Mark::InProgress);
                    self.visit(target);
                    self.marks.insert(key, Mark::Done);
                }
            }
        }
    }

    fn check_literals(&mut self, expr: &SubExpression) {
        for literal in expr.body().literals() {
            if self.actions.contains_name(&literal.text) {
                continue;
            }
            self.diagnostics
                .report(expr.source(), DiagnosticKind::UndefinedIdentifier, literal.range)
                .message(&literal.text)
                .emit();
        }
    }
}
