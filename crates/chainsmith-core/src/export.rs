//! Serializable view of a compiled automaton for code emitters.

use serde::Serialize;

use crate::automaton::{Automaton, Successor};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportedAutomaton {
    pub initial_state: u32,
    pub actions: Vec<ExportedAction>,
    pub states: Vec<ExportedState>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportedAction {
    pub name: String,
    pub method: String,
    pub params: Vec<String>,
    pub returns: String,
    pub global: bool,
    pub terminator: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportedState {
    pub id: u32,
    pub transitions: Vec<ExportedTransition>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportedTransition {
    /// Index into `actions`.
    pub action: u32,
    /// `None` when the action ends the chain.
    pub successor: Option<u32>,
    pub varargs: bool,
}

impl Automaton {
    /// Canonically numbered snapshot; actions are listed in canonical order.
    pub fn export(&self) -> ExportedAutomaton {
        let table = self.actions();
        let numbering = self.canonical_numbering();

        let mut action_index = vec![0u32; table.len()];
        let mut actions = Vec::with_capacity(table.len());
        for (pos, &id) in table.all_actions().iter().enumerate() {
            action_index[id.index()] = pos as u32;
            let action = table.get(id);
            actions.push(ExportedAction {
                name: action.name().to_owned(),
                method: action.operation_name().to_owned(),
                params: action.param_types().to_vec(),
                returns: action.return_type().to_owned(),
                global: action.is_global(),
                terminator: action.is_terminator(),
            });
        }

        let states = numbering
            .order()
            .iter()
            .enumerate()
            .map(|(id, &state)| ExportedState {
                id: id as u32,
                transitions: self
                    .transitions(state)
                    .iter()
                    .map(|t| ExportedTransition {
                        action: action_index[t.action.index()],
                        successor: match t.successor {
                            Successor::State(target) => Some(numbering.ensure_id(target)),
                            Successor::Terminal => None,
                        },
                        varargs: self.is_varargs_applicable(t),
                    })
                    .collect(),
            })
            .collect();

        ExportedAutomaton {
            initial_state: 0,
            actions,
            states,
        }
    }
}
