//! JSON definition files.
//!
//! ```json
//! {
//!   "name": "DateAdder",
//!   "syntax": "(<add> days)? (<add> hours)? to",
//!   "where": [{ "name": "add", "definedAs": "^add|/and" }],
//!   "actions": [
//!     { "name": "add", "params": ["int"] },
//!     { "name": "and", "params": ["int"] },
//!     { "name": "days" },
//!     { "name": "hours" },
//!     { "name": "to", "params": ["Date"], "returns": "Date", "terminator": true }
//!   ]
//! }
//! ```

use chainsmith_core::{Action, ActionTable, DuplicateActionError};
use serde::{Deserialize, Serialize};

use crate::grammar::{Compiled, GrammarBuilder};
use crate::{Error, Result};

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DslDefinition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub syntax: String,
    #[serde(default, rename = "where")]
    pub subexpressions: Vec<SubExpressionDefinition>,
    pub actions: Vec<ActionDefinition>,
    /// Default for actions that do not set `autoVarArgs` themselves.
    #[serde(default = "default_true")]
    pub auto_var_args: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SubExpressionDefinition {
    pub name: String,
    pub defined_as: String,
    #[serde(default)]
    pub own_scope: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ActionDefinition {
    pub name: String,
    /// Declaring operation, defaults to `name`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    #[serde(default)]
    pub params: Vec<String>,
    /// Last parameter is already variadic.
    #[serde(default)]
    pub varargs: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub returns: Option<String>,
    #[serde(default)]
    pub global: bool,
    #[serde(default)]
    pub terminator: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_var_args: Option<bool>,
    #[serde(default)]
    pub disabled: bool,
}

impl ActionDefinition {
    fn to_action(&self, auto_var_args_default: bool) -> Action {
        let auto_varargs = self.auto_var_args.unwrap_or(auto_var_args_default)
            && !self.params.is_empty()
            && !self.varargs;

        let mut action = Action::new(&self.name)
            .with_operation(self.method.as_deref().unwrap_or(&self.name))
            .with_params(&self.params)
            .auto_varargs(auto_varargs);
        if let Some(returns) = &self.returns {
            action = action.with_return_type(returns);
        }
        if self.global {
            action = action.global();
        }
        if self.terminator {
            action = action.terminator();
        }
        action
    }
}

impl DslDefinition {
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| Error::Definition(e.to_string()))
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("<unnamed>")
    }

    /// Enabled actions, in declaration order.
    pub fn action_table(&self) -> std::result::Result<ActionTable, DuplicateActionError> {
        ActionTable::new(
            self.actions
                .iter()
                .filter(|a| !a.disabled)
                .map(|a| a.to_action(self.auto_var_args)),
        )
    }

    pub fn builder(&self) -> Result<GrammarBuilder> {
        let mut builder = GrammarBuilder::new(self.action_table()?, &self.syntax);
        for sub in &self.subexpressions {
            builder = builder.subexpression(&sub.name, &sub.defined_as, sub.own_scope);
        }
        Ok(builder)
    }

    pub fn compile(&self) -> Result<Compiled> {
        self.builder()?.parse()?.analyze().compile()
    }
}
