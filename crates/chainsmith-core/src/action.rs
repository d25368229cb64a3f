//! Actions and their canonical ordering.
//!
//! An action is one step of a chain (one generated method). Several actions may
//! share a display name (overloads); they stay distinct because identity is the
//! [`ActionId`] handed out by the [`ActionTable`], never the field values.

use std::cmp::Ordering;
use std::fmt;

use indexmap::IndexMap;

/// Handle to an action inside an [`ActionTable`].
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct ActionId(u32);

impl ActionId {
    pub fn new(index: u32) -> Self {
        Self(index)
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "A{}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Action {
    name: String,
    operation: String,
    params: Vec<String>,
    return_type: String,
    global: bool,
    terminator: bool,
    auto_varargs: bool,
}

impl Action {
    /// Creates a non-global, non-terminating action without parameters.
    ///
    /// The declaring operation defaults to the display name and the return type to `void`.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            operation: name.clone(),
            name,
            params: Vec::new(),
            return_type: "void".to_owned(),
            global: false,
            terminator: false,
            auto_varargs: false,
        }
    }

    pub fn with_operation(mut self, operation: impl Into<String>) -> Self {
        self.operation = operation.into();
        self
    }

    pub fn with_params<I, S>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.params = params.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_return_type(mut self, return_type: impl Into<String>) -> Self {
        self.return_type = return_type.into();
        self
    }

    pub fn global(mut self) -> Self {
        self.global = true;
        self
    }

    pub fn terminator(mut self) -> Self {
        self.terminator = true;
        self
    }

    pub fn auto_varargs(mut self, enabled: bool) -> Self {
        self.auto_varargs = enabled;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn operation_name(&self) -> &str {
        &self.operation
    }

    pub fn param_types(&self) -> &[String] {
        &self.params
    }

    pub fn return_type(&self) -> &str {
        &self.return_type
    }

    pub fn is_global(&self) -> bool {
        self.global
    }

    pub fn is_terminator(&self) -> bool {
        self.terminator
    }

    pub fn is_auto_varargs(&self) -> bool {
        self.auto_varargs
    }

    /// Name plus parameter and return signature, e.g. `add(int)->void`.
    pub fn identity_key(&self) -> String {
        format!(
            "{}({})->{}",
            self.name,
            self.params.join(","),
            self.return_type
        )
    }

    fn sort_key(&self) -> (&str, &str, &[String], &str) {
        // Slices compare element-wise first, then by length.
        (
            self.name.as_str(),
            self.operation.as_str(),
            self.params.as_slice(),
            self.return_type.as_str(),
        )
    }
}

/// Two distinct actions that are indistinguishable by the canonical order.
///
/// Grammar authors cannot trigger this: it means whoever assembled the action
/// list produced the same action twice.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("duplicate action `{key}` ({first} and {second})")]
pub struct DuplicateActionError {
    pub key: String,
    pub first: ActionId,
    pub second: ActionId,
}

/// The validated set of actions a grammar is compiled against.
#[derive(Clone, Debug)]
pub struct ActionTable {
    actions: Vec<Action>,
    /// Ids sorted by the canonical total order.
    order: Vec<ActionId>,
    /// Position of each id within `order`.
    rank: Vec<u32>,
    /// Overload groups keyed by display name, in first-declaration order.
    groups: IndexMap<String, Vec<ActionId>>,
}

impl ActionTable {
    pub fn new(actions: impl IntoIterator<Item = Action>) -> Result<Self, DuplicateActionError> {
        let actions: Vec<Action> = actions.into_iter().collect();

        let mut order: Vec<ActionId> = (0..actions.len() as u32).map(ActionId).collect();
        order.sort_by(|a, b| {
            actions[a.index()]
                .sort_key()
                .cmp(&actions[b.index()].sort_key())
                .then(a.cmp(b))
        });

        for pair in order.windows(2) {
            let (first, second) = (pair[0], pair[1]);
            if actions[first.index()].sort_key() == actions[second.index()].sort_key() {
                return Err(DuplicateActionError {
                    key: actions[first.index()].identity_key(),
                    first,
                    second,
                });
            }
        }

        let mut rank = vec![0u32; actions.len()];
        for (pos, id) in order.iter().enumerate() {
            rank[id.index()] = pos as u32;
        }

        let mut groups: IndexMap<String, Vec<ActionId>> = IndexMap::new();
        for (idx, action) in actions.iter().enumerate() {
            groups
                .entry(action.name.clone())
                .or_default()
                .push(ActionId(idx as u32));
        }

        Ok(Self {
            actions,
            order,
            rank,
            groups,
        })
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn get(&self, id: ActionId) -> &Action {
        self.ensure_action(id)
    }

    pub(crate) fn raw(&self, id: ActionId) -> Option<&Action> {
        self.actions.get(id.index())
    }

    /// Actions in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (ActionId, &Action)> {
        self.actions
            .iter()
            .enumerate()
            .map(|(idx, action)| (ActionId(idx as u32), action))
    }

    /// All actions in canonical order.
    pub fn all_actions(&self) -> &[ActionId] {
        &self.order
    }

    /// Global actions in canonical order.
    pub fn global_actions(&self) -> impl Iterator<Item = ActionId> + '_ {
        self.order
            .iter()
            .copied()
            .filter(|id| self.actions[id.index()].global)
    }

    /// Actions flagged both global and terminator.
    pub fn global_terminators(&self) -> impl Iterator<Item = ActionId> + '_ {
        self.global_actions()
            .filter(|id| self.actions[id.index()].terminator)
    }

    /// Distinct display names in first-declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    /// Every overload declared under `name`, in declaration order.
    pub fn by_name(&self, name: &str) -> Option<&[ActionId]> {
        self.groups.get(name).map(Vec::as_slice)
    }

    pub fn contains_name(&self, name: &str) -> bool {
        self.groups.contains_key(name)
    }

    /// Compare two actions by the canonical total order.
    pub fn compare(&self, a: ActionId, b: ActionId) -> Ordering {
        self.rank[a.index()].cmp(&self.rank[b.index()])
    }

    /// Human-readable label: the display name, plus the parameter list when the
    /// name is overloaded.
    pub fn label(&self, id: ActionId) -> String {
        let action = self.get(id);
        let overloaded = self
            .groups
            .get(&action.name)
            .is_some_and(|group| group.len() > 1);
        if overloaded {
            format!("{}({})", action.name, action.params.join(", "))
        } else {
            action.name.clone()
        }
    }
}
